//! Registrador quântico denso (vetor de estado)
//!
//! O índice de cada amplitude é o estado da base: o bit `i` do índice é o
//! valor clássico do qubit `i`.

use num_complex::Complex64;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::DEFAULT_TOLERANCE;
use crate::error::{QRegError, QRegResult};

pub(crate) const ZERO: Complex64 = Complex64::new(0.0, 0.0);
pub(crate) const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Registrador de `width` qubits com `2^width` amplitudes complexas
///
/// A desserialização passa por [`QReg::from_amplitudes`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawQReg")]
pub struct QReg {
    /// Número de qubits
    width: usize,
    /// Amplitudes indexadas pelo estado da base
    amplitudes: Vec<Complex64>,
}

/// Forma serializada, ainda sem validação
#[derive(Deserialize)]
struct RawQReg {
    width: usize,
    amplitudes: Vec<Complex64>,
}

impl TryFrom<RawQReg> for QReg {
    type Error = QRegError;

    fn try_from(raw: RawQReg) -> QRegResult<Self> {
        let qreg = Self::from_amplitudes(raw.amplitudes)?;
        if qreg.width != raw.width {
            return Err(QRegError::invalid(format!(
                "width {} does not match {} amplitudes",
                raw.width,
                qreg.amplitudes.len()
            )));
        }
        Ok(qreg)
    }
}

/// Número de estados da base para `width` qubits
fn basis_len(width: usize) -> QRegResult<usize> {
    if width >= usize::BITS as usize {
        return Err(QRegError::invalid(format!(
            "register width {width} does not fit in memory"
        )));
    }
    Ok(1usize << width)
}

impl QReg {
    /// Cria registrador no estado |0…0⟩
    pub fn new(width: usize) -> QRegResult<Self> {
        let mut amplitudes = vec![ZERO; basis_len(width)?];
        amplitudes[0] = ONE;
        Ok(Self { width, amplitudes })
    }

    /// Cria registrador no estado da base |value⟩
    pub fn with_value(width: usize, value: usize) -> QRegResult<Self> {
        let mut qreg = Self::new(width)?;
        qreg.reset(value)?;
        Ok(qreg)
    }

    /// Cria registrador a partir de `width` dígitos binários, bit mais alto primeiro
    pub fn from_bits(width: usize, bits: &[u8]) -> QRegResult<Self> {
        if bits.len() != width {
            return Err(QRegError::invalid(format!(
                "expected {width} binary digits, got {}",
                bits.len()
            )));
        }
        let mut value = 0usize;
        for &bit in bits {
            if bit > 1 {
                return Err(QRegError::invalid(format!(
                    "binary digit {bit} should be either 0 or 1"
                )));
            }
            value = (value << 1) | bit as usize;
        }
        Self::with_value(width, value)
    }

    /// Construtor genérico conforme a quantidade de valores iniciais
    ///
    /// - nenhum valor: |0…0⟩
    /// - um valor: o inteiro do estado da base
    /// - `width` valores: dígitos binários, bit mais alto primeiro
    pub fn create(width: usize, values: &[usize]) -> QRegResult<Self> {
        match values.len() {
            0 => Self::new(width),
            1 => Self::with_value(width, values[0]),
            n if n == width => {
                if let Some(&digit) = values.iter().find(|&&v| v > 1) {
                    return Err(QRegError::invalid(format!(
                        "binary digit {digit} should be either 0 or 1"
                    )));
                }
                let bits = values.iter().map(|&v| v as u8).collect::<Vec<_>>();
                Self::from_bits(width, &bits)
            }
            n => Err(QRegError::invalid(format!(
                "a register of width {width} takes 0, 1 or {width} initial values, got {n}"
            ))),
        }
    }

    /// Cria registrador a partir de um vetor de amplitudes normalizado
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> QRegResult<Self> {
        if !amplitudes.len().is_power_of_two() {
            return Err(QRegError::invalid(format!(
                "amplitude count {} is not a power of two",
                amplitudes.len()
            )));
        }
        let total: f64 = amplitudes.iter().map(|a| a.norm_sqr()).sum();
        if (total - 1.0).abs() > DEFAULT_TOLERANCE {
            return Err(QRegError::invalid(format!(
                "amplitudes are not normalized: total probability {total}"
            )));
        }
        let width = amplitudes.len().trailing_zeros() as usize;
        Ok(Self { width, amplitudes })
    }

    /// Reinicia o registrador no estado da base |value⟩
    pub fn reset(&mut self, value: usize) -> QRegResult<()> {
        if value >= self.amplitudes.len() {
            return Err(QRegError::invalid(format!(
                "value of {value} is too large for a register of width {}",
                self.width
            )));
        }
        self.amplitudes.fill(ZERO);
        self.amplitudes[value] = ONE;
        Ok(())
    }

    /// Número de qubits
    pub fn width(&self) -> usize {
        self.width
    }

    /// Número de estados da base (`2^width`)
    pub fn state_count(&self) -> usize {
        self.amplitudes.len()
    }

    /// Amplitudes, indexadas pelo estado da base
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Amplitude de um estado da base
    pub fn amplitude(&self, state: usize) -> Option<Complex64> {
        self.amplitudes.get(state).copied()
    }

    /// Troca o vetor de amplitudes inteiro de uma vez
    pub(crate) fn replace_amplitudes(&mut self, amplitudes: Vec<Complex64>) {
        debug_assert_eq!(amplitudes.len(), self.amplitudes.len());
        self.amplitudes = amplitudes;
    }

    fn check_qubit(&self, qubit: usize) -> QRegResult<()> {
        if qubit >= self.width {
            return Err(QRegError::InvalidTarget {
                target: qubit,
                width: self.width,
            });
        }
        Ok(())
    }

    fn check_value(value: u8) -> QRegResult<()> {
        if value > 1 {
            return Err(QRegError::InvalidValue(value));
        }
        Ok(())
    }

    /// Probabilidade de observar o estado da base `state`
    ///
    /// # Panics
    ///
    /// Se `state >= 2^width`.
    pub fn state_probability(&self, state: usize) -> f64 {
        self.amplitudes[state].norm_sqr()
    }

    /// Soma das probabilidades de todos os estados (deve ser 1)
    pub fn total_probability(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Probabilidade de observar `value` no qubit `qubit`
    pub fn bit_probability(&self, qubit: usize, value: u8) -> QRegResult<f64> {
        self.check_qubit(qubit)?;
        Self::check_value(value)?;
        Ok(self.bit_probability_unchecked(qubit, value))
    }

    /// Percorre só os estados com o bit ligado e desloca para o lado pedido
    fn bit_probability_unchecked(&self, qubit: usize, value: u8) -> f64 {
        let bit = 1usize << qubit;
        let bitnot = ((1 - value) as usize) << qubit;
        let mut prob = 0.0;
        let mut state = bit;
        while state < self.amplitudes.len() {
            prob += self.state_probability(state - bitnot);
            state = (state + 1) | bit;
        }
        prob
    }

    /// Força o qubit `qubit` para `value`
    ///
    /// Com probabilidade positiva é uma medição projetiva com renormalização.
    /// Com probabilidade zero o qubit é determinístico no valor oposto e as
    /// amplitudes são permutadas para o lado pedido.
    pub fn set_bit(&mut self, qubit: usize, value: u8) -> QRegResult<()> {
        self.check_qubit(qubit)?;
        Self::check_value(value)?;

        let bit = 1usize << qubit;
        let bitval = (value as usize) << qubit;
        let bitnot = ((1 - value) as usize) << qubit;
        let prob = self.bit_probability_unchecked(qubit, value);

        if prob > 0.0 {
            let factor = 1.0 / prob.sqrt();
            for (state, amp) in self.amplitudes.iter_mut().enumerate() {
                if state & bit == bitval {
                    *amp *= factor;
                } else {
                    *amp = ZERO;
                }
            }
            tracing::trace!(qubit, value, prob, "bit collapsed");
        } else {
            let mut state = bit;
            while state < self.amplitudes.len() {
                let from = state - bitval;
                let to = state - bitnot;
                let moved = self.amplitudes[from];
                self.amplitudes[to] += moved;
                self.amplitudes[from] = ZERO;
                state = (state + 1) | bit;
            }
            tracing::trace!(qubit, value, "bit flipped");
        }
        Ok(())
    }

    /// Mede um qubit sem colapsar o estado
    pub fn measure_bit_preserving<R: Rng + ?Sized>(&self, qubit: usize, rng: &mut R) -> QRegResult<u8> {
        self.check_qubit(qubit)?;
        let r: f64 = rng.gen_range(0.0..1.0);
        if r < self.bit_probability_unchecked(qubit, 0) {
            Ok(0)
        } else {
            Ok(1)
        }
    }

    /// Mede um qubit e colapsa o estado para o resultado
    pub fn measure_bit<R: Rng + ?Sized>(&mut self, qubit: usize, rng: &mut R) -> QRegResult<u8> {
        let value = self.measure_bit_preserving(qubit, rng)?;
        self.set_bit(qubit, value)?;
        Ok(value)
    }

    /// Mede o registrador inteiro sem colapsar o estado
    pub fn measure_preserving<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let r: f64 = rng.gen_range(0.0..1.0);
        let mut sum = 0.0;
        for state in 0..self.amplitudes.len() {
            sum += self.state_probability(state);
            if r < sum {
                return state;
            }
        }
        self.amplitudes.len() - 1
    }

    /// Mede o registrador inteiro e colapsa para o estado observado
    ///
    /// Só o sinal da parte real é preservado; a fase é descartada.
    pub fn measure<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let value = self.measure_preserving(rng);
        let amp = if self.amplitudes[value].re > 0.0 {
            ONE
        } else {
            -ONE
        };
        self.amplitudes.fill(ZERO);
        self.amplitudes[value] = amp;
        tracing::trace!(value, "register collapsed");
        value
    }

    /// Visão que imprime só as amplitudes não nulas
    pub fn nonzero(&self) -> NonZeroStates<'_> {
        NonZeroStates { qreg: self }
    }

    fn fmt_state(&self, f: &mut fmt::Formatter<'_>, state: usize) -> fmt::Result {
        let amp = self.amplitudes[state];
        let padding = (self.amplitudes.len() - 1).to_string().len();
        let bits = self.width;
        writeln!(
            f,
            "({:+.6}{:+.6}i){:.6}|({:>padding$}){:0bits$b}>",
            amp.re,
            amp.im,
            self.state_probability(state),
            state,
            state,
        )
    }
}

impl fmt::Display for QReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for state in 0..self.amplitudes.len() {
            self.fmt_state(f, state)?;
        }
        Ok(())
    }
}

/// Dump dos estados com amplitude não nula
#[derive(Debug, Clone, Copy)]
pub struct NonZeroStates<'a> {
    qreg: &'a QReg,
}

impl fmt::Display for NonZeroStates<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (state, amp) in self.qreg.amplitudes.iter().enumerate() {
            if *amp != ZERO {
                self.qreg.fmt_state(f, state)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn is_basis_state(qreg: &QReg, basis: usize) -> bool {
        qreg.amplitudes()
            .iter()
            .enumerate()
            .all(|(i, &a)| if i == basis { a == ONE } else { a == ZERO })
    }

    fn plus_minus() -> QReg {
        // (|0⟩ - |1⟩)/√2 no qubit 0, qubit 1 em |0⟩
        QReg::from_amplitudes(vec![
            Complex64::new(FRAC_1_SQRT_2, 0.0),
            Complex64::new(-FRAC_1_SQRT_2, 0.0),
            ZERO,
            ZERO,
        ])
        .unwrap()
    }

    #[test]
    fn test_create_forms() {
        assert!(is_basis_state(&QReg::create(4, &[]).unwrap(), 0));
        assert!(is_basis_state(&QReg::create(8, &[3]).unwrap(), 3));
        assert!(is_basis_state(&QReg::create(5, &[0, 1, 1, 0, 1]).unwrap(), 13));
    }

    #[test]
    fn test_create_zero_width() {
        let qreg = QReg::new(0).unwrap();
        assert_eq!(qreg.state_count(), 1);
        assert!(is_basis_state(&qreg, 0));
    }

    #[test]
    fn test_create_rejects_bad_arguments() {
        assert!(matches!(
            QReg::create(4, &[0, 1]),
            Err(QRegError::InvalidArgument(_))
        ));
        assert!(matches!(
            QReg::create(3, &[8]),
            Err(QRegError::InvalidArgument(_))
        ));
        assert!(matches!(
            QReg::create(3, &[0, 2, 1]),
            Err(QRegError::InvalidArgument(_))
        ));
        assert!(matches!(
            QReg::new(usize::BITS as usize),
            Err(QRegError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_create_reports_wide_digit() {
        assert_eq!(
            QReg::create(2, &[0, 300]),
            Err(QRegError::InvalidArgument(
                "binary digit 300 should be either 0 or 1".to_string()
            ))
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let qreg = plus_minus();
        let json = serde_json::to_string(&qreg).unwrap();
        let back: QReg = serde_json::from_str(&json).unwrap();
        assert_eq!(back, qreg);
    }

    #[test]
    fn test_deserialize_validates_shape_and_norm() {
        // largura não bate com o número de amplitudes
        assert!(serde_json::from_str::<QReg>(r#"{"width":3,"amplitudes":[[1.0,0.0]]}"#).is_err());
        // não normalizado
        assert!(
            serde_json::from_str::<QReg>(r#"{"width":1,"amplitudes":[[3.0,0.0],[4.0,0.0]]}"#)
                .is_err()
        );
        // tamanho que não é potência de 2
        assert!(
            serde_json::from_str::<QReg>(
                r#"{"width":2,"amplitudes":[[1.0,0.0],[0.0,0.0],[0.0,0.0]]}"#
            )
            .is_err()
        );
        let ok = serde_json::from_str::<QReg>(r#"{"width":1,"amplitudes":[[0.0,0.0],[1.0,0.0]]}"#)
            .unwrap();
        assert!(is_basis_state(&ok, 1));
    }

    #[test]
    fn test_from_amplitudes_validates() {
        assert!(QReg::from_amplitudes(vec![ONE, ZERO, ZERO]).is_err());
        assert!(QReg::from_amplitudes(vec![ONE, ONE]).is_err());
        assert_eq!(plus_minus().width(), 2);
    }

    #[test]
    fn test_reset() {
        let mut qreg = plus_minus();
        qreg.reset(2).unwrap();
        assert!(is_basis_state(&qreg, 2));
        assert!(qreg.reset(4).is_err());
        assert!(is_basis_state(&qreg, 2));
    }

    #[test]
    fn test_bit_probability() {
        let qreg = plus_minus();
        assert!((qreg.bit_probability(0, 0).unwrap() - 0.5).abs() < 1e-12);
        assert!((qreg.bit_probability(0, 1).unwrap() - 0.5).abs() < 1e-12);
        assert!((qreg.bit_probability(1, 0).unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(qreg.bit_probability(1, 1).unwrap(), 0.0);
    }

    #[test]
    fn test_bit_probability_rejects_bad_input() {
        let qreg = plus_minus();
        assert_eq!(
            qreg.bit_probability(2, 0),
            Err(QRegError::InvalidTarget { target: 2, width: 2 })
        );
        assert_eq!(qreg.bit_probability(0, 2), Err(QRegError::InvalidValue(2)));
    }

    #[test]
    fn test_set_bit_flips_deterministic_qubit() {
        let mut qreg = QReg::with_value(1, 0).unwrap();
        qreg.set_bit(0, 1).unwrap();
        assert_eq!(qreg.amplitudes()[0], ZERO);
        assert_eq!(qreg.amplitudes()[1], ONE);
    }

    #[test]
    fn test_set_bit_flip_carries_other_qubits() {
        // qubit 0 em |−⟩, qubit 1 determinístico em 0
        let a = Complex64::new(FRAC_1_SQRT_2, 0.0);
        let mut qreg = QReg::from_amplitudes(vec![a, -a, ZERO, ZERO]).unwrap();
        qreg.set_bit(1, 1).unwrap();
        assert_eq!(qreg.amplitudes(), &[ZERO, ZERO, a, -a]);

        qreg.set_bit(1, 0).unwrap();
        assert_eq!(qreg.amplitudes(), &[a, -a, ZERO, ZERO]);
    }

    #[test]
    fn test_set_bit_collapses_superposition() {
        let mut qreg = plus_minus();
        qreg.set_bit(0, 1).unwrap();
        assert_eq!(qreg.amplitudes()[0], ZERO);
        assert!((qreg.amplitudes()[1].re + 1.0).abs() < 1e-12);
        assert!((qreg.total_probability() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_set_bit_zeroes_other_side() {
        let amp = Complex64::new(0.5, 0.0);
        let mut qreg = QReg::from_amplitudes(vec![amp; 4]).unwrap();
        qreg.set_bit(1, 0).unwrap();
        for state in 0..4 {
            if state & 0b10 != 0 {
                assert_eq!(qreg.state_probability(state), 0.0);
            }
        }
        assert!((qreg.total_probability() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_set_bit_invalid_value_leaves_state() {
        let mut qreg = plus_minus();
        let before = qreg.clone();
        assert_eq!(qreg.set_bit(0, 3), Err(QRegError::InvalidValue(3)));
        assert!(qreg.set_bit(5, 1).is_err());
        assert_eq!(qreg, before);
    }

    #[test]
    fn test_measure_bit_collapses() {
        let mut rng = random::seeded(11);
        for _ in 0..32 {
            let mut qreg = plus_minus();
            let bit = qreg.measure_bit(0, &mut rng).unwrap();
            assert!((qreg.bit_probability(0, bit).unwrap() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_measure_preserving_does_not_mutate() {
        let mut rng = random::seeded(3);
        let qreg = plus_minus();
        let before = qreg.clone();
        for _ in 0..16 {
            let state = qreg.measure_preserving(&mut rng);
            assert!(state < 2);
            let bit = qreg.measure_bit_preserving(0, &mut rng).unwrap();
            assert!(bit < 2);
        }
        assert_eq!(qreg, before);
    }

    #[test]
    fn test_measure_preserves_real_sign() {
        let mut rng = random::seeded(5);
        for _ in 0..32 {
            let mut qreg = plus_minus();
            let state = qreg.measure(&mut rng);
            let expected = if state == 0 { ONE } else { -ONE };
            assert_eq!(qreg.amplitudes()[state], expected);
            assert!((qreg.total_probability() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_measure_basis_state_is_certain() {
        let mut rng = random::seeded(99);
        let mut qreg = QReg::with_value(3, 6).unwrap();
        for _ in 0..8 {
            assert_eq!(qreg.measure(&mut rng), 6);
        }
    }

    #[test]
    fn test_copy_is_independent() {
        let original = plus_minus();
        let mut copy = original.clone();
        copy.set_bit(0, 0).unwrap();
        assert_ne!(copy, original);
        assert!((original.bit_probability(0, 1).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_display_formats() {
        let qreg = QReg::with_value(4, 10).unwrap();
        let dump = qreg.to_string();
        assert_eq!(dump.lines().count(), 16);
        assert_eq!(
            dump.lines().nth(10).unwrap(),
            "(+1.000000+0.000000i)1.000000|(10)1010>"
        );
        assert_eq!(
            dump.lines().next().unwrap(),
            "(+0.000000+0.000000i)0.000000|( 0)0000>"
        );

        let nonzero = qreg.nonzero().to_string();
        assert_eq!(nonzero, "(+1.000000+0.000000i)1.000000|(10)1010>\n");
    }
}
