//! Amostragem da superposição uniforme `H^{⊗n}|0⟩`

use qreg_core::contract::apply_with;
use qreg_core::{Hadamard, QReg, QRegResult, SimConfig};
use rand::Rng;

/// Contagem de medições por estado da base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    /// Qubits do registrador amostrado
    pub width: usize,
    /// `counts[state]`
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Total de amostras
    pub fn shots(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Frequência relativa de `state`
    pub fn frequency(&self, state: usize) -> f64 {
        let shots = self.shots();
        if shots == 0 {
            return 0.0;
        }
        self.counts[state] as f64 / shots as f64
    }
}

/// Prepara `H^{⊗width}|0⟩` e mede `shots` vezes sem colapsar
pub fn uniform<R: Rng>(
    width: usize,
    shots: usize,
    config: &SimConfig,
    rng: &mut R,
) -> QRegResult<Histogram> {
    let mut qreg = QReg::new(width)?;
    if width > 0 {
        let targets = (0..width).collect::<Vec<_>>();
        apply_with(&Hadamard::new(width)?, &mut qreg, &targets, config)?;
    }

    let mut counts = vec![0; qreg.state_count()];
    for _ in 0..shots {
        counts[qreg.measure_preserving(rng)] += 1;
    }
    Ok(Histogram { width, counts })
}
