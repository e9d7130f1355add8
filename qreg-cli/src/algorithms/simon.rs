//! Problema de Simon: encontra o período XOR `s` de uma função 2-para-1
//!
//! Qubits `bits..2·bits` recebem a entrada `x`, qubits `0..bits` a saída.
//! Cada amostra devolve um `y` com `y·s = 0 (mod 2)`; com `bits − 1`
//! equações independentes o vetor `s` é o único não-nulo do núcleo.

use anyhow::{Result, bail, ensure};
use qreg_core::contract::apply_with;
use qreg_core::{ClassicalGate, Hadamard, QReg, SimConfig};
use rand::Rng;

/// Amostras por qubit antes de desistir
const ATTEMPTS_PER_BIT: usize = 16;

/// Resultado de uma execução
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimonOutcome {
    /// Segredo recuperado
    pub secret: usize,
    /// Equações independentes usadas (forma escalonada reduzida)
    pub equations: Vec<usize>,
    /// Medições realizadas
    pub samples: usize,
}

/// Índice da classe `{y, y ⊕ secret}` entre os representantes menores
///
/// Conta quantos `i ≤ min(y, y ⊕ secret)` são representantes da própria
/// classe, então `f(y) = f(y ⊕ secret)` e classes distintas têm imagens
/// distintas.
pub fn two_to_one(y: usize, secret: usize) -> usize {
    let smaller = y.min(y ^ secret);
    (0..=smaller).filter(|&i| i < i ^ secret).count() - 1
}

/// Sistema linear sobre GF(2) em forma escalonada reduzida
#[derive(Debug, Default, Clone)]
pub struct Gf2System {
    /// (bit pivô, linha)
    rows: Vec<(u32, usize)>,
}

impl Gf2System {
    /// Posto atual
    pub fn rank(&self) -> usize {
        self.rows.len()
    }

    /// Insere uma equação; `false` se ela já é combinação das anteriores
    pub fn insert(&mut self, mut equation: usize) -> bool {
        for &(pivot, row) in &self.rows {
            if equation >> pivot & 1 == 1 {
                equation ^= row;
            }
        }
        if equation == 0 {
            return false;
        }

        let pivot = usize::BITS - 1 - equation.leading_zeros();
        for (_, row) in &mut self.rows {
            if *row >> pivot & 1 == 1 {
                *row ^= equation;
            }
        }
        self.rows.push((pivot, equation));
        true
    }

    /// Linhas do sistema
    pub fn equations(&self) -> Vec<usize> {
        self.rows.iter().map(|&(_, row)| row).collect()
    }

    /// Vetor não-nulo do núcleo quando o posto é `bits − 1`
    pub fn null_vector(&self, bits: usize) -> Option<usize> {
        if bits == 0 || self.rank() + 1 != bits {
            return None;
        }
        let pivots = self.rows.iter().fold(0usize, |acc, &(p, _)| acc | 1 << p);
        let free = (0..bits).find(|&b| pivots >> b & 1 == 0)?;

        // s_free = 1; cada pivô p fica igual ao coeficiente de `free` na sua linha
        Some(self.rows.iter().fold(1 << free, |s, &(pivot, row)| {
            s | ((row >> free & 1) << pivot)
        }))
    }
}

/// Uma amostra do circuito: `H^n · U_f · H^n` nas entradas, mede as entradas
fn sample<R: Rng>(
    oracle: &ClassicalGate,
    h: &Hadamard,
    bits: usize,
    config: &SimConfig,
    rng: &mut R,
) -> Result<usize> {
    let inputs = (bits..2 * bits).collect::<Vec<_>>();
    let whole = (0..2 * bits).collect::<Vec<_>>();

    let mut qreg = QReg::new(2 * bits)?;
    apply_with(h, &mut qreg, &inputs, config)?;
    apply_with(oracle, &mut qreg, &whole, config)?;
    apply_with(h, &mut qreg, &inputs, config)?;
    Ok(qreg.measure(rng) >> bits)
}

/// Recupera `secret` de `2^bits` entradas
pub fn solve<R: Rng>(
    bits: usize,
    secret: usize,
    config: &SimConfig,
    rng: &mut R,
) -> Result<SimonOutcome> {
    ensure!(bits >= 1, "need at least one input qubit");
    ensure!(
        bits < usize::BITS as usize / 2 && secret != 0 && secret < 1 << bits,
        "secret {secret} must be in 1..2^{bits}"
    );

    let low = (1usize << bits) - 1;
    let oracle = ClassicalGate::new(
        move |x| x ^ two_to_one(x >> bits, secret),
        2 * bits,
    )?;
    let h = Hadamard::new(bits)?;
    debug_assert!((0..=low).all(|y| two_to_one(y, secret) <= low));

    let mut system = Gf2System::default();
    let mut samples = 0;
    while system.rank() + 1 < bits {
        if samples == ATTEMPTS_PER_BIT * bits {
            bail!("no independent equations after {samples} samples");
        }
        let y = sample(&oracle, &h, bits, config, rng)?;
        samples += 1;
        if system.insert(y) {
            tracing::debug!(equation = y, rank = system.rank(), "new equation");
        }
    }

    let Some(recovered) = system.null_vector(bits) else {
        bail!("linear system has rank {} for {bits} bits", system.rank());
    };
    Ok(SimonOutcome {
        secret: recovered,
        equations: system.equations(),
        samples,
    })
}
