//! Busca de Grover com oráculo de fase via ancilla
//!
//! Qubit 0 é a ancilla; os qubits `1..=bits` guardam o índice procurado.

use qreg_core::contract::apply_with;
use qreg_core::{ClassicalGate, Diffusion, Hadamard, QReg, QRegError, QRegResult, SimConfig};
use rand::Rng;
use std::f64::consts::PI;

/// Resultado de uma busca
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Índice medido
    pub found: usize,
    /// Iterações de Grover executadas
    pub iterations: usize,
    /// Probabilidade do item marcado antes da medição
    pub success_probability: f64,
}

/// ⌊π·√(2^bits) / 4⌋
pub fn iterations(bits: usize) -> usize {
    (PI * ((1usize << bits) as f64).sqrt() / 4.0) as usize
}

/// Procura `marked` entre `2^bits` itens
pub fn search<R: Rng>(
    bits: usize,
    marked: usize,
    config: &SimConfig,
    rng: &mut R,
) -> QRegResult<SearchOutcome> {
    if bits == 0 {
        return Err(QRegError::InvalidArgument(
            "search space needs at least one qubit".into(),
        ));
    }
    let width = bits + 1;
    let oracle = ClassicalGate::new(
        move |x| if x >> 1 == marked { x ^ 1 } else { x },
        width,
    )?;
    if marked >= 1 << bits {
        return Err(QRegError::InvalidArgument(format!(
            "marked item {marked} is outside 0..{}",
            1usize << bits
        )));
    }

    let h = Hadamard::new(1)?;
    let d = Diffusion::new(bits)?;
    let inputs = (1..width).collect::<Vec<_>>();
    let whole = (0..width).collect::<Vec<_>>();

    let mut qreg = QReg::new(width)?;
    for &qubit in &inputs {
        apply_with(&h, &mut qreg, &[qubit], config)?;
    }

    let iterations = iterations(bits);
    for round in 0..iterations {
        qreg.set_bit(0, 1)?;
        apply_with(&h, &mut qreg, &[0], config)?;
        apply_with(&oracle, &mut qreg, &whole, config)?;
        apply_with(&d, &mut qreg, &inputs, config)?;
        tracing::debug!(round, "grover iteration");
    }

    let success_probability =
        qreg.state_probability(marked << 1) + qreg.state_probability((marked << 1) | 1);
    let found = qreg.measure(rng) >> 1;
    Ok(SearchOutcome {
        found,
        iterations,
        success_probability,
    })
}
