//! # Biblioteca de gates padrão
//!
//! - **Hadamard(bits)**: `(-1)^popcount(row & col) / sqrt(2^bits)`
//! - **Diffusion(bits)**: `2|s⟩⟨s| − I`, com `|s⟩` a superposição uniforme
//!
//! Ambos são unitários por construção e não passam pela verificação.

use num_complex::Complex64;
use std::f64::consts::SQRT_2;

use crate::error::{QRegError, QRegResult};
use crate::gate::{Gate, check_bits};
use crate::register::QReg;

/// Transformada de Hadamard em `bits` qubits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hadamard {
    bits: usize,
    /// Valor positivo `1/sqrt(2^bits)`
    positive: Complex64,
}

impl Hadamard {
    /// Cria a transformada de Hadamard em `bits` qubits
    pub fn new(bits: usize) -> QRegResult<Self> {
        check_bits(bits)?;
        // 2^(bits/2), vezes √2 se ímpar: exato para número par de qubits
        let mut d = (1usize << (bits >> 1)) as f64;
        if bits & 1 == 1 {
            d *= SQRT_2;
        }
        Ok(Self {
            bits,
            positive: Complex64::new(1.0 / d, 0.0),
        })
    }
}

impl Gate for Hadamard {
    fn name(&self) -> &str {
        "H"
    }

    fn qubit_count(&self) -> usize {
        self.bits
    }

    fn element(&self, row: usize, col: usize) -> Complex64 {
        if (row & col).count_ones() & 1 == 1 {
            -self.positive
        } else {
            self.positive
        }
    }
}

/// Operador de difusão de Grover em `bits` qubits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diffusion {
    bits: usize,
    /// `2/2^bits`
    off_diagonal: Complex64,
    /// `2/2^bits − 1`
    diagonal: Complex64,
}

impl Diffusion {
    /// Cria o operador de difusão em `bits` qubits
    pub fn new(bits: usize) -> QRegResult<Self> {
        check_bits(bits)?;
        let a2 = Complex64::new(2.0 / (1usize << bits) as f64, 0.0);
        Ok(Self {
            bits,
            off_diagonal: a2,
            diagonal: a2 - Complex64::new(1.0, 0.0),
        })
    }
}

impl Gate for Diffusion {
    fn name(&self) -> &str {
        "D"
    }

    fn qubit_count(&self) -> usize {
        self.bits
    }

    fn element(&self, row: usize, col: usize) -> Complex64 {
        if row == col {
            self.diagonal
        } else {
            self.off_diagonal
        }
    }
}

fn range_bits(start: usize, end: usize) -> QRegResult<usize> {
    if end <= start {
        return Err(QRegError::invalid(format!("empty qubit range {start}..{end}")));
    }
    Ok(end - start)
}

/// Hadamard em um qubit
pub fn hadamard(qreg: &mut QReg, target: usize) -> QRegResult<()> {
    Hadamard::new(1)?.apply(qreg, &[target])
}

/// Hadamard nos qubits `start..end`
pub fn hadamard_range(qreg: &mut QReg, start: usize, end: usize) -> QRegResult<()> {
    Hadamard::new(range_bits(start, end)?)?.apply_range(qreg, start)
}

/// Hadamard no registrador inteiro
pub fn hadamard_reg(qreg: &mut QReg) -> QRegResult<()> {
    hadamard_range(qreg, 0, qreg.width())
}

/// Difusão em um qubit
pub fn diffusion(qreg: &mut QReg, target: usize) -> QRegResult<()> {
    Diffusion::new(1)?.apply(qreg, &[target])
}

/// Difusão nos qubits `start..end`
pub fn diffusion_range(qreg: &mut QReg, start: usize, end: usize) -> QRegResult<()> {
    Diffusion::new(range_bits(start, end)?)?.apply_range(qreg, start)
}

/// Difusão no registrador inteiro
pub fn diffusion_reg(qreg: &mut QReg) -> QRegResult<()> {
    diffusion_range(qreg, 0, qreg.width())
}
