//! # Gates — Operadores unitários definidos por acesso a elementos
//!
//! Um gate é uma matriz `2^bits × 2^bits` exposta apenas por
//! `element(row, col)`, independente de qualquer registrador.
//!
//! ## Variantes
//!
//! - **Fórmula**: [`FuncGate`], além de `Hadamard` e `Diffusion` em `library`
//! - **Array denso**: [`ArrayGate`]
//! - **Permutação**: [`ClassicalGate`] (oráculos clássicos reversíveis)

use num_complex::Complex64;
use std::fmt;

use crate::config::SimConfig;
use crate::contract;
use crate::error::{QRegError, QRegResult};
use crate::register::{ONE, QReg, ZERO};
use crate::unitary;

/// Maior número de qubits aceito por um construtor verificado
const MAX_GATE_BITS: usize = (usize::BITS / 2) as usize;

/// Trait para operadores aplicáveis a registradores
pub trait Gate: Send + Sync {
    /// Nome do gate (usado em logs e erros)
    fn name(&self) -> &str;

    /// Número de qubits em que o gate atua
    fn qubit_count(&self) -> usize;

    /// Elemento (row, col) da matriz
    fn element(&self, row: usize, col: usize) -> Complex64;

    /// Dimensão da matriz (`2^bits`)
    fn matrix_width(&self) -> usize {
        1 << self.qubit_count()
    }

    /// Verifica se a matriz é unitária
    fn is_unitary(&self) -> bool {
        unitary::is_unitary(self, &SimConfig::default())
    }

    /// Aplica o gate aos qubits `targets`, na ordem dada
    fn apply(&self, qreg: &mut QReg, targets: &[usize]) -> QRegResult<()> {
        contract::apply(self, qreg, targets)
    }

    /// Aplica o gate aos qubits `start..start + bits`
    fn apply_range(&self, qreg: &mut QReg, start: usize) -> QRegResult<()> {
        contract::apply_range(self, qreg, start)
    }

    /// Aplica o gate aos primeiros `bits` qubits
    fn apply_whole(&self, qreg: &mut QReg) -> QRegResult<()> {
        contract::apply_whole(self, qreg)
    }
}

impl<G: Gate + ?Sized> Gate for Box<G> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn qubit_count(&self) -> usize {
        (**self).qubit_count()
    }

    fn element(&self, row: usize, col: usize) -> Complex64 {
        (**self).element(row, col)
    }
}

pub(crate) fn check_bits(bits: usize) -> QRegResult<()> {
    if bits == 0 || bits >= MAX_GATE_BITS {
        return Err(QRegError::invalid(format!(
            "a gate must act on 1 to {} qubits, got {bits}",
            MAX_GATE_BITS - 1
        )));
    }
    Ok(())
}

/// Devolve o gate apenas se passar no teste de unitariedade
pub(crate) fn ensure_unitary<G: Gate>(gate: G) -> QRegResult<G> {
    if !gate.is_unitary() {
        tracing::warn!(gate = gate.name(), bits = gate.qubit_count(), "rejected non-unitary matrix");
        return Err(QRegError::NonUnitaryGate {
            name: gate.name().to_string(),
            bits: gate.qubit_count(),
        });
    }
    Ok(gate)
}

// =============================================================================
// Gate por fórmula
// =============================================================================

/// Gate definido por uma função de elementos
#[derive(Clone)]
pub struct FuncGate<F> {
    name: String,
    bits: usize,
    f: F,
}

impl<F> FuncGate<F>
where
    F: Fn(usize, usize) -> Complex64 + Send + Sync,
{
    /// Cria gate sem verificar unitariedade
    ///
    /// Para composição interna, onde quem chama já garante a propriedade.
    ///
    /// # Panics
    ///
    /// Se `bits` for 0 ou não couber numa matriz endereçável
    /// (`bits >= usize::BITS / 2`).
    pub fn new_unchecked(f: F, bits: usize) -> Self {
        assert!(
            check_bits(bits).is_ok(),
            "a gate must act on 1 to {} qubits, got {bits}",
            MAX_GATE_BITS - 1
        );
        Self {
            name: "U".to_string(),
            bits,
            f,
        }
    }

    /// Cria gate e falha com `NonUnitaryGate` se a matriz não for unitária
    pub fn new(f: F, bits: usize) -> QRegResult<Self> {
        check_bits(bits)?;
        ensure_unitary(Self::new_unchecked(f, bits))
    }

    /// Renomeia o gate
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl<F> Gate for FuncGate<F>
where
    F: Fn(usize, usize) -> Complex64 + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn qubit_count(&self) -> usize {
        self.bits
    }

    fn element(&self, row: usize, col: usize) -> Complex64 {
        (self.f)(row, col)
    }
}

impl<F> fmt::Debug for FuncGate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuncGate")
            .field("name", &self.name)
            .field("bits", &self.bits)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Gate por array denso
// =============================================================================

/// Gate com matriz explícita em ordem row-major
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayGate {
    matrix: Vec<Complex64>,
    width: usize,
    bits: usize,
}

impl ArrayGate {
    /// Cria gate a partir de `width * width` elementos complexos
    pub fn new(matrix: Vec<Complex64>) -> QRegResult<Self> {
        let width = (matrix.len() as f64).sqrt().round() as usize;
        if width * width != matrix.len() || width < 2 || !width.is_power_of_two() {
            return Err(QRegError::invalid(format!(
                "{} elements do not form a 2^n x 2^n matrix",
                matrix.len()
            )));
        }
        let bits = width.trailing_zeros() as usize;
        check_bits(bits)?;
        ensure_unitary(Self {
            matrix,
            width,
            bits,
        })
    }

    /// Cria gate a partir de elementos reais
    pub fn from_real(matrix: &[f64]) -> QRegResult<Self> {
        Self::new(matrix.iter().map(|&x| Complex64::new(x, 0.0)).collect())
    }
}

impl Gate for ArrayGate {
    fn name(&self) -> &str {
        "U"
    }

    fn qubit_count(&self) -> usize {
        self.bits
    }

    fn matrix_width(&self) -> usize {
        self.width
    }

    fn element(&self, row: usize, col: usize) -> Complex64 {
        self.matrix[row * self.width + col]
    }
}

// =============================================================================
// Gate por permutação (oráculo clássico)
// =============================================================================

/// Embute uma função clássica `f` como matriz de permutação
///
/// `element(row, col) = 1` se `f(col) == row`, senão `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassicalGate {
    table: Vec<usize>,
    bits: usize,
}

impl ClassicalGate {
    /// Avalia `f` em todos os `2^bits` valores e verifica a matriz resultante
    pub fn new<F>(f: F, bits: usize) -> QRegResult<Self>
    where
        F: Fn(usize) -> usize,
    {
        check_bits(bits)?;
        let width = 1usize << bits;
        let table = (0..width).map(&f).collect::<Vec<_>>();
        if let Some((col, &row)) = table.iter().enumerate().find(|&(_, &row)| row >= width) {
            return Err(QRegError::invalid(format!(
                "classical function maps {col} to {row}, outside 0..{width}"
            )));
        }
        ensure_unitary(Self { table, bits })
    }

    /// Imagem de `x` pela função embutida
    #[cfg(test)]
    fn image(&self, x: usize) -> usize {
        self.table[x]
    }
}

impl Gate for ClassicalGate {
    fn name(&self) -> &str {
        "U_f"
    }

    fn qubit_count(&self) -> usize {
        self.bits
    }

    fn element(&self, row: usize, col: usize) -> Complex64 {
        if self.table[col] == row { ONE } else { ZERO }
    }
}

// =============================================================================
// Dump da matriz
// =============================================================================

/// Visão imprimível da matriz completa de um gate
pub struct MatrixDisplay<'a, G: ?Sized> {
    gate: &'a G,
}

/// Dump diagnóstico da matriz, colunas alinhadas à direita
pub fn matrix_display<G: Gate + ?Sized>(gate: &G) -> MatrixDisplay<'_, G> {
    MatrixDisplay { gate }
}

fn format_entry(value: Complex64) -> String {
    format!("({:+.6}{:+.6}i)", value.re, value.im)
}

impl<G: Gate + ?Sized> fmt::Display for MatrixDisplay<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.gate.matrix_width();
        let sizes = (0..width)
            .map(|col| {
                let widest = (0..width)
                    .map(|row| format_entry(self.gate.element(row, col)).len())
                    .max()
                    .unwrap_or(0);
                if col == 0 { widest } else { widest + 1 }
            })
            .collect::<Vec<_>>();

        for row in 0..width {
            for (col, &size) in sizes.iter().enumerate() {
                write!(f, "{:>size$}", format_entry(self.gate.element(row, col)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
