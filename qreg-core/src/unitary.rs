//! Teste de unitariedade por produto de Gram
//!
//! Para cada par (row, col) calcula `Σ_i element(row, i) · element(i, col)`
//! e compara com a identidade, em módulo, dentro da tolerância.
//!
//! O produto usa os elementos sem conjugação. Para os gates reais e
//! simétricos/ortogonais da biblioteca isso coincide com `M·M† = I`; para
//! matrizes complexas gerais é um teste diferente, mantido por
//! compatibilidade com os gates já validados.

use num_complex::Complex64;
use rayon::prelude::*;

use crate::config::SimConfig;
use crate::gate::Gate;

/// Compara módulos de dois complexos
fn close_enough(a: Complex64, b: Complex64, tolerance: f64) -> bool {
    (a.norm() - b.norm()).abs() < tolerance
}

/// Checa um elemento do produto contra a identidade
fn check_element<G: Gate + ?Sized>(gate: &G, row: usize, col: usize, tolerance: f64) -> bool {
    let width = gate.matrix_width();
    let sum: Complex64 = (0..width)
        .map(|i| gate.element(row, i) * gate.element(i, col))
        .sum();
    let expected = if row == col {
        Complex64::new(1.0, 0.0)
    } else {
        Complex64::new(0.0, 0.0)
    };
    close_enough(sum, expected, tolerance)
}

/// Verifica se a matriz do gate é unitária
///
/// As `width²` checagens são independentes; acima do limiar da configuração
/// rodam no pool rayon e param na primeira falha.
pub fn is_unitary<G: Gate + ?Sized>(gate: &G, config: &SimConfig) -> bool {
    let width = gate.matrix_width();
    let checks = width * width;
    let tolerance = config.tolerance;
    let check = |k: usize| check_element(gate, k / width, k % width, tolerance);

    if config.should_parallelize(checks) {
        (0..checks).into_par_iter().all(check)
    } else {
        (0..checks).all(check)
    }
}
