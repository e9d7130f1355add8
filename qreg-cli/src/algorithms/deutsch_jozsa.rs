//! Deutsch–Jozsa com duas entradas
//!
//! Registrador de 3 qubits em |001⟩: o qubit 0 é a saída do oráculo, os
//! qubits 1 e 2 são as entradas. Uma única consulta decide se `f` é
//! constante ou balanceada.

use clap::ValueEnum;
use qreg_core::contract::apply_with;
use qreg_core::{ArrayGate, Hadamard, QReg, QRegResult, SimConfig};
use rand::Rng;

/// Qubits do registrador (2 entradas + saída)
const WIDTH: usize = 3;

/// Família do oráculo
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OracleKind {
    /// f(x) = 0
    Constant,
    /// f(x) = 1 para x ∈ {0, 1}, 0 caso contrário
    Balanced,
}

/// Resultado de uma execução
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    /// Bits de entrada medidos
    pub inputs: usize,
    /// `true` quando todas as entradas mediram 0
    pub constant: bool,
}

/// Matriz de permutação real `|x, y⟩ → |x, y ⊕ f(x)⟩`
pub fn oracle_matrix(kind: OracleKind) -> Vec<f64> {
    let states = 1 << WIDTH;
    let f = |input: usize| match kind {
        OracleKind::Constant => 0,
        OracleKind::Balanced => usize::from(input < 2),
    };

    let mut matrix = vec![0.0; states * states];
    for col in 0..states {
        let row = col ^ f(col >> 1);
        matrix[row * states + col] = 1.0;
    }
    matrix
}

/// Executa o circuito completo e mede
pub fn run<R: Rng>(kind: OracleKind, config: &SimConfig, rng: &mut R) -> QRegResult<Verdict> {
    let mut qreg = QReg::with_value(WIDTH, 1)?;
    let oracle = ArrayGate::from_real(&oracle_matrix(kind))?;
    let h = Hadamard::new(1)?;

    for qubit in 0..WIDTH {
        apply_with(&h, &mut qreg, &[qubit], config)?;
    }
    apply_with(&oracle, &mut qreg, &[0, 1, 2], config)?;
    for qubit in 1..WIDTH {
        apply_with(&h, &mut qreg, &[qubit], config)?;
    }

    let inputs = qreg.measure(rng) >> 1;
    Ok(Verdict {
        inputs,
        constant: inputs == 0,
    })
}
