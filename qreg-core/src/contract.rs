//! # Motor de contração tensorial
//!
//! Aplica uma matriz `2^k × 2^k` a `k` qubits escolhidos de um registrador
//! de `n` qubits, sem tocar nos outros `n − k`.
//!
//! ## Indexação
//!
//! Uma *aplicação* é uma atribuição dos qubits fora dos alvos; há
//! `2^(n−k)` delas. O estado da base para (aplicação, valor dos alvos) é:
//!
//! ```text
//! posição targets[i]        ← bit i do valor
//! posições livres (ordem ↑) ← bits sucessivos da aplicação
//! ```
//!
//! Cada destino corresponde a exatamente um par (aplicação, row), então o
//! novo vetor é preenchido destino a destino, lendo só o vetor antigo, e
//! trocado por inteiro no final.

use num_complex::Complex64;
use rayon::prelude::*;

use crate::config::SimConfig;
use crate::error::{QRegError, QRegResult};
use crate::gate::Gate;
use crate::register::{QReg, ZERO};

/// Índice do estado da base para (aplicação, valor dos alvos)
///
/// Construção direta: vetor de dígitos não atribuídos, bits do valor nas
/// posições `targets`, bits da aplicação nas posições restantes em ordem
/// crescente, e empacotamento com o dígito `i` valendo `1 << i`.
#[cfg(test)]
pub(crate) fn state_index(application: usize, value: usize, width: usize, targets: &[usize]) -> usize {
    let mut digits: Vec<Option<usize>> = vec![None; width];
    for (i, &target) in targets.iter().enumerate() {
        digits[target] = Some((value >> i) & 1);
    }
    let mut app_pos = 0;
    for digit in digits.iter_mut().filter(|d| d.is_none()) {
        *digit = Some((application >> app_pos) & 1);
        app_pos += 1;
    }
    digits
        .iter()
        .enumerate()
        .map(|(i, d)| d.unwrap_or(0) << i)
        .sum()
}

/// Plano de contração para um conjunto de alvos validado
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contraction {
    /// Qubits alvo, na ordem dos bits da matriz
    targets: Vec<usize>,
    /// Máscara com os bits dos alvos
    target_mask: usize,
    /// Contribuição de cada valor dos alvos para o índice
    target_offsets: Vec<usize>,
    /// Posições fora dos alvos, em ordem crescente
    free_positions: Vec<usize>,
}

impl Contraction {
    /// Valida os alvos e pré-calcula os deslocamentos
    pub fn new(width: usize, targets: &[usize], bits: usize) -> QRegResult<Self> {
        if let Some(&target) = targets.iter().find(|&&t| t >= width) {
            return Err(QRegError::InvalidTarget { target, width });
        }
        if targets.len() != bits {
            return Err(QRegError::invalid(format!(
                "gate acts on {bits} qubit(s) but {} target(s) were given",
                targets.len()
            )));
        }

        let mut target_mask = 0usize;
        for &target in targets {
            let bit = 1usize << target;
            if target_mask & bit != 0 {
                return Err(QRegError::invalid(format!("qubit {target} is targeted twice")));
            }
            target_mask |= bit;
        }

        let target_offsets = (0..1usize << bits)
            .map(|value| {
                targets
                    .iter()
                    .enumerate()
                    .map(|(i, &target)| ((value >> i) & 1) << target)
                    .sum::<usize>()
            })
            .collect();
        let free_positions = (0..width).filter(|&p| target_mask & (1usize << p) == 0).collect();

        Ok(Self {
            targets: targets.to_vec(),
            target_mask,
            target_offsets,
            free_positions,
        })
    }

    /// Número de aplicações (`2^(n−k)`)
    pub fn applications(&self) -> usize {
        1 << self.free_positions.len()
    }

    /// Espalha os bits da aplicação nas posições livres
    fn deposit(&self, application: usize) -> usize {
        self.free_positions
            .iter()
            .enumerate()
            .map(|(j, &pos)| ((application >> j) & 1) << pos)
            .sum()
    }

    /// Índice do estado da base para (aplicação, valor dos alvos)
    #[cfg(test)]
    fn destination(&self, application: usize, value: usize) -> usize {
        self.deposit(application) | self.target_offsets[value]
    }

    /// Valor dos alvos (row da matriz) lido de um índice
    fn row_of(&self, state: usize) -> usize {
        self.targets
            .iter()
            .enumerate()
            .map(|(i, &target)| ((state >> target) & 1) << i)
            .sum()
    }

    /// Amplitude nova de um destino: `Σ_col element(row, col) · old[origem(col)]`
    fn contract<G: Gate + ?Sized>(&self, gate: &G, old: &[Complex64], dest: usize) -> Complex64 {
        let row = self.row_of(dest);
        let base = dest & !self.target_mask;
        self.target_offsets
            .iter()
            .enumerate()
            .map(|(col, &offset)| gate.element(row, col) * old[base | offset])
            .sum()
    }
}

/// Aplica `gate` aos qubits `targets` com a configuração dada
///
/// Nenhuma amplitude é alterada em caso de erro.
pub fn apply_with<G: Gate + ?Sized>(
    gate: &G,
    qreg: &mut QReg,
    targets: &[usize],
    config: &SimConfig,
) -> QRegResult<()> {
    let plan = Contraction::new(qreg.width(), targets, gate.qubit_count())?;
    let old = qreg.amplitudes();
    let parallel = config.should_parallelize(old.len());

    tracing::debug!(
        gate = gate.name(),
        ?targets,
        width = qreg.width(),
        applications = plan.applications(),
        parallel,
        "applying gate"
    );

    let mut fresh = vec![ZERO; old.len()];
    let compute = |(dest, slot): (usize, &mut Complex64)| {
        *slot = plan.contract(gate, old, dest);
    };
    if parallel {
        fresh.par_iter_mut().enumerate().for_each(compute);
    } else {
        fresh.iter_mut().enumerate().for_each(compute);
    }

    qreg.replace_amplitudes(fresh);
    Ok(())
}

/// Aplica `gate` aos qubits `targets`
pub fn apply<G: Gate + ?Sized>(gate: &G, qreg: &mut QReg, targets: &[usize]) -> QRegResult<()> {
    apply_with(gate, qreg, targets, &SimConfig::default())
}

/// Aplica `gate` aos qubits `start..start + bits`
pub fn apply_range<G: Gate + ?Sized>(gate: &G, qreg: &mut QReg, start: usize) -> QRegResult<()> {
    let end = start
        .checked_add(gate.qubit_count())
        .ok_or(QRegError::InvalidTarget {
            target: start,
            width: qreg.width(),
        })?;
    let targets = (start..end).collect::<Vec<_>>();
    apply(gate, qreg, &targets)
}

/// Aplica `gate` aos qubits `0..bits`
pub fn apply_whole<G: Gate + ?Sized>(gate: &G, qreg: &mut QReg) -> QRegResult<()> {
    apply_range(gate, qreg, 0)
}
