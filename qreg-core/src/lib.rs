//! # ⚛️ qreg-core — Dense State-Vector Quantum Register
//!
//! Simula um computador quântico em hardware clássico: mantém o vetor
//! completo de amplitudes de um registrador, aplica operadores unitários a
//! subconjuntos de qubits e mede com colapso da função de onda.
//!
//! ## Computational Complexity
//!
//! **Gate application — O(2^n × 2^k × k):**
//! - n = qubits no registrador, k = qubits do gate
//! - Cada uma das 2^n amplitudes novas é uma soma de 2^k termos
//! - Paralelizado com rayon acima de `SimConfig::parallel_threshold`
//!
//! **Unitarity check — O(4^k × 2^k):**
//! - 4^k elementos do produto de Gram, cada um com 2^k termos
//!
//! **Bit probability / set bit — O(2^n):**
//! - Percorre só os índices com o bit ligado
//!
//! **Scalability:**
//! - Registradores até ~20 qubits: ✓ Excelente
//! - 20–28 qubits: △ Limitado por memória (16 bytes por amplitude)
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │          Standard Gate Library                  │
//! │   Hadamard · Diffusion · Classical · Array      │
//! ├─────────────────────────────────────────────────┤
//! │          Gate (element accessor)                │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Unitarity Validator (Gram product)       │  │
//! │  └───────────────────────────────────────────┘  │
//! ├─────────────────────────────────────────────────┤
//! │          Tensor-Contraction Engine              │
//! │   build new amplitudes → swap                   │
//! ├─────────────────────────────────────────────────┤
//! │          QReg (state vector)                    │
//! │   probability · set bit · measure · collapse    │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```ignore
//! use qreg_core::prelude::*;
//!
//! let config = SimConfig::from_env();
//! let mut rng = config.rng();
//!
//! let mut qreg = QReg::new(3)?;
//! hadamard_reg(&mut qreg)?;
//! let oracle = ClassicalGate::new(|x| x ^ 0b001, 3)?;
//! oracle.apply_whole(&mut qreg)?;
//! let outcome = qreg.measure(&mut rng);
//! ```

pub mod config;
pub mod contract;
pub mod error;
pub mod gate;
pub mod library;
pub mod random;
pub mod register;
pub mod unitary;

pub use config::SimConfig;
pub use contract::{Contraction, apply, apply_range, apply_whole, apply_with};
pub use error::{QRegError, QRegResult};
pub use gate::{ArrayGate, ClassicalGate, FuncGate, Gate, MatrixDisplay, matrix_display};
pub use library::{
    Diffusion, Hadamard, diffusion, diffusion_range, diffusion_reg, hadamard, hadamard_range,
    hadamard_reg,
};
pub use register::{NonZeroStates, QReg};
pub use unitary::is_unitary;

/// Re-exports para uso comum
pub mod prelude {
    pub use crate::config::SimConfig;
    pub use crate::error::{QRegError, QRegResult};
    pub use crate::gate::{ArrayGate, ClassicalGate, FuncGate, Gate};
    pub use crate::library::*;
    pub use crate::register::QReg;
    pub use num_complex::Complex64;
}
