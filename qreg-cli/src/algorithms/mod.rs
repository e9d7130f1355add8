//! Algoritmos clássicos de demonstração sobre o registrador
//!
//! Cada programa usa apenas a API pública de `qreg_core`.

pub mod deutsch_jozsa;
pub mod grover;
pub mod sample;
pub mod simon;
