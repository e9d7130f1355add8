//! Tipos de erro para qreg-core

use thiserror::Error;

/// Resultado customizado para operações sobre registradores e gates
pub type QRegResult<T> = Result<T, QRegError>;

/// Erros que podem ocorrer na construção ou aplicação de operadores
///
/// Todos são erros de programação/entrada: nenhuma operação é re-tentada
/// internamente e nenhuma deixa o vetor de amplitudes parcialmente alterado.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QRegError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid bit value {0}: expected 0 or 1")]
    InvalidValue(u8),

    #[error("{target} is not a valid target for a register of width {width}")]
    InvalidTarget { target: usize, width: usize },

    #[error("Gate {name} on {bits} qubit(s) is not unitary")]
    NonUnitaryGate { name: String, bits: usize },
}

impl QRegError {
    /// Atalho para `InvalidArgument` com mensagem formatada
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
