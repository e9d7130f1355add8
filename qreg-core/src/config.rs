//! Configuração do simulador
//!
//! ## Variáveis de ambiente
//! - `QREG_PARALLEL_THRESHOLD`: tamanho mínimo de trabalho para usar o pool rayon (default: 4096)
//! - `QREG_TOLERANCE`: tolerância do teste de unitariedade (default: 1e-10)
//! - `QREG_SEED`: semente fixa para medições (default: relógio)

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::random;

/// Tolerância padrão do teste de unitariedade (em módulo)
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Quantidade padrão de itens independentes antes de paralelizar
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Configuração do simulador
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Número mínimo de itens (amplitudes ou checagens) para usar rayon
    pub parallel_threshold: usize,
    /// Tolerância do teste de unitariedade
    pub tolerance: f64,
    /// Semente fixa do gerador de medição
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            tolerance: DEFAULT_TOLERANCE,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Carrega configuração das variáveis de ambiente
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let parallel_threshold = std::env::var("QREG_PARALLEL_THRESHOLD")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.parallel_threshold);

        let tolerance = std::env::var("QREG_TOLERANCE")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|t: &f64| *t > 0.0)
            .unwrap_or(defaults.tolerance);

        let seed = std::env::var("QREG_SEED")
            .ok()
            .and_then(|s| s.parse().ok());

        Self {
            parallel_threshold,
            tolerance,
            seed,
        }
    }

    /// Configuração que nunca paraleliza
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
            ..Self::default()
        }
    }

    /// Define semente fixa
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Decide se `work` itens independentes justificam o pool paralelo
    pub fn should_parallelize(&self, work: usize) -> bool {
        work >= self.parallel_threshold
    }

    /// Constrói o gerador de medição
    ///
    /// Único ponto onde o gerador semeado pelo relógio é criado; chamado
    /// uma vez no ponto de entrada mais externo.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => random::seeded(seed),
            None => random::clock_seeded(),
        }
    }
}
