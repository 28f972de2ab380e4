use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use tracing::warn;

/// Environment variable holding a fixed seed for `??`.
pub static SEED_VAR: &str = "JOC_SEED";

/// Nesting depth past which evaluation stops instead of overflowing the
/// native stack.
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Seed for the random operator. `None` draws from system entropy.
    pub seed: Option<u64>,
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let seed = match env::var(SEED_VAR) {
            Ok(text) => match text.trim().parse() {
                Ok(seed) => Some(seed),
                Err(err) => {
                    warn!(%err, value = %text, "ignoring invalid {}", SEED_VAR);
                    None
                }
            },
            Err(_) => None,
        };
        Self {
            seed,
            ..Default::default()
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = Config::with_seed(42);
        let mut first = config.rng();
        let mut second = config.rng();

        for _ in 0..4 {
            assert_eq!(first.gen::<f64>(), second.gen::<f64>());
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(Config::with_seed(1).max_depth, DEFAULT_MAX_DEPTH);
    }
}
