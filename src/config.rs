//! Configuration for ECC managers and batch processing

use crate::error::{validate_code_parameters, Result};
use crate::variant::{FieldParams, Variant};

/// Settings needed to build an [`EccManager`](crate::EccManager)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EccConfig {
    /// Codeword length (message + ecc)
    pub n: usize,
    /// Default message length
    pub k: usize,
    pub variant: Variant,
    /// Field parameters for the standalone variant
    pub field_params: FieldParams,
    /// Number of threads for batch work (0 = auto-detect)
    pub threads: usize,
    /// Whether batch work may run in parallel (false = single-threaded)
    pub parallel: bool,
}

impl Default for EccConfig {
    fn default() -> Self {
        Self {
            n: 255,
            k: 223,
            variant: Variant::default(),
            field_params: FieldParams::ADSB_UAT,
            threads: 0, // Auto-detect CPU cores
            parallel: true,
        }
    }
}

impl EccConfig {
    pub fn new(n: usize, k: usize, variant: Variant) -> Self {
        Self {
            n,
            k,
            variant,
            ..Self::default()
        }
    }

    pub fn with_field_params(mut self, params: FieldParams) -> Self {
        self.field_params = params;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build from parsed command-line arguments (see [`crate::args::build_cli`])
    pub fn from_args(matches: &clap::ArgMatches) -> Result<Self> {
        let defaults = Self::default();

        let n = matches.get_one::<usize>("n").copied().unwrap_or(defaults.n);
        let k = matches.get_one::<usize>("k").copied().unwrap_or(defaults.k);
        let variant = match matches.get_one::<String>("variant") {
            Some(selector) => selector.parse()?,
            None => defaults.variant,
        };

        let field_params = FieldParams {
            prim: matches
                .get_one::<u16>("prim")
                .copied()
                .unwrap_or(defaults.field_params.prim),
            generator: matches
                .get_one::<u8>("generator")
                .copied()
                .unwrap_or(defaults.field_params.generator),
            fcr: matches
                .get_one::<u8>("fcr")
                .copied()
                .unwrap_or(defaults.field_params.fcr),
        };

        let threads = matches.get_one::<usize>("threads").copied().unwrap_or(0);
        let parallel = !matches.get_flag("no-parallel");

        let config = Self {
            n,
            k,
            variant,
            field_params,
            threads,
            parallel,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject code parameters before any manager is built
    pub fn validate(&self) -> Result<()> {
        validate_code_parameters(self.n, self.k)
    }

    /// Get effective thread count (auto-detect if 0)
    pub fn effective_threads(&self) -> usize {
        match (self.parallel, self.threads) {
            (false, _) => 1, // Sequential mode always uses single thread
            (true, 0) => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4), // Auto-detect CPU cores
            (true, n) => n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::build_cli;
    use crate::error::EccError;

    #[test]
    fn test_defaults() {
        let config = EccConfig::default();
        assert_eq!((config.n, config.k), (255, 223));
        assert_eq!(config.variant, Variant::ReferenceStandard);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_effective_threads() {
        assert_eq!(EccConfig::default().with_parallel(false).effective_threads(), 1);
        assert_eq!(EccConfig::default().with_threads(3).effective_threads(), 3);
        assert!(EccConfig::default().effective_threads() >= 1);
    }

    #[test]
    fn test_from_args() {
        let matches = build_cli()
            .try_get_matches_from([
                "eccman", "-n", "64", "-k", "48", "-a", "performance-standalone", "--prim",
                "0x11d", "--fcr", "0", "--no-parallel", "describe",
            ])
            .unwrap();
        let config = EccConfig::from_args(&matches).unwrap();
        assert_eq!((config.n, config.k), (64, 48));
        assert_eq!(config.variant, Variant::PerformanceStandalone);
        assert_eq!(config.field_params, FieldParams::new(0x11D, 2, 0));
        assert!(!config.parallel);
    }

    #[test]
    fn test_from_args_rejects_bad_parameters() {
        let matches = build_cli()
            .try_get_matches_from(["eccman", "-n", "10", "-k", "10", "describe"])
            .unwrap();
        assert!(matches!(
            EccConfig::from_args(&matches),
            Err(EccError::InvalidCodeParameters { n: 10, k: 10 })
        ));

        let matches = build_cli()
            .try_get_matches_from(["eccman", "-a", "7", "describe"])
            .unwrap();
        assert!(matches!(
            EccConfig::from_args(&matches),
            Err(EccError::UnknownVariant(_))
        ));
    }
}
