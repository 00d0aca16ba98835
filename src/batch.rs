//! Batch ECC processing over many blocks
//!
//! A fixity database protects a file as a run of independent messages that all
//! share one `(n, k, variant)`. [`BatchProcessor`] applies a single manager to
//! such a run, in parallel when the configuration allows it. Results keep the
//! order of the input blocks.

use crate::backend::Decoded;
use crate::config::EccConfig;
use crate::error::Result;
use crate::manager::EccManager;
use log::{debug, warn};
use rayon::prelude::*;

/// Runs manager operations over slices of blocks
pub struct BatchProcessor<'a> {
    manager: &'a EccManager,
    parallel: bool,
    pool: Option<rayon::ThreadPool>,
}

impl<'a> BatchProcessor<'a> {
    /// Processor honoring `config.threads` and `config.parallel`
    pub fn new(manager: &'a EccManager, config: &EccConfig) -> Self {
        let threads = config.effective_threads();
        let pool = if config.parallel {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| {
                    warn!(
                        "Could not build a {}-thread pool, using the global pool: {}",
                        threads, e
                    );
                })
                .ok()
        } else {
            None
        };
        debug!(
            "Batch processor: parallel={}, threads={}",
            config.parallel, threads
        );

        Self {
            manager,
            parallel: config.parallel,
            pool,
        }
    }

    /// Single-threaded processor
    pub fn sequential(manager: &'a EccManager) -> Self {
        Self {
            manager,
            parallel: false,
            pool: None,
        }
    }

    fn map_blocks<I, T, F>(&self, items: &[I], f: F) -> Vec<T>
    where
        I: Sync,
        T: Send,
        F: Fn(&I) -> T + Sync + Send,
    {
        if !self.parallel {
            return items.iter().map(f).collect();
        }
        match &self.pool {
            Some(pool) => pool.install(|| items.par_iter().map(&f).collect()),
            None => items.par_iter().map(&f).collect(),
        }
    }

    /// Encode every message; fails on the first invalid block
    pub fn encode_all<M>(&self, messages: &[M]) -> Result<Vec<Vec<u8>>>
    where
        M: AsRef<[u8]> + Sync,
    {
        let manager = self.manager;
        self.map_blocks(messages, |m| manager.encode(m.as_ref(), None))
            .into_iter()
            .collect()
    }

    /// Check every `(message, ecc)` pair
    pub fn check_all<M, E>(&self, blocks: &[(M, E)]) -> Result<Vec<bool>>
    where
        M: AsRef<[u8]> + Sync,
        E: AsRef<[u8]> + Sync,
    {
        let manager = self.manager;
        self.map_blocks(blocks, |(m, e)| manager.check(m.as_ref(), e.as_ref(), None))
            .into_iter()
            .collect()
    }

    /// Decode every `(message, ecc)` pair; one failure never aborts the others
    pub fn decode_all<M, E>(&self, blocks: &[(M, E)]) -> Vec<Result<Decoded>>
    where
        M: AsRef<[u8]> + Sync,
        E: AsRef<[u8]> + Sync,
    {
        let manager = self.manager;
        let results =
            self.map_blocks(blocks, |(m, e)| manager.decode(m.as_ref(), e.as_ref(), None));

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            debug!("{} of {} blocks could not be decoded", failed, results.len());
        }
        results
    }
}
