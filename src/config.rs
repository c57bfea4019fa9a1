use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{BstError, Result};
use crate::Key;

pub const DEFAULT_NODE_COUNT: usize = 50;

/// Settings for one run of the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Number of insertion attempts after the root, also the exclusive upper
    /// bound of every drawn key.
    node_count: usize,
    /// Fixed RNG seed; a fresh entropy seed is used when absent.
    seed: Option<u64>,
    /// Also print the depth-first value dump.
    print_df: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            node_count: DEFAULT_NODE_COUNT,
            seed: None,
            print_df: false,
        }
    }
}

impl RunConfig {
    pub fn new(node_count: usize, seed: Option<u64>) -> Result<Self> {
        let config = Self {
            node_count,
            seed,
            print_df: false,
        };
        config.key_upper_bound()?;
        Ok(config)
    }

    pub fn with_df_values(mut self, print_df: bool) -> Self {
        self.print_df = print_df;
        self
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn print_df(&self) -> bool {
        self.print_df
    }

    /// Exclusive upper bound for drawn keys, `[0, node_count)`.
    pub fn key_upper_bound(&self) -> Result<Key> {
        if self.node_count == 0 {
            return Err(BstError::InvalidNodeCount);
        }
        Key::try_from(self.node_count).map_err(|_| BstError::KeyRangeOverflow(self.node_count))
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
