//! Run configuration: puzzle size, search policy and presentation options.

use std::path::PathBuf;

use crossing_kernel::model::puzzle::PuzzleV1;
use crossing_kernel::model::ModelError;
use crossing_search::policy::SearchPolicyV1;

/// Everything one `crossing` run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub missionaries: i32,
    pub cannibals: i32,
    /// Boat capacity; the operator catalog is every load of `1..=capacity`.
    pub capacity: i32,
    pub policy: SearchPolicyV1,
    /// Prompt for a line on stdin before each expansion.
    pub interactive: bool,
    /// Where to persist the run bundle, if anywhere.
    pub bundle_dir: Option<PathBuf>,
}

impl RunConfig {
    /// Classic 3/3/2 instance with the given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            policy: SearchPolicyV1::seeded(seed),
            ..Self::default()
        }
    }

    /// Build the puzzle instance this configuration describes.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] for negative populations or a capacity below 1.
    pub fn puzzle(&self) -> Result<PuzzleV1, ModelError> {
        PuzzleV1::new(self.missionaries, self.cannibals, self.capacity)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            missionaries: 3,
            cannibals: 3,
            capacity: 2,
            policy: SearchPolicyV1::default(),
            interactive: false,
            bundle_dir: None,
        }
    }
}
