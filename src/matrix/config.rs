//! Configuration and system parameters for the numeric SpGEMM drivers

use crate::matrix::locator::LocatorMode;

/// System parameters for the parallel driver
#[derive(Debug, Clone)]
pub struct SystemParameters {
    /// Number of threads to use
    pub n_threads: usize,
}

impl Default for SystemParameters {
    fn default() -> Self {
        Self {
            n_threads: num_cpus::get(), // Use all available cores
        }
    }
}

/// Configuration for the numeric SpGEMM drivers
#[derive(Debug, Clone)]
pub struct SpgemmConfig {
    /// System parameters for the parallel driver
    pub system_params: SystemParameters,

    /// How hypersparse column lookups in A are searched
    pub locator: LocatorMode,

    /// Run the full O(nnz) structural check on every pattern before
    /// multiplying. Dimension, length and finalization checks always run.
    pub check_patterns: bool,

    /// Smallest number of B vectors handed to one parallel task
    pub min_slots_per_task: usize,
}

impl Default for SpgemmConfig {
    fn default() -> Self {
        Self {
            system_params: SystemParameters::default(),
            locator: LocatorMode::Trimmed,
            check_patterns: cfg!(debug_assertions),
            min_slots_per_task: 64,
        }
    }
}

impl SpgemmConfig {
    pub fn with_locator(mut self, locator: LocatorMode) -> Self {
        self.locator = locator;
        self
    }

    pub fn with_threads(mut self, n_threads: usize) -> Self {
        self.system_params.n_threads = n_threads.max(1);
        self
    }

    pub fn with_pattern_checks(mut self, check_patterns: bool) -> Self {
        self.check_patterns = check_patterns;
        self
    }

    pub fn with_min_slots_per_task(mut self, min_slots: usize) -> Self {
        self.min_slots_per_task = min_slots.max(1);
        self
    }

    /// Number of parallel tasks to cut `nvec` B vectors into
    pub fn task_count(&self, nvec: usize) -> usize {
        if nvec == 0 {
            return 0;
        }
        let by_size = nvec.div_ceil(self.min_slots_per_task.max(1));
        // A few tasks per thread so rayon can balance uneven columns
        let by_threads = self.system_params.n_threads.max(1) * 4;
        by_size.min(by_threads).max(1)
    }
}
