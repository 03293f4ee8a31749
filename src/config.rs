/// Board extents and the exit row. Defaults to the classic 6x6 board exiting on row 3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PuzzleConfig {
    pub width: i16,
    pub height: i16,
    pub exit_row: i16,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            width: 6,
            height: 6,
            exit_row: 3,
        }
    }
}

impl PuzzleConfig {
    pub fn new(width: i16, height: i16, exit_row: i16) -> Self {
        Self {
            width,
            height,
            exit_row,
        }
    }
}

/// Search limits and diagnostics.
#[derive(Clone, Debug)]
pub struct SolverConfig {
    /// Stop after this many distinct states have been expanded.
    pub max_expansions: Option<usize>,
    /// Log progress every this many expansions (0 disables it).
    pub progress_interval: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_expansions: None,
            progress_interval: 10_000,
        }
    }
}

impl SolverConfig {
    pub fn with_max_expansions(mut self, max: usize) -> Self {
        self.max_expansions = Some(max);
        self
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }
}
