//! Engine configuration.

use rio_eval::DEFAULT_MAX_CALL_DEPTH;

/// Tunables for an [`Engine`](crate::Engine).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Upper bound on resolve/type rounds. Analysis stops earlier once a
    /// round changes nothing.
    pub analysis_rounds: usize,
    /// Nested calls a run may make before failing with a stack overflow.
    pub max_call_depth: usize,
}

impl EngineConfig {
    pub const DEFAULT_ANALYSIS_ROUNDS: usize = 5;
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            analysis_rounds: Self::DEFAULT_ANALYSIS_ROUNDS,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}
