//! Boundary policy for a run.

/// Options that decide what a [`crate::Session`] does around evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Skip evaluation when the static checker finds undeclared variables
    pub abort_on_undeclared: bool,
    /// Collect max depth and bang count for the parsed tree
    pub report_stats: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            abort_on_undeclared: true,
            report_stats: false,
        }
    }
}

impl RunConfig {
    /// Warn about undeclared variables but evaluate anyway
    pub fn permissive() -> Self {
        Self {
            abort_on_undeclared: false,
            ..Self::default()
        }
    }
}
