use thiserror::Error;

/// Errors surfaced to the UI while resolving a view.
///
/// An empty filtered view is not an error: it resolves to a chart with no
/// data points (see [`crate::resolve::ViewStatus::EmptyResult`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashError {
    /// The chart-kind control carried a value outside the known kinds.
    #[error("Invalid chart selection: '{0}' (expected scatter, histogram or boxplot)")]
    InvalidSelection(String),
}
