use thiserror::Error;

/// Errors that abort a planning call.
///
/// An unreachable goal is not an error: the search reports it as `Ok(None)`. These variants mean
/// the domain model is malformed or an opt-in guard stopped the search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("task `{name}` is neither a declared operator nor a method-bearing task (depth {depth})")]
    UnknownTask { name: String, depth: usize },

    #[error("plan step {step} names `{name}`, which is not a declared operator")]
    UnknownOperator { name: String, step: usize },

    #[error("search exceeded the configured depth limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    #[error("planning was cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, PlanError>;
