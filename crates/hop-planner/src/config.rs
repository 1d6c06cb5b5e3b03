//! Planner configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How much of the search the built-in log observer reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "u8", into = "u8"))]
pub enum Verbosity {
    /// Return the plan, log nothing.
    #[default]
    Silent,
    /// Log the problem and the result.
    Summary,
    /// Also log every recursive call.
    Calls,
    /// Also log operator applications, method expansions and intermediate states.
    Detail,
}

impl Verbosity {
    pub fn is_silent(self) -> bool {
        self == Verbosity::Silent
    }
}

impl From<u8> for Verbosity {
    fn from(level: u8) -> Self {
        match level {
            0 => Verbosity::Silent,
            1 => Verbosity::Summary,
            2 => Verbosity::Calls,
            _ => Verbosity::Detail,
        }
    }
}

impl From<Verbosity> for u8 {
    fn from(v: Verbosity) -> Self {
        v as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Log level used by `Planner::plan`.
    pub verbosity: Verbosity,

    /// Optional recursion limit. `None` (the default) searches without bound, so a domain whose
    /// methods recurse forever will not terminate.
    pub max_depth: Option<usize>,
}

impl PlannerConfig {
    pub fn with_verbosity(mut self, verbosity: impl Into<Verbosity>) -> Self {
        self.verbosity = verbosity.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}
