use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Task, Value};

/// A plan: the operator invocations to execute, in order.
///
/// Planners only hand out complete plans. Every step names an operator; no compound task remains.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Plan<A = Value> {
    pub steps: Vec<Task<A>>,
}

impl<A> Default for Plan<A> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<A> Plan<A> {
    pub fn new(steps: Vec<Task<A>>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Task<A>] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task<A>> {
        self.steps.iter()
    }

    pub fn into_steps(self) -> Vec<Task<A>> {
        self.steps
    }
}

impl<A> IntoIterator for Plan<A> {
    type Item = Task<A>;
    type IntoIter = std::vec::IntoIter<Task<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a, A> IntoIterator for &'a Plan<A> {
    type Item = &'a Task<A>;
    type IntoIter = std::slice::Iter<'a, Task<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl<A> From<Vec<Task<A>>> for Plan<A> {
    fn from(steps: Vec<Task<A>>) -> Self {
        Self::new(steps)
    }
}

impl<A: fmt::Display> fmt::Display for Plan<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::task::display_tasks(&self.steps))
    }
}
