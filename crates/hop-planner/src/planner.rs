use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hop_core::{Plan, State, Task, Value};

use crate::config::PlannerConfig;
use crate::domain::Domain;
use crate::error::{PlanError, Result};
use crate::observer::{LogObserver, NoopObserver, SearchObserver};

/// Cooperative cancellation, checked once on entry to every recursive call.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Depth-first, backtracking HTN planner.
///
/// For the first task in the list the planner tries, in order:
///
/// 1. the operator of that name, applied to a private copy of the state, followed by a search
///    for the remaining tasks from the resulting state;
/// 2. each declared method of that name, in declaration order, splicing its subtasks in front of
///    the remaining tasks.
///
/// The first complete plan found wins. A task name registered both as an operator and as a
/// method-bearing task gets the operator attempt first; the methods are only tried after the
/// whole search below the operator has failed.
///
/// The search has no cycle detection and, unless [`PlannerConfig::max_depth`] is set, no depth
/// bound: a domain whose methods recurse forever will not terminate.
pub struct Planner<S = State, A = Value> {
    domain: Domain<S, A>,
    config: PlannerConfig,
    cancel: Option<CancelFlag>,
}

impl<S, A> Planner<S, A>
where
    S: Clone,
    A: Clone,
{
    pub fn new(domain: Domain<S, A>) -> Self {
        Self {
            domain,
            config: PlannerConfig::default(),
            cancel: None,
        }
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn domain(&self) -> &Domain<S, A> {
        &self.domain
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Find a plan that accomplishes `tasks` starting from `state`.
    ///
    /// `Ok(None)` means every alternative was exhausted. `state` is never modified.
    pub fn plan(&self, state: &S, tasks: &[Task<A>]) -> Result<Option<Plan<A>>>
    where
        S: fmt::Debug,
        A: fmt::Display,
    {
        if self.config.verbosity.is_silent() {
            self.plan_with(state, tasks, NoopObserver)
        } else {
            self.plan_with(state, tasks, LogObserver::new(self.config.verbosity))
        }
    }

    /// Same search as [`Self::plan`], reporting progress to `observer`.
    pub fn plan_with<O>(
        &self,
        state: &S,
        tasks: &[Task<A>],
        mut observer: O,
    ) -> Result<Option<Plan<A>>>
    where
        O: SearchObserver<S, A>,
    {
        observer.on_start(state, tasks);
        let mut steps = Vec::new();
        let result = self
            .seek(state, tasks, &mut steps, 0, &mut observer)
            .map(|found| found.then(|| Plan::new(steps)));
        observer.on_finish(&result);
        result
    }

    /// Returns `Ok(true)` when `plan` has been extended into a complete plan for `tasks`. On
    /// `Ok(false)` the plan is back to the length it had on entry.
    fn seek<O>(
        &self,
        state: &S,
        tasks: &[Task<A>],
        plan: &mut Vec<Task<A>>,
        depth: usize,
        observer: &mut O,
    ) -> Result<bool>
    where
        O: SearchObserver<S, A>,
    {
        if self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled) {
            return Err(PlanError::Cancelled);
        }
        if let Some(limit) = self.config.max_depth {
            if depth > limit {
                return Err(PlanError::DepthLimitExceeded { limit });
            }
        }

        observer.on_seek(depth, tasks);

        let Some((task, rest)) = tasks.split_first() else {
            observer.on_success(depth, plan);
            return Ok(true);
        };

        let operator = self.domain.operator(task.name());
        let methods = self.domain.methods_for(task.name());
        if operator.is_none() && methods.is_none() {
            return Err(PlanError::UnknownTask {
                name: task.name().to_string(),
                depth,
            });
        }

        if let Some(operator) = operator {
            observer.on_operator_attempt(depth, task);
            let next = operator.apply(state.clone(), task.args());
            observer.on_operator(depth, task, next.as_ref());
            if let Some(next) = next {
                plan.push(task.clone());
                if self.seek(&next, rest, plan, depth + 1, observer)? {
                    return Ok(true);
                }
                plan.pop();
            }
        }

        if methods.is_some() {
            observer.on_methods_attempt(depth, task);
        }
        for method in methods.unwrap_or_default() {
            let subtasks = method.decompose(state, task.args());
            observer.on_method(depth, task, method.name(), subtasks.as_deref());
            let Some(mut subtasks) = subtasks else {
                continue;
            };
            subtasks.extend_from_slice(rest);
            if self.seek(state, &subtasks, plan, depth + 1, observer)? {
                return Ok(true);
            }
        }

        observer.on_failure(depth);
        Ok(false)
    }
}

impl<S, A> fmt::Debug for Planner<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Planner")
            .field("domain", &self.domain)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
