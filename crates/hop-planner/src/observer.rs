//! Search instrumentation.
//!
//! Observers are told what the search is doing but can never change it: every callback takes
//! shared references and returns nothing. The planner is generic over the observer, so the
//! [`NoopObserver`] costs nothing at runtime.

use std::fmt;

use hop_core::{display_tasks, Plan, Task};
use hop_tools::{TraceEvent, TraceSink};

use crate::config::Verbosity;
use crate::error::Result;

/// Trace tags emitted by [`TraceRecorder`].
pub mod tags {
    pub const SEEK: &str = "seek";
    pub const OPERATOR_ATTEMPT: &str = "operator.attempt";
    pub const METHODS_ATTEMPT: &str = "methods.attempt";
    pub const OPERATOR_APPLIED: &str = "operator.applied";
    pub const OPERATOR_FAILED: &str = "operator.failed";
    pub const METHOD_APPLIED: &str = "method.applied";
    pub const METHOD_FAILED: &str = "method.failed";
    pub const SUCCESS: &str = "success";
    pub const FAILURE: &str = "failure";
}

pub trait SearchObserver<S, A> {
    /// Called once before the search starts.
    fn on_start(&mut self, _state: &S, _tasks: &[Task<A>]) {}

    /// Entry to a recursive call with the tasks still to accomplish.
    fn on_seek(&mut self, _depth: usize, _tasks: &[Task<A>]) {}

    /// About to apply the operator named by `task`.
    fn on_operator_attempt(&mut self, _depth: usize, _task: &Task<A>) {}

    /// An operator was applied; `result` is `None` when its preconditions failed.
    fn on_operator(&mut self, _depth: usize, _task: &Task<A>, _result: Option<&S>) {}

    /// About to try the methods declared for `task`, in order.
    fn on_methods_attempt(&mut self, _depth: usize, _task: &Task<A>) {}

    /// A method was tried; `subtasks` is `None` when its preconditions failed.
    fn on_method(
        &mut self,
        _depth: usize,
        _task: &Task<A>,
        _method: &str,
        _subtasks: Option<&[Task<A>]>,
    ) {
    }

    /// The task list at `depth` is empty: `plan` is complete.
    fn on_success(&mut self, _depth: usize, _plan: &[Task<A>]) {}

    /// Every alternative at `depth` failed; the search backtracks.
    fn on_failure(&mut self, _depth: usize) {}

    fn on_finish(&mut self, _result: &Result<Option<Plan<A>>>) {}
}

impl<S, A, O: SearchObserver<S, A> + ?Sized> SearchObserver<S, A> for &mut O {
    fn on_start(&mut self, state: &S, tasks: &[Task<A>]) {
        (**self).on_start(state, tasks);
    }

    fn on_seek(&mut self, depth: usize, tasks: &[Task<A>]) {
        (**self).on_seek(depth, tasks);
    }

    fn on_operator_attempt(&mut self, depth: usize, task: &Task<A>) {
        (**self).on_operator_attempt(depth, task);
    }

    fn on_operator(&mut self, depth: usize, task: &Task<A>, result: Option<&S>) {
        (**self).on_operator(depth, task, result);
    }

    fn on_methods_attempt(&mut self, depth: usize, task: &Task<A>) {
        (**self).on_methods_attempt(depth, task);
    }

    fn on_method(
        &mut self,
        depth: usize,
        task: &Task<A>,
        method: &str,
        subtasks: Option<&[Task<A>]>,
    ) {
        (**self).on_method(depth, task, method, subtasks);
    }

    fn on_success(&mut self, depth: usize, plan: &[Task<A>]) {
        (**self).on_success(depth, plan);
    }

    fn on_failure(&mut self, depth: usize) {
        (**self).on_failure(depth);
    }

    fn on_finish(&mut self, result: &Result<Option<Plan<A>>>) {
        (**self).on_finish(result);
    }
}

/// Fan out to two observers, first `.0` then `.1`.
impl<S, A, X, Y> SearchObserver<S, A> for (X, Y)
where
    X: SearchObserver<S, A>,
    Y: SearchObserver<S, A>,
{
    fn on_start(&mut self, state: &S, tasks: &[Task<A>]) {
        self.0.on_start(state, tasks);
        self.1.on_start(state, tasks);
    }

    fn on_seek(&mut self, depth: usize, tasks: &[Task<A>]) {
        self.0.on_seek(depth, tasks);
        self.1.on_seek(depth, tasks);
    }

    fn on_operator_attempt(&mut self, depth: usize, task: &Task<A>) {
        self.0.on_operator_attempt(depth, task);
        self.1.on_operator_attempt(depth, task);
    }

    fn on_operator(&mut self, depth: usize, task: &Task<A>, result: Option<&S>) {
        self.0.on_operator(depth, task, result);
        self.1.on_operator(depth, task, result);
    }

    fn on_methods_attempt(&mut self, depth: usize, task: &Task<A>) {
        self.0.on_methods_attempt(depth, task);
        self.1.on_methods_attempt(depth, task);
    }

    fn on_method(
        &mut self,
        depth: usize,
        task: &Task<A>,
        method: &str,
        subtasks: Option<&[Task<A>]>,
    ) {
        self.0.on_method(depth, task, method, subtasks);
        self.1.on_method(depth, task, method, subtasks);
    }

    fn on_success(&mut self, depth: usize, plan: &[Task<A>]) {
        self.0.on_success(depth, plan);
        self.1.on_success(depth, plan);
    }

    fn on_failure(&mut self, depth: usize) {
        self.0.on_failure(depth);
        self.1.on_failure(depth);
    }

    fn on_finish(&mut self, result: &Result<Option<Plan<A>>>) {
        self.0.on_finish(result);
        self.1.on_finish(result);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl<S, A> SearchObserver<S, A> for NoopObserver {}

/// Reports the search through `tracing` at the requested verbosity.
///
/// Summary lines go out at `info`, recursive calls at `debug` and operator/method detail at
/// `trace`, so the subscriber's filter and the verbosity both have to allow a line.
#[derive(Debug, Clone, Copy)]
pub struct LogObserver {
    verbosity: Verbosity,
}

impl LogObserver {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    fn at(&self, level: Verbosity) -> bool {
        self.verbosity >= level
    }
}

impl<S, A> SearchObserver<S, A> for LogObserver
where
    S: fmt::Debug,
    A: fmt::Display,
{
    fn on_start(&mut self, state: &S, tasks: &[Task<A>]) {
        if self.at(Verbosity::Summary) {
            tracing::info!(
                verbosity = self.verbosity as u8,
                ?state,
                tasks = %display_tasks(tasks),
                "hop: planning"
            );
        }
    }

    fn on_seek(&mut self, depth: usize, tasks: &[Task<A>]) {
        if self.at(Verbosity::Calls) {
            tracing::debug!(depth, tasks = %display_tasks(tasks), "seek");
        }
    }

    fn on_operator_attempt(&mut self, depth: usize, task: &Task<A>) {
        if self.at(Verbosity::Detail) {
            tracing::trace!(depth, action = %task, "applying operator");
        }
    }

    fn on_operator(&mut self, depth: usize, task: &Task<A>, result: Option<&S>) {
        if self.at(Verbosity::Detail) {
            match result {
                Some(state) => tracing::trace!(depth, action = %task, ?state, "operator applied"),
                None => tracing::trace!(depth, action = %task, "operator not applicable"),
            }
        }
    }

    fn on_methods_attempt(&mut self, depth: usize, task: &Task<A>) {
        if self.at(Verbosity::Detail) {
            tracing::trace!(depth, task = %task, "expanding methods");
        }
    }

    fn on_method(
        &mut self,
        depth: usize,
        task: &Task<A>,
        method: &str,
        subtasks: Option<&[Task<A>]>,
    ) {
        if self.at(Verbosity::Detail) {
            match subtasks {
                Some(subtasks) => tracing::trace!(
                    depth,
                    task = %task,
                    method,
                    new_tasks = %display_tasks(subtasks),
                    "method applied"
                ),
                None => tracing::trace!(depth, task = %task, method, "method not applicable"),
            }
        }
    }

    fn on_success(&mut self, depth: usize, plan: &[Task<A>]) {
        if self.at(Verbosity::Detail) {
            tracing::trace!(depth, plan = %display_tasks(plan), "returns plan");
        }
    }

    fn on_failure(&mut self, depth: usize) {
        if self.at(Verbosity::Detail) {
            tracing::trace!(depth, "returns failure");
        }
    }

    fn on_finish(&mut self, result: &Result<Option<Plan<A>>>) {
        if !self.at(Verbosity::Summary) {
            return;
        }
        match result {
            Ok(Some(plan)) => tracing::info!(len = plan.len(), plan = %plan, "hop: plan found"),
            Ok(None) => tracing::info!("hop: no plan"),
            Err(err) => tracing::warn!(error = %err, "hop: planning aborted"),
        }
    }
}

/// Records the search as plain [`TraceEvent`]s into a sink.
#[derive(Debug, Default)]
pub struct TraceRecorder<K> {
    sink: K,
}

impl<K: TraceSink> TraceRecorder<K> {
    pub fn new(sink: K) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }
}

impl<S, A, K> SearchObserver<S, A> for TraceRecorder<K>
where
    S: fmt::Debug,
    A: fmt::Display,
    K: TraceSink,
{
    fn on_seek(&mut self, depth: usize, tasks: &[Task<A>]) {
        self.sink
            .emit(TraceEvent::new(depth, tags::SEEK).with_subject(display_tasks(tasks)));
    }

    fn on_operator_attempt(&mut self, depth: usize, task: &Task<A>) {
        self.sink
            .emit(TraceEvent::new(depth, tags::OPERATOR_ATTEMPT).with_subject(task.to_string()));
    }

    fn on_operator(&mut self, depth: usize, task: &Task<A>, result: Option<&S>) {
        let event = match result {
            Some(state) => TraceEvent::new(depth, tags::OPERATOR_APPLIED)
                .with_detail(format!("{state:?}")),
            None => TraceEvent::new(depth, tags::OPERATOR_FAILED),
        };
        self.sink.emit(event.with_subject(task.to_string()));
    }

    fn on_methods_attempt(&mut self, depth: usize, task: &Task<A>) {
        self.sink
            .emit(TraceEvent::new(depth, tags::METHODS_ATTEMPT).with_subject(task.to_string()));
    }

    fn on_method(
        &mut self,
        depth: usize,
        task: &Task<A>,
        method: &str,
        subtasks: Option<&[Task<A>]>,
    ) {
        let tag = if subtasks.is_some() {
            tags::METHOD_APPLIED
        } else {
            tags::METHOD_FAILED
        };
        self.sink.emit(
            TraceEvent::new(depth, tag)
                .with_subject(task.to_string())
                .with_detail(method),
        );
    }

    fn on_success(&mut self, depth: usize, plan: &[Task<A>]) {
        self.sink
            .emit(TraceEvent::new(depth, tags::SUCCESS).with_subject(display_tasks(plan)));
    }

    fn on_failure(&mut self, depth: usize) {
        self.sink.emit(TraceEvent::new(depth, tags::FAILURE));
    }
}

/// Counters for one search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub calls: usize,
    pub operators_tried: usize,
    pub operators_applied: usize,
    pub methods_tried: usize,
    pub methods_applied: usize,
    pub failures: usize,
    pub max_depth: usize,
}

impl<S, A> SearchObserver<S, A> for SearchStats {
    fn on_seek(&mut self, depth: usize, _tasks: &[Task<A>]) {
        self.calls += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    fn on_operator(&mut self, _depth: usize, _task: &Task<A>, result: Option<&S>) {
        self.operators_tried += 1;
        if result.is_some() {
            self.operators_applied += 1;
        }
    }

    fn on_method(
        &mut self,
        _depth: usize,
        _task: &Task<A>,
        _method: &str,
        subtasks: Option<&[Task<A>]>,
    ) {
        self.methods_tried += 1;
        if subtasks.is_some() {
            self.methods_applied += 1;
        }
    }

    fn on_failure(&mut self, _depth: usize) {
        self.failures += 1;
    }
}
