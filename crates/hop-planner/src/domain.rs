//! Operator and method registries.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use hop_core::{Plan, State, Task, TaskName, Value};

use crate::error::{PlanError, Result};

type ApplyFn<S, A> = dyn Fn(S, &[A]) -> Option<S> + Send + Sync;
type DecomposeFn<S, A> = dyn Fn(&S, &[A]) -> Option<Vec<Task<A>>> + Send + Sync;

/// A primitive action.
///
/// The function receives an owned copy of the state and either returns the state after the
/// action's effects or `None` when its preconditions do not hold.
pub struct Operator<S = State, A = Value> {
    name: TaskName,
    apply: Arc<ApplyFn<S, A>>,
}

impl<S, A> Operator<S, A> {
    pub fn new(
        name: impl Into<TaskName>,
        apply: impl Fn(S, &[A]) -> Option<S> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            apply: Arc::new(apply),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, state: S, args: &[A]) -> Option<S> {
        (self.apply)(state, args)
    }
}

impl<S, A> Clone for Operator<S, A> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            apply: Arc::clone(&self.apply),
        }
    }
}

impl<S, A> fmt::Debug for Operator<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator").field("name", &self.name).finish()
    }
}

/// One way of decomposing a compound task.
///
/// The function only reads the state. It returns `None` when its preconditions do not hold and
/// otherwise the subtasks that accomplish the task. `Some(vec![])` means "nothing left to do" and
/// is a success.
pub struct Method<S = State, A = Value> {
    name: TaskName,
    decompose: Arc<DecomposeFn<S, A>>,
}

impl<S, A> Method<S, A> {
    pub fn new(
        name: impl Into<TaskName>,
        decompose: impl Fn(&S, &[A]) -> Option<Vec<Task<A>>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            decompose: Arc::new(decompose),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn decompose(&self, state: &S, args: &[A]) -> Option<Vec<Task<A>>> {
        (self.decompose)(state, args)
    }
}

impl<S, A> Clone for Method<S, A> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            decompose: Arc::clone(&self.decompose),
        }
    }
}

impl<S, A> fmt::Debug for Method<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method").field("name", &self.name).finish()
    }
}

/// The operator table and the per-task method lists a planner consults.
///
/// A domain is an ordinary value owned by its caller, so independent configurations can coexist
/// and be shared across threads. Populate it before planning; the planner only reads it.
pub struct Domain<S = State, A = Value> {
    operators: BTreeMap<TaskName, Operator<S, A>>,
    methods: BTreeMap<TaskName, Vec<Method<S, A>>>,
}

impl<S, A> Default for Domain<S, A> {
    fn default() -> Self {
        Self {
            operators: BTreeMap::new(),
            methods: BTreeMap::new(),
        }
    }
}

impl<S, A> Clone for Domain<S, A> {
    fn clone(&self) -> Self {
        Self {
            operators: self.operators.clone(),
            methods: self.methods.clone(),
        }
    }
}

impl<S, A> fmt::Debug for Domain<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Domain")
            .field("operators", &self.operators.keys().collect::<Vec<_>>())
            .field("methods", &self.methods)
            .finish()
    }
}

impl<S, A> Domain<S, A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register operators under their own names.
    ///
    /// An operator replaces any earlier operator with the same name; operators with other names
    /// are kept.
    pub fn declare_operators<I>(&mut self, operators: I)
    where
        I: IntoIterator<Item = Operator<S, A>>,
    {
        for op in operators {
            self.operators.insert(op.name.clone(), op);
        }
    }

    /// Make `methods` the complete, ordered candidate list for `task`.
    ///
    /// This replaces whatever was declared for `task` before. Declaring an empty list keeps the
    /// name known to the planner, but every attempt to expand it fails.
    pub fn declare_methods<I>(&mut self, task: impl Into<TaskName>, methods: I)
    where
        I: IntoIterator<Item = Method<S, A>>,
    {
        self.methods
            .insert(task.into(), methods.into_iter().collect());
    }

    pub fn with_operators<I>(mut self, operators: I) -> Self
    where
        I: IntoIterator<Item = Operator<S, A>>,
    {
        self.declare_operators(operators);
        self
    }

    pub fn with_methods<I>(mut self, task: impl Into<TaskName>, methods: I) -> Self
    where
        I: IntoIterator<Item = Method<S, A>>,
    {
        self.declare_methods(task, methods);
        self
    }

    pub fn operators(&self) -> &BTreeMap<TaskName, Operator<S, A>> {
        &self.operators
    }

    pub fn methods(&self) -> &BTreeMap<TaskName, Vec<Method<S, A>>> {
        &self.methods
    }

    pub fn operator(&self, name: &str) -> Option<&Operator<S, A>> {
        self.operators.get(name)
    }

    pub fn methods_for(&self, task: &str) -> Option<&[Method<S, A>]> {
        self.methods.get(task).map(Vec::as_slice)
    }

    pub fn is_operator(&self, name: &str) -> bool {
        self.operators.contains_key(name)
    }

    pub fn has_methods(&self, task: &str) -> bool {
        self.methods.contains_key(task)
    }

    pub fn describe_operators(&self) -> String {
        hop_tools::render_operators(self.operators.keys().map(|k| &**k))
    }

    pub fn describe_methods(&self) -> String {
        hop_tools::render_methods(
            self.methods
                .iter()
                .map(|(task, methods)| (&**task, methods.iter().map(Method::name))),
        )
    }

    /// Apply a plan's operators in order, starting from a copy of `state`.
    ///
    /// Returns `Ok(None)` when some step's preconditions do not hold.
    pub fn execute(&self, state: &S, plan: &Plan<A>) -> Result<Option<S>>
    where
        S: Clone,
    {
        let mut current = state.clone();
        for (step, task) in plan.iter().enumerate() {
            let operator = self
                .operator(task.name())
                .ok_or_else(|| PlanError::UnknownOperator {
                    name: task.name().to_string(),
                    step,
                })?;
            match operator.apply(current, task.args()) {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }
}
