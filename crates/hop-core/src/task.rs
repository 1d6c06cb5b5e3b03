use std::borrow::Cow;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Value;

/// Name shared by tasks, operators and method-bearing task names.
pub type TaskName = Cow<'static, str>;

/// A grounded task: a name plus its ordered arguments.
///
/// The name is looked up first among the operators, then among the methods.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Task<A = Value> {
    pub name: TaskName,
    #[cfg_attr(feature = "serde", serde(default = "Vec::new"))]
    pub args: Vec<A>,
}

impl<A> Task<A> {
    pub fn new(name: impl Into<TaskName>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn with_arg(mut self, arg: impl Into<A>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<A>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[A] {
        &self.args
    }

    pub fn arg(&self, index: usize) -> Option<&A> {
        self.args.get(index)
    }
}

impl<A: fmt::Display> fmt::Display for Task<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.name)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        f.write_str(")")
    }
}

/// Build a [`Task`] over [`Value`] arguments.
///
/// ```
/// use hop_core::task;
///
/// let t = task!("unstack", "a", "b");
/// assert_eq!(t.to_string(), "(unstack a b)");
/// ```
#[macro_export]
macro_rules! task {
    ($name:expr $(, $arg:expr)* $(,)?) => {
        $crate::Task::<$crate::Value>::new($name)$(.with_arg($crate::Value::from($arg)))*
    };
}

/// Render a task list as `[(a x), (b y)]`.
pub fn display_tasks<A: fmt::Display>(tasks: &[Task<A>]) -> String {
    let mut out = String::from("[");
    for (i, task) in tasks.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&task.to_string());
    }
    out.push(']');
    out
}
