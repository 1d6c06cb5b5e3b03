//! YAML problem files.
//!
//! ```yaml
//! domain: blocks
//! state:
//!   name: state1
//!   vars:
//!     pos: { a: b, b: table, c: table }
//!     clear: { a: true, b: false, c: true }
//!     holding: false
//! goals:
//!   goal1b:
//!     vars:
//!       pos: { c: b, b: a }
//! tasks:
//!   - [move_blocks, { goal: goal1b }]
//! planner:
//!   verbosity: 1
//! ```
//!
//! Map keys are always strings: write numeric block names as `"12": 13`.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;

use hop_core::{Goal, State, Task, Value};
use hop_planner::PlannerConfig;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Problem {
    /// Name of a reference domain, see `hop_domains::DOMAINS`.
    pub domain: String,

    pub state: State,

    #[serde(default)]
    pub goals: BTreeMap<String, Goal>,

    /// Each task is `[name, arg...]`.
    pub tasks: Vec<Vec<Value>>,

    #[serde(default)]
    pub planner: PlannerConfig,
}

impl Problem {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read problem from {}", path.display()))?;
        let problem: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse problem from {}", path.display()))?;
        Ok(problem)
    }

    /// Named goals, each labelled with its key when the file gives it no name.
    fn named_goals(&self) -> BTreeMap<&str, Arc<Goal>> {
        self.goals
            .iter()
            .map(|(key, goal)| {
                let goal = if goal.name().is_empty() {
                    goal.variables()
                        .fold(Goal::new(key.as_str()), |g, (var, value)| {
                            g.with(var, value.clone())
                        })
                } else {
                    goal.clone()
                };
                (key.as_str(), Arc::new(goal))
            })
            .collect()
    }

    /// The task list, with `{goal: <name>}` arguments replaced by the named goal.
    pub fn tasks(&self) -> Result<Vec<Task>> {
        let goals = self.named_goals();
        self.tasks
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                let (name, args) = raw
                    .split_first()
                    .ok_or_else(|| anyhow!("task #{i} is empty"))?;
                let name = name
                    .as_str()
                    .ok_or_else(|| anyhow!("task #{i}: name must be a string, got {name}"))?;
                let args = args
                    .iter()
                    .map(|arg| resolve_arg(arg, &goals))
                    .collect::<Result<Vec<_>>>()
                    .with_context(|| format!("task #{i} ({name})"))?;
                Ok(Task::new(name.to_string()).with_args(args))
            })
            .collect()
    }
}

fn resolve_arg(arg: &Value, goals: &BTreeMap<&str, Arc<Goal>>) -> Result<Value> {
    let Some(map) = arg.as_map() else {
        return Ok(arg.clone());
    };
    match (map.len(), map.get("goal").and_then(Value::as_str)) {
        (1, Some(name)) => match goals.get(name) {
            Some(goal) => Ok(Value::Goal(Arc::clone(goal))),
            None => bail!("unknown goal '{name}'"),
        },
        _ => Ok(arg.clone()),
    }
}
