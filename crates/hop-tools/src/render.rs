//! Plain-text rendering of states, goals and registry tables.

use std::fmt::Write;

use hop_core::{Goal, State, Value};

fn render_bindings<'a>(
    name: &str,
    vars: impl Iterator<Item = (&'a str, &'a Value)>,
    indent: usize,
) -> String {
    let mut out = String::new();
    for (var, value) in vars {
        let _ = writeln!(out, "{:indent$}{name}.{var} = {value}", "");
    }
    out
}

/// One line per variable, e.g. `    state1.pos = {a: b, b: table}`.
pub fn render_state(state: &State, indent: usize) -> String {
    render_bindings(state.name(), state.variables(), indent)
}

pub fn render_goal(goal: &Goal, indent: usize) -> String {
    render_bindings(goal.name(), goal.variables(), indent)
}

/// `OPERATORS: pickup, putdown, ...`
pub fn render_operators<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let names: Vec<&str> = names.into_iter().collect();
    format!("OPERATORS: {}", names.join(", "))
}

/// A two-column `TASK: / METHODS:` table, methods listed in the order they are tried.
pub fn render_methods<'a, I, M>(rows: I) -> String
where
    I: IntoIterator<Item = (&'a str, M)>,
    M: IntoIterator<Item = &'a str>,
{
    let mut out = format!("{:<14}{}\n", "TASK:", "METHODS:");
    for (task, methods) in rows {
        let methods: Vec<&str> = methods.into_iter().collect();
        let _ = writeln!(out, "{:<14}{}", task, methods.join(", "));
    }
    out
}
