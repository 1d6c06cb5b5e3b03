//! Blocks world.
//!
//! State variables:
//! - `pos[b]`: where block `b` is: `"table"`, `"hand"` or another block.
//! - `clear[b]`: `false` if a block is on `b` or the hand holds `b`.
//! - `holding`: the block in the hand, or `false` when the hand is empty.
//!
//! Block names may be strings or integers; both are compared by their map key.
//!
//! `move_blocks` scans blocks in key order of the `clear` map, which is lexicographic (`"10"`
//! sorts before `"2"`), not the order the blocks were inserted. Every plan it finds is valid, but
//! on larger problems the move sequence can differ from one produced by a planner that scans in
//! insertion order.

use hop_core::{Goal, State, Task, Value};
use hop_planner::{Domain, Method, Operator};

pub const TABLE: &str = "table";
pub const HAND: &str = "hand";

fn same(a: &Value, b: &Value) -> bool {
    matches!((a.as_key(), b.as_key()), (Some(x), Some(y)) if x == y)
}

fn hand_empty(s: &State) -> bool {
    s.get("holding") == Some(&Value::Bool(false))
}

fn is_clear(s: &State, b: &str) -> bool {
    s.get_in("clear", b).and_then(Value::as_bool) == Some(true)
}

fn pickup(mut s: State, args: &[Value]) -> Option<State> {
    let arg = args.first()?;
    let b = arg.as_key()?;
    if !(s.get_in("pos", &b)?.is_str(TABLE) && is_clear(&s, &b) && hand_empty(&s)) {
        return None;
    }
    s.set_in("pos", &*b, HAND);
    s.set_in("clear", &*b, false);
    s.set("holding", arg.clone());
    Some(s)
}

fn unstack(mut s: State, args: &[Value]) -> Option<State> {
    let [arg, under] = args else { return None };
    let (b, c) = (arg.as_key()?, under.as_key()?);
    let on_c = same(s.get_in("pos", &b)?, under);
    if !(on_c && c != TABLE && is_clear(&s, &b) && hand_empty(&s)) {
        return None;
    }
    s.set_in("pos", &*b, HAND);
    s.set_in("clear", &*b, false);
    s.set("holding", arg.clone());
    s.set_in("clear", &*c, true);
    Some(s)
}

fn putdown(mut s: State, args: &[Value]) -> Option<State> {
    let b = args.first()?.as_key()?;
    if !s.get_in("pos", &b)?.is_str(HAND) {
        return None;
    }
    s.set_in("pos", &*b, TABLE);
    s.set_in("clear", &*b, true);
    s.set("holding", false);
    Some(s)
}

fn stack(mut s: State, args: &[Value]) -> Option<State> {
    let [arg, onto] = args else { return None };
    let (b, c) = (arg.as_key()?, onto.as_key()?);
    if !(s.get_in("pos", &b)?.is_str(HAND) && is_clear(&s, &c)) {
        return None;
    }
    s.set_in("pos", &*b, onto.clone());
    s.set_in("clear", &*b, true);
    s.set("holding", false);
    s.set_in("clear", &*c, false);
    Some(s)
}

pub fn operators() -> [Operator; 4] {
    [
        Operator::new("pickup", pickup),
        Operator::new("unstack", unstack),
        Operator::new("putdown", putdown),
        Operator::new("stack", stack),
    ]
}

/// Where a block stands with respect to the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The block and everything under it are where the goal wants them.
    Done,
    /// Something is on top of the block.
    Inaccessible,
    MoveToTable,
    MoveToBlock,
    /// Needs moving, but its destination is not ready yet.
    Waiting,
}

/// `true` when `b` and the whole tower under it already match the goal.
pub fn is_done(b: &str, s: &State, goal: &Goal) -> bool {
    if b == TABLE {
        return true;
    }
    let Some(here) = s.get_in("pos", b) else {
        return false;
    };
    if let Some(want) = goal.wants("pos", b) {
        if !same(want, here) {
            return false;
        }
    }
    if here.is_str(TABLE) {
        return true;
    }
    match here.as_key() {
        Some(under) => is_done(&under, s, goal),
        None => false,
    }
}

pub fn status(b: &str, s: &State, goal: &Goal) -> Status {
    if is_done(b, s, goal) {
        return Status::Done;
    }
    if !is_clear(s, b) {
        return Status::Inaccessible;
    }
    let dest = goal.wants("pos", b).and_then(Value::as_key);
    match dest {
        None => Status::MoveToTable,
        Some(dest) if dest == TABLE => Status::MoveToTable,
        Some(dest) if is_done(&dest, s, goal) && is_clear(s, &dest) => Status::MoveToBlock,
        Some(_) => Status::Waiting,
    }
}

/// Every block the state knows about, in lexicographic key order.
pub fn all_blocks(s: &State) -> Vec<String> {
    s.get("clear")
        .and_then(Value::as_map)
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default()
}

/// Move a block that can go straight to its final position, otherwise park a waiting block on
/// the table, and recurse. Nothing left to move decomposes to no subtasks.
fn move_blocks(s: &State, args: &[Value]) -> Option<Vec<Task>> {
    let goal_arg = args.first()?;
    let goal = goal_arg.as_goal()?;
    let recurse = || Task::new("move_blocks").with_arg(goal_arg.clone());

    let blocks = all_blocks(s);
    for b in &blocks {
        match status(b, s, goal) {
            Status::MoveToTable => {
                return Some(vec![move_one(b, Value::from(TABLE)), recurse()]);
            }
            Status::MoveToBlock => {
                let dest = goal.wants("pos", b)?.clone();
                return Some(vec![move_one(b, dest), recurse()]);
            }
            _ => continue,
        }
    }

    if let Some(b) = blocks.iter().find(|b| status(b, s, goal) == Status::Waiting) {
        return Some(vec![move_one(b, Value::from(TABLE)), recurse()]);
    }

    Some(Vec::new())
}

fn move_one(b: &str, dest: Value) -> Task {
    Task::new("move_one").with_arg(b).with_arg(dest)
}

fn move_one_m(_s: &State, args: &[Value]) -> Option<Vec<Task>> {
    let [b, dest] = args else { return None };
    Some(vec![
        Task::new("get").with_arg(b.clone()),
        Task::new("put").with_args([b.clone(), dest.clone()]),
    ])
}

fn get_m(s: &State, args: &[Value]) -> Option<Vec<Task>> {
    let arg = args.first()?;
    let b = arg.as_key()?;
    if !is_clear(s, &b) {
        return None;
    }
    let here = s.get_in("pos", &b)?;
    if here.is_str(TABLE) {
        Some(vec![Task::new("pickup").with_arg(arg.clone())])
    } else {
        Some(vec![Task::new("unstack").with_args([arg.clone(), here.clone()])])
    }
}

fn put_m(s: &State, args: &[Value]) -> Option<Vec<Task>> {
    let [b, dest] = args else { return None };
    if !same(s.get("holding")?, b) {
        return None;
    }
    if dest.is_str(TABLE) {
        Some(vec![Task::new("putdown").with_arg(b.clone())])
    } else {
        Some(vec![Task::new("stack").with_args([b.clone(), dest.clone()])])
    }
}

fn get_by_pickup(s: &State, args: &[Value]) -> Option<Vec<Task>> {
    let arg = args.first()?;
    is_clear(s, &arg.as_key()?).then(|| vec![Task::new("pickup_task").with_arg(arg.clone())])
}

fn get_by_unstack(s: &State, args: &[Value]) -> Option<Vec<Task>> {
    let arg = args.first()?;
    is_clear(s, &arg.as_key()?).then(|| vec![Task::new("unstack_task").with_arg(arg.clone())])
}

fn pickup_m(s: &State, args: &[Value]) -> Option<Vec<Task>> {
    let arg = args.first()?;
    is_clear(s, &arg.as_key()?).then(|| vec![Task::new("pickup").with_arg(arg.clone())])
}

fn unstack_m(s: &State, args: &[Value]) -> Option<Vec<Task>> {
    let arg = args.first()?;
    let b = arg.as_key()?;
    if !is_clear(s, &b) {
        return None;
    }
    let under = s.get_in("pos", &b)?.clone();
    Some(vec![Task::new("unstack").with_args([arg.clone(), under])])
}

/// Blocks world with a single `get` method that picks up or unstacks as appropriate.
pub fn domain() -> Domain {
    Domain::new()
        .with_operators(operators())
        .with_methods("move_blocks", [Method::new("move_blocks_m", move_blocks)])
        .with_methods("move_one", [Method::new("move_one_m", move_one_m)])
        .with_methods("get", [Method::new("get_m", get_m)])
        .with_methods("put", [Method::new("put_m", put_m)])
}

/// Blocks world where `get` first tries picking the block up and only then unstacking it, so
/// getting a stacked block backtracks.
pub fn backtracking_domain() -> Domain {
    let mut d = domain();
    d.declare_methods(
        "get",
        [
            Method::new("get_by_pickup", get_by_pickup),
            Method::new("get_by_unstack", get_by_unstack),
        ],
    );
    d.declare_methods("pickup_task", [Method::new("pickup_m", pickup_m)]);
    d.declare_methods("unstack_task", [Method::new("unstack_m", unstack_m)]);
    d
}
