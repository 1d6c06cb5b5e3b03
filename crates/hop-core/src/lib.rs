//! State, task and plan model for hierarchical task network planning.
//!
//! These types are what the `hop-planner` search manipulates: a [`State`] of variable bindings,
//! partial [`Goal`]s, grounded [`Task`]s and the [`Plan`] a successful search produces.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod plan;
pub mod state;
pub mod task;
pub mod value;

pub use plan::Plan;
pub use state::{Goal, State};
pub use task::{display_tasks, Task, TaskName};
pub use value::Value;
