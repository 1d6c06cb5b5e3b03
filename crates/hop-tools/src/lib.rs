//! Tooling primitives for the hop planner.
//!
//! This crate is intentionally lightweight: plain-data search traces plus text rendering of
//! states, goals and registries. Planners produce the events; tooling decides what to do with them.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod render;
pub mod trace;

pub use render::{render_goal, render_methods, render_operators, render_state};
pub use trace::{NullTraceSink, TraceEvent, TraceLog, TraceSink, VecTraceSink};
