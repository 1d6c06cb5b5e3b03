//! Hierarchical task network planning by depth-first decomposition.
//!
//! A [`Domain`] holds the operators (primitive actions) and, per task name, the ordered list of
//! methods that decompose it. A [`Planner`] searches that domain for a sequence of operator
//! invocations that accomplishes a task list, backtracking across operator outcomes and method
//! alternatives.
//!
//! ```
//! use hop_core::{task, State, Value};
//! use hop_planner::{Domain, Method, Operator, Planner};
//!
//! let domain = Domain::new()
//!     .with_operators([Operator::new("walk", |mut s: State, args: &[Value]| {
//!         let to = args.first()?.as_str()?;
//!         s.set("at", to);
//!         Some(s)
//!     })])
//!     .with_methods(
//!         "go",
//!         [Method::new("go_on_foot", |_s: &State, args: &[Value]| {
//!             Some(vec![task!("walk", args.first()?.clone())])
//!         })],
//!     );
//!
//! let start = State::new("s0").with("at", "home");
//! let plan = Planner::new(domain)
//!     .plan(&start, &[task!("go", "park")])
//!     .unwrap()
//!     .expect("plan");
//! assert_eq!(plan.to_string(), "[(walk park)]");
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod domain;
pub mod error;
pub mod observer;
pub mod planner;

pub use config::{PlannerConfig, Verbosity};
pub use domain::{Domain, Method, Operator};
pub use error::{PlanError, Result};
pub use observer::{LogObserver, NoopObserver, SearchObserver, SearchStats, TraceRecorder};
pub use planner::{CancelFlag, Planner};
