//! Umbrella crate that re-exports the `hop-*` building blocks.
//!
//! Enable only the pieces you need with `default-features = false` and the `core`, `planner`,
//! `tools` or `domains` features.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use hop_core as core;

#[cfg(feature = "planner")]
#[cfg_attr(docsrs, doc(cfg(feature = "planner")))]
pub use hop_planner as planner;

#[cfg(feature = "tools")]
#[cfg_attr(docsrs, doc(cfg(feature = "tools")))]
pub use hop_tools as tools;

#[cfg(feature = "domains")]
#[cfg_attr(docsrs, doc(cfg(feature = "domains")))]
pub use hop_domains as domains;

#[cfg(feature = "core")]
pub use hop_core::{map, task};
