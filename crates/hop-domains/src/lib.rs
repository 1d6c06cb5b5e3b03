//! Reference domain models for the hop planner.
//!
//! Each module exposes functions building a ready-to-plan [`hop_planner::Domain`] over
//! [`hop_core::State`] and [`hop_core::Value`] arguments.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

use hop_planner::Domain;

pub mod blocks;
pub mod travel;

/// Names accepted by [`by_name`].
pub const DOMAINS: [&str; 3] = ["blocks", "blocks-backtracking", "travel"];

/// Look up a reference domain by name.
pub fn by_name(name: &str) -> Option<Domain> {
    match name {
        "blocks" => Some(blocks::domain()),
        "blocks-backtracking" => Some(blocks::backtracking_domain()),
        "travel" => Some(travel::domain()),
        _ => None,
    }
}
