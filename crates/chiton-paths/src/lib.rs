//! Lowest-risk path search over a [`RiskMap`](chiton_core::RiskMap).
//!
//! - [`lowest_total_risk`]: top-left to bottom-right, cost only
//! - [`lowest_total_risk_between`]: any two cells, cost only
//! - [`lowest_risk_path`]: any two cells, full path with running cost
//!
//! Each call allocates its own frontier and visited set and drops them on
//! return, so a map can be searched from several threads at once.

mod frontier;
mod search;

pub use frontier::PathNode;
pub use search::{lowest_risk_path, lowest_total_risk, lowest_total_risk_between};
