// exchange-graph/src/lib.rs

//! # Exchange Graph Library
//!
//! Builds immutable graph generations out of the edge sets advertised by
//! edge providers and enumerates bounded, cycle-free candidate paths
//! between assets. Also hosts the heuristic path-cost estimator used to
//! rank candidates before any exact quoting effort is spent.

pub mod builder;
pub mod cost;
pub mod graph;

pub use builder::GraphBuilder;
pub use cost::{rank_paths, EdgeKindCostEstimator, PathCostEstimating};
pub use graph::ExchangeGraph;

#[cfg(test)]
pub(crate) mod test_support;
