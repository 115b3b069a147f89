// exchange-core/src/lib.rs

//! # Exchange Core Library
//!
//! Wires the routing subsystem together: the [`GraphProxy`] façade that
//! callers quote against, the [`FeeSupportAggregator`] consumed by the
//! external fee-estimation concern, and the [`ExchangeService`] that owns
//! the provider list and keeps the graph generation fresh.
//!
//! ## Key Components
//!
//! - [`GraphProxy`] - stable façade holding the current graph generation
//! - [`FeeSupportAggregator`] - merged per-provider fee-payment predicates
//! - [`ExchangeService`] / [`ExchangeServiceBuilder`] - composition root

pub mod fee;
pub mod proxy;
pub mod service;

pub use fee::FeeSupportAggregator;
pub use proxy::GraphProxy;
pub use service::{ExchangeService, ExchangeServiceBuilder};
