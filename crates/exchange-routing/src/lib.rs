// exchange-routing/src/lib.rs

//! # Exchange Routing Library
//!
//! Turns ranked candidate paths into a single best route by fanning exact
//! quote requests out over the candidates. Hops within one path are quoted
//! sequentially because each hop's amount depends on the previous hop's
//! result; different candidate paths race, bounded by the configured
//! concurrency, and individual failures only eliminate the failing path.

pub mod manager;

pub use manager::RouteManager;
