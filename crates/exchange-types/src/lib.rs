// exchange-types/src/lib.rs

//! # Exchange Types Library
//!
//! Shared data model for the asset-exchange router. Defines chain-scoped
//! asset identifiers, directed exchange edges, query-scoped paths, routes
//! and quotes, the error taxonomy, and the [`EdgeProvider`] trait that
//! concrete venue integrations implement.

pub mod common;
pub mod edge;
pub mod errors;
pub mod provider;
pub mod route;

pub use common::*;
pub use edge::*;
pub use errors::*;
pub use provider::*;
pub use route::*;
