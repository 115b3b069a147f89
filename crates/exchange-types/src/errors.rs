//! Error types for the exchange system.

use crate::common::AssetId;
use thiserror::Error;

pub type ExchangeResult<T> = std::result::Result<T, ExchangeError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
	/// No graph generation has been installed yet. Happens during startup
	/// before the first successful provider sync; callers should retry.
	#[error("no exchange graph installed yet")]
	NoGraph,

	/// No viable route exists for the requested asset pair. Terminal for
	/// this query; retrying without a changed graph is futile.
	#[error("no route from {asset_in} to {asset_out}")]
	NoRoute {
		asset_in: AssetId,
		asset_out: AssetId,
	},

	/// A provider-local failure. Absorbed inside the route manager where it
	/// only eliminates the candidate path containing the failing edge.
	#[error("provider error: {0}")]
	Provider(String),

	#[error("configuration error: {0}")]
	Config(String),
}

impl ExchangeError {
	pub fn no_route(asset_in: AssetId, asset_out: AssetId) -> Self {
		Self::NoRoute {
			asset_in,
			asset_out,
		}
	}
}
