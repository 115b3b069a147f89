//! Common identifier and amount types used throughout the exchange system.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Amounts are arbitrary-precision unsigned integers in the asset's minor
/// units. No floating point crosses any boundary of this subsystem.
pub type Balance = num_bigint::BigUint;

/// Identifier of the chain an asset lives on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub String);

impl ChainId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}
}

impl fmt::Display for ChainId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<&str> for ChainId {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

/// Chain-scoped asset identifier. Immutable, used as a graph vertex key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId {
	/// Chain the asset is local to
	pub chain_id: ChainId,
	/// Asset identifier within that chain
	pub asset_id: u32,
}

impl AssetId {
	pub fn new(chain_id: impl Into<ChainId>, asset_id: u32) -> Self {
		Self {
			chain_id: chain_id.into(),
			asset_id,
		}
	}
}

impl fmt::Display for AssetId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.chain_id, self.asset_id)
	}
}

impl FromStr for AssetId {
	type Err = String;

	/// Parses the `chain:asset` form produced by [`fmt::Display`].
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (chain, asset) = s
			.rsplit_once(':')
			.ok_or_else(|| format!("expected chain:asset, got: {}", s))?;

		if chain.is_empty() {
			return Err(format!("empty chain id in: {}", s));
		}

		let asset_id = asset
			.parse()
			.map_err(|_| format!("asset id must be an unsigned integer, got: {}", asset))?;

		Ok(Self::new(chain, asset_id))
	}
}

/// Quote direction: sell an exact input amount or buy an exact output amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
	/// Exact amount in, quote reports the resulting output
	Sell,
	/// Exact amount out, quote reports the required input
	Buy,
}

impl fmt::Display for Direction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Direction::Sell => write!(f, "sell"),
			Direction::Buy => write!(f, "buy"),
		}
	}
}

impl FromStr for Direction {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"sell" => Ok(Direction::Sell),
			"buy" => Ok(Direction::Buy),
			other => Err(format!("unknown direction: {}", other)),
		}
	}
}

/// Arguments of a single quote query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteArgs {
	pub asset_in: AssetId,
	pub asset_out: AssetId,
	pub amount: Balance,
	pub direction: Direction,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_asset_id_display() {
		let asset = AssetId::new("polkadot", 0);
		assert_eq!(asset.to_string(), "polkadot:0");
	}

	#[test]
	fn test_asset_id_parsing_roundtrip() {
		let asset = AssetId::new("hydration", 5);
		assert_eq!(asset.to_string().parse::<AssetId>().unwrap(), asset);
		assert!("no-separator".parse::<AssetId>().is_err());
		assert!(":7".parse::<AssetId>().is_err());
		assert!("chain:x".parse::<AssetId>().is_err());
	}

	#[test]
	fn test_direction_parsing() {
		assert_eq!("sell".parse::<Direction>().unwrap(), Direction::Sell);
		assert_eq!("BUY".parse::<Direction>().unwrap(), Direction::Buy);
		assert!("swap".parse::<Direction>().is_err());
	}
}
