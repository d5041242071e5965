//! Data layer: provider trait, Yahoo Finance client, TTL cache,
//! index-membership universe, synthetic provider.

pub mod cache;
pub mod provider;
pub mod synthetic;
pub mod universe;
pub mod yahoo;

pub use cache::BarCache;
pub use provider::{DataError, DataProvider};
pub use synthetic::SyntheticProvider;
pub use universe::{IndexList, Universe};
pub use yahoo::YahooProvider;
