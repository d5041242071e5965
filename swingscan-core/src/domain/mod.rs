//! Domain types: bars, bar series, intervals.

pub mod bar;
pub mod series;

pub use bar::Bar;
pub use series::{BarSeries, Interval};
