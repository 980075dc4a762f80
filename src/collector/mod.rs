//! HAProxy statistics collection.
//!
//! - `traits`: the `StatsSource` seam polled by the aggregator
//! - `csv`: parser for the `show stat` CSV format
//! - `http`: blocking HTTP source for `;csv` stats pages
//! - `mock`: scripted source for tests

pub mod csv;
pub mod http;
pub mod mock;
pub mod traits;

pub use http::HttpStatsSource;
pub use traits::{StatsError, StatsSource};
