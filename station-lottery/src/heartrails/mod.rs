//! HeartRails Express client.
//!
//! HeartRails Express is a free JSON API listing Japanese railway lines per
//! prefecture and stations per line. Key characteristics:
//! - No authentication; a single endpoint selected by the `method` parameter
//! - Errors come back with HTTP 200 and a `response.error` message
//! - Station coordinates are `x` = longitude, `y` = latitude

mod client;
mod convert;
mod error;
mod types;

pub use client::{HeartRailsClient, HeartRailsConfig};
pub use convert::convert_station;
pub use error::HeartRailsError;
pub use types::{LinesResponse, StationDto, StationsResponse};
