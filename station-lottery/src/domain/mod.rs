//! Domain types for the station lottery.
//!
//! Plain value types shared by the engine, the provider client and the web
//! layer. Provider data is trusted; range checks happen only where user
//! input enters (see [`Coordinate::parse`]).

mod budget;
mod coordinate;
mod region;
mod selector;
pub(crate) mod station;

pub use budget::TimeBudget;
pub use coordinate::{Coordinate, InvalidCoordinate};
pub use region::Region;
pub use selector::{LineSelector, RegionSelector, SubdivisionRule};
pub use station::Station;
