//! Conversion from HeartRails DTOs to domain types.

use crate::domain::{Coordinate, Station};

use super::types::StationDto;

/// Convert a station entry, rejecting impossible coordinates.
pub fn convert_station(dto: StationDto) -> Option<Station> {
    let coordinate = Coordinate::parse(dto.y, dto.x).ok()?;

    Some(Station {
        name: dto.name,
        line: dto.line,
        region: dto.prefecture,
        coordinate,
        postal_code: dto.postal.unwrap_or_default(),
        previous_station: dto.prev.filter(|s| !s.is_empty()),
        next_station: dto.next.filter(|s| !s.is_empty()),
    })
}
