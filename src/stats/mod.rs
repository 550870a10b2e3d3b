//! Occupancy aggregation over the collected history
//!
//! The collector stores the payload opaquely; only this module looks inside
//! it. Each record's `data` is expected to be an array of venue rows with
//! `IdRecinto`, `Ocupacion` and `Aforo`. Anything else is skipped.

mod summary;

pub(crate) use summary::{Mean, OccupancySummary, SummaryQuery, summarize};

/// Venue ids served by the occupancy endpoint; 0 selects all of them
pub(crate) const PLACES: &[(u32, &str)] = &[
    (0, "All venues"),
    (1, "Alcobendas Principal"),
    (2, "Las Rozas Principal"),
    (4, "Legazpi Principal"),
    (5, "Chamberí Principal"),
];

pub(crate) const ALL_PLACES: u32 = 0;
pub(crate) const DEFAULT_PLACE: u32 = 4;

pub(crate) fn place_name(id: u32) -> Option<&'static str> {
    PLACES
        .iter()
        .find(|(place, _)| *place == id)
        .map(|(_, name)| *name)
}
