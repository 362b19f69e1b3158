//! Display-label composition for registry records.

use crate::registry::domain::{Project, Station};

/// Composes a station's display label: the station name followed by the
/// names of its associated projects, comma separated.
#[must_use]
pub fn station_label(station: &Station, projects: &[Project]) -> String {
    if projects.is_empty() {
        return station.name().to_owned();
    }
    let names = projects
        .iter()
        .map(Project::name)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} - {names}", station.name())
}
