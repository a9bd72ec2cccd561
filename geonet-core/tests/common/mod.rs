//! Position tables shared by the `geonet-core` integration suites.

use geonet_core::{NodeId, Point, Positions};

/// Builds a table from `(id, x, y)` triples.
pub fn table(entries: &[(u64, f64, f64)]) -> Positions {
    Positions::try_from_iter(
        entries
            .iter()
            .map(|&(id, x, y)| (NodeId::new(id), Point::new(x, y))),
    )
    .expect("fixture positions must be valid")
}

/// Four nodes: three within unit distance of the origin, one at (10, 10).
pub fn corner() -> Positions {
    table(&[(0, 0.0, 0.0), (1, 1.0, 0.0), (2, 0.0, 1.0), (3, 10.0, 10.0)])
}

/// `count` nodes evenly spaced on a line, one unit apart.
pub fn line(count: u64) -> Positions {
    let entries: Vec<_> = (0..count)
        .map(|id| (id, f64::from(u32::try_from(id).expect("small line")), 0.0))
        .collect();
    table(&entries)
}
