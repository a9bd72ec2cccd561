//! Shared test utilities for `geonet-core`.

use geonet_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::positions::{NodeId, Point, Positions};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `GEONET_PROPTEST_CASES`
/// and `GEONET_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Builds a position table from `(id, x, y)` triples, panicking on invalid
/// input.
#[must_use]
pub(crate) fn positions_from(entries: &[(u64, f64, f64)]) -> Positions {
    let mut positions = Positions::new();
    for &(id, x, y) in entries {
        if let Err(err) = positions.insert(NodeId::new(id), Point::new(x, y)) {
            panic!("invalid test positions: {err}");
        }
    }
    positions
}
