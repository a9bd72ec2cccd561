//! Property-based tests for the pairwise-distance edge reconstructor.
//!
//! Layouts range from uniform clouds (distinct distances almost surely) to
//! integer lattices (many exact ties), so both the ordering and the
//! tie-breaking rules are exercised.

use std::collections::BTreeSet;

use proptest::prelude::*;
use test_strategy::Arbitrary;

use crate::{
    NodeId, Point, Positions, ReconstructError, pair_count,
    test_utils::suite_proptest_config,
};

use super::reconstruct;

/// Shape of the generated point set.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
enum Layout {
    /// Points drawn uniformly from a square.
    #[weight(3)]
    Uniform,
    /// Points snapped to a small integer lattice, producing exact ties.
    #[weight(2)]
    Lattice,
    /// Points copied from a handful of anchors with a tiny offset.
    #[weight(1)]
    Clustered,
}

#[derive(Clone, Debug)]
struct Fixture {
    positions: Positions,
    target: usize,
}

fn points_for(layout: Layout) -> BoxedStrategy<Vec<(f64, f64)>> {
    match layout {
        Layout::Uniform => {
            prop::collection::vec((-100.0_f64..100.0, -100.0_f64..100.0), 2..24).boxed()
        }
        Layout::Lattice => prop::collection::vec((0_i32..5, 0_i32..5), 2..24)
            .prop_map(|cells| {
                cells
                    .into_iter()
                    .map(|(x, y)| (f64::from(x), f64::from(y)))
                    .collect()
            })
            .boxed(),
        Layout::Clustered => prop::collection::vec((0_usize..3, 0_u8..4), 2..24)
            .prop_map(|members| {
                const ANCHORS: [(f64, f64); 3] = [(0.0, 0.0), (50.0, 0.0), (0.0, 50.0)];
                members
                    .into_iter()
                    .map(|(anchor, offset)| {
                        let (x, y) = ANCHORS.get(anchor).copied().unwrap_or_default();
                        (x + f64::from(offset) * 0.25, y)
                    })
                    .collect()
            })
            .boxed(),
    }
}

fn fixture_strategy() -> impl Strategy<Value = Fixture> {
    any::<Layout>()
        .prop_flat_map(points_for)
        .prop_flat_map(|points| {
            let available = pair_count(points.len()).unwrap_or(0);
            // Spread identifiers out and shuffle them relative to
            // coordinates so that table order differs from generation order.
            let positions = Positions::try_from_iter(points.into_iter().enumerate().map(
                |(index, (x, y))| {
                    let id = (index as u64).wrapping_mul(7_919) % 10_007;
                    (NodeId::new(id), Point::new(x, y))
                },
            ))
            .unwrap_or_default();
            (Just(positions), 0..=available)
        })
        .prop_map(|(positions, target)| Fixture { positions, target })
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn edge_count_matches_target(fixture in fixture_strategy()) {
        let reconstruction = reconstruct(&fixture.positions, fixture.target)?;
        prop_assert_eq!(reconstruction.edge_count(), fixture.target);
        prop_assert_eq!(reconstruction.graph().edge_count(), fixture.target);
        prop_assert_eq!(reconstruction.graph().node_count(), fixture.positions.len());
    }

    #[test]
    fn edges_are_simple_and_unique(fixture in fixture_strategy()) {
        let reconstruction = reconstruct(&fixture.positions, fixture.target)?;
        let mut seen = BTreeSet::new();
        for pair in reconstruction.edges() {
            prop_assert!(pair.source() < pair.target());
            prop_assert!(seen.insert((pair.source(), pair.target())));
        }
    }

    #[test]
    fn output_is_deterministic(fixture in fixture_strategy()) {
        let first = reconstruct(&fixture.positions, fixture.target)?;
        let second = reconstruct(&fixture.positions, fixture.target)?;
        prop_assert_eq!(first.edges(), second.edges());
    }

    #[test]
    fn larger_targets_extend_smaller_ones(
        fixture in fixture_strategy(),
        extra in 0_usize..8,
    ) {
        let available = pair_count(fixture.positions.len()).unwrap_or(0);
        let larger_target = fixture.target.saturating_add(extra).min(available);
        let smaller = reconstruct(&fixture.positions, fixture.target)?;
        let larger = reconstruct(&fixture.positions, larger_target)?;

        let (prefix, added) = larger.edges().split_at(fixture.target);
        prop_assert_eq!(prefix, smaller.edges());
        let radius = smaller.radius().unwrap_or(0.0);
        for pair in added {
            prop_assert!(pair.distance() >= radius);
        }
        prop_assert!(larger.edges().windows(2).all(|w| w[0].distance() <= w[1].distance()));
    }

    #[test]
    fn single_edge_is_the_closest_pair(fixture in fixture_strategy()) {
        let reconstruction = reconstruct(&fixture.positions, 1)?;
        let edge = reconstruction.edges()[0];

        let nodes: Vec<_> = fixture.positions.iter().collect();
        let mut best = f64::INFINITY;
        for (offset, &(_, left)) in nodes.iter().enumerate() {
            for &(_, right) in &nodes[offset + 1..] {
                best = best.min((left.x() - right.x()).hypot(left.y() - right.y()));
            }
        }
        prop_assert_eq!(edge.distance(), best);
    }

    #[test]
    fn rejected_pairs_are_never_closer(fixture in fixture_strategy()) {
        let reconstruction = reconstruct(&fixture.positions, fixture.target)?;
        let graph = reconstruction.graph();
        let Some(radius) = reconstruction.radius() else {
            return Ok(());
        };
        let nodes: Vec<_> = fixture.positions.iter().collect();
        for (offset, &(source, left)) in nodes.iter().enumerate() {
            for &(target, right) in &nodes[offset + 1..] {
                let distance = (left.x() - right.x()).hypot(left.y() - right.y());
                if distance < radius {
                    prop_assert!(graph.contains_edge(source, target));
                }
            }
        }
    }

    #[test]
    fn target_past_pair_count_is_rejected(
        fixture in fixture_strategy(),
        overshoot in 1_usize..16,
    ) {
        let available = pair_count(fixture.positions.len()).unwrap_or(0);
        let err = reconstruct(&fixture.positions, available + overshoot)
            .expect_err("target beyond pair count must fail");
        prop_assert!(
            matches!(err, ReconstructError::InvalidTarget { available: reported, .. } if reported == available),
            "unexpected error: {err:?}"
        );
    }
}
