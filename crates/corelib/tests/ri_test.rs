//! Invariant checks for RI matrices.
//!
//! # Test Strategy
//!
//! 1. **Known-good layouts**: cyclic placements pass for any size
//! 2. **Single defects**: flipping one cell always breaks a balance rule
//! 3. **Tag rule**: same-tag replicas are caught only for strict RIs

use corelib::{Node, RiViolation, Tag, TagAwarenessRank, Tags, VbmapParams, RI};
use proptest::prelude::*;

/// Node i replicates to i+1, ..., i+slaves (mod n).
fn cyclic(n: usize, slaves: usize) -> RI {
    let matrix = (0..n)
        .map(|i| (0..n).map(|j| (1..=slaves).any(|k| (i + k) % n == j)).collect())
        .collect();
    RI::new(matrix, TagAwarenessRank::StrictlyTagAware)
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_two_racks_scenario() {
    let params = VbmapParams::new(4, 1, "0:0,1:0,2:1,3:1".parse().unwrap());

    // 0 -> 2, 1 -> 3, 2 -> 1, 3 -> 0
    let ri = RI::new(
        vec![
            vec![false, false, true, false],
            vec![false, false, false, true],
            vec![false, true, false, false],
            vec![true, false, false, false],
        ],
        TagAwarenessRank::StrictlyTagAware,
    );
    assert_eq!(ri.verify(&params), Ok(()));

    // The plain cycle puts 0 -> 1 inside rack 0.
    assert_eq!(
        cyclic(4, 1).verify(&params),
        Err(RiViolation::SameTag { owner: 0, replica: 1 })
    );
}

#[test]
fn test_zero_slaves() {
    let params = VbmapParams::new(3, 0, Tags::trivial(3));
    assert_eq!(cyclic(3, 0).verify(&params), Ok(()));
}

#[test]
fn test_params_roundtrip_through_json() {
    let tags: Tags = vec![(Node(0), Tag(1)), (Node(1), Tag(0))].into_iter().collect();
    let params = VbmapParams::new(2, 1, tags);
    let json = serde_json::to_string(&params).unwrap();
    let back: VbmapParams = serde_json::from_str(&json).unwrap();
    assert_eq!(back, params);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Property: cyclic placements satisfy every invariant with unique tags
    #[test]
    fn cyclic_placement_is_valid((n, slaves) in (1usize..12).prop_flat_map(|n| (Just(n), 0..n))) {
        let params = VbmapParams::new(n, slaves, Tags::trivial(n));
        prop_assert_eq!(cyclic(n, slaves).verify(&params), Ok(()));
    }

    /// Property: flipping any single cell breaks a row or column sum
    #[test]
    fn single_flip_is_caught(
        (n, slaves, i, j) in (2usize..10).prop_flat_map(|n| (Just(n), 0..n, 0..n, 0..n))
    ) {
        let params = VbmapParams::new(n, slaves, Tags::trivial(n));
        let mut ri = cyclic(n, slaves);
        ri.matrix[i][j] = !ri.matrix[i][j];

        let is_balance_error = matches!(
            ri.verify(&params),
            Err(RiViolation::RowSum { .. }) | Err(RiViolation::ColumnSum { .. })
        );
        prop_assert!(is_balance_error);
    }
}

// ============================================================================
// Tag Rule
// ============================================================================

/// Racks of `rack_size` consecutive nodes.
fn racks(n: usize, rack_size: usize) -> Tags {
    (0..n).map(|i| (Node(i), Tag(i / rack_size))).collect()
}

fn with_rank(mut ri: RI, rank: TagAwarenessRank) -> RI {
    ri.tag_awareness_rank = rank;
    ri
}

proptest! {
    /// Property: a balanced RI with a same-tag cell fails only when strict
    #[test]
    fn same_tag_cell_fails_only_strict_ri(
        (rack_size, n) in (2usize..5).prop_flat_map(|r| (Just(r), r..14))
    ) {
        let params = VbmapParams::new(n, 1, racks(n, rack_size));

        // Node 0 replicates to node 1, which sits in the same rack.
        let strict = cyclic(n, 1);
        prop_assert_eq!(
            strict.verify(&params),
            Err(RiViolation::SameTag { owner: 0, replica: 1 })
        );

        for rank in [TagAwarenessRank::LooselyTagAware, TagAwarenessRank::TagUnaware] {
            prop_assert_eq!(with_rank(cyclic(n, 1), rank).verify(&params), Ok(()));
        }
    }

    /// Property: shifting by a whole rack never pairs rack mates
    #[test]
    fn rack_shift_is_strictly_valid(
        (rack_size, racks_count) in (1usize..5, 2usize..6)
    ) {
        let n = rack_size * racks_count;
        let params = VbmapParams::new(n, 1, racks(n, rack_size));
        let matrix = (0..n)
            .map(|i| (0..n).map(|j| j == (i + rack_size) % n).collect())
            .collect();
        let ri = RI::new(matrix, TagAwarenessRank::StrictlyTagAware);
        prop_assert_eq!(ri.verify(&params), Ok(()));
    }
}
