// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use super::{Agglomerator, ClusterNode, ClusterVector, HierarchicalClusterer, LeafChunk};
use crate::error::{AnalysisError, ErrorKind};
use crate::model::fixtures::{links, nid};
use crate::model::NodeId;

fn ids(values: &[&str]) -> Vec<NodeId> {
    values.iter().map(|v| nid(v)).collect()
}

fn seed(tag: &str, values: &[f64]) -> (NodeId, ClusterVector) {
    (nid(tag), ClusterVector::dense(values.iter().copied()))
}

/// `t1` and `t4` share one input pattern, `t2` overlaps it, `t3` is unrelated.
#[fixture]
fn network() -> HierarchicalClusterer {
    HierarchicalClusterer::from_network(
        &ids(&["s1", "s2", "s3"]),
        &ids(&["t1", "t2", "t3", "t4"]),
        &links(&[
            ("s1", "t1"),
            ("s1", "t2"),
            ("s2", "t2"),
            ("s3", "t3"),
            ("s1", "t4"),
            ("x", "t3"),
        ]),
    )
    .unwrap()
}

#[rstest]
fn leaves_are_normalised_input_patterns(network: HierarchicalClusterer) {
    let leaves = network.leaves();
    assert_eq!(leaves.len(), 4);
    assert_eq!(leaves[0].1, ClusterVector::dense([1.0, 0.0, 0.0]));
    let t2 = &leaves[1].1;
    assert!((t2.norm() - 1.0).abs() < 1e-12);
    assert!((t2.get(0).unwrap() - t2.get(1).unwrap()).abs() < 1e-12);
}

#[rstest]
fn identical_patterns_share_a_pure_cluster(network: HierarchicalClusterer) {
    let tree = network.cluster().unwrap();
    assert_eq!(tree.leaf_count(), 4);
    assert_eq!(tree.in_order(), ids(&["t3", "t1", "t4", "t2"]));
    assert_eq!(
        tree.chunked(),
        vec![
            LeafChunk { members: ids(&["t3"]), count: 1 },
            LeafChunk { members: ids(&["t1", "t4"]), count: 2 },
            LeafChunk { members: ids(&["t2"]), count: 1 },
        ]
    );
}

#[rstest]
fn merged_consensus_vectors_are_unit_length(network: HierarchicalClusterer) {
    let tree = network.cluster().unwrap();
    for node in tree.nodes() {
        if let ClusterNode::Merged { consensus, similarity, .. } = node {
            assert!((consensus.norm() - 1.0).abs() < 1e-9);
            assert!((-1.0..=1.0).contains(similarity));
        }
    }
}

#[test]
fn flips_merged_children_when_outer_pair_is_closer() {
    let s = std::f64::consts::FRAC_1_SQRT_2;
    let clusterer = HierarchicalClusterer::from_seed_vectors(vec![
        seed("a", &[s, 0.0, s, 0.0]),
        seed("b", &[1.0, 0.0, 0.0, 0.0]),
        seed("c", &[0.0, 1.0, 0.0, 0.0]),
        seed("d", &[0.0, s, s, 0.0]),
    ])
    .unwrap();
    let tree = clusterer.cluster().unwrap();
    // `a` and `d` are more alike than `b` and `c`, so they end up adjacent.
    assert_eq!(tree.in_order(), ids(&["c", "d", "a", "b"]));
}

#[test]
fn all_identical_leaves_skip_merging() {
    let clusterer = HierarchicalClusterer::from_network(
        &ids(&["s"]),
        &ids(&["a", "b", "c"]),
        &links(&[("s", "a"), ("s", "b"), ("s", "c")]),
    )
    .unwrap();
    let tree = clusterer.cluster().unwrap();
    assert!(tree.root().is_some_and(ClusterNode::is_pure));
    assert_eq!(tree.chunked(), vec![LeafChunk { members: ids(&["a", "b", "c"]), count: 3 }]);
}

#[rstest]
#[case::empty(&[])]
#[case::single(&["solo"])]
fn degenerate_inputs_return_trivially(#[case] targets: &[&str]) {
    let clusterer = HierarchicalClusterer::from_network(&ids(&["s"]), &ids(targets), &[]).unwrap();
    let tree = clusterer.cluster().unwrap();
    assert_eq!(tree.in_order(), ids(targets));
    assert_eq!(tree.leaf_count(), targets.len());
}

#[test]
fn seed_vectors_fill_missing_values() {
    let clusterer = HierarchicalClusterer::from_seed_vectors(vec![
        (nid("a"), ClusterVector::new(vec![Some(2.0), None])),
        (nid("b"), ClusterVector::new(vec![Some(0.0), Some(4.0)])),
    ])
    .unwrap();
    let a = &clusterer.leaves()[0].1;
    assert!(!a.has_missing());
    assert!((a.get(0).unwrap() - 2.0 / 20f64.sqrt()).abs() < 1e-12);
}

#[test]
fn seed_vectors_must_share_a_length() {
    let err = HierarchicalClusterer::from_seed_vectors(vec![
        seed("a", &[1.0, 0.0]),
        seed("b", &[1.0]),
    ])
    .unwrap_err();
    assert_eq!(err, AnalysisError::LengthMismatch { expected: 2, actual: 1 });
    assert_eq!(err.kind(), ErrorKind::IllegalArgument);
}

#[test]
fn duplicate_sources_are_rejected() {
    assert!(HierarchicalClusterer::from_network(&ids(&["s", "s"]), &ids(&["t"]), &[]).is_err());
}

#[test]
fn merging_a_single_cluster_is_illegal_state() {
    let pure = vec![
        ClusterNode::Pure { members: ids(&["a"]), consensus: ClusterVector::dense([1.0, 0.0]) },
        ClusterNode::Pure { members: ids(&["b"]), consensus: ClusterVector::dense([0.0, 1.0]) },
    ];
    let mut agglomerator = Agglomerator::new(pure).unwrap();
    assert_eq!(agglomerator.merge_best().unwrap(), 2);
    let err = agglomerator.merge_best().unwrap_err();
    assert_eq!(err, AnalysisError::NothingToMerge { live: 1 });
    assert_eq!(err.kind(), ErrorKind::IllegalState);
}

#[test]
fn stale_candidates_are_skipped() {
    let pure = ["a", "b", "c"]
        .iter()
        .zip([[1.0, 0.0], [0.9, 0.1], [0.0, 1.0]])
        .map(|(tag, values)| ClusterNode::Pure {
            members: ids(&[*tag]),
            consensus: ClusterVector::dense(values).normalized(),
        })
        .collect::<Vec<_>>();
    let mut agglomerator = Agglomerator::new(pure).unwrap();
    let first = agglomerator.merge_best().unwrap();
    let second = agglomerator.merge_best().unwrap();
    assert_eq!((first, second), (3, 4));
    assert!(agglomerator.heap.iter().all(|c| !agglomerator.is_current(c)));
    let tree = agglomerator.finish();
    assert_eq!(tree.root_index(), Some(4));
    assert_eq!(tree.in_order(), ids(&["c", "a", "b"]));
}
