// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Netlayout and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use rstest::{fixture, rstest};

use super::{snap_down, snap_up, NoCancel, PackRequest, Rect, RectPacker};
use crate::config::PackingConfig;
use crate::error::{AnalysisError, ErrorKind};
use crate::model::RectId;

fn rid(value: &str) -> RectId {
    RectId::new(value).unwrap()
}

#[fixture]
fn packer() -> RectPacker {
    RectPacker::from_config(&PackingConfig::default()).unwrap()
}

fn assert_disjoint(placed: &BTreeMap<RectId, Rect>) {
    let rects = placed.iter().collect::<Vec<_>>();
    for (i, (a_id, a)) in rects.iter().enumerate() {
        for (b_id, b) in &rects[i + 1..] {
            assert!(!a.intersects(b), "{a_id} {a:?} overlaps {b_id} {b:?}");
        }
    }
}

#[test]
fn snapping_rounds_to_the_unit() {
    assert_eq!(snap_up(41, 10), 50);
    assert_eq!(snap_up(40, 10), 40);
    assert_eq!(snap_up(-5, 10), 0);
    assert_eq!(snap_down(59, 10), 50);
    assert_eq!(snap_down(-1, 10), -10);
}

#[rstest]
fn children_go_right_of_their_parent(packer: RectPacker) {
    let request = PackRequest::new()
        .fix(rid("p"), Rect::new(0, 0, 40, 20))
        .float(rid("c"), 30, 20)
        .link(rid("p"), rid("c"));
    let placed = packer.pack(&request, &mut NoCancel).unwrap();
    assert_eq!(placed[&rid("p")], Rect::new(0, 0, 40, 20));
    assert_eq!(placed[&rid("c")], Rect::new(50, 0, 30, 20));
}

#[rstest]
fn parents_go_left_of_their_child(packer: RectPacker) {
    let request = PackRequest::new()
        .fix(rid("c"), Rect::new(100, 0, 40, 20))
        .float(rid("p"), 30, 20)
        .link(rid("p"), rid("c"));
    let placed = packer.pack(&request, &mut NoCancel).unwrap();
    assert_eq!(placed[&rid("p")], Rect::new(60, 0, 30, 20));
}

#[rstest]
fn blocked_positions_slide_down(packer: RectPacker) {
    let request = PackRequest::new()
        .fix(rid("p"), Rect::new(0, 0, 40, 20))
        .fix(rid("x"), Rect::new(50, 0, 40, 40))
        .float(rid("c"), 30, 20)
        .link(rid("p"), rid("c"));
    let placed = packer.pack(&request, &mut NoCancel).unwrap();
    assert_eq!(placed[&rid("c")], Rect::new(50, 50, 30, 20));
    assert_disjoint(&placed);
}

#[rstest]
fn unanchored_groups_start_at_the_left_edge(packer: RectPacker) {
    let request = PackRequest::new()
        .float(rid("p"), 20, 20)
        .float(rid("c"), 20, 20)
        .link(rid("p"), rid("c"));
    let placed = packer.pack(&request, &mut NoCancel).unwrap();
    assert_eq!(placed[&rid("p")], Rect::new(0, 0, 20, 20));
    assert_eq!(placed[&rid("c")], Rect::new(30, 0, 20, 20));
}

#[test]
fn singletons_fill_a_square_block_top_left_first() {
    let packer = RectPacker::new(10, 0).unwrap();
    let request = PackRequest::new()
        .float(rid("c"), 20, 20)
        .float(rid("a"), 20, 20)
        .float(rid("b"), 20, 20);
    let placed = packer.pack(&request, &mut NoCancel).unwrap();
    assert_eq!(placed[&rid("a")], Rect::new(0, 0, 20, 20));
    assert_eq!(placed[&rid("b")], Rect::new(20, 0, 20, 20));
    assert_eq!(placed[&rid("c")], Rect::new(0, 20, 20, 20));
}

#[rstest]
fn singletons_are_packed_below_everything_else(packer: RectPacker) {
    let request = PackRequest::new()
        .fix(rid("f"), Rect::new(0, 0, 50, 30))
        .float(rid("s"), 10, 10)
        .float(rid("t"), 15, 25);
    let placed = packer.pack(&request, &mut NoCancel).unwrap();
    assert_eq!(placed[&rid("t")], Rect::new(0, 40, 15, 25));
    assert!(placed[&rid("s")].y >= 40);
    assert_disjoint(&placed);
}

#[rstest]
fn mixed_requests_never_overlap(packer: RectPacker) {
    let mut request = PackRequest::new()
        .fix(rid("hub"), Rect::new(0, 0, 60, 40))
        .fix(rid("wall"), Rect::new(70, 0, 20, 200));
    for idx in 0..6 {
        let id = format!("child{idx}");
        request = request.float(rid(&id), 30 + idx * 5, 20).link(rid("hub"), rid(&id));
    }
    for idx in 0..5 {
        request = request.float(rid(&format!("loose{idx}")), 10 + idx * 7, 15);
    }
    let placed = packer.pack(&request, &mut NoCancel).unwrap();
    assert_eq!(placed.len(), 13);
    assert_disjoint(&placed);
    assert_eq!(placed[&rid("wall")], Rect::new(70, 0, 20, 200));
}

#[rstest]
fn cancellation_aborts_without_result(packer: RectPacker) {
    let request = PackRequest::new()
        .float(rid("p"), 20, 20)
        .float(rid("c"), 20, 20)
        .link(rid("p"), rid("c"));
    let mut polls = 0;
    let mut monitor = || {
        polls += 1;
        polls < 3
    };
    let err = packer.pack(&request, &mut monitor).unwrap_err();
    assert_eq!(err, AnalysisError::Cancelled);
    assert_eq!(err.kind(), ErrorKind::Cancelled);
}

#[rstest]
#[case::duplicate_id(PackRequest::new().fix(rid("a"), Rect::new(0, 0, 1, 1)).float(rid("a"), 5, 5))]
#[case::empty_size(PackRequest::new().float(rid("a"), 0, 5))]
#[case::unknown_link(PackRequest::new().float(rid("a"), 5, 5).link(rid("a"), rid("ghost")))]
fn malformed_requests_are_rejected(packer: RectPacker, #[case] request: PackRequest) {
    let err = packer.pack(&request, &mut NoCancel).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalArgument);
}

#[test]
fn packer_parameters_are_validated() {
    assert!(RectPacker::new(0, 10).is_err());
    assert!(RectPacker::new(10, -1).is_err());
}
