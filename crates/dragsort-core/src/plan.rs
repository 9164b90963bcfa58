//! Reorder planning: child-list moves and slot re-stamping.

use crate::slots::SlotFrame;
use crate::stage::{NodeId, Stage};

/// Move the grabbed child into the hovered element's slot.
///
/// `tracked` is the session's slot-tracking reference: its index in
/// `before` is the slot the grabbed child currently occupies, so the live
/// child at that index is the grabbed child itself. Moving forward inserts
/// after the target slot — an append when the target slot is the last one,
/// since no sibling exists past it. Moving backward inserts before the
/// target slot.
///
/// In positioned mode every child between the two slots is stamped with
/// the primary position of the slot it now occupies, the moved child
/// included at its final resting slot. The caller advances `tracked` to
/// the hovered element afterwards.
///
/// Returns the recomputed live child order.
pub fn reorder(
    stage: &mut impl Stage,
    frame: &SlotFrame,
    before: &[NodeId],
    tracked: NodeId,
    to: NodeId,
    positioned: bool,
) -> Vec<NodeId> {
    let live = stage.children();
    let Some(from_index) = before.iter().position(|&n| n == tracked) else {
        return live;
    };
    let Some(to_index) = before.iter().position(|&n| n == to) else {
        return live;
    };
    if from_index == to_index || from_index >= live.len() || to_index >= live.len() {
        return live;
    }

    let dir: isize = if from_index < to_index { 1 } else { -1 };
    let grabbed = live[from_index];

    let anchor = if dir > 0 {
        live.get(to_index + 1).copied()
    } else {
        Some(live[to_index])
    };
    stage.move_before(grabbed, anchor);
    log::debug!("reordered slot {from_index} -> {to_index}");

    // The stage's live order is the source of truth from here on.
    let live = stage.children();

    if positioned {
        let mut index = from_index;
        loop {
            stage.set_slot_position(live[index], frame.slot(index));
            if index == to_index {
                break;
            }
            index = index.wrapping_add_signed(dir);
        }
    }

    live
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::pin_layout;
    use crate::stage::MemoryStage;
    use kurbo::{Point, Size};

    fn positioned_rows(count: usize) -> (MemoryStage, SlotFrame, Vec<NodeId>) {
        let mut stage = MemoryStage::new();
        let ids: Vec<NodeId> = (0..count)
            .map(|i| stage.push_child(Point::new(0.0, i as f64 * 50.0), Size::new(100.0, 40.0)))
            .collect();
        pin_layout(&mut stage);
        stage.flush();
        let frame = SlotFrame::capture(&stage);
        (stage, frame, ids)
    }

    #[test]
    fn test_backward_move_inserts_before_target() {
        let (mut stage, frame, ids) = positioned_rows(4);
        let before = stage.children();

        let live = reorder(&mut stage, &frame, &before, ids[2], ids[0], true);

        assert_eq!(live, vec![ids[2], ids[0], ids[1], ids[3]]);
        assert_eq!(live, stage.children());
    }

    #[test]
    fn test_forward_move_inserts_after_target() {
        let (mut stage, frame, ids) = positioned_rows(4);
        let before = stage.children();

        let live = reorder(&mut stage, &frame, &before, ids[0], ids[2], true);

        assert_eq!(live, vec![ids[1], ids[2], ids[0], ids[3]]);
    }

    #[test]
    fn test_forward_move_to_last_slot_appends() {
        let (mut stage, frame, ids) = positioned_rows(3);
        let before = stage.children();

        let live = reorder(&mut stage, &frame, &before, ids[0], ids[2], true);

        assert_eq!(live, vec![ids[1], ids[2], ids[0]]);
    }

    #[test]
    fn test_displaced_siblings_stamped_into_slots() {
        let (mut stage, frame, ids) = positioned_rows(4);
        let before = stage.children();

        reorder(&mut stage, &frame, &before, ids[2], ids[0], true);

        // New order [2, 0, 1, 3]: the moved child lands on slot 0, the
        // displaced pair shift down one slot each.
        assert_eq!(stage.offset_of(ids[2]), frame.slot(0));
        assert_eq!(stage.offset_of(ids[0]), frame.slot(1));
        assert_eq!(stage.offset_of(ids[1]), frame.slot(2));
        assert_eq!(stage.offset_of(ids[3]), frame.slot(3));
    }

    #[test]
    fn test_unpositioned_move_stamps_nothing() {
        let mut stage = MemoryStage::new();
        let ids: Vec<NodeId> = (0..3)
            .map(|i| stage.push_child(Point::new(0.0, i as f64 * 50.0), Size::new(100.0, 40.0)))
            .collect();
        let frame = SlotFrame::capture(&stage);
        let before = stage.children();

        let live = reorder(&mut stage, &frame, &before, ids[0], ids[1], false);

        assert_eq!(live, vec![ids[1], ids[0], ids[2]]);
        for &id in &ids {
            assert_eq!(stage.inline_position(id), None);
        }
    }

    #[test]
    fn test_same_slot_is_a_no_op() {
        let (mut stage, frame, ids) = positioned_rows(3);
        let before = stage.children();

        let live = reorder(&mut stage, &frame, &before, ids[1], ids[1], true);

        assert_eq!(live, vec![ids[0], ids[1], ids[2]]);
        assert_eq!(stage.move_count(), 0);
    }

    #[test]
    fn test_consecutive_moves_track_the_grabbed_child() {
        let (mut stage, frame, ids) = positioned_rows(4);
        let before = stage.children();

        // Drag child 2 onto slot 0, then back out to slot 1: the grabbed
        // child is always the live occupant of the tracked slot.
        reorder(&mut stage, &frame, &before, ids[2], ids[0], true);
        let live = reorder(&mut stage, &frame, &before, ids[0], ids[1], true);

        assert_eq!(live, vec![ids[0], ids[2], ids[1], ids[3]]);
        assert_eq!(stage.offset_of(ids[2]), frame.slot(1));
    }
}
