//! Hit testing against the pre-drag slot geometry.

use crate::slots::SlotFrame;
use crate::stage::{NodeId, Stage};
use kurbo::Point;

/// Find the snapshot element whose original slot box contains `point`.
///
/// Boxes are built from the press-time container origin, the slot's primary
/// position, and the element's own current size — not from live layout,
/// which is in flux while siblings animate between slots. The scan runs in
/// reverse index order so the highest-index element wins when boxes overlap
/// transiently mid-animation, matching paint order. Containment excludes
/// the box edges.
pub fn node_at_point(
    stage: &impl Stage,
    frame: &SlotFrame,
    origin: Point,
    before: &[NodeId],
    point: Point,
) -> Option<NodeId> {
    for index in (0..before.len().min(frame.len())).rev() {
        let id = before[index];
        let slot = frame.slot(index);
        let size = stage.size_of(id);
        let left = origin.x + slot.x;
        let top = origin.y + slot.y;
        if point.x > left
            && point.x < left + size.width
            && point.y > top
            && point.y < top + size.height
        {
            return Some(id);
        }
    }
    None
}
