//! Stage abstraction over the container being reordered.

mod memory;

pub use memory::MemoryStage;

use kurbo::{Point, Size};
use uuid::Uuid;

/// Stable identity of a stage node.
pub type NodeId = Uuid;

/// Parent link of a node within a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent {
    /// Direct child of the container.
    Container,
    /// Nested under another tracked node.
    Node(NodeId),
    /// Not attached to the container's subtree.
    Detached,
}

/// Capability surface of the container whose children are reordered.
///
/// The engine renders nothing itself: it reads geometry from the stage and
/// writes order and style mutations back through it. Implementations wrap
/// a real widget tree; [`MemoryStage`] is the in-memory reference used by
/// tests and the demo binary.
///
/// Coordinates are page-relative for [`Stage::origin`] and
/// container-relative for per-node offsets, matching the frame pointer
/// events arrive in.
pub trait Stage {
    /// Direct children of the container, in their current order.
    fn children(&self) -> Vec<NodeId>;

    /// Parent link of a node.
    fn parent(&self, id: NodeId) -> Parent;

    /// Offset of the container itself within its positioning parent.
    fn origin(&self) -> Point;

    /// Rendered offset of a node relative to the container's content box.
    fn offset_of(&self, id: NodeId) -> Point;

    /// Current rendered size of a node.
    fn size_of(&self, id: NodeId) -> Size;

    /// Move `id` immediately before `anchor` in the child list.
    ///
    /// `None` appends at the end.
    fn move_before(&mut self, id: NodeId, anchor: Option<NodeId>);

    /// Stamp an explicit inline position on a child.
    fn set_slot_position(&mut self, id: NodeId, position: Point);

    /// Make the container a positioning context for absolute children.
    fn mark_positioning_context(&mut self);

    /// Promote a child to absolute positioning after the current layout
    /// pass completes, one tick later. Stamping explicit positions and
    /// promoting in the same pass would shift layout mid-conversion.
    fn defer_absolute(&mut self, id: NodeId);

    /// Toggle a node's visibility. The node keeps its slot either way.
    fn set_hidden(&mut self, id: NodeId, hidden: bool);

    /// Toggle transition animation on a node.
    fn set_transition_enabled(&mut self, id: NodeId, enabled: bool);

    /// Deep-clone `source` into a free-floating proxy on the topmost
    /// visual layer, absolutely positioned at `position`. The proxy lives
    /// outside the container and is not a tracked child.
    fn spawn_proxy(&mut self, source: NodeId, position: Point) -> NodeId;

    /// Reposition a floating proxy.
    fn place_proxy(&mut self, proxy: NodeId, position: Point);

    /// Detach and destroy a floating proxy.
    fn remove_proxy(&mut self, proxy: NodeId);
}
