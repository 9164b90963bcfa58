//! In-memory stage implementation.

use super::{NodeId, Parent, Stage};
use kurbo::{Point, Size};
use std::collections::HashMap;
use uuid::Uuid;

/// In-memory stage for testing and headless use.
///
/// Layout is whatever the caller sets it to: nodes do not reflow when the
/// child order changes. That mirrors a positioned container, where slots
/// are fixed and occupants move between them; flow-layout reordering only
/// shows up here as the child order itself.
#[derive(Debug, Default)]
pub struct MemoryStage {
    origin: Point,
    order: Vec<NodeId>,
    nodes: HashMap<NodeId, NodeRecord>,
    proxies: HashMap<NodeId, ProxyRecord>,
    pending_absolute: Vec<NodeId>,
    positioning_context: bool,
    move_count: usize,
}

#[derive(Debug)]
struct NodeRecord {
    parent: Parent,
    layout_offset: Point,
    inline_position: Option<Point>,
    size: Size,
    absolute: bool,
    hidden: bool,
    transitions: bool,
}

#[derive(Debug)]
struct ProxyRecord {
    source: NodeId,
    position: Point,
    size: Size,
}

impl MemoryStage {
    /// Create a new empty stage at the page origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty stage offset within the page.
    pub fn with_origin(origin: Point) -> Self {
        Self {
            origin,
            ..Self::default()
        }
    }

    /// Append a direct child with the given rendered offset and size.
    pub fn push_child(&mut self, offset: Point, size: Size) -> NodeId {
        let id = Uuid::new_v4();
        self.nodes.insert(
            id,
            NodeRecord {
                parent: Parent::Container,
                layout_offset: offset,
                inline_position: None,
                size,
                absolute: false,
                hidden: false,
                transitions: true,
            },
        );
        self.order.push(id);
        id
    }

    /// Add a node nested inside an existing one (a grip, a label, ...).
    /// Nested nodes are not part of the reorderable child list.
    pub fn push_nested(&mut self, parent: NodeId, offset: Point, size: Size) -> NodeId {
        let id = Uuid::new_v4();
        self.nodes.insert(
            id,
            NodeRecord {
                parent: Parent::Node(parent),
                layout_offset: offset,
                inline_position: None,
                size,
                absolute: false,
                hidden: false,
                transitions: true,
            },
        );
        id
    }

    /// Apply deferred absolute promotions, standing in for the host's next
    /// layout tick.
    pub fn flush(&mut self) {
        for id in std::mem::take(&mut self.pending_absolute) {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.absolute = true;
            }
        }
    }

    /// Inline position stamped on a node, if any.
    pub fn inline_position(&self, id: NodeId) -> Option<Point> {
        self.nodes.get(&id).and_then(|n| n.inline_position)
    }

    /// Whether a node has been promoted to absolute positioning.
    pub fn is_absolute(&self, id: NodeId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.absolute)
    }

    /// Whether a node is currently hidden.
    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.hidden)
    }

    /// Whether transition animation is enabled on a node.
    pub fn transitions_enabled(&self, id: NodeId) -> bool {
        self.nodes.get(&id).is_none_or(|n| n.transitions)
    }

    /// Whether the container has been marked as a positioning context.
    pub fn is_positioning_context(&self) -> bool {
        self.positioning_context
    }

    /// Number of live floating proxies.
    pub fn proxy_count(&self) -> usize {
        self.proxies.len()
    }

    /// Current position of a floating proxy.
    pub fn proxy_position(&self, proxy: NodeId) -> Option<Point> {
        self.proxies.get(&proxy).map(|p| p.position)
    }

    /// Node a floating proxy was cloned from.
    pub fn proxy_source(&self, proxy: NodeId) -> Option<NodeId> {
        self.proxies.get(&proxy).map(|p| p.source)
    }

    /// Number of structural child moves performed so far.
    pub fn move_count(&self) -> usize {
        self.move_count
    }
}

impl Stage for MemoryStage {
    fn children(&self) -> Vec<NodeId> {
        self.order.clone()
    }

    fn parent(&self, id: NodeId) -> Parent {
        self.nodes.get(&id).map_or(Parent::Detached, |n| n.parent)
    }

    fn origin(&self) -> Point {
        self.origin
    }

    fn offset_of(&self, id: NodeId) -> Point {
        match self.nodes.get(&id) {
            // An inline position only takes effect once the node is out of
            // normal flow, as with `left`/`top` on a static element.
            Some(node) if node.absolute => node.inline_position.unwrap_or(node.layout_offset),
            Some(node) => node.layout_offset,
            None => Point::ZERO,
        }
    }

    fn size_of(&self, id: NodeId) -> Size {
        self.nodes
            .get(&id)
            .map(|n| n.size)
            .or_else(|| self.proxies.get(&id).map(|p| p.size))
            .unwrap_or(Size::ZERO)
    }

    fn move_before(&mut self, id: NodeId, anchor: Option<NodeId>) {
        if !self.order.contains(&id) {
            return;
        }
        self.order.retain(|&n| n != id);
        match anchor.and_then(|a| self.order.iter().position(|&n| n == a)) {
            Some(index) => self.order.insert(index, id),
            None => self.order.push(id),
        }
        self.move_count += 1;
    }

    fn set_slot_position(&mut self, id: NodeId, position: Point) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.inline_position = Some(position);
        }
    }

    fn mark_positioning_context(&mut self) {
        self.positioning_context = true;
    }

    fn defer_absolute(&mut self, id: NodeId) {
        self.pending_absolute.push(id);
    }

    fn set_hidden(&mut self, id: NodeId, hidden: bool) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.hidden = hidden;
        }
    }

    fn set_transition_enabled(&mut self, id: NodeId, enabled: bool) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.transitions = enabled;
        }
    }

    fn spawn_proxy(&mut self, source: NodeId, position: Point) -> NodeId {
        let id = Uuid::new_v4();
        let size = self.size_of(source);
        self.proxies.insert(
            id,
            ProxyRecord {
                source,
                position,
                size,
            },
        );
        id
    }

    fn place_proxy(&mut self, proxy: NodeId, position: Point) {
        if let Some(record) = self.proxies.get_mut(&proxy) {
            record.position = position;
        }
    }

    fn remove_proxy(&mut self, proxy: NodeId) {
        self.proxies.remove(&proxy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage_with_rows(count: usize) -> (MemoryStage, Vec<NodeId>) {
        let mut stage = MemoryStage::new();
        let rows = (0..count)
            .map(|i| stage.push_child(Point::new(0.0, i as f64 * 50.0), Size::new(100.0, 40.0)))
            .collect();
        (stage, rows)
    }

    #[test]
    fn test_move_before_sibling() {
        let (mut stage, rows) = stage_with_rows(3);

        stage.move_before(rows[2], Some(rows[0]));

        assert_eq!(stage.children(), vec![rows[2], rows[0], rows[1]]);
        assert_eq!(stage.move_count(), 1);
    }

    #[test]
    fn test_move_before_none_appends() {
        let (mut stage, rows) = stage_with_rows(3);

        stage.move_before(rows[0], None);

        assert_eq!(stage.children(), vec![rows[1], rows[2], rows[0]]);
    }

    #[test]
    fn test_inline_position_needs_promotion() {
        let (mut stage, rows) = stage_with_rows(2);
        let layout = stage.offset_of(rows[1]);

        stage.set_slot_position(rows[1], Point::new(7.0, 7.0));
        assert_eq!(stage.offset_of(rows[1]), layout);

        stage.defer_absolute(rows[1]);
        stage.flush();
        assert!(stage.is_absolute(rows[1]));
        assert_eq!(stage.offset_of(rows[1]), Point::new(7.0, 7.0));
    }

    #[test]
    fn test_proxy_lifecycle() {
        let (mut stage, rows) = stage_with_rows(1);

        let proxy = stage.spawn_proxy(rows[0], Point::new(10.0, 20.0));
        assert_eq!(stage.proxy_count(), 1);
        assert_eq!(stage.proxy_source(proxy), Some(rows[0]));
        assert_eq!(stage.size_of(proxy), Size::new(100.0, 40.0));

        stage.place_proxy(proxy, Point::new(30.0, 40.0));
        assert_eq!(stage.proxy_position(proxy), Some(Point::new(30.0, 40.0)));

        stage.remove_proxy(proxy);
        assert_eq!(stage.proxy_count(), 0);
    }

    #[test]
    fn test_nested_parent_links() {
        let (mut stage, rows) = stage_with_rows(1);
        let grip = stage.push_nested(rows[0], Point::new(4.0, 4.0), Size::new(16.0, 16.0));

        assert_eq!(stage.parent(grip), Parent::Node(rows[0]));
        assert_eq!(stage.parent(rows[0]), Parent::Container);
        assert_eq!(stage.parent(Uuid::new_v4()), Parent::Detached);
        assert_eq!(stage.children(), vec![rows[0]]);
    }
}
