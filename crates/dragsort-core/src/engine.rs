//! Gesture controller: the press/move/release state machine.

use crate::hit;
use crate::input::{MouseButton, PointerEvent};
use crate::plan;
use crate::slots::{SlotFrame, pin_layout};
use crate::stage::{NodeId, Parent, Stage};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest ancestor chain press resolution will walk.
const MAX_CLIMB_DEPTH: usize = 64;

/// Construction errors.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("drag handle {0} is not part of the stage")]
    UnknownHandle(NodeId),
}

/// Which presses may start a drag session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragHandles {
    /// Any press inside the container starts a drag.
    #[default]
    Container,
    /// Only presses on the listed nodes, or inside them, start one.
    Only(Vec<NodeId>),
}

/// Session callback: `(stage, index, node)`.
pub type SessionHook<S> = Box<dyn FnMut(&mut S, usize, NodeId)>;

/// Construction-time configuration for a [`ReorderEngine`].
pub struct Options<S: Stage> {
    /// Convert children to explicit absolute positions at startup and
    /// stamp displaced siblings into their new slots on every reorder.
    /// When off, reordering changes the child order and nothing else.
    pub positioned: bool,
    /// Which presses start a session.
    pub handles: DragHandles,
    /// Fired once per session when dragging visibly starts, with the
    /// grabbed child's index at press time and the floating proxy.
    pub on_drag: Option<SessionHook<S>>,
    /// Fired once per session on drop, with the final index and the live
    /// child occupying it.
    pub on_drop: Option<SessionHook<S>>,
}

impl<S: Stage> Default for Options<S> {
    fn default() -> Self {
        Self {
            positioned: true,
            handles: DragHandles::Container,
            on_drag: None,
            on_drop: None,
        }
    }
}

impl<S: Stage> Options<S> {
    /// Options with the defaults: positioned mode, whole-container handle,
    /// no callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable or enable positioned mode.
    pub fn positioned(mut self, positioned: bool) -> Self {
        self.positioned = positioned;
        self
    }

    /// Restrict drag starts to the given handle nodes.
    pub fn drag_handles(mut self, handles: DragHandles) -> Self {
        self.handles = handles;
        self
    }

    /// Install the drag-start callback.
    pub fn on_drag(mut self, hook: impl FnMut(&mut S, usize, NodeId) + 'static) -> Self {
        self.on_drag = Some(Box::new(hook));
        self
    }

    /// Install the drop callback.
    pub fn on_drop(mut self, hook: impl FnMut(&mut S, usize, NodeId) + 'static) -> Self {
        self.on_drop = Some(Box::new(hook));
        self
    }
}

/// Transient state spanning one press-to-release gesture.
#[derive(Debug)]
struct DragSession {
    /// The physical child being dragged; hidden while the proxy floats.
    grabbed: NodeId,
    /// Slot-tracking reference: advances to each hover target, so its
    /// index in `before` is always the grabbed child's current slot.
    tracked: NodeId,
    /// Child order snapshot taken at press time.
    before: Vec<NodeId>,
    /// Slot the grabbed child occupied at press time.
    press_index: usize,
    /// Container origin recomputed at press time.
    origin: Point,
    /// Pointer-to-element distance at press time; the proxy keeps this
    /// offset so it stays under the original grab point.
    grab_offset: Vec2,
    /// Floating proxy, present once dragging has visibly started. Taken
    /// exactly once on release.
    proxy: Option<NodeId>,
}

impl DragSession {
    /// Index of `node` in the press-time snapshot.
    fn slot_of(&self, node: NodeId) -> Option<usize> {
        self.before.iter().position(|&n| n == node)
    }
}

/// Phase of the gesture state machine.
#[derive(Debug, Default)]
enum GesturePhase {
    /// No active session.
    #[default]
    Idle,
    /// Press received, movement not yet seen.
    Armed(DragSession),
    /// The proxy is floating; reorders apply as the pointer moves.
    Dragging(DragSession),
}

/// Drag-to-reorder engine for the direct children of a stage.
///
/// Owns the full gesture lifecycle: a primary press arms a session, the
/// first move floats a proxy of the grabbed child and fires `on_drag`,
/// every further move hit-tests the pre-drag slot geometry and reorders
/// the children incrementally, and release drops the proxy and fires
/// `on_drop`. One session at a time; presses during a session are ignored
/// until release.
pub struct ReorderEngine<S: Stage> {
    options: Options<S>,
    frame: SlotFrame,
    phase: GesturePhase,
}

impl<S: Stage> ReorderEngine<S> {
    /// Build an engine over `stage` and capture the slot frame.
    ///
    /// In positioned mode this runs the layout-pinning pass first, so
    /// later absolute repositioning cannot shift layout. Fails if a
    /// configured drag handle is not part of the stage.
    pub fn new(stage: &mut S, options: Options<S>) -> Result<Self, BuildError> {
        if let DragHandles::Only(handles) = &options.handles {
            for &handle in handles {
                if stage.parent(handle) == Parent::Detached {
                    return Err(BuildError::UnknownHandle(handle));
                }
            }
        }
        if options.positioned {
            pin_layout(stage);
        }
        let frame = SlotFrame::capture(stage);
        Ok(Self {
            options,
            frame,
            phase: GesturePhase::Idle,
        })
    }

    /// Feed one normalized pointer event to the state machine.
    ///
    /// Returns `true` when the event drove a session (armed one, moved one
    /// along, or released one); hosts use this to suppress the default
    /// action of the raw event, whatever form that takes in their event
    /// model.
    pub fn handle_pointer_event(&mut self, stage: &mut S, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down {
                position,
                button,
                target,
            } => self.on_press(stage, position, button, target),
            PointerEvent::Move { position } => self.on_move(stage, position),
            // Any button release ends the session.
            PointerEvent::Up { .. } => self.on_release(stage),
        }
    }

    /// Whether a session (armed or dragging) is active.
    pub fn is_active(&self) -> bool {
        !matches!(self.phase, GesturePhase::Idle)
    }

    /// The primary slot positions captured at startup.
    pub fn frame(&self) -> &SlotFrame {
        &self.frame
    }

    fn on_press(
        &mut self,
        stage: &mut S,
        position: Point,
        button: MouseButton,
        target: NodeId,
    ) -> bool {
        if !button.is_primary() {
            return false;
        }
        if self.is_active() {
            log::debug!("press ignored: a session is already active");
            return false;
        }
        let Some(grabbed) = resolve_press(stage, target, &self.options.handles) else {
            log::debug!("press ignored: no draggable unit under {target}");
            return false;
        };
        let before = stage.children();
        let Some(press_index) = before.iter().position(|&n| n == grabbed) else {
            return false;
        };

        stage.set_transition_enabled(grabbed, false);

        // Origin can have drifted since the last session (scroll, resize);
        // it is pinned to zero when nothing is positioned against it.
        let origin = if self.options.positioned {
            stage.origin()
        } else {
            Point::ZERO
        };
        let grab_offset = position - (origin + stage.offset_of(grabbed).to_vec2());

        log::debug!("session armed on slot {press_index}");
        self.phase = GesturePhase::Armed(DragSession {
            grabbed,
            tracked: grabbed,
            before,
            press_index,
            origin,
            grab_offset,
            proxy: None,
        });
        true
    }

    fn on_move(&mut self, stage: &mut S, position: Point) -> bool {
        match std::mem::take(&mut self.phase) {
            GesturePhase::Idle => false,
            GesturePhase::Armed(mut session) => {
                // First movement: float the proxy at the grabbed child's
                // current on-screen location and vacate the child visually.
                // The proxy starts following the pointer on the next move.
                let at = session.origin + stage.offset_of(session.grabbed).to_vec2();
                let proxy = stage.spawn_proxy(session.grabbed, at);
                stage.set_hidden(session.grabbed, true);
                session.proxy = Some(proxy);

                if let Some(hook) = self.options.on_drag.as_mut() {
                    hook(stage, session.press_index, proxy);
                }
                log::debug!("drag started from slot {}", session.press_index);
                self.phase = GesturePhase::Dragging(session);
                true
            }
            GesturePhase::Dragging(mut session) => {
                if let Some(proxy) = session.proxy {
                    stage.place_proxy(proxy, position - session.grab_offset);
                }
                let target = hit::node_at_point(
                    stage,
                    &self.frame,
                    session.origin,
                    &session.before,
                    position,
                );
                if let Some(to) = target {
                    if to != session.tracked {
                        plan::reorder(
                            stage,
                            &self.frame,
                            &session.before,
                            session.tracked,
                            to,
                            self.options.positioned,
                        );
                        session.tracked = to;
                    }
                }
                self.phase = GesturePhase::Dragging(session);
                true
            }
        }
    }

    fn on_release(&mut self, stage: &mut S) -> bool {
        match std::mem::take(&mut self.phase) {
            GesturePhase::Idle => false,
            GesturePhase::Armed(session) => {
                // Press with no movement: no drag happened, nothing to drop.
                stage.set_transition_enabled(session.grabbed, true);
                log::debug!("session released without movement");
                true
            }
            GesturePhase::Dragging(mut session) => {
                stage.set_hidden(session.grabbed, false);
                if let Some(proxy) = session.proxy.take() {
                    stage.remove_proxy(proxy);
                }
                if let Some(drop_index) = session.slot_of(session.tracked) {
                    let live = stage.children();
                    if let Some(&dropped) = live.get(drop_index) {
                        log::debug!("dropped into slot {drop_index}");
                        if let Some(hook) = self.options.on_drop.as_mut() {
                            hook(stage, drop_index, dropped);
                        }
                    }
                }
                stage.set_transition_enabled(session.grabbed, true);
                true
            }
        }
    }
}

/// Walk `target`'s parent chain up to the direct child of the container.
///
/// Returns the draggable unit, or `None` when the chain leaves the
/// container's subtree or exceeds the climb bound — a press outside any
/// child is an explicit miss, not an error. When a handle subset is
/// configured the press is honored only if the chain passes through one of
/// the listed nodes.
fn resolve_press(stage: &impl Stage, target: NodeId, handles: &DragHandles) -> Option<NodeId> {
    let mut on_handle = matches!(handles, DragHandles::Container);
    let mut current = target;
    for _ in 0..MAX_CLIMB_DEPTH {
        if let DragHandles::Only(list) = handles {
            if list.contains(&current) {
                on_handle = true;
            }
        }
        match stage.parent(current) {
            Parent::Container => return on_handle.then_some(current),
            Parent::Node(parent) => current = parent,
            Parent::Detached => return None,
        }
    }
    None
}
