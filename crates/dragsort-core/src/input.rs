//! Normalized pointer input for the reorder engine.

use crate::stage::NodeId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Whether this is the primary button that may start a drag.
    pub fn is_primary(self) -> bool {
        matches!(self, MouseButton::Left)
    }
}

/// Pointer event in page coordinates.
///
/// Hosts normalize whatever raw event model they sit on into this shape
/// once, at the input boundary — including event models that report button
/// codes differently or require scroll offsets to be added to client
/// coordinates by hand. The engine never branches on the event source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Button press on `target`, a node of the stage (possibly nested
    /// inside the child it belongs to).
    Down {
        position: Point,
        button: MouseButton,
        target: NodeId,
    },
    /// Pointer motion. Delivered document-wide during a session, so the
    /// drag keeps tracking outside the container's bounds.
    Move { position: Point },
    /// Button release.
    Up { position: Point, button: MouseButton },
}

impl PointerEvent {
    /// Page position the event was delivered at.
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position, .. } => *position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorded_script_replays() {
        let target = uuid::Uuid::new_v4();
        let script = vec![
            PointerEvent::Down {
                position: Point::new(12.0, 34.0),
                button: MouseButton::Left,
                target,
            },
            PointerEvent::Move {
                position: Point::new(12.0, 80.0),
            },
            PointerEvent::Up {
                position: Point::new(12.0, 80.0),
                button: MouseButton::Left,
            },
        ];

        let json = serde_json::to_string(&script).unwrap();
        let replayed: Vec<PointerEvent> = serde_json::from_str(&json).unwrap();

        assert_eq!(replayed.len(), 3);
        assert_eq!(replayed[0].position(), Point::new(12.0, 34.0));
        assert!(matches!(
            &replayed[0],
            PointerEvent::Down { button: MouseButton::Left, target: t, .. } if *t == target
        ));
    }
}
