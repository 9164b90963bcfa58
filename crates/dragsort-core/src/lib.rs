//! Drag-to-reorder engine for the children of a container.
//!
//! A press on a child arms a session, the first move floats a visual proxy
//! of the grabbed child, and every further move hit-tests the pre-drag slot
//! geometry and rewrites the container's child order to follow the pointer.
//! The container itself stays behind the [`Stage`] trait, so the engine is
//! independent of any particular widget tree or rendering backend.

pub mod engine;
pub mod hit;
pub mod input;
pub mod plan;
pub mod slots;
pub mod stage;

pub use engine::{BuildError, DragHandles, Options, ReorderEngine, SessionHook};
pub use input::{MouseButton, PointerEvent};
pub use slots::SlotFrame;
pub use stage::{MemoryStage, NodeId, Parent, Stage};
