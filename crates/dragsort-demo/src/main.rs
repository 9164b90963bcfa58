//! Headless demo: replays a scripted drag over an in-memory stage.
//!
//! Builds a vertical list, grabs the third row, drags it over the first
//! slot and drops it, logging what a host UI would observe along the way.
//! Run with `RUST_LOG=debug` to see the engine's own trace.

use dragsort_core::{MemoryStage, MouseButton, Options, PointerEvent, ReorderEngine, Stage};
use kurbo::{Point, Size};
use std::collections::HashMap;

const LABELS: [&str; 4] = ["Alpha", "Beta", "Gamma", "Delta"];
const ROW_SIZE: Size = Size::new(240.0, 40.0);
const ROW_PITCH: f64 = 48.0;

fn main() {
    env_logger::init();
    log::info!("starting dragsort demo");

    let mut stage = MemoryStage::new();
    let mut names = HashMap::new();
    let mut rows = Vec::new();
    for (index, label) in LABELS.iter().enumerate() {
        let id = stage.push_child(Point::new(0.0, index as f64 * ROW_PITCH), ROW_SIZE);
        names.insert(id, *label);
        rows.push(id);
    }

    let options = Options::new()
        .on_drag(|_stage: &mut MemoryStage, index, proxy| {
            log::info!("drag started from index {index}, proxy {proxy}");
        })
        .on_drop(|_stage: &mut MemoryStage, index, node| {
            log::info!("dropped at index {index} ({node})");
        });
    let mut engine = match ReorderEngine::new(&mut stage, options) {
        Ok(engine) => engine,
        Err(err) => {
            log::error!("engine construction failed: {err}");
            return;
        }
    };
    // The host's next layout tick lands the absolute promotion.
    stage.flush();

    let grab = Point::new(120.0, 2.0 * ROW_PITCH + 20.0);
    let script = vec![
        PointerEvent::Down {
            position: grab,
            button: MouseButton::Left,
            target: rows[2],
        },
        PointerEvent::Move { position: grab },
        PointerEvent::Move {
            position: Point::new(120.0, ROW_PITCH + 20.0),
        },
        PointerEvent::Move {
            position: Point::new(120.0, 20.0),
        },
        PointerEvent::Up {
            position: Point::new(120.0, 20.0),
            button: MouseButton::Left,
        },
    ];
    match serde_json::to_string_pretty(&script) {
        Ok(json) => log::debug!("gesture script:\n{json}"),
        Err(err) => log::warn!("could not serialize gesture script: {err}"),
    }

    for event in script {
        engine.handle_pointer_event(&mut stage, event);
    }

    let order: Vec<&str> = stage
        .children()
        .iter()
        .map(|id| names.get(id).copied().unwrap_or("?"))
        .collect();
    log::info!("final order: {}", order.join(", "));
}
