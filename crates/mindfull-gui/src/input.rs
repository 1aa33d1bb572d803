use mindfull_core::Vec2;
use mindfull_events::InputEvent;

/// Pointer state for one egui frame, in canvas coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerSnapshot {
    pub pos: Option<Vec2>,
    /// Whether the pointer is over the canvas (and not over a panel).
    pub over_canvas: bool,
    pub primary_pressed: bool,
    pub secondary_pressed: bool,
    pub primary_released: bool,
}

/// Turns per-frame pointer snapshots into the press/move/release phases the
/// canvas consumes.
#[derive(Debug, Default)]
pub struct PointerTranslator {
    last_pos: Option<Vec2>,
}

impl PointerTranslator {
    pub fn translate(&mut self, snapshot: PointerSnapshot) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let pos = snapshot.pos.or(self.last_pos);
        let Some(pos) = pos else {
            return events;
        };

        if self.last_pos != Some(pos) {
            events.push(InputEvent::move_to(pos.x, pos.y));
        }
        if snapshot.over_canvas {
            if snapshot.primary_pressed {
                events.push(InputEvent::press(pos.x, pos.y));
            }
            if snapshot.secondary_pressed {
                events.push(InputEvent::secondary_press(pos.x, pos.y));
            }
        }
        // Releases count anywhere, so a drag ending over a panel still ends
        if snapshot.primary_released {
            events.push(InputEvent::release(pos.x, pos.y));
        }

        self.last_pos = Some(pos);
        events
    }
}
