// ui/selection.rs - Region Selection State
//
// Pointer-driven state machine behind the selection overlay. It knows
// nothing about windows or drawing; the overlay feeds it events and
// redraws whatever `preview()` returns.

use crate::capture::{CaptureRect, Point};

/// Where the user is in the selection gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    /// Nothing drawn yet
    Idle,
    /// Primary button held. `anchor` is fixed, `current` follows the cursor.
    Dragging { anchor: Point, current: Point },
    /// Result emitted, overlay about to be torn down
    Released { rect: CaptureRect },
    /// Terminal
    Closed,
}

/// One-shot rectangle picker.
///
/// Exactly one of `release` or `cancel` returns `Some`; after that every
/// event is ignored.
#[derive(Debug)]
pub struct RegionSelection {
    state: SelectionState,
    /// Last known pointer position. Button events carry no position, so a
    /// press before the first move has nowhere to anchor.
    pointer: Option<Point>,
}

impl Default for RegionSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionSelection {
    pub fn new() -> Self {
        Self {
            state: SelectionState::Idle,
            pointer: None,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Pointer moved to `to`. Records it and updates a running drag.
    ///
    /// Returns true when the overlay needs a redraw.
    pub fn pointer_moved(&mut self, to: Point) -> bool {
        self.pointer = Some(to);
        self.move_to(to)
    }

    /// Primary button pressed at the last known pointer position.
    /// Ignored until the pointer has been seen at least once.
    pub fn pointer_pressed(&mut self) -> bool {
        match self.pointer {
            Some(at) => self.press(at),
            None => false,
        }
    }

    /// Primary button released at the last known pointer position
    pub fn pointer_released(&mut self) -> Option<CaptureRect> {
        let at = self.pointer?;
        self.release(at)
    }

    /// Primary button pressed. Starts a drag with a zero-size rectangle.
    /// Pressing again mid-drag restarts from the new point.
    ///
    /// Returns true when the overlay needs a redraw.
    pub fn press(&mut self, at: Point) -> bool {
        match self.state {
            SelectionState::Idle | SelectionState::Dragging { .. } => {
                self.state = SelectionState::Dragging {
                    anchor: at,
                    current: at,
                };
                true
            }
            SelectionState::Released { .. } | SelectionState::Closed => false,
        }
    }

    /// Pointer moved. Only matters while dragging.
    ///
    /// Returns true when the overlay needs a redraw.
    pub fn move_to(&mut self, to: Point) -> bool {
        if let SelectionState::Dragging { current, .. } = &mut self.state {
            if *current != to {
                *current = to;
                return true;
            }
        }
        false
    }

    /// Primary button released. Emits the normalized rectangle between the
    /// anchor and `at`, once.
    pub fn release(&mut self, at: Point) -> Option<CaptureRect> {
        match self.state {
            SelectionState::Dragging { anchor, .. } => {
                let rect = CaptureRect::from_corners(anchor, at);
                self.state = SelectionState::Released { rect };
                Some(rect)
            }
            _ => None,
        }
    }

    /// Overlay dismissed (Escape or close request) before a release.
    /// Emits the empty rectangle, meaning "use the full screen".
    pub fn cancel(&mut self) -> Option<CaptureRect> {
        match self.state {
            SelectionState::Idle | SelectionState::Dragging { .. } => {
                let rect = CaptureRect::default();
                self.state = SelectionState::Released { rect };
                Some(rect)
            }
            _ => None,
        }
    }

    /// Tear down after emission
    pub fn close(&mut self) {
        self.state = SelectionState::Closed;
    }

    /// Live rectangle to draw, if a drag is in progress
    pub fn preview(&self) -> Option<CaptureRect> {
        match self.state {
            SelectionState::Dragging { anchor, current } => {
                Some(CaptureRect::from_corners(anchor, current))
            }
            _ => None,
        }
    }
}
