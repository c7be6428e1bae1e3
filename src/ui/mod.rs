// ui/mod.rs - Region Selector UI
//
// selection: pointer state machine (pure, testable headless)
// overlay:   the winit window that drives it

pub mod overlay;
pub mod selection;

pub use overlay::pick_region;
pub use selection::{RegionSelection, SelectionState};
