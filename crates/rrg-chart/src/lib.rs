//! Chart interaction for rrg.
//!
//! - `SessionState` - selection and toggle state, advanced one event at a time
//! - `EventBus` - FIFO queue between the window callbacks and the session
//! - `coords` - screen/chart conversion and hit-testing
//! - `RenderSnapshot` - everything the renderer draws for one frame

pub mod bus;
pub mod coords;
pub mod events;
pub mod session;
pub mod snapshot;

pub use bus::EventBus;
pub use coords::{hit_test, ChartBounds, ChartTransform, Hit, HitRadius, ScreenPos, ScreenRect};
pub use events::{ChartEvent, ChartKey, Outcome};
pub use session::{Selection, SessionState, ToggleFlags};
pub use snapshot::{format_coords, DateLabel, QuadrantLabel, RenderSnapshot, TrailView, HELP_TEXT};
