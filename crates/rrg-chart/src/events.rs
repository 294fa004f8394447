//! Event and outcome types.
//!
//! - [`ChartKey`] - keys the chart reacts to
//! - [`ChartEvent`] - a click in chart space or a key press
//! - [`Outcome`] - what the host should do after an event

use rrg_core::ChartPos;

use crate::coords::HitRadius;

/// Keys understood by the chart session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKey {
    /// Move highlighted cursors one point back.
    Left,
    /// Move highlighted cursors one point forward.
    Right,
    /// Clear every highlight.
    Delete,
    ToggleTails,
    ToggleAnnotations,
    ToggleHelp,
    /// Clear highlights and restore the startup toggles.
    Reset,
    /// End the session.
    Quit,
}

impl ChartKey {
    /// Get the keyboard shortcut shown for this key.
    pub fn shortcut(&self) -> &'static str {
        match self {
            ChartKey::Left => "←",
            ChartKey::Right => "→",
            ChartKey::Delete => "Delete",
            ChartKey::ToggleTails => "T",
            ChartKey::ToggleAnnotations => "A",
            ChartKey::ToggleHelp => "H",
            ChartKey::Reset => "R",
            ChartKey::Quit => "Q",
        }
    }
}

/// Input delivered to the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartEvent {
    /// Pointer click at a chart position. `radius` is the hit tolerance
    /// in chart units along each axis.
    Click { at: ChartPos, radius: HitRadius },
    Key(ChartKey),
}

/// Result of applying one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    /// Nothing visible changed.
    #[default]
    Unchanged,
    /// Selection or toggles changed, draw again.
    Redraw,
    /// The session was reset to its startup state, draw again.
    Reset,
    /// The session has ended.
    Quit,
}

impl Outcome {
    /// Check if the host needs to draw a new frame.
    pub fn needs_redraw(&self) -> bool {
        matches!(self, Outcome::Redraw | Outcome::Reset)
    }

    /// Combine the outcomes of consecutive events.
    pub fn merge(self, next: Outcome) -> Outcome {
        fn rank(outcome: Outcome) -> u8 {
            match outcome {
                Outcome::Unchanged => 0,
                Outcome::Redraw => 1,
                Outcome::Reset => 2,
                Outcome::Quit => 3,
            }
        }
        if rank(next) > rank(self) { next } else { self }
    }
}
