//! Chart session state.
//!
//! [`SessionState`] is a plain value. Every event produces a new state plus
//! an [`Outcome`] telling the host whether to redraw. Trail data is only
//! read, never changed.

use rrg_core::{ChartPos, InstrumentTrail};

use crate::coords::{hit_test, HitRadius};
use crate::events::{ChartEvent, ChartKey, Outcome};

/// Selection of one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Unselected,
    /// Tail shown with the date label of the point at `cursor`.
    Highlighted { cursor: usize },
}

impl Selection {
    pub fn is_highlighted(&self) -> bool {
        matches!(self, Selection::Highlighted { .. })
    }

    pub fn cursor(&self) -> Option<usize> {
        match self {
            Selection::Highlighted { cursor } => Some(*cursor),
            Selection::Unselected => None,
        }
    }
}

/// Global display toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToggleFlags {
    pub show_tails: bool,
    pub show_annotations: bool,
    pub show_help: bool,
}

impl ToggleFlags {
    pub fn new(show_tails: bool, show_annotations: bool, show_help: bool) -> Self {
        Self {
            show_tails,
            show_annotations,
            show_help,
        }
    }

    /// Toggle tail line visibility.
    pub fn toggle_tails(&mut self) {
        self.show_tails = !self.show_tails;
    }

    /// Toggle name label visibility.
    pub fn toggle_annotations(&mut self) {
        self.show_annotations = !self.show_annotations;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }
}

/// Selection and toggle state of an interactive chart.
///
/// Selections are indexed like the trail slice passed to [`apply`](Self::apply).
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    selections: Vec<Selection>,
    flags: ToggleFlags,
    defaults: ToggleFlags,
    ended: bool,
}

impl SessionState {
    /// Start a session for `instruments` trails with the startup toggles.
    pub fn new(instruments: usize, defaults: ToggleFlags) -> Self {
        Self {
            selections: vec![Selection::Unselected; instruments],
            flags: defaults,
            defaults,
            ended: false,
        }
    }

    pub fn flags(&self) -> ToggleFlags {
        self.flags
    }

    /// Toggles restored by a reset.
    pub fn defaults(&self) -> ToggleFlags {
        self.defaults
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Selection of the trail at `index`.
    pub fn selection(&self, index: usize) -> Selection {
        self.selections.get(index).copied().unwrap_or_default()
    }

    /// Cursor of the trail at `index`, if highlighted.
    pub fn cursor(&self, index: usize) -> Option<usize> {
        self.selection(index).cursor()
    }

    /// `(trail index, cursor)` of every highlighted trail.
    pub fn highlighted(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.selections
            .iter()
            .enumerate()
            .filter_map(|(idx, sel)| sel.cursor().map(|cursor| (idx, cursor)))
    }

    pub fn has_highlight(&self) -> bool {
        self.selections.iter().any(Selection::is_highlighted)
    }

    /// Apply one event and return the next state.
    ///
    /// Events arriving after a quit are ignored.
    pub fn apply(mut self, event: &ChartEvent, trails: &[InstrumentTrail]) -> (Self, Outcome) {
        if self.ended {
            return (self, Outcome::Unchanged);
        }

        if self.selections.len() != trails.len() {
            self.selections.resize(trails.len(), Selection::Unselected);
        }

        let outcome = match *event {
            ChartEvent::Click { at, radius } => self.apply_click(at, radius, trails),
            ChartEvent::Key(key) => self.apply_key(key, trails),
        };

        (self, outcome)
    }

    /// Highlight the drawn marker nearest to `at`.
    ///
    /// Heads are always drawn. Older points only are while tails are shown
    /// or their trail is highlighted.
    fn apply_click(
        &mut self,
        at: ChartPos,
        radius: HitRadius,
        trails: &[InstrumentTrail],
    ) -> Outcome {
        let show_tails = self.flags.show_tails;
        let selections = &self.selections;
        let hit = hit_test(trails, at, radius, |idx| {
            show_tails || selections.get(idx).is_some_and(Selection::is_highlighted)
        });

        match hit {
            Some(hit) => {
                log::debug!("Highlight {} at point {}", trails[hit.trail].symbol, hit.point);
                self.selections[hit.trail] = Selection::Highlighted { cursor: hit.point };
                Outcome::Redraw
            }
            None => Outcome::Unchanged,
        }
    }

    fn apply_key(&mut self, key: ChartKey, trails: &[InstrumentTrail]) -> Outcome {
        match key {
            ChartKey::Left => self.step_cursors(-1, trails),
            ChartKey::Right => self.step_cursors(1, trails),
            ChartKey::Delete => {
                if !self.has_highlight() {
                    return Outcome::Unchanged;
                }
                self.clear_selections();
                Outcome::Redraw
            }
            ChartKey::ToggleTails => {
                self.flags.toggle_tails();
                Outcome::Redraw
            }
            ChartKey::ToggleAnnotations => {
                self.flags.toggle_annotations();
                Outcome::Redraw
            }
            ChartKey::ToggleHelp => {
                self.flags.toggle_help();
                Outcome::Redraw
            }
            ChartKey::Reset => {
                self.clear_selections();
                self.flags = self.defaults;
                Outcome::Reset
            }
            ChartKey::Quit => {
                self.ended = true;
                Outcome::Quit
            }
        }
    }

    /// Move every highlighted cursor by `step`, clamped to its trail.
    fn step_cursors(&mut self, step: isize, trails: &[InstrumentTrail]) -> Outcome {
        let mut moved = false;

        for (selection, trail) in self.selections.iter_mut().zip(trails) {
            if let Selection::Highlighted { cursor } = selection {
                let last = trail.len().saturating_sub(1);
                let next = cursor.saturating_add_signed(step).min(last);
                if next != *cursor {
                    *cursor = next;
                    moved = true;
                }
            }
        }

        if moved { Outcome::Redraw } else { Outcome::Unchanged }
    }

    fn clear_selections(&mut self) {
        self.selections.fill(Selection::Unselected);
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rrg_core::RrgPoint;

    use super::*;

    fn trail(symbol: &str, coords: &[(f64, f64)]) -> InstrumentTrail {
        let start = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        let points = coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| RrgPoint::new(start + chrono::Days::new(7 * i as u64), x, y))
            .collect();
        InstrumentTrail::new(symbol, symbol, points)
    }

    fn trails() -> Vec<InstrumentTrail> {
        vec![
            trail("AAA", &[(98.0, 98.0), (99.0, 99.0), (100.5, 100.5), (101.5, 101.0)]),
            trail("BBB", &[(102.0, 97.0), (102.5, 96.5), (103.0, 96.0), (103.5, 95.5)]),
        ]
    }

    fn click(x: f64, y: f64) -> ChartEvent {
        ChartEvent::Click {
            at: ChartPos::new(x, y),
            radius: HitRadius::uniform(0.2),
        }
    }

    fn key(key: ChartKey) -> ChartEvent {
        ChartEvent::Key(key)
    }

    fn tails_shown() -> ToggleFlags {
        ToggleFlags::new(true, true, false)
    }

    fn run(
        state: SessionState,
        events: &[ChartEvent],
        trails: &[InstrumentTrail],
    ) -> (SessionState, Outcome) {
        events.iter().fold((state, Outcome::Unchanged), |(state, _), event| {
            state.apply(event, trails)
        })
    }

    #[test]
    fn test_click_then_right_then_delete() {
        let trails = trails();
        let state = SessionState::new(trails.len(), tails_shown());

        // Click the second point of AAA
        let (state, outcome) = state.apply(&click(99.05, 99.0), &trails);
        assert_eq!(outcome, Outcome::Redraw);
        assert_eq!(state.selection(0), Selection::Highlighted { cursor: 1 });
        assert_eq!(state.selection(1), Selection::Unselected);

        let (state, outcome) = state.apply(&key(ChartKey::Right), &trails);
        assert_eq!(outcome, Outcome::Redraw);
        assert_eq!(state.cursor(0), Some(2));

        let (state, outcome) = state.apply(&key(ChartKey::Delete), &trails);
        assert_eq!(outcome, Outcome::Redraw);
        assert_eq!(state.selection(0), Selection::Unselected);
        assert!(state.cursor(0).is_none());
        assert!(!state.has_highlight());
    }

    #[test]
    fn test_cursor_clamps_at_ends() {
        let trails = trails();
        let state = SessionState::new(trails.len(), ToggleFlags::default());

        let (state, _) = state.apply(&click(101.5, 101.0), &trails);
        assert_eq!(state.cursor(0), Some(3));

        let (state, outcome) = state.apply(&key(ChartKey::Right), &trails);
        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(state.cursor(0), Some(3));

        let left = [key(ChartKey::Left); 5];
        let (state, _) = run(state, &left, &trails);
        assert_eq!(state.cursor(0), Some(0));

        let (state, outcome) = state.apply(&key(ChartKey::Left), &trails);
        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(state.cursor(0), Some(0));
    }

    #[test]
    fn test_arrows_move_every_highlight() {
        let trails = trails();
        let state = SessionState::new(trails.len(), tails_shown());

        let (state, _) = run(state, &[click(98.0, 98.0), click(103.0, 96.0)], &trails);
        assert_eq!(state.highlighted().collect::<Vec<_>>(), vec![(0, 0), (1, 2)]);

        let (state, outcome) = state.apply(&key(ChartKey::Right), &trails);
        assert_eq!(outcome, Outcome::Redraw);
        assert_eq!(state.highlighted().collect::<Vec<_>>(), vec![(0, 1), (1, 3)]);

        // BBB is already at its last point, AAA still moves
        let (state, outcome) = state.apply(&key(ChartKey::Right), &trails);
        assert_eq!(outcome, Outcome::Redraw);
        assert_eq!(state.highlighted().collect::<Vec<_>>(), vec![(0, 2), (1, 3)]);
    }

    #[test]
    fn test_arrows_without_highlight_do_nothing() {
        let trails = trails();
        let state = SessionState::new(trails.len(), ToggleFlags::default());

        let (next, outcome) = state.clone().apply(&key(ChartKey::Left), &trails);
        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(next, state);

        let (_, outcome) = state.apply(&key(ChartKey::Delete), &trails);
        assert_eq!(outcome, Outcome::Unchanged);
    }

    #[test]
    fn test_click_on_empty_space_keeps_highlights() {
        let trails = trails();
        let state = SessionState::new(trails.len(), tails_shown());

        let (state, _) = state.apply(&click(98.0, 98.0), &trails);
        let (next, outcome) = state.clone().apply(&click(90.0, 110.0), &trails);

        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(next, state);
    }

    #[test]
    fn test_hidden_tail_points_ignore_clicks() {
        let trails = trails();
        let state = SessionState::new(trails.len(), ToggleFlags::default());

        // Tails off and nothing highlighted: only heads are drawn
        let (next, outcome) = state.clone().apply(&click(98.0, 98.0), &trails);
        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(next, state);

        let (state, outcome) = state.apply(&click(101.5, 101.0), &trails);
        assert_eq!(outcome, Outcome::Redraw);
        assert_eq!(state.cursor(0), Some(3));

        // A highlighted trail shows its tail markers, so they can be picked
        let (state, outcome) = state.apply(&click(98.0, 98.0), &trails);
        assert_eq!(outcome, Outcome::Redraw);
        assert_eq!(state.cursor(0), Some(0));

        // BBB is still head-only
        let (next, outcome) = state.clone().apply(&click(102.0, 97.0), &trails);
        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(next, state);
    }

    #[test]
    fn test_toggle_involution() {
        let trails = trails();
        let start = SessionState::new(trails.len(), ToggleFlags::new(false, true, false));

        let (once, outcome) = start.clone().apply(&key(ChartKey::ToggleTails), &trails);
        assert_eq!(outcome, Outcome::Redraw);
        assert!(once.flags().show_tails);

        let (twice, _) = once.apply(&key(ChartKey::ToggleTails), &trails);
        assert_eq!(twice.flags(), start.flags());

        let (state, _) = run(
            start,
            &[key(ChartKey::ToggleAnnotations), key(ChartKey::ToggleHelp)],
            &trails,
        );
        assert!(!state.flags().show_annotations);
        assert!(state.flags().show_help);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let trails = trails();
        let defaults = ToggleFlags::new(true, false, false);
        let state = SessionState::new(trails.len(), defaults);

        let (state, _) = run(
            state,
            &[click(98.0, 98.0), key(ChartKey::ToggleTails), key(ChartKey::ToggleHelp)],
            &trails,
        );
        assert!(state.has_highlight());

        let (state, outcome) = state.apply(&key(ChartKey::Reset), &trails);
        assert_eq!(outcome, Outcome::Reset);
        assert!(!state.has_highlight());
        assert_eq!(state.flags(), defaults);
    }

    #[test]
    fn test_quit_ignores_later_events() {
        let trails = trails();
        let state = SessionState::new(trails.len(), ToggleFlags::default());

        let (state, outcome) = state.apply(&key(ChartKey::Quit), &trails);
        assert_eq!(outcome, Outcome::Quit);
        assert!(state.is_ended());

        let (state, outcome) = state.apply(&click(98.0, 98.0), &trails);
        assert_eq!(outcome, Outcome::Unchanged);
        assert!(!state.has_highlight());
    }

    #[test]
    fn test_trails_are_not_modified() {
        let trails = trails();
        let before = trails.clone();
        let state = SessionState::new(trails.len(), ToggleFlags::default());

        let _ = run(
            state,
            &[click(99.0, 99.0), key(ChartKey::Right), key(ChartKey::Reset)],
            &trails,
        );
        assert_eq!(trails, before);
    }
}
