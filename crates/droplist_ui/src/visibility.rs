//! Open/closed state machine of the dropdown.
//!
//! The state is a tagged union: popup geometry lives inside `Open`, so it
//! can't be read while the popup is closed. All changes go through
//! [`transition`], a pure function from state and action to the next state
//! and the notification to emit.

use serde::{Deserialize, Serialize};

use crate::item::{Key, OptionEntry, OptionItem};
use crate::placement::PopupGeometry;
use crate::selection::{Selection, SelectionModel};

/// Visibility of the popup.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum VisibilityState {
    #[default]
    Closed,
    /// `geometry` is `None` until the first measurement pass after opening.
    Open { geometry: Option<PopupGeometry> },
}

impl VisibilityState {
    pub fn is_open(&self) -> bool {
        matches!(self, VisibilityState::Open { .. })
    }

    pub fn geometry(&self) -> Option<PopupGeometry> {
        match self {
            VisibilityState::Open { geometry } => *geometry,
            VisibilityState::Closed => None,
        }
    }
}

/// Notification produced by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Opened,
    Closed,
}

/// Why an open popup is asked to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// Pointer pressed outside the widget.
    OutsidePointer,
    /// The page scrolled.
    GlobalScroll,
    /// Escape was pressed.
    Escape,
    /// The viewport changed size.
    ViewportResize,
    /// Keyboard focus left the widget.
    FocusLost,
}

/// Which dismissal signals close the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DismissPolicy {
    pub close_on_scroll: bool,
    pub close_on_escape: bool,
    pub close_on_resize: bool,
}

impl Default for DismissPolicy {
    fn default() -> Self {
        Self {
            close_on_scroll: true,
            close_on_escape: true,
            close_on_resize: true,
        }
    }
}

impl DismissPolicy {
    /// Outside presses and focus loss always close.
    pub fn allows(&self, reason: DismissReason) -> bool {
        match reason {
            DismissReason::OutsidePointer | DismissReason::FocusLost => true,
            DismissReason::GlobalScroll => self.close_on_scroll,
            DismissReason::Escape => self.close_on_escape,
            DismissReason::ViewportResize => self.close_on_resize,
        }
    }
}

/// Input to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Trigger activated.
    Toggle,
    /// A dismissal signal that the policy let through.
    Dismiss,
    /// Close without notification (after a selection, or controlled close).
    ForceClose,
    /// Open without notification (controlled open).
    ForceOpen,
}

/// Next state and notification for `action` applied to `state`.
pub fn transition(state: VisibilityState, action: Action) -> (VisibilityState, Option<Notice>) {
    match (state, action) {
        (VisibilityState::Closed, Action::Toggle) => {
            (VisibilityState::Open { geometry: None }, Some(Notice::Opened))
        }
        (VisibilityState::Open { .. }, Action::Toggle | Action::Dismiss) => {
            (VisibilityState::Closed, Some(Notice::Closed))
        }
        (VisibilityState::Closed, Action::ForceOpen) => (VisibilityState::Open { geometry: None }, None),
        (VisibilityState::Open { .. }, Action::ForceOpen) => (state, None),
        (_, Action::ForceClose) | (VisibilityState::Closed, Action::Dismiss) => {
            (VisibilityState::Closed, None)
        }
    }
}

/// Owns visibility, popup geometry and the selected value.
#[derive(Debug, Clone, Default)]
pub struct VisibilityController {
    state: VisibilityState,
    policy: DismissPolicy,
    selected: Option<Selection>,
}

impl VisibilityController {
    pub fn new(policy: DismissPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn state(&self) -> VisibilityState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn geometry(&self) -> Option<PopupGeometry> {
        self.state.geometry()
    }

    pub fn policy(&self) -> DismissPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: DismissPolicy) {
        self.policy = policy;
    }

    pub fn selected(&self) -> Option<&Selection> {
        self.selected.as_ref()
    }

    fn apply(&mut self, action: Action) -> Option<Notice> {
        let (next, notice) = transition(self.state, action);
        if next.is_open() != self.state.is_open() {
            log::debug!("Dropdown {:?}: {:?} -> {:?}", action, self.state, next);
        }
        self.state = next;
        notice
    }

    /// Flip between open and closed. Does nothing when there are no options.
    pub fn toggle(&mut self, has_options: bool) -> Option<Notice> {
        if !has_options {
            log::trace!("Ignoring toggle on empty option list");
            return None;
        }
        self.apply(Action::Toggle)
    }

    /// Close for `reason` if the policy allows it. Notifies only on an actual
    /// open to closed change.
    pub fn dismiss(&mut self, reason: DismissReason) -> Option<Notice> {
        if !self.policy.allows(reason) {
            return None;
        }
        let notice = self.apply(Action::Dismiss);
        if notice.is_some() {
            log::debug!("Dropdown dismissed by {:?}", reason);
        }
        notice
    }

    /// Record `item` as the selection and close, whatever the prior state.
    pub fn select<T: OptionItem>(&mut self, model: &SelectionModel, item: &T) -> Selection {
        let selection = model.selection_for(item);
        log::debug!("Dropdown selected {} ({})", selection.key, selection.label);
        self.selected = Some(selection.clone());
        self.apply(Action::ForceClose);
        selection
    }

    /// Close without notification, e.g. when the widget is unmounted.
    pub fn force_close(&mut self) {
        self.apply(Action::ForceClose);
    }

    /// External override of the open state. Opening is suppressed when there
    /// are no options.
    pub fn set_controlled_open(&mut self, open: bool, has_options: bool) {
        let action = if open && has_options {
            Action::ForceOpen
        } else {
            Action::ForceClose
        };
        self.apply(action);
    }

    /// Store measured geometry. Returns `false` (and stores nothing) while closed.
    pub fn store_geometry(&mut self, geometry: PopupGeometry) -> bool {
        match &mut self.state {
            VisibilityState::Open { geometry: slot } => {
                *slot = Some(geometry);
                true
            }
            VisibilityState::Closed => {
                log::warn!("Ignoring popup geometry measured while closed");
                false
            }
        }
    }

    /// Recompute the selection from an externally controlled value.
    pub fn sync_value<T: OptionItem>(
        &mut self,
        model: &SelectionModel,
        options: &[OptionEntry<T>],
        value: Option<&Key>,
    ) {
        self.selected = model.resolve_selection(options, value);
        if self.selected.is_none() {
            if let Some(value) = value {
                log::debug!("Controlled value {} matches no option", value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::options_from_items;
    use crate::placement::Direction;
    use serde_json::json;

    fn geometry() -> PopupGeometry {
        PopupGeometry {
            direction: Direction::Above,
            max_height: Some(120.0),
        }
    }

    #[test]
    fn test_starts_closed() {
        let controller = VisibilityController::default();
        assert!(!controller.is_open());
        assert_eq!(controller.geometry(), None);
    }

    #[test]
    fn test_toggle_cycles_with_notices() {
        let mut controller = VisibilityController::default();
        assert_eq!(controller.toggle(true), Some(Notice::Opened));
        assert!(controller.is_open());
        assert_eq!(controller.toggle(true), Some(Notice::Closed));
        assert!(!controller.is_open());
    }

    #[test]
    fn test_toggle_ignored_without_options() {
        let mut controller = VisibilityController::default();
        assert_eq!(controller.toggle(false), None);
        assert_eq!(controller.state(), VisibilityState::Closed);
    }

    #[test]
    fn test_dismiss_when_closed_is_silent() {
        let mut controller = VisibilityController::default();
        for reason in [
            DismissReason::OutsidePointer,
            DismissReason::GlobalScroll,
            DismissReason::Escape,
            DismissReason::ViewportResize,
            DismissReason::FocusLost,
        ] {
            assert_eq!(controller.dismiss(reason), None);
            assert_eq!(controller.state(), VisibilityState::Closed);
        }
    }

    #[test]
    fn test_dismiss_closes_and_clears_geometry() {
        let mut controller = VisibilityController::default();
        let _ = controller.toggle(true);
        assert!(controller.store_geometry(geometry()));
        assert_eq!(controller.geometry(), Some(geometry()));

        assert_eq!(controller.dismiss(DismissReason::Escape), Some(Notice::Closed));
        assert_eq!(controller.geometry(), None);
    }

    #[test]
    fn test_policy_blocks_configured_signals() {
        let mut controller = VisibilityController::new(DismissPolicy {
            close_on_scroll: false,
            close_on_escape: false,
            close_on_resize: false,
        });
        let _ = controller.toggle(true);
        assert_eq!(controller.dismiss(DismissReason::GlobalScroll), None);
        assert_eq!(controller.dismiss(DismissReason::Escape), None);
        assert_eq!(controller.dismiss(DismissReason::ViewportResize), None);
        assert!(controller.is_open());
        assert_eq!(controller.dismiss(DismissReason::OutsidePointer), Some(Notice::Closed));
    }

    #[test]
    fn test_geometry_rejected_while_closed() {
        let mut controller = VisibilityController::default();
        assert!(!controller.store_geometry(geometry()));
        assert_eq!(controller.geometry(), None);
    }

    #[test]
    fn test_select_closes_from_any_state() {
        let model = SelectionModel::new("id", "name");
        let item = json!({ "id": 1, "name": "A" });

        let mut open = VisibilityController::default();
        let _ = open.toggle(true);
        let selection = open.select(&model, &item);
        assert_eq!(selection.key, Key::from(1));
        assert!(!open.is_open());
        assert_eq!(open.selected(), Some(&selection));

        let mut closed = VisibilityController::default();
        let selection = closed.select(&model, &item);
        assert!(!closed.is_open());
        assert_eq!(closed.selected().map(|s| &s.key), Some(&selection.key));
    }

    #[test]
    fn test_controlled_open_and_close() {
        let mut controller = VisibilityController::default();
        controller.set_controlled_open(true, true);
        assert!(controller.is_open());
        let _ = controller.store_geometry(geometry());

        controller.set_controlled_open(false, true);
        assert!(!controller.is_open());
        assert_eq!(controller.geometry(), None);

        controller.set_controlled_open(true, false);
        assert!(!controller.is_open());
    }

    #[test]
    fn test_sync_value_matches_and_clears() {
        let model = SelectionModel::new("id", "name");
        let options = options_from_items(vec![
            json!({ "id": 1, "name": "A" }),
            json!({ "id": 2, "name": "B" }),
        ]);
        let mut controller = VisibilityController::default();

        controller.sync_value(&model, &options, Some(&Key::from(2)));
        assert_eq!(controller.selected().map(|s| s.label.as_str()), Some("B"));

        controller.sync_value(&model, &options, Some(&Key::from(3)));
        assert_eq!(controller.selected(), None);
    }

    #[test]
    fn test_transition_table() {
        let open = VisibilityState::Open {
            geometry: Some(geometry()),
        };
        assert_eq!(
            transition(VisibilityState::Closed, Action::Toggle),
            (VisibilityState::Open { geometry: None }, Some(Notice::Opened))
        );
        assert_eq!(transition(open, Action::Dismiss), (VisibilityState::Closed, Some(Notice::Closed)));
        assert_eq!(transition(open, Action::ForceClose), (VisibilityState::Closed, None));
        assert_eq!(transition(open, Action::ForceOpen), (open, None));
        assert_eq!(
            transition(VisibilityState::Closed, Action::Dismiss),
            (VisibilityState::Closed, None)
        );
    }
}
