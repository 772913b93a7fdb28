//! Mapping host events onto popup dismissal signals.
//!
//! An open popup closes when the pointer goes down outside the widget, the
//! page scrolls, the viewport resizes, Escape is pressed or focus leaves.
//! Whether a signal actually closes the popup is up to the
//! [`DismissPolicy`](crate::DismissPolicy) of the controller.

use crate::event::{Event, KeyCode};
use crate::geometry::{Point, Rect};
use crate::visibility::DismissReason;

/// Helper for turning events into dismissal signals.
pub struct OverlayCloseHelper;

impl OverlayCloseHelper {
    /// Host-side hit test for the outside-interaction listener.
    ///
    /// # Arguments
    /// * `position` - The press position
    /// * `anchor` - Current bounds of the trigger
    /// * `popup` - Current bounds of the popup, if it is rendered
    ///
    /// Pass bounds from the layout the press happened in; a press is only
    /// outside when it misses both.
    pub fn is_outside(position: Point, anchor: Rect, popup: Option<Rect>) -> bool {
        !anchor.contains(position) && !popup.is_some_and(|popup| popup.contains(position))
    }

    /// The dismissal signal carried by `event`, if any.
    pub fn dismiss_reason(event: &Event) -> Option<DismissReason> {
        match event {
            Event::OutsidePointer => Some(DismissReason::OutsidePointer),
            Event::GlobalScroll => Some(DismissReason::GlobalScroll),
            Event::ViewportResized { .. } => Some(DismissReason::ViewportResize),
            Event::KeyPress {
                key: KeyCode::Escape,
                ..
            } => Some(DismissReason::Escape),
            Event::FocusLost => Some(DismissReason::FocusLost),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{KeyModifiers, MouseButton};
    use crate::geometry::ViewportSize;

    fn anchor() -> Rect {
        Rect::new(100.0, 100.0, 50.0, 20.0)
    }

    fn popup() -> Rect {
        Rect::new(100.0, 124.0, 50.0, 80.0)
    }

    #[test]
    fn test_press_outside_anchor_and_popup() {
        assert!(OverlayCloseHelper::is_outside(Point::new(50.0, 50.0), anchor(), Some(popup())));
        assert!(OverlayCloseHelper::is_outside(Point::new(300.0, 150.0), anchor(), Some(popup())));
        assert!(!OverlayCloseHelper::is_outside(Point::new(125.0, 110.0), anchor(), Some(popup())));
        assert!(!OverlayCloseHelper::is_outside(Point::new(125.0, 180.0), anchor(), Some(popup())));
    }

    #[test]
    fn test_press_without_popup_checks_anchor_only() {
        assert!(OverlayCloseHelper::is_outside(Point::new(125.0, 180.0), anchor(), None));
        assert!(!OverlayCloseHelper::is_outside(Point::new(125.0, 110.0), anchor(), None));
    }

    #[test]
    fn test_outside_pointer_dismisses() {
        assert_eq!(
            OverlayCloseHelper::dismiss_reason(&Event::OutsidePointer),
            Some(DismissReason::OutsidePointer)
        );
    }

    #[test]
    fn test_escape_scroll_resize_focus() {
        let escape = Event::KeyPress {
            key: KeyCode::Escape,
            modifiers: KeyModifiers::default(),
        };
        let resize = Event::ViewportResized {
            size: ViewportSize::new(800.0, 600.0),
        };
        assert_eq!(OverlayCloseHelper::dismiss_reason(&escape), Some(DismissReason::Escape));
        assert_eq!(
            OverlayCloseHelper::dismiss_reason(&Event::GlobalScroll),
            Some(DismissReason::GlobalScroll)
        );
        assert_eq!(
            OverlayCloseHelper::dismiss_reason(&resize),
            Some(DismissReason::ViewportResize)
        );
        assert_eq!(
            OverlayCloseHelper::dismiss_reason(&Event::FocusLost),
            Some(DismissReason::FocusLost)
        );
    }

    #[test]
    fn test_other_events_do_not_dismiss() {
        let enter = Event::KeyPress {
            key: KeyCode::Enter,
            modifiers: KeyModifiers::default(),
        };
        let trigger = Event::TriggerPressed {
            button: MouseButton::Left,
        };
        assert_eq!(OverlayCloseHelper::dismiss_reason(&enter), None);
        assert_eq!(OverlayCloseHelper::dismiss_reason(&trigger), None);
    }
}
