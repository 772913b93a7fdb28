use crate::geometry::ViewportSize;

/// Events the host delivers to a dropdown.
///
/// Pointer events on the trigger and the popup rows come from the widget's own
/// markup; the global ones arrive through the listeners acquired in
/// [`Dropdown::mount`](crate::Dropdown::mount).
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Pointer pressed on the trigger control.
    TriggerPressed { button: MouseButton },
    /// Pointer click on a popup row (index into the flattened rows).
    RowPressed { row: usize, button: MouseButton },
    /// Touch ended on a popup row.
    RowTouchEnd { row: usize },
    /// Pointer pressed outside the trigger and the popup. The host hit-tests
    /// the press against its live layout before delivering this.
    OutsidePointer,
    /// The page scrolled.
    GlobalScroll,
    /// The viewport changed size.
    ViewportResized { size: ViewportSize },
    /// Keyboard key pressed.
    KeyPress { key: KeyCode, modifiers: KeyModifiers },
    /// Keyboard focus left the widget.
    FocusLost,
    /// The popup's scroll viewport reported a new offset.
    PopupScrolled { offset: f32 },
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

/// Keyboard keys the dropdown tells apart; only Escape dismisses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Enter,
    Escape,
}

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}
