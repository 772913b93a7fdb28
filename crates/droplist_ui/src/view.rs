//! Render model of a dropdown.
//!
//! The widget doesn't draw anything itself. [`Dropdown::view`](crate::Dropdown::view)
//! produces this description, and the host renders it with its own markup,
//! styling and scroll container.

use crate::item::Key;
use crate::placement::Direction;

/// Semantic role of a rendered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The trigger control.
    Button,
    /// The popup list.
    Listbox,
    /// A selectable row.
    Option,
    /// A group heading row; not selectable.
    GroupHeading,
}

/// Text shown on the trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerLabel {
    /// The option list is empty.
    NoOptions(String),
    /// Options exist but nothing is selected.
    Placeholder(String),
    /// Label of the current selection.
    Selected(String),
}

impl TriggerLabel {
    pub fn text(&self) -> &str {
        match self {
            TriggerLabel::NoOptions(text)
            | TriggerLabel::Placeholder(text)
            | TriggerLabel::Selected(text) => text,
        }
    }
}

/// The trigger control.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerView {
    pub role: Role,
    pub label: TriggerLabel,
    /// Disabled by configuration.
    pub disabled: bool,
    /// Whether pressing the trigger does anything.
    pub interactive: bool,
    /// Whether the popup is open.
    pub expanded: bool,
}

/// One row of the popup list. `row` is the index used in row events.
#[derive(Debug, Clone, PartialEq)]
pub enum RowView {
    Heading {
        row: usize,
        label: String,
        class_name: Option<String>,
    },
    Option {
        row: usize,
        key: Key,
        label: String,
        selected: bool,
        disabled: bool,
        class_name: Option<String>,
    },
}

impl RowView {
    pub fn role(&self) -> Role {
        match self {
            RowView::Heading { .. } => Role::GroupHeading,
            RowView::Option { .. } => Role::Option,
        }
    }

    pub fn row(&self) -> usize {
        match self {
            RowView::Heading { row, .. } | RowView::Option { row, .. } => *row,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RowView::Heading { label, .. } | RowView::Option { label, .. } => label,
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, RowView::Option { selected: true, .. })
    }
}

/// Props for the host's scrollable viewport primitive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollViewportProps {
    /// Height limit; `None` lets the list take its natural height.
    pub max_height: Option<f32>,
    /// Offset the viewport should scroll to once laid out.
    pub scroll_to: Option<f32>,
}

/// The open popup.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupView {
    pub role: Role,
    pub direction: Direction,
    /// Offset of the popup's top edge from the anchor's top edge.
    pub offset_top: f32,
    pub viewport: ScrollViewportProps,
    pub rows: Vec<RowView>,
}

/// Everything the host needs to render a dropdown.
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownView {
    pub trigger: TriggerView,
    /// Present only while open.
    pub popup: Option<PopupView>,
}
