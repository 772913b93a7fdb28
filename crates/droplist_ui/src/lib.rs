//! droplist_ui - A headless single-select dropdown widget
//!
//! The widget owns selection, popup placement, scroll memory and dismissal.
//! Drawing and event capture belong to the host, which talks to the widget
//! through [`Event`]s, the [`Measurer`] and [`ListenerHost`] traits and the
//! [`DropdownView`] render model.

#[macro_use]
mod macros;

mod callback;
mod config;
mod constants;
mod dropdown;
mod event;
mod geometry;
mod host;
mod item;
mod overlay;
mod placement;
mod scroll_memory;
mod selection;
mod view;
mod visibility;

pub use callback::{Callback, Callback0};
pub use config::{ConfigError, DropdownSettings};
pub use constants::{DEFAULT_NO_OPTIONS_TEXT, DEFAULT_PLACEHOLDER, POPUP_GAP, VIEWPORT_MARGIN};
pub use dropdown::{dropdown, Dropdown};
pub use event::{Event, KeyCode, KeyModifiers, MouseButton};
pub use geometry::{AnchorRect, Point, Rect, ViewportSize};
pub use host::{ListenerGuard, ListenerHost, ListenerId, ListenerKind, Measurer, Node, Subscriptions};
pub use item::{options_from_items, options_from_json, Key, OptionEntry, OptionGroup, OptionItem};
pub use overlay::OverlayCloseHelper;
pub use placement::{compute_placement, Direction, PlacementInput, PopupGeometry};
pub use scroll_memory::{RestoreTicket, ScrollMemory};
pub use selection::{FlatEntry, Selection, SelectionModel};
pub use view::{DropdownView, PopupView, Role, RowView, ScrollViewportProps, TriggerLabel, TriggerView};
pub use visibility::{
    transition, Action, DismissPolicy, DismissReason, Notice, VisibilityController, VisibilityState,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::DropdownSettings;
    pub use crate::dropdown::{dropdown, Dropdown};
    pub use crate::event::{Event, KeyCode, KeyModifiers, MouseButton};
    pub use crate::geometry::{Point, Rect, ViewportSize};
    pub use crate::host::{ListenerHost, Measurer, Node};
    pub use crate::item::{Key, OptionEntry, OptionItem};
    pub use crate::view::DropdownView;
}
