//! Showcase message types.
//!
//! Dropdown notifications arrive as messages in the Elm architecture style.

use droplist_ui::Key;
use serde_json::Value;

/// Messages that can be sent to update application state.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// An option was picked; carries its key and the item itself
    Selected(Key, Value),
    /// The popup opened from a trigger press
    Opened,
    /// The popup was dismissed or toggled shut
    Closed,
}
