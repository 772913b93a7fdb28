//! Shared constants for the dropdown widget.

// =============================================================================
// Placement
// =============================================================================

/// Space kept free between the popup and each viewport edge
pub const VIEWPORT_MARGIN: f32 = 8.0;

/// Added to twice the anchor height to get the smallest popup worth showing
pub const MIN_HEIGHT_GAP: f32 = 4.0;

/// Vertical gap between the anchor and the popup
pub const POPUP_GAP: f32 = 4.0;

// =============================================================================
// Text
// =============================================================================

/// Trigger text shown when nothing is selected
pub const DEFAULT_PLACEHOLDER: &str = "-- Select --";

/// Trigger text shown when the option list is empty
pub const DEFAULT_NO_OPTIONS_TEXT: &str = "No option";

// =============================================================================
// Item fields
// =============================================================================

/// Field read by the JSON item capability for the disabled flag
pub const DISABLED_FIELD: &str = "disabled";

/// Field read by the JSON item capability for the presentational class
pub const CLASS_NAME_FIELD: &str = "className";

/// Marker field of a grouped entry in JSON option lists
pub const GROUP_MARKER_FIELD: &str = "isGroup";

/// Heading field of a grouped entry in JSON option lists
pub const GROUP_NAME_FIELD: &str = "groupName";

/// Member list field of a grouped entry in JSON option lists
pub const GROUP_ITEMS_FIELD: &str = "items";
