//! Scripted host for the showcase.
//!
//! Stands in for a real windowing layer: it keeps a listener registry, reports
//! geometry from the scenario layout and tells the app which global signals
//! the dropdown is currently listening for.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use droplist_ui::{
    ListenerHost, ListenerId, ListenerKind, Measurer, Node, OverlayCloseHelper, Point, PopupView, Rect,
    ViewportSize,
};

use crate::config::LayoutConfig;

#[derive(Debug, Default)]
pub struct ScriptedHost {
    layout: Cell<LayoutConfig>,
    /// Rows currently rendered in the popup
    rows: Cell<usize>,
    next_id: Cell<u64>,
    listeners: RefCell<HashMap<ListenerId, ListenerKind>>,
}

impl ScriptedHost {
    pub fn new(layout: LayoutConfig) -> Self {
        Self {
            layout: Cell::new(layout),
            ..Self::default()
        }
    }

    pub fn layout(&self) -> LayoutConfig {
        self.layout.get()
    }

    pub fn set_layout(&self, layout: LayoutConfig) {
        self.layout.set(layout);
    }

    pub fn set_rows(&self, rows: usize) {
        self.rows.set(rows);
    }

    /// Whether a global signal of `kind` would reach the dropdown.
    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.listeners.borrow().values().any(|k| *k == kind)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Trigger bounds in viewport coordinates.
    pub fn anchor_rect(&self) -> Rect {
        let layout = self.layout.get();
        Rect::new(
            layout.anchor_left,
            layout.anchor_top,
            layout.anchor_width,
            layout.anchor_height,
        )
    }

    /// Popup bounds for a rendered popup, from the current layout.
    pub fn popup_rect(&self, popup: &PopupView) -> Rect {
        let anchor = self.anchor_rect();
        let natural = self.rows.get() as f32 * self.layout.get().row_height;
        let height = popup
            .viewport
            .max_height
            .map_or(natural, |max| natural.min(max));
        Rect::new(anchor.x, anchor.y + popup.offset_top, anchor.width, height)
    }

    /// Hit test for the outside-interaction listener.
    pub fn is_outside(&self, position: Point, popup: Option<&PopupView>) -> bool {
        OverlayCloseHelper::is_outside(
            position,
            self.anchor_rect(),
            popup.map(|popup| self.popup_rect(popup)),
        )
    }
}

impl Measurer for ScriptedHost {
    fn measure_viewport(&self) -> ViewportSize {
        let layout = self.layout.get();
        ViewportSize::new(layout.viewport_width, layout.viewport_height)
    }

    fn measure_element_rect(&self, node: Node) -> Rect {
        let anchor = self.anchor_rect();
        match node {
            Node::Anchor => anchor,
            Node::Popup => Rect::new(
                anchor.x,
                anchor.bottom(),
                anchor.width,
                self.rows.get() as f32 * self.layout.get().row_height,
            ),
        }
    }
}

impl ListenerHost for ScriptedHost {
    fn subscribe(&self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().insert(id, kind);
        log::trace!("Host registered {:?} listener {:?}", kind, id);
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        if self.listeners.borrow_mut().remove(&id).is_none() {
            log::warn!("Host asked to remove unknown listener {:?}", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_height_follows_rows() {
        let host = ScriptedHost::new(LayoutConfig::default());
        host.set_rows(5);
        let popup = host.measure_element_rect(Node::Popup);
        assert_eq!(popup.height, 140.0);
        assert_eq!(popup.y, 112.0);
    }

    #[test]
    fn test_hit_test_follows_moved_anchor() {
        let host = ScriptedHost::new(LayoutConfig::default());
        let press = Point::new(50.0, 410.0);
        assert!(host.is_outside(press, None));

        let mut layout = host.layout();
        layout.anchor_top = 400.0;
        host.set_layout(layout);
        assert!(!host.is_outside(press, None));
    }

    #[test]
    fn test_listener_registry() {
        let host = ScriptedHost::new(LayoutConfig::default());
        let id = host.subscribe(ListenerKind::GlobalScroll);
        assert!(host.is_listening(ListenerKind::GlobalScroll));
        assert!(!host.is_listening(ListenerKind::KeyPress));
        host.unsubscribe(id);
        assert_eq!(host.listener_count(), 0);
    }
}
