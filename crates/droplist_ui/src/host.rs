//! Interfaces the dropdown consumes from its host environment.
//!
//! The host owns the real event sources and layout. It measures geometry on
//! request and delivers subscribed signals back to the widget as
//! [`Event`](crate::Event)s.

use std::fmt;
use std::rc::Rc;

use crate::geometry::{Rect, ViewportSize};

/// Elements the widget asks the host to measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// The trigger control the popup is anchored to.
    Anchor,
    /// The rendered popup list, measured without a height constraint.
    Popup,
}

/// Geometry reads.
pub trait Measurer {
    fn measure_viewport(&self) -> ViewportSize;

    /// Rectangle of `node` relative to the viewport.
    fn measure_element_rect(&self, node: Node) -> Rect;
}

/// Signal sources a mounted dropdown subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    OutsideInteraction,
    GlobalScroll,
    KeyPress,
    ViewportResize,
}

impl ListenerKind {
    pub const ALL: [ListenerKind; 4] = [
        ListenerKind::OutsideInteraction,
        ListenerKind::GlobalScroll,
        ListenerKind::KeyPress,
        ListenerKind::ViewportResize,
    ];
}

/// Host-issued identifier of one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Subscription primitives of the host.
///
/// Methods take `&self`; hosts keep their registries behind interior
/// mutability, as the widget holds the host through an `Rc`.
pub trait ListenerHost {
    fn subscribe(&self, kind: ListenerKind) -> ListenerId;
    fn unsubscribe(&self, id: ListenerId);
}

/// A live subscription; unsubscribes when dropped.
pub struct ListenerGuard {
    host: Rc<dyn ListenerHost>,
    kind: ListenerKind,
    id: ListenerId,
}

impl ListenerGuard {
    pub fn acquire(host: Rc<dyn ListenerHost>, kind: ListenerKind) -> Self {
        let id = host.subscribe(kind);
        log::trace!("Subscribed {:?} as {:?}", kind, id);
        Self { host, kind, id }
    }

    pub fn kind(&self) -> ListenerKind {
        self.kind
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        log::trace!("Unsubscribing {:?} ({:?})", self.kind, self.id);
        self.host.unsubscribe(self.id);
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .finish()
    }
}

/// All subscriptions of one mounted widget.
#[derive(Debug, Default)]
pub struct Subscriptions {
    guards: Vec<ListenerGuard>,
}

impl Subscriptions {
    /// Subscribe to every [`ListenerKind`].
    pub fn acquire_all(host: Rc<dyn ListenerHost>) -> Self {
        let guards = ListenerKind::ALL
            .iter()
            .map(|kind| ListenerGuard::acquire(Rc::clone(&host), *kind))
            .collect();
        Self { guards }
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    /// Release every subscription now.
    pub fn release(&mut self) {
        self.guards.clear();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    use super::*;

    /// Host double that records live subscriptions.
    #[derive(Default)]
    pub struct RecordingHost {
        next_id: Cell<u64>,
        live: RefCell<HashMap<ListenerId, ListenerKind>>,
    }

    impl RecordingHost {
        pub fn live_count(&self) -> usize {
            self.live.borrow().len()
        }

        pub fn is_subscribed(&self, kind: ListenerKind) -> bool {
            self.live.borrow().values().any(|k| *k == kind)
        }
    }

    impl ListenerHost for RecordingHost {
        fn subscribe(&self, kind: ListenerKind) -> ListenerId {
            let id = ListenerId(self.next_id.get());
            self.next_id.set(id.0 + 1);
            self.live.borrow_mut().insert(id, kind);
            id
        }

        fn unsubscribe(&self, id: ListenerId) {
            self.live.borrow_mut().remove(&id);
        }
    }

    /// Measurer double returning fixed geometry.
    #[derive(Debug, Clone, Copy)]
    pub struct FixedLayout {
        pub viewport: ViewportSize,
        pub anchor: Rect,
        pub popup_height: f32,
    }

    impl Measurer for FixedLayout {
        fn measure_viewport(&self) -> ViewportSize {
            self.viewport
        }

        fn measure_element_rect(&self, node: Node) -> Rect {
            match node {
                Node::Anchor => self.anchor,
                Node::Popup => Rect::new(
                    self.anchor.x,
                    self.anchor.bottom(),
                    self.anchor.width,
                    self.popup_height,
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingHost;
    use super::*;

    #[test]
    fn test_guard_unsubscribes_on_drop() {
        let host = Rc::new(RecordingHost::default());
        let guard = ListenerGuard::acquire(host.clone(), ListenerKind::KeyPress);
        assert_eq!(guard.kind(), ListenerKind::KeyPress);
        assert!(host.is_subscribed(ListenerKind::KeyPress));
        drop(guard);
        assert_eq!(host.live_count(), 0);
    }

    #[test]
    fn test_acquire_all_and_release() {
        let host = Rc::new(RecordingHost::default());
        let mut subscriptions = Subscriptions::acquire_all(host.clone());
        assert_eq!(subscriptions.len(), 4);
        for kind in ListenerKind::ALL {
            assert!(host.is_subscribed(kind));
        }
        subscriptions.release();
        assert!(subscriptions.is_empty());
        assert_eq!(host.live_count(), 0);
    }
}
