//! Callback abstraction for widget notifications
//!
//! Widgets never call back into application code directly. Each notification
//! is a `Callback<T, M>` that turns a payload into an application message,
//! which the widget hands back from its event handler.
//!
//! ```ignore
//! struct Picker<M> {
//!     on_opened: Callback0<M>,
//! }
//!
//! impl<M> Picker<M> {
//!     fn open(&mut self) -> Option<M> {
//!         self.on_opened.emit()
//!     }
//! }
//! ```

use std::fmt;

/// A callback wrapper that encapsulates an optional notification handler.
///
/// # Type Parameters
///
/// - `T`: The payload passed to the handler (selected key and item, etc.)
/// - `M`: The message type returned by the handler
pub struct Callback<T, M> {
    f: Option<Box<dyn Fn(T) -> M>>,
}

impl<T, M> Callback<T, M> {
    /// Create a new callback from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) -> M + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// Create an empty callback (no handler).
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Call the callback with a value, if it exists.
    ///
    /// Returns `Some(message)` if the callback is set, or `None` if no handler is registered.
    pub fn call(&self, value: T) -> Option<M> {
        self.f.as_ref().map(|f| f(value))
    }

    /// Check if the callback is set.
    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }

    /// Check if the callback is not set.
    pub fn is_none(&self) -> bool {
        self.f.is_none()
    }
}

impl<T, M> Default for Callback<T, M> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T, M> fmt::Debug for Callback<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.is_some())
            .finish()
    }
}

/// A callback that takes no parameters, such as `on_opened` or `on_closed`.
pub type Callback0<M> = Callback<(), M>;

impl<M> Callback0<M> {
    /// Call the callback without any parameters.
    pub fn emit(&self) -> Option<M> {
        self.call(())
    }
}
