//! Macros for reducing boilerplate in widget builders.

/// Generates a builder-style setter method for a field.
///
/// # Usage
///
/// ```ignore
/// builder_field!(placeholder, String);
/// // Generates: pub fn placeholder(mut self, value: String) -> Self { self.placeholder = value; self }
/// ```
#[macro_export]
macro_rules! builder_field {
    ($name:ident, $type:ty) => {
        pub fn $name(mut self, value: $type) -> Self {
            self.$name = value;
            self
        }
    };
}

/// Generates a builder-style setter method for an Option field.
///
/// ```ignore
/// builder_option!(fixed_popup_height, f32);
/// // Generates: pub fn fixed_popup_height(mut self, value: f32) -> Self { self.fixed_popup_height = Some(value); self }
/// ```
#[macro_export]
macro_rules! builder_option {
    ($name:ident, $type:ty) => {
        pub fn $name(mut self, value: $type) -> Self {
            self.$name = Some(value);
            self
        }
    };
}

/// Generates a callback setter method on a widget whose callbacks are
/// stored as [`Callback`](crate::Callback) fields.
///
/// ```ignore
/// // For callbacks with no parameters:
/// callback_setter!(on_opened);
/// // Generates: pub fn on_opened<F>(mut self, f: F) -> Self where F: Fn() -> M + 'static
///
/// // For callbacks with a parameter:
/// callback_setter!(on_selection_changed, (Key, T));
/// ```
#[macro_export]
macro_rules! callback_setter {
    ($name:ident) => {
        pub fn $name<F>(mut self, f: F) -> Self
        where
            F: Fn() -> M + 'static,
        {
            self.$name = $crate::Callback::new(move |()| f());
            self
        }
    };
    ($name:ident, $param:ty) => {
        pub fn $name<F>(mut self, f: F) -> Self
        where
            F: Fn($param) -> M + 'static,
        {
            self.$name = $crate::Callback::new(f);
            self
        }
    };
}
