//! Single-select dropdown widget.
//!
//! The trigger toggles a popup list anchored to it. The popup opens below the
//! trigger, or above it when configured; when the preferred side lacks room it
//! moves to the other side. It closes when:
//! - An option is selected
//! - The pointer goes down outside the widget
//! - The page scrolls, the viewport resizes or Escape is pressed (each configurable)
//! - Focus leaves the widget
//!
//! Host protocol:
//! 1. [`Dropdown::mount`] once the widget is in the tree; [`Dropdown::unmount`]
//!    (or dropping the widget) releases the listeners again.
//! 2. Feed every [`Event`] to [`Dropdown::on_event`] and handle the message it returns.
//! 3. After rendering a newly opened popup, call [`Dropdown::popup_mounted`];
//!    once layout has settled, resolve the returned ticket with
//!    [`Dropdown::restore_scroll`] and scroll the popup to that offset.

use std::rc::Rc;

use crate::callback::{Callback, Callback0};
use crate::config::DropdownSettings;
use crate::event::{Event, MouseButton};
use crate::geometry::{AnchorRect, Rect};
use crate::host::{ListenerHost, Measurer, Node, Subscriptions};
use crate::item::{Key, OptionEntry, OptionItem};
use crate::overlay::OverlayCloseHelper;
use crate::placement::{compute_placement, Direction, PlacementInput, PopupGeometry};
use crate::scroll_memory::{RestoreTicket, ScrollMemory};
use crate::selection::{FlatEntry, Selection, SelectionModel};
use crate::view::{DropdownView, PopupView, Role, RowView, ScrollViewportProps, TriggerLabel, TriggerView};
use crate::visibility::{DismissReason, Notice, VisibilityController, VisibilityState};

/// Result of the last measurement pass.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Measurement {
    anchor: Rect,
    natural_height: f32,
}

/// Inputs that invalidate the measured placement when they change.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PlacementDeps {
    option_count: usize,
    fixed_popup_height: Option<f32>,
    prefer_above: bool,
    auto_flip: bool,
    fit_to_viewport: bool,
}

/// A single-select dropdown over items of type `T`, producing messages of type `M`.
pub struct Dropdown<T, M> {
    options: Vec<OptionEntry<T>>,
    settings: DropdownSettings,
    model: SelectionModel,
    /// Last controlled value passed in by the caller.
    value: Option<Key>,
    /// Last controlled open flag passed in by the caller.
    controlled_open: Option<bool>,
    controller: VisibilityController,
    scroll: ScrollMemory,
    measurement: Option<Measurement>,
    placement_deps: Option<PlacementDeps>,
    subscriptions: Subscriptions,
    on_selection_changed: Callback<(Key, T), M>,
    on_opened: Callback0<M>,
    on_closed: Callback0<M>,
}

impl<T: OptionItem + Clone, M> Dropdown<T, M> {
    /// Create a dropdown over `options` with default settings.
    pub fn new(options: Vec<OptionEntry<T>>) -> Self {
        let settings = DropdownSettings::default();
        Self {
            options,
            model: SelectionModel::new(&settings.key_field, &settings.label_field),
            controller: VisibilityController::new(settings.dismiss_policy()),
            scroll: ScrollMemory::new(settings.keep_scroll_position),
            settings,
            value: None,
            controlled_open: None,
            measurement: None,
            placement_deps: None,
            subscriptions: Subscriptions::default(),
            on_selection_changed: Callback::none(),
            on_opened: Callback::none(),
            on_closed: Callback::none(),
        }
    }

    callback_setter!(on_selection_changed, (Key, T));
    callback_setter!(on_opened);
    callback_setter!(on_closed);

    /// Apply settings.
    pub fn settings(mut self, settings: DropdownSettings) -> Self {
        self.set_settings(settings);
        self
    }

    /// Set the controlled value.
    pub fn value(mut self, value: Option<Key>) -> Self {
        self.set_value(value);
        self
    }

    /// Set the open state (for external control).
    pub fn open(mut self, open: bool) -> Self {
        self.set_open(open);
        self
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn options(&self) -> &[OptionEntry<T>] {
        &self.options
    }

    pub fn current_settings(&self) -> &DropdownSettings {
        &self.settings
    }

    pub fn selection_model(&self) -> &SelectionModel {
        &self.model
    }

    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    pub fn state(&self) -> VisibilityState {
        self.controller.state()
    }

    pub fn is_open(&self) -> bool {
        self.controller.is_open()
    }

    pub fn geometry(&self) -> Option<PopupGeometry> {
        self.controller.geometry()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.controller.selected()
    }

    pub fn selected_key(&self) -> Option<&Key> {
        self.selection().map(|selection| &selection.key)
    }

    pub fn is_mounted(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Offset the popup will be scrolled to on its next mount.
    pub fn scroll_offset(&self) -> f32 {
        self.scroll.restore()
    }

    fn preferred_direction(&self) -> Direction {
        if self.settings.prefer_above {
            Direction::Above
        } else {
            Direction::Below
        }
    }

    fn placement_deps(&self) -> PlacementDeps {
        PlacementDeps {
            option_count: self.options.len(),
            fixed_popup_height: self.settings.fixed_popup_height,
            prefer_above: self.settings.prefer_above,
            auto_flip: self.settings.auto_flip,
            fit_to_viewport: self.settings.fit_to_viewport,
        }
    }

    // -------------------------------------------------------------------------
    // Runtime updates
    // -------------------------------------------------------------------------

    /// Replace the settings. Key/label fields, dismissal switches and
    /// keep-position take effect immediately.
    pub fn set_settings(&mut self, settings: DropdownSettings) {
        self.model = SelectionModel::new(&settings.key_field, &settings.label_field);
        self.controller.set_policy(settings.dismiss_policy());
        self.scroll.set_keep_position(settings.keep_scroll_position);
        self.settings = settings;
        self.resync_selection();
    }

    /// Replace the option list. The current selection is kept only if it
    /// still matches an item; an emptied list closes the popup.
    pub fn set_options(&mut self, options: Vec<OptionEntry<T>>) {
        self.options = options;
        if !self.has_options() && self.is_open() {
            log::debug!("Option list emptied while open, closing popup");
            self.controller.force_close();
            self.after_close();
        }
        self.resync_selection();
    }

    /// Update the controlled value. Only a changed value is re-resolved.
    pub fn set_value(&mut self, value: Option<Key>) {
        if value == self.value {
            return;
        }
        self.value = value;
        self.controller
            .sync_value(&self.model, &self.options, self.value.as_ref());
    }

    /// Update the controlled open flag. Only a changed flag takes effect.
    pub fn set_open(&mut self, open: bool) {
        if self.controlled_open == Some(open) {
            return;
        }
        self.controlled_open = Some(open);
        self.controller.set_controlled_open(open, self.has_options());
        if !self.is_open() {
            self.after_close();
        }
    }

    fn resync_selection(&mut self) {
        let key = self
            .controller
            .selected()
            .map(|selection| selection.key.clone())
            .or_else(|| self.value.clone());
        self.controller
            .sync_value(&self.model, &self.options, key.as_ref());
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Subscribe to the host's outside-interaction, scroll, key and resize
    /// signals. Any previous subscriptions are released first.
    pub fn mount(&mut self, host: Rc<dyn ListenerHost>) {
        self.subscriptions.release();
        self.subscriptions = Subscriptions::acquire_all(host);
        log::debug!("Dropdown mounted with {} listeners", self.subscriptions.len());
    }

    /// Release all listeners and close the popup without notification.
    pub fn unmount(&mut self) {
        self.subscriptions.release();
        self.controller.force_close();
        self.after_close();
        log::debug!("Dropdown unmounted");
    }

    /// The popup was rendered after opening. Runs the measurement pass and
    /// returns the ticket for restoring the scroll offset after layout.
    pub fn popup_mounted(&mut self, measurer: &dyn Measurer) -> Option<RestoreTicket> {
        if !self.is_open() {
            log::warn!("popup_mounted called while the dropdown is closed");
            return None;
        }
        self.measure(measurer);
        Some(self.scroll.mount())
    }

    /// Re-run the measurement pass if a placement input changed since the
    /// last one. Returns whether it ran.
    pub fn refresh_placement(&mut self, measurer: &dyn Measurer) -> bool {
        if !self.is_open() || self.placement_deps == Some(self.placement_deps()) {
            return false;
        }
        self.measure(measurer);
        true
    }

    /// Offset to scroll the popup to for `ticket`; `None` when the popup has
    /// closed since, or keep-position is off.
    pub fn restore_scroll(&self, ticket: RestoreTicket) -> Option<f32> {
        self.scroll.resolve(ticket)
    }

    fn measure(&mut self, measurer: &dyn Measurer) {
        let viewport = measurer.measure_viewport();
        let anchor = measurer.measure_element_rect(Node::Anchor);
        let content_height = measurer.measure_element_rect(Node::Popup).height;
        let natural_height = match self.settings.fixed_popup_height {
            Some(fixed) => content_height.min(fixed),
            None => content_height,
        };

        let geometry = if self.settings.fit_to_viewport {
            compute_placement(&PlacementInput {
                anchor: AnchorRect::from(anchor),
                viewport_height: viewport.height,
                natural_height,
                prefer_above: self.settings.prefer_above,
                auto_flip: self.settings.auto_flip,
            })
        } else {
            PopupGeometry {
                direction: self.preferred_direction(),
                max_height: None,
            }
        };

        log::trace!(
            "Measured popup: viewport {}x{}, anchor {:?}, natural {} -> {:?}",
            viewport.width,
            viewport.height,
            anchor,
            natural_height,
            geometry
        );

        if self.controller.store_geometry(geometry) {
            self.measurement = Some(Measurement {
                anchor,
                natural_height,
            });
            self.placement_deps = Some(self.placement_deps());
        }
    }

    fn after_close(&mut self) {
        self.scroll.unmount();
        self.measurement = None;
        self.placement_deps = None;
    }

    /// Height the popup actually renders at.
    fn rendered_height(geometry: PopupGeometry, natural_height: f32) -> f32 {
        geometry
            .max_height
            .map_or(natural_height, |max| natural_height.min(max))
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Handle one host event, returning the message of the notification it caused.
    pub fn on_event(&mut self, event: &Event) -> Option<M> {
        match event {
            Event::TriggerPressed {
                button: MouseButton::Left,
            } => self.toggle(),
            Event::TriggerPressed { .. } => None,
            Event::RowPressed {
                row,
                button: MouseButton::Left,
            }
            | Event::RowTouchEnd { row } => self.select_row(*row),
            Event::RowPressed { .. } => None,
            Event::PopupScrolled { offset } => {
                if self.is_open() {
                    self.scroll.record(*offset);
                }
                None
            }
            _ => {
                let reason = OverlayCloseHelper::dismiss_reason(event)?;
                self.dismiss(reason)
            }
        }
    }

    /// Trigger activation. Ignored while disabled or without options.
    pub fn toggle(&mut self) -> Option<M> {
        if self.settings.disabled {
            return None;
        }
        let notice = self.controller.toggle(self.has_options())?;
        self.notify(notice)
    }

    /// Close for `reason`, subject to the dismissal settings.
    pub fn dismiss(&mut self, reason: DismissReason) -> Option<M> {
        let notice = self.controller.dismiss(reason)?;
        self.notify(notice)
    }

    fn notify(&mut self, notice: Notice) -> Option<M> {
        match notice {
            Notice::Opened => self.on_opened.emit(),
            Notice::Closed => {
                self.after_close();
                self.on_closed.emit()
            }
        }
    }

    /// Select `item`, taken from the current option list, and close.
    /// Disabled items are ignored.
    fn select(&mut self, item: &T) -> Option<M> {
        if item.is_disabled() {
            log::trace!("Ignoring selection of disabled item {}", item.serialized());
            return None;
        }
        let selection = self.controller.select(&self.model, item);
        self.after_close();
        self.on_selection_changed.call((selection.key, item.clone()))
    }

    /// Select the item on flattened row `row`. Headings are ignored.
    pub fn select_row(&mut self, row: usize) -> Option<M> {
        let item = match SelectionModel::flatten(&self.options).get(row) {
            Some(FlatEntry::Item(item)) => (*item).clone(),
            Some(FlatEntry::Heading(group)) => {
                log::trace!("Ignoring press on group heading '{}'", group.label);
                return None;
            }
            None => {
                log::warn!("Row {} is out of range", row);
                return None;
            }
        };
        self.select(&item)
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Describe the widget for rendering.
    pub fn view(&self) -> DropdownView {
        let has_options = self.has_options();
        let label = if !has_options {
            TriggerLabel::NoOptions(self.settings.no_options_text.clone())
        } else {
            match self.selection() {
                Some(selection) => TriggerLabel::Selected(selection.label.clone()),
                None => TriggerLabel::Placeholder(self.settings.placeholder.clone()),
            }
        };

        DropdownView {
            trigger: TriggerView {
                role: Role::Button,
                label,
                disabled: self.settings.disabled,
                interactive: has_options && !self.settings.disabled,
                expanded: self.is_open(),
            },
            popup: self.is_open().then(|| self.popup_view()),
        }
    }

    fn popup_view(&self) -> PopupView {
        let geometry = self.controller.geometry().unwrap_or(PopupGeometry {
            direction: self.preferred_direction(),
            max_height: None,
        });
        let offset_top = match self.measurement {
            Some(m) => geometry.offset_top(
                m.anchor.height,
                Self::rendered_height(geometry, m.natural_height),
            ),
            None => geometry.offset_top(0.0, 0.0),
        };
        let selected = self.selected_key();

        let rows = SelectionModel::flatten(&self.options)
            .into_iter()
            .enumerate()
            .map(|(row, entry)| match entry {
                FlatEntry::Heading(group) => RowView::Heading {
                    row,
                    label: group.label.clone(),
                    class_name: group.class_name.clone(),
                },
                FlatEntry::Item(item) => {
                    let key = self.model.resolve_key(item);
                    RowView::Option {
                        row,
                        selected: selected == Some(&key),
                        key,
                        label: self.model.resolve_label(item),
                        disabled: item.is_disabled(),
                        class_name: item.class_name(),
                    }
                }
            })
            .collect();

        PopupView {
            role: Role::Listbox,
            direction: geometry.direction,
            offset_top,
            viewport: ScrollViewportProps {
                max_height: geometry.max_height.or(self.settings.fixed_popup_height),
                scroll_to: self
                    .scroll
                    .keep_position()
                    .then(|| self.scroll.restore()),
            },
            rows,
        }
    }
}

/// Helper function to create a dropdown.
pub fn dropdown<T: OptionItem + Clone, M>(options: Vec<OptionEntry<T>>) -> Dropdown<T, M> {
    Dropdown::new(options)
}
