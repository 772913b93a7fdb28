//! Headless showcase application.
//!
//! Plays a scenario against one dropdown the way a real host would: events go
//! in through `on_event`, notifications come back as messages and are handled
//! in `update`, and after every step the popup is "rendered" so the dropdown
//! can measure itself and restore its scroll offset.

use std::rc::Rc;

use droplist_ui::{
    dropdown, options_from_json, Dropdown, DropdownView, Event, Key, KeyCode, KeyModifiers,
    ListenerKind, MouseButton, Point, RowView, SelectionModel, ViewportSize,
};
use serde_json::Value;

use crate::config::{ShowcaseConfig, Step};
use crate::error::AppError;
use crate::host::ScriptedHost;
use crate::message::Message;

/// Main showcase state.
pub struct ShowcaseApp {
    dropdown: Dropdown<Value, Message>,
    host: Rc<ScriptedHost>,
    /// Messages handled so far, oldest first
    history: Vec<Message>,
    /// Value the application feeds back into the dropdown
    value: Option<Key>,
    /// Scroll offset the host last applied to the popup
    applied_scroll: Option<f32>,
}

impl ShowcaseApp {
    pub fn new(config: &ShowcaseConfig) -> Self {
        let host = Rc::new(ScriptedHost::new(config.layout));
        let mut dropdown = dropdown(options_from_json(&config.options))
            .settings(config.settings.clone())
            .value(config.value.clone())
            .on_selection_changed(|(key, item)| Message::Selected(key, item))
            .on_opened(|| Message::Opened)
            .on_closed(|| Message::Closed);
        dropdown.mount(host.clone());

        log::info!(
            "Showcase ready: {} option entries, {} listeners",
            dropdown.options().len(),
            host.listener_count()
        );

        Self {
            dropdown,
            host,
            history: Vec::new(),
            value: config.value.clone(),
            applied_scroll: None,
        }
    }

    pub fn dropdown(&self) -> &Dropdown<Value, Message> {
        &self.dropdown
    }

    pub fn host(&self) -> &ScriptedHost {
        &self.host
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn value(&self) -> Option<&Key> {
        self.value.as_ref()
    }

    pub fn applied_scroll(&self) -> Option<f32> {
        self.applied_scroll
    }

    fn row_count(&self) -> usize {
        SelectionModel::flatten(self.dropdown.options()).len()
    }

    /// Play all steps in order, stopping at the first invalid one.
    pub fn run(&mut self, steps: &[Step]) -> Result<(), AppError> {
        for (index, step) in steps.iter().enumerate() {
            log::debug!("Step {}: {:?}", index, step);
            self.step(index, step)?;
        }
        Ok(())
    }

    /// Apply one scripted step.
    pub fn step(&mut self, index: usize, step: &Step) -> Result<(), AppError> {
        let message = match step {
            Step::Click => self.dropdown.on_event(&Event::TriggerPressed {
                button: MouseButton::Left,
            }),
            Step::SelectRow { row } => {
                self.check_row(index, *row)?;
                self.dropdown.on_event(&Event::RowPressed {
                    row: *row,
                    button: MouseButton::Left,
                })
            }
            Step::TouchRow { row } => {
                self.check_row(index, *row)?;
                self.dropdown.on_event(&Event::RowTouchEnd { row: *row })
            }
            Step::Press { x, y } => {
                let position = Point::new(*x, *y);
                let popup = self.dropdown.view().popup;
                if self.host.is_outside(position, popup.as_ref()) {
                    self.deliver(ListenerKind::OutsideInteraction, Event::OutsidePointer)
                } else {
                    log::debug!("Press at {:?} lands on the dropdown", position);
                    None
                }
            }
            Step::Scroll => self.deliver(ListenerKind::GlobalScroll, Event::GlobalScroll),
            Step::ScrollPopup { offset } => {
                self.dropdown.on_event(&Event::PopupScrolled { offset: *offset })
            }
            Step::Resize { width, height } => {
                let mut layout = self.host.layout();
                layout.viewport_width = *width;
                layout.viewport_height = *height;
                self.host.set_layout(layout);
                self.deliver(
                    ListenerKind::ViewportResize,
                    Event::ViewportResized {
                        size: ViewportSize::new(*width, *height),
                    },
                )
            }
            Step::Escape => self.deliver(
                ListenerKind::KeyPress,
                Event::KeyPress {
                    key: KeyCode::Escape,
                    modifiers: KeyModifiers::default(),
                },
            ),
            Step::Blur => self.dropdown.on_event(&Event::FocusLost),
            Step::MoveAnchor { top } => {
                let mut layout = self.host.layout();
                layout.anchor_top = *top;
                self.host.set_layout(layout);
                None
            }
            Step::SetValue { value } => {
                self.value = value.clone();
                self.dropdown.set_value(value.clone());
                None
            }
            Step::SetOpen { open } => {
                self.dropdown.set_open(*open);
                None
            }
            Step::SetOptions { options } => {
                self.dropdown.set_options(options_from_json(options));
                None
            }
        };

        if let Some(message) = message {
            self.update(message);
        }
        self.render();
        Ok(())
    }

    fn check_row(&self, index: usize, row: usize) -> Result<(), AppError> {
        let rows = self.row_count();
        if row >= rows {
            return Err(AppError::InvalidStep {
                index,
                reason: format!("row {} is out of range ({} rows)", row, rows),
            });
        }
        Ok(())
    }

    /// Deliver a global signal, but only if the dropdown listens for it.
    fn deliver(&mut self, kind: ListenerKind, event: Event) -> Option<Message> {
        if !self.host.is_listening(kind) {
            log::debug!("No {:?} listener, dropping {:?}", kind, event);
            return None;
        }
        self.dropdown.on_event(&event)
    }

    /// Handle a message from the dropdown.
    pub fn update(&mut self, message: Message) {
        match &message {
            Message::Selected(key, item) => {
                log::info!("Selected {} ({})", key, item);
                self.value = Some(key.clone());
                self.dropdown.set_value(Some(key.clone()));
            }
            Message::Opened => log::info!("Dropdown opened"),
            Message::Closed => log::info!("Dropdown closed"),
        }
        self.history.push(message);
    }

    /// Host-side render pass: mount or re-measure the popup while it is open.
    fn render(&mut self) {
        if !self.dropdown.is_open() {
            self.applied_scroll = None;
            return;
        }
        self.host.set_rows(self.row_count());

        if self.dropdown.geometry().is_none() {
            if let Some(ticket) = self.dropdown.popup_mounted(&*self.host) {
                // Layout settles before the next step, so the ticket resolves right away.
                self.applied_scroll = self.dropdown.restore_scroll(ticket);
                if let Some(offset) = self.applied_scroll {
                    log::debug!("Restored popup scroll offset {}", offset);
                }
            }
        } else {
            self.dropdown.refresh_placement(&*self.host);
        }
    }

    pub fn view(&self) -> DropdownView {
        self.dropdown.view()
    }

    /// Release the host listeners.
    pub fn shutdown(&mut self) {
        self.dropdown.unmount();
        log::info!(
            "Showcase finished after {} messages, {} listeners left",
            self.history.len(),
            self.host.listener_count()
        );
    }
}

/// Text rendering of a view, one line per element.
pub fn describe(view: &DropdownView) -> String {
    let mut lines = vec![format!(
        "[{}] {}",
        if view.trigger.expanded { "v" } else { ">" },
        view.trigger.label.text()
    )];

    if let Some(popup) = &view.popup {
        lines.push(format!(
            "  popup {:?} at {:+} (max height {})",
            popup.direction,
            popup.offset_top,
            popup
                .viewport
                .max_height
                .map_or_else(|| "natural".to_string(), |h| h.to_string())
        ));
        for row in &popup.rows {
            let line = match row {
                RowView::Heading { label, .. } => format!("  # {}", label),
                RowView::Option {
                    label,
                    selected,
                    disabled,
                    ..
                } => format!(
                    "  {} {}{}",
                    if *selected { "*" } else { "-" },
                    label,
                    if *disabled { " (disabled)" } else { "" }
                ),
            };
            lines.push(line);
        }
    }

    lines.join("\n")
}
