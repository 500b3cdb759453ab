//! Application state for the terminal ordering kiosk.
//!
//! `App` wraps the session's [`OrderFlow`] together with the purely visual
//! state the screens need (cursors, the name being typed, status notices).

use crate::domain::{FlowResult, OrderFlow, PricingConfig, Step};
use crate::infrastructure::{Receipt, ReceiptError};

/// Which widget on the order screen receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderFocus {
    /// Extras checklist
    Extras,
    /// Name text field
    Name,
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use icecream_land::application::App;
/// use icecream_land::domain::Step;
///
/// let app = App::default();
/// assert_eq!(app.step(), Step::Home);
/// assert_eq!(app.flavor_cursor, 0);
/// ```
#[derive(Debug)]
pub struct App {
    /// The order session being driven
    pub flow: OrderFlow,
    /// Highlighted flavor on the home screen
    pub flavor_cursor: usize,
    /// Highlighted extra on the order screen
    pub extras_cursor: usize,
    /// Focused widget on the order screen
    pub order_focus: OrderFocus,
    /// Name typed so far; only handed to the flow on confirmation
    pub name_input: String,
    /// Cursor position within the name, in characters
    pub cursor_position: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Set once the customer leaves the result screen
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}

impl App {
    pub fn new(config: PricingConfig) -> Self {
        Self {
            flow: OrderFlow::new(config),
            flavor_cursor: 0,
            extras_cursor: 0,
            order_focus: OrderFocus::Extras,
            name_input: String::new(),
            cursor_position: 0,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn step(&self) -> Step {
        self.flow.step()
    }

    pub fn next_flavor(&mut self) {
        let count = self.flow.config().catalog.len();
        if self.flavor_cursor + 1 < count {
            self.flavor_cursor += 1;
        }
    }

    pub fn previous_flavor(&mut self) {
        self.flavor_cursor = self.flavor_cursor.saturating_sub(1);
    }

    /// Confirms the highlighted flavor and opens the order screen.
    pub fn confirm_flavor(&mut self) {
        let Some(flavor) = self.flow.config().catalog.get(self.flavor_cursor).cloned() else {
            return;
        };
        let result = self.flow.confirm_flavor(&flavor);
        if self.report(result).is_some() {
            self.extras_cursor = 0;
            self.order_focus = OrderFocus::Extras;
            self.name_input = self.flow.state().name().to_string();
            self.cursor_position = self.name_input.chars().count();
        }
    }

    pub fn next_extra(&mut self) {
        let count = self.flow.config().extras_catalog.len();
        if self.extras_cursor + 1 < count {
            self.extras_cursor += 1;
        }
    }

    pub fn previous_extra(&mut self) {
        self.extras_cursor = self.extras_cursor.saturating_sub(1);
    }

    pub fn toggle_current_extra(&mut self) {
        let Some(item) = self.flow.config().extras_catalog.get(self.extras_cursor).cloned() else {
            return;
        };
        let selected = !self.flow.state().is_extra_selected(&item);
        let result = self.flow.toggle_extra(&item, selected);
        self.report(result);
    }

    pub fn switch_order_focus(&mut self) {
        self.order_focus = match self.order_focus {
            OrderFocus::Extras => OrderFocus::Name,
            OrderFocus::Name => OrderFocus::Extras,
        };
    }

    /// Submits the typed name. A blank name leaves the customer on the
    /// order screen with a notice.
    pub fn confirm_order(&mut self) {
        let name = self.name_input.clone();
        let result = self.flow.confirm_order(&name);
        self.report(result);
    }

    pub fn toggle_round_up(&mut self) {
        let enabled = !self.flow.state().round_up_enabled();
        let result = self.flow.set_round_up(enabled);
        self.report(result);
    }

    pub fn accept_confirmation(&mut self) {
        let result = self.flow.accept_confirmation();
        self.report(result);
    }

    pub fn go_back(&mut self) {
        let result = self.flow.back();
        self.report(result);
    }

    pub fn insert_char(&mut self, c: char) {
        let offset = self.byte_offset(self.cursor_position);
        self.name_input.insert(offset, c);
        self.cursor_position += 1;
    }

    pub fn delete_char_before_cursor(&mut self) {
        if self.cursor_position > 0 {
            let offset = self.byte_offset(self.cursor_position - 1);
            self.name_input.remove(offset);
            self.cursor_position -= 1;
        }
    }

    pub fn delete_char_at_cursor(&mut self) {
        if self.cursor_position < self.name_input.chars().count() {
            let offset = self.byte_offset(self.cursor_position);
            self.name_input.remove(offset);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.name_input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.name_input.chars().count();
    }

    pub fn receipt(&self) -> Receipt {
        Receipt::from_flow(&self.flow)
    }

    pub fn receipt_json_filename(&self) -> String {
        "receipt.json".to_string()
    }

    pub fn receipt_csv_filename(&self) -> String {
        "receipt.csv".to_string()
    }

    /// Processes the result of writing a receipt file.
    pub fn set_receipt_result(&mut self, result: Result<String, ReceiptError>) {
        self.status_message = Some(match result {
            Ok(filename) => format!("Receipt written to {}", filename),
            Err(error) => format!("Receipt failed: {}", error),
        });
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    fn report<T>(&mut self, result: FlowResult<T>) -> Option<T> {
        match result {
            Ok(value) => {
                self.status_message = None;
                Some(value)
            }
            Err(error) => {
                self.status_message = Some(error.to_string());
                None
            }
        }
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.name_input
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.name_input.len())
    }
}
