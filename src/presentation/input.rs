use crate::application::{App, OrderFocus};
use crate::domain::Step;
use crate::infrastructure::ReceiptRepository;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            app.quit();
            return;
        }

        match app.step() {
            Step::Home => Self::handle_home(app, key),
            Step::Order => match app.order_focus {
                OrderFocus::Extras => Self::handle_extras(app, key),
                OrderFocus::Name => Self::handle_name_input(app, key),
            },
            Step::Confirmation => Self::handle_confirmation(app, key),
            Step::Result => Self::handle_result(app, key),
        }
    }

    fn handle_home(app: &mut App, key: KeyCode) {
        app.status_message = None;
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.previous_flavor(),
            KeyCode::Down | KeyCode::Char('j') => app.next_flavor(),
            KeyCode::Enter => app.confirm_flavor(),
            KeyCode::Char('q') | KeyCode::Esc => app.quit(),
            _ => {}
        }
    }

    fn handle_extras(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.previous_extra(),
            KeyCode::Down | KeyCode::Char('j') => app.next_extra(),
            KeyCode::Char(' ') => app.toggle_current_extra(),
            KeyCode::Tab | KeyCode::BackTab => app.switch_order_focus(),
            KeyCode::Enter => app.confirm_order(),
            KeyCode::Esc => app.go_back(),
            _ => {}
        }
    }

    fn handle_name_input(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.confirm_order(),
            KeyCode::Esc => app.go_back(),
            KeyCode::Tab | KeyCode::BackTab => app.switch_order_focus(),
            KeyCode::Backspace => app.delete_char_before_cursor(),
            KeyCode::Delete => app.delete_char_at_cursor(),
            KeyCode::Left => app.move_cursor_left(),
            KeyCode::Right => app.move_cursor_right(),
            KeyCode::Home => app.move_cursor_home(),
            KeyCode::End => app.move_cursor_end(),
            KeyCode::Char(c) => app.insert_char(c),
            _ => {}
        }
    }

    fn handle_confirmation(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Char(' ') | KeyCode::Char('r') => app.toggle_round_up(),
            KeyCode::Enter => app.accept_confirmation(),
            KeyCode::Esc => app.go_back(),
            _ => {}
        }
    }

    fn handle_result(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Char('s') => {
                let filename = app.receipt_json_filename();
                let result = ReceiptRepository::save_json(&app.receipt(), &filename);
                app.set_receipt_result(result);
            }
            KeyCode::Char('e') => {
                let filename = app.receipt_csv_filename();
                let tax_rate = app.flow.config().tax_rate;
                let result = ReceiptRepository::export_csv(&app.receipt(), &filename, tax_rate);
                app.set_receipt_result(result);
            }
            KeyCode::Enter | KeyCode::Char('q') | KeyCode::Esc => app.quit(),
            _ => {}
        }
    }
}
