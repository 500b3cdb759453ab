use crate::application::{App, OrderFocus};
use crate::domain::{Step, format_currency};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_title(f, app, chunks[1]);
    match app.step() {
        Step::Home => render_home(f, app, chunks[2]),
        Step::Order => render_order(f, app, chunks[2]),
        Step::Confirmation => render_confirmation(f, app, chunks[2]),
        Step::Result => render_result(f, app, chunks[2]),
    }
    render_status_bar(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("Ice Cream Land")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    f.render_widget(header, area);
}

fn render_title(f: &mut Frame, app: &App, area: Rect) {
    let color = match app.step() {
        Step::Result => Color::Green,
        _ => Color::Red,
    };
    let title = Paragraph::new(app.step().title()).style(Style::default().fg(color));
    f.render_widget(title, area);
}

fn highlight(selected: bool) -> Style {
    if selected {
        Style::default().bg(Color::Blue).fg(Color::White)
    } else {
        Style::default()
    }
}

fn render_home(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .flow
        .config()
        .catalog
        .iter()
        .enumerate()
        .map(|(i, flavor)| {
            let marker = if i == app.flavor_cursor { "(•)" } else { "( )" };
            ListItem::new(format!("{} {}", marker, flavor.display_label()))
                .style(highlight(i == app.flavor_cursor))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Flavor"));
    f.render_widget(list, area);
}

fn render_order(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let extras_focused = app.order_focus == OrderFocus::Extras;
    let state = app.flow.state();
    let items: Vec<ListItem> = app
        .flow
        .config()
        .extras_catalog
        .iter()
        .enumerate()
        .map(|(i, extra)| {
            let marker = if state.is_extra_selected(extra) { "[x]" } else { "[ ]" };
            ListItem::new(format!("{} {}", marker, extra.display_label()))
                .style(highlight(extras_focused && i == app.extras_cursor))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Extras"));
    f.render_widget(list, chunks[0]);

    let name_style = if extras_focused {
        Style::default()
    } else {
        Style::default().fg(Color::Green)
    };
    let placeholder = app.name_input.is_empty() && extras_focused;
    let name = Paragraph::new(if placeholder { "John Doe" } else { app.name_input.as_str() })
        .style(if placeholder { Style::default().fg(Color::DarkGray) } else { name_style })
        .block(Block::default().borders(Borders::ALL).title("Your Name"));
    f.render_widget(name, chunks[1]);

    if !extras_focused {
        f.set_cursor_position((
            chunks[1].x + 1 + app.cursor_position as u16,
            chunks[1].y + 1,
        ));
    }
}

fn render_confirmation(f: &mut Frame, app: &App, area: Rect) {
    let Some(breakdown) = app.flow.preview() else {
        return;
    };
    let round_up = app.flow.state().round_up_enabled();

    let lines = vec![
        Line::from(vec![
            Span::raw("Dear "),
            Span::styled(
                app.flow.state().name().to_string(),
                Style::default().fg(Color::Green).add_modifier(Modifier::ITALIC),
            ),
            Span::raw(", please confirm the details below."),
        ]),
        Line::from(""),
        Line::from(format!("Subtotal:  {}", format_currency(breakdown.subtotal))),
        Line::from(format!(
            "Tax ({}%) : {}",
            (app.flow.config().tax_rate * rust_decimal::Decimal::ONE_HUNDRED).normalize(),
            format_currency(breakdown.tax)
        )),
        Line::from(Span::styled(
            format!("Total:     {}", format_currency(breakdown.payable(round_up))),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "{} Round Up For Kids Foundation Camp",
            if round_up { "[x]" } else { "[ ]" }
        )),
    ];

    let summary = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Summary"));
    f.render_widget(summary, area);
}

fn render_result(f: &mut Frame, app: &App, area: Rect) {
    let state = app.flow.state();
    let lines = vec![
        Line::from(Span::styled(
            format!("Thank you, {}!", state.name()),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from("Your Order will be brought to your table, shortly"),
        Line::from(""),
        Line::from(Span::styled(
            format_currency(state.total_price()),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from("paid"),
    ];

    let result = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(result, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = if let Some(ref status) = app.status_message {
        status.clone()
    } else {
        match app.step() {
            Step::Home => "↑↓/jk: choose flavor | Enter: next | q: quit".to_string(),
            Step::Order => match app.order_focus {
                OrderFocus::Extras => "↑↓/jk: move | Space: toggle | Tab: name | Enter: next | Esc: back".to_string(),
                OrderFocus::Name => "Type your name | Tab: extras | Enter: next | Esc: back".to_string(),
            },
            Step::Confirmation => "Space: round up | Enter: next | Esc: back".to_string(),
            Step::Result => "s: save receipt | e: export CSV | Enter/q: exit".to_string(),
        }
    };

    let style = if app.status_message.is_some() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn render(app: &App) -> String {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_home() {
        let app = App::default();
        let screen = render(&app);
        assert!(screen.contains("Ice Cream Land"));
        assert!(screen.contains("Welcome"));
        assert!(screen.contains("Strawberry $1.50"));
    }

    #[test]
    fn test_render_confirmation_and_result() {
        let mut app = App::default();
        app.next_flavor();
        app.confirm_flavor();
        app.toggle_current_extra();
        app.next_extra();
        app.toggle_current_extra();
        for c in "Ada".chars() {
            app.insert_char(c);
        }
        app.confirm_order();

        let screen = render(&app);
        assert!(screen.contains("Subtotal:  $2.25"));
        assert!(screen.contains("Tax (5%) : $0.11"));
        assert!(screen.contains("Total:     $2.36"));

        app.toggle_round_up();
        let screen = render(&app);
        assert!(screen.contains("Total:     $2.40"));

        app.accept_confirmation();
        let screen = render(&app);
        assert!(screen.contains("Thank you, Ada!"));
        assert!(screen.contains("$2.40"));
        assert!(screen.contains("paid"));
    }
}
