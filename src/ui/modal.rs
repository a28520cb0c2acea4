// Blocking confirm/alert overlays

use crate::app::Modal;
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

pub fn render(frame: &mut Frame, modal: &Modal) {
    let (title, body, hint) = match modal {
        Modal::ConfirmRemove { container_id, name } => (
            "Confirm removal",
            format!("Remove container {name} ({container_id})? This cannot be undone."),
            "[y] remove   [n] cancel",
        ),
        Modal::Alert(message) => ("Backend error", message.clone(), "press any key"),
    };

    let area = centered(frame.area(), 60, 6);
    frame.render_widget(Clear, area);
    let block = Block::bordered()
        .title(title)
        .border_style(Style::new().fg(Color::Red));
    let text = vec![
        Line::raw(body),
        Line::raw(""),
        Line::styled(hint, Style::new().fg(Color::DarkGray)),
    ];
    frame.render_widget(
        Paragraph::new(text).wrap(Wrap { trim: true }).block(block),
        area,
    );
}

fn centered(area: Rect, width_percent: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Percentage(width_percent)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    area
}
