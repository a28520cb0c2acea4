// Dashboard rendering

mod dashboard;
mod modal;

use crate::app::App;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

/// Draws the whole dashboard: header, metric gauges, container table,
/// key-hint footer, and any open modal on top.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .split(frame.area());

    dashboard::render_header(frame, app, chunks[0]);
    dashboard::render_gauges(frame, app, chunks[1]);
    dashboard::render_containers(frame, app, chunks[2]);
    dashboard::render_footer(frame, chunks[3]);

    if let Some(modal) = &app.modal {
        modal::render(frame, modal);
    }
}
