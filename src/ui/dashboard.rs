// Header, metric gauges, and the container table

use crate::app::App;
use crate::models::ContainerState;
use crate::poller::ContainerListView;
use crate::version;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Cell, Gauge, Paragraph, Row, Table, TableState};

pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Line::from(vec![
        Span::styled(version::NAME, Style::new().add_modifier(Modifier::BOLD)),
        Span::raw(" v"),
        Span::raw(version::VERSION),
    ]);
    frame.render_widget(Paragraph::new(title), area);

    // Combined platform/architecture label, e.g. "Linux 6.1.0 (x86_64)".
    let system_info = app
        .status
        .as_ref()
        .map(|s| s.platform_label())
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(Line::raw(system_info).right_aligned()),
        area,
    );
}

pub fn render_gauges(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(area);

    let (cpu, ram, ram_detail, disk, disk_detail) = match &app.status {
        Some(s) => (
            Some(s.cpu_percent),
            Some(s.ram_percent),
            format!("{:.1} GB / {:.1} GB", s.ram_used_gb, s.ram_total_gb),
            Some(s.disk_percent),
            format!("{:.1} GB / {:.1} GB", s.disk_used_gb, s.disk_total_gb),
        ),
        None => (None, None, String::new(), None, String::new()),
    };

    render_metric(frame, columns[0], "CPU", cpu, "", Color::Cyan);
    render_metric(frame, columns[1], "RAM", ram, &ram_detail, Color::Magenta);
    render_metric(frame, columns[2], "Disk", disk, &disk_detail, Color::Blue);
}

fn render_metric(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    percent: Option<f64>,
    detail: &str,
    color: Color,
) {
    let block = Block::bordered().title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(inner);
    let (ratio, label) = match percent {
        Some(p) => ((p / 100.0).clamp(0.0, 1.0), format!("{p:.1}%")),
        None => (0.0, "--".to_string()),
    };
    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::new().fg(color))
            .ratio(ratio)
            .label(label),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(Line::styled(detail, Style::new().fg(Color::DarkGray))),
        rows[1],
    );
}

pub fn render_containers(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::bordered().title("Containers");

    let rows: Vec<Row> = match &app.containers {
        ContainerListView::Loading => vec![Row::new(vec![Cell::from("Loading containers...")])],
        ContainerListView::Failed(error) => vec![Row::new(vec![Cell::from(Span::styled(
            error.clone(),
            Style::new().fg(Color::Red),
        ))])],
        ContainerListView::Loaded(list) if list.is_empty() => {
            vec![Row::new(vec![Cell::from("No containers found.")])]
        }
        ContainerListView::Loaded(list) => list
            .iter()
            .map(|c| {
                let state = c.state();
                Row::new(vec![
                    Cell::from(Line::from(vec![
                        Span::styled("● ", Style::new().fg(state_color(state))),
                        Span::raw(c.name.clone()),
                    ])),
                    Cell::from(c.id.clone()),
                    Cell::from(c.image.clone()),
                    Cell::from(c.status.clone()),
                ])
            })
            .collect(),
    };

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(14),
            Constraint::Min(20),
            Constraint::Min(16),
        ],
    )
    .header(Row::new(vec!["Name", "ID", "Image", "Status"]).style(Style::new().fg(Color::DarkGray)))
    .row_highlight_style(Style::new().add_modifier(Modifier::REVERSED))
    .block(block);

    let mut state = TableState::default();
    if matches!(&app.containers, ContainerListView::Loaded(list) if !list.is_empty()) {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

pub fn render_footer(frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new(Line::styled(
            " ↑/↓ select   s start   x stop   r restart   d remove   q quit",
            Style::new().fg(Color::DarkGray),
        )),
        area,
    );
}

/// Color for the status indicator, keyed on the coarse container state.
fn state_color(state: ContainerState) -> Color {
    match state {
        ContainerState::Running => Color::Green,
        ContainerState::Exited => Color::Red,
        ContainerState::Paused => Color::Yellow,
        ContainerState::Restarting => Color::Cyan,
        ContainerState::Unknown => Color::DarkGray,
    }
}
