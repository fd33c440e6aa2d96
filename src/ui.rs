use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use crate::config::WINDOW_TITLE;
use crate::model::App;

pub(crate) const SPINNER: [&str; 6] = ["⠋", "⠙", "⠸", "⠴", "⠦", "⠇"];
pub(crate) const SPINNER_LEN: usize = SPINNER.len();

pub(crate) fn draw_ui(area: Rect, f: &mut Frame, app: &App) {
    let banner_height = app.banner.lines().count() as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(banner_height),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let banner = Paragraph::new(app.banner.as_str())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(WINDOW_TITLE));
    f.render_widget(banner, chunks[0]);

    // The fraction is rendering-clamped only; the value itself is forwarded
    // from the engine untouched.
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(app.progress.clamp(0.0, 1.0));
    f.render_widget(gauge, chunks[1]);

    let status = if app.failed {
        Paragraph::new(app.status.as_str()).style(Style::default().fg(Color::Red))
    } else {
        let frame = SPINNER[app.spinner_idx % SPINNER_LEN];
        Paragraph::new(format!("{frame} {}", app.status))
    };
    f.render_widget(status.alignment(Alignment::Center), chunks[2]);
}
