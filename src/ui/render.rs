//! Render functions for the TUI.
//!
//! Lays out the dashboard regions (header, article list, discussion feed,
//! status bar) and draws the overlays on top.

use crate::api::TrendingEndpoint;
use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{articles, discussion, help, status, tone_modal};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 60;
pub(super) const MIN_HEIGHT: u16 = 10;

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    // Nothing meaningful fits in a zero-sized frame
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(f, app, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    articles::render(f, app, columns[0]);
    discussion::render(f, app, columns[1]);
    status::render(f, app, rows[2]);

    if app.tone_modal.is_open() {
        tone_modal::render(f, app);
    }

    // Help sits above everything, including the tone modal
    if app.show_help {
        help::render(f, app);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let scope = match app.api.trending_endpoint() {
        TrendingEndpoint::Dated => app.date.format("%Y-%m-%d").to_string(),
        TrendingEndpoint::Top => "top articles".to_string(),
    };
    let line = Line::from(vec![
        Span::styled(" Trending Wikipedia Articles ", app.style("article_title")),
        Span::styled(format!("({})", scope), app.style("post_meta")),
        Span::styled(format!("  {}", app.api.base_url()), app.style("article_link")),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Create a centered rectangle with the given percentage of the parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    // u32 so wide terminals cannot overflow the product
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(percent_y) / 100) as u16;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
