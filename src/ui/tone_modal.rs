//! Tone chart overlay.
//!
//! Draws the modal over the dashboard. The bar chart itself comes from the
//! panel's live `ToneChart`; this module only maps it onto ratatui widgets.

use crate::app::App;
use crate::chart::ToneChart;
use crate::panels::ModalState;
use crate::theme::bar_color;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::render::centered_rect;

const MAX_BAR_WIDTH: u16 = 9;
const BAR_GAP: u16 = 1;

/// Widest bar that still lets `count` bars share `available` columns.
fn bar_width(available: u16, count: usize) -> u16 {
    if count == 0 {
        return 1;
    }
    let count = u16::try_from(count).unwrap_or(u16::MAX);
    let per_bar = available.saturating_add(BAR_GAP) / count;
    per_bar.saturating_sub(BAR_GAP).clamp(1, MAX_BAR_WIDTH)
}

/// Render the tone modal on top of the current view.
pub fn render(f: &mut Frame, app: &App) {
    let overlay = centered_rect(85, 75, f.area());
    if overlay.width < 20 || overlay.height < 8 {
        return;
    }

    f.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border_focused"))
        .title(" Tone Chart ")
        .title_bottom(Line::from(" Esc to close ").alignment(Alignment::Right))
        .style(app.style("modal_body"));
    let inner = block.inner(overlay);
    f.render_widget(block, overlay);

    match app.tone_modal.state() {
        ModalState::Hidden => {}
        ModalState::Loading { title } => {
            let text = format!("Loading tone data for {}...", title);
            render_text(f, &text, app.style("message_loading"), inner);
        }
        ModalState::Error { message } => {
            render_text(f, message, app.style("message_error"), inner);
        }
        ModalState::Loaded { caption } => match app.tone_modal.chart() {
            Some(chart) => render_chart(f, app, chart, inner),
            None => render_text(f, caption, app.style("modal_body"), inner),
        },
    }
}

fn render_text(f: &mut Frame, text: &str, style: Style, area: Rect) {
    let paragraph = Paragraph::new(text.to_string())
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_chart(f: &mut Frame, app: &App, chart: &ToneChart, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let caption = Paragraph::new(chart.caption.clone())
        .style(app.style("modal_body"))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(caption, chunks[0]);

    f.render_widget(
        Paragraph::new(chart.y_axis_title).style(app.style("chart_axis")),
        chunks[1],
    );

    let bars: Vec<Bar> = chart
        .bars
        .iter()
        .map(|bar| {
            Bar::default()
                .value(bar.value)
                .label(Line::from(bar.label.clone()))
                .style(Style::default().fg(bar_color(bar.color)))
                .value_style(app.style("chart_value"))
        })
        .collect();

    // Bars always start at zero; max keeps a flat chart from dividing by zero
    let barchart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width(chunks[2].width, bars.len()))
        .bar_gap(BAR_GAP)
        .max(chart.max_value().max(1))
        .label_style(app.style("chart_axis"));
    f.render_widget(barchart, chunks[2]);

    f.render_widget(
        Paragraph::new(chart.x_axis_title)
            .style(app.style("chart_axis"))
            .alignment(Alignment::Center),
        chunks[3],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_width_fills_space() {
        // 5 bars of 9 with 4 gaps = 49 columns
        assert_eq!(bar_width(60, 5), 9);
        assert_eq!(bar_width(30, 5), 5);
    }

    #[test]
    fn test_bar_width_never_zero() {
        assert_eq!(bar_width(10, 40), 1);
        assert_eq!(bar_width(0, 3), 1);
        assert_eq!(bar_width(50, 0), 1);
    }
}
