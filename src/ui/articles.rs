use crate::app::{App, Focus};
use crate::panels::{PanelState, ARTICLES_EMPTY_MESSAGE};
use crate::trend::TrendIndicator;
use crate::util::{display_width, truncate_to_width};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Bordered block for a dashboard panel, highlighted when focused.
pub(super) fn panel_block<'a>(app: &App, title: String, focused: bool) -> Block<'a> {
    let border = if focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title)
}

/// Single wrapped message filling a panel body.
pub(super) fn render_message(f: &mut Frame, block: Block<'_>, text: &str, style: Style, area: Rect) {
    let paragraph = Paragraph::new(text.to_string())
        .style(style)
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(paragraph, area);
}

fn trend_style(app: &App, indicator: TrendIndicator) -> Style {
    if indicator.is_rising() {
        app.style("trend_up")
    } else if indicator.is_falling() {
        app.style("trend_down")
    } else {
        app.style("trend_flat")
    }
}

/// Render the trending article list panel
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Articles && !app.tone_modal.is_open();
    let block = panel_block(app, " Trending Articles ".to_string(), focused);

    let rows = match app.articles.state() {
        PanelState::Idle => return f.render_widget(block, area),
        PanelState::Loading => {
            return render_message(
                f,
                block,
                "Loading trending articles...",
                app.style("message_loading"),
                area,
            )
        }
        PanelState::Error(message) => {
            let style = if message == ARTICLES_EMPTY_MESSAGE {
                app.style("message_info")
            } else {
                app.style("message_error")
            };
            return render_message(f, block, message, style, area);
        }
        PanelState::Loaded(rows) => rows,
    };

    // Borders plus the glyph column
    let title_width = (area.width as usize).saturating_sub(2 + 5);

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let glyph = row.indicator.glyph();
            let pad = 4usize.saturating_sub(display_width(glyph));
            let title = truncate_to_width(&row.title, title_width);

            let first = Line::from(vec![
                Span::styled(
                    format!("{}{} ", glyph, " ".repeat(pad)),
                    trend_style(app, row.indicator),
                ),
                Span::styled(title.into_owned(), app.style("article_title")),
            ]);
            let second = Line::from(vec![
                Span::raw("     "),
                Span::styled(row.views_text.clone(), app.style("article_views")),
                Span::raw("  "),
                Span::styled("[t] tone", app.style("tone_action")),
            ]);

            ListItem::new(vec![first, second])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(app.style("article_selected"));

    let mut state = ListState::default().with_selected(Some(app.articles.selected()));
    f.render_stateful_widget(list, area, &mut state);
}
