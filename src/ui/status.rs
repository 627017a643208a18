use crate::app::{App, Focus};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

const SPINNER: [char; super::loop_runner::SPINNER_FRAMES] =
    ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(&**msg)
    } else if app.is_loading() {
        Cow::Owned(format!("{} Loading...", SPINNER[app.spinner_frame % SPINNER.len()]))
    } else if app.tone_modal.is_open() {
        Cow::Borrowed("[Esc]close [T]heme [?]help [q]uit")
    } else {
        match app.focus {
            Focus::Articles => Cow::Borrowed(
                "[Enter]discussion [t]one chart [o]pen [r]eload [Tab]switch [T]heme [?]help [q]uit",
            ),
            Focus::Discussion => {
                Cow::Borrowed("[j/k]scroll [o/Enter]open post [Tab]switch [T]heme [?]help [q]uit")
            }
        }
    };

    let paragraph = Paragraph::new(text).style(app.style("status_bar"));
    f.render_widget(paragraph, area);
}
