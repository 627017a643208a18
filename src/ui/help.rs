//! Help overlay: scrollable keybinding table.
//!
//! Shows every binding grouped by context, including config overrides.

use crate::app::App;
use crate::keybindings::{Action, Context};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame,
};

use super::render::centered_rect;

/// Context display order and labels for the help screen.
const CONTEXT_ORDER: [(Context, &str); 4] = [
    (Context::Global, "General"),
    (Context::ArticleList, "Trending Articles"),
    (Context::Discussion, "Discussions"),
    (Context::ToneModal, "Tone Chart"),
];

/// One line of the help table before styling.
#[derive(Debug, Clone, PartialEq, Eq)]
enum HelpLine {
    Section(&'static str),
    Binding { key: String, description: &'static str },
    Spacer,
}

/// Group the registry's bindings under their section labels.
fn help_lines(bindings: &[(Context, String, Action, &'static str)]) -> Vec<HelpLine> {
    let mut lines = Vec::new();
    for (ctx, label) in CONTEXT_ORDER {
        let mut section = bindings.iter().filter(|(c, ..)| *c == ctx).peekable();
        if section.peek().is_none() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(HelpLine::Spacer);
        }
        lines.push(HelpLine::Section(label));
        lines.extend(section.map(|(_, key, _, description)| HelpLine::Binding {
            key: key.clone(),
            description: *description,
        }));
    }
    lines
}

/// Clamp a scroll offset so the last page stays full. Returns `(offset, max_offset)`.
fn clamp_scroll(total: usize, visible: usize, requested: usize) -> (usize, usize) {
    let max = total.saturating_sub(visible);
    (requested.min(max), max)
}

/// Render the help overlay on top of the current view.
pub fn render(f: &mut Frame, app: &App) {
    let overlay = centered_rect(70, 80, f.area());
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }
    f.render_widget(Clear, overlay);

    let lines = help_lines(&app.keybindings.all_bindings());

    // Two border rows, one header row and its margin
    let visible = overlay.height.saturating_sub(4) as usize;
    let (scroll, max_scroll) = clamp_scroll(lines.len(), visible, app.help_scroll_offset);

    let section_style = app.style("article_title").add_modifier(Modifier::BOLD);
    let rows: Vec<Row> = lines
        .into_iter()
        .skip(scroll)
        .take(visible)
        .map(|line| match line {
            HelpLine::Section(label) => {
                Row::new(vec![Line::from(Span::styled(label, section_style)), Line::default()])
            }
            HelpLine::Binding { key, description } => {
                Row::new(vec![format!("  {}", key), description.to_string()])
            }
            HelpLine::Spacer => Row::new(vec![String::new(), String::new()]),
        })
        .collect();

    let title = if max_scroll > 0 {
        format!(" Help ({}/{}) ", scroll + 1, max_scroll + 1)
    } else {
        " Help (? to close) ".to_string()
    };

    let table = Table::new(rows, [Constraint::Length(16), Constraint::Min(20)])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(title),
        )
        .header(
            Row::new(vec!["Key", "Action"])
                .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
                .bottom_margin(1),
        )
        .style(app.style("modal_body"));
    f.render_widget(table, overlay);

    if scroll < max_scroll {
        let hint_area = Rect {
            x: overlay.x + 1,
            y: overlay.y + overlay.height.saturating_sub(1),
            width: overlay.width.saturating_sub(2),
            height: 1,
        };
        f.render_widget(
            Paragraph::new(Span::styled(
                " j/k to scroll, ? or Esc to close ",
                app.style("post_meta"),
            )),
            hint_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybindings::KeybindingRegistry;

    #[test]
    fn test_sections_follow_context_order() {
        let lines = help_lines(&KeybindingRegistry::new().all_bindings());
        let sections: Vec<_> = lines
            .iter()
            .filter_map(|l| match l {
                HelpLine::Section(label) => Some(*label),
                _ => None,
            })
            .collect();
        assert_eq!(
            sections,
            vec!["General", "Trending Articles", "Discussions", "Tone Chart"]
        );
        assert_eq!(lines.first(), Some(&HelpLine::Section("General")));
        assert_ne!(lines.last(), Some(&HelpLine::Spacer));
    }

    #[test]
    fn test_tone_section_lists_escape() {
        let lines = help_lines(&KeybindingRegistry::new().all_bindings());
        let start = lines
            .iter()
            .position(|l| *l == HelpLine::Section("Tone Chart"))
            .unwrap();
        assert!(matches!(
            &lines[start + 1],
            HelpLine::Binding { key, .. } if key == "Esc"
        ));
    }

    #[test]
    fn test_clamp_scroll() {
        assert_eq!(clamp_scroll(30, 10, 5), (5, 20));
        assert_eq!(clamp_scroll(30, 10, 99), (20, 20));
        assert_eq!(clamp_scroll(5, 10, 3), (0, 0));
    }
}
