use crate::app::{App, Focus};
use crate::panels::{PanelState, NO_POSTS_MESSAGE};
use crate::util::{display_width, truncate_to_width};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
    Frame,
};

use super::articles::{panel_block, render_message};

/// Greedy word wrap by display width. Words wider than a line are cut.
fn wrap_to_width(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = display_width(word);
        let needed = if current.is_empty() {
            word_width
        } else {
            current_width + 1 + word_width
        };

        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width = needed;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if word_width > width {
            lines.push(truncate_to_width(word, width).into_owned());
            current_width = 0;
        } else {
            current.push_str(word);
            current_width = word_width;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Render the discussion feed panel
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Discussion && !app.tone_modal.is_open();
    let title = match app.discussion.heading() {
        Some(heading) => format!(" {} ", heading),
        None => " Discussions ".to_string(),
    };
    let block = panel_block(app, title, focused);

    let posts = match app.discussion.state() {
        PanelState::Idle => {
            return render_message(
                f,
                block,
                "Press Enter on an article to see what Reddit is saying about it.",
                app.style("message_info"),
                area,
            )
        }
        PanelState::Loading => {
            return render_message(
                f,
                block,
                "Loading posts...",
                app.style("message_loading"),
                area,
            )
        }
        PanelState::Error(message) => {
            return render_message(f, block, message, app.style("message_error"), area)
        }
        PanelState::Loaded(posts) if posts.is_empty() => {
            return render_message(f, block, NO_POSTS_MESSAGE, app.style("message_info"), area)
        }
        PanelState::Loaded(posts) => posts,
    };

    let inner_width = (area.width as usize).saturating_sub(2);
    let selected = app.discussion.selected();

    let items: Vec<ListItem> = posts
        .iter()
        .enumerate()
        .map(|(i, post)| {
            let title_style = if i == selected && focused {
                app.style("post_selected")
            } else {
                app.style("post_title")
            };

            let mut lines = vec![
                Line::from(Span::styled(post.header.clone(), app.style("post_meta"))),
                Line::from(Span::styled(
                    truncate_to_width(&post.title, inner_width).into_owned(),
                    title_style,
                )),
                Line::from(Span::styled(
                    format!("\u{25b2} {}", post.upvotes),
                    app.style("post_upvotes"),
                )),
            ];
            if let Some(body) = &post.body {
                lines.extend(
                    wrap_to_width(body, inner_width)
                        .into_iter()
                        .map(|l| Line::from(Span::styled(l, app.style("post_body")))),
                );
            }
            lines.push(Line::from(""));

            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items).block(block);
    let mut state = ListState::default().with_selected(Some(selected));
    f.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wrap_breaks_on_words() {
        assert_eq!(
            wrap_to_width("the quick brown fox jumps", 10),
            vec!["the quick", "brown fox", "jumps"]
        );
    }

    #[test]
    fn test_wrap_cuts_long_words() {
        let lines = wrap_to_width("a supercalifragilistic word", 8);
        assert_eq!(lines[0], "a");
        assert!(display_width(&lines[1]) <= 8);
        assert_eq!(lines[2], "word");
    }

    #[test]
    fn test_wrap_zero_width_is_empty() {
        assert!(wrap_to_width("anything", 0).is_empty());
    }

    #[test]
    fn test_wrap_collapses_whitespace() {
        assert_eq!(wrap_to_width("  a \n\n b  ", 20), vec!["a b"]);
    }
}
