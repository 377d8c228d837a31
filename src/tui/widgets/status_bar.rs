use ratatui::widgets::Paragraph;
use ratatui::style::{Style, Modifier};
use ratatui::Frame;
use ratatui::layout::Rect;
use crate::Config;
use crate::tui::widgets::color::{parse_color, get_contrast_text_color};

const SEPARATOR: &str = " • ";
const ELLIPSIS: &str = "...";

/// Join as many key hints as fit in `max_width`, ending with an ellipsis when some are dropped
pub fn fit_hints(key_hints: &[String], max_width: usize) -> String {
    let mut hints_text = String::new();
    let mut current_len = 0;

    for (i, hint) in key_hints.iter().enumerate() {
        let hint_len = hint.chars().count();
        let would_be_len = if i == 0 {
            hint_len
        } else {
            current_len + SEPARATOR.chars().count() + hint_len
        };

        if would_be_len > max_width {
            let keep = max_width.saturating_sub(ELLIPSIS.len());
            let base = if i == 0 { hint.as_str() } else { hints_text.as_str() };
            let mut truncated: String = base.chars().take(keep).collect();
            truncated.push_str(ELLIPSIS);
            return truncated;
        }

        if i > 0 {
            hints_text.push_str(SEPARATOR);
        }
        hints_text.push_str(hint);
        current_len = would_be_len;
    }

    hints_text
}

/// Shorten a status message to the bar width
pub fn fit_message(message: &str, max_width: usize) -> String {
    if message.chars().count() <= max_width {
        return message.to_string();
    }
    let mut truncated: String = message.chars().take(max_width.saturating_sub(ELLIPSIS.len())).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    message: Option<&String>,
    key_hints: &[String],
    config: &Config,
) {
    let theme = &config.theme;
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let highlight_bg = parse_color(&theme.chip_bg);
    let max_width = area.width as usize;

    let (content, style) = match message {
        // Status messages get a highlighted background for visibility
        Some(msg) => (
            fit_message(msg, max_width),
            Style::default()
                .fg(get_contrast_text_color(highlight_bg))
                .bg(highlight_bg)
                .add_modifier(Modifier::BOLD),
        ),
        None => (
            fit_hints(key_hints, max_width),
            Style::default().fg(fg_color).bg(bg_color),
        ),
    };

    f.render_widget(Paragraph::new(content).style(style), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn all_hints_fit() {
        assert_eq!(fit_hints(&hints(&["a: x", "b: y"]), 40), "a: x • b: y");
    }

    #[test]
    fn overflow_ends_with_ellipsis() {
        let text = fit_hints(&hints(&["Enter: add", "Backspace: remove last", "F1: help"]), 20);
        assert_eq!(text, "Enter: add...");
        assert!(text.chars().count() <= 20);
    }

    #[test]
    fn long_first_hint_is_truncated() {
        assert_eq!(fit_hints(&hints(&["abcdefghij"]), 6), "abc...");
    }

    #[test]
    fn messages_are_truncated() {
        assert_eq!(fit_message("short", 10), "short");
        assert_eq!(fit_message("a much longer message", 10), "a much ...");
    }
}
