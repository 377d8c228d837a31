use ratatui::widgets::{Block, Borders, Paragraph, Clear};
use ratatui::style::Style;
use ratatui::Frame;
use ratatui::layout::{Rect, Alignment, Constraint, Layout, Flex};
use crate::Config;
use crate::tui::widgets::color::parse_color;
use crate::utils::format_key_binding_for_display;

pub fn render_help(f: &mut Frame, area: Rect, config: &Config, access_key: Option<char>) {
    let fg_color = parse_color(&config.theme.fg);
    let bg_color = parse_color(&config.theme.bg);

    // Using Layout with Flex::Center for proper centering, following ratatui popup example
    let popup_area = popup_area(area, 60, 70);

    // Clear the background first - this prevents content from showing through
    f.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(build_help_text(config, access_key))
        .block(Block::default()
            .borders(Borders::ALL)
            .title("Help - Key Bindings")
            .title_alignment(Alignment::Center)
            .style(Style::default().fg(fg_color).bg(bg_color)))
        .style(Style::default().fg(fg_color).bg(bg_color))
        .wrap(ratatui::widgets::Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

/// Helper function to create a centered rect using up certain percentage of the available rect
/// Based on ratatui popup example: https://ratatui.rs/examples/apps/popup/
fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

pub fn build_help_text(config: &Config, access_key: Option<char>) -> String {
    let keys = &config.key_bindings;
    let mut text = String::new();

    text.push_str("Tags:\n");
    text.push_str("  Enter / Tab / , : Turn the typed text into tags\n");
    text.push_str("  Backspace (empty input): Remove the last tag\n");
    text.push_str("  Click a tag: Remove it\n");
    text.push_str(&format!("  {}: Paste (comma-separated text becomes several tags)\n",
        format_key_binding_for_display(&keys.paste)));
    text.push_str(&format!("  {}: Remove all tags\n",
        format_key_binding_for_display(&keys.clear)));
    text.push('\n');

    text.push_str("Input:\n");
    text.push_str("  Left / Right / Home / End: Move cursor\n");
    text.push_str(&format!("  {} / {}: Word navigation\n",
        format_key_binding_for_display("Ctrl+Left"), format_key_binding_for_display("Ctrl+Right")));
    text.push_str("  Esc: Leave the input (pending text is added)\n");
    match access_key {
        Some(key) => text.push_str(&format!("  Alt+{} or click: Focus the input\n", key)),
        None => text.push_str("  Tab or click: Focus the input\n"),
    }
    text.push('\n');

    text.push_str("General:\n");
    text.push_str(&format!("  {}: Submit and quit\n",
        format_key_binding_for_display(&keys.quit)));
    text.push_str(&format!("  {}: Show/hide help\n",
        format_key_binding_for_display(&keys.help)));

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_configured_bindings() {
        let mut config = Config::default();
        config.key_bindings.clear = "Ctrl+k".to_string();
        let text = build_help_text(&config, Some('t'));
        assert!(text.contains("Ctrl+k: Remove all tags") || text.contains("Opt+k: Remove all tags"));
        assert!(text.contains("Alt+t or click"));
        assert!(build_help_text(&config, None).contains("Tab or click"));
    }
}
