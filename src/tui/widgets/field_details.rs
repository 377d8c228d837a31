use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::controller::TagController;
use crate::tui::app::FieldActivity;
use crate::tui::widgets::color::parse_color;
use crate::Config;

/// Rows describing the hidden form field, the surface that replaced it, and the
/// notifications it has received
pub fn details_lines(controller: &TagController, activity: &FieldActivity) -> Vec<Line<'static>> {
    let field = controller.field();
    let surface = controller.surface();
    let label = |text: &str| {
        Span::styled(format!("{:<9}", text), Style::default().add_modifier(Modifier::BOLD))
    };

    let visibility = if field.is_hidden() { "hidden" } else { "visible" };
    let value = if field.value().is_empty() {
        "(empty)".to_string()
    } else {
        field.value().to_string()
    };
    let attributes = if surface.attributes().is_empty() {
        "(none)".to_string()
    } else {
        surface
            .attributes()
            .iter()
            .map(|(name, value)| {
                if value.is_empty() {
                    name.clone()
                } else {
                    format!("{}=\"{}\"", name, value)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    };

    vec![
        Line::from(vec![
            label("Field"),
            Span::raw(format!(
                "{} ({}, tabindex {})",
                field.name(),
                visibility,
                field.tab_index()
            )),
        ]),
        Line::from(vec![label("Value"), Span::raw(value)]),
        Line::from(vec![
            label("Events"),
            Span::raw(format!("input ×{}  change ×{}", activity.inputs, activity.changes)),
        ]),
        Line::from(vec![
            label("Surface"),
            Span::raw(format!("{}  type={}", surface.id(), surface.input_type())),
        ]),
        Line::from(vec![label("Attrs"), Span::raw(attributes)]),
    ]
}

pub fn render_field_details(
    f: &mut Frame,
    area: Rect,
    controller: &TagController,
    activity: &FieldActivity,
    config: &Config,
) {
    if area.height == 0 {
        return;
    }
    let fg_color = parse_color(&config.theme.fg);
    let bg_color = parse_color(&config.theme.bg);

    let paragraph = Paragraph::new(details_lines(controller, activity))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Form field ({} tags) ", controller.len())),
        )
        .style(Style::default().fg(fg_color).bg(bg_color))
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FormField;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn describes_hidden_field_and_surface() {
        let field = FormField::new("colors")
            .with_value("red,blue")
            .with_attribute("placeholder", "Pick")
            .with_attribute("required", "");
        let controller = TagController::new(field, "colors");
        let activity = FieldActivity { inputs: 1, changes: 1 };

        let lines: Vec<String> = details_lines(&controller, &activity).iter().map(line_text).collect();
        assert!(lines[0].contains("colors (hidden, tabindex -1)"));
        assert!(lines[1].ends_with("red,blue"));
        assert!(lines[2].contains("input ×1  change ×1"));
        assert!(lines[3].contains("colors-editable  type=text"));
        assert!(lines[4].contains("placeholder=\"Pick\" required"));
    }
}
