use ratatui::Frame;
use ratatui::widgets::{Block, Borders};
use ratatui::style::Style;
use crate::tui::{App, Layout};
use crate::tui::app::Mode;
use crate::tui::widgets::{
    color::parse_color,
    field_details::render_field_details,
    help::render_help,
    status_bar::render_status_bar,
    tag_input::render_tag_input,
};

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    // Outer border with the app name centered in the top border
    let fg_color = parse_color(&app.config.theme.fg);
    let bg_color = parse_color(&app.config.theme.bg);
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("tagfield")
        .title_alignment(ratatui::layout::Alignment::Center)
        .style(Style::default().fg(fg_color).bg(bg_color));
    f.render_widget(outer_block, f.area());

    // Chip positions are rebuilt every frame and kept for mouse hit-testing
    let focused = app.is_focused();
    app.hit_map = render_tag_input(
        f,
        layout.control_area,
        &app.controller,
        &mut app.draft,
        focused,
        &app.config,
    );

    let activity = app.activity();
    render_field_details(f, layout.details_area, &app.controller, &activity, &app.config);

    let hints = app.key_hints();
    render_status_bar(
        f,
        layout.status_area,
        app.status.message.as_ref(),
        &hints,
        &app.config,
    );

    if app.mode == Mode::Help {
        render_help(f, f.area(), &app.config, app.controller.surface().access_key());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FormField;
    use crate::Config;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn full_frame_records_chip_positions() {
        let field = FormField::new("colors").with_value("red,blue");
        let mut app = App::new(Config::default(), field, "colors");
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();

        terminal
            .draw(|f| {
                let layout = Layout::calculate(f.area());
                render(f, &mut app, &layout);
            })
            .unwrap();

        assert_eq!(app.hit_map.chip_areas.len(), 2);
        let blue = app.hit_map.chip_areas[1].area;
        app.click(blue.x, blue.y);
        assert_eq!(app.controller.value(), vec!["red"]);
        assert_eq!(app.controller.field().value(), "red");
    }
}
