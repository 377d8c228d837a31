use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::chips::ChipList;
use crate::controller::TagController;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::tui::widgets::editor::DraftEditor;
use crate::Config;

/// Width kept free for the draft on the last chip row before it wraps below the chips
const MIN_DRAFT_WIDTH: u16 = 8;

/// Screen rectangle of a drawn chip and the tag it stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipArea {
    pub area: Rect,
    pub tag: String,
}

/// What a mouse position landed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    Chip(String),
    Control,
    Outside,
}

/// Where the control was drawn in the last frame, rebuilt on every draw
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlHitMap {
    pub control_area: Rect,
    pub chip_areas: Vec<ChipArea>,
    pub draft_area: Rect,
}

impl ControlHitMap {
    pub fn hit(&self, column: u16, row: u16) -> Hit {
        let position = Position::new(column, row);
        if let Some(chip) = self.chip_areas.iter().find(|c| c.area.contains(position)) {
            return Hit::Chip(chip.tag.clone());
        }
        if self.control_area.contains(position) {
            Hit::Control
        } else {
            Hit::Outside
        }
    }

    /// Number of chips that did not fit on screen
    pub fn hidden_chips(&self, total: usize) -> usize {
        total.saturating_sub(self.chip_areas.len())
    }
}

/// Flow chips left to right, wrapping rows, and place the draft after the last chip.
/// When the rows run out, the last row is given to the draft.
pub fn layout_chips(chips: &ChipList, inner: Rect) -> (Vec<ChipArea>, Rect) {
    if inner.width == 0 || inner.height == 0 {
        return (Vec::new(), Rect::default());
    }

    let right = inner.x + inner.width;
    let bottom = inner.y + inner.height;
    let mut areas = Vec::with_capacity(chips.len());
    let mut x = inner.x;
    let mut y = inner.y;

    for chip in chips.iter() {
        let width = chip.width().min(inner.width);
        if x > inner.x && x.saturating_add(width) > right {
            x = inner.x;
            y += 1;
        }
        if y >= bottom {
            break;
        }
        areas.push(ChipArea {
            area: Rect::new(x, y, width, 1),
            tag: chip.tag.clone(),
        });
        x = x.saturating_add(width).saturating_add(1);
    }

    if x > inner.x && x.saturating_add(MIN_DRAFT_WIDTH) > right {
        x = inner.x;
        y += 1;
    }
    if y >= bottom {
        y = bottom - 1;
        x = inner.x;
        areas.retain(|c| c.area.y < y);
    }

    let draft_area = Rect::new(x, y, right.saturating_sub(x), 1);
    (areas, draft_area)
}

/// Draw the chips followed by the draft text, returning the hit map for mouse handling
pub fn render_tag_input(
    f: &mut Frame,
    area: Rect,
    controller: &TagController,
    draft: &mut DraftEditor,
    focused: bool,
    config: &Config,
) -> ControlHitMap {
    let theme = &config.theme;
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let chip_bg = parse_color(&theme.chip_bg);
    let chip_fg = if theme.chip_fg.trim().is_empty() {
        get_contrast_text_color(chip_bg)
    } else {
        parse_color(&theme.chip_fg)
    };
    let border_color = if focused {
        parse_color(&theme.focus_border)
    } else {
        fg_color
    };

    let surface = controller.surface();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().fg(fg_color).bg(bg_color));
    let inner = block.inner(area);
    let (chip_areas, draft_area) = layout_chips(controller.chips(), inner);
    let hit_map = ControlHitMap {
        control_area: area,
        chip_areas,
        draft_area,
    };

    let marker = if surface.required() { " *" } else { "" };
    let mut title = format!(" {}{} ", controller.field().name(), marker);
    let hidden = hit_map.hidden_chips(controller.chips().len());
    if hidden > 0 {
        title.push_str(&format!("(+{} more) ", hidden));
    }
    f.render_widget(block.title(title), area);

    let chip_style = Style::default().fg(chip_fg).bg(chip_bg);
    for (chip, chip_area) in controller.chips().iter().zip(hit_map.chip_areas.iter()) {
        let label = Paragraph::new(Span::styled(chip.label(), chip_style));
        f.render_widget(label, chip_area.area);
    }

    let draft_width = draft_area.width as usize;
    draft.update_horizontal_scroll(draft_width);
    if draft.is_empty() {
        if let Some(placeholder) = surface.placeholder() {
            let style = Style::default().fg(parse_color(&theme.placeholder_fg));
            f.render_widget(Paragraph::new(Span::styled(placeholder, style)), draft_area);
        }
    } else {
        f.render_widget(Paragraph::new(draft.visible_text(draft_width)), draft_area);
    }

    if focused && draft_area.width > 0 {
        let cursor_x = draft_area.x + (draft.visible_cursor_col() as u16).min(draft_area.width - 1);
        f.set_cursor_position(Position::new(cursor_x, draft_area.y));
    }

    hit_map
}
