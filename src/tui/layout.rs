use ratatui::layout::{Constraint, Direction, Layout as RatLayout, Rect};

pub struct Layout {
    pub inner_area: Rect,  // Area inside the outer border
    pub control_area: Rect,
    pub details_area: Rect,
    pub status_area: Rect,
}

impl Layout {
    /// Minimum terminal dimensions required for the application
    /// Height: 2 outer borders + 3 control + 4 details + 1 status
    pub const MIN_WIDTH: u16 = 30;
    pub const MIN_HEIGHT: u16 = 8;

    /// Rows of the field details panel, borders included
    const DETAILS_HEIGHT: u16 = 8;

    pub fn calculate(size: Rect) -> Self {
        // Ensure minimum terminal size (accounting for outer border)
        let width = size.width.max(Self::MIN_WIDTH + 2);
        let height = size.height.max(Self::MIN_HEIGHT + 2);
        let size = Rect::new(size.x, size.y, width, height);

        let inner_area = Rect::new(
            size.x + 1,
            size.y + 1,
            size.width.saturating_sub(2),
            size.height.saturating_sub(2),
        );

        // The control keeps at least 3 rows; details shrink first on short terminals
        let details_height = Self::DETAILS_HEIGHT.min(inner_area.height.saturating_sub(4));

        let vertical = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),                 // Chips + draft
                Constraint::Length(details_height), // Hidden field details
                Constraint::Length(1),              // Status
            ])
            .split(inner_area);

        Self {
            inner_area,
            control_area: vertical[0],
            details_area: vertical[1],
            status_area: vertical[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn areas_stack_inside_border() {
        let layout = Layout::calculate(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.inner_area, Rect::new(1, 1, 78, 22));
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.status_area.y, 22);
        assert_eq!(layout.details_area.height, 8);
        assert_eq!(layout.control_area.y, 1);
        assert!(layout.control_area.height >= 3);
    }

    #[test]
    fn tiny_terminal_is_clamped() {
        let layout = Layout::calculate(Rect::new(0, 0, 10, 5));
        assert_eq!(layout.inner_area.width, Layout::MIN_WIDTH);
        assert!(layout.control_area.height >= 3);
    }
}
