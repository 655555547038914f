//! "Select first N rows" popover.

use crate::state::SelectInput;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Popover width in cells, including borders.
pub const POPUP_WIDTH: u16 = 40;
/// Popover height in cells, including borders.
pub const POPUP_HEIGHT: u16 = 4;

/// Rect of `width` x `height` centered in `area`, clipped to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Render the popover centered on the screen. Draws nothing when closed.
pub fn render_select_popup(frame: &mut Frame, input: &SelectInput) {
    let SelectInput::Open { text, cursor } = input else {
        return;
    };

    let area = centered_rect(POPUP_WIDTH, POPUP_HEIGHT, frame.area());
    frame.render_widget(Clear, area);

    let before: String = text.chars().take(*cursor).collect();
    let at_cursor = text
        .chars()
        .nth(*cursor)
        .map_or_else(|| " ".to_string(), |c| c.to_string());
    let after: String = text.chars().skip(cursor + 1).collect();

    let lines = vec![
        Line::from(vec![
            Span::raw(before),
            Span::styled(
                at_cursor,
                Style::default()
                    .bg(Color::White)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(after),
        ]),
        Line::from(Span::styled(
            "Enter: apply  Esc: cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Select first N rows (this page) ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(popup, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn centered_rect_centers_inside_area() {
        let rect = centered_rect(40, 4, Rect::new(0, 0, 80, 24));
        assert_eq!(rect, Rect::new(20, 10, 40, 4));
    }

    #[test]
    fn centered_rect_clips_to_small_area() {
        let rect = centered_rect(40, 4, Rect::new(0, 0, 20, 2));
        assert_eq!(rect, Rect::new(0, 0, 20, 2));
    }

    #[test]
    fn open_popup_renders_title_and_text() {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        let input = SelectInput::Open {
            text: "25".to_string(),
            cursor: 2,
        };

        terminal
            .draw(|frame| render_select_popup(frame, &input))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(content.contains("Select first N rows"));
        assert!(content.contains("25"));
    }

    #[test]
    fn closed_popup_renders_nothing() {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal
            .draw(|frame| render_select_popup(frame, &SelectInput::Closed))
            .unwrap();

        let buffer = terminal.backend().buffer();
        assert!(buffer.content().iter().all(|c| c.symbol() == " "));
    }
}
