use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};

use crate::core::geometry::Rect as PageRect;
use crate::tui::component::Component;

/// One navigable element as the view draws it.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementBox {
    pub label: String,
    pub rect: PageRect,
    pub focused: bool,
}

/// Draws the eligible elements as bordered boxes, scaled from page
/// coordinates to fit the area.
///
/// # Scaling
///
/// The page extent is the furthest right and bottom edge of any box. Both
/// axes scale independently, so a 1280x720 page fills an 80x24 area. Boxes
/// are at least 2x2 cells so a border always shows.
///
/// The focused box is drawn last, on top of anything it overlaps (the play
/// overlay covers its media container exactly).
pub struct PageView {
    pub boxes: Vec<ElementBox>,
}

impl PageView {
    pub fn new(boxes: Vec<ElementBox>) -> Self {
        Self { boxes }
    }

    /// Maps a page rectangle onto terminal cells inside `area`.
    fn to_cells(rect: &PageRect, area: Rect, scale_x: f64, scale_y: f64) -> Rect {
        let x = area.x + (rect.left.max(0.0) * scale_x).floor() as u16;
        let y = area.y + (rect.top.max(0.0) * scale_y).floor() as u16;
        let width = ((rect.width * scale_x).round() as u16).max(2);
        let height = ((rect.height * scale_y).round() as u16).max(2);
        Rect::new(x, y, width, height).intersection(area)
    }
}

impl Component for PageView {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.boxes.is_empty() {
            let empty = Paragraph::new("No navigable elements")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty, area);
            return;
        }

        let extent_x = self
            .boxes
            .iter()
            .map(|b| b.rect.right())
            .fold(1.0, f64::max);
        let extent_y = self
            .boxes
            .iter()
            .map(|b| b.rect.bottom())
            .fold(1.0, f64::max);
        let scale_x = f64::from(area.width) / extent_x;
        let scale_y = f64::from(area.height) / extent_y;

        let (focused, rest): (Vec<&ElementBox>, Vec<&ElementBox>) =
            self.boxes.iter().partition(|b| b.focused);

        for element in rest.into_iter().chain(focused) {
            let cells = Self::to_cells(&element.rect, area, scale_x, scale_y);
            if cells.is_empty() {
                continue;
            }
            let block = if element.focused {
                Block::bordered()
                    .border_type(BorderType::Thick)
                    .border_style(
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    )
            } else {
                Block::bordered().border_style(Style::default().fg(Color::Gray))
            };
            let label = Paragraph::new(element.label.as_str())
                .alignment(Alignment::Center)
                .block(block);

            frame.render_widget(Clear, cells);
            frame.render_widget(label, cells);
        }
    }
}
