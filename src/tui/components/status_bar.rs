use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

/// Single-line header: page title, focused element, last host activity.
///
/// # Example
///
/// ```ignore
/// let mut bar = StatusBar::new("Home".into(), Some("News".into()), None);
/// bar.render(frame, header_area);
/// ```
pub struct StatusBar {
    pub title: String,
    /// Label of the element holding focus, if any.
    pub focus: Option<String>,
    /// Latest thing the page reported ("Playing", "Activated News").
    pub activity: Option<String>,
}

impl StatusBar {
    pub fn new(title: String, focus: Option<String>, activity: Option<String>) -> Self {
        Self {
            title,
            focus,
            activity,
        }
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("spatnav", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(" | {} | focus: ", self.title)),
        ];
        match &self.focus {
            Some(label) => spans.push(Span::styled(
                label.clone(),
                Style::default().fg(Color::Green),
            )),
            None => spans.push(Span::styled("none", Style::default().fg(Color::DarkGray))),
        }
        if let Some(activity) = &self.activity {
            spans.push(Span::raw(format!(" | {activity}")));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(bar: &mut StatusBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                bar.render(f, f.area());
            })
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_status_bar_with_focus_and_activity() {
        let mut bar = StatusBar::new(
            "Home".to_string(),
            Some("News".to_string()),
            Some("Playing".to_string()),
        );
        let text = render_to_text(&mut bar);
        assert!(text.starts_with("spatnav | Home | focus: News | Playing"));
    }

    #[test]
    fn test_status_bar_without_focus() {
        let mut bar = StatusBar::new("Home".to_string(), None, None);
        let text = render_to_text(&mut bar);
        assert!(text.contains("focus: none"));
        assert!(!text.contains(" | Playing"));
    }

    #[test]
    fn test_focus_label_is_green() {
        let backend = TestBackend::new(40, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut bar = StatusBar::new("T".to_string(), Some("News".to_string()), None);
        terminal.draw(|f| bar.render(f, f.area())).unwrap();

        let buffer = terminal.backend().buffer();
        // "spatnav | T | focus: " is 21 cells wide
        assert_eq!(buffer[(21, 0)].symbol(), "N");
        assert_eq!(buffer[(21, 0)].fg, Color::Green);
    }
}
