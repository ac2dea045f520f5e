use crate::core::Engine;
use crate::page::Page;
use crate::tui::component::Component;
use crate::tui::components::{ElementBox, PageView, StatusBar};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;

const HELP: &str = "←↑→↓ move · Enter activate · Esc back · F5 reload · q quit";

pub fn draw_ui(frame: &mut Frame, engine: &Engine<Page>) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [status_area, page_area, help_area] = layout.areas(frame.area());

    let page = engine.host();
    let focused = engine.focus_state().element();

    let mut status = StatusBar::new(
        page.title().to_string(),
        focused.and_then(|e| page.node(e)).map(|n| n.display_label()),
        page.last_activation().map(str::to_string),
    );
    status.render(frame, status_area);

    let boxes = engine
        .snapshot()
        .into_iter()
        .filter_map(|candidate| {
            let node = page.node(candidate.element())?;
            Some(ElementBox {
                label: node.display_label(),
                rect: candidate.rect(),
                focused: Some(candidate.element()) == focused,
            })
        })
        .collect();
    PageView::new(boxes).render(frame, page_area);

    frame.render_widget(
        Span::styled(HELP, Style::default().fg(Color::DarkGray)),
        help_area,
    );
}

/// Shown while the page has not rendered yet or first focus is settling.
pub fn draw_waiting(frame: &mut Frame, title: &str) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [status_area, page_area, help_area] = layout.areas(frame.area());

    let mut status = StatusBar::new(
        title.to_string(),
        None,
        Some("Waiting for page".to_string()),
    );
    status.render(frame, status_area);

    let waiting = Paragraph::new("Waiting for the page to render…")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(waiting, page_area);

    frame.render_widget(
        Span::styled("q quit", Style::default().fg(Color::DarkGray)),
        help_area,
    );
}
