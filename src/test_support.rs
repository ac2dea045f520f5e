//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::geometry::Rect;
use crate::core::host::Host;

#[derive(Debug, Clone)]
pub struct TestElement {
    pub tag: String,
    pub rect: Rect,
    pub hidden: bool,
    pub classes: Vec<String>,
    pub tab_index: Option<i32>,
}

/// A host with a flat element list that records every side effect.
///
/// Selectors are matched loosely: `.name` matches a class, anything else
/// matches the tag exactly.
#[derive(Debug)]
pub struct TestHost {
    pub elements: Vec<Option<TestElement>>,
    pub ready: bool,
    pub active: Option<usize>,
    pub focus_calls: Vec<usize>,
    pub clicks: Vec<usize>,
    pub history: usize,
    pub back_calls: usize,
    pub reloads: usize,
    pub media: Option<usize>,
    pub media_container: Option<Rect>,
    pub control: Option<usize>,
    pub overlays_created: usize,
    pub tab_index_writes: usize,
}

impl Default for TestHost {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            ready: true,
            active: None,
            focus_calls: Vec::new(),
            clicks: Vec::new(),
            history: 0,
            back_calls: 0,
            reloads: 0,
            media: None,
            media_container: None,
            control: None,
            overlays_created: 0,
            tab_index_writes: 0,
        }
    }
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `button` element already carrying the default marker class.
    pub fn add(&mut self, rect: Rect) -> usize {
        let id = self.add_tagged("button", rect);
        self.add_class(id, "tv-focusable");
        id
    }

    /// Adds an undecorated element with the given tag.
    pub fn add_tagged(&mut self, tag: &str, rect: Rect) -> usize {
        self.elements.push(Some(TestElement {
            tag: tag.to_string(),
            rect,
            hidden: false,
            classes: Vec::new(),
            tab_index: None,
        }));
        self.elements.len() - 1
    }

    pub fn set_hidden(&mut self, id: usize, hidden: bool) {
        if let Some(Some(el)) = self.elements.get_mut(id) {
            el.hidden = hidden;
        }
    }

    pub fn set_rect(&mut self, id: usize, rect: Rect) {
        if let Some(Some(el)) = self.elements.get_mut(id) {
            el.rect = rect;
        }
    }

    pub fn remove(&mut self, id: usize) {
        if let Some(slot) = self.elements.get_mut(id) {
            *slot = None;
        }
    }

    fn get(&self, id: usize) -> Option<&TestElement> {
        self.elements.get(id).and_then(Option::as_ref)
    }
}

impl Host for TestHost {
    type Element = usize;

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn query(&self, selectors: &[String]) -> Vec<usize> {
        (0..self.elements.len())
            .filter(|&id| {
                let Some(el) = self.get(id) else {
                    return false;
                };
                selectors.iter().any(|s| match s.strip_prefix('.') {
                    Some(class) => el.classes.iter().any(|c| c == class),
                    None => el.tag == *s,
                })
            })
            .collect()
    }

    fn contains(&self, element: usize) -> bool {
        self.get(element).is_some()
    }

    fn rect(&self, element: usize) -> Option<Rect> {
        self.get(element).map(|el| el.rect)
    }

    fn is_hidden(&self, element: usize) -> bool {
        self.get(element).is_some_and(|el| el.hidden)
    }

    fn has_class(&self, element: usize, class: &str) -> bool {
        self.get(element)
            .is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, element: usize, class: &str) {
        if let Some(Some(el)) = self.elements.get_mut(element)
            && !el.classes.iter().any(|c| c == class)
        {
            el.classes.push(class.to_string());
        }
    }

    fn tab_index(&self, element: usize) -> Option<i32> {
        self.get(element).and_then(|el| el.tab_index)
    }

    fn set_tab_index(&mut self, element: usize, index: i32) {
        if let Some(Some(el)) = self.elements.get_mut(element) {
            el.tab_index = Some(index);
            self.tab_index_writes += 1;
        }
    }

    fn focus(&mut self, element: usize) {
        self.focus_calls.push(element);
        self.active = Some(element);
    }

    fn active_element(&self) -> Option<usize> {
        self.active
    }

    fn click(&mut self, element: usize) {
        self.clicks.push(element);
    }

    fn history_back(&mut self) -> bool {
        self.back_calls += 1;
        if self.history == 0 {
            return false;
        }
        self.history -= 1;
        true
    }

    fn reload(&mut self) {
        self.reloads += 1;
    }

    fn media_element(&self) -> Option<usize> {
        self.media
    }

    fn media_control(&self, _media: usize) -> Option<usize> {
        self.control
    }

    fn create_overlay(&mut self, _media: usize, marker: &str, _id: &str) -> Option<usize> {
        let rect = self.media_container?;
        let id = self.add_tagged("div", rect);
        self.add_class(id, marker);
        self.set_tab_index(id, 0);
        self.overlays_created += 1;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_host_is_ready_and_empty() {
        let host = TestHost::default();
        assert!(host.is_ready());
        assert!(host.query(&[".tv-focusable".to_string()]).is_empty());
        assert_eq!(host.active_element(), None);
    }
}
