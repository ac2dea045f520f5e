//! # Geometry Filter
//!
//! Decides which raw candidates are visually eligible for navigation.
//!
//! An element is eligible iff its bounding box is strictly larger than
//! `min_size` in both dimensions and its computed visibility is not hidden.
//! Nothing else is consulted (no opacity, no disabled state, no occlusion).
//! Zero-sized elements, which are usually still waiting for layout, fall out
//! naturally.

use serde::{Deserialize, Serialize};

use crate::core::host::Host;

/// Default size threshold, in page units, for both width and height.
pub const DEFAULT_MIN_SIZE: f64 = 30.0;

/// A rendered bounding box in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// An element that passed the eligibility check, together with the rect it
/// had when checked. Only [`eligible`] constructs these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigableElement<E> {
    element: E,
    rect: Rect,
}

impl<E: Copy> NavigableElement<E> {
    pub fn element(&self) -> E {
        self.element
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }
}

/// Filters `raw` down to the elements that are large enough and not hidden.
///
/// Order is preserved, so document order in means document order out.
/// Detached handles (no rect) are dropped.
pub fn eligible<H, I>(host: &H, raw: I, min_size: f64) -> Vec<NavigableElement<H::Element>>
where
    H: Host,
    I: IntoIterator<Item = H::Element>,
{
    raw.into_iter()
        .filter_map(|element| {
            let rect = host.rect(element)?;
            let big_enough = rect.width > min_size && rect.height > min_size;
            (big_enough && !host.is_hidden(element)).then_some(NavigableElement { element, rect })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestHost;

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(rect.center(), (60.0, 40.0));
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 60.0);
    }

    #[test]
    fn test_eligible_keeps_large_visible_elements() {
        let mut host = TestHost::new();
        let a = host.add(Rect::new(0.0, 0.0, 100.0, 100.0));
        let b = host.add(Rect::new(200.0, 0.0, 31.0, 31.0));

        let pool = eligible(&host, [a, b], DEFAULT_MIN_SIZE);
        let ids: Vec<_> = pool.iter().map(|n| n.element()).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(pool[1].rect(), Rect::new(200.0, 0.0, 31.0, 31.0));
    }

    #[test]
    fn test_eligible_threshold_is_strict() {
        let mut host = TestHost::new();
        let exact_width = host.add(Rect::new(0.0, 0.0, 30.0, 100.0));
        let exact_height = host.add(Rect::new(0.0, 0.0, 100.0, 30.0));
        let zero = host.add(Rect::new(0.0, 0.0, 0.0, 0.0));

        assert!(eligible(&host, [exact_width, exact_height, zero], DEFAULT_MIN_SIZE).is_empty());
    }

    #[test]
    fn test_eligible_drops_hidden() {
        let mut host = TestHost::new();
        let hidden = host.add(Rect::new(0.0, 0.0, 100.0, 100.0));
        host.set_hidden(hidden, true);

        assert!(eligible(&host, [hidden], DEFAULT_MIN_SIZE).is_empty());
    }

    #[test]
    fn test_eligible_drops_detached() {
        let mut host = TestHost::new();
        let gone = host.add(Rect::new(0.0, 0.0, 100.0, 100.0));
        host.remove(gone);

        assert!(eligible(&host, [gone], DEFAULT_MIN_SIZE).is_empty());
    }

    #[test]
    fn test_eligible_empty_input() {
        let host = TestHost::new();
        assert!(eligible(&host, Vec::new(), DEFAULT_MIN_SIZE).is_empty());
    }

    #[test]
    fn test_custom_min_size() {
        let mut host = TestHost::new();
        let small = host.add(Rect::new(0.0, 0.0, 12.0, 12.0));
        assert_eq!(eligible(&host, [small], 10.0).len(), 1);
        assert!(eligible(&host, [small], 12.0).is_empty());
    }
}
