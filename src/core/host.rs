//! # Host Seam
//!
//! The engine never owns the page. Everything it knows about elements, and
//! every side effect it causes, goes through this trait. A browser binding,
//! the in-memory [`crate::page::Page`], and the test host all implement it.

use std::fmt::Debug;
use std::hash::Hash;

use crate::core::geometry::Rect;

pub trait Host {
    /// Opaque handle to a page element. Handles may outlive the element they
    /// name; [`Host::contains`] tells whether one is still live.
    type Element: Copy + Eq + Hash + Debug;

    /// True once the host's initial content has rendered.
    fn is_ready(&self) -> bool;

    /// Elements matching any of `selectors`, in document order, without duplicates.
    fn query(&self, selectors: &[String]) -> Vec<Self::Element>;

    fn contains(&self, element: Self::Element) -> bool;

    /// Current bounding box. `None` when the handle is detached.
    fn rect(&self, element: Self::Element) -> Option<Rect>;

    /// Computed visibility, including inherited visibility.
    fn is_hidden(&self, element: Self::Element) -> bool;

    fn has_class(&self, element: Self::Element, class: &str) -> bool;
    fn add_class(&mut self, element: Self::Element, class: &str);

    /// Explicit tab index, `None` when the element has none.
    fn tab_index(&self, element: Self::Element) -> Option<i32>;
    fn set_tab_index(&mut self, element: Self::Element, index: i32);

    /// Platform focus primitive.
    fn focus(&mut self, element: Self::Element);

    /// Whatever currently holds platform focus.
    fn active_element(&self) -> Option<Self::Element>;

    /// Platform activation primitive.
    fn click(&mut self, element: Self::Element);

    /// Navigates back. Returns false when there is no history to go back to.
    fn history_back(&mut self) -> bool;

    fn reload(&mut self);

    /// The page's media playback element, if any.
    fn media_element(&self) -> Option<Self::Element>;

    /// A page-provided control that drives `media` (first button in its container).
    fn media_control(&self, media: Self::Element) -> Option<Self::Element>;

    /// Creates an overlay covering `media`'s container, carrying `marker` as a
    /// class and `id` as its id. `None` when `media` has no container.
    fn create_overlay(
        &mut self,
        media: Self::Element,
        marker: &str,
        id: &str,
    ) -> Option<Self::Element>;
}
