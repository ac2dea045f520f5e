//! # Focusable Registry
//!
//! Derives the live set of navigable elements from page state. Nothing here
//! is cached between calls except the overlay bookkeeping: every
//! [`Registry::snapshot`] re-queries the host and re-runs the Geometry Filter,
//! because the host may rewrite its document wholesale at any time.
//!
//! [`Registry::refresh`] is what the external mutation signal drives. Besides
//! returning a fresh snapshot it decorates new candidates (tab index + marker
//! class, each only when missing) and makes sure the media element, if any,
//! has its play overlay.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, info};

use crate::core::geometry::{self, NavigableElement};
use crate::core::host::Host;

/// Candidate selectors used when the configuration names none.
pub const DEFAULT_CANDIDATE_SELECTORS: &[&str] = &[
    ".back",
    "button",
    "a",
    "[role=\"button\"]",
    "div[onclick]",
    "[jsaction]",
    ".icon-arrow-right",
    ".channel-card",
    "div[class*=\"control\"]",
    "div[class*=\"play\"]",
];

pub const DEFAULT_MARKER_CLASS: &str = "tv-focusable";
pub const DEFAULT_OVERLAY_ID: &str = "tv-play-overlay";

#[derive(Debug, Clone, PartialEq)]
pub struct RegistryOptions {
    /// Page-specific selectors for raw candidates.
    pub candidates: Vec<String>,
    /// Class that marks a decorated candidate.
    pub marker_class: String,
    pub overlay_id: String,
    pub min_size: f64,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            candidates: DEFAULT_CANDIDATE_SELECTORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            marker_class: DEFAULT_MARKER_CLASS.to_string(),
            overlay_id: DEFAULT_OVERLAY_ID.to_string(),
            min_size: geometry::DEFAULT_MIN_SIZE,
        }
    }
}

pub struct Registry<E> {
    options: RegistryOptions,
    marker_selector: Vec<String>,
    /// media element → its overlay
    overlays: HashMap<E, E>,
}

impl<E> Registry<E>
where
    E: Copy + Eq + Hash + Debug,
{
    pub fn new(options: RegistryOptions) -> Self {
        let marker_selector = vec![format!(".{}", options.marker_class)];
        Self {
            options,
            marker_selector,
            overlays: HashMap::new(),
        }
    }

    /// Rescans the page: decorate, provision the overlay, return the eligible set.
    pub fn refresh<H>(&mut self, host: &mut H) -> Vec<NavigableElement<E>>
    where
        H: Host<Element = E>,
    {
        let decorated = self.decorate(host);
        self.ensure_overlay(host);
        let pool = self.snapshot(host);
        debug!(
            "Registry refresh: {} newly decorated, {} eligible",
            decorated,
            pool.len()
        );
        pool
    }

    /// Eligible marked elements in document order.
    pub fn snapshot<H>(&self, host: &H) -> Vec<NavigableElement<E>>
    where
        H: Host<Element = E>,
    {
        geometry::eligible(
            host,
            host.query(&self.marker_selector),
            self.options.min_size,
        )
    }

    /// Marks every raw candidate as sequentially focusable. Returns how many
    /// elements were touched; a second pass over an unchanged page touches none.
    fn decorate<H>(&self, host: &mut H) -> usize
    where
        H: Host<Element = E>,
    {
        let mut touched = 0;
        for element in host.query(&self.options.candidates) {
            let mut changed = false;
            if host.tab_index(element).is_none() {
                host.set_tab_index(element, 0);
                changed = true;
            }
            if !host.has_class(element, &self.options.marker_class) {
                host.add_class(element, &self.options.marker_class);
                changed = true;
            }
            if changed {
                touched += 1;
            }
        }
        touched
    }

    /// Ensures the page's media element has exactly one overlay. Keyed by the
    /// media element's identity, so a new media element (for example after
    /// navigation) gets its own overlay.
    pub fn ensure_overlay<H>(&mut self, host: &mut H) -> Option<E>
    where
        H: Host<Element = E>,
    {
        self.overlays
            .retain(|media, overlay| host.contains(*media) && host.contains(*overlay));

        let media = host.media_element()?;
        if let Some(overlay) = self.overlays.get(&media) {
            return Some(*overlay);
        }

        let overlay =
            host.create_overlay(media, &self.options.marker_class, &self.options.overlay_id)?;
        info!("Created play overlay {:?} for media {:?}", overlay, media);
        self.overlays.insert(media, overlay);
        Some(overlay)
    }

    /// The media element an overlay was created for.
    pub fn media_for_overlay(&self, overlay: E) -> Option<E> {
        self.overlays
            .iter()
            .find_map(|(media, o)| (*o == overlay).then_some(*media))
    }

    /// Activates `target`. Overlays forward to the page's own media control,
    /// or to the media element when the page has no control.
    pub fn activate<H>(&self, host: &mut H, target: E)
    where
        H: Host<Element = E>,
    {
        match self.media_for_overlay(target) {
            Some(media) => {
                let control = host.media_control(media);
                debug!("Overlay activated, forwarding to {:?}", control.unwrap_or(media));
                host.click(control.unwrap_or(media));
            }
            None => host.click(target),
        }
    }
}
