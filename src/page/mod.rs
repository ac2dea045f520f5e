//! # In-Memory Page Host
//!
//! A small document model that implements [`Host`], so the engine can run
//! without a browser. Pages are TOML files (see [`document`]); links between
//! them give it real history, and a `video` element gives it something for
//! the play overlay to drive.
//!
//! ## Element handles
//!
//! Handles carry the generation of the document they were issued for. Loading
//! another document (navigation, back, reload) bumps the generation, so any
//! handle the engine still holds stops being [`Host::contains`]-ed instead of
//! silently pointing at an unrelated element of the new page.
//!
//! ## Mutation signal
//!
//! Structural changes (a new document, an overlay appended) bump a counter
//! the embedding loop drains with [`Page::take_mutations`] and forwards to
//! [`crate::core::Engine::on_mutation`]. Attribute writes (tab index, classes)
//! do not count, just as a child-list observer would not see them.

pub mod document;
pub mod selector;

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::core::geometry::Rect;
use crate::core::host::Host;
use crate::page::document::{Document, Node};
use crate::page::selector::{Selector, SelectorError};

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum PageError {
    Io(PathBuf, io::Error),
    Parse(toml::de::Error),
    UnknownParent { element: String, parent: String },
    DuplicateId(String),
    Selector(SelectorError),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::Io(path, e) => write!(f, "cannot read page {}: {e}", path.display()),
            PageError::Parse(e) => write!(f, "page parse error: {e}"),
            PageError::UnknownParent { element, parent } => {
                write!(f, "element {element:?} names unknown parent {parent:?}")
            }
            PageError::DuplicateId(id) => write!(f, "duplicate element id {id:?}"),
            PageError::Selector(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PageError {}

/// Checks that every selector in `selectors` is in the supported subset.
pub fn validate_selectors(selectors: &[String]) -> Result<(), PageError> {
    for s in selectors {
        selector::parse_list(s).map_err(PageError::Selector)?;
    }
    Ok(())
}

// ============================================================================
// Page
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    generation: u32,
    index: usize,
}

pub struct Page {
    /// File the current document came from; `None` for in-memory sources.
    path: Option<PathBuf>,
    source: String,
    doc: Document,
    generation: u32,
    history: Vec<PathBuf>,
    active: Option<usize>,
    mutations: u64,
    last_activation: Option<String>,
}

impl Page {
    /// Builds a page from TOML source with no backing file.
    pub fn parse(source: &str) -> Result<Self, PageError> {
        let doc = Document::parse(source)?;
        Ok(Self::with_document(None, source.to_string(), doc))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PageError> {
        let path = path.as_ref().to_path_buf();
        let (source, doc) = read_document(&path)?;
        info!("Loaded page {} ({} elements)", path.display(), doc.nodes.len());
        Ok(Self::with_document(Some(path), source, doc))
    }

    fn with_document(path: Option<PathBuf>, source: String, doc: Document) -> Self {
        Self {
            path,
            source,
            doc,
            generation: 0,
            history: Vec::new(),
            active: None,
            mutations: 1,
            last_activation: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.doc.title
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn last_activation(&self) -> Option<&str> {
        self.last_activation.as_deref()
    }

    /// Drains the pending mutation count. Non-zero means "something changed".
    pub fn take_mutations(&mut self) -> u64 {
        std::mem::take(&mut self.mutations)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index(id).map(|i| &self.doc.nodes[i])
    }

    /// First element with the given `id` attribute.
    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.doc
            .order
            .iter()
            .find(|&&i| self.doc.nodes[i].id.as_deref() == Some(id))
            .map(|&i| self.handle(i))
    }

    pub fn is_playing(&self) -> bool {
        self.doc.nodes.iter().any(|n| n.tag == "video" && n.playing)
    }

    fn handle(&self, index: usize) -> NodeId {
        NodeId {
            generation: self.generation,
            index,
        }
    }

    fn index(&self, id: NodeId) -> Option<usize> {
        (id.generation == self.generation && id.index < self.doc.nodes.len()).then_some(id.index)
    }

    /// Swaps in a new document and signals the change.
    fn replace(&mut self, path: Option<PathBuf>, source: String, doc: Document) {
        self.path = path;
        self.source = source;
        self.doc = doc;
        self.generation += 1;
        self.active = None;
        self.mutations += 1;
    }

    fn navigate(&mut self, href: &str) {
        let target = match &self.path {
            Some(current) => current.parent().unwrap_or(Path::new("")).join(href),
            None => PathBuf::from(href),
        };
        match read_document(&target) {
            Ok((source, doc)) => {
                if let Some(current) = self.path.clone() {
                    self.history.push(current);
                }
                info!("Navigated to {}", target.display());
                self.replace(Some(target), source, doc);
                self.last_activation = None;
            }
            Err(e) => {
                warn!("Navigation to {} failed: {}", target.display(), e);
                self.last_activation = Some(format!("Could not open {href}"));
            }
        }
    }
}

fn read_document(path: &Path) -> Result<(String, Document), PageError> {
    let source = fs::read_to_string(path).map_err(|e| PageError::Io(path.to_path_buf(), e))?;
    let doc = Document::parse(&source)?;
    Ok((source, doc))
}

impl Host for Page {
    type Element = NodeId;

    /// Ready once the document has any content at all.
    fn is_ready(&self) -> bool {
        !self.doc.order.is_empty()
    }

    fn query(&self, selectors: &[String]) -> Vec<NodeId> {
        let parsed: Vec<Selector> = selectors
            .iter()
            .filter_map(|s| match selector::parse_list(s) {
                Ok(list) => Some(list),
                Err(e) => {
                    warn!("Skipping selector: {}", e);
                    None
                }
            })
            .flatten()
            .collect();

        self.doc
            .order
            .iter()
            .filter(|&&i| parsed.iter().any(|s| s.matches(&self.doc.nodes[i])))
            .map(|&i| self.handle(i))
            .collect()
    }

    fn contains(&self, element: NodeId) -> bool {
        self.index(element).is_some()
    }

    fn rect(&self, element: NodeId) -> Option<Rect> {
        self.node(element).map(|n| n.rect)
    }

    fn is_hidden(&self, element: NodeId) -> bool {
        self.index(element).is_some_and(|i| self.doc.is_hidden(i))
    }

    fn has_class(&self, element: NodeId, class: &str) -> bool {
        self.node(element)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, element: NodeId, class: &str) {
        if let Some(i) = self.index(element) {
            let classes = &mut self.doc.nodes[i].classes;
            if !classes.iter().any(|c| c == class) {
                classes.push(class.to_string());
            }
        }
    }

    fn tab_index(&self, element: NodeId) -> Option<i32> {
        self.node(element).and_then(|n| n.tab_index)
    }

    fn set_tab_index(&mut self, element: NodeId, index: i32) {
        if let Some(i) = self.index(element) {
            self.doc.nodes[i].tab_index = Some(index);
        }
    }

    fn focus(&mut self, element: NodeId) {
        if let Some(i) = self.index(element) {
            self.active = Some(i);
        }
    }

    fn active_element(&self) -> Option<NodeId> {
        self.active.map(|i| self.handle(i))
    }

    fn click(&mut self, element: NodeId) {
        let Some(i) = self.index(element) else {
            return;
        };
        let node = &mut self.doc.nodes[i];
        debug!("Click on {}", node.display_label());

        if let Some(href) = node.href.clone() {
            self.navigate(&href);
        } else if node.tag == "video" {
            node.playing = !node.playing;
            self.last_activation = Some(if node.playing { "Playing" } else { "Paused" }.to_string());
        } else {
            self.last_activation = Some(format!("Activated {}", node.display_label()));
        }
    }

    fn history_back(&mut self) -> bool {
        let Some(previous) = self.history.pop() else {
            return false;
        };
        match read_document(&previous) {
            Ok((source, doc)) => {
                info!("Back to {}", previous.display());
                self.replace(Some(previous), source, doc);
                self.last_activation = None;
                true
            }
            Err(e) => {
                warn!("Back navigation to {} failed: {}", previous.display(), e);
                false
            }
        }
    }

    fn reload(&mut self) {
        let reloaded = match &self.path {
            Some(path) => read_document(path),
            None => Document::parse(&self.source).map(|doc| (self.source.clone(), doc)),
        };
        match reloaded {
            Ok((source, doc)) => {
                let path = self.path.clone();
                self.replace(path, source, doc);
                self.last_activation = Some("Reloaded".to_string());
            }
            Err(e) => {
                warn!("Reload failed: {}", e);
                self.last_activation = Some("Reload failed".to_string());
            }
        }
    }

    fn media_element(&self) -> Option<NodeId> {
        self.doc
            .order
            .iter()
            .find(|&&i| self.doc.nodes[i].tag == "video")
            .map(|&i| self.handle(i))
    }

    fn media_control(&self, media: NodeId) -> Option<NodeId> {
        let container = self.doc.nodes[self.index(media)?].parent?;
        self.doc
            .order
            .iter()
            .find(|&&i| self.doc.nodes[i].tag == "button" && self.doc.is_within(i, container))
            .map(|&i| self.handle(i))
    }

    fn create_overlay(&mut self, media: NodeId, marker: &str, id: &str) -> Option<NodeId> {
        let container = self.doc.nodes[self.index(media)?].parent?;
        let rect = self.doc.nodes[container].rect;
        let index = self.doc.append(Node {
            id: Some(id.to_string()),
            tag: "div".to_string(),
            classes: vec![marker.to_string()],
            rect,
            tab_index: Some(0),
            label: Some("▶".to_string()),
            parent: Some(container),
            ..Node::default()
        });
        self.mutations += 1;
        Some(self.handle(index))
    }
}
