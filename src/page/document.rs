//! # Page Documents
//!
//! The on-disk page format and the flat node arena it loads into.
//!
//! ```toml
//! title = "Channels"
//!
//! [[element]]
//! id = "player"
//! tag = "div"
//! rect = [0, 0, 640, 360]
//!
//! [[element]]
//! tag = "video"
//! parent = "player"
//! rect = [0, 0, 640, 360]
//!
//! [[element]]
//! tag = "a"
//! class = ["channel-card"]
//! label = "News"
//! href = "news.toml"
//! rect = [0, 400, 200, 120]
//! ```
//!
//! File order is document order. A `parent` must name an element that
//! appears earlier in the file.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::core::geometry::Rect;
use crate::page::PageError;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PageFile {
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "element")]
    pub elements: Vec<ElementSpec>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ElementSpec {
    pub id: Option<String>,
    pub tag: String,
    #[serde(default)]
    pub class: Vec<String>,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// `[left, top, width, height]`; omitted means not laid out yet.
    #[serde(default)]
    pub rect: [f64; 4],
    #[serde(default)]
    pub hidden: bool,
    pub tabindex: Option<i32>,
    pub label: Option<String>,
    pub href: Option<String>,
    pub parent: Option<String>,
}

/// One element of a loaded document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub id: Option<String>,
    pub tag: String,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub rect: Rect,
    pub hidden: bool,
    pub tab_index: Option<i32>,
    pub label: Option<String>,
    pub href: Option<String>,
    /// Arena index of the parent node.
    pub parent: Option<usize>,
    pub playing: bool,
}

impl Node {
    /// Attribute lookup as a selector sees it. `id`, `class`, `href` and
    /// `tabindex` are reflected from their dedicated fields.
    pub fn attr(&self, name: &str) -> Option<String> {
        match name {
            "id" => self.id.clone(),
            "class" => (!self.classes.is_empty()).then(|| self.classes.join(" ")),
            "href" => self.href.clone(),
            "tabindex" => self.tab_index.map(|t| t.to_string()),
            _ => self.attrs.get(name).cloned(),
        }
    }

    /// Text shown for this element in the UI.
    pub fn display_label(&self) -> String {
        self.label
            .clone()
            .or_else(|| self.id.clone())
            .unwrap_or_else(|| self.tag.clone())
    }
}

/// Nodes in an arena plus their document order.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub title: String,
    pub nodes: Vec<Node>,
    pub order: Vec<usize>,
}

impl Document {
    pub fn parse(source: &str) -> Result<Self, PageError> {
        let file: PageFile = toml::from_str(source).map_err(PageError::Parse)?;
        Self::build(file)
    }

    pub fn build(file: PageFile) -> Result<Self, PageError> {
        let mut ids: HashMap<String, usize> = HashMap::new();
        let mut nodes = Vec::with_capacity(file.elements.len());

        for spec in file.elements {
            let parent = match &spec.parent {
                Some(name) => Some(*ids.get(name).ok_or_else(|| PageError::UnknownParent {
                    element: spec.id.clone().unwrap_or_else(|| spec.tag.clone()),
                    parent: name.clone(),
                })?),
                None => None,
            };
            if let Some(id) = &spec.id {
                if ids.contains_key(id) {
                    return Err(PageError::DuplicateId(id.clone()));
                }
                ids.insert(id.clone(), nodes.len());
            }
            let [left, top, width, height] = spec.rect;
            nodes.push(Node {
                id: spec.id,
                tag: spec.tag.to_ascii_lowercase(),
                classes: spec.class,
                attrs: spec.attrs,
                rect: Rect::new(left, top, width, height),
                hidden: spec.hidden,
                tab_index: spec.tabindex,
                label: spec.label,
                href: spec.href,
                parent,
                playing: false,
            });
        }

        Ok(Self {
            title: file.title,
            order: (0..nodes.len()).collect(),
            nodes,
        })
    }

    /// Whether `node` is `ancestor` or lies beneath it.
    pub fn is_within(&self, node: usize, ancestor: usize) -> bool {
        let mut cursor = Some(node);
        while let Some(i) = cursor {
            if i == ancestor {
                return true;
            }
            cursor = self.nodes[i].parent;
        }
        false
    }

    /// Visibility inherits: a node is hidden if it or any ancestor is.
    pub fn is_hidden(&self, node: usize) -> bool {
        let mut cursor = Some(node);
        while let Some(i) = cursor {
            if self.nodes[i].hidden {
                return true;
            }
            cursor = self.nodes[i].parent;
        }
        false
    }

    /// Appends `node` as the last child of its parent: right after the
    /// parent's last descendant in document order.
    pub fn append(&mut self, node: Node) -> usize {
        let index = self.nodes.len();
        let position = match node.parent {
            Some(parent) => self
                .order
                .iter()
                .rposition(|&i| self.is_within(i, parent))
                .map_or(self.order.len(), |p| p + 1),
            None => self.order.len(),
        };
        self.nodes.push(node);
        self.order.insert(position, index);
        index
    }
}
