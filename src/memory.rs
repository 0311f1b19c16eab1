//! In-process implementations of the host contracts.
//!
//! [`MemoryDocument`] is a flat element tree with just enough selector support
//! for theme bindings: compound simple selectors (`button.theme-buttons`,
//! `#next`, `[data-theme=dark]`) and comma-separated lists. Combinators are
//! not supported; a selector using them matches nothing, the same way an
//! invalid selector yields no elements in the browser.
//!
//! [`MemoryStore`] is a string map that can be told to reject writes.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};

use crate::error::StorageError;
use crate::host::{Document, PreferenceStore};

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

/// Handle to an element inside a [`MemoryDocument`].
pub type NodeId = usize;

#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    parent: Option<NodeId>,
}

/// Element tree rooted at an `<html>` node ([`MemoryDocument::ROOT`]).
#[derive(Debug)]
pub struct MemoryDocument {
    nodes: RefCell<Vec<Node>>,
    media: RefCell<HashMap<String, bool>>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    pub const ROOT: NodeId = 0;

    #[must_use]
    pub fn new() -> Self {
        let root = Node { tag: "html".into(), ..Node::default() };
        Self { nodes: RefCell::new(vec![root]), media: RefCell::new(HashMap::new()) }
    }

    /// Append a new `tag` element under `parent` and return its handle.
    pub fn append(&self, parent: NodeId, tag: &str) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(Node { tag: tag.to_ascii_lowercase(), parent: Some(parent), ..Node::default() });
        nodes.len() - 1
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(node) {
            node.attributes.insert(name.to_owned(), value.to_owned());
        }
    }

    /// Record the result a media query should report.
    pub fn set_media(&self, query: &str, matches: bool) {
        self.media.borrow_mut().insert(query.to_owned(), matches);
    }

    fn is_descendant(nodes: &[Node], scope: NodeId, mut node: NodeId) -> bool {
        while let Some(parent) = nodes.get(node).and_then(|n| n.parent) {
            if parent == scope {
                return true;
            }
            node = parent;
        }
        false
    }

    fn select(&self, selector: &str, mut keep: impl FnMut(&[Node], NodeId) -> bool) -> Vec<NodeId> {
        let Some(groups) = parse_selector(selector) else {
            return Vec::new();
        };
        let nodes = self.nodes.borrow();
        (0..nodes.len())
            .filter(|&id| keep(nodes.as_slice(), id) && groups.iter().any(|g| g.matches(&nodes[id])))
            .collect()
    }
}

impl Document for MemoryDocument {
    type Element = NodeId;

    fn root(&self) -> Option<NodeId> {
        Some(Self::ROOT)
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.select(selector, |_, _| true)
    }

    fn query_all_within(&self, scope: &NodeId, selector: &str) -> Vec<NodeId> {
        self.select(selector, |nodes, id| Self::is_descendant(nodes, *scope, id))
    }

    fn classes(&self, element: &NodeId) -> Vec<String> {
        self.nodes.borrow().get(*element).map(|n| n.classes.clone()).unwrap_or_default()
    }

    fn add_class(&self, element: &NodeId, class: &str) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(*element) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_owned());
            }
        }
    }

    fn remove_class(&self, element: &NodeId, class: &str) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(*element) {
            node.classes.retain(|c| c != class);
        }
    }

    fn replace_class(&self, element: &NodeId, old: &str, new: &str) -> bool {
        let mut nodes = self.nodes.borrow_mut();
        let Some(node) = nodes.get_mut(*element) else {
            return false;
        };
        let Some(pos) = node.classes.iter().position(|c| c == old) else {
            return false;
        };
        if node.classes.iter().any(|c| c == new) {
            node.classes.remove(pos);
        } else {
            node.classes[pos] = new.to_owned();
        }
        true
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.nodes.borrow().get(*element)?.attributes.get(name).cloned()
    }

    fn closest(&self, element: &NodeId, selector: &str) -> Option<NodeId> {
        let groups = parse_selector(selector)?;
        let nodes = self.nodes.borrow();
        let mut current = Some(*element);
        while let Some(id) = current {
            let node = nodes.get(id)?;
            if groups.iter().any(|g| g.matches(node)) {
                return Some(id);
            }
            current = node.parent;
        }
        None
    }

    fn contains(&self, scope: &NodeId, element: &NodeId) -> bool {
        scope == element || Self::is_descendant(&self.nodes.borrow(), *scope, *element)
    }

    fn matches_media(&self, query: &str) -> bool {
        self.media.borrow().get(query).copied().unwrap_or(false)
    }
}

// =============================================================================
// Selectors
// =============================================================================

#[derive(Debug, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

impl Compound {
    fn matches(&self, node: &Node) -> bool {
        self.tag.as_ref().map_or(true, |tag| *tag == node.tag)
            && self.id.as_ref().map_or(true, |id| node.attributes.get("id") == Some(id))
            && self.classes.iter().all(|class| node.classes.contains(class))
            && self.attributes.iter().all(|(name, value)| match (node.attributes.get(name), value) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            })
    }
}

fn parse_selector(selector: &str) -> Option<Vec<Compound>> {
    selector.split(',').map(|part| parse_compound(part.trim())).collect()
}

fn parse_compound(raw: &str) -> Option<Compound> {
    if raw.is_empty() {
        return None;
    }
    let mut compound = Compound::default();
    let mut rest = raw;

    let tag_len = ident_len(rest);
    if tag_len > 0 {
        compound.tag = Some(rest[..tag_len].to_ascii_lowercase());
        rest = &rest[tag_len..];
    } else if let Some(stripped) = rest.strip_prefix('*') {
        rest = stripped;
    }

    while let Some(marker) = rest.chars().next() {
        match marker {
            '#' | '.' => {
                let len = ident_len(&rest[1..]);
                if len == 0 {
                    return None;
                }
                let name = rest[1..=len].to_owned();
                if marker == '#' {
                    compound.id = Some(name);
                } else {
                    compound.classes.push(name);
                }
                rest = &rest[1 + len..];
            }
            '[' => {
                let end = rest.find(']')?;
                let inner = &rest[1..end];
                let (name, value) = match inner.split_once('=') {
                    Some((name, value)) => {
                        (name.trim(), Some(value.trim().trim_matches(|c| c == '"' || c == '\'').to_owned()))
                    }
                    None => (inner.trim(), None),
                };
                if name.is_empty() {
                    return None;
                }
                compound.attributes.push((name.to_owned(), value));
                rest = &rest[end + 1..];
            }
            _ => return None,
        }
    }
    Some(compound)
}

fn ident_len(s: &str) -> usize {
    s.find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_')).unwrap_or(s.len())
}

// =============================================================================
// MemoryStore
// =============================================================================

/// String map standing in for `localStorage`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    failing: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value, as if saved in an earlier session.
    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        store
    }

    /// Make every subsequent write fail (quota exceeded, storage disabled).
    pub fn fail_writes(&self, failing: bool) {
        self.failing.set(failing);
    }

    /// Number of successful writes so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failing.get() {
            return Err(StorageError::Write("quota exceeded".into()));
        }
        self.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
