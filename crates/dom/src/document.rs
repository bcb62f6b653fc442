//! Retained element tree.
//!
//! Elements live in a slot map and are addressed by generational handles.
//! Removing an element (clearing its parent, or replacing its parent's text)
//! frees its whole subtree; handles that still point at a freed slot are
//! stale and every operation on them is a no-op, the same way mutating a
//! detached DOM node has no visible effect.

use log::{debug, warn};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to an element in a [`Document`].
    pub struct ElementId;
}

/// The capability surface the actuator renders through.
///
/// Selectors are either `.class` or a bare tag name.
pub trait Surface {
    fn create_element(&mut self, tag: &str) -> ElementId;
    fn append_child(&mut self, parent: ElementId, child: ElementId);
    /// Remove every child of `el`.
    fn clear_children(&mut self, el: ElementId);
    /// Replace the whole class attribute.
    fn set_class_name(&mut self, el: ElementId, class_name: &str);
    fn add_class(&mut self, el: ElementId, class: &str);
    fn remove_class(&mut self, el: ElementId, class: &str);
    /// Replace the children of `el` with a single run of text.
    fn set_text_content(&mut self, el: ElementId, text: &str);
    /// First attached element matching `selector`, in document order.
    fn query_selector(&self, selector: &str) -> Option<ElementId>;
    /// First descendant of `scope` matching `selector`.
    fn find_descendant(&self, scope: ElementId, selector: &str) -> Option<ElementId>;
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    classes: Vec<String>,
    text: String,
    children: Vec<ElementId>,
    parent: Option<ElementId>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
            parent: None,
        }
    }

    fn matches(&self, selector: Selector<'_>) -> bool {
        match selector {
            Selector::Class(class) => self.classes.iter().any(|c| c == class),
            Selector::Tag(tag) => self.tag.eq_ignore_ascii_case(tag),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Selector<'a> {
    Class(&'a str),
    Tag(&'a str),
}

impl<'a> Selector<'a> {
    fn parse(selector: &'a str) -> Self {
        let selector = selector.trim();
        match selector.strip_prefix('.') {
            Some(class) => Selector::Class(class),
            None => Selector::Tag(selector),
        }
    }
}

/// In-memory document with a `body` root.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: SlotMap<ElementId, Node>,
    root: ElementId,
    revision: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new("body"));
        Self {
            nodes,
            root,
            revision: 0,
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Counter bumped by every mutation. Cheap change detection for repaints.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of live elements, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_alive(&self, el: ElementId) -> bool {
        self.node(el).is_some()
    }

    pub fn tag(&self, el: ElementId) -> Option<&str> {
        self.node(el).map(|n| n.tag.as_str())
    }

    pub fn class_list(&self, el: ElementId) -> &[String] {
        self.node(el).map(|n| n.classes.as_slice()).unwrap_or(&[])
    }

    pub fn class_name(&self, el: ElementId) -> String {
        self.class_list(el).join(" ")
    }

    pub fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.class_list(el).iter().any(|c| c == class)
    }

    /// The element's own text, excluding children.
    pub fn text(&self, el: ElementId) -> &str {
        self.node(el).map(|n| n.text.as_str()).unwrap_or("")
    }

    /// Own text followed by the text of every descendant.
    pub fn text_content(&self, el: ElementId) -> String {
        let mut out = String::new();
        self.collect_text(el, &mut out);
        out
    }

    pub fn children(&self, el: ElementId) -> &[ElementId] {
        self.node(el).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.node(el).and_then(|n| n.parent)
    }

    /// Every attached element matching `selector`, in document order.
    pub fn query_selector_all(&self, selector: &str) -> Vec<ElementId> {
        let selector = Selector::parse(selector);
        let mut out = Vec::new();
        self.walk(self.root, &mut |id, node| {
            if node.matches(selector) {
                out.push(id);
            }
            true
        });
        out
    }

    fn collect_text(&self, el: ElementId, out: &mut String) {
        if let Some(node) = self.node(el) {
            out.push_str(&node.text);
            for &child in &node.children {
                self.collect_text(child, out);
            }
        }
    }

    /// Pre-order walk; the visitor returns `false` to stop.
    fn walk(&self, start: ElementId, visit: &mut impl FnMut(ElementId, &Node) -> bool) -> bool {
        let Some(node) = self.node(start) else {
            return true;
        };
        if !visit(start, node) {
            return false;
        }
        for &child in &node.children {
            if !self.walk(child, visit) {
                return false;
            }
        }
        true
    }

    fn find_from(&self, start: ElementId, selector: &str, include_start: bool) -> Option<ElementId> {
        let selector = Selector::parse(selector);
        let mut found = None;
        self.walk(start, &mut |id, node| {
            if (include_start || id != start) && node.matches(selector) {
                found = Some(id);
                return false;
            }
            true
        });
        found
    }

    fn node(&self, el: ElementId) -> Option<&Node> {
        self.nodes.get(el)
    }

    fn node_mut(&mut self, el: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(el)
    }

    fn free_subtree(&mut self, el: ElementId) {
        let mut stack = vec![el];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.remove(id) {
                stack.extend(node.children);
            }
        }
    }

    fn detach(&mut self, child: ElementId) {
        let Some(parent) = self.parent(child) else {
            return;
        };
        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|&c| c != child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = None;
        }
    }

    fn is_inclusive_ancestor(&self, candidate: ElementId, of: ElementId) -> bool {
        let mut cur = Some(of);
        while let Some(id) = cur {
            if id == candidate {
                return true;
            }
            cur = self.parent(id);
        }
        false
    }

    fn remove_children(&mut self, el: ElementId) -> bool {
        let Some(node) = self.node_mut(el) else {
            return false;
        };
        let children = std::mem::take(&mut node.children);
        for child in children {
            self.free_subtree(child);
        }
        true
    }
}

impl Surface for Document {
    fn create_element(&mut self, tag: &str) -> ElementId {
        self.revision += 1;
        self.nodes.insert(Node::new(tag))
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if !self.is_alive(parent) || !self.is_alive(child) {
            debug!("append_child on stale element ignored");
            return;
        }
        if self.is_inclusive_ancestor(child, parent) {
            warn!("append_child would create a cycle; ignored");
            return;
        }
        self.detach(child);
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        self.revision += 1;
    }

    fn clear_children(&mut self, el: ElementId) {
        if self.remove_children(el) {
            self.revision += 1;
        } else {
            debug!("clear_children on stale element ignored");
        }
    }

    fn set_class_name(&mut self, el: ElementId, class_name: &str) {
        let Some(node) = self.node_mut(el) else {
            debug!("set_class_name on stale element ignored");
            return;
        };
        node.classes = class_name.split_whitespace().map(str::to_string).collect();
        self.revision += 1;
    }

    fn add_class(&mut self, el: ElementId, class: &str) {
        let Some(node) = self.node_mut(el) else {
            return;
        };
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
            self.revision += 1;
        }
    }

    fn remove_class(&mut self, el: ElementId, class: &str) {
        let Some(node) = self.node_mut(el) else {
            return;
        };
        let before = node.classes.len();
        node.classes.retain(|c| c != class);
        if node.classes.len() != before {
            self.revision += 1;
        }
    }

    fn set_text_content(&mut self, el: ElementId, text: &str) {
        if !self.remove_children(el) {
            debug!("set_text_content on stale element ignored");
            return;
        }
        if let Some(node) = self.node_mut(el) {
            node.text.clear();
            node.text.push_str(text);
        }
        self.revision += 1;
    }

    fn query_selector(&self, selector: &str) -> Option<ElementId> {
        self.find_from(self.root, selector, true)
    }

    fn find_descendant(&self, scope: ElementId, selector: &str) -> Option<ElementId> {
        self.find_from(scope, selector, false)
    }
}
