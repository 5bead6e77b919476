//! Minimal mutable element tree standing in for the host document.
//!
//! Widgets only ever look elements up by class name, read and write
//! attributes, and toggle classes, so that is all the tree supports.

use std::collections::BTreeMap;

use scraper::{ElementRef, Html};

/// Handle to an element inside one [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>, // everything except `class`
    text: String,                         // own text, children excluded
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            text: String::new(),
            parent,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document holding only the synthetic root.
    pub fn new() -> Self {
        Self { nodes: vec![Element::new("#document", None)] }
    }

    /// Parses an HTML page into a document. Parsing never fails; malformed
    /// markup is repaired the way browsers repair it.
    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        let mut document = Self::new();
        let root = document.root();
        document.import(root, parsed.root_element());
        document
    }

    fn import(&mut self, parent: NodeId, element: ElementRef<'_>) {
        let value = element.value();
        let id = self.append(parent, value.name());
        for class in value.classes() {
            self.add_class(id, class);
        }
        for (name, attr) in value.attrs() {
            if name != "class" {
                self.set_attribute(id, name, attr);
            }
        }

        let mut text = Vec::new();
        for child in element.children() {
            if let Some(child_element) = ElementRef::wrap(child) {
                self.import(id, child_element);
            } else if let Some(chunk) = child.value().as_text() {
                let chunk = chunk.trim();
                if !chunk.is_empty() {
                    text.push(chunk.to_string());
                }
            }
        }
        self.nodes[id.0].text = text.join(" ");
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Appends a new element as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Element::new(tag, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Appends a child carrying the given classes. Shorthand for building
    /// pages by hand.
    pub fn append_with_classes(&mut self, parent: NodeId, tag: &str, classes: &[&str]) -> NodeId {
        let id = self.append(parent, tag);
        for class in classes {
            self.add_class(id, class);
        }
        id
    }

    pub fn tag(&self, id: NodeId) -> &str {
        &self.nodes[id.0].tag
    }

    pub fn text(&self, id: NodeId) -> &str {
        &self.nodes[id.0].text
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) {
        self.nodes[id.0].text = text.to_string();
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn classes(&self, id: NodeId) -> impl Iterator<Item = &str> {
        self.nodes[id.0].classes.iter().map(String::as_str)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.nodes[id.0].classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if !self.has_class(id, class) {
            self.nodes[id.0].classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        self.nodes[id.0].classes.retain(|c| c != class);
    }

    /// Adds `class` when `on` is true, removes it otherwise.
    pub fn toggle_class(&mut self, id: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id.0].attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        self.nodes[id.0].attributes.insert(name.to_string(), value.to_string());
    }

    /// Descendants of `scope` in document order, `scope` itself excluded.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            found.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        found
    }

    /// First descendant of `scope` carrying `class`, in document order.
    pub fn query_class(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(scope).into_iter().find(|&id| self.has_class(id, class))
    }

    /// Every descendant of `scope` carrying `class`, in document order.
    pub fn query_class_all(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&id| self.has_class(id, class))
            .collect()
    }

    /// First descendant of `scope` with the given tag name.
    pub fn query_tag(&self, scope: NodeId, tag: &str) -> Option<NodeId> {
        self.descendants(scope).into_iter().find(|&id| self.tag(id) == tag)
    }

    /// True when `node` is `ancestor` or lies somewhere below it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Own text of `scope` followed by the text of its descendants.
    pub fn text_content(&self, scope: NodeId) -> String {
        std::iter::once(scope)
            .chain(self.descendants(scope))
            .map(|id| self.text(id))
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <header class="site-header" aria-expanded="false">
            <button class="nav-toggle menu">Menu</button>
            <nav><a href="/">Home</a><a href="/about">About</a></nav>
          </header>
          <div class="gallery">
            <div class="slide one">First <b>bold</b></div>
            <div class="slide two">Second</div>
          </div>
        </body></html>
    "#;

    #[test]
    fn parse_keeps_classes_attributes_and_text() {
        let doc = Document::parse(PAGE);
        let header = doc.query_class(doc.root(), "site-header").unwrap();
        assert_eq!(doc.tag(header), "header");
        assert_eq!(doc.attribute(header, "aria-expanded"), Some("false"));
        assert_eq!(doc.attribute(header, "class"), None);

        let button = doc.query_class(header, "nav-toggle").unwrap();
        assert!(doc.has_class(button, "menu"));
        assert_eq!(doc.text(button), "Menu");
    }

    #[test]
    fn query_all_returns_document_order() {
        let doc = Document::parse(PAGE);
        let slides = doc.query_class_all(doc.root(), "slide");
        assert_eq!(slides.len(), 2);
        assert!(doc.has_class(slides[0], "one"));
        assert!(doc.has_class(slides[1], "two"));
        assert_eq!(doc.text_content(slides[0]), "First bold");
    }

    #[test]
    fn query_is_scoped_to_descendants() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.append_with_classes(root, "div", &["box"]);
        let b = doc.append_with_classes(root, "div", &["box"]);
        let inner = doc.append_with_classes(b, "span", &["target"]);

        assert_eq!(doc.query_class(a, "target"), None);
        assert_eq!(doc.query_class(b, "target"), Some(inner));
        assert_eq!(doc.query_class(b, "box"), None);
        assert!(doc.contains(b, inner));
        assert!(doc.contains(inner, inner));
        assert!(!doc.contains(a, inner));
    }

    #[test]
    fn toggle_class_is_idempotent() {
        let mut doc = Document::new();
        let root = doc.root();
        let el = doc.append(root, "div");
        doc.toggle_class(el, "is-active", true);
        doc.toggle_class(el, "is-active", true);
        assert_eq!(doc.classes(el).count(), 1);
        doc.toggle_class(el, "is-active", false);
        assert!(!doc.has_class(el, "is-active"));
    }
}
