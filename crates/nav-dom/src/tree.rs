//! Element tree abstraction and its arena implementation.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`], with an
//! explicit parent link per node. Ancestor lookups are plain walks up the
//! parent chain rather than selector matching.
//!
//! Mutations follow DOM "move" semantics: inserting a node that already has a
//! parent detaches it from that parent first. Removing a node only detaches
//! it; the node (and its subtree) stays in the arena and can be re-inserted.

/// Handle to a node inside an [`ElementTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in its arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Node payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Element with a lowercase tag name and attributes in source order.
    Element {
        /// Tag name.
        tag: String,
        /// Attributes as `(name, value)` pairs.
        attrs: Vec<(String, String)>,
    },
    /// Character data.
    Text(String),
}

/// Mutable element tree.
///
/// Required methods cover node creation, inspection and structural mutation.
/// Provided methods build typed traversals on top of `parent`/`children`.
pub trait ElementTree {
    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> NodeId;

    /// Create a detached text node.
    fn create_text(&mut self, text: &str) -> NodeId;

    /// Tag name, or `None` for text nodes.
    fn tag(&self, node: NodeId) -> Option<&str>;

    /// Character data, or `None` for elements.
    fn text(&self, node: NodeId) -> Option<&str>;

    /// Attributes of an element in insertion order (empty for text nodes).
    fn attrs(&self, node: NodeId) -> &[(String, String)];

    /// Set or overwrite an attribute. No-op on text nodes.
    fn set_attr(&mut self, node: NodeId, name: &str, value: &str);

    /// Remove an attribute if present.
    fn remove_attr(&mut self, node: NodeId, name: &str);

    /// Parent node, `None` for roots and detached nodes.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Ordered children.
    fn children(&self, node: NodeId) -> &[NodeId];

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Insert `child` as the first child of `parent`.
    fn prepend_child(&mut self, parent: NodeId, child: NodeId);

    /// Insert `node` as the next sibling of `anchor`.
    ///
    /// No-op when `anchor` is detached.
    fn insert_after(&mut self, anchor: NodeId, node: NodeId);

    /// Put `new` in the position of `old`, detaching `old`.
    ///
    /// No-op when `old` is detached.
    fn replace(&mut self, old: NodeId, new: NodeId);

    /// Detach `node` from its parent.
    fn remove(&mut self, node: NodeId);

    /// Deep copy of `node` and its subtree, returned detached.
    fn clone_subtree(&mut self, node: NodeId) -> NodeId;

    /// Attribute value by name.
    fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.attrs(node)
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// True if `node` is an element with the given tag (ASCII case-insensitive).
    fn is_tag(&self, node: NodeId, tag: &str) -> bool {
        self.tag(node).is_some_and(|t| t.eq_ignore_ascii_case(tag))
    }

    /// All descendants of `node` in document (pre-)order, excluding `node`.
    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Descendant elements with the given tag, in document order.
    fn descendants_by_tag(&self, node: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(node)
            .into_iter()
            .filter(|&n| self.is_tag(n, tag))
            .collect()
    }

    /// First descendant element with the given tag.
    fn first_descendant(&self, node: NodeId, tag: &str) -> Option<NodeId> {
        self.descendants(node)
            .into_iter()
            .find(|&n| self.is_tag(n, tag))
    }

    /// Nearest strict ancestor with the given tag.
    fn closest_ancestor(&self, node: NodeId, tag: &str) -> Option<NodeId> {
        let mut current = self.parent(node);
        while let Some(candidate) = current {
            if self.is_tag(candidate, tag) {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    /// True if `ancestor` is a strict ancestor of `node`.
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = self.parent(candidate);
        }
        false
    }

    /// Element children (text children skipped).
    fn child_elements(&self, node: NodeId) -> Vec<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .filter(|&c| self.tag(c).is_some())
            .collect()
    }

    /// Concatenated character data of the subtree.
    fn text_content(&self, node: NodeId) -> String {
        if let Some(text) = self.text(node) {
            return text.to_owned();
        }
        self.descendants(node)
            .into_iter()
            .filter_map(|n| self.text(n))
            .collect()
    }

    /// True if the element's `class` attribute contains `class`.
    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attr(node, "class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Add a class unless already present.
    fn add_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        let value = match self.attr(node, "class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
            _ => class.to_owned(),
        };
        self.set_attr(node, "class", &value);
    }

    /// Replace the whole class list.
    fn set_class(&mut self, node: NodeId, class: &str) {
        self.set_attr(node, "class", class);
    }

    /// Append a new text node to `parent`.
    fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let node = self.create_text(text);
        self.append_child(parent, node);
        node
    }

    /// Detach every child of `node`.
    fn clear_children(&mut self, node: NodeId) {
        while let Some(&child) = self.children(node).first() {
            self.remove(child);
        }
    }

    /// Move every child of `from` to the end of `to`, preserving order.
    fn move_children(&mut self, from: NodeId, to: NodeId) {
        while let Some(&child) = self.children(from).first() {
            self.append_child(to, child);
        }
    }
}

#[derive(Clone, Debug)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed [`ElementTree`].
///
/// Created with a single `body` root element.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document containing only the root element.
    #[must_use]
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        doc.root = doc.push(NodeKind::Element {
            tag: "body".to_owned(),
            attrs: Vec::new(),
        });
        doc
    }

    /// Root element.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes ever allocated, including detached ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if only the root exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Payload of a node.
    #[must_use]
    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.node(node).kind
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0]
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.node_mut(node).parent.take() {
            self.node_mut(parent).children.retain(|&c| c != node);
        }
    }

    fn position(&self, node: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.node(node).parent?;
        let index = self.node(parent).children.iter().position(|&c| c == node)?;
        Some((parent, index))
    }

    fn insert_at(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.detach(child);
        let children = &mut self.node_mut(parent).children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.node_mut(child).parent = Some(parent);
    }
}

impl ElementTree for Document {
    fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
        })
    }

    fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_owned()))
    }

    fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.node(node).kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        match &self.node(node).kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element { .. } => None,
        }
    }

    fn attrs(&self, node: NodeId) -> &[(String, String)] {
        match &self.node(node).kind {
            NodeKind::Element { attrs, .. } => attrs,
            NodeKind::Text(_) => &[],
        }
    }

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let NodeKind::Element { attrs, .. } = &mut self.node_mut(node).kind {
            match attrs.iter_mut().find(|(key, _)| key == name) {
                Some((_, existing)) => value.clone_into(existing),
                None => attrs.push((name.to_owned(), value.to_owned())),
            }
        }
    }

    fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let NodeKind::Element { attrs, .. } = &mut self.node_mut(node).kind {
            attrs.retain(|(key, _)| key != name);
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
    }

    fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_at(parent, 0, child);
    }

    fn insert_after(&mut self, anchor: NodeId, node: NodeId) {
        if anchor == node {
            return;
        }
        self.detach(node);
        if let Some((parent, index)) = self.position(anchor) {
            self.insert_at(parent, index + 1, node);
        }
    }

    fn replace(&mut self, old: NodeId, new: NodeId) {
        if old == new {
            return;
        }
        self.detach(new);
        let Some((parent, index)) = self.position(old) else {
            return;
        };
        self.node_mut(parent).children[index] = new;
        self.node_mut(new).parent = Some(parent);
        self.node_mut(old).parent = None;
    }

    fn remove(&mut self, node: NodeId) {
        self.detach(node);
    }

    fn clone_subtree(&mut self, node: NodeId) -> NodeId {
        let kind = self.node(node).kind.clone();
        let children = self.node(node).children.clone();
        let copy = self.push(kind);
        for child in children {
            let child_copy = self.clone_subtree(child);
            self.append_child(copy, child_copy);
        }
        copy
    }
}
