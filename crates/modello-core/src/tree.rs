use serde::Serialize;
use std::ops::{Deref, DerefMut};
use thiserror::Error as ThisError;

///
/// TreeError
///
/// Structural misuse of the builder surfaced at `finish`. Scope guards
/// make unbalanced nesting unreachable through the public API; these
/// remain as explicit invariants rather than panics.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TreeError {
    #[error("builder produced no root node")]
    Empty,

    #[error("builder produced {0} root nodes")]
    MultipleRoots(usize),

    #[error("builder finished with {0} open scopes")]
    OpenScopes(usize),
}

///
/// Node
///
/// One labeled node of the output tree: tag, the default namespace it
/// was opened under (if any), ordered attributes, optional text content,
/// and ordered children. The concrete on-wire lowering (e.g. XML text)
/// is an external concern.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Node {
    pub tag: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<(String, String)>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// First child with the given tag.
    #[must_use]
    pub fn child(&self, tag: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// All children with the given tag, in document order.
    pub fn children_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Self> {
        self.children.iter().filter(move |c| c.tag == tag)
    }
}

///
/// TreeBuilder
///
/// Scoped constructor of a labeled tree. Holds the nodes currently
/// under construction and a stack of default-namespace frames; newly
/// opened nodes inherit the top frame. Exclusively owned by one
/// serialization call for its duration.
///

#[derive(Debug)]
pub struct TreeBuilder {
    open_nodes: Vec<Node>,
    roots: Vec<Node>,
    ns_stack: Vec<Option<String>>,
}

impl TreeBuilder {
    #[must_use]
    pub fn new(default_namespace: Option<&str>) -> Self {
        Self {
            open_nodes: Vec::new(),
            roots: Vec::new(),
            ns_stack: vec![default_namespace.map(str::to_string)],
        }
    }

    fn current_namespace(&self) -> Option<String> {
        self.ns_stack.last().cloned().flatten()
    }

    /// Number of currently open node scopes.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open_nodes.len()
    }

    /// Push a new node under the current position. The returned guard
    /// pops back to the parent when dropped, on every exit path.
    pub fn open(&mut self, tag: &str, attrs: &[(String, String)]) -> NodeScope<'_> {
        let node = Node {
            tag: tag.to_string(),
            namespace: self.current_namespace(),
            attrs: attrs.to_vec(),
            text: None,
            children: Vec::new(),
        };
        self.open_nodes.push(node);

        NodeScope { builder: self }
    }

    /// Append a leaf node with text content under the current position.
    pub fn text(&mut self, tag: &str, content: &str) {
        let node = Node {
            tag: tag.to_string(),
            namespace: self.current_namespace(),
            attrs: Vec::new(),
            text: Some(content.to_string()),
            children: Vec::new(),
        };
        self.attach(node);
    }

    /// Change the default namespace inherited by subsequently opened
    /// nodes, strictly for the lifetime of the returned guard.
    pub fn override_default_namespace(&mut self, ns: Option<&str>) -> NsScope<'_> {
        self.ns_stack.push(ns.map(str::to_string));

        NsScope { builder: self }
    }

    /// Consume the builder and return the single root node.
    pub fn finish(self) -> Result<Node, TreeError> {
        if !self.open_nodes.is_empty() {
            return Err(TreeError::OpenScopes(self.open_nodes.len()));
        }

        let mut roots = self.roots;
        match roots.len() {
            0 => Err(TreeError::Empty),
            1 => Ok(roots.remove(0)),
            n => Err(TreeError::MultipleRoots(n)),
        }
    }

    fn attach(&mut self, node: Node) {
        match self.open_nodes.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn close_node(&mut self) {
        if let Some(node) = self.open_nodes.pop() {
            self.attach(node);
        }
    }

    fn pop_namespace(&mut self) {
        // the initial frame never pops
        if self.ns_stack.len() > 1 {
            self.ns_stack.pop();
        }
    }
}

///
/// NodeScope
///

pub struct NodeScope<'a> {
    builder: &'a mut TreeBuilder,
}

impl Deref for NodeScope<'_> {
    type Target = TreeBuilder;

    fn deref(&self) -> &TreeBuilder {
        self.builder
    }
}

impl DerefMut for NodeScope<'_> {
    fn deref_mut(&mut self) -> &mut TreeBuilder {
        self.builder
    }
}

impl Drop for NodeScope<'_> {
    fn drop(&mut self) {
        self.builder.close_node();
    }
}

///
/// NsScope
///

pub struct NsScope<'a> {
    builder: &'a mut TreeBuilder,
}

impl Deref for NsScope<'_> {
    type Target = TreeBuilder;

    fn deref(&self) -> &TreeBuilder {
        self.builder
    }
}

impl DerefMut for NsScope<'_> {
    fn deref_mut(&mut self) -> &mut TreeBuilder {
        self.builder
    }
}

impl Drop for NsScope<'_> {
    fn drop(&mut self) {
        self.builder.pop_namespace();
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "urn:example:docs:v1";

    #[test]
    fn nested_scopes_attach_in_order() {
        let mut builder = TreeBuilder::new(None);
        {
            let mut root = builder.open("Root", &[]);
            root.text("First", "1");
            {
                let mut inner = root.open("Inner", &[]);
                inner.text("Second", "2");
            }
            root.text("Third", "3");
        }

        let root = builder.finish().unwrap();
        assert_eq!(root.tag, "Root");
        let tags: Vec<_> = root.children.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(tags, ["First", "Inner", "Third"]);
        assert_eq!(root.child("Inner").unwrap().children[0].text.as_deref(), Some("2"));
    }

    #[test]
    fn nodes_inherit_the_default_namespace() {
        let mut builder = TreeBuilder::new(Some(NS));
        {
            let mut root = builder.open("Root", &[]);
            root.text("Child", "x");
        }

        let root = builder.finish().unwrap();
        assert_eq!(root.namespace.as_deref(), Some(NS));
        assert_eq!(root.children[0].namespace.as_deref(), Some(NS));
    }

    #[test]
    fn namespace_override_is_scoped() {
        let mut builder = TreeBuilder::new(Some(NS));
        {
            let mut root = builder.open("Root", &[]);
            {
                let mut body = root.override_default_namespace(None);
                body.text("Unqualified", "x");
            }
            root.text("Qualified", "y");
        }

        let root = builder.finish().unwrap();
        assert_eq!(root.child("Unqualified").unwrap().namespace, None);
        assert_eq!(
            root.child("Qualified").unwrap().namespace.as_deref(),
            Some(NS)
        );
    }

    #[test]
    fn guard_pops_on_early_return() {
        fn fails_partway(builder: &mut TreeBuilder) -> Result<(), ()> {
            let mut scope = builder.open("Partial", &[]);
            scope.text("Before", "x");
            Err(())
        }

        let mut builder = TreeBuilder::new(None);
        {
            let mut root = builder.open("Root", &[]);
            assert_eq!(root.depth(), 1);
            let _ = fails_partway(&mut root);
            assert_eq!(root.depth(), 1);
        }

        // the partial subtree is attached but nesting stayed consistent
        let root = builder.finish().unwrap();
        assert_eq!(root.children[0].tag, "Partial");
    }

    #[test]
    fn attributes_preserve_declaration_order() {
        let attrs = vec![
            ("versione".to_string(), "STD12".to_string()),
            ("stato".to_string(), "attivo".to_string()),
        ];

        let mut builder = TreeBuilder::new(None);
        builder.open("Root", &attrs);

        let root = builder.finish().unwrap();
        assert_eq!(root.attrs, attrs);
    }

    #[test]
    fn finish_rejects_empty_and_multiple_roots() {
        let builder = TreeBuilder::new(None);
        assert_eq!(builder.finish().unwrap_err(), TreeError::Empty);

        let mut builder = TreeBuilder::new(None);
        builder.open("A", &[]);
        builder.open("B", &[]);
        assert_eq!(builder.finish().unwrap_err(), TreeError::MultipleRoots(2));
    }
}
