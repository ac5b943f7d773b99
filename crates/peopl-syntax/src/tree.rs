use crate::{
    FieldId, KindId, Language, ParseOutput, Point, RawNode, Span, SyntaxError, SyntaxErrorsReport,
    ERROR_KIND,
};

/// Identifies a node within its [Tree].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct NodeData {
    kind: KindId,
    field: Option<FieldId>,
    span: Span,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    has_error: bool,
}

/// A concrete syntax tree.
#[derive(Debug, Clone)]
pub struct Tree {
    language: Language,
    source: String,
    nodes: Vec<NodeData>,
    errors: Vec<SyntaxError>,
}

impl Tree {
    pub(crate) fn new(language: Language, source: String, output: ParseOutput) -> Self {
        Self {
            language,
            source,
            nodes: flatten(output.root),
            errors: output.errors,
        }
    }

    /// The root node.
    pub fn root_node(&self) -> Node<'_> {
        self.node(NodeId(0))
    }

    /// Look up a node by id.
    ///
    /// Panics if `id` belongs to a different tree.
    pub fn node(&self, id: NodeId) -> Node<'_> {
        assert!(id.0 < self.nodes.len(), "node id out of bounds");
        Node { tree: self, id }
    }

    /// The language this tree was parsed with.
    pub fn language(&self) -> Language {
        self.language
    }

    /// The parsed source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Syntax errors, in source order.
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// Bundle all syntax errors into a single report, if there are any.
    pub fn report(&self, name: impl Into<String>) -> Option<SyntaxErrorsReport> {
        if self.errors.is_empty() {
            return None;
        }
        let name = name.into();
        let errors = self
            .errors
            .iter()
            .cloned()
            .map(|error| error.into_report(&name, self.source.clone()))
            .collect();
        Some(SyntaxErrorsReport { name, errors })
    }
}

/// Pre-order node ids, so every child comes after its parent.
fn flatten(root: RawNode) -> Vec<NodeData> {
    let mut nodes: Vec<NodeData> = Vec::new();
    let mut stack = vec![(root, None)];
    while let Some((mut raw, parent)) = stack.pop() {
        let children = std::mem::take(&mut raw.children);
        let id = NodeId(nodes.len());
        if let Some(NodeId(parent)) = parent {
            nodes[parent].children.push(id);
        }
        nodes.push(NodeData {
            kind: raw.kind,
            field: raw.field,
            span: raw.span,
            parent,
            children: Vec::with_capacity(children.len()),
            has_error: raw.is_error(),
        });
        stack.extend(children.into_iter().rev().map(|child| (child, Some(id))));
    }
    for index in (1..nodes.len()).rev() {
        if let (true, Some(NodeId(parent))) = (nodes[index].has_error, nodes[index].parent) {
            nodes[parent].has_error = true;
        }
    }
    nodes
}

/// A borrowed view of a single node.
#[derive(Clone, Copy)]
pub struct Node<'tree> {
    tree: &'tree Tree,
    id: NodeId,
}

impl<'tree> Node<'tree> {
    fn data(&self) -> &'tree NodeData {
        &self.tree.nodes[self.id.0]
    }

    fn at(&self, id: NodeId) -> Node<'tree> {
        Node {
            tree: self.tree,
            id,
        }
    }

    /// This node's id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node kind, e.g. `"call_expression"`.
    pub fn kind(&self) -> &'static str {
        self.tree
            .language
            .node_kind_for_id(self.data().kind)
            .unwrap_or(ERROR_KIND)
    }

    /// The node kind's symbol id.
    pub fn kind_id(&self) -> KindId {
        self.data().kind
    }

    /// Does this node correspond to a grammar rule (rather than a literal token)?
    pub fn is_named(&self) -> bool {
        self.tree.language.node_kind_is_named(self.data().kind)
    }

    /// Is this an `ERROR` node?
    pub fn is_error(&self) -> bool {
        self.data().kind == KindId::ERROR
    }

    /// Is this node, or any of its descendants, an `ERROR` node?
    pub fn has_error(&self) -> bool {
        self.data().has_error
    }

    /// The source span.
    pub fn span(&self) -> Span {
        self.data().span
    }

    /// The start byte offset.
    pub fn start_byte(&self) -> usize {
        self.data().span.start_offset
    }

    /// The end byte offset.
    pub fn end_byte(&self) -> usize {
        self.data().span.end_offset
    }

    /// The covered byte range.
    pub fn byte_range(&self) -> std::ops::Range<usize> {
        self.start_byte()..self.end_byte()
    }

    /// Row and column of the first byte.
    pub fn start_position(&self) -> Point {
        Point::at_offset(&self.tree.source, self.start_byte())
    }

    /// Row and column just past the last byte.
    pub fn end_position(&self) -> Point {
        Point::at_offset(&self.tree.source, self.end_byte())
    }

    /// The covered source text.
    pub fn utf8_text(&self) -> &'tree str {
        &self.tree.source[self.byte_range()]
    }

    /// The enclosing node.
    pub fn parent(&self) -> Option<Node<'tree>> {
        self.data().parent.map(|parent| self.at(parent))
    }

    /// The field this node occupies in its parent.
    pub fn field_name(&self) -> Option<&'static str> {
        self.data()
            .field
            .and_then(|field| self.tree.language.field_name_for_id(field))
    }

    /// Number of children, named or not.
    pub fn child_count(&self) -> usize {
        self.data().children.len()
    }

    /// The `index`th child.
    pub fn child(&self, index: usize) -> Option<Node<'tree>> {
        self.data().children.get(index).map(|&id| self.at(id))
    }

    /// All children, named or not.
    pub fn children(&self) -> impl ExactSizeIterator<Item = Node<'tree>> + 'tree {
        let tree = self.tree;
        self.data()
            .children
            .iter()
            .map(move |&id| Node { tree, id })
    }

    /// Named children only.
    pub fn named_children(&self) -> impl Iterator<Item = Node<'tree>> + 'tree {
        self.children().filter(Node::is_named)
    }

    /// Number of named children.
    pub fn named_child_count(&self) -> usize {
        self.named_children().count()
    }

    /// The `index`th named child.
    pub fn named_child(&self, index: usize) -> Option<Node<'tree>> {
        self.named_children().nth(index)
    }

    /// The first child stored in field `name`.
    pub fn child_by_field_name(&self, name: &str) -> Option<Node<'tree>> {
        self.children_by_field_name(name).next()
    }

    /// Every child stored in field `name`.
    pub fn children_by_field_name(&self, name: &str) -> impl Iterator<Item = Node<'tree>> + 'tree {
        let field = self.tree.language.field_id_for_name(name);
        self.children()
            .filter(move |child| field.is_some() && child.data().field == field)
    }

    /// This node and everything below it, in pre-order.
    pub fn descendants(&self) -> Descendants<'tree> {
        Descendants {
            tree: self.tree,
            stack: vec![self.id],
        }
    }

    /// Render as an S-expression, omitting anonymous nodes.
    ///
    /// ```text
    /// (source_file (call_expression command: (argument_name)))
    /// ```
    pub fn to_sexp(&self) -> String {
        if !self.is_named() {
            return format!("(\"{}\")", self.kind());
        }
        let mut sexp = String::new();
        let mut stack = vec![SexpStep::Open(*self)];
        while let Some(step) = stack.pop() {
            let node = match step {
                SexpStep::Open(node) => node,
                SexpStep::Close => {
                    sexp.push(')');
                    continue;
                }
            };
            if node != *self {
                sexp.push(' ');
                if let Some(field) = node.field_name() {
                    sexp.push_str(field);
                    sexp.push_str(": ");
                }
            }
            sexp.push('(');
            sexp.push_str(node.kind());
            stack.push(SexpStep::Close);
            let children = node.named_children().collect::<Vec<_>>();
            stack.extend(children.into_iter().rev().map(SexpStep::Open));
        }
        sexp
    }
}

enum SexpStep<'tree> {
    Open(Node<'tree>),
    Close,
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{Node {} {} - {}}}",
            self.kind(),
            self.start_position(),
            self.end_position()
        )
    }
}

/// Pre-order traversal, see [Node::descendants].
pub struct Descendants<'tree> {
    tree: &'tree Tree,
    stack: Vec<NodeId>,
}

impl<'tree> Iterator for Descendants<'tree> {
    type Item = Node<'tree>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let children = &self.tree.nodes[id.0].children;
        self.stack.extend(children.iter().rev());
        Some(Node {
            tree: self.tree,
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Tree;
    use crate::language::tests::{words_language, Kind};
    use crate::{ParseOutput, Parser, RawNode, Span};

    #[test]
    fn it_navigates_a_tree() {
        let mut parser = Parser::new();
        parser.set_language(words_language()).unwrap();
        let tree = parser.parse("one,two\n,three").unwrap();
        let root = tree.root_node();

        assert_eq!(root.kind(), "document");
        assert_eq!(root.child_count(), 5);
        assert_eq!(root.named_child_count(), 3);
        assert!(!root.has_error());

        let head = root.child_by_field_name("head").unwrap();
        assert_eq!(head.utf8_text(), "one");
        assert_eq!(head.parent(), Some(root));
        assert_eq!(head.field_name(), Some("head"));
        assert!(root.child_by_field_name("tail").is_none());

        let comma = root.child(1).unwrap();
        assert!(!comma.is_named());
        assert_eq!(comma.kind(), ",");

        let last = root.named_child(2).unwrap();
        assert_eq!(last.utf8_text(), "three");
        assert_eq!(last.start_position().row, 1);
        assert_eq!(last.start_position().column, 1);

        let kinds = root
            .descendants()
            .map(|node| node.kind())
            .collect::<Vec<_>>();
        assert_eq!(kinds, ["document", "word", ",", "word", ",", "word"]);

        assert_eq!(
            root.to_sexp(),
            "(document head: (word) (word) (word))"
        );
        assert_eq!(comma.to_sexp(), "(\",\")");
    }

    #[test]
    fn it_tracks_errors() {
        let mut parser = Parser::new();
        parser.set_language(words_language()).unwrap();
        let tree = parser.parse("one,,three").unwrap();
        let root = tree.root_node();
        assert!(root.has_error());
        assert!(root.named_child(1).unwrap().is_error());
        assert!(!root.named_child(0).unwrap().has_error());
        assert_eq!(root.to_sexp(), "(document head: (word) (ERROR) (word))");
    }

    #[test]
    fn it_handles_deeply_nested_trees() {
        let depth = 100_000;
        let mut raw = RawNode::error(Span::new(0, 1), Vec::new());
        for _ in 0..depth {
            raw = RawNode::branch(Kind::Word, vec![raw]);
        }
        let root = RawNode::branch_at(Kind::Document, Span::new(0, 1), vec![raw]);
        let tree = Tree::new(
            words_language(),
            String::from("x"),
            ParseOutput::new(root, Vec::new()),
        );

        let root = tree.root_node();
        assert!(root.has_error());
        assert!(root.named_child(0).unwrap().has_error());
        assert_eq!(root.descendants().count(), depth + 2);
        let sexp = root.to_sexp();
        assert!(sexp.starts_with("(document (word (word "));
        assert!(sexp.ends_with(&format!("(ERROR){}", ")".repeat(depth + 1))));
    }
}
