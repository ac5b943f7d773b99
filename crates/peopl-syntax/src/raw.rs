use crate::{FieldId, KindId, Span, SyntaxError};

/// An owned syntax node, as built by a grammar's parser.
///
/// A [Tree](crate::Tree) flattens these into an arena once parsing is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNode {
    /// Index into the grammar's symbol table.
    pub kind: KindId,
    /// Field this node occupies in its parent.
    pub field: Option<FieldId>,
    /// Source location.
    pub span: Span,
    /// Child nodes, in source order.
    pub children: Vec<RawNode>,
}

impl RawNode {
    /// A node without children.
    pub fn leaf(kind: impl Into<KindId>, span: Span) -> Self {
        Self {
            kind: kind.into(),
            field: None,
            span,
            children: Vec::new(),
        }
    }

    /// A node spanning its children.
    ///
    /// Use [RawNode::branch_at] when `children` may be empty.
    pub fn branch(kind: impl Into<KindId>, children: Vec<RawNode>) -> Self {
        let span = match (children.first(), children.last()) {
            (Some(first), Some(last)) => first.span.merge(&last.span),
            _ => Span::default(),
        };
        Self::branch_at(kind, span, children)
    }

    /// A node with an explicit span.
    pub fn branch_at(kind: impl Into<KindId>, span: Span, children: Vec<RawNode>) -> Self {
        Self {
            kind: kind.into(),
            field: None,
            span,
            children,
        }
    }

    /// An `ERROR` node.
    pub fn error(span: Span, children: Vec<RawNode>) -> Self {
        Self::branch_at(KindId::ERROR, span, children)
    }

    /// Place this node in `field`.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<FieldId>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Is this an `ERROR` node?
    pub fn is_error(&self) -> bool {
        self.kind == KindId::ERROR
    }

    /// Insert an extra such as a comment into the deepest node that
    /// encloses it, keeping children in source order.
    pub fn insert_extra(&mut self, extra: RawNode) {
        let start = extra.span.start_offset;
        let mut node = self;
        loop {
            let position = node
                .children
                .partition_point(|child| child.span.start_offset < start);
            let enclosing = position
                .checked_sub(1)
                .filter(|&index| node.children[index].span.end_offset > start);
            match enclosing {
                Some(index) => node = &mut node.children[index],
                None => {
                    node.children.insert(position, extra);
                    return;
                }
            }
        }
    }
}

impl Drop for RawNode {
    // Long left-nested chains such as `a; b; c; ...` would otherwise
    // overflow the stack when dropped.
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

/// What a grammar's parse function produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutput {
    /// The root node.
    pub root: RawNode,
    /// Syntax errors, in source order.
    pub errors: Vec<SyntaxError>,
}

impl ParseOutput {
    /// Bundle a root node with its errors.
    pub fn new(root: RawNode, mut errors: Vec<SyntaxError>) -> Self {
        errors.sort_by_key(|error| error.span.start_offset);
        Self { root, errors }
    }
}

#[cfg(test)]
mod tests {
    use super::RawNode;
    use crate::{KindId, Span};

    const WORD: KindId = KindId(1);
    const COMMENT: KindId = KindId(2);

    #[test]
    fn it_inserts_extras_into_the_enclosing_node() {
        // word [0..4] (word [6..8] word [20..24]) word [30..34]
        let mut root = RawNode::branch_at(
            WORD,
            Span::new(0, 40),
            vec![
                RawNode::leaf(WORD, Span::new(0, 4)),
                RawNode::branch(
                    WORD,
                    vec![
                        RawNode::leaf(WORD, Span::new(6, 8)),
                        RawNode::leaf(WORD, Span::new(20, 24)),
                    ],
                ),
                RawNode::leaf(WORD, Span::new(30, 34)),
            ],
        );
        root.insert_extra(RawNode::leaf(COMMENT, Span::new(10, 18)));
        root.insert_extra(RawNode::leaf(COMMENT, Span::new(26, 28)));
        root.insert_extra(RawNode::leaf(COMMENT, Span::new(36, 40)));

        let kinds = |node: &RawNode| {
            node.children
                .iter()
                .map(|child| child.kind)
                .collect::<Vec<_>>()
        };
        assert_eq!(kinds(&root), [WORD, WORD, COMMENT, WORD, COMMENT]);
        assert_eq!(kinds(&root.children[1]), [WORD, COMMENT, WORD]);
        assert_eq!(root.children[1].children[1].span, Span::new(10, 18));
    }

    #[test]
    fn it_drops_long_chains() {
        let mut node = RawNode::leaf(WORD, Span::new(0, 1));
        for _ in 0..200_000 {
            node = RawNode::branch(WORD, vec![node]);
        }
        drop(node);
    }
}
