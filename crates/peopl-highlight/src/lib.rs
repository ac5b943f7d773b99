use peopl_syntax::{HighlightRule, Node, Tree};
use std::fmt::Write;

pub type TagMap<'a> = std::collections::HashMap<TokenType, Tags<'a>>;

pub struct Tags<'a> {
    pub start: &'a str,
    pub end: &'a str,
}

/// Wrap every token of `source` in the tags `tag_map` gives its [TokenType].
pub fn highlight(source: &str, tree: &Tree, tag_map: &TagMap) -> String {
    let tokens = get_tokens(tree);

    let mut rope = ropey::Rope::from_str(source);
    let mut bytes_added = 0;
    for token in tokens {
        if let Some(Tags {
            start: start_tag,
            end: end_tag,
        }) = tag_map.get(&token.token_type)
        {
            let start_char = rope.byte_to_char(token.node.start_byte() + bytes_added);
            rope.insert(start_char, start_tag);
            bytes_added += start_tag.len();

            let end_char = rope.byte_to_char(token.node.end_byte() + bytes_added);
            rope.insert(end_char, end_tag);
            bytes_added += end_tag.len();
        }
    }

    rope.to_string()
}

/// Render `source` as HTML, wrapping tokens in `<span class="...">`.
///
/// Class names are the capture names with dots replaced by dashes, e.g.
/// `punctuation-bracket`.
pub fn highlight_html(source: &str, tree: &Tree) -> String {
    let mut html = String::with_capacity(source.len());
    let mut cursor = 0;
    for token in get_tokens(tree) {
        let range = token.node.byte_range();
        push_escaped(&mut html, &source[cursor..range.start]);
        let _ = write!(html, "<span class=\"{}\">", token.token_type.class_name());
        push_escaped(&mut html, &source[range.clone()]);
        html.push_str("</span>");
        cursor = range.end;
    }
    push_escaped(&mut html, &source[cursor..]);
    html
}

fn push_escaped(html: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => html.push_str("&amp;"),
            '<' => html.push_str("&lt;"),
            '>' => html.push_str("&gt;"),
            '"' => html.push_str("&quot;"),
            _ => html.push(c),
        }
    }
}

/// Terminal colours.
pub fn ansi_tag_map() -> TagMap<'static> {
    use TokenType::*;
    const RESET: &str = "\x1b[0m";
    [
        (Comment, "\x1b[90m"),
        (Keyword, "\x1b[35m"),
        (Operator, "\x1b[36m"),
        (Type, "\x1b[33m"),
        (ConstantBuiltin, "\x1b[1;33m"),
        (Function, "\x1b[34m"),
        (VariableParameter, "\x1b[3m"),
        (Property, "\x1b[36m"),
        (String, "\x1b[32m"),
        (Number, "\x1b[31m"),
        (Boolean, "\x1b[31m"),
    ]
    .into_iter()
    .map(|(token_type, start)| (token_type, Tags { start, end: RESET }))
    .collect()
}

/// `<span>` tags with a class per token type, see [highlight_html].
///
/// The tags don't escape anything, so only use this with [highlight] when
/// the source is known not to contain HTML special characters.
pub fn html_tag_map() -> TagMap<'static> {
    TokenType::ALL
        .iter()
        .map(|token_type| {
            (
                *token_type,
                Tags {
                    start: token_type.html_start_tag(),
                    end: "</span>",
                },
            )
        })
        .collect()
}

#[derive(Debug)]
pub struct Token<'a> {
    pub node: Node<'a>,
    pub token_type: TokenType,
}

#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum TokenType {
    Comment,
    Keyword,
    Operator,
    Type,
    ConstantBuiltin,
    Function,
    VariableParameter,
    Variable,
    Property,
    String,
    Number,
    Boolean,
    PunctuationBracket,
    PunctuationDelimiter,
}

impl TokenType {
    pub const ALL: &'static [Self] = &[
        Self::Comment,
        Self::Keyword,
        Self::Operator,
        Self::Type,
        Self::ConstantBuiltin,
        Self::Function,
        Self::VariableParameter,
        Self::Variable,
        Self::Property,
        Self::String,
        Self::Number,
        Self::Boolean,
        Self::PunctuationBracket,
        Self::PunctuationDelimiter,
    ];

    /// Falls back to less specific captures, so `variable.builtin` is a
    /// [TokenType::Variable].
    pub fn from_capture(capture: &str) -> Option<Self> {
        let token_type = match capture {
            "comment" => Self::Comment,
            "keyword" => Self::Keyword,
            "operator" => Self::Operator,
            "type" => Self::Type,
            "constant.builtin" => Self::ConstantBuiltin,
            "function" => Self::Function,
            "variable.parameter" => Self::VariableParameter,
            "variable" => Self::Variable,
            "property" => Self::Property,
            "string" => Self::String,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "punctuation.bracket" => Self::PunctuationBracket,
            "punctuation.delimiter" => Self::PunctuationDelimiter,
            _ => {
                let (parent, _) = capture.rsplit_once('.')?;
                return Self::from_capture(parent);
            }
        };
        Some(token_type)
    }

    pub fn capture_name(&self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::Keyword => "keyword",
            Self::Operator => "operator",
            Self::Type => "type",
            Self::ConstantBuiltin => "constant.builtin",
            Self::Function => "function",
            Self::VariableParameter => "variable.parameter",
            Self::Variable => "variable",
            Self::Property => "property",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::PunctuationBracket => "punctuation.bracket",
            Self::PunctuationDelimiter => "punctuation.delimiter",
        }
    }

    fn class_name(&self) -> String {
        self.capture_name().replace('.', "-")
    }

    fn html_start_tag(&self) -> &'static str {
        match self {
            Self::Comment => r#"<span class="comment">"#,
            Self::Keyword => r#"<span class="keyword">"#,
            Self::Operator => r#"<span class="operator">"#,
            Self::Type => r#"<span class="type">"#,
            Self::ConstantBuiltin => r#"<span class="constant-builtin">"#,
            Self::Function => r#"<span class="function">"#,
            Self::VariableParameter => r#"<span class="variable-parameter">"#,
            Self::Variable => r#"<span class="variable">"#,
            Self::Property => r#"<span class="property">"#,
            Self::String => r#"<span class="string">"#,
            Self::Number => r#"<span class="number">"#,
            Self::Boolean => r#"<span class="boolean">"#,
            Self::PunctuationBracket => r#"<span class="punctuation-bracket">"#,
            Self::PunctuationDelimiter => r#"<span class="punctuation-delimiter">"#,
        }
    }
}

type Tokens<'a> = Vec<Token<'a>>;

/// Returns a sorted, non-overlapping vector of tokens.
///
/// Nodes are matched against the tree's highlight rules in pre-order, the
/// first matching rule wins and the children of a matched node are skipped.
pub fn get_tokens(tree: &Tree) -> Tokens<'_> {
    let rules = tree.language().highlights();
    let mut tokens = Tokens::new();
    let mut stack = vec![tree.root_node()];

    while let Some(node) = stack.pop() {
        if let Some(token_type) = match_rules(rules, &node) {
            if node.start_byte() != node.end_byte() {
                tokens.push(Token { node, token_type });
            }
            continue;
        }
        let children = node.children().collect::<Vec<_>>();
        stack.extend(children.into_iter().rev());
    }

    tokens.sort_by_key(|token| token.node.start_byte());
    tokens
}

fn match_rules(rules: &[HighlightRule], node: &Node) -> Option<TokenType> {
    rules
        .iter()
        .find(|rule| {
            rule.kind == node.kind()
                && rule.field.map_or(true, |field| node.field_name() == Some(field))
                && rule.parent.map_or(true, |parent| {
                    node.parent().map(|parent_node| parent_node.kind()) == Some(parent)
                })
        })
        .and_then(|rule| TokenType::from_capture(rule.capture))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(name: &str, source: &str) -> Tree {
        peopl_languages::init_parser(name).parse(source).unwrap()
    }

    #[test]
    fn it_falls_back_to_parent_captures() {
        assert_eq!(
            TokenType::from_capture("variable.parameter"),
            Some(TokenType::VariableParameter)
        );
        assert_eq!(
            TokenType::from_capture("variable.builtin.self"),
            Some(TokenType::Variable)
        );
        assert_eq!(TokenType::from_capture("markup"), None);
    }

    #[test]
    fn it_returns_sorted_non_overlapping_tokens() {
        let source = "** doubles\nfunc (Int) double() => Int in * 2 ; |x| x, 0..\n";
        let tree = parse("peopl", source);
        let tokens = get_tokens(&tree);
        assert!(!tokens.is_empty());
        for pair in tokens.windows(2) {
            assert!(pair[0].node.end_byte() <= pair[1].node.start_byte());
        }
        assert_eq!(tokens[0].token_type, TokenType::Comment);
        assert_eq!(tokens[1].token_type, TokenType::Keyword);
    }

    #[test]
    fn it_highlights_comments_inside_definitions() {
        let source = "func double(x: Int) => Int\n  ** doubles x\n  x * 2..\n";
        let tree = parse("peopl", source);
        let comments = get_tokens(&tree)
            .into_iter()
            .filter(|token| token.token_type == TokenType::Comment)
            .map(|token| token.node.utf8_text())
            .collect::<Vec<_>>();
        assert_eq!(comments, ["** doubles x"]);
    }

    #[test]
    fn it_escapes_html() {
        let source = "x = a < \"<b>\"..";
        let tree = parse("peopl", source);
        let html = highlight_html(source, &tree);
        assert_eq!(
            html,
            concat!(
                r#"<span class="variable">x</span> "#,
                r#"<span class="operator">=</span> "#,
                r#"<span class="variable">a</span> "#,
                r#"<span class="operator">&lt;</span> "#,
                r#"<span class="string">&quot;&lt;b&gt;&quot;</span>"#,
                r#"<span class="punctuation-delimiter">..</span>"#,
            )
        );
    }

    #[test]
    fn it_agrees_with_the_html_tag_map() {
        let source = "** no special characters\ntype Point x: Int y: Int.\n";
        let tree = parse("simpl", source);
        assert_eq!(
            highlight(source, &tree, &html_tag_map()),
            highlight_html(source, &tree)
        );
    }

    #[test]
    fn it_handles_multibyte_text() {
        let source = "x = \"héllo\"..";
        let tree = parse("peopl", source);
        let mut tag_map = TagMap::new();
        tag_map.insert(
            TokenType::String,
            Tags {
                start: "[",
                end: "]",
            },
        );
        assert_eq!(highlight(source, &tree, &tag_map), "x = [\"héllo\"]..");
    }
}
