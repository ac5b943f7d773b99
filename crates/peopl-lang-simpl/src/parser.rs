use crate::{
    kinds::{Field, Kind},
    lexer::{lex, Token},
};
use peopl_syntax::{ParseOutput, RawNode, Span, SyntaxError, TokenStream, MAX_NESTING_DEPTH};
use tracing::trace;

type Result<T> = std::result::Result<T, SyntaxError>;

const PREC_MULT: u8 = 8;
const PREC_ADD: u8 = 6;
const PREC_COMP: u8 = 5;
const PREC_AND: u8 = 4;
const PREC_OR: u8 = 3;

/// Parse Simpl source text. Never fails, errors become `ERROR` nodes.
pub(crate) fn parse(source: &str) -> ParseOutput {
    let lexed = lex(source);
    let mut parser = Parser {
        tokens: TokenStream::new(source, lexed.tokens),
        errors: Vec::new(),
        depth: 0,
    };
    let children = parser.source_file();
    let mut root = RawNode::branch_at(Kind::SourceFile, Span::new(0, source.len()), children);
    for span in lexed.comments {
        root.insert_extra(RawNode::leaf(Kind::Comment, span));
    }
    ParseOutput::new(root, parser.errors)
}

struct Parser<'input> {
    tokens: TokenStream<'input, Token>,
    errors: Vec<SyntaxError>,
    depth: usize,
}

impl Parser<'_> {
    fn source_file(&mut self) -> Vec<RawNode> {
        let mut children = Vec::new();
        while !self.tokens.at_end() {
            let start = self.tokens.position();
            match self.statement() {
                Ok(nodes) => children.extend(nodes),
                Err(error) => {
                    trace!(%error, "recovering from syntax error");
                    self.errors.push(error);
                    children.push(self.recover(start));
                }
            }
        }
        children
    }

    /// Skip the rest of a broken statement.
    ///
    /// Declarations end at a `.` before a line break (or the next
    /// declaration keyword at the start of a line), expression statements at
    /// the next line break.
    fn recover(&mut self, start: usize) -> RawNode {
        self.tokens.reset(start);
        let is_declaration = self.at_declaration();
        let mut span = self.tokens.span();
        while let Some(next) = self.tokens.bump() {
            span = span.merge(&next.span);
            if !self.tokens.at_line_start() {
                continue;
            }
            if next.token == Token::Dot || !is_declaration || self.at_declaration() {
                break;
            }
        }
        RawNode::error(span, Vec::new())
    }

    /// Run `rule` one level deeper, failing past [MAX_NESTING_DEPTH].
    fn nested(&mut self, rule: impl FnOnce(&mut Self) -> Result<RawNode>) -> Result<RawNode> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(SyntaxError::nested_too_deeply(
                self.tokens.span(),
                self.tokens.text(),
            ));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    fn unexpected(&self, expected: &[&str]) -> SyntaxError {
        SyntaxError::unexpected(
            self.tokens.span(),
            expected.iter().copied(),
            self.tokens.text(),
        )
    }

    /// Consume the next token as a `kind` leaf.
    fn token(&mut self, kind: Kind) -> RawNode {
        let span = self
            .tokens
            .bump()
            .map_or_else(|| self.tokens.span(), |next| next.span);
        RawNode::leaf(kind, span)
    }

    fn expect(&mut self, token: Token, kind: Kind, description: &str) -> Result<RawNode> {
        match self.tokens.eat(token) {
            Some(span) => Ok(RawNode::leaf(kind, span)),
            None => Err(self.unexpected(&[description])),
        }
    }

    fn at_declaration(&self) -> bool {
        matches!(
            self.tokens.peek(),
            Some(Token::TypeKeyword | Token::ContractKeyword | Token::FuncKeyword)
        )
    }

    /// `name: ...`
    fn at_named_param(&self) -> bool {
        self.tokens.peek() == Some(Token::FieldName) && self.tokens.peek_nth(1) == Some(Token::Colon)
    }

    fn statement(&mut self) -> Result<Vec<RawNode>> {
        let declaration = match self.tokens.peek() {
            Some(Token::TypeKeyword) => {
                self.declaration(Kind::TypeDeclaration, Kind::TypeKeyword)?
            }
            Some(Token::ContractKeyword) => {
                self.declaration(Kind::ContractDeclaration, Kind::ContractKeyword)?
            }
            Some(Token::FuncKeyword) => self.function_declaration()?,
            _ => return Ok(vec![self.expression()?]),
        };
        let terminator = self.declaration_end()?;
        Ok(vec![declaration, terminator])
    }

    /// A `.` that ends its line.
    fn declaration_end(&mut self) -> Result<RawNode> {
        let position = self.tokens.position();
        if let Some(span) = self.tokens.eat(Token::Dot) {
            if self.tokens.at_line_start() {
                return Ok(RawNode::leaf(Kind::Dot, span));
            }
            self.tokens.reset(position);
        }
        Err(self.unexpected(&["`.` at the end of a line"]))
    }

    /// `type` and `contract` declarations.
    fn declaration(&mut self, kind: Kind, keyword: Kind) -> Result<RawNode> {
        let mut children = vec![self.token(keyword)];
        children.push(self.type_identifier()?.with_field(Field::Name));
        if self.at_named_param() {
            children.push(self.param_list()?.with_field(Field::Params));
        }
        Ok(RawNode::branch(kind, children))
    }

    fn function_declaration(&mut self) -> Result<RawNode> {
        let mut children = vec![self.token(Kind::FuncKeyword)];
        if matches!(
            self.tokens.peek(),
            Some(Token::TypeName | Token::OpenBrace)
        ) {
            children.push(self.type_identifier()?.with_field(Field::OnType));
        }
        children.push(self.field_identifier()?.with_field(Field::Name));
        if self.at_named_param() {
            children.push(self.param_list()?.with_field(Field::Params));
        }
        children.push(self.type_identifier()?.with_field(Field::Return));
        children.push(self.expression()?.with_field(Field::Body));
        Ok(RawNode::branch(Kind::FunctionDeclaration, children))
    }

    fn param_list(&mut self) -> Result<RawNode> {
        let mut params = Vec::new();
        while self.at_named_param() {
            params.push(self.param_declaration()?);
        }
        Ok(RawNode::branch(Kind::ParamList, params))
    }

    fn param_declaration(&mut self) -> Result<RawNode> {
        let name = self.field_identifier()?.with_field(Field::Name);
        let colon = self.expect(Token::Colon, Kind::Colon, "`:`")?;
        let r#type = self.type_identifier()?.with_field(Field::Type);
        Ok(RawNode::branch(
            Kind::ParamDeclaration,
            vec![name, colon, r#type],
        ))
    }

    fn field_identifier(&mut self) -> Result<RawNode> {
        self.expect(Token::FieldName, Kind::FieldIdentifier, "field identifier")
    }

    fn type_identifier(&mut self) -> Result<RawNode> {
        self.nested(Self::type_reference)
    }

    fn type_reference(&mut self) -> Result<RawNode> {
        match self.tokens.peek() {
            Some(Token::TypeName) => Ok(self.token(Kind::TypeIdentifier)),
            Some(Token::OpenBrace) => {
                let inline = self.inline_function_declaration()?;
                Ok(RawNode::branch(Kind::TypeIdentifier, vec![inline]))
            }
            _ => Err(self.unexpected(&["type identifier"])),
        }
    }

    /// `{a: Int b: Int} Int`
    fn inline_function_declaration(&mut self) -> Result<RawNode> {
        let mut children = vec![self.token(Kind::OpenBrace)];
        while self.tokens.at(Token::FieldName) {
            children.push(self.param_declaration()?);
        }
        children.push(self.expect(Token::CloseBrace, Kind::CloseBrace, "`}`")?);
        children.push(self.type_identifier()?);
        Ok(RawNode::branch(Kind::InlineFunctionDeclaration, children))
    }

    fn expression(&mut self) -> Result<RawNode> {
        self.nested(Self::pipe_chain)
    }

    fn pipe_chain(&mut self) -> Result<RawNode> {
        let mut left = self.pipe_operand()?;
        while self.tokens.at(Token::Semicolon) {
            let semicolon = self.token(Kind::Semicolon);
            let right = self.pipe_operand()?;
            left = RawNode::branch(
                Kind::PipeExpression,
                vec![
                    left.with_field(Field::Left),
                    semicolon,
                    right.with_field(Field::Right),
                ],
            );
        }
        Ok(left)
    }

    fn pipe_operand(&mut self) -> Result<RawNode> {
        if self.tokens.at(Token::Pipe) {
            self.subpipe_expression()
        } else {
            self.branch_body()
        }
    }

    /// A simple, call or looped expression.
    fn branch_body(&mut self) -> Result<RawNode> {
        if self.at_call() {
            return self.call_expression();
        }
        if self.tokens.at(Token::OpenParen) {
            let parens = self.parenthised_expression()?;
            if self.tokens.at(Token::Caret) {
                let caret = self.token(Kind::Caret);
                return Ok(RawNode::branch(
                    Kind::LoopedExpression,
                    vec![parens, caret],
                ));
            }
            return self.binary_rhs(parens, 0);
        }
        self.simple_expression()
    }

    /// Type callees always make a call, field callees only with arguments.
    fn at_call(&self) -> bool {
        match self.tokens.peek() {
            Some(Token::TypeName | Token::OpenBrace) => true,
            Some(Token::FieldName) => {
                self.tokens.peek_nth(1) == Some(Token::FieldName)
                    && self.tokens.peek_nth(2) == Some(Token::Colon)
            }
            _ => false,
        }
    }

    fn call_expression(&mut self) -> Result<RawNode> {
        let callee = if self.tokens.at(Token::FieldName) {
            self.token(Kind::FieldIdentifier)
        } else {
            self.type_identifier()?
        };
        let mut children = vec![callee.with_field(Field::Callee)];
        if self.at_named_param() {
            let mut params = Vec::new();
            while self.at_named_param() {
                params.push(self.param_definition()?);
            }
            children.push(RawNode::branch(Kind::ParamListCall, params).with_field(Field::Params));
        }
        Ok(RawNode::branch(Kind::CallExpression, children))
    }

    fn param_definition(&mut self) -> Result<RawNode> {
        let name = self.field_identifier()?.with_field(Field::Name);
        let colon = self.expect(Token::Colon, Kind::Colon, "`:`")?;
        let value = self.simple_expression()?.with_field(Field::Value);
        Ok(RawNode::branch(Kind::ParamDefinition, vec![name, colon, value]))
    }

    /// `|capture| body, |capture| body, default`
    fn subpipe_expression(&mut self) -> Result<RawNode> {
        let mut children = vec![self.subpipe_branch()?];
        while self.tokens.at(Token::Comma) {
            children.push(self.token(Kind::Comma));
            if self.tokens.at(Token::Pipe) {
                children.push(self.subpipe_branch()?);
                continue;
            }
            let default = if self.at_call() {
                self.call_expression()?
            } else {
                self.simple_expression()?
            };
            children.push(default);
            break;
        }
        Ok(RawNode::branch(Kind::SubpipeExpression, children))
    }

    fn subpipe_branch(&mut self) -> Result<RawNode> {
        let open = self.token(Kind::Pipe);
        let capture_group = self.expression()?.with_field(Field::CaptureGroup);
        let close = self.expect(Token::Pipe, Kind::Pipe, "`|`")?;
        let subpipe = self.branch_body()?.with_field(Field::Subpipe);
        Ok(RawNode::branch(
            Kind::SubpipeBranchExpression,
            vec![open, capture_group, close, subpipe],
        ))
    }

    fn simple_expression(&mut self) -> Result<RawNode> {
        let operand = self.unary()?;
        self.binary_rhs(operand, 0)
    }

    /// Precedence climbing over left associative binary operators.
    fn binary_rhs(&mut self, mut left: RawNode, min_precedence: u8) -> Result<RawNode> {
        while let Some(precedence) = self.tokens.peek().and_then(precedence) {
            if precedence < min_precedence {
                break;
            }
            let operator = self.binary_operator();
            let operand = self.unary()?;
            let right = self.binary_rhs(operand, precedence + 1)?;
            left = RawNode::branch(
                Kind::BinaryExpression,
                vec![
                    left.with_field(Field::Left),
                    operator.with_field(Field::Operator),
                    right.with_field(Field::Right),
                ],
            );
        }
        Ok(left)
    }

    fn binary_operator(&mut self) -> RawNode {
        match self.tokens.peek() {
            Some(Token::AndKeyword) => self.token(Kind::AndOperator),
            Some(Token::OrKeyword) => self.token(Kind::OrOperator),
            _ => self.grouped_operator(),
        }
    }

    /// An operator token wrapped in its operator class, e.g.
    /// `(additive_operator "+")`.
    fn grouped_operator(&mut self) -> RawNode {
        let (group, kind) = match self.tokens.peek() {
            Some(Token::Star) => (Kind::MultiplicativeOperator, Kind::Star),
            Some(Token::Slash) => (Kind::MultiplicativeOperator, Kind::Slash),
            Some(Token::Percent) => (Kind::MultiplicativeOperator, Kind::Percent),
            Some(Token::Plus) => (Kind::AdditiveOperator, Kind::Plus),
            Some(Token::Minus) => (Kind::AdditiveOperator, Kind::Minus),
            Some(Token::Equals) => (Kind::ComparativeOperator, Kind::Equals),
            Some(Token::NotEquals) => (Kind::ComparativeOperator, Kind::NotEquals),
            Some(Token::Greater) => (Kind::ComparativeOperator, Kind::Greater),
            Some(Token::GreaterEquals) => (Kind::ComparativeOperator, Kind::GreaterEquals),
            Some(Token::Less) => (Kind::ComparativeOperator, Kind::Less),
            Some(Token::LessEquals) => (Kind::ComparativeOperator, Kind::LessEquals),
            _ => (Kind::Error, Kind::Error),
        };
        let token = self.token(kind);
        RawNode::branch(group, vec![token])
    }

    fn unary(&mut self) -> Result<RawNode> {
        self.nested(Self::prefixed)
    }

    fn prefixed(&mut self) -> Result<RawNode> {
        let operator = match self.tokens.peek() {
            Some(Token::Plus | Token::Minus) => self.grouped_operator(),
            Some(Token::NotKeyword) => self.token(Kind::NotKeyword),
            _ => return self.primary(),
        };
        let operand = self.unary()?;
        Ok(RawNode::branch(
            Kind::UnaryExpression,
            vec![
                operator.with_field(Field::Operator),
                operand.with_field(Field::Operand),
            ],
        ))
    }

    fn primary(&mut self) -> Result<RawNode> {
        match self.tokens.peek() {
            Some(Token::Number) => {
                let is_float = self.tokens.text().map_or(false, |text| text.contains('.'));
                Ok(self.token(if is_float {
                    Kind::FloatLiteral
                } else {
                    Kind::IntLiteral
                }))
            }
            Some(Token::String) => Ok(self.token(Kind::StringLiteral)),
            Some(Token::TrueKeyword) => Ok(self.token(Kind::True)),
            Some(Token::FalseKeyword) => Ok(self.token(Kind::False)),
            Some(Token::FieldName) => Ok(self.token(Kind::FieldIdentifier)),
            Some(Token::OpenBracket) => self.array_literal(),
            Some(Token::OpenParen) => self.parenthised_expression(),
            _ => Err(self.unexpected(&["expression"])),
        }
    }

    /// `[1 2 3]`
    fn array_literal(&mut self) -> Result<RawNode> {
        let mut children = vec![self.token(Kind::OpenBracket)];
        while !self.tokens.at(Token::CloseBracket) && !self.tokens.at_end() {
            children.push(self.simple_expression()?);
        }
        children.push(self.expect(Token::CloseBracket, Kind::CloseBracket, "`]`")?);
        Ok(RawNode::branch(Kind::ArrayLiteral, children))
    }

    fn parenthised_expression(&mut self) -> Result<RawNode> {
        let open = self.token(Kind::OpenParen);
        let expression = self.expression()?;
        let close = self.expect(Token::CloseParen, Kind::CloseParen, "`)`")?;
        Ok(RawNode::branch(
            Kind::ParenthisedExpression,
            vec![open, expression, close],
        ))
    }
}

fn precedence(token: Token) -> Option<u8> {
    match token {
        Token::Star | Token::Slash | Token::Percent => Some(PREC_MULT),
        Token::Plus | Token::Minus => Some(PREC_ADD),
        Token::Equals
        | Token::NotEquals
        | Token::Greater
        | Token::GreaterEquals
        | Token::Less
        | Token::LessEquals => Some(PREC_COMP),
        Token::AndKeyword => Some(PREC_AND),
        Token::OrKeyword => Some(PREC_OR),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::parse;
    use peopl_syntax::Span;

    macro_rules! assert_errors {
        ($source:expr, $count:expr) => {{
            let output = parse($source);
            assert_eq!(output.errors.len(), $count, "{:#?}", output.errors);
            output
        }};
    }

    #[test]
    fn it_parses_without_errors() {
        assert_errors!("type Point x: Int y: Int.\n", 0);
        assert_errors!("contract Shape area: Float.\n", 0);
        assert_errors!("func Point norm Float x * x + y * y.\n", 0);
        assert_errors!("func apply f: {a: Int} Int Int f a: 1.\n", 0);
        assert_errors!("x ; |1| \"one\", |2| \"two\", \"many\"\n", 0);
        assert_errors!("(n ; |0| n, (n - 1))^\n", 0);
        assert_errors!("[1 2 3] ; sum\n", 0);
        assert_errors!("", 0);
    }

    #[test]
    fn it_requires_a_line_break_after_declarations() {
        assert_errors!("type Point. type Line.\n", 1);
        assert_errors!("type Point.", 0);
    }

    #[test]
    fn it_recovers_at_the_next_line() {
        let output = assert_errors!("1 + *\nfoo\n", 1);
        let kinds = output
            .root
            .children
            .iter()
            .map(|child| child.is_error())
            .collect::<Vec<_>>();
        assert_eq!(kinds, [true, false]);
        assert_eq!(output.root.children[0].span, Span::new(0, 5));
    }

    #[test]
    fn it_recovers_at_the_next_declaration() {
        let output = assert_errors!("type 5 x: Int.\ntype Fine.\n", 1);
        assert!(output.root.children[0].is_error());
        assert!(!output.root.children[1].is_error());
        assert_eq!(output.root.children.len(), 3);
    }

    #[test]
    fn it_limits_nesting() {
        let deep = format!("{}1{}\nfoo\n", "(".repeat(1000), ")".repeat(1000));
        let output = assert_errors!(&deep, 1);
        assert!(output.root.children[0].is_error());
        assert!(!output.root.children[1].is_error());
        assert_eq!(output.errors[0].expected, ["at most 128 levels of nesting"]);
        assert_eq!(output.errors[0].found.as_deref(), Some("("));

        assert_errors!(&format!("{}1{}\n", "(".repeat(50), ")".repeat(50)), 0);
        assert_errors!(&format!("{}1\n", "- ".repeat(1000)), 1);
        assert_errors!(&format!("func f Int {{a: {}Int\n", "{a: ".repeat(1000)), 1);
    }

    #[test]
    fn it_parses_long_chains() {
        assert_errors!(&format!("x{}\n", " + 1".repeat(100_000)), 0);
        assert_errors!(&format!("x{}\n", " ; f".repeat(100_000)), 0);
    }
}
