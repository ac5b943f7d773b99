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

/// Parse PeoPl source text. Never fails, errors become `ERROR` nodes.
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
            match self.terminated_statement() {
                Ok(nodes) => children.extend(nodes),
                Err(error) => {
                    trace!(%error, "recovering from syntax error");
                    self.errors.push(error);
                    children.extend(self.recover(start));
                }
            }
        }
        children
    }

    /// Skip to the `..` that ends the broken statement.
    fn recover(&mut self, start: usize) -> Vec<RawNode> {
        self.tokens.reset(start);
        let mut span = self.tokens.span();
        while let Some(next) = self.tokens.bump() {
            span = span.merge(&next.span);
            if self.tokens.at_end() || self.tokens.at(Token::DotDot) {
                break;
            }
        }
        let mut nodes = vec![RawNode::error(span, Vec::new())];
        if let Some(terminator) = self.tokens.eat(Token::DotDot) {
            nodes.push(RawNode::leaf(Kind::DotDot, terminator));
        }
        nodes
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

    fn at_argument_name(&self) -> bool {
        matches!(
            self.tokens.peek(),
            Some(Token::ArgumentName | Token::Underscore)
        )
    }

    /// `name: ...`
    fn at_named_param(&self) -> bool {
        self.at_argument_name() && self.tokens.peek_nth(1) == Some(Token::Colon)
    }

    fn terminated_statement(&mut self) -> Result<Vec<RawNode>> {
        let statement = self.statement()?;
        let terminator = self.expect(Token::DotDot, Kind::DotDot, "`..`")?;
        Ok(vec![statement, terminator])
    }

    fn statement(&mut self) -> Result<RawNode> {
        match self.tokens.peek() {
            Some(Token::NamespaceKeyword) => self.namespace_state(),
            Some(Token::TypeKeyword) => self.type_definition(),
            Some(Token::FuncKeyword) => self.function_definition(),
            Some(Token::TypeName) => {
                let nominal = self.nominal_type()?;
                match self.tokens.peek() {
                    Some(Token::Equals) => {
                        let equals = self.token(Kind::Equals);
                        let implementation = self.nominal_type()?;
                        Ok(RawNode::branch(
                            Kind::ImplementationStatement,
                            vec![nominal, equals, implementation],
                        ))
                    }
                    Some(Token::Dot) => {
                        let dot = self.token(Kind::Dot);
                        self.constants_statement(vec![nominal, dot])
                    }
                    _ => Err(self.unexpected(&["`=`", "`.`"])),
                }
            }
            Some(Token::ArgumentName | Token::Underscore) => {
                self.constants_statement(Vec::new())
            }
            _ => Err(self.unexpected(&["statement"])),
        }
    }

    /// `namespace [Module, Other::Module]`
    fn namespace_state(&mut self) -> Result<RawNode> {
        let mut children = vec![
            self.token(Kind::NamespaceKeyword),
            self.expect(Token::OpenBracket, Kind::OpenBracket, "`[`")?,
        ];
        if self.tokens.at(Token::TypeName) {
            children.push(self.nominal_type()?);
        }
        while self.tokens.at(Token::Comma) {
            children.push(self.token(Kind::Comma));
            children.push(self.nominal_type()?);
        }
        children.push(self.expect(Token::CloseBracket, Kind::CloseBracket, "`]`")?);
        Ok(RawNode::branch(Kind::NamespaceState, children))
    }

    /// The optional scope (`Scope.`) has already been consumed into `children`.
    fn constants_statement(&mut self, mut children: Vec<RawNode>) -> Result<RawNode> {
        children.push(self.argument_name()?);
        children.push(self.expect(Token::Equals, Kind::Equals, "`=`")?);
        children.push(self.simple_expression()?);
        Ok(RawNode::branch(Kind::ConstantsStatement, children))
    }

    fn type_definition(&mut self) -> Result<RawNode> {
        let keyword = self.token(Kind::TypeKeyword);
        let name = self.nominal_type()?;
        let definition = if self.tokens.at(Token::TypeName) {
            let mut children = vec![name.with_field(Field::MetaType)];
            while self.tokens.at(Token::TypeName) {
                let case_name = self.nominal_type()?;
                children.push(
                    self.simple_type_definition(case_name)?
                        .with_field(Field::CaseType),
                );
            }
            RawNode::branch(Kind::EnumTypeDefinition, children)
        } else {
            self.simple_type_definition(name)?
        };
        Ok(RawNode::branch(Kind::TypeDefinition, vec![keyword, definition]))
    }

    fn simple_type_definition(&mut self, name: RawNode) -> Result<RawNode> {
        let mut children = vec![name.with_field(Field::Name)];
        if self.at_named_param() {
            children.push(self.param_list()?.with_field(Field::Params));
        }
        Ok(RawNode::branch(Kind::SimpleTypeDefinition, children))
    }

    fn param_list(&mut self) -> Result<RawNode> {
        let mut params = Vec::new();
        while self.at_named_param() {
            params.push(self.param_definition()?);
        }
        Ok(RawNode::branch(Kind::ParamList, params))
    }

    /// `name: Type (default),`
    fn param_definition(&mut self) -> Result<RawNode> {
        let mut children = vec![
            self.argument_name()?.with_field(Field::Name),
            self.expect(Token::Colon, Kind::Colon, "`:`")?,
            self.type_identifier()?.with_field(Field::Type),
        ];
        if self.tokens.at(Token::OpenParen) {
            children.push(self.token(Kind::OpenParen));
            children.push(self.simple_expression()?.with_field(Field::DefaultValue));
            children.push(self.expect(Token::CloseParen, Kind::CloseParen, "`)`")?);
        }
        if self.tokens.at(Token::Comma) {
            children.push(self.token(Kind::Comma));
        }
        Ok(RawNode::branch(Kind::ParamDefinition, children))
    }

    fn argument_name(&mut self) -> Result<RawNode> {
        if self.at_argument_name() {
            Ok(self.token(Kind::ArgumentName))
        } else {
            Err(self.unexpected(&["argument name"]))
        }
    }

    fn type_identifier(&mut self) -> Result<RawNode> {
        self.nested(Self::type_reference)
    }

    fn type_reference(&mut self) -> Result<RawNode> {
        let inner = match self.tokens.peek() {
            Some(Token::NothingKeyword) => self.token(Kind::Nothing),
            Some(Token::NeverKeyword) => self.token(Kind::Never),
            Some(Token::TypeName) => self.nominal_type()?,
            Some(Token::OpenBrace) => self.lambda_structural_type()?,
            Some(Token::OpenBracket) => self.tuple_structural_type()?,
            _ => return Err(self.unexpected(&["type"])),
        };
        Ok(RawNode::branch(Kind::TypeIdentifier, vec![inner]))
    }

    /// `Outer<T>::Inner`
    fn nominal_type(&mut self) -> Result<RawNode> {
        let mut children = vec![self.flat_nominal_type()?];
        while self.tokens.at(Token::ColonColon) {
            children.push(self.token(Kind::ColonColon));
            children.push(self.flat_nominal_type()?);
        }
        Ok(RawNode::branch(Kind::NominalType, children))
    }

    fn flat_nominal_type(&mut self) -> Result<RawNode> {
        let mut children = vec![self
            .expect(Token::TypeName, Kind::TypeName, "type name")?
            .with_field(Field::TypeName)];
        if self.tokens.at(Token::Less) {
            children.push(self.type_arguments()?.with_field(Field::TypeArguments));
        }
        Ok(RawNode::branch(Kind::FlatNominalType, children))
    }

    fn type_arguments(&mut self) -> Result<RawNode> {
        let open = self.token(Kind::Less);
        let mut children = vec![open];
        children.extend(self.type_identifiers(None)?);
        children.push(self.expect(Token::Greater, Kind::Greater, "`>`")?);
        Ok(RawNode::branch(Kind::TypeArguments, children))
    }

    fn tuple_structural_type(&mut self) -> Result<RawNode> {
        let open = self.token(Kind::OpenBracket);
        let mut children = vec![open];
        children.extend(self.type_identifiers(None)?);
        children.push(self.expect(Token::CloseBracket, Kind::CloseBracket, "`]`")?);
        Ok(RawNode::branch(Kind::TupleStructuralType, children))
    }

    /// `{Int, Int} -> Int`
    fn lambda_structural_type(&mut self) -> Result<RawNode> {
        let mut children = vec![self.token(Kind::OpenBrace)];
        if !self.tokens.at(Token::CloseBrace) {
            children.extend(self.type_identifiers(Some(Field::InputType))?);
        }
        children.push(self.expect(Token::CloseBrace, Kind::CloseBrace, "`}`")?);
        children.push(self.expect(Token::Arrow, Kind::Arrow, "`->`")?);
        children.push(self.type_identifier()?.with_field(Field::ReturnType));
        Ok(RawNode::branch(Kind::LambdaStructuralType, children))
    }

    /// One or more comma separated types.
    fn type_identifiers(&mut self, field: Option<Field>) -> Result<Vec<RawNode>> {
        let with_field = |node: RawNode| match field {
            Some(field) => node.with_field(field),
            None => node,
        };
        let mut nodes = vec![with_field(self.type_identifier()?)];
        while self.tokens.at(Token::Comma) {
            nodes.push(with_field(self.token(Kind::Comma)));
            nodes.push(with_field(self.type_identifier()?));
        }
        Ok(nodes)
    }

    fn function_definition(&mut self) -> Result<RawNode> {
        let mut children = vec![self.token(Kind::FuncKeyword)];
        if self.tokens.at(Token::OpenParen) {
            children.push(self.token(Kind::OpenParen));
            children.push(self.type_identifier()?.with_field(Field::InputType));
            children.push(self.expect(Token::CloseParen, Kind::CloseParen, "`)`")?);
        }
        if self.tokens.at(Token::TypeName) {
            children.push(self.nominal_type()?.with_field(Field::Scope));
            children.push(self.expect(Token::Dot, Kind::Dot, "`.`")?.with_field(Field::Scope));
        }
        children.push(self.argument_name()?.with_field(Field::Name));
        children.push(
            self.expect(Token::OpenParen, Kind::OpenParen, "`(`")?
                .with_field(Field::Params),
        );
        if self.at_named_param() {
            children.push(self.param_list()?.with_field(Field::Params));
        }
        children.push(
            self.expect(Token::CloseParen, Kind::CloseParen, "`)`")?
                .with_field(Field::Params),
        );
        children.push(self.expect(Token::FatArrow, Kind::FatArrow, "`=>`")?);
        children.push(self.type_identifier()?.with_field(Field::OutputType));
        children.push(self.expression()?.with_field(Field::Body));
        Ok(RawNode::branch(Kind::FunctionDefinition, children))
    }

    fn expression(&mut self) -> Result<RawNode> {
        self.nested(Self::pipe_chain)
    }

    fn pipe_chain(&mut self) -> Result<RawNode> {
        let mut left = self.pipe_operand()?;
        loop {
            let kind = match self.tokens.peek() {
                Some(Token::Question) => Kind::Question,
                Some(Token::Semicolon) => Kind::Semicolon,
                _ => return Ok(left),
            };
            let operator = RawNode::branch(Kind::PipeOperator, vec![self.token(kind)]);
            let right = self.pipe_operand()?;
            left = RawNode::branch(
                Kind::PipedExpression,
                vec![
                    left.with_field(Field::Left),
                    operator.with_field(Field::Operator),
                    right.with_field(Field::Right),
                ],
            );
        }
    }

    fn pipe_operand(&mut self) -> Result<RawNode> {
        if self.tokens.at(Token::Pipe) {
            self.branched_expression()
        } else {
            self.simple_expression()
        }
    }

    /// `|capture| body, |capture| body, default`
    fn branched_expression(&mut self) -> Result<RawNode> {
        let mut children = vec![self.branch_expression()?];
        while self.tokens.at(Token::Comma) {
            children.push(self.token(Kind::Comma));
            if self.tokens.at(Token::Pipe) {
                children.push(self.branch_expression()?);
            } else {
                children.push(self.simple_expression()?);
                break;
            }
        }
        Ok(RawNode::branch(Kind::BranchedExpression, children))
    }

    fn branch_expression(&mut self) -> Result<RawNode> {
        let open = self.token(Kind::Pipe);
        let capture_group = self.capture_group()?.with_field(Field::CaptureGroup);
        let close = self.expect(Token::Pipe, Kind::Pipe, "`|`")?;
        let body = self.branch_body()?.with_field(Field::Body);
        Ok(RawNode::branch(
            Kind::BranchExpression,
            vec![open, capture_group, close, body],
        ))
    }

    /// A simple or looped expression.
    fn branch_body(&mut self) -> Result<RawNode> {
        if !self.tokens.at(Token::OpenParen) {
            return self.simple_expression();
        }
        let parens = self.parenthisized_expression()?;
        if self.tokens.at(Token::Caret) {
            let caret = self.token(Kind::Caret);
            return Ok(RawNode::branch(Kind::LoopedExpression, vec![parens, caret]));
        }
        let operand = self.postfix(parens)?;
        self.binary_rhs(operand, 0)
    }

    /// The first capture may be a bare type, e.g. `|Some|`.
    fn capture_group(&mut self) -> Result<RawNode> {
        let first = if self.tokens.at(Token::TypeName) {
            let operand = self.primary(true)?;
            let operand = self.postfix(operand)?;
            self.binary_rhs(operand, 0)?
        } else {
            self.simple_expression()?
        };
        let mut children = vec![first];
        while self.tokens.at(Token::Comma) {
            children.push(self.token(Kind::Comma));
            children.push(self.simple_expression()?);
        }
        Ok(RawNode::branch(Kind::CaptureGroup, children))
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

    /// An operator token wrapped in its operator class.
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
            Some(Token::NotKeyword) => self.token(Kind::NotOperator),
            _ => {
                let operand = self.primary(false)?;
                return self.postfix(operand);
            }
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

    /// Calls `command(name: value)` and accesses `value.name`, binding
    /// tighter than any operator.
    fn postfix(&mut self, mut operand: RawNode) -> Result<RawNode> {
        loop {
            operand = match self.tokens.peek() {
                Some(Token::OpenParen) => {
                    let mut children = vec![
                        operand.with_field(Field::Command),
                        self.token(Kind::OpenParen),
                    ];
                    if self.at_named_param() {
                        children.push(self.call_param_list()?.with_field(Field::Params));
                    }
                    children.push(self.expect(Token::CloseParen, Kind::CloseParen, "`)`")?);
                    RawNode::branch(Kind::CallExpression, children)
                }
                Some(Token::Dot) => {
                    let dot = self.token(Kind::Dot);
                    let name = self.argument_name()?;
                    RawNode::branch(Kind::AccessExpression, vec![operand, dot, name])
                }
                _ => return Ok(operand),
            };
        }
    }

    fn call_param_list(&mut self) -> Result<RawNode> {
        let mut params = Vec::new();
        while self.at_named_param() {
            let mut children = vec![
                self.argument_name()?.with_field(Field::Name),
                self.expect(Token::Colon, Kind::Colon, "`:`")?,
                self.simple_expression()?.with_field(Field::Value),
            ];
            if self.tokens.at(Token::Comma) {
                children.push(self.token(Kind::Comma));
            }
            params.push(RawNode::branch(Kind::CallParam, children));
        }
        Ok(RawNode::branch(Kind::CallParamList, params))
    }

    /// A type in expression position must be called or accessed, unless
    /// `bare_type` allows it to stand alone.
    fn primary(&mut self, bare_type: bool) -> Result<RawNode> {
        match self.tokens.peek() {
            Some(Token::NothingKeyword) => Ok(self.token(Kind::Nothing)),
            Some(Token::NeverKeyword) => Ok(self.token(Kind::Never)),
            Some(Token::Number) => {
                let is_float = self.tokens.text().map_or(false, |text| text.contains('.'));
                Ok(self.token(if is_float {
                    Kind::FloatLiteral
                } else {
                    Kind::IntLiteral
                }))
            }
            Some(Token::String) => Ok(self.token(Kind::StringLiteral)),
            Some(Token::TrueKeyword) => Ok(self.bool_literal(Kind::TrueKeyword)),
            Some(Token::FalseKeyword) => Ok(self.bool_literal(Kind::FalseKeyword)),
            Some(Token::ArgumentName | Token::Underscore) => Ok(self.token(Kind::ArgumentName)),
            Some(Token::OpenBracket) => self.tuple_literal(),
            Some(Token::OpenParen) => self.parenthisized_expression(),
            Some(Token::OpenBrace) => self.lambda_expression(),
            Some(Token::TypeName) => {
                let nominal = self.nominal_type()?;
                if bare_type || self.tokens.at(Token::OpenParen) || self.tokens.at(Token::Dot) {
                    Ok(nominal)
                } else {
                    Err(self.unexpected(&["`(`", "`.`"]))
                }
            }
            _ => Err(self.unexpected(&["expression"])),
        }
    }

    fn bool_literal(&mut self, kind: Kind) -> RawNode {
        let token = self.token(kind);
        RawNode::branch(Kind::BoolLiteral, vec![token])
    }

    /// `[a, b, c]`
    fn tuple_literal(&mut self) -> Result<RawNode> {
        let mut children = vec![self.token(Kind::OpenBracket), self.expression()?];
        while self.tokens.at(Token::Comma) {
            children.push(self.token(Kind::Comma));
            children.push(self.expression()?);
        }
        children.push(self.expect(Token::CloseBracket, Kind::CloseBracket, "`]`")?);
        Ok(RawNode::branch(Kind::TupleLiteral, children))
    }

    fn parenthisized_expression(&mut self) -> Result<RawNode> {
        let open = self.token(Kind::OpenParen);
        let expression = self.expression()?;
        let close = self.expect(Token::CloseParen, Kind::CloseParen, "`)`")?;
        Ok(RawNode::branch(
            Kind::ParenthisizedExpression,
            vec![open, expression, close],
        ))
    }

    fn lambda_expression(&mut self) -> Result<RawNode> {
        let open = self.token(Kind::OpenBrace);
        let expression = self.expression()?;
        let close = self.expect(Token::CloseBrace, Kind::CloseBrace, "`}`")?;
        Ok(RawNode::branch(
            Kind::LambdaExpression,
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
        assert_errors!("namespace [Core, Std::Io]..", 0);
        assert_errors!("namespace []..", 0);
        assert_errors!("type Point x: Int, y: Int..", 0);
        assert_errors!("type Shape Circle r: Float Square side: Float..", 0);
        assert_errors!("type Pair a: List<Int>, b: {Int, Int} -> [Int, Bool]..", 0);
        assert_errors!("Point = Printable..", 0);
        assert_errors!("pi = 3.14..", 0);
        assert_errors!("Math.tau = 2 * Math.pi..", 0);
        assert_errors!("func main() => Nothing print(value: 1)..", 0);
        assert_errors!(
            "func (Int) Math.clamp(lo: Int, hi: Int (100)) => Int in ; |x| x < lo, x..",
            0
        );
        assert_errors!("func f() => Int n ; |0| 1, |_| (n - 1)^ ? g()..", 0);
        assert_errors!("func f() => [Int] [1, {it * 2}, Point(x: 1).x]..", 0);
        assert_errors!("", 0);
    }

    #[test]
    fn it_rejects_bare_types_in_expressions() {
        assert_errors!("x = Point..", 1);
        assert_errors!("func f() => Int |Some| 1, 0..", 0);
    }

    #[test]
    fn it_recovers_at_the_next_terminator() {
        let output = assert_errors!("x = = 1..\ny = 2..", 1);
        let kinds = output
            .root
            .children
            .iter()
            .map(|child| child.is_error())
            .collect::<Vec<_>>();
        assert_eq!(kinds, [true, false, false, false]);
        assert_eq!(output.root.children[0].span, Span::new(0, 7));
    }

    #[test]
    fn it_requires_terminators() {
        assert_errors!("x = 1", 1);
        assert_errors!("..", 1);
    }

    #[test]
    fn it_limits_nesting() {
        let deep = format!("x = {}1{}..\ny = 2..", "(".repeat(1000), ")".repeat(1000));
        let output = assert_errors!(&deep, 1);
        let kinds = output
            .root
            .children
            .iter()
            .map(|child| child.is_error())
            .collect::<Vec<_>>();
        assert_eq!(kinds, [true, false, false, false]);
        assert_eq!(output.errors[0].expected, ["at most 128 levels of nesting"]);

        assert_errors!(&format!("x = {}1{}..", "(".repeat(50), ")".repeat(50)), 0);
        assert_errors!(&format!("x = {}1..", "- ".repeat(1000)), 1);
        assert_errors!(&format!("type T x: {}Int..", "List<".repeat(1000)), 1);
    }

    #[test]
    fn it_parses_long_chains() {
        assert_errors!(&format!("x = 1{}..", " + 1".repeat(100_000)), 0);
        assert_errors!(&format!("x = f(){}..", ".y".repeat(100_000)), 0);
    }
}
