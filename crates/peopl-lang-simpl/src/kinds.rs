peopl_syntax::node_kinds! {
    /// Simpl node kinds.
    pub enum Kind {
        SourceFile => ("source_file", true),
        Comment => ("comment", true),
        TypeDeclaration => ("type_declaration", true),
        ContractDeclaration => ("contract_declaration", true),
        FunctionDeclaration => ("function_declaration", true),
        ParamList => ("param_list", true),
        ParamDeclaration => ("param_declaration", true),
        TypeIdentifier => ("type_identifier", true),
        FieldIdentifier => ("field_identifier", true),
        InlineFunctionDeclaration => ("inline_function_declaration", true),
        LoopedExpression => ("looped_expression", true),
        ParenthisedExpression => ("parenthised_expression", true),
        PipeExpression => ("pipe_expression", true),
        SubpipeBranchExpression => ("subpipe_branch_expresssion", true),
        SubpipeExpression => ("subpipe_expression", true),
        CallExpression => ("call_expression", true),
        ParamListCall => ("param_list_call", true),
        ParamDefinition => ("param_definition", true),
        UnaryExpression => ("unary_expression", true),
        BinaryExpression => ("binary_expression", true),
        True => ("true", true),
        False => ("false", true),
        IntLiteral => ("int_literal", true),
        FloatLiteral => ("float_literal", true),
        StringLiteral => ("string_literal", true),
        ArrayLiteral => ("array_literal", true),
        MultiplicativeOperator => ("multiplicative_operator", true),
        AdditiveOperator => ("additive_operator", true),
        ComparativeOperator => ("comparative_operator", true),
        AndOperator => ("and_operator", true),
        OrOperator => ("or_operator", true),

        TypeKeyword => ("type", false),
        ContractKeyword => ("contract", false),
        FuncKeyword => ("func", false),
        NotKeyword => ("not", false),
        Dot => (".", false),
        Colon => (":", false),
        Comma => (",", false),
        Semicolon => (";", false),
        Pipe => ("|", false),
        Caret => ("^", false),
        OpenParen => ("(", false),
        CloseParen => (")", false),
        OpenBrace => ("{", false),
        CloseBrace => ("}", false),
        OpenBracket => ("[", false),
        CloseBracket => ("]", false),
        Star => ("*", false),
        Slash => ("/", false),
        Percent => ("%", false),
        Plus => ("+", false),
        Minus => ("-", false),
        Equals => ("=", false),
        NotEquals => ("!=", false),
        Greater => (">", false),
        GreaterEquals => (">=", false),
        Less => ("<", false),
        LessEquals => ("<=", false),
    }
}

peopl_syntax::fields! {
    /// Simpl field names.
    pub enum Field {
        Name => "name",
        Params => "params",
        OnType => "on_type",
        Return => "return",
        Body => "body",
        Type => "type",
        Left => "left",
        Right => "right",
        CaptureGroup => "capture_group",
        Subpipe => "subpipe",
        Callee => "callee",
        Value => "value",
        Operator => "operator",
        Operand => "operand",
    }
}
