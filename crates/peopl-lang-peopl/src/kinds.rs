peopl_syntax::node_kinds! {
    /// PeoPl node kinds.
    pub enum Kind {
        SourceFile => ("source_file", true),
        Comment => ("comment", true),
        NamespaceState => ("namespace_state", true),
        ImplementationStatement => ("implementation_statement", true),
        ConstantsStatement => ("constants_statement", true),
        TypeDefinition => ("type_definition", true),
        EnumTypeDefinition => ("enum_type_definition", true),
        SimpleTypeDefinition => ("simple_type_definition", true),
        ParamList => ("param_list", true),
        ParamDefinition => ("param_definition", true),
        ArgumentName => ("argument_name", true),
        TypeName => ("type_name", true),
        TypeIdentifier => ("type_identifier", true),
        NominalType => ("nominal_type", true),
        FlatNominalType => ("flat_nominal_type", true),
        TypeArguments => ("type_arguments", true),
        TupleStructuralType => ("tuple_structural_type", true),
        LambdaStructuralType => ("lambda_structural_type", true),
        FunctionDefinition => ("function_definition", true),
        Nothing => ("nothing", true),
        Never => ("never", true),
        BoolLiteral => ("bool_literal", true),
        IntLiteral => ("int_literal", true),
        FloatLiteral => ("float_literal", true),
        StringLiteral => ("string_literal", true),
        TupleLiteral => ("tuple_literal", true),
        UnaryExpression => ("unary_expression", true),
        BinaryExpression => ("binary_expression", true),
        MultiplicativeOperator => ("multiplicative_operator", true),
        AdditiveOperator => ("additive_operator", true),
        ComparativeOperator => ("comparative_operator", true),
        NotOperator => ("not_operator", true),
        AndOperator => ("and_operator", true),
        OrOperator => ("or_operator", true),
        ParenthisizedExpression => ("parenthisized_expression", true),
        CallExpression => ("call_expression", true),
        CallParamList => ("call_param_list", true),
        CallParam => ("call_param", true),
        PipedExpression => ("piped_expression", true),
        PipeOperator => ("pipe_operator", true),
        BranchedExpression => ("branched_expression", true),
        BranchExpression => ("branch_expression", true),
        CaptureGroup => ("capture_group", true),
        LoopedExpression => ("looped_expression", true),
        LambdaExpression => ("lambda_expression", true),
        AccessExpression => ("access_expression", true),

        NamespaceKeyword => ("namespace", false),
        TypeKeyword => ("type", false),
        FuncKeyword => ("func", false),
        TrueKeyword => ("true", false),
        FalseKeyword => ("false", false),
        DotDot => ("..", false),
        Dot => (".", false),
        Comma => (",", false),
        Colon => (":", false),
        ColonColon => ("::", false),
        Arrow => ("->", false),
        FatArrow => ("=>", false),
        OpenBracket => ("[", false),
        CloseBracket => ("]", false),
        OpenBrace => ("{", false),
        CloseBrace => ("}", false),
        OpenParen => ("(", false),
        CloseParen => (")", false),
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
        Question => ("?", false),
        Semicolon => (";", false),
        Pipe => ("|", false),
        Caret => ("^", false),
    }
}

peopl_syntax::fields! {
    /// PeoPl field names.
    pub enum Field {
        Body => "body",
        CaptureGroup => "capture_group",
        CaseType => "case_type",
        Command => "command",
        DefaultValue => "default_value",
        InputType => "input_type",
        Left => "left",
        MetaType => "meta_type",
        Name => "name",
        Operand => "operand",
        Operator => "operator",
        OutputType => "output_type",
        Params => "params",
        ReturnType => "return_type",
        Right => "right",
        Scope => "scope",
        Type => "type",
        TypeArguments => "type_arguments",
        TypeName => "type_name",
        Value => "value",
    }
}
