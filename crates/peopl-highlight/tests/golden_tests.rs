datatest_stable::harness!(test, "tests/golden", r"^.*\.(simpl|ppl)$");

fn test(path: &std::path::Path) -> datatest_stable::Result<()> {
    let source = std::fs::read_to_string(path)?;

    let mut actual_path = path.to_path_buf();
    actual_path.set_extension("html");
    let actual = std::fs::read_to_string(&actual_path)?;

    let grammar = peopl_languages::for_path(path, [] as [(&str, &str); 0])
        .ok_or("no grammar for golden file")?;
    let mut parser = peopl_languages::try_init_parser(grammar.name)?;
    let tree = parser.parse(&source).ok_or("parser has no language")?;
    let expected = peopl_highlight::highlight(&source, &tree, &mk_tag_map());

    if actual != expected {
        if std::env::var("UPDATE_GOLDEN").is_ok() {
            std::fs::write(&actual_path, &expected)?;
        }
        // Tests will pass on the next run
        return Err(DiffError { expected, actual }.into());
    }
    Ok(())
}

fn mk_tag_map() -> peopl_highlight::TagMap<'static> {
    use peopl_highlight::{Tags, TokenType::*};
    [
        (Comment, "<Comment>", "</Comment>"),
        (Keyword, "<Keyword>", "</Keyword>"),
        (Operator, "<Operator>", "</Operator>"),
        (Type, "<Type>", "</Type>"),
        (ConstantBuiltin, "<ConstantBuiltin>", "</ConstantBuiltin>"),
        (Function, "<Function>", "</Function>"),
        (VariableParameter, "<VariableParameter>", "</VariableParameter>"),
        (Variable, "<Variable>", "</Variable>"),
        (Property, "<Property>", "</Property>"),
        (String, "<String>", "</String>"),
        (Number, "<Number>", "</Number>"),
        (Boolean, "<Boolean>", "</Boolean>"),
        (PunctuationBracket, "<PunctuationBracket>", "</PunctuationBracket>"),
        (PunctuationDelimiter, "<PunctuationDelimiter>", "</PunctuationDelimiter>"),
    ]
    .into_iter()
    .map(|(token_type, start, end)| (token_type, Tags { start, end }))
    .collect()
}

struct DiffError {
    expected: String,
    actual: String,
}

impl std::fmt::Debug for DiffError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let diff = similar_asserts::SimpleDiff::from_str(
            &self.expected,
            &self.actual,
            "expected",
            "actual",
        );
        write!(f, "{}", diff)
    }
}

impl std::fmt::Display for DiffError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

impl std::error::Error for DiffError {}
