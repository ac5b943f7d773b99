use peopl_languages::{Grammar, LoadError};
use peopl_syntax::{Language, LanguageDef, LanguageError, LanguageFn, Parser};

#[test]
fn test_can_load_grammar() {
    let language = Language::new(peopl_lang_peopl::LANGUAGE).expect("Error loading PeoPl grammar");
    assert_eq!(language.name(), "peopl");
    assert_eq!(language.file_types(), ["ppl", "peopl"]);

    let mut parser = Parser::new();
    parser
        .set_language(language)
        .expect("Error loading PeoPl grammar");
    let tree = parser.parse("func main() => Nothing print(line: \"hi\")..").unwrap();
    assert!(!tree.root_node().has_error());
}

#[test]
fn test_reports_a_missing_grammar() {
    fn missing() -> Option<&'static LanguageDef> {
        None
    }
    assert!(matches!(
        Language::new(LanguageFn::from_raw(missing)),
        Err(LanguageError::Missing)
    ));

    let peopl = peopl_languages::get("peopl").unwrap();
    let broken = Grammar {
        language_fn: LanguageFn::from_raw(missing),
        ..*peopl
    };
    let err = broken.language().unwrap_err();
    assert_eq!(err.to_string(), "Error loading PeoPl grammar");
    assert!(matches!(
        err,
        LoadError::Invalid {
            source: LanguageError::Missing,
            ..
        }
    ));
    assert!(peopl.language().is_ok());
}
