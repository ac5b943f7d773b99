use peopl_languages::{Grammar, LoadError};
use peopl_syntax::{Language, LanguageDef, LanguageError, LanguageFn, Parser};

#[test]
fn test_can_load_grammar() {
    let language = Language::new(peopl_lang_simpl::LANGUAGE).expect("Error loading Simpl grammar");
    assert_eq!(language.name(), "simpl");

    let mut parser = Parser::new();
    parser
        .set_language(language)
        .expect("Error loading Simpl grammar");
    let tree = parser.parse("type Point x: Int y: Int.\n").unwrap();
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

    let simpl = peopl_languages::get("simpl").unwrap();
    let broken = Grammar {
        language_fn: LanguageFn::from_raw(missing),
        ..*simpl
    };
    let err = broken.language().unwrap_err();
    assert_eq!(err.to_string(), "Error loading Simpl grammar");
    assert!(matches!(
        err,
        LoadError::Invalid {
            source: LanguageError::Missing,
            ..
        }
    ));
    assert!(simpl.language().is_ok());
}
