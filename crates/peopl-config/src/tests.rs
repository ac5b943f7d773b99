mod macros {
    macro_rules! assert_parses {
        ($config:expr) => {{
            $crate::tests::macros::assert_parses!($config, _)
        }};
        ($config:expr, $want:pat_param) => {{
            let result = $crate::Config::parse("peopl.toml", $config);
            assert!(matches!(result, Ok($want)), "{:#?}", result);
            result.unwrap()
        }};
    }
    pub(super) use assert_parses;

    macro_rules! assert_error {
        ($config:expr) => {{
            let result = $crate::Config::parse("peopl.toml", $config);
            assert!(matches!(result, Err(_)), "{:#?}", result);
            result.unwrap_err()
        }};
    }
    pub(super) use assert_error;
}

mod successes {
    use super::macros::assert_parses;
    use crate::Config;

    #[test]
    fn it_parses_an_empty_config() {
        let config = assert_parses!("");
        assert!(config.required_peopl_version.is_none());
        assert!(config.default_language.is_none());
        assert!(config.file_types.is_empty());
    }

    #[test]
    fn it_parses_peopl_version_requirements() {
        assert_parses!(
            r#"
            peopl-version = "0.1"
        "#,
            Config {
                required_peopl_version: Some(_),
                ..
            }
        );
        assert_parses!(
            r#"
            peopl-version = "^0.1"
        "#
        );
        assert_parses!(
            r#"
            peopl-version = ">=0.1, <0.3"
        "#
        );
    }

    #[test]
    fn it_parses_a_default_language() {
        let config = assert_parses!(
            r#"
            default-language = "simpl"
        "#
        );
        assert_eq!(
            config.default_language.as_ref().map(|name| name.as_str()),
            Some("simpl")
        );
    }

    #[test]
    fn it_parses_file_types() {
        let config = assert_parses!(
            r#"
            [file-types]
            peopl = ["pp", ".people"]
            simpl = ["smp"]
        "#
        );
        similar_asserts::assert_eq!(
            config.extra_file_types().collect::<Vec<_>>(),
            vec![("peopl", "pp"), ("peopl", "people"), ("simpl", "smp")]
        );
    }

    #[test]
    fn it_serializes_without_empty_tables() {
        let config = assert_parses!(
            r#"
            default-language = "peopl"
        "#
        );
        let rendered = toml::to_string(&config).unwrap();
        assert_eq!(rendered, "default-language = \"peopl\"\n");
    }
}

mod errors {
    use super::macros::assert_error;

    #[test]
    fn it_rejects_unknown_fields() {
        assert_error!(
            r#"
            name = "test"
        "#
        );
        assert_error!(
            r#"
            [codegen-js]
            dist-dir = "dist"
        "#
        );
    }

    #[test]
    fn it_rejects_bad_language_names() {
        assert_error!(
            r#"
            default-language = "PeoPl"
        "#
        );
        assert_error!(
            r#"
            [file-types]
            peo-pl = ["ppl"]
        "#
        );
    }

    #[test]
    fn it_rejects_bad_version_requirements() {
        assert_error!(
            r#"
            peopl-version = "one point oh"
        "#
        );
    }

    #[test]
    fn it_rejects_bad_file_types() {
        assert_error!(
            r#"
            [file-types]
            peopl = "ppl"
        "#
        );
    }
}
