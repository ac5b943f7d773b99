use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use validated_newtype::validated_newtype;

/// Regular expression string for language names.
pub static LANGUAGE_NAME_RE: &str = "^[a-z][a-z0-9_]*$";

lazy_static! {
    /// Regular expression for language names.
    pub static ref LANGUAGE_NAME_REGEX: Regex = Regex::new(LANGUAGE_NAME_RE).unwrap();
}

validated_newtype! {
    /// A language name must start with a lower case letter, and contain only
    /// lower case letters, numbers and underscores.
    #[derive(Clone, Debug, PartialOrd, Ord, PartialEq, Eq, Hash, Serialize)]
    String => pub LanguageName
    if |string: &str| LANGUAGE_NAME_REGEX.is_match(string);
    error "language name must start with a lowercase letter, and contain lower case letters, numbers and underscores"
}

impl LanguageName {
    /// Validate a language name given on the command line.
    pub fn checked(name: &str) -> Option<Self> {
        LANGUAGE_NAME_REGEX
            .is_match(name)
            .then(|| LanguageName(name.to_owned()))
    }
    /// Get the inner string of a [LanguageName].
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::LanguageName;

    #[test]
    fn it_checks_language_names() {
        assert_eq!(
            LanguageName::checked("peopl").as_ref().map(LanguageName::as_str),
            Some("peopl")
        );
        assert!(LanguageName::checked("simpl_2").is_some());
        assert!(LanguageName::checked("PeoPl").is_none());
        assert!(LanguageName::checked("2peopl").is_none());
        assert!(LanguageName::checked("peo-pl").is_none());
        assert!(LanguageName::checked("").is_none());
    }
}
