use crate::ParseOutput;
use thiserror::Error;

/// The language ABI version produced by the grammars in this workspace.
pub const LANGUAGE_VERSION: usize = 14;

/// The oldest language ABI version a [Parser](crate::Parser) still accepts.
pub const MIN_COMPATIBLE_LANGUAGE_VERSION: usize = 13;

/// Name of the error symbol, always at index 0 of a symbol table.
pub const ERROR_KIND: &str = "ERROR";

/// An entry in a grammar's symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeKind {
    /// The node kind as it appears in trees, e.g. `"call_expression"` or `"("`.
    pub name: &'static str,
    /// Named nodes correspond to grammar rules, anonymous ones to literal tokens.
    pub named: bool,
}

/// Index into a grammar's symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KindId(pub u16);

impl KindId {
    /// The `ERROR` symbol.
    pub const ERROR: Self = Self(0);
}

/// Index into a grammar's field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId(pub u16);

/// Maps nodes to a highlight capture name.
///
/// A rule matches a node when the node's kind equals `kind` and, if given,
/// the node sits in `field` and its parent is a `parent` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightRule {
    /// Node kind to match.
    pub kind: &'static str,
    /// Required kind of the parent node.
    pub parent: Option<&'static str>,
    /// Required field name of the node.
    pub field: Option<&'static str>,
    /// Capture name, e.g. `"keyword"` or `"punctuation.bracket"`.
    pub capture: &'static str,
}

impl HighlightRule {
    /// Match every `kind` node.
    pub const fn new(kind: &'static str, capture: &'static str) -> Self {
        Self {
            kind,
            parent: None,
            field: None,
            capture,
        }
    }

    /// Only match nodes whose parent is a `parent` node.
    pub const fn under(self, parent: &'static str) -> Self {
        Self {
            parent: Some(parent),
            ..self
        }
    }

    /// Only match nodes stored in `field`.
    pub const fn in_field(self, field: &'static str) -> Self {
        Self {
            field: Some(field),
            ..self
        }
    }
}

/// The entry point a grammar exposes for parsing source text.
pub type ParseFn = fn(&str) -> ParseOutput;

/// Static description of a grammar.
///
/// Grammar crates define one of these as a `static` and hand out a reference
/// to it through their [LanguageFn].
pub struct LanguageDef {
    /// Registry name, e.g. `"peopl"`.
    pub name: &'static str,
    /// ABI version, see [LANGUAGE_VERSION].
    pub version: usize,
    /// The symbol table. Index 0 must be [ERROR_KIND].
    pub node_kinds: &'static [NodeKind],
    /// The field table.
    pub field_names: &'static [&'static str],
    /// File extensions (without the leading dot) handled by this grammar.
    pub file_types: &'static [&'static str],
    /// TextMate style scope, e.g. `"source.peopl"`.
    pub scope: &'static str,
    /// Highlight rules, most specific first.
    pub highlights: &'static [HighlightRule],
    /// The parse function.
    pub parse: ParseFn,
}

impl std::fmt::Debug for LanguageDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageDef")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("node_kinds", &self.node_kinds.len())
            .field("field_names", &self.field_names)
            .field("file_types", &self.file_types)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

/// A grammar's language accessor.
///
/// The accessor may come up empty, in which case [Language::new] reports
/// [LanguageError::Missing].
#[derive(Clone, Copy)]
pub struct LanguageFn(fn() -> Option<&'static LanguageDef>);

impl LanguageFn {
    /// Wrap a raw accessor function.
    pub const fn from_raw(accessor: fn() -> Option<&'static LanguageDef>) -> Self {
        Self(accessor)
    }

    /// Unwrap the raw accessor function.
    pub fn into_raw(self) -> fn() -> Option<&'static LanguageDef> {
        self.0
    }
}

impl std::fmt::Debug for LanguageFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("LanguageFn").finish()
    }
}

/// Reasons a grammar can't be turned into a [Language].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LanguageError {
    /// The accessor didn't return a grammar.
    #[error("language accessor returned no grammar")]
    Missing,
    /// The grammar has no name or no symbols.
    #[error("grammar {name:?} is empty")]
    Empty {
        /// The (possibly empty) grammar name.
        name: &'static str,
    },
    /// The grammar was built for an incompatible ABI.
    #[error("incompatible language version {version}, expected a version between {min} and {max}")]
    Version {
        /// The grammar's version.
        version: usize,
        /// Oldest supported version.
        min: usize,
        /// Newest supported version.
        max: usize,
    },
}

/// A validated handle to a grammar.
#[derive(Clone, Copy)]
pub struct Language(&'static LanguageDef);

impl Language {
    /// Invoke `language_fn` and validate what it returns.
    pub fn new(language_fn: LanguageFn) -> Result<Self, LanguageError> {
        let def = (language_fn.into_raw())().ok_or(LanguageError::Missing)?;
        Self::from_def(def)
    }

    /// Validate a grammar definition.
    pub fn from_def(def: &'static LanguageDef) -> Result<Self, LanguageError> {
        let has_error_symbol = matches!(
            def.node_kinds.first(),
            Some(NodeKind { name: ERROR_KIND, .. })
        );
        if def.name.is_empty() || def.node_kinds.len() < 2 || !has_error_symbol {
            return Err(LanguageError::Empty { name: def.name });
        }
        let language = Self(def);
        language.check_version()?;
        Ok(language)
    }

    /// Is this language's ABI version supported?
    pub fn check_version(&self) -> Result<(), LanguageError> {
        let version = self.0.version;
        if (MIN_COMPATIBLE_LANGUAGE_VERSION..=LANGUAGE_VERSION).contains(&version) {
            Ok(())
        } else {
            Err(LanguageError::Version {
                version,
                min: MIN_COMPATIBLE_LANGUAGE_VERSION,
                max: LANGUAGE_VERSION,
            })
        }
    }

    /// The grammar name.
    pub fn name(&self) -> &'static str {
        self.0.name
    }

    /// The ABI version.
    pub fn version(&self) -> usize {
        self.0.version
    }

    /// Number of entries in the symbol table.
    pub fn node_kind_count(&self) -> usize {
        self.0.node_kinds.len()
    }

    /// Name of the node kind with the given id.
    pub fn node_kind_for_id(&self, id: KindId) -> Option<&'static str> {
        self.0.node_kinds.get(id.0 as usize).map(|kind| kind.name)
    }

    /// Is the node kind with the given id named?
    pub fn node_kind_is_named(&self, id: KindId) -> bool {
        self.0
            .node_kinds
            .get(id.0 as usize)
            .map_or(false, |kind| kind.named)
    }

    /// Look up a node kind by name.
    pub fn id_for_node_kind(&self, name: &str, named: bool) -> Option<KindId> {
        self.0
            .node_kinds
            .iter()
            .position(|kind| kind.name == name && kind.named == named)
            .map(|index| KindId(index as u16))
    }

    /// Iterate over the symbol table.
    pub fn node_kinds(&self) -> impl Iterator<Item = &'static NodeKind> {
        self.0.node_kinds.iter()
    }

    /// Number of fields.
    pub fn field_count(&self) -> usize {
        self.0.field_names.len()
    }

    /// Name of the field with the given id.
    pub fn field_name_for_id(&self, id: FieldId) -> Option<&'static str> {
        self.0.field_names.get(id.0 as usize).copied()
    }

    /// Look up a field by name.
    pub fn field_id_for_name(&self, name: &str) -> Option<FieldId> {
        self.0
            .field_names
            .iter()
            .position(|field| *field == name)
            .map(|index| FieldId(index as u16))
    }

    /// File extensions handled by this grammar.
    pub fn file_types(&self) -> &'static [&'static str] {
        self.0.file_types
    }

    /// The grammar's scope name.
    pub fn scope(&self) -> &'static str {
        self.0.scope
    }

    /// Highlight rules.
    pub fn highlights(&self) -> &'static [HighlightRule] {
        self.0.highlights
    }

    pub(crate) fn parse_fn(&self) -> ParseFn {
        self.0.parse
    }
}

impl PartialEq for Language {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl Eq for Language {}

impl std::fmt::Debug for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Language")
            .field("name", &self.0.name)
            .field("version", &self.0.version)
            .finish()
    }
}
