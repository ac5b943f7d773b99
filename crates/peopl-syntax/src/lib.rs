//! A small parsing runtime shared by the peopl grammars.
//!
//! Grammar crates hand out a [LanguageFn] accessor. Feeding that accessor to
//! [Language::new] yields a validated language handle, which a [Parser] uses
//! to turn source text into a concrete syntax [Tree].
#![warn(missing_docs)]

pub mod corpus;
mod error;
mod language;
mod macros;
mod parser;
mod raw;
mod span;
mod stream;
mod tree;

pub use error::*;
pub use language::*;
pub use parser::*;
pub use raw::*;
pub use span::*;
pub use stream::*;
pub use tree::*;
