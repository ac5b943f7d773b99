/// Declare a grammar's symbol table.
///
/// Generates a `#[repr(u16)]` enum whose discriminants index into the
/// generated `TABLE`. The `ERROR` symbol is prepended as variant `Error`.
///
/// ```ignore
/// peopl_syntax::node_kinds! {
///     pub enum Kind {
///         SourceFile => ("source_file", true),
///         OpenParen => ("(", false),
///     }
/// }
/// ```
#[macro_export]
macro_rules! node_kinds {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => ($kind:literal, $named:literal)),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(u16)]
        $vis enum $name {
            Error,
            $($variant),*
        }

        impl $name {
            /// The symbol table, indexed by discriminant.
            pub const TABLE: &'static [$crate::NodeKind] = &[
                $crate::NodeKind { name: $crate::ERROR_KIND, named: true },
                $($crate::NodeKind { name: $kind, named: $named }),*
            ];
        }

        impl From<$name> for $crate::KindId {
            fn from(kind: $name) -> Self {
                $crate::KindId(kind as u16)
            }
        }
    };
}

/// Declare a grammar's field table.
///
/// Generates a `#[repr(u16)]` enum whose discriminants index into the
/// generated `TABLE`.
#[macro_export]
macro_rules! fields {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $field:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(u16)]
        $vis enum $name {
            $($variant),*
        }

        impl $name {
            /// The field table, indexed by discriminant.
            pub const TABLE: &'static [&'static str] = &[$($field),*];
        }

        impl From<$name> for $crate::FieldId {
            fn from(field: $name) -> Self {
                $crate::FieldId(field as u16)
            }
        }
    };
}
