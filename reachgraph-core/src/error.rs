//! Error types for the reachgraph core library.
//!
//! Defines the error enum exposed by the public API, its stable codes, and a
//! convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::graph::NodeId;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced by graph mutation, selection handling and path
/// queries.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// A node with the requested label already exists.
    #[error("a node labelled `{label}` already exists")]
    DuplicateLabel {
        /// The label that was already taken.
        label: String,
    },
    /// An operation referenced a node that is not part of the graph.
    #[error("node {node} is not part of the graph")]
    UnknownNode {
        /// The missing node.
        node: NodeId,
    },
    /// A path query named a label absent from the closure header.
    #[error("label `{label}` is not present in the calculated matrix")]
    NotFound {
        /// The label that could not be resolved.
        label: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// A node with the requested label already exists.
        DuplicateLabel => DuplicateLabel { .. } => "GRAPH_DUPLICATE_LABEL",
        /// An operation referenced a node that is not part of the graph.
        UnknownNode => UnknownNode { .. } => "GRAPH_UNKNOWN_NODE",
        /// A path query named a label absent from the closure header.
        NotFound => NotFound { .. } => "GRAPH_LABEL_NOT_FOUND",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GraphError>;
