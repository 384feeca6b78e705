//! Shared identifiers and small value types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a node inside a [`crate::tree::CommandTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result code returned by a command handler. The meaning of individual values
/// belongs to the host; interception passes them through unchanged.
pub type ResultCode = i32;

/// Conventional success code used by the reference tree.
pub const SINGLE_SUCCESS: ResultCode = 1;

/// Alternate access paths through which the same logical command is exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    /// Client-facing projection of the node.
    ClientMirror,
    /// Memoized wrapped form.
    WrappedCache,
    /// Memoized unwrapped form.
    UnwrappedCache,
}

impl VariantKind {
    /// Propagation order.
    pub const ALL: [VariantKind; 3] = [
        VariantKind::ClientMirror,
        VariantKind::WrappedCache,
        VariantKind::UnwrappedCache,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            VariantKind::ClientMirror => 0,
            VariantKind::WrappedCache => 1,
            VariantKind::UnwrappedCache => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VariantKind::ClientMirror => "client_mirror",
            VariantKind::WrappedCache => "wrapped_cache",
            VariantKind::UnwrappedCache => "unwrapped_cache",
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
