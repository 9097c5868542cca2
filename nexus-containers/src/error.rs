//! Error types.

use thiserror::Error;

/// Why a [`Handle`](crate::Handle) was rejected by a list.
///
/// Mutating list operations treat both variants as a no-op; this type is
/// only surfaced by [`LinkedList::check`](crate::LinkedList::check).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleError {
    /// The handle was issued by a different list.
    #[error("handle belongs to a different list")]
    Foreign,

    /// The element the handle referred to has been erased.
    #[error("element was already erased from this list")]
    Stale,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            HandleError::Foreign.to_string(),
            "handle belongs to a different list"
        );
        assert_eq!(
            HandleError::Stale.to_string(),
            "element was already erased from this list"
        );
    }
}
