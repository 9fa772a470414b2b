//! Error type shared by every collection in the crate.
//!
//! Absence is never an error here: lookups (`contains`, `get`, `remove` by
//! key) report it through `bool`/`Option`. A failed call leaves the
//! structure exactly as it was before the call.

use thiserror::Error;

/// Errors returned by fallible collection operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// Removal or access on a structure holding zero elements.
    #[error("container is empty")]
    Empty,

    /// Indexed access at or past the current length.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Length at the time of the call.
        len: usize,
    },

    /// Edge endpoint that does not name an existing vertex.
    #[error("vertex {vertex} out of range for graph with {vertex_count} vertices")]
    InvalidVertex {
        /// The offending vertex index.
        vertex: usize,
        /// Number of vertices at the time of the call.
        vertex_count: usize,
    },

    /// The allocator refused a growth request.
    #[error("memory allocation failed")]
    AllocationFailed,

    /// The requested capacity does not fit in `isize::MAX` bytes.
    #[error("capacity overflow")]
    CapacityOverflow,

    /// Rejected builder parameter.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(CollectionError::Empty.to_string(), "container is empty");
        assert_eq!(
            CollectionError::IndexOutOfRange { index: 5, len: 3 }.to_string(),
            "index 5 out of range for length 3"
        );
        assert_eq!(
            CollectionError::InvalidVertex {
                vertex: 9,
                vertex_count: 2
            }
            .to_string(),
            "vertex 9 out of range for graph with 2 vertices"
        );
        assert_eq!(
            CollectionError::InvalidConfig("bucket count must be > 0").to_string(),
            "invalid configuration: bucket count must be > 0"
        );
    }

    #[test]
    fn is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<CollectionError>();
    }
}
