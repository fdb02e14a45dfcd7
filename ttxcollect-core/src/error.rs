//! Error types for collector operations

/// Errors that can occur while decoding teletext packet data
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Reader asked to read or skip past its bound
    #[cfg_attr(
        feature = "std",
        error("Buffer underrun: requested {requested} bytes, {available} available")
    )]
    BufferUnderrun {
        /// The number of bytes requested.
        requested: usize,
        /// The number of bytes actually available.
        available: usize,
    },

    /// Designation code failed Hamming decoding or is out of range for the kind
    #[cfg_attr(feature = "std", error("Invalid designation code: {0}"))]
    InvalidDesignation(i8),

    /// A Hamming 8/4 coded byte carried an uncorrectable error
    #[cfg_attr(
        feature = "std",
        error("Uncorrectable Hamming 8/4 byte at offset {offset}")
    )]
    InvalidHamming {
        /// Offset of the broken byte within the coded block.
        offset: usize,
    },

    /// An odd-parity byte failed the parity check in a context with no
    /// substitution tolerance
    #[cfg_attr(feature = "std", error("Parity error at offset {offset}"))]
    InvalidParity {
        /// Offset of the broken byte within the coded block.
        offset: usize,
    },

    /// A Hamming 24/18 triplet carried an uncorrectable error
    #[cfg_attr(feature = "std", error("Uncorrectable triplet at index {index}"))]
    BrokenTriplet {
        /// Index of the broken triplet (0-12).
        index: usize,
    },
}
