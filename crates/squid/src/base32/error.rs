/// Errors produced while decoding base32hex text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Base32Error {
    /// A byte outside of the `0-9a-v` alphabet was found.
    #[error("invalid base32 byte {byte:#04x} at index {index}")]
    InvalidAscii {
        /// The offending byte.
        byte: u8,
        /// Position of the offending byte in the input.
        index: usize,
    },

    /// The character count cannot be produced by unpadded base32.
    #[error("invalid base32 length: {len}")]
    InvalidLen {
        /// Number of characters in the input.
        len: usize,
    },

    /// The final character carries non-zero padding bits, so the text is not
    /// the canonical encoding of any byte sequence.
    #[error("non-canonical base32 byte {byte:#04x} at index {index}")]
    NonCanonical {
        /// The offending byte.
        byte: u8,
        /// Position of the offending byte in the input.
        index: usize,
    },
}
