use crate::{Base32Error, EntropyError, Squid};

/// A result type defaulting to the crate [`enum@Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `squid` can produce.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The random source could not provide the machine identifier while
    /// constructing a generator.
    #[error("failed to generate machine ID: {0}")]
    Init(#[source] EntropyError),

    /// The random source could not provide the random field of a new
    /// identifier.
    ///
    /// Only the `try_*` generation methods surface this. The infallible
    /// variants treat it as fatal and panic.
    #[error("random source unavailable: {0}")]
    Entropy(#[source] EntropyError),

    /// The text is not valid unpadded base32hex.
    #[error(transparent)]
    Decode(#[from] Base32Error),

    /// The input decoded to a byte count other than [`Squid::SIZE`].
    #[error("invalid SQUID length: {len} bytes (expected {})", Squid::SIZE)]
    InvalidLength {
        /// Number of bytes actually decoded or supplied.
        len: usize,
    },

    /// The decoded timestamp does not fit this platform's `SystemTime`.
    #[error("SQUID timestamp out of range: {millis} ms")]
    TimestampOutOfRange {
        /// The decoded milliseconds since the Unix epoch.
        millis: u64,
    },
}
