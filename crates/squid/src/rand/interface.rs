/// Source of cryptographically secure bytes for machine IDs and the random
/// field of each identifier.
///
/// Unlike a plain RNG, a `RandSource` may fail: a generator must never
/// substitute weaker randomness when the source is unavailable, so failures
/// surface as [`EntropyError`].
///
/// # Example
/// ```
/// use squid::{EntropyError, RandSource};
///
/// struct FixedRand;
/// impl RandSource for FixedRand {
///     fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
///         dest.fill(0x2a);
///         Ok(())
///     }
/// }
///
/// let mut buf = [0_u8; 4];
/// FixedRand.fill_bytes(&mut buf)?;
/// assert_eq!(buf, [0x2a; 4]);
/// # Ok::<(), EntropyError>(())
/// ```
pub trait RandSource {
    /// Fills `dest` entirely with random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`EntropyError`] if the underlying source cannot produce
    /// randomness. `dest` contents are unspecified in that case.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError>;
}

/// The random source failed to produce bytes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{message}")]
pub struct EntropyError {
    message: String,
}

impl EntropyError {
    /// Creates an error carrying the underlying source's description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the underlying source's description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
