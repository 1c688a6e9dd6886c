use crate::{EntropyError, RandSource};
use ::rand::{TryRngCore, rngs::OsRng};

/// A `RandSource` that reads directly from the operating system's secure
/// random source (`getrandom(2)`, `BCryptGenRandom`, ...).
///
/// Every call is a syscall. Failures are reported rather than masked, which
/// makes this the default source for [`SquidGenerator::new`].
///
/// [`SquidGenerator::new`]: crate::SquidGenerator::new
#[derive(Default, Clone, Copy, Debug)]
pub struct OsRandom;

impl RandSource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| EntropyError::new(e.to_string()))
    }
}
