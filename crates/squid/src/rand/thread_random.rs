use crate::{EntropyError, RandSource};
use ::rand::{RngCore, rng};

/// A `RandSource` backed by `rand::rng()`, the per-thread ChaCha CSPRNG that
/// `rand` seeds from the operating system and reseeds on its own schedule.
///
/// Nothing is stored in the value: each call looks up the calling thread's
/// RNG, so one `ThreadRandom` can serve any number of threads without
/// contention. This is the fastest source available to [`SquidGenerator`].
///
/// ⚠️ NOTE: `rand` panics if the operating system cannot seed the thread's
/// RNG, so this source never returns an error. Prefer [`OsRandom`] when seeding
/// failures must be observable.
///
/// [`OsRandom`]: crate::OsRandom
/// [`SquidGenerator`]: crate::SquidGenerator
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        rng().fill_bytes(dest);
        Ok(())
    }
}
