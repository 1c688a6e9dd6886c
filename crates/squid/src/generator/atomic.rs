use crate::{Error, OsRandom, RandSource, Result, Squid, SystemClock, TimeSource};
use core::fmt;
use portable_atomic::{AtomicU16, AtomicU64, Ordering};
use std::time::SystemTime;
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Size of the per-generator machine identifier in bytes.
pub const MACHINE_ID_SIZE: usize = 6;

/// A lock-free SQUID generator that can be shared across threads.
///
/// The generator keeps two pieces of shared state, both updated with atomic
/// instructions only:
///
/// - a timestamp **watermark**: the last millisecond timestamp it issued. Each
///   new identifier gets `max(now, watermark + 1)`, committed with a
///   compare-and-swap loop, so timestamps strictly increase per generator even
///   when the wall clock stalls or moves backwards.
/// - a 16-bit **rollover counter**, incremented per identifier and wrapping
///   silently at 65536.
///
/// Because every identifier consumes at least one millisecond, bursts faster
/// than one identifier per millisecond push the watermark ahead of the wall
/// clock until the burst ends.
///
/// ## Features
/// - ✅ Thread-safe (`&self` methods, no mutex)
/// - ✅ Probabilistically unique (128 random bits per identifier)
/// - ✅ Time-ordered (strictly increasing timestamps per generator)
///
/// A random machine identifier and the process identifier are recorded at
/// construction. They are exposed for diagnostics but are not part of the
/// emitted bytes; cross-generator uniqueness rests on the random field.
///
/// # Example
/// ```
/// use squid::SquidGenerator;
///
/// let generator = SquidGenerator::new()?;
/// let a = generator.next_id();
/// let b = generator.next_id();
/// assert!(a < b);
/// assert!(a.to_string() < b.to_string());
/// # Ok::<(), squid::Error>(())
/// ```
pub struct SquidGenerator<T = SystemClock, R = OsRandom>
where
    T: TimeSource<u64>,
    R: RandSource,
{
    #[cfg(feature = "cache-padded")]
    last_timestamp: crossbeam_utils::CachePadded<AtomicU64>,
    #[cfg(not(feature = "cache-padded"))]
    last_timestamp: AtomicU64,
    counter: AtomicU16,
    machine_id: [u8; MACHINE_ID_SIZE],
    process_id: u32,
    time: T,
    rng: R,
}

impl SquidGenerator {
    /// Creates a generator backed by the system wall clock and the operating
    /// system's secure random source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Init`] if the random source cannot produce the
    /// machine identifier.
    pub fn new() -> Result<Self> {
        Self::with_sources(SystemClock, OsRandom)
    }
}

impl<T, R> SquidGenerator<T, R>
where
    T: TimeSource<u64>,
    R: RandSource,
{
    /// Creates a generator with the provided time source and random source.
    ///
    /// # Parameters
    /// - `time`: A [`TimeSource`] returning milliseconds since the Unix epoch
    /// - `rng`: A [`RandSource`] producing cryptographically secure bytes
    ///
    /// # Errors
    ///
    /// Returns [`Error::Init`] if `rng` cannot produce the machine identifier.
    ///
    /// # Example
    /// ```
    /// use squid::{SquidGenerator, SystemClock, ThreadRandom};
    ///
    /// let generator = SquidGenerator::with_sources(SystemClock, ThreadRandom)?;
    /// assert_eq!(generator.new_squid().len(), 45);
    /// # Ok::<(), squid::Error>(())
    /// ```
    pub fn with_sources(time: T, rng: R) -> Result<Self> {
        Self::from_components(0, 0, time, rng)
    }

    /// Creates a generator from an explicit watermark and counter.
    ///
    /// This is useful to continue a sequence from a known point. The next
    /// identifier carries a timestamp strictly greater than `last_timestamp`
    /// and the counter value `counter + 1` (wrapping).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Init`] if `rng` cannot produce the machine identifier.
    pub fn from_components(last_timestamp: u64, counter: u16, time: T, rng: R) -> Result<Self> {
        let mut machine_id = [0_u8; MACHINE_ID_SIZE];
        if let Err(e) = rng.fill_bytes(&mut machine_id) {
            #[cfg(feature = "tracing")]
            tracing::error!(error = %e, "failed to draw SQUID machine ID");
            return Err(Error::Init(e));
        }
        let process_id = std::process::id();

        #[cfg(feature = "tracing")]
        tracing::debug!(?machine_id, process_id, "created SQUID generator");

        Ok(Self {
            #[cfg(feature = "cache-padded")]
            last_timestamp: crossbeam_utils::CachePadded::new(AtomicU64::new(last_timestamp)),
            #[cfg(not(feature = "cache-padded"))]
            last_timestamp: AtomicU64::new(last_timestamp),
            counter: AtomicU16::new(counter),
            machine_id,
            process_id,
            time,
            rng,
        })
    }

    /// The random identifier drawn when this generator was created.
    #[must_use]
    pub const fn machine_id(&self) -> [u8; MACHINE_ID_SIZE] {
        self.machine_id
    }

    /// The process identifier recorded when this generator was created.
    #[must_use]
    pub const fn process_id(&self) -> u32 {
        self.process_id
    }

    /// The timestamp of the most recently issued identifier, or the initial
    /// watermark if none has been issued.
    #[must_use]
    pub fn last_timestamp(&self) -> u64 {
        self.last_timestamp.load(Ordering::Relaxed)
    }

    /// Generates a new identifier.
    ///
    /// # Panics
    ///
    /// Panics if the random source fails. An identifier is never produced
    /// with weaker randomness; use [`Self::try_next_id`] to handle the failure
    /// instead.
    #[must_use]
    pub fn next_id(&self) -> Squid {
        match self.try_next_id() {
            Ok(id) => id,
            Err(e) => panic!("squid: {e}"),
        }
    }

    /// Generates a new identifier, reporting random source failures.
    ///
    /// The watermark and counter advance before the random bytes are drawn,
    /// so a failed call still consumes a timestamp and a counter value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Entropy`] if the random source fails.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_next_id(&self) -> Result<Squid> {
        let timestamp = self.advance_watermark(self.time.current_millis());
        let counter = self.counter.fetch_add(1, Ordering::Relaxed).wrapping_add(1);

        let mut random = [0_u8; Squid::RANDOM_SIZE];
        if let Err(e) = self.rng.fill_bytes(&mut random) {
            #[cfg(feature = "tracing")]
            tracing::error!(error = %e, "random source failed during SQUID generation");
            return Err(Error::Entropy(e));
        }

        Ok(Squid::from_components(timestamp, random, counter))
    }

    /// Generates a new identifier in its 45-character text form.
    ///
    /// # Panics
    ///
    /// Panics if the random source fails, see [`Self::next_id`].
    #[must_use]
    pub fn new_squid(&self) -> String {
        self.next_id().into()
    }

    /// Generates a new identifier in its 45-character text form, reporting
    /// random source failures.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Entropy`] if the random source fails.
    pub fn try_new_squid(&self) -> Result<String> {
        self.try_next_id().map(String::from)
    }

    /// Decodes a text identifier into its timestamp, random bytes and counter.
    ///
    /// Parsing never touches the generator's state.
    ///
    /// # Errors
    ///
    /// - [`Error::Decode`] if `s` is not canonical unpadded base32hex
    /// - [`Error::InvalidLength`] if `s` does not decode to 28 bytes
    /// - [`Error::TimestampOutOfRange`] if the timestamp does not fit
    ///   [`SystemTime`] on this platform
    pub fn parse(&self, s: &str) -> Result<(SystemTime, [u8; Squid::RANDOM_SIZE], u16)> {
        let id = Squid::decode(s)?;
        let millis = id.timestamp();
        let datetime = id
            .datetime()
            .ok_or(Error::TimestampOutOfRange { millis })?;
        Ok((datetime, id.random(), id.counter()))
    }

    /// Returns an infinite iterator of new identifiers.
    ///
    /// # Panics
    ///
    /// The iterator panics if the random source fails, see [`Self::next_id`].
    pub fn iter(&self) -> impl Iterator<Item = Squid> + '_ {
        core::iter::repeat_with(|| self.next_id())
    }

    /// Commits `max(now, watermark + 1)` as the new watermark and returns it.
    fn advance_watermark(&self, now: u64) -> u64 {
        let mut last = self.last_timestamp.load(Ordering::Relaxed);
        loop {
            let next = if now > last {
                now
            } else {
                last.saturating_add(1)
            };
            match self.last_timestamp.compare_exchange_weak(
                last,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => {
                    #[cfg(feature = "tracing")]
                    if next != now {
                        tracing::trace!(now, next, "watermark ahead of clock");
                    }
                    return next;
                }
                // another thread won the race, retry against its value
                Err(actual) => last = actual,
            }
        }
    }
}

impl<T, R> fmt::Debug for SquidGenerator<T, R>
where
    T: TimeSource<u64>,
    R: RandSource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SquidGenerator")
            .field("last_timestamp", &self.last_timestamp())
            .field("counter", &self.counter.load(Ordering::Relaxed))
            .field("machine_id", &format_args!("{:02x?}", self.machine_id))
            .field("process_id", &self.process_id)
            .finish_non_exhaustive()
    }
}
