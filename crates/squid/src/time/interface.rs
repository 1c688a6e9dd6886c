/// Wall-clock source consulted once per generated identifier.
///
/// Readings are milliseconds since the Unix epoch. `T` is the integer type
/// the reading is expressed in; [`SquidGenerator`] requires `u64`.
///
/// Implementations are free to stall or step backwards: the generator's
/// watermark keeps issued timestamps strictly increasing either way. That
/// makes scripted clocks handy in tests.
///
/// # Example
///
/// ```
/// use squid::{SquidGenerator, ThreadRandom, TimeSource};
///
/// struct Frozen(u64);
/// impl TimeSource<u64> for Frozen {
///     fn current_millis(&self) -> u64 {
///         self.0
///     }
/// }
///
/// let generator = SquidGenerator::with_sources(Frozen(1_000), ThreadRandom)?;
/// assert_eq!(generator.next_id().timestamp(), 1_000);
/// assert_eq!(generator.next_id().timestamp(), 1_001);
/// # Ok::<(), squid::Error>(())
/// ```
///
/// [`SquidGenerator`]: crate::SquidGenerator
pub trait TimeSource<T> {
    /// Milliseconds elapsed since 1970-01-01T00:00:00Z.
    fn current_millis(&self) -> T;
}
