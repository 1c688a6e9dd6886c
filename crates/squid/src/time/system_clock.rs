use crate::TimeSource;
use std::time::{SystemTime, UNIX_EPOCH};

/// The operating system wall clock.
///
/// Each call reads `SystemTime::now()`. The clock may jump backwards (NTP,
/// manual changes); [`SquidGenerator`] absorbs that by never issuing a
/// timestamp below its watermark. A clock set before 1970 reads as `0`.
///
/// [`SquidGenerator`]: crate::SquidGenerator
#[derive(Default, Clone, Copy, Debug)]
pub struct SystemClock;

impl TimeSource<u64> for SystemClock {
    fn current_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64)
    }
}
