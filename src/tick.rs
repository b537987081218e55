//! Monotonic scheduler time.
//!
//! A [`Tick`] is a millisecond count since boot. Arithmetic with
//! [`Duration`] saturates instead of wrapping: a `u64` of milliseconds
//! outlives the hardware, and saturation keeps "never" representable.

use core::fmt;
use core::ops::Add;
use core::time::Duration;

/// Milliseconds since boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tick(u64);

impl Tick {
    /// The boot instant.
    pub const ZERO: Self = Self(0);
    /// A tick that is never reached.
    pub const INFINITY: Self = Self(u64::MAX);

    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Time elapsed from `earlier` to `self`, zero if `earlier` is later.
    pub fn since(self, earlier: Tick) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }
}

impl Add<Duration> for Tick {
    type Output = Tick;

    fn add(self, rhs: Duration) -> Tick {
        let ms = u64::try_from(rhs.as_millis()).unwrap_or(u64::MAX);
        Tick(self.0.saturating_add(ms))
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::INFINITY {
            write!(f, "inf")
        } else {
            write!(f, "{}ms", self.0)
        }
    }
}
