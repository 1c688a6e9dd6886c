use crate::{
    Error, Result,
    base32::{self, decode_validated, encode_base32, validate_base32},
};
use core::{fmt, ops, str};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const RESERVED_SIZE: usize = 2;
const TIMESTAMP_SIZE: usize = 10;
const RANDOM_SIZE: usize = 16;
const COUNTER_SIZE: usize = 2;
const SIZE: usize = TIMESTAMP_SIZE + RANDOM_SIZE + COUNTER_SIZE;
const ENCODED_SIZE: usize = base32::encoded_len(SIZE);

const RANDOM_OFFSET: usize = TIMESTAMP_SIZE;
const COUNTER_OFFSET: usize = RANDOM_OFFSET + RANDOM_SIZE;

/// A sortable unique identifier.
///
/// 28 big-endian bytes laid out as:
///
/// ```text
///  Byte Index:  0   2            10                   26        28
///               +---+------------+--------------------+---------+
///  Field:       |rsv| ts millis  |    random (16)     | ctr (2) |
///               +---+------------+--------------------+---------+
///               |<-- timestamp ->|
/// ```
///
/// - `timestamp` (10 bytes): milliseconds since the Unix epoch. The first two
///   bytes are reserved and always zero in generated identifiers.
/// - `random` (16 bytes): fresh cryptographically secure random bytes.
/// - `counter` (2 bytes): the generator's rollover counter.
///
/// Ordering (`Ord`) is byte-lexicographic, which is also the ordering of the
/// 45-character text form produced by [`Squid::encode`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Squid([u8; SIZE]);

impl Squid {
    /// Size of the timestamp field in bytes, reserved bytes included.
    pub const TIMESTAMP_SIZE: usize = TIMESTAMP_SIZE;
    /// Size of the random field in bytes.
    pub const RANDOM_SIZE: usize = RANDOM_SIZE;
    /// Size of the counter field in bytes.
    pub const COUNTER_SIZE: usize = COUNTER_SIZE;
    /// Total size in bytes.
    pub const SIZE: usize = SIZE;
    /// Length of the text form in characters.
    pub const ENCODED_SIZE: usize = ENCODED_SIZE;

    /// The all-zero identifier.
    pub const MIN: Self = Self([0x00; SIZE]);

    /// Packs the three fields into an identifier. Reserved bytes are zero.
    #[must_use]
    pub fn from_components(timestamp: u64, random: [u8; RANDOM_SIZE], counter: u16) -> Self {
        let mut bytes = [0_u8; SIZE];
        bytes[RESERVED_SIZE..RANDOM_OFFSET].copy_from_slice(&timestamp.to_be_bytes());
        bytes[RANDOM_OFFSET..COUNTER_OFFSET].copy_from_slice(&random);
        bytes[COUNTER_OFFSET..].copy_from_slice(&counter.to_be_bytes());
        Self(bytes)
    }

    /// Wraps raw bytes without validation.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns a reference to the underlying byte array.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SIZE] {
        &self.0
    }

    /// Returns a copy of the underlying byte array.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; SIZE] {
        self.0
    }

    /// Milliseconds since the Unix epoch, read from the low 8 bytes of the
    /// timestamp field.
    #[must_use]
    pub fn timestamp(&self) -> u64 {
        let mut ts = [0_u8; 8];
        ts.copy_from_slice(&self.0[RESERVED_SIZE..RANDOM_OFFSET]);
        u64::from_be_bytes(ts)
    }

    /// The two reserved high-order timestamp bytes.
    #[must_use]
    pub const fn reserved(&self) -> u16 {
        u16::from_be_bytes([self.0[0], self.0[1]])
    }

    /// The timestamp as a point in time, or `None` if this platform's
    /// [`SystemTime`] cannot represent it.
    #[must_use]
    pub fn datetime(&self) -> Option<SystemTime> {
        UNIX_EPOCH.checked_add(Duration::from_millis(self.timestamp()))
    }

    /// A copy of the 16 random bytes.
    #[must_use]
    pub fn random(&self) -> [u8; RANDOM_SIZE] {
        let mut random = [0_u8; RANDOM_SIZE];
        random.copy_from_slice(&self.0[RANDOM_OFFSET..COUNTER_OFFSET]);
        random
    }

    /// The rollover counter value.
    #[must_use]
    pub const fn counter(&self) -> u16 {
        u16::from_be_bytes([self.0[COUNTER_OFFSET], self.0[COUNTER_OFFSET + 1]])
    }

    /// Returns `true` if the reserved timestamp bytes are zero, as they are in
    /// every generated identifier.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.reserved() == 0
    }

    /// Returns a copy with the reserved timestamp bytes cleared.
    #[must_use]
    pub const fn into_valid(self) -> Self {
        let mut bytes = self.0;
        bytes[0] = 0;
        bytes[1] = 0;
        Self(bytes)
    }

    /// Returns the 45-character base32hex text form in a stack-allocated
    /// buffer that derefs to `str`.
    ///
    /// # Example
    ///
    /// ```
    /// use squid::Squid;
    ///
    /// let id = Squid::from_components(1, [0; 16], 1);
    /// assert_eq!(id.encode(), "000000000000000100000000000000000000000000002");
    /// ```
    #[must_use]
    pub fn encode(&self) -> SquidStr {
        let mut buf = [0_u8; ENCODED_SIZE];
        encode_base32(&self.0, &mut buf);
        SquidStr(buf)
    }

    /// Decodes the 45-character base32hex text form.
    ///
    /// This is a structural decode: the reserved timestamp bytes are not
    /// checked. Use [`Squid::is_valid`] when that matters.
    ///
    /// # Errors
    ///
    /// - [`Error::Decode`] if the text contains characters outside
    ///   `0123456789abcdefghijklmnopqrstuv`, has a character count no unpadded
    ///   base32 text can have, or sets padding bits
    /// - [`Error::InvalidLength`] if the text decodes to anything other than
    ///   [`Squid::SIZE`] bytes
    pub fn decode(s: &str) -> Result<Self> {
        let len = validate_base32(s)?;
        if len != SIZE {
            return Err(Error::InvalidLength { len });
        }
        let mut bytes = [0_u8; SIZE];
        decode_validated(s.as_bytes(), &mut bytes);
        Ok(Self(bytes))
    }
}

impl fmt::Display for Squid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl fmt::Debug for Squid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Squid")
            .field("text", &format_args!("{}", self.encode()))
            .field("timestamp", &self.timestamp())
            .field("random", &format_args!("{:02x?}", self.random()))
            .field("counter", &self.counter())
            .finish()
    }
}

impl str::FromStr for Squid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl TryFrom<&str> for Squid {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl TryFrom<&[u8]> for Squid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        <[u8; SIZE]>::try_from(bytes)
            .map(Self)
            .map_err(|_| Error::InvalidLength { len: bytes.len() })
    }
}

impl From<[u8; SIZE]> for Squid {
    fn from(bytes: [u8; SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Squid> for [u8; SIZE] {
    fn from(id: Squid) -> Self {
        id.0
    }
}

impl From<Squid> for String {
    fn from(id: Squid) -> Self {
        id.encode().as_str().to_owned()
    }
}

impl AsRef<[u8]> for Squid {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq<str> for Squid {
    fn eq(&self, other: &str) -> bool {
        self.encode().as_str() == other
    }
}

impl PartialEq<&str> for Squid {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// Stack-allocated text form of a [`Squid`], returned by [`Squid::encode`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SquidStr([u8; ENCODED_SIZE]);

impl SquidStr {
    /// Returns a `&str` view of the encoding.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // SAFETY: `self.0` holds only bytes from the ASCII base32hex alphabet
        unsafe { str::from_utf8_unchecked(&self.0) }
    }
}

impl ops::Deref for SquidStr {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for SquidStr {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SquidStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for SquidStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl PartialEq<&str> for SquidStr {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<String> for SquidStr {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == other.as_str()
    }
}
