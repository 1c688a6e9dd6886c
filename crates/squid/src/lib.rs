//! Sortable, unique, time-ordered identifiers.
//!
//! A [`Squid`] is a 28-byte value made of a millisecond timestamp, 16 bytes
//! of cryptographically secure randomness and a 16-bit rollover counter. Its
//! text form is 45 characters of base32hex (`0123456789abcdefghijklmnopqrstuv`)
//! without padding, which sorts exactly like the underlying bytes.
//!
//! ```text
//!  Byte Index:  0          10                     26        28
//!               +----------+----------------------+---------+
//!  Field:       | ts (10)  |      random (16)     | ctr (2) |
//!               +----------+----------------------+---------+
//!               |<-- MSB ------- 224 bits ------- LSB ----->|
//! ```
//!
//! The two leading timestamp bytes are reserved and always zero.
//!
//! # Example
//!
//! ```
//! use squid::SquidGenerator;
//!
//! let generator = SquidGenerator::new()?;
//!
//! let text = generator.new_squid();
//! assert_eq!(text.len(), 45);
//!
//! let (timestamp, random, counter) = generator.parse(&text)?;
//! assert!(timestamp <= std::time::SystemTime::now());
//! assert_eq!(random.len(), 16);
//! assert_eq!(counter, 1);
//! # Ok::<(), squid::Error>(())
//! ```
//!
//! # Features
//!
//! - `tracing`: instrument generation with [`tracing`](https://docs.rs/tracing)
//!   spans and events.
//! - `serde`: `Serialize`/`Deserialize` for [`Squid`].
//! - `cache-padded`: pad the generator's atomic watermark to a cache line.
//! - `all`: everything above.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod base32;
mod error;
mod generator;
mod id;
mod rand;
#[cfg(feature = "serde")]
mod serde;
mod time;

pub use crate::base32::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::rand::*;
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[cfg(feature = "serde")]
pub use crate::serde::*;
pub use crate::time::*;
