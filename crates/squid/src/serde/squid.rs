use crate::Squid;
use ::serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use core::fmt;

/// Text for human-readable formats (JSON, TOML, ...), raw bytes otherwise.
impl Serialize for Squid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.encode())
        } else {
            serializer.serialize_bytes(self.as_bytes())
        }
    }
}

impl<'de> Deserialize<'de> for Squid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(SquidVisitor)
        } else {
            deserializer.deserialize_bytes(SquidVisitor)
        }
    }
}

struct SquidVisitor;

impl<'de> de::Visitor<'de> for SquidVisitor {
    type Value = Squid;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "a {}-character SQUID string or {} bytes",
            Squid::ENCODED_SIZE,
            Squid::SIZE
        )
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Squid::decode(value).map_err(de::Error::custom)
    }

    fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
        Squid::try_from(value).map_err(de::Error::custom)
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut bytes = [0_u8; Squid::SIZE];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(i, &self))?;
        }
        if seq.next_element::<u8>()?.is_some() {
            return Err(de::Error::invalid_length(Squid::SIZE + 1, &self));
        }
        Ok(Squid::from(bytes))
    }
}

/// Serde helpers that always use the 45-character text form, regardless of
/// the format's human readability.
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use squid::Squid;
///
/// #[derive(Serialize, Deserialize)]
/// struct Row {
///     #[serde(with = "squid::as_base32_squid")]
///     id: Squid,
/// }
/// ```
pub mod as_base32_squid {
    use super::*;

    pub fn serialize<S: Serializer>(id: &Squid, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&id.encode())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Squid, D::Error> {
        d.deserialize_str(SquidVisitor)
    }
}

/// Serde helpers that always use the raw 28 bytes, regardless of the
/// format's human readability.
pub mod as_native_squid {
    use super::*;

    pub fn serialize<S: Serializer>(id: &Squid, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_bytes(id.as_bytes())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Squid, D::Error> {
        d.deserialize_bytes(SquidVisitor)
    }
}
