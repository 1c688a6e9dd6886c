mod error;
mod hex;

pub use error::*;
pub(crate) use hex::decode_validated;
pub use hex::{
    ALPHABET, decode_base32, decoded_len, encode_base32, encoded_len, validate_base32,
};
