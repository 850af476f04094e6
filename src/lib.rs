//! Base32 codec over the 36-character alphabet `a-z0-9`. Five input bytes
//! map to eight output characters, most-significant bits first; a partial
//! final chunk maps to a shorter token. Not interoperable with RFC 4648.

pub mod base32;
pub mod buffer;

pub use base32::{
    decode, decode_into, decode_strict, decode_strict_into, encode, encode_into, Alphabet, Decoder,
    Encoder, ALPHABET,
};
pub use buffer::Buffer;
