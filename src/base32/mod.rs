pub mod alphabet;
pub mod decode;
pub mod encode;

pub use alphabet::Alphabet;
pub use decode::{decode, decode_into, decode_strict, decode_strict_into, Decoder};
pub use encode::{encode, encode_into, Encoder};

pub const ALPHABET: Alphabet = match Alphabet::new(b"abcdefghijklmnopqrstuvwxyz0123456789") {
    Ok(alphabet) => alphabet,
    Err(_) => panic!("Could not build alphabet"),
};
