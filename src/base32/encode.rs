use super::{Alphabet, ALPHABET};
use crate::buffer::{self, Buffer};
use std::{error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The output buffer could not be grown; it has been released.
    AllocationFailed { required: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AllocationFailed { required } => {
                write!(f, "Could not grow output buffer to {} bytes", required)
            }
        }
    }
}

impl From<buffer::Error> for Error {
    fn from(error: buffer::Error) -> Self {
        match error {
            buffer::Error::AllocationFailed { required } => Error::AllocationFailed { required },
        }
    }
}

/// Characters produced by a chunk of 0 to 5 input bytes.
const TOKEN_LENGTHS: [usize; 6] = [0, 2, 4, 5, 7, 8];

pub struct Encoder<'a> {
    alphabet: &'a Alphabet,
}

impl<'a> Encoder<'a> {
    pub const fn new(alphabet: &'a Alphabet) -> Self {
        Self { alphabet }
    }

    /// Encodes `input` into `output`, growing it to `len * 8 / 5 + 5` bytes
    /// when its capacity is smaller, and returns the encoded length. The
    /// final chunk of 1/2/3/4 bytes emits a short token of 2/4/5/7
    /// characters; bits of absent bytes are zero.
    pub fn encode_into(&self, input: impl AsRef<[u8]>, output: &mut Buffer) -> Result<usize, Error> {
        let input = input.as_ref();
        let buffer = output.grow(input.len() * 8 / 5 + 5)?;
        let mut index = 0;
        for chunk in input.chunks(5) {
            let mut bytes = [0u8; 5];
            bytes[..chunk.len()].copy_from_slice(chunk);
            let values = [
                bytes[0] >> 3,
                ((bytes[0] & 0x07) << 2) | (bytes[1] >> 6),
                (bytes[1] >> 1) & 0x1f,
                ((bytes[1] & 0x01) << 4) | (bytes[2] >> 4),
                ((bytes[2] & 0x0f) << 1) | (bytes[3] >> 7),
                (bytes[3] >> 2) & 0x1f,
                ((bytes[3] & 0x03) << 3) | (bytes[4] >> 5),
                bytes[4] & 0x1f,
            ];
            for &value in &values[..TOKEN_LENGTHS[chunk.len()]] {
                buffer[index] = self.alphabet.encode(value as usize);
                index += 1;
            }
        }
        output.truncate(index);
        Ok(index)
    }

    pub fn encode(&self, input: impl AsRef<[u8]>) -> String {
        let mut output = Buffer::new();
        self.encode_into(input, &mut output).unwrap();
        unsafe { String::from_utf8_unchecked(output.into_vec()) }
    }

    pub fn default() -> &'static Self {
        &ENCODER
    }
}

const ENCODER: Encoder = Encoder::new(&ALPHABET);

pub fn encode(input: impl AsRef<[u8]>) -> String {
    Encoder::default().encode(input)
}

pub fn encode_into(input: impl AsRef<[u8]>, output: &mut Buffer) -> Result<usize, Error> {
    Encoder::default().encode_into(input, output)
}
