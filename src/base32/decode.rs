use super::{Alphabet, ALPHABET};
use crate::buffer::{self, Buffer};
use std::{error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The output buffer could not be grown; it has been released.
    AllocationFailed { required: usize },
    InvalidCharacter { character: char, index: usize },
    InvalidLength { length: usize },
    NonAsciiCharacter { character: u8, index: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AllocationFailed { required } => {
                write!(f, "Could not grow output buffer to {} bytes", required)
            }
            Error::InvalidCharacter { character, index } => {
                write!(f, "Invalid character '{}' at index {}", character, index)
            }
            Error::InvalidLength { length } => {
                write!(f, "No encoded output has length {}", length)
            }
            Error::NonAsciiCharacter { character, index } => {
                write!(f, "Non-ascii character {:#02x} at index {}", character, index)
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

/// Recovers the bytes of one token. `values` holds the 5-bit positions of
/// the token's characters, zero past `length`; a token of length 2/4/5/7/8
/// determines 1/2/3/4/5 bytes, the bytes its characters fully cover.
fn decode_token(values: &[u8; 8], length: usize, output: &mut [u8]) -> usize {
    let bytes = [
        ((values[0] & 0x1f) << 3) | ((values[1] & 0x1c) >> 2),
        ((values[1] & 0x03) << 6) | ((values[2] & 0x1f) << 1) | ((values[3] & 0x10) >> 4),
        ((values[3] & 0x0f) << 4) | ((values[4] & 0x1e) >> 1),
        ((values[4] & 0x01) << 7) | ((values[5] & 0x1f) << 2) | ((values[6] & 0x18) >> 3),
        ((values[6] & 0x07) << 5) | (values[7] & 0x1f),
    ];
    let count = length * 5 / 8;
    output[..count].copy_from_slice(&bytes[..count]);
    count
}

pub struct Decoder<'a> {
    alphabet: &'a Alphabet,
}

impl<'a> Decoder<'a> {
    pub const fn new(alphabet: &'a Alphabet) -> Self {
        Self { alphabet }
    }

    /// Decodes `input` into `output`, growing it to `len * 5 / 8 + 1` bytes
    /// when its capacity is smaller, and returns the decoded length.
    ///
    /// Decoding is lenient: the first byte that is not an alphabet
    /// character ends the scan, and the characters before it form the
    /// final, possibly short, token. Characters at alphabet positions
    /// 32..36 ('6' to '9') never appear in encoded output; they are masked
    /// to 5 bits here and decode to wrong bytes rather than an error. Use
    /// [`Decoder::decode_strict_into`] to reject such input instead.
    pub fn decode_into(&self, input: impl AsRef<[u8]>, output: &mut Buffer) -> Result<usize, Error> {
        let input = input.as_ref();
        let buffer = output.grow(input.len() * 5 / 8 + 1)?;
        let mut input_index = 0;
        let mut output_index = 0;
        let mut stopped = false;
        loop {
            let mut values = [0u8; 8];
            let mut length = 0;
            while length < 8 && input_index < input.len() {
                match self.alphabet.position(input[input_index]) {
                    Some(value) => {
                        values[length] = value;
                        length += 1;
                        input_index += 1;
                    }
                    None => {
                        stopped = true;
                        break;
                    }
                }
            }
            if length == 0 {
                break;
            }
            output_index += decode_token(&values, length, &mut buffer[output_index..]);
            if stopped || length < 8 {
                break;
            }
        }
        output.truncate(output_index);
        Ok(output_index)
    }

    pub fn decode(&self, input: impl AsRef<[u8]>) -> Result<Vec<u8>, Error> {
        let mut output = Buffer::new();
        self.decode_into(input, &mut output)?;
        Ok(output.into_vec())
    }

    /// Like [`Decoder::decode_into`], but rejects input the encoder cannot
    /// have produced: characters outside the 32 emittable alphabet entries
    /// and lengths no token sequence can have.
    pub fn decode_strict_into(
        &self,
        input: impl AsRef<[u8]>,
        output: &mut Buffer,
    ) -> Result<usize, Error> {
        let input = input.as_ref();
        if matches!(input.len() % 8, 1 | 3 | 6) {
            return Err(Error::InvalidLength { length: input.len() });
        }
        for (index, &character) in input.iter().enumerate() {
            if character >= 128 {
                return Err(Error::NonAsciiCharacter { character, index });
            }
            match self.alphabet.position(character) {
                Some(value) if value < 32 => {}
                _ => {
                    return Err(Error::InvalidCharacter { character: character as char, index });
                }
            }
        }
        self.decode_into(input, output)
    }

    pub fn decode_strict(&self, input: impl AsRef<[u8]>) -> Result<Vec<u8>, Error> {
        let mut output = Buffer::new();
        self.decode_strict_into(input, &mut output)?;
        Ok(output.into_vec())
    }

    pub fn default() -> &'static Self {
        &DECODER
    }
}

const DECODER: Decoder = Decoder::new(&ALPHABET);

pub fn decode(input: impl AsRef<[u8]>) -> Result<Vec<u8>, Error> {
    Decoder::default().decode(input)
}

pub fn decode_into(input: impl AsRef<[u8]>, output: &mut Buffer) -> Result<usize, Error> {
    Decoder::default().decode_into(input, output)
}

pub fn decode_strict(input: impl AsRef<[u8]>) -> Result<Vec<u8>, Error> {
    Decoder::default().decode_strict(input)
}

pub fn decode_strict_into(input: impl AsRef<[u8]>, output: &mut Buffer) -> Result<usize, Error> {
    Decoder::default().decode_strict_into(input, output)
}

#[cfg(test)]
mod tests {
    use crate::buffer::Buffer;

    #[test]
    fn decode() {
        assert_eq!(super::decode(""), Ok(vec![]));
        assert_eq!(super::decode("my"), Ok(b"f".to_vec()));
        assert_eq!(super::decode("mzxq"), Ok(b"fo".to_vec()));
        assert_eq!(super::decode("mzxw4"), Ok(b"foo".to_vec()));
        assert_eq!(super::decode("mzxw4yq"), Ok(b"foob".to_vec()));
        assert_eq!(super::decode("mzxw4ytb"), Ok(b"fooba".to_vec()));
        assert_eq!(super::decode("mzxw4ytboi"), Ok(b"foobar".to_vec()));
        assert_eq!(super::decode("nbswy1dp"), Ok(b"hello".to_vec()));
        assert_eq!(super::decode("52"), Ok(vec![0xff]));
        assert_eq!(super::decode("aaaaaaaa"), Ok(vec![0x00, 0x00, 0x00, 0x00, 0x00]));
    }

    #[test]
    fn stops_at_the_first_non_alphabet_character() {
        assert_eq!(super::decode("mzxq mzxq"), Ok(b"fo".to_vec()));
        assert_eq!(super::decode("my\0mzxq"), Ok(b"f".to_vec()));
        assert_eq!(super::decode("MZXQ"), Ok(vec![]));
        assert_eq!(super::decode("mzxw4ytb-oi"), Ok(b"fooba".to_vec()));
    }

    #[test]
    fn a_single_trailing_character_determines_no_byte() {
        assert_eq!(super::decode("mzxw4ytbo"), Ok(b"fooba".to_vec()));
        assert_eq!(super::decode("m"), Ok(vec![]));
    }

    #[test]
    fn characters_past_position_31_decode_masked() {
        // '6'..'9' sit at positions 32..36 and alias 'a'..'d' once masked
        // to 5 bits.
        assert_eq!(super::decode("6989"), super::decode("adcd"));
        assert_eq!(super::decode("72"), super::decode("b2"));
    }

    #[test]
    fn decode_strict() {
        assert_eq!(super::decode_strict("mzxw4ytboi"), Ok(b"foobar".to_vec()));
        assert_eq!(super::decode_strict(""), Ok(vec![]));
        assert_eq!(
            super::decode_strict("mz6q"),
            Err(super::Error::InvalidCharacter { character: '6', index: 2 })
        );
        assert_eq!(
            super::decode_strict("mzx q"),
            Err(super::Error::InvalidCharacter { character: ' ', index: 3 })
        );
        assert_eq!(
            super::decode_strict([b'm', b'y', 0xc3, 0xa9]),
            Err(super::Error::NonAsciiCharacter { character: 0xc3, index: 2 })
        );
        assert_eq!(super::decode_strict("m"), Err(super::Error::InvalidLength { length: 1 }));
        assert_eq!(super::decode_strict("mzx"), Err(super::Error::InvalidLength { length: 3 }));
        assert_eq!(
            super::decode_strict("mzxw4ytbmz"),
            Ok(super::decode("mzxw4ytbmz").unwrap())
        );
    }

    #[test]
    fn roundtrip() {
        let mut encoded = Buffer::new();
        let mut decoded = Buffer::new();
        let mut input = Vec::new();
        let mut state = 0x2545_f491u32;
        for size in 0..=1000usize {
            input.clear();
            for _ in 0..size {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                input.push((state >> 24) as u8);
            }
            let encoded_length = crate::base32::encode_into(&input, &mut encoded).unwrap();
            assert_eq!(encoded_length, size / 5 * 8 + [0, 2, 4, 5, 7][size % 5]);
            let decoded_length = super::decode_into(encoded.as_slice(), &mut decoded).unwrap();
            assert_eq!(decoded_length, size);
            assert_eq!(decoded.as_slice(), &input[..]);
        }
    }

    #[test]
    fn reusing_a_grown_buffer_does_not_reallocate() {
        let mut output = Buffer::new();
        super::decode_into("mzxw4ytboi", &mut output).unwrap();
        let capacity = output.capacity();
        let length = super::decode_into("mzxw4ytboi", &mut output).unwrap();
        assert_eq!(output.capacity(), capacity);
        assert_eq!(length, 6);
        assert_eq!(output.as_slice(), b"foobar");
    }
}
