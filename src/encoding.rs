//! Explicit text-to-byte conversion for string inputs.
//!
//! Passwords and salts are byte sequences. When a caller holds text instead,
//! the conversion to bytes is an explicit configuration choice made up
//! front, never inferred from the value at runtime. The `_text` entry points
//! apply the encoding carried in [`Params`](crate::Params) before any key
//! material is touched.

use std::fmt;

use zeroize::Zeroize;

use crate::error::KdfError;

/// Byte encoding applied to text inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// UTF-8. Infallible for Rust strings, and the default.
    #[default]
    Utf8,
    /// 7-bit ASCII. Rejects any code point above U+007F.
    Ascii,
    /// ISO-8859-1. Rejects any code point above U+00FF.
    Latin1,
}

impl TextEncoding {
    /// Convert `text` to bytes, failing with
    /// [`KdfError::EncodingError`] if a character has no representation
    /// in this encoding.
    pub fn encode(self, text: &str) -> Result<Vec<u8>, KdfError> {
        match self {
            TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            TextEncoding::Ascii => {
                if text.is_ascii() {
                    Ok(text.as_bytes().to_vec())
                } else {
                    Err(KdfError::EncodingError { encoding: self })
                }
            }
            TextEncoding::Latin1 => {
                let mut bytes = Vec::with_capacity(text.len());
                for c in text.chars() {
                    let cp = c as u32;
                    if cp > 0xff {
                        // The partial conversion may already hold secret bytes
                        bytes.zeroize();
                        return Err(KdfError::EncodingError { encoding: self });
                    }
                    bytes.push(cp as u8);
                }
                Ok(bytes)
            }
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Ascii => "ascii",
            TextEncoding::Latin1 => "latin-1",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_passes_everything_through() {
        assert_eq!(TextEncoding::Utf8.encode("pässword€").unwrap(), "pässword€".as_bytes());
        assert_eq!(TextEncoding::Utf8.encode("").unwrap(), b"");
    }

    #[test]
    fn test_ascii_rejects_non_ascii() {
        assert_eq!(TextEncoding::Ascii.encode("password").unwrap(), b"password");
        assert_eq!(
            TextEncoding::Ascii.encode("pässword"),
            Err(KdfError::EncodingError { encoding: TextEncoding::Ascii })
        );
    }

    #[test]
    fn test_latin1_maps_single_byte_code_points() {
        // U+00E9 is 0xe9 in ISO-8859-1, two bytes in UTF-8
        assert_eq!(TextEncoding::Latin1.encode("café").unwrap(), b"caf\xe9");
        assert_eq!(
            TextEncoding::Latin1.encode("€"),
            Err(KdfError::EncodingError { encoding: TextEncoding::Latin1 })
        );
    }
}
