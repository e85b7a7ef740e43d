/* src/loader/encoding.rs */

use std::fmt;
use std::str::FromStr;

use super::LoadError;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_BOM: u16 = 0xFEFF;

/// Text encoding used to turn the raw file bytes into JSON text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
	#[default]
	Utf8,
	Utf16Le,
	/// ISO-8859-1; every byte maps to the code point of the same value.
	Latin1,
	/// 7-bit ASCII. Never fails: the high bit of every byte is cleared.
	Ascii,
}

impl Encoding {
	/// Canonical identifier, as accepted by [`FromStr`].
	pub const fn name(self) -> &'static str {
		match self {
			Self::Utf8 => "utf-8",
			Self::Utf16Le => "utf-16le",
			Self::Latin1 => "latin1",
			Self::Ascii => "ascii",
		}
	}

	/// Decodes raw bytes into text, dropping a leading byte-order mark.
	pub fn decode(self, bytes: &[u8]) -> Result<String, LoadError> {
		match self {
			Self::Utf8 => {
				let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
				std::str::from_utf8(bytes)
					.map(str::to_owned)
					.map_err(|e| self.invalid(e.to_string()))
			}
			Self::Utf16Le => {
				if bytes.len() % 2 != 0 {
					return Err(self.invalid(format!("odd byte length {}", bytes.len())));
				}
				let mut units: Vec<u16> = bytes
					.chunks_exact(2)
					.map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
					.collect();
				if units.first() == Some(&UTF16_BOM) {
					units.remove(0);
				}
				String::from_utf16(&units).map_err(|e| self.invalid(e.to_string()))
			}
			Self::Latin1 => Ok(bytes.iter().copied().map(char::from).collect()),
			Self::Ascii => Ok(bytes.iter().map(|b| char::from(b & 0x7F)).collect()),
		}
	}

	fn invalid(self, reason: String) -> LoadError {
		LoadError::Encoding {
			encoding: self,
			reason,
		}
	}
}

impl fmt::Display for Encoding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Encoding {
	type Err = LoadError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"utf-8" | "utf8" => Ok(Self::Utf8),
			"utf-16le" | "utf16le" | "ucs2" | "ucs-2" => Ok(Self::Utf16Le),
			"latin1" | "binary" => Ok(Self::Latin1),
			"ascii" => Ok(Self::Ascii),
			_ => Err(LoadError::UnknownEncoding(s.to_string())),
		}
	}
}
