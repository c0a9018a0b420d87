//! Modified UTF-8 as used by big-endian tag streams: NUL is written as two
//! bytes and supplementary characters as two three-byte surrogate halves.

/// Encode `text` as modified UTF-8.
pub fn encode(text: &str) -> Vec<u8> {
	let mut out = Vec::with_capacity(text.len());
	for unit in text.encode_utf16() {
		match unit {
			0x0001..=0x007f => out.push(unit as u8),
			0x0000 | 0x0080..=0x07ff => {
				out.push(0xc0 | ((unit >> 6) & 0x1f) as u8);
				out.push(0x80 | (unit & 0x3f) as u8);
			}
			_ => {
				out.push(0xe0 | ((unit >> 12) & 0x0f) as u8);
				out.push(0x80 | ((unit >> 6) & 0x3f) as u8);
				out.push(0x80 | (unit & 0x3f) as u8);
			}
		}
	}
	out
}

/// Decode modified UTF-8, returning `None` on malformed input or unpaired surrogates.
pub fn decode(bytes: &[u8]) -> Option<String> {
	if bytes.is_ascii() {
		return std::str::from_utf8(bytes).ok().map(str::to_owned);
	}

	let mut units = Vec::with_capacity(bytes.len());
	let mut idx = 0;
	while idx < bytes.len() {
		let lead = bytes[idx];
		match lead >> 4 {
			0x0..=0x7 => {
				units.push(u16::from(lead));
				idx += 1;
			}
			0xc | 0xd => {
				let second = continuation(bytes, idx + 1)?;
				units.push((u16::from(lead & 0x1f) << 6) | second);
				idx += 2;
			}
			0xe => {
				let second = continuation(bytes, idx + 1)?;
				let third = continuation(bytes, idx + 2)?;
				units.push((u16::from(lead & 0x0f) << 12) | (second << 6) | third);
				idx += 3;
			}
			_ => return None,
		}
	}

	String::from_utf16(&units).ok()
}

fn continuation(bytes: &[u8], idx: usize) -> Option<u16> {
	let byte = *bytes.get(idx)?;
	if byte & 0xc0 != 0x80 {
		return None;
	}
	Some(u16::from(byte & 0x3f))
}
