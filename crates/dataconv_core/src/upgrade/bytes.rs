use crate::upgrade::{ConvertError, Result};

/// Byte order of a binary tag stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
	/// Java edition streams.
	Big,
	/// Bedrock edition streams.
	Little,
}

/// Simple bounded cursor over an immutable byte slice.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
	endianness: Endianness,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8], endianness: Endianness) -> Self {
		Self { bytes, pos: 0, endianness }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Byte order used for multi-byte reads.
	pub fn endianness(&self) -> Endianness {
		self.endianness
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(ConvertError::UnexpectedEof {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut buf = [0_u8; N];
		buf.copy_from_slice(raw);
		Ok(buf)
	}

	/// Read one unsigned byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		let [byte] = self.read_array::<1>()?;
		Ok(byte)
	}

	/// Read one signed byte.
	pub fn read_i8(&mut self) -> Result<i8> {
		Ok(self.read_u8()? as i8)
	}

	/// Read a `u16`.
	pub fn read_u16(&mut self) -> Result<u16> {
		let buf = self.read_array::<2>()?;
		Ok(match self.endianness {
			Endianness::Little => u16::from_le_bytes(buf),
			Endianness::Big => u16::from_be_bytes(buf),
		})
	}

	/// Read an `i16`.
	pub fn read_i16(&mut self) -> Result<i16> {
		let buf = self.read_array::<2>()?;
		Ok(match self.endianness {
			Endianness::Little => i16::from_le_bytes(buf),
			Endianness::Big => i16::from_be_bytes(buf),
		})
	}

	/// Read an `i32`.
	pub fn read_i32(&mut self) -> Result<i32> {
		let buf = self.read_array::<4>()?;
		Ok(match self.endianness {
			Endianness::Little => i32::from_le_bytes(buf),
			Endianness::Big => i32::from_be_bytes(buf),
		})
	}

	/// Read an `i64`.
	pub fn read_i64(&mut self) -> Result<i64> {
		let buf = self.read_array::<8>()?;
		Ok(match self.endianness {
			Endianness::Little => i64::from_le_bytes(buf),
			Endianness::Big => i64::from_be_bytes(buf),
		})
	}

	/// Read an `f32`.
	pub fn read_f32(&mut self) -> Result<f32> {
		let buf = self.read_array::<4>()?;
		Ok(match self.endianness {
			Endianness::Little => f32::from_le_bytes(buf),
			Endianness::Big => f32::from_be_bytes(buf),
		})
	}

	/// Read an `f64`.
	pub fn read_f64(&mut self) -> Result<f64> {
		let buf = self.read_array::<8>()?;
		Ok(match self.endianness {
			Endianness::Little => f64::from_le_bytes(buf),
			Endianness::Big => f64::from_be_bytes(buf),
		})
	}
}

/// Append-only writer mirroring [`Cursor`].
pub struct Writer {
	out: Vec<u8>,
	endianness: Endianness,
}

impl Writer {
	/// Create an empty writer.
	pub fn new(endianness: Endianness) -> Self {
		Self { out: Vec::new(), endianness }
	}

	/// Byte order used for multi-byte writes.
	pub fn endianness(&self) -> Endianness {
		self.endianness
	}

	/// Finish and return written bytes.
	pub fn into_bytes(self) -> Vec<u8> {
		self.out
	}

	/// Write raw bytes.
	pub fn put_slice(&mut self, bytes: &[u8]) {
		self.out.extend_from_slice(bytes);
	}

	/// Write one unsigned byte.
	pub fn put_u8(&mut self, value: u8) {
		self.out.push(value);
	}

	/// Write one signed byte.
	pub fn put_i8(&mut self, value: i8) {
		self.out.push(value as u8);
	}

	/// Write a `u16`.
	pub fn put_u16(&mut self, value: u16) {
		match self.endianness {
			Endianness::Little => self.put_slice(&value.to_le_bytes()),
			Endianness::Big => self.put_slice(&value.to_be_bytes()),
		}
	}

	/// Write an `i16`.
	pub fn put_i16(&mut self, value: i16) {
		match self.endianness {
			Endianness::Little => self.put_slice(&value.to_le_bytes()),
			Endianness::Big => self.put_slice(&value.to_be_bytes()),
		}
	}

	/// Write an `i32`.
	pub fn put_i32(&mut self, value: i32) {
		match self.endianness {
			Endianness::Little => self.put_slice(&value.to_le_bytes()),
			Endianness::Big => self.put_slice(&value.to_be_bytes()),
		}
	}

	/// Write an `i64`.
	pub fn put_i64(&mut self, value: i64) {
		match self.endianness {
			Endianness::Little => self.put_slice(&value.to_le_bytes()),
			Endianness::Big => self.put_slice(&value.to_be_bytes()),
		}
	}

	/// Write an `f32`.
	pub fn put_f32(&mut self, value: f32) {
		match self.endianness {
			Endianness::Little => self.put_slice(&value.to_le_bytes()),
			Endianness::Big => self.put_slice(&value.to_be_bytes()),
		}
	}

	/// Write an `f64`.
	pub fn put_f64(&mut self, value: f64) {
		match self.endianness {
			Endianness::Little => self.put_slice(&value.to_le_bytes()),
			Endianness::Big => self.put_slice(&value.to_be_bytes()),
		}
	}
}
