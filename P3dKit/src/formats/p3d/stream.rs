//! Sequential little-endian reader over a chunk payload
//!
//! Every read is bounds-checked against the payload; running short is a
//! [`Error::StreamExhausted`] and leaves the cursor where it was.

use byteorder::{ByteOrder, LittleEndian};
use glam::Mat4;

use crate::error::{Error, Result};

/// Size in bytes of a serialized 4x4 `f32` matrix.
pub const MAT4_SIZE: usize = 64;

/// A fixed-width value that can be decoded from little-endian bytes.
pub trait FixedWidth: Sized {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// Decode from exactly [`Self::SIZE`] bytes.
    fn from_le_slice(bytes: &[u8]) -> Self;
}

macro_rules! impl_fixed_width {
    ($($ty:ty => $read:path),* $(,)?) => {
        $(
            impl FixedWidth for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                fn from_le_slice(bytes: &[u8]) -> Self {
                    $read(bytes)
                }
            }
        )*
    };
}

impl FixedWidth for u8 {
    const SIZE: usize = 1;

    fn from_le_slice(bytes: &[u8]) -> Self {
        bytes[0]
    }
}

impl FixedWidth for i8 {
    const SIZE: usize = 1;

    fn from_le_slice(bytes: &[u8]) -> Self {
        bytes[0] as i8
    }
}

impl_fixed_width! {
    u16 => LittleEndian::read_u16,
    i16 => LittleEndian::read_i16,
    u32 => LittleEndian::read_u32,
    i32 => LittleEndian::read_i32,
    u64 => LittleEndian::read_u64,
    i64 => LittleEndian::read_i64,
    f32 => LittleEndian::read_f32,
    f64 => LittleEndian::read_f64,
}

/// Forward-only cursor over a borrowed byte span.
#[derive(Debug, Clone)]
pub struct MemoryStream<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> MemoryStream<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Borrow the next `count` bytes and advance past them.
    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if count > remaining {
            return Err(Error::StreamExhausted {
                requested: count,
                remaining,
            });
        }
        let bytes = &self.data[self.position..self.position + count];
        self.position += count;
        Ok(bytes)
    }

    /// Read a little-endian fixed-width value.
    pub fn read<T: FixedWidth>(&mut self) -> Result<T> {
        self.take(T::SIZE).map(T::from_le_slice)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.read()
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.read()
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.read()
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        self.read()
    }

    /// Read a `u8`-length-prefixed string.
    ///
    /// Exporters pad names with NULs up to a 4-byte boundary, so trailing
    /// NULs inside the declared length are dropped.
    pub fn read_lp_string(&mut self) -> Result<String> {
        let len = self.read_u8()? as usize;
        if len == 0 {
            return Ok(String::new());
        }
        let start = self.position;
        let bytes = match self.take(len) {
            Ok(bytes) => bytes,
            Err(e) => {
                // keep the length byte unread too
                self.position = start - 1;
                return Err(e);
            }
        };
        let text = String::from_utf8_lossy(bytes);
        Ok(text.trim_end_matches('\0').to_string())
    }

    /// Copy `count` raw bytes out of the stream.
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        self.take(count).map(<[u8]>::to_vec)
    }

    /// Fill `buf` from the stream.
    pub fn read_bytes_into(&mut self, buf: &mut [u8]) -> Result<()> {
        let bytes = self.take(buf.len())?;
        buf.copy_from_slice(bytes);
        Ok(())
    }

    /// Read 16 column-major `f32` values as a matrix.
    pub fn read_mat4(&mut self) -> Result<Mat4> {
        let bytes = self.take(MAT4_SIZE)?;
        let mut cols = [0.0f32; 16];
        LittleEndian::read_f32_into(bytes, &mut cols);
        Ok(Mat4::from_cols_array(&cols))
    }

    /// Advance past `count` bytes without reading them.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.take(count).map(|_| ())
    }
}
