use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Error, Result};
use super::types::{Rgb, Rgba, Timestamp, Vector3f, FIXED_SCALE, FIXED_SCALE_FINE};

/// Binary reader over a fully buffered KWD file
///
/// All multi-byte values are little-endian. The cursor can be moved freely
/// with [`seek`](Self::seek), which the peek-ahead readers rely on.
pub struct BinaryReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BinaryReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Moves the cursor to an absolute offset. The end of the buffer is a valid target.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(Error::SeekOutOfBounds { target: pos, len: self.data.len() });
        }
        self.pos = pos;
        Ok(())
    }

    /// Runs `f` with the cursor at `pos`, then puts the cursor back where it was
    pub fn peek_at<T>(
        &mut self,
        pos: usize,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let saved = self.pos;
        self.seek(pos)?;
        let result = f(self);
        self.pos = saved;
        result
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.ensure(n)?;
        self.pos += n;
        Ok(())
    }

    fn ensure(&self, n: usize) -> Result<()> {
        if self.remaining() < n {
            return Err(Error::UnexpectedEof { offset: self.pos, need: n });
        }
        Ok(())
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.ensure(n)?;
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Reads `N` unsigned bytes into an array
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        let v = self.data[self.pos];
        self.pos += 1;
        Ok(v)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.read_bytes(2)?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(LittleEndian::read_i16(self.read_bytes(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.read_bytes(4)?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.read_bytes(4)?))
    }

    /// Reads `N` consecutive u16 values
    pub fn read_u16_array<const N: usize>(&mut self) -> Result<[u16; N]> {
        let mut out = [0u16; N];
        for v in out.iter_mut() {
            *v = self.read_u16()?;
        }
        Ok(out)
    }

    /// 32-bit boolean, true only when the stored value is exactly 1
    pub fn read_bool32(&mut self) -> Result<bool> {
        Ok(self.read_i32()? == 1)
    }

    /// 20.12 fixed point
    pub fn read_fixed(&mut self) -> Result<f32> {
        Ok(self.read_i32()? as f32 / FIXED_SCALE)
    }

    /// 16.16 fixed point
    pub fn read_fixed_fine(&mut self) -> Result<f32> {
        Ok(self.read_i32()? as f32 / FIXED_SCALE_FINE)
    }

    /// 4.12 fixed point stored in 16 bits
    pub fn read_short_fixed(&mut self) -> Result<f32> {
        Ok(self.read_i16()? as f32 / FIXED_SCALE)
    }

    pub fn read_vector3f(&mut self) -> Result<Vector3f> {
        Ok(Vector3f {
            x: self.read_fixed()?,
            y: self.read_fixed()?,
            z: self.read_fixed()?,
        })
    }

    /// Fixed-width single byte string, cut at the first NUL and trimmed
    pub fn read_string(&mut self, width: usize) -> Result<String> {
        let bytes = self.read_bytes(width)?;
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        // Latin-1: every byte maps to the code point of the same value
        let s: String = bytes[..end].iter().map(|&b| b as char).collect();
        Ok(s.trim().to_string())
    }

    /// Fixed-width UTF-16LE string of `units` code units, cut at the first NUL and trimmed
    pub fn read_utf16_string(&mut self, units: usize) -> Result<String> {
        let bytes = self.read_bytes(units * 2)?;
        let code_units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(LittleEndian::read_u16)
            .take_while(|&u| u != 0)
            .collect();
        Ok(String::from_utf16_lossy(&code_units).trim().to_string())
    }

    pub fn read_timestamp(&mut self) -> Result<Timestamp> {
        let year = self.read_u16()?;
        let day = self.read_u8()?;
        let month = self.read_u8()?;
        self.skip(2)?;
        let hour = self.read_u8()?;
        let minute = self.read_u8()?;
        let second = self.read_u8()?;
        self.skip(1)?;
        Ok(Timestamp { year, month, day, hour, minute, second })
    }

    pub fn read_rgb(&mut self) -> Result<Rgb> {
        Ok(Rgb {
            r: self.read_u8()?,
            g: self.read_u8()?,
            b: self.read_u8()?,
        })
    }

    pub fn read_rgba(&mut self) -> Result<Rgba> {
        Ok(Rgba {
            r: self.read_u8()?,
            g: self.read_u8()?,
            b: self.read_u8()?,
            a: self.read_u8()?,
        })
    }

    /// Consumes `n` padding bytes and reports whether they were all zero
    pub fn read_padding(&mut self, n: usize) -> Result<bool> {
        Ok(self.read_bytes(n)?.iter().all(|&b| b == 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_primitives() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.read_u8().unwrap(), 0x01);
        assert_eq!(reader.read_u16().unwrap(), 0x0302);
        assert_eq!(reader.read_u32().unwrap(), 0x07060504);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_unexpected_eof() {
        let data = [0x01, 0x02];
        let mut reader = BinaryReader::new(&data);
        assert!(matches!(
            reader.read_u32(),
            Err(Error::UnexpectedEof { offset: 0, need: 4 })
        ));
        // Failed reads leave the cursor alone
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_fixed_point() {
        // 4096 -> 1.0, -2048 -> -0.5
        let mut data = Vec::new();
        data.extend_from_slice(&4096i32.to_le_bytes());
        data.extend_from_slice(&(-2048i32).to_le_bytes());
        data.extend_from_slice(&32768i32.to_le_bytes());
        data.extend_from_slice(&2048i16.to_le_bytes());
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.read_fixed().unwrap(), 1.0);
        assert_eq!(reader.read_fixed().unwrap(), -0.5);
        assert_eq!(reader.read_fixed_fine().unwrap(), 0.5);
        assert_eq!(reader.read_short_fixed().unwrap(), 0.5);
    }

    #[test]
    fn test_read_string_cuts_at_nul() {
        let mut data = [0u8; 8];
        data[..5].copy_from_slice(b" Imp ");
        data[6] = b'x';
        let mut reader = BinaryReader::new(&data);
        assert_eq!(reader.read_string(8).unwrap(), "Imp");
        assert_eq!(reader.position(), 8);
    }

    #[test]
    fn test_read_utf16_string() {
        let mut data = Vec::new();
        for unit in "Lvl1".encode_utf16() {
            data.extend_from_slice(&unit.to_le_bytes());
        }
        data.extend_from_slice(&[0, 0, 0, 0]);
        let mut reader = BinaryReader::new(&data);
        assert_eq!(reader.read_utf16_string(6).unwrap(), "Lvl1");
        assert!(reader.is_empty());
    }

    #[test]
    fn test_read_timestamp() {
        let data = [0xCF, 0x07, 15, 3, 0xAA, 0xBB, 12, 30, 45, 0xCC];
        let mut reader = BinaryReader::new(&data);
        let ts = reader.read_timestamp().unwrap();
        assert_eq!(ts.year, 1999);
        assert_eq!(ts.day, 15);
        assert_eq!(ts.month, 3);
        assert_eq!((ts.hour, ts.minute, ts.second), (12, 30, 45));
        assert_eq!(ts.to_string(), "1999-03-15 12:30:45");
        assert_eq!(reader.position(), 10);
    }

    #[test]
    fn test_seek_and_padding() {
        let data = [0, 0, 1, 0];
        let mut reader = BinaryReader::new(&data);
        assert!(reader.read_padding(2).unwrap());
        assert!(!reader.read_padding(2).unwrap());
        reader.seek(1).unwrap();
        assert_eq!(reader.read_u8().unwrap(), 0);
        reader.seek(4).unwrap();
        assert!(reader.is_empty());
        assert!(matches!(reader.seek(5), Err(Error::SeekOutOfBounds { target: 5, len: 4 })));
    }

    #[test]
    fn test_peek_at_restores_position() {
        let data = [1, 2, 3, 4];
        let mut reader = BinaryReader::new(&data);
        reader.skip(1).unwrap();

        let peeked = reader.peek_at(3, |r| r.read_u8()).unwrap();
        assert_eq!(peeked, 4);
        assert_eq!(reader.position(), 1);

        // Restored even when the peek fails
        assert!(reader.peek_at(3, |r| r.read_u16()).is_err());
        assert_eq!(reader.position(), 1);
    }
}
