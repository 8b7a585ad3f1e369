//! Byte buffer builders for decoder tests.

use super::header::FileKind;
use super::types::FIXED_SCALE;

/// Little-endian byte writer for building test records
#[derive(Default)]
pub struct BinaryWriter {
    data: Vec<u8>,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    pub fn write_zeros(&mut self, n: usize) {
        self.data.resize(self.data.len() + n, 0);
    }

    pub fn write_u8(&mut self, v: u8) {
        self.data.push(v);
    }

    pub fn write_u16_le(&mut self, v: u16) {
        self.data.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_i16_le(&mut self, v: i16) {
        self.data.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_u32_le(&mut self, v: u32) {
        self.data.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_i32_le(&mut self, v: i32) {
        self.data.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_fixed(&mut self, v: f32) {
        self.write_i32_le((v * FIXED_SCALE) as i32);
    }

    /// Zero padded fixed-width string
    pub fn write_string(&mut self, s: &str, width: usize) {
        let bytes = s.as_bytes();
        assert!(bytes.len() <= width, "string does not fit");
        self.data.extend_from_slice(bytes);
        self.write_zeros(width - bytes.len());
    }

    /// Zero padded fixed-width UTF-16LE string
    pub fn write_utf16(&mut self, s: &str, units: usize) {
        let encoded: Vec<u16> = s.encode_utf16().collect();
        assert!(encoded.len() <= units, "string does not fit");
        for unit in &encoded {
            self.write_u16_le(*unit);
        }
        self.write_zeros((units - encoded.len()) * 2);
    }

    pub fn write_timestamp(&mut self) {
        self.write_u16_le(1999);
        self.write_u8(15);
        self.write_u8(3);
        self.write_zeros(2);
        self.write_u8(12);
        self.write_u8(30);
        self.write_u8(45);
        self.write_u8(0);
    }
}

enum Tail {
    Map { width: u32, height: u32 },
    Triggers { generic: u32, actions: u32 },
    Level { paths: u16, trailing: u16 },
    Catalog { count: u32 },
}

/// Builds a complete chunk: header followed by a body
pub struct ChunkBuilder {
    type_id: u32,
    tail: Tail,
    check_one: u32,
    check_two: u32,
    header_end_offset: Option<u32>,
    size: Option<u32>,
    data_size: Option<u32>,
}

impl ChunkBuilder {
    fn new(type_id: u32, tail: Tail) -> Self {
        let (check_one, check_two) = FileKind::from_u32(type_id)
            .map(FileKind::checksums)
            .unwrap_or((type_id + 1, type_id + 2));
        Self {
            type_id,
            tail,
            check_one,
            check_two,
            header_end_offset: None,
            size: None,
            data_size: None,
        }
    }

    pub fn map(width: u32, height: u32) -> Self {
        Self::new(FileKind::Map.id(), Tail::Map { width, height })
    }

    pub fn triggers(generic: u32, actions: u32) -> Self {
        Self::new(FileKind::Triggers.id(), Tail::Triggers { generic, actions })
    }

    pub fn level(paths: u16, trailing: u16) -> Self {
        Self::new(FileKind::Level.id(), Tail::Level { paths, trailing })
    }

    pub fn catalog(kind: FileKind, count: u32) -> Self {
        Self::new(kind.id(), Tail::Catalog { count })
    }

    /// Catalog chunk with an arbitrary (possibly unknown) type id
    pub fn raw(type_id: u32, count: u32) -> Self {
        Self::new(type_id, Tail::Catalog { count })
    }

    pub fn checksums(mut self, one: u32, two: u32) -> Self {
        self.check_one = one;
        self.check_two = two;
        self
    }

    pub fn header_end_offset(mut self, offset: u32) -> Self {
        self.header_end_offset = Some(offset);
        self
    }

    /// Overrides the declared chunk size (header size + body by default)
    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn data_size(mut self, data_size: u32) -> Self {
        self.data_size = Some(data_size);
        self
    }

    fn header_size(&self) -> u32 {
        match self.tail {
            Tail::Map { .. } => 36,
            Tail::Triggers { .. } => 60,
            _ => 56,
        }
    }

    pub fn finish(&self, body: &[u8]) -> Vec<u8> {
        let mut w = BinaryWriter::new();
        w.write_u32_le(self.type_id);
        w.write_u32_le(4);
        w.write_u32_le(self.size.unwrap_or(self.header_size() + body.len() as u32));
        w.write_u32_le(self.check_one);

        let mut tail = BinaryWriter::new();
        match self.tail {
            Tail::Map { width, height } => {
                tail.write_u32_le(width);
                tail.write_u32_le(height);
            }
            Tail::Triggers { generic, actions } => {
                tail.write_u32_le(generic);
                tail.write_u32_le(actions);
                tail.write_u32_le(0);
                tail.write_timestamp();
                tail.write_timestamp();
            }
            Tail::Level { paths, trailing } => {
                tail.write_u16_le(paths);
                tail.write_u16_le(trailing);
                tail.write_u32_le(0);
                tail.write_timestamp();
                tail.write_timestamp();
            }
            Tail::Catalog { count } => {
                tail.write_u32_le(count);
                tail.write_u32_le(0);
                tail.write_timestamp();
                tail.write_timestamp();
            }
        }

        w.write_u32_le(self.header_end_offset.unwrap_or(tail.len() as u32));
        w.write_bytes(tail.as_slice());
        w.write_u32_le(self.check_two);
        w.write_u32_le(self.data_size.unwrap_or(body.len() as u32));
        w.write_bytes(body);
        w.into_vec()
    }
}
