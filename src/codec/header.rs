use serde::Serialize;

use crate::diagnostics::{report, Diagnostic, DiagnosticSink};
use crate::error::{Error, Result};
use super::reader::BinaryReader;
use super::types::Timestamp;

/// File kind tag at the start of every chunk header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u32)]
pub enum FileKind {
    Globals = 0,
    Map = 100,
    Terrain = 110,
    Rooms = 120,
    Traps = 130,
    Doors = 140,
    KeeperSpells = 150,
    CreatureSpells = 160,
    Creatures = 170,
    Players = 180,
    Things = 190,
    Triggers = 210,
    Level = 220,
    Variables = 230,
    Objects = 240,
    EffectElements = 250,
    Shots = 260,
    Effects = 270,
}

impl FileKind {
    pub fn from_u32(v: u32) -> Option<Self> {
        Some(match v {
            0 => Self::Globals,
            100 => Self::Map,
            110 => Self::Terrain,
            120 => Self::Rooms,
            130 => Self::Traps,
            140 => Self::Doors,
            150 => Self::KeeperSpells,
            160 => Self::CreatureSpells,
            170 => Self::Creatures,
            180 => Self::Players,
            190 => Self::Things,
            210 => Self::Triggers,
            220 => Self::Level,
            230 => Self::Variables,
            240 => Self::Objects,
            250 => Self::EffectElements,
            260 => Self::Shots,
            270 => Self::Effects,
            _ => return None,
        })
    }

    pub fn id(self) -> u32 {
        self as u32
    }

    /// Expected values of the two header check words
    pub fn checksums(self) -> (u32, u32) {
        match self {
            Self::Level => (221, 223),
            _ => (self.id() + 1, self.id() + 2),
        }
    }
}

/// Header size assumed for catalogs when computing the item size
const DEFAULT_HEADER_SIZE: u32 = 56;
const MAP_HEADER_SIZE: u32 = 36;
const TRIGGERS_HEADER_SIZE: u32 = 60;

/// Common chunk header with its type-specific tail
#[derive(Debug, Clone, Default, Serialize)]
pub struct KwdHeader {
    pub type_id: u32,
    pub size: u32,
    pub check_one: u32,
    pub header_end_offset: u32,
    pub header_size: u32,
    pub item_count: u32,
    /// Grid width, only set for map chunks
    pub width: u32,
    /// Grid height for map chunks, trailing word count for level chunks
    pub height: u32,
    pub unknown: u32,
    pub date_created: Option<Timestamp>,
    pub date_modified: Option<Timestamp>,
    pub check_two: u32,
    pub data_size: u32,
}

impl KwdHeader {
    /// Reads a header and leaves the cursor at the start of the chunk data
    pub fn read(reader: &mut BinaryReader, sink: &mut dyn DiagnosticSink) -> Result<Self> {
        let mut header = Self {
            type_id: reader.read_u32()?,
            header_size: DEFAULT_HEADER_SIZE,
            ..Default::default()
        };

        // Width of the real size field, 4 in every known file
        header.size = match reader.read_u32()? {
            2 => reader.read_u16()? as u32,
            4 => reader.read_u32()?,
            _ => 0,
        };
        header.check_one = reader.read_u32()?;
        header.header_end_offset = reader.read_u32()?;
        let tail_start = reader.position();

        match header.kind() {
            Some(FileKind::Map) => {
                header.header_size = MAP_HEADER_SIZE;
                header.width = reader.read_u32()?;
                header.height = reader.read_u32()?;
            }
            Some(FileKind::Triggers) => {
                header.header_size = TRIGGERS_HEADER_SIZE;
                let generic = reader.read_u32()?;
                let actions = reader.read_u32()?;
                header.item_count = generic.wrapping_add(actions);
                header.read_common_tail(reader)?;
            }
            Some(FileKind::Level) => {
                header.item_count = reader.read_u16()? as u32;
                header.height = reader.read_u16()? as u32;
                header.read_common_tail(reader)?;
            }
            _ => {
                header.item_count = reader.read_u32()?;
                header.read_common_tail(reader)?;
            }
        }

        let expected = tail_start + header.header_end_offset as usize;
        if reader.position() != expected {
            report(
                sink,
                Diagnostic::HeaderMismatch {
                    type_id: header.type_id,
                    expected,
                    actual: reader.position(),
                },
            );
        }

        header.check_two = reader.read_u32()?;
        header.data_size = reader.read_u32()?;
        Ok(header)
    }

    fn read_common_tail(&mut self, reader: &mut BinaryReader) -> Result<()> {
        self.unknown = reader.read_u32()?;
        self.date_created = Some(reader.read_timestamp()?);
        self.date_modified = Some(reader.read_timestamp()?);
        Ok(())
    }

    pub fn kind(&self) -> Option<FileKind> {
        FileKind::from_u32(self.type_id)
    }

    /// Size of one record, used for drift correction. Not meaningful for
    /// variable-length chunks (things, triggers).
    pub fn item_size(&self) -> usize {
        (self.size.saturating_sub(self.header_size) as usize)
            .checked_div(self.item_count as usize)
            .unwrap_or(0)
    }

    /// Fails unless both check words match `kind`
    pub fn verify_checksums(&self, kind: FileKind) -> Result<()> {
        let (expected, expected_two) = kind.checksums();
        if self.check_one != expected || self.check_two != expected_two {
            return Err(Error::ChecksumMismatch {
                kind,
                expected,
                expected_two,
                actual: self.check_one,
                actual_two: self.check_two,
            });
        }
        Ok(())
    }
}
