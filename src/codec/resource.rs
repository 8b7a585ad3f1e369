//! Sub-structures shared by many catalog records.

use bitflags::bitflags;

use crate::diagnostics::{report, Diagnostic, DiagnosticSink, TagContext};
use crate::error::Result;
use super::drift::check_padding;
use super::reader::BinaryReader;
use super::types::{Rgba, Vector3f};

/// Bytes of one ArtResource on disk
pub const ART_RESOURCE_SIZE: usize = 84;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ArtResourceFlags: u32 {
        const PLAYER_COLOURED = 0x0000_0002;
        const ANIMATING_TEXTURE = 0x0000_0004;
        const HAS_START_ANIMATION = 0x0000_0008;
        const HAS_END_ANIMATION = 0x0000_0010;
        const RANDOM_START_FRAME = 0x0000_0020;
        const ORIGIN_AT_BOTTOM = 0x0000_0040;
        const DOESNT_LOOP = 0x0000_0080;
        const FLAT = 0x0000_0100;
        const DOESNT_USE_PROGRESSIVE_MESH = 0x0000_0200;
        const USE_ANIMATING_TEXTURE_FOR_SELECTION = 0x0001_0000;
        const PRELOAD = 0x0002_0000;
        const BLOOD = 0x0004_0000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LightFlags: u32 {
        const FLICKER = 0x0001;
        const PULSE = 0x0002;
        const PLAYER_COLOURED = 0x0004;
    }
}

/// How an art resource is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtResourceType {
    None = 0,
    Sprite = 1,
    Alpha = 2,
    AdditiveAlpha = 3,
    TerrainMesh = 4,
    Mesh = 5,
    AnimatingMesh = 6,
    ProceduralMesh = 7,
    MeshCollection = 8,
    Unknown = 9,
}

impl ArtResourceType {
    pub fn from_u8(v: u8) -> Option<Self> {
        Some(match v {
            0 => Self::None,
            1 => Self::Sprite,
            2 => Self::Alpha,
            3 => Self::AdditiveAlpha,
            4 => Self::TerrainMesh,
            5 => Self::Mesh,
            6 => Self::AnimatingMesh,
            7 => Self::ProceduralMesh,
            8 => Self::MeshCollection,
            9 => Self::Unknown,
            _ => return None,
        })
    }
}

/// The 12 type-dependent bytes of an art resource
#[derive(Debug, Clone, PartialEq)]
pub enum ArtPayload {
    None,
    /// Sprites and both alpha image types
    Image { width: f32, height: f32, frames: u32 },
    TerrainMesh { unknown: [u32; 3] },
    Mesh { scale: f32, frames: u32, unknown: u32 },
    AnimatingMesh {
        frames: u32,
        fps: u32,
        start_distance: u16,
        end_distance: u16,
        start_frame: u8,
        end_frame: u8,
    },
    ProceduralMesh { id: u32, unknown: [u32; 2] },
    /// Mesh collections and the unknown type
    Raw { unknown: [u32; 3] },
}

/// Visual resource descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct ArtResource {
    pub name: String,
    pub flags: ArtResourceFlags,
    pub kind: ArtResourceType,
    pub payload: ArtPayload,
    /// Not present on animating meshes
    pub unknown_n: u16,
    pub sometimes_one: u8,
}

impl ArtResource {
    /// Reads one 84-byte resource. Empty names and unknown types give `None`.
    pub fn read(reader: &mut BinaryReader, sink: &mut dyn DiagnosticSink) -> Result<Option<Self>> {
        let name = reader.read_string(64)?;
        let flags = ArtResourceFlags::from_bits_truncate(reader.read_u32()?);

        // The type tag sits behind the payload
        let payload_start = reader.position();
        let (type_id, extra, sometimes_one) = reader.peek_at(payload_start + 12, |r| {
            let type_id = r.read_u8()?;
            let extra = r.read_array::<2>()?;
            Ok((type_id, extra, r.read_u8()?))
        })?;
        let kind = ArtResourceType::from_u8(type_id);

        let payload = match kind {
            Some(ArtResourceType::None) => {
                check_padding(reader, sink, 12)?;
                ArtPayload::None
            }
            Some(ArtResourceType::Sprite | ArtResourceType::Alpha | ArtResourceType::AdditiveAlpha) => {
                ArtPayload::Image {
                    width: reader.read_fixed()?,
                    height: reader.read_fixed()?,
                    frames: reader.read_u32()?,
                }
            }
            Some(ArtResourceType::TerrainMesh) => ArtPayload::TerrainMesh {
                unknown: [reader.read_u32()?, reader.read_u32()?, reader.read_u32()?],
            },
            Some(ArtResourceType::Mesh) => ArtPayload::Mesh {
                scale: reader.read_fixed()?,
                frames: reader.read_u32()?,
                unknown: reader.read_u32()?,
            },
            Some(ArtResourceType::AnimatingMesh) => ArtPayload::AnimatingMesh {
                frames: reader.read_u32()?,
                fps: reader.read_u32()?,
                start_distance: reader.read_u16()?,
                end_distance: reader.read_u16()?,
                start_frame: extra[0],
                end_frame: extra[1],
            },
            Some(ArtResourceType::ProceduralMesh) => ArtPayload::ProceduralMesh {
                id: reader.read_u32()?,
                unknown: [reader.read_u32()?, reader.read_u32()?],
            },
            Some(ArtResourceType::MeshCollection | ArtResourceType::Unknown) => ArtPayload::Raw {
                unknown: [reader.read_u32()?, reader.read_u32()?, reader.read_u32()?],
            },
            None => {
                report(
                    sink,
                    Diagnostic::UnknownTag {
                        context: TagContext::ArtResource,
                        tag: type_id as u32,
                        offset: payload_start + 12,
                    },
                );
                check_padding(reader, sink, 12)?;
                ArtPayload::None
            }
        };
        reader.skip(4)?;

        let Some(kind) = kind else {
            return Ok(None);
        };
        if name.is_empty() {
            return Ok(None);
        }

        let unknown_n = match kind {
            ArtResourceType::AnimatingMesh => 0,
            _ => u16::from_le_bytes(extra),
        };
        Ok(Some(Self { name, flags, kind, payload, unknown_n, sometimes_one }))
    }

    /// Frame count for the payload kinds that carry one
    pub fn frames(&self) -> Option<u32> {
        match self.payload {
            ArtPayload::Image { frames, .. }
            | ArtPayload::Mesh { frames, .. }
            | ArtPayload::AnimatingMesh { frames, .. } => Some(frames),
            _ => None,
        }
    }
}

/// Point light attached to creatures, objects, effects and shots
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Light {
    pub position: Vector3f,
    pub radius: f32,
    pub flags: LightFlags,
    pub color: Rgba,
}

impl Light {
    pub fn read(reader: &mut BinaryReader) -> Result<Self> {
        Ok(Self {
            position: reader.read_vector3f()?,
            radius: reader.read_fixed()?,
            flags: LightFlags::from_bits_truncate(reader.read_u32()?),
            color: reader.read_rgba()?,
        })
    }
}

/// Text table references of a terrain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StringId {
    pub ids: [u32; 5],
    pub unknown: [u8; 4],
}

impl StringId {
    pub fn read(reader: &mut BinaryReader) -> Result<Self> {
        let mut ids = [0u32; 5];
        for id in ids.iter_mut() {
            *id = reader.read_u32()?;
        }
        Ok(Self { ids, unknown: reader.read_array()? })
    }
}
