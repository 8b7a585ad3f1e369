use bitflags::bitflags;

use crate::codec::{ArtResource, BinaryReader, FileKind, KwdHeader, Light};
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use super::CatalogEntry;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ObjectFlags: u32 {
        const DIE_OVER_TIME = 0x0000_0001;
        const DIE_OVER_TIME_IF_NOT_IN_ROOM = 0x0000_0002;
        const OBJECT_TYPE_SPECIAL = 0x0000_0004;
        const OBJECT_TYPE_SPELL_BOOK = 0x0000_0008;
        const OBJECT_TYPE_CRATE = 0x0000_0010;
        const OBJECT_TYPE_LAIR = 0x0000_0020;
        const OBJECT_TYPE_GOLD = 0x0000_0040;
        const OBJECT_TYPE_FOOD = 0x0000_0080;
        const CAN_BE_PICKED_UP = 0x0000_0100;
        const CAN_BE_SLAPPED = 0x0000_0200;
        const DIE_WHEN_SLAPPED = 0x0000_0400;
        const OBJECT_TYPE_LEVEL_GEM = 0x0000_0800;
        const CAN_BE_DROPPED_ON_ANY_LAND = 0x0000_1000;
        const OBSTACLE = 0x0000_2000;
        const BOUNCE = 0x0000_4000;
        const BOULDER_CAN_ROLL_THROUGH = 0x0000_8000;
        const BOULDER_DESTROYS = 0x0001_0000;
        const IS_PILLAR = 0x0002_0000;
        const DOOR_KEY = 0x0008_0000;
        const IS_DAMAGEABLE = 0x0010_0000;
        const HIGHLIGHTABLE = 0x0020_0000;
        const PLACEABLE = 0x0040_0000;
        const FIRST_PERSON_OBSTACLE = 0x0080_0000;
        const SOLID_OBSTACLE = 0x0100_0000;
        const CAST_SHADOWS = 0x0200_0000;
    }
}

/// Object definition (gold, crates, spell books, furniture, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct GameObject {
    pub name: String,
    pub mesh_resource: Option<ArtResource>,
    pub gui_icon_resource: Option<ArtResource>,
    pub in_hand_icon_resource: Option<ArtResource>,
    pub in_hand_mesh_resource: Option<ArtResource>,
    pub unknown_resource: Option<ArtResource>,
    /// Only the resources that are present
    pub additional_resources: Vec<ArtResource>,
    pub light: Light,
    pub width: f32,
    pub height: f32,
    pub mass: f32,
    pub speed: f32,
    pub air_friction: f32,
    pub material: u8,
    pub unknown3: [u8; 3],
    pub flags: ObjectFlags,
    pub hp: u16,
    pub max_angle: u16,
    pub x34c: u16,
    pub mana_value: u16,
    pub tooltip_string_id: u16,
    pub name_string_id: u16,
    pub slap_effect_id: u16,
    pub death_effect_id: u16,
    pub misc_effect_id: u16,
    pub object_id: u8,
    pub start_state: u8,
    pub room_capacity: u8,
    pub pick_up_priority: u8,
    pub sound_category: String,
}

impl CatalogEntry for GameObject {
    type Id = u8;
    const KIND: FileKind = FileKind::Objects;

    fn id(&self) -> u8 {
        self.object_id
    }

    fn read(reader: &mut BinaryReader, sink: &mut dyn DiagnosticSink, _header: &KwdHeader) -> Result<Self> {
        let name = reader.read_string(32)?;
        let mesh_resource = ArtResource::read(reader, sink)?;
        let gui_icon_resource = ArtResource::read(reader, sink)?;
        let in_hand_icon_resource = ArtResource::read(reader, sink)?;
        let in_hand_mesh_resource = ArtResource::read(reader, sink)?;
        let unknown_resource = ArtResource::read(reader, sink)?;
        let mut additional_resources = Vec::new();
        for _ in 0..4 {
            if let Some(art) = ArtResource::read(reader, sink)? {
                additional_resources.push(art);
            }
        }

        Ok(Self {
            name,
            mesh_resource,
            gui_icon_resource,
            in_hand_icon_resource,
            in_hand_mesh_resource,
            unknown_resource,
            additional_resources,
            light: Light::read(reader)?,
            width: reader.read_fixed()?,
            height: reader.read_fixed()?,
            mass: reader.read_fixed()?,
            speed: reader.read_fixed()?,
            air_friction: reader.read_fixed_fine()?,
            material: reader.read_u8()?,
            unknown3: reader.read_array()?,
            flags: ObjectFlags::from_bits_truncate(reader.read_u32()?),
            hp: reader.read_u16()?,
            max_angle: reader.read_u16()?,
            x34c: reader.read_u16()?,
            mana_value: reader.read_u16()?,
            tooltip_string_id: reader.read_u16()?,
            name_string_id: reader.read_u16()?,
            slap_effect_id: reader.read_u16()?,
            death_effect_id: reader.read_u16()?,
            misc_effect_id: reader.read_u16()?,
            object_id: reader.read_u8()?,
            start_state: reader.read_u8()?,
            room_capacity: reader.read_u8()?,
            pick_up_priority: reader.read_u8()?,
            sound_category: reader.read_string(32)?,
        })
    }
}

impl GameObject {
    pub fn is_level_gem(&self) -> bool {
        self.flags.contains(ObjectFlags::OBJECT_TYPE_LEVEL_GEM)
    }
}
