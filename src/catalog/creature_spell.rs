use crate::codec::{ArtResource, BinaryReader, FileKind, KwdHeader};
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use super::CatalogEntry;

/// Spell a creature can cast
#[derive(Debug, Clone, PartialEq)]
pub struct CreatureSpell {
    pub name: String,
    pub editor_icon: Option<ArtResource>,
    pub gui_icon: Option<ArtResource>,
    pub shot_data1: u32,
    pub shot_data2: u32,
    pub range: f32,
    /// Raw flag word
    pub flags: u32,
    pub combat_points: u16,
    pub sound_event: u16,
    pub name_string_id: u16,
    pub tooltip_string_id: u16,
    pub general_description_string_id: u16,
    pub strength_string_id: u16,
    pub weakness_string_id: u16,
    pub creature_spell_id: u8,
    pub shot_type_id: u8,
    pub alternative_shot_id: u8,
    pub alternative_room_id: u8,
    pub recharge_time: f32,
    pub alternative_shot: u8,
    pub unused: [u8; 27],
}

impl CatalogEntry for CreatureSpell {
    type Id = u8;
    const KIND: FileKind = FileKind::CreatureSpells;

    fn id(&self) -> u8 {
        self.creature_spell_id
    }

    fn read(reader: &mut BinaryReader, sink: &mut dyn DiagnosticSink, _header: &KwdHeader) -> Result<Self> {
        Ok(Self {
            name: reader.read_string(32)?,
            editor_icon: ArtResource::read(reader, sink)?,
            gui_icon: ArtResource::read(reader, sink)?,
            shot_data1: reader.read_u32()?,
            shot_data2: reader.read_u32()?,
            range: reader.read_fixed()?,
            flags: reader.read_u32()?,
            combat_points: reader.read_u16()?,
            sound_event: reader.read_u16()?,
            name_string_id: reader.read_u16()?,
            tooltip_string_id: reader.read_u16()?,
            general_description_string_id: reader.read_u16()?,
            strength_string_id: reader.read_u16()?,
            weakness_string_id: reader.read_u16()?,
            creature_spell_id: reader.read_u8()?,
            shot_type_id: reader.read_u8()?,
            alternative_shot_id: reader.read_u8()?,
            alternative_room_id: reader.read_u8()?,
            recharge_time: reader.read_fixed()?,
            alternative_shot: reader.read_u8()?,
            unused: reader.read_array()?,
        })
    }
}
