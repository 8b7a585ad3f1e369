use crate::codec::{ArtResource, BinaryReader, FileKind, KwdHeader};
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use super::CatalogEntry;

/// Spell cast by the keeper's hand
#[derive(Debug, Clone, PartialEq)]
pub struct KeeperSpell {
    pub name: String,
    pub gui_icon: Option<ArtResource>,
    pub editor_icon: Option<ArtResource>,
    pub xc8: i32,
    pub recharge_time: f32,
    pub shot_data1: i32,
    pub shot_data2: i32,
    pub research_time: u16,
    pub target_rule: u8,
    pub order_in_editor: u8,
    /// Raw flag word
    pub flags: u32,
    pub xe0_unreferenced: u16,
    pub mana_drain: u16,
    pub tooltip_string_id: u16,
    pub name_string_id: u16,
    pub general_description_string_id: u16,
    pub strength_string_id: u16,
    pub weakness_string_id: u16,
    pub keeper_spell_id: u8,
    pub cast_rule: u8,
    pub shot_type_id: u8,
    pub sound_category: String,
    pub bonus_r_time: u16,
    pub bonus_shot_type_id: u8,
    pub bonus_shot_data1: i32,
    pub bonus_shot_data2: i32,
    pub mana_cost: i32,
    pub bonus_icon: Option<ArtResource>,
    pub sound_category_gui: String,
    pub hand_anim_id: u8,
    pub no_go_hand_anim_id: u8,
}

impl CatalogEntry for KeeperSpell {
    type Id = u8;
    const KIND: FileKind = FileKind::KeeperSpells;

    fn id(&self) -> u8 {
        self.keeper_spell_id
    }

    fn read(reader: &mut BinaryReader, sink: &mut dyn DiagnosticSink, _header: &KwdHeader) -> Result<Self> {
        Ok(Self {
            name: reader.read_string(32)?,
            gui_icon: ArtResource::read(reader, sink)?,
            editor_icon: ArtResource::read(reader, sink)?,
            xc8: reader.read_i32()?,
            recharge_time: reader.read_fixed()?,
            shot_data1: reader.read_i32()?,
            shot_data2: reader.read_i32()?,
            research_time: reader.read_u16()?,
            target_rule: reader.read_u8()?,
            order_in_editor: reader.read_u8()?,
            flags: reader.read_u32()?,
            xe0_unreferenced: reader.read_u16()?,
            mana_drain: reader.read_u16()?,
            tooltip_string_id: reader.read_u16()?,
            name_string_id: reader.read_u16()?,
            general_description_string_id: reader.read_u16()?,
            strength_string_id: reader.read_u16()?,
            weakness_string_id: reader.read_u16()?,
            keeper_spell_id: reader.read_u8()?,
            cast_rule: reader.read_u8()?,
            shot_type_id: reader.read_u8()?,
            sound_category: reader.read_string(32)?,
            bonus_r_time: reader.read_u16()?,
            bonus_shot_type_id: reader.read_u8()?,
            bonus_shot_data1: reader.read_i32()?,
            bonus_shot_data2: reader.read_i32()?,
            mana_cost: reader.read_i32()?,
            bonus_icon: ArtResource::read(reader, sink)?,
            sound_category_gui: reader.read_string(32)?,
            hand_anim_id: reader.read_u8()?,
            no_go_hand_anim_id: reader.read_u8()?,
        })
    }
}
