use bitflags::bitflags;

use crate::codec::{ArtResource, BinaryReader, FileKind, KwdHeader, Vector3f};
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use super::CatalogEntry;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TrapFlags: u32 {
        const REVEAL_WHEN_FIRED = 0x0001;
        const DISARMABLE = 0x0002;
        const INVISIBLE = 0x0004;
        const DISABLED_BY_POSSESSION = 0x0008;
        const IS_GOOD = 0x0010;
        const GUARD_POST = 0x0020;
        const RESEARCHABLE = 0x0040;
        const SHOT_ONE_AT_A_TIME = 0x0080;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trap {
    pub name: String,
    pub mesh_resource: Option<ArtResource>,
    pub gui_icon: Option<ArtResource>,
    pub editor_icon: Option<ArtResource>,
    pub flower_icon: Option<ArtResource>,
    pub fire_resource: Option<ArtResource>,
    pub height: f32,
    pub recharge_time: f32,
    pub charge_time: f32,
    pub threat_duration: f32,
    pub mana_cost_to_fire: u32,
    pub idle_effect_delay: f32,
    pub trigger_data: u32,
    pub shot_data1: u32,
    pub shot_data2: u32,
    pub research_time: u16,
    pub threat: u16,
    pub flags: TrapFlags,
    pub health: u16,
    pub mana_cost: u16,
    pub powerless_effect_id: u16,
    pub idle_effect_id: u16,
    pub death_effect_id: u16,
    pub manuf_to_build: u16,
    pub general_description_string_id: u16,
    pub strength_string_id: u16,
    pub weakness_string_id: u16,
    pub mana_usage: u16,
    pub unknown4: [u8; 2],
    pub tooltip_string_id: u16,
    pub name_string_id: u16,
    pub shots_when_armed: u8,
    /// Raw trigger type (line of sight, pressure, ...)
    pub trigger_type: u8,
    pub trap_id: u8,
    pub shot_type_id: u8,
    pub manuf_crate_object_id: u8,
    pub sound_category: String,
    pub material: u8,
    pub order_in_editor: u8,
    pub shot_offset: Vector3f,
    pub shot_delay: f32,
    pub health_gain: u16,
}

impl CatalogEntry for Trap {
    type Id = u8;
    const KIND: FileKind = FileKind::Traps;

    fn id(&self) -> u8 {
        self.trap_id
    }

    fn read(reader: &mut BinaryReader, sink: &mut dyn DiagnosticSink, _header: &KwdHeader) -> Result<Self> {
        Ok(Self {
            name: reader.read_string(32)?,
            mesh_resource: ArtResource::read(reader, sink)?,
            gui_icon: ArtResource::read(reader, sink)?,
            editor_icon: ArtResource::read(reader, sink)?,
            flower_icon: ArtResource::read(reader, sink)?,
            fire_resource: ArtResource::read(reader, sink)?,
            height: reader.read_fixed()?,
            recharge_time: reader.read_fixed()?,
            charge_time: reader.read_fixed()?,
            threat_duration: reader.read_fixed()?,
            mana_cost_to_fire: reader.read_u32()?,
            idle_effect_delay: reader.read_fixed()?,
            trigger_data: reader.read_u32()?,
            shot_data1: reader.read_u32()?,
            shot_data2: reader.read_u32()?,
            research_time: reader.read_u16()?,
            threat: reader.read_u16()?,
            flags: TrapFlags::from_bits_truncate(reader.read_u32()?),
            health: reader.read_u16()?,
            mana_cost: reader.read_u16()?,
            powerless_effect_id: reader.read_u16()?,
            idle_effect_id: reader.read_u16()?,
            death_effect_id: reader.read_u16()?,
            manuf_to_build: reader.read_u16()?,
            general_description_string_id: reader.read_u16()?,
            strength_string_id: reader.read_u16()?,
            weakness_string_id: reader.read_u16()?,
            mana_usage: reader.read_u16()?,
            unknown4: reader.read_array()?,
            tooltip_string_id: reader.read_u16()?,
            name_string_id: reader.read_u16()?,
            shots_when_armed: reader.read_u8()?,
            trigger_type: reader.read_u8()?,
            trap_id: reader.read_u8()?,
            shot_type_id: reader.read_u8()?,
            manuf_crate_object_id: reader.read_u8()?,
            sound_category: reader.read_string(32)?,
            material: reader.read_u8()?,
            order_in_editor: reader.read_u8()?,
            shot_offset: reader.read_vector3f()?,
            shot_delay: reader.read_fixed()?,
            health_gain: reader.read_u16()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::testutil::{BinaryWriter, ChunkBuilder};
    use crate::diagnostics::EventCollector;

    const TRAP_SIZE: usize = 579;

    fn write_trap(w: &mut BinaryWriter, id: u8, name: &str, flags: TrapFlags) {
        w.write_string(name, 32);
        w.write_zeros(5 * 84);
        w.write_fixed(2.0);
        w.write_fixed(1.5);
        w.write_zeros(2 * 4);
        w.write_u32_le(10);
        w.write_zeros(4 * 4);
        w.write_u16_le(0);
        w.write_u16_le(0);
        w.write_u32_le(flags.bits());
        w.write_u16_le(300);
        w.write_zeros(8 * 2);
        w.write_u16_le(0);
        w.write_zeros(2);
        w.write_zeros(2 * 2);
        w.write_u8(1);
        w.write_u8(2);
        w.write_u8(id);
        w.write_u8(7);
        w.write_u8(0);
        w.write_string("Trap", 32);
        w.write_u8(0);
        w.write_u8(4);
        w.write_fixed(1.0);
        w.write_fixed(0.5);
        w.write_fixed(-0.25);
        w.write_fixed(0.0);
        w.write_u16_le(25);
    }

    #[test]
    fn test_read_trap() {
        let mut body = BinaryWriter::new();
        write_trap(&mut body, 9, "Lightning", TrapFlags::INVISIBLE | TrapFlags::RESEARCHABLE);
        assert_eq!(body.len(), TRAP_SIZE);
        let data = ChunkBuilder::catalog(FileKind::Traps, 1).finish(body.as_slice());

        let mut reader = BinaryReader::new(&data);
        let mut sink = EventCollector::new();
        let header = KwdHeader::read(&mut reader, &mut sink).unwrap();
        let traps = Trap::read_all(&mut reader, &mut sink, &header).unwrap();

        let trap = &traps[0];
        assert_eq!(trap.id(), 9);
        assert_eq!(trap.name, "Lightning");
        assert_eq!(trap.recharge_time, 1.5);
        assert_eq!(trap.mana_cost_to_fire, 10);
        assert!(trap.flags.contains(TrapFlags::INVISIBLE));
        assert_eq!(trap.health, 300);
        assert_eq!(trap.shots_when_armed, 1);
        assert_eq!(trap.shot_type_id, 7);
        assert_eq!(trap.sound_category, "Trap");
        assert_eq!(trap.order_in_editor, 4);
        assert_eq!(trap.shot_offset, Vector3f { x: 1.0, y: 0.5, z: -0.25 });
        assert_eq!(trap.health_gain, 25);
        assert!(reader.is_empty());
        assert!(sink.is_empty());
    }
}
