use bitflags::bitflags;

use crate::codec::{ArtResource, BinaryReader, FileKind, KwdHeader};
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use super::CatalogEntry;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DoorFlags: u32 {
        const IS_SECRET = 0x0001;
        const IS_GOOD = 0x0002;
        const IS_BARRICADE = 0x0004;
        const RESEARCHABLE = 0x0008;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Door {
    pub name: String,
    pub mesh: Option<ArtResource>,
    pub gui_icon: Option<ArtResource>,
    pub editor_icon: Option<ArtResource>,
    pub flower_icon: Option<ArtResource>,
    pub open_resource: Option<ArtResource>,
    pub close_resource: Option<ArtResource>,
    pub height: f32,
    pub health_gain: u16,
    pub unknown1: u16,
    pub unknown2: u32,
    pub research_time: u16,
    pub material: u8,
    pub trap_type_id: u8,
    pub flags: DoorFlags,
    pub health: u16,
    pub gold_cost: u16,
    pub unknown3: [u8; 2],
    pub death_effect_id: u16,
    pub manuf_to_build: u32,
    pub mana_cost: u16,
    pub tooltip_string_id: u16,
    pub name_string_id: u16,
    pub general_description_string_id: u16,
    pub strength_string_id: u16,
    pub weakness_string_id: u16,
    pub door_id: u8,
    pub order_in_editor: u8,
    pub manuf_crate_object_id: u8,
    pub key_object_id: u8,
    pub sound_category: String,
}

impl CatalogEntry for Door {
    type Id = u8;
    const KIND: FileKind = FileKind::Doors;

    fn id(&self) -> u8 {
        self.door_id
    }

    fn read(reader: &mut BinaryReader, sink: &mut dyn DiagnosticSink, _header: &KwdHeader) -> Result<Self> {
        Ok(Self {
            name: reader.read_string(32)?,
            mesh: ArtResource::read(reader, sink)?,
            gui_icon: ArtResource::read(reader, sink)?,
            editor_icon: ArtResource::read(reader, sink)?,
            flower_icon: ArtResource::read(reader, sink)?,
            open_resource: ArtResource::read(reader, sink)?,
            close_resource: ArtResource::read(reader, sink)?,
            height: reader.read_fixed()?,
            health_gain: reader.read_u16()?,
            unknown1: reader.read_u16()?,
            unknown2: reader.read_u32()?,
            research_time: reader.read_u16()?,
            material: reader.read_u8()?,
            trap_type_id: reader.read_u8()?,
            flags: DoorFlags::from_bits_truncate(reader.read_u32()?),
            health: reader.read_u16()?,
            gold_cost: reader.read_u16()?,
            unknown3: reader.read_array()?,
            death_effect_id: reader.read_u16()?,
            manuf_to_build: reader.read_u32()?,
            mana_cost: reader.read_u16()?,
            tooltip_string_id: reader.read_u16()?,
            name_string_id: reader.read_u16()?,
            general_description_string_id: reader.read_u16()?,
            strength_string_id: reader.read_u16()?,
            weakness_string_id: reader.read_u16()?,
            door_id: reader.read_u8()?,
            order_in_editor: reader.read_u8()?,
            manuf_crate_object_id: reader.read_u8()?,
            key_object_id: reader.read_u8()?,
            sound_category: reader.read_string(32)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::testutil::{BinaryWriter, ChunkBuilder};
    use crate::diagnostics::{Diagnostic, EventCollector};

    const DOOR_SIZE: usize = 616;
    const FLAGS_OFFSET: usize = 552;
    const ID_OFFSET: usize = 580;

    fn door_record(id: u8, name: &str, flags: DoorFlags, len: usize) -> Vec<u8> {
        let mut w = BinaryWriter::new();
        w.write_string(name, 32);
        let mut data = w.into_vec();
        data.resize(len, 0);
        data[FLAGS_OFFSET..FLAGS_OFFSET + 4].copy_from_slice(&flags.bits().to_le_bytes());
        data[ID_OFFSET] = id;
        data
    }

    #[test]
    fn test_longer_records_are_realigned() {
        // Newer files append 4 bytes the reader does not know about
        let mut body = door_record(2, "Wooden", DoorFlags::RESEARCHABLE, DOOR_SIZE + 4);
        body.extend(door_record(5, "Secret", DoorFlags::IS_SECRET, DOOR_SIZE + 4));
        let data = ChunkBuilder::catalog(FileKind::Doors, 2).finish(&body);

        let mut reader = BinaryReader::new(&data);
        let mut sink = EventCollector::new();
        let header = KwdHeader::read(&mut reader, &mut sink).unwrap();
        let doors = Door::read_all(&mut reader, &mut sink, &header).unwrap();

        assert_eq!(doors.iter().map(|d| d.id()).collect::<Vec<_>>(), vec![2, 5]);
        assert_eq!(doors[1].name, "Secret");
        assert!(doors[1].flags.contains(DoorFlags::IS_SECRET));
        assert!(doors[0].mesh.is_none());
        assert_eq!(
            sink.events()[0],
            Diagnostic::Drift { start: 56, expected: 56 + DOOR_SIZE + 4, actual: 56 + DOOR_SIZE }
        );
        assert_eq!(sink.count(|e| matches!(e, Diagnostic::Drift { .. })), 2);
        assert!(reader.is_empty());
    }
}
