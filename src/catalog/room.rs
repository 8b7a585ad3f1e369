use bitflags::bitflags;

use crate::codec::{ArtResource, BinaryReader, FileKind, KwdHeader, Rgb};
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use super::CatalogEntry;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RoomFlags: u32 {
        const PLACEABLE_ON_WATER = 0x0001;
        const PLACEABLE_ON_LAVA = 0x0002;
        const PLACEABLE_ON_LAND = 0x0004;
        const HAS_WALLS = 0x0008;
        const CENTRE = 0x0010;
        const SPECIAL_TILES = 0x0020;
        const NORMAL_TILES = 0x0040;
        const BUILDABLE = 0x0080;
        const SPECIAL_WALLS = 0x0100;
        const ATTACKABLE = 0x0200;
        const HAS_FLAME = 0x1000;
        const IS_GOOD = 0x2000;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub name: String,
    pub gui_icon: Option<ArtResource>,
    pub editor_icon: Option<ArtResource>,
    pub complete_resource: Option<ArtResource>,
    pub straight_resource: Option<ArtResource>,
    pub inside_corner_resource: Option<ArtResource>,
    pub unknown_resource: Option<ArtResource>,
    pub outside_corner_resource: Option<ArtResource>,
    pub wall_resource: Option<ArtResource>,
    pub cap_resource: Option<ArtResource>,
    pub ceiling_resource: Option<ArtResource>,
    pub ceiling_height: f32,
    pub research_time: u16,
    pub torch_intensity: u16,
    pub flags: RoomFlags,
    pub tooltip_string_id: u16,
    pub name_string_id: u16,
    pub cost: u16,
    pub fight_effect_id: u16,
    pub general_description_string_id: u16,
    pub strength_string_id: u16,
    pub torch_height: f32,
    pub effects: [u16; 8],
    pub room_id: u8,
    pub return_percentage: u8,
    /// Terrain the room floor is drawn with
    pub terrain_id: u8,
    /// Raw tile construction mode (normal, quad, 3x3, ...)
    pub tile_construction: u8,
    pub created_creature_id: u8,
    pub torch_color: Rgb,
    pub objects: [u8; 8],
    pub sound_category: String,
    pub order_in_editor: u8,
    pub torch_radius: f32,
    pub torch: Option<ArtResource>,
    pub recommended_size_x: u8,
    pub recommended_size_y: u8,
    pub health_gain: i16,
}

impl CatalogEntry for Room {
    type Id = u8;
    const KIND: FileKind = FileKind::Rooms;

    fn id(&self) -> u8 {
        self.room_id
    }

    fn read(reader: &mut BinaryReader, sink: &mut dyn DiagnosticSink, _header: &KwdHeader) -> Result<Self> {
        Ok(Self {
            name: reader.read_string(32)?,
            gui_icon: ArtResource::read(reader, sink)?,
            editor_icon: ArtResource::read(reader, sink)?,
            complete_resource: ArtResource::read(reader, sink)?,
            straight_resource: ArtResource::read(reader, sink)?,
            inside_corner_resource: ArtResource::read(reader, sink)?,
            unknown_resource: ArtResource::read(reader, sink)?,
            outside_corner_resource: ArtResource::read(reader, sink)?,
            wall_resource: ArtResource::read(reader, sink)?,
            cap_resource: ArtResource::read(reader, sink)?,
            ceiling_resource: ArtResource::read(reader, sink)?,
            ceiling_height: reader.read_fixed()?,
            research_time: reader.read_u16()?,
            torch_intensity: reader.read_u16()?,
            flags: RoomFlags::from_bits_truncate(reader.read_u32()?),
            tooltip_string_id: reader.read_u16()?,
            name_string_id: reader.read_u16()?,
            cost: reader.read_u16()?,
            fight_effect_id: reader.read_u16()?,
            general_description_string_id: reader.read_u16()?,
            strength_string_id: reader.read_u16()?,
            torch_height: reader.read_short_fixed()?,
            effects: reader.read_u16_array()?,
            room_id: reader.read_u8()?,
            return_percentage: reader.read_u8()?,
            terrain_id: reader.read_u8()?,
            tile_construction: reader.read_u8()?,
            created_creature_id: reader.read_u8()?,
            torch_color: reader.read_rgb()?,
            objects: reader.read_array()?,
            sound_category: reader.read_string(32)?,
            order_in_editor: reader.read_u8()?,
            torch_radius: reader.read_fixed()?,
            torch: ArtResource::read(reader, sink)?,
            recommended_size_x: reader.read_u8()?,
            recommended_size_y: reader.read_u8()?,
            health_gain: reader.read_i16()?,
        })
    }
}

impl Room {
    pub fn is_placeable_on_land(&self) -> bool {
        self.flags.contains(RoomFlags::PLACEABLE_ON_LAND)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::codec::testutil::{BinaryWriter, ChunkBuilder};
    use crate::diagnostics::EventCollector;

    pub(crate) const ROOM_SIZE: usize = 1055;

    pub(crate) fn write_room(w: &mut BinaryWriter, id: u8, terrain_id: u8, flags: RoomFlags) {
        w.write_string("Bridge", 32);
        w.write_zeros(10 * 84);
        w.write_fixed(2.0);
        w.write_u16_le(0);
        w.write_u16_le(0);
        w.write_u32_le(flags.bits());
        w.write_zeros(6 * 2);
        w.write_i16_le(2048);
        w.write_zeros(8 * 2);
        w.write_u8(id);
        w.write_u8(50);
        w.write_u8(terrain_id);
        w.write_u8(0);
        w.write_u8(0);
        w.write_bytes(&[1, 2, 3]);
        w.write_zeros(8);
        w.write_string("", 32);
        w.write_u8(0);
        w.write_fixed(0.0);
        w.write_zeros(84);
        w.write_u8(3);
        w.write_u8(3);
        w.write_i16_le(-1);
    }

    #[test]
    fn test_read_room() {
        let mut body = BinaryWriter::new();
        write_room(&mut body, 9, 31, RoomFlags::PLACEABLE_ON_WATER | RoomFlags::PLACEABLE_ON_LAVA);
        assert_eq!(body.len(), ROOM_SIZE);
        let data = ChunkBuilder::catalog(FileKind::Rooms, 1).finish(body.as_slice());

        let mut reader = BinaryReader::new(&data);
        let mut sink = EventCollector::new();
        let header = KwdHeader::read(&mut reader, &mut sink).unwrap();
        let rooms = Room::read_all(&mut reader, &mut sink, &header).unwrap();

        let room = &rooms[0];
        assert_eq!(room.id(), 9);
        assert_eq!(room.terrain_id, 31);
        assert_eq!(room.ceiling_height, 2.0);
        assert_eq!(room.torch_height, 0.5);
        assert_eq!(room.return_percentage, 50);
        assert_eq!(room.torch_color, Rgb { r: 1, g: 2, b: 3 });
        assert_eq!(room.health_gain, -1);
        assert!(!room.is_placeable_on_land());
        assert!(reader.is_empty());
        assert!(sink.is_empty());
    }
}
