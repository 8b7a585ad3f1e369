use bitflags::bitflags;

use crate::codec::{ArtResource, BinaryReader, FileKind, KwdHeader, Rgb, StringId};
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use super::CatalogEntry;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TerrainFlags: u32 {
        const SOLID = 0x0000_0001;
        const IMPENETRABLE = 0x0000_0002;
        const OWNABLE = 0x0000_0004;
        const TAGGABLE = 0x0000_0008;
        const ROOM = 0x0000_0010;
        const ATTACKABLE = 0x0000_0020;
        const TORCH = 0x0000_0040;
        const WATER = 0x0000_0080;
        const LAVA = 0x0000_0100;
        const ALWAYS_EXPLORED = 0x0000_0200;
        const PLAYER_COLOURED_PATH = 0x0000_0400;
        const PLAYER_COLOURED_WALL = 0x0000_0800;
        const CONSTRUCTION_TYPE_WATER = 0x0000_1000;
        const CONSTRUCTION_TYPE_QUAD = 0x0000_2000;
        const UNEXPLORE_IF_DUG_BY_ANOTHER_PLAYER = 0x0000_4000;
        const FILL_INABLE = 0x0000_8000;
        const ALLOW_ROOM_WALLS = 0x0001_0000;
        const DECAY = 0x0002_0000;
        const RANDOM_TEXTURE = 0x0004_0000;
        const TERRAIN_COLOR_RED = 0x0008_0000;
        const TERRAIN_COLOR_GREEN = 0x0010_0000;
        const TERRAIN_COLOR_BLUE = 0x0020_0000;
        const DWARF_CAN_DIG_THROUGH = 0x0040_0000;
        const REVEAL_THROUGH_FOG_OF_WAR = 0x0080_0000;
        const AMBIENT_COLOR_RED = 0x0100_0000;
        const AMBIENT_COLOR_GREEN = 0x0200_0000;
        const AMBIENT_COLOR_BLUE = 0x0400_0000;
        const TERRAIN_LIGHT = 0x0800_0000;
        const AMBIENT_LIGHT = 0x1000_0000;
    }
}

/// Map tile type: rock, dirt, water, lava, claimed path, room floors, ...
#[derive(Debug, Clone, PartialEq)]
pub struct Terrain {
    pub name: String,
    pub complete_resource: Option<ArtResource>,
    pub side_resource: Option<ArtResource>,
    pub top_resource: Option<ArtResource>,
    pub tagged_top_resource: Option<ArtResource>,
    pub string_ids: StringId,
    pub depth: f32,
    pub light_height: f32,
    pub flags: TerrainFlags,
    pub damage: u16,
    pub editor_texture_id: u16,
    pub unk198: u16,
    pub gold_value: u16,
    pub mana_gain: u16,
    pub max_mana_gain: u16,
    pub tooltip_string_id: u16,
    pub name_string_id: u16,
    pub max_health_effect_id: u16,
    pub destroyed_effect_id: u16,
    pub general_description_string_id: u16,
    pub strength_string_id: u16,
    pub weakness_string_id: u16,
    pub unk1ae: [u16; 16],
    pub wibble_h: u8,
    pub lean_h: [u8; 3],
    pub wibble_v: u8,
    pub lean_v: [u8; 3],
    pub terrain_id: u8,
    pub starting_health: u16,
    pub max_health_type_terrain_id: u8,
    pub destroyed_type_terrain_id: u8,
    pub terrain_light: Rgb,
    pub texture_frames: u8,
    pub sound_category: String,
    pub max_health: u16,
    pub ambient_light: Rgb,
    pub sound_category_first_person: String,
    pub unk224: u32,
}

impl CatalogEntry for Terrain {
    type Id = u8;
    const KIND: FileKind = FileKind::Terrain;

    fn id(&self) -> u8 {
        self.terrain_id
    }

    fn read(reader: &mut BinaryReader, sink: &mut dyn DiagnosticSink, _header: &KwdHeader) -> Result<Self> {
        Ok(Self {
            name: reader.read_string(32)?,
            complete_resource: ArtResource::read(reader, sink)?,
            side_resource: ArtResource::read(reader, sink)?,
            top_resource: ArtResource::read(reader, sink)?,
            tagged_top_resource: ArtResource::read(reader, sink)?,
            string_ids: StringId::read(reader)?,
            depth: reader.read_fixed()?,
            light_height: reader.read_fixed()?,
            flags: TerrainFlags::from_bits_truncate(reader.read_u32()?),
            damage: reader.read_u16()?,
            editor_texture_id: reader.read_u16()?,
            unk198: reader.read_u16()?,
            gold_value: reader.read_u16()?,
            mana_gain: reader.read_u16()?,
            max_mana_gain: reader.read_u16()?,
            tooltip_string_id: reader.read_u16()?,
            name_string_id: reader.read_u16()?,
            max_health_effect_id: reader.read_u16()?,
            destroyed_effect_id: reader.read_u16()?,
            general_description_string_id: reader.read_u16()?,
            strength_string_id: reader.read_u16()?,
            weakness_string_id: reader.read_u16()?,
            unk1ae: reader.read_u16_array()?,
            wibble_h: reader.read_u8()?,
            lean_h: reader.read_array()?,
            wibble_v: reader.read_u8()?,
            lean_v: reader.read_array()?,
            terrain_id: reader.read_u8()?,
            starting_health: reader.read_u16()?,
            max_health_type_terrain_id: reader.read_u8()?,
            destroyed_type_terrain_id: reader.read_u8()?,
            terrain_light: reader.read_rgb()?,
            texture_frames: reader.read_u8()?,
            sound_category: reader.read_string(32)?,
            max_health: reader.read_u16()?,
            ambient_light: reader.read_rgb()?,
            sound_category_first_person: reader.read_string(32)?,
            unk224: reader.read_u32()?,
        })
    }
}

impl Terrain {
    pub fn is_water(&self) -> bool {
        self.flags.contains(TerrainFlags::WATER)
    }

    pub fn is_lava(&self) -> bool {
        self.flags.contains(TerrainFlags::LAVA)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::codec::testutil::{BinaryWriter, ChunkBuilder};
    use crate::diagnostics::EventCollector;

    /// Bytes of one terrain record
    pub(crate) const TERRAIN_SIZE: usize = 552;

    /// Writes a terrain record with empty art resources
    pub(crate) fn write_terrain(w: &mut BinaryWriter, id: u8, name: &str, flags: TerrainFlags) {
        w.write_string(name, 32);
        w.write_zeros(4 * 84);
        w.write_zeros(24);
        w.write_fixed(1.0);
        w.write_fixed(0.5);
        w.write_u32_le(flags.bits());
        w.write_zeros(13 * 2);
        w.write_zeros(16 * 2);
        w.write_zeros(8);
        w.write_u8(id);
        w.write_u16_le(100);
        w.write_u8(0);
        w.write_u8(0);
        w.write_bytes(&[10, 20, 30]);
        w.write_u8(1);
        w.write_string("Dirt", 32);
        w.write_u16_le(200);
        w.write_bytes(&[1, 2, 3]);
        w.write_string("", 32);
        w.write_u32_le(0);
    }

    #[test]
    fn test_read_terrain() {
        let mut body = BinaryWriter::new();
        write_terrain(&mut body, 7, "Water", TerrainFlags::WATER | TerrainFlags::ALWAYS_EXPLORED);
        assert_eq!(body.len(), TERRAIN_SIZE);
        let data = ChunkBuilder::catalog(FileKind::Terrain, 1).finish(body.as_slice());

        let mut reader = BinaryReader::new(&data);
        let mut sink = EventCollector::new();
        let header = KwdHeader::read(&mut reader, &mut sink).unwrap();
        let terrain = Terrain::read_all(&mut reader, &mut sink, &header).unwrap();

        assert_eq!(terrain.len(), 1);
        let water = &terrain[0];
        assert_eq!(water.id(), 7);
        assert_eq!(water.name, "Water");
        assert!(water.is_water());
        assert!(!water.is_lava());
        assert!(water.complete_resource.is_none());
        assert_eq!(water.depth, 1.0);
        assert_eq!(water.starting_health, 100);
        assert_eq!(water.terrain_light, Rgb { r: 10, g: 20, b: 30 });
        assert_eq!(water.sound_category, "Dirt");
        assert_eq!(water.max_health, 200);
        assert!(reader.is_empty());
        assert!(sink.is_empty());
    }
}
