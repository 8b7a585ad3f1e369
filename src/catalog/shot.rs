use crate::codec::{ArtResource, BinaryReader, FileKind, KwdHeader, Light};
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use super::CatalogEntry;

/// Projectile or area effect fired by traps, spells and creatures
#[derive(Debug, Clone, PartialEq)]
pub struct Shot {
    pub name: String,
    pub mesh_resource: Option<ArtResource>,
    pub light: Light,
    pub air_friction: f32,
    pub mass: f32,
    pub speed: f32,
    pub data1: u32,
    pub data2: u32,
    /// Raw process flag word
    pub shot_process_flags: u32,
    pub radius: f32,
    /// Raw flag word
    pub flags: u32,
    pub general_effect_id: u16,
    pub creation_effect_id: u16,
    pub death_effect_id: u16,
    pub timed_effect_id: u16,
    pub hit_solid_effect_id: u16,
    pub hit_lava_effect_id: u16,
    pub hit_water_effect_id: u16,
    pub hit_thing_effect_id: u16,
    pub health: u16,
    pub shot_id: u8,
    pub death_shot_id: u8,
    pub timed_delay: u8,
    pub hit_solid_shot_id: u8,
    pub hit_lava_shot_id: u8,
    pub hit_water_shot_id: u8,
    pub hit_thing_shot_id: u8,
    pub damage_type: u8,
    pub collide_type: u8,
    pub process_type: u8,
    pub attack_category: u8,
    pub sound_category: String,
    pub threat: u16,
    pub burn_duration: f32,
}

impl CatalogEntry for Shot {
    type Id = u8;
    const KIND: FileKind = FileKind::Shots;

    fn id(&self) -> u8 {
        self.shot_id
    }

    fn read(reader: &mut BinaryReader, sink: &mut dyn DiagnosticSink, _header: &KwdHeader) -> Result<Self> {
        Ok(Self {
            name: reader.read_string(32)?,
            mesh_resource: ArtResource::read(reader, sink)?,
            light: Light::read(reader)?,
            air_friction: reader.read_fixed_fine()?,
            mass: reader.read_fixed()?,
            speed: reader.read_fixed()?,
            data1: reader.read_u32()?,
            data2: reader.read_u32()?,
            shot_process_flags: reader.read_u32()?,
            radius: reader.read_fixed()?,
            flags: reader.read_u32()?,
            general_effect_id: reader.read_u16()?,
            creation_effect_id: reader.read_u16()?,
            death_effect_id: reader.read_u16()?,
            timed_effect_id: reader.read_u16()?,
            hit_solid_effect_id: reader.read_u16()?,
            hit_lava_effect_id: reader.read_u16()?,
            hit_water_effect_id: reader.read_u16()?,
            hit_thing_effect_id: reader.read_u16()?,
            health: reader.read_u16()?,
            shot_id: reader.read_u8()?,
            death_shot_id: reader.read_u8()?,
            timed_delay: reader.read_u8()?,
            hit_solid_shot_id: reader.read_u8()?,
            hit_lava_shot_id: reader.read_u8()?,
            hit_water_shot_id: reader.read_u8()?,
            hit_thing_shot_id: reader.read_u8()?,
            damage_type: reader.read_u8()?,
            collide_type: reader.read_u8()?,
            process_type: reader.read_u8()?,
            attack_category: reader.read_u8()?,
            sound_category: reader.read_string(32)?,
            threat: reader.read_u16()?,
            burn_duration: reader.read_fixed()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::testutil::{BinaryWriter, ChunkBuilder};
    use crate::diagnostics::EventCollector;

    const SHOT_SIZE: usize = 239;

    fn write_shot(w: &mut BinaryWriter, id: u8, name: &str) {
        w.write_string(name, 32);
        w.write_zeros(84);
        w.write_zeros(24);
        // 16.16 fixed point
        w.write_i32_le(32768);
        w.write_fixed(2.0);
        w.write_fixed(3.0);
        w.write_zeros(3 * 4);
        w.write_fixed(1.0);
        w.write_u32_le(0);
        w.write_zeros(8 * 2);
        w.write_u16_le(50);
        w.write_u8(id);
        w.write_zeros(6);
        w.write_u8(3);
        w.write_zeros(3);
        w.write_string("Fireball", 32);
        w.write_u16_le(4);
        w.write_fixed(2.5);
    }

    #[test]
    fn test_read_shot() {
        let mut body = BinaryWriter::new();
        write_shot(&mut body, 12, "Fireball");
        assert_eq!(body.len(), SHOT_SIZE);
        let data = ChunkBuilder::catalog(FileKind::Shots, 1).finish(body.as_slice());

        let mut reader = BinaryReader::new(&data);
        let mut sink = EventCollector::new();
        let header = KwdHeader::read(&mut reader, &mut sink).unwrap();
        let shots = Shot::read_all(&mut reader, &mut sink, &header).unwrap();

        let shot = &shots[0];
        assert_eq!(shot.id(), 12);
        assert!(shot.mesh_resource.is_none());
        assert_eq!(shot.air_friction, 0.5);
        assert_eq!(shot.speed, 3.0);
        assert_eq!(shot.radius, 1.0);
        assert_eq!(shot.health, 50);
        assert_eq!(shot.damage_type, 3);
        assert_eq!(shot.sound_category, "Fireball");
        assert_eq!(shot.threat, 4);
        assert_eq!(shot.burn_duration, 2.5);
        assert!(reader.is_empty());
        assert!(sink.is_empty());
    }
}
