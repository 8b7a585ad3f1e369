use crate::codec::{ArtResource, BinaryReader, FileKind, KwdHeader, Light, Rgb};
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use super::CatalogEntry;

/// Particle element spawned by effects
#[derive(Debug, Clone, PartialEq)]
pub struct EffectElement {
    pub name: String,
    pub art_resource: Option<ArtResource>,
    pub mass: f32,
    pub air_friction: f32,
    pub elasticity: f32,
    pub min_speed_xy: f32,
    pub max_speed_xy: f32,
    pub min_speed_yz: f32,
    pub max_speed_yz: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub scale_ratio: f32,
    /// Raw flag word
    pub flags: u32,
    pub effect_element_id: u16,
    pub min_hp: u16,
    pub max_hp: u16,
    pub death_element_id: u16,
    pub hit_solid_element_id: u16,
    pub hit_water_element_id: u16,
    pub hit_lava_element_id: u16,
    pub color: Rgb,
    pub random_color_index: u8,
    pub table_color_index: u8,
    pub fade_percentage: u8,
    pub next_effect_id: u16,
}

impl CatalogEntry for EffectElement {
    type Id = u16;
    const KIND: FileKind = FileKind::EffectElements;

    fn id(&self) -> u16 {
        self.effect_element_id
    }

    fn read(reader: &mut BinaryReader, sink: &mut dyn DiagnosticSink, _header: &KwdHeader) -> Result<Self> {
        Ok(Self {
            name: reader.read_string(32)?,
            art_resource: ArtResource::read(reader, sink)?,
            mass: reader.read_fixed()?,
            air_friction: reader.read_fixed_fine()?,
            elasticity: reader.read_fixed_fine()?,
            min_speed_xy: reader.read_fixed()?,
            max_speed_xy: reader.read_fixed()?,
            min_speed_yz: reader.read_fixed()?,
            max_speed_yz: reader.read_fixed()?,
            min_scale: reader.read_fixed()?,
            max_scale: reader.read_fixed()?,
            scale_ratio: reader.read_fixed()?,
            flags: reader.read_u32()?,
            effect_element_id: reader.read_u16()?,
            min_hp: reader.read_u16()?,
            max_hp: reader.read_u16()?,
            death_element_id: reader.read_u16()?,
            hit_solid_element_id: reader.read_u16()?,
            hit_water_element_id: reader.read_u16()?,
            hit_lava_element_id: reader.read_u16()?,
            color: reader.read_rgb()?,
            random_color_index: reader.read_u8()?,
            table_color_index: reader.read_u8()?,
            fade_percentage: reader.read_u8()?,
            next_effect_id: reader.read_u16()?,
        })
    }
}

/// Visual effect: emits elements and chains into other effects
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    pub name: String,
    pub art_resource: Option<ArtResource>,
    pub light: Light,
    pub mass: f32,
    pub air_friction: f32,
    pub elasticity: f32,
    pub radius: f32,
    pub min_speed_xy: f32,
    pub max_speed_xy: f32,
    pub min_speed_yz: f32,
    pub max_speed_yz: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Raw flag word
    pub flags: u32,
    pub effect_id: u16,
    pub min_hp: u16,
    pub max_hp: u16,
    pub fade_duration: u16,
    pub next_effect_id: u16,
    pub death_effect_id: u16,
    pub hit_solid_effect_id: u16,
    pub hit_water_effect_id: u16,
    pub hit_lava_effect_id: u16,
    /// Element or effect ids to spawn, zero slots dropped
    pub generate_ids: Vec<u16>,
    pub outer_origin_range: u16,
    pub lower_height_limit: u16,
    pub upper_height_limit: u16,
    pub orientation_range: u16,
    pub sprite_spin_rate_range: u16,
    pub whirlpool_rate: u16,
    pub directional_spread: u16,
    pub circular_path_rate: u16,
    pub inner_origin_range: u16,
    pub generate_randomness: u16,
    pub misc2: u16,
    pub misc3: u16,
    pub generation_type: u8,
    pub elements_per_turn: u8,
    pub unknown3: u16,
}

impl CatalogEntry for Effect {
    type Id = u16;
    const KIND: FileKind = FileKind::Effects;

    fn id(&self) -> u16 {
        self.effect_id
    }

    fn read(reader: &mut BinaryReader, sink: &mut dyn DiagnosticSink, _header: &KwdHeader) -> Result<Self> {
        let name = reader.read_string(32)?;
        let art_resource = ArtResource::read(reader, sink)?;
        let light = Light::read(reader)?;
        let mass = reader.read_fixed()?;
        let air_friction = reader.read_fixed_fine()?;
        let elasticity = reader.read_fixed_fine()?;
        let radius = reader.read_fixed()?;
        let min_speed_xy = reader.read_fixed()?;
        let max_speed_xy = reader.read_fixed()?;
        let min_speed_yz = reader.read_fixed()?;
        let max_speed_yz = reader.read_fixed()?;
        let min_scale = reader.read_fixed()?;
        let max_scale = reader.read_fixed()?;
        let flags = reader.read_u32()?;
        let [
            effect_id,
            min_hp,
            max_hp,
            fade_duration,
            next_effect_id,
            death_effect_id,
            hit_solid_effect_id,
            hit_water_effect_id,
            hit_lava_effect_id,
        ] = reader.read_u16_array::<9>()?;
        let generate_ids = reader
            .read_u16_array::<8>()?
            .into_iter()
            .filter(|&id| id > 0)
            .collect();

        Ok(Self {
            name,
            art_resource,
            light,
            mass,
            air_friction,
            elasticity,
            radius,
            min_speed_xy,
            max_speed_xy,
            min_speed_yz,
            max_speed_yz,
            min_scale,
            max_scale,
            flags,
            effect_id,
            min_hp,
            max_hp,
            fade_duration,
            next_effect_id,
            death_effect_id,
            hit_solid_effect_id,
            hit_water_effect_id,
            hit_lava_effect_id,
            generate_ids,
            outer_origin_range: reader.read_u16()?,
            lower_height_limit: reader.read_u16()?,
            upper_height_limit: reader.read_u16()?,
            orientation_range: reader.read_u16()?,
            sprite_spin_rate_range: reader.read_u16()?,
            whirlpool_rate: reader.read_u16()?,
            directional_spread: reader.read_u16()?,
            circular_path_rate: reader.read_u16()?,
            inner_origin_range: reader.read_u16()?,
            generate_randomness: reader.read_u16()?,
            misc2: reader.read_u16()?,
            misc3: reader.read_u16()?,
            generation_type: reader.read_u8()?,
            elements_per_turn: reader.read_u8()?,
            unknown3: reader.read_u16()?,
        })
    }
}
