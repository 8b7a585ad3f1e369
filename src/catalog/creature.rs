use bitflags::bitflags;
use indexmap::IndexMap;

use crate::codec::{ArtResource, BinaryReader, FileKind, KwdHeader, Light, Vector3f};
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use super::CatalogEntry;

/// Smallest per-item size of creature files that carry the extended tail
pub const EXTENDED_CREATURE_SIZE: usize = 5537;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CreatureFlags: u32 {
        const IS_WORKER = 0x0000_0001;
        const CAN_BE_PICKED_UP = 0x0000_0002;
        const CAN_BE_SLAPPED = 0x0000_0004;
        const ALWAYS_FLEE = 0x0000_0008;
        const CAN_WALK_ON_LAVA = 0x0000_0010;
        const CAN_WALK_ON_WATER = 0x0000_0020;
        const IS_EVIL = 0x0000_0040;
        const IS_IMMUNE_TO_TURNCOAT = 0x0000_0080;
        const AVAILABLE_VIA_PORTAL = 0x0000_0100;
        const CAN_FLY = 0x0000_0200;
        const IS_HORNY = 0x0000_0400;
        const GENERATE_DEAD_BODY = 0x0000_0800;
        const CAN_BE_HYPNOTIZED = 0x0000_1000;
        const IS_IMMUNE_TO_CHICKEN = 0x0000_2000;
        const IS_FEARLESS = 0x0000_4000;
        const CAN_BE_ELECTROCUTED = 0x0000_8000;
        const NEED_BODY_FOR_FIGHT_IDLE = 0x0001_0000;
        const NOT_TRUNCATED_SWIPE = 0x0002_0000;
        const IS_STEALTHY = 0x0004_0000;
        const IS_IMMUNE_TO_POISON = 0x0008_0000;
        const IS_IMMUNE_TO_FREEZE = 0x0010_0000;
        const IS_IMMUNE_TO_TORTURE = 0x0020_0000;
        const CAN_BE_IMPRISONED = 0x0040_0000;
        const IS_CONVERTIBLE = 0x0080_0000;
        const IS_UNIQUE = 0x0100_0000;
        const HAS_MANA = 0x0200_0000;
    }
}

/// Animation slots of a creature, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationType {
    Walk,
    Run,
    Dragged,
    RecoilForwards,
    MeleeAttack,
    CastSpell,
    Die,
    Happy,
    Angry,
    Stunned,
    InHand,
    Sleeping,
    Eating,
    Researching,
    Null2,
    Null1,
    TorturedWheel,
    Null3,
    Drinking,
    Idle1,
    RecoilBackwards,
    Manufacturing,
    Praying,
    Fallback,
    TorturedChair,
    TorturedChairSkeleton,
    GetUp,
    Dance,
    Drunk,
    Entrance,
    Idle2,
    Special1,
    Special2,
    DrunkedWalk,
    Roar,
    Null4,
    DrunkedIdle,
    Swipe,
    Idle3,
    Idle4,
    Idle3_1,
    Idle4_1,
    Dig,
    BackOff,
    StandStill,
    StealthWalk,
    DeathPose,
}

impl AnimationType {
    /// The contiguous block of animations at the start of the record
    const LEADING: [Self; 36] = [
        Self::Walk,
        Self::Run,
        Self::Dragged,
        Self::RecoilForwards,
        Self::MeleeAttack,
        Self::CastSpell,
        Self::Die,
        Self::Happy,
        Self::Angry,
        Self::Stunned,
        Self::InHand,
        Self::Sleeping,
        Self::Eating,
        Self::Researching,
        Self::Null2,
        Self::Null1,
        Self::TorturedWheel,
        Self::Null3,
        Self::Drinking,
        Self::Idle1,
        Self::RecoilBackwards,
        Self::Manufacturing,
        Self::Praying,
        Self::Fallback,
        Self::TorturedChair,
        Self::TorturedChairSkeleton,
        Self::GetUp,
        Self::Dance,
        Self::Drunk,
        Self::Entrance,
        Self::Idle2,
        Self::Special1,
        Self::Special2,
        Self::DrunkedWalk,
        Self::Roar,
        Self::Null4,
    ];
}

/// Animation anchor offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OffsetType {
    PortalEntrance,
    FallBackGetUp,
    Praying,
    Corpse,
    Offset5,
    Offset6,
    Offset7,
    Offset8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Attraction {
    pub present: u32,
    pub room_id: u16,
    pub room_size: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CreatureSpellSlot {
    pub shot_offset: Vector3f,
    pub x0c: u8,
    pub play_animation: bool,
    pub x0e: u8,
    pub x0f: u8,
    pub shot_delay: f32,
    pub x14: u8,
    pub x15: u8,
    pub creature_spell_id: u8,
    pub level_available: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resistance {
    pub attack_type: u8,
    pub value: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JobPreference {
    pub job_type: u32,
    pub mood_change: u16,
    pub mana_change: u16,
    pub chance: u8,
    pub x09: u8,
    pub x0a: u8,
    pub x0b: u8,
}

impl JobPreference {
    fn read(reader: &mut BinaryReader) -> Result<Self> {
        Ok(Self {
            job_type: reader.read_u32()?,
            mood_change: reader.read_u16()?,
            mana_change: reader.read_u16()?,
            chance: reader.read_u8()?,
            x09: reader.read_u8()?,
            x0a: reader.read_u8()?,
            x0b: reader.read_u8()?,
        })
    }

    fn read_n<const N: usize>(reader: &mut BinaryReader) -> Result<[Self; N]> {
        let mut out = [Self::default(); N];
        for pref in out.iter_mut() {
            *pref = Self::read(reader)?;
        }
        Ok(out)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JobAlternative {
    pub job_type: u32,
    pub mood_change: u16,
    pub mana_change: u16,
}

/// Gameplay tuning of a creature
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreatureAttributes {
    pub perception_range: f32,
    pub shuffle_speed: f32,
    pub height: f32,
    pub eye_height: f32,
    pub speed: f32,
    pub run_speed: f32,
    pub hunger_rate: f32,
    pub time_awake: u32,
    pub time_sleep: u32,
    pub distance_can_see: f32,
    pub distance_can_hear: f32,
    pub stun_duration: f32,
    pub guard_duration: f32,
    pub idle_duration: f32,
    pub slap_fearless_duration: f32,
    pub possession_mana_cost: i16,
    pub own_land_health_increase: i16,
    pub torture_time_to_convert: f32,
    pub exp_for_next_level: u16,
    pub exp_per_second: u16,
    pub exp_per_second_training: u16,
    pub research_per_second: u16,
    pub manufacture_per_second: u16,
    pub hp: u16,
    pub hp_from_chicken: u16,
    pub fear: u16,
    pub threat: u16,
    pub slap_damage: u16,
    pub mana_gen_prayer: u16,
    pub pay: u16,
    pub max_gold_held: u16,
    pub decompose_value: u16,
    pub anger_no_lair: i16,
    pub anger_no_food: i16,
    pub anger_no_pay: i16,
    pub anger_no_work: i16,
    pub anger_slap: i16,
    pub anger_in_hand: i16,
    pub initial_gold_held: i16,
    pub hunger_fill: u8,
    pub unhappy_threshold: u8,
    pub torture_hp_change: i16,
    pub torture_mood_change: i16,
}

/// Trailing fields of the larger creature file revision
#[derive(Debug, Clone, PartialEq)]
pub struct CreatureExtension {
    pub unknown_extra_bytes: [u8; 80],
    /// Raw second flag word
    pub flags2: u32,
    pub unknown: u16,
    pub unknown_1: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Creature {
    pub name: String,
    pub unknown1_resource: [u8; 84],
    pub animations: IndexMap<AnimationType, ArtResource>,
    pub animation_offsets: IndexMap<OffsetType, Vector3f>,
    pub icon1_resource: Option<ArtResource>,
    pub icon2_resource: Option<ArtResource>,
    pub unkcec: u16,
    pub unkcee: u32,
    pub unkcf2: u32,
    pub order_in_editor: u8,
    pub anger_string_id_general: u16,
    pub shot_delay: f32,
    pub olhi_effect_id: u16,
    pub introduction_string_id: u16,
    pub anger_string_id_lair: u16,
    pub anger_string_id_food: u16,
    pub anger_string_id_pay: u16,
    pub anger_string_id_work: u16,
    pub anger_string_id_slap: u16,
    pub anger_string_id_held: u16,
    pub anger_string_id_lonely: u16,
    pub anger_string_id_hatred: u16,
    pub anger_string_id_torture: u16,
    pub translation_sound_category: String,
    pub clone_creature_id: u8,
    pub first_person_gamma_effect: u8,
    pub first_person_walk_cycle_scale: u8,
    pub intro_camera_path_index: u8,
    pub unk2e2: u8,
    pub portrait_resource: Option<ArtResource>,
    pub light: Light,
    pub attractions: [Attraction; 2],
    pub first_person_waddle_scale: f32,
    pub first_person_oscillate_scale: f32,
    /// Only slots with a spell assigned
    pub spells: Vec<CreatureSpellSlot>,
    pub resistances: [Resistance; 4],
    pub happy_jobs: [JobPreference; 3],
    pub unhappy_jobs: [JobPreference; 2],
    pub angry_jobs: [JobPreference; 3],
    pub hate_jobs: [u32; 2],
    pub alternative_jobs: [JobAlternative; 3],
    pub unkea0: i32,
    pub unkea8: f32,
    pub unk3ab: u32,
    pub unkee0: i32,
    pub unkee4: i32,
    pub melee_range: f32,
    pub unkef0: u32,
    pub melee_recharge: f32,
    pub flags: CreatureFlags,
    pub job_class: u8,
    pub fight_style: u8,
    pub melee_damage: u16,
    pub unk3cb: u16,
    pub unk3cc: f32,
    pub name_string_id: u16,
    pub tooltip_string_id: u16,
    pub entrance_effect_id: u16,
    pub general_description_string_id: u16,
    pub strength_string_id: u16,
    pub weakness_string_id: u16,
    pub slap_effect_id: u16,
    pub death_effect_id: u16,
    pub melee1_swipe: u8,
    pub melee2_swipe: u8,
    pub melee3_swipe: u8,
    pub spell_swipe: u8,
    pub first_person_special_ability1: u8,
    pub first_person_special_ability2: u8,
    pub unkf48: [u8; 3],
    pub creature_id: u8,
    pub unk3ea: [u8; 2],
    pub melee_attack_type: u8,
    pub unk3eb2: u8,
    pub lair_object_id: u8,
    pub unk3f1: u8,
    pub death_fall_direction: u8,
    pub unk3f2: u8,
    pub sound_category: String,
    pub material: u8,
    pub first_person_filter_resource: Option<ArtResource>,
    pub unkfcb: u16,
    pub unk4: f32,
    pub special1_swipe: u8,
    pub special2_swipe: u8,
    pub first_person_melee_resource: Option<ArtResource>,
    pub unk6: u32,
    pub x1323: [(u16, u16); 48],
    pub unique_name_text_id: u16,
    pub x14e1: [u32; 2],
    pub first_person_special_ability1_count: u32,
    pub first_person_special_ability2_count: u32,
    pub unique_resource: Option<ArtResource>,
    /// Raw third flag word
    pub flags3: u32,
    pub attributes: CreatureAttributes,
    pub extension: Option<CreatureExtension>,
}

impl Creature {
    pub fn is_worker(&self) -> bool {
        self.flags.contains(CreatureFlags::IS_WORKER)
    }

    pub fn is_evil(&self) -> bool {
        self.flags.contains(CreatureFlags::IS_EVIL)
    }

    pub fn animation(&self, kind: AnimationType) -> Option<&ArtResource> {
        self.animations.get(&kind)
    }
}

fn read_animation(
    reader: &mut BinaryReader,
    sink: &mut dyn DiagnosticSink,
    animations: &mut IndexMap<AnimationType, ArtResource>,
    kind: AnimationType,
) -> Result<()> {
    if let Some(art) = ArtResource::read(reader, sink)? {
        animations.insert(kind, art);
    }
    Ok(())
}

impl CatalogEntry for Creature {
    type Id = u8;
    const KIND: FileKind = FileKind::Creatures;

    fn id(&self) -> u8 {
        self.creature_id
    }

    fn read(reader: &mut BinaryReader, sink: &mut dyn DiagnosticSink, header: &KwdHeader) -> Result<Self> {
        let mut animations = IndexMap::new();
        let mut animation_offsets = IndexMap::new();
        let mut attributes = CreatureAttributes::default();

        let name = reader.read_string(32)?;
        let unknown1_resource = reader.read_array()?;
        for kind in AnimationType::LEADING {
            read_animation(reader, sink, &mut animations, kind)?;
        }
        let icon1_resource = ArtResource::read(reader, sink)?;
        let icon2_resource = ArtResource::read(reader, sink)?;
        let unkcec = reader.read_u16()?;
        let unkcee = reader.read_u32()?;
        let unkcf2 = reader.read_u32()?;
        let order_in_editor = reader.read_u8()?;
        let anger_string_id_general = reader.read_u16()?;
        let shot_delay = reader.read_fixed()?;
        let olhi_effect_id = reader.read_u16()?;
        let introduction_string_id = reader.read_u16()?;
        attributes.perception_range = reader.read_fixed()?;
        let [anger_string_id_lair, anger_string_id_food, anger_string_id_pay, anger_string_id_work, anger_string_id_slap, anger_string_id_held, anger_string_id_lonely, anger_string_id_hatred, anger_string_id_torture] =
            reader.read_u16_array::<9>()?;

        let translation_sound_category = reader.read_string(32)?;
        attributes.shuffle_speed = reader.read_fixed()?;
        let clone_creature_id = reader.read_u8()?;
        let first_person_gamma_effect = reader.read_u8()?;
        let first_person_walk_cycle_scale = reader.read_u8()?;
        let intro_camera_path_index = reader.read_u8()?;
        let unk2e2 = reader.read_u8()?;
        let portrait_resource = ArtResource::read(reader, sink)?;
        let light = Light::read(reader)?;

        let mut attractions = [Attraction::default(); 2];
        for attraction in attractions.iter_mut() {
            *attraction = Attraction {
                present: reader.read_u32()?,
                room_id: reader.read_u16()?,
                room_size: reader.read_u16()?,
            };
        }
        let first_person_waddle_scale = reader.read_fixed()?;
        let first_person_oscillate_scale = reader.read_fixed()?;

        let mut spells = Vec::with_capacity(3);
        for _ in 0..3 {
            let spell = CreatureSpellSlot {
                shot_offset: reader.read_vector3f()?,
                x0c: reader.read_u8()?,
                play_animation: reader.read_u8()? == 1,
                x0e: reader.read_u8()?,
                x0f: reader.read_u8()?,
                shot_delay: reader.read_fixed()?,
                x14: reader.read_u8()?,
                x15: reader.read_u8()?,
                creature_spell_id: reader.read_u8()?,
                level_available: reader.read_u8()?,
            };
            if spell.creature_spell_id != 0 {
                spells.push(spell);
            }
        }

        let mut resistances = [Resistance::default(); 4];
        for resistance in resistances.iter_mut() {
            *resistance = Resistance { attack_type: reader.read_u8()?, value: reader.read_u8()? };
        }
        let happy_jobs = JobPreference::read_n::<3>(reader)?;
        let unhappy_jobs = JobPreference::read_n::<2>(reader)?;
        let angry_jobs = JobPreference::read_n::<3>(reader)?;
        let hate_jobs = [reader.read_u32()?, reader.read_u32()?];
        let mut alternative_jobs = [JobAlternative::default(); 3];
        for alternative in alternative_jobs.iter_mut() {
            *alternative = JobAlternative {
                job_type: reader.read_u32()?,
                mood_change: reader.read_u16()?,
                mana_change: reader.read_u16()?,
            };
        }
        animation_offsets.insert(OffsetType::PortalEntrance, reader.read_vector3f()?);
        let unkea0 = reader.read_i32()?;
        attributes.height = reader.read_fixed()?;
        let unkea8 = reader.read_fixed()?;
        let unk3ab = reader.read_u32()?;
        attributes.eye_height = reader.read_fixed()?;
        attributes.speed = reader.read_fixed()?;
        attributes.run_speed = reader.read_fixed()?;
        attributes.hunger_rate = reader.read_fixed()?;
        attributes.time_awake = reader.read_u32()?;
        attributes.time_sleep = reader.read_u32()?;
        attributes.distance_can_see = reader.read_fixed()?;
        attributes.distance_can_hear = reader.read_fixed()?;
        attributes.stun_duration = reader.read_fixed()?;
        attributes.guard_duration = reader.read_fixed()?;
        attributes.idle_duration = reader.read_fixed()?;
        attributes.slap_fearless_duration = reader.read_fixed()?;
        let unkee0 = reader.read_i32()?;
        let unkee4 = reader.read_i32()?;
        attributes.possession_mana_cost = reader.read_i16()?;
        attributes.own_land_health_increase = reader.read_i16()?;
        let melee_range = reader.read_fixed()?;
        let unkef0 = reader.read_u32()?;
        attributes.torture_time_to_convert = reader.read_fixed()?;
        let melee_recharge = reader.read_fixed()?;
        let flags = CreatureFlags::from_bits_truncate(reader.read_u32()?);
        attributes.exp_for_next_level = reader.read_u16()?;
        let job_class = reader.read_u8()?;
        let fight_style = reader.read_u8()?;
        attributes.exp_per_second = reader.read_u16()?;
        attributes.exp_per_second_training = reader.read_u16()?;
        attributes.research_per_second = reader.read_u16()?;
        attributes.manufacture_per_second = reader.read_u16()?;
        attributes.hp = reader.read_u16()?;
        attributes.hp_from_chicken = reader.read_u16()?;
        attributes.fear = reader.read_u16()?;
        attributes.threat = reader.read_u16()?;
        let melee_damage = reader.read_u16()?;
        attributes.slap_damage = reader.read_u16()?;
        attributes.mana_gen_prayer = reader.read_u16()?;
        let unk3cb = reader.read_u16()?;
        attributes.pay = reader.read_u16()?;
        attributes.max_gold_held = reader.read_u16()?;
        let unk3cc = reader.read_short_fixed()?;
        attributes.decompose_value = reader.read_u16()?;
        let name_string_id = reader.read_u16()?;
        let tooltip_string_id = reader.read_u16()?;
        attributes.anger_no_lair = reader.read_i16()?;
        attributes.anger_no_food = reader.read_i16()?;
        attributes.anger_no_pay = reader.read_i16()?;
        attributes.anger_no_work = reader.read_i16()?;
        attributes.anger_slap = reader.read_i16()?;
        attributes.anger_in_hand = reader.read_i16()?;
        attributes.initial_gold_held = reader.read_i16()?;
        let entrance_effect_id = reader.read_u16()?;
        let general_description_string_id = reader.read_u16()?;
        let strength_string_id = reader.read_u16()?;
        let weakness_string_id = reader.read_u16()?;
        let slap_effect_id = reader.read_u16()?;
        let death_effect_id = reader.read_u16()?;
        let melee1_swipe = reader.read_u8()?;
        let melee2_swipe = reader.read_u8()?;
        let melee3_swipe = reader.read_u8()?;
        let spell_swipe = reader.read_u8()?;
        let first_person_special_ability1 = reader.read_u8()?;
        let first_person_special_ability2 = reader.read_u8()?;
        let unkf48 = reader.read_array()?;
        let creature_id = reader.read_u8()?;
        let unk3ea = reader.read_array()?;
        attributes.hunger_fill = reader.read_u8()?;
        attributes.unhappy_threshold = reader.read_u8()?;
        let melee_attack_type = reader.read_u8()?;
        let unk3eb2 = reader.read_u8()?;
        let lair_object_id = reader.read_u8()?;
        let unk3f1 = reader.read_u8()?;
        let death_fall_direction = reader.read_u8()?;
        let unk3f2 = reader.read_u8()?;

        let sound_category = reader.read_string(32)?;
        let material = reader.read_u8()?;
        let first_person_filter_resource = ArtResource::read(reader, sink)?;
        let unkfcb = reader.read_u16()?;
        let unk4 = reader.read_fixed()?;
        read_animation(reader, sink, &mut animations, AnimationType::DrunkedIdle)?;
        let special1_swipe = reader.read_u8()?;
        let special2_swipe = reader.read_u8()?;
        let first_person_melee_resource = ArtResource::read(reader, sink)?;
        let unk6 = reader.read_u32()?;
        attributes.torture_hp_change = reader.read_i16()?;
        attributes.torture_mood_change = reader.read_i16()?;
        for kind in [
            AnimationType::Swipe,
            AnimationType::Idle3,
            AnimationType::Idle4,
            AnimationType::Idle3_1,
            AnimationType::Idle4_1,
            AnimationType::Dig,
        ] {
            read_animation(reader, sink, &mut animations, kind)?;
        }
        for kind in [
            OffsetType::FallBackGetUp,
            OffsetType::Praying,
            OffsetType::Corpse,
            OffsetType::Offset5,
            OffsetType::Offset6,
            OffsetType::Offset7,
            OffsetType::Offset8,
        ] {
            animation_offsets.insert(kind, reader.read_vector3f()?);
        }
        read_animation(reader, sink, &mut animations, AnimationType::BackOff)?;
        let mut x1323 = [(0u16, 0u16); 48];
        for pair in x1323.iter_mut() {
            *pair = (reader.read_u16()?, reader.read_u16()?);
        }
        for kind in [AnimationType::StandStill, AnimationType::StealthWalk, AnimationType::DeathPose] {
            read_animation(reader, sink, &mut animations, kind)?;
        }
        let unique_name_text_id = reader.read_u16()?;
        let x14e1 = [reader.read_u32()?, reader.read_u32()?];
        let first_person_special_ability1_count = reader.read_u32()?;
        let first_person_special_ability2_count = reader.read_u32()?;
        let unique_resource = ArtResource::read(reader, sink)?;
        let flags3 = reader.read_u32()?;

        // Older files stop here
        let extension = if header.item_size() >= EXTENDED_CREATURE_SIZE {
            Some(CreatureExtension {
                unknown_extra_bytes: reader.read_array()?,
                flags2: reader.read_u32()?,
                unknown: reader.read_u16()?,
                unknown_1: reader.read_short_fixed()?,
            })
        } else {
            None
        };

        Ok(Self {
            name,
            unknown1_resource,
            animations,
            animation_offsets,
            icon1_resource,
            icon2_resource,
            unkcec,
            unkcee,
            unkcf2,
            order_in_editor,
            anger_string_id_general,
            shot_delay,
            olhi_effect_id,
            introduction_string_id,
            anger_string_id_lair,
            anger_string_id_food,
            anger_string_id_pay,
            anger_string_id_work,
            anger_string_id_slap,
            anger_string_id_held,
            anger_string_id_lonely,
            anger_string_id_hatred,
            anger_string_id_torture,
            translation_sound_category,
            clone_creature_id,
            first_person_gamma_effect,
            first_person_walk_cycle_scale,
            intro_camera_path_index,
            unk2e2,
            portrait_resource,
            light,
            attractions,
            first_person_waddle_scale,
            first_person_oscillate_scale,
            spells,
            resistances,
            happy_jobs,
            unhappy_jobs,
            angry_jobs,
            hate_jobs,
            alternative_jobs,
            unkea0,
            unkea8,
            unk3ab,
            unkee0,
            unkee4,
            melee_range,
            unkef0,
            melee_recharge,
            flags,
            job_class,
            fight_style,
            melee_damage,
            unk3cb,
            unk3cc,
            name_string_id,
            tooltip_string_id,
            entrance_effect_id,
            general_description_string_id,
            strength_string_id,
            weakness_string_id,
            slap_effect_id,
            death_effect_id,
            melee1_swipe,
            melee2_swipe,
            melee3_swipe,
            spell_swipe,
            first_person_special_ability1,
            first_person_special_ability2,
            unkf48,
            creature_id,
            unk3ea,
            melee_attack_type,
            unk3eb2,
            lair_object_id,
            unk3f1,
            death_fall_direction,
            unk3f2,
            sound_category,
            material,
            first_person_filter_resource,
            unkfcb,
            unk4,
            special1_swipe,
            special2_swipe,
            first_person_melee_resource,
            unk6,
            x1323,
            unique_name_text_id,
            x14e1,
            first_person_special_ability1_count,
            first_person_special_ability2_count,
            unique_resource,
            flags3,
            attributes,
            extension,
        })
    }
}
