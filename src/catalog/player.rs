use crate::codec::{BinaryReader, FileKind, KwdHeader};
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use super::CatalogEntry;

/// Computer player behaviour, present for every player even when not AI driven.
///
/// Policy fields (corridor style, door usage, disposal method, ...) keep the
/// raw byte value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AiAttributes {
    pub ai_type: u8,
    pub speed: u8,
    pub openness: u8,
    pub remove_call_to_arms_if_total_creatures_less_than: u8,
    pub build_lost_room_after_seconds: u8,
    pub unknown1: [u8; 3],
    pub create_empty_areas_when_idle: bool,
    pub build_bigger_lair_after_claiming_portal: bool,
    pub sell_captured_rooms_if_low_on_gold: bool,
    pub min_time_before_placing_researched_room: u8,
    pub default_size: u8,
    pub tiles_left_between_rooms: u8,
    pub distance_between_rooms_that_should_be_close: u8,
    pub corridor_style: u8,
    pub when_more_space_in_room_required: u8,
    pub dig_to_neutral_rooms_within_tiles_of_heart: u8,
    pub build_order: [u8; 15],
    pub flexibility: u8,
    pub dig_to_neutral_rooms_within_tiles_of_claimed_area: u8,
    pub remove_call_to_arms_after_seconds: u16,
    pub boulder_traps_on_long_corridors: bool,
    pub boulder_traps_on_route_to_breach_points: bool,
    pub trap_use_style: u8,
    pub door_trap_preference: u8,
    pub door_usage: u8,
    pub chance_of_looking_to_use_traps_and_doors: u8,
    pub require_min_level_for_creatures: bool,
    pub require_total_threat_greater_than_the_enemy: bool,
    pub require_all_room_types_placed: bool,
    pub require_all_keeper_spells_researched: bool,
    pub only_attack_attackers: bool,
    pub never_attack: bool,
    pub min_level_for_creatures: u8,
    pub total_threat_greater_than_the_enemy: u8,
    pub first_attempt_to_breach_room: u8,
    pub first_dig_to_enemy_point: u8,
    pub breach_at_points_simultaneously: u8,
    pub use_percentage_of_total_creatures_in_first_fight_after_breach: u8,
    pub mana_value: u16,
    pub place_call_to_arms_where_threat_value_is_greater_than: u16,
    pub remove_call_to_arms_if_less_than_enemy_creatures: u8,
    pub remove_call_to_arms_if_less_than_enemy_creatures_within_tiles: u8,
    pub pull_creatures_from_fight_if_outnumbered: bool,
    pub threat_value_of_dropped_creatures_is_percentage_of_enemy: u8,
    pub spell_style: u8,
    pub attempt_to_imprison_percentage_of_enemy_creatures: u8,
    pub if_creature_health_is_percentage_move_to_lair_or_temple: u8,
    pub gold_value: u16,
    pub try_to_make_unhappy_ones_happy: bool,
    pub try_to_make_angry_ones_happy: bool,
    pub dispose_of_angry_creatures: bool,
    pub dispose_of_rubbish_creatures_if_better_ones_come_along: bool,
    pub disposal_method: u8,
    pub maximum_number_of_imps: u8,
    pub will_not_slap_creatures: bool,
    pub attack_when_number_of_creatures_is_at_least: u8,
    pub use_lightning_if_enemy_is_in_water: bool,
    pub use_sight_of_evil: u8,
    pub use_spells_in_battle: u8,
    pub spells_power_preference: u8,
    pub use_call_to_arms: u8,
    pub unknown2: [u8; 2],
    pub mine_gold_until_gold_held_is_greater_than: u16,
    pub wait_seconds_after_previous_attack: u16,
    pub starting_mana: u32,
    pub explore_up_to_tiles_to_find_specials: u16,
    pub imps_to_tiles_ratio: u16,
    pub build_area_start_x: u16,
    pub build_area_start_y: u16,
    pub build_area_end_x: u16,
    pub build_area_end_y: u16,
    pub move_to_research: u8,
    pub chance_of_exploring_to_find_specials: u8,
    pub chance_of_finding_specials_when_exploring: u8,
    pub fate_of_imprisoned_creatures: u8,
}

impl AiAttributes {
    pub fn read(reader: &mut BinaryReader) -> Result<Self> {
        Ok(Self {
            ai_type: reader.read_u8()?,
            speed: reader.read_u8()?,
            openness: reader.read_u8()?,
            remove_call_to_arms_if_total_creatures_less_than: reader.read_u8()?,
            build_lost_room_after_seconds: reader.read_u8()?,
            unknown1: reader.read_array()?,
            create_empty_areas_when_idle: reader.read_bool32()?,
            build_bigger_lair_after_claiming_portal: reader.read_bool32()?,
            sell_captured_rooms_if_low_on_gold: reader.read_bool32()?,
            min_time_before_placing_researched_room: reader.read_u8()?,
            default_size: reader.read_u8()?,
            tiles_left_between_rooms: reader.read_u8()?,
            distance_between_rooms_that_should_be_close: reader.read_u8()?,
            corridor_style: reader.read_u8()?,
            when_more_space_in_room_required: reader.read_u8()?,
            dig_to_neutral_rooms_within_tiles_of_heart: reader.read_u8()?,
            build_order: reader.read_array()?,
            flexibility: reader.read_u8()?,
            dig_to_neutral_rooms_within_tiles_of_claimed_area: reader.read_u8()?,
            remove_call_to_arms_after_seconds: reader.read_u16()?,
            boulder_traps_on_long_corridors: reader.read_bool32()?,
            boulder_traps_on_route_to_breach_points: reader.read_bool32()?,
            trap_use_style: reader.read_u8()?,
            door_trap_preference: reader.read_u8()?,
            door_usage: reader.read_u8()?,
            chance_of_looking_to_use_traps_and_doors: reader.read_u8()?,
            require_min_level_for_creatures: reader.read_bool32()?,
            require_total_threat_greater_than_the_enemy: reader.read_bool32()?,
            require_all_room_types_placed: reader.read_bool32()?,
            require_all_keeper_spells_researched: reader.read_bool32()?,
            only_attack_attackers: reader.read_bool32()?,
            never_attack: reader.read_bool32()?,
            min_level_for_creatures: reader.read_u8()?,
            total_threat_greater_than_the_enemy: reader.read_u8()?,
            first_attempt_to_breach_room: reader.read_u8()?,
            first_dig_to_enemy_point: reader.read_u8()?,
            breach_at_points_simultaneously: reader.read_u8()?,
            use_percentage_of_total_creatures_in_first_fight_after_breach: reader.read_u8()?,
            mana_value: reader.read_u16()?,
            place_call_to_arms_where_threat_value_is_greater_than: reader.read_u16()?,
            remove_call_to_arms_if_less_than_enemy_creatures: reader.read_u8()?,
            remove_call_to_arms_if_less_than_enemy_creatures_within_tiles: reader.read_u8()?,
            pull_creatures_from_fight_if_outnumbered: reader.read_bool32()?,
            threat_value_of_dropped_creatures_is_percentage_of_enemy: reader.read_u8()?,
            spell_style: reader.read_u8()?,
            attempt_to_imprison_percentage_of_enemy_creatures: reader.read_u8()?,
            if_creature_health_is_percentage_move_to_lair_or_temple: reader.read_u8()?,
            gold_value: reader.read_u16()?,
            try_to_make_unhappy_ones_happy: reader.read_bool32()?,
            try_to_make_angry_ones_happy: reader.read_bool32()?,
            dispose_of_angry_creatures: reader.read_bool32()?,
            dispose_of_rubbish_creatures_if_better_ones_come_along: reader.read_bool32()?,
            disposal_method: reader.read_u8()?,
            maximum_number_of_imps: reader.read_u8()?,
            will_not_slap_creatures: reader.read_u8()? == 0,
            attack_when_number_of_creatures_is_at_least: reader.read_u8()?,
            use_lightning_if_enemy_is_in_water: reader.read_bool32()?,
            use_sight_of_evil: reader.read_u8()?,
            use_spells_in_battle: reader.read_u8()?,
            spells_power_preference: reader.read_u8()?,
            use_call_to_arms: reader.read_u8()?,
            unknown2: reader.read_array()?,
            mine_gold_until_gold_held_is_greater_than: reader.read_u16()?,
            wait_seconds_after_previous_attack: reader.read_u16()?,
            starting_mana: reader.read_u32()?,
            explore_up_to_tiles_to_find_specials: reader.read_u16()?,
            imps_to_tiles_ratio: reader.read_u16()?,
            build_area_start_x: reader.read_u16()?,
            build_area_start_y: reader.read_u16()?,
            build_area_end_x: reader.read_u16()?,
            build_area_end_y: reader.read_u16()?,
            move_to_research: reader.read_u8()?,
            chance_of_exploring_to_find_specials: reader.read_u8()?,
            chance_of_finding_specials_when_exploring: reader.read_u8()?,
            fate_of_imprisoned_creatures: reader.read_u8()?,
        })
    }
}

/// Keeper (or hero) taking part in the level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub starting_gold: i32,
    pub ai: bool,
    pub ai_attributes: AiAttributes,
    pub trigger_id: u16,
    pub player_id: u8,
    pub starting_camera_x: u16,
    pub starting_camera_y: u16,
    pub name: String,
}

impl CatalogEntry for Player {
    type Id = u8;
    const KIND: FileKind = FileKind::Players;

    fn id(&self) -> u8 {
        self.player_id
    }

    fn read(reader: &mut BinaryReader, _sink: &mut dyn DiagnosticSink, _header: &KwdHeader) -> Result<Self> {
        Ok(Self {
            starting_gold: reader.read_i32()?,
            ai: reader.read_bool32()?,
            ai_attributes: AiAttributes::read(reader)?,
            trigger_id: reader.read_u16()?,
            player_id: reader.read_u8()?,
            starting_camera_x: reader.read_u16()?,
            starting_camera_y: reader.read_u16()?,
            name: reader.read_string(32)?,
        })
    }
}
