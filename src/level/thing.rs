//! Placed level instances ("things").
//!
//! Every record is prefixed with `(tag, length)`. Tags 194 to 205 select one
//! of twelve fixed layouts; anything else is skipped by its declared length.

use bitflags::bitflags;

use crate::codec::{realign, BinaryReader, KwdHeader, Vector3f};
use crate::diagnostics::{report, Diagnostic, DiagnosticSink, TagContext};
use crate::error::Result;

/// Hero parties always store this many member slots
pub const HERO_PARTY_SLOTS: usize = 16;

bitflags! {
    /// Placement flags of creature things
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ThingCreatureFlags: u8 {
        const WILL_FIGHT = 0x01;
        const LEADER = 0x02;
        const FOLLOWER = 0x04;
        const WILL_BE_ATTACKED = 0x08;
        const RETURN_TO_HERO_LAIR = 0x10;
        const FREE_FRIENDS_ON_JAIL_BREAK = 0x20;
        const ACT_AS_DROPPED = 0x40;
        const START_AS_DYING = 0x80;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectThing {
    pub pos_x: i32,
    pub pos_y: i32,
    pub unknown1: [u8; 4],
    pub keeper_spell_id: i32,
    pub money_amount: i32,
    pub trigger_id: u16,
    pub object_id: u8,
    pub player_id: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrapThing {
    pub pos_x: i32,
    pub pos_y: i32,
    pub unknown1: i32,
    pub number_of_shots: u8,
    pub trap_id: u8,
    pub player_id: u8,
    pub unknown2: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoorThing {
    pub pos_x: i32,
    pub pos_y: i32,
    pub unknown1: i32,
    pub trigger_id: u16,
    pub door_id: u8,
    pub player_id: u8,
    /// Raw door state (locked, blueprint)
    pub flag: u8,
    pub unknown2: [u8; 3],
}

/// Named rectangle used by triggers and hero paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionPoint {
    pub start_x: i32,
    pub start_y: i32,
    pub end_x: i32,
    pub end_y: i32,
    pub wait_delay: u16,
    /// Raw action point flag word
    pub flags: u16,
    pub trigger_id: u16,
    pub id: u8,
    pub next_waypoint_id: u8,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeutralCreature {
    pub pos_x: i32,
    pub pos_y: i32,
    pub pos_z: i32,
    pub gold_held: u16,
    pub level: u8,
    pub flags: ThingCreatureFlags,
    pub initial_health: i32,
    pub trigger_id: u16,
    pub creature_id: u8,
    pub unknown1: u8,
}

/// Hero creature, placed alone or as a hero party member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoodCreature {
    pub pos_x: i32,
    pub pos_y: i32,
    pub pos_z: i32,
    pub gold_held: u16,
    pub level: u8,
    pub flags: ThingCreatureFlags,
    pub objective_target_action_point_id: i32,
    pub initial_health: i32,
    pub trigger_id: u16,
    pub objective_target_player_id: u8,
    /// Raw hero objective
    pub objective: u8,
    pub creature_id: u8,
    pub unknown1: [u8; 2],
    /// Raw second flag byte
    pub flags2: u8,
}

impl GoodCreature {
    fn read(reader: &mut BinaryReader) -> Result<Self> {
        Ok(Self {
            pos_x: reader.read_i32()?,
            pos_y: reader.read_i32()?,
            pos_z: reader.read_i32()?,
            gold_held: reader.read_u16()?,
            level: reader.read_u8()?,
            flags: ThingCreatureFlags::from_bits_truncate(reader.read_u8()?),
            objective_target_action_point_id: reader.read_i32()?,
            initial_health: reader.read_i32()?,
            trigger_id: reader.read_u16()?,
            objective_target_player_id: reader.read_u8()?,
            objective: reader.read_u8()?,
            creature_id: reader.read_u8()?,
            unknown1: reader.read_array()?,
            flags2: reader.read_u8()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeeperCreature {
    pub pos_x: i32,
    pub pos_y: i32,
    pub pos_z: i32,
    pub gold_held: u16,
    pub level: u8,
    pub flags: ThingCreatureFlags,
    pub initial_health: i32,
    pub objective_target_action_point_id: i32,
    pub trigger_id: u16,
    pub creature_id: u8,
    pub player_id: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroParty {
    pub name: String,
    pub trigger_id: u16,
    pub id: u8,
    pub x23: i32,
    pub x27: i32,
    /// Occupied slots only
    pub members: Vec<GoodCreature>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadBody {
    pub pos_x: i32,
    pub pos_y: i32,
    pub pos_z: i32,
    pub gold_held: u16,
    pub creature_id: u8,
    pub player_id: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectGenerator {
    pub pos_x: i32,
    pub pos_y: i32,
    pub x08: i32,
    pub x0c: i32,
    pub x10: u16,
    pub x12: u16,
    /// Non-zero effect ids
    pub effect_ids: Vec<u16>,
    pub frequency: u8,
    pub id: u8,
    pub pad: [u8; 6],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomThing {
    pub pos_x: i32,
    pub pos_y: i32,
    pub x08: i32,
    pub x0c: u16,
    /// Raw facing
    pub direction: u8,
    pub x0f: u8,
    pub initial_health: u16,
    /// Raw hero room type
    pub room_type: u8,
    pub player_id: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vector3f,
    pub position_min_clip_extent: Vector3f,
    pub position_max_clip_extent: Vector3f,
    pub view_distance_value: f32,
    pub view_distance_min: f32,
    pub view_distance_max: f32,
    pub zoom_value: f32,
    pub zoom_value_min: f32,
    pub zoom_value_max: f32,
    pub lens_value: f32,
    pub lens_value_min: f32,
    pub lens_value_max: f32,
    /// Raw camera flag word
    pub flags: i32,
    pub angle_yaw: u16,
    pub angle_roll: u16,
    pub angle_pitch: u16,
    pub id: u16,
}

/// A placed level instance
#[derive(Debug, Clone, PartialEq)]
pub enum Thing {
    Object(ObjectThing),
    Trap(TrapThing),
    Door(DoorThing),
    ActionPoint(ActionPoint),
    NeutralCreature(NeutralCreature),
    GoodCreature(GoodCreature),
    KeeperCreature(KeeperCreature),
    HeroParty(HeroParty),
    DeadBody(DeadBody),
    EffectGenerator(EffectGenerator),
    Room(RoomThing),
    Camera(Camera),
}

impl Thing {
    /// Reads the payload for `tag`. Unknown tags read nothing and give `None`.
    pub fn read(reader: &mut BinaryReader, tag: u32) -> Result<Option<Self>> {
        let thing = match tag {
            194 => Self::Object(ObjectThing {
                pos_x: reader.read_i32()?,
                pos_y: reader.read_i32()?,
                unknown1: reader.read_array()?,
                keeper_spell_id: reader.read_i32()?,
                money_amount: reader.read_i32()?,
                trigger_id: reader.read_u16()?,
                object_id: reader.read_u8()?,
                player_id: reader.read_u8()?,
            }),
            195 => Self::Trap(TrapThing {
                pos_x: reader.read_i32()?,
                pos_y: reader.read_i32()?,
                unknown1: reader.read_i32()?,
                number_of_shots: reader.read_u8()?,
                trap_id: reader.read_u8()?,
                player_id: reader.read_u8()?,
                unknown2: reader.read_u8()?,
            }),
            196 => Self::Door(DoorThing {
                pos_x: reader.read_i32()?,
                pos_y: reader.read_i32()?,
                unknown1: reader.read_i32()?,
                trigger_id: reader.read_u16()?,
                door_id: reader.read_u8()?,
                player_id: reader.read_u8()?,
                flag: reader.read_u8()?,
                unknown2: reader.read_array()?,
            }),
            197 => Self::ActionPoint(ActionPoint {
                start_x: reader.read_i32()?,
                start_y: reader.read_i32()?,
                end_x: reader.read_i32()?,
                end_y: reader.read_i32()?,
                wait_delay: reader.read_u16()?,
                flags: reader.read_u16()?,
                trigger_id: reader.read_u16()?,
                id: reader.read_u8()?,
                next_waypoint_id: reader.read_u8()?,
                name: reader.read_string(32)?,
            }),
            198 => Self::NeutralCreature(NeutralCreature {
                pos_x: reader.read_i32()?,
                pos_y: reader.read_i32()?,
                pos_z: reader.read_i32()?,
                gold_held: reader.read_u16()?,
                level: reader.read_u8()?,
                flags: ThingCreatureFlags::from_bits_truncate(reader.read_u8()?),
                initial_health: reader.read_i32()?,
                trigger_id: reader.read_u16()?,
                creature_id: reader.read_u8()?,
                unknown1: reader.read_u8()?,
            }),
            199 => Self::GoodCreature(GoodCreature::read(reader)?),
            200 => Self::KeeperCreature(KeeperCreature {
                pos_x: reader.read_i32()?,
                pos_y: reader.read_i32()?,
                pos_z: reader.read_i32()?,
                gold_held: reader.read_u16()?,
                level: reader.read_u8()?,
                flags: ThingCreatureFlags::from_bits_truncate(reader.read_u8()?),
                initial_health: reader.read_i32()?,
                objective_target_action_point_id: reader.read_i32()?,
                trigger_id: reader.read_u16()?,
                creature_id: reader.read_u8()?,
                player_id: reader.read_u8()?,
            }),
            201 => {
                let name = reader.read_string(32)?;
                let trigger_id = reader.read_u16()?;
                let id = reader.read_u8()?;
                let x23 = reader.read_i32()?;
                let x27 = reader.read_i32()?;
                let mut members = Vec::with_capacity(HERO_PARTY_SLOTS);
                for _ in 0..HERO_PARTY_SLOTS {
                    let member = GoodCreature::read(reader)?;
                    // Creature id 0 marks an empty slot
                    if member.creature_id > 0 {
                        members.push(member);
                    }
                }
                Self::HeroParty(HeroParty { name, trigger_id, id, x23, x27, members })
            }
            202 => Self::DeadBody(DeadBody {
                pos_x: reader.read_i32()?,
                pos_y: reader.read_i32()?,
                pos_z: reader.read_i32()?,
                gold_held: reader.read_u16()?,
                creature_id: reader.read_u8()?,
                player_id: reader.read_u8()?,
            }),
            203 => Self::EffectGenerator(EffectGenerator {
                pos_x: reader.read_i32()?,
                pos_y: reader.read_i32()?,
                x08: reader.read_i32()?,
                x0c: reader.read_i32()?,
                x10: reader.read_u16()?,
                x12: reader.read_u16()?,
                effect_ids: reader
                    .read_u16_array::<4>()?
                    .into_iter()
                    .filter(|&id| id > 0)
                    .collect(),
                frequency: reader.read_u8()?,
                id: reader.read_u8()?,
                pad: reader.read_array()?,
            }),
            204 => Self::Room(RoomThing {
                pos_x: reader.read_i32()?,
                pos_y: reader.read_i32()?,
                x08: reader.read_i32()?,
                x0c: reader.read_u16()?,
                direction: reader.read_u8()?,
                x0f: reader.read_u8()?,
                initial_health: reader.read_u16()?,
                room_type: reader.read_u8()?,
                player_id: reader.read_u8()?,
            }),
            205 => Self::Camera(Camera {
                position: reader.read_vector3f()?,
                position_min_clip_extent: reader.read_vector3f()?,
                position_max_clip_extent: reader.read_vector3f()?,
                view_distance_value: reader.read_fixed()?,
                view_distance_min: reader.read_fixed()?,
                view_distance_max: reader.read_fixed()?,
                zoom_value: reader.read_fixed()?,
                zoom_value_min: reader.read_fixed()?,
                zoom_value_max: reader.read_fixed()?,
                lens_value: reader.read_fixed()?,
                lens_value_min: reader.read_fixed()?,
                lens_value_max: reader.read_fixed()?,
                flags: reader.read_i32()?,
                angle_yaw: reader.read_u16()?,
                angle_roll: reader.read_u16()?,
                angle_pitch: reader.read_u16()?,
                id: reader.read_u16()?,
            }),
            _ => return Ok(None),
        };
        Ok(Some(thing))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Object(_) => "Object",
            Self::Trap(_) => "Trap",
            Self::Door(_) => "Door",
            Self::ActionPoint(_) => "ActionPoint",
            Self::NeutralCreature(_) => "NeutralCreature",
            Self::GoodCreature(_) => "GoodCreature",
            Self::KeeperCreature(_) => "KeeperCreature",
            Self::HeroParty(_) => "HeroParty",
            Self::DeadBody(_) => "DeadBody",
            Self::EffectGenerator(_) => "EffectGenerator",
            Self::Room(_) => "Room",
            Self::Camera(_) => "Camera",
        }
    }
}

/// Reads every thing record of a chunk, in file order
pub fn read_things(
    reader: &mut BinaryReader,
    sink: &mut dyn DiagnosticSink,
    header: &KwdHeader,
) -> Result<Vec<Thing>> {
    let mut things = Vec::with_capacity((header.item_count as usize).min(reader.remaining()));
    for _ in 0..header.item_count {
        let tag = reader.read_u32()?;
        let len = reader.read_u32()? as usize;
        let start = reader.position();

        match Thing::read(reader, tag)? {
            Some(thing) => things.push(thing),
            None => {
                reader.skip(len)?;
                report(sink, Diagnostic::UnknownTag { context: TagContext::Thing, tag, offset: start });
            }
        }

        realign(reader, sink, start, len)?;
    }
    Ok(things)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::codec::testutil::{BinaryWriter, ChunkBuilder};
    use crate::codec::FileKind;
    use crate::diagnostics::EventCollector;

    pub(crate) fn write_object_thing(w: &mut BinaryWriter, x: i32, y: i32, money: i32) {
        w.write_u32_le(194);
        w.write_u32_le(24);
        w.write_i32_le(x);
        w.write_i32_le(y);
        w.write_zeros(4);
        w.write_i32_le(0);
        w.write_i32_le(money);
        w.write_u16_le(0);
        w.write_u8(1);
        w.write_u8(3);
    }

    fn write_good_creature(w: &mut BinaryWriter, creature_id: u8) {
        w.write_i32_le(5);
        w.write_i32_le(6);
        w.write_i32_le(0);
        w.write_u16_le(100);
        w.write_u8(2);
        w.write_u8(ThingCreatureFlags::LEADER.bits());
        w.write_i32_le(0);
        w.write_i32_le(250);
        w.write_u16_le(0);
        w.write_u8(0);
        w.write_u8(0);
        w.write_u8(creature_id);
        w.write_zeros(2);
        w.write_u8(0);
    }

    fn read(data: &[u8], sink: &mut EventCollector) -> (Vec<Thing>, usize) {
        let mut reader = BinaryReader::new(data);
        let header = KwdHeader::read(&mut reader, sink).unwrap();
        let things = read_things(&mut reader, sink, &header).unwrap();
        (things, reader.remaining())
    }

    #[test]
    fn test_read_object_thing() {
        let mut body = BinaryWriter::new();
        write_object_thing(&mut body, 100, 200, 500);
        let data = ChunkBuilder::catalog(FileKind::Things, 1).finish(body.as_slice());

        let mut sink = EventCollector::new();
        let (things, remaining) = read(&data, &mut sink);

        assert_eq!(remaining, 0);
        assert!(sink.is_empty());
        match &things[..] {
            [Thing::Object(object)] => {
                assert_eq!((object.pos_x, object.pos_y), (100, 200));
                assert_eq!(object.money_amount, 500);
                assert_eq!(object.object_id, 1);
                assert_eq!(object.player_id, 3);
            }
            other => panic!("unexpected things: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_tag_is_skipped() {
        let mut body = BinaryWriter::new();
        body.write_u32_le(999);
        body.write_u32_le(20);
        body.write_bytes(&[0xAB; 20]);
        write_object_thing(&mut body, 1, 2, 3);
        let data = ChunkBuilder::catalog(FileKind::Things, 2).finish(body.as_slice());

        let mut sink = EventCollector::new();
        let (things, remaining) = read(&data, &mut sink);

        assert_eq!(remaining, 0);
        assert_eq!(things.len(), 1);
        assert!(matches!(&things[0], Thing::Object(o) if o.money_amount == 3));
        assert_eq!(
            sink.events(),
            &[Diagnostic::UnknownTag { context: TagContext::Thing, tag: 999, offset: 64 }]
        );
    }

    #[test]
    fn test_hero_party_keeps_occupied_slots() {
        let mut body = BinaryWriter::new();
        body.write_u32_le(201);
        body.write_u32_le(43 + 16 * 32);
        body.write_string("Raiders", 32);
        body.write_u16_le(4);
        body.write_u8(1);
        body.write_i32_le(0);
        body.write_i32_le(0);
        write_good_creature(&mut body, 7);
        write_good_creature(&mut body, 0);
        write_good_creature(&mut body, 9);
        for _ in 3..HERO_PARTY_SLOTS {
            write_good_creature(&mut body, 0);
        }
        let data = ChunkBuilder::catalog(FileKind::Things, 1).finish(body.as_slice());

        let mut sink = EventCollector::new();
        let (things, remaining) = read(&data, &mut sink);

        assert_eq!(remaining, 0);
        assert!(sink.is_empty());
        let Thing::HeroParty(party) = &things[0] else {
            panic!("expected a hero party");
        };
        assert_eq!(party.name, "Raiders");
        assert_eq!(party.trigger_id, 4);
        assert_eq!(
            party.members.iter().map(|m| m.creature_id).collect::<Vec<_>>(),
            vec![7, 9]
        );
        assert!(party.members[0].flags.contains(ThingCreatureFlags::LEADER));
        assert_eq!(party.members[0].initial_health, 250);
    }

    #[test]
    fn test_longer_declared_length_realigns() {
        let mut body = BinaryWriter::new();
        body.write_u32_le(202);
        body.write_u32_le(20);
        body.write_i32_le(1);
        body.write_i32_le(2);
        body.write_i32_le(3);
        body.write_u16_le(0);
        body.write_u8(12);
        body.write_u8(1);
        body.write_zeros(4);
        let data = ChunkBuilder::catalog(FileKind::Things, 1).finish(body.as_slice());

        let mut sink = EventCollector::new();
        let (things, remaining) = read(&data, &mut sink);

        assert_eq!(remaining, 0);
        assert!(matches!(&things[0], Thing::DeadBody(b) if b.creature_id == 12));
        assert_eq!(sink.count(|e| matches!(e, Diagnostic::Drift { .. })), 1);
    }
}
