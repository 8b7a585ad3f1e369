//! Tunable level variables.
//!
//! Each record is 16 bytes: a variable id followed by three words whose
//! meaning depends on the id.

use ahash::AHashMap;
use indexmap::IndexMap;

use crate::codec::{BinaryReader, KwdHeader};
use crate::error::Result;

pub const CREATURE_POOL: i32 = 1;
pub const AVAILABILITY: i32 = 2;
pub const SACRIFICES: i32 = 3;
pub const CREATURE_STATS: i32 = 4;
pub const CREATURE_FIRST_PERSON: i32 = 5;

/// Ids with a known shape but unknown meaning
pub const UNKNOWN_IDS: [i32; 4] = [0, 17, 66, 77];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreaturePool {
    pub creature_id: i32,
    pub value: i32,
    pub player_id: i32,
}

/// Unlock state of a room, creature, spell, door or trap for one player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    /// Raw kind of the unlocked thing
    pub kind: u16,
    pub player_id: u16,
    pub type_id: i32,
    /// Raw state (unavailable, researchable, available, ...)
    pub value: i32,
}

/// Three ingredients that give a reward when sacrificed together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sacrifice {
    /// Raw ingredient kinds and ids
    pub ingredients: [(u8, u8); 3],
    pub reward_type: u8,
    pub speech_id: u8,
    pub reward_value: i32,
}

/// Stat override of one creature level, also used for first person stats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatureStats {
    pub stat_id: i32,
    pub value: i32,
    pub level: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownVariable {
    pub variable_id: i32,
    pub value: i32,
    pub unknown1: i32,
    pub unknown2: i32,
}

/// Global tuning value, keyed by its variable id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiscVariable {
    pub variable_id: i32,
    pub value: i32,
    pub unknown1: i32,
    pub unknown2: i32,
}

/// One decoded variable record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    CreaturePool(CreaturePool),
    Availability(Availability),
    Sacrifice(Sacrifice),
    CreatureStats(CreatureStats),
    CreatureFirstPerson(CreatureStats),
    Unknown(UnknownVariable),
    Misc(MiscVariable),
}

impl Variable {
    pub fn read(reader: &mut BinaryReader) -> Result<Self> {
        let id = reader.read_i32()?;
        let variable = match id {
            CREATURE_POOL => Self::CreaturePool(CreaturePool {
                creature_id: reader.read_i32()?,
                value: reader.read_i32()?,
                player_id: reader.read_i32()?,
            }),
            AVAILABILITY => Self::Availability(Availability {
                kind: reader.read_u16()?,
                player_id: reader.read_u16()?,
                type_id: reader.read_i32()?,
                value: reader.read_i32()?,
            }),
            SACRIFICES => {
                let mut ingredients = [(0, 0); 3];
                for ingredient in ingredients.iter_mut() {
                    *ingredient = (reader.read_u8()?, reader.read_u8()?);
                }
                Self::Sacrifice(Sacrifice {
                    ingredients,
                    reward_type: reader.read_u8()?,
                    speech_id: reader.read_u8()?,
                    reward_value: reader.read_i32()?,
                })
            }
            CREATURE_STATS => Self::CreatureStats(read_stats(reader)?),
            CREATURE_FIRST_PERSON => Self::CreatureFirstPerson(read_stats(reader)?),
            _ if UNKNOWN_IDS.contains(&id) => Self::Unknown(UnknownVariable {
                variable_id: id,
                value: reader.read_i32()?,
                unknown1: reader.read_i32()?,
                unknown2: reader.read_i32()?,
            }),
            _ => Self::Misc(MiscVariable {
                variable_id: id,
                value: reader.read_i32()?,
                unknown1: reader.read_i32()?,
                unknown2: reader.read_i32()?,
            }),
        };
        Ok(variable)
    }
}

fn read_stats(reader: &mut BinaryReader) -> Result<CreatureStats> {
    Ok(CreatureStats {
        stat_id: reader.read_i32()?,
        value: reader.read_i32()?,
        level: reader.read_i32()?,
    })
}

/// Reads every variable record of a chunk
pub fn read_variables(reader: &mut BinaryReader, header: &KwdHeader) -> Result<Vec<Variable>> {
    (0..header.item_count).map(|_| Variable::read(reader)).collect()
}

/// Variable tables of a level. Later records replace earlier ones per key.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    /// player id -> creature id -> pool entry
    pub creature_pools: AHashMap<i32, IndexMap<i32, CreaturePool>>,
    pub availabilities: Vec<Availability>,
    pub sacrifices: Vec<Sacrifice>,
    /// creature level -> stat id -> override
    pub creature_stats: AHashMap<i32, IndexMap<i32, CreatureStats>>,
    pub creature_first_person_stats: AHashMap<i32, IndexMap<i32, CreatureStats>>,
    pub unknown: Vec<UnknownVariable>,
    pub misc: IndexMap<i32, MiscVariable>,
}

impl Variables {
    pub fn insert(&mut self, variable: Variable) {
        match variable {
            Variable::CreaturePool(pool) => {
                self.creature_pools
                    .entry(pool.player_id)
                    .or_default()
                    .insert(pool.creature_id, pool);
            }
            Variable::Availability(availability) => self.availabilities.push(availability),
            Variable::Sacrifice(sacrifice) => {
                if !self.sacrifices.contains(&sacrifice) {
                    self.sacrifices.push(sacrifice);
                }
            }
            Variable::CreatureStats(stats) => {
                self.creature_stats.entry(stats.level).or_default().insert(stats.stat_id, stats);
            }
            Variable::CreatureFirstPerson(stats) => {
                self.creature_first_person_stats
                    .entry(stats.level)
                    .or_default()
                    .insert(stats.stat_id, stats);
            }
            Variable::Unknown(unknown) => {
                if !self.unknown.contains(&unknown) {
                    self.unknown.push(unknown);
                }
            }
            Variable::Misc(misc) => {
                self.misc.insert(misc.variable_id, misc);
            }
        }
    }

    pub fn creature_pool(&self, player_id: i32) -> Option<&IndexMap<i32, CreaturePool>> {
        self.creature_pools.get(&player_id)
    }

    pub fn creature_stats(&self, level: i32) -> Option<&IndexMap<i32, CreatureStats>> {
        self.creature_stats.get(&level)
    }

    pub fn creature_first_person_stats(&self, level: i32) -> Option<&IndexMap<i32, CreatureStats>> {
        self.creature_first_person_stats.get(&level)
    }

    pub fn misc(&self, variable_id: i32) -> Option<&MiscVariable> {
        self.misc.get(&variable_id)
    }
}
