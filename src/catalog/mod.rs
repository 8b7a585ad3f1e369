//! Fixed-layout catalog records.
//!
//! Every catalog file is a header followed by `item_count` records of one
//! kind. Records are keyed by their own small id.

pub mod creature;
pub mod creature_spell;
pub mod door;
pub mod effect;
pub mod keeper_spell;
pub mod map;
pub mod object;
pub mod player;
pub mod room;
pub mod shot;
pub mod terrain;
pub mod trap;

use std::hash::Hash;

use crate::codec::{read_records, BinaryReader, FileKind, KwdHeader};
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;

pub use creature::{Creature, CreatureFlags};
pub use creature_spell::CreatureSpell;
pub use door::Door;
pub use effect::{Effect, EffectElement};
pub use keeper_spell::KeeperSpell;
pub use map::{BridgeTerrainType, GameMap, Tile};
pub use object::{GameObject, ObjectFlags};
pub use player::{AiAttributes, Player};
pub use room::{Room, RoomFlags};
pub use shot::Shot;
pub use terrain::{Terrain, TerrainFlags};
pub use trap::Trap;

/// A record kind stored in an id-keyed catalog
pub trait CatalogEntry: Sized {
    type Id: Copy + Eq + Hash + Ord + Into<u32>;

    /// File kind of the catalog this record is loaded from
    const KIND: FileKind;

    fn id(&self) -> Self::Id;

    /// Reads one record; `header` gives access to the per-item size
    fn read(reader: &mut BinaryReader, sink: &mut dyn DiagnosticSink, header: &KwdHeader) -> Result<Self>;

    /// Reads every record of a catalog chunk
    fn read_all(reader: &mut BinaryReader, sink: &mut dyn DiagnosticSink, header: &KwdHeader) -> Result<Vec<Self>> {
        read_records(reader, sink, header.item_count, header.item_size(), |r, s| {
            Self::read(r, s, header)
        })
    }
}
