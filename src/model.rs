//! Aggregate level model.
//!
//! [`ModelBuilder`] is the merge target while files stream in; it keeps the
//! first-match indices (water, lava, imp, level gem, room by terrain) up to
//! date. [`ModelBuilder::build`] freezes it into a read-only [`LevelModel`]
//! with every catalog sorted by id.

use std::hash::Hash;

use ahash::{AHashMap, AHashSet};
use indexmap::IndexMap;

use crate::catalog::{
    BridgeTerrainType, CatalogEntry, Creature, CreatureSpell, Door, Effect, EffectElement, GameMap,
    GameObject, KeeperSpell, Player, Room, Shot, Terrain, TerrainFlags, Trap,
};
use crate::codec::{BinaryReader, FileKind, KwdHeader};
use crate::diagnostics::{report, Diagnostic, DiagnosticSink};
use crate::error::{Error, Result};
use crate::level::{GameLevel, Thing, Trigger, Variable, Variables};

/// Room id of the creature portal
pub const PORTAL_ROOM_ID: u8 = 3;

/// Inserts `records` by id, reporting every replaced id
fn merge_records<T: CatalogEntry>(
    target: &mut IndexMap<T::Id, T>,
    records: Vec<T>,
    sink: &mut dyn DiagnosticSink,
) {
    for record in records {
        let id = record.id();
        if target.insert(id, record).is_some() {
            report(sink, Diagnostic::RecordReplaced { kind: T::KIND, id: id.into() });
        }
    }
}

fn sorted<K: Ord + Hash, V>(mut map: IndexMap<K, V>) -> IndexMap<K, V> {
    map.sort_keys();
    map
}

/// Incremental merge target of one level load
#[derive(Debug, Default)]
pub struct ModelBuilder {
    level: Option<GameLevel>,
    map: Option<GameMap>,
    terrain: IndexMap<u8, Terrain>,
    rooms: IndexMap<u8, Room>,
    doors: IndexMap<u8, Door>,
    traps: IndexMap<u8, Trap>,
    creatures: IndexMap<u8, Creature>,
    objects: IndexMap<u8, GameObject>,
    creature_spells: IndexMap<u8, CreatureSpell>,
    keeper_spells: IndexMap<u8, KeeperSpell>,
    shots: IndexMap<u8, Shot>,
    players: IndexMap<u8, Player>,
    effects: IndexMap<u16, Effect>,
    effect_elements: IndexMap<u16, EffectElement>,
    things: Vec<Thing>,
    triggers: IndexMap<u16, Trigger>,
    variables: Variables,
    loaded: AHashSet<FileKind>,
    water_terrain_id: Option<u8>,
    lava_terrain_id: Option<u8>,
    imp_id: Option<u8>,
    level_gem_id: Option<u8>,
    rooms_by_terrain: AHashMap<u8, u8>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `kind` as loaded; a repeated kind is reported as an override
    fn begin(&mut self, kind: FileKind, sink: &mut dyn DiagnosticSink) {
        if !self.loaded.insert(kind) {
            report(sink, Diagnostic::CatalogOverride { kind });
        }
    }

    pub fn is_loaded(&self, kind: FileKind) -> bool {
        self.loaded.contains(&kind)
    }

    pub fn set_level(&mut self, level: GameLevel, sink: &mut dyn DiagnosticSink) {
        self.begin(FileKind::Level, sink);
        self.level = Some(level);
    }

    pub fn level(&self) -> Option<&GameLevel> {
        self.level.as_ref()
    }

    pub fn set_map(&mut self, map: GameMap, sink: &mut dyn DiagnosticSink) {
        self.begin(FileKind::Map, sink);
        self.map = Some(map);
    }

    /// Reads a map chunk. Tiles of a later map file go into the existing
    /// grid, which keeps its size.
    pub fn read_map(
        &mut self,
        reader: &mut BinaryReader,
        header: &KwdHeader,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()> {
        match self.map.as_mut() {
            Some(map) => {
                map.read_tiles(reader)?;
                self.begin(FileKind::Map, sink);
            }
            None => self.set_map(GameMap::read(reader, header)?, sink),
        }
        Ok(())
    }

    pub fn merge_terrain(&mut self, records: Vec<Terrain>, sink: &mut dyn DiagnosticSink) {
        self.begin(Terrain::KIND, sink);
        for terrain in &records {
            if self.water_terrain_id.is_none() && terrain.is_water() {
                self.water_terrain_id = Some(terrain.terrain_id);
            }
            if self.lava_terrain_id.is_none() && terrain.is_lava() {
                self.lava_terrain_id = Some(terrain.terrain_id);
            }
        }
        merge_records(&mut self.terrain, records, sink);
    }

    pub fn merge_rooms(&mut self, records: Vec<Room>, sink: &mut dyn DiagnosticSink) {
        self.begin(Room::KIND, sink);
        for room in &records {
            // First room wins when several share a terrain
            self.rooms_by_terrain.entry(room.terrain_id).or_insert(room.room_id);
        }
        merge_records(&mut self.rooms, records, sink);
    }

    pub fn merge_creatures(&mut self, records: Vec<Creature>, sink: &mut dyn DiagnosticSink) {
        self.begin(Creature::KIND, sink);
        if self.imp_id.is_none() {
            self.imp_id = records
                .iter()
                .find(|c| c.is_worker() && c.is_evil())
                .map(|c| c.creature_id);
        }
        merge_records(&mut self.creatures, records, sink);
    }

    pub fn merge_objects(&mut self, records: Vec<GameObject>, sink: &mut dyn DiagnosticSink) {
        self.begin(GameObject::KIND, sink);
        if self.level_gem_id.is_none() {
            self.level_gem_id = records.iter().find(|o| o.is_level_gem()).map(|o| o.object_id);
        }
        merge_records(&mut self.objects, records, sink);
    }

    pub fn merge_doors(&mut self, records: Vec<Door>, sink: &mut dyn DiagnosticSink) {
        self.begin(Door::KIND, sink);
        merge_records(&mut self.doors, records, sink);
    }

    pub fn merge_traps(&mut self, records: Vec<Trap>, sink: &mut dyn DiagnosticSink) {
        self.begin(Trap::KIND, sink);
        merge_records(&mut self.traps, records, sink);
    }

    pub fn merge_creature_spells(&mut self, records: Vec<CreatureSpell>, sink: &mut dyn DiagnosticSink) {
        self.begin(CreatureSpell::KIND, sink);
        merge_records(&mut self.creature_spells, records, sink);
    }

    pub fn merge_keeper_spells(&mut self, records: Vec<KeeperSpell>, sink: &mut dyn DiagnosticSink) {
        self.begin(KeeperSpell::KIND, sink);
        merge_records(&mut self.keeper_spells, records, sink);
    }

    pub fn merge_shots(&mut self, records: Vec<Shot>, sink: &mut dyn DiagnosticSink) {
        self.begin(Shot::KIND, sink);
        merge_records(&mut self.shots, records, sink);
    }

    pub fn merge_players(&mut self, records: Vec<Player>, sink: &mut dyn DiagnosticSink) {
        self.begin(Player::KIND, sink);
        merge_records(&mut self.players, records, sink);
    }

    pub fn merge_effects(&mut self, records: Vec<Effect>, sink: &mut dyn DiagnosticSink) {
        self.begin(Effect::KIND, sink);
        merge_records(&mut self.effects, records, sink);
    }

    pub fn merge_effect_elements(&mut self, records: Vec<EffectElement>, sink: &mut dyn DiagnosticSink) {
        self.begin(EffectElement::KIND, sink);
        merge_records(&mut self.effect_elements, records, sink);
    }

    /// Things of every file are kept, in load order
    pub fn add_things(&mut self, things: Vec<Thing>, sink: &mut dyn DiagnosticSink) {
        self.begin(FileKind::Things, sink);
        self.things.extend(things);
    }

    /// Both trigger families share one id space; a repeated id replaces the earlier trigger
    pub fn merge_triggers(&mut self, triggers: Vec<Trigger>, sink: &mut dyn DiagnosticSink) {
        self.begin(FileKind::Triggers, sink);
        for trigger in triggers {
            let id = trigger.id;
            if self.triggers.insert(id, trigger).is_some() {
                report(sink, Diagnostic::RecordReplaced { kind: FileKind::Triggers, id: id.into() });
            }
        }
    }

    pub fn merge_variables(&mut self, variables: Vec<Variable>, sink: &mut dyn DiagnosticSink) {
        self.begin(FileKind::Variables, sink);
        for variable in variables {
            self.variables.insert(variable);
        }
    }

    /// Freezes the builder. Needs the level info and the map.
    pub fn build(self) -> Result<LevelModel> {
        let level = self.level.ok_or(Error::MissingLevelInfo)?;
        let map = self.map.ok_or(Error::MissingFile(FileKind::Map))?;
        Ok(LevelModel {
            level,
            map,
            terrain: sorted(self.terrain),
            rooms: sorted(self.rooms),
            doors: sorted(self.doors),
            traps: sorted(self.traps),
            creatures: sorted(self.creatures),
            objects: sorted(self.objects),
            creature_spells: sorted(self.creature_spells),
            keeper_spells: sorted(self.keeper_spells),
            shots: sorted(self.shots),
            players: sorted(self.players),
            effects: sorted(self.effects),
            effect_elements: sorted(self.effect_elements),
            things: self.things,
            triggers: sorted(self.triggers),
            variables: self.variables,
            water_terrain_id: self.water_terrain_id,
            lava_terrain_id: self.lava_terrain_id,
            imp_id: self.imp_id,
            level_gem_id: self.level_gem_id,
            rooms_by_terrain: self.rooms_by_terrain,
        })
    }
}

/// Read-only, fully cross-referenced level
#[derive(Debug)]
pub struct LevelModel {
    level: GameLevel,
    map: GameMap,
    terrain: IndexMap<u8, Terrain>,
    rooms: IndexMap<u8, Room>,
    doors: IndexMap<u8, Door>,
    traps: IndexMap<u8, Trap>,
    creatures: IndexMap<u8, Creature>,
    objects: IndexMap<u8, GameObject>,
    creature_spells: IndexMap<u8, CreatureSpell>,
    keeper_spells: IndexMap<u8, KeeperSpell>,
    shots: IndexMap<u8, Shot>,
    players: IndexMap<u8, Player>,
    effects: IndexMap<u16, Effect>,
    effect_elements: IndexMap<u16, EffectElement>,
    things: Vec<Thing>,
    triggers: IndexMap<u16, Trigger>,
    variables: Variables,
    water_terrain_id: Option<u8>,
    lava_terrain_id: Option<u8>,
    imp_id: Option<u8>,
    level_gem_id: Option<u8>,
    rooms_by_terrain: AHashMap<u8, u8>,
}

impl LevelModel {
    pub fn level(&self) -> &GameLevel {
        &self.level
    }

    pub fn map(&self) -> &GameMap {
        &self.map
    }

    pub fn terrain(&self, id: u8) -> Option<&Terrain> {
        self.terrain.get(&id)
    }

    /// Terrain records in id order
    pub fn terrain_list(&self) -> impl Iterator<Item = &Terrain> {
        self.terrain.values()
    }

    pub fn room(&self, id: u8) -> Option<&Room> {
        self.rooms.get(&id)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// Room whose floor is terrain `terrain_id`
    pub fn room_by_terrain(&self, terrain_id: u8) -> Option<&Room> {
        self.rooms_by_terrain.get(&terrain_id).and_then(|id| self.room(*id))
    }

    pub fn portal(&self) -> Option<&Room> {
        self.room(PORTAL_ROOM_ID)
    }

    pub fn door(&self, id: u8) -> Option<&Door> {
        self.doors.get(&id)
    }

    pub fn doors(&self) -> impl Iterator<Item = &Door> {
        self.doors.values()
    }

    pub fn trap(&self, id: u8) -> Option<&Trap> {
        self.traps.get(&id)
    }

    pub fn traps(&self) -> impl Iterator<Item = &Trap> {
        self.traps.values()
    }

    pub fn creature(&self, id: u8) -> Option<&Creature> {
        self.creatures.get(&id)
    }

    pub fn creatures(&self) -> impl Iterator<Item = &Creature> {
        self.creatures.values()
    }

    /// The worker creature: first creature flagged both worker and evil
    pub fn imp(&self) -> Option<&Creature> {
        self.imp_id.and_then(|id| self.creature(id))
    }

    pub fn object(&self, id: u8) -> Option<&GameObject> {
        self.objects.get(&id)
    }

    pub fn objects(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.values()
    }

    pub fn level_gem(&self) -> Option<&GameObject> {
        self.level_gem_id.and_then(|id| self.object(id))
    }

    pub fn creature_spell(&self, id: u8) -> Option<&CreatureSpell> {
        self.creature_spells.get(&id)
    }

    pub fn creature_spells(&self) -> impl Iterator<Item = &CreatureSpell> {
        self.creature_spells.values()
    }

    pub fn keeper_spell(&self, id: u8) -> Option<&KeeperSpell> {
        self.keeper_spells.get(&id)
    }

    pub fn keeper_spells(&self) -> impl Iterator<Item = &KeeperSpell> {
        self.keeper_spells.values()
    }

    pub fn shot(&self, id: u8) -> Option<&Shot> {
        self.shots.get(&id)
    }

    pub fn shots(&self) -> impl Iterator<Item = &Shot> {
        self.shots.values()
    }

    pub fn player(&self, id: u8) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn effect(&self, id: u16) -> Option<&Effect> {
        self.effects.get(&id)
    }

    pub fn effects(&self) -> impl Iterator<Item = &Effect> {
        self.effects.values()
    }

    pub fn effect_element(&self, id: u16) -> Option<&EffectElement> {
        self.effect_elements.get(&id)
    }

    pub fn effect_elements(&self) -> impl Iterator<Item = &EffectElement> {
        self.effect_elements.values()
    }

    /// Placed things in load order
    pub fn things(&self) -> &[Thing] {
        &self.things
    }

    pub fn trigger(&self, id: u16) -> Option<&Trigger> {
        self.triggers.get(&id)
    }

    pub fn triggers(&self) -> &IndexMap<u16, Trigger> {
        &self.triggers
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn water_terrain(&self) -> Option<&Terrain> {
        self.water_terrain_id.and_then(|id| self.terrain(id))
    }

    pub fn lava_terrain(&self) -> Option<&Terrain> {
        self.lava_terrain_id.and_then(|id| self.terrain(id))
    }

    /// Terrain under a bridge tile, or `None` when `terrain` is not a bridge
    pub fn terrain_bridge(&self, kind: BridgeTerrainType, terrain: &Terrain) -> Option<&Terrain> {
        if !terrain.flags.contains(TerrainFlags::ROOM) {
            return None;
        }
        self.room_bridge(kind, self.room_by_terrain(terrain.terrain_id)?)
    }

    /// Bridges are the rooms that cannot be placed on land
    pub fn room_bridge(&self, kind: BridgeTerrainType, room: &Room) -> Option<&Terrain> {
        if room.is_placeable_on_land() {
            return None;
        }
        match kind {
            BridgeTerrainType::Water => self.water_terrain(),
            BridgeTerrainType::Lava => self.lava_terrain(),
        }
    }
}
