//! Level loading: file discovery and the per-file chunk loop.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::catalog::{
    CatalogEntry, Creature, CreatureSpell, Door, Effect, EffectElement, GameObject, KeeperSpell,
    Player, Room, Shot, Terrain, Trap,
};
use crate::codec::{BinaryReader, FileKind, KwdHeader};
use crate::diagnostics::{report, Diagnostic, DiagnosticSink, EventCollector};
use crate::error::{Error, Result};
use crate::level::{read_things, read_triggers, read_variables, GameLevel};
use crate::model::{LevelModel, ModelBuilder};

/// Bytes before the type-specific header tail; anything shorter cannot start a chunk
const CHUNK_PREFIX_SIZE: usize = 16;

/// Folder of the editor catalogs, relative to the base directory
pub const DEFAULT_EDITOR_FOLDER: &str = "Data/editor/";

#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Decode every catalog, or only the map dimensions
    pub full_load: bool,
    /// Enforce both header check words on every chunk
    pub verify_checksums: bool,
    /// Folder of the Effects/EffectElements catalogs added to normal levels
    pub editor_folder: String,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            full_load: true,
            verify_checksums: false,
            editor_folder: DEFAULT_EDITOR_FOLDER.to_string(),
        }
    }
}

/// Builder for opening level files
#[derive(Debug, Clone, Default)]
pub struct KwdLoader {
    config: LoadConfig,
}

impl KwdLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn full_load(mut self, full_load: bool) -> Self {
        self.config.full_load = full_load;
        self
    }

    pub fn verify_checksums(mut self, verify: bool) -> Self {
        self.config.verify_checksums = verify;
        self
    }

    pub fn editor_folder(mut self, folder: impl Into<String>) -> Self {
        self.config.editor_folder = folder.into();
        self
    }

    pub fn config(&self) -> &LoadConfig {
        &self.config
    }

    /// Reads the primary level file only
    pub fn open(self, base_dir: impl AsRef<Path>, level_file: impl AsRef<Path>) -> Result<KwdFile> {
        KwdFile::open(self.config, base_dir.as_ref(), level_file.as_ref())
    }

    /// Opens `level_file` and loads it right away
    pub fn load(self, base_dir: impl AsRef<Path>, level_file: impl AsRef<Path>) -> Result<KwdFile> {
        let mut file = self.open(base_dir, level_file)?;
        file.load()?;
        Ok(file)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Primary level file read, nothing else
    HeaderOnly,
    /// Every companion file merged into the model
    Loaded,
    /// Only the map dimensions were read
    DimensionsOnly,
}

/// A level and its companion files
#[derive(Debug)]
pub struct KwdFile {
    config: LoadConfig,
    base_dir: PathBuf,
    level: GameLevel,
    state: LoadState,
    model: Option<LevelModel>,
    dimensions: Option<(u32, u32)>,
    events: EventCollector,
}

impl KwdFile {
    fn open(config: LoadConfig, base_dir: &Path, level_file: &Path) -> Result<Self> {
        let mut events = EventCollector::new();
        let mut primary = ModelBuilder::new();
        read_file(level_file, &mut primary, &config, &mut events)?;

        let mut level = primary
            .level()
            .cloned()
            .ok_or_else(|| Error::MissingLevelInfo.in_file(level_file))?;
        level.add_default_paths(&config.editor_folder);
        info!(name = %level.name, paths = level.paths.len(), "opened level");

        Ok(Self {
            config,
            base_dir: base_dir.to_path_buf(),
            level,
            state: LoadState::HeaderOnly,
            model: None,
            dimensions: None,
            events,
        })
    }

    /// Loads the companion files, collecting diagnostics in this file
    pub fn load(&mut self) -> Result<()> {
        let mut events = std::mem::take(&mut self.events);
        let result = self.load_with(&mut events);
        self.events = events;
        result
    }

    /// Loads the companion files, handing diagnostics to `sink`.
    ///
    /// Only the first successful call does anything. A failed load leaves
    /// the file in the header-only state, so it can be retried.
    pub fn load_with(&mut self, sink: &mut dyn DiagnosticSink) -> Result<()> {
        if self.state != LoadState::HeaderOnly {
            return Ok(());
        }
        if self.config.full_load {
            let mut builder = ModelBuilder::new();
            builder.set_level(self.level.clone(), sink);
            self.read_companions(&mut builder, sink)?;
            let model = builder.build()?;
            self.dimensions = Some((model.map().width(), model.map().height()));
            self.model = Some(model);
            self.state = LoadState::Loaded;
        } else {
            self.dimensions = Some(self.read_dimensions(sink)?);
            self.state = LoadState::DimensionsOnly;
        }
        Ok(())
    }

    fn read_companions(&self, builder: &mut ModelBuilder, sink: &mut dyn DiagnosticSink) -> Result<()> {
        let map = self.level.path(FileKind::Map).ok_or(Error::MissingFile(FileKind::Map))?;
        read_file(&self.resolve(&map.path), builder, &self.config, sink)?;

        for path in self.level.paths.iter().filter(|p| p.kind() != Some(FileKind::Map)) {
            read_file(&self.resolve(&path.path), builder, &self.config, sink)?;
        }
        Ok(())
    }

    fn read_dimensions(&self, sink: &mut dyn DiagnosticSink) -> Result<(u32, u32)> {
        let map = self.level.path(FileKind::Map).ok_or(Error::MissingFile(FileKind::Map))?;
        let path = self.resolve(&map.path);
        let data = fs::read(&path).map_err(|e| Error::from(e).in_file(&path))?;
        let mut reader = BinaryReader::new(&data);
        let header = KwdHeader::read(&mut reader, sink).map_err(|e| e.in_file(&path))?;
        Ok((header.width, header.height))
    }

    fn resolve(&self, relative: &str) -> PathBuf {
        resolve_path(&self.base_dir, relative)
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    /// Level info; after a full load this is the merged model's copy
    pub fn level(&self) -> &GameLevel {
        self.model.as_ref().map_or(&self.level, LevelModel::level)
    }

    pub fn model(&self) -> Option<&LevelModel> {
        self.model.as_ref()
    }

    /// Moves the model out, leaving this file without one
    pub fn into_model(self) -> Option<LevelModel> {
        self.model
    }

    /// Map width and height, known after any `load()`
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    /// Diagnostics gathered by `open` and `load`
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.events.events()
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.events.drain()
    }
}

/// Resolves `relative` under `base`, matching each path component
/// case-insensitively when the exact name does not exist.
pub fn resolve_path(base: &Path, relative: &str) -> PathBuf {
    let exact = base.join(relative);
    if exact.exists() {
        return exact;
    }

    let mut resolved = base.to_path_buf();
    for component in relative.split('/').filter(|c| !c.is_empty()) {
        let candidate = resolved.join(component);
        if candidate.exists() {
            resolved = candidate;
            continue;
        }
        let found = fs::read_dir(&resolved).ok().and_then(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .find(|entry| entry.file_name().to_string_lossy().eq_ignore_ascii_case(component))
                .map(|entry| entry.path())
        });
        // Unmatched components are kept as written so the open error names them
        resolved = found.unwrap_or(candidate);
    }
    resolved
}

/// Reads one file and runs its chunks into `builder`; errors carry the path
fn read_file(
    path: &Path,
    builder: &mut ModelBuilder,
    config: &LoadConfig,
    sink: &mut dyn DiagnosticSink,
) -> Result<()> {
    debug!(path = %path.display(), "reading file");
    let data = fs::read(path).map_err(|e| Error::from(e).in_file(path))?;
    read_chunks(&data, builder, config, sink).map_err(|e| e.in_file(path))
}

/// Runs every chunk of a file buffer into `builder`
pub fn read_chunks(
    data: &[u8],
    builder: &mut ModelBuilder,
    config: &LoadConfig,
    sink: &mut dyn DiagnosticSink,
) -> Result<()> {
    let mut reader = BinaryReader::new(data);
    while reader.remaining() >= CHUNK_PREFIX_SIZE {
        let header = KwdHeader::read(&mut reader, sink)?;
        read_chunk(&mut reader, &header, builder, config, sink)?;
    }

    if !reader.is_empty() {
        return Err(Error::LengthMismatch { consumed: reader.position(), len: reader.len() });
    }
    Ok(())
}

/// Lists the chunk headers of a file buffer without decoding any payload
pub fn read_headers(data: &[u8], sink: &mut dyn DiagnosticSink) -> Result<Vec<KwdHeader>> {
    let mut reader = BinaryReader::new(data);
    let mut headers = Vec::new();
    while reader.remaining() >= CHUNK_PREFIX_SIZE {
        let header = KwdHeader::read(&mut reader, sink)?;
        reader.skip(header.data_size as usize)?;
        headers.push(header);
    }

    if !reader.is_empty() {
        return Err(Error::LengthMismatch { consumed: reader.position(), len: reader.len() });
    }
    Ok(headers)
}

fn read_chunk(
    reader: &mut BinaryReader,
    header: &KwdHeader,
    builder: &mut ModelBuilder,
    config: &LoadConfig,
    sink: &mut dyn DiagnosticSink,
) -> Result<()> {
    let kind = match header.kind() {
        Some(FileKind::Globals) | None => {
            report(sink, Diagnostic::NoReader { type_id: header.type_id });
            return reader.skip(header.data_size as usize);
        }
        Some(kind) => kind,
    };
    if config.verify_checksums || kind == FileKind::CreatureSpells {
        header.verify_checksums(kind)?;
    }

    info!(?kind, items = header.item_count, "loading chunk");
    match kind {
        FileKind::Level => builder.set_level(GameLevel::read(reader, header)?, sink),
        FileKind::Map => builder.read_map(reader, header, sink)?,
        FileKind::Terrain => builder.merge_terrain(Terrain::read_all(reader, sink, header)?, sink),
        FileKind::Rooms => builder.merge_rooms(Room::read_all(reader, sink, header)?, sink),
        FileKind::Traps => builder.merge_traps(Trap::read_all(reader, sink, header)?, sink),
        FileKind::Doors => builder.merge_doors(Door::read_all(reader, sink, header)?, sink),
        FileKind::KeeperSpells => {
            builder.merge_keeper_spells(KeeperSpell::read_all(reader, sink, header)?, sink)
        }
        FileKind::CreatureSpells => {
            builder.merge_creature_spells(CreatureSpell::read_all(reader, sink, header)?, sink)
        }
        FileKind::Creatures => builder.merge_creatures(Creature::read_all(reader, sink, header)?, sink),
        FileKind::Players => builder.merge_players(Player::read_all(reader, sink, header)?, sink),
        FileKind::Things => builder.add_things(read_things(reader, sink, header)?, sink),
        FileKind::Triggers => builder.merge_triggers(read_triggers(reader, sink, header)?, sink),
        FileKind::Variables => builder.merge_variables(read_variables(reader, header)?, sink),
        FileKind::Objects => builder.merge_objects(GameObject::read_all(reader, sink, header)?, sink),
        FileKind::EffectElements => {
            builder.merge_effect_elements(EffectElement::read_all(reader, sink, header)?, sink)
        }
        FileKind::Shots => builder.merge_shots(Shot::read_all(reader, sink, header)?, sink),
        FileKind::Effects => builder.merge_effects(Effect::read_all(reader, sink, header)?, sink),
        // Skipped above
        FileKind::Globals => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::creature::tests::creature_record;
    use crate::catalog::terrain::tests::write_terrain;
    use crate::catalog::{CreatureFlags, TerrainFlags};
    use crate::codec::testutil::{BinaryWriter, ChunkBuilder};
    use crate::level::info::tests::level_body;
    use crate::level::thing::tests::write_object_thing;
    use crate::level::variable::tests::write_variable;
    use crate::level::variable::CREATURE_POOL;
    use crate::level::Thing;
    use tempfile::TempDir;

    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        /// Writes the level file plus an empty globals file, so no editor
        /// catalogs are required
        fn new(paths: &[(FileKind, &str)]) -> Self {
            let dir = TempDir::new().unwrap();
            let mut table = vec![(FileKind::Globals, "Globals")];
            table.extend_from_slice(paths);
            let level = ChunkBuilder::level(table.len() as u16, 0).finish(&level_body("Test", &table, &[]));
            let fixture = Self { dir };
            fixture.write("Level.kwd", &level);
            fixture.write("Globals.kwd", &ChunkBuilder::catalog(FileKind::Shots, 0).finish(&[]));
            fixture
        }

        fn write(&self, name: &str, data: &[u8]) {
            let path = self.dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, data).unwrap();
        }

        fn loader_path(&self) -> (PathBuf, PathBuf) {
            (self.dir.path().to_path_buf(), self.dir.path().join("Level.kwd"))
        }

        fn load(&self) -> Result<KwdFile> {
            let (base, level) = self.loader_path();
            KwdLoader::new().load(base, level)
        }
    }

    fn map_chunk() -> Vec<u8> {
        ChunkBuilder::map(2, 1).finish(&[3, 0, 0, 0, 5, 1, 1, 0])
    }

    #[test]
    fn test_load_map_grid() {
        let fixture = Fixture::new(&[(FileKind::Map, "Map")]);
        fixture.write("Map.kwd", &map_chunk());

        let file = fixture.load().unwrap();
        assert_eq!(file.state(), LoadState::Loaded);
        let map = file.model().unwrap().map();
        assert_eq!((map.width(), map.height()), (2, 1));
        assert_eq!(map.tile(1, 0).unwrap().terrain_id, 5);
        assert_eq!(file.dimensions(), Some((2, 1)));
        // The globals file holds only an empty catalog
        assert!(file.diagnostics().is_empty());
    }

    #[test]
    fn test_load_terrain_and_things() {
        let fixture = Fixture::new(&[
            (FileKind::Terrain, "Data\\Terrain"),
            (FileKind::Map, "Map"),
            (FileKind::Things, "Things"),
        ]);
        fixture.write("Map.kwd", &map_chunk());

        let mut terrain = BinaryWriter::new();
        write_terrain(&mut terrain, 5, "Water", TerrainFlags::WATER);
        write_terrain(&mut terrain, 7, "Shallows", TerrainFlags::WATER);
        fixture.write(
            "Data/Terrain.kwd",
            &ChunkBuilder::catalog(FileKind::Terrain, 2).finish(terrain.as_slice()),
        );

        let mut things = BinaryWriter::new();
        write_object_thing(&mut things, 100, 200, 500);
        things.write_u32_le(999);
        things.write_u32_le(20);
        things.write_zeros(20);
        fixture.write("Things.kwd", &ChunkBuilder::catalog(FileKind::Things, 2).finish(things.as_slice()));

        let mut file = fixture.load().unwrap();
        let model = file.model().unwrap();
        assert_eq!(model.water_terrain().unwrap().terrain_id, 5);
        assert_eq!(model.things().len(), 1);
        match &model.things()[0] {
            Thing::Object(object) => {
                assert_eq!((object.pos_x, object.pos_y), (100, 200));
                assert_eq!(object.money_amount, 500);
            }
            other => panic!("unexpected thing {other:?}"),
        }
        let events = file.take_diagnostics();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Diagnostic::UnknownTag { tag: 999, .. }));
    }

    #[test]
    fn test_load_variables_and_creatures() {
        let fixture = Fixture::new(&[
            (FileKind::Map, "Map"),
            (FileKind::Variables, "Variables"),
            (FileKind::Creatures, "Creatures"),
        ]);
        fixture.write("Map.kwd", &map_chunk());

        let mut variables = BinaryWriter::new();
        write_variable(&mut variables, CREATURE_POOL, [12, 5, 0]);
        fixture.write("Variables.kwd", &ChunkBuilder::catalog(FileKind::Variables, 1).finish(variables.as_slice()));

        let creature = creature_record(14, "Imp", CreatureFlags::IS_WORKER | CreatureFlags::IS_EVIL, false);
        fixture.write("Creatures.kwd", &ChunkBuilder::catalog(FileKind::Creatures, 1).finish(&creature));

        let file = fixture.load().unwrap();
        let model = file.model().unwrap();
        let pool = model.variables().creature_pool(0).unwrap();
        assert_eq!(pool.get(&12).map(|p| p.value), Some(5));
        let imp = model.imp().unwrap();
        assert_eq!(imp.creature_id, 14);
        assert!(imp.extension.is_none());
    }

    #[test]
    fn test_load_is_idempotent() {
        let fixture = Fixture::new(&[(FileKind::Map, "Map")]);
        fixture.write("Map.kwd", &map_chunk());
        let mut file = fixture.load().unwrap();

        // Removing the companion proves the second call reads nothing
        fs::remove_file(fixture.dir.path().join("Map.kwd")).unwrap();
        file.load().unwrap();
        assert!(file.is_loaded());
        assert_eq!(file.model().unwrap().map().width(), 2);
    }

    #[test]
    fn test_failed_load_can_be_retried() {
        let fixture = Fixture::new(&[(FileKind::Map, "Map")]);
        let (base, level) = fixture.loader_path();
        let mut file = KwdLoader::new().open(base, level).unwrap();

        assert!(file.load().is_err());
        assert_eq!(file.state(), LoadState::HeaderOnly);
        assert!(file.model().is_none());

        fixture.write("Map.kwd", &map_chunk());
        file.load().unwrap();
        assert!(file.is_loaded());
    }

    #[test]
    fn test_dimensions_only() {
        let fixture = Fixture::new(&[(FileKind::Map, "Map"), (FileKind::Terrain, "Missing")]);
        fixture.write("Map.kwd", &map_chunk());
        let (base, level) = fixture.loader_path();

        let file = KwdLoader::new().full_load(false).load(base, level).unwrap();
        assert_eq!(file.state(), LoadState::DimensionsOnly);
        assert_eq!(file.dimensions(), Some((2, 1)));
        assert!(file.model().is_none());
        assert_eq!(file.level().name, "Test");
    }

    #[test]
    fn test_missing_file_names_path() {
        let fixture = Fixture::new(&[(FileKind::Map, "Map"), (FileKind::Terrain, "Missing")]);
        fixture.write("Map.kwd", &map_chunk());

        let err = fixture.load().unwrap_err();
        match &err {
            Error::File { path, .. } => assert!(path.ends_with("Missing.kwd")),
            other => panic!("unexpected error {other:?}"),
        }
        assert!(matches!(err.root(), Error::Io(_)));
    }

    #[test]
    fn test_case_insensitive_paths_and_editor_catalogs() {
        let dir = TempDir::new().unwrap();
        let level = ChunkBuilder::level(1, 0).finish(&level_body("Test", &[(FileKind::Map, "MAPS\\Map")], &[]));
        fs::write(dir.path().join("Level.kwd"), level).unwrap();
        fs::create_dir_all(dir.path().join("maps")).unwrap();
        fs::write(dir.path().join("maps/map.KWD"), map_chunk()).unwrap();
        fs::create_dir_all(dir.path().join("editor")).unwrap();
        fs::write(dir.path().join("editor/effects.kwd"), ChunkBuilder::catalog(FileKind::Effects, 0).finish(&[])).unwrap();
        fs::write(
            dir.path().join("editor/EffectElements.kwd"),
            ChunkBuilder::catalog(FileKind::EffectElements, 0).finish(&[]),
        )
        .unwrap();

        let file = KwdLoader::new()
            .editor_folder("Editor/")
            .load(dir.path(), dir.path().join("Level.kwd"))
            .unwrap();
        assert!(file.level().path(FileKind::Effects).is_some());
        assert_eq!(file.model().unwrap().map().width(), 2);
    }

    #[test]
    fn test_creature_spell_checksums_are_enforced() {
        let fixture = Fixture::new(&[(FileKind::Map, "Map"), (FileKind::CreatureSpells, "Spells")]);
        fixture.write("Map.kwd", &map_chunk());
        fixture.write(
            "Spells.kwd",
            &ChunkBuilder::catalog(FileKind::CreatureSpells, 0).checksums(161, 999).finish(&[]),
        );

        let err = fixture.load().unwrap_err();
        assert!(matches!(err.root(), Error::ChecksumMismatch { kind: FileKind::CreatureSpells, .. }));
    }

    #[test]
    fn test_verify_checksums_option() {
        let fixture = Fixture::new(&[(FileKind::Map, "Map")]);
        fixture.write("Map.kwd", &ChunkBuilder::map(2, 1).checksums(0, 0).finish(&[0; 8]));
        let (base, level) = fixture.loader_path();

        assert!(KwdLoader::new().load(&base, &level).is_ok());
        let err = KwdLoader::new().verify_checksums(true).load(&base, &level).unwrap_err();
        assert!(matches!(err.root(), Error::ChecksumMismatch { kind: FileKind::Map, .. }));
    }

    #[test]
    fn test_unknown_chunk_is_skipped() {
        let mut data = ChunkBuilder::raw(999, 0).finish(&[1, 2, 3, 4]);
        data.extend(map_chunk());
        let mut builder = ModelBuilder::new();
        let mut sink = EventCollector::new();
        read_chunks(&data, &mut builder, &LoadConfig::default(), &mut sink).unwrap();

        assert_eq!(sink.events(), &[Diagnostic::NoReader { type_id: 999 }]);
        assert!(builder.is_loaded(FileKind::Map));
    }

    #[test]
    fn test_trailing_bytes_are_fatal() {
        let mut data = map_chunk();
        data.extend_from_slice(&[0, 0, 0]);
        let mut builder = ModelBuilder::new();
        let err = read_chunks(&data, &mut builder, &LoadConfig::default(), &mut EventCollector::new()).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { len, .. } if len == data.len()));
    }

    #[test]
    fn test_read_headers() {
        let mut data = map_chunk();
        data.extend(ChunkBuilder::catalog(FileKind::Shots, 0).finish(&[]));
        let mut sink = EventCollector::new();
        let headers = read_headers(&data, &mut sink).unwrap();

        let kinds: Vec<_> = headers.iter().map(KwdHeader::kind).collect();
        assert_eq!(kinds, vec![Some(FileKind::Map), Some(FileKind::Shots)]);
        assert!(sink.is_empty());

        data.extend_from_slice(&[0; 15]);
        let err = read_headers(&data, &mut sink).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { len, .. } if len == data.len()));
    }
}
