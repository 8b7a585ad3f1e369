//! KWD level decoder
//!
//! Reads the chunked binary level and catalog files of the game editor
//! (`*.kwd`) and merges them into one cross-referenced [`LevelModel`].
//!
//! ```no_run
//! use kwd_decoder::KwdLoader;
//!
//! let file = KwdLoader::new().load("game/", "game/Data/editor/maps/Level1.kwd")?;
//! if let Some(model) = file.model() {
//!     println!("{} things", model.things().len());
//! }
//! # Ok::<(), kwd_decoder::Error>(())
//! ```

pub mod catalog;
pub mod codec;
pub mod diagnostics;
pub mod error;
pub mod level;
pub mod loader;
pub mod model;

pub use catalog::{
    BridgeTerrainType, CatalogEntry, Creature, CreatureSpell, Door, Effect, EffectElement, GameMap,
    GameObject, KeeperSpell, Player, Room, Shot, Terrain, Tile, Trap,
};
pub use codec::{BinaryReader, FileKind, KwdHeader};
pub use diagnostics::{Diagnostic, DiagnosticSink, EventCollector, TagContext, TracingSink};
pub use error::{Error, Result};
pub use level::{GameLevel, Thing, Trigger, TriggerKind, Variables};
pub use loader::{KwdFile, KwdLoader, LoadConfig, LoadState};
pub use model::{LevelModel, ModelBuilder};
