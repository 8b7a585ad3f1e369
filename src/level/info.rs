use bitflags::bitflags;
use indexmap::IndexMap;
use serde::Serialize;

use crate::codec::{BinaryReader, FileKind, KwdHeader};
use crate::error::{Error, Result};

/// Expected value of the check word in front of the path table
const CHECK_THREE: u32 = 222;

/// Level chunks at least this large carry the speech and hero block
const BASE_DATA_SIZE: u32 = 25603;

const MESSAGE_COUNT: usize = 512;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct LevelFlags: u16 {
        const UNKNOWN = 0x0004;
        const ALWAYS_IMPRISON_ENEMIES = 0x0008;
        const ONE_SHOT_HORNY = 0x0010;
        const IS_SECRET_LEVEL = 0x0020;
        const IS_SPECIAL_LEVEL = 0x0040;
        const SHOW_HERO_KILLS = 0x0080;
        const AUTO_OBJECTIVE_BED = 0x0100;
        const HAS_PORTALS = 0x0200;
        const IS_SKIRMISH_LEVEL = 0x0400;
        const IS_MULTIPLAYER_LEVEL = 0x0800;
        const IS_MY_PET_DUNGEON_LEVEL = 0x1000;
    }
}

/// One entry of the companion file table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilePath {
    pub type_id: u32,
    pub unknown2: i32,
    /// Relative to the game base directory, `/` separated, always with an extension
    pub path: String,
}

impl FilePath {
    pub fn new(kind: FileKind, path: impl Into<String>) -> Self {
        Self { type_id: kind.id(), unknown2: 0, path: path.into() }
    }

    pub fn kind(&self) -> Option<FileKind> {
        FileKind::from_u32(self.type_id)
    }

    fn read(reader: &mut BinaryReader) -> Result<Self> {
        let type_id = reader.read_u32()?;
        let unknown2 = reader.read_i32()?;
        let path = normalize_path(&reader.read_string(64)?);
        Ok(Self { type_id, unknown2, path })
    }
}

/// Flips `\` separators and appends `.kwd` when the name has no 3 letter extension
pub fn normalize_path(raw: &str) -> String {
    let mut path = raw.replace('\\', "/");
    let has_extension = path.len() >= 4 && path.as_bytes()[path.len() - 4] == b'.';
    if !has_extension {
        path.push_str(".kwd");
    }
    path
}

/// Extra metadata of levels saved by newer editor versions
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SpeechInfo {
    pub one_shot_horny_level: u8,
    pub player_count: u8,
    pub speech_horny_id: u16,
    pub speech_prelevel_id: u16,
    pub speech_postlevel_win: u16,
    pub speech_postlevel_lost: u16,
    pub speech_postlevel_news: u16,
    pub speech_prelevel_general: u16,
    pub hero_name: String,
}

/// Level metadata and the table of companion files
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GameLevel {
    pub name: String,
    pub description: String,
    pub author: String,
    pub email: String,
    pub information: String,
    pub trigger_id: u16,
    pub ticks_per_sec: u16,
    #[serde(skip)]
    pub x01184: Vec<u8>,
    /// Non-empty editor messages, in slot order
    pub messages: Vec<String>,
    pub flags: LevelFlags,
    pub sound_category: String,
    pub talisman_pieces: u8,
    pub rewards_prev: Vec<u8>,
    pub rewards_next: Vec<u8>,
    pub sound_track: u8,
    pub text_table_id: u8,
    pub text_title_id: u16,
    pub text_plot_id: u16,
    pub text_debrief_id: u16,
    pub text_objective_id: u16,
    pub x063c3: u16,
    pub text_subobjective_ids: [u16; 3],
    pub special_level_index: u16,
    /// Creature id to introduction text id
    pub introduction_override_text_ids: IndexMap<u8, u16>,
    pub terrain_path: String,
    pub speech: Option<SpeechInfo>,
    pub content_size: u32,
    pub paths: Vec<FilePath>,
    pub unknown: Vec<u32>,
}

impl GameLevel {
    /// Reads the level chunk that follows `header`
    pub fn read(reader: &mut BinaryReader, header: &KwdHeader) -> Result<Self> {
        let mut name = reader.read_utf16_string(64)?;
        let stem_len = name.len().saturating_sub(4);
        if name.is_char_boundary(stem_len) && name[stem_len..].eq_ignore_ascii_case(".kwd") {
            name.truncate(stem_len);
        }

        let mut level = Self {
            name,
            description: reader.read_utf16_string(1024)?,
            author: reader.read_utf16_string(64)?,
            email: reader.read_utf16_string(64)?,
            information: reader.read_utf16_string(1024)?,
            trigger_id: reader.read_u16()?,
            ticks_per_sec: reader.read_u16()?,
            x01184: reader.read_bytes(520)?.to_vec(),
            ..Default::default()
        };

        for _ in 0..MESSAGE_COUNT {
            let message = reader.read_utf16_string(20)?;
            if !message.is_empty() {
                level.messages.push(message);
            }
        }

        level.flags = LevelFlags::from_bits_truncate(reader.read_u16()?);
        level.sound_category = reader.read_string(32)?;
        level.talisman_pieces = reader.read_u8()?;
        level.rewards_prev = reader.read_array::<4>()?.to_vec();
        level.rewards_next = reader.read_array::<4>()?.to_vec();
        level.sound_track = reader.read_u8()?;
        level.text_table_id = reader.read_u8()?;
        level.text_title_id = reader.read_u16()?;
        level.text_plot_id = reader.read_u16()?;
        level.text_debrief_id = reader.read_u16()?;
        level.text_objective_id = reader.read_u16()?;
        level.x063c3 = reader.read_u16()?;
        level.text_subobjective_ids = reader.read_u16_array()?;
        level.special_level_index = reader.read_u16()?;

        let creature_ids: [u8; 8] = reader.read_array()?;
        let text_ids: [u16; 8] = reader.read_u16_array()?;
        level.introduction_override_text_ids = creature_ids
            .into_iter()
            .zip(text_ids)
            .filter(|&(creature_id, _)| creature_id > 0)
            .collect();

        level.terrain_path = reader.read_string(32)?;

        // Some very old files end the metadata here
        if header.data_size > BASE_DATA_SIZE {
            let one_shot_horny_level = reader.read_u8()?;
            let player_count = reader.read_u8()?;
            level.rewards_prev.push(reader.read_u8()?);
            level.rewards_next.push(reader.read_u8()?);
            level.speech = Some(SpeechInfo {
                one_shot_horny_level,
                player_count,
                speech_horny_id: reader.read_u16()?,
                speech_prelevel_id: reader.read_u16()?,
                speech_postlevel_win: reader.read_u16()?,
                speech_postlevel_lost: reader.read_u16()?,
                speech_postlevel_news: reader.read_u16()?,
                speech_prelevel_general: reader.read_u16()?,
                hero_name: reader.read_utf16_string(32)?,
            });
        }

        let check_three = reader.read_u32()?;
        if check_three != CHECK_THREE {
            return Err(Error::Corrupted {
                kind: FileKind::Level,
                reason: format!("check word is {check_three}, expected {CHECK_THREE}"),
            });
        }
        level.content_size = reader.read_u32()?;

        level.paths = (0..header.item_count)
            .map(|_| FilePath::read(reader))
            .collect::<Result<_>>()?;

        level.unknown = (0..header.height)
            .map(|_| reader.read_u32())
            .collect::<Result<_>>()?;

        Ok(level)
    }

    /// Levels with a globals entry override the effect catalogs themselves
    pub fn has_custom_overrides(&self) -> bool {
        self.paths.iter().any(|p| p.kind() == Some(FileKind::Globals))
    }

    /// Adds the editor effect catalogs that normal levels do not list
    pub fn add_default_paths(&mut self, editor_folder: &str) {
        if self.has_custom_overrides() {
            return;
        }
        for (kind, file) in [
            (FileKind::Effects, "Effects.kwd"),
            (FileKind::EffectElements, "EffectElements.kwd"),
        ] {
            let path = FilePath::new(kind, format!("{editor_folder}{file}"));
            if !self.paths.contains(&path) {
                self.paths.push(path);
            }
        }
    }

    /// First path registered for `kind`
    pub fn path(&self, kind: FileKind) -> Option<&FilePath> {
        self.paths.iter().find(|p| p.kind() == Some(kind))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::codec::testutil::{BinaryWriter, ChunkBuilder};
    use crate::diagnostics::EventCollector;

    /// Writes a complete level chunk body with the speech block
    pub(crate) fn level_body(name: &str, paths: &[(FileKind, &str)], trailing: &[u32]) -> Vec<u8> {
        let mut w = BinaryWriter::new();
        w.write_utf16(name, 64);
        w.write_utf16("A test level", 1024);
        w.write_utf16("Author", 64);
        w.write_utf16("", 64);
        w.write_utf16("", 1024);
        w.write_u16_le(7);
        w.write_u16_le(4);
        w.write_zeros(520);
        w.write_utf16("Hello", 20);
        w.write_zeros(511 * 40);
        w.write_u16_le(LevelFlags::HAS_PORTALS.bits());
        w.write_string("Music", 32);
        w.write_u8(3);
        w.write_bytes(&[1, 0, 0, 0]);
        w.write_bytes(&[2, 0, 0, 0]);
        w.write_u8(9);
        w.write_u8(1);
        w.write_zeros(9 * 2);
        w.write_bytes(&[12, 0, 0, 0, 0, 0, 0, 0]);
        w.write_u16_le(900);
        w.write_zeros(7 * 2);
        w.write_string("Terrain", 32);
        w.write_u8(1);
        w.write_u8(2);
        w.write_u8(5);
        w.write_u8(6);
        w.write_zeros(6 * 2);
        w.write_utf16("Horny", 32);
        w.write_u32_le(CHECK_THREE);
        w.write_u32_le(0);
        for (kind, path) in paths {
            w.write_u32_le(kind.id());
            w.write_i32_le(0);
            w.write_string(path, 64);
        }
        for word in trailing {
            w.write_u32_le(*word);
        }
        w.into_vec()
    }

    fn read_level(data: &[u8]) -> Result<GameLevel> {
        let mut reader = BinaryReader::new(data);
        let mut sink = EventCollector::new();
        let header = KwdHeader::read(&mut reader, &mut sink)?;
        let level = GameLevel::read(&mut reader, &header)?;
        assert!(reader.is_empty());
        Ok(level)
    }

    #[test]
    fn test_read_level_info() {
        let body = level_body(
            "Level1.kwd",
            &[(FileKind::Map, "Levels\\Level1Map"), (FileKind::Terrain, "Data\\editor\\Terrain.kwd")],
            &[11, 12],
        );
        let data = ChunkBuilder::level(2, 2).finish(&body);
        let level = read_level(&data).unwrap();

        assert_eq!(level.name, "Level1");
        assert_eq!(level.description, "A test level");
        assert_eq!(level.trigger_id, 7);
        assert_eq!(level.messages, vec!["Hello".to_string()]);
        assert!(level.flags.contains(LevelFlags::HAS_PORTALS));
        assert_eq!(level.rewards_prev, vec![1, 0, 0, 0, 5]);
        assert_eq!(level.rewards_next, vec![2, 0, 0, 0, 6]);
        assert_eq!(level.introduction_override_text_ids.get(&12), Some(&900));
        assert_eq!(level.introduction_override_text_ids.len(), 1);
        assert_eq!(level.terrain_path, "Terrain");
        assert_eq!(level.speech.as_ref().unwrap().hero_name, "Horny");
        assert_eq!(level.paths[0].path, "Levels/Level1Map.kwd");
        assert_eq!(level.paths[1].path, "Data/editor/Terrain.kwd");
        assert_eq!(level.unknown, vec![11, 12]);
    }

    #[test]
    fn test_bad_check_three_is_fatal() {
        let mut body = level_body("Broken", &[], &[]);
        let check_at = body.len() - 8;
        body[check_at] = 0;
        let data = ChunkBuilder::level(0, 0).finish(&body);
        assert!(matches!(
            read_level(&data),
            Err(Error::Corrupted { kind: FileKind::Level, .. })
        ));
    }

    #[test]
    fn test_default_paths() {
        let mut level = GameLevel::default();
        level.paths.push(FilePath::new(FileKind::Map, "Levels/A.kwd"));
        level.add_default_paths("Data/editor/");
        level.add_default_paths("Data/editor/");

        assert_eq!(level.paths.len(), 3);
        assert_eq!(level.path(FileKind::Effects).unwrap().path, "Data/editor/Effects.kwd");
        assert_eq!(
            level.path(FileKind::EffectElements).unwrap().path,
            "Data/editor/EffectElements.kwd"
        );

        let mut custom = GameLevel::default();
        custom.paths.push(FilePath::new(FileKind::Globals, "Levels/Globals.kwd"));
        custom.add_default_paths("Data/editor/");
        assert_eq!(custom.paths.len(), 1);
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("Data\\editor\\Terrain"), "Data/editor/Terrain.kwd");
        assert_eq!(normalize_path("Levels/Map.kld"), "Levels/Map.kld");
        assert_eq!(normalize_path("ab"), "ab.kwd");
    }
}
