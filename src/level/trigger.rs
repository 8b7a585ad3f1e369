//! Trigger graph records.
//!
//! Two record families share one chunk: conditions ("generic" triggers) and
//! actions. The inner type byte sits two bytes before the end of each record,
//! so it is peeked first and the 8-byte payload decoded afterwards. Every
//! record ends with the id, sibling id and child id that link the graph.

use crate::codec::{check_padding, realign, BinaryReader, KwdHeader};
use crate::diagnostics::{report, Diagnostic, DiagnosticSink, TagContext};
use crate::error::Result;

pub const TRIGGER_GENERIC: u32 = 213;
pub const TRIGGER_ACTION: u32 = 214;

/// Bytes of the type specific payload at the start of every record
const PAYLOAD_SIZE: usize = 8;

/// What a condition trigger watches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TargetType {
    None = 0,
    Flag,
    Timer,
    CreatureCreated,
    CreatureKilled,
    CreatureSlapped,
    CreatureAttacked,
    CreatureImprisoned,
    CreatureTortured,
    CreatureConverted,
    CreatureClaimed,
    CreatureAngry,
    CreatureAfraid,
    CreatureSteals,
    CreatureLeaves,
    CreatureStunned,
    CreatureDying,
    PlayerCreatures,
    PlayerHappyCreatures,
    PlayerAngryCreatures,
    PlayerCreaturesKilled,
    PlayerKillsCreatures,
    PlayerRoomSlabs,
    PlayerRooms,
    PlayerRoomSize,
    PlayerDoors,
    PlayerTraps,
    PlayerKeeperSpell,
    PlayerGold,
    PlayerGoldMined,
    PlayerMana,
    PlayerDestroys,
    LevelTime,
    LevelCreatures,
    LevelPayDay,
    ApCongregateIn,
    ApClaimPartOf,
    ApClaimAllOf,
    ApSlabTypes,
    ApTagPartOf,
    ApTagAllOf,
    ApPossessedCreatureEnters,
    PartyCreated,
    PartyMembersKilled,
    PartyMembersCaptured,
    PartyMembersIncapacitated,
    CreatureHealth,
    CreatureGoldHeld,
    CreatureExperienceLevel,
    CreatureHungerSated,
    CreaturePicksUpPortalGem,
    CreatureSacked,
    CreaturePickedUp,
    PlayerCreaturesGrouped,
    PlayerCreaturesDying,
    PlayerDungeonBreached,
    PlayerEnemyBreached,
    PlayerCreaturePickedUp,
    PlayerCreatureDropped,
    PlayerCreatureSlapped,
    PlayerCreatureSacked,
    PlayerRoomFurniture,
    PlayerSlaps,
    PlayerKilled,
    PlayerCreaturesAtLevel,
    LevelPlayed,
    GuiButtonPressed,
    GuiTransitionEnds,
}

impl TargetType {
    const ALL: [Self; 68] = {
        use TargetType::*;
        [
            None, Flag, Timer, CreatureCreated, CreatureKilled, CreatureSlapped, CreatureAttacked,
            CreatureImprisoned, CreatureTortured, CreatureConverted, CreatureClaimed, CreatureAngry,
            CreatureAfraid, CreatureSteals, CreatureLeaves, CreatureStunned, CreatureDying,
            PlayerCreatures, PlayerHappyCreatures, PlayerAngryCreatures, PlayerCreaturesKilled,
            PlayerKillsCreatures, PlayerRoomSlabs, PlayerRooms, PlayerRoomSize, PlayerDoors,
            PlayerTraps, PlayerKeeperSpell, PlayerGold, PlayerGoldMined, PlayerMana, PlayerDestroys,
            LevelTime, LevelCreatures, LevelPayDay, ApCongregateIn, ApClaimPartOf, ApClaimAllOf,
            ApSlabTypes, ApTagPartOf, ApTagAllOf, ApPossessedCreatureEnters, PartyCreated,
            PartyMembersKilled, PartyMembersCaptured, PartyMembersIncapacitated, CreatureHealth,
            CreatureGoldHeld, CreatureExperienceLevel, CreatureHungerSated, CreaturePicksUpPortalGem,
            CreatureSacked, CreaturePickedUp, PlayerCreaturesGrouped, PlayerCreaturesDying,
            PlayerDungeonBreached, PlayerEnemyBreached, PlayerCreaturePickedUp,
            PlayerCreatureDropped, PlayerCreatureSlapped, PlayerCreatureSacked,
            PlayerRoomFurniture, PlayerSlaps, PlayerKilled, PlayerCreaturesAtLevel, LevelPlayed,
            GuiButtonPressed, GuiTransitionEnds,
        ]
    };

    pub fn from_u8(v: u8) -> Option<Self> {
        Self::ALL.get(v as usize).copied()
    }
}

/// What an action trigger does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ActionType {
    None = 0,
    CreateCreature,
    DisplayObjective,
    Make,
    Flag,
    InitializeTimer,
    FlashButton,
    WinGame,
    LoseGame,
    CreateHeroParty,
    SetObjective,
    FlashActionPoint,
    RevealActionPoint,
    SetAlliance,
    AttachPortalGem,
    AlterTerrainType,
    PlaySpeech,
    DisplayTextString,
    ZoomToActionPoint,
    RotateAroundActionPoint,
    GenerateCreature,
    ShowHealthFlower,
    FollowCameraPath,
    CollapseHeroGate,
    SetPortalStatus,
    SetWidescreenMode,
    MakeObjective,
    ZoomTo,
    SetCreatureMoods,
    SetSystemMessages,
    DisplaySlabOwner,
    DisplayNextRoomType,
    ToggleEffectGenerator,
    ChangeRoomOwner,
    SetSlapsLimit,
    SetTimerSpeech,
    RemoveFromMap,
    SetMusicLevel,
    AlterSpeed,
    SetFightFlag,
    ForceFirstPerson,
    Information,
    SendToActionPoint,
    CreatePortalGem,
    SetTimeLimit,
    MakeHungry,
    WinSubobjective,
    LoseSubobjective,
}

impl ActionType {
    const ALL: [Self; 48] = {
        use ActionType::*;
        [
            None, CreateCreature, DisplayObjective, Make, Flag, InitializeTimer, FlashButton,
            WinGame, LoseGame, CreateHeroParty, SetObjective, FlashActionPoint, RevealActionPoint,
            SetAlliance, AttachPortalGem, AlterTerrainType, PlaySpeech, DisplayTextString,
            ZoomToActionPoint, RotateAroundActionPoint, GenerateCreature, ShowHealthFlower,
            FollowCameraPath, CollapseHeroGate, SetPortalStatus, SetWidescreenMode, MakeObjective,
            ZoomTo, SetCreatureMoods, SetSystemMessages, DisplaySlabOwner, DisplayNextRoomType,
            ToggleEffectGenerator, ChangeRoomOwner, SetSlapsLimit, SetTimerSpeech, RemoveFromMap,
            SetMusicLevel, AlterSpeed, SetFightFlag, ForceFirstPerson, Information,
            SendToActionPoint, CreatePortalGem, SetTimeLimit, MakeHungry, WinSubobjective,
            LoseSubobjective,
        ]
    };

    pub fn from_u8(v: u8) -> Option<Self> {
        Self::ALL.get(v as usize).copied()
    }
}

/// Comparison operator of value conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonType {
    None = 0,
    LessThan = 1,
    LessOrEqualTo = 2,
    EqualTo = 3,
    GreaterThan = 4,
    GreaterOrEqualTo = 5,
    NotEqualTo = 6,
}

impl ComparisonType {
    pub fn from_u8(v: u8) -> Option<Self> {
        Some(match v {
            0 => Self::None,
            1 => Self::LessThan,
            2 => Self::LessOrEqualTo,
            3 => Self::EqualTo,
            4 => Self::GreaterThan,
            5 => Self::GreaterOrEqualTo,
            6 => Self::NotEqualTo,
            _ => return None,
        })
    }
}

/// Payload of a condition trigger, grouped by byte layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Creature or object entering an action point
    ActionPointTarget {
        comparison: Option<ComparisonType>,
        player_id: u8,
        target_id: u8,
        /// 3 = creature, 6 = object
        target_type: u8,
        value: u32,
    },
    ActionPointSlabs {
        comparison: Option<ComparisonType>,
        player_id: u8,
        terrain_id: u8,
        value: u32,
    },
    /// Tagged or claimed share of an action point
    ActionPointArea {
        comparison: Option<ComparisonType>,
        player_id: u8,
        value: u32,
    },
    /// 0 means any player
    Player { player_id: u8 },
    PlayerKilled { player_id: u8, value: u32 },
    /// 0 means any creature
    PlayerCreature { creature_id: u8 },
    PlayerCreatureDropped { creature_id: u8, room_id: u8 },
    /// Player statistic compared against a value (`flag & 1`) or another player
    PlayerValue {
        comparison: Option<ComparisonType>,
        target_id: u8,
        flag: u8,
        player_id: u8,
        value: u32,
    },
    /// Flag or timer compared against a value (`flag & 1`) or another flag
    FlagValue {
        comparison: Option<ComparisonType>,
        target_id: u8,
        flag: u8,
        other_id: u8,
        value: u32,
    },
    Event,
    CreatureCreated { value: u32 },
    Value {
        comparison: Option<ComparisonType>,
        value: u32,
    },
    PartyMembers {
        comparison: Option<ComparisonType>,
        unknown: u8,
        value: u32,
    },
    GuiButton {
        /// 0 misc, 1 room, 2 creature, 3 door, 4 trap, 5 keeper spell
        target_type: u8,
        target_id: u8,
        value: u32,
    },
    Unsupported,
}

fn read_comparison(reader: &mut BinaryReader) -> Result<Option<ComparisonType>> {
    Ok(ComparisonType::from_u8(reader.read_u8()?))
}

impl Condition {
    /// Reads the 8-byte payload for `target`
    fn read(reader: &mut BinaryReader, sink: &mut dyn DiagnosticSink, target: TargetType) -> Result<Self> {
        use TargetType as T;

        let condition = match target {
            T::ApCongregateIn | T::ApPossessedCreatureEnters => Self::ActionPointTarget {
                comparison: read_comparison(reader)?,
                player_id: reader.read_u8()?,
                target_id: reader.read_u8()?,
                target_type: reader.read_u8()?,
                value: reader.read_u32()?,
            },
            T::ApSlabTypes => {
                let comparison = read_comparison(reader)?;
                let player_id = reader.read_u8()?;
                let terrain_id = reader.read_u8()?;
                check_padding(reader, sink, 1)?;
                Self::ActionPointSlabs { comparison, player_id, terrain_id, value: reader.read_u32()? }
            }
            T::ApTagPartOf | T::ApTagAllOf | T::ApClaimPartOf | T::ApClaimAllOf => {
                let comparison = read_comparison(reader)?;
                let player_id = reader.read_u8()?;
                check_padding(reader, sink, 2)?;
                Self::ActionPointArea { comparison, player_id, value: reader.read_u32()? }
            }
            T::PlayerDungeonBreached | T::PlayerEnemyBreached => {
                let player_id = reader.read_u8()?;
                check_padding(reader, sink, 7)?;
                Self::Player { player_id }
            }
            T::PlayerKilled => {
                let player_id = reader.read_u8()?;
                check_padding(reader, sink, 3)?;
                Self::PlayerKilled { player_id, value: reader.read_u32()? }
            }
            T::PlayerCreaturePickedUp | T::PlayerCreatureSlapped | T::PlayerCreatureSacked => {
                let creature_id = reader.read_u8()?;
                check_padding(reader, sink, 7)?;
                Self::PlayerCreature { creature_id }
            }
            T::PlayerCreatureDropped => {
                let creature_id = reader.read_u8()?;
                let room_id = reader.read_u8()?;
                check_padding(reader, sink, 6)?;
                Self::PlayerCreatureDropped { creature_id, room_id }
            }
            T::PlayerCreatures
            | T::PlayerHappyCreatures
            | T::PlayerAngryCreatures
            | T::PlayerCreaturesKilled
            | T::PlayerKillsCreatures
            | T::PlayerRooms
            | T::PlayerRoomSlabs
            | T::PlayerRoomSize
            | T::PlayerRoomFurniture
            | T::PlayerDoors
            | T::PlayerTraps
            | T::PlayerKeeperSpell
            | T::PlayerDestroys
            | T::PlayerCreaturesAtLevel => Self::PlayerValue {
                comparison: read_comparison(reader)?,
                target_id: reader.read_u8()?,
                flag: reader.read_u8()?,
                player_id: reader.read_u8()?,
                value: reader.read_u32()?,
            },
            T::PlayerSlaps
            | T::PlayerGold
            | T::PlayerGoldMined
            | T::PlayerMana
            | T::PlayerCreaturesGrouped
            | T::PlayerCreaturesDying => {
                let comparison = read_comparison(reader)?;
                check_padding(reader, sink, 1)?;
                Self::PlayerValue {
                    comparison,
                    target_id: 0,
                    flag: reader.read_u8()?,
                    player_id: reader.read_u8()?,
                    value: reader.read_u32()?,
                }
            }
            T::Flag | T::Timer => Self::FlagValue {
                comparison: read_comparison(reader)?,
                target_id: reader.read_u8()?,
                flag: reader.read_u8()?,
                other_id: reader.read_u8()?,
                value: reader.read_u32()?,
            },
            T::LevelPayDay
            | T::CreatureKilled
            | T::CreatureSlapped
            | T::CreatureAttacked
            | T::CreatureImprisoned
            | T::CreatureTortured
            | T::CreatureConverted
            | T::CreatureClaimed
            | T::CreatureAngry
            | T::CreatureAfraid
            | T::CreatureSteals
            | T::CreatureLeaves
            | T::CreatureStunned
            | T::CreatureDying
            | T::GuiTransitionEnds
            | T::CreaturePickedUp
            | T::CreatureSacked
            | T::CreaturePicksUpPortalGem
            | T::CreatureHungerSated
            | T::PartyCreated => {
                check_padding(reader, sink, PAYLOAD_SIZE)?;
                Self::Event
            }
            T::CreatureCreated => {
                check_padding(reader, sink, 4)?;
                Self::CreatureCreated { value: reader.read_u32()? }
            }
            T::LevelPlayed
            | T::PartyMembersCaptured
            | T::CreatureExperienceLevel
            | T::CreatureGoldHeld
            | T::CreatureHealth
            | T::LevelTime
            | T::LevelCreatures => {
                let comparison = read_comparison(reader)?;
                check_padding(reader, sink, 3)?;
                Self::Value { comparison, value: reader.read_u32()? }
            }
            T::PartyMembersKilled | T::PartyMembersIncapacitated => {
                let comparison = read_comparison(reader)?;
                let unknown = reader.read_u8()?;
                check_padding(reader, sink, 2)?;
                Self::PartyMembers { comparison, unknown, value: reader.read_u32()? }
            }
            T::GuiButtonPressed => {
                let target_type = reader.read_u8()?;
                let target_id = reader.read_u8()?;
                check_padding(reader, sink, 2)?;
                Self::GuiButton { target_type, target_id, value: reader.read_u32()? }
            }
            T::None => {
                check_padding(reader, sink, PAYLOAD_SIZE)?;
                Self::Unsupported
            }
        };
        Ok(condition)
    }
}

/// Payload of an action trigger, grouped by byte layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AlterTerrain { terrain_id: u8, player_id: u8, x: u16, y: u16 },
    CollapseHeroGate { x: u16, y: u16 },
    ChangeRoomOwner { player_id: u8, x: u16, y: u16 },
    /// `available` 0 creates the alliance, anything else breaks it
    SetAlliance { player_one_id: u8, player_two_id: u8, available: u8 },
    /// On/off switch (0 = off)
    Toggle { available: u8 },
    /// Timer id + 1; 16 is the level time limit
    Timer { timer_id: u8, value: u32 },
    /// `flag` is 12 for set, 20 for add and 36 for subtract
    Flag { flag_id: u8, flag: u8, value: u32 },
    Make { player_id: u8, make_type: u8, target_id: u8, available: u8 },
    Target { target_id: u8 },
    TextAtActionPoint { text_id: u32, action_point_id: u8 },
    PlaySpeech { speech_id: u32, text: u8, introduction: u8, path_id: u16 },
    Value { value: u32 },
    Event,
    FollowCameraPath { path_id: u8, action_point_id: u8, available: u8 },
    FlashButton { make_type: u8, target_id: u8, available: u8, value: u32 },
    FlashActionPoint { action_point_id: u8, available: u8, value: u32 },
    RevealActionPoint { action_point_id: u8, available: u8 },
    RotateAroundActionPoint { action_point_id: u8, available: u8, angle: u16, time: u32 },
    CreateCreature { creature_id: u8, player_id: u8, level: u8, flag: u8, x: u16, y: u16 },
    SetObjective { player_id: u8, job_type: u8, action_point_id: u32 },
    CreateHeroParty { party_id: u8, kind: u8, action_point_id: u8 },
    ToggleEffectGenerator { generator_id: u8, available: u8 },
    GenerateCreature { creature_id: u8, level: u8 },
    SendToActionPoint { action_point_id: u8 },
    CreatePortalGem { object_id: u8, player_id: u8, x: u16, y: u16 },
    Unsupported,
}

impl Action {
    /// Reads the 8-byte payload for `action`
    fn read(reader: &mut BinaryReader, sink: &mut dyn DiagnosticSink, action: ActionType) -> Result<Self> {
        use ActionType as A;

        let parsed = match action {
            A::AlterTerrainType => {
                let terrain_id = reader.read_u8()?;
                let player_id = reader.read_u8()?;
                check_padding(reader, sink, 2)?;
                Self::AlterTerrain { terrain_id, player_id, x: reader.read_u16()?, y: reader.read_u16()? }
            }
            A::CollapseHeroGate => {
                check_padding(reader, sink, 4)?;
                Self::CollapseHeroGate { x: reader.read_u16()?, y: reader.read_u16()? }
            }
            A::ChangeRoomOwner => {
                check_padding(reader, sink, 1)?;
                let player_id = reader.read_u8()?;
                check_padding(reader, sink, 2)?;
                Self::ChangeRoomOwner { player_id, x: reader.read_u16()?, y: reader.read_u16()? }
            }
            A::SetAlliance => {
                let player_one_id = reader.read_u8()?;
                let player_two_id = reader.read_u8()?;
                let available = reader.read_u8()?;
                check_padding(reader, sink, 5)?;
                Self::SetAlliance { player_one_id, player_two_id, available }
            }
            A::SetCreatureMoods
            | A::SetSystemMessages
            | A::SetTimerSpeech
            | A::SetWidescreenMode
            | A::AlterSpeed
            | A::SetFightFlag
            | A::SetPortalStatus
            | A::DisplaySlabOwner => {
                let available = reader.read_u8()?;
                check_padding(reader, sink, 7)?;
                Self::Toggle { available }
            }
            A::SetSlapsLimit => {
                check_padding(reader, sink, 4)?;
                Self::Value { value: reader.read_u32()? }
            }
            A::InitializeTimer | A::SetTimeLimit => {
                let timer_id = reader.read_u8()?;
                check_padding(reader, sink, 3)?;
                Self::Timer { timer_id, value: reader.read_u32()? }
            }
            A::Flag => {
                let flag_id = reader.read_u8()?;
                let flag = reader.read_u8()?;
                check_padding(reader, sink, 2)?;
                Self::Flag { flag_id, flag, value: reader.read_u32()? }
            }
            A::Make => {
                let make = Self::Make {
                    player_id: reader.read_u8()?,
                    make_type: reader.read_u8()?,
                    target_id: reader.read_u8()?,
                    available: reader.read_u8()?,
                };
                check_padding(reader, sink, 4)?;
                make
            }
            A::DisplayNextRoomType | A::MakeObjective | A::ZoomToActionPoint => {
                let target_id = reader.read_u8()?;
                check_padding(reader, sink, 7)?;
                Self::Target { target_id }
            }
            A::DisplayObjective | A::Information => {
                let text_id = reader.read_u32()?;
                let action_point_id = reader.read_u8()?;
                check_padding(reader, sink, 3)?;
                Self::TextAtActionPoint { text_id, action_point_id }
            }
            A::PlaySpeech => Self::PlaySpeech {
                speech_id: reader.read_u32()?,
                text: reader.read_u8()?,
                introduction: reader.read_u8()?,
                path_id: reader.read_u16()?,
            },
            A::DisplayTextString | A::SetMusicLevel | A::ShowHealthFlower => {
                let value = reader.read_u32()?;
                check_padding(reader, sink, 4)?;
                Self::Value { value }
            }
            A::AttachPortalGem
            | A::MakeHungry
            | A::RemoveFromMap
            | A::ZoomTo
            | A::WinGame
            | A::LoseGame
            | A::ForceFirstPerson
            | A::LoseSubobjective
            | A::WinSubobjective => {
                check_padding(reader, sink, PAYLOAD_SIZE)?;
                Self::Event
            }
            A::FollowCameraPath => {
                let path_id = reader.read_u8()?;
                let action_point_id = reader.read_u8()?;
                let available = reader.read_u8()?;
                check_padding(reader, sink, 5)?;
                Self::FollowCameraPath { path_id, action_point_id, available }
            }
            A::FlashButton => {
                let make_type = reader.read_u8()?;
                let target_id = reader.read_u8()?;
                let available = reader.read_u8()?;
                check_padding(reader, sink, 1)?;
                Self::FlashButton { make_type, target_id, available, value: reader.read_u32()? }
            }
            A::FlashActionPoint => {
                let action_point_id = reader.read_u8()?;
                let available = reader.read_u8()?;
                check_padding(reader, sink, 2)?;
                Self::FlashActionPoint { action_point_id, available, value: reader.read_u32()? }
            }
            A::RevealActionPoint => {
                let action_point_id = reader.read_u8()?;
                let available = reader.read_u8()?;
                check_padding(reader, sink, 6)?;
                Self::RevealActionPoint { action_point_id, available }
            }
            A::RotateAroundActionPoint => Self::RotateAroundActionPoint {
                action_point_id: reader.read_u8()?,
                available: reader.read_u8()?,
                angle: reader.read_u16()?,
                time: reader.read_u32()?,
            },
            A::CreateCreature => Self::CreateCreature {
                creature_id: reader.read_u8()?,
                player_id: reader.read_u8()?,
                level: reader.read_u8()?,
                flag: reader.read_u8()?,
                x: reader.read_u16()?,
                y: reader.read_u16()?,
            },
            A::SetObjective => {
                let player_id = reader.read_u8()?;
                let job_type = reader.read_u8()?;
                check_padding(reader, sink, 2)?;
                Self::SetObjective { player_id, job_type, action_point_id: reader.read_u32()? }
            }
            A::CreateHeroParty => {
                let party_id = reader.read_u8()?;
                let kind = reader.read_u8()?;
                check_padding(reader, sink, 2)?;
                let action_point_id = reader.read_u8()?;
                check_padding(reader, sink, 3)?;
                Self::CreateHeroParty { party_id, kind, action_point_id }
            }
            A::ToggleEffectGenerator => {
                let generator_id = reader.read_u8()?;
                let available = reader.read_u8()?;
                check_padding(reader, sink, 6)?;
                Self::ToggleEffectGenerator { generator_id, available }
            }
            A::GenerateCreature => {
                let creature_id = reader.read_u8()?;
                let level = reader.read_u8()?;
                check_padding(reader, sink, 6)?;
                Self::GenerateCreature { creature_id, level }
            }
            A::SendToActionPoint => {
                check_padding(reader, sink, 4)?;
                let action_point_id = reader.read_u8()?;
                check_padding(reader, sink, 3)?;
                Self::SendToActionPoint { action_point_id }
            }
            A::CreatePortalGem => {
                let object_id = reader.read_u8()?;
                let player_id = reader.read_u8()?;
                check_padding(reader, sink, 2)?;
                Self::CreatePortalGem { object_id, player_id, x: reader.read_u16()?, y: reader.read_u16()? }
            }
            A::None => {
                check_padding(reader, sink, PAYLOAD_SIZE)?;
                Self::Unsupported
            }
        };
        Ok(parsed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerKind {
    Generic {
        /// Raw inner type, see [`TargetType`]
        target_type: u8,
        condition: Condition,
    },
    Action {
        /// Raw inner type, see [`ActionType`]
        action_type: u8,
        action: Action,
    },
}

/// A node of the trigger graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub id: u16,
    /// Next sibling, 0 for none
    pub id_next: u16,
    /// First child, 0 for none
    pub id_child: u16,
    pub repeat_times: u8,
    pub kind: TriggerKind,
}

impl Trigger {
    pub fn is_action(&self) -> bool {
        matches!(self.kind, TriggerKind::Action { .. })
    }

    pub fn target(&self) -> Option<TargetType> {
        match self.kind {
            TriggerKind::Generic { target_type, .. } => TargetType::from_u8(target_type),
            TriggerKind::Action { .. } => None,
        }
    }

    pub fn action(&self) -> Option<ActionType> {
        match self.kind {
            TriggerKind::Action { action_type, .. } => ActionType::from_u8(action_type),
            TriggerKind::Generic { .. } => None,
        }
    }

    /// Reads one record of `family` whose payload starts at the cursor
    fn read(
        reader: &mut BinaryReader,
        sink: &mut dyn DiagnosticSink,
        family: u32,
        len: usize,
    ) -> Result<Self> {
        let start = reader.position();
        let type_pos = (start + len).saturating_sub(2);
        let (inner_type, repeat_times) =
            reader.peek_at(type_pos, |r| Ok((r.read_u8()?, r.read_u8()?)))?;

        let kind = if family == TRIGGER_GENERIC {
            let condition = match TargetType::from_u8(inner_type) {
                Some(target) => Condition::read(reader, sink, target)?,
                None => {
                    skip_unsupported(reader, sink, TagContext::TriggerCondition, inner_type, start)?;
                    Condition::Unsupported
                }
            };
            TriggerKind::Generic { target_type: inner_type, condition }
        } else {
            let action = match ActionType::from_u8(inner_type) {
                Some(action) => Action::read(reader, sink, action)?,
                None => {
                    skip_unsupported(reader, sink, TagContext::TriggerAction, inner_type, start)?;
                    Action::Unsupported
                }
            };
            TriggerKind::Action { action_type: inner_type, action }
        };

        let id = reader.read_u16()?;
        let id_next = reader.read_u16()?;
        let id_child = reader.read_u16()?;
        reader.skip(2)?;

        Ok(Self { id, id_next, id_child, repeat_times, kind })
    }
}

/// Unknown inner types still occupy the payload bytes, which should all be zero
fn skip_unsupported(
    reader: &mut BinaryReader,
    sink: &mut dyn DiagnosticSink,
    context: TagContext,
    inner_type: u8,
    offset: usize,
) -> Result<()> {
    report(sink, Diagnostic::UnknownTag { context, tag: inner_type as u32, offset });
    check_padding(reader, sink, PAYLOAD_SIZE)
}

/// Reads every trigger record of a chunk, in file order
pub fn read_triggers(
    reader: &mut BinaryReader,
    sink: &mut dyn DiagnosticSink,
    header: &KwdHeader,
) -> Result<Vec<Trigger>> {
    let mut triggers = Vec::with_capacity((header.item_count as usize).min(reader.remaining()));
    for _ in 0..header.item_count {
        let family = reader.read_u32()?;
        let len = reader.read_u32()? as usize;
        let start = reader.position();

        if family == TRIGGER_GENERIC || family == TRIGGER_ACTION {
            triggers.push(Trigger::read(reader, sink, family, len)?);
        } else {
            reader.skip(len)?;
            report(
                sink,
                Diagnostic::UnknownTag { context: TagContext::TriggerFamily, tag: family, offset: start },
            );
        }

        realign(reader, sink, start, len)?;
    }
    Ok(triggers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::testutil::{BinaryWriter, ChunkBuilder};
    use crate::diagnostics::EventCollector;

    /// Record length used by the editor: payload, trailer, type and repeat bytes
    const RECORD_LEN: u32 = 16;

    fn write_trigger(w: &mut BinaryWriter, family: u32, inner: u8, payload: [u8; 8], ids: [u16; 3]) {
        w.write_u32_le(family);
        w.write_u32_le(RECORD_LEN);
        w.write_bytes(&payload);
        for id in ids {
            w.write_u16_le(id);
        }
        w.write_u8(inner);
        w.write_u8(2);
    }

    fn read(body: &BinaryWriter, generic: u32, actions: u32) -> (Vec<Trigger>, EventCollector) {
        let data = ChunkBuilder::triggers(generic, actions).finish(body.as_slice());
        let mut reader = BinaryReader::new(&data);
        let mut sink = EventCollector::new();
        let header = KwdHeader::read(&mut reader, &mut sink).unwrap();
        let triggers = read_triggers(&mut reader, &mut sink, &header).unwrap();
        assert!(reader.is_empty());
        (triggers, sink)
    }

    #[test]
    fn test_read_generic_and_action() {
        let mut body = BinaryWriter::new();
        let mut value = [0u8; 8];
        value[0] = ComparisonType::GreaterThan as u8;
        value[2] = 1;
        value[3] = 1;
        value[4..].copy_from_slice(&1000u32.to_le_bytes());
        write_trigger(&mut body, TRIGGER_GENERIC, TargetType::PlayerGold as u8, value, [1, 0, 2]);

        let mut create = [5, 1, 4, 0, 0, 0, 0, 0];
        create[4..6].copy_from_slice(&10u16.to_le_bytes());
        create[6..].copy_from_slice(&20u16.to_le_bytes());
        write_trigger(&mut body, TRIGGER_ACTION, ActionType::CreateCreature as u8, create, [2, 0, 0]);

        let (triggers, sink) = read(&body, 1, 1);
        assert!(sink.is_empty());

        let gold = &triggers[0];
        assert_eq!((gold.id, gold.id_next, gold.id_child), (1, 0, 2));
        assert_eq!(gold.repeat_times, 2);
        assert_eq!(gold.target(), Some(TargetType::PlayerGold));
        // Gold conditions carry no target id; the byte is padding
        assert!(matches!(
            gold.kind,
            TriggerKind::Generic {
                condition: Condition::PlayerValue {
                    comparison: Some(ComparisonType::GreaterThan),
                    target_id: 0,
                    flag: 1,
                    player_id: 1,
                    value: 1000,
                },
                ..
            }
        ));

        let action = &triggers[1];
        assert!(action.is_action());
        assert_eq!(
            action.kind,
            TriggerKind::Action {
                action_type: ActionType::CreateCreature as u8,
                action: Action::CreateCreature { creature_id: 5, player_id: 1, level: 4, flag: 0, x: 10, y: 20 },
            }
        );
    }

    #[test]
    fn test_non_zero_padding_is_reported() {
        let mut body = BinaryWriter::new();
        write_trigger(&mut body, TRIGGER_ACTION, ActionType::WinGame as u8, [0, 0, 7, 0, 0, 0, 0, 0], [9, 0, 0]);

        let (triggers, sink) = read(&body, 0, 1);
        assert_eq!(triggers[0].id, 9);
        assert_eq!(sink.events(), &[Diagnostic::NonZeroPadding { offset: 68, len: 8 }]);
    }

    #[test]
    fn test_unknown_inner_type_still_reads_trailer() {
        let mut body = BinaryWriter::new();
        write_trigger(&mut body, TRIGGER_GENERIC, 250, [0; 8], [4, 5, 6]);

        let (triggers, sink) = read(&body, 1, 0);
        let trigger = &triggers[0];
        assert_eq!((trigger.id, trigger.id_next, trigger.id_child), (4, 5, 6));
        assert_eq!(trigger.target(), None);
        assert!(matches!(trigger.kind, TriggerKind::Generic { target_type: 250, condition: Condition::Unsupported }));
        assert_eq!(
            sink.events(),
            &[Diagnostic::UnknownTag { context: TagContext::TriggerCondition, tag: 250, offset: 68 }]
        );
    }

    #[test]
    fn test_unknown_family_is_skipped() {
        let mut body = BinaryWriter::new();
        body.write_u32_le(300);
        body.write_u32_le(6);
        body.write_zeros(6);
        write_trigger(&mut body, TRIGGER_GENERIC, TargetType::LevelPayDay as u8, [0; 8], [1, 0, 0]);

        let (triggers, sink) = read(&body, 2, 0);
        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].id, 1);
        assert_eq!(
            sink.events(),
            &[Diagnostic::UnknownTag { context: TagContext::TriggerFamily, tag: 300, offset: 68 }]
        );
    }
}
