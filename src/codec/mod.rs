pub mod drift;
pub mod header;
pub mod reader;
pub mod resource;
pub mod types;

#[cfg(test)]
pub(crate) mod testutil;

pub use drift::{check_padding, read_records, realign};
pub use header::{FileKind, KwdHeader};
pub use reader::BinaryReader;
pub use resource::{ArtPayload, ArtResource, ArtResourceFlags, ArtResourceType, Light, LightFlags, StringId};
pub use types::*;
