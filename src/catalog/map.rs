use crate::codec::{BinaryReader, KwdHeader};
use crate::error::{Error, Result};

const TILE_SIZE: usize = 4;

/// Liquid under a bridge tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BridgeTerrainType {
    Water = 1,
    Lava = 2,
}

impl BridgeTerrainType {
    /// 0 means no bridge, unknown values are treated the same way
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(Self::Water),
            2 => Some(Self::Lava),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tile {
    pub terrain_id: u8,
    pub player_id: u8,
    pub flag: Option<BridgeTerrainType>,
    pub unknown: u8,
}

impl Tile {
    pub fn read(reader: &mut BinaryReader) -> Result<Self> {
        Ok(Self {
            terrain_id: reader.read_u8()?,
            player_id: reader.read_u8()?,
            flag: BridgeTerrainType::from_u8(reader.read_u8()?),
            unknown: reader.read_u8()?,
        })
    }
}

/// Level tile grid, stored row by row
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameMap {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl GameMap {
    /// Grid of default tiles
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::default(); width as usize * height as usize],
        }
    }

    /// Reads the tile records of a map chunk into this grid.
    ///
    /// The grid keeps its dimensions; the chunk header only sizes a new map.
    pub fn read_tiles(&mut self, reader: &mut BinaryReader) -> Result<()> {
        for tile in self.tiles.iter_mut() {
            *tile = Tile::read(reader)?;
        }
        Ok(())
    }

    pub fn read(reader: &mut BinaryReader, header: &KwdHeader) -> Result<Self> {
        let need = header.width as usize * header.height as usize * TILE_SIZE;
        if reader.remaining() < need {
            return Err(Error::UnexpectedEof { offset: reader.position(), need });
        }
        let mut map = Self::new(header.width, header.height);
        map.read_tiles(reader)?;
        Ok(map)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile(&self, x: u32, y: u32) -> Option<&Tile> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles.get(y as usize * self.width as usize + x as usize)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::testutil::ChunkBuilder;
    use crate::diagnostics::EventCollector;

    #[test]
    fn test_read_map_grid() {
        let data = ChunkBuilder::map(2, 1).finish(&[3, 0, 0, 0, 5, 1, 1, 0]);
        let mut reader = BinaryReader::new(&data);
        let header = KwdHeader::read(&mut reader, &mut EventCollector::new()).unwrap();
        let map = GameMap::read(&mut reader, &header).unwrap();

        assert_eq!((map.width(), map.height()), (2, 1));
        assert_eq!(
            map.tile(0, 0),
            Some(&Tile { terrain_id: 3, player_id: 0, flag: None, unknown: 0 })
        );
        assert_eq!(
            map.tile(1, 0),
            Some(&Tile { terrain_id: 5, player_id: 1, flag: Some(BridgeTerrainType::Water), unknown: 0 })
        );
        assert_eq!(map.tile(2, 0), None);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_row_major_layout() {
        let data = ChunkBuilder::map(2, 2).finish(&[
            1, 0, 0, 0, 2, 0, 0, 0, //
            3, 0, 2, 0, 4, 0, 0, 0,
        ]);
        let mut reader = BinaryReader::new(&data);
        let header = KwdHeader::read(&mut reader, &mut EventCollector::new()).unwrap();
        let map = GameMap::read(&mut reader, &header).unwrap();

        assert_eq!(map.tile(1, 0).unwrap().terrain_id, 2);
        assert_eq!(map.tile(0, 1).unwrap().terrain_id, 3);
        assert_eq!(map.tile(0, 1).unwrap().flag, Some(BridgeTerrainType::Lava));
    }

    #[test]
    fn test_truncated_map_fails() {
        let data = ChunkBuilder::map(2, 1).finish(&[3, 0, 0, 0]);
        let mut reader = BinaryReader::new(&data);
        let header = KwdHeader::read(&mut reader, &mut EventCollector::new()).unwrap();
        assert!(GameMap::read(&mut reader, &header).is_err());
    }
}
