//! Read-only lookup of moves, species and items.
//!
//! The engine only ever sees master data through [`MasterDataSource`]; the
//! bundled [`MasterData`] keeps everything in memory and can be built from a
//! RON document or assembled by hand.

use crate::errors::{MasterDataError, MasterDataResult};
use schema::{GhostSpecies, ItemData, MoveData};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Lookup seam between the battle engine and wherever master data lives.
pub trait MasterDataSource {
    fn move_data(&self, move_id: &str) -> Option<&MoveData>;
    fn species(&self, species_id: &str) -> Option<&GhostSpecies>;
    fn item(&self, item_id: &str) -> Option<&ItemData>;
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MasterDataFile {
    moves: Vec<MoveData>,
    species: Vec<GhostSpecies>,
    items: Vec<ItemData>,
}

#[derive(Debug, Clone, Default)]
pub struct MasterData {
    moves: HashMap<String, MoveData>,
    species: HashMap<String, GhostSpecies>,
    items: HashMap<String, ItemData>,
}

impl MasterData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a RON document with `moves`, `species` and `items` lists.
    pub fn from_ron_str(text: &str) -> MasterDataResult<Self> {
        let file: MasterDataFile = ron::from_str(text)?;
        let mut data = MasterData::new();

        for move_data in file.moves {
            data.insert_move(move_data)?;
        }
        for species in file.species {
            data.insert_species(species)?;
        }
        for item in file.items {
            data.insert_item(item)?;
        }

        data.validate()?;
        tracing::debug!(
            moves = data.moves.len(),
            species = data.species.len(),
            items = data.items.len(),
            "loaded master data"
        );
        Ok(data)
    }

    /// Load master data from a RON file on disk.
    pub fn load(path: &Path) -> MasterDataResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| MasterDataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&text)
    }

    pub fn with_move(mut self, move_data: MoveData) -> Self {
        self.moves.insert(move_data.id.clone(), move_data);
        self
    }

    pub fn with_species(mut self, species: GhostSpecies) -> Self {
        self.species.insert(species.id.clone(), species);
        self
    }

    pub fn with_item(mut self, item: ItemData) -> Self {
        self.items.insert(item.id.clone(), item);
        self
    }

    fn insert_move(&mut self, move_data: MoveData) -> MasterDataResult<()> {
        if self.moves.contains_key(&move_data.id) {
            return Err(MasterDataError::DuplicateId {
                kind: "move",
                id: move_data.id,
            });
        }
        self.moves.insert(move_data.id.clone(), move_data);
        Ok(())
    }

    fn insert_species(&mut self, species: GhostSpecies) -> MasterDataResult<()> {
        if self.species.contains_key(&species.id) {
            return Err(MasterDataError::DuplicateId {
                kind: "species",
                id: species.id,
            });
        }
        self.species.insert(species.id.clone(), species);
        Ok(())
    }

    fn insert_item(&mut self, item: ItemData) -> MasterDataResult<()> {
        if self.items.contains_key(&item.id) {
            return Err(MasterDataError::DuplicateId {
                kind: "item",
                id: item.id,
            });
        }
        self.items.insert(item.id.clone(), item);
        Ok(())
    }

    /// Every learnset entry must point at a known move.
    pub fn validate(&self) -> MasterDataResult<()> {
        for species in self.species.values() {
            if let Some(entry) = species
                .learnset
                .iter()
                .find(|entry| !self.moves.contains_key(&entry.move_id))
            {
                return Err(MasterDataError::UnknownLearnsetMove {
                    species: species.id.clone(),
                    move_id: entry.move_id.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }
}

impl MasterDataSource for MasterData {
    fn move_data(&self, move_id: &str) -> Option<&MoveData> {
        self.moves.get(move_id)
    }

    fn species(&self, species_id: &str) -> Option<&GhostSpecies> {
        self.species.get(species_id)
    }

    fn item(&self, item_id: &str) -> Option<&ItemData> {
        self.items.get(item_id)
    }
}
