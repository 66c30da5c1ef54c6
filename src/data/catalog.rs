//! Room catalog: identifier -> room lookup, the built-in room data, and custom catalog loading.
//! Identifiers are case-insensitive; every lookup goes through [normalize_room_id].

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::room::{
    BoostStrategy, Difficulty,
    MoveQuality::{self, Best, Brilliant, Great},
    Room,
};

/// Terminal room appended to every run.
pub const FINISH_ROOM: &str = "finish room";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unable to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to parse catalog json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unable to parse catalog yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported catalog format '{0}' (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),
}

/// Lowercase and trim a room identifier for lookup.
pub fn normalize_room_id(value: &str) -> String {
    value.trim().to_lowercase()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    rooms: Vec<Room>,
}

/// Read-only mapping of normalized room identifier to room.
#[derive(Debug, Clone, Default)]
pub struct RoomCatalog {
    rooms: HashMap<String, Room>,
}

impl RoomCatalog {
    pub fn from_rooms(rooms: impl IntoIterator<Item = Room>) -> Self {
        let rooms = rooms
            .into_iter()
            .map(|room| (normalize_room_id(&room.name), room))
            .collect();
        Self { rooms }
    }

    /// Load a custom catalog from a `.json`, `.yaml` or `.yml` file with a top-level `rooms` list.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let parsed: CatalogFile = match extension.as_str() {
            "json" => serde_json::from_str(&raw)?,
            "yaml" | "yml" => serde_yaml::from_str(&raw)?,
            _ => return Err(CatalogError::UnsupportedFormat(extension)),
        };
        log::info!(
            "loaded {} rooms from catalog '{}'",
            parsed.rooms.len(),
            path.display()
        );
        Ok(Self::from_rooms(parsed.rooms))
    }

    pub fn get(&self, id: &str) -> Option<&Room> {
        self.rooms.get(&normalize_room_id(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// Sorted identifiers of every room except the finish room.
    pub fn room_ids(&self) -> Vec<String> {
        self.room_ids_matching(|_| true)
    }

    /// Sorted identifiers of every non-finish room with the given difficulty.
    pub fn room_ids_with_difficulty(&self, difficulty: Difficulty) -> Vec<String> {
        self.room_ids_matching(|room| room.difficulty == difficulty)
    }

    fn room_ids_matching(&self, keep: impl Fn(&Room) -> bool) -> Vec<String> {
        let mut ids: Vec<String> = self
            .rooms
            .iter()
            .filter(|(id, room)| id.as_str() != FINISH_ROOM && keep(room))
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }
}

/// The built-in catalog, built once on first use.
pub fn builtin_catalog() -> &'static RoomCatalog {
    static CATALOG: OnceLock<RoomCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| RoomCatalog::from_rooms(builtin_rooms()))
}

fn strat(name: &str, time: f64, boost_time: f64, quality: MoveQuality) -> BoostStrategy {
    BoostStrategy::new(name, time, boost_time, quality)
}

fn easy(name: &str, boostless_time: f64, strats: Vec<BoostStrategy>) -> Room {
    Room::new(name, boostless_time, Difficulty::Easy, strats)
}

fn hard(name: &str, boostless_time: f64, strats: Vec<BoostStrategy>) -> Room {
    Room::new(name, boostless_time, Difficulty::Hard, strats)
}

fn builtin_rooms() -> Vec<Room> {
    vec![
        easy("1a", 13.6, vec![strat("cp 1-2", 10.6, 9.6, Best)]),
        easy("1b", 15.1, vec![strat("cp 1-2", 11.1, 8.1, Best), strat("cp 0-1", 11.4, 3.2, Best)]),
        easy("1c", 11.4, vec![strat("cp 1-2", 8.4, 7.0, Best), strat("cp 0-1", 8.9, 2.1, Great)]),
        easy("1d", 17.4, vec![strat("cp 0-1", 13.2, 5.5, Best)]),
        easy(
            "1e",
            14.9,
            vec![strat("cp 1-2 (Late)", 12.1, 10.2, Great), strat("cp 1-2 (Early)", 12.3, 6.1, Great)],
        ),
        easy("2a", 13.6, vec![strat("cp 1-2", 11.6, 5.6, Great)]),
        easy("2b", 16.9, vec![strat("cp 1-2 (BIG JRGY)", 12.4, 7.1, Brilliant)]),
        easy("2c", 19.0, vec![strat("cp 1-2", 15.0, 4.2, Best), strat("cp 2-3", 15.0, 11.9, Best)]),
        easy("2d", 20.5, vec![strat("cp 1-2", 15.8, 6.5, Best)]),
        easy("2e", 15.9, vec![strat("cp 0-1", 12.2, 2.6, Best)]),
        easy("3a", 15.2, vec![strat("cp 0-1", 11.7, 4.8, Best)]),
        easy("3b", 15.3, vec![strat("cp 1-2", 10.3, 9.5, Best), strat("cp 0-1", 11.8, 3.6, Great)]),
        easy("3c", 17.4, vec![strat("cp 1-2", 13.2, 7.4, Best)]),
        easy("3d", 26.9, vec![strat("cp 0-1", 20.6, 2.0, Best), strat("cp 1-2", 21.9, 14.9, Best)]),
        easy("3e", 15.6, vec![strat("cp 1-2", 11.0, 10.0, Best)]),
        easy("4a", 10.8, vec![strat("cp 1-2", 8.0, 5.9, Best)]),
        easy("4b", 17.8, vec![strat("cp 1-2", 13.6, 7.6, Best), strat("cp 0-1", 14.1, 5.0, Great)]),
        easy("4c", 14.7, vec![strat("cp 1-2", 11.7, 9.7, Best)]),
        easy("4e", 18.0, vec![strat("cp 0-1", 12.7, 3.0, Best)]),
        easy("5a", 14.9, vec![strat("cp 0-1", 11.6, 6.4, Best)]),
        easy("5b", 21.1, vec![strat("cp 0-1", 13.8, 6.1, Best)]),
        easy("5c", 20.1, vec![strat("cp 2-3", 16.6, 15.6, Best)]),
        easy("5d", 12.8, vec![strat("cp 0-1", 10.1, 3.3, Best)]),
        easy("5e", 17.6, vec![strat("cp 0-1", 13.2, 11.2, Best)]),
        hard("1f", 27.6, vec![strat("cp 2-3", 25.1, 22.2, Best)]),
        hard("1g", 29.9, vec![strat("cp 0-1", 20.4, 0.6, Best), strat("cp 1-2", 23.2, 15.8, Best)]),
        hard("1h", 26.2, vec![strat("cp 0-1", 20.9, 7.4, Best), strat("cp 2-3", 22.1, 19.4, Great)]),
        hard("2f", 19.2, vec![strat("cp 1-2", 16.1, 7.7, Best)]),
        hard("2g", 21.2, vec![strat("cp 1-2-3", 11.9, 7.6, Best)]),
        hard("2h", 14.6, vec![strat("cp 1-2", 10.6, 8.4, Best)]),
        hard("3f", 26.4, vec![strat("cp 1-2", 20.0, 8.2, Best)]),
        hard("3g", 19.4, vec![strat("cp 2-3", 15.4, 14.1, Best)]),
        hard("3h", 30.5, vec![strat("cp 2-3", 25.3, 21.5, Best)]),
        hard("4f", 20.9, vec![strat("cp 1-2", 16.2, 7.4, Best)]),
        hard("4g", 27.7, vec![strat("cp 1-2", 23.6, 15.5, Best)]),
        hard("4h", 21.8, vec![strat("cp 0-1", 17.2, 2.0, Best), strat("cp 2-3", 18.9, 16.4, Great)]),
        hard("5f", 23.8, vec![strat("cp 2-3", 20.3, 19.3, Best)]),
        hard("5g", 22.6, vec![strat("cp 1-2", 14.6, 9.8, Best)]),
        hard("5h", 27.3, vec![strat("cp 0-1", 21.0, 2.7, Best)]),
        easy(FINISH_ROOM, 2.0, vec![strat("lol", 0.7, 0.3, Best)]),
    ]
}
