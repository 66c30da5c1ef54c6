//! Turns calculator output back into something people can read: room names, strategy labels,
//! difficulty filters and the `/calc` command that reproduces a seed.

use serde::Serialize;

use crate::calc::{BoostPlacement, CalcSeedResult};
use crate::data::catalog::RoomCatalog;
use crate::data::room::{Difficulty, MoveQuality};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoostDescription {
    /// `"<room> (<strategy>)"`.
    pub name: String,
    pub pacelock: f64,
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<MoveQuality>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoomFilter {
    #[default]
    All,
    Easy,
    Hard,
}

impl RoomFilter {
    /// Anything other than `easy` or `hard` means no filtering.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Self::Easy,
            "hard" => Self::Hard,
            _ => Self::All,
        }
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        match self {
            Self::All => None,
            Self::Easy => Some(Difficulty::Easy),
            Self::Hard => Some(Difficulty::Hard),
        }
    }
}

fn describe_placement(
    sequence: &[String],
    catalog: &RoomCatalog,
    placement: &BoostPlacement,
) -> BoostDescription {
    let id = sequence
        .get(placement.index)
        .map(String::as_str)
        .unwrap_or("?");
    let room = catalog.get(id);
    let strat = room.and_then(|r| r.boost_strats.get(placement.strat_index));

    let room_name = room.map_or(id, |r| r.name.as_str());
    let name = match strat {
        Some(strat) => format!("{room_name} ({})", strat.name),
        None => format!("{room_name} (strategy #{})", placement.strat_index),
    };

    BoostDescription {
        name,
        pacelock: placement.pacelock,
        index: placement.index,
        difficulty: room.map(|r| r.difficulty),
        quality: strat.map(|s| s.quality),
    }
}

/// Resolve each boost of `result` against the sequence it was calculated for.
pub fn describe_result(
    sequence: &[String],
    catalog: &RoomCatalog,
    result: &CalcSeedResult,
) -> Vec<BoostDescription> {
    result
        .boost_rooms
        .iter()
        .map(|placement| describe_placement(sequence, catalog, placement))
        .collect()
}

/// Keep only the rooms matching `filter`. Unknown rooms are kept only by [RoomFilter::All].
pub fn filter_rooms(rooms: &[String], catalog: &RoomCatalog, filter: RoomFilter) -> Vec<String> {
    let Some(difficulty) = filter.difficulty() else {
        return rooms.to_vec();
    };
    rooms
        .iter()
        .filter(|id| catalog.get(id).is_some_and(|r| r.difficulty == difficulty))
        .cloned()
        .collect()
}

/// Build `/calc room_1:1a room_2:2b ...` for the given rooms.
pub fn calc_command(rooms: &[String]) -> String {
    let mut parts = vec!["/calc".to_string()];
    for (i, room) in rooms.iter().enumerate() {
        let mut chars = room.chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        parts.push(format!("room_{}:{}", i + 1, capitalized));
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::calc_seed;
    use crate::data::catalog::builtin_catalog;

    #[test]
    fn calc_command_capitalizes_rooms() {
        let rooms = vec!["1a".to_string(), "finish room".to_string()];
        assert_eq!(calc_command(&rooms), "/calc room_1:1a room_2:Finish room");
        assert_eq!(calc_command(&[]), "/calc");
    }

    #[test]
    fn filter_rooms_by_difficulty() {
        let rooms: Vec<String> = ["1a", "1f", "zz"].iter().map(|s| s.to_string()).collect();
        let catalog = builtin_catalog();
        assert_eq!(filter_rooms(&rooms, catalog, RoomFilter::Hard), vec!["1f"]);
        assert_eq!(filter_rooms(&rooms, catalog, RoomFilter::Easy), vec!["1a"]);
        assert_eq!(filter_rooms(&rooms, catalog, RoomFilter::All), rooms);
        assert_eq!(RoomFilter::parse("HARD"), RoomFilter::Hard);
        assert_eq!(RoomFilter::parse("whatever"), RoomFilter::All);
    }

    #[test]
    fn describe_best_result_names_rooms_and_strategies() {
        let sequence: Vec<String> = ["1a", "1b", "1c", "1d", "1e", "2a", "2b", "2c", "2d", "finish room"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let results = calc_seed(&sequence).expect("valid seed");
        let described = describe_result(&sequence, builtin_catalog(), &results[0]);
        assert!(described.len() == 2 || described.len() == 3);
        assert_eq!(described[0].pacelock, 0.0);
        for boost in &described {
            assert!(boost.name.starts_with(&sequence[boost.index]));
            assert!(boost.name.contains(" ("));
            assert!(boost.difficulty.is_some());
        }
    }
}
