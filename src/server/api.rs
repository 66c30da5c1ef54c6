use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calc::{boostless_total, calc_seed_custom, normalize_sequence, CalcError};
use crate::data::catalog::{normalize_room_id, FINISH_ROOM};
use crate::data::room::Difficulty;
use crate::report::{calc_command, describe_result, filter_rooms, BoostDescription, RoomFilter};
use crate::seen::seed_key;
use crate::server::AppState;

const DEFAULT_RESULT_LIMIT: usize = 5;
const MAX_RESULT_LIMIT: usize = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct CalcRequest {
    pub rooms: Vec<String>,
    /// Number of ranked results to return (default 5, capped at 100).
    pub limit: Option<usize>,
    /// `all`, `easy` or `hard`; restricts the rooms listed in the `/calc` command.
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedBoosts {
    pub rank: usize,
    pub boost_time: f64,
    pub boosts: Vec<BoostDescription>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalcResponse {
    pub status: &'static str,
    pub rooms: Vec<String>,
    pub boostless_time: f64,
    pub results: Vec<RankedBoosts>,
    pub total_results: usize,
    /// True the first time (per TTL window) a seed's best time beats the notable threshold.
    pub notable: bool,
    pub calc_command: String,
    pub unresolved: Vec<String>,
}

#[derive(Debug, Error)]
pub enum CalcPayloadError {
    #[error("{0}")]
    Parse(serde_json::Error),
    #[error(transparent)]
    Calc(#[from] CalcError),
    #[error("{0}")]
    Serialize(serde_json::Error),
}

pub fn health_payload(state: &AppState) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "atlantis-calc",
        "version": env!("CARGO_PKG_VERSION"),
        "rooms": state.catalog.len(),
    }))
}

fn query_param<'a>(path: &'a str, name: &str) -> Option<&'a str> {
    let query = path.split('?').nth(1)?;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        key.trim().eq_ignore_ascii_case(name).then_some(value.trim())
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomListItem {
    pub id: String,
    pub difficulty: Difficulty,
    pub boostless_time: f64,
    pub strategies: Vec<String>,
}

pub fn rooms_payload(state: &AppState, path: &str) -> Result<String, serde_json::Error> {
    let filter = query_param(path, "difficulty").map_or(RoomFilter::All, RoomFilter::parse);
    let ids = match filter.difficulty() {
        Some(difficulty) => state.catalog.room_ids_with_difficulty(difficulty),
        None => state.catalog.room_ids(),
    };
    let list: Vec<RoomListItem> = ids
        .into_iter()
        .filter_map(|id| {
            let room = state.catalog.get(&id)?;
            Some(RoomListItem {
                difficulty: room.difficulty,
                boostless_time: room.boostless_time,
                strategies: room.boost_strats.iter().map(|s| s.name.clone()).collect(),
                id,
            })
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "rooms": list }))
}

pub fn calc_payload(state: &AppState, body: &str) -> Result<String, CalcPayloadError> {
    let request: CalcRequest = serde_json::from_str(body).map_err(CalcPayloadError::Parse)?;
    let sequence = normalize_sequence(&request.rooms);
    let results = calc_seed_custom(&sequence, &state.catalog)?;
    let baseline = boostless_total(&sequence, &state.catalog);

    let limit = request
        .limit
        .unwrap_or(DEFAULT_RESULT_LIMIT)
        .clamp(1, MAX_RESULT_LIMIT);
    let ranked = results
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, result)| RankedBoosts {
            rank: i + 1,
            boost_time: result.boost_time,
            boosts: describe_result(&sequence, &state.catalog, result),
        })
        .collect();

    let notable = results
        .first()
        .is_some_and(|best| best.boost_time < state.config.notable_seconds)
        && state
            .seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .check_and_mark_at(&seed_key(&sequence), Utc::now());
    if notable {
        log::info!("notable seed {}", seed_key(&sequence));
    }

    let requested: Vec<String> = request
        .rooms
        .iter()
        .map(|r| normalize_room_id(r))
        .filter(|r| r != FINISH_ROOM)
        .collect();
    let filter = request
        .filter
        .as_deref()
        .map_or(RoomFilter::All, RoomFilter::parse);
    let command_rooms = filter_rooms(&requested, &state.catalog, filter);

    let response = CalcResponse {
        status: "ok",
        boostless_time: baseline.time,
        total_results: results.len(),
        results: ranked,
        notable,
        calc_command: calc_command(&command_rooms),
        unresolved: baseline.unresolved,
        rooms: sequence,
    };
    serde_json::to_string_pretty(&response).map_err(CalcPayloadError::Serialize)
}
