//! Boost route calculator: finds the fastest placement of two or three boosts across a run.
//!
//! Flow: boostless baseline -> pairwise search + triple search (each sorted) -> merge.

pub mod boostless;
pub mod export_csv;
pub mod merge;
pub mod pairwise;
pub mod triple;

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::data::catalog::{builtin_catalog, normalize_room_id, RoomCatalog, FINISH_ROOM};
use crate::data::room::{BoostStrategy, Room};

pub use boostless::{boostless_total, BoostlessTotal};
pub use merge::merge_sorted;
pub use pairwise::calc_two_boost;
pub use triple::calc_three_boost;

/// Number of rooms before the finish room that may hold a boost.
pub const BOOST_WINDOW: usize = 9;
/// Minimum spacing between two boost triggers before pacelock is charged.
pub const PACELOCK_SECONDS: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStage {
    Pairwise,
    Triple,
}

impl fmt::Display for SearchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pairwise => write!(f, "two boost"),
            Self::Triple => write!(f, "three boost"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("last room is supposed to be '{FINISH_ROOM}' (got {found:?}); this is a programming error")]
    MissingFinishRoom { found: Option<String> },
    #[error("expected {expected} rooms before the finish room, got {found}")]
    WindowMismatch { expected: usize, found: usize },
    #[error("{stage} calculation returned no candidates")]
    EmptyResult { stage: SearchStage },
}

/// One boost in a placement. `pacelock` is always 0 for the first boost of a placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoostPlacement {
    /// Index into the room sequence.
    pub index: usize,
    /// Index into that room's strategy list.
    pub strat_index: usize,
    pub pacelock: f64,
}

/// A scored boost placement produced by one of the searches.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub time: f64,
    pub placements: Vec<BoostPlacement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalcSeedResult {
    pub boostless_time: f64,
    pub boost_time: f64,
    pub boost_rooms: Vec<BoostPlacement>,
}

/// Normalize identifiers and append the finish room when it is missing.
pub fn normalize_sequence<S: AsRef<str>>(rooms: &[S]) -> Vec<String> {
    let mut normalized: Vec<String> = rooms.iter().map(|r| normalize_room_id(r.as_ref())).collect();
    if normalized.last().map(String::as_str) != Some(FINISH_ROOM) {
        normalized.push(FINISH_ROOM.to_string());
    }
    normalized
}

/// Calculate a seed against the built-in catalog.
pub fn calc_seed<S: AsRef<str>>(rooms: &[S]) -> Result<Vec<CalcSeedResult>, CalcError> {
    calc_seed_custom(rooms, builtin_catalog())
}

/// Calculate a seed against a caller-supplied catalog.
pub fn calc_seed_custom<S: AsRef<str>>(
    rooms: &[S],
    catalog: &RoomCatalog,
) -> Result<Vec<CalcSeedResult>, CalcError> {
    let sequence = normalize_sequence(rooms);
    for id in &sequence {
        log::debug!("{id}: {:?}", catalog.get(id));
    }
    calc_seed_internal(&sequence, catalog)
}

fn calc_seed_internal(
    sequence: &[String],
    catalog: &RoomCatalog,
) -> Result<Vec<CalcSeedResult>, CalcError> {
    let non_terminal = sequence.len().saturating_sub(1);
    if non_terminal != BOOST_WINDOW {
        let err = CalcError::WindowMismatch {
            expected: BOOST_WINDOW,
            found: non_terminal,
        };
        log::warn!("{err}");
        return Err(err);
    }

    ensure_finish_room(sequence)?;
    let baseline = boostless_total(sequence, catalog);
    if !baseline.unresolved.is_empty() {
        log::info!(
            "{} unresolved room id(s): {}",
            baseline.unresolved.len(),
            baseline.unresolved.join(", ")
        );
    }

    let two_boost = pairwise::two_boost_from(sequence, catalog, baseline.time);
    if two_boost.is_empty() {
        let err = CalcError::EmptyResult {
            stage: SearchStage::Pairwise,
        };
        log::warn!("{err}");
        return Err(err);
    }

    let three_boost = triple::three_boost_from(sequence, catalog, baseline.time);
    if three_boost.is_empty() {
        let err = CalcError::EmptyResult {
            stage: SearchStage::Triple,
        };
        log::warn!("{err}");
        return Err(err);
    }

    Ok(merge_sorted(two_boost, three_boost)
        .into_iter()
        .map(|candidate| CalcSeedResult {
            boostless_time: baseline.time,
            boost_time: candidate.time,
            boost_rooms: candidate.placements,
        })
        .collect())
}

/// Reject sequences whose last entry is not the finish room.
pub(crate) fn ensure_finish_room(sequence: &[String]) -> Result<(), CalcError> {
    let last = sequence.last().map(|id| normalize_room_id(id));
    if last.as_deref() == Some(FINISH_ROOM) {
        return Ok(());
    }
    let err = CalcError::MissingFinishRoom { found: last };
    log::warn!("{err}");
    Err(err)
}

/// Rooms of the sequence resolved against the catalog; unknown identifiers resolve to `None`.
pub(crate) fn resolve_rooms<'a>(sequence: &[String], catalog: &'a RoomCatalog) -> Vec<Option<&'a Room>> {
    sequence.iter().map(|id| catalog.get(id)).collect()
}

pub(crate) fn boostless_of(room: Option<&Room>) -> f64 {
    room.map_or(0.0, |r| r.boostless_time)
}

pub(crate) fn strats_of(room: Option<&Room>) -> &[BoostStrategy] {
    room.map_or(&[][..], |r| r.boost_strats.as_slice())
}

pub(crate) fn saving(room: Option<&Room>, strat: &BoostStrategy) -> f64 {
    room.map_or(0.0, |r| r.saving(strat))
}

/// Boostless time of the rooms strictly between positions `from` and `to`.
pub(crate) fn time_between(rooms: &[Option<&Room>], from: usize, to: usize) -> f64 {
    rooms[from + 1..to].iter().map(|room| boostless_of(*room)).sum()
}

/// Wait charged when the trigger of `to` comes less than [PACELOCK_SECONDS] after the trigger of `from`.
pub fn pacelock(time_between: f64, from: &BoostStrategy, to: &BoostStrategy) -> f64 {
    (PACELOCK_SECONDS - (time_between + from.time_after_boost() + to.boost_time)).max(0.0)
}

/// Boost positions searched for a sequence: the first [BOOST_WINDOW] entries, or fewer for short sequences.
pub(crate) fn window_len(sequence: &[String]) -> usize {
    BOOST_WINDOW.min(sequence.len())
}

pub(crate) fn sort_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| a.time.total_cmp(&b.time));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::room::MoveQuality;

    #[test]
    fn normalize_appends_finish_room_once() {
        assert_eq!(normalize_sequence(&["1A"]), vec!["1a", FINISH_ROOM]);
        assert_eq!(
            normalize_sequence(&["1a", "Finish Room"]),
            vec!["1a", FINISH_ROOM]
        );
        assert_eq!(normalize_sequence::<&str>(&[]), vec![FINISH_ROOM]);
    }

    #[test]
    fn pacelock_is_floored_at_zero() {
        let a = BoostStrategy::new("a", 10.0, 2.0, MoveQuality::Best);
        let b = BoostStrategy::new("b", 10.0, 5.0, MoveQuality::Best);
        assert_eq!(pacelock(100.0, &a, &b), 0.0);
        assert_eq!(pacelock(47.0, &a, &b), 0.0);
        assert!((pacelock(40.0, &a, &b) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn calc_seed_rejects_short_sequences() {
        let err = calc_seed(&["1a", "1b"]).expect_err("two rooms is not a full window");
        assert_eq!(
            err,
            CalcError::WindowMismatch {
                expected: BOOST_WINDOW,
                found: 2
            }
        );
    }
}
