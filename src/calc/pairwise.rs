use crate::calc::{
    boostless_total, ensure_finish_room, pacelock, resolve_rooms, saving, sort_candidates,
    strats_of, time_between, window_len, BoostPlacement, Candidate, CalcError,
};
use crate::data::catalog::RoomCatalog;

/// Every placement of exactly two boosts in the boost window, fastest first.
///
/// `sequence` must already end in the finish room.
pub fn calc_two_boost(sequence: &[String], catalog: &RoomCatalog) -> Result<Vec<Candidate>, CalcError> {
    ensure_finish_room(sequence)?;
    Ok(two_boost_from(sequence, catalog, boostless_total(sequence, catalog).time))
}

/// Search against an already computed boostless baseline.
pub(crate) fn two_boost_from(sequence: &[String], catalog: &RoomCatalog, boostless_time: f64) -> Vec<Candidate> {
    let rooms = resolve_rooms(sequence, catalog);
    let window = window_len(sequence);
    let mut results = Vec::with_capacity(81);

    for i in 0..window {
        for j in i + 1..window {
            let (first, second) = (rooms[i], rooms[j]);
            let between = time_between(&rooms, i, j);

            for (first_idx, first_strat) in strats_of(first).iter().enumerate() {
                for (second_idx, second_strat) in strats_of(second).iter().enumerate() {
                    let lock = pacelock(between, first_strat, second_strat);
                    let time = boostless_time
                        - saving(first, first_strat)
                        - saving(second, second_strat)
                        + lock;

                    results.push(Candidate {
                        time,
                        placements: vec![
                            BoostPlacement {
                                index: i,
                                strat_index: first_idx,
                                pacelock: 0.0,
                            },
                            BoostPlacement {
                                index: j,
                                strat_index: second_idx,
                                pacelock: lock,
                            },
                        ],
                    });
                }
            }
        }
    }

    sort_candidates(&mut results);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::builtin_catalog;

    fn seq(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn single_pair_matches_hand_calculation() {
        let results = calc_two_boost(&seq(&["1a", "finish room"]), builtin_catalog())
            .expect("sequence ends in finish room");
        assert_eq!(results.len(), 1);
        let only = &results[0];
        assert!((only.time - 62.3).abs() < 1e-9, "got {}", only.time);
        assert_eq!(only.placements[0].pacelock, 0.0);
        assert!((only.placements[1].pacelock - 58.7).abs() < 1e-9);
        assert_eq!((only.placements[1].index, only.placements[1].strat_index), (1, 0));
    }

    #[test]
    fn supplied_baseline_is_used_without_recomputing() {
        let sequence = seq(&["1a", "finish room"]);
        let computed = calc_two_boost(&sequence, builtin_catalog()).expect("valid");
        let shifted = two_boost_from(&sequence, builtin_catalog(), 15.6 + 100.0);
        assert_eq!(shifted.len(), computed.len());
        assert!((shifted[0].time - (computed[0].time + 100.0)).abs() < 1e-9);
        assert_eq!(shifted[0].placements, computed[0].placements);
    }

    #[test]
    fn missing_finish_room_is_rejected() {
        let err = calc_two_boost(&seq(&["1a", "1b"]), builtin_catalog())
            .expect_err("must end in finish room");
        assert!(matches!(err, CalcError::MissingFinishRoom { found: Some(ref id) } if id == "1b"));
    }

    #[test]
    fn unknown_room_contributes_no_candidates() {
        let results = calc_two_boost(&seq(&["nope", "1a", "finish room"]), builtin_catalog())
            .expect("sequence ends in finish room");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].placements[0].index, 1);
    }
}
