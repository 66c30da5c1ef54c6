use crate::calc::{
    boostless_total, ensure_finish_room, pacelock, resolve_rooms, saving, sort_candidates,
    strats_of, time_between, window_len, BoostPlacement, Candidate, CalcError,
};
use crate::data::catalog::RoomCatalog;

/// Every placement of exactly three boosts in the boost window, fastest first.
///
/// Pacelock is charged between the first and second boost and between the second and third.
/// `sequence` must already end in the finish room.
pub fn calc_three_boost(
    sequence: &[String],
    catalog: &RoomCatalog,
) -> Result<Vec<Candidate>, CalcError> {
    ensure_finish_room(sequence)?;
    Ok(three_boost_from(sequence, catalog, boostless_total(sequence, catalog).time))
}

/// Search against an already computed boostless baseline.
pub(crate) fn three_boost_from(sequence: &[String], catalog: &RoomCatalog, boostless_time: f64) -> Vec<Candidate> {
    let rooms = resolve_rooms(sequence, catalog);
    let window = window_len(sequence);
    let mut results = Vec::with_capacity(729);

    for i in 0..window {
        for j in i + 1..window {
            for k in j + 1..window {
                let (first, second, third) = (rooms[i], rooms[j], rooms[k]);
                let between_12 = time_between(&rooms, i, j);
                let between_23 = time_between(&rooms, j, k);

                for (first_idx, first_strat) in strats_of(first).iter().enumerate() {
                    for (second_idx, second_strat) in strats_of(second).iter().enumerate() {
                        let lock_12 = pacelock(between_12, first_strat, second_strat);

                        for (third_idx, third_strat) in strats_of(third).iter().enumerate() {
                            let lock_23 = pacelock(between_23, second_strat, third_strat);
                            let time = boostless_time
                                - saving(first, first_strat)
                                - saving(second, second_strat)
                                - saving(third, third_strat)
                                + lock_12
                                + lock_23;

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
                                        pacelock: lock_12,
                                    },
                                    BoostPlacement {
                                        index: k,
                                        strat_index: third_idx,
                                        pacelock: lock_23,
                                    },
                                ],
                            });
                        }
                    }
                }
            }
        }
    }

    sort_candidates(&mut results);
    results
}
