//! Write ranked calculator results as CSV, one row per result.
//!
//! Columns: rank, boostless_time, boost_time, time_saved, boost_count, boosts, total_pacelock.
//! `boosts` lists `"<room> (<strategy>)"` entries separated by `" | "`.

use std::io::Write;

use serde::Serialize;

use crate::calc::CalcSeedResult;
use crate::data::catalog::RoomCatalog;
use crate::report::describe_result;

#[derive(Debug, Serialize)]
struct ResultRow {
    rank: usize,
    boostless_time: f64,
    boost_time: f64,
    time_saved: f64,
    boost_count: usize,
    boosts: String,
    total_pacelock: f64,
}

fn round_millis(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

pub fn write_results_csv<W: Write>(
    writer: W,
    sequence: &[String],
    catalog: &RoomCatalog,
    results: &[CalcSeedResult],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (rank, result) in results.iter().enumerate() {
        let described = describe_result(sequence, catalog, result);
        let boosts = described
            .iter()
            .map(|boost| boost.name.as_str())
            .collect::<Vec<_>>()
            .join(" | ");
        csv_writer.serialize(ResultRow {
            rank: rank + 1,
            boostless_time: round_millis(result.boostless_time),
            boost_time: round_millis(result.boost_time),
            time_saved: round_millis(result.boostless_time - result.boost_time),
            boost_count: result.boost_rooms.len(),
            boosts,
            total_pacelock: round_millis(result.boost_rooms.iter().map(|b| b.pacelock).sum()),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn results_to_csv_string(
    sequence: &[String],
    catalog: &RoomCatalog,
    results: &[CalcSeedResult],
) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_results_csv(&mut buffer, sequence, catalog, results)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
