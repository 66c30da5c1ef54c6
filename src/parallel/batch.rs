//! Batch calculation: many seeds against one catalog, one seed per parallel task.
//!
//! Each seed is independent and the catalog is read-only, so seeds can run on any thread.
//! Output order always matches input order.

use rayon::prelude::*;
use serde::Serialize;

use crate::calc::{calc_seed_custom, normalize_sequence, CalcSeedResult};
use crate::data::catalog::RoomCatalog;
use crate::parallel::pool::WorkerPool;

/// Best result (or error message) for one seed of a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedOutcome {
    pub rooms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best: Option<CalcSeedResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn calc_one(rooms: &[String], catalog: &RoomCatalog) -> SeedOutcome {
    let sequence = normalize_sequence(rooms);
    match calc_seed_custom(&sequence, catalog) {
        Ok(results) => SeedOutcome {
            rooms: sequence,
            best: results.into_iter().next(),
            error: None,
        },
        Err(err) => SeedOutcome {
            rooms: sequence,
            best: None,
            error: Some(err.to_string()),
        },
    }
}

/// Sequential batch; used as the baseline for the parallel path.
pub fn calc_seeds(seeds: &[Vec<String>], catalog: &RoomCatalog) -> Vec<SeedOutcome> {
    seeds.iter().map(|rooms| calc_one(rooms, catalog)).collect()
}

pub fn calc_seeds_parallel(
    seeds: &[Vec<String>],
    catalog: &RoomCatalog,
    pool: &WorkerPool,
) -> Vec<SeedOutcome> {
    log::info!("calculating {} seed(s) on {:?}", seeds.len(), pool);
    pool.install(|| {
        seeds
            .par_iter()
            .map(|rooms| calc_one(rooms, catalog))
            .collect()
    })
}
