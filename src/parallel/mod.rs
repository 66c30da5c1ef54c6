pub mod batch;
pub mod pool;

pub use batch::{calc_seeds, calc_seeds_parallel, SeedOutcome};
pub use pool::WorkerPool;
