use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Derive the per-cycle seed. Identical `(seed, cycle)` pairs give identical streams.
pub fn cycle_seed(seed: u64, cycle: u32) -> u64 {
    seed ^ u64::from(cycle)
}

/// Create the RNG for one cycle.
///
/// Without a seed the stream comes from the OS and runs are not reproducible.
pub fn cycle_rng(seed: Option<u64>, cycle: u32) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(cycle_seed(seed, cycle)),
        None => {
            tracing::debug!(cycle, "no seed supplied, using os entropy");
            SmallRng::from_os_rng()
        }
    }
}
