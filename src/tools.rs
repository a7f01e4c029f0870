/// Seed plumbing: one public `u64` seed fans out into independent per-stage
/// streams so that changing, say, the wind stage never perturbs the plates.

pub fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Derive the sub-seed for one pipeline stage from the generation seed.
pub fn stage_seed(seed: u64, salt: u64) -> u64 {
    splitmix64(seed ^ salt.wrapping_mul(0x9E3779B97F4A7C15))
}

/// Truncate a stage seed for APIs that take a 32-bit seed (the noise crate).
pub fn noise_seed(seed: u64, salt: u64) -> u32 {
    stage_seed(seed, salt) as u32
}
