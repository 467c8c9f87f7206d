use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Deterministic jitter in [-1, 1]² derived from a node id, so layouts are
/// reproducible for the same tree.
pub fn stable_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}
