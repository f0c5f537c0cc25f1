//! Id-seeded hashes that keep page arrangements stable across renders.
//!
//! Both functions iterate UTF-16 code units so ids hash identically to the browser editor that
//! created the stored books. They are intentionally separate primitives: the journal variant
//! salts every step with the slot index and reduces to a unit interval.

/// 32-bit rolling hash: `h = h * 31 + unit`, wrapping at each step.
pub fn string_hash(id: &str) -> i32 {
    id.encode_utf16().fold(0i32, |h, unit| {
        h.wrapping_mul(31).wrapping_add(i32::from(unit))
    })
}

/// Stable index in `[0, n)` for `id`. `n == 0` is treated as `1`.
pub fn preset_index(id: &str, n: usize) -> usize {
    let n = n.max(1) as i64;
    (i64::from(string_hash(id)).abs() % n) as usize
}

/// Position-salted pseudo-random value in `[0, 1)` with three decimal digits of resolution.
pub fn seeded_unit(seed: &str, index: u32) -> f64 {
    let salt = (index as i32).wrapping_mul(31);
    let h = seed.encode_utf16().fold(0i32, |h, unit| {
        h.wrapping_mul(31)
            .wrapping_add(i32::from(unit))
            .wrapping_add(salt)
    });
    (i64::from(h).abs() % 1000) as f64 / 1000.0
}
