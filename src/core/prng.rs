// Stateless deterministic noise (no external crates).
//
// This is NOT cryptographically secure.
// Visual noise must be reproducible across runs and platforms, so every value
// is a pure function of (frame index, element index).

#[inline]
fn mix64(mut x: u64) -> u64 {
    // splitmix64 finalizer.
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}

/// Hash of `frame` and `element` as raw bits.
#[inline]
pub fn frame_hash(frame: u64, element: u64) -> u64 {
    mix64(frame ^ mix64(element.wrapping_mul(0x2545F4914F6CDD1D)))
}

/// Uniform value in `[0, 1)` for a given frame and element.
#[inline]
pub fn frame_noise(frame: u64, element: u64) -> f32 {
    let mantissa = (frame_hash(frame, element) >> 40) as u32; // 24 bits
    (mantissa as f32) / ((1u32 << 24) as f32)
}

/// Uniform value in `[-1, 1)`.
#[inline]
pub fn frame_noise_signed(frame: u64, element: u64) -> f32 {
    frame_noise(frame, element) * 2.0 - 1.0
}
