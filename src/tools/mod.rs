pub mod irradiation;
pub mod sun;
pub mod surface;

/// `asin` with its argument pulled back into [-1, 1] first.
/// Rounding can push a product of sines and cosines slightly past the domain.
pub(crate) fn asin_clamped(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).asin()
}

/// `acos` with its argument pulled back into [-1, 1] first.
pub(crate) fn acos_clamped(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).acos()
}
