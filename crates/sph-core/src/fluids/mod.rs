pub mod density;
pub mod pressure;
pub mod viscosity;

use std::f32::consts::PI;

/// Spiky smoothing kernel, 2D, normalized over the disk of radius `h`.
///
/// Returns `W(d, h) = 6 / (PI * h^4) * (h - d)^2` when `d < h`,
/// and `0.0` when `d >= h`.
#[inline]
pub fn spiky_kernel(d: f32, h: f32) -> f32 {
    if d >= h {
        return 0.0;
    }
    let diff = h - d;
    let h4 = h * h * h * h;
    6.0 / (PI * h4) * diff * diff
}

/// Derivative of [`spiky_kernel`] with respect to `d`.
///
/// Returns `-12 / (PI * h^4) * (h - d)` when `d < h`, and `0.0` otherwise.
/// Never positive: the weight only falls off with distance.
#[inline]
pub fn spiky_kernel_derivative(d: f32, h: f32) -> f32 {
    if d >= h {
        return 0.0;
    }
    let h4 = h * h * h * h;
    -12.0 / (PI * h4) * (h - d)
}

/// Poly6 smoothing kernel, 2D.
///
/// Returns `W(d, h) = 4 / (PI * h^8) * (h^2 - d^2)^3` when `d < h`,
/// and `0.0` when `d >= h`. Used for the viscosity blend, where a flat peak
/// suits better than the spiky one.
#[inline]
pub fn poly6_kernel(d: f32, h: f32) -> f32 {
    if d >= h {
        return 0.0;
    }
    let h2 = h * h;
    let diff = h2 - d * d;
    let h8 = h2 * h2 * h2 * h2;
    4.0 / (PI * h8) * diff * diff * diff
}
