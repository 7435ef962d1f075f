//! Onsager's exact results for the infinite square-lattice Ising ferromagnet
//! (`J > 0`, `k_B = 1`), used as reference curves for the Monte Carlo estimates.

use std::f64::consts::{PI, SQRT_2};

/// Critical temperature `T_c = 2J / ln(1 + sqrt(2))`.
pub fn critical_temperature(coupling: f64) -> f64 {
    2.0 * coupling / (1.0 + SQRT_2).ln()
}

/// Spontaneous magnetization per spin, `(1 - sinh(2J/T)^-4)^(1/8)` below `T_c`
/// and zero above.
pub fn spontaneous_magnetization(coupling: f64, temperature: f64) -> f64 {
    if temperature >= critical_temperature(coupling) {
        return 0.0;
    }
    let s = (2.0 * coupling / temperature).sinh();
    (1.0 - s.powi(-4)).max(0.0).powf(0.125)
}

/// Internal energy per spin.
///
/// `u = -J coth(2K) [1 + (2/pi) (2 tanh^2(2K) - 1) K1(k)]` with `K = J/T`,
/// `k = 2 sinh(2K) / cosh^2(2K)` and `K1` the complete elliptic integral of
/// the first kind. The elliptic term vanishes at `T_c`, where `u = -sqrt(2) J`.
pub fn energy_per_spin(coupling: f64, temperature: f64) -> f64 {
    let b = 2.0 * coupling / temperature;
    let k = 2.0 * b.sinh() / b.cosh().powi(2);
    let k_prime = (1.0 - k * k).max(0.0).sqrt();

    let elliptic_term = if k_prime == 0.0 {
        0.0
    } else {
        (2.0 / PI) * (2.0 * b.tanh().powi(2) - 1.0) * elliptic_k(k_prime)
    };

    -coupling / b.tanh() * (1.0 + elliptic_term)
}

/// Complete elliptic integral of the first kind, `K(k) = pi / (2 AGM(1, k'))`,
/// taking the complementary modulus `k' = sqrt(1 - k^2)`.
fn elliptic_k(k_prime: f64) -> f64 {
    let (mut a, mut g) = (1.0f64, k_prime);
    for _ in 0..64 {
        if (a - g).abs() <= 1e-15 * a {
            break;
        }
        (a, g) = (0.5 * (a + g), (a * g).sqrt());
    }
    PI / (2.0 * a)
}
