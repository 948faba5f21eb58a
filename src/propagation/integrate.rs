//! Numerical integration of a walk's transmission over incidence angles
//!
//! The incidence angle θ ranges over `[0, π/2]`. Wherever the rotation
//! parity accumulated along the walk is odd, the local angle is read as
//! `π/2 − θ`. The quadrature domain is split at the collected junction
//! saturation angles, where the piecewise transmission formulas are not
//! smooth.

use std::f64::consts::FRAC_PI_2;

use itertools::Itertools;

use crate::Error;
use crate::propagation::walk::Integrand;

/// Absolute error target handed to the adaptive quadrature
const TARGET_ERROR: f64 = 1e-9;

/// Two cut angles closer than this collapse into one
const CUT_EPSILON: f64 = 1e-12;

/// Contribution of a single walk: integral value and error estimate.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PathPower {
    pub power: f64,
    pub error: f64,
}

/// Integrates the composed transmission of one walk over `[0, π/2]`.
///
/// # Errors
///
/// [`Error::IntegrationFailure`] if the quadrature returns a non-finite
/// value or error estimate.
pub(crate) fn integrate_path(integrand: &Integrand) -> Result<PathPower, Error> {
    let mut power = 0.0;
    let mut error = 0.0;
    for (lower, upper) in spans(&integrand.breaks) {
        let output = quadrature::double_exponential::integrate(
            |theta| integrand.evaluate(theta),
            lower,
            upper,
            TARGET_ERROR,
        );
        if !output.integral.is_finite() || !output.error_estimate.is_finite() {
            return Err(Error::IntegrationFailure(format!(
                "quadrature diverged on [{lower}, {upper}] for path {:?}",
                integrand.path
            )));
        }
        power += output.integral;
        error += output.error_estimate;
    }
    Ok(PathPower { power, error })
}

/// Splits `[0, π/2]` at the interior cut angles, sorted and deduplicated.
fn spans(cuts: &[f64]) -> Vec<(f64, f64)> {
    let mut bounds = vec![0.0];
    let mut interior: Vec<f64> = cuts
        .iter()
        .copied()
        .filter(|angle| *angle > CUT_EPSILON && *angle < FRAC_PI_2 - CUT_EPSILON)
        .collect();
    interior.sort_by(f64::total_cmp);
    for angle in interior {
        if angle - bounds[bounds.len() - 1] > CUT_EPSILON {
            bounds.push(angle);
        }
    }
    bounds.push(FRAC_PI_2);
    bounds.iter().copied().tuple_windows().collect()
}

impl Integrand {
    /// Product of all edge attenuation and junction transmission terms at
    /// one incidence angle. Edge `e` and the junction ahead of it share
    /// the parity accumulated up to that junction.
    pub(crate) fn evaluate(&self, theta: f64) -> f64 {
        let mut value = 1.0;
        for (e, (&length, &alpha)) in self.lengths.iter().zip(&self.alphas).enumerate() {
            let angle = if self.rotations[e] % 2 == 1 {
                FRAC_PI_2 - theta
            } else {
                theta
            };
            value *= edge_attenuation(length, alpha, angle);
            if e > 0 {
                value *= self.transmissions[e - 1].evaluate(angle);
            }
        }
        value
    }
}

/// `(1 − α)^(len·tanθ)`: power retained over one street segment
pub(crate) fn edge_attenuation(length: f64, alpha: f64, theta: f64) -> f64 {
    (1.0 - alpha).powf(length * theta.tan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagation::junction::Transmission;

    fn single_edge(length: f64, alpha: f64) -> Integrand {
        Integrand {
            path: vec![0, 1],
            transmissions: Vec::new(),
            rotations: vec![0],
            breaks: Vec::new(),
            lengths: vec![length],
            alphas: vec![alpha],
        }
    }

    #[test]
    fn lossless_edge_integrates_to_half_pi() {
        let result = integrate_path(&single_edge(10.0, 0.0)).unwrap();
        assert!((result.power - FRAC_PI_2).abs() < 1e-6);
        assert!(result.error >= 0.0);
    }

    #[test]
    fn absorption_strictly_reduces_power() {
        let lossless = integrate_path(&single_edge(10.0, 0.0)).unwrap();
        let mild = integrate_path(&single_edge(10.0, 0.05)).unwrap();
        let strong = integrate_path(&single_edge(10.0, 0.5)).unwrap();
        assert!(mild.power < lossless.power);
        assert!(strong.power < mild.power);
        assert!(strong.power > 0.0);
    }

    #[test]
    fn odd_parity_reads_the_complementary_angle() {
        let rotated = Integrand {
            path: vec![0, 1, 2],
            transmissions: vec![Transmission::Constant(1.0)],
            rotations: vec![0, 1],
            breaks: Vec::new(),
            lengths: vec![5.0, 5.0],
            alphas: vec![0.3, 0.3],
        };
        let theta = 0.2;
        let expected = edge_attenuation(5.0, 0.3, theta)
            * edge_attenuation(5.0, 0.3, FRAC_PI_2 - theta);
        assert!((rotated.evaluate(theta) - expected).abs() < 1e-12);
    }

    #[test]
    fn junction_term_multiplies_in() {
        let integrand = Integrand {
            path: vec![0, 1, 2],
            transmissions: vec![Transmission::Constant(0.25)],
            rotations: vec![0, 0],
            breaks: Vec::new(),
            lengths: vec![5.0, 5.0],
            alphas: vec![0.0, 0.0],
        };
        let result = integrate_path(&integrand).unwrap();
        assert!((result.power - 0.25 * FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn spans_split_at_interior_cuts_only() {
        use std::f64::consts::FRAC_PI_4;
        let pieces = spans(&[FRAC_PI_4, FRAC_PI_4, -1.0, 2.0]);
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0], (0.0, FRAC_PI_4));
        assert_eq!(pieces[1], (FRAC_PI_4, FRAC_PI_2));
    }
}

