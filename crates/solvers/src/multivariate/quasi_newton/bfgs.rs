use nalgebra::{DMatrix, DVector};
use tracing::debug;

use super::{CurvatureError, Dfp, HessianUpdate, curvature};

/// Broyden–Fletcher–Goldfarb–Shanno update in closed form.
///
/// ```text
/// S+ = S + (1 + γ'Sγ/γ'δ)·δδ'/γ'δ − (δγ'S + Sγδ')/γ'δ
/// ```
///
/// With the Fletcher switch enabled, the DFP update is used instead whenever
/// `γ'δ − γ'Sγ > 0` for the incoming `S`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bfgs {
    fletcher_switch: bool,
}

impl Bfgs {
    #[must_use]
    pub fn new(fletcher_switch: bool) -> Self {
        Self { fletcher_switch }
    }

    /// Returns whether the Fletcher switch is enabled.
    #[must_use]
    pub fn fletcher_switch(&self) -> bool {
        self.fletcher_switch
    }
}

impl HessianUpdate for Bfgs {
    fn update(
        &self,
        s: &DMatrix<f64>,
        gamma: &DVector<f64>,
        delta: &DVector<f64>,
    ) -> Result<DMatrix<f64>, CurvatureError> {
        let gamma_delta = curvature(gamma, delta)?;
        let s_gamma = s * gamma;
        let gamma_s_gamma = gamma.dot(&s_gamma);

        if self.fletcher_switch && gamma_delta - gamma_s_gamma > 0.0 {
            debug!(gamma_delta, gamma_s_gamma, "Fletcher switch, using DFP update");
            return Dfp.update(s, gamma, delta);
        }

        let gamma_s = s.tr_mul(gamma);
        let scale = (1.0 + gamma_s_gamma / gamma_delta) / gamma_delta;

        Ok(s + delta * delta.transpose() * scale
            - (delta * gamma_s.transpose() + &s_gamma * delta.transpose()) / gamma_delta)
    }
}

/// Damped BFGS update of a Hessian approximation `B` (not its inverse).
///
/// When the curvature `δ'γ` is below `0.2·δ'Bδ`, the gradient change is
/// blended with `Bδ`:
///
/// ```text
/// θ = 1                                 if δ'γ ≥ 0.2·δ'Bδ
/// θ = 0.8·δ'Bδ / (δ'Bδ − δ'γ)           otherwise
/// r = θγ + (1 − θ)Bδ
/// B+ = B − Bδδ'B/(δ'Bδ) + rr'/(δ'r)
/// ```
///
/// so that `δ'r ≥ 0.2·δ'Bδ > 0` and `B+` stays positive-definite whenever `B`
/// is.
///
/// # Errors
///
/// Returns [`CurvatureError`] if `δ'Bδ` or `δ'r` is too close to zero.
pub fn damped_update(
    b: &DMatrix<f64>,
    delta: &DVector<f64>,
    gamma: &DVector<f64>,
) -> Result<DMatrix<f64>, CurvatureError> {
    let b_delta = b * delta;
    let delta_b_delta = curvature(delta, &b_delta)?;
    let delta_gamma = delta.dot(gamma);

    let theta = if delta_gamma >= 0.2 * delta_b_delta {
        1.0
    } else {
        0.8 * delta_b_delta / (delta_b_delta - delta_gamma)
    };
    let r = gamma * theta + &b_delta * (1.0 - theta);
    let delta_r = curvature(delta, &r)?;

    Ok(b - &b_delta * b_delta.transpose() / delta_b_delta + &r * r.transpose() / delta_r)
}
