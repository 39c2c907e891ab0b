use nalgebra::{DMatrix, DVector};

use super::{CurvatureError, HessianUpdate, curvature};

/// Davidon–Fletcher–Powell update.
///
/// ```text
/// S+ = S + δδ'/(δ'γ) − Sγγ'S/(γ'Sγ)
/// ```
///
/// Equivalent to [`Huang::DFP`](super::Huang::DFP) for symmetric `S`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dfp;

impl HessianUpdate for Dfp {
    fn update(
        &self,
        s: &DMatrix<f64>,
        gamma: &DVector<f64>,
        delta: &DVector<f64>,
    ) -> Result<DMatrix<f64>, CurvatureError> {
        let delta_gamma = curvature(delta, gamma)?;
        let s_gamma = s * gamma;
        let gamma_s_gamma = curvature(gamma, &s_gamma)?;

        Ok(s + delta * delta.transpose() / delta_gamma
            - &s_gamma * s_gamma.transpose() / gamma_s_gamma)
    }
}
