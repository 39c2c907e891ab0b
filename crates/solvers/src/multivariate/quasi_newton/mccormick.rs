use nalgebra::{DMatrix, DVector};

use super::{CurvatureError, HessianUpdate, Huang};

/// McCormick's update, `S+ = S + (δ − Sγ)δ'/(δ'γ)`.
///
/// **Not recommended.** The update is not symmetric and is known to converge
/// unreliably. It is kept for completeness as
/// [`Huang::MCCORMICK`](super::Huang::MCCORMICK).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct McCormick;

impl HessianUpdate for McCormick {
    fn update(
        &self,
        s: &DMatrix<f64>,
        gamma: &DVector<f64>,
        delta: &DVector<f64>,
    ) -> Result<DMatrix<f64>, CurvatureError> {
        Huang::MCCORMICK.update(s, gamma, delta)
    }
}
