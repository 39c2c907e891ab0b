use nalgebra::{DMatrix, DVector};

use super::{CurvatureError, HessianUpdate, curvature};

/// Symmetric rank-one update.
///
/// With `u = δ − Sγ`, `S+ = S + uu'/(u'γ)`. Equivalent to
/// [`Huang::RANK_ONE`](super::Huang::RANK_ONE) for symmetric `S`. The result
/// need not stay positive-definite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankOne;

impl HessianUpdate for RankOne {
    fn update(
        &self,
        s: &DMatrix<f64>,
        gamma: &DVector<f64>,
        delta: &DVector<f64>,
    ) -> Result<DMatrix<f64>, CurvatureError> {
        let u = delta - s * gamma;
        let u_gamma = curvature(&u, gamma)?;
        Ok(s + &u * u.transpose() / u_gamma)
    }
}
