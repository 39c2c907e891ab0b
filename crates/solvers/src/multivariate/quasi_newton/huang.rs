use nalgebra::{DMatrix, DVector};

use super::{CurvatureError, HessianUpdate, curvature};

/// Huang's generalized inverse-Hessian update.
///
/// With `u = θδ + φS'γ` and `w = ψδ + ωS'γ`:
///
/// ```text
/// S+ = S + δu'/(u'γ) − Sγw'/(w'γ)
/// ```
///
/// Every parameter choice satisfies the secant condition `S+γ = δ`. The
/// associated constants name the choices that reproduce well-known updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Huang {
    pub theta: f64,
    pub phi: f64,
    pub psi: f64,
    pub omega: f64,
}

impl Huang {
    /// Symmetric rank-one update.
    pub const RANK_ONE: Self = Self::new(1.0, -1.0, 1.0, -1.0);

    /// Davidon–Fletcher–Powell update.
    pub const DFP: Self = Self::new(1.0, 0.0, 0.0, 1.0);

    /// McCormick's update. See [`McCormick`](super::McCormick).
    pub const MCCORMICK: Self = Self::new(1.0, 0.0, 1.0, 0.0);

    #[must_use]
    pub const fn new(theta: f64, phi: f64, psi: f64, omega: f64) -> Self {
        Self {
            theta,
            phi,
            psi,
            omega,
        }
    }
}

impl HessianUpdate for Huang {
    fn update(
        &self,
        s: &DMatrix<f64>,
        gamma: &DVector<f64>,
        delta: &DVector<f64>,
    ) -> Result<DMatrix<f64>, CurvatureError> {
        let st_gamma = s.tr_mul(gamma);
        let u = delta * self.theta + &st_gamma * self.phi;
        let w = delta * self.psi + &st_gamma * self.omega;

        let u_gamma = curvature(&u, gamma)?;
        let w_gamma = curvature(&w, gamma)?;

        Ok(s + delta * u.transpose() / u_gamma - (s * gamma) * w.transpose() / w_gamma)
    }
}
