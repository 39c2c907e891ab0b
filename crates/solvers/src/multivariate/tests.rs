use super::*;

use std::convert::Infallible;

use approx::assert_relative_eq;
use descent_core::{LeastSquaresProblem, Objective, SumOfSquares, TwiceDifferentiable};
use nalgebra::{DMatrix, DVector, dmatrix, dvector};

/// f(x) = (x0 - 1)² + 4·(x1 + 2)², minimized at (1, -2).
#[derive(Debug)]
struct Bowl;

impl Objective for Bowl {
    type Error = Infallible;

    fn value(&self, x: &DVector<f64>) -> Result<f64, Self::Error> {
        Ok((x[0] - 1.0).powi(2) + 4.0 * (x[1] + 2.0).powi(2))
    }

    fn gradient(&self, x: &DVector<f64>) -> Result<DVector<f64>, Self::Error> {
        Ok(dvector![2.0 * (x[0] - 1.0), 8.0 * (x[1] + 2.0)])
    }
}

impl TwiceDifferentiable for Bowl {
    fn hessian(&self, _x: &DVector<f64>) -> Result<DMatrix<f64>, Self::Error> {
        Ok(dmatrix![2.0, 0.0; 0.0, 8.0])
    }
}

/// f(x) = ½·x'Ax − b'x with a symmetric positive-definite `a`.
#[derive(Debug)]
struct Quadratic {
    a: DMatrix<f64>,
    b: DVector<f64>,
}

impl Quadratic {
    fn three_by_three() -> Self {
        Self {
            a: dmatrix![
                4.0, 1.0, 0.0;
                1.0, 3.0, 1.0;
                0.0, 1.0, 2.0
            ],
            b: dvector![1.0, 2.0, 3.0],
        }
    }

    fn minimizer(&self) -> DVector<f64> {
        self.a.clone().lu().solve(&self.b).expect("matrix is invertible")
    }
}

impl Objective for Quadratic {
    type Error = Infallible;

    fn value(&self, x: &DVector<f64>) -> Result<f64, Self::Error> {
        Ok(0.5 * x.dot(&(&self.a * x)) - self.b.dot(x))
    }

    fn gradient(&self, x: &DVector<f64>) -> Result<DVector<f64>, Self::Error> {
        Ok(&self.a * x - &self.b)
    }
}

/// Closed-form exact line search for a [`Quadratic`].
#[derive(Debug, Clone, Copy)]
struct ClosedForm;

impl LineSearch<Quadratic> for ClosedForm {
    fn search(
        &mut self,
        problem: &Quadratic,
        x: &DVector<f64>,
        direction: &DVector<f64>,
    ) -> Result<f64, Error> {
        let curvature = direction.dot(&(&problem.a * direction));
        if curvature == 0.0 {
            return Ok(0.0);
        }
        let g = &problem.a * x - &problem.b;
        Ok(-g.dot(direction) / curvature)
    }
}

/// Residuals r(x) = Ax − b for an overdetermined 3×2 system.
#[derive(Debug)]
struct Overdetermined;

impl LeastSquaresProblem for Overdetermined {
    type Error = Infallible;

    fn residuals(&self, x: &DVector<f64>) -> Result<DVector<f64>, Self::Error> {
        Ok(dvector![x[0] - 1.0, x[1] - 2.0, x[0] + x[1] - 4.0])
    }

    fn jacobian(&self, _x: &DVector<f64>) -> Result<DMatrix<f64>, Self::Error> {
        Ok(dmatrix![
            1.0, 0.0;
            0.0, 1.0;
            1.0, 1.0
        ])
    }
}

/// A single residual r(x) = x0 + x1 − 2 with a rank-one Jacobian.
#[derive(Debug)]
struct Underdetermined;

impl LeastSquaresProblem for Underdetermined {
    type Error = Infallible;

    fn residuals(&self, x: &DVector<f64>) -> Result<DVector<f64>, Self::Error> {
        Ok(dvector![x[0] + x[1] - 2.0])
    }

    fn jacobian(&self, _x: &DVector<f64>) -> Result<DMatrix<f64>, Self::Error> {
        Ok(dmatrix![1.0, 1.0])
    }
}

/// f(x) = x0⁴ + x1², whose Hessian is singular along x0 = 0.
#[derive(Debug)]
struct FlatQuartic;

impl Objective for FlatQuartic {
    type Error = Infallible;

    fn value(&self, x: &DVector<f64>) -> Result<f64, Self::Error> {
        Ok(x[0].powi(4) + x[1].powi(2))
    }

    fn gradient(&self, x: &DVector<f64>) -> Result<DVector<f64>, Self::Error> {
        Ok(dvector![4.0 * x[0].powi(3), 2.0 * x[1]])
    }
}

impl TwiceDifferentiable for FlatQuartic {
    fn hessian(&self, x: &DVector<f64>) -> Result<DMatrix<f64>, Self::Error> {
        Ok(dmatrix![12.0 * x[0].powi(2), 0.0; 0.0, 2.0])
    }
}

#[derive(Debug, thiserror::Error)]
#[error("logarithm undefined at {0}")]
struct OutsideDomain(f64);

/// f(x) = x0 − ln(x0), defined only for x0 > 0.
#[derive(Debug)]
struct Logarithmic;

impl Objective for Logarithmic {
    type Error = OutsideDomain;

    fn value(&self, x: &DVector<f64>) -> Result<f64, Self::Error> {
        if x[0] <= 0.0 {
            return Err(OutsideDomain(x[0]));
        }
        Ok(x[0] - x[0].ln())
    }

    fn gradient(&self, x: &DVector<f64>) -> Result<DVector<f64>, Self::Error> {
        if x[0] <= 0.0 {
            return Err(OutsideDomain(x[0]));
        }
        Ok(dvector![1.0 - 1.0 / x[0]])
    }
}

/// Returns a gradient with one coordinate too many.
#[derive(Debug)]
struct LongGradient;

impl Objective for LongGradient {
    type Error = Infallible;

    fn value(&self, x: &DVector<f64>) -> Result<f64, Self::Error> {
        Ok(x.norm_squared())
    }

    fn gradient(&self, x: &DVector<f64>) -> Result<DVector<f64>, Self::Error> {
        Ok(DVector::zeros(x.len() + 1))
    }
}

fn config(max_iters: usize, epsilon: f64) -> Config {
    Config::new(max_iters, epsilon).expect("valid config")
}

#[test]
fn stepping_before_set_initials_fails() {
    let solver = SteepestDescent::new(Config::default(), FirstOrder::line_search());
    let mut session = solver.solve(&Bowl);

    assert!(matches!(session.step(), Err(Error::MissingInitialPoint)));
    assert!(matches!(session.minimum(), Err(Error::MissingInitialPoint)));
    assert!(session.minimizer().is_none());
    assert_eq!(session.iterations(), 0);
    assert!(!session.is_converged());
}

#[test]
fn empty_initial_point_is_rejected() {
    let solver = SteepestDescent::new(Config::default(), FirstOrder::line_search());

    let mut session = solver.solve(&Bowl);
    assert!(matches!(
        session.set_initials(DVector::zeros(0)),
        Err(Error::EmptyInitialPoint)
    ));
    assert!(matches!(
        solver.minimize_unobserved(&Bowl, DVector::zeros(0)),
        Err(Error::EmptyInitialPoint)
    ));
}

#[test]
fn wrong_gradient_length_is_reported() {
    let solver = SteepestDescent::new(Config::default(), QuasiNewton::new(Bfgs::default()));
    let error = solver
        .minimize_unobserved(&LongGradient, dvector![1.0, 1.0])
        .expect_err("gradient has the wrong length");

    assert!(matches!(
        error,
        Error::DimensionMismatch {
            what: "gradient",
            expected: 2,
            actual: 3,
        }
    ));
}

#[test]
fn objective_errors_propagate() {
    let solver = SteepestDescent::new(Config::default(), FirstOrder::line_search());
    let error = solver
        .minimize_unobserved(&Logarithmic, dvector![-1.0])
        .expect_err("starting point is outside the domain");

    assert!(matches!(error, Error::Objective(_)));
    assert!(error.to_string().contains("logarithm undefined at -1"));
}

#[test]
fn session_steps_one_iteration_at_a_time() {
    let solver = SteepestDescent::new(config(100, 1e-10), NewtonRaphson::default());
    let mut session = solver.solve(&Bowl);
    session.set_initials(dvector![5.0, 5.0]).unwrap();

    let x = session.step().unwrap().clone();
    assert_relative_eq!(x, dvector![1.0, -2.0], epsilon = 1e-10);
    assert_eq!(session.iterations(), 1);
    assert!(!session.is_converged());

    let increment = session.last_increment().unwrap();
    assert_relative_eq!(increment, &dvector![-4.0, -7.0], epsilon = 1e-10);
    assert_relative_eq!(session.minimum().unwrap(), 0.0, epsilon = 1e-18);
}

#[test]
fn stepping_after_convergence_stays_put() {
    let solver = SteepestDescent::new(config(100, 1e-8), NewtonRaphson::default());
    let mut session = solver.solve(&Bowl);

    let solution = session.search(dvector![5.0, 5.0]).unwrap();
    assert_eq!(solution.status, Status::Converged);
    assert!(session.is_converged());

    let before = solution.x;
    let after = session.step().unwrap().clone();
    assert!((after - before).norm() <= solver.config().epsilon());
}

#[test]
fn set_initials_restarts_the_session() {
    let solver = SteepestDescent::new(Config::default(), QuasiNewton::new(Bfgs::default()));
    let mut session = solver.solve(&Bowl);

    session.set_initials(dvector![5.0, 5.0]).unwrap();
    session.step().unwrap();
    session.step().unwrap();
    assert_eq!(session.iterations(), 2);

    session.set_initials(dvector![0.0, 0.0]).unwrap();
    assert_eq!(session.iterations(), 0);
    assert!(session.last_increment().is_none());
    assert_eq!(session.minimizer(), Some(&dvector![0.0, 0.0]));
    assert_eq!(
        session.state().map(|s| &s.inverse_hessian),
        Some(&DMatrix::identity(2, 2))
    );
}

#[test]
fn newton_survives_a_singular_hessian() {
    let solver = SteepestDescent::new(Config::default(), NewtonRaphson::default());
    let mut session = solver.solve(&FlatQuartic);
    session.set_initials(dvector![0.0, 1.0]).unwrap();

    let x = session.step().unwrap();
    assert!(x.iter().all(|v| v.is_finite()));
    assert_relative_eq!(x, &dvector![0.0, 0.0], epsilon = 1e-12);
}

fn terminates_on_quadratic<U: HessianUpdate>(update: U) {
    let problem = Quadratic::three_by_three();
    let solver =
        SteepestDescent::new(config(100, 1e-12), QuasiNewton::new(update)).with_line_search(ClosedForm);

    let mut session = solver.solve(&problem);
    session.set_initials(DVector::zeros(3)).unwrap();
    for _ in 0..3 {
        session.step().unwrap();
    }

    assert_relative_eq!(
        session.minimizer().unwrap(),
        &problem.minimizer(),
        epsilon = 1e-10
    );
}

#[test]
fn bfgs_terminates_on_quadratic_with_exact_steps() {
    terminates_on_quadratic(Bfgs::default());
}

#[test]
fn dfp_terminates_on_quadratic_with_exact_steps() {
    terminates_on_quadratic(Dfp);
}

#[test]
fn rank_one_terminates_on_quadratic_with_exact_steps() {
    terminates_on_quadratic(RankOne);
}

#[test]
fn rank_one_fails_fast_on_degenerate_curvature() {
    // With A = I the identity is already exact, so the first rank-one
    // correction is zero.
    let problem = Quadratic {
        a: DMatrix::identity(2, 2),
        b: DVector::zeros(2),
    };
    let solver = SteepestDescent::new(Config::default(), QuasiNewton::new(RankOne))
        .with_line_search(ClosedForm);

    let error = solver
        .minimize_unobserved(&problem, dvector![1.0, 2.0])
        .expect_err("rank-one denominator vanishes");
    assert!(matches!(error, Error::DegenerateCurvature(_)));
}

#[test]
fn first_order_with_line_search_converges() {
    let solver = SteepestDescent::new(config(100, 1e-10), FirstOrder::line_search());
    let solution = solver
        .minimize_unobserved(&Bowl, dvector![5.0, 5.0])
        .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x, dvector![1.0, -2.0], epsilon = 1e-8);
}

#[test]
fn first_order_with_analytic_step_converges() {
    let solver = SteepestDescent::new(config(100, 1e-10), FirstOrder::analytic());
    let solution = solver
        .minimize_unobserved(&Bowl, dvector![5.0, 5.0])
        .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x, dvector![1.0, -2.0], epsilon = 1e-8);
}

#[test]
fn gauss_newton_solves_linear_least_squares() {
    let solver = SteepestDescent::new(config(20, 1e-10), GaussNewton);
    let solution = solver
        .minimize_unobserved(&SumOfSquares(Overdetermined), dvector![0.0, 0.0])
        .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x, dvector![4.0 / 3.0, 7.0 / 3.0], epsilon = 1e-10);
    assert_relative_eq!(solution.value, 1.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn gauss_newton_handles_rank_deficient_jacobian() {
    let solver = SteepestDescent::new(config(50, 1e-10), GaussNewton);
    let solution = solver
        .minimize_unobserved(&SumOfSquares(Underdetermined), dvector![3.0, 4.0])
        .expect("should converge");

    assert!(solution.x.iter().all(|v| v.is_finite()));
    assert_relative_eq!(solution.x[0] + solution.x[1], 2.0, epsilon = 1e-8);
}

#[test]
fn solution_value_matches_objective() {
    let solver = SteepestDescent::new(config(3, 1e-12), QuasiNewton::new(Dfp));
    let solution = solver
        .minimize_unobserved(&Bowl, dvector![5.0, 5.0])
        .unwrap();

    assert_eq!(solution.value, Bowl.value(&solution.x).unwrap());
}

#[test]
fn reports_max_iters() {
    let solver = SteepestDescent::new(config(1, 1e-10), QuasiNewton::new(Bfgs::default()));
    let solution = solver
        .minimize_unobserved(&Bowl, dvector![5.0, 5.0])
        .unwrap();
    assert_eq!(solution.status, Status::MaxIters);
    assert_eq!(solution.iters, 1);

    let solution = SteepestDescent::new(config(1, 1e-10), GaussNewton)
        .minimize_unobserved(&SumOfSquares(Underdetermined), dvector![3.0, 4.0])
        .unwrap();
    assert_eq!(solution.status, Status::MaxIters);
}

#[test]
fn observer_sees_each_step() {
    let solver = SteepestDescent::new(config(100, 1e-10), FirstOrder::line_search());
    let mut seen = Vec::new();

    let solution = solver
        .minimize(&Bowl, dvector![5.0, 5.0], |event: &Event<'_>| {
            seen.push((
                event.iter,
                event.step_length * event.direction.norm(),
                event.increment_norm,
            ));
            None
        })
        .expect("should converge");

    assert_eq!(seen.len(), solution.iters);
    for (i, (iter, scaled, increment_norm)) in seen.into_iter().enumerate() {
        assert_eq!(iter, i + 1);
        assert_relative_eq!(scaled, increment_norm, max_relative = 1e-12);
    }
}

#[test]
fn observer_can_stop_early() {
    let solver = SteepestDescent::new(Config::default(), QuasiNewton::new(Bfgs::default()));

    let solution = solver
        .minimize(&Bowl, dvector![5.0, 5.0], |event: &Event<'_>| {
            (event.iter == 1).then_some(Action::StopEarly)
        })
        .unwrap();

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.iters, 1);
}

#[test]
fn sessions_are_independent() {
    let solver = SteepestDescent::new(Config::default(), QuasiNewton::new(Bfgs::default()));
    let mut first = solver.solve(&Bowl);
    let mut second = solver.solve(&Bowl);

    first.set_initials(dvector![5.0, 5.0]).unwrap();
    first.step().unwrap();
    assert!(second.minimizer().is_none());

    second.set_initials(dvector![5.0, 5.0]).unwrap();
    second.step().unwrap();
    assert_eq!(first.minimizer(), second.minimizer());
    assert_eq!(first.state(), second.state());
}

#[test]
fn one_solver_runs_on_many_threads() {
    let solver = SteepestDescent::new(config(100, 1e-10), QuasiNewton::new(Bfgs::default()));
    let expected = solver
        .minimize_unobserved(&Bowl, dvector![5.0, 5.0])
        .unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| solver.minimize_unobserved(&Bowl, dvector![5.0, 5.0])))
            .collect();

        for handle in handles {
            let solution = handle.join().expect("thread panicked").unwrap();
            assert_eq!(solution, expected);
        }
    });
}

/// f(x) = (x0 − 3)²/3, minimized at 3.
#[derive(Debug)]
struct Shifted;

impl Objective for Shifted {
    type Error = Infallible;

    fn value(&self, x: &DVector<f64>) -> Result<f64, Self::Error> {
        Ok((x[0] - 3.0).powi(2) / 3.0)
    }

    fn gradient(&self, x: &DVector<f64>) -> Result<DVector<f64>, Self::Error> {
        Ok(dvector![2.0 * (x[0] - 3.0) / 3.0])
    }
}

#[test]
fn gradient_descent_with_exact_line_search() {
    // From 0 the first ray has f(1) = f(2) on either side of its minimum.
    let solver = SteepestDescent::new(config(50, 1e-8), FirstOrder::line_search())
        .with_line_search(Exact::default());
    let solution = solver
        .minimize_unobserved(&Shifted, dvector![0.0])
        .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x, dvector![3.0], epsilon = 1e-6);
}

#[test]
fn bfgs_with_exact_line_search() {
    let solver = SteepestDescent::new(config(50, 1e-8), QuasiNewton::new(Bfgs::default()))
        .with_line_search(Exact::default());
    let solution = solver
        .minimize_unobserved(&Bowl, dvector![5.0, 5.0])
        .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x, dvector![1.0, -2.0], epsilon = 1e-6);
}

/// f(x) = x0² − x1² + x1⁴, with an indefinite Hessian near the x0 axis.
#[derive(Debug)]
struct Saddle;

impl Objective for Saddle {
    type Error = Infallible;

    fn value(&self, x: &DVector<f64>) -> Result<f64, Self::Error> {
        Ok(x[0] * x[0] - x[1] * x[1] + x[1].powi(4))
    }

    fn gradient(&self, x: &DVector<f64>) -> Result<DVector<f64>, Self::Error> {
        Ok(dvector![2.0 * x[0], -2.0 * x[1] + 4.0 * x[1].powi(3)])
    }
}

impl TwiceDifferentiable for Saddle {
    fn hessian(&self, x: &DVector<f64>) -> Result<DMatrix<f64>, Self::Error> {
        Ok(dmatrix![2.0, 0.0; 0.0, -2.0 + 12.0 * x[1] * x[1]])
    }
}

#[test]
fn uphill_direction_is_not_reported_as_converged() {
    let solver = SteepestDescent::new(Config::default(), NewtonRaphson::default());
    let solution = solver
        .minimize_unobserved(&Saddle, dvector![0.0, 0.1])
        .unwrap();

    assert_eq!(solution.status, Status::NoDescent);
    assert_eq!(solution.iters, 1);
    assert_eq!(solution.x, dvector![0.0, 0.1]);
}
