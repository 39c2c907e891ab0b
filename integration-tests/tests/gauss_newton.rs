use approx::assert_relative_eq;
use descent_core::SumOfSquares;
use descent_integration_tests::test_functions::RosenbrockResiduals;
use descent_solvers::multivariate::{Config, Event, GaussNewton, Status, SteepestDescent};
use nalgebra::dvector;

#[test]
fn gauss_newton_solves_rosenbrock() {
    let config = Config::new(50, 1e-6).expect("valid config");
    let solver = SteepestDescent::new(config, GaussNewton);

    let mut values = Vec::new();
    let solution = solver
        .minimize(
            &SumOfSquares(RosenbrockResiduals),
            dvector![-1.2, 1.0],
            |event: &Event<'_>| {
                let x = event.x;
                values.push(100.0 * (x[1] - x[0] * x[0]).powi(2) + (1.0 - x[0]).powi(2));
                None
            },
        )
        .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x, dvector![1.0, 1.0], epsilon = 1e-8);
    assert!(values.windows(2).all(|pair| pair[1] <= pair[0]));
}
