use descent_core::{Objective, Observer};
use nalgebra::DVector;
use tracing::debug;

use super::{
    Action, Error, Event, Solution, Status, SteepestDescent, evaluate,
    direction::{Context, Direction, Proposal},
    line_search::LineSearch,
};

/// A single minimization run over one problem.
///
/// Created by [`SteepestDescent::solve`]. The session owns the current
/// iterate, the last increment, the direction strategy's running state, and
/// its own copy of the line search; the problem is only read.
pub struct Session<'a, P, D, L>
where
    P: Objective,
    D: Direction<P>,
{
    solver: &'a SteepestDescent<D, L>,
    problem: &'a P,
    line_search: L,
    iterate: Option<Iterate<D::State>>,
}

struct Iterate<S> {
    x: DVector<f64>,
    state: S,
    last_increment: Option<DVector<f64>>,
    iters: usize,
}

/// Direction and step length of a completed step.
struct Step {
    direction: DVector<f64>,
    length: f64,
}

impl<'a, P, D, L> Session<'a, P, D, L>
where
    P: Objective,
    D: Direction<P>,
    L: LineSearch<P> + Clone,
{
    pub(super) fn new(solver: &'a SteepestDescent<D, L>, problem: &'a P) -> Self {
        Self {
            solver,
            problem,
            line_search: solver.line_search().clone(),
            iterate: None,
        }
    }

    /// Seeds the session with a starting point, discarding any previous run.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInitialPoint`] if `x0` has no coordinates.
    pub fn set_initials(&mut self, x0: DVector<f64>) -> Result<(), Error> {
        if x0.is_empty() {
            return Err(Error::EmptyInitialPoint);
        }

        self.line_search = self.solver.line_search().clone();
        self.iterate = Some(Iterate {
            state: self.solver.direction().init(&x0),
            x: x0,
            last_increment: None,
            iters: 0,
        });
        Ok(())
    }

    /// Advances one iteration and returns the new iterate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingInitialPoint`] before [`Self::set_initials`],
    /// or any error raised while evaluating the problem or choosing the step.
    pub fn step(&mut self) -> Result<&DVector<f64>, Error> {
        self.advance()?;
        self.minimizer().ok_or(Error::MissingInitialPoint)
    }

    fn advance(&mut self) -> Result<Step, Error> {
        let Some(iterate) = self.iterate.as_mut() else {
            return Err(Error::MissingInitialPoint);
        };

        let context = Context {
            problem: self.problem,
            config: self.solver.config(),
            x: &iterate.x,
            last_increment: iterate.last_increment.as_ref(),
        };
        let proposal = self.solver.direction().propose(&mut iterate.state, context)?;

        let (direction, length) = match proposal {
            Proposal::LineSearch(direction) => {
                Error::check_len("direction", iterate.x.len(), direction.len())?;
                let length = self.line_search.search(self.problem, &iterate.x, &direction)?;
                self.solver.direction().accept(&mut iterate.state, length);
                (direction, length)
            }
            Proposal::Fixed { direction, step } => {
                Error::check_len("direction", iterate.x.len(), direction.len())?;
                (direction, step)
            }
        };

        let increment = &direction * length;
        iterate.x += &increment;
        iterate.last_increment = Some(increment);
        iterate.iters += 1;

        Ok(Step { direction, length })
    }

    /// Returns the current iterate, or `None` before [`Self::set_initials`].
    #[must_use]
    pub fn minimizer(&self) -> Option<&DVector<f64>> {
        self.iterate.as_ref().map(|it| &it.x)
    }

    /// Evaluates the objective at the current iterate.
    ///
    /// The value is recomputed on every call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingInitialPoint`] before [`Self::set_initials`],
    /// or the objective's error.
    pub fn minimum(&self) -> Result<f64, Error> {
        let x = self.minimizer().ok_or(Error::MissingInitialPoint)?;
        evaluate::value(self.problem, x)
    }

    /// Returns the number of steps taken since the last [`Self::set_initials`].
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterate.as_ref().map_or(0, |it| it.iters)
    }

    /// Returns the increment `Δx` of the last step.
    #[must_use]
    pub fn last_increment(&self) -> Option<&DVector<f64>> {
        self.iterate.as_ref().and_then(|it| it.last_increment.as_ref())
    }

    /// Returns whether the last increment satisfied `‖Δx‖ ≤ epsilon`.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.last_increment()
            .is_some_and(|dx| dx.norm() <= self.solver.config().epsilon())
    }

    /// Returns the direction strategy's running state.
    #[must_use]
    pub fn state(&self) -> Option<&D::State> {
        self.iterate.as_ref().map(|it| &it.state)
    }

    /// Seeds the session with `x0` and steps until convergence or the
    /// iteration limit.
    ///
    /// # Errors
    ///
    /// Returns an error if `x0` is empty or any step fails.
    pub fn search(&mut self, x0: DVector<f64>) -> Result<Solution, Error> {
        self.search_observed(x0, ())
    }

    /// Like [`Self::search`], reporting each completed step to `observer`.
    ///
    /// # Errors
    ///
    /// Returns an error if `x0` is empty or any step fails.
    pub fn search_observed<Obs>(
        &mut self,
        x0: DVector<f64>,
        mut observer: Obs,
    ) -> Result<Solution, Error>
    where
        Obs: for<'e> Observer<Event<'e>, Action>,
    {
        self.set_initials(x0)?;
        let epsilon = self.solver.config().epsilon();

        for iter in 1..=self.solver.config().max_iters() {
            let step = self.advance()?;
            let (x, increment_norm) = match &self.iterate {
                Some(it) => (&it.x, it.last_increment.as_ref().map_or(0.0, |dx| dx.norm())),
                None => return Err(Error::MissingInitialPoint),
            };

            let event = Event {
                iter,
                x,
                direction: &step.direction,
                step_length: step.length,
                increment_norm,
            };
            if let Some(Action::StopEarly) = observer.observe(&event) {
                return self.solution(Status::StoppedByObserver);
            }

            if increment_norm <= epsilon {
                if step.length == 0.0 {
                    let gradient_norm = self.gradient_norm()?;
                    if gradient_norm > epsilon {
                        debug!(gradient_norm, "no decrease along direction");
                        return self.solution(Status::NoDescent);
                    }
                }
                return self.solution(Status::Converged);
            }
        }

        self.solution(Status::MaxIters)
    }

    fn gradient_norm(&self) -> Result<f64, Error> {
        let x = self.minimizer().ok_or(Error::MissingInitialPoint)?;
        Ok(evaluate::gradient(self.problem, x)?.norm())
    }

    fn solution(&self, status: Status) -> Result<Solution, Error> {
        let x = self.minimizer().ok_or(Error::MissingInitialPoint)?;
        Ok(Solution {
            status,
            x: x.clone(),
            value: evaluate::value(self.problem, x)?,
            iters: self.iterations(),
        })
    }
}
