/// Watches a running search and may steer it.
///
/// Every solver in this workspace reports progress as events: bracket
/// searches emit one per evaluated candidate, descent searches one per
/// completed step. After each event the solver asks its observer for an
/// action; `None` means keep going.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer, and `()` is the
/// observer that never acts. Searches without an observer argument pass `()`.
///
/// ```
/// use descent_core::Observer;
///
/// let mut seen = 0;
/// let mut count = |_: &f64| -> Option<()> {
///     seen += 1;
///     None
/// };
/// assert!(count.observe(&1.5).is_none());
/// assert_eq!(seen, 1);
/// ```
pub trait Observer<E, A> {
    /// Receives one event and returns the action to take, if any.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Stop {
        Now,
    }

    fn drive<O: Observer<usize, Stop>>(mut observer: O, events: usize) -> Option<usize> {
        (0..events).find(|event| observer.observe(event).is_some())
    }

    #[test]
    fn unit_observer_never_acts() {
        assert_eq!(drive((), 10), None);
    }

    #[test]
    fn closure_observer_can_stop() {
        let mut seen = Vec::new();
        let stopped_at = drive(
            |event: &usize| {
                seen.push(*event);
                (*event == 3).then_some(Stop::Now)
            },
            10,
        );

        assert_eq!(stopped_at, Some(3));
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }
}
