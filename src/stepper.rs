//! Bounded step counter for navigating grid sequences

/// Position within a sequence of `total` steps.
///
/// Invariant: `total >= 1` and `current_step < total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepState {
    current_step: usize,
    total: usize,
}

impl StepState {
    /// Start at step 0. A `total` of 0 is treated as 1.
    pub fn new(total: usize) -> Self {
        Self { current_step: 0, total: total.max(1) }
    }

    /// Zero-based current step.
    pub fn current(&self) -> usize {
        self.current_step
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Advance by `increment` (at least 1), stopping at the last step.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrogrid::stepper::StepState;
    ///
    /// let mut state = StepState::new(5);
    /// assert_eq!(state.next(3), 3);
    /// assert_eq!(state.next(3), 4);
    /// assert_eq!(state.previous(10), 0);
    /// ```
    pub fn next(&mut self, increment: usize) -> usize {
        let increment = increment.max(1);
        self.current_step = self.current_step.saturating_add(increment).min(self.total - 1);
        self.current_step
    }

    /// Move back by `decrement` (at least 1), stopping at step 0.
    pub fn previous(&mut self, decrement: usize) -> usize {
        self.current_step = self.current_step.saturating_sub(decrement.max(1));
        self.current_step
    }

    /// Jump to `step`, clamped to the last step.
    pub fn goto(&mut self, step: usize) -> usize {
        self.current_step = step.min(self.total - 1);
        self.current_step
    }

    pub fn first(&mut self) -> usize {
        self.goto(0)
    }

    pub fn last(&mut self) -> usize {
        self.goto(self.total - 1)
    }

    pub fn is_first(&self) -> bool {
        self.current_step == 0
    }

    pub fn is_last(&self) -> bool {
        self.current_step + 1 == self.total
    }
}
