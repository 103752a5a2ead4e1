//! Debounce state machine, independent of time and I/O.

/// Where a poll stands after an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Evaluate again; carries the confirmations still required.
    Continue(u32),
    /// The predicate held for the full debounce streak.
    Succeed,
    /// The budget ran out before the streak completed.
    Expire,
}

impl Step {
    /// Fold one predicate result into the streak.
    ///
    /// `remaining` is the number of confirmations still owed; `debounce` is
    /// the value a `false` observation resets it to.
    pub fn observe(matched: bool, remaining: u32, debounce: u32) -> Step {
        match (matched, remaining) {
            (true, 0) => Step::Succeed,
            (true, n) => Step::Continue(n - 1),
            (false, _) => Step::Continue(debounce),
        }
    }
}
