use vital_model::HealthState;

use crate::client::ProbeOutcome;

/// State change reported by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: HealthState,
    pub to: HealthState,
}

/// Finite-state tracker for observed service health.
///
/// Driven exclusively by probe outcomes:
/// - a pass resets the failure streak and moves to `Healthy`;
/// - a fail extends the streak; within budget the state is `Probing`
///   (verdict pending), at the budget it becomes `Unhealthy`;
/// - `Unhealthy` is latched: outcomes are still counted, but leaving the
///   state requires [`HealthTracker::reset`]. Whether anything resets it is
///   an orchestrator decision, not ours.
#[derive(Debug, Clone)]
pub struct HealthTracker {
    state: HealthState,
    failures: u32,
    budget: u32,
}

impl HealthTracker {
    /// Create a tracker in `Starting` with the given consecutive-failure budget.
    pub fn new(budget: u32) -> Self {
        Self {
            state: HealthState::Starting,
            failures: 0,
            budget,
        }
    }

    /// Current observed state.
    #[inline]
    pub fn state(&self) -> HealthState {
        self.state
    }

    /// Length of the current failure streak.
    #[inline]
    pub fn consecutive_failures(&self) -> u32 {
        self.failures
    }

    /// Mark the end of the start period. Only meaningful from `Starting`.
    pub fn begin_probing(&mut self) -> Option<Transition> {
        match self.state {
            HealthState::Starting => self.transition_to(HealthState::Probing),
            _ => None,
        }
    }

    /// Feed one probe outcome; returns the transition it caused, if any.
    pub fn observe(&mut self, outcome: &ProbeOutcome) -> Option<Transition> {
        if outcome.is_pass() {
            self.failures = 0;
            self.transition_to(HealthState::Healthy)
        } else {
            self.failures = self.failures.saturating_add(1);
            if self.failures >= self.budget {
                self.transition_to(HealthState::Unhealthy)
            } else {
                self.transition_to(HealthState::Probing)
            }
        }
    }

    /// Clear the latch and the failure streak; probing starts over.
    ///
    /// This is the orchestrator-facing escape hatch from `Unhealthy`.
    pub fn reset(&mut self) -> Option<Transition> {
        self.failures = 0;
        let from = self.state;
        self.state = HealthState::Probing;
        (from != self.state).then_some(Transition {
            from,
            to: self.state,
        })
    }

    fn transition_to(&mut self, to: HealthState) -> Option<Transition> {
        // Unhealthy is terminal until reset().
        if self.state.is_terminal() || self.state == to {
            return None;
        }
        let from = self.state;
        self.state = to;
        Some(Transition { from, to })
    }
}
