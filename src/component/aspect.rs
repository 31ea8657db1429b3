use crate::assets::probe::{Generation, ProbeOutcome};

/// Result of feeding a probe outcome to the synchronizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum AspectUpdate {
    /// Outcome belongs to a superseded source.
    Stale,
    /// Reserve a box with this `height / width` ratio.
    Reserve(f64),
    /// Drop any reservation.
    Clear,
}

/// Generation-stamped bookkeeping for the asynchronous dimension probe.
///
/// Only the most recently issued request may change the reservation; everything older is stale
/// regardless of the order in which completions arrive.
#[derive(Clone, Debug, Default)]
pub(crate) struct AspectSync {
    current: Generation,
    in_flight: bool,
}

impl AspectSync {
    /// Stamp a new request for a non-empty source.
    pub(crate) fn begin(&mut self) -> Generation {
        self.current = self.current.next();
        self.in_flight = true;
        self.current
    }

    /// Invalidate any outstanding request without issuing a new one.
    pub(crate) fn invalidate(&mut self) {
        self.current = self.current.next();
        self.in_flight = false;
    }

    /// Whether the current request is still unanswered.
    pub(crate) fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub(crate) fn current(&self) -> Generation {
        self.current
    }

    pub(crate) fn accept(&mut self, outcome: &ProbeOutcome) -> AspectUpdate {
        if outcome.generation != self.current || !self.in_flight {
            return AspectUpdate::Stale;
        }
        self.in_flight = false;
        match &outcome.result {
            Ok(size) => AspectUpdate::Reserve(size.aspect_ratio()),
            Err(_) => AspectUpdate::Clear,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/component/aspect.rs"]
mod tests;
