use std::sync::atomic::{AtomicBool, Ordering};

/// Allows at most one action in flight.
///
/// [`SingleFlight::try_begin`] hands out a [`FlightTicket`]; the slot is released
/// when the ticket is dropped, whether the action finished, failed or its future
/// was dropped halfway.
#[derive(Debug, Default)]
pub struct SingleFlight {
    busy: AtomicBool,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_begin(&self) -> Option<FlightTicket<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FlightTicket { busy: &self.busy })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub struct FlightTicket<'a> {
    busy: &'a AtomicBool,
}

impl Drop for FlightTicket<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
