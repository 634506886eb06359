//! Activation events delivered to the clear button.

/// Common data for events that travel through the host's dispatch chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventBase {
    default_prevented: bool,
    propagation_stopped: bool,
}

impl EventBase {
    /// Suppress the host's default action for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Check if the default action was suppressed.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Stop the event from reaching ancestors of the receiver.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if propagation was stopped.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// A user activation of the clear button (a press on the root element).
///
/// Any press activates the control; which button was used is not tracked. The
/// control reacts on press rather than release so the bound field has not yet
/// lost focus when the value is cleared.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivationEvent {
    /// Base event data.
    pub base: EventBase,
}

impl ActivationEvent {
    /// Create an activation that nothing has handled yet.
    pub fn new() -> Self {
        Self::default()
    }
}
