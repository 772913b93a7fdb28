//! Popup scroll offset kept across open/close cycles.

/// One-shot handle for restoring the scroll offset after the popup is laid out.
///
/// Tickets are tied to a single popup mount. Resolving one after that popup
/// has closed or been mounted again yields nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a restore ticket does nothing until it is resolved after layout"]
pub struct RestoreTicket {
    generation: u64,
}

/// Remembers the popup's vertical scroll offset when keep-position is on.
#[derive(Debug, Clone, Default)]
pub struct ScrollMemory {
    keep_position: bool,
    offset: f32,
    generation: u64,
    mounted: bool,
}

impl ScrollMemory {
    pub fn new(keep_position: bool) -> Self {
        Self {
            keep_position,
            ..Self::default()
        }
    }

    pub fn keep_position(&self) -> bool {
        self.keep_position
    }

    /// Turning keep-position off forgets the recorded offset.
    pub fn set_keep_position(&mut self, keep_position: bool) {
        self.keep_position = keep_position;
        if !keep_position {
            self.offset = 0.0;
        }
    }

    /// Store the latest offset. Ignored unless keep-position is on.
    pub fn record(&mut self, offset: f32) {
        if !self.keep_position {
            return;
        }
        self.offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
    }

    /// Offset to apply on the next mount.
    pub fn restore(&self) -> f32 {
        if self.keep_position {
            self.offset
        } else {
            0.0
        }
    }

    /// The popup was mounted; returns the ticket for the post-layout restore.
    pub fn mount(&mut self) -> RestoreTicket {
        self.generation = self.generation.wrapping_add(1);
        self.mounted = true;
        RestoreTicket {
            generation: self.generation,
        }
    }

    /// The popup was unmounted; outstanding tickets become stale.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Offset to scroll to for `ticket`, or `None` when the ticket is stale or
    /// there is nothing to restore.
    pub fn resolve(&self, ticket: RestoreTicket) -> Option<f32> {
        if !self.mounted || ticket.generation != self.generation {
            log::trace!("Dropping stale scroll restore (generation {})", ticket.generation);
            return None;
        }
        self.keep_position.then_some(self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_defaults_to_zero() {
        let memory = ScrollMemory::new(true);
        assert_eq!(memory.restore(), 0.0);
    }

    #[test]
    fn test_keeps_offset_across_cycles() {
        let mut memory = ScrollMemory::new(true);
        let _ = memory.mount();
        memory.record(120.0);
        memory.unmount();

        let ticket = memory.mount();
        assert_eq!(memory.restore(), 120.0);
        assert_eq!(memory.resolve(ticket), Some(120.0));
    }

    #[test]
    fn test_discards_writes_without_keep_position() {
        let mut memory = ScrollMemory::new(false);
        memory.record(80.0);
        assert_eq!(memory.restore(), 0.0);
        let ticket = memory.mount();
        assert_eq!(memory.resolve(ticket), None);
    }

    #[test]
    fn test_offset_never_negative() {
        let mut memory = ScrollMemory::new(true);
        memory.record(-15.0);
        assert_eq!(memory.restore(), 0.0);
        memory.record(f32::NAN);
        assert_eq!(memory.restore(), 0.0);
    }

    #[test]
    fn test_ticket_stale_after_unmount() {
        let mut memory = ScrollMemory::new(true);
        let ticket = memory.mount();
        memory.record(40.0);
        memory.unmount();
        assert_eq!(memory.resolve(ticket), None);
    }

    #[test]
    fn test_ticket_stale_after_remount() {
        let mut memory = ScrollMemory::new(true);
        let first = memory.mount();
        memory.unmount();
        let second = memory.mount();
        assert_eq!(memory.resolve(first), None);
        assert_eq!(memory.resolve(second), Some(0.0));
    }

    #[test]
    fn test_disabling_keep_position_forgets_offset() {
        let mut memory = ScrollMemory::new(true);
        memory.record(64.0);
        memory.set_keep_position(false);
        memory.set_keep_position(true);
        assert_eq!(memory.restore(), 0.0);
    }
}
