//! Second-level handler table, shared by both harts.
//!
//! Ownership: written only by `setup` (bulk fill on the primary hart) and
//! `install`, read by the dispatcher. There is no lock. Each slot is a single
//! machine word, so a reader sees either the old or the new handler and never
//! a torn address. Cross-hart visibility comes from the fence after a bulk
//! fill and the fence the dispatcher issues before every lookup. An `install`
//! racing an in-flight dispatch of the same cause may still run the old
//! handler once.

use core::sync::atomic::{fence, AtomicUsize, Ordering};

use crate::cause::{TrapCause, BANKS, SLOTS};
use crate::error::InvalidCause;

/// A second-level trap handler.
pub type Handler = fn();

/// Slot value meaning "no handler installed".
const ABSENT: usize = 0;

pub struct VectorTable {
    slots: [[AtomicUsize; SLOTS]; BANKS],
}

/// The process-wide table used by the trap entry on every hart.
pub static VECTOR_TABLE: VectorTable = VectorTable::new();

impl Default for VectorTable {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorTable {
    pub const fn new() -> Self {
        Self {
            slots: [const { [const { AtomicUsize::new(ABSENT) }; SLOTS] }; BANKS],
        }
    }

    #[inline(always)]
    fn entry(&self, cause: TrapCause) -> &AtomicUsize {
        &self.slots[cause.bank() as usize][cause.slot()]
    }

    /// Replace the handler for `code`. Applies to both harts.
    ///
    /// `code` may only carry the interrupt flag (bit 31) and a slot number
    /// (bits 4:0); anything else is rejected without touching the table.
    pub fn install(&self, code: u32, handler: Handler) -> Result<(), InvalidCause> {
        let cause = TrapCause::new(code)?;
        self.entry(cause).store(handler as usize, Ordering::Release);
        debug::writeln!(
            "[RTE] install {:#010x} -> bank {} slot {}",
            code,
            cause.bank() as usize,
            cause.slot()
        );
        Ok(())
    }

    /// Point every slot of both banks at `handler`, then publish the writes
    /// to the other hart.
    pub fn fill(&self, handler: Handler) {
        for bank in &self.slots {
            for slot in bank {
                slot.store(handler as usize, Ordering::Relaxed);
            }
        }
        fence(Ordering::SeqCst);
    }

    /// Handler for a raw cause, or `None` if the slot is empty.
    #[inline]
    pub fn lookup(&self, cause: TrapCause) -> Option<Handler> {
        match self.entry(cause).load(Ordering::Acquire) {
            ABSENT => None,
            // Only `Handler` values are ever stored in a slot.
            raw => Some(unsafe { core::mem::transmute::<usize, Handler>(raw) }),
        }
    }
}

/// Install a handler in the process-wide [`VECTOR_TABLE`].
pub fn install(code: u32, handler: Handler) -> Result<(), InvalidCause> {
    VECTOR_TABLE.install(code, handler)
}
