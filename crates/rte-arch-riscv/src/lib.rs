//! The runtime MUST provide `rte_dispatch()`: the trap entry in this crate only
//! saves and restores the register frame around it.

#![no_std]

pub mod frame;

#[cfg(target_arch = "riscv32")]
pub mod csr;

pub mod trap;

extern "C" {
    // Second-level dispatch, called with the frame saved and its base in mscratch.
    pub fn rte_dispatch();
}

pub use frame::{RegisterFrame, FRAME_BYTES, REG_COUNT, WORD_SIZE};

#[cfg(target_arch = "riscv32")]
pub use csr::MachineHart;
#[cfg(target_arch = "riscv32")]
pub use trap::trap_entry_address;
