//! Second half of the trap path. The first-level entry has already saved the
//! register frame and left its base in `mscratch`; it restores the frame and
//! executes `mret` once `dispatch` returns.

use core::sync::atomic::{fence, Ordering};

use foundation::{Csr, Hart};

use crate::cause::{code, TrapCause};
use crate::vector::VectorTable;

const INSN_LEN: usize = 4;
const COMPRESSED_INSN_LEN: usize = 2;

/// Run the installed handler for the current trap and advance `mepc` past a
/// trapping instruction.
///
/// Empty slots are skipped silently. Interrupts resume at the untouched
/// `mepc`; instruction access faults are never stepped over.
pub fn dispatch<H: Hart>(hart: &H, table: &VectorTable) {
    // publish the saved frame; see the latest table contents
    fence(Ordering::SeqCst);

    let cause = TrapCause::from_bits(hart.read(Csr::Mcause) as u32);
    if let Some(handler) = table.lookup(cause) {
        handler();
    }

    if let Some(mepc) = resume_address(hart, cause) {
        hart.write(Csr::Mepc, mepc);
    }
}

/// Return address after an exception, or `None` if `mepc` must stay as is.
fn resume_address<H: Hart>(hart: &H, cause: TrapCause) -> Option<usize> {
    if cause.is_interrupt() || cause.bits() == code::I_ACCESS {
        return None;
    }

    let mepc = hart.read(Csr::Mepc);
    // mtinst[1:0] != 0b11 marks a compressed trapping instruction
    if hart.compressed_isa() && hart.read(Csr::Mtinst) & 0b11 != 0b11 {
        Some(mepc.wrapping_add(COMPRESSED_INSN_LEN))
    } else {
        Some(mepc.wrapping_add(INSN_LEN))
    }
}

/// Called by the first-level trap entry with the frame already saved.
#[cfg(target_arch = "riscv32")]
#[no_mangle]
pub extern "C" fn rte_dispatch() {
    dispatch(&arch_riscv::MachineHart, &crate::vector::VECTOR_TABLE);
}
