use core::sync::atomic::{fence, Ordering};

use foundation::{Csr, Hart};

use crate::vector::{Handler, VectorTable};

/// The hart that populates the shared vector table.
pub const PRIMARY_HART: usize = 0;

/// `mstatus.MPP` = machine mode; every other bit (including MIE) cleared.
pub const MSTATUS_MPP_MACHINE: usize = 0b11 << 11;

/// Prepare `hart` for trap handling. Must run on every hart before any trap
/// source is enabled there.
///
/// On [`PRIMARY_HART`] every slot of `table` is (re)set to `default`,
/// unconditionally: handlers installed before this call are overwritten, so
/// applications install their own handlers afterwards.
pub fn setup_hart<H: Hart>(hart: &H, table: &VectorTable, entry: usize, default: Handler) {
    hart.write(Csr::Mstatus, MSTATUS_MPP_MACHINE);
    hart.write(Csr::Mtvec, entry & !0b11);
    hart.write(Csr::Mie, 0);

    let hartid = hart.read(Csr::Mhartid);
    if hartid == PRIMARY_HART {
        table.fill(default);
    }
    fence(Ordering::SeqCst);

    debug::writeln!(
        "[RTE] hart {} trap entry @ {:#x}, defaults {}",
        hartid,
        entry & !0b11,
        if hartid == PRIMARY_HART {
            "installed"
        } else {
            "shared"
        }
    );
}

/// Set up the calling hart with the diagnostic handler as default for every
/// trap cause. Must be called on each hart before it enables any trap source.
#[cfg(target_arch = "riscv32")]
pub fn setup() {
    setup_hart(
        &arch_riscv::MachineHart,
        &crate::vector::VECTOR_TABLE,
        arch_riscv::trap_entry_address(),
        crate::diag::debug_handler,
    );
}
