use foundation::{Csr, Hart};
use riscv::register::{mcause, mepc, mhartid, mscratch, mtval};

macro_rules! csrr {
    ($csr:expr) => {{
        let value: usize;
        unsafe {
            core::arch::asm!(
                "csrr {0}, {1}",
                out(reg) value,
                const $csr.number(),
                options(nomem, nostack),
            )
        };
        value
    }};
}

macro_rules! csrw {
    ($csr:expr, $value:expr) => {
        unsafe {
            core::arch::asm!(
                "csrw {1}, {0}",
                in(reg) $value,
                const $csr.number(),
                options(nostack),
            )
        }
    };
}

macro_rules! csrc {
    ($csr:expr, $mask:expr) => {
        unsafe {
            core::arch::asm!(
                "csrc {1}, {0}",
                in(reg) $mask,
                const $csr.number(),
                options(nostack),
            )
        }
    };
}

/// The hart executing the caller, accessed through its machine-mode CSRs.
#[derive(Clone, Copy, Debug, Default)]
pub struct MachineHart;

impl Hart for MachineHart {
    #[inline]
    fn read(&self, csr: Csr) -> usize {
        match csr {
            Csr::Mstatus => csrr!(Csr::Mstatus),
            Csr::Mie => csrr!(Csr::Mie),
            Csr::Mtvec => csrr!(Csr::Mtvec),
            Csr::Mscratch => mscratch::read(),
            Csr::Mepc => mepc::read(),
            Csr::Mcause => mcause::read().bits(),
            Csr::Mtval => mtval::read(),
            Csr::Mtinst => csrr!(Csr::Mtinst),
            Csr::Mhartid => mhartid::read(),
        }
    }

    #[inline]
    fn write(&self, csr: Csr, value: usize) {
        match csr {
            Csr::Mstatus => csrw!(Csr::Mstatus, value),
            Csr::Mie => csrw!(Csr::Mie, value),
            Csr::Mtvec => csrw!(Csr::Mtvec, value),
            Csr::Mscratch => csrw!(Csr::Mscratch, value),
            Csr::Mepc => csrw!(Csr::Mepc, value),
            Csr::Mcause => csrw!(Csr::Mcause, value),
            Csr::Mtval => csrw!(Csr::Mtval, value),
            Csr::Mtinst => csrw!(Csr::Mtinst, value),
            // read-only
            Csr::Mhartid => {}
        }
    }

    #[inline]
    fn clear(&self, csr: Csr, mask: usize) {
        match csr {
            Csr::Mstatus => csrc!(Csr::Mstatus, mask),
            Csr::Mie => csrc!(Csr::Mie, mask),
            Csr::Mtvec => csrc!(Csr::Mtvec, mask),
            Csr::Mscratch => csrc!(Csr::Mscratch, mask),
            Csr::Mepc => csrc!(Csr::Mepc, mask),
            Csr::Mcause => csrc!(Csr::Mcause, mask),
            Csr::Mtval => csrc!(Csr::Mtval, mask),
            Csr::Mtinst => csrc!(Csr::Mtinst, mask),
            Csr::Mhartid => {}
        }
    }

    #[inline]
    fn wait_for_interrupt(&self) {
        unsafe { riscv::asm::wfi() };
    }
}
