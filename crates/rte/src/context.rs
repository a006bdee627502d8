//! Access to the register frame of the program interrupted on the calling
//! hart. Only meaningful inside a second-level handler: outside of one,
//! `mscratch` does not hold a frame base.

use arch_riscv::RegisterFrame;
use foundation::{Csr, Hart};

/// View of the trapped context on one hart.
pub struct Context<'h, H: Hart> {
    hart: &'h H,
}

impl<'h, H: Hart> Context<'h, H> {
    /// # Safety
    /// `mscratch` of `hart` must hold the base address of a live
    /// [`RegisterFrame`], i.e. the caller runs inside a second-level handler
    /// invoked by the dispatcher on that hart.
    pub unsafe fn new(hart: &'h H) -> Self {
        Self { hart }
    }

    #[inline]
    fn frame(&self) -> *mut RegisterFrame {
        self.hart.read(Csr::Mscratch) as *mut RegisterFrame
    }

    /// Saved value of register `x<reg>`; `reg` is wrapped into the register file.
    pub fn get(&self, reg: i32) -> u32 {
        let frame = self.frame();
        unsafe { core::ptr::addr_of!((*frame).x[RegisterFrame::slot(reg)]).read_volatile() }
    }

    /// Overwrite saved register `x<reg>`; it takes effect when the trap returns.
    /// Writing `x0` is accepted and has no effect on the resumed program.
    pub fn put(&self, reg: i32, value: u32) {
        let frame = self.frame();
        unsafe {
            core::ptr::addr_of_mut!((*frame).x[RegisterFrame::slot(reg)]).write_volatile(value)
        }
    }
}

/// Read register `x<reg>` of the program trapped on the calling hart.
///
/// # Safety
/// Only valid inside a handler invoked by the dispatcher.
#[cfg(target_arch = "riscv32")]
pub unsafe fn context_get(reg: i32) -> u32 {
    Context::new(&arch_riscv::MachineHart).get(reg)
}

/// Write register `x<reg>` of the program trapped on the calling hart.
///
/// # Safety
/// Only valid inside a handler invoked by the dispatcher.
#[cfg(target_arch = "riscv32")]
pub unsafe fn context_put(reg: i32, value: u32) {
    Context::new(&arch_riscv::MachineHart).put(reg, value)
}
