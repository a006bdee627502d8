//! Saved execution context, laid out on the interrupted program's stack by the
//! trap entry. Word `N` holds register `xN`; word 0 is a zero placeholder and
//! word 2 holds the stack pointer from before the frame was allocated.

use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "compact")] {
        pub const REG_COUNT: usize = 16;
    } else {
        pub const REG_COUNT: usize = 32;
    }
}

pub const WORD_SIZE: usize = core::mem::size_of::<u32>();
pub const FRAME_BYTES: usize = REG_COUNT * WORD_SIZE;

/// Frame slot of the stack pointer (`x2`).
pub const SP: usize = 2;

#[repr(C, align(4))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterFrame {
    pub x: [u32; REG_COUNT],
}

impl Default for RegisterFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFrame {
    pub const fn new() -> Self {
        Self { x: [0; REG_COUNT] }
    }

    /// Frame slot for a register number. Out-of-range numbers wrap into the
    /// register file instead of being rejected.
    #[inline(always)]
    pub const fn slot(reg: i32) -> usize {
        (reg & (REG_COUNT as i32 - 1)) as usize
    }

    /// Byte offset of a register inside the frame.
    #[inline(always)]
    pub const fn offset(reg: i32) -> usize {
        Self::slot(reg) * WORD_SIZE
    }
}
