//! Helpers that expand to runs of RV32 word stores/loads against a register
//! frame. Register `xN` always lives at byte offset `N*4` from the base, so the
//! macros only need the register numbers.
//!
//! The expansion is a single string literal and can be used directly as an
//! `asm!`/`global_asm!` template string.

#![no_std]

/// `store_regs!("sp"; 3, 4)` expands to `"sw x3, 3*4(sp)\nsw x4, 4*4(sp)\n"`.
#[macro_export]
macro_rules! store_regs {
    ($base:literal; $($n:literal),+ $(,)?) => {
        concat!($("sw x", $n, ", ", $n, "*4(", $base, ")\n"),+)
    };
}

/// `load_regs!("sp"; 3, 4)` expands to `"lw x3, 3*4(sp)\nlw x4, 4*4(sp)\n"`.
#[macro_export]
macro_rules! load_regs {
    ($base:literal; $($n:literal),+ $(,)?) => {
        concat!($("lw x", $n, ", ", $n, "*4(", $base, ")\n"),+)
    };
}
