//! RTE: machine-mode trap handling for a dual-hart RV32 core.
//!
//! Each hart calls [`setup`] once. After that every exception and interrupt
//! enters the shared first-level handler, which saves the register frame and
//! hands over to [`dispatch`]. The handler installed for the cause then runs
//! with the frame reachable through [`Context`].

#![no_std]

pub mod cause;
pub mod context;
pub mod diag;
pub mod dispatch;
pub mod error;
pub mod setup;
pub mod vector;

#[cfg(test)]
mod testing;

pub use cause::{code, Bank, TrapCause, NUM_TRAPS};
pub use context::Context;
pub use diag::{halt, handle, report, Verdict};
pub use dispatch::dispatch;
pub use error::InvalidCause;
pub use setup::{setup_hart, PRIMARY_HART};
pub use vector::{install, Handler, VectorTable, VECTOR_TABLE};

pub use foundation::kfn::console::register as register_console;
pub use foundation::{Console, ConsoleOps, Csr, Hart};

cfg_if::cfg_if! {
    if #[cfg(target_arch = "riscv32")] {
        pub use context::{context_get, context_put};
        pub use diag::debug_handler;
        pub use dispatch::rte_dispatch;
        pub use setup::setup;
    }
}
