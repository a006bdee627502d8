//! Interfaces between the trap engine and the platform it runs on: machine CSR
//! access ([`Hart`]) and the diagnostic byte sink ([`Console`]).

#![no_std]

pub mod console;
pub mod hart;
pub mod kfn;
pub mod ops;

pub use console::Console;
pub use hart::{Csr, Hart};
pub use ops::ConsoleOps;
