//! Trace output for bring-up and setup paths.
//!
//! `debug::write!` and `debug::writeln!` compile to nothing unless the `debug`
//! feature is enabled. When enabled, formatted output goes to the sink
//! installed with [`set_sink`]; before a sink is installed it is dropped.

#![no_std]

use cfg_if::cfg_if;
use core::fmt;
use spin::Once;

/// Receives formatted trace output.
pub type Sink = fn(fmt::Arguments);

static SINK: Once<Sink> = Once::new();

/// Install the trace sink. Only the first call has any effect.
pub fn set_sink(sink: Sink) {
    SINK.call_once(|| sink);
}

cfg_if! {
    if #[cfg(feature = "debug")] {
        pub const ENABLED: bool = true;
    } else {
        pub const ENABLED: bool = false;
    }
}

#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    if let Some(sink) = SINK.get() {
        sink(args);
    }
}

#[cfg(feature = "debug")]
#[macro_export]
macro_rules! write {
    ($($arg:tt)*) => {
        $crate::_print(format_args!($($arg)*))
    };
}

#[cfg(feature = "debug")]
#[macro_export]
macro_rules! writeln {
    () => {
        $crate::_print(format_args!("\n"))
    };
    ($($arg:tt)*) => {
        $crate::_print(format_args!("{}\n", format_args!($($arg)*)))
    };
}

#[cfg(not(feature = "debug"))]
#[macro_export]
macro_rules! write {
    ($($arg:tt)*) => {
        if false {
            let _ = format_args!($($arg)*);
        }
    };
}

#[cfg(not(feature = "debug"))]
#[macro_export]
macro_rules! writeln {
    () => {};
    ($($arg:tt)*) => {
        if false {
            let _ = format_args!($($arg)*);
        }
    };
}
