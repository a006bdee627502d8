use crate::ops::ConsoleOps;
use spin::Once;

static CONSOLE: Once<ConsoleOps> = Once::new();

/// Register the process-wide console. Shared by all harts; only the first
/// registration takes effect.
pub fn register(ops: ConsoleOps) {
    CONSOLE.call_once(|| {
        debug::writeln!("[RTE] console registered");
        ops
    });
}

/// The registered console, if any.
#[inline]
pub fn ops() -> Option<ConsoleOps> {
    CONSOLE.get().copied()
}
