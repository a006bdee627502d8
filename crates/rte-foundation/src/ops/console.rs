/// Character output driver used for diagnostic printing.
#[derive(Clone, Copy)]
pub struct ConsoleOps {
    pub available: fn() -> bool,
    pub putc: fn(byte: u8),
}
