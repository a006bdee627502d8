use core::fmt;

/// A trap code with bits set outside the interrupt flag (bit 31) and the
/// slot number (bits 4:0).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidCause {
    pub code: u32,
}

impl fmt::Display for InvalidCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid trap code {:#010x}", self.code)
    }
}
