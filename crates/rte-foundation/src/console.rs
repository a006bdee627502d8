use crate::ops::ConsoleOps;

/// Byte sink for diagnostic output.
pub trait Console {
    /// False when no output device is implemented. Callers must then treat
    /// the console as absent and produce no output at all.
    fn available(&self) -> bool;

    fn putc(&self, byte: u8);

    fn puts(&self, s: &str) {
        for byte in s.bytes() {
            self.putc(byte);
        }
    }
}

impl<T: Console + ?Sized> Console for &T {
    #[inline]
    fn available(&self) -> bool {
        (**self).available()
    }

    #[inline]
    fn putc(&self, byte: u8) {
        (**self).putc(byte)
    }

    #[inline]
    fn puts(&self, s: &str) {
        (**self).puts(s)
    }
}

impl Console for ConsoleOps {
    #[inline]
    fn available(&self) -> bool {
        (self.available)()
    }

    #[inline]
    fn putc(&self, byte: u8) {
        (self.putc)(byte)
    }
}
