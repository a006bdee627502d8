use crate::error::InvalidCause;

pub const BANKS: usize = 2;
pub const SLOTS: usize = 32;
pub const NUM_TRAPS: usize = BANKS * SLOTS;

pub const INTERRUPT_FLAG: u32 = 1 << 31;
pub const SLOT_MASK: u32 = 0x1f;

/// Trap codes as reported in `mcause`.
pub mod code {
    // synchronous exceptions
    pub const I_MISALIGNED: u32 = 0x0000_0000;
    pub const I_ACCESS: u32 = 0x0000_0001;
    pub const I_ILLEGAL: u32 = 0x0000_0002;
    pub const BREAKPOINT: u32 = 0x0000_0003;
    pub const L_MISALIGNED: u32 = 0x0000_0004;
    pub const L_ACCESS: u32 = 0x0000_0005;
    pub const S_MISALIGNED: u32 = 0x0000_0006;
    pub const S_ACCESS: u32 = 0x0000_0007;
    pub const UENV_CALL: u32 = 0x0000_0008;
    pub const MENV_CALL: u32 = 0x0000_000b;
    pub const DOUBLE_TRAP: u32 = 0x0000_0010;

    // interrupts
    pub const MSI: u32 = 0x8000_0003;
    pub const MTI: u32 = 0x8000_0007;
    pub const MEI: u32 = 0x8000_000b;
    pub const FIRQ_0: u32 = 0x8000_0010;
    pub const FIRQ_1: u32 = 0x8000_0011;
    pub const FIRQ_2: u32 = 0x8000_0012;
    pub const FIRQ_3: u32 = 0x8000_0013;
    pub const FIRQ_4: u32 = 0x8000_0014;
    pub const FIRQ_5: u32 = 0x8000_0015;
    pub const FIRQ_6: u32 = 0x8000_0016;
    pub const FIRQ_7: u32 = 0x8000_0017;
    pub const FIRQ_8: u32 = 0x8000_0018;
    pub const FIRQ_9: u32 = 0x8000_0019;
    pub const FIRQ_10: u32 = 0x8000_001a;
    pub const FIRQ_11: u32 = 0x8000_001b;
    pub const FIRQ_12: u32 = 0x8000_001c;
    pub const FIRQ_13: u32 = 0x8000_001d;
    pub const FIRQ_14: u32 = 0x8000_001e;
    pub const FIRQ_15: u32 = 0x8000_001f;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum Bank {
    Exception = 0,
    Interrupt = 1,
}

/// A trap cause. Bank and slot are always derived from bit 31 and bits 4:0;
/// other bits are only rejected by [`TrapCause::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrapCause(u32);

impl TrapCause {
    /// Validate an application-supplied trap code.
    pub const fn new(code: u32) -> Result<Self, InvalidCause> {
        if code & !(INTERRUPT_FLAG | SLOT_MASK) != 0 {
            Err(InvalidCause { code })
        } else {
            Ok(Self(code))
        }
    }

    /// Wrap a raw `mcause` value.
    #[inline(always)]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    #[inline(always)]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline(always)]
    pub const fn is_interrupt(self) -> bool {
        self.0 & INTERRUPT_FLAG != 0
    }

    #[inline(always)]
    pub const fn bank(self) -> Bank {
        if self.is_interrupt() {
            Bank::Interrupt
        } else {
            Bank::Exception
        }
    }

    #[inline(always)]
    pub const fn slot(self) -> usize {
        (self.0 & SLOT_MASK) as usize
    }

    /// Causes whose only defined response is a permanent halt.
    pub const fn is_fatal(self) -> bool {
        matches!(self.0, code::I_ACCESS | code::I_MISALIGNED | code::DOUBLE_TRAP)
    }

    pub const fn name(self) -> Option<&'static str> {
        let name = match self.0 {
            code::I_ACCESS => "Instruction access fault",
            code::I_ILLEGAL => "Illegal instruction",
            code::I_MISALIGNED => "Instruction address misaligned",
            code::BREAKPOINT => "Environment breakpoint",
            code::L_MISALIGNED => "Load address misaligned",
            code::L_ACCESS => "Load access fault",
            code::S_MISALIGNED => "Store address misaligned",
            code::S_ACCESS => "Store access fault",
            code::UENV_CALL => "Environment call from U-mode",
            code::MENV_CALL => "Environment call from M-mode",
            code::DOUBLE_TRAP => "Double-trap",
            code::MSI => "Machine software IRQ",
            code::MTI => "Machine timer IRQ",
            code::MEI => "Machine external IRQ",
            _ => return None,
        };
        Some(name)
    }

    /// Channel number for fast interrupt requests.
    pub const fn fast_irq(self) -> Option<u32> {
        match self.0 {
            code::FIRQ_0..=code::FIRQ_15 => Some(self.0 - code::FIRQ_0),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_and_slot() {
        let mti = TrapCause::from_bits(code::MTI);
        assert!(mti.is_interrupt());
        assert_eq!(mti.bank(), Bank::Interrupt);
        assert_eq!(mti.slot(), 7);

        let ecall = TrapCause::from_bits(code::MENV_CALL);
        assert_eq!(ecall.bank(), Bank::Exception);
        assert_eq!(ecall.slot(), 11);
    }

    #[test]
    fn test_validation() {
        assert_eq!(TrapCause::new(code::FIRQ_15).map(TrapCause::slot), Ok(31));
        assert_eq!(TrapCause::new(code::I_MISALIGNED).map(TrapCause::slot), Ok(0));
        for bad in [0x20, 0x4000_0000, 0x8000_0020, 0xffff_ffff, 0x0000_0100] {
            assert_eq!(TrapCause::new(bad), Err(InvalidCause { code: bad }));
        }
    }

    #[test]
    fn test_fatal_set() {
        let fatal: [u32; 3] = [code::I_ACCESS, code::I_MISALIGNED, code::DOUBLE_TRAP];
        for bits in 0..SLOTS as u32 {
            let exception = TrapCause::from_bits(bits);
            assert_eq!(exception.is_fatal(), fatal.contains(&bits));
            assert!(!TrapCause::from_bits(bits | INTERRUPT_FLAG).is_fatal());
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(
            TrapCause::from_bits(code::I_ILLEGAL).name(),
            Some("Illegal instruction")
        );
        assert_eq!(TrapCause::from_bits(code::FIRQ_3).name(), None);
        assert_eq!(TrapCause::from_bits(code::FIRQ_3).fast_irq(), Some(3));
        assert_eq!(TrapCause::from_bits(0x1a).name(), None);
        assert_eq!(TrapCause::from_bits(0x1a).fast_irq(), None);
    }
}
