/// Machine-mode control and status registers touched by the trap engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum Csr {
    Mstatus,
    Mie,
    Mtvec,
    Mscratch,
    Mepc,
    Mcause,
    Mtval,
    Mtinst,
    Mhartid,
}

impl Csr {
    pub const COUNT: usize = 9;

    pub const ALL: [Csr; Self::COUNT] = [
        Csr::Mstatus,
        Csr::Mie,
        Csr::Mtvec,
        Csr::Mscratch,
        Csr::Mepc,
        Csr::Mcause,
        Csr::Mtval,
        Csr::Mtinst,
        Csr::Mhartid,
    ];

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Architectural CSR number.
    pub const fn number(self) -> u16 {
        match self {
            Csr::Mstatus => 0x300,
            Csr::Mie => 0x304,
            Csr::Mtvec => 0x305,
            Csr::Mscratch => 0x340,
            Csr::Mepc => 0x341,
            Csr::Mcause => 0x342,
            Csr::Mtval => 0x343,
            Csr::Mtinst => 0x34a,
            Csr::Mhartid => 0xf14,
        }
    }
}

/// CSR access for the hart executing the caller.
///
/// Every method acts on a single named register and is atomic with respect to
/// traps on that hart. Implementations never touch any other state.
pub trait Hart {
    fn read(&self, csr: Csr) -> usize;

    fn write(&self, csr: Csr, value: usize);

    /// Clear `mask` bits in `csr`.
    fn clear(&self, csr: Csr, mask: usize) {
        let value = self.read(csr);
        self.write(csr, value & !mask);
    }

    /// Whether compressed (16-bit) instructions can trap on this hart.
    fn compressed_isa(&self) -> bool {
        cfg!(target_feature = "c")
    }

    /// Park the hart until the next interrupt is pending.
    fn wait_for_interrupt(&self);
}
