//! Default second-level handler: describes the trap on the console, silences
//! the interrupt source that raised it and halts the hart on fatal causes.

use foundation::{Console, Csr, Hart};

use crate::cause::TrapCause;

const TAG_OPEN: &str = "<RTE> ";
const TAG_CLOSE: &str = " </RTE>\n";

const MSTATUS_MPP: usize = 0b11 << 11;

/// What the caller must do after [`report`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Resume,
    Halt,
}

fn put_hex<C: Console>(console: &C, value: u32, digits: u32) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    console.puts("0x");
    for i in (0..digits.min(8)).rev() {
        console.putc(HEX[((value >> (4 * i)) & 0xf) as usize]);
    }
}

/// Describe the current trap on `console`.
///
/// Without an available console this does nothing at all and returns
/// [`Verdict::Resume`]. Otherwise an interrupt has its enable bit cleared,
/// and a fatal cause clears every enable bit and returns [`Verdict::Halt`].
pub fn report<H: Hart, C: Console>(hart: &H, console: &C) -> Verdict {
    if !console.available() {
        return Verdict::Resume;
    }

    console.puts(TAG_OPEN);

    if hart.read(Csr::Mhartid) & 1 != 0 {
        console.puts("[cpu1|");
    } else {
        console.puts("[cpu0|");
    }

    // privilege level at trap time
    if hart.read(Csr::Mstatus) & MSTATUS_MPP != 0 {
        console.puts("M] ");
    } else {
        console.puts("U] ");
    }

    let cause = TrapCause::from_bits(hart.read(Csr::Mcause) as u32);
    if let Some(name) = cause.name() {
        console.puts(name);
    } else if let Some(channel) = cause.fast_irq() {
        console.puts("Fast IRQ ");
        put_hex(console, channel, 1);
    } else {
        console.puts("Unknown trap cause ");
        put_hex(console, cause.bits(), 8);
    }

    console.puts(" @ PC=");
    put_hex(console, hart.read(Csr::Mepc) as u32, 8);
    console.puts(", MTINST=");
    put_hex(console, hart.read(Csr::Mtinst) as u32, 8);
    console.puts(", MTVAL=");
    put_hex(console, hart.read(Csr::Mtval) as u32, 8);

    if cause.is_interrupt() {
        console.puts(" Disabling IRQ source");
        hart.clear(Csr::Mie, 1 << cause.slot());
    }

    if cause.is_fatal() {
        console.puts(" !!FATAL EXCEPTION!! Halting CPU");
        console.puts(TAG_CLOSE);
        hart.write(Csr::Mie, 0);
        return Verdict::Halt;
    }

    console.puts(TAG_CLOSE);
    Verdict::Resume
}

/// Take `hart` out of service for good.
pub fn halt<H: Hart>(hart: &H) -> ! {
    hart.write(Csr::Mie, 0);
    loop {
        hart.wait_for_interrupt();
    }
}

/// Report the current trap and halt `hart` if the cause is fatal. Does
/// nothing without a console.
pub fn handle<H: Hart, C: Console>(hart: &H, console: Option<C>) {
    let Some(console) = console else {
        return;
    };
    if report(hart, &console) == Verdict::Halt {
        halt(hart);
    }
}

/// The handler `setup` installs for every trap cause, reporting through the
/// registered console.
#[cfg(target_arch = "riscv32")]
pub fn debug_handler() {
    handle(&arch_riscv::MachineHart, foundation::kfn::console::ops());
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::cause::code;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use crate::testing::{RecordingConsole, SimHart};

    const PC: usize = 0x8000_04a2;

    fn machine_hart(hartid: usize, cause: u32) -> SimHart {
        SimHart::new(hartid)
            .with(Csr::Mstatus, MSTATUS_MPP)
            .with(Csr::Mcause, cause as usize)
            .with(Csr::Mepc, PC)
    }

    #[test]
    fn test_silent_without_console() {
        let hart = machine_hart(0, code::MTI).with(Csr::Mie, 1 << 7);
        let console = RecordingConsole::absent();

        assert_eq!(report(&hart, &console), Verdict::Resume);
        assert!(console.output().is_empty());
        assert_eq!(hart.get(Csr::Mie), 1 << 7);
    }

    #[test]
    fn test_recoverable_exception_line() {
        let hart = machine_hart(0, code::I_ILLEGAL)
            .with(Csr::Mtinst, 0xffff_ffff)
            .with(Csr::Mtval, 0x0000_dead);
        let console = RecordingConsole::present();

        assert_eq!(report(&hart, &console), Verdict::Resume);
        assert_eq!(
            console.output(),
            "<RTE> [cpu0|M] Illegal instruction @ PC=0x800004A2, \
             MTINST=0xFFFFFFFF, MTVAL=0x0000DEAD </RTE>\n"
        );
    }

    #[test]
    fn test_core_and_privilege_come_from_trap_state() {
        let hart = SimHart::new(1)
            .with(Csr::Mcause, code::UENV_CALL as usize)
            .with(Csr::Mepc, PC);
        let console = RecordingConsole::present();

        report(&hart, &console);
        assert!(console
            .output()
            .starts_with("<RTE> [cpu1|U] Environment call from U-mode @ PC="));
    }

    #[test]
    fn test_interrupt_source_is_disabled() {
        let enabled = (1 << 7) | (1 << 11) | (1 << 16);
        let hart = machine_hart(1, code::MTI).with(Csr::Mie, enabled);
        let console = RecordingConsole::present();

        assert_eq!(report(&hart, &console), Verdict::Resume);
        assert_eq!(hart.get(Csr::Mie), (1 << 11) | (1 << 16));
        let out = console.output();
        assert!(out.contains("Machine timer IRQ"));
        assert!(out.ends_with(" Disabling IRQ source </RTE>\n"));
    }

    #[test]
    fn test_fast_irq_label() {
        let hart = machine_hart(0, code::FIRQ_11).with(Csr::Mie, 1 << 27);
        let console = RecordingConsole::present();

        report(&hart, &console);
        assert!(console.output().contains("] Fast IRQ 0xB @ PC="));
        assert_eq!(hart.get(Csr::Mie), 0);
    }

    #[test]
    fn test_unknown_cause_prints_raw_code() {
        let hart = machine_hart(0, 0x0000_001a);
        let console = RecordingConsole::present();

        assert_eq!(report(&hart, &console), Verdict::Resume);
        assert!(console
            .output()
            .contains("] Unknown trap cause 0x0000001A @ PC="));
    }

    #[test]
    fn test_fatal_causes_halt() {
        for fatal in [code::I_ACCESS, code::I_MISALIGNED, code::DOUBLE_TRAP] {
            let hart = machine_hart(0, fatal).with(Csr::Mie, 0xffff_0888);
            let console = RecordingConsole::present();

            assert_eq!(report(&hart, &console), Verdict::Halt);
            assert_eq!(hart.get(Csr::Mie), 0);
            assert!(console
                .output()
                .ends_with(" !!FATAL EXCEPTION!! Halting CPU </RTE>\n"));
        }
    }

    #[test]
    fn test_instruction_access_fault_report() {
        let hart = machine_hart(0, code::I_ACCESS);
        let console = RecordingConsole::present();

        report(&hart, &console);
        assert_eq!(
            console.output(),
            "<RTE> [cpu0|M] Instruction access fault @ PC=0x800004A2, \
             MTINST=0x00000000, MTVAL=0x00000000 !!FATAL EXCEPTION!! Halting CPU </RTE>\n"
        );
    }

    #[test]
    fn test_fatal_cause_parks_hart_for_good() {
        let hart = machine_hart(0, code::I_ACCESS)
            .with(Csr::Mie, 0xffff_0888)
            .wait_limit(5);
        let console = RecordingConsole::present();

        let returned = catch_unwind(AssertUnwindSafe(|| handle(&hart, Some(&console))));

        assert!(returned.is_err());
        assert_eq!(hart.waits(), 5);
        assert_eq!(hart.get(Csr::Mie), 0);
        assert_eq!(hart.get(Csr::Mepc), PC);
        assert!(console
            .output()
            .ends_with(" !!FATAL EXCEPTION!! Halting CPU </RTE>\n"));
    }

    #[test]
    fn test_recoverable_cause_returns_without_waiting() {
        let hart = machine_hart(1, code::MTI).with(Csr::Mie, 1 << 7).wait_limit(1);
        let console = RecordingConsole::present();

        handle(&hart, Some(&console));

        assert_eq!(hart.waits(), 0);
        assert_eq!(hart.get(Csr::Mie), 0);
        assert!(console.output().ends_with(" </RTE>\n"));
    }

    #[test]
    fn test_handle_without_console_is_a_no_op() {
        let hart = machine_hart(0, code::I_ACCESS)
            .with(Csr::Mie, 1 << 7)
            .wait_limit(1);

        handle(&hart, None::<&RecordingConsole>);

        assert_eq!(hart.waits(), 0);
        assert_eq!(hart.get(Csr::Mie), 1 << 7);
    }

    #[test]
    fn test_disabled_interrupt_does_not_trap_again() {
        use crate::dispatch::dispatch;
        use crate::vector::VectorTable;

        // an interrupt is only taken while its enable bit is set
        fn raise(hart: &SimHart, table: &VectorTable, cause: u32) -> bool {
            let slot = TrapCause::from_bits(cause).slot();
            if hart.get(Csr::Mie) & (1 << slot) == 0 {
                return false;
            }
            hart.set(Csr::Mcause, cause as usize);
            dispatch(hart, table);
            report(hart, &RecordingConsole::present());
            true
        }

        let hart = machine_hart(0, 0).with(Csr::Mie, 1 << 3);
        let table = VectorTable::new();

        assert!(raise(&hart, &table, code::MSI));
        assert!(!raise(&hart, &table, code::MSI));
        assert_eq!(hart.get(Csr::Mepc), PC);
    }
}
