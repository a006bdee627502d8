//! First-level trap entry. Saves the full register frame on the interrupted
//! stack, hands over to `rte_dispatch`, then restores the frame and returns
//! with `mret`. The dispatcher is provided by the crate above.

use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(target_arch = "riscv32")] {
        use core::arch::global_asm;
        use rte_macros::{load_regs, store_regs};

        use crate::frame::{FRAME_BYTES, SP, WORD_SIZE};

        #[cfg(not(feature = "compact"))]
        macro_rules! store_upper {
            () => {
                store_regs!("sp"; 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31)
            };
        }

        #[cfg(feature = "compact")]
        macro_rules! store_upper {
            () => {
                ""
            };
        }

        #[cfg(not(feature = "compact"))]
        macro_rules! load_upper {
            () => {
                load_regs!("sp"; 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31)
            };
        }

        #[cfg(feature = "compact")]
        macro_rules! load_upper {
            () => {
                ""
            };
        }

        // Entered directly by the CPU: mtvec points at `rte_trap_entry`, so the
        // interrupted sp is captured by the very first instruction.
        global_asm!(
            ".pushsection .text.rte_trap_entry, \"ax\", @progbits",
            ".align 2",
            ".globl rte_trap_entry",
            ".type  rte_trap_entry, @function",
            "rte_trap_entry:",
            "csrw mscratch, sp",
            "addi sp, sp, -{frame_bytes}",

            // x0 is stored too so the frame is complete
            "sw x0, 0*4(sp)",
            "sw x1, 1*4(sp)",

            // mscratch <- frame base, x1 <- interrupted sp
            "csrrw x1, mscratch, sp",
            "sw x1, {sp_slot}(sp)",

            store_regs!("sp"; 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15),
            store_upper!(),

            "call {dispatch}",

            "lw x1, 1*4(sp)",
            load_regs!("sp"; 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15),
            load_upper!(),

            // sp last: the frame lives below it
            "lw x2, {sp_slot}(sp)",
            "mret",
            ".size rte_trap_entry, . - rte_trap_entry",
            ".popsection",

            frame_bytes = const FRAME_BYTES,
            sp_slot = const SP * WORD_SIZE,
            dispatch = sym crate::rte_dispatch,
        );

        extern "C" {
            fn rte_trap_entry();
        }

        /// Address to program into `mtvec` (direct mode). Always 4-byte aligned.
        #[inline]
        pub fn trap_entry_address() -> usize {
            rte_trap_entry as usize
        }
    }
}
