//! Host stand-ins for a hart and a console.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use foundation::{Console, Csr, Hart};

pub(crate) struct SimHart {
    csrs: [Cell<usize>; Csr::COUNT],
    compressed: bool,
    waits: Cell<usize>,
    wait_limit: Option<usize>,
}

impl SimHart {
    pub(crate) fn new(hartid: usize) -> Self {
        let hart = Self {
            csrs: Default::default(),
            compressed: false,
            waits: Cell::new(0),
            wait_limit: None,
        };
        hart.csrs[Csr::Mhartid.index()].set(hartid);
        hart
    }

    pub(crate) fn compressed(mut self) -> Self {
        self.compressed = true;
        self
    }

    /// Unwind out of the `limit`-th `wait_for_interrupt`, so a parked hart
    /// can be observed from a test.
    pub(crate) fn wait_limit(mut self, limit: usize) -> Self {
        self.wait_limit = Some(limit);
        self
    }

    pub(crate) fn waits(&self) -> usize {
        self.waits.get()
    }

    pub(crate) fn with(self, csr: Csr, value: usize) -> Self {
        self.csrs[csr.index()].set(value);
        self
    }

    pub(crate) fn get(&self, csr: Csr) -> usize {
        self.csrs[csr.index()].get()
    }

    pub(crate) fn set(&self, csr: Csr, value: usize) {
        self.csrs[csr.index()].set(value);
    }
}

impl Hart for SimHart {
    fn read(&self, csr: Csr) -> usize {
        self.get(csr)
    }

    fn write(&self, csr: Csr, value: usize) {
        if csr != Csr::Mhartid {
            self.set(csr, value);
        }
    }

    fn compressed_isa(&self) -> bool {
        self.compressed
    }

    fn wait_for_interrupt(&self) {
        let waits = self.waits.get() + 1;
        self.waits.set(waits);
        if self.wait_limit == Some(waits) {
            panic!("hart parked after {} waits", waits);
        }
    }
}

pub(crate) struct RecordingConsole {
    present: bool,
    out: RefCell<Vec<u8>>,
}

impl RecordingConsole {
    pub(crate) fn present() -> Self {
        Self {
            present: true,
            out: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn absent() -> Self {
        Self {
            present: false,
            out: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn output(&self) -> String {
        String::from_utf8(self.out.borrow().clone()).unwrap()
    }
}

impl Console for RecordingConsole {
    fn available(&self) -> bool {
        self.present
    }

    fn putc(&self, byte: u8) {
        self.out.borrow_mut().push(byte);
    }
}
