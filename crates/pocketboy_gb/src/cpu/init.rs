use super::{Cpu, Registers, Tracer};

impl Registers {
    /// Register state the DMG boot ROM leaves behind when it hands control
    /// to cartridge code at 0x0100.
    pub fn new() -> Self {
        let mut regs = Self::default();
        regs.apply_dmg_boot_state();
        regs
    }

    /// Reset to the post-boot state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn apply_dmg_boot_state(&mut self) {
        self.a = 0x01;
        self.f = 0xB0; // Z, N, H, C = 1,0,1,1 (upper nibble 1011_0000)
        self.b = 0x00;
        self.c = 0x13;
        self.d = 0x00;
        self.e = 0xD8;
        self.h = 0x01;
        self.l = 0x4D;
        self.sp = 0xFFFE;
        self.pc = 0x0100;

        self.ime = true;
        self.halted = false;
        self.ime_pending = false;
    }
}

impl Cpu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor that reports every fetch, execution and interrupt
    /// dispatch to `tracer`.
    pub fn with_tracer(tracer: Box<dyn Tracer>) -> Self {
        Self {
            tracer: Some(tracer),
        }
    }

    pub fn set_tracer(&mut self, tracer: Option<Box<dyn Tracer>>) {
        self.tracer = tracer;
    }

    pub fn has_tracer(&self) -> bool {
        self.tracer.is_some()
    }
}
