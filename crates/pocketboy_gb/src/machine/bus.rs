use super::{JoypadHandle, LY, MEMORY_SIZE};
use crate::cpu::{Bus, InterruptFlags, IF_ADDR};
use crate::Result;

mod dma;
mod init;
mod joypad;
mod mmio;

pub use init::RamInit;

/// The 64 KiB address space as seen by the processor.
///
/// Storage is one flat array. A handful of addresses carry side effects on
/// top of it: P1 (0xFF00) is computed from the joypad on every read, LY
/// (0xFF44) ignores processor writes, a write to DMA (0xFF46) copies a page
/// into OAM, echo RAM mirrors work RAM, and once a ROM has been loaded the
/// cartridge area discards writes.
pub struct MemoryBus {
    memory: [u8; MEMORY_SIZE],
    joypad: JoypadHandle,
    /// P1 bits 5 (action buttons) and 4 (direction pad); 0 selects a group.
    joyp_select: u8,
    rom_locked: bool,
}

impl Default for MemoryBus {
    fn default() -> Self {
        Self::new(RamInit::default())
    }
}

impl MemoryBus {
    /// Bus seeded with the post-boot IO register values.
    pub fn new(ram_init: RamInit) -> Self {
        let mut bus = Self {
            memory: [0; MEMORY_SIZE],
            joypad: JoypadHandle::new(),
            joyp_select: 0x00,
            rom_locked: false,
        };
        bus.apply_dmg_initial_io_state();
        bus.fill_internal_ram(ram_init);
        bus
    }

    /// Copy a ROM image to 0x0000 onward. Anything past 0x7FFF is ignored.
    ///
    /// From here on processor writes to 0x0000-0x7FFF are discarded.
    pub fn load_rom(&mut self, rom: &[u8]) {
        let len = rom.len().min(0x8000);
        self.memory[..len].copy_from_slice(&rom[..len]);
        self.rom_locked = true;
    }

    /// Press or release button `index` (0-3 direction pad, 4-7 A, B,
    /// Select, Start).
    pub fn set_button_state(&mut self, index: usize, pressed: bool) -> Result<()> {
        self.joypad.set_index(index, pressed)
    }

    /// A handle to the button state this bus multiplexes into P1.
    pub fn joypad(&self) -> JoypadHandle {
        self.joypad.clone()
    }

    /// Bit n set while button n is held.
    pub(crate) fn held_buttons(&self) -> u8 {
        self.joypad.snapshot()
    }

    /// Raise bits in IF.
    pub fn request_interrupt(&mut self, flags: InterruptFlags) {
        self.memory[IF_ADDR as usize] |= flags.bits();
    }

    /// Raw read that bypasses every side effect.
    #[inline]
    pub fn peek(&self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    /// Raw write that bypasses every side effect.
    #[inline]
    pub(crate) fn poke(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }

    /// The only way LY changes.
    #[inline]
    pub(crate) fn set_ly(&mut self, value: u8) {
        self.poke(LY, value);
    }
}

impl Bus for MemoryBus {
    #[inline]
    fn read8(&mut self, addr: u16) -> u8 {
        self.read8_mmio(addr)
    }

    #[inline]
    fn write8(&mut self, addr: u16, value: u8) {
        self.write8_mmio(addr, value)
    }
}
