use super::super::MemoryBus;
use crate::machine::{DMA, LY, P1};

impl MemoryBus {
    pub(super) fn write8_mmio_impl(&mut self, addr: u16, value: u8) {
        match addr {
            // Cartridge ROM. Without a mapper, writes only land before a ROM
            // has been loaded.
            0x0000..=0x7FFF => {
                if !self.rom_locked {
                    self.memory[addr as usize] = value;
                }
            }

            0xE000..=0xFDFF => self.memory[(addr - 0x2000) as usize] = value,

            P1 => self.write_joyp(value),

            // LY belongs to the PPU.
            LY => {}

            DMA => self.do_oam_dma(value),

            _ => self.memory[addr as usize] = value,
        }
    }
}
