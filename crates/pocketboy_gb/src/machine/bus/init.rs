use super::MemoryBus;
use crate::cpu::{IE_ADDR, IF_ADDR};
use crate::machine::{BGP, DIV, DMA, LCDC, OBP0, OBP1, P1, STAT, TAC, TIMA, TMA};

/// Power-on contents of work RAM and high RAM.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RamInit {
    #[default]
    Zeroed,
    /// Fixed-seed xorshift32 noise, identical on every run.
    Pseudorandom,
}

/// IO registers as the DMG boot ROM leaves them at PC=0x0100. Everything
/// not listed starts at zero.
const POST_BOOT_IO: [(u16, u8); 28] = [
    // Both joypad groups selected, nothing held.
    (P1, 0xCF),
    (DIV, 0x00),
    (TIMA, 0x00),
    (TMA, 0x00),
    (TAC, 0x00),
    (IF_ADDR, 0xE1),
    (IE_ADDR, 0x00),
    // Sound. Nothing produces audio, but games read these back.
    (0xFF10, 0x80),
    (0xFF11, 0xBF),
    (0xFF12, 0xF3),
    (0xFF14, 0xBF),
    (0xFF16, 0x3F),
    (0xFF19, 0xBF),
    (0xFF1A, 0x7F),
    (0xFF1B, 0xFF),
    (0xFF1C, 0x9F),
    (0xFF1E, 0xBF),
    (0xFF20, 0xFF),
    (0xFF23, 0xBF),
    (0xFF24, 0x77),
    (0xFF25, 0xF3),
    (0xFF26, 0xF1),
    (LCDC, 0x91),
    (STAT, 0x85),
    (DMA, 0xFF),
    (BGP, 0xFC),
    (OBP0, 0xFF),
    (OBP1, 0xFF),
];

impl MemoryBus {
    pub(super) fn apply_dmg_initial_io_state(&mut self) {
        for (addr, value) in POST_BOOT_IO {
            self.memory[addr as usize] = value;
        }
    }

    pub(super) fn fill_internal_ram(&mut self, ram_init: RamInit) {
        if ram_init == RamInit::Zeroed {
            return;
        }

        let mut state: u32 = 0xC0DE_1234;
        let wram = 0xC000..0xE000;
        let hram = 0xFF80..0xFFFF;
        for addr in wram.chain(hram) {
            state = xorshift32(state);
            self.memory[addr] = state as u8;
        }
    }
}

#[inline]
fn xorshift32(mut x: u32) -> u32 {
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    x
}
