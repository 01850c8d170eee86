mod bus;
mod cartridge;
mod frame;
mod gameboy;
mod joypad;
mod ppu;
mod timer;

pub use bus::{MemoryBus, RamInit};
pub use cartridge::{Cartridge, NINTENDO_LOGO};
pub use frame::FrameBuffer;
pub use gameboy::{GameBoy, GameBoyConfig};
pub use joypad::{Button, JoypadHandle};
pub use ppu::{Lcdc, Mode, Ppu, SpriteAttributes, Stat};
pub use timer::Timer;

/// Total addressable memory (64 KiB).
const MEMORY_SIZE: usize = 0x10000;

// IO register addresses shared by the bus, timer and PPU.
pub(crate) const P1: u16 = 0xFF00;
pub(crate) const DIV: u16 = 0xFF04;
pub(crate) const TIMA: u16 = 0xFF05;
pub(crate) const TMA: u16 = 0xFF06;
pub(crate) const TAC: u16 = 0xFF07;
pub(crate) const LCDC: u16 = 0xFF40;
pub(crate) const STAT: u16 = 0xFF41;
pub(crate) const SCY: u16 = 0xFF42;
pub(crate) const SCX: u16 = 0xFF43;
pub(crate) const LY: u16 = 0xFF44;
pub(crate) const LYC: u16 = 0xFF45;
pub(crate) const DMA: u16 = 0xFF46;
pub(crate) const BGP: u16 = 0xFF47;
pub(crate) const OBP0: u16 = 0xFF48;
pub(crate) const OBP1: u16 = 0xFF49;
pub(crate) const WY: u16 = 0xFF4A;
pub(crate) const WX: u16 = 0xFF4B;

#[cfg(test)]
mod tests;
