pub mod cpu;
mod error;
pub mod machine;

pub use cpu::{Bus, Cpu, Executed, Interrupt, InterruptFlags, LogTracer, Registers, Tracer};
pub use error::{Error, Result};
pub use machine::{
    Button, Cartridge, FrameBuffer, GameBoy, GameBoyConfig, JoypadHandle, Lcdc, MemoryBus, Mode,
    Ppu, RamInit, SpriteAttributes, Stat, Timer, NINTENDO_LOGO,
};

/// Logical screen width in pixels for the Game Boy DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
/// T-cycles in one full frame (154 scanlines of 456 cycles).
pub const CYCLES_PER_FRAME: u32 = 70_224;
