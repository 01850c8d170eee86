mod lcd;
mod render;

pub use lcd::{Lcdc, Mode, SpriteAttributes, Stat};

use super::{FrameBuffer, MemoryBus, LCDC, LYC, STAT};
use crate::cpu::InterruptFlags;

/// First V-Blank line.
const VBLANK_LINE: u8 = 144;
/// Lines per frame, V-Blank included.
const LINES_PER_FRAME: u8 = 154;

/// Picture unit.
///
/// A mode/scanline state machine driven by elapsed cycles. Each visible line
/// is OAM scan (80), pixel transfer (172) then H-Blank (204); lines 144-153
/// are V-Blank at 456 cycles each, 70,224 cycles per frame in total. The
/// line is rendered into the frame buffer when pixel transfer ends.
#[derive(Clone, Debug)]
pub struct Ppu {
    mode: Mode,
    scanline: u8,
    /// Cycles not yet consumed by a mode transition.
    cycles: u32,
    /// LCDC bit 7 as of the last update.
    enabled: bool,
    /// Window rows drawn so far this frame.
    window_line: u8,
    frame: FrameBuffer,
    frames: u64,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    /// PPU at the start of line 0 with the LCD on, matching the post-boot
    /// LCDC value.
    pub fn new() -> Self {
        Self {
            mode: Mode::OamScan,
            scanline: 0,
            cycles: 0,
            enabled: true,
            window_line: 0,
            frame: FrameBuffer::new(),
            frames: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn scanline(&self) -> u8 {
        self.scanline
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Number of times V-Blank has been entered.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Advance by `cycles` T-cycles.
    pub fn update(&mut self, cycles: u32, bus: &mut MemoryBus) {
        let lcdc = Lcdc::from_bits_retain(bus.peek(LCDC));
        if !lcdc.contains(Lcdc::LCD_ENABLE) {
            if self.enabled {
                log::debug!("LCD disabled at LY={}", self.scanline);
                self.enabled = false;
            }
            self.cycles = 0;
            self.scanline = 0;
            bus.set_ly(0);
            self.mode = Mode::HBlank;
            write_mode_bits(bus, Mode::HBlank);
            return;
        }

        if !self.enabled {
            log::debug!("LCD enabled");
            self.enabled = true;
            self.cycles = 0;
            self.scanline = 0;
            self.window_line = 0;
            bus.set_ly(0);
            self.compare_lyc(bus);
            self.enter_mode(Mode::OamScan, bus);
        }

        self.cycles += cycles;
        while self.cycles >= self.mode.cycles() {
            self.cycles -= self.mode.cycles();
            match self.mode {
                Mode::OamScan => self.enter_mode(Mode::Transfer, bus),
                Mode::Transfer => {
                    self.render_scanline(bus);
                    self.enter_mode(Mode::HBlank, bus);
                }
                Mode::HBlank => {
                    self.next_line(bus);
                    if self.scanline == VBLANK_LINE {
                        self.enter_mode(Mode::VBlank, bus);
                        bus.request_interrupt(InterruptFlags::VBLANK);
                        self.frames += 1;
                    } else {
                        self.enter_mode(Mode::OamScan, bus);
                    }
                }
                Mode::VBlank => {
                    self.next_line(bus);
                    if self.scanline == 0 {
                        self.window_line = 0;
                        self.enter_mode(Mode::OamScan, bus);
                    }
                }
            }
        }
    }

    /// Move to the next line, wrapping after line 153, and re-check LYC.
    fn next_line(&mut self, bus: &mut MemoryBus) {
        self.scanline += 1;
        if self.scanline == LINES_PER_FRAME {
            self.scanline = 0;
        }
        bus.set_ly(self.scanline);
        self.compare_lyc(bus);
    }

    fn enter_mode(&mut self, mode: Mode, bus: &mut MemoryBus) {
        self.mode = mode;
        write_mode_bits(bus, mode);

        let stat = Stat::from_bits_retain(bus.peek(STAT));
        if stat.intersects(mode.interrupt_select()) {
            bus.request_interrupt(InterruptFlags::LCD_STAT);
        }
    }

    fn compare_lyc(&mut self, bus: &mut MemoryBus) {
        let mut stat = Stat::from_bits_retain(bus.peek(STAT));
        let matched = self.scanline == bus.peek(LYC);
        stat.set(Stat::COINCIDENCE, matched);
        bus.poke(STAT, stat.bits());

        if matched && stat.contains(Stat::LYC_INT) {
            bus.request_interrupt(InterruptFlags::LCD_STAT);
        }
    }
}

fn write_mode_bits(bus: &mut MemoryBus, mode: Mode) {
    let mut stat = Stat::from_bits_retain(bus.peek(STAT));
    stat.remove(Stat::MODE_MASK);
    stat.insert(Stat::from_bits_retain(mode as u8));
    bus.poke(STAT, stat.bits());
}
