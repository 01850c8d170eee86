use super::{
    Button, Cartridge, FrameBuffer, GameBoy, GameBoyConfig, MemoryBus, Mode, Ppu, RamInit, Timer,
    BGP, DIV, DMA, LCDC, LY, LYC, NINTENDO_LOGO, OBP0, OBP1, P1, SCX, STAT, TAC, TIMA, TMA, WX,
    WY,
};
use crate::cpu::{Bus, IF_ADDR};
use crate::{Error, CYCLES_PER_FRAME, SCREEN_HEIGHT, SCREEN_WIDTH};

const OAM: u16 = 0xFE00;

/// A 32 KiB image with a valid header and `program` at the entry point.
fn rom_with_program(program: &[u8]) -> Vec<u8> {
    let mut rom = vec![0u8; 0x8000];
    rom[0x100..0x100 + program.len()].copy_from_slice(program);
    rom[0x104..0x134].copy_from_slice(&NINTENDO_LOGO);
    rom[0x134..0x13A].copy_from_slice(b"POCKET");
    rom[0x14D] = rom[0x134..0x14D]
        .iter()
        .fold(0u8, |x, &b| x.wrapping_sub(b).wrapping_sub(1));
    rom
}

/// NOP; JR -3
fn idle_loop_rom() -> Vec<u8> {
    rom_with_program(&[0x00, 0x18, 0xFD])
}

fn lcd_bus(lcdc: u8) -> MemoryBus {
    let mut bus = MemoryBus::default();
    bus.write8(LCDC, lcdc);
    bus.write8(BGP, 0xE4);
    bus.write8(OBP0, 0xE4);
    bus
}

/// Fill all eight rows of the tile at `addr` with the same bit planes.
fn write_tile(bus: &mut MemoryBus, addr: u16, lo: u8, hi: u8) {
    for row in 0..8 {
        bus.write8(addr + row * 2, lo);
        bus.write8(addr + row * 2 + 1, hi);
    }
}

fn write_sprite(bus: &mut MemoryBus, index: u16, y: u8, x: u8, tile: u8, attrs: u8) {
    let base = OAM + index * 4;
    bus.write8(base, y);
    bus.write8(base + 1, x);
    bus.write8(base + 2, tile);
    bus.write8(base + 3, attrs);
}

fn render_frame(bus: &mut MemoryBus) -> Ppu {
    let mut ppu = Ppu::new();
    ppu.update(CYCLES_PER_FRAME, bus);
    ppu
}

fn run_cycles(ppu: &mut Ppu, bus: &mut MemoryBus, total: u32) {
    for _ in 0..total / 4 {
        ppu.update(4, bus);
    }
}

// Bus

#[test]
fn bus_starts_with_post_boot_io_values() {
    let mut bus = MemoryBus::default();
    assert_eq!(bus.read8(P1), 0xCF);
    assert_eq!(bus.read8(LCDC), 0x91);
    assert_eq!(bus.read8(STAT), 0x85);
    assert_eq!(bus.read8(IF_ADDR), 0xE1);
    assert_eq!(bus.read8(BGP), 0xFC);
    assert_eq!(bus.read8(OBP0), 0xFF);
    assert_eq!(bus.read8(DMA), 0xFF);
    assert_eq!(bus.read8(0xFF26), 0xF1);
}

#[test]
fn plain_addresses_read_back_what_was_written() {
    let mut bus = MemoryBus::default();
    for addr in [0x8000, 0x9FFF, 0xA000, 0xC123, 0xFE00, 0xFEA5, 0xFF80, IF_ADDR, DIV, STAT, TAC] {
        bus.write8(addr, 0x5A);
        assert_eq!(bus.read8(addr), 0x5A, "addr {addr:04X}");
    }
}

#[test]
fn ly_ignores_processor_writes() {
    let mut bus = MemoryBus::default();
    bus.write8(LY, 0x42);
    assert_eq!(bus.read8(LY), 0x00);
}

#[test]
fn echo_ram_mirrors_work_ram() {
    let mut bus = MemoryBus::default();
    bus.write8(0xE010, 0x11);
    assert_eq!(bus.read8(0xC010), 0x11);
    bus.write8(0xC020, 0x22);
    assert_eq!(bus.read8(0xE020), 0x22);
    bus.write8(0xFDFF, 0x33);
    assert_eq!(bus.read8(0xDDFF), 0x33);
}

#[test]
fn rom_area_is_writable_until_a_rom_is_loaded() {
    let mut bus = MemoryBus::default();
    bus.write8(0x0100, 0x11);
    assert_eq!(bus.read8(0x0100), 0x11);

    bus.load_rom(&[0xAA; 0x200]);
    assert_eq!(bus.read8(0x0100), 0xAA);
    bus.write8(0x0100, 0x22);
    bus.write8(0x7FFF, 0x22);
    assert_eq!(bus.read8(0x0100), 0xAA);
    assert_eq!(bus.read8(0x7FFF), 0x00);
}

#[test]
fn dma_copies_a_page_into_oam() {
    let mut bus = MemoryBus::default();
    for i in 0..0xA0u16 {
        bus.write8(0xC000 + i, i as u8 ^ 0x5A);
    }
    bus.write8(DMA, 0xC0);

    assert_eq!(bus.read8(DMA), 0xC0);
    for i in 0..0xA0u16 {
        assert_eq!(bus.read8(OAM + i), i as u8 ^ 0x5A);
    }
}

#[test]
fn dma_reads_through_the_processor_read_path() {
    let mut bus = MemoryBus::default();
    bus.set_button_state(Button::Right.index(), true).unwrap();
    bus.write8(P1, 0x20);
    bus.write8(DMA, 0xFF);
    // P1 is computed, not the stored byte.
    assert_eq!(bus.read8(OAM), 0xEE);
    assert_eq!(bus.read8(OAM + 0x46), 0xFF);
}

// Joypad

#[test]
fn p1_multiplexes_the_selected_group() {
    let mut bus = MemoryBus::default();
    bus.set_button_state(Button::Right.index(), true).unwrap();
    bus.set_button_state(Button::A.index(), true).unwrap();

    bus.write8(P1, 0x20);
    assert_eq!(bus.read8(P1), 0xEE);
    bus.write8(P1, 0x10);
    assert_eq!(bus.read8(P1), 0xDE);
    bus.write8(P1, 0x30);
    assert_eq!(bus.read8(P1), 0xFF);
    bus.write8(P1, 0x00);
    assert_eq!(bus.read8(P1), 0xCE);

    bus.set_button_state(Button::Right.index(), false).unwrap();
    bus.write8(P1, 0x20);
    assert_eq!(bus.read8(P1), 0xEF);
}

#[test]
fn p1_low_bits_are_read_only() {
    let mut bus = MemoryBus::default();
    bus.write8(P1, 0x30 | 0x05);
    assert_eq!(bus.read8(P1), 0xFF);
}

#[test]
fn out_of_range_button_is_rejected_without_side_effects() {
    let mut bus = MemoryBus::default();
    bus.set_button_state(7, true).unwrap();
    assert_eq!(bus.set_button_state(8, true), Err(Error::ButtonOutOfRange(8)));
    assert_eq!(bus.held_buttons(), 0x80);
}

#[test]
fn joypad_handles_share_state() {
    let bus = MemoryBus::default();
    let handle = bus.joypad();
    let other = handle.clone();
    other.set(Button::Select, true);
    assert!(handle.is_pressed(Button::Select));
    assert_eq!(bus.held_buttons(), 0x40);
    assert_eq!(Button::from_index(6), Some(Button::Select));
    assert_eq!(Button::from_index(8), None);
}

// Timer

#[test]
fn tima_counts_at_the_selected_rate() {
    let mut bus = MemoryBus::default();
    let mut timer = Timer::new();
    bus.write8(TAC, 0x05);
    timer.update(12, &mut bus);
    assert_eq!(bus.read8(TIMA), 0);
    timer.update(4, &mut bus);
    assert_eq!(bus.read8(TIMA), 1);
    timer.update(32, &mut bus);
    assert_eq!(bus.read8(TIMA), 3);
}

#[test]
fn tima_overflow_reloads_tma_and_requests_interrupt() {
    let mut bus = MemoryBus::default();
    let mut timer = Timer::new();
    bus.write8(IF_ADDR, 0x00);
    bus.write8(TIMA, 0xFF);
    bus.write8(TMA, 0x42);
    bus.write8(TAC, 0x05);

    timer.update(16, &mut bus);
    assert_eq!(bus.read8(TIMA), 0x42);
    assert_eq!(bus.read8(IF_ADDR) & 0x04, 0x04);
}

#[test]
fn div_ticks_every_256_cycles() {
    let mut bus = MemoryBus::default();
    let mut timer = Timer::new();
    timer.update(255, &mut bus);
    assert_eq!(bus.read8(DIV), 0);
    timer.update(1, &mut bus);
    assert_eq!(bus.read8(DIV), 1);
    timer.update(256 * 255, &mut bus);
    assert_eq!(bus.read8(DIV), 0);
}

#[test]
fn tima_holds_while_tac_is_disabled() {
    let mut bus = MemoryBus::default();
    let mut timer = Timer::new();
    bus.write8(TAC, 0x01);
    timer.update(1024, &mut bus);
    assert_eq!(bus.read8(TIMA), 0);
    assert_eq!(bus.read8(DIV), 4);
}

#[test]
fn tima_periods() {
    assert_eq!(Timer::tima_period(0x04), 1024);
    assert_eq!(Timer::tima_period(0x05), 16);
    assert_eq!(Timer::tima_period(0x06), 64);
    assert_eq!(Timer::tima_period(0x07), 256);
}

// PPU timing

#[test]
fn visible_line_walks_through_the_modes() {
    let mut bus = MemoryBus::default();
    let mut ppu = Ppu::new();
    assert_eq!(ppu.mode(), Mode::OamScan);

    ppu.update(80, &mut bus);
    assert_eq!(ppu.mode(), Mode::Transfer);
    assert_eq!(bus.read8(STAT) & 0x03, 3);

    ppu.update(172, &mut bus);
    assert_eq!(ppu.mode(), Mode::HBlank);
    assert_eq!(ppu.scanline(), 0);

    ppu.update(204, &mut bus);
    assert_eq!(ppu.mode(), Mode::OamScan);
    assert_eq!(ppu.scanline(), 1);
    assert_eq!(bus.read8(LY), 1);
}

#[test]
fn frame_enters_vblank_once_and_wraps() {
    let mut bus = MemoryBus::default();
    let mut ppu = Ppu::new();
    bus.write8(IF_ADDR, 0x00);

    run_cycles(&mut ppu, &mut bus, 144 * 456);
    assert_eq!(ppu.scanline(), 144);
    assert_eq!(ppu.mode(), Mode::VBlank);
    assert_eq!(bus.read8(STAT) & 0x03, 1);
    assert_eq!(bus.read8(IF_ADDR) & 0x01, 0x01);
    assert_eq!(ppu.frame_count(), 1);

    bus.write8(IF_ADDR, 0x00);
    run_cycles(&mut ppu, &mut bus, CYCLES_PER_FRAME - 144 * 456);
    assert_eq!(ppu.scanline(), 0);
    assert_eq!(ppu.mode(), Mode::OamScan);
    assert_eq!(bus.read8(IF_ADDR) & 0x01, 0x00);
    assert_eq!(ppu.frame_count(), 1);
}

#[test]
fn stat_mode_select_requests_interrupt() {
    let mut bus = MemoryBus::default();
    let mut ppu = Ppu::new();
    bus.write8(IF_ADDR, 0x00);
    bus.write8(STAT, 0x08);

    ppu.update(80, &mut bus);
    assert_eq!(bus.read8(IF_ADDR) & 0x02, 0x00);
    ppu.update(172, &mut bus);
    assert_eq!(bus.read8(IF_ADDR) & 0x02, 0x02);
}

#[test]
fn stat_vblank_select_requests_interrupt_on_line_144() {
    let mut bus = MemoryBus::default();
    let mut ppu = Ppu::new();
    bus.write8(IF_ADDR, 0x00);
    bus.write8(STAT, 0x10);

    run_cycles(&mut ppu, &mut bus, 144 * 456 - 4);
    assert_eq!(bus.read8(IF_ADDR) & 0x02, 0x00);
    assert_eq!(bus.read8(LY), 143);

    ppu.update(4, &mut bus);
    assert_eq!(ppu.mode(), Mode::VBlank);
    assert_eq!(bus.read8(IF_ADDR) & 0x03, 0x03);
}

#[test]
fn stat_oam_select_requests_interrupt_when_scan_begins() {
    let mut bus = MemoryBus::default();
    let mut ppu = Ppu::new();
    bus.write8(IF_ADDR, 0x00);
    bus.write8(STAT, 0x20);

    run_cycles(&mut ppu, &mut bus, 452);
    assert_eq!(bus.read8(IF_ADDR) & 0x02, 0x00);

    ppu.update(4, &mut bus);
    assert_eq!(ppu.mode(), Mode::OamScan);
    assert_eq!(bus.read8(LY), 1);
    assert_eq!(bus.read8(IF_ADDR) & 0x02, 0x02);
}

#[test]
fn lyc_match_sets_coincidence_and_requests_interrupt() {
    let mut bus = MemoryBus::default();
    let mut ppu = Ppu::new();
    bus.write8(IF_ADDR, 0x00);
    bus.write8(LYC, 2);
    bus.write8(STAT, 0x40);

    ppu.update(456, &mut bus);
    assert_eq!(ppu.scanline(), 1);
    assert_eq!(bus.read8(STAT) & 0x04, 0x00);
    assert_eq!(bus.read8(IF_ADDR) & 0x02, 0x00);

    ppu.update(456, &mut bus);
    assert_eq!(ppu.scanline(), 2);
    assert_eq!(bus.read8(STAT) & 0x04, 0x04);
    assert_eq!(bus.read8(IF_ADDR) & 0x02, 0x02);

    ppu.update(456, &mut bus);
    assert_eq!(bus.read8(STAT) & 0x04, 0x00);
}

#[test]
fn lcd_off_parks_at_line_zero_and_restarts_on_enable() {
    let mut bus = MemoryBus::default();
    let mut ppu = Ppu::new();
    ppu.update(456 * 3 + 100, &mut bus);
    assert_eq!(ppu.scanline(), 3);

    bus.write8(LCDC, 0x11);
    ppu.update(1000, &mut bus);
    assert_eq!(ppu.scanline(), 0);
    assert_eq!(ppu.mode(), Mode::HBlank);
    assert_eq!(bus.read8(LY), 0);
    assert_eq!(bus.read8(STAT) & 0x03, 0);

    bus.write8(LCDC, 0x91);
    ppu.update(0, &mut bus);
    assert_eq!(ppu.mode(), Mode::OamScan);
    ppu.update(80, &mut bus);
    assert_eq!(ppu.mode(), Mode::Transfer);
    assert_eq!(ppu.scanline(), 0);
}

// Rendering

#[test]
fn blank_vram_renders_shade_zero() {
    let mut bus = MemoryBus::default();
    let ppu = render_frame(&mut bus);
    assert!(ppu.frame_buffer().rows().flatten().all(|&shade| shade == 0));
}

#[test]
fn background_tile_goes_through_bgp() {
    let mut bus = lcd_bus(0x91);
    write_tile(&mut bus, 0x8010, 0xFF, 0x00);
    bus.write8(0x9800, 1);

    let ppu = render_frame(&mut bus);
    let frame = ppu.frame_buffer();
    assert_eq!(frame.pixel(0, 0), 1);
    assert_eq!(frame.pixel(7, 7), 1);
    assert_eq!(frame.pixel(8, 0), 0);
    assert_eq!(frame.pixel(0, 8), 0);

    bus.write8(BGP, 0xFC);
    let ppu = render_frame(&mut bus);
    assert_eq!(ppu.frame_buffer().pixel(0, 0), 3);
}

#[test]
fn background_scrolls_horizontally() {
    let mut bus = lcd_bus(0x91);
    write_tile(&mut bus, 0x8010, 0xFF, 0x00);
    bus.write8(0x9800, 1);
    bus.write8(SCX, 4);

    let ppu = render_frame(&mut bus);
    assert_eq!(ppu.frame_buffer().pixel(3, 0), 1);
    assert_eq!(ppu.frame_buffer().pixel(4, 0), 0);
}

#[test]
fn signed_tile_numbers_index_around_0x9000() {
    let mut bus = lcd_bus(0x81);
    write_tile(&mut bus, 0x8800, 0x00, 0xFF);
    write_tile(&mut bus, 0x9010, 0xFF, 0xFF);
    bus.write8(0x9800, 0x80);
    bus.write8(0x9801, 0x01);

    let ppu = render_frame(&mut bus);
    assert_eq!(ppu.frame_buffer().pixel(0, 0), 2);
    assert_eq!(ppu.frame_buffer().pixel(8, 0), 3);
}

#[test]
fn sprite_colour_zero_is_transparent() {
    let mut bus = lcd_bus(0x93);
    write_tile(&mut bus, 0x8020, 0x80, 0x00);
    write_sprite(&mut bus, 0, 16, 8, 2, 0x00);

    let ppu = render_frame(&mut bus);
    assert_eq!(ppu.frame_buffer().pixel(0, 0), 1);
    assert_eq!(ppu.frame_buffer().pixel(1, 0), 0);
    assert_eq!(ppu.frame_buffer().pixel(0, 8), 0);
}

#[test]
fn sprite_flips_and_palettes() {
    let mut bus = lcd_bus(0x93);
    write_tile(&mut bus, 0x8020, 0x80, 0x00);
    write_sprite(&mut bus, 0, 16, 8, 2, 0x20);
    let ppu = render_frame(&mut bus);
    assert_eq!(ppu.frame_buffer().pixel(0, 0), 0);
    assert_eq!(ppu.frame_buffer().pixel(7, 0), 1);

    // Only the first row is opaque.
    bus.write8(0x8030, 0xFF);
    write_sprite(&mut bus, 0, 16, 8, 3, 0x40);
    let ppu = render_frame(&mut bus);
    assert_eq!(ppu.frame_buffer().pixel(0, 0), 0);
    assert_eq!(ppu.frame_buffer().pixel(0, 7), 1);

    bus.write8(OBP1, 0x0C);
    write_sprite(&mut bus, 0, 16, 8, 3, 0x10);
    let ppu = render_frame(&mut bus);
    assert_eq!(ppu.frame_buffer().pixel(0, 0), 3);
}

#[test]
fn tall_sprites_span_two_tiles() {
    let mut bus = lcd_bus(0x97);
    write_tile(&mut bus, 0x8040, 0xFF, 0x00);
    write_tile(&mut bus, 0x8050, 0x00, 0xFF);
    write_sprite(&mut bus, 0, 16, 8, 5, 0x00);

    let ppu = render_frame(&mut bus);
    assert_eq!(ppu.frame_buffer().pixel(0, 0), 1);
    assert_eq!(ppu.frame_buffer().pixel(0, 8), 2);
    assert_eq!(ppu.frame_buffer().pixel(0, 15), 2);
    assert_eq!(ppu.frame_buffer().pixel(0, 16), 0);
}

#[test]
fn smaller_x_wins_then_lower_oam_index() {
    let mut bus = lcd_bus(0x93);
    write_tile(&mut bus, 0x8030, 0xFF, 0x00);
    write_tile(&mut bus, 0x8040, 0x00, 0xFF);

    write_sprite(&mut bus, 0, 16, 12, 3, 0x00);
    write_sprite(&mut bus, 1, 16, 8, 4, 0x00);
    let ppu = render_frame(&mut bus);
    assert_eq!(ppu.frame_buffer().pixel(4, 0), 2);
    assert_eq!(ppu.frame_buffer().pixel(7, 0), 2);
    assert_eq!(ppu.frame_buffer().pixel(8, 0), 1);

    write_sprite(&mut bus, 0, 16, 8, 3, 0x00);
    let ppu = render_frame(&mut bus);
    assert_eq!(ppu.frame_buffer().pixel(0, 0), 1);
}

#[test]
fn behind_bg_sprite_only_shows_over_colour_zero() {
    let mut bus = lcd_bus(0x93);
    write_tile(&mut bus, 0x8010, 0xFF, 0x00);
    write_tile(&mut bus, 0x8040, 0x00, 0xFF);
    bus.write8(0x9800, 1);
    write_sprite(&mut bus, 0, 16, 12, 4, 0x80);

    let ppu = render_frame(&mut bus);
    assert_eq!(ppu.frame_buffer().pixel(4, 0), 1);
    assert_eq!(ppu.frame_buffer().pixel(8, 0), 2);
}

#[test]
fn at_most_ten_sprites_per_line() {
    let mut bus = lcd_bus(0x93);
    write_tile(&mut bus, 0x8010, 0xFF, 0x00);
    for i in 0..11u16 {
        write_sprite(&mut bus, i, 16, 8 + i as u8 * 8, 1, 0x00);
    }

    let ppu = render_frame(&mut bus);
    assert_eq!(ppu.frame_buffer().pixel(72, 0), 1);
    assert_eq!(ppu.frame_buffer().pixel(80, 0), 0);
}

#[test]
fn window_covers_from_wx_and_wy() {
    let mut bus = lcd_bus(0xF1);
    write_tile(&mut bus, 0x8010, 0xFF, 0xFF);
    for i in 0..0x400u16 {
        bus.write8(0x9C00 + i, 1);
    }
    bus.write8(WY, 100);
    bus.write8(WX, 87);

    let ppu = render_frame(&mut bus);
    let frame = ppu.frame_buffer();
    assert_eq!(frame.pixel(80, 100), 3);
    assert_eq!(frame.pixel(79, 100), 0);
    assert_eq!(frame.pixel(80, 99), 0);
    assert_eq!(frame.pixel(159, 143), 3);
}

#[test]
fn disabled_background_leaves_sprites() {
    let mut bus = lcd_bus(0x92);
    write_tile(&mut bus, 0x8010, 0xFF, 0xFF);
    for i in 0..0x400u16 {
        bus.write8(0x9800 + i, 1);
    }
    write_tile(&mut bus, 0x8020, 0x80, 0x00);
    write_sprite(&mut bus, 0, 16, 8, 2, 0x80);

    let ppu = render_frame(&mut bus);
    assert_eq!(ppu.frame_buffer().pixel(50, 50), 0);
    assert_eq!(ppu.frame_buffer().pixel(0, 0), 1);
}

// Frame buffer

#[test]
fn frame_buffer_conversions() {
    let mut frame = FrameBuffer::new();
    let mut row = [0u8; SCREEN_WIDTH];
    row[..4].copy_from_slice(&[0, 1, 2, 3]);
    frame.set_row(0, &row);

    assert_eq!(frame.pixel(3, 0), 3);
    assert_eq!(frame.pixel(SCREEN_WIDTH, 0), 0);
    assert_eq!(frame.pixel(0, SCREEN_HEIGHT), 0);
    assert_eq!(frame.row(0), Some(&row));
    assert_eq!(frame.row(1).map(|r| r[0]), Some(0));
    assert_eq!(frame.row(SCREEN_HEIGHT), None);

    let rgb = frame.to_rgb24();
    assert_eq!(rgb.len(), SCREEN_WIDTH * SCREEN_HEIGHT * 3);
    assert_eq!(&rgb[..12], &[0xFF, 0xFF, 0xFF, 0xAA, 0xAA, 0xAA, 0x55, 0x55, 0x55, 0, 0, 0]);

    let ascii = frame.to_ascii();
    assert_eq!(ascii.len(), (SCREEN_WIDTH + 1) * SCREEN_HEIGHT);
    assert!(ascii.starts_with(" .+#"));
    assert_eq!(ascii.lines().count(), SCREEN_HEIGHT);
}

// Cartridge

#[test]
fn cartridge_reads_header() {
    let cart = Cartridge::from_bytes(&idle_loop_rom()).unwrap();
    assert_eq!(cart.title(), "POCKET");
    assert_eq!(cart.cart_type(), 0x00);
    assert!(cart.header_checksum_ok());
}

#[test]
fn cartridge_rejects_bad_images() {
    let rom = idle_loop_rom();
    assert_eq!(
        Cartridge::from_bytes(&rom[..0x14F]),
        Err(Error::RomTooSmall { len: 0x14F })
    );

    let mut large = rom.clone();
    large.push(0);
    assert_eq!(
        Cartridge::from_bytes(&large),
        Err(Error::RomTooLarge { len: 0x8001 })
    );

    let mut bad_logo = rom;
    bad_logo[0x110] ^= 0xFF;
    assert_eq!(Cartridge::from_bytes(&bad_logo), Err(Error::BadLogo));
}

#[test]
fn checksum_mismatch_is_only_a_warning() {
    let mut rom = idle_loop_rom();
    rom[0x14D] = rom[0x14D].wrapping_add(1);
    let cart = Cartridge::from_bytes(&rom).unwrap();
    assert!(!cart.header_checksum_ok());
}

#[test]
fn short_image_is_accepted() {
    let rom = idle_loop_rom();
    let cart = Cartridge::from_bytes(&rom[..0x150]).unwrap();
    assert_eq!(cart.rom().len(), 0x150);
}

// Machine

#[test]
fn rejected_rom_leaves_machine_untouched() {
    let mut gb = GameBoy::default();
    let mut rom = idle_loop_rom();
    rom[0x104] = 0;
    assert_eq!(gb.load_rom(&rom), Err(Error::BadLogo));
    assert_eq!(gb.bus().peek(0x0101), 0x00);
    assert_eq!(gb.bus().peek(0x0105), 0x00);
}

#[test]
fn step_frame_runs_one_frame_of_cycles() {
    let mut gb = GameBoy::default();
    gb.load_rom(&idle_loop_rom()).unwrap();

    gb.step_frame().unwrap();
    assert_eq!(gb.frame_count(), 1);
    assert_eq!(gb.regs.pc, 0x0100);
    assert_eq!(gb.ppu().scanline(), 0);
    assert_eq!(gb.ppu().mode(), Mode::OamScan);

    gb.step_frame().unwrap();
    assert_eq!(gb.frame_count(), 2);
}

#[test]
fn step_reports_cycles_and_advances_timer() {
    let mut gb = GameBoy::default();
    gb.load_rom(&idle_loop_rom()).unwrap();
    assert_eq!(gb.step().unwrap(), 4);
    assert_eq!(gb.step().unwrap(), 12);
    for _ in 0..30 {
        gb.step().unwrap();
    }
    // 16 iterations of 16 cycles.
    assert_eq!(gb.bus().peek(DIV), 1);
}

#[test]
fn new_press_requests_joypad_interrupt() {
    let mut gb = GameBoy::default();
    gb.load_rom(&idle_loop_rom()).unwrap();
    gb.bus_mut().write8(IF_ADDR, 0x00);

    gb.set_button(Button::Start, true);
    gb.step().unwrap();
    assert_eq!(gb.bus().peek(IF_ADDR) & 0x10, 0x10);

    gb.bus_mut().write8(IF_ADDR, 0x00);
    gb.step().unwrap();
    assert_eq!(gb.bus().peek(IF_ADDR) & 0x10, 0x00);

    gb.set_button(Button::Start, false);
    gb.step().unwrap();
    gb.bus_mut().write8(IF_ADDR, 0x00);
    gb.joypad().set(Button::Start, true);
    gb.step().unwrap();
    assert_eq!(gb.bus().peek(IF_ADDR) & 0x10, 0x10);
}

#[test]
fn set_button_state_checks_index() {
    let mut gb = GameBoy::default();
    assert_eq!(gb.set_button_state(9, true), Err(Error::ButtonOutOfRange(9)));
    gb.set_button_state(3, true).unwrap();
    assert!(gb.joypad().is_pressed(Button::Down));
}

#[test]
fn unknown_opcode_stops_the_machine() {
    let mut gb = GameBoy::default();
    gb.load_rom(&rom_with_program(&[0xD3])).unwrap();
    assert_eq!(
        gb.step(),
        Err(Error::UnknownOpcode {
            opcode: 0xD3,
            addr: 0x0100
        })
    );
    assert_eq!(gb.regs.pc, 0x0100);
    assert!(gb.step_frame().is_err());
}

#[test]
fn pseudorandom_ram_is_reproducible() {
    let config = || GameBoyConfig::builder().ram_init(RamInit::Pseudorandom).build();
    let a = GameBoy::new(config());
    let b = GameBoy::new(config());

    let wram = |gb: &GameBoy| (0xC000..0xC100).map(|addr| gb.bus().peek(addr)).collect::<Vec<_>>();
    assert_eq!(wram(&a), wram(&b));
    assert!(wram(&a).iter().any(|&byte| byte != 0));
    assert_eq!(a.bus().peek(0xFFFF), 0x00);

    let zeroed = GameBoy::default();
    assert!(wram(&zeroed).iter().all(|&byte| byte == 0));
}
