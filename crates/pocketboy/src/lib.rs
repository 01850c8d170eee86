use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pocketboy_gb::{GameBoy, GameBoyConfig, LogTracer, Registers, SCREEN_HEIGHT, SCREEN_WIDTH};

#[derive(Parser, Debug)]
#[command(version, about = "Run a DMG ROM headless and dump the last frame")]
pub struct Args {
    /// Path to a 32 KiB ROM image
    pub rom: PathBuf,

    /// Number of frames to run
    #[arg(long, default_value_t = 60)]
    pub frames: u32,

    /// Write the final frame as packed RGB24 to this file
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Print the final frame as ASCII art
    #[arg(long)]
    pub ascii: bool,

    /// Log every executed instruction at trace level
    #[arg(long)]
    pub trace: bool,
}

pub fn run(args: &Args) -> Result<()> {
    let rom = std::fs::read(&args.rom)
        .with_context(|| format!("failed to read ROM '{}'", args.rom.display()))?;

    let config = if args.trace {
        GameBoyConfig::builder()
            .tracer(Box::new(LogTracer))
            .build()
    } else {
        GameBoyConfig::default()
    };
    let mut gb = GameBoy::new(config);
    let cartridge = gb
        .load_rom(&rom)
        .with_context(|| format!("rejected ROM '{}'", args.rom.display()))?;
    log::info!("Playing \"{}\" for {} frames", cartridge.title(), args.frames);

    for frame in 0..args.frames {
        if let Err(err) = gb.step_frame().map(|_| ()) {
            log::error!("stopped in frame {}: {}", frame, err);
            log::error!("{}", dump_registers(&gb.regs));
            return Err(err.into());
        }
    }

    let frame = gb.frame_buffer();
    if let Some(path) = &args.out {
        let rgb = frame.to_rgb24();
        std::fs::write(path, &rgb)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        println!(
            "Wrote {} bytes ({}x{} rgb24) after {} frames to '{}'",
            rgb.len(),
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            gb.frame_count(),
            path.display()
        );
    }
    if args.ascii {
        print!("{}", frame.to_ascii());
    }
    Ok(())
}

fn dump_registers(regs: &Registers) -> String {
    format!(
        "AF={:04X} BC={:04X} DE={:04X} HL={:04X} SP={:04X} PC={:04X} IME={} HALT={}",
        regs.af(),
        regs.bc(),
        regs.de(),
        regs.hl(),
        regs.sp,
        regs.pc,
        regs.ime,
        regs.halted
    )
}
