use clap::Parser;
use pocketboy::Args;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    log::info!("Playing ROM path: '{}'", args.rom.display());
    pocketboy::run(&args)
}
