use clap::Parser;
use std::error::Error;
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crtc::display::TermDisplay;
use crtc::frame_loop::{FrameLoop, DEFAULT_FRAME_TIME};
use crtc::input::StdinInput;
use crtc::{Crtc, CrtcConfig, CrtcError};

const BOOT_BANNER: &str = "CRTC\nREADY\n";

#[derive(Parser, Debug)]
#[command(name = "crtc", about = "Character-cell display controller in a terminal")]
struct Args {
    /// JSON file with geometry, window and cursor settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// character generator ROM image
    #[arg(long)]
    rom: Option<PathBuf>,

    /// where the glyphs start in the ROM image
    #[arg(long, default_value_t = 0)]
    rom_offset: usize,

    /// stop after this many frames (runs until Esc otherwise)
    #[arg(long)]
    frames: Option<u64>,

    /// text to print at power on
    #[arg(long, default_value = BOOT_BANNER)]
    banner: String,

    /// where to write the log
    #[arg(long, default_value = "crtc.log")]
    log_file: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    // the terminal belongs to the display, so logging goes to a file
    let log_file = File::create(&args.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    // initialise
    let config = match &args.config {
        Some(path) => CrtcConfig::from_json_file(path)?,
        None => CrtcConfig::default(),
    };
    let mut crtc = Crtc::new(&config)?;

    if let Some(path) = &args.rom {
        let rom = fs::read(path)?;
        if args.rom_offset >= rom.len() {
            return Err(format!(
                "--rom-offset {} is past the end of {} ({} bytes)",
                args.rom_offset,
                path.display(),
                rom.len()
            )
            .into());
        }
        let length = rom.len() - args.rom_offset;
        match crtc.load_glyph_rom(&rom, args.rom_offset, length) {
            Ok(()) => info!(path = %path.display(), "character ROM loaded"),
            // keep going with what fitted
            Err(e @ CrtcError::GlyphRomTooLarge { .. }) => warn!("{}", e),
            Err(e) => return Err(e.into()),
        }
    }

    crtc.clear();
    crtc.print(&args.banner);

    let mut input = StdinInput::new()?;
    let mut display = TermDisplay::new()?;
    FrameLoop::new(&mut crtc, &mut display, &mut input, DEFAULT_FRAME_TIME).run(args.frames)?;
    Ok(())
}
