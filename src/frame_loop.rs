use crate::crtc::Crtc;
use crate::display::Display;
use crate::input::{Input, ESCAPE};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// 50Hz field rate
pub const DEFAULT_FRAME_TIME: Duration = Duration::from_millis(20);

/// Drives the CRTC a frame at a time for the terminal front end. Each frame:
///  1. keypresses are typed at the cursor (standing in for the CPU's writes)
///  2. the blink timer ticks
///  3. the display draws a snapshot
/// then whatever is left of the frame time is slept off.
pub struct FrameLoop<'a> {
    crtc: &'a mut Crtc,
    display: &'a mut dyn Display,
    input: &'a mut dyn Input,
    frame_time: Duration,
}

impl<'a> FrameLoop<'a> {
    pub fn new(
        crtc: &'a mut Crtc,
        display: &'a mut dyn Display,
        input: &'a mut dyn Input,
        frame_time: Duration,
    ) -> Self {
        FrameLoop {
            crtc,
            display,
            input,
            frame_time,
        }
    }

    /// run one frame; false once the user has asked to stop
    pub fn step(&mut self) -> Result<bool, io::Error> {
        let keys = self.input.take_keys()?;
        if keys.contains(&ESCAPE) {
            debug!("escape pressed");
            return Ok(false);
        }
        for key in keys {
            self.crtc.put(key);
        }
        self.crtc.tick();
        self.display.draw(&self.crtc.snapshot())?;
        Ok(true)
    }

    /// run until escape, or for a fixed number of frames; returns how many
    /// frames were drawn
    pub fn run(&mut self, frames: Option<u64>) -> Result<u64, io::Error> {
        let mut count = 0;
        while frames.map_or(true, |limit| count < limit) {
            let started = Instant::now();
            if !self.step()? {
                break;
            }
            count += 1;
            if let Some(rest) = self.frame_time.checked_sub(started.elapsed()) {
                spin_sleep::sleep(rest);
            }
        }
        info!(frames = count, "frame loop finished");
        Ok(count)
    }
}
