use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use log::info;
use sdl2::event::Event;

use chip8_core::constants::TIMER_HZ;
use chip8_core::{Chip8, FaultPolicy};
use chip8_display::Display;

use crate::keymap::keymap;

/// Drives the machine: renders pending frames, pumps input events, executes
/// one cycle per iteration, and ticks the timers on their own fixed cadence.
pub fn run(rom: &Path, clock_hz: u32, policy: FaultPolicy) -> anyhow::Result<()> {
    let mut chip8 = Chip8::with_policy(policy);

    // Load ROM
    let file = File::open(rom).with_context(|| format!("unable to open {}", rom.display()))?;
    let mut reader = BufReader::new(file);
    chip8.load_rom(&mut reader).context("unable to load ROM")?;
    info!("loaded ROM {}", rom.display());

    // Get SDL2 context
    let sdl = sdl2::init().map_err(anyhow::Error::msg)?;
    let mut display = Display::new(&sdl).map_err(anyhow::Error::msg)?;
    let mut events = sdl.event_pump().map_err(anyhow::Error::msg)?;

    // Set initial timing
    let cycle_time = Duration::from_secs(1) / clock_hz;
    let timer_interval = Duration::from_secs(1) / TIMER_HZ;
    let mut next_timer_tick = Instant::now() + timer_interval;

    'event: loop {
        let cycle_started = Instant::now();

        // If a draw or clear produced a new frame, render it
        if let Some(frame) = chip8.take_frame() {
            display.render(&frame).map_err(anyhow::Error::msg)?;
        }

        // Handle input; quit must stay responsive even while the machine is
        // suspended on a keypress or halted
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        chip8.key_press(kc);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        chip8.key_release(kc);
                    }
                }
                _ => continue,
            };
        }

        // Update state; a fault has already been logged by the core and
        // leaves the machine halted with the last frame on screen
        let _ = chip8.step();

        // Tick timers whenever their deadline has passed, independent of the
        // instruction dispatch rate
        let now = Instant::now();
        while now >= next_timer_tick {
            chip8.tick_timers();
            next_timer_tick += timer_interval;
        }

        // Throttle instruction dispatch
        let elapsed = cycle_started.elapsed();
        if cycle_time > elapsed {
            spin_sleep::sleep(cycle_time - elapsed);
        }
    }

    Ok(())
}
