use std::io::Read;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context};
use log::{error, info};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_vm::{Chip8, Config};
use display::Display;

use crate::keymap;

pub fn run(
    rom: &mut dyn Read,
    config: Config,
    frame_rate: u32,
    scale: u32,
) -> anyhow::Result<()> {
    let mut chip8 = Chip8::with_config(config);
    chip8.load_rom(rom).context("unable to load ROM")?;

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let mut display = Display::new(&sdl, scale).map_err(|e| anyhow!(e))?;
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;

    // Set initial timing
    let frame_time = Duration::from_secs(1) / frame_rate.max(1);
    let mut last_frame = Instant::now();

    // Whether or not the frame rate should be respected
    let mut fast_forward = false;
    let mut was_beeping = false;

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(Keycode::Space),
                    ..
                } => fast_forward = true,
                Event::KeyUp {
                    keycode: Some(Keycode::Space),
                    ..
                } => fast_forward = false,
                _ => continue,
            };
        }

        // Latch whatever is held down this frame
        let keys = keymap::latch(events.keyboard_state().pressed_scancodes());

        // Update state
        if let Err(e) = chip8.run_frame(keys) {
            error!("halted at {:#05X}: {}", chip8.pc(), e);
            return Err(e).context("interpreter halted");
        }

        if chip8.sound_active() != was_beeping {
            was_beeping = chip8.sound_active();
            info!("sound {}", if was_beeping { "on" } else { "off" });
        }

        // If the draw flag is set, unset it and render the current frame
        if let Some(frame) = chip8.take_frame() {
            display.render(&frame).map_err(|e| anyhow!(e))?;
        }

        // Handle timing
        let elapsed = last_frame.elapsed();
        if !fast_forward && frame_time > elapsed {
            std::thread::sleep(frame_time - elapsed);
        }
        last_frame = Instant::now();
    }

    Ok(())
}
