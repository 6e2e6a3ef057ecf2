#![allow(clippy::uninlined_format_args)]

pub mod audio;
pub mod graphics;
pub mod util;

use std::{
    path::PathBuf,
    process,
    sync::{Arc, Mutex},
};

use audio::Audio;
use clap::Parser;
use gboyemu::{
    gb::GameBoy,
    infoln,
    pad::PadKey,
    ppu::{DISPLAY_WIDTH, FRAME_CYCLES},
    warnln,
};
use gboyemu_common::util::{read_file, write_file, SharedThread};
use graphics::{Graphics, ZOOM_DEFAULT, ZOOM_MAX};
use sdl2::{event::Event, keyboard::Keycode, pixels::PixelFormatEnum};
use util::ensure_dump_dir;

/// The base title to be used in the window.
static TITLE: &str = "GBOYEMU";

/// Wall clock period of one pacing checkpoint, derived from the
/// frame length at the nominal master clock (16 ms).
const SYNC_PERIOD_MS: u32 = (FRAME_CYCLES as u64 * 1000 / GameBoy::CPU_FREQ as u64) as u32;

/// Number of cycles that must be executed before the pacing
/// checkpoint is evaluated.
const SYNC_PERIOD_CYCLES: u32 = (GameBoy::CPU_FREQ / 1000) * SYNC_PERIOD_MS;

/// Hard clamp on the accumulated pacing debt, avoiding an
/// unbounded catch-up run after a host suspend.
const DELAYED_CLAMP_MS: u32 = SYNC_PERIOD_MS * 10;

/// Number of opcodes executed per scheduler iteration, between
/// two host event polls.
const OPCODES_PER_TICK: u32 = 10;

#[derive(Parser)]
#[command(name = "gboyemu", about = "A Game Boy (DMG) emulator written in Rust")]
struct Args {
    /// Path of the ROM file to be loaded
    rom_path: String,
}

pub struct Emulator {
    /// The emulated system, shared with the audio callback
    /// thread which drains the sound buffers.
    system: SharedThread<GameBoy>,

    graphics: Graphics,
    _audio: Audio,

    /// Directory where save state dumps are kept, one file per
    /// cartridge title.
    dump_dir: PathBuf,

    /// Name of the dump file of the loaded cartridge, derived
    /// from its lowercased title.
    dump_name: String,

    /// When set every executed instruction is printed to the
    /// standard error stream.
    disassemble: bool,

    /// Cycles executed since the last pacing checkpoint.
    sync_cycles: u32,

    /// Timestamp (in SDL ticks) of the last pacing checkpoint.
    checkpoint: u32,

    /// Accumulated wall clock debt in milliseconds, credited
    /// back on the next checkpoints or paid with frame skips.
    delayed: u32,
}

impl Emulator {
    pub fn run(&mut self) {
        let texture_creator = self.graphics.canvas.texture_creator();
        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGBA32,
                gboyemu::ppu::DISPLAY_WIDTH as u32,
                gboyemu::ppu::DISPLAY_HEIGHT as u32,
            )
            .unwrap();

        let mut last_frame = 0xffffu16;
        self.checkpoint = self.graphics.timer_subsystem.ticks();

        'main: loop {
            while let Some(event) = self.graphics.event_pump.poll_event() {
                match event {
                    Event::Quit { .. } => break 'main,
                    Event::KeyDown {
                        keycode: Some(keycode),
                        ..
                    } => match keycode {
                        Keycode::Escape => break 'main,
                        Keycode::F1 => self.restore_state(),
                        Keycode::F2 => self.save_state(),
                        Keycode::F10 => self.disassemble = !self.disassemble,
                        Keycode::KpPlus | Keycode::Plus => {
                            let zoom = self.graphics.zoom();
                            self.graphics.set_zoom((zoom + 1).min(ZOOM_MAX));
                        }
                        Keycode::KpMinus | Keycode::Minus => {
                            let zoom = self.graphics.zoom();
                            self.graphics.set_zoom(zoom.saturating_sub(1).max(1));
                        }
                        keycode => {
                            if let Some(key) = key_to_pad(keycode) {
                                self.system.lock().unwrap().key_press(key);
                            }
                        }
                    },
                    Event::KeyUp {
                        keycode: Some(keycode),
                        ..
                    } => {
                        if let Some(key) = key_to_pad(keycode) {
                            self.system.lock().unwrap().key_lift(key);
                        }
                    }
                    _ => (),
                }
            }

            let stopped = self.system.lock().unwrap().stopped();
            if stopped {
                // a stopped CPU leaves only the event pump running,
                // a key press brings the system back
                self.graphics.timer_subsystem.delay(SYNC_PERIOD_MS);
                self.checkpoint = self.graphics.timer_subsystem.ticks();
                continue;
            }

            let mut new_frame = false;
            {
                let mut system = self.system.lock().unwrap();

                // when the pacing debt has grown to a full sync
                // period the next frame is fast-forwarded
                if self.delayed >= SYNC_PERIOD_MS {
                    system.set_frame_skip(true);
                }

                for _ in 0..OPCODES_PER_TICK {
                    self.sync_cycles += system.clock() as u32;
                    if self.disassemble {
                        eprintln!("{}", system.cpu_i().description_default());
                    }
                }

                if system.ppu_frame() != last_frame {
                    texture
                        .update(None, system.frame_buffer(), DISPLAY_WIDTH * 4)
                        .unwrap();
                    last_frame = system.ppu_frame();
                    new_frame = true;
                }
            }

            if new_frame {
                self.graphics.canvas.clear();
                self.graphics.canvas.copy(&texture, None, None).unwrap();
                self.graphics.canvas.present();
            }

            if self.sync_cycles >= SYNC_PERIOD_CYCLES {
                self.pace();
                self.sync_cycles = 0;
            }
        }
    }

    /// Real time pacing checkpoint: sleeps away the time budget
    /// that is left for this sync period, crediting any debt from
    /// previous periods first, or accumulates new debt when the
    /// emulation is running behind.
    fn pace(&mut self) {
        let now = self.graphics.timer_subsystem.ticks();
        let delay = now.saturating_sub(self.checkpoint);

        if delay < SYNC_PERIOD_MS {
            let mut time2sleep = SYNC_PERIOD_MS - delay;
            if self.delayed > 0 {
                if self.delayed > time2sleep {
                    self.delayed -= time2sleep;
                    time2sleep = 0;
                } else {
                    time2sleep -= self.delayed;
                    self.delayed = 0;
                }
            }
            if time2sleep > 0 {
                self.graphics.timer_subsystem.delay(time2sleep);
            }
        } else {
            self.delayed += delay - SYNC_PERIOD_MS;
            if self.delayed > DELAYED_CLAMP_MS {
                self.delayed = DELAYED_CLAMP_MS;
            }
        }

        self.checkpoint = self.graphics.timer_subsystem.ticks();
    }

    fn dump_path(&self) -> PathBuf {
        self.dump_dir.join(format!("{}.dump", self.dump_name))
    }

    /// Writes the current core state to the dump file of the
    /// loaded cartridge, failures are not fatal.
    fn save_state(&mut self) {
        let path = self.dump_path();
        let result = self
            .system
            .lock()
            .unwrap()
            .save_state()
            .and_then(|data| write_file(path.to_str().unwrap_or_default(), &data));
        match result {
            Ok(()) => infoln!("Successfully wrote {}", path.display()),
            Err(error) => warnln!("Failed dumping state: {}", error),
        }
    }

    /// Restores the core state from the dump file of the loaded
    /// cartridge, the running state is kept on failure.
    fn restore_state(&mut self) {
        let path = self.dump_path();
        let result = read_file(path.to_str().unwrap_or_default())
            .and_then(|data| self.system.lock().unwrap().load_state(&data));
        match result {
            Ok(()) => infoln!("Successfully read {}", path.display()),
            Err(error) => warnln!("Failed restoring state: {}", error),
        }
    }
}

fn key_to_pad(keycode: Keycode) -> Option<PadKey> {
    match keycode {
        Keycode::Up => Some(PadKey::Up),
        Keycode::Down => Some(PadKey::Down),
        Keycode::Left => Some(PadKey::Left),
        Keycode::Right => Some(PadKey::Right),
        Keycode::Return | Keycode::Return2 => Some(PadKey::Start),
        Keycode::Backspace => Some(PadKey::Select),
        Keycode::A => Some(PadKey::A),
        Keycode::Z => Some(PadKey::B),
        _ => None,
    }
}

fn start(args: &Args) -> Result<Emulator, String> {
    let dump_dir = ensure_dump_dir()?;

    let mut game_boy = GameBoy::new();
    let rom = game_boy
        .load_rom_file(&args.rom_path)
        .map_err(|error| format!("Could not load ROM: {}", error))?;

    let title = rom.title();
    infoln!("========= Cartridge =========");
    infoln!("{}", rom);
    infoln!("=============================");
    game_boy.boot();

    let sdl = sdl2::init()?;
    let mut graphics = Graphics::new(&sdl, TITLE, ZOOM_DEFAULT)?;
    graphics.set_title(&format!("{} - {}", TITLE, title));

    let system: SharedThread<GameBoy> = Arc::new(Mutex::new(game_boy));
    let audio = Audio::new(&sdl, system.clone())?;

    Ok(Emulator {
        system,
        graphics,
        _audio: audio,
        dump_dir,
        dump_name: title,
        disassemble: false,
        sync_cycles: 0,
        checkpoint: 0,
        delayed: 0,
    })
}

fn main() {
    let args = Args::parse();
    match start(&args) {
        Ok(mut emulator) => emulator.run(),
        Err(message) => {
            eprintln!("{}", message);
            process::exit(1);
        }
    }
}
