use gboyemu::gb::GameBoy;
use gboyemu_common::util::SharedThread;
use sdl2::{
    audio::{AudioCallback, AudioDevice, AudioSpecDesired},
    AudioSubsystem, Sdl,
};

pub struct AudioWave {
    /// The shared emulator instance, drained for samples while
    /// the audio lock is held so that the APU never races with
    /// the main loop.
    system: SharedThread<GameBoy>,
}

impl AudioCallback for AudioWave {
    type Channel = i16;

    fn callback(&mut self, out: &mut [i16]) {
        out.fill(0);
        if let Ok(mut system) = self.system.lock() {
            system.audio_samples(out);
        }
    }
}

pub struct Audio {
    pub device: AudioDevice<AudioWave>,
    pub audio_subsystem: AudioSubsystem,
}

impl Audio {
    pub fn new(sdl: &Sdl, system: SharedThread<GameBoy>) -> Result<Self, String> {
        let audio_subsystem = sdl.audio()?;

        let desired_spec = AudioSpecDesired {
            freq: Some(44100),
            channels: Some(2),
            samples: Some(1024),
        };

        let device = audio_subsystem.open_playback(None, &desired_spec, |spec| {
            // aligns the resampler output with whatever rate the
            // device effectively opened at
            if let Ok(mut system) = system.lock() {
                system.apu().set_sampling_rate(spec.freq as u32);
            }
            AudioWave {
                system: system.clone(),
            }
        })?;

        // starts the playback by resuming the audio
        // device's activity
        device.resume();

        Ok(Self {
            device,
            audio_subsystem,
        })
    }
}
