use gboyemu::ppu::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use sdl2::{render::Canvas, video::Window, EventPump, Sdl, TimerSubsystem, VideoSubsystem};

/// The maximum integer zoom factor that can be applied to
/// the emulated screen.
pub const ZOOM_MAX: u32 = 4;

/// The zoom factor in use when none is requested.
pub const ZOOM_DEFAULT: u32 = 2;

/// Wrapper around the SDL video resources required to present
/// the emulator frames, with integer zoom handling.
pub struct Graphics {
    pub canvas: Canvas<Window>,
    pub video_subsystem: VideoSubsystem,
    pub timer_subsystem: TimerSubsystem,
    pub event_pump: EventPump,
    zoom: u32,
}

impl Graphics {
    pub fn new(sdl: &Sdl, title: &str, zoom: u32) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let timer_subsystem = sdl.timer()?;
        let event_pump = sdl.event_pump()?;

        let zoom = zoom.clamp(1, ZOOM_MAX);
        let window = video_subsystem
            .window(
                title,
                DISPLAY_WIDTH as u32 * zoom,
                DISPLAY_HEIGHT as u32 * zoom,
            )
            .position_centered()
            .build()
            .map_err(|error| error.to_string())?;

        let mut canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|error| error.to_string())?;

        // the canvas scales the native resolution up to the
        // window size, realizing the zoom
        canvas
            .set_logical_size(DISPLAY_WIDTH as u32, DISPLAY_HEIGHT as u32)
            .map_err(|error| error.to_string())?;
        canvas.clear();
        canvas.present();

        Ok(Self {
            canvas,
            video_subsystem,
            timer_subsystem,
            event_pump,
            zoom,
        })
    }

    pub fn set_title(&mut self, title: &str) {
        self.canvas.window_mut().set_title(title).unwrap_or_default();
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: u32) {
        let zoom = zoom.clamp(1, ZOOM_MAX);
        if zoom == self.zoom {
            return;
        }
        self.zoom = zoom;
        self.canvas
            .window_mut()
            .set_size(
                DISPLAY_WIDTH as u32 * zoom,
                DISPLAY_HEIGHT as u32 * zoom,
            )
            .unwrap_or_default();
    }
}
