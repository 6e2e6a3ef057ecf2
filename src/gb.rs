//! Game Boy emulation entrypoint and associated functions and structures.
//!
//! Most of the meaningful publicly available functions and structures to
//! build a working emulator are present here.
//!
//! # Examples
//!
//! Creates a simple [`GameBoy`] instance, loads a cartridge and clocks
//! the system over one full frame.
//!
//! ```rust
//! use gboyemu::{gb::GameBoy, test::build_rom, rom::RomType};
//! let mut game_boy = GameBoy::new();
//! game_boy.load_rom(&build_rom(RomType::RomOnly, 2, 0x00)).unwrap();
//! game_boy.boot();
//! let cycles = game_boy.next_frame();
//! println!("Ran {} cycles", cycles);
//! ```

use std::fmt::{self, Display, Formatter};

use gboyemu_common::{error::Error, util::read_file};

use crate::{
    apu::Apu,
    cpu::Cpu,
    divider::Divider,
    mmu::Mmu,
    pad::{Pad, PadKey},
    ppu::{Ppu, PpuMode, FRAME_BUFFER_SIZE},
    rom::Cartridge,
    serial::Serial,
    state::{load_state, save_state},
    timer::Timer,
};

/// Top level structure that abstracts the usage of the
/// Game Boy system. Should serve as the main entry-point API.
pub struct GameBoy {
    /// Reference to the Game Boy CPU component, the main
    /// element of the system. The cycles returned by each of
    /// its clock operations pace every other component.
    cpu: Cpu,
}

impl GameBoy {
    /// The nominal frequency of the master clock in Hz.
    pub const CPU_FREQ: u32 = 4194304;

    /// The visual refresh rate of the emulated screen, derived
    /// from the frame length in clock ticks.
    pub const VISUAL_FREQ: f32 = 59.7275;

    pub fn new() -> Self {
        let mmu = Mmu::new(
            Ppu::new(),
            Apu::default(),
            Pad::default(),
            Timer::default(),
            Divider::default(),
            Serial::default(),
        );
        Self { cpu: Cpu::new(mmu) }
    }

    pub fn reset(&mut self) {
        self.ppu().reset();
        self.apu().reset();
        self.timer().reset();
        self.divider().reset();
        self.serial().reset();
        self.pad().reset();
        self.mmu().reset();
        self.cpu.reset();
    }

    /// Jumps the machine to the post boot state, setting the CPU
    /// registers and the LCD control accordingly, so that the
    /// cartridge entry point executes next.
    pub fn boot(&mut self) {
        self.cpu.boot();
    }

    /// Advances the complete system by one CPU operation, fanning
    /// the consumed cycles out to the timer, divider, APU and PPU
    /// in that order. Returns the number of cycles consumed.
    pub fn clock(&mut self) -> u16 {
        let cycles = self.cpu.clock() as u16;
        self.timer().clock(cycles);
        self.divider().clock(cycles);
        self.apu().clock(cycles);
        self.ppu().clock(cycles);
        cycles
    }

    /// Equivalent to `clock()` but allows the execution of multiple
    /// clock operations in a single call.
    pub fn clocks(&mut self, count: usize) -> u64 {
        let mut cycles = 0_u64;
        for _ in 0..count {
            cycles += self.clock() as u64;
        }
        cycles
    }

    /// Clocks the emulator until the limit of cycles that has been
    /// provided and returns the amount of cycles clocked.
    pub fn clocks_cycles(&mut self, limit: usize) -> u64 {
        let mut cycles = 0_u64;
        while cycles < limit as u64 {
            cycles += self.clock() as u64;
        }
        cycles
    }

    /// Runs the system until the PPU finishes the frame currently
    /// in drawing, returning the cycles consumed.
    pub fn next_frame(&mut self) -> u32 {
        let mut cycles = 0u32;
        let current_frame = self.ppu_frame();
        while self.ppu_frame() == current_frame {
            cycles += self.clock() as u32;
        }
        cycles
    }

    pub fn key_press(&mut self, key: PadKey) {
        self.pad().key_press(key);

        // a fresh key press releases a stopped CPU
        if self.cpu.stopped() {
            self.cpu.set_stopped(false);
        }
    }

    pub fn key_lift(&mut self, key: PadKey) {
        self.pad().key_lift(key);
    }

    pub fn load_rom(&mut self, data: &[u8]) -> Result<&Cartridge, Error> {
        let rom = Cartridge::from_data(data)?;
        self.mmu().set_rom(rom);
        Ok(self.rom_i())
    }

    pub fn load_rom_file(&mut self, path: &str) -> Result<&Cartridge, Error> {
        let data = read_file(path)?;
        self.load_rom(&data)
    }

    /// Serializes the complete core state into a byte buffer,
    /// in the fixed snapshot region order.
    pub fn save_state(&self) -> Result<Vec<u8>, Error> {
        save_state(self)
    }

    /// Restores a snapshot previously produced by [`GameBoy::save_state`],
    /// leaving the current state untouched when the data is not valid.
    pub fn load_state(&mut self, data: &[u8]) -> Result<(), Error> {
        load_state(self, data)
    }

    #[inline(always)]
    pub fn cpu(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    #[inline(always)]
    pub fn cpu_i(&self) -> &Cpu {
        &self.cpu
    }

    #[inline(always)]
    pub fn mmu(&mut self) -> &mut Mmu {
        self.cpu.mmu()
    }

    #[inline(always)]
    pub fn mmu_i(&self) -> &Mmu {
        self.cpu.mmu_i()
    }

    #[inline(always)]
    pub fn ppu(&mut self) -> &mut Ppu {
        self.cpu.mmu().ppu()
    }

    #[inline(always)]
    pub fn ppu_i(&self) -> &Ppu {
        self.cpu.mmu_i().ppu_i()
    }

    #[inline(always)]
    pub fn apu(&mut self) -> &mut Apu {
        self.cpu.mmu().apu()
    }

    #[inline(always)]
    pub fn apu_i(&self) -> &Apu {
        self.cpu.mmu_i().apu_i()
    }

    #[inline(always)]
    pub fn timer(&mut self) -> &mut Timer {
        self.cpu.mmu().timer()
    }

    #[inline(always)]
    pub fn timer_i(&self) -> &Timer {
        self.cpu.mmu_i().timer_i()
    }

    #[inline(always)]
    pub fn divider(&mut self) -> &mut Divider {
        self.cpu.mmu().divider()
    }

    #[inline(always)]
    pub fn divider_i(&self) -> &Divider {
        self.cpu.mmu_i().divider_i()
    }

    #[inline(always)]
    pub fn pad(&mut self) -> &mut Pad {
        self.cpu.mmu().pad()
    }

    #[inline(always)]
    pub fn pad_i(&self) -> &Pad {
        self.cpu.mmu_i().pad_i()
    }

    #[inline(always)]
    pub fn serial(&mut self) -> &mut Serial {
        self.cpu.mmu().serial()
    }

    #[inline(always)]
    pub fn serial_i(&self) -> &Serial {
        self.cpu.mmu_i().serial_i()
    }

    #[inline(always)]
    pub fn rom(&mut self) -> &mut Cartridge {
        self.cpu.mmu().rom()
    }

    #[inline(always)]
    pub fn rom_i(&self) -> &Cartridge {
        self.cpu.mmu_i().rom_i()
    }

    #[inline(always)]
    pub fn frame_buffer(&self) -> &[u8; FRAME_BUFFER_SIZE] {
        self.ppu_i().frame_buffer()
    }

    #[inline(always)]
    pub fn ppu_ly(&self) -> u8 {
        self.ppu_i().ly()
    }

    #[inline(always)]
    pub fn ppu_mode(&self) -> PpuMode {
        self.ppu_i().mode()
    }

    #[inline(always)]
    pub fn ppu_frame(&self) -> u16 {
        self.ppu_i().frame_index()
    }

    /// Marks the next PPU frame to be fast-forwarded, with no
    /// pixel composition and no presentation.
    pub fn set_frame_skip(&mut self, value: bool) {
        self.ppu().set_frame_skip(value);
    }

    #[inline(always)]
    pub fn stopped(&self) -> bool {
        self.cpu_i().stopped()
    }

    /// Drains up to `out.len() / 2` stereo audio frames from the
    /// APU, interleaved LRLR, returning the frames written.
    pub fn audio_samples(&mut self, out: &mut [i16]) -> usize {
        self.apu().read_samples(out)
    }

    pub fn audio_sampling_rate(&self) -> u32 {
        self.apu_i().sampling_rate()
    }

    pub fn description(&self) -> String {
        format!(
            "Model     Game Boy (DMG)\nClock     {} Hz\n{}",
            Self::CPU_FREQ,
            self.rom_i().description()
        )
    }
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for GameBoy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        consts::IF_ADDR,
        ppu::{PpuMode, FRAME_CYCLES},
        rom::RomType,
        test::{build_rom, build_test},
    };

    use super::GameBoy;

    #[test]
    fn test_boot_state() {
        let gb = build_test();

        assert_eq!(gb.cpu_i().pc(), 0x0100);
        assert_eq!(gb.cpu_i().sp(), 0xfffe);
        assert_eq!(gb.cpu_i().af(), 0x01b0);
        assert_eq!(gb.cpu_i().bc(), 0x0013);
        assert_eq!(gb.cpu_i().de(), 0x00d8);
        assert_eq!(gb.cpu_i().hl(), 0x014d);
        assert!(!gb.cpu_i().ime());

        assert_eq!(gb.mmu_i().read(0xff40), 0x91);
        assert_eq!(gb.mmu_i().read(0xff41) & 0x03, 0x02);
        assert_eq!(gb.ppu_ly(), 0);
    }

    #[test]
    fn test_divider_rate() {
        let mut gb = build_test();

        // an empty ROM executes NOPs, so 64 steps are exactly
        // 256 cycles and one divider increment
        gb.clocks_cycles(256);
        assert_eq!(gb.divider_i().div(), 1);

        gb.clocks_cycles(256 * 16);
        assert_eq!(gb.divider_i().div(), 17);
    }

    #[test]
    fn test_timer_interrupt_flag() {
        let mut gb = build_test();
        gb.mmu().write(0xff06, 0xab);
        gb.mmu().write(0xff07, 0x05);
        gb.mmu().write(0xff05, 0xff);

        gb.clocks_cycles(16);
        assert_eq!(gb.timer_i().tima(), 0xab);
        assert_eq!(gb.mmu_i().read(IF_ADDR) & 0x04, 0x04);
    }

    #[test]
    fn test_vblank_timing() {
        let mut gb = build_test();

        // 144 visible lines of 456 cycles each reach V-Blank
        gb.clocks_cycles(144 * 456);
        assert_eq!(gb.ppu_ly(), 144);
        assert_eq!(gb.ppu_mode(), PpuMode::VBlank);
        assert_eq!(gb.mmu_i().read(IF_ADDR) & 0x01, 0x01);
    }

    #[test]
    fn test_frame_cycle_count() {
        let mut gb = build_test();

        gb.clocks_cycles(FRAME_CYCLES as usize);
        assert_eq!(gb.ppu_ly(), 0);
        assert_eq!(gb.ppu_frame(), 1);
    }

    #[test]
    fn test_stop_resume_on_key_press() {
        let mut gb = build_test();

        // places a STOP opcode in work RAM and executes it
        gb.mmu().write(0xc000, 0x10);
        gb.cpu().set_pc(0xc000);
        gb.clock();
        assert!(gb.stopped());

        gb.key_press(crate::pad::PadKey::Start);
        assert!(!gb.stopped());
        assert!(gb.pad_i().int_pad());
    }

    #[test]
    fn test_save_state_identity() {
        let mut gb = GameBoy::new();
        gb.load_rom(&build_rom(RomType::Mbc1Ram, 8, 0x03)).unwrap();
        gb.boot();

        // stirs up some state across the components
        gb.mmu().write(0x0000, 0x0a);
        gb.mmu().write(0x2000, 0x03);
        gb.mmu().write(0xa000, 0x42);
        gb.mmu().write(0xc123, 0x24);
        gb.mmu().write(0x8010, 0xff);
        gb.mmu().write(0xff85, 0x11);
        gb.clocks_cycles(5000);

        let snapshot = gb.save_state().unwrap();

        // runs further, then restores and expects the serialized
        // state to be byte for byte identical to the snapshot
        gb.clocks_cycles(100000);
        gb.mmu().write(0xa000, 0x99);
        gb.load_state(&snapshot).unwrap();
        let restored = gb.save_state().unwrap();
        assert_eq!(snapshot, restored);
    }

    #[test]
    fn test_load_state_rejects_bad_length() {
        let mut gb = build_test();
        let snapshot = gb.save_state().unwrap();

        let result = gb.load_state(&snapshot[..snapshot.len() - 1]);
        assert!(result.is_err());

        // the running state is left untouched by the failure
        let unchanged = gb.save_state().unwrap();
        assert_eq!(snapshot, unchanged);
    }
}
