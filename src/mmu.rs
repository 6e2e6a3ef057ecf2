//! MMU (Memory Management Unit) functions and structures.

use std::io::Cursor;

use gboyemu_common::{
    data::{read_into, write_bytes},
    error::Error,
};

use crate::{
    apu::Apu,
    consts::{
        DIV_ADDR, DMA_ADDR, IE_ADDR, IF_ADDR, JOYP_ADDR, SB_ADDR, SC_ADDR, TAC_ADDR, TIMA_ADDR,
    },
    divider::Divider,
    pad::Pad,
    ppu::Ppu,
    rom::Cartridge,
    serial::Serial,
    state::StateComponent,
    timer::Timer,
    warnln,
};

/// Size of the work RAM, mapped at 0xC000-0xDFFF and echoed
/// at 0xE000-0xFDFF.
pub const RAM_SIZE: usize = 8192;

/// Size of the scratch I/O slab that backs the addresses of
/// the 0xFF00-0xFF7F page without a dedicated handler.
pub const IO_SIZE: usize = 128;

/// Size of the high RAM area at 0xFF80-0xFFFE.
pub const HRAM_SIZE: usize = 127;

pub struct Mmu {
    /// Register that controls the interrupts that are considered
    /// to be enabled and should be triggered.
    pub ie: u8,

    /// Reference to the PPU (Pixel Processing Unit) that is going
    /// to be used both for VRAM/OAM access and to forward register
    /// operations.
    ppu: Ppu,

    /// Reference to the APU (Audio Processing Unit) that is going
    /// to be used for register access operations.
    apu: Apu,

    /// Reference to the Gamepad structure that is going to control
    /// the I/O access to the joypad register.
    pad: Pad,

    /// The timer controller to be used as part of the I/O access
    /// that is memory mapped.
    timer: Timer,

    /// The free running divider counter, memory mapped at 0xFF04.
    divider: Divider,

    /// The serial transfer controller, as a single unit stub that
    /// completes transfers immediately.
    serial: Serial,

    /// The cartridge ROM that is currently loaded into the system,
    /// with its banked ROM and RAM views.
    rom: Cartridge,

    /// Buffer used to store the work RAM of the system, mapped
    /// in the 0xC000-0xDFFF range and echoed right after it.
    ram: [u8; RAM_SIZE],

    /// Scratch storage for the I/O addresses without a dedicated
    /// handler, reads and writes pass through it untouched.
    io: [u8; IO_SIZE],

    /// High RAM memory that should provide extra speed for regular
    /// operations.
    hram: [u8; HRAM_SIZE],
}

impl Mmu {
    pub fn new(ppu: Ppu, apu: Apu, pad: Pad, timer: Timer, divider: Divider, serial: Serial) -> Self {
        Self {
            ie: 0x0,
            ppu,
            apu,
            pad,
            timer,
            divider,
            serial,
            rom: Cartridge::new(),
            ram: [0u8; RAM_SIZE],
            io: [0u8; IO_SIZE],
            hram: [0u8; HRAM_SIZE],
        }
    }

    pub fn reset(&mut self) {
        self.ie = 0x0;
        self.rom = Cartridge::new();
        self.ram = [0u8; RAM_SIZE];
        self.io = [0u8; IO_SIZE];
        self.hram = [0u8; HRAM_SIZE];
    }

    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            // 0x0000-0x7FFF - Cartridge ROM (fixed and switchable banks)
            0x0000..=0x7fff => self.rom.read(addr),

            // 0x8000-0x9FFF - Graphics: VRAM (8 KB)
            0x8000..=0x9fff => self.ppu.read(addr),

            // 0xA000-0xBFFF - External cartridge RAM (8 KB)
            0xa000..=0xbfff => self.rom.read(addr),

            // 0xC000-0xDFFF - Work RAM (8 KB)
            0xc000..=0xdfff => self.ram[(addr & 0x1fff) as usize],

            // 0xE000-0xFDFF - Work RAM echo
            0xe000..=0xfdff => self.ram[(addr & 0x1fff) as usize],

            // 0xFE00-0xFE9F - Object attribute memory (OAM)
            0xfe00..=0xfe9f => self.ppu.read(addr),

            // 0xFEA0-0xFEFF - Not usable, a correct program never
            // reads here
            0xfea0..=0xfeff => {
                warnln!("Reading from unusable location 0x{:04x}", addr);
                0x00
            }

            // 0xFF00 - Joypad input
            JOYP_ADDR => self.pad.read(addr),

            // 0xFF01-0xFF02 - Serial data transfer
            SB_ADDR..=SC_ADDR => self.serial.read(addr),

            // 0xFF04 - Divider register
            DIV_ADDR => self.divider.read(addr),

            // 0xFF05-0xFF07 - Timer
            TIMA_ADDR..=TAC_ADDR => self.timer.read(addr),

            // 0xFF0F — IF: Interrupt flag
            IF_ADDR => {
                (if self.ppu.int_vblank() { 0x01 } else { 0x00 })
                    | (if self.ppu.int_stat() { 0x02 } else { 0x00 })
                    | (if self.timer.int_tima() { 0x04 } else { 0x00 })
                    | (if self.serial.int_serial() { 0x08 } else { 0x00 })
                    | (if self.pad.int_pad() { 0x10 } else { 0x00 })
                    | 0xe0
            }

            // 0xFF10-0xFF26 — Audio registers
            // 0xFF30-0xFF3F — Wave pattern RAM
            0xff10..=0xff26 | 0xff30..=0xff3f => self.apu.read(addr),

            // 0xFF40-0xFF45 - PPU registers
            // 0xFF47-0xFF4B - PPU registers
            0xff40..=0xff45 | 0xff47..=0xff4b => self.ppu.read(addr),

            // 0xFF46 — DMA: OAM DMA source address & start
            DMA_ADDR => self.io[(addr & 0x007f) as usize],

            // 0xFF00-0xFF7F - remaining I/O page, scratch backed
            0xff00..=0xff7f => self.io[(addr & 0x007f) as usize],

            // 0xFF80-0xFFFE - High RAM (HRAM)
            0xff80..=0xfffe => self.hram[(addr & 0x007f) as usize],

            // 0xFFFF — IE: Interrupt enable
            IE_ADDR => self.ie,
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        match addr {
            // 0x0000-0x7FFF - Cartridge MBC control
            0x0000..=0x7fff => self.rom.write(addr, value),

            // 0x8000-0x9FFF - Graphics: VRAM (8 KB)
            0x8000..=0x9fff => self.ppu.write(addr, value),

            // 0xA000-0xBFFF - External cartridge RAM (8 KB)
            0xa000..=0xbfff => self.rom.write(addr, value),

            // 0xC000-0xDFFF - Work RAM (8 KB)
            0xc000..=0xdfff => self.ram[(addr & 0x1fff) as usize] = value,

            // 0xE000-0xFDFF - Work RAM echo
            0xe000..=0xfdff => self.ram[(addr & 0x1fff) as usize] = value,

            // 0xFE00-0xFE9F - Object attribute memory (OAM)
            0xfe00..=0xfe9f => self.ppu.write(addr, value),

            // 0xFEA0-0xFEFF - Not usable
            0xfea0..=0xfeff => {}

            // 0xFF00 - Joypad input
            JOYP_ADDR => self.pad.write(addr, value),

            // 0xFF01-0xFF02 - Serial data transfer
            SB_ADDR..=SC_ADDR => self.serial.write(addr, value),

            // 0xFF04 - Divider register
            DIV_ADDR => self.divider.write(addr, value),

            // 0xFF05-0xFF07 - Timer
            TIMA_ADDR..=TAC_ADDR => self.timer.write(addr, value),

            // 0xFF0F — IF: Interrupt flag
            IF_ADDR => {
                self.ppu.set_int_vblank(value & 0x01 == 0x01);
                self.ppu.set_int_stat(value & 0x02 == 0x02);
                self.timer.set_int_tima(value & 0x04 == 0x04);
                self.serial.set_int_serial(value & 0x08 == 0x08);
                self.pad.set_int_pad(value & 0x10 == 0x10);
            }

            // 0xFF10-0xFF26 — Audio registers
            // 0xFF30-0xFF3F — Wave pattern RAM
            0xff10..=0xff26 | 0xff30..=0xff3f => self.apu.write(addr, value),

            // 0xFF40-0xFF45 - PPU registers
            // 0xFF47-0xFF4B - PPU registers
            0xff40..=0xff45 | 0xff47..=0xff4b => self.ppu.write(addr, value),

            // 0xFF46 — DMA: OAM DMA source address & start
            DMA_ADDR => {
                self.io[(addr & 0x007f) as usize] = value;
                self.oam_dma(value);
            }

            // 0xFF00-0xFF7F - remaining I/O page, scratch backed
            0xff00..=0xff7f => self.io[(addr & 0x007f) as usize] = value,

            // 0xFF80-0xFFFE - High RAM (HRAM)
            0xff80..=0xfffe => self.hram[(addr & 0x007f) as usize] = value,

            // 0xFFFF — IE: Interrupt enable
            IE_ADDR => self.ie = value,
        }
    }

    /// Copies 160 bytes from the provided page into OAM, going
    /// through the normal bus read path.
    fn oam_dma(&mut self, value: u8) {
        let source = (value as u16) << 8;
        for index in 0..160u16 {
            let byte = self.read(source + index);
            self.ppu.write(0xfe00 + index, byte);
        }
    }

    #[inline(always)]
    pub fn ppu(&mut self) -> &mut Ppu {
        &mut self.ppu
    }

    #[inline(always)]
    pub fn ppu_i(&self) -> &Ppu {
        &self.ppu
    }

    #[inline(always)]
    pub fn apu(&mut self) -> &mut Apu {
        &mut self.apu
    }

    #[inline(always)]
    pub fn apu_i(&self) -> &Apu {
        &self.apu
    }

    #[inline(always)]
    pub fn pad(&mut self) -> &mut Pad {
        &mut self.pad
    }

    #[inline(always)]
    pub fn pad_i(&self) -> &Pad {
        &self.pad
    }

    #[inline(always)]
    pub fn timer(&mut self) -> &mut Timer {
        &mut self.timer
    }

    #[inline(always)]
    pub fn timer_i(&self) -> &Timer {
        &self.timer
    }

    #[inline(always)]
    pub fn divider(&mut self) -> &mut Divider {
        &mut self.divider
    }

    #[inline(always)]
    pub fn divider_i(&self) -> &Divider {
        &self.divider
    }

    #[inline(always)]
    pub fn serial(&mut self) -> &mut Serial {
        &mut self.serial
    }

    #[inline(always)]
    pub fn serial_i(&self) -> &Serial {
        &self.serial
    }

    #[inline(always)]
    pub fn rom(&mut self) -> &mut Cartridge {
        &mut self.rom
    }

    #[inline(always)]
    pub fn rom_i(&self) -> &Cartridge {
        &self.rom
    }

    pub fn set_rom(&mut self, rom: Cartridge) {
        self.rom = rom;
    }
}

impl StateComponent for Mmu {
    fn state(&self) -> Result<Vec<u8>, Error> {
        let mut cursor = Cursor::new(vec![]);
        write_bytes(&mut cursor, &self.ram)?;
        write_bytes(&mut cursor, &self.io)?;
        write_bytes(&mut cursor, &self.hram)?;
        Ok(cursor.into_inner())
    }

    fn set_state(&mut self, data: &[u8]) -> Result<(), Error> {
        let mut cursor = Cursor::new(data);
        read_into(&mut cursor, &mut self.ram)?;
        read_into(&mut cursor, &mut self.io)?;
        read_into(&mut cursor, &mut self.hram)?;
        Ok(())
    }
}

impl Default for Mmu {
    fn default() -> Self {
        Mmu::new(
            Ppu::default(),
            Apu::default(),
            Pad::default(),
            Timer::default(),
            Divider::default(),
            Serial::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Mmu;

    #[test]
    fn test_work_ram_echo() {
        let mut mmu = Mmu::default();
        mmu.write(0xc123, 0x42);
        assert_eq!(mmu.read(0xe123), 0x42);

        mmu.write(0xfd00, 0x24);
        assert_eq!(mmu.read(0xdd00), 0x24);
    }

    #[test]
    fn test_unusable_region() {
        let mut mmu = Mmu::default();
        mmu.write(0xfea0, 0x42);
        assert_eq!(mmu.read(0xfea0), 0x00);
    }

    #[test]
    fn test_high_ram() {
        let mut mmu = Mmu::default();
        mmu.write(0xff80, 0x42);
        mmu.write(0xfffe, 0x24);
        assert_eq!(mmu.read(0xff80), 0x42);
        assert_eq!(mmu.read(0xfffe), 0x24);
    }

    #[test]
    fn test_interrupt_flag_round_trip() {
        let mut mmu = Mmu::default();
        assert_eq!(mmu.read(0xff0f), 0xe0);

        mmu.write(0xff0f, 0x15);
        assert_eq!(mmu.read(0xff0f), 0xe0 | 0x15);
        assert!(mmu.ppu_i().int_vblank());
        assert!(mmu.timer_i().int_tima());
        assert!(mmu.pad_i().int_pad());

        mmu.write(0xff0f, 0x00);
        assert_eq!(mmu.read(0xff0f), 0xe0);
    }

    #[test]
    fn test_io_scratch_slab() {
        let mut mmu = Mmu::default();
        mmu.write(0xff7f, 0x42);
        assert_eq!(mmu.read(0xff7f), 0x42);
    }

    #[test]
    fn test_oam_dma() {
        let mut mmu = Mmu::default();
        for index in 0..160u16 {
            mmu.write(0xc000 + index, index as u8);
        }
        mmu.write(0xff46, 0xc0);

        for index in 0..160u16 {
            assert_eq!(mmu.read(0xfe00 + index), index as u8);
        }
        assert_eq!(mmu.read(0xff46), 0xc0);
    }
}
