//! Cartridge (ROM) related functions and structures.

use core::fmt;
use std::{
    fmt::{Display, Formatter},
    io::Cursor,
};

use gboyemu_common::{
    data::{read_into, read_u8, write_bytes, write_u8},
    error::Error,
    util::read_file,
};

use crate::{data::NINTENDO_LOGO, debugln, state::StateComponent, warnln};

pub const ROM_BANK_SIZE: usize = 16384;
pub const RAM_BANK_SIZE: usize = 8192;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RomType {
    RomOnly = 0x00,
    Mbc1 = 0x01,
    Mbc1Ram = 0x02,
    Mbc1RamBattery = 0x03,
}

impl RomType {
    pub fn description(&self) -> &'static str {
        match self {
            RomType::RomOnly => "ROM Only",
            RomType::Mbc1 => "MBC1",
            RomType::Mbc1Ram => "MBC1 + RAM",
            RomType::Mbc1RamBattery => "MBC1 + RAM + Battery",
        }
    }

    pub fn has_battery(&self) -> bool {
        *self == RomType::Mbc1RamBattery
    }
}

impl Display for RomType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RomSize {
    Size32K,
    Size64K,
    Size128K,
    Size256K,
    Size512K,
    Size1M,
    Size2M,
    Size1M1,
    Size1M2,
    Size1M5,
}

impl RomSize {
    pub fn description(&self) -> &'static str {
        match self {
            RomSize::Size32K => "32 KB",
            RomSize::Size64K => "64 KB",
            RomSize::Size128K => "128 KB",
            RomSize::Size256K => "256 KB",
            RomSize::Size512K => "512 KB",
            RomSize::Size1M => "1 MB",
            RomSize::Size2M => "2 MB",
            RomSize::Size1M1 => "1.1 MB",
            RomSize::Size1M2 => "1.2 MB",
            RomSize::Size1M5 => "1.5 MB",
        }
    }

    pub fn rom_banks(&self) -> u16 {
        match self {
            RomSize::Size32K => 2,
            RomSize::Size64K => 4,
            RomSize::Size128K => 8,
            RomSize::Size256K => 16,
            RomSize::Size512K => 32,
            RomSize::Size1M => 64,
            RomSize::Size2M => 128,
            RomSize::Size1M1 => 72,
            RomSize::Size1M2 => 80,
            RomSize::Size1M5 => 96,
        }
    }
}

impl Display for RomSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RamSize {
    NoRam,
    Size2K,
    Size8K,
    Size32K,
    Size128K,
}

impl RamSize {
    pub fn description(&self) -> &'static str {
        match self {
            RamSize::NoRam => "No RAM",
            RamSize::Size2K => "2 KB",
            RamSize::Size8K => "8 KB",
            RamSize::Size32K => "32 KB",
            RamSize::Size128K => "128 KB",
        }
    }

    pub fn ram_banks(&self) -> u16 {
        match self {
            RamSize::NoRam => 0,
            RamSize::Size2K => 1,
            RamSize::Size8K => 1,
            RamSize::Size32K => 4,
            RamSize::Size128K => 16,
        }
    }
}

impl Display for RamSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Structure that defines the ROM and RAM contents of a Game Boy
/// cartridge, together with the banking state of its MBC (Memory
/// Bank Controller).
///
/// For MBC1 the complete banking state is the single `bank_info`
/// byte: bit 7 selects the banking mode (0 = ROM, 1 = RAM), bits
/// 6-5 hold the upper ROM bits or the RAM bank and bits 4-0 the
/// lower ROM bits.
pub struct Cartridge {
    /// The complete data of the ROM cartridge, including
    /// every ROM bank.
    rom_data: Vec<u8>,

    /// The external RAM of the cartridge, sized according
    /// to the header's RAM size byte.
    ram_data: Vec<u8>,

    /// The memory handler in charge of the address decoding
    /// for the current cartridge type.
    handler: &'static Mbc,

    rom_type: RomType,
    rom_bank_count: u16,
    ram_bank_count: u16,

    /// MBC1 banking register, mode bit included.
    bank_info: u8,

    /// If access to the external RAM is currently enabled,
    /// controlled by writes to the 0x0000-0x1FFF range.
    ram_enabled: bool,
}

impl Cartridge {
    pub fn new() -> Self {
        Self {
            rom_data: vec![],
            ram_data: vec![],
            handler: &NO_MBC,
            rom_type: RomType::RomOnly,
            rom_bank_count: 0,
            ram_bank_count: 0,
            bank_info: 0x0,
            ram_enabled: false,
        }
    }

    pub fn from_data(data: &[u8]) -> Result<Self, Error> {
        let mut cartridge = Cartridge::new();
        cartridge.set_data(data)?;
        Ok(cartridge)
    }

    pub fn from_file(path: &str) -> Result<Self, Error> {
        let data = read_file(path)?;
        Self::from_data(&data)
    }

    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            // 0x0000-0x7FFF: 16 KiB ROM bank 00 & 16 KiB ROM bank 01-NN
            0x0000..=0x7fff => (self.handler.read_rom)(self, addr),
            // 0xA000-0xBFFF: 8 KiB external RAM
            0xa000..=0xbfff => (self.handler.read_ram)(self, addr),
            _ => {
                debugln!("Reading from unknown Cartridge location 0x{:04x}", addr);
                0x00
            }
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        match addr {
            // 0x0000-0x7FFF: MBC control registers
            0x0000..=0x7fff => (self.handler.write_rom)(self, addr, value),
            // 0xA000-0xBFFF: 8 KiB external RAM
            0xa000..=0xbfff => (self.handler.write_ram)(self, addr, value),
            _ => debugln!("Writing to unknown Cartridge location 0x{:04x}", addr),
        }
    }

    pub fn reset(&mut self) {
        self.rom_data = vec![];
        self.ram_data = vec![];
        self.handler = &NO_MBC;
        self.rom_type = RomType::RomOnly;
        self.rom_bank_count = 0;
        self.ram_bank_count = 0;
        self.bank_info = 0x0;
        self.ram_enabled = false;
    }

    /// The ROM bank selected by the current banking register,
    /// before the read-time 00/20/40/60 substitution.
    pub fn rom_bank(&self) -> u8 {
        if self.bank_info & 0x80 == 0x00 {
            // ROM banking mode, all seven bits select the bank
            self.bank_info & 0x7f
        } else {
            // RAM banking mode, only the lower five bits apply
            self.bank_info & 0x1f
        }
    }

    /// The RAM bank selected by the current banking register,
    /// always zero outside of RAM banking mode.
    pub fn ram_bank(&self) -> u8 {
        if self.bank_info & 0x80 == 0x80 {
            (self.bank_info >> 5) & 0x03
        } else {
            0x0
        }
    }

    /// The bank effectively mapped at the 0x4000-0x7FFF window.
    ///
    /// Banks 0x00, 0x20, 0x40 and 0x60 are never mapped there,
    /// the hardware substitutes the next bank instead.
    pub fn rom_bank_effective(&self) -> u8 {
        translate_bank(self.rom_bank())
    }

    pub fn ram_enabled(&self) -> bool {
        self.ram_enabled
    }

    pub fn rom_type(&self) -> RomType {
        match self.rom_data[0x0147] {
            0x00 => RomType::RomOnly,
            0x01 => RomType::Mbc1,
            0x02 => RomType::Mbc1Ram,
            0x03 => RomType::Mbc1RamBattery,
            _ => RomType::RomOnly,
        }
    }

    pub fn rom_size(&self) -> RomSize {
        match self.rom_data[0x0148] {
            0x00 => RomSize::Size32K,
            0x01 => RomSize::Size64K,
            0x02 => RomSize::Size128K,
            0x03 => RomSize::Size256K,
            0x04 => RomSize::Size512K,
            0x05 => RomSize::Size1M,
            0x06 => RomSize::Size2M,
            0x52 => RomSize::Size1M1,
            0x53 => RomSize::Size1M2,
            0x54 => RomSize::Size1M5,
            _ => RomSize::Size32K,
        }
    }

    pub fn ram_size(&self) -> RamSize {
        match self.rom_data[0x0149] {
            0x00 => RamSize::NoRam,
            0x01 => RamSize::Size2K,
            0x02 => RamSize::Size8K,
            0x03 => RamSize::Size32K,
            0x04 => RamSize::Size128K,
            _ => RamSize::NoRam,
        }
    }

    /// The cartridge title, up to 15 ASCII bytes at 0x0134,
    /// lowercased for display purposes.
    pub fn title(&self) -> String {
        let mut title = String::new();
        for byte in &self.rom_data[0x0134..=0x0142] {
            if *byte == 0x00 {
                break;
            }
            title.push((*byte as char).to_ascii_lowercase());
        }
        String::from(title.trim())
    }

    pub fn has_battery(&self) -> bool {
        self.rom_type.has_battery()
    }

    pub fn rom_data(&self) -> &Vec<u8> {
        &self.rom_data
    }

    pub fn ram_data(&self) -> &Vec<u8> {
        &self.ram_data
    }

    pub fn set_ram_data(&mut self, data: &[u8]) {
        self.ram_data = data.to_vec();
    }

    fn set_data(&mut self, data: &[u8]) -> Result<(), Error> {
        Self::ensure_data(data)?;
        self.rom_data = data.to_vec();
        self.rom_type = self.rom_type();
        self.rom_bank_count = self.rom_size().rom_banks();
        self.ram_bank_count = self.ram_size().ram_banks();

        // the data must cover the bank count the header declares
        if self.rom_data.len() != self.rom_bank_count as usize * ROM_BANK_SIZE {
            return Err(Error::RomSize);
        }

        self.ram_data = vec![0u8; self.ram_bank_count as usize * RAM_BANK_SIZE];
        self.bank_info = 0x0;
        self.ram_enabled = false;
        self.handler = match self.rom_type {
            RomType::RomOnly => &NO_MBC,
            RomType::Mbc1 | RomType::Mbc1Ram | RomType::Mbc1RamBattery => &MBC1,
        };
        Ok(())
    }

    /// Ensures that the data provided is a valid Game Boy ROM,
    /// running the complete set of header checks.
    fn ensure_data(data: &[u8]) -> Result<(), Error> {
        if data.len() < 0x0150 {
            return Err(Error::RomSize);
        }
        if data.len() % ROM_BANK_SIZE != 0 {
            return Err(Error::RomSize);
        }
        if data[0x0104..=0x0133] != NINTENDO_LOGO {
            return Err(Error::InvalidRom(String::from("Wrong ROM header")));
        }
        if data[0x0146] != 0x00 {
            return Err(Error::InvalidRom(String::from("Unsupported SGB ROM")));
        }
        if data[0x0147] > 0x03 {
            return Err(Error::InvalidRom(format!(
                "Unsupported cartridge type 0x{:02x}",
                data[0x0147]
            )));
        }
        if !matches!(data[0x0148], 0x00..=0x06 | 0x52 | 0x53 | 0x54) {
            return Err(Error::InvalidRom(format!(
                "Unknown ROM size 0x{:02x}",
                data[0x0148]
            )));
        }
        if data[0x0149] > 0x04 {
            return Err(Error::InvalidRom(format!(
                "Unknown RAM size 0x{:02x}",
                data[0x0149]
            )));
        }
        Ok(())
    }

    pub fn description(&self) -> String {
        format!(
            "Title     {}\nType      {}\nROM Size  {}\nRAM Size  {}",
            self.title(),
            self.rom_type,
            self.rom_size(),
            self.ram_size()
        )
    }
}

/// Translates a selected ROM bank into the bank effectively
/// mapped at the switchable window, substituting the banks
/// that are never visible there.
fn translate_bank(bank: u8) -> u8 {
    match bank {
        0x00 | 0x20 | 0x40 | 0x60 => bank + 1,
        _ => bank,
    }
}

impl StateComponent for Cartridge {
    fn state(&self) -> Result<Vec<u8>, Error> {
        let mut cursor = Cursor::new(vec![]);
        write_u8(&mut cursor, self.bank_info)?;
        write_u8(&mut cursor, self.ram_enabled as u8)?;
        write_bytes(&mut cursor, &self.ram_data)?;
        Ok(cursor.into_inner())
    }

    fn set_state(&mut self, data: &[u8]) -> Result<(), Error> {
        let mut cursor = Cursor::new(data);
        self.bank_info = read_u8(&mut cursor)?;
        self.ram_enabled = read_u8(&mut cursor)? != 0;
        read_into(&mut cursor, &mut self.ram_data)?;
        Ok(())
    }
}

impl Default for Cartridge {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Cartridge {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

pub struct Mbc {
    pub name: &'static str,
    pub read_rom: fn(rom: &Cartridge, addr: u16) -> u8,
    pub write_rom: fn(rom: &mut Cartridge, addr: u16, value: u8),
    pub read_ram: fn(rom: &Cartridge, addr: u16) -> u8,
    pub write_ram: fn(rom: &mut Cartridge, addr: u16, value: u8),
}

pub static NO_MBC: Mbc = Mbc {
    name: "No MBC",
    read_rom: |rom: &Cartridge, addr: u16| -> u8 {
        *rom.rom_data.get(addr as usize).unwrap_or(&0x00)
    },
    write_rom: |_rom: &mut Cartridge, addr: u16, value: u8| {
        warnln!(
            "Invalid write of 0x{:02x} to ROM only cartridge at 0x{:04x}",
            value,
            addr
        );
    },
    read_ram: |_rom: &Cartridge, _addr: u16| -> u8 {
        debugln!("Invalid RAM read: no RAM in cartridge");
        0x00
    },
    write_ram: |_rom: &mut Cartridge, _addr: u16, _value: u8| {
        debugln!("Invalid RAM write: no RAM in cartridge");
    },
};

pub static MBC1: Mbc = Mbc {
    name: "MBC1",
    read_rom: |rom: &Cartridge, addr: u16| -> u8 {
        match addr {
            // 0x0000-0x3FFF - ROM bank 00 (fixed)
            0x0000..=0x3fff => rom.rom_data[addr as usize],
            // 0x4000-0x7FFF - ROM bank 01-7F (switchable)
            0x4000..=0x7fff => {
                let offset = rom.rom_bank_effective() as usize * ROM_BANK_SIZE;
                *rom.rom_data
                    .get(offset + (addr - 0x4000) as usize)
                    .unwrap_or(&0x00)
            }
            _ => {
                warnln!("Reading from unknown Cartridge ROM location 0x{:04x}", addr);
                0xff
            }
        }
    },
    write_rom: |rom: &mut Cartridge, addr: u16, value: u8| {
        match addr {
            // 0x0000-0x1FFF - RAM enable latch
            0x0000..=0x1fff => {
                rom.ram_enabled = (value & 0x0f) == 0x0a;
            }
            // 0x2000-0x3FFF - ROM bank selection, 5 lower bits
            0x2000..=0x3fff => {
                rom.bank_info = (rom.bank_info & 0xe0) | (value & 0x1f);
            }
            // 0x4000-0x5FFF - RAM bank or ROM bank upper bits
            0x4000..=0x5fff => {
                rom.bank_info = ((value & 0x03) << 5) | (rom.bank_info & 0x9f);
            }
            // 0x6000-0x7FFF - banking mode selection
            0x6000..=0x7fff => {
                rom.bank_info = (rom.bank_info & 0x7f) | ((value & 0x01) << 7);
            }
            _ => warnln!("Writing to unknown Cartridge ROM location 0x{:04x}", addr),
        }
    },
    read_ram: |rom: &Cartridge, addr: u16| -> u8 {
        if !rom.ram_enabled {
            debugln!("Invalid RAM read: RAM not enabled");
            return 0x00;
        }
        let offset = rom.ram_bank() as usize * RAM_BANK_SIZE;
        *rom.ram_data
            .get(offset + (addr - 0xa000) as usize)
            .unwrap_or(&0x00)
    },
    write_ram: |rom: &mut Cartridge, addr: u16, value: u8| {
        if !rom.ram_enabled {
            warnln!("Attempt to write to cartridge RAM while write protect is active");
            return;
        }
        let offset = rom.ram_bank() as usize * RAM_BANK_SIZE;
        let index = offset + (addr - 0xa000) as usize;
        if index < rom.ram_data.len() {
            rom.ram_data[index] = value;
        }
    },
};

#[cfg(test)]
mod tests {
    use crate::test::build_rom;

    use super::{Cartridge, RomType};

    #[test]
    fn test_header_checks() {
        let data = build_rom(RomType::Mbc1, 4, 0x00);
        let cartridge = Cartridge::from_data(&data).unwrap();
        assert_eq!(cartridge.rom_type(), RomType::Mbc1);
        assert_eq!(cartridge.rom_size().rom_banks(), 4);

        let mut bad_logo = data.clone();
        bad_logo[0x0104] = 0x00;
        assert!(Cartridge::from_data(&bad_logo).is_err());

        let mut sgb = data.clone();
        sgb[0x0146] = 0x03;
        assert!(Cartridge::from_data(&sgb).is_err());

        let mut unsupported = data.clone();
        unsupported[0x0147] = 0x19;
        assert!(Cartridge::from_data(&unsupported).is_err());

        assert!(Cartridge::from_data(&data[..0x100]).is_err());
    }

    #[test]
    fn test_rom_bank_switch() {
        let data = build_rom(RomType::Mbc1, 8, 0x00);
        let mut cartridge = Cartridge::from_data(&data).unwrap();

        cartridge.write(0x2000, 0x05);
        assert_eq!(cartridge.rom_bank_effective(), 5);

        // bank 5 markers placed by the ROM builder
        assert_eq!(cartridge.read(0x4000), 5);
    }

    #[test]
    fn test_bank_translation() {
        let data = build_rom(RomType::Mbc1, 128, 0x00);
        let mut cartridge = Cartridge::from_data(&data).unwrap();

        for bank in [0x00u8, 0x20, 0x40, 0x60] {
            cartridge.write(0x2000, bank & 0x1f);
            cartridge.write(0x4000, bank >> 5);
            assert_eq!(cartridge.rom_bank_effective(), bank + 1);
            assert_eq!(cartridge.read(0x4000), bank + 1);
        }
    }

    #[test]
    fn test_banking_modes() {
        let data = build_rom(RomType::Mbc1Ram, 128, 0x03);
        let mut cartridge = Cartridge::from_data(&data).unwrap();

        // ROM mode uses the upper bits for the ROM bank
        cartridge.write(0x2000, 0x02);
        cartridge.write(0x4000, 0x01);
        cartridge.write(0x6000, 0x00);
        assert_eq!(cartridge.rom_bank(), 0x22);
        assert_eq!(cartridge.ram_bank(), 0x00);

        // RAM mode re-purposes them as the RAM bank
        cartridge.write(0x6000, 0x01);
        assert_eq!(cartridge.rom_bank(), 0x02);
        assert_eq!(cartridge.ram_bank(), 0x01);
    }

    #[test]
    fn test_ram_enable_gate() {
        let data = build_rom(RomType::Mbc1Ram, 4, 0x02);
        let mut cartridge = Cartridge::from_data(&data).unwrap();

        cartridge.write(0xa000, 0x42);
        assert_eq!(cartridge.read(0xa000), 0x00);

        cartridge.write(0x0000, 0x0a);
        cartridge.write(0xa000, 0x42);
        assert_eq!(cartridge.read(0xa000), 0x42);

        cartridge.write(0x0000, 0x00);
        assert_eq!(cartridge.read(0xa000), 0x00);
    }

    #[test]
    fn test_title() {
        let data = build_rom(RomType::RomOnly, 2, 0x00);
        let cartridge = Cartridge::from_data(&data).unwrap();
        assert_eq!(cartridge.title(), "test");
    }
}
