//! Helpers for the construction of test systems and ROMs.

use crate::{
    data::NINTENDO_LOGO,
    gb::GameBoy,
    rom::{RomType, ROM_BANK_SIZE},
};

/// Builds a synthetic cartridge image with a valid header, the
/// given type and bank count, and the RAM size code. The first
/// byte of every switchable bank carries the bank index so that
/// banking tests can identify the mapped bank.
pub fn build_rom(rom_type: RomType, banks: u16, ram_size: u8) -> Vec<u8> {
    let mut data = vec![0u8; banks as usize * ROM_BANK_SIZE];

    // entry point jumps over the header area, the zero filled
    // body then executes as NOPs
    data[0x0100] = 0x00;
    data[0x0101] = 0xc3;
    data[0x0102] = 0x50;
    data[0x0103] = 0x01;

    data[0x0104..=0x0133].copy_from_slice(&NINTENDO_LOGO);
    data[0x0134..0x0138].copy_from_slice(b"TEST");
    data[0x0146] = 0x00;
    data[0x0147] = rom_type as u8;
    data[0x0148] = match banks {
        2 => 0x00,
        4 => 0x01,
        8 => 0x02,
        16 => 0x03,
        32 => 0x04,
        64 => 0x05,
        _ => 0x06,
    };
    data[0x0149] = ram_size;

    for bank in 1..banks as usize {
        data[bank * ROM_BANK_SIZE] = bank as u8;
    }

    data
}

/// Builds a booted system with an empty ROM-only cartridge
/// loaded, ready to be clocked (the zero filled ROM executes
/// as an endless sequence of NOPs).
pub fn build_test() -> GameBoy {
    let mut game_boy = GameBoy::new();
    game_boy
        .load_rom(&build_rom(RomType::RomOnly, 2, 0x00))
        .unwrap();
    game_boy.boot();
    game_boy
}
