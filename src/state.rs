//! Save state handling.
//!
//! The snapshot format is a plain concatenation of fixed length region
//! dumps, one per component, with no header and no version marker. The
//! region order is: cartridge, CPU, interrupts, timer, divider, RAM
//! (work + I/O + high), PPU, joypad, APU, serial.

use std::io::Cursor;

use gboyemu_common::{
    data::{read_u8, write_u8},
    error::Error,
};

use crate::{consts::IF_ADDR, gb::GameBoy};

/// Trait to be implemented by every component that is part of
/// the save state snapshot, with field by field serialization
/// in little-endian byte order.
pub trait StateComponent {
    fn state(&self) -> Result<Vec<u8>, Error>;
    fn set_state(&mut self, data: &[u8]) -> Result<(), Error>;
}

fn interrupts_state(gb: &GameBoy) -> Result<Vec<u8>, Error> {
    let mut cursor = Cursor::new(vec![]);
    write_u8(&mut cursor, gb.cpu_i().ime() as u8)?;
    write_u8(&mut cursor, gb.mmu_i().ie)?;
    write_u8(&mut cursor, gb.mmu_i().read(IF_ADDR) & 0x1f)?;
    Ok(cursor.into_inner())
}

fn set_interrupts_state(gb: &mut GameBoy, data: &[u8]) -> Result<(), Error> {
    let mut cursor = Cursor::new(data);
    let ime = read_u8(&mut cursor)? != 0;
    let ie = read_u8(&mut cursor)?;
    let flag = read_u8(&mut cursor)?;
    gb.cpu().set_ime(ime);
    gb.mmu().ie = ie;
    gb.mmu().write(IF_ADDR, flag);
    Ok(())
}

/// Serializes the complete core state of the provided system
/// into a single byte buffer, ready to be written to disk.
pub fn save_state(gb: &GameBoy) -> Result<Vec<u8>, Error> {
    let mut data = vec![];
    data.extend(gb.rom_i().state()?);
    data.extend(gb.cpu_i().state()?);
    data.extend(interrupts_state(gb)?);
    data.extend(gb.timer_i().state()?);
    data.extend(gb.divider_i().state()?);
    data.extend(gb.mmu_i().state()?);
    data.extend(gb.ppu_i().state()?);
    data.extend(gb.pad_i().state()?);
    data.extend(gb.apu_i().state()?);
    data.extend(gb.serial_i().state()?);
    Ok(data)
}

/// Restores a snapshot previously created by [`save_state`].
///
/// The total length is validated against the current region sizes
/// before any mutation takes place, so a truncated or oversized file
/// leaves the running state untouched.
pub fn load_state(gb: &mut GameBoy, data: &[u8]) -> Result<(), Error> {
    let sizes = [
        gb.rom_i().state()?.len(),
        gb.cpu_i().state()?.len(),
        interrupts_state(gb)?.len(),
        gb.timer_i().state()?.len(),
        gb.divider_i().state()?.len(),
        gb.mmu_i().state()?.len(),
        gb.ppu_i().state()?.len(),
        gb.pad_i().state()?.len(),
        gb.apu_i().state()?.len(),
        gb.serial_i().state()?.len(),
    ];
    let total: usize = sizes.iter().sum();
    if data.len() != total {
        return Err(Error::InvalidData);
    }

    let mut regions = Vec::with_capacity(sizes.len());
    let mut offset = 0;
    for size in sizes {
        regions.push(&data[offset..offset + size]);
        offset += size;
    }

    gb.rom().set_state(regions[0])?;
    gb.cpu().set_state(regions[1])?;
    set_interrupts_state(gb, regions[2])?;
    gb.timer().set_state(regions[3])?;
    gb.divider().set_state(regions[4])?;
    gb.mmu().set_state(regions[5])?;
    gb.ppu().set_state(regions[6])?;
    gb.pad().set_state(regions[7])?;
    gb.apu().set_state(regions[8])?;
    gb.serial().set_state(regions[9])?;
    Ok(())
}
