use std::{
    io::{Cursor, Read, Write},
    mem::size_of,
};

use crate::error::Error;

#[inline(always)]
pub fn read_u8(data: &mut Cursor<&[u8]>) -> Result<u8, Error> {
    let mut buffer = [0x00; size_of::<u8>()];
    data.read_exact(&mut buffer)?;
    Ok(u8::from_le_bytes(buffer))
}

#[inline(always)]
pub fn read_u16(data: &mut Cursor<&[u8]>) -> Result<u16, Error> {
    let mut buffer = [0x00; size_of::<u16>()];
    data.read_exact(&mut buffer)?;
    Ok(u16::from_le_bytes(buffer))
}

#[inline(always)]
pub fn read_u32(data: &mut Cursor<&[u8]>) -> Result<u32, Error> {
    let mut buffer = [0x00; size_of::<u32>()];
    data.read_exact(&mut buffer)?;
    Ok(u32::from_le_bytes(buffer))
}

#[inline(always)]
pub fn read_into(data: &mut Cursor<&[u8]>, buffer: &mut [u8]) -> Result<(), Error> {
    data.read_exact(buffer)?;
    Ok(())
}

#[inline(always)]
pub fn write_u8(data: &mut Cursor<Vec<u8>>, value: u8) -> Result<(), Error> {
    data.write_all(&value.to_le_bytes())?;
    Ok(())
}

#[inline(always)]
pub fn write_u16(data: &mut Cursor<Vec<u8>>, value: u16) -> Result<(), Error> {
    data.write_all(&value.to_le_bytes())?;
    Ok(())
}

#[inline(always)]
pub fn write_u32(data: &mut Cursor<Vec<u8>>, value: u32) -> Result<(), Error> {
    data.write_all(&value.to_le_bytes())?;
    Ok(())
}

#[inline(always)]
pub fn write_bytes(data: &mut Cursor<Vec<u8>>, buffer: &[u8]) -> Result<(), Error> {
    data.write_all(buffer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{read_u16, read_u8, write_u16, write_u8};

    #[test]
    fn test_round_trip() {
        let mut cursor = Cursor::new(vec![]);
        write_u8(&mut cursor, 0xab).unwrap();
        write_u16(&mut cursor, 0x1234).unwrap();
        let buffer = cursor.into_inner();

        let mut cursor = Cursor::new(&buffer[..]);
        assert_eq!(read_u8(&mut cursor).unwrap(), 0xab);
        assert_eq!(read_u16(&mut cursor).unwrap(), 0x1234);
    }

    #[test]
    fn test_short_read() {
        let buffer = [0x01u8];
        let mut cursor = Cursor::new(&buffer[..]);
        assert_eq!(read_u8(&mut cursor).unwrap(), 0x01);
        assert!(read_u16(&mut cursor).is_err());
    }
}
