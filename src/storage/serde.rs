use thiserror::Error;

use crate::schema::IdWidth;
use crate::storage::Bytes;

pub mod row {
    use super::*;

    /// Identifiers are written big-endian so the byte order of keys matches their numeric order.
    pub fn key(id: u64) -> Bytes {
        let mut buffer = Vec::with_capacity(id.size());
        id.write_to(&mut buffer);
        buffer
    }

    pub fn id(key: &[u8]) -> ReadResult<u64> {
        let mut reader = Reader::new(key);
        let id = reader.read()?;
        reader.finish()?;
        Ok(id)
    }
}

pub mod width {
    use super::*;

    pub fn serialize(id_width: IdWidth) -> Bytes {
        let mut buffer = Vec::with_capacity(1);
        (id_width as u8).write_to(&mut buffer);
        buffer
    }

    pub fn deserialize(buffer: &[u8]) -> ReadResult<IdWidth> {
        let mut reader = Reader::new(buffer);
        let tag: u8 = reader.read()?;
        reader.finish()?;
        IdWidth::from(tag).ok_or(ReadError::InvalidInput)
    }
}

// -------------------------------------------------------------------------------------------------

pub trait Writable {
    fn size(&self) -> usize;
    fn write_to(&self, buffer: &mut Vec<u8>);
}

impl Writable for u8 {
    fn size(&self) -> usize {
        std::mem::size_of::<Self>()
    }

    fn write_to(&self, buffer: &mut Vec<u8>) {
        buffer.push(*self);
    }
}

impl Writable for u64 {
    fn size(&self) -> usize {
        std::mem::size_of::<Self>()
    }

    fn write_to(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(&self.to_be_bytes());
    }
}

// -------------------------------------------------------------------------------------------------

pub struct Reader<'a> {
    buffer: &'a [u8],
    index: usize,
}

pub type ReadResult<T> = Result<T, ReadError>;

impl<'a> Reader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, index: 0 }
    }

    fn read_next<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let end = self.index + N;
        let bytes = self
            .buffer
            .get(self.index..end)
            .ok_or(ReadError::EndOfInput)?;
        self.index = end;
        let mut array = [0u8; N];
        array.copy_from_slice(bytes);
        Ok(array)
    }

    /// Fails if any bytes were left unread.
    fn finish(&self) -> ReadResult<()> {
        if self.index != self.buffer.len() {
            return Err(ReadError::TrailingBytes(self.buffer.len() - self.index));
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReadError {
    #[error("end of input")]
    EndOfInput,
    #[error("invalid input")]
    InvalidInput,
    #[error("{0} trailing bytes")]
    TrailingBytes(usize),
}

// -------------------------------------------------------------------------------------------------

pub trait Readable<T> {
    fn read(&mut self) -> ReadResult<T>;
}

impl<'a> Readable<u8> for Reader<'a> {
    fn read(&mut self) -> ReadResult<u8> {
        let [byte] = self.read_next::<1>()?;
        Ok(byte)
    }
}

impl<'a> Readable<u64> for Reader<'a> {
    fn read(&mut self) -> ReadResult<u64> {
        Ok(u64::from_be_bytes(self.read_next::<8>()?))
    }
}
