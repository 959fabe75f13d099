/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use crate::bytestream::ByteIoError;

/// Encapsulates a simple byte writer over a caller provided
/// buffer with support for big endian writes
pub struct ByteWriter<'a> {
    buffer:   &'a mut [u8],
    position: usize
}

impl<'a> ByteWriter<'a> {
    /// Create a new writer for the buffer
    pub fn new(data: &'a mut [u8]) -> ByteWriter<'a> {
        ByteWriter {
            buffer:   data,
            position: 0
        }
    }
    /// Return number of unwritten bytes in this stream
    ///
    /// # Example
    /// ```
    /// use qoif_core::bytestream::ByteWriter;
    /// let mut storage = [0;10];
    ///
    /// let writer = ByteWriter::new(&mut storage);
    /// assert_eq!(writer.bytes_left(),10); // no bytes were written
    /// ```
    pub const fn bytes_left(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    /// Return the number of bytes the writer has written
    ///
    /// ```
    /// use qoif_core::bytestream::ByteWriter;
    /// let mut stream = ByteWriter::new(&mut []);
    /// assert_eq!(stream.position(),0);
    /// ```
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Write a single byte into the bytestream or error out
    /// if there is not enough space
    ///
    /// No space
    /// ```
    /// use qoif_core::bytestream::ByteWriter;
    /// let mut stream = ByteWriter::new(&mut []);
    /// assert!(stream.write_u8_err(32).is_err());
    /// ```
    pub fn write_u8_err(&mut self, byte: u8) -> Result<(), ByteIoError> {
        match self.buffer.get_mut(self.position) {
            Some(m_byte) => {
                self.position += 1;
                *m_byte = byte;

                Ok(())
            }
            None => Err(ByteIoError::NotEnoughBuffer(1, 0))
        }
    }

    /// Write a big endian `u32` or error out if there is no space for it
    pub fn write_u32_be_err(&mut self, value: u32) -> Result<(), ByteIoError> {
        self.write_all(&value.to_be_bytes())
    }

    /// Write all bytes in `buf` or nothing at all if they do not fit
    pub fn write_all(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        let end = self.position.saturating_add(buf.len());
        let left = self.bytes_left();

        match self.buffer.get_mut(self.position..end) {
            Some(m_bytes) => {
                m_bytes.copy_from_slice(buf);
                self.position = end;
                Ok(())
            }
            None => Err(ByteIoError::NotEnoughBuffer(buf.len(), left))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ByteWriter;

    #[test]
    fn partial_writes_are_rejected() {
        let mut storage = [0; 6];
        let mut writer = ByteWriter::new(&mut storage);

        writer.write_u32_be_err(0x0102_0304).unwrap();
        assert!(writer.write_all(&[5, 6, 7]).is_err());
        assert_eq!(writer.position(), 4);
        writer.write_u8_err(5).unwrap();
        assert_eq!(writer.bytes_left(), 1);

        assert_eq!(storage, [1, 2, 3, 4, 5, 0]);
    }
}
