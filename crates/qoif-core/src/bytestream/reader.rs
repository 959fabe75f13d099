/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use core::fmt::{Debug, Display, Formatter};

/// Errors returned by the bytestream reader and writer
pub enum ByteIoError {
    /// Not enough bytes to satisfy a read
    ///
    /// - 1st argument is the number of bytes requested
    /// - 2nd argument is the number of bytes left
    NotEnoughBytes(usize, usize),
    /// Not enough space to satisfy a write
    ///
    /// - 1st argument is the number of bytes we wanted to write
    /// - 2nd argument is the space left in the buffer
    NotEnoughBuffer(usize, usize)
}

impl Debug for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            ByteIoError::NotEnoughBuffer(expected, found) => {
                writeln!(
                    f,
                    "Not enough buffer to write {expected} bytes, buffer size is {found}"
                )
            }
        }
    }
}

impl Display for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ByteIoError {}

/// A forward only reader over an in memory buffer
///
/// Reads come in two flavours, ones ending in `_err` (or `_or_error`) which
/// return an error and leave the position untouched when the buffer is too
/// short, and ones that return zeroes instead, for hot loops where the caller
/// has already checked the length.
pub struct ByteCursor<'a> {
    stream:   &'a [u8],
    position: usize
}

impl<'a> ByteCursor<'a> {
    /// Create a new reader positioned at the start of `stream`
    pub const fn new(stream: &'a [u8]) -> ByteCursor<'a> {
        ByteCursor {
            stream,
            position: 0
        }
    }

    /// Number of bytes consumed so far
    ///
    /// ```
    /// use qoif_core::bytestream::ByteCursor;
    /// let mut cursor = ByteCursor::new(&[1, 2, 3]);
    /// cursor.skip(2);
    /// assert_eq!(cursor.position(), 2);
    /// ```
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes left to read
    pub const fn remaining(&self) -> usize {
        self.stream.len().saturating_sub(self.position)
    }

    /// Return true if every byte has been consumed
    pub const fn is_eof(&self) -> bool {
        self.position >= self.stream.len()
    }

    /// Skip `num` bytes, clamping at the end of the stream
    pub fn skip(&mut self, num: usize) {
        self.position = self.position.saturating_add(num).min(self.stream.len());
    }

    /// Read a single byte, returning `0` if the stream is exhausted
    #[inline(always)]
    pub fn get_u8(&mut self) -> u8 {
        match self.stream.get(self.position) {
            Some(byte) => {
                self.position += 1;
                *byte
            }
            None => 0
        }
    }

    /// Read a single byte or error out if the stream is exhausted
    #[inline(always)]
    pub fn get_u8_err(&mut self) -> Result<u8, ByteIoError> {
        match self.stream.get(self.position) {
            Some(byte) => {
                self.position += 1;
                Ok(*byte)
            }
            None => Err(ByteIoError::NotEnoughBytes(1, 0))
        }
    }

    /// Read exactly `N` bytes or return an error without advancing
    #[inline(always)]
    pub fn read_fixed_bytes_or_error<const N: usize>(&mut self) -> Result<[u8; N], ByteIoError> {
        let mut byte_store: [u8; N] = [0; N];

        match self.stream.get(self.position..self.position.saturating_add(N)) {
            Some(bytes) => {
                byte_store.copy_from_slice(bytes);
                self.position += N;
                Ok(byte_store)
            }
            None => Err(ByteIoError::NotEnoughBytes(N, self.remaining()))
        }
    }

    /// Read exactly `N` bytes, or return zeroes and do not advance
    /// if the stream cannot satisfy the read
    #[inline(always)]
    pub fn read_fixed_bytes_or_zero<const N: usize>(&mut self) -> [u8; N] {
        self.read_fixed_bytes_or_error::<N>().unwrap_or([0; N])
    }

    /// Read a big endian `u32`, returning `0` if the stream
    /// does not have four bytes left
    #[inline]
    pub fn get_u32_be(&mut self) -> u32 {
        u32::from_be_bytes(self.read_fixed_bytes_or_zero::<4>())
    }
}
