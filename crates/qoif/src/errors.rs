/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during decoding and encoding.
use core::fmt::{Debug, Display, Formatter};

use qoif_core::bytestream::ByteIoError;

/// Possible Errors that may occur during decoding
///
/// With the default [`DecoderOptions`](qoif_core::options::DecoderOptions)
/// only [`TooShort`](FormatError::TooShort) is ever returned, the rest
/// need strict mode or configured dimension limits.
pub enum FormatError {
    /// The stream is shorter than a header plus the end marker (22 bytes)
    ///
    /// The argument is the length of the stream
    TooShort(usize),
    /// The stream does not start with the magic bytes `qoif`
    WrongMagicBytes([u8; 4]),
    /// The header contains an invalid channel number
    ///
    /// The only supported types are `3` and `4`
    UnknownChannels(u8),
    /// The header contains an invalid colorspace value
    ///
    /// The should be `0` or `1`
    UnknownColorspace(u8),
    /// Width or height is greater than the configured maximum
    ///
    /// - 1st argument is the dimension found in the header
    /// - 2nd argument is the configured limit
    TooLargeDimensions(usize, usize),
    /// The stream does not end with `0,0,0,0,0,0,0,1`
    InvalidFooter([u8; 8]),
    /// The opcode body describes a different amount of pixel data than the header
    ///
    /// # Arguments
    /// - 1st argument is the number of bytes we expected
    /// - 2nd argument is number of bytes the body produced
    InsufficientData(usize, usize)
}

impl Debug for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            FormatError::TooShort(found) => {
                writeln!(
                    f,
                    "Stream too short, expected at least 22 bytes but found {found}"
                )
            }
            FormatError::WrongMagicBytes(magic) => {
                writeln!(
                    f,
                    "Wrong magic bytes {magic:?}, expected `qoif` as image start"
                )
            }
            FormatError::UnknownChannels(channel) => {
                writeln!(
                    f,
                    "Unknown channel number {channel}, expected either 3 or 4"
                )
            }
            FormatError::UnknownColorspace(colorspace) => {
                writeln!(
                    f,
                    "Unknown colorspace number {colorspace}, expected either 0 or 1"
                )
            }
            FormatError::TooLargeDimensions(found, max) => {
                writeln!(
                    f,
                    "Image dimension {found} greater than max configured dimension {max}"
                )
            }
            FormatError::InvalidFooter(footer) => {
                writeln!(f, "Last bytes {footer:?} do not match the QOI end marker")
            }
            FormatError::InsufficientData(expected, found) => {
                writeln!(
                    f,
                    "Insufficient data, header requires {expected} bytes but the body produced {found}"
                )
            }
        }
    }
}

impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

/// Errors encountered during encoding
pub enum QoifEncodeErrors {
    /// The output buffer cannot hold the encoded stream
    ///
    /// - 1st argument is the worst case stream size, a buffer this big always fits
    /// - 2nd argument is the size of the buffer
    TooSmallOutput(usize, usize),

    IoError(ByteIoError)
}

impl Debug for QoifEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            QoifEncodeErrors::TooSmallOutput(expected, found) => {
                writeln!(
                    f,
                    "Too small output size, {expected} bytes always fit, but found {found}"
                )
            }
            QoifEncodeErrors::IoError(v) => {
                writeln!(f, "I/O error {:?}", v)
            }
        }
    }
}

impl Display for QoifEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for QoifEncodeErrors {}

#[cfg(feature = "std")]
impl std::error::Error for FormatError {}

impl From<ByteIoError> for QoifEncodeErrors {
    fn from(value: ByteIoError) -> Self {
        Self::IoError(value)
    }
}
