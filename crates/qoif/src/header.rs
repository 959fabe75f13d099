/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Fixed size framing shared by the encoder and decoder
use qoif_core::bytestream::{ByteCursor, ByteIoError, ByteWriter};
use qoif_core::colorspace::{ColorCharacteristics, ColorSpace};
use qoif_core::log::warn;
use qoif_core::options::DecoderOptions;

use crate::constants::{QOI_HEADER_SIZE, QOI_MAGIC, QOI_PADDING, QOI_PADDING_SIZE};
use crate::errors::FormatError;

/// The 14 byte stream header
///
/// Fields hold the raw header bytes, so a decoded header may carry values
/// the encoder never writes, see [`validate`](Header::validate).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Header {
    pub magic:      [u8; 4],
    pub width:      u32,
    pub height:     u32,
    /// `3` without alpha, `4` with alpha
    pub channels:   u8,
    /// `1` for sRGB, `0` for linear
    pub colorspace: u8
}

impl Header {
    pub const fn new(width: u32, height: u32, has_alpha: bool, srgb: bool) -> Header {
        Header {
            magic: QOI_MAGIC,
            width,
            height,
            channels: if has_alpha { 4 } else { 3 },
            colorspace: srgb as u8
        }
    }

    /// Serialize the header, integers are big endian
    pub fn to_bytes(&self) -> [u8; QOI_HEADER_SIZE] {
        let mut bytes = [0; QOI_HEADER_SIZE];

        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..8].copy_from_slice(&self.width.to_be_bytes());
        bytes[8..12].copy_from_slice(&self.height.to_be_bytes());
        bytes[12] = self.channels;
        bytes[13] = self.colorspace;

        bytes
    }

    /// Write the header, integers big endian
    pub fn write_to(&self, writer: &mut ByteWriter<'_>) -> Result<(), ByteIoError> {
        writer.write_all(&self.magic)?;
        writer.write_u32_be_err(self.width)?;
        writer.write_u32_be_err(self.height)?;
        writer.write_u8_err(self.channels)?;
        writer.write_u8_err(self.colorspace)
    }

    /// Read a header from the start of `data`
    ///
    /// Only the length is checked here, field values are taken as is.
    pub fn from_bytes(data: &[u8]) -> Result<Header, FormatError> {
        if data.len() < QOI_HEADER_SIZE {
            return Err(FormatError::TooShort(data.len()));
        }
        let mut stream = ByteCursor::new(data);

        // lengths were confirmed above so the non failing routines are fine
        let magic = stream.read_fixed_bytes_or_zero::<4>();
        let width = stream.get_u32_be();
        let height = stream.get_u32_be();
        let channels = stream.get_u8();
        let colorspace = stream.get_u8();

        Ok(Header {
            magic,
            width,
            height,
            channels,
            colorspace
        })
    }

    pub const fn has_alpha(&self) -> bool {
        self.channels == 4
    }

    pub const fn is_srgb(&self) -> bool {
        self.colorspace != 0
    }

    /// Bytes per decoded pixel
    pub const fn stride(&self) -> usize {
        self.colorspace().num_components()
    }

    pub const fn colorspace(&self) -> ColorSpace {
        ColorSpace::from_alpha(self.has_alpha())
    }

    pub const fn color_characteristics(&self) -> ColorCharacteristics {
        ColorCharacteristics::from_srgb(self.is_srgb())
    }

    /// `width * height * stride` or `None` if that overflows a usize
    pub fn output_size(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(self.stride())
    }

    /// Check the header against the decoder options
    ///
    /// Dimension limits always apply. The magic bytes, channel count and
    /// colorspace byte are only rejected in strict mode, otherwise they are
    /// logged and decoding carries on.
    pub fn validate(&self, options: &DecoderOptions) -> Result<(), FormatError> {
        if self.width as usize > options.get_max_width() {
            return Err(FormatError::TooLargeDimensions(
                self.width as usize,
                options.get_max_width()
            ));
        }
        if self.height as usize > options.get_max_height() {
            return Err(FormatError::TooLargeDimensions(
                self.height as usize,
                options.get_max_height()
            ));
        }
        let strict = options.get_strict_mode();

        if self.magic != QOI_MAGIC {
            if strict {
                return Err(FormatError::WrongMagicBytes(self.magic));
            }
            warn!("Unknown magic bytes {:?}, expected `qoif`", self.magic);
        }
        if !matches!(self.channels, 3 | 4) {
            if strict {
                return Err(FormatError::UnknownChannels(self.channels));
            }
            warn!(
                "Unknown channel number {}, decoding without alpha",
                self.channels
            );
        }
        if self.colorspace > 1 {
            if strict {
                return Err(FormatError::UnknownColorspace(self.colorspace));
            }
            warn!(
                "Unknown colorspace value {}, treating it as sRGB",
                self.colorspace
            );
        }
        Ok(())
    }
}

/// Check the end marker, the last 8 bytes of `data`
pub fn check_footer(data: &[u8], options: &DecoderOptions) -> Result<(), FormatError> {
    let start = data.len().saturating_sub(QOI_PADDING_SIZE);
    let mut footer = [0; QOI_PADDING_SIZE];
    let tail = &data[start..];
    footer[QOI_PADDING_SIZE - tail.len()..].copy_from_slice(tail);

    if footer != QOI_PADDING {
        if options.get_strict_mode() {
            return Err(FormatError::InvalidFooter(footer));
        }
        warn!("Last bytes do not match the QOI end marker");
    }
    Ok(())
}
