/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::colorspace::{ColorCharacteristics, ColorSpace};

/// Options shared by encoders
///
/// Carries the image description written into the stream header,
/// dimensions are `u32` since that is all the header can hold.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EncoderOptions {
    width:           u32,
    height:          u32,
    colorspace:      ColorSpace,
    characteristics: ColorCharacteristics
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            width:           0,
            height:          0,
            colorspace:      ColorSpace::RGBA,
            characteristics: ColorCharacteristics::sRGB
        }
    }
}

impl EncoderOptions {
    /// Create new encode options
    ///
    /// # Arguments
    ///
    /// * `width`: Image width
    /// * `height`: Image height
    /// * `colorspace`: Image colorspace, decides how many bytes make up a pixel
    ///
    /// returns: EncoderOptions
    pub const fn new(width: u32, height: u32, colorspace: ColorSpace) -> EncoderOptions {
        EncoderOptions {
            width,
            height,
            colorspace,
            characteristics: ColorCharacteristics::sRGB
        }
    }

    /// Get the width for which the image will be encoded in
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height for which the image will be encoded in
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Get the colorspace of the raw pixels
    pub const fn colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    pub const fn characteristics(&self) -> ColorCharacteristics {
        self.characteristics
    }

    /// Set the width for the image to be encoded
    pub fn set_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set height for the image to be encoded
    pub fn set_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// Set the colorspace of the raw pixels
    pub fn set_colorspace(mut self, colorspace: ColorSpace) -> Self {
        self.colorspace = colorspace;
        self
    }

    /// Set the transfer characteristics recorded in the header
    pub fn set_characteristics(mut self, characteristics: ColorCharacteristics) -> Self {
        self.characteristics = characteristics;
        self
    }
}
