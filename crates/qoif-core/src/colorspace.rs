/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image Colorspace information carried by a QOI stream

/// Pixel layouts a QOI stream can describe
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ColorSpace {
    /// Red, Green , Blue
    RGB,
    /// Red, Green, Blue, Alpha
    RGBA
}

impl ColorSpace {
    /// Number of color channels present for a certain colorspace
    ///
    /// E.g. RGB returns 3 since it contains R,G and B colors to make up a pixel
    pub const fn num_components(&self) -> usize {
        match self {
            Self::RGB => 3,
            Self::RGBA => 4
        }
    }

    pub const fn has_alpha(&self) -> bool {
        matches!(self, Self::RGBA)
    }

    /// Pick the layout for an image with or without an alpha channel
    pub const fn from_alpha(has_alpha: bool) -> ColorSpace {
        if has_alpha {
            Self::RGBA
        } else {
            Self::RGB
        }
    }
}

/// Color characteristics
///
/// Gives more information about values in a certain
/// colorspace.
///
/// In a QOI header this is a single byte, `1` for [`sRGB`](Self::sRGB)
/// and `0` for [`Linear`](Self::Linear)
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ColorCharacteristics {
    /// sRGB Transfer function
    sRGB,
    /// Linear transfer function
    Linear
}

impl ColorCharacteristics {
    pub const fn from_srgb(srgb: bool) -> ColorCharacteristics {
        if srgb {
            Self::sRGB
        } else {
            Self::Linear
        }
    }

    pub const fn is_srgb(&self) -> bool {
        matches!(self, Self::sRGB)
    }
}
