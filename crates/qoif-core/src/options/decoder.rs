/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Global Decoder options

/// Decoder options
///
/// The default options reproduce the lenient reference decoder: no
/// limits on image dimensions and no validation of the header fields
/// or the end marker beyond the minimum stream length.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will
    /// not try to decode images larger than
    /// the specified width.
    ///
    /// - Default value: `u32::MAX`
    max_width:   usize,
    /// Maximum height for which decoders will not
    /// try to decode images larger than the
    /// specified height
    ///
    /// - Default value: `u32::MAX`
    max_height:  usize,
    /// treat some warnings as errors
    ///
    /// When set to false, this logs problems via the log crate.
    ///
    /// When set to true, this will return an `Result<Err>` on exception.
    ///
    /// - Default value: false,
    strict_mode: bool
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:   u32::MAX as usize,
            max_height:  u32::MAX as usize,
            strict_mode: false
        }
    }
}

impl DecoderOptions {
    /// Create the decoder options with the safe counterparts
    ///
    /// - Width and height limited to `16384`
    /// - Strict mode on, so malformed headers, bodies and end markers are rejected
    pub fn new_safe() -> DecoderOptions {
        DecoderOptions::default()
            .set_max_width(1 << 14)
            .set_max_height(1 << 14)
            .set_strict_mode(true)
    }

    /// Get maximum width configured for which the decoder
    /// should not try to decode images greater than this width
    pub const fn get_max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height configured for which the decoder should
    /// not try to decode images greater than this height
    pub const fn get_max_height(&self) -> usize {
        self.max_height
    }

    /// Return true whether the decoder should be in strict mode
    /// And reject most errors
    pub const fn get_strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Set maximum width for which the decoder should not try
    /// decoding images greater than that width
    ///
    /// # Arguments
    ///
    /// * `width`:  The maximum width allowed
    ///
    /// returns: DecoderOptions
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding images greater than that height
    /// # Arguments
    ///
    /// * `height`: The maximum height allowed
    ///
    /// returns: DecoderOptions
    ///
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set whether the decoder should be in standards conforming/
    /// strict mode
    ///
    /// This reduces the error tolerance level for the decoder and invalid
    /// streams will be rejected instead of decoded as far as possible.
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }
}
