/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use qoif_core::colorspace::{ColorCharacteristics, ColorSpace};
use qoif_core::log::{trace, warn};
use qoif_core::options::DecoderOptions;

use crate::constants::{QOI_HEADER_SIZE, QOI_PADDING_SIZE};
use crate::errors::FormatError;
use crate::header::{check_footer, Header};
use crate::opcode::{Op, Opcodes};
use crate::pixel::{ColorCache, RunState};

/// A Quite OK Image style decoder
///
/// The decoder is initialized by calling `new`
/// and either of [`decode_headers`] to decode headers
/// or [`decode`] to return uncompressed pixels
///
/// Additional methods are provided that give more
/// details of the compressed image like width and height
/// are accessible after decoding headers
///
/// [`decode_headers`]:QoifDecoder::decode_headers
/// [`decode`]:QoifDecoder::decode
pub struct QoifDecoder<'a> {
    data:    &'a [u8],
    header:  Option<Header>,
    options: DecoderOptions
}

impl<'a> QoifDecoder<'a> {
    /// Create a new decoder with the default, lenient, options
    ///
    /// # Arguments
    /// - `data`: The compressed stream
    ///
    /// # Example
    ///
    /// ```
    /// let mut decoder = qoif::QoifDecoder::new(&[]);
    /// assert!(decoder.decode_headers().is_err());
    /// ```
    pub fn new(data: &'a [u8]) -> QoifDecoder<'a> {
        QoifDecoder::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new decoder that obeys specified restrictions
    ///
    /// E.g can be used to set width and height limits to prevent OOM attacks
    /// or to reject streams the lenient decoder would accept
    ///
    /// # Example
    /// ```
    /// use qoif::qoif_core::options::DecoderOptions;
    /// use qoif::QoifDecoder;
    /// // only decode images less than 10 in both width and height
    /// let options = DecoderOptions::default().set_max_width(10).set_max_height(10);
    ///
    /// let mut decoder = QoifDecoder::new_with_options(&[], options);
    /// ```
    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> QoifDecoder<'a> {
        QoifDecoder {
            data,
            header: None,
            options
        }
    }

    /// Decode the stream header, storing it in the decoder
    ///
    /// # Returns
    ///
    /// - On success: Nothing
    /// - On error: The error encountered when decoding headers
    pub fn decode_headers(&mut self) -> Result<(), FormatError> {
        self.read_header().map(|_| ())
    }

    /// Decode the stream header if needed and return it
    pub fn read_header(&mut self) -> Result<Header, FormatError> {
        if let Some(header) = self.header {
            return Ok(header);
        }
        if self.data.len() < QOI_HEADER_SIZE + QOI_PADDING_SIZE {
            return Err(FormatError::TooShort(self.data.len()));
        }
        let header = Header::from_bytes(self.data)?;
        header.validate(&self.options)?;

        trace!("Image width: {:?}", header.width);
        trace!("Image height: {:?}", header.height);
        trace!("Image colorspace: {:?}", header.colorspace());
        self.header = Some(header);

        Ok(header)
    }

    /// Return the number of bytes required to hold a decoded image
    ///
    /// # Returns
    ///  - `Some(usize)`: `width * height * channels`
    ///  - `None`: Indicates the headers were not decoded, or the size overflows a usize
    pub fn output_buffer_size(&self) -> Option<usize> {
        self.header?.output_size()
    }

    /// Decode the stream, returning the uncompressed pixels or the
    /// error encountered during decoding
    ///
    /// Pixels are row major, three bytes each for images without alpha
    /// and four with. Each call decodes from scratch.
    ///
    /// With lenient options a malformed body is decoded as far as it goes,
    /// so the output length only matches [`output_buffer_size`](Self::output_buffer_size)
    /// for well formed streams. Strict mode turns that mismatch into an error.
    pub fn decode(&mut self) -> Result<Vec<u8>, FormatError> {
        let header = self.read_header()?;
        let stride = header.stride();
        let strict = self.options.get_strict_mode();

        let body = &self.data[QOI_HEADER_SIZE..self.data.len() - QOI_PADDING_SIZE];
        // the header is untrusted, reserve at most one pixel per body byte
        // and let runs grow the buffer
        let expected = header.output_size();
        let mut pixels = Vec::with_capacity(
            expected
                .unwrap_or(usize::MAX)
                .min(body.len().saturating_mul(stride))
        );

        let mut cache = ColorCache::new();
        let mut state = RunState::default();
        let mut ops = Opcodes::new(body);

        for op in ops.by_ref() {
            if let Op::Run(payload) = op {
                state.run = payload + 1;

                while state.in_run() {
                    state.previous.write_to(&mut pixels, stride);
                    state.run -= 1;
                }
                continue;
            }
            let px = op.apply(state.previous, &cache);
            // every non run pixel goes back into its slot, INDEX targets
            // included, even when they were read from another slot
            cache.insert(px);
            px.write_to(&mut pixels, stride);

            state.previous = px;
        }

        if ops.is_truncated() {
            if strict {
                return Err(FormatError::InsufficientData(
                    expected.unwrap_or(usize::MAX),
                    pixels.len()
                ));
            }
            warn!("Stream body ends in the middle of an op, ignoring it");
        }
        check_footer(self.data, &self.options)?;

        if expected != Some(pixels.len()) {
            if strict {
                return Err(FormatError::InsufficientData(
                    expected.unwrap_or(usize::MAX),
                    pixels.len()
                ));
            }
            warn!(
                "Header describes {:?} bytes of pixels but the body produced {}",
                expected,
                pixels.len()
            );
        }
        trace!("Finished decoding image");

        Ok(pixels)
    }

    /// Returns the pixel layout or none if the headers haven't been decoded
    ///
    /// Colorspace returned can either be [RGB] or [RGBA]
    ///
    /// [RGB]: qoif_core::colorspace::ColorSpace::RGB
    /// [RGBA]: qoif_core::colorspace::ColorSpace::RGBA
    pub fn colorspace(&self) -> Option<ColorSpace> {
        self.header.map(|header| header.colorspace())
    }

    /// Returns the transfer characteristics recorded in the header,
    /// or none if the headers haven't been decoded
    pub fn color_characteristics(&self) -> Option<ColorCharacteristics> {
        self.header.map(|header| header.color_characteristics())
    }

    /// Return the width and height of the image
    ///
    /// Or none if the headers haven't been decoded
    ///
    /// # Example
    ///
    /// ```
    /// use qoif::QoifDecoder;
    /// let stream = qoif::encode(&[0; 24], 3, 2, true, true);
    /// let mut decoder = QoifDecoder::new(&stream);
    ///
    /// decoder.decode_headers().unwrap();
    /// assert_eq!(decoder.dimensions(), Some((3, 2)));
    /// ```
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.header
            .map(|header| (header.width as usize, header.height as usize))
    }
}

/// A decoded image and the description carried in its header
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecodedImage {
    pub pixels:    Vec<u8>,
    pub width:     u32,
    pub height:    u32,
    pub has_alpha: bool,
    pub srgb:      bool
}

/// Decode a full stream with the default options
///
/// The only error is [`FormatError::TooShort`], for streams shorter than
/// a header plus the end marker.
///
/// ```
/// let stream = qoif::encode(&[1, 2, 3], 1, 1, false, false);
/// let image = qoif::decode(&stream).unwrap();
///
/// assert_eq!(image.pixels, [1, 2, 3]);
/// assert!(!image.has_alpha);
/// assert!(!image.srgb);
/// ```
pub fn decode(data: &[u8]) -> Result<DecodedImage, FormatError> {
    let mut decoder = QoifDecoder::new(data);
    let header = decoder.read_header()?;
    let pixels = decoder.decode()?;

    Ok(DecodedImage {
        pixels,
        width: header.width,
        height: header.height,
        has_alpha: header.has_alpha(),
        srgb: header.is_srgb()
    })
}

#[cfg(test)]
mod tests {
    use qoif_core::colorspace::{ColorCharacteristics, ColorSpace};
    use qoif_core::options::DecoderOptions;

    use super::QoifDecoder;
    use crate::errors::FormatError;

    const EMPTY: [u8; 22] = [
        b'q', b'o', b'i', b'f', 0, 0, 0, 0, 0, 0, 0, 0, 4, 1, 0, 0, 0, 0, 0, 0, 0, 1
    ];

    #[test]
    fn too_short_streams() {
        for len in [0, 13, 14, 21] {
            let data = vec![0_u8; len];
            let mut decoder = QoifDecoder::new(&data);
            assert!(matches!(decoder.decode(), Err(FormatError::TooShort(n)) if n == len));
        }
    }

    #[test]
    fn header_accessors() {
        let mut decoder = QoifDecoder::new(&EMPTY);
        assert_eq!(decoder.dimensions(), None);
        assert_eq!(decoder.colorspace(), None);

        decoder.decode_headers().unwrap();
        assert_eq!(decoder.dimensions(), Some((0, 0)));
        assert_eq!(decoder.colorspace(), Some(ColorSpace::RGBA));
        assert_eq!(
            decoder.color_characteristics(),
            Some(ColorCharacteristics::sRGB)
        );
        assert_eq!(decoder.output_buffer_size(), Some(0));
        assert!(decoder.decode().unwrap().is_empty());
    }

    #[test]
    fn lenient_decoder_ignores_bad_magic_and_footer() {
        let mut data = EMPTY;
        data[..4].copy_from_slice(b"nope");
        data[21] = 7;

        assert!(QoifDecoder::new(&data).decode().unwrap().is_empty());

        let strict = DecoderOptions::default().set_strict_mode(true);
        assert!(matches!(
            QoifDecoder::new_with_options(&data, strict).decode(),
            Err(FormatError::WrongMagicBytes(_))
        ));
        data[..4].copy_from_slice(b"qoif");
        assert!(matches!(
            QoifDecoder::new_with_options(&data, strict).decode(),
            Err(FormatError::InvalidFooter(_))
        ));
    }

    #[test]
    fn bogus_dimensions_do_not_allocate_the_world() {
        let mut data = EMPTY.to_vec();
        data[4..12].copy_from_slice(&[0xff; 8]);
        // body of a single run
        data.insert(14, 0xc0);

        let pixels = QoifDecoder::new(&data).decode().unwrap();
        assert_eq!(pixels, [0, 0, 0, 255]);

        let strict = DecoderOptions::default().set_strict_mode(true);
        assert!(matches!(
            QoifDecoder::new_with_options(&data, strict).decode(),
            Err(FormatError::InsufficientData(_, 4))
        ));
    }

    #[test]
    fn bogus_dimensions_reserve_by_body_size() {
        let mut data = EMPTY[..14].to_vec();
        data[4..12].copy_from_slice(&[0xff; 8]);
        // 1000 INDEX ops, one pixel each
        data.extend_from_slice(&[0x00; 1000]);
        data.extend_from_slice(&EMPTY[14..]);

        let pixels = QoifDecoder::new(&data).decode().unwrap();
        assert_eq!(pixels.len(), 4000);
        assert!(pixels.capacity() < 8000);
    }

    #[test]
    fn truncated_op_is_an_error_in_strict_mode() {
        let mut data = EMPTY[..14].to_vec();
        data[4..12].copy_from_slice(&[0, 0, 0, 1, 0, 0, 0, 1]);
        // RGB tag missing its blue byte
        data.extend_from_slice(&[0xfe, 1, 2]);
        data.extend_from_slice(&EMPTY[14..]);

        assert!(QoifDecoder::new(&data).decode().unwrap().is_empty());

        let strict = DecoderOptions::default().set_strict_mode(true);
        assert!(matches!(
            QoifDecoder::new_with_options(&data, strict).decode(),
            Err(FormatError::InsufficientData(4, 0))
        ));
    }

    #[test]
    fn dimension_limits() {
        let mut data = EMPTY;
        data[4..8].copy_from_slice(&100_u32.to_be_bytes());

        let options = DecoderOptions::default().set_max_width(10);
        assert!(matches!(
            QoifDecoder::new_with_options(&data, options).decode_headers(),
            Err(FormatError::TooLargeDimensions(100, 10))
        ));
    }
}
