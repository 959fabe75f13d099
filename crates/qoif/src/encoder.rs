/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec;
use alloc::vec::Vec;

use qoif_core::bytestream::{ByteIoError, ByteWriter};
use qoif_core::colorspace::{ColorCharacteristics, ColorSpace};
use qoif_core::log::{error, trace, warn};
use qoif_core::options::EncoderOptions;

use crate::constants::{QOI_HEADER_SIZE, QOI_MAX_RUN, QOI_PADDING, QOI_PADDING_SIZE};
use crate::errors::QoifEncodeErrors;
use crate::header::Header;
use crate::opcode::Op;
use crate::pixel::{ColorCache, Pixel, RunState};

/// Quite Ok Image style encoder
///
/// The encoder is stateless between calls, every [`encode`](Self::encode)
/// starts from a fresh color cache and the default previous pixel, so one
/// encoder, or many encoders on different threads, can be used freely.
///
/// # Example
/// - Encode a 100 by 100 RGB image
///
/// ```
/// use qoif::qoif_core::colorspace::ColorSpace;
/// use qoif::qoif_core::options::EncoderOptions;
/// use qoif::QoifEncoder;
///
/// const W: usize = 100;
/// const H: usize = 100;
///
/// let pixels = std::array::from_fn::<u8, { W * H * 3 }, _>(|i| (i % 256) as u8);
/// let encoder = QoifEncoder::new(&pixels, EncoderOptions::new(W as u32, H as u32, ColorSpace::RGB));
/// let stream = encoder.encode();
/// assert!(stream.len() <= encoder.max_size());
/// ```
pub struct QoifEncoder<'a> {
    // raw pixels, in RGB or RBGA
    pixel_data: &'a [u8],
    options:    EncoderOptions
}

impl<'a> QoifEncoder<'a> {
    /// Create a new encoder which will encode the pixels
    ///
    /// # Arguments
    /// - data: Pixel data, row major, `colorspace channels` bytes per pixel
    /// - options: Encoder details for data, this contains width, height and number of color components
    ///
    /// The pixel count comes from the length of `data`, width and height are
    /// only recorded in the header.
    pub const fn new(data: &'a [u8], options: EncoderOptions) -> QoifEncoder<'a> {
        QoifEncoder {
            pixel_data: data,
            options
        }
    }

    pub fn set_color_characteristics(&mut self, characteristics: ColorCharacteristics) {
        self.options = self.options.set_characteristics(characteristics);
    }

    fn stride(&self) -> usize {
        self.options.colorspace().num_components()
    }

    fn header(&self) -> Header {
        Header::new(
            self.options.width(),
            self.options.height(),
            self.options.colorspace().has_alpha(),
            self.options.characteristics().is_srgb()
        )
    }

    /// Return the maximum size for which the encoder can safely
    /// encode the image without fearing for an out of space error
    ///
    /// The worst case is a literal op per pixel, one tag byte plus the channels.
    pub fn max_size(&self) -> usize {
        let stride = self.stride();

        (self.pixel_data.len() / stride)
            .saturating_mul(stride + 1)
            .saturating_add(QOI_HEADER_SIZE + QOI_PADDING_SIZE)
    }

    /// Encode the pixels into a newly allocated stream
    ///
    /// This has no failure path, trailing bytes that do not make up a
    /// whole pixel are ignored.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![0; self.max_size()];

        match self.encode_into(&mut out) {
            Ok(len) => out.truncate(len),
            Err(err) => {
                // max_size is an upper bound, so this is a bug in it
                error!("Stream did not fit in max_size: {:?}", err);
                out.clear();
            }
        }
        out
    }

    /// Encode into a pre-allocated buffer and error out if
    /// the buffer provided is too small
    ///
    /// A buffer of [`max_size`](Self::max_size) bytes always fits, smaller
    /// ones may still fit a well compressing image.
    ///
    /// # Arguments.
    /// - buf: The buffer to write encoded content to
    ///
    /// # Returns
    /// - Ok(size): Actual bytes used for encoding
    /// - Err: The error encountered during encoding
    pub fn encode_into(&self, buf: &mut [u8]) -> Result<usize, QoifEncodeErrors> {
        let available = buf.len();
        let mut writer = ByteWriter::new(buf);

        match self.encode_to(&mut writer) {
            Ok(()) => Ok(writer.position()),
            Err(ByteIoError::NotEnoughBuffer(..)) => Err(QoifEncodeErrors::TooSmallOutput(
                self.max_size(),
                available
            )),
            Err(err) => Err(err.into())
        }
    }

    fn encode_to(&self, writer: &mut ByteWriter<'_>) -> Result<(), ByteIoError> {
        let stride = self.stride();

        self.header().write_to(writer)?;

        if self.pixel_data.len() % stride != 0 {
            warn!(
                "Pixel buffer length {} is not a multiple of {}, ignoring the trailing bytes",
                self.pixel_data.len(),
                stride
            );
        }
        let pixel_count = self.pixel_data.len() / stride;

        let mut cache = ColorCache::new();
        let mut state = RunState::default();

        for (position, chunk) in self.pixel_data.chunks_exact(stride).enumerate() {
            let pixel = Pixel::from_bytes(chunk, state.previous.a);

            if pixel == state.previous {
                state.run += 1;

                if state.run == QOI_MAX_RUN || position + 1 == pixel_count {
                    Op::Run(state.run - 1).write_to(writer)?;
                    state.run = 0;
                }
                continue;
            }
            if state.in_run() {
                Op::Run(state.run - 1).write_to(writer)?;
                state.run = 0;
            }
            let op = match cache.match_or_insert(pixel) {
                Some(index) => Op::Index(index),
                None => Op::for_delta(pixel, state.previous)
            };
            op.write_to(writer)?;

            state.previous = pixel;
        }
        // the last pixel always flushes a pending run
        debug_assert!(!state.in_run());

        writer.write_all(&QOI_PADDING)?;

        trace!(
            "Encoded {} pixels into {} bytes",
            pixel_count,
            writer.position()
        );
        Ok(())
    }
}

/// Encode a raw pixel buffer
///
/// # Arguments
/// - `pixels`: row major pixels, 4 bytes each if `has_alpha`, else 3
/// - `width`, `height`: recorded in the header
/// - `has_alpha`: whether `pixels` carries an alpha channel
/// - `srgb`: recorded in the header colorspace byte
///
/// ```
/// let stream = qoif::encode(&[], 0, 0, true, true);
/// assert_eq!(
///     stream,
///     [b'q', b'o', b'i', b'f', 0, 0, 0, 0, 0, 0, 0, 0, 4, 1, 0, 0, 0, 0, 0, 0, 0, 1]
/// );
/// ```
pub fn encode(pixels: &[u8], width: u32, height: u32, has_alpha: bool, srgb: bool) -> Vec<u8> {
    let options = EncoderOptions::default()
        .set_width(width)
        .set_height(height)
        .set_colorspace(ColorSpace::from_alpha(has_alpha))
        .set_characteristics(ColorCharacteristics::from_srgb(srgb));

    QoifEncoder::new(pixels, options).encode()
}

#[cfg(test)]
mod tests {
    use qoif_core::colorspace::{ColorCharacteristics, ColorSpace};
    use qoif_core::options::EncoderOptions;

    use crate::{QoifDecoder, QoifEncodeErrors, QoifEncoder};

    #[test]
    fn test_qoi_encode_rgb() {
        const W: usize = 100;
        const H: usize = 100;

        let pixels = std::array::from_fn::<u8, { W * H * 3 }, _>(|i| (i % 256) as u8);
        let encoder = QoifEncoder::new(
            &pixels,
            EncoderOptions::new(W as u32, H as u32, ColorSpace::RGB)
        );
        let output = encoder.encode();
        assert!(output.len() <= encoder.max_size());
        assert_eq!(output[12], 3);

        let mut decoder = QoifDecoder::new(&output);
        let decoded_pixels = decoder.decode().unwrap();
        assert_eq!(&pixels[..], &decoded_pixels[..]);
    }

    #[test]
    fn test_qoi_encode_rgba() {
        const W: usize = 100;
        const H: usize = 100;

        let pixels = std::array::from_fn::<u8, { W * H * 4 }, _>(|i| (i % 256) as u8);
        let encoder = QoifEncoder::new(
            &pixels,
            EncoderOptions::new(W as u32, H as u32, ColorSpace::RGBA)
        );

        let output = encoder.encode();
        let mut decoder = QoifDecoder::new(&output);
        let decoded_pixels = decoder.decode().unwrap();
        assert_eq!(&pixels[..], &decoded_pixels[..]);
    }

    #[test]
    fn linear_characteristics_clear_the_colorspace_byte() {
        let mut encoder = QoifEncoder::new(&[], EncoderOptions::new(0, 0, ColorSpace::RGBA));
        assert_eq!(encoder.encode()[13], 1);

        encoder.set_color_characteristics(ColorCharacteristics::Linear);
        assert_eq!(encoder.encode()[13], 0);
    }

    #[test]
    fn encode_into_checks_space() {
        let pixels = [1, 2, 3, 4, 5, 6];
        let encoder = QoifEncoder::new(&pixels, EncoderOptions::new(2, 1, ColorSpace::RGB));
        let expected = encoder.encode();

        let mut small = [0; 10];
        assert!(matches!(
            encoder.encode_into(&mut small),
            Err(QoifEncodeErrors::TooSmallOutput(_, 10))
        ));

        let mut buf = vec![0_u8; encoder.max_size()];
        let written = encoder.encode_into(&mut buf).unwrap();
        assert_eq!(&buf[..written], &expected[..]);
    }

    #[test]
    fn encode_into_accepts_buffers_below_max_size() {
        let pixels = [1_u8, 2, 3, 255].repeat(100);
        let encoder = QoifEncoder::new(&pixels, EncoderOptions::new(10, 10, ColorSpace::RGBA));
        assert_eq!(encoder.max_size(), 522);

        // header, LUMA, two runs and the end marker
        let mut buf = [0; 64];
        assert_eq!(encoder.encode_into(&mut buf).unwrap(), 26);
        assert_eq!(&buf[..26], &encoder.encode()[..]);

        let mut tight = [0; 25];
        assert!(matches!(
            encoder.encode_into(&mut tight),
            Err(QoifEncodeErrors::TooSmallOutput(522, 25))
        ));
    }

    #[test]
    fn trailing_partial_pixel_is_ignored() {
        let whole = [9, 9, 9, 9];
        let with_tail = [9, 9, 9, 9, 1, 2];
        let options = EncoderOptions::new(1, 1, ColorSpace::RGBA);

        assert_eq!(
            QoifEncoder::new(&whole, options).encode(),
            QoifEncoder::new(&with_tail, options).encode()
        );
    }
}
