/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The tagged instructions making up a stream body
use qoif_core::bytestream::{ByteCursor, ByteIoError, ByteWriter};

use crate::constants::{
    QOI_DIFF_BIAS, QOI_HEADER_SIZE, QOI_LUMA_BIAS, QOI_LUMA_GREEN_BIAS, QOI_MASK_2, QOI_OP_DIFF,
    QOI_OP_INDEX, QOI_OP_LUMA, QOI_OP_RGB, QOI_OP_RGBA, QOI_OP_RUN, QOI_PADDING_SIZE,
    QOI_PAYLOAD_MASK
};
use crate::errors::FormatError;
use crate::pixel::{ColorCache, Pixel};

/// One opcode, holding its payload exactly as it sits on the wire
///
/// | op     | bytes | layout                                         |
/// |--------|-------|------------------------------------------------|
/// | `Run`  | 1     | `11xxxxxx`, run length - 1                     |
/// | `Index`| 1     | `00xxxxxx`, cache slot                         |
/// | `Diff` | 1     | `01rrggbb`, each delta biased by 2             |
/// | `Luma` | 2     | `10gggggg` `rrrrbbbb`, dg + 32, dr-dg + 8, db-dg + 8 |
/// | `Rgb`  | 4     | `0xFE` r g b                                   |
/// | `Rgba` | 5     | `0xFF` r g b a                                 |
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Op {
    Run(u8),
    Index(u8),
    /// Biased red, green and blue deltas
    Diff(u8, u8, u8),
    /// Biased green delta, then red and blue deltas relative to green
    Luma(u8, u8, u8),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, u8)
}

impl Op {
    /// Choose the op for a pixel that neither repeats `previous`
    /// nor sits in the color cache
    ///
    /// Tried in order: DIFF, LUMA, RGB, then RGBA when alpha changed.
    pub fn for_delta(pixel: Pixel, previous: Pixel) -> Op {
        let delta = pixel - previous;

        if delta.a != 0 {
            return Op::Rgba(pixel.r, pixel.g, pixel.b, pixel.a);
        }
        let dr = delta.r.wrapping_add(QOI_DIFF_BIAS);
        let dg = delta.g.wrapping_add(QOI_DIFF_BIAS);
        let db = delta.b.wrapping_add(QOI_DIFF_BIAS);

        if (dr | dg | db) < 4 {
            return Op::Diff(dr, dg, db);
        }
        let lg = delta.g.wrapping_add(QOI_LUMA_GREEN_BIAS);
        let lr = delta.r.wrapping_sub(delta.g).wrapping_add(QOI_LUMA_BIAS);
        let lb = delta.b.wrapping_sub(delta.g).wrapping_add(QOI_LUMA_BIAS);

        if lg < 64 && (lr | lb) < 16 {
            return Op::Luma(lg, lr, lb);
        }
        Op::Rgb(pixel.r, pixel.g, pixel.b)
    }

    /// The pixel this op produces when decoded after `previous`
    ///
    /// A run reproduces `previous`, the caller handles the repetition.
    pub fn apply(&self, previous: Pixel, cache: &ColorCache) -> Pixel {
        match *self {
            Op::Run(_) => previous,
            Op::Index(index) => cache.get(index),
            Op::Diff(dr, dg, db) => {
                let delta = Pixel::new(
                    dr.wrapping_sub(QOI_DIFF_BIAS),
                    dg.wrapping_sub(QOI_DIFF_BIAS),
                    db.wrapping_sub(QOI_DIFF_BIAS),
                    0
                );
                previous + delta
            }
            Op::Luma(lg, lr, lb) => {
                let dg = lg.wrapping_sub(QOI_LUMA_GREEN_BIAS);
                let delta = Pixel::new(
                    lr.wrapping_add(dg).wrapping_sub(QOI_LUMA_BIAS),
                    dg,
                    lb.wrapping_add(dg).wrapping_sub(QOI_LUMA_BIAS),
                    0
                );
                previous + delta
            }
            Op::Rgb(r, g, b) => Pixel::new(r, g, b, previous.a),
            Op::Rgba(r, g, b, a) => Pixel::new(r, g, b, a)
        }
    }

    /// Size of the op on the wire
    pub const fn encoded_len(&self) -> usize {
        match self {
            Op::Run(_) | Op::Index(_) | Op::Diff(..) => 1,
            Op::Luma(..) => 2,
            Op::Rgb(..) => 4,
            Op::Rgba(..) => 5
        }
    }

    /// Write the wire form of the op, or nothing if it does not fit
    #[allow(clippy::identity_op)]
    pub fn write_to(&self, writer: &mut ByteWriter<'_>) -> Result<(), ByteIoError> {
        match *self {
            Op::Run(payload) => writer.write_u8_err(QOI_OP_RUN | (payload & QOI_PAYLOAD_MASK)),
            Op::Index(index) => writer.write_u8_err(QOI_OP_INDEX | (index & QOI_PAYLOAD_MASK)),
            Op::Diff(dr, dg, db) => {
                writer.write_u8_err(QOI_OP_DIFF | (dr & 3) << 4 | (dg & 3) << 2 | (db & 3) << 0)
            }
            Op::Luma(lg, lr, lb) => writer.write_all(&[
                QOI_OP_LUMA | (lg & QOI_PAYLOAD_MASK),
                (lr & 0x0f) << 4 | (lb & 0x0f)
            ]),
            Op::Rgb(r, g, b) => writer.write_all(&[QOI_OP_RGB, r, g, b]),
            Op::Rgba(r, g, b, a) => {
                writer.write_u8_err(QOI_OP_RGBA)?;
                writer.write_u32_be_err(u32::from_be_bytes([r, g, b, a]))
            }
        }
    }

    /// Read the next op from `stream`
    ///
    /// Returns `None` if the stream is empty or ends in the middle of an op.
    #[allow(clippy::identity_op)]
    pub fn read(stream: &mut ByteCursor<'_>) -> Option<Op> {
        let chunk = stream.get_u8_err().ok()?;

        // the 8 bit tags shadow two run payloads, so they go first
        let op = match chunk {
            QOI_OP_RGB => {
                let [r, g, b] = stream.read_fixed_bytes_or_error::<3>().ok()?;
                Op::Rgb(r, g, b)
            }
            QOI_OP_RGBA => {
                let [r, g, b, a] = stream.read_fixed_bytes_or_error::<4>().ok()?;
                Op::Rgba(r, g, b, a)
            }
            _ => match chunk & QOI_MASK_2 {
                QOI_OP_INDEX => Op::Index(chunk & QOI_PAYLOAD_MASK),
                QOI_OP_DIFF => Op::Diff((chunk >> 4) & 3, (chunk >> 2) & 3, (chunk >> 0) & 3),
                QOI_OP_LUMA => {
                    let b2 = stream.get_u8_err().ok()?;
                    Op::Luma(chunk & QOI_PAYLOAD_MASK, b2 >> 4, b2 & 0x0f)
                }
                _ => Op::Run(chunk & QOI_PAYLOAD_MASK)
            }
        };
        Some(op)
    }
}

/// Iterator over the ops of a stream body
///
/// Iteration ends with the body, or early if the last op is cut short,
/// which [`is_truncated`](Opcodes::is_truncated) reports.
pub struct Opcodes<'a> {
    stream:    ByteCursor<'a>,
    truncated: bool
}

impl<'a> Opcodes<'a> {
    /// Walk `body`, a stream without its header and end marker
    pub const fn new(body: &'a [u8]) -> Opcodes<'a> {
        Opcodes {
            stream:    ByteCursor::new(body),
            truncated: false
        }
    }

    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl Iterator for Opcodes<'_> {
    type Item = Op;

    fn next(&mut self) -> Option<Op> {
        if self.stream.is_eof() {
            return None;
        }
        let op = Op::read(&mut self.stream);

        if op.is_none() {
            self.truncated = true;
            self.stream.skip(self.stream.remaining());
        }
        op
    }
}

/// Walk the ops of a full encoded stream, skipping the header and end marker
///
/// ```
/// use qoif::{encode, opcodes, Op};
///
/// let white = [255, 255, 255, 255];
/// let stream = encode(&white, 1, 1, true, true);
/// let ops: Vec<Op> = opcodes(&stream).unwrap().collect();
/// assert_eq!(ops, [Op::Diff(1, 1, 1)]);
/// ```
pub fn opcodes(stream: &[u8]) -> Result<Opcodes<'_>, FormatError> {
    if stream.len() < QOI_HEADER_SIZE + QOI_PADDING_SIZE {
        return Err(FormatError::TooShort(stream.len()));
    }
    let body = &stream[QOI_HEADER_SIZE..stream.len() - QOI_PADDING_SIZE];

    Ok(Opcodes::new(body))
}
