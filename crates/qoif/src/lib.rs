/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Decoding and encoding a lossless Quite Ok Image style format
//!
//! A stream is a 14 byte header, a body of tagged ops and an 8 byte end marker.
//! Both directions are a single pass over the data with a 64 slot color cache,
//! all state lives in the call so encoders and decoders can run on different
//! threads without any locking.
//!
//! ```
//! let pixels = [255, 255, 255, 255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255, 255];
//!
//! let stream = qoif::encode(&pixels, 2, 2, true, true);
//! let image = qoif::decode(&stream).unwrap();
//!
//! assert_eq!(image.pixels, pixels);
//! assert_eq!((image.width, image.height), (2, 2));
//! ```
//!
//! # Differences from the reference QOI format
//! - The header colorspace byte is `1` for sRGB and `0` for linear.
//! - The decoder does not validate the header or the end marker unless
//!   asked to through [`DecoderOptions`](qoif_core::options::DecoderOptions).
//!
//! # Features
//! - `std`: `std::error::Error` for the error types
//! - `log`: log through the `log` crate
//! - `no_std`: You can use `no_std` with alloc feature to compile for `no_std` endpoints

#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;
extern crate core;

pub use decoder::*;
pub use encoder::*;
pub use errors::*;
pub use header::Header;
pub use opcode::{opcodes, Op, Opcodes};
pub use pixel::{ColorCache, Pixel, RunState};
pub use qoif_core;

mod constants;
mod decoder;
mod encoder;
mod errors;
mod header;
mod opcode;
mod pixel;
