/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoder and encoder options
//!
//! This module exposes structs which configure how the codec
//! treats its input. Options are plain values, they hold no state
//! between calls and can be shared freely.
pub use decoder::DecoderOptions;
pub use encoder::EncoderOptions;

mod decoder;
mod encoder;
