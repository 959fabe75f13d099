/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the qoif codec
//!
//! It currently contains
//!
//! - A bytestream reader and writer with big endian aware reads and writes
//! - Colorspace information carried by a QOI header
//! - Decoder and encoder options
//! - Logging macros that compile to nothing when the `log` feature is off
//!
//! This library is `#[no_std]` with `alloc`.
//!
//! # Features
//!  - `std`: Implements `std::error::Error` for the error types.
//!
//!  - `log`: Route the logging macros to the [log](https://docs.rs/log) crate.
//!
//!  - `serde`: Enables serializing of colorspace information.
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub mod bytestream;
pub mod colorspace;
pub mod log;
pub mod options;
pub mod serde;
