/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A simple implementation of a bytestream reader
//! and writer.
//!
//! The reader works over an in memory buffer, which is all a QOI stream
//! ever is, the writer fills a caller provided slice.
pub use reader::{ByteCursor, ByteIoError};
pub use writer::ByteWriter;

mod reader;
mod writer;
