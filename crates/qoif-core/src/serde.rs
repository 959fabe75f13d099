#![cfg(feature = "serde")]
//! Serialization of the image description carried in a stream header
//!
//! Enums serialize as their name, [`EncoderOptions`] as a struct of
//! the fields it writes into a header.

use alloc::format;

use serde::ser::*;

use crate::colorspace::{ColorCharacteristics, ColorSpace};
use crate::options::EncoderOptions;

impl Serialize for ColorSpace {
    #[allow(clippy::uninlined_format_args)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        serializer.serialize_str(&format!("{:?}", self))
    }
}

impl Serialize for ColorCharacteristics {
    #[allow(clippy::uninlined_format_args)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        serializer.serialize_str(&format!("{:?}", self))
    }
}

impl Serialize for EncoderOptions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("EncoderOptions", 5)?;

        state.serialize_field("width", &self.width())?;
        state.serialize_field("height", &self.height())?;
        state.serialize_field("colorspace", &self.colorspace())?;
        state.serialize_field("channels", &self.colorspace().num_components())?;
        state.serialize_field("characteristics", &self.characteristics())?;
        state.end()
    }
}
