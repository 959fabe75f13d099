/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Pixel model and the per call state shared by the encoder and decoder
use alloc::vec::Vec;
use core::ops::{Add, Sub};

/// A single RGBA pixel
///
/// Channel arithmetic wraps at 8 bits, the opcode biases rely on it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8
}

impl Default for Pixel {
    /// Opaque black, the pixel both directions start from
    fn default() -> Self {
        Pixel::new(0, 0, 0, 255)
    }
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Pixel {
        Pixel { r, g, b, a }
    }

    /// Build a pixel from one stride of a raw buffer
    ///
    /// A 4 byte slice carries its own alpha, a 3 byte slice takes
    /// `previous_alpha`. Slices shorter than 3 bytes are a caller bug,
    /// they trip a debug assertion and read as black in release builds.
    ///
    /// ```
    /// use qoif::Pixel;
    /// assert_eq!(Pixel::from_bytes(&[1, 2, 3], 9), Pixel::new(1, 2, 3, 9));
    /// assert_eq!(Pixel::from_bytes(&[1, 2, 3, 4], 9), Pixel::new(1, 2, 3, 4));
    /// ```
    #[inline(always)]
    pub fn from_bytes(bytes: &[u8], previous_alpha: u8) -> Pixel {
        debug_assert!(bytes.len() >= 3, "a pixel needs at least 3 bytes");

        match *bytes {
            [r, g, b, a, ..] => Pixel::new(r, g, b, a),
            [r, g, b] => Pixel::new(r, g, b, previous_alpha),
            _ => Pixel::new(0, 0, 0, previous_alpha)
        }
    }

    /// Index of this pixel in the 64 slot color cache
    ///
    /// `(r*3 + g*5 + b*7 + a*11) % 64`, computed in wrapping 8 bit
    /// arithmetic which is equivalent since 64 divides 256.
    #[inline(always)]
    pub const fn hash(&self) -> u8 {
        self.r
            .wrapping_mul(3)
            .wrapping_add(self.g.wrapping_mul(5))
            .wrapping_add(self.b.wrapping_mul(7))
            .wrapping_add(self.a.wrapping_mul(11))
            % 64
    }

    /// Append the first `stride` channels to `out`
    #[inline(always)]
    pub fn write_to(&self, out: &mut Vec<u8>, stride: usize) {
        let channels = [self.r, self.g, self.b, self.a];
        out.extend_from_slice(&channels[..stride.min(4)]);
    }
}

impl Add for Pixel {
    type Output = Pixel;

    fn add(self, rhs: Self) -> Self::Output {
        Pixel {
            r: self.r.wrapping_add(rhs.r),
            g: self.g.wrapping_add(rhs.g),
            b: self.b.wrapping_add(rhs.b),
            a: self.a.wrapping_add(rhs.a)
        }
    }
}

impl Sub for Pixel {
    type Output = Pixel;

    fn sub(self, rhs: Self) -> Self::Output {
        Pixel {
            r: self.r.wrapping_sub(rhs.r),
            g: self.g.wrapping_sub(rhs.g),
            b: self.b.wrapping_sub(rhs.b),
            a: self.a.wrapping_sub(rhs.a)
        }
    }
}

/// The 64 slot table of recently seen pixels
///
/// Every slot starts as transparent black `{0,0,0,0}`. A slot is overwritten
/// whenever a pixel hashing to it is seen, there is no other eviction.
#[derive(Clone, Debug)]
pub struct ColorCache {
    slots: [Pixel; 64]
}

impl Default for ColorCache {
    fn default() -> Self {
        ColorCache::new()
    }
}

impl ColorCache {
    pub fn new() -> ColorCache {
        ColorCache {
            slots: [Pixel::new(0, 0, 0, 0); 64]
        }
    }

    #[inline(always)]
    pub fn get(&self, index: u8) -> Pixel {
        self.slots[usize::from(index & 63)]
    }

    /// Store `pixel` in its slot, replacing whatever was there
    #[inline(always)]
    pub fn insert(&mut self, pixel: Pixel) {
        self.slots[usize::from(pixel.hash())] = pixel;
    }

    /// Return the slot index if `pixel` is already cached,
    /// otherwise store it and return `None`
    #[inline(always)]
    pub fn match_or_insert(&mut self, pixel: Pixel) -> Option<u8> {
        let index = pixel.hash();
        let slot = &mut self.slots[usize::from(index)];

        if *slot == pixel {
            Some(index)
        } else {
            *slot = pixel;
            None
        }
    }
}

/// Running state of one encode or decode call
///
/// `run > 0` means a run of `previous` is pending.
#[derive(Clone, Debug, Default)]
pub struct RunState {
    pub previous: Pixel,
    pub run:      u8
}

impl RunState {
    pub const fn in_run(&self) -> bool {
        self.run > 0
    }
}

#[cfg(test)]
mod tests {
    use super::{ColorCache, Pixel};

    #[test]
    fn hash_matches_reference_formula() {
        let pixels = [
            Pixel::new(255, 255, 255, 255),
            Pixel::new(10, 20, 30, 255),
            Pixel::new(41, 210, 234, 255),
            Pixel::new(0, 0, 0, 0),
            Pixel::new(1, 2, 3, 4)
        ];
        for pixel in pixels {
            let expected = (u32::from(pixel.r) * 3
                + u32::from(pixel.g) * 5
                + u32::from(pixel.b) * 7
                + u32::from(pixel.a) * 11)
                % 64;
            assert_eq!(u32::from(pixel.hash()), expected);
        }
        assert_eq!(Pixel::new(255, 255, 255, 255).hash(), 38);
        assert_eq!(Pixel::default().hash(), 53);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "a pixel needs at least 3 bytes")]
    fn short_slices_are_rejected_in_debug() {
        let _ = Pixel::from_bytes(&[1, 2], 255);
    }

    #[test]
    fn arithmetic_wraps() {
        let a = Pixel::new(0, 1, 255, 255);
        let b = Pixel::new(1, 1, 2, 0);

        assert_eq!(a - b, Pixel::new(255, 0, 253, 255));
        assert_eq!(a + b, Pixel::new(1, 2, 1, 255));
        assert_eq!((a - b) + b, a);
    }

    #[test]
    fn cache_starts_zeroed() {
        let mut cache = ColorCache::new();
        for index in 0..64 {
            assert_eq!(cache.get(index), Pixel::new(0, 0, 0, 0));
        }
        assert_eq!(cache.match_or_insert(Pixel::new(0, 0, 0, 0)), Some(0));
        assert_eq!(cache.match_or_insert(Pixel::default()), None);
    }

    #[test]
    fn cache_overwrites_on_collision() {
        let mut cache = ColorCache::new();
        // both hash to slot 14
        let first = Pixel::new(1, 0, 0, 1);
        let second = Pixel::new(65, 0, 0, 1);
        assert_eq!(first.hash(), second.hash());

        assert_eq!(cache.match_or_insert(first), None);
        assert_eq!(cache.match_or_insert(first), Some(14));
        assert_eq!(cache.match_or_insert(second), None);
        assert_eq!(cache.match_or_insert(first), None);
        assert_eq!(cache.get(14), first);
    }
}
