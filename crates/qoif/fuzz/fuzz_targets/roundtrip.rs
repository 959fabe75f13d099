#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1 {
        let has_alpha = data[0] & 1 == 1;
        let stride = if has_alpha { 4 } else { 3 };
        let pixels = &data[1..data.len() - (data.len() - 1) % stride];
        let width = (pixels.len() / stride) as u32;

        let stream = qoif::encode(pixels, width, 1, has_alpha, data[0] & 2 == 2);
        let image = qoif::decode(&stream).expect("Failed to decode a valid stream!");
        assert!(
            image.pixels == pixels,
            "The decoded pixels don't match the original pixels!"
        );
    }
});
