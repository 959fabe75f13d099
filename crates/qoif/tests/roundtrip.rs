//! Encode then decode on generated images
use nanorand::{Rng, WyRand};
use qoif::qoif_core::colorspace::{ColorCharacteristics, ColorSpace};
use qoif::qoif_core::options::{DecoderOptions, EncoderOptions};
use qoif::{decode, encode, opcodes, Op, QoifDecoder, QoifEncoder};

const SIZES: [(u32, u32); 5] = [(1, 1), (7, 3), (64, 64), (1, 300), (129, 2)];

fn random_pixels(rand: &mut WyRand, len: usize) -> Vec<u8> {
    let mut pixels = vec![0_u8; len];
    rand.fill(&mut pixels);
    pixels
}

fn assert_round_trip(pixels: &[u8], width: u32, height: u32, has_alpha: bool, srgb: bool) {
    let stream = encode(pixels, width, height, has_alpha, srgb);
    let image = decode(&stream).unwrap();

    assert_eq!(image.pixels, pixels, "{width}x{height} alpha={has_alpha}");
    assert_eq!((image.width, image.height), (width, height));
    assert_eq!(image.has_alpha, has_alpha);
    assert_eq!(image.srgb, srgb);

    // a well formed stream passes the strict decoder too
    let mut strict = QoifDecoder::new_with_options(&stream, DecoderOptions::new_safe());
    assert_eq!(strict.decode().unwrap(), pixels);
}

#[test]
fn random_rgba() {
    let mut rand = WyRand::new_seed(0x5eed);

    for (width, height) in SIZES {
        let pixels = random_pixels(&mut rand, (width * height * 4) as usize);
        assert_round_trip(&pixels, width, height, true, true);
    }
}

#[test]
fn random_rgb() {
    let mut rand = WyRand::new_seed(0xc0ffee);

    for (width, height) in SIZES {
        let pixels = random_pixels(&mut rand, (width * height * 3) as usize);
        assert_round_trip(&pixels, width, height, false, false);
    }
}

#[test]
fn smooth_gradient_compresses() {
    let (width, height) = (256_u32, 32_u32);
    let mut pixels = Vec::new();

    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[x as u8, (x / 4) as u8, (x + y) as u8, 255]);
        }
    }
    assert_round_trip(&pixels, width, height, true, true);

    let stream = encode(&pixels, width, height, true, true);
    assert!(stream.len() < pixels.len() / 2);

    let ops: Vec<Op> = opcodes(&stream).unwrap().collect();
    assert!(ops.iter().any(|op| matches!(op, Op::Diff(..))));
    assert!(ops.iter().all(|op| !matches!(op, Op::Rgba(..))));
}

#[test]
fn noisy_image_with_patches_of_color() {
    let mut rand = WyRand::new_seed(7);
    let (width, height) = (50_u32, 40_u32);
    let palette: Vec<[u8; 4]> = (0..8)
        .map(|_| {
            [
                rand.generate::<u8>(),
                rand.generate::<u8>(),
                rand.generate::<u8>(),
                if rand.generate::<u8>() < 128 { 255 } else { rand.generate::<u8>() }
            ]
        })
        .collect();

    let mut pixels = Vec::new();
    while pixels.len() < (width * height * 4) as usize {
        let color = palette[rand.generate_range(0_usize..palette.len())];
        let repeat = rand.generate_range(1_usize..80);
        for _ in 0..repeat {
            pixels.extend_from_slice(&color);
        }
    }
    pixels.truncate((width * height * 4) as usize);

    assert_round_trip(&pixels, width, height, true, true);

    let stream = encode(&pixels, width, height, true, true);
    let ops: Vec<Op> = opcodes(&stream).unwrap().collect();
    assert!(ops.iter().any(|op| matches!(op, Op::Run(..))));
    assert!(ops.iter().any(|op| matches!(op, Op::Index(..))));
}

#[test]
fn runs_around_the_cap() {
    let first = [9, 8, 7, 255];
    let repeated = [1, 2, 3, 255];

    for count in [1_usize, 61, 62, 63, 124, 125, 200] {
        let mut pixels = first.to_vec();
        pixels.extend_from_slice(&repeated.repeat(count));
        let width = (count + 1) as u32;

        assert_round_trip(&pixels, width, 1, true, true);

        let stream = encode(&pixels, width, 1, true, true);
        let runs: Vec<u8> = opcodes(&stream)
            .unwrap()
            .filter_map(|op| match op {
                Op::Run(payload) => Some(payload),
                _ => None
            })
            .collect();

        // the first copy of `repeated` is a real op, the rest are runs
        let run_pixels: usize = runs.iter().map(|&payload| usize::from(payload) + 1).sum();
        assert_eq!(run_pixels, count - 1, "{count} pixels");
        assert_eq!(runs.len(), (count - 1).div_ceil(62));
        assert!(runs.iter().all(|&payload| payload <= 61));
    }
}

#[test]
fn decode_then_encode_reproduces_the_stream() {
    let mut rand = WyRand::new_seed(99);
    let mut pixels = random_pixels(&mut rand, 30 * 30 * 4);
    // add some structure so all op kinds show up
    for chunk in pixels.chunks_exact_mut(4).skip(1).step_by(3) {
        chunk.copy_from_slice(&[10, 10, 10, 255]);
    }
    let stream = encode(&pixels, 30, 30, true, false);
    let image = decode(&stream).unwrap();

    assert_eq!(
        encode(&image.pixels, image.width, image.height, image.has_alpha, image.srgb),
        stream
    );
}

#[test]
fn encoder_struct_matches_free_function() {
    let mut rand = WyRand::new_seed(1234);
    let pixels = random_pixels(&mut rand, 16 * 16 * 3);

    let options = EncoderOptions::new(16, 16, ColorSpace::RGB)
        .set_characteristics(ColorCharacteristics::Linear);
    let encoder = QoifEncoder::new(&pixels, options);
    let stream = encoder.encode();

    assert_eq!(stream, encode(&pixels, 16, 16, false, false));
    assert!(stream.len() <= encoder.max_size());

    let mut decoder = QoifDecoder::new(&stream);
    assert_eq!(decoder.decode().unwrap(), pixels);
    assert_eq!(decoder.colorspace(), Some(ColorSpace::RGB));
    assert_eq!(
        decoder.color_characteristics(),
        Some(ColorCharacteristics::Linear)
    );
    assert_eq!(decoder.output_buffer_size(), Some(pixels.len()));
}

#[test]
fn calls_do_not_share_state() {
    let mut rand = WyRand::new_seed(42);
    let first = random_pixels(&mut rand, 20 * 4);
    let second = random_pixels(&mut rand, 20 * 4);

    let alone = encode(&second, 20, 1, true, true);
    let _ = encode(&first, 20, 1, true, true);
    assert_eq!(encode(&second, 20, 1, true, true), alone);

    let handles: Vec<_> = [first, second]
        .into_iter()
        .map(|pixels| {
            std::thread::spawn(move || {
                let stream = encode(&pixels, 20, 1, true, true);
                decode(&stream).unwrap().pixels == pixels
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
