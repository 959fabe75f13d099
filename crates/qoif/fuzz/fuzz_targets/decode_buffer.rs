#![no_main]

use libfuzzer_sys::fuzz_target;
use qoif::qoif_core::options::DecoderOptions;

fuzz_target!(|data: &[u8]| {
    let _ = qoif::decode(data);

    let mut strict = qoif::QoifDecoder::new_with_options(data, DecoderOptions::new_safe());
    let _ = strict.decode();
});
