#![no_main]

use fixed_f32::{Binary32, Codec, UnpackedFloat};

#[derive(Debug, arbitrary::Arbitrary)]
struct Data<'a> {
    generic_str: &'a str,

    binary32: Binary32,

    unpacked_negative: bool,
    unpacked_exponent: i32,
    unpacked_fraction: u32,
}

libfuzzer_sys::fuzz_target!(|data: Data<'_>| {
    let _ = serde_json::from_str::<Binary32>(data.generic_str);

    for codec in [Codec::SCIENTIFIC, Codec::FIXED, Codec::UNIT].iter() {
        if let Ok(parsed) = codec.parse(data.generic_str) {
            let _ = codec.format(&parsed.value);
        }
        let _ = codec.format_binary32(data.binary32);
    }

    let unpacked = UnpackedFloat {
        negative: data.unpacked_negative,
        exponent: data.unpacked_exponent,
        fraction: data.unpacked_fraction,
    };
    let _ = unpacked.pack();
    let _ = Codec::SCIENTIFIC.format(&unpacked);
});
