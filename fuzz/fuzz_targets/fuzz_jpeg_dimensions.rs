#![no_main]

use libfuzzer_sys::fuzz_target;
use virtual_image::{ImageFormat, extract_dimensions};

fuzz_target!(|data: &[u8]| {
    let _ = extract_dimensions(data, ImageFormat::Jpeg);
});
