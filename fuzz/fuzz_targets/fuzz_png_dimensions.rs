#![no_main]

use libfuzzer_sys::fuzz_target;
use virtual_image::{ImageFormat, VirtualImage};

fuzz_target!(|data: &[u8]| {
    if let Ok(image) = VirtualImage::new(data.to_vec(), ImageFormat::Png) {
        assert_eq!(image.bytes().as_ref(), data);
    }
});
