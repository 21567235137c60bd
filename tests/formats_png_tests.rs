use virtual_image::formats::png::{
    IHDR_PAYLOAD_OFFSET, PNG_SIGNATURE, PngBaseline, png_dimensions, png_dimensions_with,
};
use virtual_image::formats::extract_dimensions_with;
use virtual_image::{Dimensions, ImageError, ImageFormat, extract_dimensions};

fn make_png_chunk(chunk_type: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut chunk = Vec::new();
    chunk.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    chunk.extend_from_slice(chunk_type);
    chunk.extend_from_slice(payload);
    // CRC is never checked
    chunk.extend_from_slice(&[0, 0, 0, 0]);
    chunk
}

fn make_png(width: u32, height: u32) -> Vec<u8> {
    let mut ihdr_payload = Vec::new();
    ihdr_payload.extend_from_slice(&width.to_be_bytes());
    ihdr_payload.extend_from_slice(&height.to_be_bytes());
    ihdr_payload.push(8);
    ihdr_payload.push(2);
    ihdr_payload.extend_from_slice(&[0, 0, 0]);

    let mut data = Vec::new();
    data.extend_from_slice(&PNG_SIGNATURE);
    data.extend_from_slice(&make_png_chunk(b"IHDR", &ihdr_payload));
    data.extend_from_slice(&make_png_chunk(b"IDAT", &[0xAA; 64]));
    data.extend_from_slice(&make_png_chunk(b"IEND", &[]));
    data
}

#[test]
fn test_png_dimensions_raw_ihdr_payload() {
    let data = [0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0xC8];
    assert_eq!(png_dimensions(&data).unwrap(), Dimensions::new(256, 200));
}

#[test]
fn test_png_dimensions_read_buffer_start_even_with_signature() {
    // The signature itself is taken as the dimension bytes
    let dims = png_dimensions(&PNG_SIGNATURE).unwrap();
    assert_eq!(dims, Dimensions::new(0x8950_4E47, 0x0D0A_1A0A));

    let png = make_png(640, 480);
    assert_eq!(
        extract_dimensions(&png, ImageFormat::Png).unwrap(),
        Dimensions::new(0x8950_4E47, 0x0D0A_1A0A)
    );
}

#[test]
fn test_png_dimensions_signature_prefix_shorter_than_header() {
    let mut data = PNG_SIGNATURE.to_vec();
    data.extend_from_slice(&[0x00, 0x00, 0x00, 0x0D]);
    assert_eq!(
        png_dimensions(&data).unwrap(),
        Dimensions::new(0x8950_4E47, 0x0D0A_1A0A)
    );
}

#[test]
fn test_png_ihdr_baseline_full_file() {
    let png = make_png(640, 480);
    assert_eq!(
        png_dimensions_with(&png, PngBaseline::IhdrPayload).unwrap(),
        Dimensions::new(640, 480)
    );
}

#[test]
fn test_png_ihdr_baseline_real_header() {
    let png = [
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x10, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x91, 0x68, 0x36,
    ];
    assert_eq!(
        png_dimensions_with(&png, PngBaseline::IhdrPayload).unwrap(),
        Dimensions::new(16, 16)
    );
}

#[test]
fn test_png_baseline_offsets() {
    let png = make_png(1, 1);
    assert_eq!(PngBaseline::BufferStart.offset(&png), 0);
    assert_eq!(PngBaseline::IhdrPayload.offset(&png), IHDR_PAYLOAD_OFFSET);
    // Without a signature the IHDR baseline falls back to the start
    assert_eq!(PngBaseline::IhdrPayload.offset(&[0u8; 8]), 0);
    assert_eq!(PngBaseline::default(), PngBaseline::BufferStart);
}

#[test]
fn test_png_dimensions_large_values_stay_unsigned() {
    let data = [0xFF, 0xFF, 0xFF, 0xFF, 0x80, 0x00, 0x00, 0x00];
    let dims = png_dimensions(&data).unwrap();
    assert_eq!(dims.width, u32::MAX);
    assert_eq!(dims.height, 0x8000_0000);
}

#[test]
fn test_png_shorter_than_eight_bytes_is_violation() {
    for len in 0..8 {
        let data = vec![0x01; len];
        let err = png_dimensions(&data).unwrap_err();
        assert!(err.is_truncated(), "len {len}: {err}");
    }
    let err = png_dimensions(&PNG_SIGNATURE[..7]).unwrap_err();
    assert!(err.is_truncated());
}

#[test]
fn test_png_ihdr_baseline_without_full_ihdr_is_violation() {
    let mut data = PNG_SIGNATURE.to_vec();
    data.extend_from_slice(&[0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R', 0x00, 0x00]);
    match png_dimensions_with(&data, PngBaseline::IhdrPayload) {
        Err(ImageError::BoundsViolation {
            format,
            offset,
            available,
            ..
        }) => {
            assert_eq!(format, ImageFormat::Png);
            assert_eq!(offset, IHDR_PAYLOAD_OFFSET);
            assert_eq!(available, 18);
        }
        other => panic!("expected bounds violation, got {other:?}"),
    }
}

#[test]
fn test_extract_dimensions_dispatches_png() {
    let png = make_png(3, 7);
    assert_eq!(
        extract_dimensions_with(&png, ImageFormat::Png, PngBaseline::IhdrPayload).unwrap(),
        Dimensions::new(3, 7)
    );
    assert_eq!(
        extract_dimensions(&png[IHDR_PAYLOAD_OFFSET..], ImageFormat::Png).unwrap(),
        Dimensions::new(3, 7)
    );
}
