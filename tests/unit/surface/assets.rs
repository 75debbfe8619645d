use std::io::Cursor;
use std::path::PathBuf;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_keeps_straight_rgba() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100, 50, 200, 128]).unwrap();
    let buf = decode_image(&png_bytes(img)).unwrap();
    assert_eq!((buf.width(), buf.height(), buf.bytes_per_pixel()), (1, 1, 4));
    assert_eq!(buf.data(), [100, 50, 200, 128]);
}

#[test]
fn decode_garbage_is_an_error() {
    assert!(matches!(
        decode_image(b"not an image"),
        Err(DissolveError::Other(_))
    ));
}

#[test]
fn write_then_load_and_pair_size_check() {
    let dir = PathBuf::from("target").join("unit_assets");
    let a_path = dir.join("a.png");
    let b_path = dir.join("b.png");
    let c_path = dir.join("c.png");

    write_png(&a_path, &PixelBuffer::filled(3, 2, &[1, 2, 3, 255]).unwrap()).unwrap();
    write_png(&b_path, &PixelBuffer::filled(3, 2, &[9, 8, 7, 255]).unwrap()).unwrap();
    write_png(&c_path, &PixelBuffer::filled(2, 2, &[0, 0, 0, 255]).unwrap()).unwrap();

    let (a, b) = load_image_pair(&a_path, &b_path).unwrap();
    assert_eq!(a.data()[..4], [1, 2, 3, 255]);
    assert_eq!(b.data()[..4], [9, 8, 7, 255]);

    let err = load_image_pair(&a_path, &c_path).unwrap_err();
    assert!(err.to_string().contains("same size"));
}

#[test]
fn odd_pixel_sizes_cannot_be_written() {
    let buf = PixelBuffer::new(1, 1, 2).unwrap();
    let path = PathBuf::from("target").join("unit_assets").join("bad.png");
    assert!(matches!(
        write_png(&path, &buf),
        Err(DissolveError::Validation(_))
    ));
}
