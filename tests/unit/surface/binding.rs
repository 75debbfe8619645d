use super::*;

#[test]
fn from_raw_checks_length() {
    assert!(PixelBuffer::from_raw(2, 2, 3, vec![0; 12]).is_ok());
    assert!(matches!(
        PixelBuffer::from_raw(2, 2, 3, vec![0; 11]),
        Err(DissolveError::BufferMismatch(_))
    ));
    assert!(PixelBuffer::new(2, 2, 0).is_err());
}

#[test]
fn filled_and_pixel_access() {
    let mut buf = PixelBuffer::filled(3, 2, &[1, 2]).unwrap();
    assert_eq!(buf.data().len(), 12);
    assert_eq!(buf.pixel(Coord::new(2, 1)), &[1, 2]);
    buf.pixel_mut(Coord::new(1, 1)).copy_from_slice(&[9, 9]);
    assert_eq!(&buf.data()[8..10], &[9, 9]);
}

#[test]
fn binding_rejects_mismatched_dimensions() {
    let a = PixelBuffer::new(4, 4, 4).unwrap();
    let b = PixelBuffer::new(4, 3, 4).unwrap();
    let mut out = PixelBuffer::new(4, 4, 4).unwrap();
    let err = FrameBinding::new(&a, &b, &mut out).unwrap_err();
    assert!(matches!(err, DissolveError::BufferMismatch(_)));
    assert!(err.to_string().contains("incoming is 4x3"));

    let mut small = PixelBuffer::new(2, 2, 4).unwrap();
    assert!(FrameBinding::new(&a, &a, &mut small).is_err());
}

#[test]
fn binding_rejects_mismatched_format() {
    let a = PixelBuffer::new(2, 2, 4).unwrap();
    let b = PixelBuffer::new(2, 2, 3).unwrap();
    let mut out = PixelBuffer::new(2, 2, 4).unwrap();
    let err = FrameBinding::new(&a, &b, &mut out).unwrap_err();
    assert!(err.to_string().contains("bytes per pixel"));
}

#[test]
fn reveal_copies_single_pixel() {
    let a = PixelBuffer::filled(2, 2, &[0]).unwrap();
    let b = PixelBuffer::filled(2, 2, &[7]).unwrap();
    let mut out = a.clone();
    let mut binding = FrameBinding::new(&a, &b, &mut out).unwrap();
    binding.reveal(Coord::new(1, 0));
    assert_eq!(binding.output().data(), [0, 7, 0, 0]);
    binding.show_incoming();
    assert_eq!(binding.output().data(), [7, 7, 7, 7]);
    binding.restore_outgoing();
    assert_eq!(binding.output().data(), [0, 0, 0, 0]);
}

#[test]
fn rgba_image_is_a_surface() {
    let a = image::RgbaImage::from_pixel(2, 1, image::Rgba([1, 2, 3, 4]));
    let b = image::RgbaImage::from_pixel(2, 1, image::Rgba([5, 6, 7, 8]));
    let mut out = a.clone();
    let mut binding = FrameBinding::new(&a, &b, &mut out).unwrap();
    assert_eq!(binding.domain(), Domain::new(2, 1).unwrap());
    binding.reveal(Coord::new(1, 0));
    assert_eq!(binding.output().as_raw(), &vec![1, 2, 3, 4, 5, 6, 7, 8]);

    let buf = PixelBuffer::from_rgba_image(out);
    assert_eq!(buf.bytes_per_pixel(), 4);
    let back = buf.into_rgba_image().unwrap();
    assert_eq!(*back.get_pixel(1, 0), image::Rgba([5, 6, 7, 8]));
}

/// Surface whose storage can disagree with its reported size.
#[derive(Debug)]
struct Ragged {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelSurface for Ragged {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn bytes_per_pixel(&self) -> usize {
        4
    }

    fn byte_len(&self) -> usize {
        self.data.len()
    }

    fn copy_pixel_from(&mut self, src: &Self, c: Coord) {
        let start = ((c.y * self.width + c.x) * 4) as usize;
        self.data[start..start + 4].copy_from_slice(&src.data[start..start + 4]);
    }

    fn copy_all_from(&mut self, src: &Self) {
        self.data.copy_from_slice(&src.data);
    }
}

#[test]
fn binding_rejects_short_storage() {
    let full = |v| Ragged {
        width: 4,
        height: 4,
        data: vec![v; 64],
    };
    let a = full(0);
    let short = Ragged {
        width: 4,
        height: 4,
        data: vec![1; 8],
    };
    let mut out = full(0);
    let err = FrameBinding::new(&a, &short, &mut out).unwrap_err();
    assert!(matches!(err, DissolveError::BufferMismatch(_)));
    assert!(err.to_string().contains("incoming holds 8 bytes"));

    let mut short_out = Ragged {
        width: 4,
        height: 4,
        data: vec![0; 65],
    };
    assert!(matches!(
        FrameBinding::new(&a, &a, &mut short_out),
        Err(DissolveError::BufferMismatch(_))
    ));
    assert!(FrameBinding::new(&short, &a, &mut out).is_err());

    let b = full(1);
    assert!(FrameBinding::new(&a, &b, &mut out).is_ok());
}

#[test]
fn mutable_access_keeps_buffer_length() {
    let mut buf = PixelBuffer::new(2, 2, 4).unwrap();
    buf.data_mut()[4..8].copy_from_slice(&[1, 2, 3, 4]);
    assert_eq!(buf.pixel(Coord::new(1, 0)), &[1, 2, 3, 4]);
    assert_eq!(buf.byte_len(), 16);
    assert_eq!(buf.into_raw().len(), 16);
}
