//! 16-bit PNG dumps of test images
//!
//! One, two and three channel [`Image16`]s map to 16-bit grayscale,
//! grayscale + alpha and RGB PNGs. Samples are stored big-endian as PNG
//! requires.

use crate::error::{TestError, TestResult};
use bilat_core::Image16;
use png::{BitDepth, ColorType, Decoder, Encoder};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, Write};
use std::path::Path;

fn color_type(channels: usize) -> TestResult<ColorType> {
    match channels {
        1 => Ok(ColorType::Grayscale),
        2 => Ok(ColorType::GrayscaleAlpha),
        3 => Ok(ColorType::Rgb),
        4 => Ok(ColorType::Rgba),
        n => Err(TestError::Unsupported(format!("{n} channels"))),
    }
}

/// Encode an image as a 16-bit PNG.
pub fn write_png16<W: Write>(image: &Image16, writer: W) -> TestResult<()> {
    let write_err = |e: png::EncodingError| TestError::ImageWrite {
        path: String::new(),
        message: e.to_string(),
    };
    let (w, h) = image.dimensions();
    let width = u32::try_from(w).map_err(|_| TestError::Unsupported(format!("width {w}")))?;
    let height = u32::try_from(h).map_err(|_| TestError::Unsupported(format!("height {h}")))?;

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type(image.channels())?);
    encoder.set_depth(BitDepth::Sixteen);
    let mut writer = encoder.write_header().map_err(write_err)?;

    let data: Vec<u8> = image.data().iter().flat_map(|v| v.to_be_bytes()).collect();
    writer.write_image_data(&data).map_err(write_err)?;
    Ok(())
}

/// Decode a 16-bit PNG written by [`write_png16`].
pub fn read_png16<R: BufRead + Seek>(reader: R) -> TestResult<Image16> {
    let load_err = |message: String| TestError::ImageLoad {
        path: String::new(),
        message,
    };
    let decoder = Decoder::new(reader);
    let mut reader = decoder.read_info().map_err(|e| load_err(e.to_string()))?;

    let info = reader.info();
    let (width, height) = (info.width as usize, info.height as usize);
    if info.bit_depth != BitDepth::Sixteen {
        return Err(TestError::Unsupported(format!("bit depth {:?}", info.bit_depth)));
    }
    let channels = match info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        other => return Err(TestError::Unsupported(format!("color type {other:?}"))),
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| load_err("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| load_err(e.to_string()))?;
    let samples = buf[..output_info.buffer_size()]
        .chunks_exact(2)
        .map(|b| u16::from_be_bytes([b[0], b[1]]))
        .collect();
    Ok(Image16::from_data(width, height, channels, samples)?)
}

/// Write an image to a PNG file.
pub fn write_image(image: &Image16, path: impl AsRef<Path>) -> TestResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_png16(image, BufWriter::new(file)).map_err(|e| with_path(e, path))
}

/// Read an image from a PNG file.
pub fn read_image(path: impl AsRef<Path>) -> TestResult<Image16> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_png16(BufReader::new(file)).map_err(|e| with_path(e, path))
}

fn with_path(e: TestError, path: &Path) -> TestError {
    let path = path.display().to_string();
    match e {
        TestError::ImageLoad { message, .. } => TestError::ImageLoad { path, message },
        TestError::ImageWrite { message, .. } => TestError::ImageWrite { path, message },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png16_roundtrip_gray() {
        let data = (0..12u32).map(|i| (i * 5000) as u16).collect();
        let img = Image16::from_data(4, 3, 1, data).unwrap();
        let mut buffer = Vec::new();
        write_png16(&img, &mut buffer).unwrap();
        let back = read_png16(Cursor::new(buffer)).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn test_png16_roundtrip_rgb() {
        let mut img = Image16::new(3, 2, 3).unwrap();
        img.set(0, 0, 0, 0xffff).unwrap();
        img.set(2, 1, 2, 0x0102).unwrap();
        let mut buffer = Vec::new();
        write_png16(&img, &mut buffer).unwrap();
        let back = read_png16(Cursor::new(buffer)).unwrap();
        assert_eq!(back, img);
    }
}
