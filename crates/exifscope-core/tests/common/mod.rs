//! Shared fixtures: synthetic images with real EXIF segments and LSB payloads.

#![allow(dead_code)]

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

pub fn ascii(tag: Tag, text: &str) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![text.as_bytes().to_vec()]),
    }
}

pub fn rationals(tag: Tag, parts: &[(u32, u32)]) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Rational(
            parts
                .iter()
                .map(|&(num, denom)| Rational { num, denom })
                .collect(),
        ),
    }
}

/// Camera, lens, GPS (Eiffel Tower) and disagreeing timestamps.
pub fn full_fields() -> Vec<Field> {
    vec![
        ascii(Tag::Make, "Canon"),
        ascii(Tag::Model, "Canon EOS R5"),
        ascii(Tag::DateTime, "2023:05:02 09:00:00"),
        ascii(Tag::DateTimeOriginal, "2023:05:01 10:00:00"),
        ascii(Tag::LensModel, "RF24-105mm F4 L IS USM"),
        rationals(Tag::FocalLength, &[(50, 1)]),
        rationals(Tag::FNumber, &[(4, 1)]),
        ascii(Tag::GPSLatitudeRef, "N"),
        rationals(Tag::GPSLatitude, &[(48, 1), (51, 1), (2958, 100)]),
        ascii(Tag::GPSLongitudeRef, "E"),
        rationals(Tag::GPSLongitude, &[(2, 1), (17, 1), (4020, 100)]),
    ]
}

/// Serialize fields as a little-endian TIFF block.
pub fn tiff_bytes(fields: &[Field]) -> Vec<u8> {
    let mut writer = Writer::new();
    for field in fields {
        writer.push_field(field);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, true).unwrap();
    buf.into_inner()
}

/// A uniform grey test image. Uniform channels never decode to an LSB length prefix.
pub fn grey_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([128, 128, 128])))
}

pub fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

/// JPEG carrying `fields` in its EXIF segment.
pub fn jpeg_with_exif(fields: &[Field]) -> Vec<u8> {
    jpeg_with_tiff(&tiff_bytes(fields))
}

/// JPEG with an APP1 `Exif` segment holding `tiff` verbatim, inserted right after SOI.
pub fn jpeg_with_tiff(tiff: &[u8]) -> Vec<u8> {
    let jpeg = encode(&grey_image(16, 16), ImageFormat::Jpeg);

    let segment_len = u16::try_from(2 + 6 + tiff.len()).unwrap();
    let mut out = Vec::with_capacity(jpeg.len() + tiff.len() + 10);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(tiff);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// PNG whose pixel LSBs carry `"<len>:<message>"`.
pub fn png_with_hidden_text(message: &str) -> Vec<u8> {
    let mut img = RgbImage::from_pixel(32, 32, Rgb([90, 180, 240]));
    let stream = format!("{}:{}", message.len(), message);
    let bits = stream
        .bytes()
        .flat_map(|b| (0..8).rev().map(move |i| (b >> i) & 1));
    for (channel, bit) in img.iter_mut().zip(bits) {
        *channel = (*channel & !1) | bit;
    }
    encode(&DynamicImage::ImageRgb8(img), ImageFormat::Png)
}
