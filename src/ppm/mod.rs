//! Binary PPM (P6) reading and writing. Headers are ASCII with `#` comments
//! allowed before the raster; samples are one byte per channel, or two
//! big-endian bytes when the maxval exceeds 255.

use thiserror::Error;

use crate::binary::byte_reader::ByteReader;
use crate::colors::Rgb;
use crate::grid::{Grid2, RowMajorGrid, Traversal};
use crate::image::Image;

#[derive(Debug, Error)]
pub enum PpmError {
    #[error("not a PPM file (P6 signature missing)")]
    BadSignature,
    #[error("PPM stream ended unexpectedly: expected {0}")]
    UnexpectedEnd(&'static str),
    #[error("PPM {field} is not a valid unsigned integer")]
    BadHeaderField { field: &'static str },
    #[error("PPM maxval {0} out of range 1..=65535")]
    BadMaxval(u32),
    #[error("PPM sample {sample} at ({col}, {row}) exceeds maxval {maxval}")]
    SampleOutOfRange {
        sample: u16,
        maxval: u16,
        col: usize,
        row: usize,
    },
}

const PPM_SIGNATURE: &[u8] = b"P6";

pub fn decode_ppm(bytes: &[u8]) -> Result<Image, PpmError> {
    let mut reader = ByteReader::new(bytes);
    let signature = reader
        .read_header_symbol()
        .ok_or(PpmError::UnexpectedEnd("magic number"))?;

    if signature != PPM_SIGNATURE {
        return Err(PpmError::BadSignature);
    }

    let width = read_ascii_integer(&mut reader, "width")? as usize;
    let height = read_ascii_integer(&mut reader, "height")? as usize;
    let maxval = read_ascii_integer(&mut reader, "maxval")?;

    if maxval == 0 || maxval > u16::MAX.into() {
        return Err(PpmError::BadMaxval(maxval));
    }
    let maxval = maxval as u16;

    // Exactly one whitespace byte separates the maxval from the raster.
    reader
        .read_byte()
        .ok_or(PpmError::UnexpectedEnd("raster"))?;

    let bytes_per_sample = if maxval > 255 { 2 } else { 1 };
    let expected = width * height * 3 * bytes_per_sample;
    if reader.number_of_bytes_left() < expected {
        return Err(PpmError::UnexpectedEnd("raster"));
    }

    let mut pixels = RowMajorGrid::from_fn(width, height, |_, _| Rgb::new(0, 0, 0));
    for (col, row) in Traversal::RowMajor.positions(width, height) {
        let r = read_sample(&mut reader, maxval)?;
        let g = read_sample(&mut reader, maxval)?;
        let b = read_sample(&mut reader, maxval)?;

        for sample in [r, g, b] {
            if sample > maxval {
                return Err(PpmError::SampleOutOfRange {
                    sample,
                    maxval,
                    col,
                    row,
                });
            }
        }

        *pixels.get_mut(col, row) = Rgb::new(r, g, b);
    }

    Ok(Image::new(width, height, maxval, pixels))
}

pub fn encode_ppm(image: &Image) -> Vec<u8> {
    let mut bytes = format!(
        "P6\n{} {}\n{}\n",
        image.width, image.height, image.denominator
    )
    .into_bytes();

    for (_, _, pixel) in image.pixels.visit(Traversal::RowMajor) {
        for sample in [pixel.r, pixel.g, pixel.b] {
            if image.denominator > 255 {
                bytes.extend_from_slice(&sample.to_be_bytes());
            } else {
                bytes.push(sample as u8);
            }
        }
    }

    bytes
}

fn read_sample(reader: &mut ByteReader, maxval: u16) -> Result<u16, PpmError> {
    let sample = if maxval > 255 {
        reader.read_u16_be()
    } else {
        reader.read_byte().map(u16::from)
    };

    sample.ok_or(PpmError::UnexpectedEnd("raster"))
}

fn read_ascii_integer(reader: &mut ByteReader, field: &'static str) -> Result<u32, PpmError> {
    let bytes = reader
        .read_header_symbol()
        .ok_or(PpmError::UnexpectedEnd(field))?;

    std::str::from_utf8(bytes)
        .ok()
        .and_then(|symbol| symbol.parse::<u32>().ok())
        .ok_or(PpmError::BadHeaderField { field })
}
