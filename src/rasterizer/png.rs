//! PNG encoding: signature, IHDR, a single IDAT, IEND
//!
//! Output is 8-bit RGBA, unfiltered scanlines, zlib at maximum compression.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use super::types::Color;
use crate::error::Result;

pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

const BIT_DEPTH: u8 = 8;
const COLOR_TYPE_RGBA: u8 = 6;
const FILTER_NONE: u8 = 0;

/// Append one chunk: length, type, data, CRC-32 over type and data
fn write_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    let mut crc = crc32fast::Hasher::new();
    crc.update(kind);
    crc.update(data);

    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    out.extend_from_slice(&crc.finalize().to_be_bytes());
}

fn header(width: u32, height: u32) -> [u8; 13] {
    let mut ihdr = [0u8; 13];
    ihdr[0..4].copy_from_slice(&width.to_be_bytes());
    ihdr[4..8].copy_from_slice(&height.to_be_bytes());
    ihdr[8] = BIT_DEPTH;
    ihdr[9] = COLOR_TYPE_RGBA;
    // compression, filter and interlace methods stay 0
    ihdr
}

/// Raw scanlines: each storage row prefixed with filter byte 0
fn scanlines(width: u32, pixels: &[Color]) -> Vec<u8> {
    let row_len = width as usize;
    let mut raw = Vec::with_capacity(pixels.len() * 4 + pixels.len() / row_len.max(1));
    for row in pixels.chunks(row_len) {
        raw.push(FILTER_NONE);
        for p in row {
            raw.extend_from_slice(&p.to_bytes());
        }
    }
    raw
}

/// Encode `pixels` (row-major, top row first) as a PNG file image
pub fn encode(width: u32, height: u32, pixels: &[Color]) -> Result<Vec<u8>> {
    debug_assert_eq!(pixels.len(), width as usize * height as usize);

    let mut zlib = ZlibEncoder::new(Vec::new(), Compression::best());
    zlib.write_all(&scanlines(width, pixels))?;
    let compressed = zlib.finish()?;

    let mut out = Vec::with_capacity(SIGNATURE.len() + compressed.len() + 3 * 12 + 13);
    out.extend_from_slice(&SIGNATURE);
    write_chunk(&mut out, b"IHDR", &header(width, height));
    write_chunk(&mut out, b"IDAT", &compressed);
    write_chunk(&mut out, b"IEND", &[]);
    Ok(out)
}
