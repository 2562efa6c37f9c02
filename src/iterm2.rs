//! PNG encoding of rendered frames and the iTerm2 inline image protocol.

use std::io::Write;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("png encoding failed: {0}")]
    Png(#[from] png::EncodingError),
    #[error("frame buffer holds {actual} bytes, expected {expected} for {width}x{height}")]
    BufferSize {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Encode an RGBA8 buffer as PNG bytes.
pub fn encode_png(rgba: &[u8], width: usize, height: usize) -> Result<Vec<u8>, EncodeError> {
    let expected = width * height * 4;
    if rgba.len() != expected {
        return Err(EncodeError::BufferSize { width, height, expected, actual: rgba.len() });
    }
    let mut out = Vec::with_capacity(expected / 2);
    {
        let mut encoder = png::Encoder::new(&mut out, width as u32, height as u32);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(rgba)?;
        writer.finish()?;
    }
    Ok(out)
}

/// Write an RGBA8 buffer to `path` as a PNG file.
pub fn write_png(path: &Path, rgba: &[u8], width: usize, height: usize) -> Result<(), EncodeError> {
    let bytes = encode_png(rgba, width, height)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Build the iTerm2 escape sequence `ESC ] 1337 ; File=... : <base64> BEL`
/// displaying `png` inline at its native pixel size.
pub fn inline_sequence(png: &[u8], width: usize, height: usize) -> String {
    use base64::Engine;
    let b64 = base64::engine::general_purpose::STANDARD.encode(png);
    format!(
        "\x1b]1337;File=inline=1;size={};width={}px;height={}px;preserveAspectRatio=1:{}\x07",
        png.len(),
        width,
        height,
        b64
    )
}

/// Encode `rgba` and print it to `out` as an inline image followed by a newline.
pub fn write_inline<W: Write>(out: &mut W, rgba: &[u8], width: usize, height: usize) -> Result<(), EncodeError> {
    let png = encode_png(rgba, width, height)?;
    out.write_all(inline_sequence(&png, width, height).as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_rgba(width: usize, height: usize) -> Vec<u8> {
        let mut buf = vec![0u8; width * height * 4];
        for y in 0..height {
            for x in 0..width {
                let off = (y * width + x) * 4;
                buf[off] = (x * 255 / width.max(1)) as u8;
                buf[off + 1] = (y * 255 / height.max(1)) as u8;
                buf[off + 2] = 128;
                buf[off + 3] = 255;
            }
        }
        buf
    }

    fn decode(png_bytes: &[u8]) -> (png::OutputInfo, Vec<u8>) {
        let decoder = png::Decoder::new(png_bytes);
        let mut reader = decoder.read_info().unwrap();
        let mut img = vec![0u8; reader.output_buffer_size()];
        let info = reader.next_frame(&mut img).unwrap();
        img.truncate(info.buffer_size());
        (info, img)
    }

    #[test]
    fn test_png_roundtrip_preserves_pixels() {
        let rgba = make_test_rgba(7, 5);
        let bytes = encode_png(&rgba, 7, 5).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        let (info, img) = decode(&bytes);
        assert_eq!(info.width, 7);
        assert_eq!(info.height, 5);
        assert_eq!(img, rgba);
    }

    #[test]
    fn test_buffer_size_mismatch_rejected() {
        let rgba = vec![0u8; 10];
        let err = encode_png(&rgba, 4, 4).unwrap_err();
        assert!(matches!(err, EncodeError::BufferSize { expected: 64, actual: 10, .. }));
    }

    #[test]
    fn test_inline_sequence_framing() {
        let rgba = make_test_rgba(4, 3);
        let png = encode_png(&rgba, 4, 3).unwrap();
        let seq = inline_sequence(&png, 4, 3);
        assert!(seq.starts_with("\x1b]1337;File=inline=1;"));
        assert!(seq.ends_with('\x07'));
        assert!(seq.contains(&format!("size={}", png.len())));
        assert!(seq.contains("width=4px;height=3px"));
    }

    #[test]
    fn test_inline_payload_decodes_to_png() {
        use base64::Engine;
        let rgba = make_test_rgba(6, 6);
        let mut out = Vec::new();
        write_inline(&mut out, &rgba, 6, 6).unwrap();
        let text = String::from_utf8(out).unwrap();
        let payload = text
            .trim_end()
            .trim_end_matches('\x07')
            .rsplit(':')
            .next()
            .unwrap();
        let png_bytes = base64::engine::general_purpose::STANDARD.decode(payload).unwrap();
        let (_, img) = decode(&png_bytes);
        assert_eq!(img, rgba);
    }

    #[test]
    fn test_write_png_file() {
        let path = std::env::temp_dir().join(format!("windtower-{}-snap.png", std::process::id()));
        let rgba = make_test_rgba(3, 2);
        write_png(&path, &rgba, 3, 2).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        let (info, _) = decode(&bytes);
        assert_eq!((info.width, info.height), (3, 2));
        let _ = std::fs::remove_file(path);
    }
}
