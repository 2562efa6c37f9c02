use super::canvas::Canvas;
use super::RenderConfig;

/// 5x7 bitmap font metrics and status bar layout.
pub(crate) const FONT_WIDTH: usize = 5;
pub(crate) const FONT_HEIGHT: usize = 7;
pub(crate) const STATUS_PAD_TOP: usize = 3;
pub(crate) const STATUS_PAD_BOTTOM: usize = 2;
pub(crate) const STATUS_BAR_HEIGHT: usize = STATUS_PAD_TOP + FONT_HEIGHT + STATUS_PAD_BOTTOM;

const STATUS_BG: [u8; 3] = [0x0D, 0x0D, 0x0D];
const STATUS_RULE: [u8; 3] = [0x33, 0x33, 0x33];
const STATUS_TEXT: [u8; 3] = [0x88, 0x88, 0x88];

/// Glyph rows, lower 5 bits = pixels (bit4 = left). Uppercase folds to lowercase.
pub(crate) const fn glyph(ch: u8) -> [u8; FONT_HEIGHT] {
    match ch.to_ascii_lowercase() {
        b' ' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        b'.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x00],
        b'-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        b'/' => [0x01, 0x02, 0x02, 0x04, 0x08, 0x08, 0x10],
        b'>' => [0x10, 0x08, 0x04, 0x02, 0x04, 0x08, 0x10],
        b'=' => [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00],
        b'[' => [0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E],
        b']' => [0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E],
        b'|' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        b':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        b',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        b'(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        b')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        b'^' => [0x04, 0x0A, 0x11, 0x00, 0x00, 0x00, 0x00],
        b'<' => [0x01, 0x02, 0x04, 0x08, 0x04, 0x02, 0x01],
        b'0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        b'1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        b'2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        b'3' => [0x0E, 0x11, 0x01, 0x06, 0x01, 0x11, 0x0E],
        b'4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        b'5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        b'6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        b'7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        b'8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        b'9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        b'a' => [0x00, 0x00, 0x0E, 0x01, 0x0F, 0x11, 0x0F],
        b'b' => [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x1E],
        b'c' => [0x00, 0x00, 0x0E, 0x10, 0x10, 0x11, 0x0E],
        b'd' => [0x01, 0x01, 0x0D, 0x13, 0x11, 0x11, 0x0F],
        b'e' => [0x00, 0x00, 0x0E, 0x11, 0x1F, 0x10, 0x0E],
        b'f' => [0x06, 0x09, 0x08, 0x1C, 0x08, 0x08, 0x08],
        b'g' => [0x00, 0x00, 0x0F, 0x11, 0x0F, 0x01, 0x0E],
        b'h' => [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x11],
        b'i' => [0x04, 0x00, 0x0C, 0x04, 0x04, 0x04, 0x0E],
        b'j' => [0x02, 0x00, 0x06, 0x02, 0x02, 0x12, 0x0C],
        b'k' => [0x10, 0x10, 0x12, 0x14, 0x18, 0x14, 0x12],
        b'l' => [0x0C, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        b'm' => [0x00, 0x00, 0x1A, 0x15, 0x15, 0x11, 0x11],
        b'n' => [0x00, 0x00, 0x16, 0x19, 0x11, 0x11, 0x11],
        b'o' => [0x00, 0x00, 0x0E, 0x11, 0x11, 0x11, 0x0E],
        b'p' => [0x00, 0x00, 0x1E, 0x11, 0x1E, 0x10, 0x10],
        b'q' => [0x00, 0x00, 0x0D, 0x13, 0x0F, 0x01, 0x01],
        b'r' => [0x00, 0x00, 0x16, 0x19, 0x10, 0x10, 0x10],
        b's' => [0x00, 0x00, 0x0E, 0x10, 0x0E, 0x01, 0x1E],
        b't' => [0x08, 0x08, 0x1C, 0x08, 0x08, 0x09, 0x06],
        b'u' => [0x00, 0x00, 0x11, 0x11, 0x11, 0x13, 0x0D],
        b'v' => [0x00, 0x00, 0x11, 0x11, 0x11, 0x0A, 0x04],
        b'w' => [0x00, 0x00, 0x11, 0x11, 0x15, 0x15, 0x0A],
        b'x' => [0x00, 0x00, 0x11, 0x0A, 0x04, 0x0A, 0x11],
        b'y' => [0x00, 0x00, 0x11, 0x11, 0x0F, 0x01, 0x0E],
        b'z' => [0x00, 0x00, 0x1F, 0x02, 0x04, 0x08, 0x1F],
        _ => [0x00; FONT_HEIGHT],
    }
}

/// Draw `text` with each glyph scaled to `cw` x `ch` pixels (nearest neighbor).
/// Returns the x position after the last character.
pub(crate) fn draw_text_sized(canvas: &mut Canvas, x: usize, y: usize, text: &str, color: [u8; 3], cw: usize, ch: usize) -> usize {
    let char_step = if cw == FONT_WIDTH { FONT_WIDTH + 1 } else { cw + cw / 5 + 1 };
    let mut cx = x;
    for &byte in text.as_bytes() {
        let g = glyph(byte);
        for py in 0..ch {
            let bits = g[py * FONT_HEIGHT / ch];
            for px in 0..cw {
                let col = px * FONT_WIDTH / cw;
                if bits & (1 << (FONT_WIDTH - 1 - col)) != 0 {
                    canvas.set((cx + px) as isize, (y + py) as isize, color);
                }
            }
        }
        cx += char_step;
    }
    cx
}

/// Draw `text` at native 5x7 size. Returns the x position after the last character.
pub(crate) fn draw_text(canvas: &mut Canvas, x: usize, y: usize, text: &str, color: [u8; 3]) -> usize {
    draw_text_sized(canvas, x, y, text, color, FONT_WIDTH, FONT_HEIGHT)
}

/// Pixel width of `text` at native size.
pub(crate) fn text_width(text: &str) -> usize {
    text.len() * (FONT_WIDTH + 1)
}

/// Fill the status bar under the display area and print `text`, truncated to fit.
pub fn render_status(canvas: &mut Canvas, cfg: &RenderConfig, text: &str) {
    let fw = cfg.frame_width;
    let y_start = cfg.display_height;

    canvas.fill_rect(0, y_start, fw, cfg.frame_height - y_start, STATUS_BG);
    canvas.fill_rect(0, y_start, fw, 1, STATUS_RULE);

    let avail = fw.saturating_sub(8);
    if text_width(text) <= avail {
        draw_text(canvas, 4, y_start + STATUS_PAD_TOP, text, STATUS_TEXT);
    } else {
        let shown: String = text.chars().take(avail / (FONT_WIDTH + 1)).collect();
        draw_text(canvas, 4, y_start + STATUS_PAD_TOP, &shown, STATUS_TEXT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> RenderConfig {
        RenderConfig::fit(320, 200)
    }

    #[test]
    fn test_glyph_case_folding() {
        assert_eq!(glyph(b'Q'), glyph(b'q'));
        assert!(glyph(b':').iter().any(|&row| row != 0));
        assert!(glyph(b'(').iter().any(|&row| row != 0));
    }

    #[test]
    fn test_unknown_glyph_blank() {
        assert_eq!(glyph(b'~'), [0x00; FONT_HEIGHT]);
    }

    #[test]
    fn test_draw_text_returns_end_position() {
        let cfg = test_config();
        let mut buf = vec![0u8; cfg.frame_width * cfg.frame_height * 4];
        let mut canvas = Canvas::new(&mut buf, cfg.frame_width, cfg.frame_height);
        let end_x = draw_text(&mut canvas, 10, 10, "hello", [0xFF, 0xFF, 0xFF]);
        assert_eq!(end_x, 10 + 5 * (FONT_WIDTH + 1));
        assert_eq!(end_x - 10, text_width("hello"));

        let mut found = false;
        for y in 10..10 + FONT_HEIGHT {
            for x in 10..end_x {
                if canvas.pixel(x, y).map_or(false, |p| p[0] != 0) {
                    found = true;
                }
            }
        }
        assert!(found, "draw_text should have drawn some pixels");
    }

    #[test]
    fn test_render_status_separator_line() {
        let cfg = test_config();
        let mut buf = vec![0u8; cfg.frame_width * cfg.frame_height * 4];
        let mut canvas = Canvas::new(&mut buf, cfg.frame_width, cfg.frame_height);
        render_status(&mut canvas, &cfg, "re=45000");
        assert_eq!(canvas.pixel(0, cfg.display_height), Some([0x33, 0x33, 0x33, 255]));
        assert_eq!(canvas.pixel(0, cfg.frame_height - 1), Some([0x0D, 0x0D, 0x0D, 255]));
    }

    #[test]
    fn test_render_status_truncates_long_text() {
        let cfg = test_config();
        let mut buf = vec![0u8; cfg.frame_width * cfg.frame_height * 4];
        let mut canvas = Canvas::new(&mut buf, cfg.frame_width, cfg.frame_height);
        let long = "x".repeat(500);
        render_status(&mut canvas, &cfg, &long);
        // Rightmost 4 columns stay background.
        let y = cfg.display_height + STATUS_PAD_TOP + 3;
        assert_eq!(canvas.pixel(cfg.frame_width - 1, y), Some([0x0D, 0x0D, 0x0D, 255]));
    }
}
