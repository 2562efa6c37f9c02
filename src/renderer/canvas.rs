/// Mutable view over an RGBA8 frame buffer with clipped drawing primitives.
pub struct Canvas<'a> {
    buf: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(buf: &'a mut [u8], width: usize, height: usize) -> Self {
        debug_assert!(buf.len() >= width * height * 4);
        Self { buf, width, height }
    }

    #[inline]
    fn offset(&self, x: isize, y: isize) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some((y as usize * self.width + x as usize) * 4)
    }

    /// Read back a pixel, `None` outside the canvas.
    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        let off = self.offset(x as isize, y as isize)?;
        Some([self.buf[off], self.buf[off + 1], self.buf[off + 2], self.buf[off + 3]])
    }

    /// Opaque write.
    #[inline]
    pub fn set(&mut self, x: isize, y: isize, rgb: [u8; 3]) {
        if let Some(off) = self.offset(x, y) {
            self.buf[off] = rgb[0];
            self.buf[off + 1] = rgb[1];
            self.buf[off + 2] = rgb[2];
            self.buf[off + 3] = 255;
        }
    }

    /// Source-over blend: dst = dst * (1 - alpha) + src * alpha.
    #[inline]
    pub fn blend(&mut self, x: isize, y: isize, rgb: [u8; 3], alpha: f64) {
        if let Some(off) = self.offset(x, y) {
            let a = alpha.clamp(0.0, 1.0);
            for ch in 0..3 {
                let dst = self.buf[off + ch] as f64;
                self.buf[off + ch] = (dst * (1.0 - a) + rgb[ch] as f64 * a).round() as u8;
            }
            self.buf[off + 3] = 255;
        }
    }

    pub fn clear(&mut self, rgb: [u8; 3]) {
        for px in self.buf.chunks_exact_mut(4) {
            px[0] = rgb[0];
            px[1] = rgb[1];
            px[2] = rgb[2];
            px[3] = 255;
        }
    }

    pub fn fill_rect(&mut self, x0: usize, y0: usize, w: usize, h: usize, rgb: [u8; 3]) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                self.set(x as isize, y as isize, rgb);
            }
        }
    }

    /// Multiply RGB by `factor` over a rectangle.
    pub fn darken_rect(&mut self, x0: usize, y0: usize, w: usize, h: usize, factor: f64) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                if let Some(off) = self.offset(x as isize, y as isize) {
                    for ch in 0..3 {
                        self.buf[off + ch] = (self.buf[off + ch] as f64 * factor) as u8;
                    }
                }
            }
        }
    }

    /// 1px rectangle outline.
    pub fn stroke_rect(&mut self, x0: usize, y0: usize, w: usize, h: usize, rgb: [u8; 3]) {
        if w == 0 || h == 0 {
            return;
        }
        let (x0, y0) = (x0 as isize, y0 as isize);
        let (x1, y1) = (x0 + w as isize - 1, y0 + h as isize - 1);
        for x in x0..=x1 {
            self.set(x, y0, rgb);
            self.set(x, y1, rgb);
        }
        for y in y0..=y1 {
            self.set(x0, y, rgb);
            self.set(x1, y, rgb);
        }
    }

    /// Bresenham line with per-pixel blending; off-canvas pixels are skipped.
    pub fn line(&mut self, x0: isize, y0: isize, x1: isize, y1: isize, rgb: [u8; 3], alpha: f64) {
        let mut cx = x0;
        let mut cy = y0;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx: isize = if x0 < x1 { 1 } else { -1 };
        let sy: isize = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.blend(cx, cy, rgb, alpha);
            if cx == x1 && cy == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                cx += sx;
            }
            if e2 <= dx {
                err += dx;
                cy += sy;
            }
        }
    }

    /// Filled disc; radius 0 is a single pixel.
    pub fn disc(&mut self, cx: isize, cy: isize, radius: isize, rgb: [u8; 3], alpha: f64) {
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r2 {
                    self.blend(cx + dx, cy + dy, rgb, alpha);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_read_back() {
        let mut buf = vec![0u8; 4 * 4 * 4];
        let mut c = Canvas::new(&mut buf, 4, 4);
        c.set(1, 2, [10, 20, 30]);
        assert_eq!(c.pixel(1, 2), Some([10, 20, 30, 255]));
        assert_eq!(c.pixel(4, 0), None);
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut buf = vec![0u8; 4 * 4 * 4];
        let mut c = Canvas::new(&mut buf, 4, 4);
        c.set(-1, 0, [255, 255, 255]);
        c.set(0, 9, [255, 255, 255]);
        c.line(-10, -10, -2, -3, [255, 0, 0], 1.0);
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_blend_halfway() {
        let mut buf = vec![0u8; 4];
        let mut c = Canvas::new(&mut buf, 1, 1);
        c.blend(0, 0, [200, 100, 50], 0.5);
        assert_eq!(c.pixel(0, 0), Some([100, 50, 25, 255]));
    }

    #[test]
    fn test_line_covers_endpoints() {
        let mut buf = vec![0u8; 10 * 10 * 4];
        let mut c = Canvas::new(&mut buf, 10, 10);
        c.line(1, 1, 8, 5, [255, 255, 255], 1.0);
        assert_eq!(c.pixel(1, 1), Some([255, 255, 255, 255]));
        assert_eq!(c.pixel(8, 5), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_darken_reduces_brightness() {
        let w = 10;
        let h = 10;
        let mut buf = vec![128u8; w * h * 4];
        let mut c = Canvas::new(&mut buf, w, h);
        c.darken_rect(2, 2, 4, 4, 0.25);
        assert_eq!(c.pixel(3, 3).map(|p| p[0]), Some(32));
        assert_eq!(c.pixel(0, 0).map(|p| p[0]), Some(128), "outside area should be unchanged");
    }

    #[test]
    fn test_stroke_rect_border_only() {
        let mut buf = vec![0u8; 6 * 6 * 4];
        let mut c = Canvas::new(&mut buf, 6, 6);
        c.stroke_rect(1, 1, 4, 4, [9, 9, 9]);
        assert_eq!(c.pixel(1, 1), Some([9, 9, 9, 255]));
        assert_eq!(c.pixel(4, 4), Some([9, 9, 9, 255]));
        assert_eq!(c.pixel(2, 2), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_disc_radius_zero_single_pixel() {
        let mut buf = vec![0u8; 5 * 5 * 4];
        let mut c = Canvas::new(&mut buf, 5, 5);
        c.disc(2, 2, 0, [1, 2, 3], 1.0);
        let lit = buf.chunks_exact(4).filter(|p| p[3] == 255).count();
        assert_eq!(lit, 1);
    }
}
