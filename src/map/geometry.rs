use glam::DVec2;

use crate::braille::BrailleCanvas;

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        canvas.set_pixel_signed(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Outline a closed pixel-space ring, scaled by `scale`
pub fn draw_ring(canvas: &mut BrailleCanvas, ring: &[DVec2], scale: f64) {
    let Some(&last) = ring.last() else {
        return;
    };

    let to_pixel = |p: DVec2| {
        let p = (p * scale).round();
        (p.x as i32, p.y as i32)
    };

    let mut prev = to_pixel(last);
    for &point in ring {
        let current = to_pixel(point);
        if current != prev {
            draw_line(canvas, prev.0, prev.1, current.0, current.1);
        }
        prev = current;
    }
}

/// Draw a filled circle (for city markers)
pub fn draw_circle(canvas: &mut BrailleCanvas, cx: i32, cy: i32, radius: i32) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                canvas.set_pixel_signed(cx + dx, cy + dy);
            }
        }
    }
}
