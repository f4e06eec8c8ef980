use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// The FrameBuffer is indexed as [y][x]; each pixel is 0 or 1.
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

const PIXEL_COUNT: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT;

pub fn blank() -> FrameBuffer {
    [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT]
}

/// XORs `rows` onto the frame buffer with its top left corner at (x, y).
/// Returns whether any lit pixel was erased.
///
/// Only the origin wraps onto the screen. Past that, pixels are laid out
/// along the row-major buffer: a sprite running off the right edge carries
/// on from the left of the next row, and one running off the bottom
/// carries on from the top.
pub fn draw_sprite(frame_buffer: &mut FrameBuffer, x: u8, y: u8, rows: &[u8]) -> bool {
    let origin_x = x as usize % DISPLAY_WIDTH;
    let origin_y = y as usize % DISPLAY_HEIGHT;
    let mut collision = false;

    for (row, byte) in rows.iter().enumerate() {
        for bit in 0..8 {
            let sprite_pixel = (byte >> (7 - bit)) & 1;
            if sprite_pixel == 0 {
                continue;
            }
            let index = (origin_x + bit + (origin_y + row) * DISPLAY_WIDTH) % PIXEL_COUNT;
            let pixel = &mut frame_buffer[index / DISPLAY_WIDTH][index % DISPLAY_WIDTH];
            collision |= *pixel == 1;
            *pixel ^= 1;
        }
    }

    collision
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_sets_pixels_msb_first() {
        let mut fb = blank();
        let collision = draw_sprite(&mut fb, 1, 1, &[0b1010_0000]);
        assert!(!collision);
        assert_eq!(fb[1][1..5], [1, 0, 1, 0]);
    }

    #[test]
    fn test_draw_xors() {
        let mut fb = blank();
        // 0 1 0 1 -> Set
        fb[0][0..4].copy_from_slice(&[0, 1, 0, 1]);
        // 1 1 0 0 -> Draw xor
        let collision = draw_sprite(&mut fb, 0, 0, &[0b1100_0000]);
        assert!(collision);
        assert_eq!(fb[0][0..4], [1, 0, 0, 1]);
    }

    #[test]
    fn test_later_blank_bits_keep_collision() {
        let mut fb = blank();
        fb[0][0] = 1;
        // the first bit collides, the rest of the sprite lands on empty pixels
        let collision = draw_sprite(&mut fb, 0, 0, &[0xFF, 0xFF]);
        assert!(collision);
    }

    #[test]
    fn test_origin_wraps() {
        let mut fb = blank();
        draw_sprite(&mut fb, 64 + 2, 32 + 3, &[0x80]);
        assert_eq!(fb[3][2], 1);
    }

    #[test]
    fn test_right_edge_continues_on_next_row() {
        let mut fb = blank();
        draw_sprite(&mut fb, 60, 0, &[0xFF]);
        assert_eq!(fb[0][60..64], [1, 1, 1, 1]);
        assert_eq!(fb[1][0..4], [1, 1, 1, 1]);
        assert_eq!(fb[0][0..4], [0, 0, 0, 0]);
    }

    #[test]
    fn test_bottom_edge_continues_at_top() {
        let mut fb = blank();
        draw_sprite(&mut fb, 0, 31, &[0x80, 0x80]);
        assert_eq!(fb[31][0], 1);
        assert_eq!(fb[0][0], 1);
    }

    #[test]
    fn test_draw_twice_restores() {
        let mut fb = blank();
        fb[5][10] = 1;
        let before = fb;
        let glyph = [0xF0, 0x90, 0x90, 0x90, 0xF0];
        draw_sprite(&mut fb, 8, 4, &glyph);
        assert!(draw_sprite(&mut fb, 8, 4, &glyph));
        assert_eq!(fb, before);
    }
}
