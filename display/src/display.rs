use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;

use chip8_vm::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8_vm::FrameBuffer;

/// RGB24 colours for lit and unlit pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub on: [u8; 3],
    pub off: [u8; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            on: [0xFF; 3],
            off: [0x00; 3],
        }
    }
}

/// # Display
/// The Chip-8 display is composed of 64x32 pixels black/white pixels.
/// The on/off state of these pixels is encoded as 1/0 respectively in a 2d array.
/// The display only gets a call to `render` when the Chip-8 FrameBuffer is updated.
pub struct Display {
    canvas: WindowCanvas,
    palette: Palette,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "Chip-8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window
            .into_canvas()
            .build()
            .map_err(|e| e.to_string())?;

        Ok(Display {
            canvas,
            palette: Palette::default(),
        })
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 texture is a 1D array of ints that represent concatenated rows of RGB pixels.
    ///
    /// This flattens the 2D frame buffer by concatenating its rows and swaps
    /// each pixel for its three palette bytes.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    /// * `palette` the colours to paint with
    fn frame_to_sdl_texture(frame: &FrameBuffer, palette: &Palette) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|&pixel| if pixel == 0 { palette.off } else { palette.on })
            .collect()
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        let pixels = Display::frame_to_sdl_texture(frame, &self.palette);
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            for (row, line) in pixels.chunks(DISPLAY_WIDTH * 3).enumerate() {
                buffer[row * pitch..row * pitch + line.len()].copy_from_slice(line);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_to_sdl_texture() {
        let mut frame: FrameBuffer = [[0; 64]; 32];
        frame[0][0..2].copy_from_slice(&[0, 1]);
        frame[1][0..2].copy_from_slice(&[1, 0]);
        let frame = Display::frame_to_sdl_texture(&frame, &Palette::default());

        let mut expected: Vec<u8> = vec![0; 6144];
        expected[0..6].copy_from_slice(&[0, 0, 0, 255, 255, 255]);
        expected[192..198].copy_from_slice(&[255, 255, 255, 0, 0, 0]);

        assert_eq!(frame, expected);
    }

    #[test]
    fn test_frame_to_sdl_texture_uses_palette() {
        let mut frame: FrameBuffer = [[0; 64]; 32];
        frame[0][1] = 1;
        let palette = Palette {
            on: [0x33, 0xFF, 0x66],
            off: [0x10, 0x10, 0x10],
        };
        let texture = Display::frame_to_sdl_texture(&frame, &palette);
        assert_eq!(texture[0..6], [0x10, 0x10, 0x10, 0x33, 0xFF, 0x66]);
    }
}
