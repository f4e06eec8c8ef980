use sdl2::keyboard::Scancode;

use chip8_vm::constants::KEY_COUNT;

/// Physical keys for each hex key, indexed by keypad value.
///
/// The hex keypad sits on the left four alphanumeric columns. Scancodes are
/// positional, so the layout holds on AZERTY or Dvorak keyboards too.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|      |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
const KEYMAP: [Scancode; KEY_COUNT] = [
    Scancode::X,
    Scancode::Num1,
    Scancode::Num2,
    Scancode::Num3,
    Scancode::Q,
    Scancode::W,
    Scancode::E,
    Scancode::A,
    Scancode::S,
    Scancode::D,
    Scancode::Z,
    Scancode::C,
    Scancode::Num4,
    Scancode::R,
    Scancode::F,
    Scancode::V,
];

/// The hex key bound to `scancode`, if any.
pub fn keymap(scancode: Scancode) -> Option<u8> {
    KEYMAP
        .iter()
        .position(|&bound| bound == scancode)
        .map(|key| key as u8)
}

/// Builds a full key latch from whatever is currently held down.
pub fn latch(pressed: impl Iterator<Item = Scancode>) -> [bool; KEY_COUNT] {
    let mut keys = [false; KEY_COUNT];
    for key in pressed.filter_map(keymap) {
        keys[key as usize] = true;
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keymap_corners() {
        assert_eq!(keymap(Scancode::Num1), Some(0x1));
        assert_eq!(keymap(Scancode::Num4), Some(0xC));
        assert_eq!(keymap(Scancode::Z), Some(0xA));
        assert_eq!(keymap(Scancode::V), Some(0xF));
        assert_eq!(keymap(Scancode::X), Some(0x0));
    }

    #[test]
    fn test_keymap_unbound() {
        assert_eq!(keymap(Scancode::Space), None);
        assert_eq!(keymap(Scancode::Num5), None);
    }

    #[test]
    fn test_keymap_is_a_bijection() {
        for (key, &scancode) in KEYMAP.iter().enumerate() {
            assert_eq!(keymap(scancode), Some(key as u8));
        }
    }

    #[test]
    fn test_latch_ignores_unbound_keys() {
        let keys = latch([Scancode::W, Scancode::Space, Scancode::V].into_iter());
        let pressed: Vec<usize> = (0..KEY_COUNT).filter(|&k| keys[k]).collect();
        assert_eq!(pressed, vec![0x5, 0xF]);
    }
}
