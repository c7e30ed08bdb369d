//! Host key → Spectrum matrix mapping.
//!
//! ```text
//! Row  Port   Bit0   Bit1   Bit2  Bit3  Bit4
//!  0   $FEFE  CAPS   Z      X     C     V
//!  1   $FDFE  A      S      D     F     G
//!  2   $FBFE  Q      W      E     R     T
//!  3   $F7FE  1      2      3     4     5
//!  4   $EFFE  0      9      8     7     6
//!  5   $DFFE  P      O      I     U     Y
//!  6   $BFFE  ENTER  L      K     J     H
//!  7   $7FFE  SPACE  SYM    M     N     B
//! ```

use emu_core::KeyCode;

const CAPS: (usize, u8) = (0, 0);
const SYMBOL: (usize, u8) = (7, 1);

/// Matrix positions pressed by a host key.
///
/// Most keys close one switch. Backspace and the cursor keys close two, the
/// way the Spectrum+ keyboard wires DELETE and the arrows to CAPS SHIFT plus
/// a digit. Unmapped keys (Escape included) return an empty slice.
#[must_use]
pub fn map_key(key: KeyCode) -> &'static [(usize, u8)] {
    match key {
        KeyCode::ShiftLeft => &[CAPS],
        KeyCode::KeyZ => &[(0, 1)],
        KeyCode::KeyX => &[(0, 2)],
        KeyCode::KeyC => &[(0, 3)],
        KeyCode::KeyV => &[(0, 4)],

        KeyCode::KeyA => &[(1, 0)],
        KeyCode::KeyS => &[(1, 1)],
        KeyCode::KeyD => &[(1, 2)],
        KeyCode::KeyF => &[(1, 3)],
        KeyCode::KeyG => &[(1, 4)],

        KeyCode::KeyQ => &[(2, 0)],
        KeyCode::KeyW => &[(2, 1)],
        KeyCode::KeyE => &[(2, 2)],
        KeyCode::KeyR => &[(2, 3)],
        KeyCode::KeyT => &[(2, 4)],

        KeyCode::Digit1 => &[(3, 0)],
        KeyCode::Digit2 => &[(3, 1)],
        KeyCode::Digit3 => &[(3, 2)],
        KeyCode::Digit4 => &[(3, 3)],
        KeyCode::Digit5 => &[(3, 4)],

        KeyCode::Digit0 => &[(4, 0)],
        KeyCode::Digit9 => &[(4, 1)],
        KeyCode::Digit8 => &[(4, 2)],
        KeyCode::Digit7 => &[(4, 3)],
        KeyCode::Digit6 => &[(4, 4)],

        KeyCode::KeyP => &[(5, 0)],
        KeyCode::KeyO => &[(5, 1)],
        KeyCode::KeyI => &[(5, 2)],
        KeyCode::KeyU => &[(5, 3)],
        KeyCode::KeyY => &[(5, 4)],

        KeyCode::Enter => &[(6, 0)],
        KeyCode::KeyL => &[(6, 1)],
        KeyCode::KeyK => &[(6, 2)],
        KeyCode::KeyJ => &[(6, 3)],
        KeyCode::KeyH => &[(6, 4)],

        KeyCode::Space => &[(7, 0)],
        KeyCode::ShiftRight | KeyCode::ControlLeft | KeyCode::ControlRight => &[SYMBOL],
        KeyCode::KeyM => &[(7, 2)],
        KeyCode::KeyN => &[(7, 3)],
        KeyCode::KeyB => &[(7, 4)],

        // CAPS SHIFT combinations
        KeyCode::Backspace => &[CAPS, (4, 0)],
        KeyCode::ArrowLeft => &[CAPS, (3, 4)],
        KeyCode::ArrowDown => &[CAPS, (4, 4)],
        KeyCode::ArrowUp => &[CAPS, (4, 3)],
        KeyCode::ArrowRight => &[CAPS, (4, 2)],

        KeyCode::Escape => &[],
    }
}
