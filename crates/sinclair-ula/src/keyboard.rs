//! ZX Spectrum keyboard matrix.
//!
//! The keyboard is an 8×5 matrix of half-rows, read via port $FE. The high
//! byte of the port address selects which half-rows to scan: each cleared
//! bit (A8-A15) enables one half-row.
//!
//! # Half-row layout
//!
//! | Addr bit | Row | Keys (bit 0-4)                |
//! |----------|-----|-------------------------------|
//! | A8       | 0   | Caps, Z, X, C, V             |
//! | A9       | 1   | A, S, D, F, G                |
//! | A10      | 2   | Q, W, E, R, T                |
//! | A11      | 3   | 1, 2, 3, 4, 5                |
//! | A12      | 4   | 0, 9, 8, 7, 6                |
//! | A13      | 5   | P, O, I, U, Y                |
//! | A14      | 6   | Enter, L, K, J, H            |
//! | A15      | 7   | Space, Sym, M, N, B          |

/// Number of half-rows in the matrix.
pub const ROWS: usize = 8;

/// Keys per half-row.
pub const KEYS_PER_ROW: u8 = 5;

/// Row value with every key released.
const ROW_RELEASED: u8 = 0x1F;

/// Keyboard matrix state, stored the way the port reads it.
///
/// Bits 0-4 of each row: 0 = pressed, 1 = released. Bits 5-7 are always 0,
/// so a row is always in `0x00..=0x1F`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMatrix {
    rows: [u8; ROWS],
}

impl KeyMatrix {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: [ROW_RELEASED; ROWS],
        }
    }

    /// Press or release the key at `row` (0-7), `bit` (0-4).
    ///
    /// Positions outside the matrix are ignored.
    pub fn set(&mut self, row: usize, bit: u8, pressed: bool) {
        if row >= ROWS || bit >= KEYS_PER_ROW {
            return;
        }
        if pressed {
            self.rows[row] &= !(1 << bit);
        } else {
            self.rows[row] |= 1 << bit;
        }
    }

    /// Release every key.
    pub fn reset_all(&mut self) {
        self.rows = [ROW_RELEASED; ROWS];
    }

    /// Raw value of one half-row (active low, bits 0-4).
    ///
    /// Rows outside the matrix read as fully released.
    #[must_use]
    pub fn row(&self, row: usize) -> u8 {
        self.rows.get(row).copied().unwrap_or(ROW_RELEASED)
    }

    /// Scan the half-rows enabled by `selector`.
    ///
    /// `selector` has a bit set for every row to scan (the complement of the
    /// port's high byte). Selected rows are wire-ANDed together: a key held
    /// in any of them pulls its column low. Bits 5-7 float high.
    #[must_use]
    pub fn scan(&self, selector: u8) -> u8 {
        let mut result = 0xFF;
        for (row, &value) in self.rows.iter().enumerate() {
            if selector & (1 << row) != 0 {
                result &= value;
            }
        }
        result | 0xE0
    }
}

impl Default for KeyMatrix {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_all_released() {
        let keys = KeyMatrix::new();
        for row in 0..ROWS {
            assert_eq!(keys.row(row), 0x1F);
        }
    }

    #[test]
    fn press_clears_bit_release_sets_it() {
        let mut keys = KeyMatrix::new();
        keys.set(1, 0, true); // A
        assert_eq!(keys.row(1), 0x1E);

        keys.set(1, 0, false);
        assert_eq!(keys.row(1), 0x1F);
    }

    #[test]
    fn press_release_round_trip_restores_row() {
        let mut keys = KeyMatrix::new();
        keys.set(6, 0, true);
        keys.set(6, 3, true);
        let before = keys.row(6);

        keys.set(6, 2, true);
        keys.set(6, 2, false);
        assert_eq!(keys.row(6), before);
    }

    #[test]
    fn out_of_range_positions_ignored() {
        let mut keys = KeyMatrix::new();
        keys.set(8, 0, true);
        keys.set(0, 5, true);
        keys.set(0, 7, true);
        assert_eq!(keys, KeyMatrix::new());
    }

    #[test]
    fn out_of_range_row_reads_released() {
        let mut keys = KeyMatrix::new();
        keys.set(0, 0, true);
        assert_eq!(keys.row(ROWS), 0x1F);
        assert_eq!(keys.row(usize::MAX), 0x1F);
    }

    #[test]
    fn rows_never_leave_five_bit_range() {
        let mut keys = KeyMatrix::new();
        for row in 0..ROWS {
            for bit in 0..8 {
                keys.set(row, bit, false);
                assert!(keys.row(row) <= 0x1F);
            }
        }
    }

    #[test]
    fn reset_all_releases_everything() {
        let mut keys = KeyMatrix::new();
        keys.set(0, 0, true);
        keys.set(7, 4, true);
        keys.reset_all();
        assert_eq!(keys, KeyMatrix::new());
    }

    #[test]
    fn scan_with_nothing_selected_floats_high() {
        let mut keys = KeyMatrix::new();
        keys.set(3, 0, true);
        assert_eq!(keys.scan(0x00), 0xFF);
    }

    #[test]
    fn scan_single_row() {
        let mut keys = KeyMatrix::new();
        keys.set(1, 0, true);
        assert_eq!(keys.scan(0x02), 0xFE);
        // Another row doesn't see it
        assert_eq!(keys.scan(0x01), 0xFF);
    }

    #[test]
    fn scan_wire_ands_selected_rows() {
        let mut keys = KeyMatrix::new();
        keys.set(0, 0, true); // Caps shift
        keys.set(4, 2, true); // 8

        // Rows 0 and 4 selected
        assert_eq!(keys.scan(0x11), 0xFA);
        // Every row selected
        assert_eq!(keys.scan(0xFF), 0xFA);
    }
}
