//! The fixed bijection between reaction emoji and board positions.
//!
//! Nine directional symbols map onto the nine squares in row-major
//! order. The table is a process-wide constant; sessions share it
//! instead of rebuilding per game.

use crate::game::Position;

/// Reaction emoji and the position each one addresses, row-major.
///
/// Invariant: entry `i` maps to the position with index `i`, so the
/// table doubles as a position -> symbol lookup.
pub const REACTION_SYMBOLS: [(&str, Position); 9] = [
    ("\u{2196}", Position::TopLeft),
    ("\u{2b06}", Position::TopCenter),
    ("\u{2197}", Position::TopRight),
    ("\u{2b05}", Position::MiddleLeft),
    ("\u{23fa}", Position::Center),
    ("\u{27a1}", Position::MiddleRight),
    ("\u{2199}", Position::BottomLeft),
    ("\u{2b07}", Position::BottomCenter),
    ("\u{2198}", Position::BottomRight),
];

/// Looks up the position a reaction symbol addresses.
///
/// Returns `None` for symbols outside the control set.
pub fn position_for(symbol: &str) -> Option<Position> {
    REACTION_SYMBOLS
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|(_, pos)| *pos)
}

/// Returns the reaction symbol for a position.
pub fn symbol_for(position: Position) -> &'static str {
    REACTION_SYMBOLS[position.to_index()].0
}

/// All control symbols in registration order (top-left to bottom-right).
pub fn all_symbols() -> [&'static str; 9] {
    REACTION_SYMBOLS.map(|(symbol, _)| symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn table_is_a_bijection() {
        for pos in Position::iter() {
            let symbol = symbol_for(pos);
            assert_eq!(position_for(symbol), Some(pos));
        }
    }

    #[test]
    fn table_is_row_major() {
        assert_eq!(position_for("\u{2196}"), Some(Position::TopLeft));
        assert_eq!(position_for("\u{23fa}"), Some(Position::Center));
        assert_eq!(position_for("\u{2198}"), Some(Position::BottomRight));
    }

    #[test]
    fn unknown_symbol_maps_to_none() {
        assert_eq!(position_for("\u{1f600}"), None);
        assert_eq!(position_for(""), None);
    }
}
