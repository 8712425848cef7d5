//! ITA2 ("Baudot-Murray") 5-bit symbol codec.
//!
//! Maps text to and from the 32-symbol teleprinter alphabet the Lorenz
//! machine operated on. ITA2 is a shifted code: symbol 27 (FIGS) and
//! symbol 31 (LTRS) switch between the letters and figures tables, and
//! NUL, space, CR and LF are shared between both shifts. Replicates the
//! standard ITA2 table used by the original Python implementation.

use crate::error::TunnyError;
use crate::{Symbol, SYMBOL_MAX};

/// Symbol that switches the codec into figures shift.
pub const FIGURE_SHIFT: Symbol = 27;

/// Symbol that switches the codec into letters shift.
pub const LETTER_SHIFT: Symbol = 31;

/// Letters-shift table, indexed by symbol value. `None` marks the two
/// shift symbols, which carry no character.
const LETTERS: [Option<char>; 32] = [
    Some('\0'),
    Some('E'),
    Some('\n'),
    Some('A'),
    Some(' '),
    Some('S'),
    Some('I'),
    Some('U'),
    Some('\r'),
    Some('D'),
    Some('R'),
    Some('J'),
    Some('N'),
    Some('F'),
    Some('C'),
    Some('K'),
    Some('T'),
    Some('Z'),
    Some('L'),
    Some('W'),
    Some('H'),
    Some('Y'),
    Some('P'),
    Some('Q'),
    Some('O'),
    Some('B'),
    Some('G'),
    None, // FIGS
    Some('M'),
    Some('X'),
    Some('V'),
    None, // LTRS
];

/// Figures-shift table, indexed by symbol value. Symbol 9 is WRU (ENQ)
/// and symbol 11 is the bell, kept as their control characters.
const FIGURES: [Option<char>; 32] = [
    Some('\0'),
    Some('3'),
    Some('\n'),
    Some('-'),
    Some(' '),
    Some('\''),
    Some('8'),
    Some('7'),
    Some('\r'),
    Some('\x05'),
    Some('4'),
    Some('\x07'),
    Some(','),
    Some('!'),
    Some(':'),
    Some('('),
    Some('5'),
    Some('+'),
    Some(')'),
    Some('2'),
    Some('£'),
    Some('6'),
    Some('0'),
    Some('1'),
    Some('9'),
    Some('?'),
    Some('&'),
    None, // FIGS
    Some('.'),
    Some('/'),
    Some('='),
    None, // LTRS
];

/// Current shift state of an ITA2 stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shift {
    Letters,
    Figures,
}

impl Shift {
    fn table(self) -> &'static [Option<char>; 32] {
        match self {
            Shift::Letters => &LETTERS,
            Shift::Figures => &FIGURES,
        }
    }
}

/// Finds the symbol for a character within one shift table.
fn lookup(table: &[Option<char>; 32], ch: char) -> Option<Symbol> {
    table
        .iter()
        .position(|&entry| entry == Some(ch))
        .map(|pos| pos as Symbol)
}

/// Encodes text into ITA2 symbols.
///
/// The stream starts in letters shift; shift symbols are inserted
/// whenever a character lives in the other table. ASCII letters are
/// uppercased before lookup, matching the original implementation's
/// treatment of its input text.
///
/// # Errors
/// Returns [`TunnyError::Encoding`] on the first character that has no
/// ITA2 code point in either shift; no partial output is produced.
pub fn encode(text: &str) -> Result<Vec<Symbol>, TunnyError> {
    let mut symbols = Vec::with_capacity(text.len());
    let mut shift = Shift::Letters;
    for raw in text.chars() {
        let ch = raw.to_ascii_uppercase();
        if let Some(symbol) = lookup(shift.table(), ch) {
            symbols.push(symbol);
            continue;
        }
        let (other, switch) = match shift {
            Shift::Letters => (Shift::Figures, FIGURE_SHIFT),
            Shift::Figures => (Shift::Letters, LETTER_SHIFT),
        };
        match lookup(other.table(), ch) {
            Some(symbol) => {
                symbols.push(switch);
                symbols.push(symbol);
                shift = other;
            }
            None => return Err(TunnyError::Encoding(raw)),
        }
    }
    Ok(symbols)
}

/// Decodes ITA2 symbols back into text.
///
/// Shift symbols update the decoder state and emit nothing. The stream is
/// assumed to start in letters shift, mirroring [`encode`].
///
/// # Errors
/// Returns [`TunnyError::SymbolOutOfRange`] on any symbol above 31.
pub fn decode(symbols: &[Symbol]) -> Result<String, TunnyError> {
    let mut text = String::with_capacity(symbols.len());
    let mut shift = Shift::Letters;
    for &symbol in symbols {
        if symbol > SYMBOL_MAX {
            return Err(TunnyError::SymbolOutOfRange(symbol));
        }
        match symbol {
            FIGURE_SHIFT => shift = Shift::Figures,
            LETTER_SHIFT => shift = Shift::Letters,
            // Every non-shift entry in both tables is populated.
            s => {
                if let Some(ch) = shift.table()[s as usize] {
                    text.push(ch);
                }
            }
        }
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_plain_letters() {
        // H=20, E=1, L=18, O=24 in letters shift.
        assert_eq!(encode("HELLO").unwrap(), vec![20, 1, 18, 18, 24]);
    }

    #[test]
    fn test_encode_uppercases_ascii() {
        assert_eq!(encode("hello").unwrap(), encode("HELLO").unwrap());
    }

    #[test]
    fn test_encode_inserts_figure_shift() {
        // '3' lives in figures shift: FIGS, '3', then LTRS back for 'A'.
        assert_eq!(
            encode("A3A").unwrap(),
            vec![3, FIGURE_SHIFT, 1, LETTER_SHIFT, 3]
        );
    }

    #[test]
    fn test_encode_stays_in_figures_shift() {
        // Consecutive figures need only one shift symbol.
        assert_eq!(encode("12").unwrap(), vec![FIGURE_SHIFT, 23, 19]);
    }

    #[test]
    fn test_encode_shared_characters_keep_shift() {
        // Space exists in both shifts: no LTRS insertion around it.
        assert_eq!(encode("1 2").unwrap(), vec![FIGURE_SHIFT, 23, 4, 19]);
    }

    #[test]
    fn test_encode_rejects_unmappable() {
        assert_eq!(encode("A~B").unwrap_err(), TunnyError::Encoding('~'));
    }

    #[test]
    fn test_decode_roundtrip() {
        let text = "THE QUICK BROWN FOX JUMPS OVER 13 LAZY DOGS.";
        let symbols = encode(text).unwrap();
        assert_eq!(decode(&symbols).unwrap(), text);
    }

    #[test]
    fn test_decode_rejects_out_of_range() {
        assert_eq!(
            decode(&[1, 2, 99]).unwrap_err(),
            TunnyError::SymbolOutOfRange(99)
        );
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode(&[]).unwrap(), "");
    }

    #[test]
    fn test_encode_empty() {
        assert!(encode("").unwrap().is_empty());
    }

    #[test]
    fn test_tables_cover_all_non_shift_codes() {
        for s in 0..=SYMBOL_MAX {
            if s == FIGURE_SHIFT || s == LETTER_SHIFT {
                assert!(LETTERS[s as usize].is_none());
                assert!(FIGURES[s as usize].is_none());
            } else {
                assert!(LETTERS[s as usize].is_some(), "letters {} empty", s);
                assert!(FIGURES[s as usize].is_some(), "figures {} empty", s);
            }
        }
    }
}
