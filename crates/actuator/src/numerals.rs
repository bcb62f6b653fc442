//! Numeral translation.
//!
//! Numbers are rendered by substituting each decimal digit with a glyph from
//! the table selected by the numeral mode, one glyph per digit. Positional
//! notation (`二千四十八`) is never produced.

use kanji_2048_types::NumeralType;

/// Financial numerals, indexed by digit.
pub const DAIJI_DIGITS: [char; 10] = ['零', '壹', '貳', '參', '肆', '伍', '陸', '柒', '捌', '玖'];

/// Common kanji numerals, indexed by digit.
pub const KANJI_DIGITS: [char; 10] = ['〇', '一', '二', '三', '四', '五', '六', '七', '八', '九'];

fn digit_table(mode: NumeralType) -> Option<&'static [char; 10]> {
    match mode {
        NumeralType::Arabic => None,
        NumeralType::Daiji => Some(&DAIJI_DIGITS),
        NumeralType::Kanji => Some(&KANJI_DIGITS),
    }
}

/// Render `number` in the given numeral mode.
///
/// ```
/// use kanji_2048_actuator::numerals::translate;
/// use kanji_2048_types::NumeralType;
///
/// assert_eq!(translate(2048, NumeralType::Arabic), "2048");
/// assert_eq!(translate(2048, NumeralType::Daiji), "貳零肆捌");
/// assert_eq!(translate(2048, NumeralType::Kanji), "二〇四八");
/// ```
pub fn translate(number: u64, mode: NumeralType) -> String {
    translate_digits(&number.to_string(), mode)
}

/// Substitute every ASCII digit in `text`; other characters pass through.
pub fn translate_digits(text: &str, mode: NumeralType) -> String {
    let Some(table) = digit_table(mode) else {
        return text.to_string();
    };
    text.chars()
        .map(|ch| match ch.to_digit(10) {
            Some(d) if ch.is_ascii_digit() => table[d as usize],
            _ => ch,
        })
        .collect()
}
