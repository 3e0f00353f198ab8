use tracing::{debug, trace};

use super::{
    registry::{FieldRegistry, FieldSlot, FieldType},
    structure::Configuration,
};


/// The result of applying a single configuration line.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DirectiveOutcome {
    /// The value was converted and stored.
    Applied { keyword: &'static str },

    /// No registered keyword occurs in the line.
    UnknownKeyword,

    /// The keyword is not followed by an `=`.
    MissingArgument { keyword: &'static str },

    /// The value could not be converted to the keyword's type.
    ConversionFailed {
        keyword: &'static str,
        expected: FieldType,
    },

    /// The keyword's string list is already full; the value was dropped.
    CapacityExceeded {
        keyword: &'static str,
        capacity: usize,
    },
}

impl DirectiveOutcome {
    #[inline]
    pub fn is_applied(&self) -> bool {
        matches!(self, DirectiveOutcome::Applied { .. })
    }
}


/// Whitespace as understood by C's `isspace` in the "C" locale.
#[inline]
fn is_c_whitespace(character: char) -> bool {
    matches!(character, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Returns the first whitespace-delimited token of `value`
/// (leading whitespace is skipped). The token may be empty.
pub fn next_token(value: &str) -> &str {
    let value = value.trim_start_matches(is_c_whitespace);

    match value.find(is_c_whitespace) {
        Some(token_end) => &value[..token_end],
        None => value,
    }
}

/// Scans a signed integer from the start of `value`, auto-detecting the base:
/// `0x`/`0X` means hexadecimal, a leading `0` means octal and anything else
/// is decimal. Leading whitespace and an optional sign are accepted, and
/// scanning stops at the first character that is not a digit of the base.
///
/// Returns `None` if there are no digits or the value does not fit in an `i32`.
pub fn scan_integer(value: &str) -> Option<i32> {
    let value = value.trim_start_matches(is_c_whitespace);

    let (is_negative, unsigned_part) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let bytes = unsigned_part.as_bytes();

    let (radix, digits) = match bytes {
        [b'0', b'x' | b'X', next, ..] if next.is_ascii_hexdigit() => (16, &bytes[2..]),
        [b'0', ..] => (8, bytes),
        _ => (10, bytes),
    };

    let digit_count = digits
        .iter()
        .take_while(|digit| char::from(**digit).is_digit(radix))
        .count();

    if digit_count == 0 {
        return None;
    }

    let mut magnitude: i64 = 0;
    for digit in &digits[..digit_count] {
        let digit_value = char::from(*digit).to_digit(radix)? as i64;

        magnitude = magnitude
            .checked_mul(radix as i64)?
            .checked_add(digit_value)?;
    }

    let signed_value = if is_negative { -magnitude } else { magnitude };

    i32::try_from(signed_value).ok()
}


/// Finds the first matching keyword in `line`, converts the value after its `=`
/// and stores it in `configuration`.
///
/// Only the field named by the matched keyword is ever modified; on any outcome
/// other than [`DirectiveOutcome::Applied`] the configuration is left untouched.
pub fn match_and_apply(
    line: &str,
    registry: &FieldRegistry<'_>,
    configuration: &mut Configuration,
) -> DirectiveOutcome {
    let Some(keyword_match) = registry.find(line) else {
        return DirectiveOutcome::UnknownKeyword;
    };

    let keyword = keyword_match.descriptor.keyword;
    debug!("Got keyword \"{}\".", keyword);


    let after_keyword = &line[keyword_match.keyword_end..];
    let Some(equals_sign_offset) = after_keyword.find('=') else {
        return DirectiveOutcome::MissingArgument { keyword };
    };

    // Only spaces are skipped here, tabs are left for the value scanners.
    let argument = after_keyword[equals_sign_offset + 1..].trim_start_matches(' ');
    debug!("Got argument \"{}\".", argument);


    match keyword_match.descriptor.slot {
        FieldSlot::Int32(accessor) => {
            let Some(value) = scan_integer(argument) else {
                return DirectiveOutcome::ConversionFailed {
                    keyword,
                    expected: FieldType::Int32,
                };
            };

            *accessor(configuration) = value;
            trace!("Stored integer {}={}.", keyword, value);
        }
        FieldSlot::String(accessor) => {
            let token = next_token(argument);
            if token.is_empty() {
                return DirectiveOutcome::ConversionFailed {
                    keyword,
                    expected: FieldType::String,
                };
            }

            // Replacing the option drops any value set by an earlier line.
            *accessor(configuration) = Some(token.to_string());
            trace!("Stored string {}={}.", keyword, token);
        }
        FieldSlot::StringList(accessor) => {
            let token = next_token(argument);
            if token.is_empty() {
                return DirectiveOutcome::ConversionFailed {
                    keyword,
                    expected: FieldType::StringList,
                };
            }

            let list = accessor(configuration);
            if let Err(error) = list.try_push(token) {
                return DirectiveOutcome::CapacityExceeded {
                    keyword,
                    capacity: error.capacity,
                };
            }

            trace!("Stored {}[{}]={}.", keyword, list.len() - 1, token);
        }
    }

    DirectiveOutcome::Applied { keyword }
}
