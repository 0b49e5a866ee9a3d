//! Conversion between size tokens (`256M`) and byte counts.

use regex::Regex;
use std::sync::LazyLock;

pub const KBYTE: u64 = 1024;
pub const MBYTE: u64 = 1024 * 1024;
pub const GBYTE: u64 = 1024 * 1024 * 1024;

static RE_SIZE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([0-9]+)([KMG])?$").unwrap());
static RE_UNKNOWN_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)([A-FH-JL-Za-z])$").unwrap());

/// Multiplier for a recognized unit suffix. Uppercase only.
pub fn unit_multiplier(suffix: char) -> Option<u64> {
    match suffix {
        'K' => Some(KBYTE),
        'M' => Some(MBYTE),
        'G' => Some(GBYTE),
        _ => None,
    }
}

/// Strictly parse `digits` or `digits` followed by `K`, `M` or `G`.
///
/// Returns `None` for anything else, including lowercase suffixes.
/// Counts too large for `u64` saturate.
pub fn parse_size(token: &str) -> Option<u64> {
    let caps = RE_SIZE.captures(token)?;
    let num = coerce_integer(&caps[1]);
    let multiplier = match caps.get(2) {
        Some(unit) => unit.as_str().chars().next().and_then(unit_multiplier)?,
        None => 1,
    };
    Some(num.saturating_mul(multiplier))
}

/// Compatibility multiplier for a size token whose suffix is not a known unit.
///
/// Such a token counts as zero bytes rather than being rejected, so a value
/// like `10T` silently contributes nothing to the totals.
pub fn unsupported_suffix_multiplier(_suffix: char) -> u64 {
    0
}

/// Convert a size token to a byte count without ever failing.
///
/// This is the lenient library entry point; the option file reader and
/// [`MemorySize`](crate::types::MemorySize) use the strict [`parse_size`].
///
/// Valid tokens convert exactly; a digit run with an unsupported suffix goes
/// through [`unsupported_suffix_multiplier`]; anything else is coerced with
/// [`coerce_integer`].
pub fn to_byte_count(token: &str) -> u64 {
    let token = token.trim();
    if let Some(bytes) = parse_size(token) {
        return bytes;
    }
    if let Some(caps) = RE_UNKNOWN_SUFFIX.captures(token) {
        let num = coerce_integer(&caps[1]);
        let suffix = caps[2].chars().next().unwrap_or_default();
        return num.saturating_mul(unsupported_suffix_multiplier(suffix));
    }
    coerce_integer(token)
}

/// Lenient integer coercion: the leading run of ASCII digits after optional
/// whitespace, or zero when there is none. Saturates on overflow.
pub fn coerce_integer(text: &str) -> u64 {
    text.trim_start()
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u64::from(digit - b'0'))
        })
}

/// Render a byte count as `"<value> [<unit>]"` with three decimals.
///
/// A unit is only used when the count is strictly greater than it, so
/// exactly 1 GiB renders as `1024.000 [M]`.
pub fn to_human_unit(bytes: u64) -> String {
    let (base, unit) = if bytes > GBYTE {
        (GBYTE, "G")
    } else if bytes > MBYTE {
        (MBYTE, "M")
    } else if bytes > KBYTE {
        (KBYTE, "K")
    } else {
        (1, "")
    };
    format!("{:.3} [{unit}]", bytes as f64 / base as f64)
}
