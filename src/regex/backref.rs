// Backreferences: `\` followed by one or more digits, 1-based.
//
// Detection happens once, when the pattern is compiled; resolution happens
// on every visit during the search.

use super::Captures;

/// Split a leading `\<digits>` token off `pattern`.
///
/// Returns the 1-based group number and the text after the token, or `None`
/// when the head is not a backreference and ordinary parsing applies.
/// Numbers too large for `usize` saturate; they can never resolve.
pub(crate) fn parse(pattern: &str) -> Option<(usize, &str)> {
    let digits = pattern.strip_prefix('\\')?;
    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    let number = digits[..len].parse().unwrap_or(usize::MAX);
    Some((number, &digits[len..]))
}

/// Consume the text captured by group `number` (1-based) from the front of
/// `suffix`.
///
/// `None` is a dead end: the number is out of range, the group is unset, or
/// the captured text does not prefix `suffix`.
pub(crate) fn resolve<'t>(suffix: &'t str, number: usize, captures: &Captures<'t>) -> Option<&'t str> {
    let id = number.checked_sub(1)?;
    let text = captures.get(id)?;
    suffix.strip_prefix(text)
}
