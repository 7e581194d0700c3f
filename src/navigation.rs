//! Reading the reservation id out of the navigation context.

use crate::domain::ReservationId;

/// Parses the `id` route parameter.
///
/// Leading whitespace and an optional sign are skipped and the leading run of
/// decimal digits is taken, so `"42abc"` yields 42. Anything that does not
/// produce a positive integer (missing, non-numeric, zero, negative, overflow)
/// yields `None` and the page stays empty.
pub fn parse_reservation_id(param: Option<&str>) -> Option<ReservationId> {
    let raw = param?.trim_start();
    let (negative, unsigned) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let digits_len = unsigned
        .bytes()
        .take_while(|byte| byte.is_ascii_digit())
        .count();
    if negative || digits_len == 0 {
        return None;
    }
    unsigned[..digits_len]
        .parse::<ReservationId>()
        .ok()
        .filter(|id| *id > 0)
}
