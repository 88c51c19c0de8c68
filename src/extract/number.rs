/// Turns a Turkish/German formatted number into canonical decimal text.
///
/// Everything except ASCII digits, `.`, `,` and `-` is dropped, then periods
/// (thousands separators) are removed and the comma becomes the decimal point.
/// Empty input yields `"0"`. The result is not validated.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return "0".to_string();
    }

    raw.chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '-'))
        .map(|c| if c == ',' { '.' } else { c })
        .collect()
}
