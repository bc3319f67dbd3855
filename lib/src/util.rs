use serde_json::Value;

/// Convert spaces to hyphens. Remove characters that aren't alphanumerics,
/// underscores, or hyphens. Convert to lowercase. Also strip leading and
/// trailing separator runs.
///
/// ```
/// use plotmark::util::slugify;
///
/// assert_eq!(slugify("This Goes to Eleven (Pt. 4)"), "this-goes-to-eleven-pt-4");
/// assert_eq!(slugify("  Üñïçôdé? sure  "), "unicode-sure");
/// ```
pub fn slugify(string: &str) -> String {
    let mut output = String::with_capacity(string.len());

    let mut pending_dash = false;
    for ch in string.chars() {
        for byte in deunicode::deunicode_char(ch).unwrap_or("-").bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'_' {
                if pending_dash {
                    output.push('-');
                    pending_dash = false;
                }

                output.push(byte.to_ascii_lowercase() as char);
            } else {
                pending_dash = !output.is_empty();
            }
        }
    }

    output
}

/// `true` for values the style table may overwrite: an unset attribute is
/// one that is absent or JSON null.
pub fn is_unset(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

#[doc(hidden)]
#[macro_export]
macro_rules! jmap {
    ($($key:expr => $value:expr),* $(,)?) => ({
        #[allow(unused_mut)]
        let mut map = serde_json::Map::new();
        $(map.insert($key.into(), serde_json::Value::from($value));)*
        map
    });
}

pub use jmap;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Unsafe Bounds Checking"), "unsafe-bounds-checking");
        assert_eq!(slugify("part\nthe   second!"), "part-the-second");
        assert_eq!(slugify("  --snake_-_case- -  "), "snake_-_case");
        assert_eq!(slugify("Æúű--grand?"), "aeuu-grand");
        assert_eq!(slugify(".NET Core 3.0 Intrinsics"), "net-core-3-0-intrinsics");
    }

    #[test]
    fn test_is_unset() {
        assert!(is_unset(None));
        assert!(is_unset(Some(&Value::Null)));
        assert!(!is_unset(Some(&Value::from(0))));
        assert!(!is_unset(Some(&Value::from(""))));
    }
}
