//! Axis tick formatters, selected by name in chart options.

use serde_json::{Map, Value};

/// The fixed table of recognized tick formatters.
///
/// Chart options refer to these by name in
/// `scales.yAxes[*].ticks.callback`; resolution happens once at
/// configuration time, never by runtime string dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFormatter {
    /// `"ticksPercent"`: fraction to whole percent, e.g. `0.5` to `50%`.
    Percent,
    /// `"ticksUSD"`: euro currency with two decimals. The name is a
    /// historical artifact of the source data; it has always formatted EUR.
    Usd,
    /// `"ticksNumStandaard"`: grouped numeric with exactly two decimals.
    NumStandaard,
}

impl TickFormatter {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ticksPercent" => Some(TickFormatter::Percent),
            "ticksUSD" => Some(TickFormatter::Usd),
            "ticksNumStandaard" => Some(TickFormatter::NumStandaard),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TickFormatter::Percent => "ticksPercent",
            TickFormatter::Usd => "ticksUSD",
            TickFormatter::NumStandaard => "ticksNumStandaard",
        }
    }

    /// Maps an axis value to its display text.
    ///
    /// ```
    /// use plotmark::chart::TickFormatter;
    ///
    /// assert_eq!(TickFormatter::Percent.format(0.5), "50%");
    /// assert_eq!(TickFormatter::Usd.format(1234.5), "€1,234.50");
    /// assert_eq!(TickFormatter::NumStandaard.format(1234.5), "1,234.50");
    /// ```
    pub fn format(self, value: f64) -> String {
        match self {
            TickFormatter::Percent => {
                let percent = (value * 100.0).round() as i64;
                let grouped = group_digits(&percent.unsigned_abs().to_string());
                match percent < 0 {
                    true => format!("-{grouped}%"),
                    false => format!("{grouped}%"),
                }
            }
            TickFormatter::Usd => format!("€{}", two_decimal(value)),
            TickFormatter::NumStandaard => two_decimal(value),
        }
    }
}

/// Replaces textual `ticks.callback` names on every Y axis with resolved
/// formatters, returned in axis order. Unrecognized names become a JSON
/// null callback; recognized names are left canonical for the emitted
/// configuration.
pub fn resolve_callbacks(options: &mut Map<String, Value>) -> Vec<Option<TickFormatter>> {
    let axes = options.get_mut("scales")
        .and_then(|scales| scales.get_mut("yAxes"))
        .and_then(Value::as_array_mut);

    let mut resolved = vec![];
    for axis in axes.into_iter().flatten() {
        let callback = axis.get_mut("ticks").and_then(|ticks| ticks.get_mut("callback"));
        let formatter = match callback {
            Some(callback) => match callback.as_str().map(TickFormatter::from_name) {
                Some(Some(formatter)) => Some(formatter),
                Some(None) => {
                    *callback = Value::Null;
                    None
                }
                None => None,
            },
            None => None,
        };

        resolved.push(formatter);
    }

    resolved
}

fn two_decimal(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int, frac) = fixed.split_once('.').unwrap_or((&fixed, "00"));
    let grouped = group_digits(int);
    match value.is_sign_negative() && fixed != "0.00" {
        true => format!("-{grouped}.{frac}"),
        false => format!("{grouped}.{frac}"),
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }

        grouped.push(ch);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use super::*;

    #[test]
    fn recognized_names_resolve() {
        assert_eq!(TickFormatter::from_name("ticksPercent"), Some(TickFormatter::Percent));
        assert_eq!(TickFormatter::from_name("ticksUSD"), Some(TickFormatter::Usd));
        assert_eq!(TickFormatter::from_name("ticksNumStandaard"), Some(TickFormatter::NumStandaard));
        assert_eq!(TickFormatter::from_name("ticksKlingon"), None);
    }

    #[test]
    fn formatting() {
        assert_eq!(TickFormatter::Percent.format(0.345), "35%");
        assert_eq!(TickFormatter::Percent.format(-1.0), "-100%");
        assert_eq!(TickFormatter::Percent.format(12.5), "1,250%");
        assert_eq!(TickFormatter::Usd.format(0.0), "€0.00");
        assert_eq!(TickFormatter::Usd.format(-9.999), "€-10.00");
        assert_eq!(TickFormatter::NumStandaard.format(1234567.891), "1,234,567.89");
        assert_eq!(TickFormatter::NumStandaard.format(7.0), "7.00");
    }

    #[test]
    fn unrecognized_callback_becomes_null() {
        let mut options = json!({
            "scales": { "yAxes": [
                { "ticks": { "callback": "ticksUSD" } },
                { "ticks": { "callback": "ticksMystery" } },
                { },
            ] }
        });

        let map = options.as_object_mut().unwrap();
        let resolved = resolve_callbacks(map);
        assert_eq!(resolved, vec![Some(TickFormatter::Usd), None, None]);
        assert_eq!(map["scales"]["yAxes"][0]["ticks"]["callback"], json!("ticksUSD"));
        assert_eq!(map["scales"]["yAxes"][1]["ticks"]["callback"], json!(null));
    }

    #[test]
    fn non_string_callback_is_left_alone() {
        let mut options = json!({
            "scales": { "yAxes": [{ "ticks": { "callback": 42 } }] }
        });

        let map = options.as_object_mut().unwrap();
        assert_eq!(resolve_callbacks(map), vec![None]);
        assert_eq!(map["scales"]["yAxes"][0]["ticks"]["callback"], json!(42));
    }

    #[test]
    fn options_without_axes_resolve_to_nothing() {
        let mut options = serde_json::Map::new();
        assert!(resolve_callbacks(&mut options).is_empty());
    }
}
