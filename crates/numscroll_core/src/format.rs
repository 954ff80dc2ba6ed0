//! Number formatting for scroller values

/// Number of fractional digits in the shortest decimal form of `step`
///
/// `0.5` has one, `0.25` two, and whole steps like `2` none.
pub fn decimal_places(step: f32) -> usize {
    if !step.is_finite() {
        return 0;
    }
    let repr = step.abs().to_string();
    match repr.split_once('.') {
        Some((_, fraction)) => fraction.trim_end_matches('0').len(),
        None => 0,
    }
}

/// Render a value for display at the precision implied by `step`
///
/// Trailing zeros and a dangling decimal point are dropped, so `6.00`
/// becomes `6` and `6.50` becomes `6.5`.
pub fn format_value(value: f32, step: f32) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value.is_sign_positive() {
            "Inf".to_string()
        } else {
            "-Inf".to_string()
        };
    }
    let decimals = decimal_places(step);
    let text = trim_trailing_zeroes(format!("{value:.decimals$}"));
    if text == "-0" {
        "0".to_string()
    } else {
        text
    }
}

/// Initial text of an edit field showing `value`
///
/// Whole numbers show without a fractional part; everything else uses the
/// shortest decimal form.
pub fn edit_text(value: f32) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn trim_trailing_zeroes(mut s: String) -> String {
    if let Some(dot) = s.find('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.len() == dot + 1 {
            s.pop();
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_places() {
        assert_eq!(decimal_places(0.5), 1);
        assert_eq!(decimal_places(2.0), 0);
        assert_eq!(decimal_places(1.0), 0);
        assert_eq!(decimal_places(0.25), 2);
        assert_eq!(decimal_places(0.1), 1);
        assert_eq!(decimal_places(0.001), 3);
    }

    #[test]
    fn test_format_strips_trailing_zeroes() {
        assert_eq!(format_value(6.0, 1.0), "6");
        assert_eq!(format_value(6.5, 0.5), "6.5");
        assert_eq!(format_value(6.0, 0.25), "6");
        assert_eq!(format_value(6.5, 0.25), "6.5");
        assert_eq!(format_value(6.75, 0.25), "6.75");
        assert_eq!(format_value(3.0, 0.5), "3");
        assert_eq!(format_value(0.0, 0.1), "0");
        assert_eq!(format_value(-2.5, 0.25), "-2.5");
    }

    #[test]
    fn test_format_never_exceeds_step_precision() {
        for step in [0.1f32, 0.25, 0.5, 1.0, 2.0, 0.005] {
            let max_digits = decimal_places(step);
            for value in [0.0f32, 1.2345, -3.987_654, 99.999, 1e-4] {
                let text = format_value(value, step);
                let digits = text.split_once('.').map_or(0, |(_, f)| f.len());
                assert!(digits <= max_digits, "{text} for step {step}");
                assert!(!text.contains('.') || !text.ends_with('0'), "{text}");
            }
        }
    }

    #[test]
    fn test_format_negative_zero() {
        assert_eq!(format_value(-0.0, 1.0), "0");
        assert_eq!(format_value(-0.04, 0.1), "0");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_value(f32::NAN, 1.0), "NaN");
        assert_eq!(format_value(f32::NEG_INFINITY, 1.0), "-Inf");
    }

    #[test]
    fn test_format_parse_round_trip() {
        let step = 0.25f32;
        let mut v = -10.0f32;
        while v <= 10.0 {
            let parsed: f32 = format_value(v, step).parse().unwrap();
            assert!((parsed - v).abs() <= step / 2.0, "{v} -> {parsed}");
            v += step;
        }
    }

    #[test]
    fn test_edit_text() {
        assert_eq!(edit_text(6.0), "6");
        assert_eq!(edit_text(-3.0), "-3");
        assert_eq!(edit_text(7.5), "7.5");
    }
}
