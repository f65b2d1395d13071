//! Pure display helpers: start-time adjustment and the two odds display
//! formatters.
//!
//! The formatters reproduce the upstream display convention exactly,
//! including its `"0-0.01"` collapse-to-empty rules. Those look like patches
//! for a display artifact rather than an intentional numeric rule, but the
//! output contract depends on them, so both occurrences are kept as-is and
//! kept separate (they apply to different field pairs).

use crate::error::InvalidTimeFormat;

/// Fixed offset applied to every match start time.
const SHIFT_MINUTES: i32 = 90;

/// Shift a 12-hour clock string ("10:30AM", "02:15 PM") back by 90 minutes,
/// wrapping across midnight. The day itself is not tracked; only time-of-day
/// comes back out, rendered as `H:MMAM|PM` with no space before the suffix.
pub fn adjust_time(raw: &str) -> Result<String, InvalidTimeFormat> {
    let bad = || InvalidTimeFormat(raw.to_string());

    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let upper = compact.to_ascii_uppercase();
    let (clock, pm) = if let Some(rest) = upper.strip_suffix("AM") {
        (rest, false)
    } else if let Some(rest) = upper.strip_suffix("PM") {
        (rest, true)
    } else {
        return Err(bad());
    };

    let (hour_str, minute_str) = clock.split_once(':').ok_or_else(bad)?;
    let hour: i32 = hour_str.parse().map_err(|_| bad())?;
    let minute: i32 = minute_str.parse().map_err(|_| bad())?;
    if !(1..=12).contains(&hour) || !(0..=59).contains(&minute) {
        return Err(bad());
    }

    // 12AM is hour 0, 12PM is hour 12.
    let hour24 = hour % 12 + if pm { 12 } else { 0 };
    let mut total = hour24 * 60 + minute - SHIFT_MINUTES;
    if total < 0 {
        total += 24 * 60;
    }

    let (out_hour24, out_minute) = (total / 60, total % 60);
    let suffix = if out_hour24 >= 12 { "PM" } else { "AM" };
    let out_hour = match out_hour24 % 12 {
        0 => 12,
        h => h,
    };

    Ok(format!("{}:{:02}{}", out_hour, out_minute, suffix))
}

/// Compact signed-odds display string from a base value and a hundredths
/// adjustment. `format_odds(1, 50)` is `"1+0.5"`; a zero or `-0.01`
/// adjustment renders the bare base value; the literal `"0-0.01"` collapses
/// to the empty string (checked on the raw concatenation, before the bare-base
/// rule, which is what makes `format_odds(0, -1)` empty rather than `"0"`).
pub fn format_odds(base: f64, adjust_cents: f64) -> String {
    let val = adjust_cents / 100.0;
    let rendered = if val > 0.0 {
        format!("{}+{}", base, val)
    } else {
        format!("{}{}", base, val)
    };

    if rendered == "0-0.01" {
        return String::new();
    }
    if val == 0.0 || val == -0.01 {
        return base.to_string();
    }
    rendered
}

/// Goal-points display string: the base field concatenated with the signed
/// hundredths adjustment. Unlike [`format_odds`] a non-negative adjustment
/// always keeps its `+` (zero renders `"+0"`), and there is no bare-base
/// rule; only the final `"0-0.01"` collapse applies.
pub fn format_goal_points(base: &str, adjust_cents: f64) -> String {
    let val = adjust_cents / 100.0;
    let joined = if val >= 0.0 {
        format!("{}+{}", base, val)
    } else {
        format!("{}{}", base, val)
    };

    if joined == "0-0.01" {
        String::new()
    } else {
        joined
    }
}
