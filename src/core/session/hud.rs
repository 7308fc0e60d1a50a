//=========================================================================
// Session HUD
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, trace};

//=== SessionHud ==========================================================

/// Display collaborator for one play session. Calls are fire-and-forget.
pub trait SessionHud {
    /// Countdown digit, from `countdown_from` down to 1.
    fn show_countdown(&mut self, remaining: u32);

    fn show_start(&mut self);

    fn show_level(&mut self, level: u32);

    /// Scaled distance; see [`format_distance`].
    fn show_distance(&mut self, distance: f32);

    fn show_finish(&mut self);
}

/// Text shown when the countdown ends.
pub const START_MARKER: &str = "Start!";

/// `"Lv. 3"`
pub fn format_level(level: u32) -> String {
    format!("Lv. {}", level)
}

/// Two decimals with thousands separators: `"1,234.50 m"`.
pub fn format_distance(distance: f32) -> String {
    let fixed = format!("{:.2}", distance.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if distance < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{} m", sign, grouped, fraction)
}

//=== LogHud ==============================================================

/// HUD that writes to the log; level changes at `info`, distance at
/// `trace`.
#[derive(Debug, Default)]
pub struct LogHud {
    last_level: Option<u32>,
}

impl LogHud {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionHud for LogHud {
    fn show_countdown(&mut self, remaining: u32) {
        info!("{}", remaining);
    }

    fn show_start(&mut self) {
        info!("{}", START_MARKER);
    }

    fn show_level(&mut self, level: u32) {
        if self.last_level != Some(level) {
            self.last_level = Some(level);
            info!("{}", format_level(level));
        }
    }

    fn show_distance(&mut self, distance: f32) {
        trace!("{}", format_distance(distance));
    }

    fn show_finish(&mut self) {
        info!("Finish!");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_format() {
        assert_eq!(format_level(1), "Lv. 1");
        assert_eq!(format_level(12), "Lv. 12");
    }

    #[test]
    fn distance_format_groups_thousands() {
        assert_eq!(format_distance(0.0), "0.00 m");
        assert_eq!(format_distance(12.5), "12.50 m");
        assert_eq!(format_distance(999.0), "999.00 m");
        assert_eq!(format_distance(1234.5), "1,234.50 m");
        assert_eq!(format_distance(1_234_567.0), "1,234,567.00 m");
    }

    #[test]
    fn negative_distance_keeps_sign() {
        assert_eq!(format_distance(-1500.25), "-1,500.25 m");
    }
}
