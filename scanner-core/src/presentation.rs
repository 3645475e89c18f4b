//! Display rules shared by the terminal table and the browser dashboard:
//! signal percentage, color tier and ordering.

use crate::structs::{NetworkRecord, REDACTED_SSID};
use colored::{ColoredString, Colorize};
use std::fmt::Write;
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};

const TITLE: &str = "WiFi Networks Nearby";
const HEADERS: [&str; 5] = ["SSID", "Signal", "Band", "Channel", "Security"];

/// Maps RSSI onto 0..=100: -100 dBm is 0%, -50 dBm or better is 100%.
pub fn signal_percentage(rssi: i32) -> u8 {
    let pct = (i64::from(rssi) + 100) * 2;
    pct.clamp(0, 100) as u8
}

/// Color tier of a signal bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalTier {
    Success,
    Warning,
    Danger,
}

impl SignalTier {
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage >= 80 {
            SignalTier::Success
        } else if percentage >= 50 {
            SignalTier::Warning
        } else {
            SignalTier::Danger
        }
    }

    fn paint(&self, text: &str) -> ColoredString {
        match self {
            SignalTier::Success => text.green(),
            SignalTier::Warning => text.yellow(),
            SignalTier::Danger => text.red(),
        }
    }
}

/// Strongest signal first. The sort is stable, equal RSSI keeps scan order.
pub fn sort_by_signal(records: &mut [NetworkRecord]) {
    records.sort_by(|a, b| b.signal_strength.cmp(&a.signal_strength));
}

/// Renders the terminal table.
///
/// `records` is sorted on a copy; the caller's order is left alone.
pub fn render_table(records: &[NetworkRecord], color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", TITLE);

    if records.is_empty() {
        let _ = writeln!(out, "No WiFi networks found.");
        return out;
    }

    let mut sorted = records.to_vec();
    sort_by_signal(&mut sorted);

    let mut builder = Builder::default();
    builder.push_record(HEADERS);
    for net in &sorted {
        let pct = signal_percentage(net.signal_strength);
        let signal = format!("{}%", pct);
        let signal = if color {
            SignalTier::from_percentage(pct).paint(&signal).to_string()
        } else {
            signal
        };
        builder.push_record([
            net.ssid.clone(),
            signal,
            net.band.to_string(),
            net.channel.to_string(),
            net.security.to_string(),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(1)).with(Alignment::right()))
        .with(Modify::new(Columns::single(3)).with(Alignment::right()));
    let _ = writeln!(out, "{}", table);

    let _ = writeln!(out);
    let _ = writeln!(out, "Found {} networks.", records.len());

    if records.iter().any(|r| r.ssid == REDACTED_SSID) {
        let _ = writeln!(out);
        let _ = writeln!(out, "Note: Some SSIDs are {}.", REDACTED_SSID);
        let _ = writeln!(
            out,
            "Check that this user may scan (CAP_NET_ADMIN, wpa_supplicant control socket group)."
        );
    }

    out
}
