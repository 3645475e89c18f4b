//! JSON encoding of scan results.
//!
//! Encoding failures are returned as [`Error::Serialization`](crate::Error)
//! instead of being dropped, so a caller never prints partial or empty output
//! while claiming success.

use crate::structs::NetworkRecord;
use crate::Result;
use std::io::Write;

/// Compact JSON array, the `/api/scan` response body.
pub fn to_json(records: &[NetworkRecord]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}

/// Pretty-printed JSON array, as written by the command-line tool.
pub fn to_json_pretty(records: &[NetworkRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Writes the pretty JSON array followed by a newline.
///
/// The document is fully encoded before anything is written.
pub fn write_json<W: Write>(mut writer: W, records: &[NetworkRecord]) -> Result<()> {
    let json = to_json_pretty(records)?;
    writeln!(writer, "{}", json)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::{Band, Security};

    fn records() -> Vec<NetworkRecord> {
        vec![
            NetworkRecord {
                ssid: "HomeNet".to_string(),
                signal_strength: -52,
                security: Security::Wpa2Personal,
                channel: 36,
                band: Band::Band5GHz,
            },
            NetworkRecord {
                ssid: "[Redacted/Hidden]".to_string(),
                signal_strength: -88,
                security: Security::Open,
                channel: 0,
                band: Band::Unknown,
            },
        ]
    }

    #[test]
    fn empty_sequence_is_empty_array() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
        assert_eq!(to_json_pretty(&[]).unwrap(), "[]");
    }

    #[test]
    fn wire_format_is_stable() {
        let json = to_json(&records()[..1]).unwrap();
        assert_eq!(
            json,
            r#"[{"ssid":"HomeNet","rssi":-52,"security":"WPA2 Personal","channel":36,"band":"5 GHz"}]"#
        );
    }

    #[test]
    fn round_trip_preserves_records() {
        let original = records();
        let decoded: Vec<NetworkRecord> = serde_json::from_str(&to_json_pretty(&original).unwrap()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn write_json_emits_whole_document() {
        let mut out = Vec::new();
        write_json(&mut out, &records()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with('['));
        assert!(text.ends_with("]\n"));
        let decoded: Vec<NetworkRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded.len(), 2);
    }
}
