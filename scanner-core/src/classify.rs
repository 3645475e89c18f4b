//! Maps raw capability flags and channel descriptors onto the fixed label
//! sets used in the JSON output.

use crate::structs::{Band, RawBand, RawChannel, RawNetwork, Security, SecurityCapability};

/// Strongest scheme first. A network advertising several schemes is
/// reported with the earliest one in this table.
const SECURITY_PRIORITY: [(SecurityCapability, Security); 7] = [
    (SecurityCapability::Wpa3Personal, Security::Wpa3Personal),
    (SecurityCapability::Wpa3Enterprise, Security::Wpa3Enterprise),
    (SecurityCapability::Wpa2Personal, Security::Wpa2Personal),
    (SecurityCapability::Wpa2Enterprise, Security::Wpa2Enterprise),
    (SecurityCapability::WpaPersonal, Security::WpaPersonal),
    (SecurityCapability::WpaEnterprise, Security::WpaEnterprise),
    (SecurityCapability::Wep, Security::Wep),
];

/// Returns the single security label that best describes `network`.
pub fn classify_security(network: &RawNetwork) -> Security {
    SECURITY_PRIORITY
        .iter()
        .find(|(capability, _)| network.supports(*capability))
        .map(|(_, label)| *label)
        .unwrap_or(Security::Open)
}

/// Returns the band label for an optional channel descriptor.
pub fn classify_band(channel: Option<&RawChannel>) -> Band {
    let Some(channel) = channel else {
        return Band::Unknown;
    };
    match channel.band {
        RawBand::Band2GHz => Band::Band2GHz,
        RawBand::Band5GHz => Band::Band5GHz,
        RawBand::Band6GHz => Band::Band6GHz,
        RawBand::Unrecognized => Band::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_caps(caps: &[SecurityCapability]) -> RawNetwork {
        RawNetwork {
            capabilities: caps.to_vec(),
            ..Default::default()
        }
    }

    #[test]
    fn no_capability_is_open() {
        assert_eq!(classify_security(&with_caps(&[])), Security::Open);
    }

    #[test]
    fn strongest_scheme_wins() {
        let net = with_caps(&[SecurityCapability::Wep, SecurityCapability::Wpa2Personal]);
        assert_eq!(classify_security(&net), Security::Wpa2Personal);

        // WPA2/WPA3 transition mode
        let net = with_caps(&[SecurityCapability::Wpa2Personal, SecurityCapability::Wpa3Personal]);
        assert_eq!(classify_security(&net), Security::Wpa3Personal);

        // Personal beats Enterprise of the same generation.
        let net = with_caps(&[SecurityCapability::Wpa3Enterprise, SecurityCapability::Wpa3Personal]);
        assert_eq!(classify_security(&net), Security::Wpa3Personal);

        // But a newer generation beats an older one regardless of kind.
        let net = with_caps(&[SecurityCapability::WpaPersonal, SecurityCapability::Wpa2Enterprise]);
        assert_eq!(classify_security(&net), Security::Wpa2Enterprise);
    }

    #[test]
    fn every_subset_picks_earliest_in_priority() {
        let all: Vec<SecurityCapability> = SECURITY_PRIORITY.iter().map(|(c, _)| *c).collect();
        for mask in 0u32..(1 << all.len()) {
            let caps: Vec<SecurityCapability> = all
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, c)| *c)
                .collect();
            let expected = if mask == 0 {
                Security::Open
            } else {
                SECURITY_PRIORITY[mask.trailing_zeros() as usize].1
            };
            assert_eq!(classify_security(&with_caps(&caps)), expected, "mask {mask:#09b}");
        }
    }

    #[test]
    fn band_labels() {
        let ch = |number, band| RawChannel { number, band };
        assert_eq!(classify_band(None), Band::Unknown);
        assert_eq!(classify_band(Some(&ch(6, RawBand::Band2GHz))), Band::Band2GHz);
        assert_eq!(classify_band(Some(&ch(36, RawBand::Band5GHz))), Band::Band5GHz);
        assert_eq!(classify_band(Some(&ch(37, RawBand::Band6GHz))), Band::Band6GHz);
        assert_eq!(classify_band(Some(&ch(2, RawBand::Unrecognized))), Band::Unknown);
    }
}
