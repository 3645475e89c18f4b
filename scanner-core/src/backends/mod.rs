pub mod utils;

pub mod iw;
pub mod mock;
pub mod wpa_cli;

pub mod wpa_supplicant_dbus;
