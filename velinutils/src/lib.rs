//! Network utilities shared by the Velin crates.
//!
//! # Main functions
//!
//! - [`guess_local_ip`]: guess the local IP address used for outbound traffic
//! - [`list_lan_ips`]: list the IPv4 addresses of every non-loopback interface

mod ip_utils;

pub use ip_utils::{guess_local_ip, list_lan_ips};
