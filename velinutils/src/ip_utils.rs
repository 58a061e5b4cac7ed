use get_if_addrs::get_if_addrs;
use std::collections::HashMap;
use std::net::UdpSocket;

/// Guess the local IP address of this machine.
///
/// Binds a UDP socket and "connects" it towards a public DNS server to ask
/// the operating system which interface would carry outbound traffic. No
/// packet is actually sent (UDP is connectionless).
///
/// Returns `"127.0.0.1"` if the interface cannot be determined.
pub fn guess_local_ip() -> String {
    match UdpSocket::bind("0.0.0.0:0") {
        Ok(socket) => {
            if socket.connect("8.8.8.8:80").is_ok() {
                if let Ok(local_addr) = socket.local_addr() {
                    return local_addr.ip().to_string();
                }
            }
            "127.0.0.1".to_string()
        }
        Err(_) => "127.0.0.1".to_string(),
    }
}

/// List the IPv4 addresses of all non-loopback network interfaces.
///
/// The returned map is keyed by interface name (`"eth0"`, `"en0"`, ...); the
/// values are the addresses bound to that interface. Loopback and IPv6
/// addresses are skipped.
pub fn list_lan_ips() -> HashMap<String, Vec<String>> {
    let mut result = HashMap::new();

    if let Ok(interfaces) = get_if_addrs() {
        for iface in interfaces {
            let ip = iface.ip();
            if ip.is_loopback() || !ip.is_ipv4() {
                continue;
            }
            result
                .entry(iface.name)
                .or_insert_with(Vec::new)
                .push(ip.to_string());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_local_ip_is_parseable() {
        let ip = guess_local_ip();
        assert!(ip.parse::<std::net::IpAddr>().is_ok());
    }

    #[test]
    fn test_list_lan_ips_excludes_loopback() {
        for addrs in list_lan_ips().values() {
            for addr in addrs {
                assert!(!addr.starts_with("127."));
            }
        }
    }
}
