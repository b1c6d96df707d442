//! CLI argument validation functions
//!
//! Custom value parsers for arguments clap cannot check on its own.

use std::fs;
use std::net::IpAddr;
use std::path::PathBuf;

/// Validate port number is within valid range (1-65535)
pub fn validate_port(port_str: &str) -> Result<u16, String> {
    let port: u16 = port_str.parse().map_err(|_| {
        format!(
            "Port must be a valid number between 1 and 65535, got: '{}'",
            port_str
        )
    })?;

    if port == 0 {
        return Err("Port must be between 1 and 65535. Port 0 is not allowed.".to_string());
    }

    Ok(port)
}

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!(
            "Cannot read configuration file '{}': {}",
            path_str, e
        )),
    }
}

/// Validate host address format
///
/// Accepts IP addresses and RFC 1123 style hostnames.
pub fn validate_host_address(host_str: &str) -> Result<String, String> {
    let host = host_str.trim();

    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }

    if host.parse::<IpAddr>().is_ok() {
        return Ok(host.to_string());
    }

    // Dotted digits that failed to parse as an IP
    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(format!("Invalid IPv4 address format: '{}'", host_str));
    }

    if host.len() > 253 {
        return Err("Host address is too long (maximum 253 characters)".to_string());
    }

    let valid_label = |label: &str| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    };
    if !host.split('.').all(valid_label) {
        return Err(format!("Invalid host name: '{}'", host_str));
    }

    Ok(host.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_port_validation() {
        for port_str in ["1", "80", "8080", "65535"] {
            assert!(validate_port(port_str).is_ok(), "Port {} should be valid", port_str);
        }
        for port_str in ["0", "65536", "abc", "-1", ""] {
            assert!(validate_port(port_str).is_err(), "Port {} should be invalid", port_str);
        }
    }

    #[test]
    fn test_host_validation() {
        for host in ["localhost", "0.0.0.0", "127.0.0.1", "::1", "jobs.example.com"] {
            assert!(validate_host_address(host).is_ok(), "Host {} should be valid", host);
        }
        for host in ["", "   ", "256.1.1.1", "1.2.3", "bad host", "-lead.example.com"] {
            assert!(validate_host_address(host).is_err(), "Host {:?} should be invalid", host);
        }
    }

    #[test]
    fn test_host_is_trimmed() {
        assert_eq!(validate_host_address(" localhost ").unwrap(), "localhost");
    }

    #[test]
    fn test_config_file_path_validation() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server]").unwrap();

        let path = file.path().to_str().unwrap();
        assert_eq!(validate_config_file_path(path).unwrap(), file.path());

        assert!(validate_config_file_path("/nonexistent/defer.toml").is_err());

        let dir = tempfile::TempDir::new().unwrap();
        assert!(validate_config_file_path(dir.path().to_str().unwrap()).is_err());
    }
}
