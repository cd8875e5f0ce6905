/// Component name shared by the vCard begin/end delimiters
pub const VCARD_COMPONENT: &str = "VCARD";
pub const VCARD_BEGIN: &str = const_str::concat!("BEGIN:", VCARD_COMPONENT);
pub const VCARD_END: &str = const_str::concat!("END:", VCARD_COMPONENT);

/// Version written by the exporter
pub const EXPORT_VERSION: &str = "3.0";
pub const EXPORT_VERSION_LINE: &str = const_str::concat!("VERSION:", EXPORT_VERSION);

/// Line terminator used on export
pub const CRLF: &str = "\r\n";

/// Default fold threshold in octets (RFC 2426 §2.6 / RFC 6350 §3.2)
pub const DEFAULT_MAX_LINE_OCTETS: usize = 75;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "ROLODEX";

/// Optional configuration file, looked up relative to the working directory
pub const CONFIG_FILE: &str = "rolodex.toml";
