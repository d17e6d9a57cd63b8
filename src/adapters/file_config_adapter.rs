//! INI file configuration adapter.

use configparser::ini::Ini;
use std::path::Path;

use crate::ports::config_port::ConfigPort;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[simulation]
initial_cash = 10000.0
verbose = yes

[strategy]
kind = rsi
symbol = BTC
window = 14
"#;

    #[test]
    fn from_string_reads_values() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("strategy", "symbol"),
            Some("BTC".to_string())
        );
        assert_eq!(adapter.get_int("strategy", "window", 0), 14);
        assert!(
            (adapter.get_double("simulation", "initial_cash", 0.0) - 10_000.0).abs()
                < f64::EPSILON
        );
        assert!(adapter.get_bool("simulation", "verbose", false));
    }

    #[test]
    fn defaults_apply_for_missing_keys() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_string("strategy", "missing"), None);
        assert_eq!(adapter.get_int("strategy", "missing", 7), 7);
        assert!((adapter.get_double("strategy", "missing", 1.5) - 1.5).abs() < f64::EPSILON);
        assert!(adapter.get_bool("strategy", "missing", true));
    }

    #[test]
    fn bool_spellings() {
        let adapter =
            FileConfigAdapter::from_string("[a]\nx = True\ny = 0\nz = maybe\n").unwrap();
        assert!(adapter.get_bool("a", "x", false));
        assert!(!adapter.get_bool("a", "y", true));
        // unparseable falls back to the default
        assert!(adapter.get_bool("a", "z", true));
    }

    #[test]
    fn from_file_roundtrip() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{SAMPLE}").unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_int("strategy", "window", 0), 14);
    }

    #[test]
    fn from_file_missing_path_errors() {
        assert!(FileConfigAdapter::from_file("/nonexistent/ticksim.ini").is_err());
    }
}
