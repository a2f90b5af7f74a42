use serde::{Deserialize, Serialize};

/// Persisted configuration — serial transport defaults and a default site
/// location, loaded via `confy`. No mount runtime state is ever part of
/// this struct; persisted state is limited to this static file.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub com: ComSettings,
    pub site: SiteDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ComSettings {
    /// `None` lets the CLI prompt for a path; callers of the library
    /// directly are expected to provide one.
    pub path: Option<String>,
    pub baud_rate: u32,
    pub timeout_millis: u64,
}

impl Default for ComSettings {
    fn default() -> Self {
        Self {
            path: None,
            baud_rate: 9600,
            timeout_millis: 50,
        }
    }
}

#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SiteDefaults {
    pub latitude: f32,
    pub longitude: f32,
}

impl Default for SiteDefaults {
    fn default() -> Self {
        Self {
            latitude: 51.47,
            longitude: 0.0,
        }
    }
}

/// Application name under which `confy` locates the platform config
/// directory.
const APP_NAME: &str = "exos2-mount-driver";

pub fn load() -> Result<Config, confy::ConfyError> {
    confy::load(APP_NAME, None)
}

pub fn store(config: &Config) -> Result<(), confy::ConfyError> {
    confy::store(APP_NAME, None, config)
}
