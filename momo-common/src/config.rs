//! Configuration loading
//!
//! Settings are resolved once at startup and handed to every adapter by
//! reference. Priority order:
//! 1. Command-line arguments (applied by the binary)
//! 2. Environment variables (`MOMO_*`)
//! 3. TOML config file
//! 4. Compiled defaults
//!
//! A missing default config file is not an error; the service starts with
//! compiled defaults and logs a warning.

use crate::{Error, FadeCurve, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5000;

/// Config file name under the platform config directory
pub const CONFIG_FILE_NAME: &str = "momo.toml";

/// Complete service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomoConfig {
    /// Interface to bind
    pub host: String,

    /// HTTP server port
    pub port: u16,

    /// Directory served under `/static`; background tracks live in
    /// `<static_dir>/audio/background`
    pub static_dir: PathBuf,

    pub logging: LoggingConfig,

    /// Which provider backs each capability
    pub services: ServiceSelection,

    pub deepseek: ProviderCredentials,
    pub openai: ProviderCredentials,
    pub stability: ProviderCredentials,
    pub stable_audio: ProviderCredentials,
    pub replicate: ProviderCredentials,
    pub suno: ProviderCredentials,

    pub dalle: DalleSettings,

    /// Stable Diffusion engine id
    pub stability_engine: String,

    /// Requested length of generated background music
    pub music_duration_secs: u32,

    pub mixing: MixingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

/// Provider name per capability
///
/// Unknown names are not rejected here; each registry falls back to its
/// no-credential default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSelection {
    /// dalle | stability | replicate | unsplash
    pub image: String,
    /// stable-audio | musicgen | suno | library | smart
    pub music: String,
    /// openai
    pub tts: String,
}

/// API key and optional endpoint override for one provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderCredentials {
    pub api_key: Option<String>,
    /// Overrides the provider's public endpoint (proxies, test servers)
    pub base_url: Option<String>,
}

/// DALL-E request parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DalleSettings {
    /// dall-e-3 or dall-e-2
    pub model: String,
    /// 1024x1024, 1792x1024, 1024x1792
    pub size: String,
    /// standard or hd
    pub quality: String,
}

/// Narration mixing options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixingConfig {
    /// Merge narration and background on the server when the build
    /// supports it; otherwise clients receive a mix plan
    pub server_side: bool,
    /// Curve used for the fade-in; the fade-out uses its recommended pair
    pub fade_curve: FadeCurve,
}

impl Default for MomoConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from("static"),
            logging: LoggingConfig::default(),
            services: ServiceSelection::default(),
            deepseek: ProviderCredentials::default(),
            openai: ProviderCredentials::default(),
            stability: ProviderCredentials::default(),
            stable_audio: ProviderCredentials::default(),
            replicate: ProviderCredentials::default(),
            suno: ProviderCredentials::default(),
            dalle: DalleSettings::default(),
            stability_engine: "stable-diffusion-xl-1024-v1-0".to_string(),
            music_duration_secs: 30,
            mixing: MixingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for ServiceSelection {
    fn default() -> Self {
        Self {
            image: "dalle".to_string(),
            music: "stable-audio".to_string(),
            tts: "openai".to_string(),
        }
    }
}

impl Default for DalleSettings {
    fn default() -> Self {
        Self {
            model: "dall-e-3".to_string(),
            size: "1024x1024".to_string(),
            quality: "standard".to_string(),
        }
    }
}

impl Default for MixingConfig {
    fn default() -> Self {
        Self {
            server_side: true,
            fade_curve: FadeCurve::default(),
        }
    }
}

impl ProviderCredentials {
    /// Configured key, ignoring blank values
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn has_key(&self) -> bool {
        self.api_key().is_some()
    }

    /// Endpoint override, or `default` with any trailing slash removed
    pub fn base_url_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(default)
            .trim_end_matches('/')
    }
}

impl MomoConfig {
    /// Load configuration from TOML and the process environment
    ///
    /// `explicit` is a path given on the command line; failing to read or
    /// parse it is an error. Without it the platform default location is
    /// tried and silently skipped when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => {
                let config = Self::from_file(path)?;
                info!("Loaded configuration from {}", path.display());
                config
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => {
                    let config = Self::from_file(&path)?;
                    info!("Loaded configuration from {}", path.display());
                    config
                }
                _ => {
                    warn!("No config file found, using compiled defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// `<config_dir>/momo/momo.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("momo").join(CONFIG_FILE_NAME))
    }

    /// Apply `MOMO_*` variables from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(host) = get("MOMO_HOST") {
            self.host = host;
        }
        if let Some(port) = get("MOMO_PORT") {
            match port.trim().parse() {
                Ok(port) => self.port = port,
                Err(_) => warn!("Ignoring invalid MOMO_PORT value '{}'", port),
            }
        }
        if let Some(dir) = get("MOMO_STATIC_DIR") {
            self.static_dir = PathBuf::from(dir);
        }
        if let Some(level) = get("MOMO_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Some(service) = get("MOMO_IMAGE_SERVICE") {
            self.services.image = service;
        }
        if let Some(service) = get("MOMO_MUSIC_SERVICE") {
            self.services.music = service;
        }
        if let Some(service) = get("MOMO_TTS_SERVICE") {
            self.services.tts = service;
        }

        let keys: [(&str, &mut ProviderCredentials); 6] = [
            ("MOMO_DEEPSEEK_API_KEY", &mut self.deepseek),
            ("MOMO_OPENAI_API_KEY", &mut self.openai),
            ("MOMO_STABILITY_API_KEY", &mut self.stability),
            ("MOMO_STABLE_AUDIO_API_KEY", &mut self.stable_audio),
            ("MOMO_REPLICATE_API_KEY", &mut self.replicate),
            ("MOMO_SUNO_API_KEY", &mut self.suno),
        ];
        for (var, credentials) in keys {
            if let Some(key) = get(var) {
                credentials.api_key = Some(key);
            }
        }
        if let Some(url) = get("MOMO_OPENAI_BASE_URL") {
            self.openai.base_url = Some(url);
        }

        if let Some(flag) = get("MOMO_SERVER_SIDE_MIXING") {
            match parse_bool(&flag) {
                Some(enabled) => self.mixing.server_side = enabled,
                None => warn!("Ignoring invalid MOMO_SERVER_SIDE_MIXING value '{}'", flag),
            }
        }
        if let Some(curve) = get("MOMO_FADE_CURVE") {
            match FadeCurve::parse(&curve) {
                Some(curve) => self.mixing.fade_curve = curve,
                None => warn!("Ignoring unknown MOMO_FADE_CURVE value '{}'", curve),
            }
        }
    }

    /// Credential problems for the selected services
    ///
    /// Issues are reported, never fatal: every capability has a
    /// no-credential fallback.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.deepseek.has_key() {
            issues.push("MOMO_DEEPSEEK_API_KEY not configured".to_string());
        }

        match self.services.image.as_str() {
            "dalle" if !self.openai.has_key() => {
                issues.push("MOMO_OPENAI_API_KEY not configured for DALL-E".to_string())
            }
            "stability" if !self.stability.has_key() => {
                issues.push("MOMO_STABILITY_API_KEY not configured".to_string())
            }
            "replicate" if !self.replicate.has_key() => {
                issues.push("MOMO_REPLICATE_API_KEY not configured".to_string())
            }
            _ => {}
        }

        match self.services.music.as_str() {
            "suno" if !self.suno.has_key() => {
                issues.push("MOMO_SUNO_API_KEY not configured".to_string())
            }
            "stable-audio" if !self.stable_audio.has_key() => {
                issues.push("MOMO_STABLE_AUDIO_API_KEY not configured".to_string())
            }
            "musicgen" if !self.replicate.has_key() => {
                issues.push("MOMO_REPLICATE_API_KEY not configured for MusicGen".to_string())
            }
            _ => {}
        }

        if self.services.tts == "openai" && !self.openai.has_key() {
            issues.push("MOMO_OPENAI_API_KEY not configured for text-to-speech".to_string());
        }

        issues
    }

    /// Log which services are selected and which checks failed
    pub fn log_status(&self) {
        info!(
            poem = if self.deepseek.has_key() { "configured" } else { "missing key" },
            image = %self.services.image,
            music = %self.services.music,
            tts = %self.services.tts,
            "API configuration status"
        );
        for issue in self.validate() {
            warn!("Configuration: {}", issue);
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
