use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Default chat-completions endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
/// General-purpose chat model.
pub const DEFAULT_TEXT_MODEL: &str = "llama-3.3-70b-versatile";
/// Vision-capable model used for image description.
pub const DEFAULT_VISION_MODEL: &str = "llama-3.2-90b-vision-preview";

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChimeraConfig {
    pub completion: CompletionConfig,
    pub voice: VoiceConfig,
}

impl ChimeraConfig {
    /// Load config from a TOML file, falling back to defaults for missing
    /// fields. After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: ChimeraConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if the file doesn't exist, return defaults with
    /// env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("CHIMERA_BASE_URL") {
            self.completion.base_url = v;
        }
        if let Ok(v) = std::env::var("CHIMERA_TEXT_MODEL") {
            self.completion.text_model = v;
        }
        if let Ok(v) = std::env::var("CHIMERA_VISION_MODEL") {
            self.completion.vision_model = v;
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub base_url: String,
    pub text_model: String,
    pub vision_model: String,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
        }
    }
}

/// Process-wide voice settings, fixed at startup and handed to the concrete
/// capture/synthesis backends by the embedding application.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Speech rate in words per minute.
    pub rate: u32,
    /// Playback volume in [0.0, 1.0].
    pub volume: f32,
    /// Recognizer energy threshold; utterances below it are ignored.
    pub energy_threshold: u32,
    /// Let the recognizer adapt the threshold to ambient noise.
    pub dynamic_energy_threshold: bool,
    /// Token cap for the spoken reply. Kept short for voice.
    pub reply_max_tokens: u32,
    /// Sampling temperature for the spoken reply.
    pub reply_temperature: f32,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            rate: 180,
            volume: 0.9,
            energy_threshold: 300,
            dynamic_energy_threshold: true,
            reply_max_tokens: 150,
            reply_temperature: 0.7,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ChimeraConfig::default();
        assert_eq!(cfg.completion.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.completion.text_model, "llama-3.3-70b-versatile");
        assert_eq!(cfg.completion.vision_model, "llama-3.2-90b-vision-preview");
        assert_eq!(cfg.voice.rate, 180);
        assert!((cfg.voice.volume - 0.9).abs() < f32::EPSILON);
        assert!(cfg.voice.dynamic_energy_threshold);
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_str = r#"
[completion]
text_model = "llama-3.1-8b-instant"
"#;
        let cfg: ChimeraConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.completion.text_model, "llama-3.1-8b-instant");
        // Defaults for unspecified fields
        assert_eq!(cfg.completion.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.voice.energy_threshold, 300);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[completion]
base_url = "http://localhost:8080/v1"
text_model = "test-text"
vision_model = "test-vision"

[voice]
rate = 200
volume = 0.5
energy_threshold = 150
dynamic_energy_threshold = false
reply_max_tokens = 80
reply_temperature = 0.2
"#;
        let cfg: ChimeraConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.completion.base_url, "http://localhost:8080/v1");
        assert_eq!(cfg.completion.vision_model, "test-vision");
        assert_eq!(cfg.voice.rate, 200);
        assert_eq!(cfg.voice.reply_max_tokens, 80);
        assert!(!cfg.voice.dynamic_energy_threshold);
    }

    #[test]
    fn test_env_overrides_and_defaults() {
        // Part 1: env overrides
        std::env::set_var("CHIMERA_TEXT_MODEL", "override-model");

        let mut cfg = ChimeraConfig::default();
        cfg.apply_env_overrides();
        assert_eq!(cfg.completion.text_model, "override-model");

        std::env::remove_var("CHIMERA_TEXT_MODEL");

        // Part 2: nonexistent path returns defaults (no env interference)
        let cfg = ChimeraConfig::load_or_default("/nonexistent/path.toml");
        assert_eq!(cfg.completion.text_model, DEFAULT_TEXT_MODEL);
    }
}
