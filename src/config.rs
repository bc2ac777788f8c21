use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub collector: CollectorConfig,
}

/// Where raw counters come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The running vmstats process itself.
    Process,
    /// A TOML recording replayed from disk.
    Recording,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub kind: SourceKind,
    #[serde(default)]
    pub recording_path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: OutputFormat,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            pretty: default_pretty(),
        }
    }
}

fn default_format() -> OutputFormat {
    OutputFormat::Json
}

fn default_pretty() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectorConfig {
    /// Log skipped memory pools and missing buffer pools at WARN instead of DEBUG.
    #[serde(default)]
    pub warn_on_skipped: bool,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.source.kind == SourceKind::Recording {
            anyhow::ensure!(
                !self.source.recording_path.is_empty(),
                "source.recording_path must be non-empty when source.kind = \"recording\""
            );
        }
        Ok(())
    }
}
