//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.meganav/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::desktop::HoverTiming;
use crate::core::hover::{HOVER_INTENT, LEAVE_INTENT};
use crate::core::responsive::{Breakpoints, ViewportClass};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MeganavConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub breakpoints: BreakpointConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub content_file: Option<String>,
    pub viewport: Option<ViewportClass>,
    pub link_mode: Option<LinkMode>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TimingConfig {
    pub hover_intent_ms: Option<u64>,
    pub leave_intent_ms: Option<u64>,
    pub slide_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BreakpointConfig {
    pub mobile_max: Option<u32>,
    pub tablet_max: Option<u32>,
    /// Pixel width one terminal column stands for.
    pub px_per_column: Option<u32>,
}

/// What happens when a real link is followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LinkMode {
    /// Hand the URL to the system browser.
    #[default]
    Open,
    /// Collect URLs and print them to stdout on exit.
    Print,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_SLIDE_MS: u64 = 180;
pub const DEFAULT_PX_PER_COLUMN: u32 = 8;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// `None` uses the embedded sample content.
    pub content_file: Option<PathBuf>,
    /// Pins the viewport class regardless of terminal width.
    pub viewport: Option<ViewportClass>,
    pub link_mode: LinkMode,
    pub timing: HoverTiming,
    pub slide: Duration,
    pub breakpoints: Breakpoints,
    pub px_per_column: u32,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&MeganavConfig::default(), &CliOverrides::default())
    }
}

/// Values taken from command-line flags. `None`/`false` means not given.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub content: Option<PathBuf>,
    pub viewport: Option<ViewportClass>,
    pub print_links: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.meganav/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".meganav").join("config.toml"))
}

/// Load config from `~/.meganav/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MeganavConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<MeganavConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(MeganavConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(MeganavConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: MeganavConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# meganav configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# content_file = "menu.toml"        # .toml or .json; relative to ~/.meganav/
# viewport = "desktop"              # "desktop", "tablet", "mobile"; or MEGANAV_VIEWPORT
# link_mode = "open"                # "open" (browser) or "print" (stdout on exit)

# [timing]
# hover_intent_ms = 120
# leave_intent_ms = 175
# slide_ms = 180

# [breakpoints]
# mobile_max = 767                  # widths in px, inclusive
# tablet_max = 1024
# px_per_column = 8                 # terminal columns are scaled by this
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &MeganavConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Content: CLI → env → config (relative to ~/.meganav/)
    let content_file = cli
        .content
        .clone()
        .or_else(|| std::env::var("MEGANAV_CONTENT").ok().map(PathBuf::from))
        .or_else(|| config.general.content_file.as_deref().map(config_relative));

    // Viewport: CLI → env → config → width-driven
    let viewport = cli
        .viewport
        .or_else(|| env_enum::<ViewportClass>("MEGANAV_VIEWPORT"))
        .or(config.general.viewport);

    // Link mode: --print-links → env → config → default
    let link_mode = if cli.print_links {
        LinkMode::Print
    } else {
        env_enum::<LinkMode>("MEGANAV_LINK_MODE")
            .or(config.general.link_mode)
            .unwrap_or_default()
    };

    let timing = &config.timing;

    ResolvedConfig {
        content_file,
        viewport,
        link_mode,
        timing: HoverTiming {
            hover_intent: timing
                .hover_intent_ms
                .map(Duration::from_millis)
                .unwrap_or(HOVER_INTENT),
            leave_intent: timing
                .leave_intent_ms
                .map(Duration::from_millis)
                .unwrap_or(LEAVE_INTENT),
        },
        slide: Duration::from_millis(timing.slide_ms.unwrap_or(DEFAULT_SLIDE_MS)),
        breakpoints: resolve_breakpoints(&config.breakpoints),
        px_per_column: config
            .breakpoints
            .px_per_column
            .filter(|px| *px > 0)
            .unwrap_or(DEFAULT_PX_PER_COLUMN),
    }
}

/// Configured breakpoints, or the defaults when they leave no tablet range.
fn resolve_breakpoints(config: &BreakpointConfig) -> Breakpoints {
    let defaults = Breakpoints::default();
    let breakpoints = Breakpoints {
        mobile_max: config.mobile_max.unwrap_or(defaults.mobile_max),
        tablet_max: config.tablet_max.unwrap_or(defaults.tablet_max),
    };
    if breakpoints.mobile_max >= breakpoints.tablet_max {
        warn!(
            "Ignoring breakpoints: mobile_max {} must be below tablet_max {}",
            breakpoints.mobile_max, breakpoints.tablet_max
        );
        return defaults;
    }
    breakpoints
}

fn config_relative(file: &str) -> PathBuf {
    let path = PathBuf::from(file);
    if path.is_absolute() {
        return path;
    }
    match dirs::home_dir() {
        Some(home) => home.join(".meganav").join(path),
        None => path,
    }
}

fn env_enum<T: ValueEnum>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match T::from_str(raw.trim(), true) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", key, raw, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = MeganavConfig::default();
        assert!(config.general.content_file.is_none());
        assert!(config.timing.slide_ms.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = MeganavConfig::default();
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.timing.hover_intent, Duration::from_millis(120));
        assert_eq!(resolved.timing.leave_intent, Duration::from_millis(175));
        assert_eq!(resolved.slide, Duration::from_millis(DEFAULT_SLIDE_MS));
        assert_eq!(resolved.breakpoints, Breakpoints::default());
        assert_eq!(resolved.px_per_column, DEFAULT_PX_PER_COLUMN);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = MeganavConfig {
            timing: TimingConfig {
                hover_intent_ms: Some(50),
                leave_intent_ms: Some(300),
                slide_ms: Some(0),
            },
            breakpoints: BreakpointConfig {
                mobile_max: Some(599),
                tablet_max: Some(899),
                px_per_column: Some(10),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.timing.hover_intent, Duration::from_millis(50));
        assert_eq!(resolved.timing.leave_intent, Duration::from_millis(300));
        assert_eq!(resolved.slide, Duration::ZERO);
        assert_eq!(resolved.breakpoints.mobile_max, 599);
        assert_eq!(resolved.breakpoints.tablet_max, 899);
        assert_eq!(resolved.px_per_column, 10);
    }

    #[test]
    fn test_zero_px_per_column_falls_back() {
        let config = MeganavConfig {
            breakpoints: BreakpointConfig {
                px_per_column: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            resolve(&config, &CliOverrides::default()).px_per_column,
            DEFAULT_PX_PER_COLUMN
        );
    }

    #[test]
    fn test_inverted_breakpoints_fall_back_to_defaults() {
        for (mobile_max, tablet_max) in [(900, 800), (800, 800)] {
            let config = MeganavConfig {
                breakpoints: BreakpointConfig {
                    mobile_max: Some(mobile_max),
                    tablet_max: Some(tablet_max),
                    ..Default::default()
                },
                ..Default::default()
            };
            let resolved = resolve(&config, &CliOverrides::default());
            assert_eq!(resolved.breakpoints, Breakpoints::default());
        }

        // Only one side set, still ordered against the other default.
        let config = MeganavConfig {
            breakpoints: BreakpointConfig {
                mobile_max: Some(2000),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.breakpoints, Breakpoints::default());
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = MeganavConfig {
            general: GeneralConfig {
                content_file: Some("/srv/menu.toml".to_string()),
                viewport: Some(ViewportClass::Mobile),
                link_mode: Some(LinkMode::Open),
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            content: Some(PathBuf::from("/tmp/other.json")),
            viewport: Some(ViewportClass::Tablet),
            print_links: true,
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.content_file, Some(PathBuf::from("/tmp/other.json")));
        assert_eq!(resolved.viewport, Some(ViewportClass::Tablet));
        assert_eq!(resolved.link_mode, LinkMode::Print);
    }

    #[test]
    fn test_absolute_content_path_kept() {
        assert_eq!(config_relative("/srv/menu.toml"), PathBuf::from("/srv/menu.toml"));
    }

    #[test]
    fn test_toml_parses_all_sections() {
        let toml_str = r#"
[general]
content_file = "menu.json"
viewport = "tablet"
link_mode = "print"

[timing]
hover_intent_ms = 90

[breakpoints]
tablet_max = 1100
"#;
        let config: MeganavConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.content_file.as_deref(), Some("menu.json"));
        assert_eq!(config.general.viewport, Some(ViewportClass::Tablet));
        assert_eq!(config.general.link_mode, Some(LinkMode::Print));
        assert_eq!(config.timing.hover_intent_ms, Some(90));
        assert!(config.timing.leave_intent_ms.is_none());
        assert_eq!(config.breakpoints.tablet_max, Some(1100));
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[timing]
slide_ms = 0
"#;
        let config: MeganavConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.timing.slide_ms, Some(0));
        assert!(config.general.viewport.is_none());
        assert!(config.breakpoints.mobile_max.is_none());
    }

    #[test]
    fn test_bad_viewport_is_parse_error() {
        let result: Result<MeganavConfig, _> = toml::from_str("[general]\nviewport = \"watch\"\n");
        assert!(result.is_err());
    }
}
