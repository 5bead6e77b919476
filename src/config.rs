//! Structural hooks and autoplay timing, loadable from a TOML file.
//!
//! ```toml
//! autoplay_interval_ms = 3000
//!
//! [hooks]
//! carousel = "my-carousel"
//! active_class = "current"
//! ```
//!
//! Keys left out keep their defaults, which match the page builder markup
//! the widgets were written against.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::constants::AUTOPLAY_INTERVAL;

/// Class and attribute names the widgets look for in the markup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Hooks {
    pub header: String,
    pub nav_toggle: String,
    pub expanded_attribute: String,
    pub carousel: String,
    pub slide_wrapper: String,
    pub slide: String,
    pub active_class: String,
    pub previous_control: String,
    pub next_control: String,
}

impl Default for Hooks {
    fn default() -> Self {
        Self {
            header: "site-header".into(),
            nav_toggle: "nav-toggle".into(),
            expanded_attribute: "aria-expanded".into(),
            carousel: "elementor-widget-media-carousel".into(),
            slide_wrapper: "swiper-wrapper".into(),
            slide: "swiper-slide".into(),
            active_class: "is-active".into(),
            previous_control: "elementor-swiper-button-prev".into(),
            next_control: "elementor-swiper-button-next".into(),
        }
    }
}

impl Hooks {
    fn named(&self) -> [(&'static str, &str); 9] {
        [
            ("header", self.header.as_str()),
            ("nav_toggle", self.nav_toggle.as_str()),
            ("expanded_attribute", self.expanded_attribute.as_str()),
            ("carousel", self.carousel.as_str()),
            ("slide_wrapper", self.slide_wrapper.as_str()),
            ("slide", self.slide.as_str()),
            ("active_class", self.active_class.as_str()),
            ("previous_control", self.previous_control.as_str()),
            ("next_control", self.next_control.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub autoplay_interval_ms: u64,
    pub hooks: Hooks,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: AUTOPLAY_INTERVAL.as_millis() as u64,
            hooks: Hooks::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.autoplay_interval_ms == 0 {
            bail!("autoplay_interval_ms must be greater than zero");
        }
        for (key, value) in self.hooks.named() {
            if value.trim().is_empty() {
                bail!("hook `{key}` must not be empty");
            }
            if value.chars().any(char::is_whitespace) {
                bail!("hook `{key}` must be a single class or attribute name, got {value:?}");
            }
        }
        Ok(())
    }

    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.autoplay_interval(), Duration::from_millis(5000));
        assert_eq!(config.hooks.slide, "swiper-slide");
    }

    #[test]
    fn partial_hooks_keep_other_defaults() {
        let config = Config::from_toml(
            r#"
            autoplay_interval_ms = 3000
            [hooks]
            carousel = "gallery"
            active_class = "current"
            "#,
        )
        .unwrap();
        assert_eq!(config.autoplay_interval_ms, 3000);
        assert_eq!(config.hooks.carousel, "gallery");
        assert_eq!(config.hooks.active_class, "current");
        assert_eq!(config.hooks.header, "site-header");
    }

    #[test]
    fn rejects_zero_interval() {
        let err = Config::from_toml("autoplay_interval_ms = 0").unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn rejects_blank_hook() {
        let err = Config::from_toml("[hooks]\nslide = \"  \"").unwrap_err();
        assert!(err.to_string().contains("slide"));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(Config::from_toml("autoplay = true").is_err());
    }

    #[test]
    fn load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("carousel.toml");
        fs::write(&path, "autoplay_interval_ms = 0").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("carousel.toml"));
    }
}
