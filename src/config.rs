use std::{fmt, path::PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::SitemapError;

#[derive(Debug)]
pub struct Args {
    pub source: PathBuf,
    pub play_dir: PathBuf,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
    pub lastmod: Option<NaiveDate>,
    pub verbose: bool,
}

/// Crawl hint for how often a page changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFreq {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Crawl priority in `[0.0, 1.0]`, written back in its own decimal form.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "f64")]
pub struct Priority(f64);

impl TryFrom<f64> for Priority {
    type Error = SitemapError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if (0.0..=1.0).contains(&value) {
            // -0.0
            Ok(Priority(value.abs()))
        } else {
            Err(SitemapError::InvalidPriority(value))
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1 -> "1.0", 0.25 -> "0.25"
        if self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticPage {
    // Path relative to the site root, e.g., "/policy.html"
    pub path: String,
    pub priority: Priority,
    pub changefreq: ChangeFreq,
}

impl StaticPage {
    fn new(path: &str, priority: f64, changefreq: ChangeFreq) -> Self {
        StaticPage {
            path: path.to_string(),
            priority: Priority(priority),
            changefreq,
        }
    }
}

/// Everything about the site that ends up in the sitemap, apart from the
/// game files discovered on disk. Loaded from JSON; missing fields fall back
/// to the built-in site definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub base_url: String,
    pub static_pages: Vec<StaticPage>,
    pub categories: Vec<String>,
    pub popular_titles: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            static_pages: vec![
                StaticPage::new("/", 1.0, ChangeFreq::Daily),
                StaticPage::new("/policy.html", 0.3, ChangeFreq::Monthly),
                StaticPage::new("/term.html", 0.3, ChangeFreq::Monthly),
                StaticPage::new("/dmca.html", 0.3, ChangeFreq::Monthly),
                StaticPage::new("/sitemap.html", 0.5, ChangeFreq::Monthly),
            ],
            categories: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            popular_titles: DEFAULT_POPULAR_TITLES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SiteConfig {
    /// Base URL without a trailing slash, ready to prefix "/path" strings.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Host part of the base URL, used in the start-up banner.
    pub fn host(&self) -> &str {
        let base = self.base();
        base.split_once("://").map_or(base, |(_, rest)| rest)
    }
}

pub const DEFAULT_BASE_URL: &str = "https://geometry-dash-unbanned.github.io";
pub const DEFAULT_PLAY_DIR: &str = "play";
pub const DEFAULT_OUTPUT: &str = "sitemap.xml";

pub const DEFAULT_CATEGORIES: [&str; 18] = [
    "action", "adventure", "car", "fighting", "idle", "moto",
    "multiplayer", "new", "popular", "puzzle", "racing", "running",
    "shooting", "skill", "sports", "stickman", "threed", "twoplayer",
];

pub const DEFAULT_POPULAR_TITLES: [&str; 8] = [
    "8-ball-pool", "tunnel-rush", "slope", "retro-bowl",
    "smash-karts", "temple-run-2", "moto-x3m", "football-legends",
];

pub const FEATURED_TITLE: &str = "geometry-dash";

pub const FEATURED_PRIORITY: Priority = Priority(0.9);
pub const POPULAR_PRIORITY: Priority = Priority(0.8);
pub const DEFAULT_GAME_PRIORITY: Priority = Priority(0.7);
pub const CATEGORY_PRIORITY: Priority = Priority(0.8);

pub const COLOR_RED: &str = "\x1b[31m";
pub const COLOR_YELLOW: &str = "\x1b[33m";
pub const COLOR_CYAN: &str = "\x1b[36m";
pub const COLOR_RESET: &str = "\x1b[0m";
