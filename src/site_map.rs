use std::{fs, io, path::Path, sync::LazyLock};

use regex::Regex;

use crate::config::{
    ChangeFreq, Priority, SiteConfig, CATEGORY_PRIORITY, DEFAULT_GAME_PRIORITY, DEFAULT_PLAY_DIR,
    FEATURED_PRIORITY, FEATURED_TITLE, POPULAR_PRIORITY,
};
use crate::error::SitemapError;
use crate::io::{print_info, print_warning};

// Unreserved characters per RFC 3986; anything else would need escaping in a URL.
static URL_SAFE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._~-]+$").unwrap());

/// One `<url>` block of the sitemap.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: String,
    pub changefreq: ChangeFreq,
    pub priority: Priority,
}

impl SitemapEntry {
    pub fn new(loc: String, lastmod: &str, changefreq: ChangeFreq, priority: Priority) -> Self {
        SitemapEntry {
            loc,
            lastmod: lastmod.to_string(),
            changefreq,
            priority,
        }
    }

    /// Priority as written to the document, e.g. "0.8".
    pub fn priority_str(&self) -> String {
        self.priority.to_string()
    }
}

pub fn collect_static_entries(site: &SiteConfig, lastmod: &str) -> Vec<SitemapEntry> {
    site.static_pages
        .iter()
        .map(|page| {
            SitemapEntry::new(
                format!("{}{}", site.base(), page.path),
                lastmod,
                page.changefreq,
                page.priority,
            )
        })
        .collect()
}

pub fn collect_category_entries(site: &SiteConfig, lastmod: &str) -> Vec<SitemapEntry> {
    site.categories
        .iter()
        .map(|slug| {
            SitemapEntry::new(
                format!("{}/category/{}.html", site.base(), slug),
                lastmod,
                ChangeFreq::Weekly,
                CATEGORY_PRIORITY,
            )
        })
        .collect()
}

/// First match wins: the featured series, then any popular title, then the default.
pub fn game_priority(name: &str, popular_titles: &[String]) -> Priority {
    let name = name.to_lowercase();
    if name.contains(FEATURED_TITLE) {
        FEATURED_PRIORITY
    } else if popular_titles
        .iter()
        .any(|title| name.contains(&title.to_lowercase()))
    {
        POPULAR_PRIORITY
    } else {
        DEFAULT_GAME_PRIORITY
    }
}

pub fn is_url_safe(name: &str) -> bool {
    URL_SAFE_NAME.is_match(name)
}

/// Names of the `*.html` files directly inside `play_dir`, sorted.
/// A missing directory yields an empty list.
pub fn list_game_files(play_dir: &Path, verbose: bool) -> Result<Vec<String>, SitemapError> {
    let list_err = |source: io::Error| SitemapError::ListGames {
        path: play_dir.to_path_buf(),
        source,
    };

    if !play_dir.exists() {
        if verbose {
            print_info(&format!(
                "Game directory {} not found, skipping game pages.",
                play_dir.display()
            ));
        }
        return Ok(Vec::new());
    }
    if !play_dir.is_dir() {
        print_warning(&format!(
            "{} is not a directory, skipping game pages.",
            play_dir.display()
        ));
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(play_dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        let path = entry.path();

        let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
            print_warning(&format!("Skipped non UTF-8 file name: {}", path.display()));
            continue;
        };
        // same rules as a shell glob: hidden files never match "*"
        if name.starts_with('.') || !name.ends_with(".html") {
            continue;
        }
        if !path.is_file() {
            continue;
        }
        names.push(name.to_string());
    }

    names.sort();
    Ok(names)
}

pub fn collect_game_entries(
    site: &SiteConfig,
    play_dir: &Path,
    lastmod: &str,
    verbose: bool,
) -> Result<Vec<SitemapEntry>, SitemapError> {
    let url_dir = play_dir
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(DEFAULT_PLAY_DIR);

    let mut entries = Vec::new();
    for name in list_game_files(play_dir, verbose)? {
        if !is_url_safe(&name) {
            print_warning(&format!(
                "Game file name is not URL-safe, escaping it for <loc>: {}",
                name
            ));
        }

        let priority = game_priority(&name, &site.popular_titles);
        let entry = SitemapEntry::new(
            format!("{}/{}/{}", site.base(), url_dir, name),
            lastmod,
            ChangeFreq::Monthly,
            priority,
        );
        if verbose {
            print_info(&format!("Game page: {} (priority {})", name, entry.priority_str()));
        }
        entries.push(entry);
    }
    Ok(entries)
}

/// Static pages, then categories, then games.
pub fn build_site_map(
    site: &SiteConfig,
    play_dir: &Path,
    lastmod: &str,
    verbose: bool,
) -> Result<Vec<SitemapEntry>, SitemapError> {
    let mut entries = collect_static_entries(site, lastmod);
    entries.extend(collect_category_entries(site, lastmod));
    entries.extend(collect_game_entries(site, play_dir, lastmod, verbose)?);
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DATE: &str = "2024-05-01";

    fn popular() -> Vec<String> {
        SiteConfig::default().popular_titles
    }

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "<html></html>").unwrap();
    }

    #[test]
    fn featured_title_beats_popular_title() {
        assert_eq!(game_priority("geometry-dash-2.html", &popular()), FEATURED_PRIORITY);
        assert_eq!(game_priority("Geometry-Dash-Slope.html", &popular()), FEATURED_PRIORITY);
    }

    #[test]
    fn popular_titles_get_popular_priority() {
        for name in ["slope.html", "Retro-Bowl.html", "moto-x3m-winter.html", "8-ball-pool.html"] {
            assert_eq!(game_priority(name, &popular()).to_string(), "0.8", "{}", name);
        }
    }

    #[test]
    fn everything_else_gets_default_priority() {
        assert_eq!(game_priority("unknown-game.html", &popular()), DEFAULT_GAME_PRIORITY);
        assert_eq!(game_priority("geometry.html", &popular()), DEFAULT_GAME_PRIORITY);
    }

    #[test]
    fn static_entries_use_base_url_and_date() {
        let entries = collect_static_entries(&SiteConfig::default(), DATE);
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].loc, "https://geometry-dash-unbanned.github.io/");
        assert_eq!(entries[0].priority_str(), "1.0");
        assert_eq!(entries[0].changefreq, ChangeFreq::Daily);
        assert_eq!(entries[4].loc, "https://geometry-dash-unbanned.github.io/sitemap.html");
        assert_eq!(entries[4].priority_str(), "0.5");
        assert!(entries.iter().all(|e| e.lastmod == DATE));
    }

    #[test]
    fn category_entries_are_weekly() {
        let entries = collect_category_entries(&SiteConfig::default(), DATE);
        assert_eq!(entries.len(), 18);
        assert_eq!(entries[0].loc, "https://geometry-dash-unbanned.github.io/category/action.html");
        assert_eq!(entries[17].loc, "https://geometry-dash-unbanned.github.io/category/twoplayer.html");
        assert!(entries
            .iter()
            .all(|e| e.changefreq == ChangeFreq::Weekly && e.priority_str() == "0.8"));
    }

    #[test]
    fn configured_priority_is_written_verbatim() {
        let site: SiteConfig = serde_json::from_str(
            r#"{"static_pages": [{"path": "/faq.html", "priority": 0.85, "changefreq": "monthly"}]}"#,
        )
        .unwrap();
        let entries = collect_static_entries(&site, DATE);
        assert_eq!(entries[0].priority_str(), "0.85");
    }

    #[test]
    fn missing_game_directory_contributes_nothing() {
        let tmp = TempDir::new().unwrap();
        let entries = build_site_map(&SiteConfig::default(), &tmp.path().join("play"), DATE, false).unwrap();
        assert_eq!(entries.len(), 23);
    }

    #[test]
    fn empty_game_directory_contributes_nothing() {
        let tmp = TempDir::new().unwrap();
        let play = tmp.path().join("play");
        fs::create_dir(&play).unwrap();
        let entries = build_site_map(&SiteConfig::default(), &play, DATE, false).unwrap();
        assert_eq!(entries.len(), 23);
    }

    #[test]
    fn games_are_sorted_and_prioritised() {
        let tmp = TempDir::new().unwrap();
        let play = tmp.path().join("play");
        fs::create_dir(&play).unwrap();
        touch(&play, "unknown-game.html");
        touch(&play, "slope.html");
        touch(&play, "geometry-dash-2.html");

        let games = collect_game_entries(&SiteConfig::default(), &play, DATE, false).unwrap();
        let got: Vec<(&str, String, ChangeFreq)> = games
            .iter()
            .map(|e| (e.loc.as_str(), e.priority_str(), e.changefreq))
            .collect();
        assert_eq!(
            got,
            vec![
                ("https://geometry-dash-unbanned.github.io/play/geometry-dash-2.html", "0.9".to_string(), ChangeFreq::Monthly),
                ("https://geometry-dash-unbanned.github.io/play/slope.html", "0.8".to_string(), ChangeFreq::Monthly),
                ("https://geometry-dash-unbanned.github.io/play/unknown-game.html", "0.7".to_string(), ChangeFreq::Monthly),
            ]
        );
    }

    #[test]
    fn only_visible_html_files_are_listed() {
        let tmp = TempDir::new().unwrap();
        let play = tmp.path().join("play");
        fs::create_dir(&play).unwrap();
        touch(&play, "b.html");
        touch(&play, "a.html");
        touch(&play, ".hidden.html");
        touch(&play, "notes.txt");
        touch(&play, "page.htm");
        fs::create_dir(play.join("nested.html")).unwrap();
        touch(&play.join("nested.html"), "inner.html");

        assert_eq!(list_game_files(&play, false).unwrap(), vec!["a.html", "b.html"]);
    }

    #[test]
    fn sort_is_by_byte_order() {
        let tmp = TempDir::new().unwrap();
        let play = tmp.path().join("play");
        fs::create_dir(&play).unwrap();
        touch(&play, "alpha.html");
        touch(&play, "Zeta.html");
        touch(&play, "8-ball-pool.html");

        // digits < uppercase < lowercase
        assert_eq!(
            list_game_files(&play, false).unwrap(),
            vec!["8-ball-pool.html", "Zeta.html", "alpha.html"]
        );
    }

    #[test]
    fn url_safety_check() {
        assert!(is_url_safe("moto-x3m_2.html"));
        assert!(!is_url_safe("tom & jerry.html"));
        assert!(!is_url_safe("jeu-été.html"));
    }
}
