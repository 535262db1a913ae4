use crate::config::{Args, SiteConfig, COLOR_CYAN, COLOR_RED, COLOR_RESET, COLOR_YELLOW};
use crate::error::SitemapError;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tempfile::Builder;

pub fn print_error(message: &str) {
    eprintln!("{}ERROR{}: {}", COLOR_RED, COLOR_RESET, message);
}

pub fn print_warning(message: &str) {
    eprintln!("{}WARNING{}: {}", COLOR_YELLOW, COLOR_RESET, message);
}

pub fn print_info(message: &str) {
    eprintln!("{}INFO{}: {}", COLOR_CYAN, COLOR_RESET, message);
}

/// Loads the site definition, falling back to the built-in one when no
/// config file was given.
pub fn read_site_config(args: &Args) -> Result<SiteConfig, SitemapError> {
    let Some(config_path) = args.config.as_ref().map(|p| args.source.join(p)) else {
        return Ok(SiteConfig::default());
    };

    if args.verbose {
        print_info(&format!(
            "Attempting to read site config from: {}",
            config_path.display()
        ));
    }

    let raw = fs::read_to_string(&config_path).map_err(|source| SitemapError::ReadConfig {
        path: config_path.clone(),
        source,
    })?;

    let config: SiteConfig =
        serde_json::from_str(&raw).map_err(|source| SitemapError::ParseConfig {
            path: config_path.clone(),
            source,
        })?;

    if args.verbose {
        print_info(&format!(
            "Loaded {} static pages, {} categories and {} popular titles.",
            config.static_pages.len(),
            config.categories.len(),
            config.popular_titles.len()
        ));
    }
    Ok(config)
}

/// Replaces `path` with `contents` in one rename. The data goes to a
/// temporary file next to the target first, so a failed run leaves the
/// previous file untouched and no temporary file behind. The target's
/// permissions survive the replacement.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), SitemapError> {
    let write_err = |source| SitemapError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    // a replaced file keeps its mode; a new one gets the umask default
    let existing = match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(write_err(e)),
    };

    let mut builder = Builder::new();
    #[cfg(unix)]
    builder.permissions(fs::Permissions::from_mode(0o666));

    let mut tmp = builder.tempfile_in(&parent).map_err(write_err)?;
    if let Some(permissions) = existing {
        tmp.as_file().set_permissions(permissions).map_err(write_err)?;
    }
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
