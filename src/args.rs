use std::{io, path::PathBuf};
use chrono::NaiveDate;
use clap::{Arg, ArgMatches, Command};
use crate::config::{Args, DEFAULT_OUTPUT, DEFAULT_PLAY_DIR};
use crate::error::SitemapError;

fn command() -> Command {
    Command::new("play-sitemap")
        .version("1.0")
        .about("Generate sitemap.xml for the game site from its static pages, categories and play/ directory.")
        .arg(
            Arg::new("source")
                .short('s')
                .long("source")
                .value_parser(clap::value_parser!(String))
                .value_name("SITE_DIR")
                .help("Site root containing the game directory (defaults to current directory if not provided)"),
        )
        .arg(
            Arg::new("play-dir")
                .short('p')
                .long("play-dir")
                .value_parser(clap::value_parser!(String))
                .default_value(DEFAULT_PLAY_DIR)
                .value_name("DIR")
                .help("Directory of game pages, relative to the site root"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(clap::value_parser!(String))
                .default_value(DEFAULT_OUTPUT)
                .value_name("FILE")
                .help("Sitemap file to write, relative to the site root"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_parser(clap::value_parser!(String))
                .value_name("FILE")
                .help("JSON file overriding the base URL, static pages, categories or popular titles"),
        )
        .arg(
            Arg::new("lastmod")
                .short('d')
                .long("lastmod")
                .value_parser(clap::value_parser!(String))
                .value_name("YYYY-MM-DD")
                .help("Date written to every <lastmod> (defaults to today)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(clap::ArgAction::SetTrue)
                .help("Enables verbose output"),
        )
}

/// parse command line arguments
pub fn parse_args() -> Result<Args, SitemapError> {
    args_from_matches(&command().get_matches())
}

fn args_from_matches(matches: &ArgMatches) -> Result<Args, SitemapError> {
    let source = resolve_source(matches.get_one::<String>("source"), std::env::current_dir)?;

    let lastmod = matches
        .get_one::<String>("lastmod")
        .map(|s| parse_lastmod(s))
        .transpose()?;

    // both have default values
    let play_dir = matches.get_one::<String>("play-dir").map_or(DEFAULT_PLAY_DIR, |s| s.as_str());
    let output = matches.get_one::<String>("output").map_or(DEFAULT_OUTPUT, |s| s.as_str());

    Ok(Args {
        source,
        play_dir: PathBuf::from(play_dir),
        output: PathBuf::from(output),
        config: matches.get_one::<String>("config").map(PathBuf::from),
        lastmod,
        verbose: matches.get_flag("verbose"),
    })
}

/// Explicit `--source`, else the working directory.
fn resolve_source(
    source: Option<&String>,
    current_dir: impl FnOnce() -> io::Result<PathBuf>,
) -> Result<PathBuf, SitemapError> {
    match source {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => current_dir().map_err(SitemapError::CurrentDir),
    }
}

pub fn parse_lastmod(value: &str) -> Result<NaiveDate, SitemapError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| SitemapError::InvalidDate(value.to_string()))
}
