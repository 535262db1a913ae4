mod args;
mod config;
mod error;
mod io;
mod site_map;
mod xml;

use std::process::ExitCode;

use chrono::Local;

use crate::args::parse_args;
use crate::config::Args;
use crate::error::SitemapError;
use crate::io::{print_error, print_info, read_site_config, write_atomic};
use crate::site_map::build_site_map;
use crate::xml::{count_urls, generate_sitemap_xml};

fn main() -> ExitCode {
    let result = parse_args().and_then(|args| run(&args));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), SitemapError> {
    let site = read_site_config(args)?;

    println!("Generating complete sitemap for {}...", site.host());

    if args.verbose {
        print_info("Verbose mode enabled.");
        print_info(&format!("Site directory: {}", args.source.display()));
        print_info(&format!("Game directory: {}", args.play_dir.display()));
    }

    // one date for the whole run
    let lastmod = args
        .lastmod
        .unwrap_or_else(|| Local::now().date_naive())
        .format("%Y-%m-%d")
        .to_string();

    let play_dir = args.source.join(&args.play_dir);
    let entries = build_site_map(&site, &play_dir, &lastmod, args.verbose)?;
    let xml_content = generate_sitemap_xml(&entries);

    let sitemap_path = args.source.join(&args.output);
    write_atomic(&sitemap_path, &xml_content)?;

    if args.verbose {
        print_info(&format!(
            "Successfully generated sitemap.xml at: {}",
            sitemap_path.display()
        ));
    }

    println!("Sitemap generated successfully!");
    println!("Total URLs: {}", count_urls(&xml_content));
    println!("File saved as: {}", args.output.display());
    Ok(())
}
