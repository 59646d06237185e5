//! Versions command - Inspect the versions declared by a readme.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use specsnap_readme::{declared_tag, scan_all_versions, select_best, ReadmeReader};

#[derive(Args)]
pub struct VersionsArgs {
    /// Readme file, or a folder containing readme.md
    path: PathBuf,

    /// Print the declared versions as JSON
    #[arg(long)]
    json: bool,
}

pub fn execute(args: VersionsArgs) -> Result<()> {
    let path = if args.path.is_dir() {
        args.path.join("readme.md")
    } else {
        args.path
    };

    let Some(contents) = ReadmeReader::read(&path)? else {
        bail!("Readme not found: {}", path.display());
    };

    let versions = scan_all_versions(&contents);

    if args.json {
        let json = serde_json::to_string_pretty(&versions).context("Failed to serialize versions")?;
        println!("{}", json);
        return Ok(());
    }

    let active = declared_tag(&contents);
    let best = select_best(&versions).map(|v| v.tag().clone());

    println!("📋 {} versions declared in {}", versions.len(), path.display());
    for version in &versions {
        let mut marks = Vec::new();
        if active.as_ref() == Some(version.tag()) {
            marks.push("active");
        }
        if best.as_ref() == Some(version.tag()) {
            marks.push("best");
        }
        let marks = if marks.is_empty() {
            String::new()
        } else {
            format!(" ({})", marks.join(", "))
        };
        println!(
            "   - {} [{} files]{}",
            version.tag(),
            version.input_files().len(),
            marks
        );
    }

    match active {
        Some(tag) => println!("\nActive tag: {}", tag),
        None => println!("\n⚠️  No active tag declared"),
    }

    Ok(())
}
