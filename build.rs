//! Build script for the zapdash CLI.
//!
//! Copies the `.env.example` configuration template from the crate root into the
//! user's local data directory so a fresh install has a ready-made template next to
//! the `.env` file the application reads at startup.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` to the platform-specific data directory.
///
/// The destination is:
/// - Linux: `~/.local/share/zapdash/.env.example`
/// - macOS: `~/Library/Application Support/zapdash/.env.example`
/// - Windows: `%LOCALAPPDATA%/zapdash/.env.example`
///
/// A missing template or a read-only data directory only produces a cargo warning;
/// the build itself never fails because of the template.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template = manifest_dir.join(".env.example");

    if !template.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            template.display()
        );
        return Ok(());
    }

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("zapdash");

    let copied = fs::create_dir_all(&out_dir)
        .and_then(|_| fs::read_to_string(&template))
        .and_then(|contents| fs::write(out_dir.join(".env.example"), contents));

    if let Err(e) = copied {
        println!(
            "cargo:warning=could not copy .env.example to {}: {}",
            out_dir.display(),
            e
        );
    }

    Ok(())
}
