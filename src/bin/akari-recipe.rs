//! Akari recipe CLI
//!
//! Usage:
//!   akari-recipe [TOKENS...]
//!
//! Declares the renderer's library dependencies for the Release build of the
//! current directory. Passing the token `embree` anywhere also requests
//! embree. All other tokens are ignored.

use akari_recipe::{ManifestBackend, manifest, output};
use anyhow::{Context, Result};
use clap::Parser;
use std::ffi::OsString;

#[derive(Parser)]
#[command(name = "akari-recipe")]
#[command(about = "Declare the Akari renderer's library dependencies")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Free-form tokens, not necessarily UTF-8; `embree` enables the embree dependency
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<OsString>,
}

fn main() {
    if let Err(e) = run() {
        output::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut backend = ManifestBackend::new();
    let declared = manifest::run(&mut backend, ".", &cli.tokens)
        .context("Failed to declare recipe dependencies")?;

    if let Some(path) = backend.written() {
        output::detail(&format!("wrote {}", path.display()));
    }
    output::success(&format!("{} dependencies declared", declared.len()));
    for (i, name) in declared.iter().enumerate() {
        let note = (name == manifest::CONDITIONAL).then_some("[conditional]");
        output::list_item(i + 1, name, note);
    }

    Ok(())
}
