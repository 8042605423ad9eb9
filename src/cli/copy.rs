//! The copy command: mirror referenced media into the target root.

use std::path::Path;

use anyhow::{Context, Result};

use crate::asset::copy_media_assets;
use crate::cli::Cli;
use crate::log;

/// Entry file name produced by the upstream bundle build.
const ENTRY_FILE: &str = "index.html";

/// Scan `<target>/index.html` and copy every referenced media asset from
/// the working directory into the target root.
pub fn run(cli: &Cli) -> Result<()> {
    let entry = cli.target.join(ENTRY_FILE);

    let copied = copy_media_assets(&entry, Path::new("."), &cli.target, true)
        .with_context(|| format!("copying media referenced by {}", entry.display()))?;

    log!("media"; "copied {} file{}", copied, if copied == 1 { "" } else { "s" });
    Ok(())
}
