//! `drydock icons` command

use anyhow::{bail, Result};

use crate::cli::IconsArgs;
use drydock::ops::icons::{collect_icons, index_icons};

pub fn execute(args: IconsArgs) -> Result<()> {
    let files = match args.dir {
        Some(ref dir) => collect_icons(dir),
        None => args.paths,
    };

    if files.is_empty() {
        bail!("no icon files given; pass paths or --dir");
    }

    let index = index_icons(&files)?;

    for (name, path) in &index {
        println!("{} -> {}", name, path.display());
    }

    Ok(())
}
