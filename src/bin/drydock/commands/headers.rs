//! `drydock headers` command

use anyhow::Result;

use crate::cli::HeadersArgs;
use drydock::ops::headers::dump_headers;

pub fn execute(args: HeadersArgs) -> Result<()> {
    let mut unreadable = 0;

    for dump in dump_headers(&args.paths) {
        match dump.content {
            Ok(content) => {
                println!("// {}", dump.path.display());
                print!("{}", content);
                if !content.ends_with('\n') {
                    println!();
                }
            }
            Err(e) => {
                tracing::warn!("{}", e);
                unreadable += 1;
            }
        }
    }

    if unreadable > 0 {
        tracing::warn!("{} header(s) could not be read", unreadable);
    }

    Ok(())
}
