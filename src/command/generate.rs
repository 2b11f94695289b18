use std::path::Path;

use anyhow::Result;

use super::bind_file;

pub fn generate(path: &Path) -> Result<()> {
    let (host, _) = bind_file(path)?;
    print!("{}", host.program().render());
    Ok(())
}
