//! Output artifacts and staged inputs
//!
//! The generated commands are written as a flat text file, one command per
//! line. Uploaded spreadsheets are staged in temporary files that are removed
//! once the request is done with them.

mod artifact;
mod staging;

use std::path::Path;

use anyhow::{Context, Result};

pub use artifact::{ArtifactId, ArtifactStore};
pub use staging::StagedInput;

use crate::generate::GenerationResult;

/// Write the commands of `result` to `path`, one per line
pub fn write_commands<P: AsRef<Path>>(path: P, result: &GenerationResult) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    std::fs::write(path, result.to_text())
        .with_context(|| format!("Failed to write commands file: {}", path.display()))?;

    log::info!(
        "Wrote {} command(s) to: {}",
        result.commands.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::CommandRecord;

    fn result(commands: &[&str]) -> GenerationResult {
        GenerationResult {
            commands: commands
                .iter()
                .enumerate()
                .map(|(i, c)| CommandRecord {
                    row: i + 2,
                    command: c.to_string(),
                })
                .collect(),
            skipped: Vec::new(),
        }
    }

    #[test]
    fn test_write_commands_newline_joined() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("generated_commands.txt");

        write_commands(&path, &result(&["Mod A;", "Mod B;"])).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Mod A;\nMod B;");
    }

    #[test]
    fn test_write_commands_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        write_commands(&path, &result(&["备注=测试;"])).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "备注=测试;");
    }
}
