//! # File System Operations Module / 文件系统操作模块
//!
//! This module locates solution directories and reads their optional data
//! files: the test blocks, the settings file and `data.json`.
//!
//! 此模块负责定位解答目录并读取其中可选的数据文件：
//! 测试块、设置文件和 `data.json`。

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Lists the solution directories under `dir`, skipping names that start
/// with `_`. A missing directory has no solutions.
///
/// # Arguments
/// * `dir` - The solutions directory
///
/// # Returns
/// The directory names with their last modification time
pub fn solution_dirs(dir: &Path) -> Result<Vec<(String, SystemTime)>> {
    if !is_directory(dir) {
        return Ok(Vec::new());
    }

    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read solutions directory: {}", dir.display()))?
    {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('_') || !entry.file_type()?.is_dir() {
            continue;
        }
        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .with_context(|| format!("Failed to read modification time of {name}"))?;
        dirs.push((name, modified));
    }
    Ok(dirs)
}

/// Picks the most recently modified solution directory accepted by `known`.
pub fn last_modified_solution(dir: &Path, known: impl Fn(&str) -> bool) -> Result<Option<String>> {
    let mut dirs = solution_dirs(dir)?;
    dirs.retain(|(name, _)| known(name));
    dirs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Ok(dirs.into_iter().next().map(|(name, _)| name))
}

#[derive(Deserialize)]
struct SolutionData {
    #[serde(default)]
    id: Option<u64>,
}

/// Finds the solution whose data file carries problem id `id`.
///
/// # Arguments
/// * `dir` - The solutions directory
/// * `data_file_name` - Name of the per-solution data file (`data.json`)
/// * `id` - The problem id to look for
pub fn find_solution_by_id(dir: &Path, data_file_name: &str, id: u64) -> Result<Option<String>> {
    for (name, _) in solution_dirs(dir)? {
        let path = dir.join(&name).join(data_file_name);
        let Some(content) = read_optional(&path)? else {
            continue;
        };
        let data: SolutionData = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        if data.id == Some(id) {
            return Ok(Some(name));
        }
    }
    Ok(None)
}

/// Reads a text file, `None` if it does not exist.
pub fn read_optional(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Checks if a path exists and is a directory.
pub fn is_directory(path: &Path) -> bool {
    path.exists() && path.is_dir()
}
