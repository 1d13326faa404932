use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::error::ExtractError;

/// Find the one workbook in `directory` whose file name contains `keyword`.
///
/// Zero candidates and several candidates are both errors; disambiguation is
/// the caller's problem, the candidate list travels in the error.
pub fn find_workbook(directory: &Path, keyword: &str) -> Result<PathBuf> {
    let entries = std::fs::read_dir(directory)
        .with_context(|| format!("Unable to read directory: {}", directory.display()))?;

    let mut candidates: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !is_workbook(&path) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
            && stem.contains(keyword)
        {
            candidates.push(path);
        }
    }
    candidates.sort();

    match candidates.len() {
        0 => Err(ExtractError::WorkbookNotFound {
            keyword: keyword.to_string(),
            directory: directory.display().to_string(),
        }
        .into()),
        1 => Ok(candidates.remove(0)),
        _ => Err(ExtractError::AmbiguousSelection {
            kind: "workbook".to_string(),
            keyword: keyword.to_string(),
            candidates: candidates
                .iter()
                .map(|path| path.display().to_string())
                .collect(),
        }
        .into()),
    }
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xlsm"))
}

/// Pick the worksheet to extract from.
///
/// An explicit override must name an existing sheet. Without one, a
/// single-sheet workbook resolves to that sheet, otherwise the unique sheet
/// name containing `keyword` wins.
pub fn resolve_sheet(
    sheet_names: &[String],
    override_name: Option<&str>,
    keyword: &str,
) -> Result<String, ExtractError> {
    if let Some(name) = override_name {
        return if sheet_names.iter().any(|candidate| candidate == name) {
            Ok(name.to_string())
        } else {
            Err(ExtractError::SheetNotFound {
                name: name.to_string(),
            })
        };
    }

    if let [only] = sheet_names {
        return Ok(only.clone());
    }

    let matching: Vec<&String> = sheet_names
        .iter()
        .filter(|name| name.contains(keyword))
        .collect();

    match matching.as_slice() {
        [] => Err(ExtractError::SheetNotFound {
            name: keyword.to_string(),
        }),
        [only] => Ok((*only).clone()),
        several => Err(ExtractError::AmbiguousSelection {
            kind: "worksheet".to_string(),
            keyword: keyword.to_string(),
            candidates: several.iter().map(|name| (*name).to_string()).collect(),
        }),
    }
}
