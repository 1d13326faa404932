use indexmap::IndexMap;
use std::collections::BTreeSet;

use crate::cellref::CellRef;
use crate::error::ExtractError;
use crate::excel::Sheet;
use crate::layout::{HeaderRow, Layout};

/// Header fields the filters understand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    School,
    Class,
    Name,
}

impl FieldKind {
    /// Accepted header labels; the first match in column order wins.
    #[must_use]
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            FieldKind::School => &["school", "school name"],
            FieldKind::Class => &["class"],
            FieldKind::Name => &["name"],
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            FieldKind::School => "school",
            FieldKind::Class => "class",
            FieldKind::Name => "name",
        }
    }
}

/// A field label resolved to its header column.
#[derive(Clone, Debug)]
pub struct FieldHandle {
    pub kind: FieldKind,
    pub label: String,
    pub cell: CellRef,
}

/// Resolve a field to its header column, case-insensitively, before any row
/// traversal happens.
pub fn resolve_field(
    sheet_name: &str,
    header: &HeaderRow,
    kind: FieldKind,
) -> Result<FieldHandle, ExtractError> {
    for (cell, label) in header {
        let normalized = label.trim().to_lowercase();
        if kind.labels().contains(&normalized.as_str()) {
            return Ok(FieldHandle {
                kind,
                label: label.clone(),
                cell: *cell,
            });
        }
    }

    Err(ExtractError::MissingHeaderField {
        sheet: sheet_name.to_string(),
        field: kind.display_name().to_string(),
    })
}

/// Name-cell positions surviving a filter, with their name values.
///
/// Keyed by the record's name cell so that successive filters compose by
/// intersection instead of re-scanning the sheet.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionSet {
    entries: IndexMap<CellRef, String>,
}

impl SelectionSet {
    pub fn insert(&mut self, cell: CellRef, name: String) {
        self.entries.insert(cell, name);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, cell: &CellRef) -> Option<&str> {
        self.entries.get(cell).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellRef, &str)> {
        self.entries.iter().map(|(cell, name)| (*cell, name.as_str()))
    }

    /// Entries present in both sets with the same key and the same value.
    #[must_use]
    pub fn intersect(&self, other: &SelectionSet) -> SelectionSet {
        let entries = self
            .entries
            .iter()
            .filter(|(cell, name)| other.entries.get(*cell) == Some(name))
            .map(|(cell, name)| (*cell, name.clone()))
            .collect();

        SelectionSet { entries }
    }

    /// Row numbers of the surviving name cells.
    #[must_use]
    pub fn rows(&self) -> BTreeSet<usize> {
        self.entries.keys().map(|cell| cell.row).collect()
    }
}

/// Scan the data rows and keep the records whose `kind` column matches.
///
/// `None` is the wildcard criterion and keeps every record; a supplied value
/// matches by substring, so partial school or class names work. An empty cell
/// never matches and never raises.
pub fn filter_by_field(
    sheet: &Sheet,
    layout: &Layout,
    kind: FieldKind,
    criterion: Option<&str>,
) -> Result<SelectionSet, ExtractError> {
    let target = resolve_field(&sheet.name, &layout.header, kind)?;
    let name = resolve_field(&sheet.name, &layout.header, FieldKind::Name)?;

    let mut selection = SelectionSet::default();

    for row in layout.data_start_row()..=sheet.max_rows {
        let matched = match criterion {
            None => true,
            Some(value) => sheet.value(row, target.cell.col).contains(value),
        };

        if matched {
            selection.insert(
                CellRef::new(row, name.cell.col),
                sheet.value(row, name.cell.col).to_string(),
            );
        }
    }

    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::inspect;

    fn school_sheet() -> Sheet {
        Sheet::from_rows(
            "scores",
            &[
                vec!["Name", "School", "Class", "Score"],
                vec!["Alice", "Lincoln", "5A", "90"],
                vec!["Bob", "Lincoln", "5B", "70"],
                vec!["Carol", "Oak", "5A", "85"],
            ],
        )
    }

    #[test]
    fn school_filter_matches_by_substring() {
        let sheet = school_sheet();
        let layout = inspect(&sheet).unwrap();

        let selection = filter_by_field(&sheet, &layout, FieldKind::School, Some("Linc")).unwrap();

        assert_eq!(selection.len(), 2);
        assert_eq!(selection.get(&CellRef::new(2, 1)), Some("Alice"));
        assert_eq!(selection.get(&CellRef::new(3, 1)), Some("Bob"));
    }

    #[test]
    fn wildcard_keeps_every_record() {
        let sheet = school_sheet();
        let layout = inspect(&sheet).unwrap();

        let selection = filter_by_field(&sheet, &layout, FieldKind::School, None).unwrap();

        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn intersection_requires_equal_key_and_value() {
        let sheet = school_sheet();
        let layout = inspect(&sheet).unwrap();

        let by_school =
            filter_by_field(&sheet, &layout, FieldKind::School, Some("Lincoln")).unwrap();
        let by_class = filter_by_field(&sheet, &layout, FieldKind::Class, Some("5A")).unwrap();
        let combined = by_school.intersect(&by_class);

        assert_eq!(combined.len(), 1);
        assert_eq!(combined.get(&CellRef::new(2, 1)), Some("Alice"));
    }

    #[test]
    fn composed_filter_is_a_subset_of_each_side() {
        let sheet = school_sheet();
        let layout = inspect(&sheet).unwrap();

        let by_school =
            filter_by_field(&sheet, &layout, FieldKind::School, Some("Lincoln")).unwrap();
        let combined =
            by_school.intersect(&filter_by_field(&sheet, &layout, FieldKind::Class, Some("5A")).unwrap());

        for (cell, name) in combined.iter() {
            assert_eq!(by_school.get(&cell), Some(name));
        }
        assert!(combined.len() <= by_school.len());
    }

    #[test]
    fn missing_field_is_reported_with_its_name() {
        let sheet = Sheet::from_rows(
            "scores",
            &[vec!["Name", "Score"], vec!["Alice", "90"]],
        );
        let layout = inspect(&sheet).unwrap();

        let err = filter_by_field(&sheet, &layout, FieldKind::School, Some("Lincoln")).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::MissingHeaderField { ref field, .. } if field == "school"
        ));
    }

    #[test]
    fn missing_name_field_is_reported() {
        let sheet = Sheet::from_rows(
            "scores",
            &[vec!["School", "Score"], vec!["Lincoln", "90"]],
        );
        let layout = inspect(&sheet).unwrap();

        let err = filter_by_field(&sheet, &layout, FieldKind::School, None).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::MissingHeaderField { ref field, .. } if field == "name"
        ));
    }

    #[test]
    fn empty_cells_never_match_a_criterion() {
        let sheet = Sheet::from_rows(
            "scores",
            &[
                vec!["Name", "School", "Score"],
                vec!["Alice", "Lincoln", "90"],
                vec!["Bob", "", "70"],
            ],
        );
        let layout = inspect(&sheet).unwrap();

        let selection = filter_by_field(&sheet, &layout, FieldKind::School, Some("Lincoln")).unwrap();

        assert_eq!(selection.len(), 1);
        assert_eq!(selection.get(&CellRef::new(2, 1)), Some("Alice"));
    }

    #[test]
    fn resolution_accepts_synonyms_and_prefers_the_first_column() {
        let sheet = Sheet::from_rows(
            "scores",
            &[
                vec!["School Name", "Name", "School"],
                vec!["Lincoln", "Alice", "Oak"],
            ],
        );
        let layout = inspect(&sheet).unwrap();

        let handle = resolve_field(&sheet.name, &layout.header, FieldKind::School).unwrap();
        assert_eq!(handle.cell, CellRef::new(1, 1));
        assert_eq!(handle.label, "School Name");
    }

    #[test]
    fn subheader_shifts_the_scanned_rows() {
        let sheet = Sheet::from_rows(
            "scores",
            &[
                vec!["Name", "School"],
                vec!["full name", "school name"],
                vec!["Alice", "Lincoln"],
            ],
        );
        let layout = inspect(&sheet).unwrap();

        let selection = filter_by_field(&sheet, &layout, FieldKind::School, None).unwrap();

        // the sub-header row itself is not a record
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.get(&CellRef::new(3, 1)), Some("Alice"));
    }
}
