use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use xlsx_extract::error::ExtractError;
use xlsx_extract::excel::{Sheet, open_source, save_sheet};
use xlsx_extract::extract::extract_records;
use xlsx_extract::filter::{FieldKind, filter_by_field};
use xlsx_extract::layout::{Layout, build_destination, inspect};
use xlsx_extract::locate::{find_workbook, resolve_sheet};
use xlsx_extract::post;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Subject keyword used to pick the workbook (and sheet, unless --sheet is given)
    subject: String,

    /// File name to save the extracted workbook as (.xlsx is appended)
    filename: String,

    /// Title written into the new sheet; doubles as the new sheet's name
    title: String,

    /// Directory to search for the source workbook
    #[arg(long, short = 'd', default_value = ".")]
    directory: PathBuf,

    /// Read this worksheet instead of resolving one by the subject keyword
    #[arg(long, short = 's')]
    sheet: Option<String>,

    /// Keep only students of this school (substring match)
    #[arg(long)]
    school: Option<String>,

    /// Keep only students of this class (substring match)
    #[arg(long = "class")]
    class: Option<String>,

    /// Number the data rows 1..N in a new last column
    #[arg(long)]
    rank: bool,

    /// Columns whose maximum values get marked (all columns if given empty)
    #[arg(long = "mark-columns", num_args = 0.., value_name = "COLUMN")]
    mark_columns: Option<Vec<String>>,

    /// Font color for marked cells, as hex RGB
    #[arg(long = "mark-color", default_value = "FF0000")]
    mark_color: String,

    /// Columns to average into a new last row
    #[arg(long = "average-columns", num_args = 1.., value_name = "COLUMN")]
    average_columns: Option<Vec<String>>,

    /// Averaging mode: "normal" keeps zero scores, "normal no zero" drops them
    #[arg(long = "average-mode", default_value = "normal no zero")]
    average_mode: String,

    /// Append SECOND minus FIRST per row as a new column named NAME
    #[arg(long, num_args = 3, value_names = ["FIRST", "SECOND", "NAME"])]
    diff: Option<Vec<String>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let source_path = find_workbook(&cli.directory, &cli.subject)?;
    println!("Using workbook: {}", source_path.display());

    let workbook = open_source(&source_path)?;
    let sheet_name = resolve_sheet(&workbook.sheet_names(), cli.sheet.as_deref(), &cli.subject)?;
    let sheet = workbook
        .sheet(&sheet_name)
        .ok_or(ExtractError::SheetNotFound { name: sheet_name })?;

    let layout = inspect(sheet)?;

    // Wildcard over the name column first: a sheet without a name column
    // cannot be extracted at all, while a missing school or class column only
    // disables that one filter.
    let mut selection = filter_by_field(sheet, &layout, FieldKind::Name, None)?;
    for (kind, criterion) in [
        (FieldKind::School, cli.school.as_deref()),
        (FieldKind::Class, cli.class.as_deref()),
    ] {
        match filter_by_field(sheet, &layout, kind, criterion) {
            Ok(stage) => selection = selection.intersect(&stage),
            Err(err @ ExtractError::MissingHeaderField { .. }) => {
                eprintln!("Skipping {} filter: {err}", kind.display_name());
            }
            Err(err) => return Err(err.into()),
        }
    }

    let records = extract_records(sheet, &layout, &selection);
    println!("Extracted {} matching record(s)", records.len());

    let mut dest = build_destination(&cli.title, &cli.title, &layout, sheet.max_cols, &records);
    run_post_passes(&cli, &mut dest, &layout);

    let dest_path = cli.directory.join(format!("{}.xlsx", cli.filename));
    save_sheet(&dest, &dest_path)?;
    println!("Saved {}", dest_path.display());

    Ok(())
}

/// Post-processing over the rebuilt sheet, in a fixed order. A failed pass is
/// reported and skipped; the passes before and after it still apply.
fn run_post_passes(cli: &Cli, dest: &mut Sheet, layout: &Layout) {
    let header_row = if layout.title.is_some() { 2 } else { 1 };
    let subheader_row = layout.subheader.as_ref().map(|_| header_row + 1);
    let data_start_row = subheader_row.unwrap_or(header_row) + 1;

    let coerced = post::coerce_numeric(dest);
    println!("Coerced {coerced} cell(s) to numeric values");

    if let Some(columns) = &cli.diff {
        let (first, second, name) = (&columns[0], &columns[1], &columns[2]);
        match post::append_difference(dest, first, second, name, header_row, subheader_row) {
            Ok(()) => println!("Appended difference column {name} ({second} - {first})"),
            Err(err) => eprintln!("Skipping difference column: {err}"),
        }
    }

    if cli.rank {
        let ranked = dest.max_rows.saturating_sub(data_start_row - 1);
        post::append_rank(dest, data_start_row);
        println!("Ranked {ranked} data row(s)");
    }

    if let Some(columns) = &cli.average_columns {
        match post::AverageMode::from_str(&cli.average_mode) {
            None => eprintln!(
                "Skipping averages: {}",
                ExtractError::InvalidMode {
                    mode: cli.average_mode.clone(),
                }
            ),
            Some(mode) => match post::write_column_averages(dest, columns, mode) {
                Ok(()) => println!("Averaged {} column(s)", columns.len()),
                Err(err) => eprintln!("Skipping averages: {err}"),
            },
        }
    }

    if let Some(columns) = &cli.mark_columns {
        match u32::from_str_radix(cli.mark_color.trim_start_matches('#'), 16) {
            Err(_) => eprintln!("Skipping marks: invalid color '{}'", cli.mark_color),
            Ok(color) => match post::mark_column_maxima(dest, columns, color) {
                Ok(marked) => println!("Marked {marked} cell(s)"),
                Err(err) => eprintln!("Skipping marks: {err}"),
            },
        }
    }
}
