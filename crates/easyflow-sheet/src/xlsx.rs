//! Minimal `.xlsx` reader.
//!
//! Reads the first worksheet of a workbook package: shared strings,
//! inline strings, formula string results, booleans, errors and numbers.
//! Styles, dates and formulas themselves are not interpreted.

use std::collections::BTreeMap;
use std::io::{Read, Seek};

use easyflow_core::models::scalar::Scalar;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::LoadError;
use crate::table::RawTable;

const WORKBOOK: &str = "xl/workbook.xml";
const WORKBOOK_RELS: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS: &str = "xl/sharedStrings.xml";
const FALLBACK_SHEET: &str = "xl/worksheets/sheet1.xml";

/// Columns in a worksheet; the last one is `XFD`.
pub const MAX_COLUMNS: usize = 16_384;

pub fn read_table<R: Read + Seek>(reader: R) -> Result<RawTable, LoadError> {
    let mut archive = ZipArchive::new(reader)?;

    let shared = match read_part(&mut archive, SHARED_STRINGS)? {
        Some(xml) => parse_shared_strings(&xml)?,
        None => Vec::new(),
    };

    let sheet_path = first_sheet_path(&mut archive)?;
    let xml = read_part(&mut archive, &sheet_path)?
        .ok_or_else(|| LoadError::Xlsx(format!("worksheet part missing: {sheet_path}")))?;

    let grid = parse_sheet(&xml, &shared)?;
    tracing::debug!(sheet = %sheet_path, rows = grid.len(), "worksheet parsed");
    Ok(RawTable::from_grid(grid))
}

fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>, LoadError> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut xml = String::new();
    file.read_to_string(&mut xml)?;
    Ok(Some(xml))
}

/// Resolve the part name of the first sheet listed in the workbook.
fn first_sheet_path<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<String, LoadError> {
    let Some(workbook) = read_part(archive, WORKBOOK)? else {
        return Ok(FALLBACK_SHEET.to_string());
    };
    let Some(rel_id) = first_sheet_rel_id(&workbook)? else {
        return Ok(FALLBACK_SHEET.to_string());
    };
    let Some(rels) = read_part(archive, WORKBOOK_RELS)? else {
        return Ok(FALLBACK_SHEET.to_string());
    };

    Ok(relationship_target(&rels, &rel_id)?
        .map(|target| match target.strip_prefix('/') {
            Some(absolute) => absolute.to_string(),
            None => format!("xl/{target}"),
        })
        .unwrap_or_else(|| FALLBACK_SHEET.to_string()))
}

fn first_sheet_rel_id(workbook_xml: &str) -> Result<Option<String>, LoadError> {
    let mut reader = Reader::from_str(workbook_xml);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sheet" => {
                // `r:id`; the prefix varies between producers.
                return attribute(&e, b"id");
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

fn relationship_target(rels_xml: &str, id: &str) -> Result<Option<String>, LoadError> {
    let mut reader = Reader::from_str(rels_xml);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e)
                if e.local_name().as_ref() == b"Relationship"
                    && attribute(&e, b"Id")?.as_deref() == Some(id) =>
            {
                return attribute(&e, b"Target");
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

/// Read an attribute by local name, unescaped.
fn attribute(e: &BytesStart<'_>, local_name: &[u8]) -> Result<Option<String>, LoadError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == local_name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Parse `xl/sharedStrings.xml`. Rich-text runs are concatenated; phonetic
/// hints (`rPh`) are skipped.
pub fn parse_shared_strings(xml: &str) -> Result<Vec<String>, LoadError> {
    let mut reader = Reader::from_str(xml);
    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_text = false;
    let mut in_phonetic = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => current.clear(),
                b"t" => in_text = !in_phonetic,
                b"rPh" => in_phonetic = true,
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"si" => strings.push(std::mem::take(&mut current)),
                b"t" => in_text = false,
                b"rPh" => in_phonetic = false,
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
            Event::Text(t) if in_text => current.push_str(&t.unescape()?),
            Event::CData(t) if in_text => current.push_str(&String::from_utf8_lossy(&t)),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(strings)
}

#[derive(Default)]
struct CellState {
    column: usize,
    cell_type: Option<String>,
    value: String,
    in_value: bool,
    in_inline: bool,
    in_text: bool,
}

/// Parse a worksheet part into a dense grid of cells, one `Vec` per `<row>`.
pub fn parse_sheet(xml: &str, shared: &[String]) -> Result<Vec<Vec<Scalar>>, LoadError> {
    let mut reader = Reader::from_str(xml);
    let mut grid = Vec::new();
    let mut row: Option<BTreeMap<usize, Scalar>> = None;
    let mut cell: Option<CellState> = None;
    let mut next_column = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"row" => {
                    row = Some(BTreeMap::new());
                    next_column = 0;
                }
                b"c" => {
                    let column = cell_column(&e)?.unwrap_or(next_column);
                    if column >= MAX_COLUMNS {
                        return Err(LoadError::Xlsx("row is wider than column XFD".to_string()));
                    }
                    next_column = column + 1;
                    cell = Some(CellState {
                        column,
                        cell_type: attribute(&e, b"t")?,
                        ..CellState::default()
                    });
                }
                b"v" => set_flag(&mut cell, |c| c.in_value = true),
                b"is" => set_flag(&mut cell, |c| c.in_inline = true),
                b"t" => set_flag(&mut cell, |c| c.in_text = c.in_inline),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"row" => grid.push(Vec::new()),
                b"c" => {
                    // A styled but valueless cell still occupies its column.
                    next_column = cell_column(&e)?.unwrap_or(next_column) + 1;
                }
                _ => {}
            },
            Event::Text(t) => {
                if let Some(c) = cell.as_mut()
                    && (c.in_value || c.in_text)
                {
                    c.value.push_str(&t.unescape()?);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"v" => set_flag(&mut cell, |c| c.in_value = false),
                b"t" => set_flag(&mut cell, |c| c.in_text = false),
                b"is" => set_flag(&mut cell, |c| c.in_inline = false),
                b"c" => {
                    if let (Some(c), Some(cells)) = (cell.take(), row.as_mut()) {
                        let column = c.column;
                        cells.insert(column, cell_value(c, shared)?);
                    }
                }
                b"row" => {
                    if let Some(cells) = row.take() {
                        grid.push(densify(cells));
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(grid)
}

fn set_flag(cell: &mut Option<CellState>, f: impl FnOnce(&mut CellState)) {
    if let Some(c) = cell.as_mut() {
        f(c);
    }
}

fn cell_column(e: &BytesStart<'_>) -> Result<Option<usize>, LoadError> {
    let Some(reference) = attribute(e, b"r")? else {
        return Ok(None);
    };
    let has_letters = reference.bytes().next().is_some_and(|b| b.is_ascii_alphabetic());
    match column_index(&reference) {
        Some(column) => Ok(Some(column)),
        None if has_letters => Err(LoadError::Xlsx(format!(
            "cell reference {reference} is beyond column XFD"
        ))),
        None => Ok(None),
    }
}

/// Zero-based column index of a cell reference: `A1` → 0, `AB12` → 27.
/// `None` without a column part or past the last worksheet column.
pub fn column_index(reference: &str) -> Option<usize> {
    let mut index = 0usize;
    let mut letters = 0;
    for b in reference.bytes().take_while(|b| b.is_ascii_alphabetic()) {
        let digit = (b.to_ascii_uppercase() - b'A' + 1) as usize;
        index = index.checked_mul(26)?.checked_add(digit)?;
        if index > MAX_COLUMNS {
            return None;
        }
        letters += 1;
    }
    (letters > 0).then(|| index - 1)
}

fn cell_value(cell: CellState, shared: &[String]) -> Result<Scalar, LoadError> {
    if cell.value.is_empty() {
        return Ok(Scalar::Empty);
    }

    let value = match cell.cell_type.as_deref() {
        Some("s") => {
            let index: usize = cell
                .value
                .trim()
                .parse()
                .map_err(|_| LoadError::Xlsx(format!("bad shared string index: {}", cell.value)))?;
            let text = shared.get(index).ok_or_else(|| {
                LoadError::Xlsx(format!("shared string index out of range: {index}"))
            })?;
            Scalar::Text(text.clone())
        }
        Some("b") => Scalar::Text(if cell.value.trim() == "1" { "TRUE" } else { "FALSE" }.into()),
        Some("inlineStr") | Some("str") | Some("e") | Some("d") => Scalar::Text(cell.value),
        _ => match cell.value.trim().parse::<f64>() {
            Ok(n) => Scalar::Number(n),
            Err(_) => Scalar::Text(cell.value),
        },
    };

    Ok(value)
}

fn densify(cells: BTreeMap<usize, Scalar>) -> Vec<Scalar> {
    let width = cells.keys().next_back().map_or(0, |last| last + 1);
    let mut row = vec![Scalar::Empty; width];
    for (column, value) in cells {
        row[column] = value;
    }
    row
}
