use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::model::{CompanyRecord, ContactRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable<T> {
    pub headers: Vec<String>,
    pub records: Vec<T>,
}

pub fn render_csv<'a, R>(headers: &[String], rows: impl IntoIterator<Item = R>) -> String
where
    R: IntoIterator<Item = &'a str>,
{
    let mut output = render_row(headers.iter().map(String::as_str));
    output.push('\n');
    for row in rows {
        output.push_str(&render_row(row));
        output.push('\n');
    }
    output
}

pub fn write_csv_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

pub fn read_company_csv(path: &Path) -> Result<CsvTable<CompanyRecord>> {
    let (headers, rows) = read_table(path)?;
    let records = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            CompanyRecord::from_row(row)
                .with_context(|| format!("invalid row {} in {}", index + 2, path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(CsvTable { headers, records })
}

pub fn read_contact_csv(path: &Path) -> Result<CsvTable<ContactRecord>> {
    let (headers, rows) = read_table(path)?;
    let records = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            ContactRecord::from_row(row)
                .with_context(|| format!("invalid row {} in {}", index + 2, path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(CsvTable { headers, records })
}

fn read_table(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let mut rows = parse_csv(&raw).with_context(|| format!("failed to parse {}", path.display()))?;
    if rows.is_empty() {
        bail!("missing header row in {}", path.display());
    }
    let headers = rows.remove(0);
    Ok((headers, rows))
}

pub fn parse_csv(input: &str) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut row_started = false;
    let mut chars = input.chars().peekable();

    while let Some(character) = chars.next() {
        if in_quotes {
            if character == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(character);
            }
            continue;
        }

        match character {
            '"' => {
                in_quotes = true;
                row_started = true;
            }
            ',' => {
                row.push(std::mem::take(&mut field));
                row_started = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                row_started = false;
            }
            _ => {
                field.push(character);
                row_started = true;
            }
        }
    }

    if in_quotes {
        bail!("unterminated quoted field");
    }
    if row_started {
        row.push(field);
        rows.push(row);
    }

    Ok(rows)
}

fn render_row<'a>(cells: impl IntoIterator<Item = &'a str>) -> String {
    cells
        .into_iter()
        .map(escape_csv_cell)
        .collect::<Vec<String>>()
        .join(",")
}

fn escape_csv_cell(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
