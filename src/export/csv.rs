//! CSV export of the combined score matrix.
//!
//! Layout (the corner cell is empty):
//!
//! ```text
//! ,U1,U2,U3
//! U1,-1,0.43539540594929915,0.36100423396407316
//! U2,0.43539540594929915,-1,0.2767766952966369
//! U3,0.36100423396407316,0.2767766952966369,-1
//! ```
//!
//! Floats use the shortest representation that parses back to the same
//! value, so a read-back reproduces the matrix exactly, sentinel included.
//! Ids containing a comma, quote or line break are wrapped in double quotes
//! with inner quotes doubled.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::info;

use crate::combine::CombinedScores;
use crate::error::{AffinityError, Result};
use crate::types::{EntityId, ScoreMatrix};

/// A combined matrix read back from disk.
#[derive(Debug, Clone)]
pub struct ExportedScores {
    pub entities: Vec<EntityId>,
    pub matrix: ScoreMatrix,
}

/// Write the full combined matrix to `path`, replacing any existing file.
pub fn write_csv(path: &Path, scores: &CombinedScores) -> Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    write_matrix(&mut out, scores.entities(), scores.matrix())?;
    out.flush()?;

    info!(path = %path.display(), entities = scores.entities().len(), "exported combined scores");
    Ok(())
}

/// Serialize ids and matrix in CSV layout to any writer.
pub fn write_matrix<W: Write>(out: &mut W, entities: &[EntityId], matrix: &ScoreMatrix) -> Result<()> {
    let header: Vec<Cow<'_, str>> = std::iter::once(Cow::Borrowed(""))
        .chain(entities.iter().map(|id| quote_field(id)))
        .collect();
    writeln!(out, "{}", header.join(","))?;

    for (u, id) in entities.iter().enumerate() {
        let cells: Vec<String> = matrix.row(u).iter().map(|s| s.to_string()).collect();
        writeln!(out, "{},{}", quote_field(id), cells.join(","))?;
    }
    Ok(())
}

fn quote_field(field: &str) -> Cow<'_, str> {
    let needs_quote = field.contains([',', '"', '\n', '\r', '\t']);
    if needs_quote {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// One CSV record and the line it starts on.
struct Record {
    line: usize,
    fields: Vec<String>,
}

/// Split text into records, honoring double-quoted fields.
fn split_records(path: &Path, text: &str) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut start = 1;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                records.push(Record {
                    line: start,
                    fields: std::mem::take(&mut fields),
                });
                line += 1;
                start = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(AffinityError::Parse {
            path: path.to_path_buf(),
            line: start,
            message: "unterminated quoted field".into(),
        });
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push(Record { line: start, fields });
    }
    Ok(records)
}

/// Parse a file written by [`write_csv`].
pub fn read_csv(path: &Path) -> Result<ExportedScores> {
    let mut text = String::new();
    BufReader::new(File::open(path)?).read_to_string(&mut text)?;

    let parse_err = |line: usize, message: String| AffinityError::Parse {
        path: path.to_path_buf(),
        line,
        message,
    };

    let mut records = split_records(path, &text)?.into_iter();
    let header = match records.next() {
        Some(record) => record.fields,
        None => return Err(parse_err(1, "file is empty".into())),
    };

    let mut header_cells = header.into_iter();
    if header_cells.next().as_deref() != Some("") {
        return Err(parse_err(1, "header must start with an empty cell".into()));
    }
    let entities: Vec<EntityId> = header_cells.map(EntityId::from).collect();
    let n = entities.len();

    let mut rows = Vec::with_capacity(n);
    for record in records {
        let line_no = record.line;
        if record.fields.len() == 1 && record.fields[0].is_empty() {
            continue;
        }

        let mut cells = record.fields.into_iter();
        let id = cells.next().unwrap_or_default();
        let expected: Option<&str> = entities.get(rows.len()).map(|e| e.as_ref());
        if expected != Some(id.as_str()) {
            return Err(parse_err(
                line_no,
                format!("row id '{}' does not match header order", id),
            ));
        }

        let row: Vec<f64> = cells
            .map(|cell| {
                cell.parse::<f64>()
                    .map_err(|_| parse_err(line_no, format!("'{}' is not a number", cell)))
            })
            .collect::<Result<_>>()?;
        if row.len() != n {
            return Err(parse_err(
                line_no,
                format!("expected {} scores, found {}", n, row.len()),
            ));
        }
        rows.push(row);
    }

    if rows.len() != n {
        return Err(parse_err(
            text.lines().count() + 1,
            format!("expected {} rows, found {}", n, rows.len()),
        ));
    }

    let matrix = ScoreMatrix::from_rows(rows)
        .ok_or_else(|| parse_err(1, "matrix is not square".into()))?;
    Ok(ExportedScores { entities, matrix })
}
