use docx_rs::{
    read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCellContent,
    TableChild, TableRowChild,
};

use super::DocumentError;

/// Paragraph text of a DOCX document, one line per paragraph.
///
/// Table cells are read in row order so two-column resume layouts keep their text.
pub(super) fn extract(bytes: &[u8]) -> Result<String, DocumentError> {
    let docx = read_docx(bytes).map_err(|e| DocumentError::Docx(format!("{e:?}")))?;

    let mut lines = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(para) => push_paragraph(&mut lines, para),
            DocumentChild::Table(table) => push_table(&mut lines, table),
            _ => {}
        }
    }
    Ok(lines.join("\n"))
}

fn push_paragraph(lines: &mut Vec<String>, para: &Paragraph) {
    let mut text = String::new();
    paragraph_text(&para.children, &mut text);
    // A break inside a paragraph starts a new line.
    lines.extend(
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from),
    );
}

fn paragraph_text(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for rc in &run.children {
                    match rc {
                        RunChild::Text(t) => out.push_str(&t.text),
                        RunChild::Tab(_) => out.push(' '),
                        RunChild::Break(_) => out.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => paragraph_text(&link.children, out),
            _ => {}
        }
    }
}

fn push_table(lines: &mut Vec<String>, table: &Table) {
    let cells = table
        .rows
        .iter()
        .filter_map(|row| match row {
            TableChild::TableRow(row) => Some(row),
            #[allow(unreachable_patterns)]
            _ => None,
        })
        .flat_map(|row| row.cells.iter())
        .filter_map(|cell| match cell {
            TableRowChild::TableCell(cell) => Some(cell),
            #[allow(unreachable_patterns)]
            _ => None,
        });

    for cell in cells {
        for content in &cell.children {
            match content {
                TableCellContent::Paragraph(para) => push_paragraph(lines, para),
                TableCellContent::Table(inner) => push_table(lines, inner),
                _ => {}
            }
        }
    }
}

/// DOCX package with one paragraph per line.
#[cfg(test)]
pub(crate) fn docx_bytes(lines: &[&str]) -> Vec<u8> {
    use docx_rs::{Docx, Run};

    let docx = lines.iter().fold(Docx::new(), |docx, line| {
        docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*line)))
    });
    let mut buf = std::io::Cursor::new(Vec::new());
    docx.build().pack(&mut buf).unwrap();
    buf.into_inner()
}
