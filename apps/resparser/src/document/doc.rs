//! Legacy Word (.doc) support: a best-effort scan for runs of printable text.
//!
//! Word 97-2003 stores body text either as 8-bit characters or as UTF-16LE inside
//! the OLE container. Both encodings are scanned and the richer result is kept.

const MIN_RUN: usize = 4;

pub(super) fn extract(bytes: &[u8]) -> String {
    let narrow = scan_narrow(bytes);
    let wide = scan_utf16le(bytes);
    if wide.chars().count() > narrow.chars().count() {
        wide
    } else {
        narrow
    }
}

fn is_text_byte(b: u8) -> bool {
    b.is_ascii_graphic() || b == b' '
}

fn push_run(out: &mut Vec<String>, run: &mut String) {
    let trimmed = run.trim();
    if trimmed.chars().count() >= MIN_RUN && trimmed.chars().any(char::is_alphabetic) {
        out.push(trimmed.to_string());
    }
    run.clear();
}

fn scan_narrow(bytes: &[u8]) -> String {
    let mut lines = Vec::new();
    let mut run = String::new();
    for &b in bytes {
        if is_text_byte(b) {
            run.push(b as char);
        } else {
            push_run(&mut lines, &mut run);
        }
    }
    push_run(&mut lines, &mut run);
    lines.join("\n")
}

fn scan_utf16le(bytes: &[u8]) -> String {
    let mut lines = Vec::new();
    let mut run = String::new();
    for pair in bytes.chunks_exact(2) {
        let unit = u16::from_le_bytes([pair[0], pair[1]]);
        // Latin script only; other ranges are mostly narrow text read at the wrong stride.
        match char::from_u32(u32::from(unit)) {
            Some(c) if unit <= 0x024F && !c.is_control() && unit != 0 => run.push(c),
            _ => push_run(&mut lines, &mut run),
        }
    }
    push_run(&mut lines, &mut run);
    lines.join("\n")
}
