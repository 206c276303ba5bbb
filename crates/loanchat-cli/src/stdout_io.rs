use std::io::{self, Write};

/// Writes `text` as-is. A reader that hung up (`| head`) is not an error.
pub fn write_stdout_text(text: &str) -> io::Result<()> {
    write_parts(&mut io::stdout().lock(), &[text.as_bytes()])
}

/// Writes `text` followed by a newline, with the same hang-up tolerance.
pub fn write_stdout_line(text: &str) -> io::Result<()> {
    write_parts(&mut io::stdout().lock(), &[text.as_bytes(), b"\n".as_slice()])
}

fn write_parts<W: Write>(writer: &mut W, parts: &[&[u8]]) -> io::Result<()> {
    let written = parts
        .iter()
        .try_for_each(|part| writer.write_all(part))
        .and_then(|()| writer.flush());
    match written {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
