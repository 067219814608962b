//! File reading and all-or-nothing file replacement.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::Error;

/// Reads a text file, decoding UTF-16 when a BOM says so and dropping a
/// UTF-8 BOM. Xcode sometimes saves `.strings` files as UTF-16.
pub fn read_text_bom_aware(path: &Path) -> Result<String, Error> {
    let file = fs::File::open(path).map_err(|e| Error::io(path, e))?;
    let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
        .bom_override(true)
        .strip_bom(true)
        .build(file);
    let mut decoded = String::new();
    decoder
        .read_to_string(&mut decoded)
        .map_err(|e| Error::io(path, e))?;
    Ok(decoded)
}

/// Reads a UTF-8 source file.
pub fn read_utf8(path: &Path) -> Result<String, Error> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    String::from_utf8(bytes).map_err(|_| Error::Decode {
        path: path.to_path_buf(),
    })
}

/// Replaces `path` with `contents` through a temporary sibling file, so a
/// failure leaves either the old or the new file, never a partial one.
pub fn replace_file(path: &Path, contents: &str) -> Result<(), Error> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".stringport-")
        .tempfile_in(dir)
        .map_err(|e| Error::io(dir, e))?;
    tmp.write_all(contents.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| Error::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| Error::Persist {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}
