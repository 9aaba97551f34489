//! Locating and replacing documentation assignments.

use std::fs;
use std::io::Write;
use std::path::Path;

use regex::Regex;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{InjectError, InjectResult};

pub const DEFAULT_DOCUMENTATION_MARKER: &str = "DOCUMENTATION";
pub const DEFAULT_RETURN_MARKER: &str = "RETURN";
pub const DEFAULT_EXAMPLES_MARKER: &str = "EXAMPLES";

const STRING_PREFIXES: &[u8] = b"rRbBuUfF";

/// Why the extent of an assigned value could not be found.
#[derive(Debug)]
enum Extent {
    UnterminatedLiteral,
    Unbounded(&'static str),
}

/// One assignment to rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub marker: String,
    pub content: String,
}

impl Section {
    pub fn new(marker: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            content: content.into(),
        }
    }

    /// A section that empties the assignment.
    pub fn clear(marker: impl Into<String>) -> Self {
        Self::new(marker, "")
    }

    fn literal(&self) -> InjectResult<String> {
        let unrepresentable = |reason: &str| InjectError::Unrepresentable {
            marker: self.marker.clone(),
            reason: reason.to_string(),
        };

        if self.content.contains("\"\"\"") {
            return Err(unrepresentable("contains a triple quote"));
        }
        if self.content.ends_with('"') {
            return Err(unrepresentable("ends with a double quote"));
        }
        if self.content.ends_with('\\') {
            return Err(unrepresentable("ends with a backslash"));
        }

        Ok(format!("r\"\"\"\n{}\"\"\"", self.content))
    }
}

/// Rewrites documentation assignments in module source text.
pub struct Injector;

impl Injector {
    /// Apply each section in order and return the new source text.
    pub fn inject(source: &str, sections: &[Section]) -> InjectResult<String> {
        let mut out = source.to_string();

        for section in sections {
            let literal = section.literal()?;
            let (start, end) = Self::locate_value(&out, &section.marker)?;
            debug!(
                "Replacing {} value at bytes {}..{}",
                section.marker, start, end
            );
            out.replace_range(start..end, &literal);
        }

        Ok(out)
    }

    /// Empty the named assignments.
    pub fn clear(source: &str, markers: &[&str]) -> InjectResult<String> {
        let sections: Vec<Section> = markers.iter().map(|m| Section::clear(*m)).collect();
        Self::inject(source, &sections)
    }

    /// Rewrite a file in place. Returns whether its content changed.
    ///
    /// The file is left untouched when any section fails or when the new
    /// content equals the old.
    pub fn inject_file(path: impl AsRef<Path>, sections: &[Section]) -> InjectResult<bool> {
        let path = path.as_ref();
        let original = fs::read_to_string(path)?;
        let updated = Self::inject(&original, sections)?;

        if updated == original {
            info!("{:?} already up to date", path);
            return Ok(false);
        }

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(updated.as_bytes())?;

        if let Ok(metadata) = fs::metadata(path) {
            fs::set_permissions(tmp.path(), metadata.permissions())?;
        }
        tmp.persist(path).map_err(|e| e.error)?;

        info!("Injected {} section(s) into {:?}", sections.len(), path);
        Ok(true)
    }

    /// Byte range of the value assigned to `marker`.
    fn locate_value(source: &str, marker: &str) -> InjectResult<(usize, usize)> {
        let pattern = format!(r"(?m)^{}[ \t]*=", regex::escape(marker));
        let re = Regex::new(&pattern).map_err(|_| InjectError::MissingMarker(marker.to_string()))?;

        let bytes = source.as_bytes();
        let assignment = re
            .find_iter(source)
            .find(|m| bytes.get(m.end()) != Some(&b'='))
            .ok_or_else(|| InjectError::MissingMarker(marker.to_string()))?;

        let mut start = assignment.end();
        while matches!(bytes.get(start), Some(b' ' | b'\t')) {
            start += 1;
        }

        let line = source[..assignment.start()].matches('\n').count() + 1;
        let end = Self::expression_end(bytes, start).map_err(|extent| match extent {
            Extent::UnterminatedLiteral => InjectError::UnterminatedLiteral {
                marker: marker.to_string(),
                line,
            },
            Extent::Unbounded(reason) => InjectError::UnboundedValue {
                marker: marker.to_string(),
                line,
                reason: reason.to_string(),
            },
        })?;

        Ok((start, end))
    }

    /// End of the expression starting at `start`.
    ///
    /// The expression runs to the first newline outside brackets and not
    /// escaped by a trailing backslash. String literals are skipped whole, so
    /// implicit concatenation (`"a" "b"`) is covered too. Trailing whitespace
    /// and comments are not part of the result.
    fn expression_end(bytes: &[u8], start: usize) -> Result<usize, Extent> {
        let mut depth = 0usize;
        let mut pos = start;
        let mut end = start;

        while let Some(&byte) = bytes.get(pos) {
            match byte {
                b'\n' if depth == 0 => break,
                b' ' | b'\t' | b'\r' | b'\n' | b'\x0c' => pos += 1,
                b'#' => {
                    while bytes.get(pos).is_some_and(|b| *b != b'\n') {
                        pos += 1;
                    }
                }
                b'\\' => match bytes.get(pos + 1..pos + 3) {
                    Some([b'\r', b'\n']) => pos += 3,
                    _ if bytes.get(pos + 1) == Some(&b'\n') => pos += 2,
                    _ => return Err(Extent::Unbounded("stray backslash")),
                },
                b'(' | b'[' | b'{' => {
                    depth += 1;
                    pos += 1;
                    end = pos;
                }
                b')' | b']' | b'}' => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or(Extent::Unbounded("unbalanced closing bracket"))?;
                    pos += 1;
                    end = pos;
                }
                _ => match Self::literal_end(bytes, pos) {
                    Some(Ok(literal_end)) => {
                        pos = literal_end;
                        end = pos;
                    }
                    Some(Err(())) => return Err(Extent::UnterminatedLiteral),
                    None if byte.is_ascii_alphanumeric() || byte == b'_' => {
                        while bytes
                            .get(pos)
                            .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
                        {
                            pos += 1;
                        }
                        end = pos;
                    }
                    None => {
                        pos += 1;
                        end = pos;
                    }
                },
            }
        }

        if depth > 0 {
            return Err(Extent::Unbounded("unclosed bracket"));
        }
        if end == start {
            return Err(Extent::Unbounded("no value"));
        }
        Ok(end)
    }

    /// End of the string literal starting at `start`, if there is one.
    ///
    /// `None` means the value is not a string literal. `Some(Err(()))` means
    /// the literal never closes.
    fn literal_end(bytes: &[u8], start: usize) -> Option<Result<usize, ()>> {
        let mut pos = start;
        while pos - start < 2 && bytes.get(pos).is_some_and(|b| STRING_PREFIXES.contains(b)) {
            pos += 1;
        }

        let quote = *bytes.get(pos)?;
        if quote != b'"' && quote != b'\'' {
            return None;
        }

        let triple = bytes.get(pos..pos + 3) == Some(&[quote; 3][..]);
        let mut cursor = if triple { pos + 3 } else { pos + 1 };

        while cursor < bytes.len() {
            match bytes[cursor] {
                b'\\' => cursor += 2,
                b'\n' if !triple => return Some(Err(())),
                b if b == quote => {
                    if !triple {
                        return Some(Ok(cursor + 1));
                    }
                    if bytes.get(cursor..cursor + 3) == Some(&[quote; 3][..]) {
                        return Some(Ok(cursor + 3));
                    }
                    cursor += 1;
                }
                _ => cursor += 1,
            }
        }

        Some(Err(()))
    }
}
