//! Extraction of movetext from PGN files.
//!
//! Tag pair lines, blank lines and end of line comments are dropped, remaining
//! lines are joined with single spaces. Comments in braces and variations in
//! parentheses are then removed by [`strip_annotations`].

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use thiserror::Error;

use super::{MoveText, MoveTextParseError};

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum AnnotationError {
    #[error("PGN movetext ended with {0} open comments or variations")]
    Unbalanced(usize),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not read PGN file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] MoveTextParseError),
}

/// Removes every `{...}` comment and `(...)` variation, nested ones included.
///
/// A closing bracket only closes the innermost bracket of the same kind, any
/// other character within brackets is dropped.
///
/// # Errors
/// Fails if some bracket is still open at the end of the input.
pub fn strip_annotations(src: &str) -> Result<String, AnnotationError> {
    let mut open: Vec<char> = vec![];
    let mut result = String::with_capacity(src.len());
    for c in src.chars() {
        match (c, open.last()) {
            ('(' | '{', _) => open.push(c),
            (')', Some('(')) | ('}', Some('{')) => {
                open.pop();
            }
            (_, Some(_)) => (),
            (_, None) => result.push(c),
        }
    }
    if open.is_empty() {
        Ok(result)
    } else {
        Err(AnnotationError::Unbalanced(open.len()))
    }
}

/// Collects the movetext lines of a PGN game into a single line.
///
/// # Errors
/// Fails if the reader does.
pub fn collect_movetext<R: BufRead>(reader: R) -> std::io::Result<String> {
    let mut movetext = String::new();
    for line in reader.lines() {
        let line = line?;
        if line.is_empty() || line.starts_with('[') {
            continue;
        }
        let line = match line.split_once(';') {
            Some((before, _)) => before,
            None => &line,
        };
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        if !movetext.is_empty() && !line.starts_with(' ') {
            movetext.push(' ');
        }
        movetext.push_str(line);
    }
    Ok(movetext)
}

/// Reads a PGN file and parses its movetext.
///
/// # Errors
/// Fails if the file cannot be read or if its movetext is invalid.
pub fn load_game(path: impl AsRef<Path>) -> Result<MoveText, LoadError> {
    let path = path.as_ref();
    let io_error = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_error)?;
    let movetext = collect_movetext(BufReader::new(file)).map_err(io_error)?;
    log::debug!("Movetext of {}: {movetext}", path.display());
    Ok(MoveText::from_annotated(&movetext)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_comments_and_variations() {
        assert_eq!(
            strip_annotations("1.e4 {Best by test} e5 (1...c5 {Sicilian}) 2.Nf3"),
            Ok("1.e4  e5  2.Nf3".to_string())
        );
        assert_eq!(
            strip_annotations("1.e4 (1.d4 (1.c4) d5) e5"),
            Ok("1.e4  e5".to_string())
        );
    }

    #[test]
    fn mismatched_closing_bracket_is_ignored_inside_annotation() {
        assert_eq!(
            strip_annotations("1.e4 {a) b} e5"),
            Ok("1.e4  e5".to_string())
        );
    }

    #[test]
    fn unbalanced_annotations() {
        assert_eq!(
            strip_annotations("1.e4 (e5"),
            Err(AnnotationError::Unbalanced(1))
        );
        assert_eq!(
            strip_annotations("1.e4 {(e5}"),
            Err(AnnotationError::Unbalanced(2))
        );
    }

    #[test]
    fn collect_skips_tags_and_comments() {
        let pgn = "[Event \"Casual game\"]\n[Result \"*\"]\n\n1.e4 e5 ; king pawn\n2.Nf3   \n Nc6 *\n";
        assert_eq!(
            collect_movetext(pgn.as_bytes()).unwrap(),
            "1.e4 e5 2.Nf3 Nc6 *"
        );
    }

    #[test]
    fn load_missing_file() {
        assert!(matches!(
            load_game("/nonexistent/game.pgn"),
            Err(LoadError::Io { .. })
        ));
    }
}
