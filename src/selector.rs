use std::io::{self, BufRead, Write};

use serde::{Deserialize, Serialize};

use crate::data::error::LoadError;

/// Chooses the target column once the header is known.
///
/// The loader range-checks the returned index, so implementations only need
/// to produce *some* index (or fail with their own reason).
pub trait ColumnSelector {
    fn select(&mut self, headers: &[String]) -> Result<usize, LoadError>;
}

impl<T: ColumnSelector + ?Sized> ColumnSelector for Box<T> {
    fn select(&mut self, headers: &[String]) -> Result<usize, LoadError> {
        (**self).select(headers)
    }
}

/// A column index decided up front (CLI flag, config value, test).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedColumn(pub usize);

impl ColumnSelector for FixedColumn {
    fn select(&mut self, _headers: &[String]) -> Result<usize, LoadError> {
        Ok(self.0)
    }
}

/// Case-insensitive lookup by normalized header name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnByName(String);

impl ColumnByName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl ColumnSelector for ColumnByName {
    fn select(&mut self, headers: &[String]) -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(&self.0))
            .ok_or_else(|| LoadError::UnknownTargetColumn(self.0.clone()))
    }
}

// ---------------------------------------------------------------------------
// Interactive prompt
// ---------------------------------------------------------------------------

/// Lists the columns on `output` and reads the chosen index from `input`.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, headers: &[String]) -> io::Result<String> {
        writeln!(self.output, "\nAvailable columns ({} total):", headers.len())?;
        for (i, name) in headers.iter().enumerate() {
            writeln!(self.output, "  [{i}] {name}")?;
        }
        write!(self.output, "\nEnter the column number to use as target: ")?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(answer.trim().to_string())
    }
}

impl Prompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the process's terminal.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ColumnSelector for Prompt<R, W> {
    fn select(&mut self, headers: &[String]) -> Result<usize, LoadError> {
        let answer = self.ask(headers)?;
        answer
            .parse::<usize>()
            .map_err(|_| LoadError::InvalidSelection(answer))
    }
}

// ---------------------------------------------------------------------------
// Config-facing target description
// ---------------------------------------------------------------------------

/// Target column as written in a config file or on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetSpec {
    Index(usize),
    Name(String),
}

impl TargetSpec {
    /// Numbers are indices, anything else is a column name.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<usize>() {
            Ok(i) => TargetSpec::Index(i),
            Err(_) => TargetSpec::Name(raw.trim().to_string()),
        }
    }

    pub fn into_selector(self) -> Box<dyn ColumnSelector> {
        match self {
            TargetSpec::Index(i) => Box::new(FixedColumn(i)),
            TargetSpec::Name(name) => Box::new(ColumnByName::new(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<String> {
        ["sepal", "petal", "Species"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn by_name_ignores_case() {
        assert_eq!(ColumnByName::new("species").select(&headers()).unwrap(), 2);
        assert_eq!(ColumnByName::new("PETAL").select(&headers()).unwrap(), 1);
        assert!(matches!(
            ColumnByName::new("colour").select(&headers()),
            Err(LoadError::UnknownTargetColumn(_))
        ));
    }

    #[test]
    fn prompt_lists_columns_and_reads_index() {
        let mut out = Vec::new();
        let idx = Prompt::new(&b" 1 \n"[..], &mut out).select(&headers()).unwrap();
        assert_eq!(idx, 1);

        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("Available columns (3 total):"));
        assert!(shown.contains("  [2] Species"));
        assert!(shown.ends_with("Enter the column number to use as target: "));
    }

    #[test]
    fn prompt_rejects_non_numbers() {
        for answer in ["abc\n", "-1\n", ""] {
            let err = Prompt::new(answer.as_bytes(), io::sink())
                .select(&headers())
                .unwrap_err();
            assert!(matches!(err, LoadError::InvalidSelection(_)), "{answer:?}");
        }
    }

    #[test]
    fn target_spec_parsing() {
        assert_eq!(TargetSpec::parse("3"), TargetSpec::Index(3));
        assert_eq!(TargetSpec::parse(" label "), TargetSpec::Name("label".into()));

        let mut sel = TargetSpec::parse("petal").into_selector();
        assert_eq!(sel.select(&headers()).unwrap(), 1);
    }

    #[test]
    fn target_spec_from_json() {
        let idx: TargetSpec = serde_json::from_str("2").unwrap();
        let name: TargetSpec = serde_json::from_str("\"label\"").unwrap();
        assert_eq!(idx, TargetSpec::Index(2));
        assert_eq!(name, TargetSpec::Name("label".into()));
    }
}
