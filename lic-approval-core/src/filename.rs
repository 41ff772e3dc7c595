//! Output file name composition.
//!
//! Names are a plain concatenation of their tokens. Nothing is escaped or made
//! filesystem safe; callers pass tokens that are already safe to use.

use chrono::NaiveDate;

use crate::constants::{FILE_NAME_CLAUSE, FILE_NAME_EXTENSION, FILE_NAME_SEPARATOR};

/// Date token format, e.g. `20261016`.
pub const DATE_TOKEN_FORMAT: &str = "%Y%m%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNameParts<'a> {
    pub family: &'a str,
    pub version: &'a str,
    pub clause: &'a str,
    pub date_token: String,
    pub separator: &'a str,
    pub extension: &'a str,
}

impl<'a> FileNameParts<'a> {
    /// Parts of the form name for one run: fixed clause, separator and extension.
    pub fn for_run(family: &'a str, version: &'a str, date: NaiveDate) -> Self {
        Self {
            family,
            version,
            clause: FILE_NAME_CLAUSE,
            date_token: date.format(DATE_TOKEN_FORMAT).to_string(),
            separator: FILE_NAME_SEPARATOR,
            extension: FILE_NAME_EXTENSION,
        }
    }

    /// `<family><sep><version><sep><clause><sep><date><extension>`
    pub fn compose(&self) -> String {
        compose_file_name(&[
            self.family,
            self.separator,
            self.version,
            self.separator,
            self.clause,
            self.separator,
            &self.date_token,
            self.extension,
        ])
    }
}

/// Concatenates tokens in order.
pub fn compose_file_name(tokens: &[&str]) -> String {
    tokens.concat()
}
