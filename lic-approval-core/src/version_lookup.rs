//! Reads the major release year of the installer products from the artifact
//! database XML.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Substring an element name must contain to be considered.
pub const VERSION_TAG_MARKER: &str = "Version";
/// Attribute holding the value.
pub const MAJOR_VERSION_ATTRIBUTE: &str = "MajorVersionYear";

pub const UNAVAILABLE: &str = "unavailable";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApproximateVersion {
    Found(String),
    Unavailable,
}

impl ApproximateVersion {
    pub fn as_str(&self) -> &str {
        match self {
            ApproximateVersion::Found(value) => value,
            ApproximateVersion::Unavailable => UNAVAILABLE,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ApproximateVersion::Found(_))
    }
}

impl fmt::Display for ApproximateVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum VersionLookupError {
    #[error("artifact database {path} is not well-formed XML: {source}")]
    Malformed {
        path: String,
        #[source]
        source: quick_xml::Error,
    },
}

/// Returns the `MajorVersionYear` attribute of the first element, in document
/// order, whose local name contains `Version` and which carries that attribute.
///
/// A descriptor that cannot be opened or read, or that has no such element,
/// yields [`ApproximateVersion::Unavailable`] after logging. Malformed XML is
/// an error.
pub fn lookup_approximate_version(path: &Path) -> Result<ApproximateVersion, VersionLookupError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            error!(error = %e, path = %path.display(), "Artifact database could not be opened");
            return Ok(ApproximateVersion::Unavailable);
        }
    };

    let mut reader = Reader::from_reader(BufReader::new(file));
    let mut buf = Vec::new();
    let malformed = |source: quick_xml::Error| VersionLookupError::Malformed {
        path: path.display().to_string(),
        source,
    };

    loop {
        let event = match reader.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(quick_xml::Error::Io(e)) => {
                error!(error = %e, path = %path.display(), "Artifact database could not be read");
                return Ok(ApproximateVersion::Unavailable);
            }
            Err(e) => return Err(malformed(e)),
        };
        match event {
            Event::Start(element) | Event::Empty(element) => {
                let name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();
                if name.contains(VERSION_TAG_MARKER) {
                    let attribute = element
                        .try_get_attribute(MAJOR_VERSION_ATTRIBUTE)
                        .map_err(|e| malformed(e.into()))?;
                    if let Some(attribute) = attribute {
                        let value = attribute.unescape_value().map_err(malformed)?.into_owned();
                        info!(element = %name, value = %value, "Found major version year");
                        return Ok(ApproximateVersion::Found(value));
                    }
                    debug!(element = %name, "Version element without major version year");
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    warn!(path = %path.display(), "No element carries a major version year");
    Ok(ApproximateVersion::Unavailable)
}
