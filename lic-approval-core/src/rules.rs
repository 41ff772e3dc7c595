//! # rules: family rule table
//!
//! Maps a [`FamilyKey`] to the [`ContentVariant`] used to fill the form.
//!
//! Every field is resolved by a single `match` over disjoint string patterns,
//! so the result cannot depend on the order in which families are checked.
//! Families that share a treatment are listed in one arm. Any family not
//! listed in an arm gets that field's default; an unknown family is never an
//! error.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::hyperlink::Hyperlink;

const LANDING_PAGE_URL: &str = "https://www.landinpage.example.com";
const WEBSITE_URL: &str = "https://www.example.website.com";
const LICENSE_TYPE_TEXT: &str = "license type";
const LICENSE_WEBPAGE_TEXT: &str = "webpage of license";
const COMMENT_TEXT: &str = "Additional comment 0";
const COMMENT_TEXT_ALT: &str = "Additional comment";

/// Reason text available to [`UpdateStatus::YesWithReason`]; no family uses it.
pub const ESEF_UPDATE_REASON: &str = "update of the ESMA ESEF Common Recommendation (CR) version";

/// Grey used for every additional comment.
pub const COMMENT_COLOR: (u8, u8, u8) = (82, 82, 82);

/// Family whose version argument carries two versions (`"<token0> <token1>"`).
pub const COMPOSITE_VERSION_FAMILY: &str = "bdp";

/// Every family with at least one dedicated rule.
pub const KNOWN_FAMILIES: &[&str] = &[
    "acpr-corep",
    "acpr-creditimmo",
    "acpr-lcbft",
    "bbk",
    "bdp",
    "boe-banking",
    "boe-insurance",
    "boe-statistics",
    "cbi",
    "cbi-fsp",
    "cipc",
    "cmf-cl-ci",
    "dnb-biscbs",
    "dnb-dict",
    "dnb-ftk",
    "edinet",
    "eiopa",
    "eurofiling",
    "ifrs",
    "lei",
    "sfrdp",
    "us-gaap",
    "xbrlgl",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FamilyKeyError {
    #[error("taxonomy family is missing")]
    Missing,
}

/// Case-sensitive taxonomy family identifier, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FamilyKey(String);

impl FamilyKey {
    pub fn new(key: impl Into<String>) -> Result<Self, FamilyKeyError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(FamilyKeyError::Missing);
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_known(&self) -> bool {
        KNOWN_FAMILIES.contains(&self.0.as_str())
    }
}

impl fmt::Display for FamilyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    Yes,
    /// Rendered in capitals, for the yearly US GAAP / IFRS / GL releases.
    YesEmphasized,
    No,
    YesWithReason(&'static str),
}

impl UpdateStatus {
    pub fn text(&self) -> String {
        match self {
            UpdateStatus::Yes => "Yes".to_string(),
            UpdateStatus::YesEmphasized => "YES".to_string(),
            UpdateStatus::No => "No".to_string(),
            UpdateStatus::YesWithReason(reason) => format!("Yes, {reason}"),
        }
    }
}

/// A value cell that is either plain text or a hyperlink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkedField {
    Text(String),
    Link(Hyperlink),
    /// The family has no rule for this field; the content must come from
    /// elsewhere (a template) or be shown as undefined.
    Undefined,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSpec {
    pub text: String,
    pub font_size_pt: u16,
    pub color_rgb: (u8, u8, u8),
    pub italic: bool,
    pub bold: bool,
    pub hyperlinked: bool,
}

impl CommentSpec {
    fn grey_italic(text: &str, font_size_pt: u16) -> Self {
        Self {
            text: text.to_string(),
            font_size_pt,
            color_rgb: COMMENT_COLOR,
            italic: true,
            bold: false,
            hyperlinked: false,
        }
    }

    fn linked(mut self) -> Self {
        self.hyperlinked = true;
        self
    }
}

/// Family specific content of the form, resolved once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentVariant {
    pub family: FamilyKey,
    pub version: String,
    pub update_status: UpdateStatus,
    pub homepage: Hyperlink,
    pub license_type: LinkedField,
    pub license_web_link: LinkedField,
    pub comments: Vec<CommentSpec>,
}

impl ContentVariant {
    pub fn resolve(family: &FamilyKey, raw_version: &str) -> Self {
        let key = family.as_str();
        debug!(family = key, known = family.is_known(), "Resolving content variant");
        Self {
            family: family.clone(),
            version: render_version(key, raw_version),
            update_status: update_status(key),
            homepage: homepage(key),
            license_type: license_type(key),
            license_web_link: license_web_link(key),
            comments: comments(key),
        }
    }
}

/// Version text for the main table. The composite version of
/// [`COMPOSITE_VERSION_FAMILY`] becomes `"<token0> <family> v<token1>"`; with
/// fewer than two tokens the raw string is kept.
pub fn render_version(family: &str, raw_version: &str) -> String {
    if family != COMPOSITE_VERSION_FAMILY {
        return raw_version.to_string();
    }
    let mut tokens = raw_version.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(first), Some(second)) => format!("{first} {family} v{second}"),
        _ => {
            debug!(family, raw_version, "Composite version has fewer than two tokens, using it unchanged");
            raw_version.to_string()
        }
    }
}

fn update_status(family: &str) -> UpdateStatus {
    match family {
        "dnb-dict" | "lei" => UpdateStatus::No,
        "us-gaap" | "ifrs" | "xbrlgl" => UpdateStatus::YesEmphasized,
        _ => UpdateStatus::Yes,
    }
}

fn homepage(family: &str) -> Hyperlink {
    match family {
        "us-gaap" => Hyperlink::new(WEBSITE_URL, "SEC and US GAAP Taxonomies"),
        "bbk" => Hyperlink::new(LANDING_PAGE_URL, "Reporting - Formats(XML and XBRL)"),
        "boe-banking" => {
            Hyperlink::new(LANDING_PAGE_URL, "Regulatory Reporting for the Banking Sector")
        }
        "cipc" => Hyperlink::new(LANDING_PAGE_URL, "XBRL Programs"),
        "dnb-ftk" => Hyperlink::new(LANDING_PAGE_URL, "Pensionsfondsen"),
        "eiopa" => Hyperlink::new(LANDING_PAGE_URL, "EIOPA - Tools and Data"),
        "sfrdp" | "acpr-corep" | "acpr-creditimmo" | "acpr-lcbft" => Hyperlink::bare(WEBSITE_URL),
        _ => Hyperlink::bare(LANDING_PAGE_URL),
    }
}

fn license_type(family: &str) -> LinkedField {
    match family {
        "dnb-biscbs" | "dnb-dict" | "dnb-ftk" => {
            LinkedField::Link(Hyperlink::new(LICENSE_TYPE_TEXT, "CC-BY-4.0"))
        }
        _ => LinkedField::Text(LICENSE_TYPE_TEXT.to_string()),
    }
}

fn license_web_link(family: &str) -> LinkedField {
    match family {
        "us-gaap" => LinkedField::Link(Hyperlink::new(LICENSE_WEBPAGE_TEXT, "Terms and Conditions")),
        "bdp" => LinkedField::Link(Hyperlink::new(LICENSE_WEBPAGE_TEXT, "Disclaimer and Copyright")),
        "eiopa" => LinkedField::Link(Hyperlink::new(
            LICENSE_WEBPAGE_TEXT,
            "EIOPA DPM and Taxonomy License",
        )),
        "acpr-corep" | "acpr-creditimmo" | "acpr-lcbft" | "bbk" => {
            LinkedField::Text(LICENSE_WEBPAGE_TEXT.to_string())
        }
        "boe-statistics" | "boe-banking" | "boe-insurance" => LinkedField::Undefined,
        _ => LinkedField::Link(Hyperlink::bare(LICENSE_WEBPAGE_TEXT)),
    }
}

fn comments(family: &str) -> Vec<CommentSpec> {
    match family {
        "dnb-biscbs" | "boe-banking" | "cmf-cl-ci" | "eiopa" | "ifrs" | "acpr-corep" | "cipc"
        | "bdp" | "cbi" | "cbi-fsp" => vec![CommentSpec::grey_italic(COMMENT_TEXT, 10)],
        "eurofiling" => vec![CommentSpec::grey_italic(COMMENT_TEXT_ALT, 10)],
        "us-gaap" => vec![CommentSpec::grey_italic(COMMENT_TEXT, 8)],
        "bbk" => vec![CommentSpec::grey_italic(COMMENT_TEXT, 8).linked()],
        "edinet" => vec![
            CommentSpec::grey_italic(COMMENT_TEXT, 8).linked(),
            CommentSpec::grey_italic(COMMENT_TEXT_ALT, 11),
        ],
        _ => vec![CommentSpec::grey_italic(COMMENT_TEXT, 11)],
    }
}
