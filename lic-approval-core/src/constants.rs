//! Label text for every field of the license approval form.
//!
//! These are the only source of label text: the builder copies them verbatim
//! into the document model and nothing rewrites them afterwards.

// Header
pub const HEADER_TEXT: &str = "INTERNAL USE ONLY";
pub const TITLE_MAIN_SECTION: &str = "THIRD PARTY SOFTWARE LICENSE APPROVAL FORM";

// Meta information table
pub const SENDER_FORM: &str = "From: Christoph Hartleb (Dev)";
pub const SUBMISSION_TEXT_PROPERTY: &str = "Submitted to Legal by:";
pub const SUBMISSION_TEXT_NAME: &str = "Christoph Hartleb";
pub const SUBMISSION_TO: &str = "To: Lawyer";
pub const APPROVED_OR_REJECTED_TEXT: &str = "Approved/Rejected by Lawyer:";
pub const SUBMISSION_DATE: &str = "Submission Date: ";
pub const DATE_APPROVED_TEXT: &str = "Date Approved:";
pub const DATE_FORMAT_HINT: &str = "YYYY-MM-DD";

pub const SEPARATOR_LINE: &str =
    "________________________________________________________________________";

// Main table labels, in row order
pub const THIRD_PARTY_NAME_PROP: &str = "Name of third party software:";
pub const VERSION_YEAR_PROP: &str = "Version number or year:";
pub const UPDATE_PROP: &str =
    "Is this a version update of \npreviously approved software? If \nYes, reason for update?";
pub const SOFTWARE_DESCRIPTION_PROP: &str = "General description of software:";
pub const HOMEPAGE_LINK_PROP: &str = "Link to software homepage:";
pub const LICENSE_PROP: &str = "License type (e.g. MIT, BSD, GPL)";
pub const LICENSE_LINK_PROP: &str = "Link to website showing license:";
pub const PRODUCTS_PROP: &str = "Products that will\nintroduce license?";
pub const TIME_VERSION_PROP: &str = "Approximate time/version?";

/// Labels of the main table, top to bottom.
pub const MAIN_TABLE_LABELS: [&str; 9] = [
    THIRD_PARTY_NAME_PROP,
    VERSION_YEAR_PROP,
    UPDATE_PROP,
    SOFTWARE_DESCRIPTION_PROP,
    HOMEPAGE_LINK_PROP,
    LICENSE_PROP,
    LICENSE_LINK_PROP,
    PRODUCTS_PROP,
    TIME_VERSION_PROP,
];

// Main table values that do not depend on the family
pub const DEFAULT_SOFTWARE_NAME: &str = "xbrl taxonomy";
pub const DEFAULT_SOFTWARE_DESCRIPTION: &str = "sw description";
pub const AFFECTED_PRODUCTS: &str = "List of all products where the software is used\n";

// Comment block and footer
pub const ADDITIONAL_COMMENTS_HEADING: &str = "\nADDITIONAL COMMENTS:";
pub const FOOTER_VERSION_STAMP: &str = "Ver: 01/2022";

/// Shown in a value cell whose content could not be determined.
pub const VARIANT_NOT_DEFINED: &str = "<variant not defined>";

// Output file name
pub const FILE_NAME_SEPARATOR: &str = " ";
pub const FILE_NAME_CLAUSE: &str = "XBRL Taxonomy - Third Party Software License Approval Form";
pub const FILE_NAME_EXTENSION: &str = ".docx";
