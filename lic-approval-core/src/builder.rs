//! # builder: assembles the license approval form
//!
//! [`build_document`] starts from [`DocumentModel::blank`] and hands the model
//! by value through one step per region, in document order:
//!
//! 1. header banner and title
//! 2. meta table (sender, lawyer, dates)
//! 3. separator line
//! 4. main table (nine label/value rows)
//! 5. additional comments
//! 6. footer
//!
//! Labels always come from [`crate::constants`]. Values come from the resolved
//! [`ContentVariant`], the looked up approximate version and, for a few rows,
//! the discovered template. A value that cannot be determined is written as a
//! placeholder and recorded in [`DocumentModel::placeholders`].
//!
//! Every cell write replaces the cell content.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::constants::*;
use crate::hyperlink::{link_run, Hyperlink};
use crate::model::{
    Alignment, DocumentModel, Paragraph, Placeholder, PlaceholderReason, RenderableRun, RunColor,
};
use crate::rules::{CommentSpec, ContentVariant, LinkedField};
use crate::templates::TemplateData;
use crate::version_lookup::ApproximateVersion;

pub const ROW_SOFTWARE_NAME: usize = 0;
pub const ROW_VERSION: usize = 1;
pub const ROW_UPDATE_STATUS: usize = 2;
pub const ROW_DESCRIPTION: usize = 3;
pub const ROW_HOMEPAGE: usize = 4;
pub const ROW_LICENSE_TYPE: usize = 5;
pub const ROW_LICENSE_WEB_LINK: usize = 6;
pub const ROW_PRODUCTS: usize = 7;
pub const ROW_APPROXIMATE_VERSION: usize = 8;

/// Meta table column widths in inches.
pub const META_COLUMN_WIDTHS_IN: [f32; 3] = [3.6, 3.0, 2.2];
const BANNER_LOGO_WIDTH_IN: f32 = 1.0;
const BANNER_FONT_PT: u16 = 11;
const TITLE_FONT_PT: u16 = 13;
const FOOTER_FONT_PT: u16 = 10;

/// Alignment of each meta table column. The middle column holds the
/// right-aligned prompts, the outer columns are left-aligned.
pub const META_COLUMN_ALIGNMENT: [Alignment; 3] =
    [Alignment::Left, Alignment::Right, Alignment::Left];

pub struct BuildInputs<'a> {
    pub variant: &'a ContentVariant,
    pub approximate_version: &'a ApproximateVersion,
    pub template: Option<&'a TemplateData>,
    pub submission_date: NaiveDate,
}

pub fn build_document(inputs: &BuildInputs<'_>) -> DocumentModel {
    let model = DocumentModel::blank();
    let model = assemble_header(model);
    let model = assemble_meta_table(model, inputs.submission_date);
    let model = assemble_separator(model);
    let model = assemble_main_table(model, inputs);
    let model = assemble_comments(model, &inputs.variant.comments);
    let model = assemble_footer(model);
    debug!(
        family = %inputs.variant.family,
        placeholders = model.placeholders.len(),
        "Document model assembled"
    );
    model
}

fn assemble_header(mut model: DocumentModel) -> DocumentModel {
    let banner = &mut model.header.banner;
    banner.set_column_width(1, BANNER_LOGO_WIDTH_IN);
    if let Some(left) = banner.paragraph_mut(0, 0) {
        left.set_runs(vec![RenderableRun::plain(HEADER_TEXT).with_size(BANNER_FONT_PT)]);
    }
    // Right cell stays empty: reserved for the logo.

    model.header.title = Paragraph::aligned(Alignment::Center).with_run(
        RenderableRun::plain(TITLE_MAIN_SECTION)
            .with_bold(true)
            .with_size(TITLE_FONT_PT),
    );
    model
}

fn assemble_meta_table(mut model: DocumentModel, submission_date: NaiveDate) -> DocumentModel {
    let submitted_on = format!("{SUBMISSION_DATE}{}", submission_date.format("%Y-%m-%d"));
    let texts: [[&str; 3]; 3] = [
        [SENDER_FORM, SUBMISSION_TEXT_PROPERTY, SUBMISSION_TEXT_NAME],
        [SUBMISSION_TO, APPROVED_OR_REJECTED_TEXT, ""],
        [submitted_on.as_str(), DATE_APPROVED_TEXT, DATE_FORMAT_HINT],
    ];

    let table = &mut model.meta_table;
    for (row, row_texts) in texts.iter().enumerate() {
        for (column, text) in row_texts.iter().enumerate() {
            if let Some(paragraph) = table.paragraph_mut(row, column) {
                paragraph.alignment = Some(META_COLUMN_ALIGNMENT[column]);
                paragraph.single_line_spacing = true;
                paragraph.set_text(text);
            }
        }
    }
    for (column, width) in META_COLUMN_WIDTHS_IN.iter().enumerate() {
        table.set_column_width(column, *width);
    }
    model
}

fn assemble_separator(mut model: DocumentModel) -> DocumentModel {
    model.separator =
        Paragraph::new().with_run(RenderableRun::plain(SEPARATOR_LINE).with_bold(false));
    model
}

fn assemble_main_table(mut model: DocumentModel, inputs: &BuildInputs<'_>) -> DocumentModel {
    for (row, label) in MAIN_TABLE_LABELS.iter().enumerate() {
        if let Some(paragraph) = model.main_table.paragraph_mut(row, 0) {
            paragraph.set_text(label);
        }
    }

    let variant = inputs.variant;
    let template = inputs.template;

    let software_name = template
        .and_then(TemplateData::software_name)
        .unwrap_or(DEFAULT_SOFTWARE_NAME);
    set_value_text(&mut model, ROW_SOFTWARE_NAME, software_name);
    set_value_text(&mut model, ROW_VERSION, &variant.version);
    set_value_text(&mut model, ROW_UPDATE_STATUS, &variant.update_status.text());
    let description = template
        .and_then(TemplateData::software_description)
        .unwrap_or(DEFAULT_SOFTWARE_DESCRIPTION);
    set_value_text(&mut model, ROW_DESCRIPTION, description);
    set_value_runs(&mut model, ROW_HOMEPAGE, vec![variant.homepage.to_run()]);
    set_linked_field(&mut model, ROW_LICENSE_TYPE, &variant.license_type);

    let template_web_link = template.and_then(TemplateData::license_web_link);
    let license_web_link = match (&variant.license_web_link, template_web_link) {
        (LinkedField::Undefined, Some(url)) => LinkedField::Link(Hyperlink::bare(url)),
        (field, _) => field.clone(),
    };
    set_linked_field(&mut model, ROW_LICENSE_WEB_LINK, &license_web_link);

    set_value_text(&mut model, ROW_PRODUCTS, AFFECTED_PRODUCTS);

    set_value_text(
        &mut model,
        ROW_APPROXIMATE_VERSION,
        inputs.approximate_version.as_str(),
    );
    if !inputs.approximate_version.is_available() {
        record_placeholder(
            &mut model,
            ROW_APPROXIMATE_VERSION,
            PlaceholderReason::DescriptorUnavailable,
        );
    }
    model
}

fn set_value_text(model: &mut DocumentModel, row: usize, text: &str) {
    if let Some(paragraph) = model.main_table.paragraph_mut(row, 1) {
        paragraph.set_text(text);
    }
}

fn set_value_runs(model: &mut DocumentModel, row: usize, runs: Vec<RenderableRun>) {
    if let Some(paragraph) = model.main_table.paragraph_mut(row, 1) {
        paragraph.set_runs(runs);
    }
}

fn set_linked_field(model: &mut DocumentModel, row: usize, field: &LinkedField) {
    match field {
        LinkedField::Text(text) => set_value_text(model, row, text),
        LinkedField::Link(link) => set_value_runs(model, row, vec![link.to_run()]),
        LinkedField::Undefined => {
            set_value_text(model, row, VARIANT_NOT_DEFINED);
            record_placeholder(model, row, PlaceholderReason::VariantNotDefined);
        }
    }
}

fn record_placeholder(model: &mut DocumentModel, row: usize, reason: PlaceholderReason) {
    let label = MAIN_TABLE_LABELS[row];
    warn!(row, label, ?reason, "Main table value left as placeholder");
    model.placeholders.push(Placeholder { row, label, reason });
}

fn assemble_comments(mut model: DocumentModel, comments: &[CommentSpec]) -> DocumentModel {
    model.comments.heading =
        Paragraph::new().with_run(RenderableRun::plain(ADDITIONAL_COMMENTS_HEADING));
    model.comments.entries = comments.iter().map(comment_paragraph).collect();
    model
}

fn comment_paragraph(spec: &CommentSpec) -> Paragraph {
    let (r, g, b) = spec.color_rgb;
    let run = RenderableRun::plain(spec.text.as_str())
        .with_size(spec.font_size_pt)
        .with_color(RunColor::Rgb(r, g, b))
        .with_italic(spec.italic)
        .with_bold(spec.bold);
    let run = if spec.hyperlinked {
        link_run(run, &spec.text)
    } else {
        run
    };
    Paragraph::aligned(Alignment::Left).with_run(run)
}

fn assemble_footer(mut model: DocumentModel) -> DocumentModel {
    model.footer = Paragraph::new()
        .with_run(RenderableRun::plain(FOOTER_VERSION_STAMP).with_size(FOOTER_FONT_PT));
    model
}
