//! # docx: WordprocessingML renderer
//!
//! Writes a [`DocumentModel`] as a minimal `.docx` package: content types,
//! package relationships, the main document, styles, one header and one footer.
//!
//! Each hyperlink run gets its own external relationship in the relationships
//! part of the document part it appears in. Relationship ids are allocated in
//! document order, so the same model always produces the same package.

use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use quick_xml::escape::escape;
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::contract::{RenderError, Renderer};
use crate::model::{
    Alignment, DocumentModel, FontSpec, Paragraph, RenderableRun, RunColor, Section, Table,
    ThemeColor,
};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PACKAGE_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_HEADER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/header";
const REL_FOOTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer";
pub const REL_HYPERLINK: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";

pub const DOCUMENT_PART: &str = "word/document.xml";
pub const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";
pub const STYLES_PART: &str = "word/styles.xml";
pub const HEADER_PART: &str = "word/header1.xml";
pub const HEADER_RELS_PART: &str = "word/_rels/header1.xml.rels";
pub const FOOTER_PART: &str = "word/footer1.xml";
pub const FOOTER_RELS_PART: &str = "word/_rels/footer1.xml.rels";

/// Usable page width (Letter, 1in margins) in twentieths of a point.
const TEXT_WIDTH_TWIPS: u32 = 9360;
const MIN_COLUMN_TWIPS: u32 = 720;
const TWIPS_PER_INCH: f32 = 1440.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub kind: &'static str,
    pub target: String,
    pub external: bool,
}

/// Relationships of one package part.
#[derive(Debug, Default)]
pub struct Relationships {
    entries: Vec<Relationship>,
}

impl Relationships {
    pub fn add(&mut self, kind: &'static str, target: &str, external: bool) -> String {
        let id = format!("rId{}", self.entries.len() + 1);
        self.entries.push(Relationship {
            id: id.clone(),
            kind,
            target: target.to_string(),
            external,
        });
        id
    }

    pub fn relate_hyperlink(&mut self, url: &str) -> String {
        self.add(REL_HYPERLINK, url, true)
    }

    pub fn entries(&self) -> &[Relationship] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_xml(&self) -> String {
        let mut xml = format!(r#"{XML_DECLARATION}<Relationships xmlns="{NS_PACKAGE_RELS}">"#);
        for rel in &self.entries {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"{}/>"#,
                rel.id,
                rel.kind,
                escape(rel.target.as_str()),
                if rel.external { r#" TargetMode="External""# } else { "" }
            ));
        }
        xml.push_str("</Relationships>");
        xml
    }
}

/// In-memory `.docx` package: part names and their XML, in write order.
#[derive(Debug)]
pub struct DocxPackage {
    pub parts: Vec<(&'static str, String)>,
}

impl DocxPackage {
    pub fn part(&self, name: &str) -> Option<&str> {
        self.parts
            .iter()
            .find(|(part, _)| *part == name)
            .map(|(_, xml)| xml.as_str())
    }

    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<W, RenderError> {
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, xml) in &self.parts {
            zip.start_file(*name, options)?;
            zip.write_all(xml.as_bytes())
                .map_err(|e| RenderError::Container(e.into()))?;
        }
        Ok(zip.finish()?)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DocxRenderer;

impl DocxRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn package(&self, model: &DocumentModel) -> DocxPackage {
        let mut document_rels = Relationships::default();
        document_rels.add(REL_STYLES, "styles.xml", false);
        let header_id = document_rels.add(REL_HEADER, "header1.xml", false);
        let footer_id = document_rels.add(REL_FOOTER, "footer1.xml", false);

        let mut body = PartWriter::new(document_rels);
        let mut header = PartWriter::new(Relationships::default());
        let mut footer = PartWriter::new(Relationships::default());

        for section in model.sections() {
            match section {
                Section::Header(region) => {
                    header.table(&region.banner);
                    // A header must not end with a table.
                    header.paragraph(&Paragraph::new());
                    body.paragraph(&region.title);
                }
                Section::MetaTable(table) | Section::MainTable(table) => body.table(table),
                Section::Separator(paragraph) => body.paragraph(paragraph),
                Section::Comments(block) => {
                    body.paragraph(&block.heading);
                    for entry in &block.entries {
                        body.paragraph(entry);
                    }
                }
                Section::Footer(paragraph) => footer.paragraph(paragraph),
            }
        }

        let document_xml = format!(
            concat!(
                r#"{decl}<w:document xmlns:w="{w}" xmlns:r="{r}"><w:body>{body}"#,
                r#"<w:sectPr><w:headerReference w:type="default" r:id="{header}"/>"#,
                r#"<w:footerReference w:type="default" r:id="{footer}"/>"#,
                r#"<w:pgSz w:w="12240" w:h="15840"/>"#,
                r#"<w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/>"#,
                r#"</w:sectPr></w:body></w:document>"#
            ),
            decl = XML_DECLARATION,
            w = NS_W,
            r = NS_R,
            body = body.xml,
            header = header_id,
            footer = footer_id,
        );
        let header_xml = format!(
            r#"{XML_DECLARATION}<w:hdr xmlns:w="{NS_W}" xmlns:r="{NS_R}">{}</w:hdr>"#,
            header.xml
        );
        let footer_xml = format!(
            r#"{XML_DECLARATION}<w:ftr xmlns:w="{NS_W}" xmlns:r="{NS_R}">{}</w:ftr>"#,
            footer.xml
        );

        let mut parts = vec![
            ("[Content_Types].xml", content_types_xml()),
            ("_rels/.rels", package_rels_xml()),
            (DOCUMENT_PART, document_xml),
            (DOCUMENT_RELS_PART, body.rels.to_xml()),
            (STYLES_PART, styles_xml(&model.default_font)),
            (HEADER_PART, header_xml),
            (FOOTER_PART, footer_xml),
        ];
        if !header.rels.is_empty() {
            parts.push((HEADER_RELS_PART, header.rels.to_xml()));
        }
        if !footer.rels.is_empty() {
            parts.push((FOOTER_RELS_PART, footer.rels.to_xml()));
        }
        debug!(parts = parts.len(), "Assembled docx package");
        DocxPackage { parts }
    }
}

impl Renderer for DocxRenderer {
    fn render(&self, model: &DocumentModel, destination: &Path) -> Result<(), RenderError> {
        let package = self.package(model);
        let file = File::create(destination).map_err(|source| RenderError::Io {
            path: destination.to_path_buf(),
            source,
        })?;
        package.write_to(file)?;
        info!(path = %destination.display(), "Wrote docx document");
        Ok(())
    }
}

/// Accumulates the XML of one part together with that part's relationships.
struct PartWriter {
    xml: String,
    rels: Relationships,
}

impl PartWriter {
    fn new(rels: Relationships) -> Self {
        Self {
            xml: String::new(),
            rels,
        }
    }

    fn paragraph(&mut self, paragraph: &Paragraph) {
        self.xml.push_str("<w:p>");
        if paragraph.single_line_spacing || paragraph.alignment.is_some() {
            self.xml.push_str("<w:pPr>");
            if paragraph.single_line_spacing {
                self.xml
                    .push_str(r#"<w:spacing w:line="240" w:lineRule="auto"/>"#);
            }
            if let Some(alignment) = paragraph.alignment {
                let value = match alignment {
                    Alignment::Left => "left",
                    Alignment::Center => "center",
                    Alignment::Right => "right",
                };
                self.xml.push_str(&format!(r#"<w:jc w:val="{value}"/>"#));
            }
            self.xml.push_str("</w:pPr>");
        }
        for run in &paragraph.runs {
            self.run(run);
        }
        self.xml.push_str("</w:p>");
    }

    fn run(&mut self, run: &RenderableRun) {
        match &run.hyperlink_target {
            Some(target) => {
                let id = self.rels.relate_hyperlink(target);
                self.xml
                    .push_str(&format!(r#"<w:hyperlink r:id="{id}" w:history="1">"#));
                self.xml.push_str(&run_xml(run));
                self.xml.push_str("</w:hyperlink>");
            }
            None => self.xml.push_str(&run_xml(run)),
        }
    }

    fn table(&mut self, table: &Table) {
        let widths = column_twips(table);
        self.xml.push_str(
            r#"<w:tbl><w:tblPr><w:tblW w:w="0" w:type="auto"/><w:tblLook w:val="04A0"/></w:tblPr><w:tblGrid>"#,
        );
        for width in &widths {
            self.xml.push_str(&format!(r#"<w:gridCol w:w="{width}"/>"#));
        }
        self.xml.push_str("</w:tblGrid>");
        for row in table.rows() {
            self.xml.push_str("<w:tr>");
            for (column, cell) in row.iter().enumerate() {
                let width = widths.get(column).copied().unwrap_or(MIN_COLUMN_TWIPS);
                self.xml.push_str(&format!(
                    r#"<w:tc><w:tcPr><w:tcW w:w="{width}" w:type="dxa"/></w:tcPr>"#
                ));
                self.paragraph(&cell.paragraph);
                self.xml.push_str("</w:tc>");
            }
            self.xml.push_str("</w:tr>");
        }
        self.xml.push_str("</w:tbl>");
    }
}

fn run_xml(run: &RenderableRun) -> String {
    let mut props = String::new();
    if run.is_hyperlink() {
        props.push_str(r#"<w:rStyle w:val="Hyperlink"/>"#);
    }
    if run.bold {
        props.push_str("<w:b/>");
    }
    if run.italic {
        props.push_str("<w:i/>");
    }
    if let Some(color) = run.color {
        match color {
            RunColor::Rgb(..) => props.push_str(&format!(r#"<w:color w:val="{}"/>"#, color.hex())),
            RunColor::Theme(ThemeColor::Hyperlink) => props.push_str(&format!(
                r#"<w:color w:val="{}" w:themeColor="hyperlink"/>"#,
                color.hex()
            )),
        }
    }
    if let Some(size) = run.font_size_pt {
        let half_points = u32::from(size) * 2;
        props.push_str(&format!(
            r#"<w:sz w:val="{half_points}"/><w:szCs w:val="{half_points}"/>"#
        ));
    }
    if run.underline {
        props.push_str(r#"<w:u w:val="single"/>"#);
    }

    let mut xml = String::from("<w:r>");
    if !props.is_empty() {
        xml.push_str("<w:rPr>");
        xml.push_str(&props);
        xml.push_str("</w:rPr>");
    }
    for (i, line) in run.text.split('\n').enumerate() {
        if i > 0 {
            xml.push_str("<w:br/>");
        }
        if !line.is_empty() {
            xml.push_str(&format!(
                r#"<w:t xml:space="preserve">{}</w:t>"#,
                escape(line)
            ));
        }
    }
    xml.push_str("</w:r>");
    xml
}

/// Column widths in twips. Columns without an explicit width share what is
/// left of the text width.
fn column_twips(table: &Table) -> Vec<u32> {
    let columns = table.column_count();
    let explicit: Vec<Option<u32>> = (0..columns)
        .map(|c| {
            table
                .column_width_in(c)
                .map(|inches| (inches * TWIPS_PER_INCH).round() as u32)
        })
        .collect();
    let used: u32 = explicit.iter().flatten().sum();
    let open = explicit.iter().filter(|w| w.is_none()).count() as u32;
    let share = if open == 0 {
        0
    } else {
        (TEXT_WIDTH_TWIPS.saturating_sub(used) / open).max(MIN_COLUMN_TWIPS)
    };
    explicit.into_iter().map(|w| w.unwrap_or(share)).collect()
}

fn content_types_xml() -> String {
    format!(
        concat!(
            r#"{}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
            r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
            r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#,
            r#"<Override PartName="/word/header1.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml"/>"#,
            r#"<Override PartName="/word/footer1.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml"/>"#,
            r#"</Types>"#
        ),
        XML_DECLARATION
    )
}

fn package_rels_xml() -> String {
    let mut rels = Relationships::default();
    rels.add(REL_OFFICE_DOCUMENT, DOCUMENT_PART, false);
    rels.to_xml()
}

fn styles_xml(font: &FontSpec) -> String {
    let name = escape(font.name.as_str());
    let half_points = u32::from(font.size_pt) * 2;
    format!(
        concat!(
            r#"{decl}<w:styles xmlns:w="{w}"><w:docDefaults><w:rPrDefault><w:rPr>"#,
            r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}" w:cs="{font}"/>"#,
            r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/></w:rPr></w:rPrDefault></w:docDefaults>"#,
            r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#,
            r#"<w:style w:type="character" w:styleId="Hyperlink"><w:name w:val="Hyperlink"/>"#,
            r#"<w:rPr><w:color w:val="0563C1" w:themeColor="hyperlink"/><w:u w:val="single"/></w:rPr></w:style>"#,
            r#"<w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/>"#,
            r#"<w:tblPr><w:tblInd w:w="0" w:type="dxa"/><w:tblCellMar><w:top w:w="0" w:type="dxa"/>"#,
            r#"<w:left w:w="108" w:type="dxa"/><w:bottom w:w="0" w:type="dxa"/><w:right w:w="108" w:type="dxa"/>"#,
            r#"</w:tblCellMar></w:tblPr></w:style></w:styles>"#
        ),
        decl = XML_DECLARATION,
        w = NS_W,
        font = name,
        size = half_points,
    )
}
