//! # model: in-memory representation of the license approval form
//!
//! The [`DocumentModel`] is a fixed tree of regions (header, meta table,
//! separator, main table, comment block, footer). Tables are created with their
//! final shape by [`DocumentModel::blank`], so assembly can only fill cells,
//! never add or drop rows.
//!
//! The smallest unit is the [`RenderableRun`]: text plus formatting and an
//! optional hyperlink target. Renderers walk [`DocumentModel::sections`] in order.

/// Theme colours referenced by runs; resolved by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeColor {
    Hyperlink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunColor {
    Rgb(u8, u8, u8),
    Theme(ThemeColor),
}

impl RunColor {
    /// `RRGGBB` hex as used by WordprocessingML. Theme colours map to their
    /// Office default so readers without theme support still show them.
    pub fn hex(&self) -> String {
        match self {
            RunColor::Rgb(r, g, b) => format!("{r:02X}{g:02X}{b:02X}"),
            RunColor::Theme(ThemeColor::Hyperlink) => "0563C1".to_string(),
        }
    }
}

/// Atomic styled text unit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderableRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub font_size_pt: Option<u16>,
    pub color: Option<RunColor>,
    pub hyperlink_target: Option<String>,
}

impl RenderableRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn with_size(mut self, font_size_pt: u16) -> Self {
        self.font_size_pt = Some(font_size_pt);
        self
    }

    pub fn with_color(mut self, color: RunColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn is_hyperlink(&self) -> bool {
        self.hyperlink_target.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Paragraph {
    pub alignment: Option<Alignment>,
    pub single_line_spacing: bool,
    pub runs: Vec<RenderableRun>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn aligned(alignment: Alignment) -> Self {
        Self {
            alignment: Some(alignment),
            ..Self::default()
        }
    }

    pub fn with_run(mut self, run: RenderableRun) -> Self {
        self.runs.push(run);
        self
    }

    /// Replaces the paragraph content with a single plain run.
    pub fn set_text(&mut self, text: &str) {
        self.set_runs(vec![RenderableRun::plain(text)]);
    }

    /// Replaces the paragraph content. Formatting of the paragraph is kept.
    pub fn set_runs(&mut self, runs: Vec<RenderableRun>) {
        self.runs = runs;
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub paragraph: Paragraph,
}

impl Cell {
    pub fn text(&self) -> String {
        self.paragraph.text()
    }
}

/// Rectangular table; the shape is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    rows: Vec<Vec<Cell>>,
    column_widths_in: Vec<Option<f32>>,
}

impl Table {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows: vec![vec![Cell::default(); columns]; rows],
            column_widths_in: vec![None; columns],
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_widths_in.len()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Mutable access to one cell paragraph; `None` outside the table shape,
    /// in every build profile. The shape never grows.
    pub fn paragraph_mut(&mut self, row: usize, column: usize) -> Option<&mut Paragraph> {
        self.rows
            .get_mut(row)
            .and_then(|r| r.get_mut(column))
            .map(|c| &mut c.paragraph)
    }

    pub fn column_width_in(&self, column: usize) -> Option<f32> {
        self.column_widths_in.get(column).copied().flatten()
    }

    pub fn set_column_width(&mut self, column: usize, inches: f32) {
        if let Some(width) = self.column_widths_in.get_mut(column) {
            *width = Some(inches);
        }
    }
}

/// Page header content: a one-row banner table and the centred form title,
/// which opens the body.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderRegion {
    pub banner: Table,
    pub title: Paragraph,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommentBlock {
    pub heading: Paragraph,
    pub entries: Vec<Paragraph>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    pub name: String,
    pub size_pt: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderReason {
    /// The family has no rule for this field and no template filled it.
    VariantNotDefined,
    /// The artifact descriptor could not be read.
    DescriptorUnavailable,
}

/// A main table value cell left as a placeholder during assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub row: usize,
    pub label: &'static str,
    pub reason: PlaceholderReason,
}

pub const HEADER_BANNER_SHAPE: (usize, usize) = (1, 2);
pub const META_TABLE_SHAPE: (usize, usize) = (3, 3);
pub const MAIN_TABLE_SHAPE: (usize, usize) = (9, 2);

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentModel {
    pub default_font: FontSpec,
    pub header: HeaderRegion,
    pub meta_table: Table,
    pub separator: Paragraph,
    pub main_table: Table,
    pub comments: CommentBlock,
    pub footer: Paragraph,
    pub placeholders: Vec<Placeholder>,
}

/// Borrowed view of one region, in document order.
#[derive(Debug, Clone, Copy)]
pub enum Section<'a> {
    Header(&'a HeaderRegion),
    MetaTable(&'a Table),
    Separator(&'a Paragraph),
    MainTable(&'a Table),
    Comments(&'a CommentBlock),
    Footer(&'a Paragraph),
}

impl DocumentModel {
    /// Empty form with every table at its final shape.
    pub fn blank() -> Self {
        Self {
            default_font: FontSpec {
                name: "Calibri".to_string(),
                size_pt: 12,
            },
            header: HeaderRegion {
                banner: Table::new(HEADER_BANNER_SHAPE.0, HEADER_BANNER_SHAPE.1),
                title: Paragraph::new(),
            },
            meta_table: Table::new(META_TABLE_SHAPE.0, META_TABLE_SHAPE.1),
            separator: Paragraph::new(),
            main_table: Table::new(MAIN_TABLE_SHAPE.0, MAIN_TABLE_SHAPE.1),
            comments: CommentBlock::default(),
            footer: Paragraph::new(),
            placeholders: Vec::new(),
        }
    }

    pub fn sections(&self) -> [Section<'_>; 6] {
        [
            Section::Header(&self.header),
            Section::MetaTable(&self.meta_table),
            Section::Separator(&self.separator),
            Section::MainTable(&self.main_table),
            Section::Comments(&self.comments),
            Section::Footer(&self.footer),
        ]
    }

    /// Value text of a main table row.
    pub fn main_value(&self, row: usize) -> Option<String> {
        self.main_table.cell(row, 1).map(Cell::text)
    }

    /// Every run carrying a hyperlink, in document order.
    pub fn hyperlink_runs(&self) -> Vec<&RenderableRun> {
        let mut paragraphs: Vec<&Paragraph> = Vec::new();
        for section in self.sections() {
            match section {
                Section::Header(h) => {
                    paragraphs.extend(table_paragraphs(&h.banner));
                    paragraphs.push(&h.title);
                }
                Section::MetaTable(t) | Section::MainTable(t) => {
                    paragraphs.extend(table_paragraphs(t))
                }
                Section::Separator(p) | Section::Footer(p) => paragraphs.push(p),
                Section::Comments(c) => {
                    paragraphs.push(&c.heading);
                    paragraphs.extend(c.entries.iter());
                }
            }
        }
        paragraphs
            .into_iter()
            .flat_map(|p| p.runs.iter())
            .filter(|r| r.is_hyperlink())
            .collect()
    }
}

fn table_paragraphs(table: &Table) -> impl Iterator<Item = &Paragraph> {
    table.rows().iter().flatten().map(|c| &c.paragraph)
}
