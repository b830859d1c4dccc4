/*!
 * Bilingual document composition.
 *
 * Sentence pairs are laid out top to bottom on fixed-size pages: the source
 * line, then the translation one line height below, then the pair spacing.
 * A pair never straddles two pages. Layout is computed up front as plain data
 * (`PageLayout`s of `PlacedLine`s) and only then serialized with `lopdf`.
 *
 * Translations are drawn left to right with the same single-byte Type1 font
 * as the source text; there is no bidi reordering or glyph shaping, so
 * right-to-left scripts are stored as UTF-8 bytes and render incorrectly in
 * most viewers.
 */

use log::debug;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::app_config::LayoutConfig;
use crate::errors::ComposeError;

const FONT_RESOURCE: &str = "F1";

/// Which half of a pair a line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Source,
    Translation,
}

/// One line of text at an absolute position
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub kind: LineKind,
    /// Index of the pair this line belongs to
    pub pair_index: usize,
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// Lines placed on one page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageLayout {
    pub lines: Vec<PlacedLine>,
}

impl PageLayout {
    /// Number of pairs on this page
    pub fn pair_count(&self) -> usize {
        self.lines.iter().filter(|l| l.kind == LineKind::Source).count()
    }
}

/// Sentence pairs laid out page by page
#[derive(Debug, Clone, PartialEq)]
pub struct BilingualDocument {
    pages: Vec<PageLayout>,
    layout: LayoutConfig,
}

impl BilingualDocument {
    /// Pair `sources[i]` with `translations[i]` and lay the pairs out.
    ///
    /// Fails when the two lists differ in length.
    pub fn compose(
        sources: &[String],
        translations: &[String],
        layout: &LayoutConfig,
    ) -> Result<Self, ComposeError> {
        if sources.len() != translations.len() {
            return Err(ComposeError::PairCountMismatch {
                sources: sources.len(),
                translations: translations.len(),
            });
        }

        Ok(Self::from_pairs(
            sources.iter().map(String::as_str).zip(translations.iter().map(String::as_str)),
            layout,
        ))
    }

    /// Lay out already-paired sentences
    pub fn from_pairs<'a, I>(pairs: I, layout: &LayoutConfig) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let top = layout.page_height - layout.margin_top;
        let mut pages = Vec::new();
        let mut page = PageLayout::default();
        let mut cursor = top;

        for (pair_index, (source, translation)) in pairs.into_iter().enumerate() {
            let translation_y = cursor - layout.line_height;
            if translation_y < layout.margin_bottom && !page.lines.is_empty() {
                pages.push(std::mem::take(&mut page));
                cursor = top;
            }

            page.lines.push(PlacedLine {
                kind: LineKind::Source,
                pair_index,
                text: source.to_string(),
                x: layout.margin_left,
                y: cursor,
            });
            cursor -= layout.line_height;

            page.lines.push(PlacedLine {
                kind: LineKind::Translation,
                pair_index,
                text: translation.to_string(),
                x: layout.margin_left,
                y: cursor,
            });
            cursor -= layout.line_height + layout.pair_spacing;
        }

        if !page.lines.is_empty() || pages.is_empty() {
            pages.push(page);
        }

        Self {
            pages,
            layout: layout.clone(),
        }
    }

    pub fn pages(&self) -> &[PageLayout] {
        &self.pages
    }

    /// Always at least one, an empty document still has a blank page
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pair_count(&self) -> usize {
        self.pages.iter().map(PageLayout::pair_count).sum()
    }

    /// Serialize to PDF bytes
    pub fn to_pdf_bytes(&self) -> Result<Vec<u8>, ComposeError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { FONT_RESOURCE => font_id },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let page_id = self.add_page(&mut doc, page, pages_id, resources_id)?;
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    Object::Real(self.layout.page_width),
                    Object::Real(self.layout.page_height),
                ],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| ComposeError::Pdf(e.to_string()))?;

        debug!("Composed {} pages ({} bytes)", self.pages.len(), buffer.len());
        Ok(buffer)
    }

    fn add_page(
        &self,
        doc: &mut Document,
        page: &PageLayout,
        pages_id: ObjectId,
        resources_id: ObjectId,
    ) -> Result<ObjectId, ComposeError> {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![FONT_RESOURCE.into(), Object::Real(self.layout.font_size)],
            ),
        ];

        for line in &page.lines {
            operations.push(Operation::new(
                "Tm",
                vec![
                    1.into(),
                    0.into(),
                    0.into(),
                    1.into(),
                    Object::Real(line.x),
                    Object::Real(line.y),
                ],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(line.text.as_str())],
            ));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        Ok(doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        }))
    }
}
