/*!
 * Best-effort text extraction from PDF bytes.
 *
 * Three strategies are tried in order and the first one producing text wins:
 *
 * 1. Object model: the document is parsed with `lopdf`, every page content
 *    stream is decoded (Flate streams included) and the string operands of
 *    the text-showing operators are collected in page order.
 * 2. Literal strings: the raw bytes are scanned for `( ... )` literals.
 * 3. Stream blocks: readable characters (printable ASCII and the Arabic
 *    block) are kept from every `stream ... endstream` block.
 *
 * Known limitation: font encodings and CMaps are not decoded and text
 * positioning is only used to insert word breaks, so output for complex PDFs
 * can be incomplete or garbled. Downstream code relies on sentence order,
 * not on fidelity.
 */

use log::debug;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ExtractionError;

static LITERAL_STRING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]+)\)").expect("literal string pattern is valid"));

static STREAM_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)stream\s*(.*?)\s*endstream").expect("stream block pattern is valid"));

/// Stream blocks with this many readable characters or fewer are noise
const MIN_STREAM_TEXT_LEN: usize = 10;

/// TJ kerning adjustments at or below this value are treated as a word gap
const TJ_WORD_GAP: f32 = -250.0;

/// Which strategy recovered the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    ObjectModel,
    LiteralStrings,
    StreamBlocks,
}

/// Text recovered from a document
#[derive(Debug, Clone)]
pub struct ExtractedText {
    /// Extracted text, never blank
    pub text: String,
    /// Strategy that produced the text
    pub method: ExtractionMethod,
    /// Page count when the document could be parsed
    pub page_count: Option<usize>,
}

/// Heuristic PDF text extractor
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Extract text from raw PDF bytes, failing with `ExtractionError::Empty`
    /// when no strategy recovers any non-whitespace text.
    pub fn extract(bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
        let parsed = Self::extract_with_object_model(bytes);
        let page_count = parsed.as_ref().map(|(_, pages)| *pages);

        if let Some((text, _)) = parsed.filter(|(text, _)| !text.trim().is_empty()) {
            return Ok(ExtractedText {
                text,
                method: ExtractionMethod::ObjectModel,
                page_count,
            });
        }

        let raw = String::from_utf8_lossy(bytes);

        let literal_text = extract_literal_strings(&raw);
        if !literal_text.is_empty() {
            return Ok(ExtractedText {
                text: literal_text,
                method: ExtractionMethod::LiteralStrings,
                page_count,
            });
        }

        let stream_text = extract_stream_blocks(&raw);
        if !stream_text.is_empty() {
            return Ok(ExtractedText {
                text: stream_text,
                method: ExtractionMethod::StreamBlocks,
                page_count,
            });
        }

        Err(ExtractionError::Empty)
    }

    /// Returns the joined page text and the number of pages, or `None` when
    /// the bytes cannot be loaded as a PDF document.
    fn extract_with_object_model(bytes: &[u8]) -> Option<(String, usize)> {
        let document = match Document::load_mem(bytes) {
            Ok(document) => document,
            Err(e) => {
                debug!("Falling back to raw scanning, PDF parse failed: {}", e);
                return None;
            }
        };

        let pages = document.get_pages();
        let mut page_texts = Vec::with_capacity(pages.len());

        for (page_number, page_id) in &pages {
            let raw_content = match document.get_page_content(*page_id) {
                Ok(content) => content,
                Err(e) => {
                    debug!("Skipping page {}: unreadable content ({})", page_number, e);
                    continue;
                }
            };

            let content = match Content::decode(&raw_content) {
                Ok(content) => content,
                Err(e) => {
                    debug!("Skipping page {}: invalid content stream ({})", page_number, e);
                    continue;
                }
            };

            let text = text_from_operations(&content.operations);
            if !text.trim().is_empty() {
                page_texts.push(text);
            }
        }

        Some((collapse_whitespace(&page_texts.join(" ")), pages.len()))
    }
}

/// Collect every parenthesized literal, join with spaces and drop backslashes
pub fn extract_literal_strings(raw: &str) -> String {
    LITERAL_STRING
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .replace('\\', "")
        .trim()
        .to_string()
}

/// Keep readable characters of every stream block long enough to be text
pub fn extract_stream_blocks(raw: &str) -> String {
    let mut extracted = String::new();

    for caps in STREAM_BLOCK.captures_iter(raw) {
        let Some(block) = caps.get(1) else { continue };

        let readable: String = block
            .as_str()
            .chars()
            .map(|c| if is_readable(c) { c } else { ' ' })
            .collect();
        let readable = readable.trim();

        if readable.chars().count() > MIN_STREAM_TEXT_LEN {
            extracted.push_str(readable);
            extracted.push(' ');
        }
    }

    extracted.trim().to_string()
}

fn is_readable(c: char) -> bool {
    matches!(c, '\u{20}'..='\u{7E}' | '\u{0600}'..='\u{06FF}')
}

fn text_from_operations(operations: &[Operation]) -> String {
    let mut text = String::new();

    for operation in operations {
        match operation.operator.as_str() {
            "Tj" => {
                if let Some(operand) = operation.operands.first() {
                    push_string_operand(&mut text, operand);
                }
            }
            "'" => {
                push_break(&mut text);
                if let Some(operand) = operation.operands.first() {
                    push_string_operand(&mut text, operand);
                }
            }
            "\"" => {
                push_break(&mut text);
                if let Some(operand) = operation.operands.get(2) {
                    push_string_operand(&mut text, operand);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operation.operands.first() {
                    for item in items {
                        match item {
                            Object::Integer(adjust) if (*adjust as f32) <= TJ_WORD_GAP => push_break(&mut text),
                            Object::Real(adjust) if *adjust <= TJ_WORD_GAP => push_break(&mut text),
                            other => push_string_operand(&mut text, other),
                        }
                    }
                }
            }
            "Td" | "TD" | "Tm" | "T*" | "ET" => push_break(&mut text),
            _ => {}
        }
    }

    text
}

fn push_break(text: &mut String) {
    if !text.is_empty() && !text.ends_with(char::is_whitespace) {
        text.push(' ');
    }
}

fn push_string_operand(text: &mut String, operand: &Object) {
    if let Object::String(bytes, _) = operand {
        text.push_str(&decode_pdf_string(bytes));
    }
}

/// UTF-16BE with BOM, then UTF-8, then one char per byte
fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|b| *b as char).collect(),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
