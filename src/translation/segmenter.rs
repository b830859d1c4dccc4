/*!
 * Sentence segmentation and batching.
 *
 * Extracted text is split into sentence-like units and grouped into
 * fixed-size batches. Batch `n` always covers sentences
 * `[n * size, n * size + size)` so translations can be reassembled by
 * batch index alone.
 */

/// Default number of sentences per translation request
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Default marker placed between sentences of a batch
pub const DEFAULT_SEPARATOR: &str = "===SENTENCE_SEPARATOR===";

/// A contiguous group of sentences sent in one translation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceBatch {
    /// Zero-based position of this batch
    pub index: usize,
    /// Index of the first sentence of this batch in the full sentence list
    pub offset: usize,
    /// The sentences, in source order
    pub sentences: Vec<String>,
}

impl SentenceBatch {
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Sentences joined with the separator on its own line
    pub fn joined(&self, separator: &str) -> String {
        self.sentences.join(&format!("\n{}\n", separator))
    }
}

/// Split text at whitespace that follows `.`, `!` or `?`.
///
/// Boundary punctuation stays with its sentence, fragments are trimmed and
/// blank fragments are dropped.
pub fn segment(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut previous: Option<char> = None;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() && matches!(previous, Some('.' | '!' | '?')) {
            push_fragment(&mut sentences, &mut current);
            while chars.next_if(|next| next.is_whitespace()).is_some() {}
            previous = None;
            continue;
        }

        current.push(c);
        previous = Some(c);
    }
    push_fragment(&mut sentences, &mut current);

    sentences
}

fn push_fragment(sentences: &mut Vec<String>, current: &mut String) {
    let fragment = current.trim();
    if !fragment.is_empty() {
        sentences.push(fragment.to_string());
    }
    current.clear();
}

/// Group sentences into batches of `batch_size` (a size of 0 is treated as 1)
pub fn batch(sentences: &[String], batch_size: usize) -> Vec<SentenceBatch> {
    let size = batch_size.max(1);

    sentences
        .chunks(size)
        .enumerate()
        .map(|(index, chunk)| SentenceBatch {
            index,
            offset: index * size,
            sentences: chunk.to_vec(),
        })
        .collect()
}
