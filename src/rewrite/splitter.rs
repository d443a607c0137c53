//! Summary text distribution.
//!
//! A replacement summary arrives as one string but must land in however
//! many paragraphs the template reserved for it. Overloading a single
//! paragraph historically rendered truncated, so the text is split into one
//! chunk per paragraph: whole sentences balanced greedily across buckets
//! when the text has sentence structure, near-equal word chunks otherwise.

/// Split `text` into exactly `n` chunks for `n` summary paragraphs.
///
/// Deterministic: the same input always yields the same partition. Chunks
/// may be empty when there is less text than paragraphs.
pub fn distribute(text: &str, n: usize) -> Vec<String> {
    let cleaned = strip_trailing_ellipsis(text);
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![cleaned];
    }

    let sentences = split_sentences(&cleaned);
    if sentences.len() < 2 {
        // No real sentence structure to balance.
        return word_chunks(&cleaned, n);
    }

    balance_sentences(sentences, n)
}

/// Remove a trailing ellipsis artifact (three dots or the single glyph).
///
/// Truncated model output tends to end this way; re-injecting it would bake
/// the artifact into the document.
pub fn strip_trailing_ellipsis(text: &str) -> String {
    let mut s = text.trim();
    loop {
        if let Some(rest) = s.strip_suffix("...") {
            s = rest.trim_end();
        } else if let Some(rest) = s.strip_suffix('…') {
            s = rest.trim_end();
        } else {
            break;
        }
    }
    s.to_string()
}

/// Split text into sentences on `.`/`!`/`?` followed by whitespace.
///
/// The terminator stays with its sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            let boundary = chars.peek().map_or(true, |next| next.is_whitespace());
            if boundary {
                let s = current.trim();
                if !s.is_empty() {
                    sentences.push(s.to_string());
                }
                current.clear();
            }
        }
    }
    let s = current.trim();
    if !s.is_empty() {
        sentences.push(s.to_string());
    }

    sentences
}

/// Divide words into `n` near-equal contiguous groups.
///
/// Groups are ceiling-sized; missing words pad with empty strings and any
/// overflow groups merge into the last.
fn word_chunks(text: &str, n: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return vec![String::new(); n];
    }

    let chunk_size = words.len().div_ceil(n);
    let mut chunks: Vec<String> = words
        .chunks(chunk_size)
        .map(|group| group.join(" "))
        .collect();

    while chunks.len() > n {
        let tail = chunks.pop().unwrap_or_default();
        if let Some(last) = chunks.last_mut() {
            if !tail.is_empty() {
                last.push(' ');
                last.push_str(&tail);
            }
        }
    }
    while chunks.len() < n {
        chunks.push(String::new());
    }

    chunks
}

/// Greedily assign whole sentences to `n` buckets, always appending to the
/// currently shortest bucket by running character length. A bin-balancing
/// heuristic, not an optimal partition.
fn balance_sentences(sentences: Vec<String>, n: usize) -> Vec<String> {
    let mut buckets: Vec<String> = vec![String::new(); n];

    for sentence in sentences {
        let shortest = buckets
            .iter()
            .enumerate()
            .min_by_key(|(_, b)| b.chars().count())
            .map(|(i, _)| i)
            .unwrap_or(0);
        let bucket = &mut buckets[shortest];
        if !bucket.is_empty() {
            bucket.push(' ');
        }
        bucket.push_str(&sentence);
    }

    buckets
}
