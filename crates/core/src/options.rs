//! Inline multiple-choice option extraction.
//!
//! A question such as `Capital of France? A) Paris B) Lyon` is shown as a
//! stem followed by one line per option. Options are labelled `A` to `D`,
//! each label followed by `)` or `.`.

use serde::{Deserialize, Serialize};

/// Most options a question can be split into.
const MAX_OPTIONS: usize = 4;

/// A question's display text split into stem and options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitQuestion {
    /// Text before the first option, trimmed.
    pub stem: String,

    /// Options in the order they appear, each trimmed and keeping its label.
    pub options: Vec<String>,
}

impl SplitQuestion {
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }
}

/// Whether `chars[i]` starts an option marker.
///
/// The label must not continue a word, so the `A.` in `DNA.` is text.
fn is_marker_at(chars: &[(usize, char)], i: usize) -> bool {
    if !matches!(chars[i].1, 'A'..='D') {
        return false;
    }
    let closed = matches!(chars.get(i + 1), Some((_, ')' | '.')));
    let at_word_start = i == 0 || !chars[i - 1].1.is_alphanumeric();
    closed && at_word_start
}

/// Split question text into a stem and its multiple-choice options.
///
/// The option run starts at the first marker and is split at each later
/// marker, whatever its label. Markers past the fourth option stay in the
/// fourth option. Without any marker the text is returned unchanged as the
/// stem.
pub fn split_options(text: &str) -> SplitQuestion {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let starts: Vec<usize> = (0..chars.len())
        .filter(|&i| is_marker_at(&chars, i))
        .map(|i| chars[i].0)
        .take(MAX_OPTIONS)
        .collect();

    let Some(&first) = starts.first() else {
        return SplitQuestion {
            stem: text.to_string(),
            options: Vec::new(),
        };
    };

    let options = starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(text.len());
            text[start..end].trim().to_string()
        })
        .collect();

    SplitQuestion {
        stem: text[..first].trim().to_string(),
        options,
    }
}
