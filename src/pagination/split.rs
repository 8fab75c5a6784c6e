//! Bisection split: break a fragment at the whitespace nearest its middle

use unicode_segmentation::UnicodeSegmentation;

/// A fragment cut in two; `left + right` is always the original fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    pub left: &'a str,
    pub right: &'a str,
}

impl<'a> Split<'a> {
    /// Whether the cut landed on a word boundary
    pub fn is_word_boundary(&self) -> bool {
        !self.left.is_empty() && self.right.graphemes(true).next().is_some_and(is_whitespace)
    }

    /// Length of the right half in grapheme clusters
    pub fn right_len(&self) -> usize {
        self.right.graphemes(true).count()
    }
}

/// Number of grapheme clusters in `text`
pub fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}

pub(crate) fn is_whitespace(grapheme: &str) -> bool {
    !grapheme.is_empty() && grapheme.chars().all(char::is_whitespace)
}

/// Byte offset of the whitespace cluster closest to the middle of `text`.
///
/// Scans outward from `center = ceil(len / 2)`: `center - 1` then `center`,
/// then `center - 2` and `center + 1`, and so on. Returns `None` when the
/// only whitespace is the very first cluster or there is none at all, since
/// cutting there would leave an empty left half.
pub fn find_split_point(text: &str) -> Option<usize> {
    let clusters: Vec<(usize, &str)> = text.grapheme_indices(true).collect();
    let len = clusters.len();
    if len == 0 {
        return None;
    }

    let center = len.div_ceil(2);
    for distance in 0..=center.max(len - center) {
        if let Some(left) = center.checked_sub(distance + 1) {
            if left > 0 && is_whitespace(clusters[left].1) {
                return Some(clusters[left].0);
            }
        }

        let right = center + distance;
        if right < len && is_whitespace(clusters[right].1) {
            return Some(clusters[right].0);
        }
    }

    None
}

/// Split `text` at the whitespace nearest its middle.
///
/// The whitespace opens the right half. When no usable whitespace exists the
/// roles swap: the whole fragment becomes the left half and the right half
/// is empty, which callers treat as "unsplittable".
pub fn split_at_center(text: &str) -> Split<'_> {
    match find_split_point(text) {
        Some(at) => {
            let (left, right) = text.split_at(at);
            Split { left, right }
        }
        None => Split {
            left: text,
            right: "",
        },
    }
}
