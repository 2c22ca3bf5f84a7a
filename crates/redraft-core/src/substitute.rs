//! Batch substitution of text fragments against structured content.
//!
//! Entries apply in batch order against the live, progressively mutated
//! content, so earlier substitutions are visible to later lookups. Each
//! entry targets exactly one occurrence of its `original`; entries whose
//! fragment can no longer be found are skipped and reported, never fatal.
//! `apply_inverse` replays the same entries in the same order with the
//! pair swapped, which restores the original plain text exactly.

use std::collections::HashMap;
use std::ops::Range;

use tracing::debug;

use crate::locate;
use crate::markup::Markup;
use crate::types::Modification;

/// Outcome of applying a batch: the entries that landed and the entries
/// skipped because their fragment was no longer present. Only `applied`
/// entries may be inverted later.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub applied: Vec<Modification>,
    pub skipped: Vec<Modification>,
}

impl ApplyReport {
    /// True when every entry in the batch was substituted.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// True when nothing was substituted at all.
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Apply a batch of modifications, `original` -> `modified`.
pub fn apply(content: &mut Markup, batch: &[Modification]) -> ApplyReport {
    apply_pairs(content, batch, false)
}

/// Invert a previously applied batch, `modified` -> `original`. Entries
/// are processed in the same order as forward application.
pub fn apply_inverse(content: &mut Markup, batch: &[Modification]) -> ApplyReport {
    apply_pairs(content, batch, true)
}

fn apply_pairs(content: &mut Markup, batch: &[Modification], inverse: bool) -> ApplyReport {
    let mut report = ApplyReport::default();
    // Spans already rewritten by this batch, keyed by the searched text.
    // A later entry searching for the same text must not re-target a span
    // an earlier sibling produced; an entry searching for different text
    // may (sequential visibility). Ranges are kept in current-content
    // coordinates, shifted as later substitutions change lengths.
    let mut consumed: HashMap<&str, Vec<Range<usize>>> = HashMap::new();

    for entry in batch {
        let (find, replace) = if inverse {
            (entry.modified.as_str(), entry.original.as_str())
        } else {
            (entry.original.as_str(), entry.modified.as_str())
        };
        if find.is_empty() {
            report.skipped.push(entry.clone());
            continue;
        }
        let hit = {
            let taken = consumed.get(find).map(Vec::as_slice).unwrap_or_default();
            locate::locate(content, find)
                .into_iter()
                .find(|occ| !taken.iter().any(|range| occ.overlaps(range)))
        };
        let Some(occ) = hit else {
            debug!(fragment = find, "fragment not found, skipping entry");
            report.skipped.push(entry.clone());
            continue;
        };

        content.splice(occ.range(), replace);
        report.applied.push(entry.clone());

        let new_len = replace.chars().count();
        let delta = new_len as isize - occ.len as isize;
        if delta != 0 {
            for ranges in consumed.values_mut() {
                for range in ranges.iter_mut() {
                    if range.start >= occ.end() {
                        range.start = range.start.wrapping_add_signed(delta);
                        range.end = range.end.wrapping_add_signed(delta);
                    }
                }
            }
        }
        consumed
            .entry(find)
            .or_default()
            .push(occ.start..occ.start + new_len);
    }
    report
}
