//! Short display names for a batch of replay files.
//!
//! Log files produced by one tournament run tend to share long prefixes and
//! suffixes (`GameManager_map3_..._run7.viz.txt`). Stripping what every name
//! has in common leaves the part that actually tells panels apart.

use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Longest label kept verbatim; longer cores are compressed in the middle.
pub const MAX_LABEL_LEN: usize = 24;

/// Marker inserted where characters were dropped.
pub const ELLIPSIS: char = '…';

/// Characters trimmed from both ends of a stripped core.
const SEPARATORS: &[char] = &['_', '-', '.', ' '];

/// A replay's label pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName {
    /// Deduplicated short label, unique within a session
    pub short: String,
    /// Full file name
    pub full: String,
}

/// File name component of `path`, or the whole string when there is none.
pub fn basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

/// Longest common prefix of all strings, in characters.
pub fn common_prefix_len(strings: &[Vec<char>]) -> usize {
    let Some((first, rest)) = strings.split_first() else {
        return 0;
    };
    let mut len = first.len();
    for s in rest {
        len = len.min(first.iter().zip(s).take_while(|(a, b)| a == b).count());
    }
    len
}

/// Longest common suffix of all strings, in characters.
pub fn common_suffix_len(strings: &[Vec<char>]) -> usize {
    let reversed: Vec<Vec<char>> = strings
        .iter()
        .map(|s| s.iter().rev().copied().collect())
        .collect();
    common_prefix_len(&reversed)
}

/// Shorten `s` to at most `max_len` characters by replacing its middle with
/// a single [`ELLIPSIS`].
pub fn compress_middle(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        return s.to_string();
    }

    let keep = max_len.saturating_sub(3);
    let left = keep / 2;
    let right = keep - left;

    let mut out: String = chars[..left].iter().collect();
    out.push(ELLIPSIS);
    out.extend(&chars[chars.len() - right..]);
    out
}

/// Derive short, pairwise-unique labels for `paths`, in input order.
///
/// Each label is the basename minus the prefix and suffix shared by all
/// basenames, trimmed of separators, falling back to `game<N>` (1-based)
/// when nothing is left, and compressed to [`MAX_LABEL_LEN`]. Repeats get a
/// `#<n>` suffix, counted per label starting at 2.
pub fn dedupe_names<S: AsRef<str>>(paths: &[S]) -> Vec<String> {
    let bases: Vec<Vec<char>> = paths
        .iter()
        .map(|p| basename(p.as_ref()).chars().collect())
        .collect();
    let prefix = common_prefix_len(&bases);
    let suffix = common_suffix_len(&bases);

    let cores = bases.iter().enumerate().map(|(i, base)| {
        let end = base.len().saturating_sub(suffix);
        let core: String = if prefix < end {
            base[prefix..end].iter().collect()
        } else {
            String::new()
        };
        let core = core.trim_matches(SEPARATORS);
        if core.is_empty() {
            format!("game{}", i + 1)
        } else {
            compress_middle(core, MAX_LABEL_LEN)
        }
    });

    let mut used: HashSet<String> = HashSet::new();
    let mut occurrences: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(paths.len());

    for label in cores {
        let count = occurrences.entry(label.clone()).or_insert(0);
        *count += 1;

        let mut candidate = if *count == 1 {
            label.clone()
        } else {
            format!("{label}#{count}")
        };
        // A synthesized `x#2` can still clash with a file literally named `x#2`.
        while used.contains(&candidate) {
            *count += 1;
            candidate = format!("{label}#{count}");
        }

        used.insert(candidate.clone());
        out.push(candidate);
    }

    out
}

/// Pair every path with its short label and full basename.
pub fn display_names<S: AsRef<str>>(paths: &[S]) -> Vec<DisplayName> {
    dedupe_names(paths)
        .into_iter()
        .zip(paths)
        .map(|(short, path)| DisplayName {
            short,
            full: basename(path.as_ref()),
        })
        .collect()
}
