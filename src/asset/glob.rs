//! Glob resolution against installed package folders.
//!
//! Patterns are `/`-separated and relative to a base directory:
//!
//! | Syntax          | Matches                                          |
//! |-----------------|--------------------------------------------------|
//! | `*`             | any run of characters inside one segment         |
//! | `?`             | exactly one character inside one segment         |
//! | `[a-z]`, `[!x]` | one character from (or not from) the class       |
//! | `**`            | zero or more directory levels (whole segment)    |
//! | `{a,b}`         | either alternative, expanded before matching     |
//!
//! Wildcards skip names starting with `.` unless the pattern segment starts
//! with `.` itself. Only regular files are returned.

use jwalk::{DirEntry, Parallelism, WalkDir};
use regex::Regex;
use std::path::{Path, PathBuf};

use crate::error::{Result, ThemeError};

/// A compiled glob pattern.
#[derive(Debug, Clone)]
pub struct Glob {
    /// One segment list per brace expansion.
    alternatives: Vec<Vec<Segment>>,
}

#[derive(Debug, Clone)]
enum Segment {
    /// `**`
    AnyDepth,
    Literal(String),
    Wildcard { regex: Regex, dot: bool },
}

impl Segment {
    fn compile(segment: &str, pattern: &str) -> Result<Self> {
        if segment == "**" {
            return Ok(Self::AnyDepth);
        }
        if !segment.contains(['*', '?', '[']) {
            return Ok(Self::Literal(segment.to_string()));
        }
        // A class regex rejects (a reversed range, say) is matched literally
        let regex = Regex::new(&format!("^{}$", segment_regex(segment, true)))
            .or_else(|_| Regex::new(&format!("^{}$", segment_regex(segment, false))))
            .map_err(|source| ThemeError::Pattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self::Wildcard {
            regex,
            dot: segment.starts_with('.'),
        })
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            Self::AnyDepth => !name.starts_with('.'),
            Self::Literal(literal) => literal == name,
            Self::Wildcard { regex, dot } => (*dot || !name.starts_with('.')) && regex.is_match(name),
        }
    }
}

impl Glob {
    /// Compile a pattern.
    pub fn new(pattern: &str) -> Result<Self> {
        let mut alternatives = Vec::new();
        for expanded in expand_braces(pattern) {
            // A trailing `/` selects directories only, which never yields files.
            if expanded.ends_with('/') {
                continue;
            }
            let segments = expanded
                .split('/')
                .filter(|s| !s.is_empty() && *s != ".")
                .map(|s| Segment::compile(s, pattern))
                .collect::<Result<Vec<_>>>()?;
            if !segments.is_empty() {
                alternatives.push(segments);
            }
        }
        Ok(Self { alternatives })
    }

    /// Check a `/`-separated relative path against the pattern.
    pub fn is_match(&self, relative: &str) -> bool {
        let components: Vec<&str> = relative
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        self.alternatives
            .iter()
            .any(|segments| match_segments(segments, &components))
    }

    /// Resolve the pattern to regular files under `base`.
    ///
    /// A missing `base` yields an empty list. Results are sorted and
    /// de-duplicated.
    pub fn resolve(&self, base: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for segments in &self.alternatives {
            collect_matches(base, segments, &mut files);
        }
        files.sort();
        files.dedup();
        files
    }
}

/// Compile `pattern` and resolve it under `base` in one step.
pub fn resolve_glob(base: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    Ok(Glob::new(pattern)?.resolve(base))
}

// ============================================================================
// Matching
// ============================================================================

fn match_segments(segments: &[Segment], components: &[&str]) -> bool {
    match segments.split_first() {
        None => components.is_empty(),
        Some((Segment::AnyDepth, rest)) => {
            for skip in 0..=components.len() {
                if match_segments(rest, &components[skip..]) {
                    return true;
                }
                // `**` never descends through hidden directories
                if skip == components.len() || !Segment::AnyDepth.matches(components[skip]) {
                    break;
                }
            }
            false
        }
        Some((segment, rest)) => components
            .split_first()
            .is_some_and(|(first, tail)| segment.matches(first) && match_segments(rest, tail)),
    }
}

fn collect_matches(base: &Path, segments: &[Segment], out: &mut Vec<PathBuf>) {
    // Leading literal segments become the walk root
    let mut root = base.to_path_buf();
    let mut literal_len = 0;
    for segment in segments {
        let Segment::Literal(name) = segment else {
            break;
        };
        root.push(name);
        literal_len += 1;
    }

    let rest = &segments[literal_len..];
    if rest.is_empty() {
        if root.is_file() {
            out.push(root);
        }
        return;
    }
    if !root.is_dir() {
        return;
    }

    let max_depth = if rest.iter().any(|s| matches!(s, Segment::AnyDepth)) {
        usize::MAX
    } else {
        rest.len()
    };

    let walker = WalkDir::new(&root)
        .parallelism(Parallelism::Serial)
        .skip_hidden(false)
        .sort(true)
        .min_depth(1)
        .max_depth(max_depth);

    for entry in walker.into_iter().filter_map(|e| e.ok()) {
        if !is_regular_file(&entry) {
            continue;
        }
        let path = entry.path();
        let Ok(relative) = path.strip_prefix(&root) else {
            continue;
        };
        let components: Option<Vec<&str>> = relative
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect();
        // Non UTF-8 names cannot be matched against a UTF-8 pattern
        let Some(components) = components else {
            continue;
        };
        if match_segments(rest, &components) {
            out.push(path);
        }
    }
}

fn is_regular_file(entry: &DirEntry<((), ())>) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

// ============================================================================
// Translation
// ============================================================================

/// Expand `{a,b}` groups into separate patterns.
///
/// Groups without a top-level comma are kept literally.
fn expand_braces(pattern: &str) -> Vec<String> {
    let Some((open, close, parts)) = find_brace_group(pattern) else {
        return vec![pattern.to_string()];
    };
    let (head, tail) = (&pattern[..open], &pattern[close + 1..]);
    parts
        .iter()
        .flat_map(|part| expand_braces(&format!("{head}{part}{tail}")))
        .collect()
}

/// Find the first brace group with alternatives: `(open, close, parts)`.
fn find_brace_group(pattern: &str) -> Option<(usize, usize, Vec<&str>)> {
    let bytes = pattern.as_bytes();
    for (open, _) in pattern.match_indices('{') {
        let mut depth = 0usize;
        let mut commas = Vec::new();
        for (i, &b) in bytes.iter().enumerate().skip(open) {
            match b {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth > 0 {
                        continue;
                    }
                    if commas.is_empty() {
                        break;
                    }
                    let mut parts = Vec::with_capacity(commas.len() + 1);
                    let mut start = open + 1;
                    for &comma in &commas {
                        parts.push(&pattern[start..comma]);
                        start = comma + 1;
                    }
                    parts.push(&pattern[start..i]);
                    return Some((open, i, parts));
                }
                b',' if depth == 1 => commas.push(i),
                _ => {}
            }
        }
    }
    None
}

/// Translate one pattern segment into a regex body (without anchors).
///
/// With `classes` off, `[` is taken literally.
fn segment_regex(segment: &str, classes: bool) -> String {
    let chars: Vec<char> = segment.chars().collect();
    let mut out = String::with_capacity(segment.len() * 2);
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => {
                out.push_str("[^/]*");
                while i + 1 < chars.len() && chars[i + 1] == '*' {
                    i += 1;
                }
            }
            '?' => out.push_str("[^/]"),
            '[' if !classes => out.push_str(r"\["),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.push_str(&class_regex(&chars[i + 1..end]));
                    i = end;
                }
                None => out.push_str(r"\["),
            },
            c => out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
        i += 1;
    }
    out
}

/// Index of the `]` closing the class opened at `open`, if any.
fn class_end(chars: &[char], open: usize) -> Option<usize> {
    let mut j = open + 1;
    if matches!(chars.get(j), Some('!' | '^')) {
        j += 1;
    }
    // A leading `]` is a member, not the terminator
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    (j..chars.len()).find(|&k| chars[k] == ']')
}

fn class_regex(body: &[char]) -> String {
    let (negate, body) = match body.first() {
        Some('!' | '^') => (true, &body[1..]),
        _ => (false, body),
    };
    let mut out = String::from("[");
    if negate {
        out.push('^');
    }
    for &c in body {
        if matches!(c, '\\' | '[' | ']' | '^' | '&' | '~') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push(']');
    out
}
