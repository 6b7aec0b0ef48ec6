//! Text diffing utilities.
//!
//! This provides a convenient layer on top of the O(NP) engine for diffing
//! text.  Text is split into tokens (characters, words, lines or graphemes)
//! and the tokens are diffed as sequences.  The main type you want to work
//! with is [`TextDiff`].
//!
//! ```rust
//! use npdiff::text::TextDiff;
//!
//! let diff = TextDiff::from_chars("ABCABBA", "CBABAC");
//! assert_eq!(diff.edit_distance(), 5);
//! print!("{}", diff.script());
//! ```
//!
//! Text diffing is available by default but can be disabled by turning off
//! the default features.  The feature to enable to get it back is `text`.
#![cfg(feature = "text")]
use std::fmt;

use crate::algorithms::{DiffOp, DiffTag};
use crate::common::{capture_diff_slices, get_diff_ratio};

/// The tag of a change.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Ord, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ChangeTag {
    /// The change indicates equality (not a change)
    Equal,
    /// The change indicates deleted text.
    Delete,
    /// The change indicates inserted text.
    Insert,
}

impl fmt::Display for ChangeTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match *self {
                ChangeTag::Equal => ' ',
                ChangeTag::Delete => '-',
                ChangeTag::Insert => '+',
            }
        )
    }
}

/// A single token level change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Change<'a> {
    tag: ChangeTag,
    old_index: Option<usize>,
    new_index: Option<usize>,
    #[cfg_attr(feature = "serde", serde(borrow))]
    value: &'a str,
}

impl<'a> Change<'a> {
    pub fn tag(&self) -> ChangeTag {
        self.tag
    }

    /// The index of the token in the old text, unless it was inserted.
    pub fn old_index(&self) -> Option<usize> {
        self.old_index
    }

    /// The index of the token in the new text, unless it was deleted.
    pub fn new_index(&self) -> Option<usize> {
        self.new_index
    }

    pub fn value(&self) -> &'a str {
        self.value
    }
}

impl<'a> fmt::Display for Change<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.tag, self.value)
    }
}

/// A builder type config for [`TextDiff`].
#[derive(Clone, Debug, Default)]
pub struct TextDiffConfig {
    newline_terminated: Option<bool>,
}

impl TextDiffConfig {
    /// Changes the newline termination flag.
    ///
    /// The default is `true` for line diffs and `false` otherwise.  When
    /// the flag is set, tokens are expected to carry their own newline and
    /// [`TextDiff::script`] renders one line per token instead of one line
    /// per run.
    pub fn newline_terminated(&mut self, yes: bool) -> &mut Self {
        self.newline_terminated = Some(yes);
        self
    }

    /// Creates a diff of characters.
    pub fn diff_chars<'a>(&self, old: &'a str, new: &'a str) -> TextDiff<'a> {
        self.diff(split_chars(old), split_chars(new), false)
    }

    /// Creates a diff of words and the whitespace between them.
    pub fn diff_words<'a>(&self, old: &'a str, new: &'a str) -> TextDiff<'a> {
        self.diff(split_words(old), split_words(new), false)
    }

    /// Creates a diff of lines, each keeping its trailing newline.
    pub fn diff_lines<'a>(&self, old: &'a str, new: &'a str) -> TextDiff<'a> {
        self.diff(
            old.split_inclusive('\n').collect(),
            new.split_inclusive('\n').collect(),
            true,
        )
    }

    /// Creates a diff of unicode grapheme clusters.
    #[cfg(feature = "unicode")]
    pub fn diff_graphemes<'a>(&self, old: &'a str, new: &'a str) -> TextDiff<'a> {
        use unicode_segmentation::UnicodeSegmentation;
        self.diff(
            old.graphemes(true).collect(),
            new.graphemes(true).collect(),
            false,
        )
    }

    /// Creates a diff of already tokenized text.
    pub fn diff_slices<'a>(&self, old: &[&'a str], new: &[&'a str]) -> TextDiff<'a> {
        self.diff(old.to_vec(), new.to_vec(), false)
    }

    fn diff<'a>(&self, old: Vec<&'a str>, new: Vec<&'a str>, lines: bool) -> TextDiff<'a> {
        let ops = capture_diff_slices(&old, &new);
        TextDiff {
            old,
            new,
            ops,
            newline_terminated: self.newline_terminated.unwrap_or(lines),
        }
    }
}

fn split_chars(s: &str) -> Vec<&str> {
    s.char_indices()
        .map(|(idx, c)| &s[idx..idx + c.len_utf8()])
        .collect()
}

fn split_words(s: &str) -> Vec<&str> {
    let mut rv = Vec::new();
    let mut start = 0;
    let mut last_ws = None;
    for (idx, c) in s.char_indices() {
        let is_ws = c.is_whitespace();
        if last_ws.map_or(false, |last| last != is_ws) {
            rv.push(&s[start..idx]);
            start = idx;
        }
        last_ws = Some(is_ws);
    }
    if start < s.len() {
        rv.push(&s[start..]);
    }
    rv
}

/// Captures a diff between two texts.
pub struct TextDiff<'a> {
    old: Vec<&'a str>,
    new: Vec<&'a str>,
    ops: Vec<DiffOp>,
    newline_terminated: bool,
}

impl<'a> TextDiff<'a> {
    /// Configures a text differ before diffing.
    pub fn configure() -> TextDiffConfig {
        TextDiffConfig::default()
    }

    /// Creates a diff of characters.
    ///
    /// Equivalent to `TextDiff::configure().diff_chars(old, new)`.
    pub fn from_chars(old: &'a str, new: &'a str) -> TextDiff<'a> {
        TextDiff::configure().diff_chars(old, new)
    }

    /// Creates a diff of words.
    pub fn from_words(old: &'a str, new: &'a str) -> TextDiff<'a> {
        TextDiff::configure().diff_words(old, new)
    }

    /// Creates a diff of lines.
    pub fn from_lines(old: &'a str, new: &'a str) -> TextDiff<'a> {
        TextDiff::configure().diff_lines(old, new)
    }

    /// Creates a diff of graphemes.
    #[cfg(feature = "unicode")]
    pub fn from_graphemes(old: &'a str, new: &'a str) -> TextDiff<'a> {
        TextDiff::configure().diff_graphemes(old, new)
    }

    /// The tokens of the old text.
    pub fn old_slices(&self) -> &[&'a str] {
        &self.old
    }

    /// The tokens of the new text.
    pub fn new_slices(&self) -> &[&'a str] {
        &self.new
    }

    /// The captured operations, with deletions and insertions combined
    /// into replacements.
    pub fn ops(&self) -> &[DiffOp] {
        &self.ops
    }

    pub fn newline_terminated(&self) -> bool {
        self.newline_terminated
    }

    /// Number of inserted plus deleted tokens.
    pub fn edit_distance(&self) -> usize {
        self.ops
            .iter()
            .map(|op| match op.tag() {
                DiffTag::Equal => 0,
                _ => op.old_range().len() + op.new_range().len(),
            })
            .sum()
    }

    /// Return a measure of similarity in the range `0..=1`.
    pub fn ratio(&self) -> f32 {
        get_diff_ratio(&self.ops, self.old.len(), self.new.len())
    }

    /// Iterates over the token level changes of a single operation.
    ///
    /// Replacements yield their deletions before their insertions.
    pub fn iter_changes(&self, op: &DiffOp) -> impl Iterator<Item = Change<'a>> + '_ {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        let (equal, deleted, inserted) = match tag {
            DiffTag::Equal => (old_range.zip(new_range), 0..0, 0..0),
            DiffTag::Delete => ((0..0).zip(0..0), old_range, 0..0),
            DiffTag::Insert => ((0..0).zip(0..0), 0..0, new_range),
            DiffTag::Replace => ((0..0).zip(0..0), old_range, new_range),
        };
        equal
            .map(move |(old_index, new_index)| Change {
                tag: ChangeTag::Equal,
                old_index: Some(old_index),
                new_index: Some(new_index),
                value: self.old[old_index],
            })
            .chain(deleted.map(move |old_index| Change {
                tag: ChangeTag::Delete,
                old_index: Some(old_index),
                new_index: None,
                value: self.old[old_index],
            }))
            .chain(inserted.map(move |new_index| Change {
                tag: ChangeTag::Insert,
                old_index: None,
                new_index: Some(new_index),
                value: self.new[new_index],
            }))
    }

    /// Iterates over all token level changes.
    pub fn iter_all_changes(&self) -> impl Iterator<Item = Change<'a>> + '_ {
        self.ops.iter().flat_map(move |op| self.iter_changes(op))
    }

    /// Returns a formatter rendering the edit script.
    pub fn script(&self) -> Script<'_, 'a> {
        Script { diff: self }
    }
}

/// Renders a [`TextDiff`] as a `-`/`+`/` ` prefixed edit script.
///
/// Without newline termination every run of deleted, inserted or equal
/// tokens becomes one line.  With newline termination (the default for
/// line diffs) every token becomes one line.
pub struct Script<'diff, 'a> {
    diff: &'diff TextDiff<'a>,
}

impl<'diff, 'a> Script<'diff, 'a> {
    fn write_run(&self, f: &mut fmt::Formatter, tag: ChangeTag, tokens: &[&str]) -> fmt::Result {
        if tokens.is_empty() {
            return Ok(());
        }
        if self.diff.newline_terminated {
            for token in tokens {
                write!(f, "{}{}", tag, token)?;
                if !token.ends_with('\n') {
                    writeln!(f)?;
                }
            }
        } else {
            write!(f, "{}", tag)?;
            for token in tokens {
                write!(f, "{}", token)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<'diff, 'a> fmt::Display for Script<'diff, 'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for op in self.diff.ops() {
            let (tag, old_range, new_range) = op.as_tag_tuple();
            let old = &self.diff.old[old_range];
            let new = &self.diff.new[new_range];
            match tag {
                DiffTag::Equal => self.write_run(f, ChangeTag::Equal, old)?,
                DiffTag::Delete | DiffTag::Insert | DiffTag::Replace => {
                    self.write_run(f, ChangeTag::Delete, old)?;
                    self.write_run(f, ChangeTag::Insert, new)?;
                }
            }
        }
        Ok(())
    }
}

#[test]
fn test_multi_line_runs() {
    let diff = TextDiff::from_lines("a\nb\nc\n", "x\ny\nc\n");
    assert_eq!(diff.script().to_string(), "-a\n-b\n+x\n+y\n c\n");
    assert_eq!(diff.edit_distance(), 4);
}

#[test]
fn test_split_words() {
    assert_eq!(
        split_words("foo  bar\tbaz "),
        vec!["foo", "  ", "bar", "\t", "baz", " "]
    );
    assert_eq!(split_words(""), Vec::<&str>::new());
    assert_eq!(split_chars("äb"), vec!["ä", "b"]);
}

#[test]
fn test_char_script() {
    let diff = TextDiff::from_chars("ABCABBA", "CBABAC");
    assert_eq!(diff.edit_distance(), 5);
    assert_eq!(
        diff.script().to_string(),
        "-A\n+C\n B\n-C\n AB\n-B\n A\n+C\n"
    );
}

#[test]
fn test_line_script() {
    let diff = TextDiff::from_lines("a\nb\nc\n", "a\nx\nc\nd");
    assert!(diff.newline_terminated());
    assert_eq!(diff.script().to_string(), " a\n-b\n+x\n c\n+d\n");
    assert_eq!(diff.edit_distance(), 3);
}

#[test]
fn test_word_changes() {
    let diff = TextDiff::from_words("hello world", "hello there world");
    let changes = diff
        .iter_all_changes()
        .map(|change| change.to_string())
        .collect::<Vec<_>>();
    assert_eq!(
        changes,
        vec![" hello", "  ", "+there", "+ ", " world"]
    );
    assert_eq!(diff.edit_distance(), 2);
    assert_eq!(diff.ratio(), 0.75);
}

#[test]
fn test_empty_texts() {
    let diff = TextDiff::from_chars("", "");
    assert!(diff.ops().is_empty());
    assert_eq!(diff.ratio(), 1.0);
    assert_eq!(diff.script().to_string(), "");

    let diff = TextDiff::from_chars("", "abc");
    assert_eq!(diff.script().to_string(), "+abc\n");
    let change = diff.iter_all_changes().next().unwrap();
    assert_eq!(change.tag(), ChangeTag::Insert);
    assert_eq!(change.old_index(), None);
    assert_eq!(change.new_index(), Some(0));
    assert_eq!(change.value(), "a");
}

#[test]
fn test_config_newline_terminated() {
    let diff = TextDiff::configure()
        .newline_terminated(true)
        .diff_chars("ab", "b");
    assert_eq!(diff.script().to_string(), "-a\n b\n");
    let diff = TextDiff::configure()
        .newline_terminated(false)
        .diff_lines("a\nb\n", "b\n");
    assert_eq!(diff.script().to_string(), "-a\n\n b\n\n");
}

#[test]
#[cfg(feature = "unicode")]
fn test_graphemes() {
    let diff = TextDiff::from_graphemes("e\u{301}x", "ex");
    assert_eq!(diff.old_slices(), &["e\u{301}", "x"]);
    assert_eq!(diff.edit_distance(), 2);
}

#[test]
#[cfg(feature = "serde")]
fn test_serde_change() {
    let diff = TextDiff::from_chars("ab", "b");
    let change = diff.iter_all_changes().next().unwrap();
    let json = serde_json::to_string(&change).unwrap();
    assert_eq!(
        json,
        r#"{"tag":"delete","old_index":0,"new_index":null,"value":"a"}"#
    );
    assert_eq!(serde_json::from_str::<Change>(&json).unwrap(), change);
}
