//! Line-level diff engine for note change history.
//!
//! Produces unified-style patches (hunk headers plus `-`/`+`/context
//! lines) from two content strings, and applies them back. The pair
//! [`compute_diff`] / [`apply_patch`] is an exact round trip:
//! `apply_patch(a, &compute_diff(a, b).unwrap()) == b` for any `a != b`.
//!
//! Texts are split on `'\n'` *including* a trailing empty element when the
//! text ends with a newline, so trailing-newline state survives the round
//! trip. Everything here is a pure function of its inputs.

use serde::Serialize;

use crate::error::CoreError;

/// Context lines kept on each side of a changed region.
const CONTEXT_LINES: usize = 3;

/// Maximum characters in a [`diff_preview`] excerpt.
const PREVIEW_MAX_CHARS: usize = 120;

/// Upper bound on the LCS table size (`old lines * new lines`). Inputs
/// beyond it are diffed as a whole-text replacement instead, keeping the
/// memory cost bounded for newline-heavy notes at the content cap.
const LCS_CELL_LIMIT: usize = 4_000_000;

/// Added/removed line counts for a patch, as shown in the history sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub additions: usize,
    pub deletions: usize,
}

/// One step of the line alignment between old and new text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op<'a> {
    Equal(&'a str),
    Delete(&'a str),
    Insert(&'a str),
}

/// Compute a unified-style patch transforming `old` into `new`.
///
/// Returns `None` when the texts are identical -- callers must not record
/// a change in that case.
pub fn compute_diff(old: &str, new: &str) -> Option<String> {
    if old == new {
        return None;
    }

    let old_lines: Vec<&str> = old.split('\n').collect();
    let new_lines: Vec<&str> = new.split('\n').collect();
    let ops = diff_ops(&old_lines, &new_lines);

    // Group changed op indices into hunks, merging groups whose context
    // windows would touch or overlap.
    let mut groups: Vec<(usize, usize)> = Vec::new();
    for (i, op) in ops.iter().enumerate() {
        if !matches!(op, Op::Equal(_)) {
            match groups.last_mut() {
                Some((_, end)) if i - *end <= 2 * CONTEXT_LINES => *end = i,
                _ => groups.push((i, i)),
            }
        }
    }

    // Old/new line counts consumed before each op, for hunk headers.
    let mut old_before = Vec::with_capacity(ops.len() + 1);
    let mut new_before = Vec::with_capacity(ops.len() + 1);
    let (mut o, mut n) = (0usize, 0usize);
    for op in &ops {
        old_before.push(o);
        new_before.push(n);
        match op {
            Op::Equal(_) => {
                o += 1;
                n += 1;
            }
            Op::Delete(_) => o += 1,
            Op::Insert(_) => n += 1,
        }
    }

    let mut patch = String::new();
    for &(start, end) in &groups {
        let start = start.saturating_sub(CONTEXT_LINES);
        let end = (end + CONTEXT_LINES).min(ops.len() - 1);

        let (mut old_count, mut new_count) = (0usize, 0usize);
        let mut body = String::new();
        for op in &ops[start..=end] {
            let (marker, line) = match op {
                Op::Equal(l) => {
                    old_count += 1;
                    new_count += 1;
                    (' ', l)
                }
                Op::Delete(l) => {
                    old_count += 1;
                    ('-', l)
                }
                Op::Insert(l) => {
                    new_count += 1;
                    ('+', l)
                }
            };
            body.push(marker);
            body.push_str(line);
            body.push('\n');
        }

        patch.push_str(&format!(
            "@@ -{},{} +{},{} @@\n",
            old_before[start] + 1,
            old_count,
            new_before[start] + 1,
            new_count
        ));
        patch.push_str(&body);
    }

    Some(patch)
}

/// Apply a patch produced by [`compute_diff`] to `old`, returning the new
/// text. Context mismatches and malformed patches yield a
/// [`CoreError::Validation`] and leave no partial result.
pub fn apply_patch(old: &str, patch: &str) -> Result<String, CoreError> {
    let old_lines: Vec<&str> = old.split('\n').collect();
    let mut out: Vec<&str> = Vec::with_capacity(old_lines.len());
    let mut pos = 0usize;

    let mut lines: Vec<&str> = patch.split('\n').collect();
    // The patch itself ends with a newline; drop the empty terminator.
    if lines.last() == Some(&"") {
        lines.pop();
    }
    if lines.is_empty() {
        return Err(CoreError::Validation("empty patch".into()));
    }

    let mut i = 0;
    while i < lines.len() {
        let (old_start, old_count, new_count) = parse_hunk_header(lines[i])?;
        let hunk_start = old_start.saturating_sub(1);
        if hunk_start < pos || hunk_start > old_lines.len() {
            return Err(CoreError::Validation(
                "patch hunks out of order or beyond end of input".into(),
            ));
        }
        out.extend_from_slice(&old_lines[pos..hunk_start]);
        pos = hunk_start;
        i += 1;

        let (mut consumed, mut produced) = (0usize, 0usize);
        while i < lines.len() && !lines[i].starts_with("@@") {
            let line = lines[i];
            if let Some(text) = line.strip_prefix('+') {
                out.push(text);
                produced += 1;
            } else {
                let (keep, text) = if let Some(t) = line.strip_prefix('-') {
                    (false, t)
                } else if let Some(t) = line.strip_prefix(' ') {
                    (true, t)
                } else {
                    return Err(CoreError::Validation(format!(
                        "invalid patch line: {line:?}"
                    )));
                };
                if pos >= old_lines.len() || old_lines[pos] != text {
                    return Err(CoreError::Validation(
                        "patch does not apply: context mismatch".into(),
                    ));
                }
                if keep {
                    out.push(text);
                    produced += 1;
                }
                pos += 1;
                consumed += 1;
            }
            i += 1;
        }

        if consumed != old_count || produced != new_count {
            return Err(CoreError::Validation(
                "hunk body does not match header line counts".into(),
            ));
        }
    }

    out.extend_from_slice(&old_lines[pos..]);
    Ok(out.join("\n"))
}

/// Count added and removed lines in a patch.
///
/// Counting is line-granular: only body lines prefixed with `+` or `-`
/// count, never hunk headers. [`compute_diff`] emits no file headers, so
/// every `+`/`-` line is a genuine change -- including changed lines whose
/// own text begins with `--` or `++`.
pub fn diff_summary(patch: &str) -> DiffSummary {
    let mut summary = DiffSummary {
        additions: 0,
        deletions: 0,
    };
    for line in patch.lines() {
        if line.starts_with("@@") {
            continue;
        }
        if line.starts_with('+') {
            summary.additions += 1;
        } else if line.starts_with('-') {
            summary.deletions += 1;
        }
    }
    summary
}

/// Extract a short display excerpt from a patch: the first changed line
/// with visible content, trimmed and truncated. Cosmetic only -- never
/// used for reconstruction.
pub fn diff_preview(patch: &str) -> String {
    for line in patch.lines() {
        if line.starts_with("@@") {
            continue;
        }
        if let Some(text) = line.strip_prefix('+').or_else(|| line.strip_prefix('-')) {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return truncate_chars(trimmed, PREVIEW_MAX_CHARS);
            }
        }
    }
    String::new()
}

/// Align two line slices using LCS, producing the op sequence.
///
/// The table is quadratic in line counts; inputs past [`LCS_CELL_LIMIT`]
/// fall back to deleting every old line and inserting every new one, which
/// still satisfies the round-trip law.
fn diff_ops<'a>(old: &[&'a str], new: &[&'a str]) -> Vec<Op<'a>> {
    let m = old.len();
    let n = new.len();

    if m.saturating_mul(n) > LCS_CELL_LIMIT {
        let mut ops = Vec::with_capacity(m + n);
        ops.extend(old.iter().copied().map(Op::Delete));
        ops.extend(new.iter().copied().map(Op::Insert));
        return ops;
    }

    let mut lcs = vec![vec![0u32; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            if old[i - 1] == new[j - 1] {
                lcs[i][j] = lcs[i - 1][j - 1] + 1;
            } else {
                lcs[i][j] = lcs[i - 1][j].max(lcs[i][j - 1]);
            }
        }
    }

    let mut ops = Vec::with_capacity(m.max(n));
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && old[i - 1] == new[j - 1] {
            ops.push(Op::Equal(old[i - 1]));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || lcs[i][j - 1] >= lcs[i - 1][j]) {
            ops.push(Op::Insert(new[j - 1]));
            j -= 1;
        } else {
            ops.push(Op::Delete(old[i - 1]));
            i -= 1;
        }
    }
    ops.reverse();
    ops
}

/// Parse `@@ -a,b +c,d @@` into `(a, b, d)`. Counts default to 1 when
/// omitted, matching the unified convention.
fn parse_hunk_header(line: &str) -> Result<(usize, usize, usize), CoreError> {
    let malformed = || CoreError::Validation(format!("malformed hunk header: {line:?}"));

    let inner = line
        .strip_prefix("@@ -")
        .and_then(|rest| rest.strip_suffix(" @@"))
        .ok_or_else(malformed)?;
    let (old_part, new_part) = inner.split_once(" +").ok_or_else(malformed)?;

    let parse_range = |part: &str| -> Result<(usize, usize), CoreError> {
        match part.split_once(',') {
            Some((start, count)) => Ok((
                start.parse().map_err(|_| malformed())?,
                count.parse().map_err(|_| malformed())?,
            )),
            None => Ok((part.parse().map_err(|_| malformed())?, 1)),
        }
    };

    let (old_start, old_count) = parse_range(old_part)?;
    let (_, new_count) = parse_range(new_part)?;
    Ok((old_start, old_count, new_count))
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max).collect();
    out.push_str("...");
    out
}
