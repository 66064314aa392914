//! Path canonicalization filters.
//!
//! All six path filters share one lexical normalizer: separators are
//! unified, duplicate separators collapse, `.` segments drop, and `..`
//! segments pop their parent. Nothing touches the filesystem; the `abs`
//! variants resolve relative input against the working directory snapshot
//! carried in the filter context.

use std::path::Path;

use super::FilterKind;

/// Output separator style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStyle {
    Windows,
    Linux,
}

/// The style a path filter renders, `pathos` resolving to the host's.
pub fn style_for(kind: FilterKind) -> PathStyle {
    match kind {
        FilterKind::PathWin | FilterKind::PathWinAbs => PathStyle::Windows,
        FilterKind::PathLinux | FilterKind::PathLinuxAbs => PathStyle::Linux,
        _ => host_style(),
    }
}

/// Whether a path filter is an `abs` variant.
pub fn is_absolute_variant(kind: FilterKind) -> bool {
    matches!(
        kind,
        FilterKind::PathWinAbs | FilterKind::PathLinuxAbs | FilterKind::PathOsAbs
    )
}

#[cfg(windows)]
fn host_style() -> PathStyle {
    PathStyle::Windows
}

#[cfg(not(windows))]
fn host_style() -> PathStyle {
    PathStyle::Linux
}

/// The anchoring prefix of a path, determined before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Anchor {
    /// `C:\...` or `C:/...`; the letter is kept as written.
    Drive(char),
    /// `\\server\share` style double-separator prefix.
    Unc,
    /// A single leading separator.
    Rooted,
    /// No prefix.
    Relative,
}

/// Normalize a path for `style`, optionally resolving it to an absolute
/// path against `working_dir` first.
pub fn normalize(input: &str, style: PathStyle, absolute: bool, working_dir: &Path) -> String {
    let (anchor, segments) = split(input);

    let (anchor, segments) = if absolute && anchor == Anchor::Relative {
        let (base_anchor, mut base_segments) = split(&working_dir.to_string_lossy());
        base_segments.extend(segments);
        (base_anchor, base_segments)
    } else {
        (anchor, segments)
    };

    let collapsed = collapse(segments, &anchor);
    render(&anchor, &collapsed, style)
}

/// Split a path into its anchor and raw segments, both separators accepted.
fn split(input: &str) -> (Anchor, Vec<String>) {
    let unified = input.replace('\\', "/");
    let mut rest = unified.as_str();

    let anchor = if let Some(drive) = drive_prefix(rest) {
        rest = &rest[2..];
        Anchor::Drive(drive)
    } else if rest.starts_with("//") {
        rest = &rest[2..];
        Anchor::Unc
    } else if rest.starts_with('/') {
        rest = &rest[1..];
        Anchor::Rooted
    } else {
        Anchor::Relative
    };

    let segments = rest
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    (anchor, segments)
}

/// Recognize a `X:` drive-letter prefix.
fn drive_prefix(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let letter = chars.next()?;
    if letter.is_ascii_alphabetic() && chars.next() == Some(':') {
        Some(letter)
    } else {
        None
    }
}

/// Drop `.` segments and resolve `..` lexically.
///
/// A `..` pops the previous segment. At the root of an anchored path it is
/// dropped; in a relative path with nothing left to pop it is kept, so
/// `../x` stays `../x`.
fn collapse(segments: Vec<String>, anchor: &Anchor) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(segments.len());
    for segment in segments {
        match segment.as_str() {
            "." => {}
            ".." => {
                if out.last().is_some_and(|s| s != "..") {
                    out.pop();
                } else if *anchor == Anchor::Relative {
                    out.push(segment);
                }
            }
            _ => out.push(segment),
        }
    }
    out
}

/// Render anchor plus segments in the requested style.
fn render(anchor: &Anchor, segments: &[String], style: PathStyle) -> String {
    let sep = match style {
        PathStyle::Windows => "\\",
        PathStyle::Linux => "/",
    };
    let joined = segments.join(sep);

    match (anchor, style) {
        (Anchor::Drive(letter), PathStyle::Windows) => {
            if joined.is_empty() {
                format!("{letter}:{sep}")
            } else {
                format!("{letter}:{sep}{joined}")
            }
        }
        // Drive letters map to a mount-style prefix on the Linux side.
        (Anchor::Drive(letter), PathStyle::Linux) => {
            let letter = letter.to_ascii_lowercase();
            if joined.is_empty() {
                format!("/{letter}")
            } else {
                format!("/{letter}/{joined}")
            }
        }
        (Anchor::Unc, _) => format!("{sep}{sep}{joined}"),
        (Anchor::Rooted, _) => format!("{sep}{joined}"),
        (Anchor::Relative, _) => joined,
    }
}
