//! Path and URI normalization utilities for canonical key derivation.
//!
//! Every function here is purely lexical. Keys must be derivable for files
//! that no longer exist (deletions) or that live outside the current machine's
//! conventions, so nothing touches the file system and separators are always
//! normalized to `/`.

use super::constants::{DECLARATION_INFIX, SOURCE_EXTENSIONS};

/// Normalize a file URI coming from an editor or watcher into a plain path.
///
/// Percent-escapes are decoded first, then the `file://` scheme is removed
/// (`file:///` on Windows, so that `file:///C:/x` becomes `C:/x`).
///
/// # Examples
///
/// ```
/// use declindex::base::normalize_path_uri;
///
/// assert_eq!(normalize_path_uri("file:///root/my%20file.ts"), "/root/my file.ts");
/// assert_eq!(normalize_path_uri("/already/a/path.ts"), "/already/a/path.ts");
/// ```
pub fn normalize_path_uri(uri: &str) -> String {
    let decoded = percent_decode(uri);
    let scheme = if cfg!(windows) { "file:///" } else { "file://" };
    match decoded.strip_prefix(scheme) {
        Some(rest) => rest.to_string(),
        None => decoded,
    }
}

/// Decode `%XX` escapes. Malformed escapes are kept verbatim and invalid UTF-8
/// is replaced, so decoding never fails.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Replace Windows separators with `/`.
pub fn to_posix(path: &str) -> String {
    path.replace('\\', "/")
}

/// Strip a trailing source extension (`.ts`, `.tsx`, `.js`, `.jsx`, optionally
/// preceded by `.d`). Paths without one are returned unchanged.
pub fn strip_source_extension(path: &str) -> &str {
    for extension in SOURCE_EXTENSIONS {
        if let Some(stem) = path.strip_suffix(extension) {
            return stem.strip_suffix(DECLARATION_INFIX).unwrap_or(stem);
        }
    }
    path
}

/// Separator-normalized, extension-stripped file name used inside keys.
///
/// ```
/// use declindex::base::normalize_filename;
///
/// assert_eq!(normalize_filename("./foobar.d.ts"), "./foobar");
/// assert_eq!(normalize_filename("src\\app.tsx"), "src/app");
/// ```
pub fn normalize_filename(path: &str) -> String {
    strip_source_extension(&to_posix(path)).to_string()
}

/// Split a normalized path into its non-empty segments.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Whether a `/`-separated path is absolute (`/x` or a drive prefix `C:/x`).
pub fn is_absolute(path: &str) -> bool {
    path.starts_with('/') || drive_prefix(path).is_some()
}

fn drive_prefix(path: &str) -> Option<&str> {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        Some(&path[..2])
    } else {
        None
    }
}

/// Lexically resolve `.` and `..` segments and collapse repeated separators.
///
/// `..` never climbs above the root of an absolute path; in relative paths
/// leading `..` segments are preserved.
pub fn normalize_segments(path: &str) -> String {
    let path = to_posix(path);
    let (prefix, rest) = match drive_prefix(&path) {
        Some(drive) => (format!("{drive}/"), &path[drive.len()..]),
        None if path.starts_with('/') => ("/".to_string(), &path[..]),
        None => (String::new(), &path[..]),
    };
    let absolute = !prefix.is_empty();

    let mut stack: Vec<&str> = Vec::new();
    for segment in segments(rest) {
        match segment {
            "." => {}
            ".." => {
                if matches!(stack.last(), Some(last) if *last != "..") {
                    stack.pop();
                } else if !absolute {
                    stack.push("..");
                }
            }
            other => stack.push(other),
        }
    }

    let joined = stack.join("/");
    if absolute {
        format!("{prefix}{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Join `relative` onto `base` and normalize the result. An absolute
/// `relative` replaces the base entirely.
pub fn join_path(base: &str, relative: &str) -> String {
    let relative = to_posix(relative);
    if is_absolute(&relative) {
        return normalize_segments(&relative);
    }
    normalize_segments(&format!("{}/{}", to_posix(base), relative))
}

/// Parent directory of a normalized path (`/` for top-level absolute paths,
/// `.` for bare file names).
pub fn parent_dir(path: &str) -> String {
    let normalized = normalize_segments(path);
    match normalized.rfind('/') {
        Some(0) => "/".to_string(),
        Some(idx) if drive_prefix(&normalized).is_some() && idx == 2 => normalized[..3].to_string(),
        Some(idx) => normalized[..idx].to_string(),
        None => ".".to_string(),
    }
}

/// Compute the path of `path` relative to `root`, inserting `..` segments when
/// `path` lies outside `root`. Both inputs are normalized first.
///
/// ```
/// use declindex::base::relative_path;
///
/// assert_eq!(relative_path("/ws", "/ws/src/a.ts"), "src/a.ts");
/// assert_eq!(relative_path("/ws/app", "/ws/lib/b.ts"), "../lib/b.ts");
/// ```
pub fn relative_path(root: &str, path: &str) -> String {
    let root = normalize_segments(root);
    let path = normalize_segments(path);
    let root_segments: Vec<&str> = segments(&root).collect();
    let path_segments: Vec<&str> = segments(&path).collect();

    let common = root_segments
        .iter()
        .zip(&path_segments)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = Vec::new();
    parts.extend(std::iter::repeat_n("..", root_segments.len() - common));
    parts.extend(&path_segments[common..]);
    parts.join("/")
}
