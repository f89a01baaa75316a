//! Path normalisation.

/// Resolve `.` and `..` segments in a path and collapse runs of `/`.
///
/// Segments are processed left to right.  A `.` segment is removed.  A
/// `..` segment removes itself together with the segment in front of it,
/// except directly below the root of an absolute path, where it is simply
/// dropped, so a path never climbs above `/`.  A `..` leading a relative
/// path has nothing to remove and is kept.
///
/// # Examples
///
/// ```rust
/// use uriclean::clean_path;
///
/// assert_eq!("/foo/boo.php", clean_path("/foo/bar/../boo.php"));
/// assert_eq!("/boo.php", clean_path("/foo/bar/../../boo.php"));
/// assert_eq!("/foo/boo.php", clean_path("/foo/bar/.././/boo.php"));
/// ```
#[must_use]
pub fn clean_path(path: &str) -> String {
    let segments = path.split('/').collect::<Vec<_>>();
    let last = segments.len() - 1;

    // An empty segment can only survive at either end once slashes are
    // collapsed.
    let mut segments = segments
        .into_iter()
        .enumerate()
        .filter(|(i, segment)| !segment.is_empty() || *i == 0 || *i == last)
        .map(|(_, segment)| segment)
        .collect::<Vec<_>>();

    let mut i = 0;
    while i < segments.len() {
        match segments[i] {
            "." => {
                segments.remove(i);
            }
            ".." if i == 1 && segments[0].is_empty() => {
                segments.remove(i);
            }
            ".." if i >= 1 => {
                segments.drain(i - 1..=i);
                i -= 1;
            }
            _ => i += 1,
        }
    }
    segments.join("/")
}
