use memchr::memchr_iter;

/// Physical lines this short (or shorter) are stray OCR line-break debris.
pub const MIN_CHARACTER_THRESHOLD: usize = 3;

/// Prefixes that open a new log entry. `Dav` is the usual OCR misread.
const ENTRY_MARKERS: [&str; 2] = ["Day", "Dav"];

fn starts_entry(line: &str) -> bool {
    ENTRY_MARKERS.iter().any(|marker| line.starts_with(marker))
}

/// Split a raw OCR text blob into logical log lines.
///
/// Lines that do not open with a day marker are OCR wraps of the entry
/// before them and get appended to it. A wrap with no entry before it is
/// dropped.
pub fn reconstruct_lines(raw: &str) -> Vec<String> {
    let bytes = raw.as_bytes();

    // Find all line boundaries
    let mut line_ranges: Vec<(usize, usize)> = Vec::new();
    let mut start = 0;
    for end in memchr_iter(b'\n', bytes) {
        line_ranges.push((start, end));
        start = end + 1;
    }
    if start < bytes.len() {
        line_ranges.push((start, bytes.len()));
    }

    let mut entries: Vec<String> = Vec::new();
    for (start, end) in line_ranges {
        let line = &raw[start..end];
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.chars().count() <= MIN_CHARACTER_THRESHOLD {
            if !line.is_empty() {
                tracing::debug!(line, "Dropping OCR debris line");
            }
            continue;
        }

        if starts_entry(line) {
            entries.push(line.to_string());
        } else if let Some(current) = entries.last_mut() {
            current.push_str(line);
        } else {
            tracing::debug!(line, "Dropping continuation with no open entry");
        }
    }

    entries
}
