/// Label formatting helpers: byte sizes, counts and long names.
///
/// All sizes are `u64` bytes. Floating point is only used at the
/// display-formatting boundary.

/// Format a byte count into a human-readable string with binary units.
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;
    const TB: f64 = GB * 1024.0;

    let b = bytes as f64;
    if b < KB {
        format!("{bytes} B")
    } else if b < MB {
        format!("{:.1} KB", b / KB)
    } else if b < GB {
        format!("{:.1} MB", b / MB)
    } else if b < TB {
        format!("{:.2} GB", b / GB)
    } else {
        format!("{:.2} TB", b / TB)
    }
}

/// Format a count with thousand separators.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Shorten `value` to fit a label by cutting out its middle.
///
/// Keeps `max(4, (max_len - 3) / 2)` characters from each end around
/// `...`. Values already within `max_len` characters are returned as-is.
pub fn truncate_middle(value: &str, max_len: usize) -> String {
    let len = value.chars().count();
    if len <= max_len {
        return value.to_owned();
    }
    let keep = (max_len.saturating_sub(3) / 2).max(4);
    if keep * 2 >= len {
        return value.to_owned();
    }
    let head: String = value.chars().take(keep).collect();
    let tail: String = value.chars().skip(len - keep).collect();
    format!("{head}...{tail}")
}
