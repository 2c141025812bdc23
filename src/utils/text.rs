pub fn truncate_utf8_prefix(value: &str, max_bytes: usize) -> String {
    if max_bytes == 0 {
        return String::new();
    }
    if value.len() <= max_bytes {
        return value.to_string();
    }
    let mut end = max_bytes;
    while end > 0 && !value.is_char_boundary(end) {
        end -= 1;
    }
    value[..end].to_string()
}

/// Shortens a response body for log output, marking how much was dropped.
pub fn preview(value: &str, max_bytes: usize) -> String {
    let head = truncate_utf8_prefix(value, max_bytes);
    if head.len() == value.len() {
        return head;
    }
    format!("{}... [+{} bytes]", head, value.len() - head.len())
}

pub fn plural<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 {
        singular
    } else {
        plural
    }
}
