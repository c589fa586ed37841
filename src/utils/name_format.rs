const ELLIPSIS: &str = "...";
const TAIL_CHARS: usize = 3;
const MIN_HEAD_CHARS: usize = 3;

/// Shortens a file name to at most `max_len` characters for the preview list.
///
/// Long names keep the start of the stem, an ellipsis, the last three stem
/// characters and the full extension: `vacation_photo...dit.jpeg`. When the
/// extension leaves no room for that shape the name is cut at the end instead.
pub fn truncate_display_name(name: &str, max_len: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_len {
        return name.to_string();
    }

    // A leading dot marks a hidden file, not an extension.
    let split = match chars.iter().rposition(|&c| c == '.') {
        Some(0) | None => chars.len(),
        Some(pos) => pos,
    };
    let (stem, extension) = chars.split_at(split);

    let head = max_len
        .checked_sub(ELLIPSIS.len() + TAIL_CHARS + extension.len())
        .filter(|&head| head >= MIN_HEAD_CHARS);

    match head {
        // stem.len() > head + TAIL_CHARS always holds here since the name overflowed
        Some(head) => {
            let mut label: String = stem[..head].iter().collect();
            label.push_str(ELLIPSIS);
            label.extend(&stem[stem.len() - TAIL_CHARS..]);
            label.extend(extension);
            label
        }
        None => plain_truncate(&chars, max_len),
    }
}

fn plain_truncate(chars: &[char], max_len: usize) -> String {
    if max_len <= ELLIPSIS.len() {
        return chars[..max_len].iter().collect();
    }
    let mut label: String = chars[..max_len - ELLIPSIS.len()].iter().collect();
    label.push_str(ELLIPSIS);
    label
}
