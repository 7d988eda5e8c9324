//! Module for splitting captions that are too long for a single line.


/// Split the text into two similarly sized lines, breaking at a space.
///
/// The space closest to the middle of the text is chosen (leftmost on ties)
/// and dropped from the result. Text shorter than three characters,
/// or without a space between its first and last character,
/// is returned as a single line.
pub fn split(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let len = chars.len();
    if len < 3 || !chars[1..len - 1].iter().any(|&(_, c)| c == ' ') {
        return vec![text];
    }

    let middle = len / 2;
    let split_at = chars.iter().enumerate()
        .filter(|&(_, &(_, c))| c == ' ')
        .min_by_key(|&(i, _)| (i as isize - middle as isize).abs())
        .map(|(_, &(byte_index, _))| byte_index);

    match split_at {
        Some(byte_index) => vec![&text[..byte_index], &text[byte_index + 1..]],
        None => vec![text],
    }
}
