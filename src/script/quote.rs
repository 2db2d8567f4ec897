/// Quote `word` for a POSIX shell
///
/// Words made only of characters the shell treats literally are returned unchanged; anything
/// else is wrapped in single quotes, with embedded single quotes spelled `'"'"'`.
pub fn shell_quote(word: &str) -> String {
    let is_plain = |c: char| c.is_ascii_alphanumeric() || "@%+=:,./-_".contains(c);
    if !word.is_empty() && word.chars().all(is_plain) {
        return word.to_string();
    }
    format!("'{}'", word.replace('\'', r#"'"'"'"#))
}
