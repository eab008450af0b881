/// Strip `prefix` from `s`, ignoring ASCII case.
pub fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_case_insensitively() {
        assert_eq!(strip_prefix_ci("ICIBA hello", "iciba "), Some("hello"));
        assert_eq!(strip_prefix_ci("ici", "iciba "), None);
        assert_eq!(strip_prefix_ci("wiki hello", "iciba "), None);
    }

    #[test]
    fn non_ascii_input_does_not_panic() {
        assert_eq!(strip_prefix_ci("词典查询", "iciba "), None);
        assert_eq!(strip_prefix_ci("ic词典", "iciba "), None);
    }
}
