//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// This is intentionally simple (no nested/conditional logic).
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// First `max` characters of a string (character boundaries, not bytes).
/// Used for short excerpts shown in recommendations and log lines.
pub fn truncate_chars(s: &str, max: usize) -> String {
  s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fill_template_replaces_every_occurrence() {
    let out = fill_template("{a} and {b}, then {a} again", &[("a", "x"), ("b", "y")]);
    assert_eq!(out, "x and y, then x again");
  }

  #[test]
  fn fill_template_leaves_unknown_keys_alone() {
    let out = fill_template("{a} {missing}", &[("a", "x")]);
    assert_eq!(out, "x {missing}");
  }

  #[test]
  fn truncate_chars_respects_char_boundaries() {
    assert_eq!(truncate_chars("abcdef", 4), "abcd");
    assert_eq!(truncate_chars("ab", 4), "ab");
    // multibyte input must not be split mid-codepoint
    assert_eq!(truncate_chars("héllo wörld", 6), "héllo ");
  }
}
