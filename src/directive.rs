//! Ordered directive output.

use serde::Serialize;

/// Ordered sequence of rendered directive lines, each terminated by `;`.
///
/// Order is part of the contract: the proxy engine applies later directives
/// as overrides for earlier ones, so the same input must always produce the
/// same lines in the same positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirectiveSet(Vec<String>);

impl DirectiveSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub(crate) fn push(&mut self, line: String) {
        self.0.push(line);
    }

    /// Rendered lines in emission order.
    pub fn lines(&self) -> &[String] {
        &self.0
    }

    pub fn into_lines(self) -> Vec<String> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if some line contains `needle` as a substring. Mirrors how the
    /// external renderer's consumers grep the generated server block.
    pub fn contains(&self, needle: &str) -> bool {
        self.0.iter().any(|line| line.contains(needle))
    }
}

impl std::fmt::Display for DirectiveSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, line) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a DirectiveSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_joins_lines_without_trailing_newline() {
        let mut set = DirectiveSet::new();
        set.push("proxy_buffering off;".to_string());
        set.push("proxy_request_buffering on;".to_string());
        assert_eq!(
            set.to_string(),
            "proxy_buffering off;\nproxy_request_buffering on;"
        );
    }

    #[test]
    fn contains_matches_substrings() {
        let mut set = DirectiveSet::new();
        set.push("client_max_body_size 8m;".to_string());
        assert!(set.contains("client_max_body_size 8m;"));
        assert!(set.contains("8m"));
        assert!(!set.contains("15r"));
    }
}
