//! Navigation history: a stack of visited paths.

const MAX_ENTRIES: usize = 100;

#[derive(Debug)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
        }
    }

    pub fn current(&self) -> &str {
        self.entries.last().map_or("/", String::as_str)
    }

    /// Push `path` unless it is already current. Returns whether it moved.
    pub fn push(&mut self, path: String) -> bool {
        if path == self.current() {
            return false;
        }
        self.entries.push(path);
        if self.entries.len() > MAX_ENTRIES {
            self.entries.remove(0);
        }
        true
    }

    /// Pop the current entry. The first entry is never popped.
    pub fn back(&mut self) -> Option<&str> {
        if self.entries.len() < 2 {
            return None;
        }
        self.entries.pop();
        Some(self.current())
    }
}

/// Normalize user-typed paths: trim, leading slash.
pub fn normalize_path(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with('/') {
        Some(trimmed.to_owned())
    } else {
        Some(format!("/{trimmed}"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn push_and_back() {
        let mut history = History::new("/");
        assert!(history.push("/claimed/1".into()));
        assert!(!history.push("/claimed/1".into()));
        assert!(history.push("/lists".into()));

        assert_eq!(history.back(), Some("/claimed/1"));
        assert_eq!(history.back(), Some("/"));
        assert_eq!(history.back(), None);
        assert_eq!(history.current(), "/");
    }

    #[test]
    fn history_is_bounded() {
        let mut history = History::new("/");
        for i in 0..(MAX_ENTRIES + 10) {
            history.push(format!("/lists/{i}"));
        }
        assert_eq!(history.entries.len(), MAX_ENTRIES);
    }

    #[test]
    fn typed_paths_are_normalized() {
        assert_eq!(normalize_path("  claimed/4 "), Some("/claimed/4".into()));
        assert_eq!(normalize_path("/lists"), Some("/lists".into()));
        assert_eq!(normalize_path("   "), None);
    }
}
