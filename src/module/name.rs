//! Dotted module names.

use std::fmt::{Display, Error, Formatter};

use crate::error::LoadError;

/// A validated, absolute module name such as `examples_pkg.subpkg1.module1`.
/// Always non-empty; every segment is a valid identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleName(Vec<String>);

impl ModuleName {
    /// Parse a dotted path, rejecting empty or malformed segments.
    pub fn parse(dotted: &str) -> Result<Self, LoadError> {
        let segments: Vec<String> = dotted.split('.').map(|s| s.to_string()).collect();
        Self::from_segments(&segments)
    }

    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Result<Self, LoadError> {
        if segments.is_empty() {
            return Err(LoadError::InvalidName(String::new()));
        }

        let dotted = || {
            segments
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<_>>()
                .join(".")
        };

        for segment in segments {
            if !is_valid_segment(segment.as_ref()) {
                return Err(LoadError::InvalidName(dotted()));
            }
        }

        Ok(Self(
            segments.iter().map(|s| s.as_ref().to_string()).collect(),
        ))
    }

    /// The name given to the entry-point script's module.
    pub fn main() -> Self {
        Self(vec!["__main__".to_string()])
    }

    pub fn as_str(&self) -> String {
        self.0.join(".")
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The final segment, used as the attribute name on the parent namespace.
    pub fn last(&self) -> &str {
        self.0.last().map(|s| s.as_str()).expect("non-empty name")
    }

    /// The containing package's name, or `None` for a top-level module.
    pub fn parent(&self) -> Option<ModuleName> {
        if self.0.len() < 2 {
            return None;
        }
        Some(ModuleName(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Iterate the prefix chain root-first, ending with the full name.
    ///
    /// Example: "a.b.c" yields ["a", "a.b", "a.b.c"]. An `import a.b.c`
    /// loads and binds exactly this chain in order.
    pub fn prefixes(&self) -> impl Iterator<Item = ModuleName> + '_ {
        (1..=self.0.len()).map(move |n| ModuleName(self.0[..n].to_vec()))
    }
}

fn is_valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

impl Display for ModuleName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.as_str())
    }
}

impl From<&ModuleName> for String {
    fn from(value: &ModuleName) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_dotted_path() {
        let name = ModuleName::parse("a.b.c").unwrap();
        assert_eq!(name.segments(), &["a", "b", "c"]);
        assert_eq!(name.as_str(), "a.b.c");
        assert_eq!(name.last(), "c");
    }

    #[test]
    fn parse_rejects_empty_segment() {
        assert!(ModuleName::parse("a..b").is_err());
        assert!(ModuleName::parse("").is_err());
        assert!(ModuleName::parse(".a").is_err());
    }

    #[test]
    fn parse_rejects_non_identifier_segment() {
        assert!(ModuleName::parse("a.1b").is_err());
        assert!(ModuleName::parse("a b").is_err());
    }

    #[test]
    fn underscore_segments_are_valid() {
        assert!(ModuleName::parse("__main__").is_ok());
        assert!(ModuleName::parse("pkg._private").is_ok());
    }

    #[test]
    fn parent_of_nested_name() {
        let name = ModuleName::parse("a.b.c").unwrap();
        assert_eq!(name.parent(), Some(ModuleName::parse("a.b").unwrap()));
    }

    #[test]
    fn parent_of_top_level_is_none() {
        let name = ModuleName::parse("a").unwrap();
        assert_eq!(name.parent(), None);
    }

    #[test]
    fn prefixes_run_root_first() {
        let name = ModuleName::parse("a.b.c").unwrap();
        let prefixes: Vec<String> = name.prefixes().map(|p| p.as_str()).collect();
        assert_eq!(prefixes, vec!["a", "a.b", "a.b.c"]);
    }

    #[test]
    fn prefixes_of_single_segment() {
        let name = ModuleName::parse("a").unwrap();
        let prefixes: Vec<String> = name.prefixes().map(|p| p.as_str()).collect();
        assert_eq!(prefixes, vec!["a"]);
    }
}
