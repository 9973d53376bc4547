use std::collections::BTreeSet;
use std::fmt;

/// Distinct, lower-cased first sub-directory names (`"data/"`, `"private/"`, ...)
/// seen across the entries of one archive. Always sorted and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectorySignature(BTreeSet<String>);

impl DirectorySignature {
    /// Record the second path segment of a slash-normalized entry name.
    ///
    /// Only names with at least three segments contribute, so a top-level
    /// file (`root/file.txt`) adds nothing while `root/data/app/x` adds `data/`.
    pub fn observe(&mut self, entry_name: &str) {
        let mut parts = entry_name.split('/');
        let _root = parts.next();
        if let (Some(dir), Some(_)) = (parts.next(), parts.next()) {
            if !dir.is_empty() {
                self.0.insert(format!("{}/", dir.to_lowercase()));
            }
        }
    }

    pub fn contains(&self, dir: &str) -> bool {
        self.0.contains(dir)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for DirectorySignature {
    fn from_iter<I: IntoIterator<Item = S>>(names: I) -> Self {
        let mut signature = DirectorySignature::default();
        for name in names {
            signature.observe(name.as_ref());
        }
        signature
    }
}

impl fmt::Display for DirectorySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.to_vec().join(", "))
    }
}
