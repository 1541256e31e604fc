/*
 * Responsibility
 * - Authority: opaque capability string (e.g. `ROLE_ADMIN`) used by route guards
 * - AuthoritySet: set semantics (duplicates collapse, order irrelevant)
 */
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Authority(String);

impl Authority {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Lets the set be probed with a plain `&str`; ordering matches `String`'s.
impl Borrow<str> for Authority {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthoritySet(BTreeSet<Authority>);

impl AuthoritySet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// True when at least one of `names` is held.
    pub fn contains_any(&self, names: &[&str]) -> bool {
        names.iter().any(|n| self.contains(n))
    }

    /// True when every one of `names` is held. Vacuously true for `[]`.
    pub fn contains_all(&self, names: &[&str]) -> bool {
        names.iter().all(|n| self.contains(n))
    }
}

impl FromIterator<Authority> for AuthoritySet {
    fn from_iter<I: IntoIterator<Item = Authority>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for AuthoritySet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(Authority::new).collect()
    }
}

impl fmt::Display for AuthoritySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(Authority::as_str).collect();
        write!(f, "[{}]", names.join(","))
    }
}
