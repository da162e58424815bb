//! Display name bookkeeping
//!
//! Hands out `base`, `base(1)`, `base(2)`, ... for repeated requests of the
//! same name and counts how many live participants hold a variant of each
//! base name.

use std::collections::HashMap;

use tracing::debug;

use crate::types::AssignedName;

/// Strip a trailing `(digits)` disambiguator from a display name
pub fn base_name(name: &str) -> &str {
    let Some(inner) = name.strip_suffix(')') else {
        return name;
    };
    let Some(open) = inner.rfind('(') else {
        return name;
    };
    let digits = &inner[open + 1..];
    if open > 0 && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        &name[..open]
    } else {
        name
    }
}

/// Base name -> number of live holders
///
/// An entry whose count drops to zero is removed. The disambiguator handed
/// out is the current count, so a slot freed in the middle is not reused in
/// order: with `a`, `a(1)` and `a(2)` live, releasing `a(1)` and resolving
/// `a` again yields `a(2)` a second time.
#[derive(Debug, Default)]
pub struct NameRegistry {
    counts: HashMap<String, usize>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a name for `candidate`, suffixing it if the base is taken
    pub fn resolve(&mut self, candidate: &str) -> AssignedName {
        let count = self.counts.entry(candidate.to_string()).or_insert(0);
        let suffix = (*count > 0).then_some(*count);
        *count += 1;
        AssignedName::new(candidate, suffix)
    }

    /// Give back a name previously returned by `resolve`
    ///
    /// Releasing a name whose base is unknown is a no-op.
    pub fn release(&mut self, name: &AssignedName) {
        let Some(count) = self.counts.get_mut(name.base()) else {
            debug!("Release of unknown name '{}' ignored", name);
            return;
        };
        *count -= 1;
        if *count == 0 {
            self.counts.remove(name.base());
        }
    }

    /// Number of live holders of `base`
    pub fn count(&self, base: &str) -> usize {
        self.counts.get(base).copied().unwrap_or(0)
    }

    /// Number of distinct base names in use
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_first_use_has_no_suffix() {
        let mut registry = NameRegistry::new();
        let name = registry.resolve("alice");
        assert_eq!(name.to_string(), "alice");
        assert_eq!(registry.count("alice"), 1);
    }

    #[test]
    fn test_collisions_are_distinct() {
        let mut registry = NameRegistry::new();
        let names: Vec<String> = (0..10).map(|_| registry.resolve("bob").to_string()).collect();

        let unique: HashSet<&String> = names.iter().collect();
        assert_eq!(unique.len(), names.len());

        assert_eq!(names[0], "bob");
        for (k, name) in names.iter().enumerate().skip(1) {
            assert_eq!(name, &format!("bob({})", k));
            assert_eq!(base_name(name), "bob");
        }
        assert_eq!(registry.count("bob"), 10);
    }

    #[test]
    fn test_release_removes_entry_at_zero() {
        let mut registry = NameRegistry::new();
        let a = registry.resolve("bob");
        let b = registry.resolve("bob");
        assert_eq!(registry.count("bob"), 2);

        registry.release(&b);
        assert_eq!(registry.count("bob"), 1);

        registry.release(&a);
        assert_eq!(registry.count("bob"), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_release_unknown_is_noop() {
        let mut registry = NameRegistry::new();
        let name = registry.resolve("carol");
        registry.release(&name);
        registry.release(&name);
        assert!(registry.is_empty());

        registry.resolve("dave");
        registry.release(&AssignedName::new("erin", Some(3)));
        assert_eq!(registry.count("dave"), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_reconnect_after_suffixed_leaves() {
        let mut registry = NameRegistry::new();
        let _a = registry.resolve("bob");
        let b = registry.resolve("bob");
        assert_eq!(b.to_string(), "bob(1)");

        registry.release(&b);
        let c = registry.resolve("bob");
        assert_eq!(c.to_string(), "bob(1)");
    }

    #[test]
    fn test_freed_middle_slot_is_not_tracked() {
        let mut registry = NameRegistry::new();
        let _a = registry.resolve("a");
        let a1 = registry.resolve("a");
        let a2 = registry.resolve("a");
        assert_eq!(a2.to_string(), "a(2)");

        registry.release(&a1);
        let again = registry.resolve("a");
        // Known behaviour: collides with the still-live `a(2)`
        assert_eq!(again.to_string(), "a(2)");
        assert_eq!(registry.count("a"), 3);
    }

    #[test]
    fn test_count_matches_live_holders() {
        let mut registry = NameRegistry::new();
        let mut live: Vec<AssignedName> = Vec::new();
        for step in 0..50usize {
            if step % 3 == 2 {
                let name = live.remove(step % live.len());
                registry.release(&name);
            } else {
                live.push(registry.resolve(if step % 2 == 0 { "x" } else { "y" }));
            }
            for base in ["x", "y"] {
                let holders = live.iter().filter(|n| n.base() == base).count();
                assert_eq!(registry.count(base), holders);
            }
        }
    }

    #[test]
    fn test_literal_suffix_is_its_own_base() {
        let mut registry = NameRegistry::new();
        let literal = registry.resolve("bob(1)");
        let plain = registry.resolve("bob");
        assert_eq!(literal.to_string(), "bob(1)");
        assert_eq!(plain.to_string(), "bob");

        registry.release(&literal);
        assert_eq!(registry.count("bob(1)"), 0);
        assert_eq!(registry.count("bob"), 1);
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("alice"), "alice");
        assert_eq!(base_name("alice(3)"), "alice");
        assert_eq!(base_name("alice(12)"), "alice");
        assert_eq!(base_name("alice()"), "alice()");
        assert_eq!(base_name("alice(x)"), "alice(x)");
        assert_eq!(base_name("(1)"), "(1)");
        assert_eq!(base_name("a(1)(2)"), "a(1)");
    }
}
