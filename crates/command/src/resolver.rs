//! Fuzzy resource-name resolution.

use labtrack_core::ResourceName;

/// Default acceptance cutoff for a fuzzy match, on a 0–1 scale where 1.0
/// is an exact match.
pub const DEFAULT_CUTOFF: f64 = 0.7;

/// Matches a free-text token against the catalog's known names.
///
/// The resolver never invents names: it either returns a catalog name
/// whose similarity clears the cutoff, or echoes the token unchanged and
/// lets the lookup downstream report it as unknown.
#[derive(Debug, Clone, Copy)]
pub struct NameResolver {
    cutoff: f64,
}

impl Default for NameResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl NameResolver {
    pub fn new() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
        }
    }

    pub fn with_cutoff(cutoff: f64) -> Self {
        Self {
            cutoff: cutoff.clamp(0.0, 1.0),
        }
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Resolve `token` against `names`.
    ///
    /// Scans names in the order given (the catalog's insertion order, so
    /// behavior is reproducible); a later name must be strictly better to
    /// displace an earlier one. Below-cutoff resolution is not an error:
    /// the caller gets the token back and lookup fails with it.
    pub fn resolve(&self, token: &ResourceName, names: &[ResourceName]) -> ResourceName {
        let mut best: Option<(&ResourceName, f64)> = None;

        for name in names {
            let score = similarity(token.as_str(), name.as_str());
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((name, score));
            }
        }

        match best {
            Some((name, score)) if score >= self.cutoff => name.clone(),
            _ => token.clone(),
        }
    }
}

/// Similarity ratio in [0, 1]: 1.0 minus the normalized edit distance.
///
/// An exact match is always 1.0, so a canonical catalog name resolves to
/// itself regardless of the cutoff.
fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / longest as f64
}

/// Classic two-row Levenshtein distance over characters.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        cur[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            cur[j + 1] = substitution.min(prev[j + 1] + 1).min(cur[j] + 1);
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn names(raw: &[&str]) -> Vec<ResourceName> {
        raw.iter().map(|n| ResourceName::new(n)).collect()
    }

    #[test]
    fn corrects_a_close_typo() {
        let catalog = names(&["ethanol", "gloves", "beaker"]);
        let resolved = NameResolver::new().resolve(&ResourceName::new("ethnol"), &catalog);
        assert_eq!(resolved, ResourceName::new("ethanol"));
    }

    #[test]
    fn echoes_token_when_nothing_clears_the_cutoff() {
        let catalog = names(&["ethanol", "gloves"]);
        let resolved = NameResolver::new().resolve(&ResourceName::new("centrifuge"), &catalog);
        assert_eq!(resolved, ResourceName::new("centrifuge"));
    }

    #[test]
    fn exact_name_resolves_to_itself() {
        let catalog = names(&["ethanol", "gloves"]);
        let resolved = NameResolver::new().resolve(&ResourceName::new("gloves"), &catalog);
        assert_eq!(resolved, ResourceName::new("gloves"));
    }

    #[test]
    fn ties_keep_the_first_encountered_name() {
        // "aaab" and "aaac" are equally distant from "aaaa".
        let catalog = names(&["aaab", "aaac"]);
        let resolved = NameResolver::with_cutoff(0.5).resolve(&ResourceName::new("aaaa"), &catalog);
        assert_eq!(resolved, ResourceName::new("aaab"));
    }

    #[test]
    fn cutoff_is_inclusive() {
        // distance 1 over length 5 -> ratio 0.8
        let catalog = names(&["flask"]);
        let token = ResourceName::new("flasq");
        assert_eq!(
            NameResolver::with_cutoff(0.8).resolve(&token, &catalog),
            ResourceName::new("flask")
        );
        assert_eq!(
            NameResolver::with_cutoff(0.81).resolve(&token, &catalog),
            token
        );
    }

    #[test]
    fn similarity_is_symmetric_and_bounded() {
        assert_eq!(similarity("ethanol", "ethanol"), 1.0);
        let ab = similarity("ethanol", "ethnol");
        let ba = similarity("ethnol", "ethanol");
        assert_eq!(ab, ba);
        assert!(ab > 0.7 && ab < 1.0);
    }

    proptest! {
        /// Resolving the exact canonical name of any catalog resource
        /// returns that name unchanged, regardless of the cutoff.
        #[test]
        fn exact_names_always_resolve_to_themselves(
            raw in proptest::collection::vec("[a-z]{1,12}", 1..8),
            pick in 0usize..8,
            cutoff in 0.0f64..=1.0,
        ) {
            let catalog = names(&raw.iter().map(String::as_str).collect::<Vec<_>>());
            let target = catalog[pick % catalog.len()].clone();
            let resolved = NameResolver::with_cutoff(cutoff).resolve(&target, &catalog);
            prop_assert_eq!(resolved, target);
        }
    }
}
