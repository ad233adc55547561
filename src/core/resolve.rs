use std::collections::HashSet;

/// Lowercases the name, then keeps only ASCII letters and digits.
/// Lowercasing comes first so the few Unicode characters whose lowercase
/// form is ASCII (Kelvin sign, for one) survive the filter. Lossy on
/// purpose: distinct display names may share a canonical form, which the
/// [`KeyRegistry`] then disambiguates.
pub fn canonical(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Tracks every lookup key claimed during one run, across all sources.
///
/// When a canonical key is already taken the registry probes `key2`,
/// `key3`, … until a free slot is found. The probe is linear; input
/// cardinality is a few thousand rows and the exact suffix sequence is
/// part of the output contract, so it stays that way.
#[derive(Debug, Default)]
pub struct KeyRegistry {
    seen: HashSet<String>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a unique key for `name`. Returns `None` when the name holds
    /// no ASCII alphanumerics at all, since an empty key is never valid.
    pub fn claim(&mut self, name: &str) -> Option<String> {
        let base = canonical(name);
        if base.is_empty() {
            return None;
        }

        let key = if self.seen.contains(&base) {
            let mut counter = 2;
            loop {
                let candidate = format!("{base}{counter}");
                if !self.seen.contains(&candidate) {
                    break candidate;
                }
                counter += 1;
            }
        } else {
            base
        };

        self.seen.insert(key.clone());
        Some(key)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
