use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Abbreviation tables for a fixed set of command names.
///
/// `prefixes` maps every abbreviation that only one name starts with to that
/// name; every full name also maps to itself, even when it is the prefix of
/// another name. `expansions` maps every abbreviation shared by several names
/// to the display strings (`[down]load`) of the names it could still mean, in
/// sorted name order.
#[derive(Debug, Clone, Default)]
pub struct PrefixTable {
    prefixes: HashMap<String, String>,
    expansions: BTreeMap<String, Vec<String>>,
}

impl PrefixTable {
    /// Builds the table for a set of command names.
    ///
    /// # Arguments
    ///
    /// * `names` - Every name that may be abbreviated; duplicates and empty
    ///   names are ignored
    pub fn build<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let names: BTreeSet<&str> = names.into_iter().filter(|n| !n.is_empty()).collect();
        let mut table = PrefixTable::default();

        for &name in &names {
            table.prefixes.insert(name.to_string(), name.to_string());

            // Char boundaries, longest prefix first.
            let mut ends: Vec<usize> = name.char_indices().skip(1).map(|(i, _)| i).collect();
            ends.push(name.len());
            ends.reverse();

            let mut unique_expansion: Option<String> = None;
            let mut shared = false;
            for end in ends {
                let prefix = &name[..end];

                // Once a prefix is shared, every shorter one is shared too.
                if !shared {
                    shared = names.iter().filter(|n| n.starts_with(prefix)).count() > 1;
                }

                if !shared {
                    table.prefixes.insert(prefix.to_string(), name.to_string());
                    unique_expansion = Some(format!("[{}]{}", prefix, &name[end..]));
                    continue;
                }

                if let Some(expansion) = &unique_expansion {
                    table
                        .expansions
                        .entry(prefix.to_string())
                        .or_default()
                        .push(expansion.clone());
                }
            }
        }

        table
    }

    /// Full name for `token`, if it is an unambiguous abbreviation.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.prefixes.get(token).map(String::as_str)
    }

    /// Candidate display strings for an ambiguous abbreviation.
    pub fn expansions(&self, token: &str) -> Option<&[String]> {
        self.expansions.get(token).map(Vec::as_slice)
    }

    pub fn prefixes(&self) -> &HashMap<String, String> {
        &self.prefixes
    }

    pub fn ambiguous(&self) -> &BTreeMap<String, Vec<String>> {
        &self.expansions
    }
}
