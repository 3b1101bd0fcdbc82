use once_cell::sync::Lazy;
use rand::{rngs::StdRng, Rng, SeedableRng};
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Maximal runs of identifier characters. Matching whole runs and looking
/// them up in the table gives whole-word replacement without per-entry
/// boundary patterns (`\b` mistreats `$`, which is an identifier character
/// here).
static IDENT_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9_$]+").unwrap());

/// Source of generated identifiers, hexadecimal style. Seedable so tests can
/// pin the output; uniqueness is enforced by the consumers, not here.
pub struct NameGenerator {
    rng: StdRng,
}

impl NameGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next_name(&mut self) -> String {
        format!("_0x{:06x}", self.rng.gen_range(0u32..0x100_0000))
    }

    /// Inert right-hand-side value for noise declarations.
    pub fn next_noise_value(&mut self) -> u32 {
        self.rng.gen_range(0u32..100_000)
    }
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-job mapping from original identifier to generated replacement.
/// Entries keep insertion order so replacement is deterministic.
#[derive(Default)]
pub struct RenameTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl RenameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the generated name for `name`, synthesizing one on first
    /// sight. Random draws are checked against the table so a collision with
    /// an earlier entry (or with the original name itself) is never accepted.
    pub fn assign(&mut self, name: &str, names: &mut NameGenerator) -> String {
        if let Some(&i) = self.index.get(name) {
            return self.entries[i].1.clone();
        }
        let generated = loop {
            let candidate = names.next_name();
            if candidate != name && !self.entries.iter().any(|(_, g)| *g == candidate) {
                break candidate;
            }
        };
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push((name.to_string(), generated.clone()));
        generated
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.index.get(name).map(|&i| self.entries[i].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(o, g)| (o.as_str(), g.as_str()))
    }

    /// Replaces every whole-word occurrence of each original name with its
    /// generated name, in a single pass over the text.
    pub fn apply(&self, text: &str) -> String {
        if self.entries.is_empty() {
            return text.to_string();
        }
        IDENT_RUN_REGEX
            .replace_all(text, |caps: &Captures| {
                let word = caps.get(0).unwrap().as_str();
                match self.get(word) {
                    Some(generated) => generated.to_string(),
                    None => word.to_string(),
                }
            })
            .into_owned()
    }
}
