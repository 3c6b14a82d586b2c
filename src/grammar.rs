//! Deterministic, context-free L-System expansion.
//!
//! A [`Grammar`] bundles an axiom, a set of production rules (one symbol to one
//! replacement string) and a generation count. Expansion is a pure function of
//! those three values: no state survives between calls, so the same grammar can
//! be expanded from any thread any number of times.
//!
//! # Generation counting
//!
//! Generation 1 is the axiom itself. Generation *g* (for *g* ≥ 2) is one rewrite
//! pass applied to generation *g - 1*, so a grammar performs `generations - 1`
//! passes in total. Generation 0 is treated like generation 1. Existing presets
//! are tuned against this counting and it is kept on purpose.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Production rules keyed by predecessor symbol.
///
/// A symbol without an entry rewrites to itself. An entry with an empty
/// replacement deletes the symbol.
pub type RuleSet = BTreeMap<char, String>;

/// An axiom, its production rules and how many generations to grow.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grammar {
    pub axiom: String,
    pub rules: RuleSet,
    pub generations: u32,
}

impl Grammar {
    pub fn new(axiom: impl Into<String>, rules: RuleSet, generations: u32) -> Self {
        Self {
            axiom: axiom.into(),
            rules,
            generations,
        }
    }

    /// Adds (or replaces) a single rule (builder pattern).
    pub fn with_rule(mut self, predecessor: char, successor: impl Into<String>) -> Self {
        self.rules.insert(predecessor, successor.into());
        self
    }

    /// Number of rewrite passes [`expand`](Self::expand) will perform.
    pub fn rewrite_passes(&self) -> u32 {
        self.generations.saturating_sub(1)
    }

    /// Expands the axiom through all generations.
    pub fn expand(&self) -> String {
        expand(&self.axiom, &self.rules, self.generations)
    }

    /// Distinct symbols used by this grammar, in order of first appearance
    /// across the axiom, the rule keys and then the rule replacements.
    ///
    /// Informational only; neither expansion nor interpretation consult it.
    pub fn alphabet(&self) -> String {
        let mut seen = String::new();
        let symbols = self
            .axiom
            .chars()
            .chain(self.rules.keys().copied())
            .chain(self.rules.values().flat_map(|s| s.chars()));
        for ch in symbols {
            if !seen.contains(ch) {
                seen.push(ch);
            }
        }
        seen
    }
}

/// Expands `axiom` under `rules`, performing `generations - 1` rewrite passes.
///
/// Output length is unbounded: it grows exponentially with the generation count
/// and the rules' expansion factor. Callers are responsible for picking sane
/// generation counts.
pub fn expand(axiom: &str, rules: &RuleSet, generations: u32) -> String {
    let passes = generations.saturating_sub(1);
    let mut current = axiom.to_owned();
    for _ in 0..passes {
        current = rewrite(&current, rules);
    }
    debug!(
        axiom_len = axiom.len(),
        rules = rules.len(),
        passes,
        program_len = current.chars().count(),
        "Expanded L-System"
    );
    current
}

/// Applies exactly one rewrite pass to `input`.
pub fn rewrite(input: &str, rules: &RuleSet) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match rules.get(&ch) {
            Some(replacement) => out.push_str(replacement),
            None => out.push(ch),
        }
    }
    out
}

/// Parses a textual rule such as `F=F+G` or `X -> F[+X]`.
///
/// The predecessor must be exactly one symbol. An empty successor is valid and
/// deletes the predecessor during expansion.
pub fn parse_rule(text: &str) -> Result<(char, String), ConfigError> {
    let invalid = |reason| ConfigError::Rule {
        rule: text.to_owned(),
        reason,
    };

    let (lhs, rhs) = text
        .split_once("->")
        .or_else(|| text.split_once('='))
        .ok_or_else(|| invalid("expected `symbol=replacement` or `symbol->replacement`"))?;

    let mut lhs_chars = lhs.trim().chars();
    let predecessor = lhs_chars
        .next()
        .ok_or_else(|| invalid("missing predecessor symbol"))?;
    if lhs_chars.next().is_some() {
        return Err(invalid("predecessor must be a single symbol"));
    }

    Ok((predecessor, rhs.trim().to_owned()))
}

/// Parses a list of textual rules into a [`RuleSet`], rejecting duplicates.
pub fn parse_rules<I, S>(rules: I) -> Result<RuleSet, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = RuleSet::new();
    for text in rules {
        let (predecessor, successor) = parse_rule(text.as_ref())?;
        if set.insert(predecessor, successor).is_some() {
            return Err(ConfigError::DuplicateRule(predecessor));
        }
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary_tree() -> RuleSet {
        RuleSet::from([('0', "1[*+0]-0".to_string()), ('1', "11".to_string())])
    }

    #[test]
    fn first_generation_is_the_axiom() {
        assert_eq!(expand("0", &binary_tree(), 1), "0");
        assert_eq!(expand("0", &binary_tree(), 0), "0");
    }

    #[test]
    fn later_generations_rewrite_once_per_step() {
        let rules = binary_tree();
        assert_eq!(expand("0", &rules, 2), "1[*+0]-0");
        assert_eq!(expand("0", &rules, 3), "11[*+1[*+0]-0]-1[*+0]-0");
    }

    #[test]
    fn unknown_symbols_pass_through() {
        let rules = RuleSet::from([('A', "AB".to_string())]);
        assert_eq!(rewrite("+A-[Q]", &rules), "+AB-[Q]");
    }

    #[test]
    fn empty_replacement_deletes_symbol() {
        let rules = RuleSet::from([('X', String::new())]);
        assert_eq!(rewrite("FXF", &rules), "FF");
    }

    #[test]
    fn rewrite_passes_lags_generation_count() {
        let grammar = Grammar::new("F", RuleSet::new(), 4);
        assert_eq!(grammar.rewrite_passes(), 3);
        assert_eq!(Grammar::new("F", RuleSet::new(), 0).rewrite_passes(), 0);
    }

    #[test]
    fn alphabet_follows_first_appearance() {
        let grammar = Grammar::new("X", RuleSet::new(), 4)
            .with_rule('X', "F+[[*X]-X]-F[-FX]+X")
            .with_rule('F', "FF");
        assert_eq!(grammar.alphabet(), "XF+[*]-");
    }

    #[test]
    fn parse_rule_accepts_both_separators() {
        assert_eq!(parse_rule("F=F+G").unwrap(), ('F', "F+G".to_string()));
        assert_eq!(parse_rule(" X -> F[+X] ").unwrap(), ('X', "F[+X]".to_string()));
        assert_eq!(parse_rule("G=").unwrap(), ('G', String::new()));
    }

    #[test]
    fn parse_rule_rejects_bad_predecessors() {
        assert!(matches!(parse_rule("FF=G"), Err(ConfigError::Rule { .. })));
        assert!(matches!(parse_rule("=G"), Err(ConfigError::Rule { .. })));
        assert!(matches!(parse_rule("FG"), Err(ConfigError::Rule { .. })));
    }

    #[test]
    fn parse_rules_rejects_duplicates() {
        assert_eq!(
            parse_rules(["F=FF", "F=G"]),
            Err(ConfigError::DuplicateRule('F'))
        );
        assert_eq!(parse_rules(["0=1[*+0]-0", "1=11"]).unwrap(), binary_tree());
    }
}
