//! Canned replies for identity and small-talk questions.
//!
//! Rules are an ordered table of `(patterns, response)` pairs. A rule fires
//! when any of its patterns occurs in the query (ASCII case-insensitive);
//! the earliest rule in the table wins.

use aho_corasick::AhoCorasick;
use async_trait::async_trait;
use tracing::debug;

use crate::error::{AnswerError, Result};

use super::AnswerProvider;

/// One entry of the personality table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalityRule {
    pub patterns: Vec<String>,
    pub response: String,
}

impl PersonalityRule {
    pub fn new(patterns: &[&str], response: &str) -> Self {
        Self {
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            response: response.to_string(),
        }
    }
}

/// Built-in rule table.
pub fn default_rules() -> Vec<PersonalityRule> {
    vec![
        PersonalityRule::new(
            &["who created you", "who made you"],
            "My creator is Abhiranjan Singh — smart, funny, and a bit pagal 😜",
        ),
        PersonalityRule::new(
            &["girlfriend", "boyfriend"],
            "Haha, still single — my love life is stuck in beta mode 🤖💕",
        ),
    ]
}

/// Matches queries against the personality table.
pub struct PersonalityResponder {
    rules: Vec<PersonalityRule>,
    automaton: AhoCorasick,
    /// Rule index for each pattern id in `automaton`.
    pattern_rule: Vec<usize>,
}

impl PersonalityResponder {
    /// Build a responder from an ordered rule table.
    pub fn new(rules: Vec<PersonalityRule>) -> Result<Self> {
        let mut patterns = Vec::new();
        let mut pattern_rule = Vec::new();
        for (index, rule) in rules.iter().enumerate() {
            for pattern in rule.patterns.iter().filter(|p| !p.is_empty()) {
                patterns.push(pattern.as_str());
                pattern_rule.push(index);
            }
        }

        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&patterns)
            .map_err(|e| AnswerError::Config(format!("Invalid personality patterns: {}", e)))?;

        Ok(Self {
            rules,
            automaton,
            pattern_rule,
        })
    }

    /// Responder with the built-in rule table.
    pub fn builtin() -> Result<Self> {
        Self::new(default_rules())
    }

    /// Fixed reply for `query`, if any rule matches.
    pub fn reply(&self, query: &str) -> Option<&str> {
        let rule_index = self
            .automaton
            .find_overlapping_iter(query)
            .map(|m| self.pattern_rule[m.pattern().as_usize()])
            .min()?;

        debug!(rule = rule_index, "Personality rule matched");
        Some(self.rules[rule_index].response.as_str())
    }
}

#[async_trait]
impl AnswerProvider for PersonalityResponder {
    fn name(&self) -> &'static str {
        "personality"
    }

    async fn answer(&self, query: &str) -> Option<String> {
        self.reply(query).map(str::to_string)
    }
}
