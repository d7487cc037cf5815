// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Imperative mood heuristics for the first word of the subject.

use std::collections::HashSet;

use crate::commit::Commit;
use crate::config::ImperativeConfig;
use crate::conventional::ConventionalCommit;

use super::builtin::{Rule, RuleEnv};
use super::name::RuleName;
use super::result::RuleOutcome;
use super::validator::{ErrorCode, ValidationError};

/// Imperatives that happen to end in `ed`.
const BASE_FORMS_ED: &[&str] = &[
    "bed", "bleed", "breed", "embed", "exceed", "feed", "heed", "need", "proceed", "seed", "shed",
    "shred", "speed", "succeed", "wed", "weed",
];

/// Imperatives that happen to end in `ing`.
const BASE_FORMS_ING: &[&str] = &[
    "bring", "cling", "fling", "ping", "ring", "sing", "sling", "spring", "sting", "string",
    "swing", "wring",
];

/// Imperatives that happen to end in `s`.
const BASE_FORMS_S: &[&str] = &[
    "access", "address", "alias", "assess", "bias", "bless", "bypass", "canvas", "compress",
    "cross", "decompress", "discuss", "dismiss", "embarrass", "express", "focus", "guess",
    "harness", "miss", "pass", "possess", "press", "process", "progress", "redress", "regress",
    "stress", "suppress", "toss",
];

/// Words that never start an imperative sentence.
const NON_VERBS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "initial", "new", "version", "release",
    "minor", "major", "misc", "miscellaneous", "various", "some", "more", "small", "typo",
    "typos", "wip", "readme", "docs",
];

/// Subject must open with a verb in the imperative mood.
#[derive(Debug, Clone)]
pub struct ImperativeVerbRule {
    base_forms_ed: HashSet<String>,
    base_forms_ing: HashSet<String>,
    base_forms_s: HashSet<String>,
    non_verbs: HashSet<String>,
}

fn word_set(builtin: &[&str], extra: &[String]) -> HashSet<String> {
    builtin
        .iter()
        .map(|w| w.to_string())
        .chain(extra.iter().map(|w| w.trim().to_lowercase()))
        .collect()
}

impl ImperativeVerbRule {
    pub fn new(config: &ImperativeConfig) -> Self {
        Self {
            base_forms_ed: word_set(BASE_FORMS_ED, &config.base_forms_ed),
            base_forms_ing: word_set(BASE_FORMS_ING, &config.base_forms_ing),
            base_forms_s: word_set(BASE_FORMS_S, &config.base_forms_s),
            non_verbs: word_set(NON_VERBS, &config.non_verbs),
        }
    }

    /// Classify `word` (lowercase); `None` means it reads as an imperative.
    fn classify(&self, word: &str) -> Option<(ErrorCode, &'static str)> {
        if self.non_verbs.contains(word) {
            return Some((ErrorCode::NonVerb, "is not a verb"));
        }
        if word.ends_with("ed") && !self.base_forms_ed.contains(word) {
            return Some((ErrorCode::PastTense, "is in the past tense"));
        }
        if word.ends_with("ing") && !self.base_forms_ing.contains(word) {
            return Some((ErrorCode::Gerund, "is a gerund"));
        }
        // "ss" endings are base forms ("compress", "dismiss").
        if word.len() > 2
            && word.ends_with('s')
            && !word.ends_with("ss")
            && !self.base_forms_s.contains(word)
        {
            return Some((ErrorCode::ThirdPerson, "is in the third person"));
        }
        None
    }
}

/// First word of `text`, stripped of surrounding punctuation and lowercased.
fn first_word(text: &str) -> Option<String> {
    let word = text
        .split_whitespace()
        .next()?
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    if word.is_empty() || !word.chars().all(char::is_alphabetic) {
        return None;
    }
    Some(word)
}

impl Rule for ImperativeVerbRule {
    fn name(&self) -> RuleName {
        RuleName::ImperativeVerb
    }

    fn validate(&self, commit: &Commit, _env: &RuleEnv<'_>) -> RuleOutcome {
        let subject = commit.subject();
        if subject.trim().is_empty() {
            return RuleOutcome::fail(ValidationError::new(
                self.name(),
                ErrorCode::EmptySubject,
                "Subject is empty",
            ));
        }

        let parsed = ConventionalCommit::parse(subject);
        let text = if parsed.is_valid() {
            parsed.description.as_str()
        } else {
            subject
        };

        let Some(word) = first_word(text) else {
            return RuleOutcome::pass(self.name());
        };
        let mut outcome = RuleOutcome::pass(self.name()).with_detail("first_word", &word);

        if let Some((code, problem)) = self.classify(&word) {
            outcome.push(
                ValidationError::new(
                    self.name(),
                    code,
                    format!("First word '{}' {}; use the imperative mood", word, problem),
                )
                .with_context("actual", &word)
                .with_context("expected", "imperative verb"),
            );
        }
        outcome
    }
}
