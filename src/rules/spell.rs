// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Spelling of the subject and body.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::commit::Commit;
use crate::config::{SpellConfig, SpellLocale};

use super::builtin::{Rule, RuleEnv};
use super::name::RuleName;
use super::result::RuleOutcome;
use super::signoff::is_signoff_attempt;
use super::validator::{ErrorCode, ValidationError};

/// Common English misspellings.
const MISSPELLINGS: &[(&str, &str)] = &[
    ("accomodate", "accommodate"),
    ("acheive", "achieve"),
    ("adress", "address"),
    ("agressive", "aggressive"),
    ("alot", "a lot"),
    ("arguement", "argument"),
    ("begining", "beginning"),
    ("beleive", "believe"),
    ("calender", "calendar"),
    ("commited", "committed"),
    ("comming", "coming"),
    ("compatability", "compatibility"),
    ("definately", "definitely"),
    ("dependancy", "dependency"),
    ("desciption", "description"),
    ("enviroment", "environment"),
    ("existance", "existence"),
    ("explicitely", "explicitly"),
    ("occured", "occurred"),
    ("occurence", "occurrence"),
    ("paramter", "parameter"),
    ("persistant", "persistent"),
    ("posible", "possible"),
    ("recieve", "receive"),
    ("reciever", "receiver"),
    ("recomend", "recommend"),
    ("refered", "referred"),
    ("seperate", "separate"),
    ("succesful", "successful"),
    ("sucess", "success"),
    ("teh", "the"),
    ("threshhold", "threshold"),
    ("untill", "until"),
    ("wich", "which"),
];

/// American spellings reported under the UK locale.
const AMERICAN_TO_BRITISH: &[(&str, &str)] = &[
    ("analyze", "analyse"),
    ("behavior", "behaviour"),
    ("canceled", "cancelled"),
    ("catalog", "catalogue"),
    ("center", "centre"),
    ("color", "colour"),
    ("customize", "customise"),
    ("defense", "defence"),
    ("favorite", "favourite"),
    ("flavor", "flavour"),
    ("honor", "honour"),
    ("initialize", "initialise"),
    ("labeled", "labelled"),
    ("license", "licence"),
    ("normalize", "normalise"),
    ("optimize", "optimise"),
    ("organize", "organise"),
    ("serialize", "serialise"),
    ("synchronize", "synchronise"),
];

/// Subject and body must be free of known misspellings.
#[derive(Debug, Clone)]
pub struct SpellRule {
    corrections: HashMap<String, String>,
    ignore: HashSet<String>,
}

impl SpellRule {
    pub fn new(config: &SpellConfig) -> Self {
        let mut corrections: HashMap<String, String> = MISSPELLINGS
            .iter()
            .map(|(wrong, right)| (wrong.to_string(), right.to_string()))
            .collect();
        if config.locale == SpellLocale::Uk {
            corrections.extend(
                AMERICAN_TO_BRITISH
                    .iter()
                    .map(|(us, uk)| (us.to_string(), uk.to_string())),
            );
        }
        corrections.extend(
            config
                .custom_words
                .iter()
                .map(|(wrong, right)| (wrong.trim().to_lowercase(), right.clone())),
        );

        Self {
            corrections,
            ignore: config
                .ignore_words
                .iter()
                .map(|w| w.trim().to_lowercase())
                .collect(),
        }
    }
}

/// Words of the message worth checking; trailer lines are skipped.
fn words(commit: &Commit) -> impl Iterator<Item = &str> {
    std::iter::once(commit.subject())
        .chain(commit.body().lines())
        .filter(|line| !is_signoff_attempt(line))
        .flat_map(|line| line.split(|c: char| !(c.is_alphabetic() || c == '\'')))
        .map(|word| word.trim_matches('\''))
        .filter(|word| !word.is_empty())
}

impl Rule for SpellRule {
    fn name(&self) -> RuleName {
        RuleName::Spell
    }

    fn validate(&self, commit: &Commit, _env: &RuleEnv<'_>) -> RuleOutcome {
        let mut outcome = RuleOutcome::pass(self.name());
        let mut reported = BTreeSet::new();
        let mut checked = 0usize;

        for word in words(commit) {
            checked += 1;
            let lower = word.to_lowercase();
            if self.ignore.contains(&lower) || reported.contains(&lower) {
                continue;
            }
            let Some(correction) = self.corrections.get(&lower) else {
                continue;
            };
            outcome.push(
                ValidationError::new(
                    self.name(),
                    ErrorCode::Misspelling,
                    format!("'{}' is misspelled, did you mean '{}'?", word, correction),
                )
                .with_help(format!("Replace '{}' with '{}'", word, correction))
                .with_context("actual", word)
                .with_context("expected", correction),
            );
            reported.insert(lower);
        }

        outcome.set_detail("checked_words", checked);
        outcome
    }
}
