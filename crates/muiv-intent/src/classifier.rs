//! Keyword classifier.
//!
//! Lowercases the message and looks for any trigger substring.  All
//! triggers are compiled into one [`aho_corasick`] automaton; when several
//! categories match, the one declared first in the knowledge base wins, so
//! the result is identical to scanning the categories in order and stopping
//! at the first hit.

use std::sync::Arc;

use aho_corasick::AhoCorasick;
use tracing::{debug, error, trace};

use crate::category::Category;
use crate::knowledge::KnowledgeBase;

/// Maps free text to a [`Category`].  Never fails.
#[derive(Debug, Clone)]
pub struct Classifier {
    knowledge: Arc<KnowledgeBase>,

    /// Automaton over every trigger, or `None` when there are no triggers or
    /// the build failed (the ordered scan is used instead).
    automaton: Option<AhoCorasick>,

    /// For each automaton pattern, the index of its owning entry.
    pattern_owner: Vec<usize>,
}

impl Classifier {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        let mut patterns: Vec<&str> = Vec::with_capacity(knowledge.trigger_count());
        let mut pattern_owner = Vec::with_capacity(knowledge.trigger_count());

        for (idx, entry) in knowledge.entries().iter().enumerate() {
            for trigger in &entry.triggers {
                patterns.push(trigger);
                pattern_owner.push(idx);
            }
        }

        let automaton = if patterns.is_empty() {
            None
        } else {
            match AhoCorasick::new(&patterns) {
                Ok(ac) => {
                    trace!(count = patterns.len(), "trigger automaton built");
                    Some(ac)
                }
                Err(e) => {
                    error!(error = %e, "failed to build trigger automaton, using ordered scan");
                    None
                }
            }
        };

        Self {
            knowledge,
            automaton,
            pattern_owner,
        }
    }

    pub fn knowledge(&self) -> &Arc<KnowledgeBase> {
        &self.knowledge
    }

    /// Classify `text`.  Empty or unmatched text yields [`Category::Unknown`].
    pub fn classify(&self, text: &str) -> Category {
        let lowered = text.to_lowercase();

        let hit = match &self.automaton {
            Some(ac) => self.first_declared_match(ac, &lowered),
            None => self.ordered_scan(&lowered),
        };

        match hit {
            Some((idx, trigger)) => {
                let category = self.knowledge.entries()[idx].category;
                debug!(category = %category, trigger = %trigger, "message classified");
                category
            }
            None => {
                debug!("no trigger matched");
                Category::Unknown
            }
        }
    }

    /// Lowest entry index among all (overlapping) trigger occurrences.
    fn first_declared_match<'a>(
        &'a self,
        ac: &AhoCorasick,
        lowered: &str,
    ) -> Option<(usize, &'a str)> {
        let mut best: Option<(usize, usize)> = None; // (entry_index, pattern_index)

        for mat in ac.find_overlapping_iter(lowered) {
            let pattern = mat.pattern().as_usize();
            let owner = self.pattern_owner[pattern];
            if best.is_none_or(|(current, _)| owner < current) {
                best = Some((owner, pattern));
                if owner == 0 {
                    break;
                }
            }
        }

        best.map(|(owner, pattern)| (owner, self.trigger_at(pattern)))
    }

    /// Plain ordered scan: first entry with any contained trigger.
    fn ordered_scan<'a>(&'a self, lowered: &str) -> Option<(usize, &'a str)> {
        self.knowledge
            .entries()
            .iter()
            .enumerate()
            .find_map(|(idx, entry)| {
                entry
                    .triggers
                    .iter()
                    .find(|t| lowered.contains(t.as_str()))
                    .map(|t| (idx, t.as_str()))
            })
    }

    fn trigger_at(&self, pattern: usize) -> &str {
        let owner = self.pattern_owner[pattern];
        let offset = self.pattern_owner[..pattern]
            .iter()
            .filter(|&&o| o == owner)
            .count();
        &self.knowledge.entries()[owner].triggers[offset]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
