//! The local knowledge base: keyword table and canned replies.
//!
//! A [`KnowledgeBase`] is built once at startup (either the built-in MUIV
//! table or a TOML file) and then shared read-only behind an `Arc`.  Entry
//! order is declaration order, which the classifier uses to break ties.
//!
//! # File format
//!
//! ```toml
//! greeting = "Здравствуйте!"
//! fallback = "Не понял вопрос."
//!
//! [[category]]
//! label = "расписание"
//! triggers = ["расписание", "пары"]
//! reply = "Расписание в личном кабинете."
//! ```
//!
//! Known categories missing from the file keep their built-in reply and get
//! no triggers.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::category::Category;
use crate::error::{IntentError, Result};

// ---------------------------------------------------------------------------
// Built-in content
// ---------------------------------------------------------------------------

const SCHEDULE_REPLY: &str = "Расписание занятий доступно в личном кабинете студента. \
К сожалению, сейчас я не могу показать его напрямую, так как работаю в демо-режиме.";

const CONTACTS_REPLY: &str = "Контактная информация университета:\n\
Телефон: +7 (495) 500-03-63\n\
E-mail: info@muiv.ru\n\
Адрес: 115432, г. Москва, 2-й Кожуховский проезд, д. 12, стр. 1";

const LIBRARY_REPLY: &str = "Электронная библиотека университета содержит более 10,000 \
учебных материалов. Для доступа необходимо авторизоваться через личный кабинет.";

const EXAMS_REPLY: &str = "Информация о сессии и расписание экзаменов публикуется \
в личном кабинете за месяц до начала сессии.";

const GENERAL_REPLY: &str =
    "Я виртуальный ассистент Московского университета имени С.Ю. Витте. Чем могу помочь?";

/// Local reply for messages nothing understood.
pub const DEFAULT_FALLBACK: &str =
    "Извините, я не совсем понял ваш вопрос. Можете, пожалуйста, переформулировать его?";

/// Opening line shown when a conversation starts.
pub const DEFAULT_GREETING: &str = "Здравствуйте! Я ваш персональный ассистент \
Московского университета имени С.Ю. Витте. Чем могу помочь?";

fn builtin_triggers(category: Category) -> &'static [&'static str] {
    match category {
        Category::Schedule => &["расписание", "пары", "занятия", "лекции"],
        Category::Contacts => &["контакт", "телефон", "почта", "email", "связаться"],
        Category::Library => &["библиотека", "книги", "учебники", "материалы"],
        Category::Exams => &["экзамен", "сессия", "зачет", "тест"],
        Category::General => &["привет", "здравствуйте", "пока", "спасибо"],
        Category::Unknown => &[],
    }
}

fn builtin_reply(category: Category) -> &'static str {
    match category {
        Category::Schedule => SCHEDULE_REPLY,
        Category::Contacts => CONTACTS_REPLY,
        Category::Library => LIBRARY_REPLY,
        Category::Exams => EXAMS_REPLY,
        Category::General => GENERAL_REPLY,
        Category::Unknown => DEFAULT_FALLBACK,
    }
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One category's triggers and reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeEntry {
    pub category: Category,
    /// Lowercase trigger substrings.
    pub triggers: Vec<String>,
    pub reply: String,
}

/// Immutable keyword and response tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
    fallback: String,
    greeting: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct KnowledgeFile {
    greeting: Option<String>,
    fallback: Option<String>,
    #[serde(default, rename = "category")]
    categories: Vec<CategoryFile>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CategoryFile {
    label: String,
    #[serde(default)]
    triggers: Vec<String>,
    reply: Option<String>,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KnowledgeBase {
    /// The built-in MUIV table.
    pub fn builtin() -> Self {
        let entries = Category::KNOWN
            .into_iter()
            .map(|category| KnowledgeEntry {
                category,
                triggers: builtin_triggers(category)
                    .iter()
                    .map(|t| (*t).to_owned())
                    .collect(),
                reply: builtin_reply(category).to_owned(),
            })
            .collect();

        Self {
            entries,
            fallback: DEFAULT_FALLBACK.to_owned(),
            greeting: DEFAULT_GREETING.to_owned(),
        }
    }

    /// Build from explicit entries.
    ///
    /// Entries are validated the same way as file contents: no `unknown`
    /// entry, no duplicates, no blank triggers or replies.  Triggers are
    /// lowercased.
    pub fn from_entries(
        entries: Vec<KnowledgeEntry>,
        fallback: impl Into<String>,
        greeting: impl Into<String>,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut validated = Vec::with_capacity(entries.len());

        for entry in entries {
            let label = entry.category.label();
            if !entry.category.is_known() {
                return Err(IntentError::InvalidCategory {
                    label: label.to_owned(),
                });
            }
            if !seen.insert(entry.category) {
                return Err(IntentError::DuplicateCategory {
                    label: label.to_owned(),
                });
            }
            if entry.reply.trim().is_empty() {
                return Err(IntentError::EmptyReply {
                    label: label.to_owned(),
                });
            }

            let mut triggers = Vec::with_capacity(entry.triggers.len());
            for trigger in entry.triggers {
                if trigger.trim().is_empty() {
                    return Err(IntentError::EmptyTrigger {
                        label: label.to_owned(),
                    });
                }
                triggers.push(trigger.to_lowercase());
            }

            validated.push(KnowledgeEntry {
                category: entry.category,
                triggers,
                reply: entry.reply,
            });
        }

        // Every known category must resolve to something.
        for category in Category::KNOWN {
            if !seen.contains(&category) {
                validated.push(KnowledgeEntry {
                    category,
                    triggers: Vec::new(),
                    reply: builtin_reply(category).to_owned(),
                });
            }
        }

        let fallback = fallback.into();
        if fallback.trim().is_empty() {
            return Err(IntentError::EmptyReply {
                label: Category::Unknown.label().to_owned(),
            });
        }

        Ok(Self {
            entries: validated,
            fallback,
            greeting: greeting.into(),
        })
    }

    /// Parse a knowledge base from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: KnowledgeFile = toml::from_str(text)?;

        let entries = file
            .categories
            .into_iter()
            .map(|c| -> Result<KnowledgeEntry> {
                let category: Category = c.label.parse()?;
                Ok(KnowledgeEntry {
                    category,
                    triggers: c.triggers,
                    reply: c
                        .reply
                        .unwrap_or_else(|| builtin_reply(category).to_owned()),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_entries(
            entries,
            file.fallback.unwrap_or_else(|| DEFAULT_FALLBACK.to_owned()),
            file.greeting.unwrap_or_else(|| DEFAULT_GREETING.to_owned()),
        )
    }

    /// Load a knowledge base file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| IntentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let kb = Self::from_toml_str(&text)?;
        info!(
            path = %path.display(),
            categories = kb.entries.len(),
            triggers = kb.trigger_count(),
            "knowledge base loaded"
        );
        Ok(kb)
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    /// Canned reply for `category`; the local fallback for [`Category::Unknown`].
    pub fn resolve(&self, category: Category) -> &str {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.reply.as_str())
            .unwrap_or(self.fallback.as_str())
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    pub fn trigger_count(&self) -> usize {
        self.entries.iter().map(|e| e.triggers.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
