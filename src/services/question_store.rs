// src/services/question_store.rs

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{
        question::{CustomQuestion, MergedQuestion, OPTION_COUNT, Question, QuestionSource},
        subject::Subject,
    },
    questions,
    utils::{
        html::clean_html,
        json_file::{Document, JsonFile},
    },
};

pub const QUESTIONS_FILE: &str = "admin_questions.json";

/// Admin overrides layered on top of the compiled-in question banks.
///
/// Keyed by canonical subject key so the file stays readable and tolerant of
/// keys this build does not know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionsDocument {
    #[serde(default)]
    pub custom: BTreeMap<String, Vec<CustomQuestion>>,
    #[serde(default)]
    pub deleted_base: BTreeMap<String, Vec<String>>,
}

impl Default for QuestionsDocument {
    fn default() -> Self {
        let mut doc = Self {
            custom: BTreeMap::new(),
            deleted_base: BTreeMap::new(),
        };
        doc.normalize();
        doc
    }
}

impl Document for QuestionsDocument {
    fn normalize(&mut self) {
        for subject in Subject::ALL {
            self.custom.entry(subject.key().to_string()).or_default();
            self.deleted_base.entry(subject.key().to_string()).or_default();
        }
    }
}

impl QuestionsDocument {
    fn custom_mut(&mut self, subject: Subject) -> &mut Vec<CustomQuestion> {
        self.custom.entry(subject.key().to_string()).or_default()
    }

    fn deleted_mut(&mut self, subject: Subject) -> &mut Vec<String> {
        self.deleted_base.entry(subject.key().to_string()).or_default()
    }
}

/// Positional id of a base question.
pub fn base_qid(index: usize) -> String {
    format!("base-{}", index)
}

/// Defensive copy of a subject's compiled-in questions. Unknown subjects have
/// none.
pub fn base_questions(subject: &str) -> Vec<Question> {
    Subject::parse(subject)
        .map(|s| questions::base_questions(s).iter().map(Question::from).collect())
        .unwrap_or_default()
}

/// Effective question list: surviving base questions in their canonical order,
/// then custom questions in insertion order.
pub fn merge_questions(subject: Subject, doc: &QuestionsDocument) -> Vec<MergedQuestion> {
    let deleted: HashSet<&str> = doc
        .deleted_base
        .get(subject.key())
        .map(|ids| ids.iter().map(String::as_str).collect())
        .unwrap_or_default();

    let base = questions::base_questions(subject)
        .iter()
        .enumerate()
        .map(|(index, q)| (base_qid(index), q))
        .filter(|(qid, _)| !deleted.contains(qid.as_str()))
        .map(|(qid, q)| MergedQuestion {
            qid,
            source: QuestionSource::Base,
            body: Question::from(q),
        });

    let custom = doc
        .custom
        .get(subject.key())
        .into_iter()
        .flatten()
        .map(|c| MergedQuestion {
            qid: c.qid.clone(),
            source: QuestionSource::Custom,
            body: c.body.clone(),
        });

    base.chain(custom).collect()
}

/// Checks and sanitizes an admin-submitted question.
pub fn build_custom_question(
    text: &str,
    options: [&str; OPTION_COUNT],
    answer: i64,
    explanation: &str,
) -> AppResult<CustomQuestion> {
    let text = clean_html(text);
    let options: Vec<String> = options.iter().map(|o| clean_html(o)).collect();

    if text.is_empty() || options.iter().any(|o| o.is_empty()) {
        return Err(AppError::Validation(
            "Question and all 4 options are required.".to_string(),
        ));
    }

    let answer = usize::try_from(answer)
        .ok()
        .filter(|a| *a < OPTION_COUNT)
        .ok_or_else(|| AppError::Validation("Select a valid correct option.".to_string()))?;

    let hex = uuid::Uuid::new_v4().simple().to_string();
    Ok(CustomQuestion {
        qid: format!("custom-{}", &hex[..10]),
        body: Question {
            question: text,
            options,
            answer,
            explanation: clean_html(explanation),
        },
    })
}

/// Base questions merged with the admin override document on disk.
#[derive(Debug)]
pub struct QuestionStore {
    file: JsonFile,
}

impl QuestionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            file: JsonFile::new(data_dir.join(QUESTIONS_FILE)),
        }
    }

    pub async fn document(&self) -> AppResult<QuestionsDocument> {
        self.file.load().await
    }

    pub async fn merged_questions(&self, subject: Subject) -> AppResult<Vec<MergedQuestion>> {
        let doc = self.document().await?;
        Ok(merge_questions(subject, &doc))
    }

    /// Up to `count` distinct merged questions in random order.
    pub async fn sample_questions(
        &self,
        subject: Subject,
        count: usize,
    ) -> AppResult<Vec<MergedQuestion>> {
        let mut merged = self.merged_questions(subject).await?;
        merged.shuffle(&mut rand::thread_rng());
        merged.truncate(count);
        Ok(merged)
    }

    /// Effective question count per subject, in catalogue order.
    pub async fn question_counts(&self) -> AppResult<Vec<(Subject, usize)>> {
        let doc = self.document().await?;
        Ok(Subject::ALL
            .iter()
            .map(|s| (*s, merge_questions(*s, &doc).len()))
            .collect())
    }

    pub async fn add_custom_question(
        &self,
        subject: Subject,
        text: &str,
        options: [&str; OPTION_COUNT],
        answer: i64,
        explanation: &str,
    ) -> AppResult<CustomQuestion> {
        let question = build_custom_question(text, options, answer, explanation)?;

        self.file
            .update(|doc: &mut QuestionsDocument| {
                doc.custom_mut(subject).push(question.clone());
                Ok(((), true))
            })
            .await?;

        tracing::info!("Added custom question {} to {}", question.qid, subject);
        Ok(question)
    }

    /// Soft-deletes a base question or removes a custom one.
    ///
    /// Fails with `NotFound` when the document would not change, including a
    /// repeated delete of the same base id.
    pub async fn delete_question(
        &self,
        subject: Subject,
        qid: &str,
        source: QuestionSource,
    ) -> AppResult<()> {
        let qid = qid.trim();
        if qid.is_empty() {
            return Err(AppError::Validation("Invalid request.".to_string()));
        }

        self.file
            .update(|doc: &mut QuestionsDocument| {
                let changed = match source {
                    QuestionSource::Base => {
                        let deleted = doc.deleted_mut(subject);
                        if deleted.iter().any(|id| id == qid) {
                            false
                        } else {
                            deleted.push(qid.to_string());
                            true
                        }
                    }
                    QuestionSource::Custom => {
                        let custom = doc.custom_mut(subject);
                        let before = custom.len();
                        custom.retain(|q| q.qid != qid);
                        custom.len() != before
                    }
                };

                if changed {
                    Ok(((), true))
                } else {
                    Err(AppError::NotFound("Question not found.".to_string()))
                }
            })
            .await?;

        tracing::info!("Deleted {:?} question {} from {}", source, qid, subject);
        Ok(())
    }
}
