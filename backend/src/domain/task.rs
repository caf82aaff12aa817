//! To-do tasks owned by a signed-in user.
//!
//! A [`Task`] always belongs to exactly one [`UserId`]. Nothing outside the
//! owner's session can list, change or delete it; to everyone else it does
//! not exist.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use uuid::Uuid;

use super::{Error, UserId};

/// Maximum allowed length for a task title, in characters.
pub const TASK_TITLE_MAX: usize = 100;
/// Maximum allowed length for a task description, in characters.
pub const TASK_DESCRIPTION_MAX: usize = 1000;
/// Wire format for due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a task draft was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("description must be at most {max} characters")]
    DescriptionTooLong { max: usize },
    #[error("due date must be a calendar date formatted YYYY-MM-DD")]
    MalformedDueDate,
}

impl TaskValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::EmptyDescription | Self::DescriptionTooLong { .. } => "description",
            Self::MalformedDueDate => "dueDate",
        }
    }
}

/// Server-assigned task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse an identifier taken from a URL. Anything that is not a UUID
    /// names no task.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validated title, description and due date for a new or edited task.
///
/// ## Invariants
/// - Title and description are trimmed, non-empty and within
///   [`TASK_TITLE_MAX`] and [`TASK_DESCRIPTION_MAX`] characters.
///
/// # Examples
/// ```
/// use accounts::domain::TaskDraft;
///
/// let draft = TaskDraft::try_from_parts(" Buy milk ", "Semi-skimmed", "2026-05-01").unwrap();
/// assert_eq!(draft.title(), "Buy milk");
/// assert_eq!(draft.due_date().to_string(), "2026-05-01");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: String,
    due_date: NaiveDate,
}

fn bounded(
    raw: &str,
    max: usize,
    empty: TaskValidationError,
    too_long: TaskValidationError,
) -> Result<String, TaskValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(empty);
    }
    if trimmed.chars().count() > max {
        return Err(too_long);
    }
    Ok(trimmed.to_owned())
}

impl TaskDraft {
    pub fn try_from_parts(
        title: &str,
        description: &str,
        due_date: &str,
    ) -> Result<Self, TaskValidationError> {
        let title = bounded(
            title,
            TASK_TITLE_MAX,
            TaskValidationError::EmptyTitle,
            TaskValidationError::TitleTooLong {
                max: TASK_TITLE_MAX,
            },
        )?;
        let description = bounded(
            description,
            TASK_DESCRIPTION_MAX,
            TaskValidationError::EmptyDescription,
            TaskValidationError::DescriptionTooLong {
                max: TASK_DESCRIPTION_MAX,
            },
        )?;
        let due_date = NaiveDate::parse_from_str(due_date.trim(), DUE_DATE_FORMAT)
            .map_err(|_| TaskValidationError::MalformedDueDate)?;
        Ok(Self {
            title,
            description,
            due_date,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }
}

/// A stored to-do item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    owner: UserId,
    title: String,
    description: String,
    due_date: NaiveDate,
    created_on: DateTime<Utc>,
    completed: bool,
}

impl Task {
    /// A fresh, incomplete task built from a validated draft.
    pub fn new(id: TaskId, owner: UserId, draft: TaskDraft, created_on: DateTime<Utc>) -> Self {
        let TaskDraft {
            title,
            description,
            due_date,
        } = draft;
        Self {
            id,
            owner,
            title,
            description,
            due_date,
            created_on,
            completed: false,
        }
    }

    /// Reassemble a task read back from storage.
    pub fn restore(
        id: TaskId,
        owner: UserId,
        draft: TaskDraft,
        created_on: DateTime<Utc>,
        completed: bool,
    ) -> Self {
        Self {
            completed,
            ..Self::new(id, owner, draft, created_on)
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn created_on(&self) -> DateTime<Utc> {
        self.created_on
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Replace title, description and due date. Completion and creation
    /// time are kept.
    pub fn apply(&mut self, draft: TaskDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.due_date = draft.due_date;
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}

/// Failures raised by the [`TaskBoard`](crate::domain::ports::TaskBoard).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("{0}")]
    Validation(#[from] TaskValidationError),
    /// No task with this id belongs to the caller.
    #[error("task not found")]
    NotFound,
    #[error("task store unavailable: {message}")]
    StorageUnavailable { message: String },
    #[error("task store failed: {message}")]
    Internal { message: String },
}

impl From<TaskError> for Error {
    fn from(value: TaskError) -> Self {
        match value {
            TaskError::Validation(err) => {
                Error::invalid_request(err.to_string()).with_details(json!({ "field": err.field() }))
            }
            TaskError::NotFound => Error::not_found("task not found"),
            TaskError::StorageUnavailable { message } => {
                Error::service_unavailable(format!("task store unavailable: {message}"))
            }
            TaskError::Internal { message } => Error::internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[case("", "d", "2026-05-01", TaskValidationError::EmptyTitle)]
    #[case("   ", "d", "2026-05-01", TaskValidationError::EmptyTitle)]
    #[case("t", " ", "2026-05-01", TaskValidationError::EmptyDescription)]
    #[case("t", "d", "01/05/2026", TaskValidationError::MalformedDueDate)]
    #[case("t", "d", "2026-02-30", TaskValidationError::MalformedDueDate)]
    fn drafts_reject_bad_fields(
        #[case] title: &str,
        #[case] description: &str,
        #[case] due: &str,
        #[case] expected: TaskValidationError,
    ) {
        assert_eq!(
            TaskDraft::try_from_parts(title, description, due),
            Err(expected)
        );
    }

    #[rstest]
    fn length_limits_count_characters() {
        let at_limit = "é".repeat(TASK_TITLE_MAX);
        assert!(TaskDraft::try_from_parts(&at_limit, "d", "2026-05-01").is_ok());

        let over = "x".repeat(TASK_DESCRIPTION_MAX + 1);
        assert_eq!(
            TaskDraft::try_from_parts("t", &over, "2026-05-01"),
            Err(TaskValidationError::DescriptionTooLong {
                max: TASK_DESCRIPTION_MAX
            })
        );
    }

    #[rstest]
    fn edits_keep_completion_and_creation_time() {
        let created = Utc::now();
        let draft = TaskDraft::try_from_parts("a", "b", "2026-05-01").expect("draft");
        let mut task = Task::new(TaskId::random(), UserId::random(), draft, created);
        task.set_completed(true);

        task.apply(TaskDraft::try_from_parts("c", "d", "2026-06-01").expect("draft"));

        assert_eq!(task.title(), "c");
        assert_eq!(task.due_date().to_string(), "2026-06-01");
        assert!(task.is_completed());
        assert_eq!(task.created_on(), created);
    }

    #[rstest]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", true)]
    #[case("64b7f0c2e4b0a1a2b3c4d5e6", false)]
    #[case("", false)]
    fn ids_parse_only_uuids(#[case] raw: &str, #[case] parses: bool) {
        assert_eq!(TaskId::parse(raw).is_some(), parses);
    }

    #[rstest]
    #[case(TaskError::NotFound, ErrorCode::NotFound)]
    #[case(TaskError::Validation(TaskValidationError::EmptyTitle), ErrorCode::InvalidRequest)]
    #[case(TaskError::StorageUnavailable { message: "x".into() }, ErrorCode::ServiceUnavailable)]
    #[case(TaskError::Internal { message: "x".into() }, ErrorCode::InternalError)]
    fn task_errors_map_to_codes(#[case] err: TaskError, #[case] expected: ErrorCode) {
        assert_eq!(Error::from(err).code(), expected);
    }

    #[rstest]
    fn validation_errors_name_the_wire_field() {
        let err = Error::from(TaskError::from(TaskValidationError::MalformedDueDate));
        assert_eq!(err.details(), Some(&json!({ "field": "dueDate" })));
    }
}
