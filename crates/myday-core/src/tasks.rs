use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::TaskError;
use crate::ids::TaskId;

/// A single to-do item as stored and as sent over the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Body of a create request. The title is taken verbatim; blank titles are
/// the client's concern.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// A single-column mutation of an existing task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateTask {
    Title { title: String },
    Status { completed: bool },
}

impl UpdateTask {
    pub fn title(title: impl Into<String>) -> Self {
        Self::Title {
            title: title.into(),
        }
    }

    pub fn status(completed: bool) -> Self {
        Self::Status { completed }
    }

    /// Column touched by this update, for logging.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Title { .. } => "title",
            Self::Status { .. } => "isCompleted",
        }
    }
}

/// Wire shape of an update body: `{ "title": .. }` or `{ "isCompleted": .. }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        rename = "isCompleted",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_completed: Option<bool>,
}

impl From<UpdateTask> for UpdateTaskBody {
    fn from(update: UpdateTask) -> Self {
        match update {
            UpdateTask::Title { title } => Self {
                title: Some(title),
                is_completed: None,
            },
            UpdateTask::Status { completed } => Self {
                title: None,
                is_completed: Some(completed),
            },
        }
    }
}

/// A present `title` selects a title update and wins over `isCompleted`.
/// A body carrying neither key is rejected rather than guessed at.
impl TryFrom<UpdateTaskBody> for UpdateTask {
    type Error = TaskError;

    fn try_from(body: UpdateTaskBody) -> Result<Self, Self::Error> {
        match (body.title, body.is_completed) {
            (Some(title), _) => Ok(Self::Title { title }),
            (None, Some(completed)) => Ok(Self::Status { completed }),
            (None, None) => Err(TaskError::InvalidInput(
                "update requires either `title` or `isCompleted`".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Task {
        Task {
            id: TaskId::new(1),
            title: "Buy milk".into(),
            is_completed: false,
            created_at: Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap(),
        }
    }

    #[test]
    fn task_uses_camel_case_completion_key() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Buy milk");
        assert_eq!(json["isCompleted"], false);
        assert!(json.get("is_completed").is_none());
        assert!(json["created_at"].as_str().unwrap().starts_with("2026-10-19T08:30:00"));
    }

    #[test]
    fn title_body_becomes_title_update() {
        let body: UpdateTaskBody = serde_json::from_str(r#"{"title":"Buy oat milk"}"#).unwrap();
        assert_eq!(
            UpdateTask::try_from(body).unwrap(),
            UpdateTask::title("Buy oat milk")
        );
    }

    #[test]
    fn status_body_becomes_status_update() {
        let body: UpdateTaskBody = serde_json::from_str(r#"{"isCompleted":true}"#).unwrap();
        assert_eq!(UpdateTask::try_from(body).unwrap(), UpdateTask::status(true));
    }

    #[test]
    fn empty_title_is_still_a_title_update() {
        let body: UpdateTaskBody = serde_json::from_str(r#"{"title":""}"#).unwrap();
        assert_eq!(UpdateTask::try_from(body).unwrap(), UpdateTask::title(""));
    }

    #[test]
    fn title_wins_when_both_present() {
        let body: UpdateTaskBody =
            serde_json::from_str(r#"{"title":"x","isCompleted":true}"#).unwrap();
        assert_eq!(UpdateTask::try_from(body).unwrap(), UpdateTask::title("x"));
    }

    #[test]
    fn null_title_counts_as_absent() {
        let body: UpdateTaskBody =
            serde_json::from_str(r#"{"title":null,"isCompleted":true}"#).unwrap();
        assert_eq!(UpdateTask::try_from(body).unwrap(), UpdateTask::status(true));

        let body: UpdateTaskBody = serde_json::from_str(r#"{"title":null}"#).unwrap();
        assert!(matches!(
            UpdateTask::try_from(body),
            Err(TaskError::InvalidInput(_))
        ));
    }

    #[test]
    fn empty_body_is_rejected() {
        let body: UpdateTaskBody = serde_json::from_str("{}").unwrap();
        let err = UpdateTask::try_from(body).unwrap_err();
        assert!(matches!(err, TaskError::InvalidInput(_)));
    }

    #[test]
    fn update_converts_back_to_wire_body() {
        let body = UpdateTaskBody::from(UpdateTask::status(false));
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"isCompleted":false}"#);
        let body = UpdateTaskBody::from(UpdateTask::title("a"));
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"title":"a"}"#);
    }

    #[test]
    fn column_names() {
        assert_eq!(UpdateTask::title("t").column(), "title");
        assert_eq!(UpdateTask::status(true).column(), "isCompleted");
    }
}
