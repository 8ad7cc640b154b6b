// Data model: typed records decoded from ClickUp JSON payloads, and the
// request bodies sent when creating or updating tasks.
//
// Every payload first lands in a `Raw*` struct whose optional fields spell
// out exactly what may be missing; the public records are then built from
// those with the defaulting rules applied once, in one place.

use serde::{Deserialize, Deserializer, Serialize};

/// Top-level account grouping ("team" in the API).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Workspace {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: Option<String>,
    pub email: Option<String>,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("unknown")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Space {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub space_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskList {
    pub id: String,
    pub name: String,
    /// Empty for lists that live directly in a space.
    pub folder_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub status: String,
    pub assignees: Vec<String>,
    pub priority: Option<String>,
    /// Unix epoch milliseconds, kept as the API sends it.
    pub due_date: Option<String>,
    /// Milliseconds.
    pub time_estimate: Option<u64>,
    pub tags: Vec<String>,
    pub description: String,
    pub url: String,
    pub list_id: String,
}

#[derive(Deserialize)]
struct RawRef {
    #[serde(default, deserialize_with = "lenient_string")]
    id: Option<String>,
}

fn ref_id(r: Option<RawRef>) -> String {
    r.and_then(|r| r.id).unwrap_or_default()
}

/// ClickUp is inconsistent about numbers-as-strings (user ids are numbers,
/// due dates are strings); accept either and keep a string.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => format!("{}", f as i64),
    }))
}

#[derive(Deserialize)]
struct RawUser {
    #[serde(default, deserialize_with = "lenient_string")]
    id: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl<'de> Deserialize<'de> for User {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawUser::deserialize(deserializer)?;
        Ok(User {
            id: raw.id.unwrap_or_default(),
            username: raw.username,
            email: raw.email,
        })
    }
}

#[derive(Deserialize)]
struct RawFolder {
    id: String,
    name: String,
    #[serde(default)]
    space: Option<RawRef>,
}

impl<'de> Deserialize<'de> for Folder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawFolder::deserialize(deserializer)?;
        Ok(Folder {
            id: raw.id,
            name: raw.name,
            space_id: ref_id(raw.space),
        })
    }
}

#[derive(Deserialize)]
struct RawTaskList {
    id: String,
    name: String,
    #[serde(default)]
    folder: Option<RawRef>,
}

impl<'de> Deserialize<'de> for TaskList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawTaskList::deserialize(deserializer)?;
        Ok(TaskList {
            id: raw.id,
            name: raw.name,
            folder_id: ref_id(raw.folder),
        })
    }
}

#[derive(Deserialize)]
struct RawStatus {
    #[serde(default)]
    status: Option<String>,
}

#[derive(Deserialize)]
struct RawAssignee {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Deserialize)]
struct RawPriority {
    #[serde(default)]
    priority: Option<String>,
}

#[derive(Deserialize)]
struct RawTag {
    name: String,
}

#[derive(Deserialize)]
struct RawTask {
    id: String,
    name: String,
    #[serde(default)]
    status: Option<RawStatus>,
    #[serde(default)]
    assignees: Option<Vec<RawAssignee>>,
    #[serde(default)]
    priority: Option<RawPriority>,
    #[serde(default, deserialize_with = "lenient_string")]
    due_date: Option<String>,
    #[serde(default)]
    time_estimate: Option<u64>,
    #[serde(default)]
    tags: Option<Vec<RawTag>>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    list: Option<RawRef>,
}

impl From<RawTask> for Task {
    fn from(raw: RawTask) -> Self {
        Task {
            id: raw.id,
            name: raw.name,
            status: raw.status.and_then(|s| s.status).unwrap_or_default(),
            assignees: raw
                .assignees
                .unwrap_or_default()
                .into_iter()
                .map(|a| a.username.or(a.email).unwrap_or_default())
                .collect(),
            priority: raw.priority.and_then(|p| p.priority),
            due_date: raw.due_date,
            time_estimate: raw.time_estimate,
            tags: raw
                .tags
                .unwrap_or_default()
                .into_iter()
                .map(|t| t.name)
                .collect(),
            description: raw.description.unwrap_or_default(),
            url: raw.url.unwrap_or_default(),
            list_id: ref_id(raw.list),
        }
    }
}

impl<'de> Deserialize<'de> for Task {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawTask::deserialize(deserializer).map(Task::from)
    }
}

/// Body of `POST /list/{id}/task`. Assignees is the full list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_estimate: Option<u64>,
}

/// Assignee change on update. The API takes a delta here, unlike create.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssigneeDelta {
    pub add: Vec<i64>,
}

/// Body of `PUT /task/{id}`; only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<AssigneeDelta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_estimate: Option<u64>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        *self == TaskPatch::default()
    }
}

/// Query filters for task listings; empty vectors are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilters {
    pub statuses: Vec<String>,
    pub assignees: Vec<String>,
}

impl TaskFilters {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let statuses = self.statuses.iter().map(|s| ("statuses[]", s.clone()));
        let assignees = self.assignees.iter().map(|a| ("assignees[]", a.clone()));
        statuses.chain(assignees).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn task_with_only_required_fields() {
        let task: Task = serde_json::from_value(json!({"id": "86a", "name": "Write docs"})).unwrap();
        assert_eq!(task.id, "86a");
        assert_eq!(task.status, "");
        assert!(task.assignees.is_empty());
        assert!(task.tags.is_empty());
        assert_eq!(task.priority, None);
        assert_eq!(task.due_date, None);
        assert_eq!(task.time_estimate, None);
        assert_eq!(task.description, "");
        assert_eq!(task.list_id, "");
    }

    #[test]
    fn task_with_nulls_uses_defaults() {
        let task: Task = serde_json::from_value(json!({
            "id": "86b",
            "name": "Nulls",
            "priority": null,
            "due_date": null,
            "time_estimate": null,
            "description": null,
            "tags": [],
            "assignees": []
        }))
        .unwrap();
        assert_eq!(task.priority, None);
        assert_eq!(task.description, "");
    }

    #[test]
    fn full_task_payload() {
        let task: Task = serde_json::from_value(json!({
            "id": "86c",
            "name": "Ship it",
            "status": {"status": "in progress", "color": "#fff"},
            "assignees": [
                {"id": 1, "username": "ana", "email": "ana@example.com"},
                {"id": 2, "username": null, "email": "bo@example.com"}
            ],
            "priority": {"id": "2", "priority": "high"},
            "due_date": "1767225600000",
            "time_estimate": 5400000,
            "tags": [{"name": "backend"}, {"name": "urgent-fix"}],
            "description": "details",
            "url": "https://app.clickup.com/t/86c",
            "list": {"id": "901"}
        }))
        .unwrap();
        assert_eq!(task.status, "in progress");
        assert_eq!(task.assignees, vec!["ana", "bo@example.com"]);
        assert_eq!(task.priority.as_deref(), Some("high"));
        assert_eq!(task.due_date.as_deref(), Some("1767225600000"));
        assert_eq!(task.time_estimate, Some(5_400_000));
        assert_eq!(task.tags, vec!["backend", "urgent-fix"]);
        assert_eq!(task.list_id, "901");
    }

    #[test]
    fn numeric_due_date_is_stringified() {
        let task: Task =
            serde_json::from_value(json!({"id": "1", "name": "n", "due_date": 1700000000000i64}))
                .unwrap();
        assert_eq!(task.due_date.as_deref(), Some("1700000000000"));
    }

    #[test]
    fn task_without_id_fails() {
        assert!(serde_json::from_value::<Task>(json!({"name": "no id"})).is_err());
    }

    #[test]
    fn folder_and_list_back_references() {
        let folder: Folder = serde_json::from_value(json!({"id": "f1", "name": "Eng"})).unwrap();
        assert_eq!(folder.space_id, "");
        let folder: Folder =
            serde_json::from_value(json!({"id": "f1", "name": "Eng", "space": {"id": "s9"}}))
                .unwrap();
        assert_eq!(folder.space_id, "s9");

        let list: TaskList = serde_json::from_value(json!({"id": "l1", "name": "Backlog"})).unwrap();
        assert_eq!(list.folder_id, "");
    }

    #[test]
    fn user_display_name_falls_back() {
        let user: User = serde_json::from_value(json!({"id": 7, "username": null, "email": "x@y.z"}))
            .unwrap();
        assert_eq!(user.id, "7");
        assert_eq!(user.display_name(), "x@y.z");
    }

    #[test]
    fn draft_and_patch_bodies() {
        let draft = TaskDraft {
            name: "New".into(),
            assignees: vec![42],
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({"name": "New", "assignees": [42]})
        );

        let patch = TaskPatch {
            assignees: Some(AssigneeDelta { add: vec![42] }),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"assignees": {"add": [42]}})
        );
        assert!(TaskPatch::default().is_empty());
        assert!(!patch.is_empty());
    }

    #[test]
    fn filters_omit_empty() {
        assert!(TaskFilters::default().query_pairs().is_empty());
        let filters = TaskFilters {
            statuses: vec!["open".into()],
            assignees: vec!["12".into(), "13".into()],
        };
        assert_eq!(
            filters.query_pairs(),
            vec![
                ("statuses[]", "open".to_string()),
                ("assignees[]", "12".to_string()),
                ("assignees[]", "13".to_string()),
            ]
        );
    }
}
