// Command handlers: glue between parsed arguments, the config store, the
// API client and the output sink. Handlers return errors instead of
// exiting; `main` decides the exit code.

use crate::alias::{self, ResourceKind};
use crate::api::ApiClient;
use crate::cli::{
    AliasCommand, Command, ConfigCommand, FolderCommand, ListCommand, SpaceCommand, TaskCommand,
    TaskFields,
};
use crate::config::{Config, ConfigStore};
use crate::error::Error;
use crate::model::{AssigneeDelta, TaskDraft, TaskFilters, TaskPatch};
use crate::output::Output;
use crate::parse::{parse_assignee, parse_due_date, parse_time_estimate};
use crate::render;
use crate::ui;
use anyhow::{Context, Result};

/// Everything a command needs besides its arguments.
pub struct App {
    store: ConfigStore,
    base_url: Option<String>,
}

impl App {
    pub fn new(store: ConfigStore) -> Self {
        App {
            store,
            base_url: None,
        }
    }

    /// Point API calls somewhere other than the default base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    fn client_for_token(&self, token: &str) -> Result<ApiClient> {
        let client = match &self.base_url {
            Some(url) => ApiClient::with_base_url(token, url)?,
            None => ApiClient::new(token)?,
        };
        Ok(client)
    }

    fn load(&self) -> Result<Config> {
        Ok(self.store.load()?)
    }

    fn session(&self) -> Result<(Config, ApiClient)> {
        let config = self.load()?;
        let client = self.client_for_token(&config.api_token)?;
        Ok((config, client))
    }

    pub fn run(&self, command: Command, out: &mut dyn Output) -> Result<()> {
        match command {
            Command::Config(cmd) => match cmd {
                ConfigCommand::Init { token } => self.config_init(token, out),
                ConfigCommand::Show => self.config_show(out),
            },
            Command::Alias(cmd) => match cmd {
                AliasCommand::Set {
                    name,
                    space_id,
                    folder_id,
                    list_id,
                } => self.alias_set(
                    &name,
                    space_id.as_deref(),
                    folder_id.as_deref(),
                    list_id.as_deref(),
                    out,
                ),
                AliasCommand::List => self.alias_list(out),
                AliasCommand::Remove { name } => self.alias_remove(&name, out),
            },
            Command::Space(SpaceCommand::List) => self.space_list(out),
            Command::Folder(FolderCommand::List { space_id }) => {
                self.folder_list(space_id.as_deref(), out)
            }
            Command::List(ListCommand::List {
                folder_id,
                space_id,
            }) => self.list_list(folder_id.as_deref(), space_id.as_deref(), out),
            Command::Task(cmd) => match cmd {
                TaskCommand::List {
                    list_id,
                    status,
                    assignee,
                } => self.task_list(&list_id, status, assignee, out),
                TaskCommand::View { task_id, user_id } => {
                    self.task_view(task_id.as_deref(), user_id, out)
                }
                TaskCommand::Create {
                    list_id,
                    name,
                    fields,
                } => self.task_create(&list_id, name, fields, out),
                TaskCommand::Update {
                    task_id,
                    name,
                    fields,
                } => self.task_update(&task_id, name, fields, out),
                TaskCommand::Delete { task_id, yes } => self.task_delete(&task_id, yes, out),
            },
        }
    }

    fn config_init(&self, token: Option<String>, out: &mut dyn Output) -> Result<()> {
        let api_token = match token.filter(|t| !t.trim().is_empty()) {
            Some(t) => t.trim().to_string(),
            None => ui::prompt_token()?,
        };
        let client = self.client_for_token(&api_token)?;

        let user = ui::with_spinner("Checking token...", || client.get_user())?;
        out.line(&format!("Authenticated as: {}", user.display_name()));

        let teams = ui::with_spinner("Fetching workspaces...", || client.get_teams())?;
        let workspace = match teams.len() {
            0 => anyhow::bail!("No workspaces found for this token."),
            1 => {
                out.line(&format!("Using workspace: {}", teams[0].name));
                &teams[0]
            }
            _ => {
                let names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();
                &teams[ui::choose("Select workspace", &names)?]
            }
        };

        // Re-running init refreshes credentials but keeps the alias table.
        let aliases = match self.store.load() {
            Ok(existing) => existing.aliases,
            Err(Error::ConfigMissing(_)) => Default::default(),
            Err(e) => {
                out.warn(&format!("Existing config could not be read; aliases not kept: {e}"));
                Default::default()
            }
        };
        let config = Config {
            api_token,
            user_id: Some(user.id.clone()),
            username: Some(user.display_name().to_string()),
            workspace_id: Some(workspace.id.clone()),
            workspace_name: Some(workspace.name.clone()),
            aliases,
            ..Default::default()
        };
        self.store
            .save(&config)
            .with_context(|| format!("Failed to write {}", self.store.path().display()))?;
        out.success(&format!("Config saved to {}", self.store.path().display()));
        Ok(())
    }

    fn config_show(&self, out: &mut dyn Output) -> Result<()> {
        let config = self.load()?;
        render::print_config(out, &config.display_entries());
        Ok(())
    }

    fn alias_set(
        &self,
        name: &str,
        space_id: Option<&str>,
        folder_id: Option<&str>,
        list_id: Option<&str>,
        out: &mut dyn Output,
    ) -> Result<()> {
        let mut config = self.load()?;
        let (kind, id) = alias::set_alias(&mut config, name, space_id, folder_id, list_id)?;
        self.store.save(&config)?;
        out.success(&format!("Alias '@{name}' set to {kind} {id}."));
        Ok(())
    }

    fn alias_list(&self, out: &mut dyn Output) -> Result<()> {
        let config = self.load()?;
        let entries = alias::list_aliases(&config)?;
        if entries.is_empty() {
            out.warn("No aliases defined. Use 'cl alias set' to create one.");
            return Ok(());
        }
        render::print_aliases(out, &entries);
        Ok(())
    }

    fn alias_remove(&self, name: &str, out: &mut dyn Output) -> Result<()> {
        let mut config = self.load()?;
        alias::remove_alias(&mut config, name)?;
        self.store.save(&config)?;
        out.success(&format!("Alias '@{name}' removed."));
        Ok(())
    }

    fn space_list(&self, out: &mut dyn Output) -> Result<()> {
        let (config, client) = self.session()?;
        let workspace_id = config.workspace_id()?;
        let spaces = ui::with_spinner("Loading spaces...", || client.list_spaces(workspace_id))?;
        render::print_spaces(out, &spaces);
        Ok(())
    }

    /// Ask the user to pick one of the workspace's spaces.
    fn pick_space(&self, config: &Config, client: &ApiClient) -> Result<String> {
        let workspace_id = config.workspace_id()?;
        let spaces = ui::with_spinner("Loading spaces...", || client.list_spaces(workspace_id))?;
        if spaces.is_empty() {
            anyhow::bail!("No spaces found.");
        }
        let labels: Vec<String> = spaces
            .iter()
            .map(|s| format!("{} ({})", s.name, s.id))
            .collect();
        let choice = ui::choose("Select space", &labels)?;
        Ok(spaces[choice].id.clone())
    }

    fn folder_list(&self, space_id: Option<&str>, out: &mut dyn Output) -> Result<()> {
        let (config, client) = self.session()?;
        let space_id = match space_id {
            Some(token) => alias::resolve_alias(&config, token, Some(ResourceKind::Space))?,
            None => self.pick_space(&config, &client)?,
        };
        let folders = ui::with_spinner("Loading folders...", || client.list_folders(&space_id))?;
        render::print_folders(out, &folders);
        Ok(())
    }

    fn list_list(
        &self,
        folder_id: Option<&str>,
        space_id: Option<&str>,
        out: &mut dyn Output,
    ) -> Result<()> {
        let (config, client) = self.session()?;
        let lists = if let Some(token) = folder_id {
            let folder_id = alias::resolve_alias(&config, token, Some(ResourceKind::Folder))?;
            ui::with_spinner("Loading lists...", || client.list_lists(&folder_id))?
        } else if let Some(token) = space_id {
            let space_id = alias::resolve_alias(&config, token, Some(ResourceKind::Space))?;
            ui::with_spinner("Loading lists...", || client.list_folderless_lists(&space_id))?
        } else {
            let space_id = self.pick_space(&config, &client)?;
            let (folders, folderless) = ui::with_spinner("Loading folders...", || {
                Ok((
                    client.list_folders(&space_id)?,
                    client.list_folderless_lists(&space_id)?,
                ))
            })?;
            if folders.is_empty() {
                folderless
            } else {
                let mut labels: Vec<String> = folders.iter().map(|f| f.name.clone()).collect();
                labels.push("[Folderless lists]".to_string());
                let choice = ui::choose("Select folder", &labels)?;
                match folders.get(choice) {
                    Some(folder) => {
                        ui::with_spinner("Loading lists...", || client.list_lists(&folder.id))?
                    }
                    None => folderless,
                }
            }
        };
        render::print_lists(out, &lists);
        Ok(())
    }

    fn task_list(
        &self,
        list_id: &str,
        status: Option<String>,
        assignee: Option<String>,
        out: &mut dyn Output,
    ) -> Result<()> {
        let (config, client) = self.session()?;
        let list_id = alias::resolve_alias(&config, list_id, Some(ResourceKind::List))?;
        let filters = TaskFilters {
            statuses: status.into_iter().collect(),
            assignees: assignee.into_iter().collect(),
        };
        let tasks = ui::with_spinner("Loading tasks...", || client.list_tasks(&list_id, &filters))?;
        render::print_tasks(out, &tasks);
        Ok(())
    }

    fn task_view(
        &self,
        task_id: Option<&str>,
        user_id: Option<String>,
        out: &mut dyn Output,
    ) -> Result<()> {
        let (config, client) = self.session()?;
        if let Some(task_id) = task_id {
            if user_id.is_some() {
                out.warn("Warning: --user is ignored when a task_id is provided.");
            }
            let task = ui::with_spinner("Loading task...", || client.get_task(task_id))?;
            render::print_task_detail(out, &task);
            return Ok(());
        }

        let user_id = match user_id.or_else(|| config.user_id.clone()) {
            Some(id) => id,
            None => {
                return Err(Error::ConfigInvalid(
                    "user_id not found in config. Run 'cl config init'.".into(),
                )
                .into())
            }
        };
        let workspace_id = config.workspace_id()?;
        let filters = TaskFilters {
            assignees: vec![user_id],
            ..Default::default()
        };
        let tasks = ui::with_spinner("Loading tasks...", || {
            client.get_workspace_tasks(workspace_id, &filters)
        })?;
        render::print_tasks(out, &tasks);
        Ok(())
    }

    fn task_create(
        &self,
        list_id: &str,
        name: String,
        fields: TaskFields,
        out: &mut dyn Output,
    ) -> Result<()> {
        let (config, client) = self.session()?;
        let list_id = alias::resolve_alias(&config, list_id, Some(ResourceKind::List))?;
        let draft = build_draft(name, fields)?;
        let task = ui::with_spinner("Creating task...", || client.create_task(&list_id, &draft))?;
        out.success(&format!("Task created: {} ({})", task.name, task.id));
        Ok(())
    }

    fn task_update(
        &self,
        task_id: &str,
        name: Option<String>,
        fields: TaskFields,
        out: &mut dyn Output,
    ) -> Result<()> {
        let patch = build_patch(name, fields)?;
        if patch.is_empty() {
            out.warn("No updates specified.");
            return Ok(());
        }
        let (_, client) = self.session()?;
        let task = ui::with_spinner("Updating task...", || client.update_task(task_id, &patch))?;
        out.success(&format!("Task updated: {} ({})", task.name, task.id));
        Ok(())
    }

    fn task_delete(&self, task_id: &str, yes: bool, out: &mut dyn Output) -> Result<()> {
        let (_, client) = self.session()?;
        if !yes && !ui::confirm("Are you sure you want to delete this task?")? {
            out.warn("Aborted.");
            return Ok(());
        }
        ui::with_spinner("Deleting task...", || client.delete_task(task_id))?;
        out.success(&format!("Task {task_id} deleted."));
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Body for `task create`: assignees is the complete list.
pub fn build_draft(name: String, fields: TaskFields) -> crate::error::Result<TaskDraft> {
    Ok(TaskDraft {
        name,
        description: non_empty(fields.description),
        status: non_empty(fields.status),
        priority: fields.priority,
        assignees: match non_empty(fields.assignee) {
            Some(a) => vec![parse_assignee(&a)?],
            None => Vec::new(),
        },
        due_date: non_empty(fields.due_date)
            .map(|d| parse_due_date(&d))
            .transpose()?,
        tags: fields.tags,
        time_estimate: non_empty(fields.time_estimate)
            .map(|t| parse_time_estimate(&t))
            .transpose()?,
    })
}

/// Body for `task update`: the assignee is added, not substituted.
pub fn build_patch(name: Option<String>, fields: TaskFields) -> crate::error::Result<TaskPatch> {
    Ok(TaskPatch {
        name: non_empty(name),
        description: non_empty(fields.description),
        status: non_empty(fields.status),
        priority: fields.priority,
        assignees: non_empty(fields.assignee)
            .map(|a| parse_assignee(&a).map(|id| AssigneeDelta { add: vec![id] }))
            .transpose()?,
        due_date: non_empty(fields.due_date)
            .map(|d| parse_due_date(&d))
            .transpose()?,
        tags: fields.tags,
        time_estimate: non_empty(fields.time_estimate)
            .map(|t| parse_time_estimate(&t))
            .transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_uses_full_assignee_list() {
        let fields = TaskFields {
            assignee: Some("42".into()),
            time_estimate: Some("2h".into()),
            tags: vec!["ops".into()],
            ..Default::default()
        };
        let draft = build_draft("Deploy".into(), fields).unwrap();
        assert_eq!(draft.assignees, vec![42]);
        assert_eq!(draft.time_estimate, Some(7_200_000));
        assert_eq!(draft.tags, vec!["ops"]);
    }

    #[test]
    fn patch_adds_assignee() {
        let fields = TaskFields {
            assignee: Some("42".into()),
            ..Default::default()
        };
        let patch = build_patch(None, fields).unwrap();
        assert_eq!(patch.assignees, Some(AssigneeDelta { add: vec![42] }));
    }

    #[test]
    fn empty_patch_detected() {
        let patch = build_patch(Some(String::new()), TaskFields::default()).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn bad_estimate_is_validation_error() {
        let fields = TaskFields {
            time_estimate: Some("abc".into()),
            ..Default::default()
        };
        assert!(matches!(
            build_draft("x".into(), fields),
            Err(Error::Validation(_))
        ));
    }
}
