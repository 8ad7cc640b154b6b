// Aliases: short user-chosen names (`@sprint`) standing in for a space,
// folder or list id. They live in the config file as "<type>:<id>".

use crate::config::Config;
use crate::error::{Error, Result};
use std::fmt;

pub const ALIAS_MARKER: char = '@';
const SEPARATOR: char = ':';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Space,
    Folder,
    List,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Space => "space",
            ResourceKind::Folder => "folder",
            ResourceKind::List => "list",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of `alias list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    pub name: String,
    pub kind: String,
    pub id: String,
}

fn split_target<'a>(name: &str, target: &'a str) -> Result<(&'a str, &'a str)> {
    target.split_once(SEPARATOR).ok_or_else(|| {
        Error::ConfigInvalid(format!(
            "Alias '@{name}' is malformed ('{target}'); expected '<type>:<id>'."
        ))
    })
}

/// Turn a command-line id argument into a concrete id.
///
/// Anything not starting with `@` is taken as a literal id. Otherwise the
/// alias must exist and, when `expected` is given, point at that kind of
/// resource.
pub fn resolve_alias(
    config: &Config,
    token: &str,
    expected: Option<ResourceKind>,
) -> Result<String> {
    let Some(name) = token.strip_prefix(ALIAS_MARKER) else {
        return Ok(token.to_string());
    };
    let target = config
        .aliases
        .get(name)
        .ok_or_else(|| Error::AliasNotFound(name.to_string()))?;
    let (kind, id) = split_target(name, target)?;

    if let Some(expected) = expected {
        if kind != expected.as_str() {
            return Err(Error::AliasTypeMismatch {
                name: name.to_string(),
                actual: kind.to_string(),
                expected: expected.to_string(),
            });
        }
    }
    log::debug!("resolved @{name} to {kind} {id}");
    Ok(id.to_string())
}

/// Record `name` for exactly one of the given ids, replacing any previous
/// target for that name. Returns the kind and id that were stored.
pub fn set_alias(
    config: &mut Config,
    name: &str,
    space_id: Option<&str>,
    folder_id: Option<&str>,
    list_id: Option<&str>,
) -> Result<(ResourceKind, String)> {
    let provided: Vec<(ResourceKind, &str)> = [
        (ResourceKind::Space, space_id),
        (ResourceKind::Folder, folder_id),
        (ResourceKind::List, list_id),
    ]
    .into_iter()
    .filter_map(|(kind, id)| id.filter(|id| !id.is_empty()).map(|id| (kind, id)))
    .collect();

    let [(kind, id)] = provided.as_slice() else {
        return Err(Error::Validation(
            "Provide exactly one of --space-id, --folder-id, or --list-id.".into(),
        ));
    };
    if name.is_empty() {
        return Err(Error::Validation("Alias name must not be empty.".into()));
    }

    config
        .aliases
        .insert(name.to_string(), format!("{kind}{SEPARATOR}{id}"));
    Ok((*kind, id.to_string()))
}

pub fn remove_alias(config: &mut Config, name: &str) -> Result<()> {
    config
        .aliases
        .remove(name)
        .map(|_| ())
        .ok_or_else(|| Error::AliasNotFound(name.to_string()))
}

/// All aliases sorted by name.
pub fn list_aliases(config: &Config) -> Result<Vec<AliasEntry>> {
    config
        .aliases
        .iter()
        .map(|(name, target)| {
            let (kind, id) = split_target(name, target)?;
            Ok(AliasEntry {
                name: name.clone(),
                kind: kind.to_string(),
                id: id.to_string(),
            })
        })
        .collect()
}
