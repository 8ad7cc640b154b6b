// Presentation: turns model records into aligned tables and task detail
// views, written through an `Output` sink.

use crate::alias::AliasEntry;
use crate::model::{Folder, Space, Task, TaskList};
use crate::output::{Output, Tone};
use crate::parse::{format_due_date, format_time_estimate};
use unicode_width::UnicodeWidthStr;

const EMPTY_CELL: &str = "-";

pub struct Table {
    title: String,
    headers: Vec<String>,
    rows: Vec<Vec<(String, Tone)>>,
}

impl Table {
    pub fn new(title: &str, headers: &[&str]) -> Self {
        Table {
            title: title.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.toned_row(cells.into_iter().map(|c| (c.into(), Tone::Plain)));
    }

    /// Like `row`, but each cell keeps its own tone. Blank cells become a
    /// plain dash.
    pub fn toned_row<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = (String, Tone)>,
    {
        let blank = || (EMPTY_CELL.to_string(), Tone::Plain);
        let mut row: Vec<(String, Tone)> = cells
            .into_iter()
            .map(|(c, tone)| if c.is_empty() { blank() } else { (c, tone) })
            .collect();
        row.resize_with(self.headers.len(), blank);
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                self.rows
                    .iter()
                    .map(|r| r[i].0.width())
                    .chain(std::iter::once(h.width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn write_to(&self, out: &mut dyn Output) {
        let widths = self.widths();
        let header = self
            .headers
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{cell}{}", " ".repeat(w - cell.width())))
            .collect::<Vec<_>>()
            .join("  ");

        out.styled(&self.title, Tone::Bold);
        out.styled(header.trim_end(), Tone::Bold);
        let rule = widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  ");
        out.styled(&rule, Tone::Dim);
        for row in &self.rows {
            let last = row.len().saturating_sub(1);
            let mut parts = Vec::with_capacity(row.len() * 2);
            for (i, ((cell, tone), w)) in row.iter().zip(&widths).enumerate() {
                parts.push((cell.clone(), *tone));
                if i < last {
                    parts.push((" ".repeat(w - cell.width() + 2), Tone::Plain));
                }
            }
            out.spans(&parts);
        }
    }
}

fn id_name_table<'a>(
    out: &mut dyn Output,
    title: &str,
    items: impl Iterator<Item = (&'a str, &'a str)>,
) {
    let mut table = Table::new(title, &["ID", "Name"]);
    for (id, name) in items {
        table.row([id, name]);
    }
    table.write_to(out);
}

pub fn print_spaces(out: &mut dyn Output, spaces: &[Space]) {
    id_name_table(out, "Spaces", spaces.iter().map(|s| (s.id.as_str(), s.name.as_str())));
}

pub fn print_folders(out: &mut dyn Output, folders: &[Folder]) {
    id_name_table(out, "Folders", folders.iter().map(|f| (f.id.as_str(), f.name.as_str())));
}

pub fn print_lists(out: &mut dyn Output, lists: &[TaskList]) {
    id_name_table(out, "Lists", lists.iter().map(|l| (l.id.as_str(), l.name.as_str())));
}

/// urgent red, high yellow, normal blue, low dim.
fn priority_tone(priority: Option<&str>) -> Tone {
    match priority {
        Some("urgent") => Tone::Error,
        Some("high") => Tone::Warning,
        Some("normal") => Tone::Info,
        Some("low") => Tone::Dim,
        _ => Tone::Plain,
    }
}

pub fn print_tasks(out: &mut dyn Output, tasks: &[Task]) {
    let mut table = Table::new(
        "Tasks",
        &[
            "ID", "Name", "Status", "Priority", "Assignees", "Due Date", "Estimate", "Tags",
        ],
    );
    for t in tasks {
        let plain = |cell: String| (cell, Tone::Plain);
        table.toned_row([
            plain(t.id.clone()),
            plain(t.name.clone()),
            plain(t.status.clone()),
            (
                t.priority.clone().unwrap_or_default(),
                priority_tone(t.priority.as_deref()),
            ),
            plain(t.assignees.join(", ")),
            plain(format_due_date(t.due_date.as_deref())),
            plain(format_time_estimate(t.time_estimate)),
            plain(t.tags.join(", ")),
        ]);
    }
    table.write_to(out);
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        EMPTY_CELL
    } else {
        value
    }
}

pub fn print_task_detail(out: &mut dyn Output, task: &Task) {
    out.line("");
    out.styled(&format!("{}  ({})", task.name, task.id), Tone::Bold);
    out.line(&format!("  Status:    {}", or_dash(&task.status)));
    out.line(&format!(
        "  Priority:  {}",
        task.priority.as_deref().unwrap_or(EMPTY_CELL)
    ));
    out.line(&format!("  Assignees: {}", or_dash(&task.assignees.join(", "))));
    out.line(&format!(
        "  Due Date:  {}",
        format_due_date(task.due_date.as_deref())
    ));
    out.line(&format!(
        "  Estimate:  {}",
        format_time_estimate(task.time_estimate)
    ));
    out.line(&format!("  Tags:      {}", or_dash(&task.tags.join(", "))));
    if !task.description.is_empty() {
        out.line("");
        out.line(&format!("  {}", task.description));
    }
    if !task.url.is_empty() {
        out.line("");
        out.styled(&format!("  {}", task.url), Tone::Dim);
    }
    out.line("");
}

pub fn print_aliases(out: &mut dyn Output, aliases: &[AliasEntry]) {
    let mut table = Table::new("Aliases", &["Name", "Type", "ID"]);
    for a in aliases {
        table.row([format!("@{}", a.name), a.kind.clone(), a.id.clone()]);
    }
    table.write_to(out);
}

pub fn print_config(out: &mut dyn Output, entries: &[(String, String)]) {
    let mut table = Table::new("ClickUp CLI Config", &["Key", "Value"]);
    for (key, value) in entries {
        table.row([key.as_str(), value.as_str()]);
    }
    table.write_to(out);
}
