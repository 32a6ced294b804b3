//! The five table actions as plain functions over the current inventory and
//! the user's input. Handlers return the replacement list (if any) and an
//! effect describing what happened; they never prompt or print.

use crate::core::inventory::Inventory;
use crate::domain::model::{Part, PartInput};
use crate::domain::ports::Storage;
use crate::formats::{FormatStore, SaveReport};
use crate::utils::error::{Result, ShopError};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Load,
    Add,
    Update,
    Delete,
    Save,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Load,
        Action::Add,
        Action::Update,
        Action::Delete,
        Action::Save,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Action::Load => "load",
            Action::Add => "add",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Save => "save",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Action {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self> {
        Action::ALL
            .into_iter()
            .find(|action| action.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ShopError::invalid_input(format!("Unknown action '{}'", s.trim())))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Load { path: PathBuf },
    Add { input: PartInput },
    /// Replaces the selected record.
    Update { input: PartInput },
    /// Removes the selected record.
    Delete,
    Save { path: PathBuf, format: String },
}

impl Request {
    pub fn action(&self) -> Action {
        match self {
            Request::Load { .. } => Action::Load,
            Request::Add { .. } => Action::Add,
            Request::Update { .. } => Action::Update,
            Request::Delete => Action::Delete,
            Request::Save { .. } => Action::Save,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Loaded {
        path: PathBuf,
        records: usize,
        skipped: usize,
    },
    Added {
        index: usize,
    },
    Updated {
        index: usize,
    },
    Deleted {
        part: Part,
    },
    Saved(SaveReport),
}

impl Effect {
    pub fn message(&self) -> String {
        match self {
            Effect::Loaded {
                path,
                records,
                skipped: 0,
            } => format!("Loaded {} part(s) from {}.", records, path.display()),
            Effect::Loaded {
                path,
                records,
                skipped,
            } => format!(
                "Loaded {} part(s) from {} ({} malformed line(s) skipped).",
                records,
                path.display(),
                skipped
            ),
            Effect::Added { index } => format!("Added row {}.", index + 1),
            Effect::Updated { index } => format!("Updated row {}.", index + 1),
            Effect::Deleted { part } => format!("Deleted '{}'.", part.name),
            Effect::Saved(_) => "Data saved successfully.".to_string(),
        }
    }
}

/// New list (`None` when the list is unchanged) plus what happened.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub parts: Option<Vec<Part>>,
    pub effect: Effect,
}

pub type Handler<S> = fn(&Inventory, Request, &FormatStore<S>) -> Result<Transition>;

pub fn dispatch_table<S: Storage>() -> [(Action, Handler<S>); 5] {
    [
        (Action::Load, load::<S> as Handler<S>),
        (Action::Add, add::<S> as Handler<S>),
        (Action::Update, update::<S> as Handler<S>),
        (Action::Delete, delete::<S> as Handler<S>),
        (Action::Save, save::<S> as Handler<S>),
    ]
}

/// Routes a request to its handler. The inventory is not touched; the
/// caller commits the returned transition.
pub fn dispatch<S: Storage>(
    inventory: &Inventory,
    request: Request,
    store: &FormatStore<S>,
) -> Result<Transition> {
    let action = request.action();
    let handler = dispatch_table::<S>()
        .into_iter()
        .find(|(candidate, _)| *candidate == action)
        .map(|(_, handler)| handler)
        .ok_or_else(|| ShopError::invalid_input(format!("No handler for '{}'", action)))?;

    tracing::debug!("Dispatching '{}' over {} part(s)", action, inventory.len());
    handler(inventory, request, store)
}

fn mismatched(expected: Action) -> ShopError {
    ShopError::invalid_input(format!("Request does not belong to '{}'", expected))
}

fn load<S: Storage>(
    _inventory: &Inventory,
    request: Request,
    store: &FormatStore<S>,
) -> Result<Transition> {
    let Request::Load { path } = request else {
        return Err(mismatched(Action::Load));
    };

    let decoded = store.load(&path)?;
    Ok(Transition {
        effect: Effect::Loaded {
            path,
            records: decoded.parts.len(),
            skipped: decoded.skipped,
        },
        parts: Some(decoded.parts),
    })
}

fn add<S: Storage>(
    inventory: &Inventory,
    request: Request,
    _store: &FormatStore<S>,
) -> Result<Transition> {
    let Request::Add { input } = request else {
        return Err(mismatched(Action::Add));
    };

    let part = input.parse()?;
    let mut parts = inventory.parts().to_vec();
    parts.push(part);

    Ok(Transition {
        effect: Effect::Added {
            index: parts.len() - 1,
        },
        parts: Some(parts),
    })
}

fn update<S: Storage>(
    inventory: &Inventory,
    request: Request,
    _store: &FormatStore<S>,
) -> Result<Transition> {
    let Request::Update { input } = request else {
        return Err(mismatched(Action::Update));
    };

    let index = selected_index(inventory, "Please select a row to update.")?;
    let part = input.parse()?;
    let mut parts = inventory.parts().to_vec();
    parts[index] = part;

    Ok(Transition {
        parts: Some(parts),
        effect: Effect::Updated { index },
    })
}

fn delete<S: Storage>(
    inventory: &Inventory,
    request: Request,
    _store: &FormatStore<S>,
) -> Result<Transition> {
    if request != Request::Delete {
        return Err(mismatched(Action::Delete));
    }

    let index = selected_index(inventory, "Please select a row to delete.")?;
    let mut parts = inventory.parts().to_vec();
    let part = parts.remove(index);

    Ok(Transition {
        parts: Some(parts),
        effect: Effect::Deleted { part },
    })
}

fn save<S: Storage>(
    inventory: &Inventory,
    request: Request,
    store: &FormatStore<S>,
) -> Result<Transition> {
    let Request::Save { path, format } = request else {
        return Err(mismatched(Action::Save));
    };

    let format = format.trim().to_ascii_lowercase();
    if store.registry().get(&format).is_none() {
        return Err(ShopError::UnsupportedFormat {
            extension: format,
            supported: store.registry().save_extensions().join(", "),
        });
    }

    let path = resolve_save_path(&path, &format);
    let report = store.save(&path, inventory.parts())?;

    Ok(Transition {
        parts: None,
        effect: Effect::Saved(report),
    })
}

fn selected_index(inventory: &Inventory, message: &str) -> Result<usize> {
    inventory
        .selected()
        .filter(|index| *index < inventory.len())
        .ok_or_else(|| ShopError::no_selection(message))
}

/// Appends `.<format>` unless the file name already ends with it
/// (case-insensitive). `parts` + `csv` becomes `parts.csv`, `parts.CSV`
/// stays as is, `parts.txt` + `csv` becomes `parts.txt.csv`.
pub fn resolve_save_path(path: &Path, format: &str) -> PathBuf {
    let suffix = format!(".{}", format.to_ascii_lowercase());
    let already_suffixed = path
        .to_str()
        .map(|p| p.to_ascii_lowercase().ends_with(&suffix))
        .unwrap_or(false);

    if already_suffixed {
        return path.to_path_buf();
    }

    let mut raw: OsString = path.as_os_str().to_os_string();
    raw.push(&suffix);
    PathBuf::from(raw)
}
