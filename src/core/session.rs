use crate::core::commands::{self, Effect, Request};
use crate::core::inventory::Inventory;
use crate::core::table;
use crate::domain::model::{Part, PartInput};
use crate::domain::ports::{Prompt, Storage};
use crate::formats::{file_extension, FormatStore};
use crate::utils::error::Result;
use std::path::PathBuf;

const HELP: &str = "\
Commands:
  load [file]     replace the table with the contents of a .csv, .txt or .json file
  add             append a new part
  select <row>    select a row for update/delete
  update          edit the selected part
  delete          remove the selected part
  save [file]     write the table as csv, txt, json or pdf
  list            show the table again
  help            show this help
  quit            leave the editor";

/// Interactive editing session: reads commands from a `Prompt`, gathers the
/// field values for each action, dispatches it and re-renders the table.
pub struct Session<P: Prompt, S: Storage> {
    prompt: P,
    store: FormatStore<S>,
    inventory: Inventory,
    default_save_format: String,
}

impl<P: Prompt, S: Storage> Session<P, S> {
    pub fn new(prompt: P, store: FormatStore<S>) -> Self {
        Self {
            prompt,
            store,
            inventory: Inventory::new(),
            default_save_format: "csv".to_string(),
        }
    }

    pub fn with_default_save_format(mut self, format: impl Into<String>) -> Self {
        self.default_save_format = format.into().to_ascii_lowercase();
        self
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn into_prompt(self) -> P {
        self.prompt
    }

    /// Runs until `quit` or end of input. Only prompt I/O failures end the
    /// session with an error; everything else is reported and the loop goes on.
    pub fn run(&mut self) -> Result<()> {
        tracing::info!("Session started with {} part(s)", self.inventory.len());
        self.prompt.show(HELP)?;
        self.show_table()?;

        while let Some(line) = self.prompt.next_command()? {
            if !self.handle_line(&line)? {
                break;
            }
        }

        tracing::info!("Session finished with {} part(s)", self.inventory.len());
        Ok(())
    }

    /// Loads a file before the interactive loop starts.
    pub fn preload(&mut self, path: PathBuf) -> Result<()> {
        self.execute(Request::Load { path })
    }

    /// Handles one command line. Returns `false` when the session should end.
    pub fn handle_line(&mut self, line: &str) -> Result<bool> {
        let line = line.trim();
        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, Some(rest.trim()).filter(|r| !r.is_empty())),
            None => (line, None),
        };

        match command.to_ascii_lowercase().as_str() {
            "" => {}
            "quit" | "exit" => return Ok(false),
            "help" => self.prompt.show(HELP)?,
            "list" => self.show_table()?,
            "select" => self.select(argument)?,
            "load" => self.load(argument)?,
            "add" => self.add()?,
            "update" => self.update()?,
            "delete" => self.execute(Request::Delete)?,
            "save" => self.save(argument)?,
            other => self
                .prompt
                .show_error(&format!("Unknown command '{}'. Type 'help' for a list.", other))?,
        }
        Ok(true)
    }

    fn select(&mut self, argument: Option<&str>) -> Result<()> {
        let row = match argument.and_then(|a| a.parse::<usize>().ok()) {
            Some(row) if row > 0 => row,
            _ => return self.prompt.show_error("Usage: select <row number>"),
        };

        match self.inventory.select(row - 1) {
            Ok(()) => self.show_table(),
            Err(e) => self.prompt.show_error(&e.user_friendly_message()),
        }
    }

    fn load(&mut self, argument: Option<&str>) -> Result<()> {
        let question = format!(
            "File to load ({})",
            self.store.registry().load_extensions().join(", ")
        );
        let Some(path) = self.path_argument(argument, &question)? else {
            return Ok(());
        };
        self.execute(Request::Load { path })
    }

    fn add(&mut self) -> Result<()> {
        let Some(input) = self.ask_fields(None)? else {
            return Ok(());
        };
        self.execute(Request::Add { input })
    }

    fn update(&mut self) -> Result<()> {
        let Some(current) = self.inventory.selected_part().cloned() else {
            return self.prompt.show_error("Please select a row to update.");
        };
        let Some(input) = self.ask_fields(Some(&current))? else {
            return Ok(());
        };
        self.execute(Request::Update { input })
    }

    fn save(&mut self, argument: Option<&str>) -> Result<()> {
        let Some(path) = self.path_argument(argument, "File to save")? else {
            return Ok(());
        };

        let formats = self.store.registry().save_extensions();
        let default = file_extension(&path)
            .filter(|ext| formats.iter().any(|f| *f == ext.as_str()))
            .unwrap_or_else(|| self.default_save_format.clone());
        let question = format!("Format ({})", formats.join(", "));
        let Some(format) = self.prompt.ask(&question, Some(&default))? else {
            return Ok(());
        };

        self.execute(Request::Save { path, format })
    }

    fn path_argument(&mut self, argument: Option<&str>, question: &str) -> Result<Option<PathBuf>> {
        if let Some(path) = argument {
            return Ok(Some(PathBuf::from(path)));
        }
        Ok(self
            .prompt
            .ask(question, None)?
            .map(|answer| answer.trim().to_string())
            .filter(|answer| !answer.is_empty())
            .map(PathBuf::from))
    }

    fn ask_fields(&mut self, current: Option<&Part>) -> Result<Option<PartInput>> {
        let defaults = current.map(PartInput::from_part);
        let (name_q, price_q, quantity_q) = if current.is_some() {
            ("Enter updated part name", "Enter updated price", "Enter updated quantity")
        } else {
            ("Enter part name", "Enter price", "Enter quantity")
        };

        let Some(name) = self
            .prompt
            .ask(name_q, defaults.as_ref().map(|d| d.name.as_str()))?
        else {
            return Ok(None);
        };
        let Some(price) = self
            .prompt
            .ask(price_q, defaults.as_ref().map(|d| d.price.as_str()))?
        else {
            return Ok(None);
        };
        let Some(quantity) = self
            .prompt
            .ask(quantity_q, defaults.as_ref().map(|d| d.quantity.as_str()))?
        else {
            return Ok(None);
        };

        Ok(Some(PartInput::new(name.trim(), price, quantity)))
    }

    /// Dispatches a request, commits the result and reports the outcome.
    /// A failed request leaves the inventory exactly as it was.
    fn execute(&mut self, request: Request) -> Result<()> {
        let action = request.action();
        match commands::dispatch(&self.inventory, request, &self.store) {
            Ok(mut transition) => {
                let mutated = transition.parts.is_some();
                self.inventory.apply(&mut transition);
                tracing::debug!("'{}' done: {:?}", action, transition.effect);

                if mutated {
                    self.show_table()?;
                }
                let message = match &transition.effect {
                    Effect::Saved(report) => {
                        format!("{} ({})", transition.effect.message(), report.path.display())
                    }
                    effect => effect.message(),
                };
                self.prompt.show(&message)
            }
            Err(e) => {
                tracing::warn!("'{}' failed: {} (category: {:?})", action, e, e.category());
                self.prompt.show_error(&e.user_friendly_message())
            }
        }
    }

    fn show_table(&mut self) -> Result<()> {
        let rendered = table::render(&self.inventory);
        self.prompt.show(rendered.trim_end())
    }
}
