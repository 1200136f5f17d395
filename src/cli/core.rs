use strsim::levenshtein;
use thiserror::Error;
use tracker_config::{Config, ConfigManager};
use tracker_core::{Action, CoreError, Transition};
use tracker_domain::{EditField, Entry, EntryKind};
use tracker_storage_json::JsonEntryStorage;

use crate::{cli::output, errors::CliError, session::Tracker};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("Unknown command `{0}`")]
    UnknownCommand(String),
    #[error("No entry matches `{0}`")]
    EntryNotFound(String),
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Command names with their one-line usage, in help order.
pub const COMMANDS: &[(&str, &str)] = &[
    ("new", "new <inc|exp> <description> <amount>  add an entry in one step"),
    ("kind", "kind <inc|exp>                        choose the draft kind"),
    ("desc", "desc <text>                           set the draft description"),
    ("amount", "amount <number>                       set the draft amount"),
    ("add", "add                                   commit the draft"),
    ("draft", "draft                                 show the draft"),
    ("list", "list [inc|exp]                        list entries"),
    ("summary", "summary                               show totals"),
    ("delete", "delete <#|id>                         delete an entry"),
    ("edit", "edit <#|id>                           start editing an entry"),
    ("edit-desc", "edit-desc <text>                      change the pending description"),
    ("edit-amount", "edit-amount <number>                  change the pending amount"),
    ("save", "save                                  commit the pending edit"),
    ("cancel", "cancel                                discard the pending edit"),
    ("dispatch", "dispatch '<json>'                     send a raw action"),
    ("help", "help                                  show this list"),
    ("exit", "exit                                  leave the shell"),
];

/// Shell state: the tracker being driven plus display preferences.
pub struct ShellContext {
    tracker: Tracker,
    mode: CliMode,
    currency_symbol: String,
    pub running: bool,
}

impl ShellContext {
    /// Loads configuration and the persisted entry list from the data directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let manager = ConfigManager::from_env()?;
        let config = manager.load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "could not read configuration; using defaults");
            Config::default()
        });
        output::set_color_enabled(config.ui_color_enabled && mode == CliMode::Interactive);

        let storage = JsonEntryStorage::new(manager.entries_path(&config))?;
        tracing::info!(path = %storage.path().display(), "using entry file");
        let tracker = Tracker::open(Box::new(storage), &config);
        Ok(Self::with_tracker(tracker, mode, &config))
    }

    pub fn with_tracker(tracker: Tracker, mode: CliMode, config: &Config) -> Self {
        Self {
            tracker,
            mode,
            currency_symbol: config.currency_symbol.clone(),
            running: true,
        }
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn command_names() -> Vec<&'static str> {
        COMMANDS.iter().map(|(name, _)| *name).collect()
    }

    pub fn prompt(&self) -> String {
        match &self.tracker.state().edit_session {
            Some(session) => format!("budget (editing {})> ", session.description),
            None => "budget> ".to_string(),
        }
    }

    pub fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<LoopControl, CommandError> {
        match command {
            "new" => self.cmd_new(args)?,
            "kind" => {
                let kind = parse_kind(args.first().copied())?;
                self.apply(Action::SetDraftKind(kind))?;
            }
            "desc" => {
                self.apply(Action::SetDraftDescription(args.join(" ")))?;
            }
            "amount" => {
                let amount = parse_amount(args.first().copied())?;
                self.apply(Action::SetDraftAmount(amount))?;
            }
            "add" => self.cmd_add()?,
            "draft" => self.show_draft(),
            "list" | "ls" => self.cmd_list(args)?,
            "summary" => self.show_summary(),
            "delete" | "rm" => self.cmd_delete(args)?,
            "edit" => self.cmd_edit(args)?,
            "edit-desc" => {
                let description = args.join(" ");
                self.apply(Action::UpdateEditSession(EditField::Description(description)))?;
            }
            "edit-amount" => {
                let amount = parse_amount(args.first().copied())?;
                self.apply(Action::UpdateEditSession(EditField::Amount(amount)))?;
            }
            "save" => self.cmd_save()?,
            "cancel" => {
                let was_editing = self.tracker.state().is_editing();
                self.apply(Action::CloseEditMode)?;
                if was_editing {
                    output::info("Edit discarded.");
                }
            }
            "dispatch" => self.cmd_dispatch(args)?,
            "help" => show_help(),
            "exit" | "quit" => return Ok(LoopControl::Exit),
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_new(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let (kind, rest) = args.split_first().ok_or_else(|| usage("new"))?;
        let (amount, words) = rest.split_last().ok_or_else(|| usage("new"))?;
        let kind = parse_kind(Some(*kind))?;
        let amount = parse_amount(Some(*amount))?;
        self.apply(Action::SetDraftKind(kind))?;
        self.apply(Action::SetDraftDescription(words.join(" ")))?;
        self.apply(Action::SetDraftAmount(amount))?;
        self.cmd_add()
    }

    fn cmd_add(&mut self) -> Result<(), CommandError> {
        self.apply(Action::AddEntry)?;
        if let Some(entry) = self.tracker.entries().last() {
            output::success(format!(
                "{} added: {} {}",
                entry.kind,
                entry.description,
                output::money(&self.currency_symbol, entry.amount)
            ));
        }
        Ok(())
    }

    fn cmd_list(&self, args: &[&str]) -> Result<(), CommandError> {
        let filter = match args.first() {
            Some(raw) => Some(parse_kind(Some(*raw))?),
            None => None,
        };
        let rows: Vec<(usize, &Entry)> = self
            .tracker
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, entry)| filter.map_or(true, |kind| entry.kind == kind))
            .collect();
        if rows.is_empty() {
            match filter {
                Some(EntryKind::Income) => output::info("No income entries"),
                Some(EntryKind::Expense) => output::info("No expense entries"),
                None => output::info("No entries"),
            }
            return Ok(());
        }
        for (index, entry) in rows {
            output::info(self.entry_row(index + 1, entry));
        }
        Ok(())
    }

    fn cmd_delete(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let token = args.first().ok_or_else(|| usage("delete"))?;
        let id = self.resolve_entry(token)?.id;
        let transition = self.apply(Action::DeleteEntry(id))?;
        if transition.entries_changed {
            output::success("Entry deleted.");
        }
        Ok(())
    }

    fn cmd_edit(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let token = args.first().ok_or_else(|| usage("edit"))?;
        let entry = self.resolve_entry(token)?;
        let action = Action::OpenEditMode {
            id: entry.id,
            description: entry.description.clone(),
            amount: entry.amount,
        };
        self.apply(action)?;
        output::info("Editing entry. Use `edit-desc`, `edit-amount`, then `save` or `cancel`.");
        Ok(())
    }

    fn cmd_save(&mut self) -> Result<(), CommandError> {
        let session = self
            .tracker
            .state()
            .edit_session
            .clone()
            .ok_or(CoreError::NoEditSession)?;
        self.apply(Action::CommitEdit {
            description: session.description,
            amount: session.amount,
        })?;
        output::success("Entry updated.");
        Ok(())
    }

    fn cmd_dispatch(&mut self, args: &[&str]) -> Result<(), CommandError> {
        if args.is_empty() {
            return Err(usage("dispatch"));
        }
        let action = Action::from_json(&args.join(" "))?;
        let tag = action.tag();
        self.apply(action)?;
        output::success(format!("Applied `{tag}`."));
        Ok(())
    }

    fn show_draft(&self) {
        let draft = &self.tracker.state().draft;
        output::info(format!(
            "Draft: {} | {} | {}",
            draft.kind,
            if draft.description.is_empty() {
                "(no description)"
            } else {
                draft.description.as_str()
            },
            output::money(&self.currency_symbol, draft.amount)
        ));
    }

    fn show_summary(&self) {
        let summary = self.tracker.summary();
        let symbol = &self.currency_symbol;
        output::section("Summary");
        output::info(format!(
            "Available funds: {}",
            output::money(symbol, summary.available_funds)
        ));
        output::info(format!(
            "Income: {}",
            output::money(symbol, summary.income_total)
        ));
        output::info(format!(
            "Expense: {} ({})",
            output::money(symbol, summary.expense_total),
            summary.ratio()
        ));
    }

    fn entry_row(&self, number: usize, entry: &Entry) -> String {
        let id = entry.id.to_string();
        format!(
            "{:>3}  {}  {:<7}  {:<24}  {:>12}  {}",
            number,
            id.get(..8).unwrap_or(id.as_str()),
            entry.kind.to_string(),
            entry.description,
            output::money(&self.currency_symbol, entry.amount),
            entry.created_at
        )
    }

    /// Accepts a 1-based list position or a (prefix of an) entry id.
    fn resolve_entry(&self, token: &str) -> Result<&Entry, CommandError> {
        let entries = self.tracker.entries();
        if let Ok(position) = token.parse::<usize>() {
            return position
                .checked_sub(1)
                .and_then(|index| entries.get(index))
                .ok_or_else(|| CommandError::EntryNotFound(token.to_string()));
        }
        let needle = token.to_ascii_lowercase();
        let mut matches = entries
            .iter()
            .filter(|entry| entry.id.to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(entry), None) => Ok(entry),
            (Some(_), Some(_)) => Err(CommandError::InvalidArguments(format!(
                "`{token}` matches more than one entry"
            ))),
            _ => Err(CommandError::EntryNotFound(token.to_string())),
        }
    }

    /// Runs `action` and warns when the entry change it made could not be saved.
    fn apply(&mut self, action: Action) -> Result<Transition, CoreError> {
        let transition = self.tracker.dispatch(action)?;
        if let Some(warning) = self.persist_warning(transition) {
            output::warning(warning);
        }
        Ok(transition)
    }

    fn persist_warning(&self, transition: Transition) -> Option<String> {
        if !transition.entries_changed {
            return None;
        }
        self.tracker
            .last_persist_error()
            .map(|message| format!("Changes are kept in memory only: {message}"))
    }

    pub fn report_error(&self, err: CommandError) {
        match err {
            CommandError::Core(err) if err.is_silent() => {
                tracing::debug!(error = %err, "command ignored");
            }
            CommandError::Core(CoreError::Validation(detail)) => {
                output::warning("Please fill in all fields");
                output::hint(detail);
            }
            CommandError::UnknownCommand(name) => {
                output::error(format!("Unknown command `{name}`."));
                if let Some(best) = suggest(&name) {
                    output::hint(format!("Did you mean `{best}`?"));
                }
            }
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help` for usage details.");
            }
            other => output::error(other),
        }
    }
}

fn show_help() {
    output::section("Commands");
    for (_, usage) in COMMANDS {
        output::info(format!("  {usage}"));
    }
}

fn usage(command: &str) -> CommandError {
    let line = COMMANDS
        .iter()
        .find(|(name, _)| *name == command)
        .map(|(_, usage)| usage.split("  ").next().unwrap_or(*usage).trim())
        .unwrap_or(command);
    CommandError::InvalidArguments(format!("Usage: {line}"))
}

fn suggest(input: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .map(|(name, _)| (levenshtein(name, input), *name))
        .min_by_key(|(distance, _)| *distance)
        .filter(|(distance, _)| *distance <= 3)
        .map(|(_, name)| name)
}

fn parse_kind(raw: Option<&str>) -> Result<EntryKind, CommandError> {
    let raw = raw.ok_or_else(|| CommandError::InvalidArguments("Expected `inc` or `exp`".into()))?;
    EntryKind::parse(raw).ok_or_else(|| {
        CommandError::InvalidArguments(format!("`{raw}` is not a kind; expected `inc` or `exp`"))
    })
}

fn parse_amount(raw: Option<&str>) -> Result<f64, CommandError> {
    let raw = raw.ok_or_else(|| CommandError::InvalidArguments("Expected an amount".into()))?;
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a number")))
}
