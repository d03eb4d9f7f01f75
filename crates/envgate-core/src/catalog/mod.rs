//! Catalog and dialog state machine.
//!
//! [`Catalog::update`] is a pure reducer: it applies an [`Event`] to the
//! in-memory state and returns the [`Effect`]s the caller must carry out.
//! Remote results come back as events. Because nothing here awaits, the
//! catalog stays usable (search, cancel, opening the dialog) while effects
//! are in flight; [`CatalogSession`] is the async driver that performs them
//! against the directory and the handoff dispatcher.

mod driver;

pub use driver::{CatalogSession, Outcome};

use tracing::debug;

use crate::environment::{filter_environments, Environment};

pub const DUPLICATE_NAME_MESSAGE: &str = "An environment with this name already exists";
pub const NAME_REQUIRED_MESSAGE: &str = "Environment name is required";

/// Input to the state machine: user intents and remote results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// View entered
    Mount,
    /// Retry from the error view, or a manual refresh
    Retry,
    Search(String),
    OpenCreate,
    /// Open the edit dialog for the environment with this name
    OpenEdit(String),
    EditDisplayName(String),
    EditDescription(String),
    Submit,
    /// Delete the environment open in the edit dialog
    Delete,
    Cancel,
    Select(String),
    Loaded {
        generation: u64,
        result: Result<Vec<Environment>, String>,
    },
    /// Results of a dialog submission, tagged with the id the request was
    /// issued under
    Created {
        submission: u64,
        result: Result<String, String>,
    },
    Updated {
        submission: u64,
        result: Result<(), String>,
    },
    Deleted {
        submission: u64,
        result: Result<(), String>,
    },
}

/// Work requested by the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Load {
        generation: u64,
    },
    Create {
        submission: u64,
        display_name: String,
        description: String,
    },
    Update {
        submission: u64,
        name: String,
        display_name: String,
        description: String,
    },
    Delete {
        submission: u64,
        name: String,
    },
    Handoff {
        environment: String,
    },
}

/// State of the environment list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPhase {
    NotLoaded,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogMode {
    Create,
    /// Snapshot of the environment being edited
    Edit(Environment),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub display_name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub mode: DialogMode,
    pub draft: Draft,
    pub submitting: bool,
    /// Id of the request in flight, meaningful while `submitting`
    pub submission: u64,
    pub validation_error: Option<String>,
    /// The message came from the backend rather than local validation
    pub remote_failure: bool,
}

impl Dialog {
    fn create() -> Self {
        Self {
            mode: DialogMode::Create,
            draft: Draft::default(),
            submitting: false,
            submission: 0,
            validation_error: None,
            remote_failure: false,
        }
    }

    fn edit(env: &Environment) -> Self {
        Self {
            draft: Draft {
                display_name: env.label().to_string(),
                description: env.description().to_string(),
            },
            mode: DialogMode::Edit(env.clone()),
            submitting: false,
            submission: 0,
            validation_error: None,
            remote_failure: false,
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, DialogMode::Edit(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DialogState {
    #[default]
    Closed,
    Open(Dialog),
}

impl DialogState {
    pub fn as_open(&self) -> Option<&Dialog> {
        match self {
            DialogState::Open(dialog) => Some(dialog),
            DialogState::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, DialogState::Open(_))
    }
}

/// Client-held view of the user's environments
#[derive(Debug, Clone)]
pub struct Catalog {
    environments: Vec<Environment>,
    phase: ListPhase,
    generation: u64,
    submissions: u64,
    search: String,
    dialog: DialogState,
    selection: Option<String>,
}

impl Catalog {
    /// `selection` is the persisted environment, used only for highlighting
    pub fn new(selection: Option<String>) -> Self {
        Self {
            environments: Vec::new(),
            phase: ListPhase::NotLoaded,
            generation: 0,
            submissions: 0,
            search: String::new(),
            dialog: DialogState::Closed,
            selection,
        }
    }

    pub fn environments(&self) -> &[Environment] {
        &self.environments
    }

    /// Environments matching the current search, in catalog order
    pub fn visible(&self) -> Vec<&Environment> {
        filter_environments(&self.environments, &self.search)
    }

    pub fn phase(&self) -> &ListPhase {
        &self.phase
    }

    pub fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn is_selected(&self, env: &Environment) -> bool {
        self.selection.as_deref() == Some(env.name.as_str())
    }

    pub fn find(&self, name: &str) -> Option<&Environment> {
        self.environments.iter().find(|env| env.name == name)
    }

    /// Apply an event and return the effects to perform
    pub fn update(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Mount | Event::Retry => {
                if self.phase == ListPhase::Loading {
                    debug!("Load already in flight, ignoring request");
                    return Vec::new();
                }
                vec![self.begin_load()]
            }
            Event::Search(query) => {
                self.search = query;
                Vec::new()
            }
            Event::OpenCreate => {
                if !self.dialog_busy() {
                    self.dialog = DialogState::Open(Dialog::create());
                }
                Vec::new()
            }
            Event::OpenEdit(name) => {
                if self.dialog_busy() {
                    return Vec::new();
                }
                match self.find(&name).map(Dialog::edit) {
                    Some(dialog) => self.dialog = DialogState::Open(dialog),
                    None => debug!("No environment named {} to edit", name),
                }
                Vec::new()
            }
            Event::EditDisplayName(value) => {
                if let DialogState::Open(dialog) = &mut self.dialog {
                    dialog.draft.display_name = value;
                }
                Vec::new()
            }
            Event::EditDescription(value) => {
                if let DialogState::Open(dialog) = &mut self.dialog {
                    dialog.draft.description = value;
                }
                Vec::new()
            }
            Event::Submit => self.submit(),
            Event::Delete => self.delete(),
            Event::Cancel => {
                self.dialog = DialogState::Closed;
                Vec::new()
            }
            Event::Select(name) => {
                if name.is_empty() {
                    return Vec::new();
                }
                self.selection = Some(name.clone());
                vec![Effect::Handoff { environment: name }]
            }
            Event::Loaded { generation, result } => {
                if generation != self.generation {
                    debug!(
                        "Dropping stale list result {} (current {})",
                        generation, self.generation
                    );
                    return Vec::new();
                }
                match result {
                    Ok(environments) => {
                        self.environments = environments;
                        self.phase = ListPhase::Ready;
                    }
                    Err(message) => self.phase = ListPhase::Failed(message),
                }
                Vec::new()
            }
            Event::Created {
                submission,
                result: Ok(name),
            } => {
                self.close_submitted(submission);
                self.selection = Some(name.clone());
                vec![Effect::Handoff { environment: name }]
            }
            Event::Updated {
                submission,
                result: Ok(()),
            }
            | Event::Deleted {
                submission,
                result: Ok(()),
            } => {
                self.close_submitted(submission);
                vec![self.begin_load()]
            }
            Event::Created {
                submission,
                result: Err(message),
            }
            | Event::Updated {
                submission,
                result: Err(message),
            }
            | Event::Deleted {
                submission,
                result: Err(message),
            } => {
                match &mut self.dialog {
                    DialogState::Open(dialog)
                        if dialog.submitting && dialog.submission == submission =>
                    {
                        dialog.submitting = false;
                        dialog.validation_error = Some(message);
                        dialog.remote_failure = true;
                    }
                    _ => debug!(
                        "Dropping failure of submission {} for a dialog that moved on: {}",
                        submission, message
                    ),
                }
                Vec::new()
            }
        }
    }

    fn begin_load(&mut self) -> Effect {
        self.generation += 1;
        self.phase = ListPhase::Loading;
        Effect::Load {
            generation: self.generation,
        }
    }

    fn dialog_busy(&self) -> bool {
        matches!(&self.dialog, DialogState::Open(dialog) if dialog.submitting)
    }

    /// Close the dialog only if it is still waiting on `submission`
    fn close_submitted(&mut self, submission: u64) {
        let waiting = matches!(
            &self.dialog,
            DialogState::Open(dialog) if dialog.submitting && dialog.submission == submission
        );
        if waiting {
            self.dialog = DialogState::Closed;
        }
    }

    fn next_submission(&mut self) -> u64 {
        self.submissions += 1;
        self.submissions
    }

    /// Label already taken by another environment in the loaded list
    fn is_duplicate(&self, candidate: &str, editing: Option<&str>) -> bool {
        self.environments
            .iter()
            .filter(|env| Some(env.name.as_str()) != editing)
            .any(|env| env.label_matches(candidate))
    }

    fn submit(&mut self) -> Vec<Effect> {
        let (display_name, description, editing) = match &self.dialog {
            DialogState::Open(dialog) if !dialog.submitting => (
                dialog.draft.display_name.trim().to_string(),
                dialog.draft.description.clone(),
                match &dialog.mode {
                    DialogMode::Create => None,
                    DialogMode::Edit(env) => Some(env.name.clone()),
                },
            ),
            _ => return Vec::new(),
        };

        let rejection = if display_name.is_empty() {
            Some(NAME_REQUIRED_MESSAGE)
        } else if self.is_duplicate(&display_name, editing.as_deref()) {
            Some(DUPLICATE_NAME_MESSAGE)
        } else {
            None
        };

        if let Some(message) = rejection {
            if let DialogState::Open(dialog) = &mut self.dialog {
                dialog.validation_error = Some(message.to_string());
                dialog.remote_failure = false;
            }
            return Vec::new();
        }

        let submission = self.next_submission();
        let DialogState::Open(dialog) = &mut self.dialog else {
            return Vec::new();
        };
        dialog.submitting = true;
        dialog.submission = submission;
        dialog.validation_error = None;
        dialog.remote_failure = false;

        let effect = match editing {
            None => Effect::Create {
                submission,
                display_name,
                description,
            },
            Some(name) => Effect::Update {
                submission,
                name,
                display_name,
                description,
            },
        };
        vec![effect]
    }

    fn delete(&mut self) -> Vec<Effect> {
        let name = match &self.dialog {
            DialogState::Open(Dialog {
                mode: DialogMode::Edit(env),
                submitting: false,
                ..
            }) => env.name.clone(),
            _ => return Vec::new(),
        };

        let submission = self.next_submission();
        let DialogState::Open(dialog) = &mut self.dialog else {
            return Vec::new();
        };
        dialog.submitting = true;
        dialog.submission = submission;
        dialog.validation_error = None;
        dialog.remote_failure = false;
        vec![Effect::Delete { submission, name }]
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(None)
    }
}
