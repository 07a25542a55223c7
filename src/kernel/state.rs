use serde::{Serialize, Deserialize};

use crate::kernel::dispatcher::DispatchResult;
use crate::kernel::intent::ParsedCommand;

/// The active multi-turn flow. At most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationTask {
    #[default]
    None,
    BookingFlow,
    ConfirmNavigation,
    SymptomChecking,
    SpatialNavigation,
}

impl ConversationTask {
    pub fn is_idle(self) -> bool {
        self == ConversationTask::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKey {
    Symptom,
    Resource,
    Facility,
    View,
    Description,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub key: SlotKey,
    pub value: String,
}

impl Slot {
    pub fn new(key: SlotKey, value: impl Into<String>) -> Self {
        Self { key, value: value.into() }
    }
}

/// Strict state delta. This is the ONLY way conversation state mutates.
#[derive(Debug, Clone)]
pub enum StateDelta {
    Advance {
        next_task: ConversationTask,
        slots: Vec<Slot>,
        choices: Option<Vec<String>>,
    },
    Remember(ParsedCommand),
    Reset,
}

/// Per-session conversation context.
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    task: ConversationTask,
    // At most one entry per key, in first-recorded order.
    slots: Vec<Slot>,
    choices: Vec<String>,
    last_command: Option<ParsedCommand>,
    // Monotonic, bumped on every reduction.
    version: u64,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn task(&self) -> ConversationTask {
        self.task
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Latest value recorded for `key`.
    pub fn slot(&self, key: SlotKey) -> Option<&str> {
        self.slots.iter().rev().find(|s| s.key == key).map(|s| s.value.as_str())
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn last_command(&self) -> Option<&ParsedCommand> {
        self.last_command.as_ref()
    }

    /// Moves to `result.next_task`. Slots and choices survive only when the
    /// task is unchanged and not `None`. A new slot replaces any earlier one
    /// with the same key.
    pub fn advance(&mut self, result: &DispatchResult) {
        self.reduce(StateDelta::Advance {
            next_task: result.next_task,
            slots: result.slots.clone(),
            choices: result.choices.clone(),
        });
    }

    /// Keeps `command` for anaphora ("yes" after "open the symptom checker?").
    pub fn remember(&mut self, command: &ParsedCommand) {
        self.reduce(StateDelta::Remember(command.clone()));
    }

    /// Unconditional return to `{task: none}`. Idempotent.
    pub fn reset(&mut self) {
        self.reduce(StateDelta::Reset);
    }

    /// Pure reduction: State + Delta -> Mutated State
    pub fn reduce(&mut self, delta: StateDelta) {
        self.version += 1;

        match delta {
            StateDelta::Advance { next_task, slots, choices } => {
                if next_task == ConversationTask::None || next_task != self.task {
                    self.slots.clear();
                    self.choices.clear();
                }
                self.task = next_task;
                if next_task == ConversationTask::None {
                    return;
                }
                for slot in slots {
                    self.slots.retain(|s| s.key != slot.key);
                    self.slots.push(slot);
                }
                if let Some(choices) = choices {
                    self.choices = choices;
                }
            }
            StateDelta::Remember(command) => {
                self.last_command = Some(command);
            }
            StateDelta::Reset => {
                self.task = ConversationTask::None;
                self.slots.clear();
                self.choices.clear();
                self.last_command = None;
            }
        }
    }
}

impl PartialEq for ConversationState {
    // Version is bookkeeping, not content.
    fn eq(&self, other: &Self) -> bool {
        self.task == other.task
            && self.slots == other.slots
            && self.choices == other.choices
            && self.last_command == other.last_command
    }
}
