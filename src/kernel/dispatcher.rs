use serde::{Serialize, Deserialize};
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::error::CapabilityError;
use crate::kernel::capabilities::{Capabilities, MedicalResource, Member, MemberResolver, Reminder};
use crate::kernel::intent::{Entities, EntityKind, Intent, ParsedCommand, Selection, View};
use crate::kernel::state::{ConversationState, ConversationTask, Slot, SlotKey};

const NOT_UNDERSTOOD: &str = "Sorry, I didn't understand that. Please try again.";
const CAPABILITY_FAILED: &str = "Sorry, I couldn't do that right now. Please try again.";
const NOTHING_TO_CONFIRM: &str = "There is nothing to confirm right now.";
const SAY_YES_OR_NO: &str = "Please say yes or no.";
const MORE_OR_STOP: &str = "Say yes to hear more, or no to stop.";
const DEFAULT_DOSAGE: &str = "as prescribed";

/// Why a command was not carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    Unrecognized,
    MissingEntity(EntityKind),
    CapabilityFailed,
    NothingToConfirm,
    InvalidSelection,
}

/// Outcome of one dispatch, consumed by the state tracker and the feedback channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchResult {
    pub accepted: bool,
    pub message: String,
    pub next_task: ConversationTask,
    /// Slot values to append when the task carries on.
    pub slots: Vec<Slot>,
    /// `Some` replaces the pending choices, `None` keeps them.
    pub choices: Option<Vec<String>>,
    pub rejection: Option<Rejection>,
}

impl DispatchResult {
    pub fn accepted(message: impl Into<String>, next_task: ConversationTask) -> Self {
        Self {
            accepted: true,
            message: message.into(),
            next_task,
            slots: Vec::new(),
            choices: None,
            rejection: None,
        }
    }

    pub fn rejected(rejection: Rejection, message: impl Into<String>, next_task: ConversationTask) -> Self {
        Self {
            accepted: false,
            message: message.into(),
            next_task,
            slots: Vec::new(),
            choices: None,
            rejection: Some(rejection),
        }
    }

    pub fn with_slot(mut self, key: SlotKey, value: impl Into<String>) -> Self {
        self.slots.push(Slot::new(key, value));
        self
    }

    pub fn with_choices(mut self, choices: Vec<String>) -> Self {
        self.choices = Some(choices);
        self
    }
}

/// Executes resolved commands against host capabilities.
///
/// Never mutates conversation state; the returned `DispatchResult` says how
/// the state should move. Capability errors stop at this boundary.
pub struct Dispatcher {
    default_member: Member,
    max_choices: usize,
}

impl Dispatcher {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            default_member: config.default_member.clone(),
            max_choices: config.max_choices.max(1),
        }
    }

    pub fn dispatch(
        &self,
        command: &ParsedCommand,
        state: &ConversationState,
        capabilities: &mut dyn Capabilities,
        members: &dyn MemberResolver,
    ) -> DispatchResult {
        let e = &command.entities;
        let outcome = match command.intent {
            Intent::Navigate => self.navigate(e, state, capabilities),
            Intent::AddToCart => self.add_to_cart(e, state, capabilities, members),
            Intent::SetReminder => self.set_reminder(e, state, capabilities, members),
            Intent::CheckSymptoms => self.check_symptoms(e, capabilities),
            Intent::FindResource => self.find_resource(e, capabilities),
            Intent::CompoundSymptomAndResource => self.compound(e, capabilities),
            Intent::IdentifyMedicine => self.identify_medicine(e, capabilities),
            Intent::DescribeSurroundings => self.describe_surroundings(capabilities),
            Intent::Confirm => self.confirm(e, state, capabilities),
            Intent::Unknown => Ok(DispatchResult::rejected(Rejection::Unrecognized, NOT_UNDERSTOOD, state.task())),
        };

        match outcome {
            Ok(result) => {
                if result.accepted {
                    info!("Dispatched {:?} -> {:?}", command.intent, result.next_task);
                }
                result
            }
            Err(err) => {
                warn!("Capability error during {:?}: {}", command.intent, err);
                DispatchResult::rejected(Rejection::CapabilityFailed, CAPABILITY_FAILED, state.task())
            }
        }
    }

    fn resolve_member(&self, members: &dyn MemberResolver) -> Member {
        members.selected_member().unwrap_or_else(|| self.default_member.clone())
    }

    fn navigate(
        &self,
        e: &Entities,
        state: &ConversationState,
        caps: &mut dyn Capabilities,
    ) -> Result<DispatchResult, CapabilityError> {
        let Some(view) = e.view else {
            return Ok(DispatchResult::rejected(
                Rejection::MissingEntity(EntityKind::View),
                "Which page would you like to open?",
                state.task(),
            ));
        };
        caps.navigate(view)?;
        Ok(DispatchResult::accepted(format!("Opening {}.", view.label()), ConversationTask::None))
    }

    fn add_to_cart(
        &self,
        e: &Entities,
        state: &ConversationState,
        caps: &mut dyn Capabilities,
        members: &dyn MemberResolver,
    ) -> Result<DispatchResult, CapabilityError> {
        let Some(item) = e.medicine.as_deref() else {
            return Ok(DispatchResult::rejected(
                Rejection::MissingEntity(EntityKind::Medicine),
                "Which medicine should I add to the cart?",
                state.task(),
            ));
        };
        let quantity = e.quantity.unwrap_or(1).max(1);
        let member = self.resolve_member(members);
        caps.add_to_cart(item, quantity, &member)?;
        Ok(DispatchResult::accepted(
            format!("Added {} {} to the cart for {}.", quantity, item, member.name),
            ConversationTask::None,
        ))
    }

    fn set_reminder(
        &self,
        e: &Entities,
        state: &ConversationState,
        caps: &mut dyn Capabilities,
        members: &dyn MemberResolver,
    ) -> Result<DispatchResult, CapabilityError> {
        let Some(medicine) = e.medicine.as_deref() else {
            return Ok(DispatchResult::rejected(
                Rejection::MissingEntity(EntityKind::Medicine),
                "Which medicine should I remind you about?",
                state.task(),
            ));
        };
        let Some(time) = e.time.as_deref() else {
            return Ok(DispatchResult::rejected(
                Rejection::MissingEntity(EntityKind::Time),
                format!("At what time should I remind you to take {}?", medicine),
                state.task(),
            ));
        };
        let reminder = Reminder {
            medicine: medicine.to_string(),
            time: time.to_string(),
            dosage: e.dosage.clone().unwrap_or_else(|| DEFAULT_DOSAGE.to_string()),
            patient: self.resolve_member(members),
        };
        caps.add_reminder(&reminder)?;
        Ok(DispatchResult::accepted(
            format!(
                "Reminder set for {}: {}, {}, at {}.",
                reminder.patient.name, reminder.medicine, reminder.dosage, reminder.time
            ),
            ConversationTask::None,
        ))
    }

    fn check_symptoms(&self, e: &Entities, caps: &mut dyn Capabilities) -> Result<DispatchResult, CapabilityError> {
        let Some(symptom) = e.symptom.as_deref() else {
            return Ok(DispatchResult::rejected(
                Rejection::MissingEntity(EntityKind::Symptom),
                "Which symptom are you experiencing? Say yes to open the symptom checker.",
                ConversationTask::ConfirmNavigation,
            )
            .with_slot(SlotKey::View, View::SymptomChecker.slug()));
        };
        let report = caps.check_symptoms(symptom)?;
        if report.needs_follow_up() {
            return Ok(DispatchResult::accepted(
                format!(
                    "{} This may need a doctor's attention. Would you like to start a telemedicine consultation?",
                    report.summary
                ),
                ConversationTask::SymptomChecking,
            )
            .with_slot(SlotKey::Symptom, symptom));
        }
        Ok(DispatchResult::accepted(report.summary, ConversationTask::None))
    }

    fn find_resource(&self, e: &Entities, caps: &mut dyn Capabilities) -> Result<DispatchResult, CapabilityError> {
        let Some(resource) = e.resource.as_deref() else {
            return Ok(DispatchResult::rejected(
                Rejection::MissingEntity(EntityKind::Resource),
                "What kind of place are you looking for? Say yes to open the resource finder.",
                ConversationTask::ConfirmNavigation,
            )
            .with_slot(SlotKey::View, View::ResourceFinder.slug()));
        };
        let found = caps.find_resource(resource)?;
        Ok(self.offer_resources(resource, &found))
    }

    /// Turns search results into a booking offer.
    fn offer_resources(&self, resource: &str, found: &[MedicalResource]) -> DispatchResult {
        let offered: Vec<&MedicalResource> = found.iter().take(self.max_choices).collect();
        let names: Vec<String> = offered.iter().map(|r| r.name.clone()).collect();

        match offered.as_slice() {
            [] => DispatchResult::accepted(format!("I couldn't find a {} nearby.", resource), ConversationTask::None),
            [only] => DispatchResult::accepted(
                format!("The nearest {} is {}. Would you like to book a visit?", resource, describe_place(only)),
                ConversationTask::BookingFlow,
            )
            .with_slot(SlotKey::Resource, resource)
            .with_slot(SlotKey::Facility, only.name.clone())
            .with_choices(names),
            many => {
                let listed: Vec<String> = many
                    .iter()
                    .enumerate()
                    .map(|(i, r)| format!("{}. {}", i + 1, describe_place(r)))
                    .collect();
                DispatchResult::accepted(
                    format!(
                        "I found {} {} options: {}. Which one would you like?",
                        many.len(),
                        resource,
                        listed.join(", ")
                    ),
                    ConversationTask::BookingFlow,
                )
                .with_slot(SlotKey::Resource, resource)
                .with_choices(names)
            }
        }
    }

    fn compound(&self, e: &Entities, caps: &mut dyn Capabilities) -> Result<DispatchResult, CapabilityError> {
        let (symptom, resource) = match (e.symptom.as_deref(), e.resource.as_deref()) {
            (Some(s), Some(r)) => (s, r),
            (Some(_), None) => return self.check_symptoms(e, caps),
            _ => return self.find_resource(e, caps),
        };

        let report = caps.check_symptoms(symptom)?;
        let found = caps.find_resource(resource)?;

        if report.needs_follow_up() {
            return Ok(DispatchResult::accepted(
                format!(
                    "{} This may need a doctor's attention. I also found {} {} options nearby. Would you like to start a telemedicine consultation?",
                    report.summary,
                    found.len().min(self.max_choices),
                    resource
                ),
                ConversationTask::SymptomChecking,
            )
            .with_slot(SlotKey::Symptom, symptom)
            .with_slot(SlotKey::Resource, resource));
        }

        let offer = self.offer_resources(resource, &found);
        Ok(DispatchResult {
            message: format!("{} {}", report.summary, offer.message),
            ..offer
        })
    }

    fn identify_medicine(&self, e: &Entities, caps: &mut dyn Capabilities) -> Result<DispatchResult, CapabilityError> {
        match caps.identify_medicine(e.medicine.as_deref())? {
            Some(info) => {
                let mut message = format!("{}: {}", info.name, info.description);
                if info.requires_prescription {
                    message.push_str(" It requires a prescription.");
                }
                Ok(DispatchResult::accepted(message, ConversationTask::None))
            }
            None => Ok(DispatchResult::rejected(
                Rejection::MissingEntity(EntityKind::Medicine),
                "I couldn't identify that medicine. Say yes to open the medicine identifier.",
                ConversationTask::ConfirmNavigation,
            )
            .with_slot(SlotKey::View, View::MedicineIdentifier.slug())),
        }
    }

    fn describe_surroundings(&self, caps: &mut dyn Capabilities) -> Result<DispatchResult, CapabilityError> {
        let description = caps.describe_surroundings()?;
        Ok(DispatchResult::accepted(
            format!("{} {}", description, MORE_OR_STOP),
            ConversationTask::SpatialNavigation,
        )
        .with_slot(SlotKey::Description, description))
    }

    fn confirm(
        &self,
        e: &Entities,
        state: &ConversationState,
        caps: &mut dyn Capabilities,
    ) -> Result<DispatchResult, CapabilityError> {
        let task = state.task();
        if task == ConversationTask::None {
            return Ok(DispatchResult::rejected(
                Rejection::NothingToConfirm,
                NOTHING_TO_CONFIRM,
                ConversationTask::None,
            ));
        }
        let Some(selection) = e.selection.as_deref().and_then(Selection::parse) else {
            return Ok(DispatchResult::rejected(
                Rejection::MissingEntity(EntityKind::Selection),
                SAY_YES_OR_NO,
                task,
            ));
        };

        match task {
            ConversationTask::ConfirmNavigation => match selection {
                Selection::Affirm => {
                    let pending = state
                        .slot(SlotKey::View)
                        .and_then(View::from_slug)
                        .or_else(|| state.last_command().and_then(|c| c.entities.view));
                    let Some(view) = pending else {
                        return Ok(DispatchResult::rejected(
                            Rejection::MissingEntity(EntityKind::View),
                            "Which page would you like to open?",
                            ConversationTask::None,
                        ));
                    };
                    caps.navigate(view)?;
                    Ok(DispatchResult::accepted(format!("Opening {}.", view.label()), ConversationTask::None))
                }
                Selection::Decline => Ok(DispatchResult::accepted("Okay, staying here.", ConversationTask::None)),
                Selection::Choice(_) => Ok(DispatchResult::rejected(Rejection::InvalidSelection, SAY_YES_OR_NO, task)),
            },
            ConversationTask::SymptomChecking => match selection {
                Selection::Affirm => {
                    caps.navigate(View::Telemedicine)?;
                    Ok(DispatchResult::accepted(
                        "Opening telemedicine so you can consult a doctor.",
                        ConversationTask::None,
                    ))
                }
                Selection::Decline => Ok(DispatchResult::accepted(
                    "Okay. Take care, and ask me again if it gets worse.",
                    ConversationTask::None,
                )),
                Selection::Choice(_) => Ok(DispatchResult::rejected(Rejection::InvalidSelection, SAY_YES_OR_NO, task)),
            },
            ConversationTask::BookingFlow => self.confirm_booking(selection, state, caps),
            ConversationTask::SpatialNavigation => match selection {
                Selection::Affirm => self.describe_surroundings(caps),
                Selection::Decline => Ok(DispatchResult::accepted("Okay, I'll stop describing.", ConversationTask::None)),
                Selection::Choice(_) => Ok(DispatchResult::rejected(Rejection::InvalidSelection, MORE_OR_STOP, task)),
            },
            ConversationTask::None => Ok(DispatchResult::rejected(
                Rejection::NothingToConfirm,
                NOTHING_TO_CONFIRM,
                ConversationTask::None,
            )),
        }
    }

    fn confirm_booking(
        &self,
        selection: Selection,
        state: &ConversationState,
        caps: &mut dyn Capabilities,
    ) -> Result<DispatchResult, CapabilityError> {
        let choices = state.choices();
        match (state.slot(SlotKey::Facility), selection) {
            (_, Selection::Decline) => Ok(DispatchResult::accepted(
                "Okay, I've cancelled the booking.",
                ConversationTask::None,
            )),
            (Some(facility), Selection::Affirm) => {
                caps.navigate(View::Telemedicine)?;
                Ok(DispatchResult::accepted(
                    format!("Opening telemedicine to book a visit at {}.", facility),
                    ConversationTask::None,
                ))
            }
            (None, Selection::Affirm) if choices.len() == 1 => Ok(pick_facility(choices, 1)),
            (None, Selection::Affirm) => Ok(DispatchResult::rejected(
                Rejection::InvalidSelection,
                "Which one? Say first, second or third.",
                ConversationTask::BookingFlow,
            )),
            (_, Selection::Choice(n)) => Ok(pick_facility(choices, n)),
        }
    }
}

fn pick_facility(choices: &[String], n: usize) -> DispatchResult {
    if choices.is_empty() {
        return DispatchResult::rejected(Rejection::InvalidSelection, SAY_YES_OR_NO, ConversationTask::BookingFlow);
    }
    match choices.get(n.wrapping_sub(1)) {
        Some(facility) => DispatchResult::accepted(
            format!("Book a visit at {}? Say yes to continue.", facility),
            ConversationTask::BookingFlow,
        )
        .with_slot(SlotKey::Facility, facility.clone())
        .with_choices(Vec::new()),
        None => DispatchResult::rejected(
            Rejection::InvalidSelection,
            format!("Please choose a number between 1 and {}.", choices.len()),
            ConversationTask::BookingFlow,
        ),
    }
}

fn describe_place(resource: &MedicalResource) -> String {
    match &resource.distance {
        Some(distance) => format!("{}, {} away", resource.name, distance),
        None => resource.name.clone(),
    }
}
