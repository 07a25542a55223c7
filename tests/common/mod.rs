#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use carevoice::config::PipelineConfig;
use carevoice::error::CapabilityError;
use carevoice::kernel::capabilities::{
    Capabilities, FeedbackSink, MedicalResource, MedicineInfo, Member, MemberResolver, Reminder,
    ResourceKind, Severity, SymptomReport,
};
use carevoice::kernel::intent::View;
use carevoice::kernel::pipeline::VoicePipeline;
use carevoice::kernel::session::SessionControl;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Navigate(View),
    AddToCart { item: String, quantity: u32, member: Member },
    AddReminder(Reminder),
    TriggerEmergency,
    CheckSymptoms(String),
    FindResource(String),
    IdentifyMedicine(Option<String>),
    DescribeSurroundings,
}

struct Script {
    severity: Severity,
    resources: Vec<MedicalResource>,
    medicine: Option<MedicineInfo>,
    description: String,
    failing: HashSet<&'static str>,
    cancel_on_call: Option<SessionControl>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            severity: Severity::Low,
            resources: Vec::new(),
            medicine: None,
            description: "A corridor with a door on your left.".to_string(),
            failing: HashSet::new(),
            cancel_on_call: None,
        }
    }
}

/// Capabilities fake: logs every call and answers from a script.
/// Clones share the same log and script.
#[derive(Clone, Default)]
pub struct RecordingCapabilities {
    calls: Arc<Mutex<Vec<Call>>>,
    script: Arc<Mutex<Script>>,
}

impl RecordingCapabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    pub fn severity(&self, severity: Severity) {
        self.script.lock().unwrap().severity = severity;
    }

    pub fn resources(&self, names: &[&str]) {
        self.script.lock().unwrap().resources = names
            .iter()
            .map(|name| MedicalResource {
                name: name.to_string(),
                kind: ResourceKind::Pharmacy,
                distance: None,
            })
            .collect();
    }

    pub fn medicine(&self, info: MedicineInfo) {
        self.script.lock().unwrap().medicine = Some(info);
    }

    /// Makes the named capability return `CapabilityError::Failed`.
    pub fn fail(&self, capability: &'static str) {
        self.script.lock().unwrap().failing.insert(capability);
    }

    /// Requests a cancel from inside every capability call, as a UI thread
    /// would while a dispatch is running.
    pub fn cancel_during_dispatch(&self, control: SessionControl) {
        self.script.lock().unwrap().cancel_on_call = Some(control);
    }

    fn record(&self, capability: &'static str, call: Call) -> Result<(), CapabilityError> {
        self.calls.lock().unwrap().push(call);
        let script = self.script.lock().unwrap();
        if let Some(control) = &script.cancel_on_call {
            control.request_cancel();
        }
        if script.failing.contains(capability) {
            return Err(CapabilityError::failed(capability, "scripted failure"));
        }
        Ok(())
    }
}

impl Capabilities for RecordingCapabilities {
    fn navigate(&mut self, view: View) -> Result<(), CapabilityError> {
        self.record("navigate", Call::Navigate(view))
    }

    fn add_to_cart(&mut self, item: &str, quantity: u32, member: &Member) -> Result<(), CapabilityError> {
        self.record(
            "add_to_cart",
            Call::AddToCart { item: item.to_string(), quantity, member: member.clone() },
        )
    }

    fn add_reminder(&mut self, reminder: &Reminder) -> Result<(), CapabilityError> {
        self.record("add_reminder", Call::AddReminder(reminder.clone()))
    }

    fn trigger_emergency(&mut self) -> Result<(), CapabilityError> {
        self.record("trigger_emergency", Call::TriggerEmergency)
    }

    fn check_symptoms(&mut self, symptom: &str) -> Result<SymptomReport, CapabilityError> {
        self.record("check_symptoms", Call::CheckSymptoms(symptom.to_string()))?;
        Ok(SymptomReport {
            summary: format!("Noted: {}.", symptom),
            severity: self.script.lock().unwrap().severity,
        })
    }

    fn find_resource(&mut self, resource: &str) -> Result<Vec<MedicalResource>, CapabilityError> {
        self.record("find_resource", Call::FindResource(resource.to_string()))?;
        Ok(self.script.lock().unwrap().resources.clone())
    }

    fn identify_medicine(&mut self, name: Option<&str>) -> Result<Option<MedicineInfo>, CapabilityError> {
        self.record("identify_medicine", Call::IdentifyMedicine(name.map(str::to_string)))?;
        Ok(self.script.lock().unwrap().medicine.clone())
    }

    fn describe_surroundings(&mut self) -> Result<String, CapabilityError> {
        self.record("describe_surroundings", Call::DescribeSurroundings)?;
        Ok(self.script.lock().unwrap().description.clone())
    }
}

/// Resolver returning a fixed selection.
pub struct FixedMember(pub Option<Member>);

impl MemberResolver for FixedMember {
    fn selected_member(&self) -> Option<Member> {
        self.0.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    Toast(String),
    Spoken { message: String, language: String },
}

#[derive(Clone, Default)]
pub struct RecordingSink {
    log: Arc<Mutex<Vec<Feedback>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> Vec<Feedback> {
        self.log.lock().unwrap().clone()
    }

    pub fn toasts(&self) -> Vec<String> {
        self.log()
            .into_iter()
            .filter_map(|f| match f {
                Feedback::Toast(m) => Some(m),
                Feedback::Spoken { .. } => None,
            })
            .collect()
    }

    pub fn spoken(&self) -> Vec<String> {
        self.log()
            .into_iter()
            .filter_map(|f| match f {
                Feedback::Spoken { message, .. } => Some(message),
                Feedback::Toast(_) => None,
            })
            .collect()
    }
}

impl FeedbackSink for RecordingSink {
    fn show_toast(&mut self, message: &str) {
        self.log.lock().unwrap().push(Feedback::Toast(message.to_string()));
    }

    fn speak(&mut self, message: &str, language: &str) {
        self.log.lock().unwrap().push(Feedback::Spoken {
            message: message.to_string(),
            language: language.to_string(),
        });
    }
}

pub fn grandma() -> Member {
    Member::new("fm-2", "Grandma")
}

pub struct Harness {
    pub pipeline: VoicePipeline,
    pub caps: RecordingCapabilities,
    pub sink: RecordingSink,
}

impl Harness {
    pub fn with(config: PipelineConfig, member: Option<Member>) -> Self {
        let caps = RecordingCapabilities::new();
        let sink = RecordingSink::new();
        let mut pipeline = VoicePipeline::new(
            &config,
            Box::new(caps.clone()),
            Box::new(FixedMember(member)),
            Box::new(sink.clone()),
        );
        pipeline.start_session();
        Self { pipeline, caps, sink }
    }

    pub fn new() -> Self {
        Self::with(PipelineConfig::default(), None)
    }

    pub fn say(&mut self, text: &str) -> carevoice::DispatchResult {
        self.pipeline
            .handle_transcript(&carevoice::kernel::event::Transcript::new(text))
            .unwrap()
    }
}
