//! Seams to the host application.
//!
//! Everything the pipeline can *do* goes through these traits. Implementations
//! are injected by the host shell and are assumed to either succeed or return
//! an error; the pipeline never retries.

use serde::{Serialize, Deserialize};

use crate::error::CapabilityError;
use crate::kernel::intent::View;

/// A family member actions can be attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
}

impl Member {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}

impl Default for Member {
    /// The signed-in user, used when no family member is selected.
    fn default() -> Self {
        Self::new("currentUser", "Me")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomReport {
    pub summary: String,
    pub severity: Severity,
}

impl SymptomReport {
    /// High and critical findings are offered a consultation.
    pub fn needs_follow_up(&self) -> bool {
        self.severity >= Severity::High
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    Hospital,
    Clinic,
    Pharmacy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalResource {
    pub name: String,
    pub kind: ResourceKind,
    pub distance: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicineInfo {
    pub name: String,
    pub description: String,
    pub requires_prescription: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub medicine: String,
    pub time: String,
    pub dosage: String,
    pub patient: Member,
}

pub trait Capabilities {
    fn navigate(&mut self, view: View) -> Result<(), CapabilityError>;

    fn add_to_cart(&mut self, item: &str, quantity: u32, member: &Member) -> Result<(), CapabilityError>;

    fn add_reminder(&mut self, reminder: &Reminder) -> Result<(), CapabilityError>;

    fn trigger_emergency(&mut self) -> Result<(), CapabilityError>;

    fn check_symptoms(&mut self, symptom: &str) -> Result<SymptomReport, CapabilityError>;

    fn find_resource(&mut self, resource: &str) -> Result<Vec<MedicalResource>, CapabilityError>;

    /// `None` name means "whatever the camera sees". `Ok(None)` means nothing
    /// could be identified.
    fn identify_medicine(&mut self, name: Option<&str>) -> Result<Option<MedicineInfo>, CapabilityError>;

    fn describe_surroundings(&mut self) -> Result<String, CapabilityError>;
}

/// Currently-selected family member lookup.
pub trait MemberResolver {
    fn selected_member(&self) -> Option<Member>;
}

/// Resolver with nobody selected; everything falls back to the default member.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSelection;

impl MemberResolver for NoSelection {
    fn selected_member(&self) -> Option<Member> {
        None
    }
}

/// Toast and speech output. Fire-and-forget.
pub trait FeedbackSink {
    fn show_toast(&mut self, message: &str);

    fn speak(&mut self, message: &str, language: &str);
}
