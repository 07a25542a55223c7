use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    CheckSymptoms,
    FindResource,
    Navigate,
    AddToCart,
    SetReminder,
    CompoundSymptomAndResource,
    IdentifyMedicine,
    Confirm,
    DescribeSurroundings,
    Unknown,
}

/// Navigation targets exposed by the host shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Dashboard,
    AiAssistant,
    Telemedicine,
    Forum,
    Wearables,
    PriceComparison,
    MentalHealth,
    HealthPlan,
    PredictiveAnalytics,
    GenomicAnalysis,
    AiInsights,
    Favorites,
    Cart,
    ResourceFinder,
    SymptomChecker,
    AppointmentPrep,
    HealthRecords,
    EmergencyMode,
    MedicationReminders,
    Profile,
    AshaConnect,
    MedicalCamps,
    FamilyHub,
    HealthSchemes,
    QuickCommunicate,
    Vitals,
    MedicineIdentifier,
    InclusiveBridge,
}

impl View {
    pub const ALL: [View; 28] = [
        View::Dashboard,
        View::AiAssistant,
        View::Telemedicine,
        View::Forum,
        View::Wearables,
        View::PriceComparison,
        View::MentalHealth,
        View::HealthPlan,
        View::PredictiveAnalytics,
        View::GenomicAnalysis,
        View::AiInsights,
        View::Favorites,
        View::Cart,
        View::ResourceFinder,
        View::SymptomChecker,
        View::AppointmentPrep,
        View::HealthRecords,
        View::EmergencyMode,
        View::MedicationReminders,
        View::Profile,
        View::AshaConnect,
        View::MedicalCamps,
        View::FamilyHub,
        View::HealthSchemes,
        View::QuickCommunicate,
        View::Vitals,
        View::MedicineIdentifier,
        View::InclusiveBridge,
    ];

    /// Route slug used by the host shell (e.g. `symptom-checker`).
    pub fn slug(&self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::AiAssistant => "ai-assistant",
            View::Telemedicine => "telemedicine",
            View::Forum => "forum",
            View::Wearables => "wearables",
            View::PriceComparison => "price-comparison",
            View::MentalHealth => "mental-health",
            View::HealthPlan => "health-plan",
            View::PredictiveAnalytics => "predictive-analytics",
            View::GenomicAnalysis => "genomic-analysis",
            View::AiInsights => "ai-insights",
            View::Favorites => "favorites",
            View::Cart => "cart",
            View::ResourceFinder => "resource-finder",
            View::SymptomChecker => "symptom-checker",
            View::AppointmentPrep => "appointment-prep",
            View::HealthRecords => "health-records",
            View::EmergencyMode => "emergency-mode",
            View::MedicationReminders => "medication-reminders",
            View::Profile => "profile",
            View::AshaConnect => "asha-connect",
            View::MedicalCamps => "medical-camps",
            View::FamilyHub => "family-hub",
            View::HealthSchemes => "health-schemes",
            View::QuickCommunicate => "quick-communicate",
            View::Vitals => "vitals",
            View::MedicineIdentifier => "medicine-identifier",
            View::InclusiveBridge => "inclusive-bridge",
        }
    }

    /// Human label, used in spoken feedback ("Opening the symptom checker").
    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "the dashboard",
            View::AiAssistant => "the AI assistant",
            View::Telemedicine => "telemedicine",
            View::Forum => "the community forum",
            View::Wearables => "wearables",
            View::PriceComparison => "medicine price comparison",
            View::MentalHealth => "mental health",
            View::HealthPlan => "your health plan",
            View::PredictiveAnalytics => "predictive analytics",
            View::GenomicAnalysis => "genomic analysis",
            View::AiInsights => "AI insights",
            View::Favorites => "favorites",
            View::Cart => "your cart",
            View::ResourceFinder => "the resource finder",
            View::SymptomChecker => "the symptom checker",
            View::AppointmentPrep => "appointment preparation",
            View::HealthRecords => "health records",
            View::EmergencyMode => "emergency mode",
            View::MedicationReminders => "medication reminders",
            View::Profile => "your profile",
            View::AshaConnect => "ASHA connect",
            View::MedicalCamps => "medical camps",
            View::FamilyHub => "the family hub",
            View::HealthSchemes => "health schemes",
            View::QuickCommunicate => "quick communicate",
            View::Vitals => "vitals",
            View::MedicineIdentifier => "the medicine identifier",
            View::InclusiveBridge => "the inclusive bridge",
        }
    }

    /// Spoken phrases that name this view. Matched on word boundaries.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            View::Dashboard => &["dashboard", "home", "home screen"],
            View::AiAssistant => &["ai assistant", "assistant"],
            View::Telemedicine => &["telemedicine", "doctor consultation", "video consultation"],
            View::Forum => &["forum", "community forum", "community"],
            View::Wearables => &["wearables", "wearable"],
            View::PriceComparison => &["price comparison", "compare prices", "medicine finder"],
            View::MentalHealth => &["mental health"],
            View::HealthPlan => &["health plan", "my plan"],
            View::PredictiveAnalytics => &["predictive analytics", "analytics"],
            View::GenomicAnalysis => &["genomic analysis", "genomics"],
            View::AiInsights => &["ai insights", "insights"],
            View::Favorites => &["favorites", "favourites"],
            View::Cart => &["cart", "basket", "shopping cart"],
            View::ResourceFinder => &["resource finder"],
            View::SymptomChecker => &["symptom checker"],
            View::AppointmentPrep => &["appointment prep", "appointment preparation"],
            View::HealthRecords => &["health records", "records", "medical records"],
            View::EmergencyMode => &["emergency mode"],
            View::MedicationReminders => &["medication reminders", "reminders"],
            View::Profile => &["profile", "my profile"],
            View::AshaConnect => &["asha connect", "asha"],
            View::MedicalCamps => &["medical camps", "camps"],
            View::FamilyHub => &["family hub", "family"],
            View::HealthSchemes => &["health schemes", "schemes"],
            View::QuickCommunicate => &["quick communicate"],
            View::Vitals => &["vitals", "my vitals"],
            View::MedicineIdentifier => &["medicine identifier", "pill identifier"],
            View::InclusiveBridge => &["inclusive bridge"],
        }
    }

    pub fn from_slug(slug: &str) -> Option<View> {
        View::ALL.iter().copied().find(|v| v.slug() == slug)
    }
}

/// Named slot values extracted from one transcript.
///
/// Every field is optional. Which ones an intent needs is decided by the
/// dispatcher, not the classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medicine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<View>,
    /// `"yes"`, `"no"`, or a 1-based ordinal such as `"2"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<String>,
    /// Resolved cart quantity. Never zero when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
}

impl Entities {
    pub fn is_empty(&self) -> bool {
        *self == Entities::default()
    }
}

/// Entity names, used when reporting what a command was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Symptom,
    Resource,
    Medicine,
    View,
    Selection,
    Time,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommand {
    pub intent: Intent,
    pub entities: Entities,
}

impl ParsedCommand {
    pub fn new(intent: Intent, entities: Entities) -> Self {
        Self { intent, entities }
    }

    pub fn unknown() -> Self {
        Self::new(Intent::Unknown, Entities::default())
    }
}

/// Interpretation of `Entities::selection`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Affirm,
    Decline,
    /// 1-based position in the pending choice list.
    Choice(usize),
}

impl Selection {
    pub fn parse(raw: &str) -> Option<Selection> {
        match raw {
            "yes" => Some(Selection::Affirm),
            "no" => Some(Selection::Decline),
            other => other.parse::<usize>().ok().filter(|n| *n > 0).map(Selection::Choice),
        }
    }

    pub fn as_entity(&self) -> String {
        match self {
            Selection::Affirm => "yes".to_string(),
            Selection::Decline => "no".to_string(),
            Selection::Choice(n) => n.to_string(),
        }
    }
}
