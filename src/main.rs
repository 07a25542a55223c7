use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use carevoice::error::CapabilityError;
use carevoice::kernel::capabilities::{
    Capabilities, FeedbackSink, MedicalResource, MedicineInfo, Member, NoSelection, Reminder,
    ResourceKind, Severity, SymptomReport,
};
use carevoice::kernel::intent::View;
use carevoice::{PipelineConfig, Reactor, VoicePipeline};

const CONFIG_ENV: &str = "CAREVOICE_CONFIG";

/// Prints every host call instead of driving a UI.
struct ConsoleCapabilities;

impl Capabilities for ConsoleCapabilities {
    fn navigate(&mut self, view: View) -> Result<(), CapabilityError> {
        println!("[nav] -> {}", view.slug());
        Ok(())
    }

    fn add_to_cart(&mut self, item: &str, quantity: u32, member: &Member) -> Result<(), CapabilityError> {
        println!("[cart] {} x {} for {}", quantity, item, member.name);
        Ok(())
    }

    fn add_reminder(&mut self, reminder: &Reminder) -> Result<(), CapabilityError> {
        println!(
            "[reminder] {} ({}) at {} for {}",
            reminder.medicine, reminder.dosage, reminder.time, reminder.patient.name
        );
        Ok(())
    }

    fn trigger_emergency(&mut self) -> Result<(), CapabilityError> {
        println!("[sos] emergency contacts alerted");
        Ok(())
    }

    fn check_symptoms(&mut self, symptom: &str) -> Result<SymptomReport, CapabilityError> {
        let severity = match symptom {
            "chest pain" | "breathlessness" => Severity::High,
            "fever" | "vomiting" => Severity::Medium,
            _ => Severity::Low,
        };
        Ok(SymptomReport {
            summary: format!("You reported {}.", symptom),
            severity,
        })
    }

    fn find_resource(&mut self, resource: &str) -> Result<Vec<MedicalResource>, CapabilityError> {
        let kind = match resource {
            "hospital" => ResourceKind::Hospital,
            "clinic" | "doctor" => ResourceKind::Clinic,
            "pharmacy" => ResourceKind::Pharmacy,
            _ => return Ok(Vec::new()),
        };
        Ok(vec![
            MedicalResource {
                name: format!("City {}", resource),
                kind,
                distance: Some("1.2 km".to_string()),
            },
            MedicalResource {
                name: format!("Community {}", resource),
                kind,
                distance: Some("3.5 km".to_string()),
            },
        ])
    }

    fn identify_medicine(&mut self, name: Option<&str>) -> Result<Option<MedicineInfo>, CapabilityError> {
        Ok(name.map(|name| MedicineInfo {
            name: name.to_string(),
            description: "No leaflet is stored for this medicine in the console host.".to_string(),
            requires_prescription: false,
        }))
    }

    fn describe_surroundings(&mut self) -> Result<String, CapabilityError> {
        Err(CapabilityError::Unavailable("camera"))
    }
}

struct ConsoleSink;

impl FeedbackSink for ConsoleSink {
    fn show_toast(&mut self, message: &str) {
        println!("[toast] {}", message);
    }

    fn speak(&mut self, message: &str, language: &str) {
        println!("[speak:{}] {}", language, message);
    }
}

fn load_config() -> anyhow::Result<PipelineConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => PipelineConfig::load(&path).with_context(|| format!("loading config from {}", path)),
        Err(_) => Ok(PipelineConfig::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber")?;

    let config = load_config()?;
    tracing::info!("Starting carevoice (persona: {:?})", config.persona);

    let pipeline = VoicePipeline::new(
        &config,
        Box::new(ConsoleCapabilities),
        Box::new(NoSelection),
        Box::new(ConsoleSink),
    );
    let (mut reactor, handle) = Reactor::new(pipeline, config.event_buffer);

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        println!("Commands: /start, /stop, /cancel, /sos, /quit. Anything else is a transcript.");

        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim();
            let delivered = match line {
                "" => continue,
                "/start" => handle.start().await.is_ok(),
                "/stop" => handle.stop().await.is_ok(),
                "/cancel" => handle.cancel().await.is_ok(),
                "/quit" => handle.shutdown().await.is_ok(),
                "/sos" => handle.emergency("console").await.is_ok(),
                text => handle.transcript(text).await.is_ok(),
            };
            if !delivered {
                tracing::error!("Reactor is gone, stopping console input");
                break;
            }
        }
        let _ = handle.shutdown().await;
    });

    reactor.run().await;

    let snapshot = reactor.pipeline.telemetry().snapshot();
    tracing::info!(
        "Session summary: {} commands, {} accepted, {} emergencies",
        snapshot.command_stats.dispatched,
        snapshot.command_stats.accepted,
        snapshot.emergency_stats.triggered
    );
    Ok(())
}
