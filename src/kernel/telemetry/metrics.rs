use std::collections::{HashMap, VecDeque};

use super::event::{DropReason, TelemetryEvent};
use crate::kernel::dispatcher::Rejection;
use crate::kernel::intent::Intent;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetrySnapshot {
    pub session_stats: SessionStats,
    pub command_stats: CommandStats,
    pub task_stats: TaskStats,
    pub cancel_stats: CancelStats,
    pub emergency_stats: EmergencyStats,
    pub drop_stats: DropStats,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStats {
    pub started: u64,
    pub ended: u64,
    pub total_turns: u64,
    pub avg_turns_per_session: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandStats {
    pub dispatched: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub acceptance_rate: f64,
    pub by_intent: HashMap<Intent, u64>,
    pub by_rejection: HashMap<Rejection, u64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskStats {
    pub transitions: u64,
    /// Transitions that left a task for `None`.
    pub completed: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CancelStats {
    pub immediate: u64,
    pub deferred: u64,
    /// Cancels that abandoned a multi-turn task.
    pub interrupted_tasks: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmergencyStats {
    pub triggered: u64,
    pub delivered: u64,
    pub preempted_tasks: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropStats {
    pub inactive: u64,
    pub busy: u64,
    pub empty: u64,
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    for event in events {
        match event {
            TelemetryEvent::SessionStarted { .. } => snap.session_stats.started += 1,
            TelemetryEvent::SessionEnded { turns, .. } => {
                snap.session_stats.ended += 1;
                snap.session_stats.total_turns += turns;
            }
            TelemetryEvent::CommandDispatched { intent, accepted, rejection, .. } => {
                let stats = &mut snap.command_stats;
                stats.dispatched += 1;
                if *accepted {
                    stats.accepted += 1;
                } else {
                    stats.rejected += 1;
                }
                *stats.by_intent.entry(*intent).or_default() += 1;
                if let Some(rejection) = rejection {
                    *stats.by_rejection.entry(*rejection).or_default() += 1;
                }
            }
            TelemetryEvent::TaskTransition { to, .. } => {
                snap.task_stats.transitions += 1;
                if to.is_idle() {
                    snap.task_stats.completed += 1;
                }
            }
            TelemetryEvent::Cancelled { deferred, from } => {
                if *deferred {
                    snap.cancel_stats.deferred += 1;
                } else {
                    snap.cancel_stats.immediate += 1;
                }
                if !from.is_idle() {
                    snap.cancel_stats.interrupted_tasks += 1;
                }
            }
            TelemetryEvent::EmergencyTriggered { preempted, delivered } => {
                snap.emergency_stats.triggered += 1;
                if *delivered {
                    snap.emergency_stats.delivered += 1;
                }
                if *preempted {
                    snap.emergency_stats.preempted_tasks += 1;
                }
            }
            TelemetryEvent::TranscriptDropped { reason } => match reason {
                DropReason::SessionInactive => snap.drop_stats.inactive += 1,
                DropReason::Busy => snap.drop_stats.busy += 1,
                DropReason::Empty => snap.drop_stats.empty += 1,
            },
        }
    }

    if snap.session_stats.ended > 0 {
        snap.session_stats.avg_turns_per_session =
            snap.session_stats.total_turns as f64 / snap.session_stats.ended as f64;
    }
    if snap.command_stats.dispatched > 0 {
        snap.command_stats.acceptance_rate =
            snap.command_stats.accepted as f64 / snap.command_stats.dispatched as f64;
    }

    snap
}
