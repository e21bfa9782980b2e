// src/domain/timeline.rs

use crate::permits::Permit;
use chrono::NaiveDateTime;
use serde::Serialize;

pub struct Milestone {
    pub field: &'static str,
    /// Step order. Fields sharing a rank are alternate spellings of one step.
    pub rank: u32,
    pub label: &'static str,
    read: fn(&Permit) -> Option<NaiveDateTime>,
}

impl Milestone {
    pub fn date_of(&self, permit: &Permit) -> Option<NaiveDateTime> {
        (self.read)(permit)
    }
}

pub static MILESTONES: &[Milestone] = &[
    Milestone {
        field: "processed_date",
        rank: 1,
        label: "Processed",
        read: |p| p.processed_date,
    },
    Milestone {
        field: "under_review_date",
        rank: 2,
        label: "Under review",
        read: |p| p.under_review_date,
    },
    Milestone {
        field: "prescreen_completed_date",
        rank: 3,
        label: "Prescreen completed",
        read: |p| p.prescreen_completed_date,
    },
    Milestone {
        field: "review_started_including",
        rank: 4,
        label: "Review started",
        read: |p| p.review_started_including,
    },
    Milestone {
        field: "review_started_date_excluding",
        rank: 4,
        label: "Review started",
        read: |p| p.review_started_date_excluding,
    },
    Milestone {
        field: "collect_permit_fees_date",
        rank: 5,
        label: "Permit fees",
        read: |p| p.collect_permit_fees_date,
    },
    Milestone {
        field: "pending_issuance_date",
        rank: 6,
        label: "Pending issuance",
        read: |p| p.pending_issuance_date,
    },
    Milestone {
        field: "issue_permit_date",
        rank: 7,
        label: "Permit issued",
        read: |p| p.issue_permit_date,
    },
    Milestone {
        field: "final_date",
        rank: 8,
        label: "Final inspection",
        read: |p| p.final_date,
    },
    Milestone {
        field: "coo_date",
        rank: 9,
        label: "Certificate of occupancy",
        read: |p| p.coo_date,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Done,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineStep {
    pub field: &'static str,
    pub rank: u32,
    pub label: &'static str,
    pub date: Option<NaiveDateTime>,
    pub state: StepState,
}

/// The milestone reached last. Ranks are added to the millisecond timestamp so
/// that steps stamped on the same instant resolve in step order.
pub fn current_milestone(permit: &Permit) -> Option<&'static Milestone> {
    MILESTONES
        .iter()
        .filter_map(|m| {
            m.date_of(permit)
                .map(|date| (date.and_utc().timestamp_millis() + i64::from(m.rank), m))
        })
        .max_by_key(|(key, _)| *key)
        .map(|(_, m)| m)
}

/// Steps to render for one permit, in rank order: every milestone the permit
/// has a date for, plus the ones still ahead of the current milestone.
pub fn permit_timeline(permit: &Permit) -> Vec<TimelineStep> {
    let current = current_milestone(permit);
    let current_rank = current.map(|m| m.rank).unwrap_or(0);

    let mut steps: Vec<TimelineStep> = Vec::new();
    for milestone in MILESTONES {
        let date = milestone.date_of(permit);
        if date.is_none() && milestone.rank <= current_rank {
            continue;
        }

        let state = match (current, date) {
            (Some(c), Some(_)) if c.field == milestone.field => StepState::Current,
            (_, Some(_)) => StepState::Done,
            (_, None) => StepState::Upcoming,
        };

        if let Some(last) = steps.last_mut() {
            if last.rank == milestone.rank {
                if last.date.is_none() || state == StepState::Current {
                    *last = TimelineStep {
                        field: milestone.field,
                        rank: milestone.rank,
                        label: milestone.label,
                        date,
                        state,
                    };
                }
                continue;
            }
        }

        steps.push(TimelineStep {
            field: milestone.field,
            rank: milestone.rank,
            label: milestone.label,
            date,
            state,
        });
    }

    steps
}
