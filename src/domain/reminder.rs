use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Amount, ByService};

pub type ReminderId = Uuid;

/// Whether a reminder has been settled. `Paid` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An expected payment for a service, due on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub service: String,
    pub expected_amount: Amount,
    pub due_date: NaiveDate,
    /// Recurrence interval. Recorded for display; no follow-up reminder is created from it.
    pub period_days: Option<u32>,
    status: PaymentStatus,
}

impl Reminder {
    pub fn new(service: String, expected_amount: Amount, due_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            service,
            expected_amount,
            due_date,
            period_days: None,
            status: PaymentStatus::Unpaid,
        }
    }

    pub fn with_period_days(mut self, period_days: u32) -> Self {
        self.period_days = Some(period_days);
        self
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn is_paid(&self) -> bool {
        self.status == PaymentStatus::Paid
    }

    /// Due strictly before `reference`.
    pub fn is_overdue(&self, reference: NaiveDate) -> bool {
        self.due_date < reference
    }

    fn settle(&mut self) {
        self.status = PaymentStatus::Paid;
    }
}

/// Unpaid reminders split around a reference date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSchedule {
    pub reference: Option<NaiveDate>,
    /// Due on or after the reference date.
    pub upcoming: Vec<Reminder>,
    /// Due before the reference date.
    pub overdue: Vec<Reminder>,
}

impl ReminderSchedule {
    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty() && self.overdue.is_empty()
    }
}

/// Reminders grouped by service, in the order they were added.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReminderBook {
    reminders: ByService<Reminder>,
}

impl ReminderBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, reminder: Reminder) -> &Reminder {
        let service = reminder.service.clone();
        self.reminders.push(&service, reminder)
    }

    /// Mark the first unpaid reminder of `service` paid, optionally requiring
    /// an exact due date. At most one reminder changes per call.
    ///
    /// Returns the settled reminder, or `None` when nothing matched.
    pub fn mark_paid(&mut self, service: &str, due_date: Option<NaiveDate>) -> Option<&Reminder> {
        let reminders = self.reminders.get_mut(service)?;
        let reminder = reminders
            .iter_mut()
            .find(|r| !r.is_paid() && due_date.is_none_or(|date| r.due_date == date))?;
        reminder.settle();
        Some(&*reminder)
    }

    /// Split all unpaid reminders into upcoming and overdue relative to
    /// `reference`. Order follows service order, then insertion order.
    pub fn classify(&self, reference: NaiveDate) -> ReminderSchedule {
        let (overdue, upcoming): (Vec<Reminder>, Vec<Reminder>) = self
            .reminders
            .values()
            .filter(|r| !r.is_paid())
            .cloned()
            .partition(|r| r.is_overdue(reference));

        ReminderSchedule {
            reference: Some(reference),
            upcoming,
            overdue,
        }
    }

    pub fn reminders_for(&self, service: &str) -> Option<&[Reminder]> {
        self.reminders.get(service)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reminder> {
        self.reminders.values()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }
}
