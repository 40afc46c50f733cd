use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Amount, DateFormatError, Payment, Reminder, ServiceTotal, format_date};

/// Per-service totals plus the overall sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub services: Vec<ServiceTotal>,
    pub grand_total: Amount,
}

/// Outcome of recording a payment.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub service: String,
    pub payment: Payment,
    /// Set when the date input was malformed and "today" was stored instead.
    pub date_error: Option<DateFormatError>,
    /// Reminder that this payment settled, if one was due on the payment date.
    pub settled_reminder: Option<Reminder>,
}

impl PaymentReceipt {
    pub fn display_date(&self) -> String {
        format_date(self.payment.date)
    }
}

/// Outcome of adding a reminder.
#[derive(Debug, Clone)]
pub struct ReminderReceipt {
    pub reminder: Reminder,
    pub date_error: Option<DateFormatError>,
}

impl ReminderReceipt {
    pub fn display_due_date(&self) -> String {
        format_date(self.reminder.due_date)
    }
}

/// A reminder row as shown in listings and exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderLine {
    pub service: String,
    pub expected_amount: Amount,
    pub due_date: String,
    pub period_days: Option<u32>,
    pub days_from_reference: i64,
}

impl ReminderLine {
    pub fn new(reminder: &Reminder, reference: NaiveDate) -> Self {
        Self {
            service: reminder.service.clone(),
            expected_amount: reminder.expected_amount,
            due_date: format_date(reminder.due_date),
            period_days: reminder.period_days,
            days_from_reference: (reminder.due_date - reference).num_days(),
        }
    }
}
