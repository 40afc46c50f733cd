use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{LedgerSummary, TrackerService};
use crate::domain::{Payment, Reminder, format_date};

/// Payments of one service, in recording order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicePayments {
    pub service: String,
    pub payments: Vec<Payment>,
}

/// Everything recorded in the current session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub payments: Vec<ServicePayments>,
    pub reminders: Vec<Reminder>,
    pub summary: LedgerSummary,
}

/// What the exporter should write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Payments,
    Reminders,
    Full,
}

impl ExportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportKind::Payments => "payments",
            ExportKind::Reminders => "reminders",
            ExportKind::Full => "full",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "payments" => Some(ExportKind::Payments),
            "reminders" => Some(ExportKind::Reminders),
            "full" => Some(ExportKind::Full),
            _ => None,
        }
    }
}

/// Writes session data as CSV or JSON.
pub struct Exporter<'a> {
    service: &'a TrackerService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a TrackerService) -> Self {
        Self { service }
    }

    /// Write `kind` to `writer`, returning the number of records written.
    pub fn export<W: Write>(&self, kind: ExportKind, writer: W) -> Result<usize> {
        match kind {
            ExportKind::Payments => self.export_payments_csv(writer),
            ExportKind::Reminders => self.export_reminders_csv(writer),
            ExportKind::Full => {
                let snapshot = self.export_full_json(writer)?;
                let payments: usize = snapshot.payments.iter().map(|s| s.payments.len()).sum();
                Ok(payments + snapshot.reminders.len())
            }
        }
    }

    /// Export payments to CSV format
    pub fn export_payments_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["service", "id", "date", "amount"])?;

        let mut count = 0;
        for (service, payments) in self.service.ledger().iter() {
            for payment in payments {
                csv_writer.write_record([
                    service.to_string(),
                    payment.id.to_string(),
                    format_date(payment.date),
                    payment.amount.to_string(),
                ])?;
                count += 1;
            }
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export reminders to CSV format, paid ones included
    pub fn export_reminders_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record([
            "service",
            "id",
            "due_date",
            "expected_amount",
            "period_days",
            "status",
        ])?;

        let mut count = 0;
        for reminder in self.service.reminder_book().iter() {
            csv_writer.write_record([
                reminder.service.clone(),
                reminder.id.to_string(),
                format_date(reminder.due_date),
                reminder.expected_amount.to_string(),
                reminder
                    .period_days
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
                reminder.status().as_str().to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the whole session as a JSON snapshot
    pub fn export_full_json<W: Write>(&self, mut writer: W) -> Result<SessionSnapshot> {
        let payments = self
            .service
            .ledger()
            .iter()
            .map(|(service, payments)| ServicePayments {
                service: service.to_string(),
                payments: payments.to_vec(),
            })
            .collect();

        let snapshot = SessionSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            payments,
            reminders: self.service.reminder_book().iter().cloned().collect(),
            summary: self.service.summary(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_kind_roundtrip() {
        for kind in [ExportKind::Payments, ExportKind::Reminders, ExportKind::Full] {
            assert_eq!(ExportKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(ExportKind::from_str(" Payments "), Some(ExportKind::Payments));
        assert_eq!(ExportKind::from_str("budgets"), None);
    }
}
