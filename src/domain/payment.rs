use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Amount, ByService};

pub type PaymentId = Uuid;

/// A payment made for a service. Payments are immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub amount: Amount,
    pub date: NaiveDate,
}

impl Payment {
    pub fn new(amount: Amount, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            date,
        }
    }
}

/// Payment count and sum for one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTotal {
    pub service: String,
    pub count: usize,
    pub total: Amount,
}

/// Payments grouped by service, in the order they were recorded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentLedger {
    payments: ByService<Payment>,
}

impl PaymentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a payment to the service's history.
    pub fn record(&mut self, service: &str, amount: Amount, date: NaiveDate) -> &Payment {
        self.payments.push(service, Payment::new(amount, date))
    }

    /// Payments for a service in insertion order, `None` when the service has none.
    pub fn payments_for(&self, service: &str) -> Option<&[Payment]> {
        self.payments.get(service)
    }

    pub fn totals_by_service(&self) -> Vec<ServiceTotal> {
        self.payments
            .iter()
            .map(|(service, payments)| ServiceTotal {
                service: service.to_string(),
                count: payments.len(),
                total: payments.iter().map(|p| p.amount).sum(),
            })
            .collect()
    }

    pub fn grand_total(&self) -> Amount {
        self.payments.values().map(|p| p.amount).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Payment])> {
        self.payments.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.payments.len()
    }
}
