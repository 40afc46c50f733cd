use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::domain::{
    Amount, Clock, ParsedDate, Payment, PaymentLedger, Reminder, ReminderBook, ReminderSchedule,
    ServiceTotal, SystemClock, format_date, parse_date_or,
};

use super::{AppError, LedgerSummary, PaymentReceipt, ReminderReceipt};

/// Application service for the bill tracker.
/// This is the primary interface for any client (menu, tests, exporters).
pub struct TrackerService {
    ledger: PaymentLedger,
    reminders: ReminderBook,
    clock: Box<dyn Clock>,
}

impl Default for TrackerService {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl TrackerService {
    /// Create an empty tracker reading "today" from `clock`.
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            ledger: PaymentLedger::new(),
            reminders: ReminderBook::new(),
            clock: Box::new(clock),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // ========================
    // Payment operations
    // ========================

    /// Record a payment and settle the first unpaid reminder of the same
    /// service that is due on the payment date.
    ///
    /// A malformed date is replaced with today's date and reported in the
    /// receipt rather than failing the call.
    pub fn add_payment(
        &mut self,
        service: &str,
        amount: Amount,
        date_input: &str,
    ) -> Result<PaymentReceipt, AppError> {
        if !amount.is_positive() {
            return Err(AppError::InvalidAmount(format!(
                "payment amount must be positive, got {}",
                amount
            )));
        }

        // payments are positive, so every service total stays below the grand total
        if self.ledger.grand_total().checked_add(amount).is_none() {
            return Err(AppError::InvalidAmount(format!(
                "payment of {} would overflow the recorded totals",
                amount
            )));
        }

        let ParsedDate { date, error } = self.parse_date_lenient(date_input);
        let payment = self.ledger.record(service, amount, date).clone();
        info!(service, amount = %amount, date = %format_date(date), "payment recorded");

        let settled_reminder = match self.reminders.mark_paid(service, Some(date)) {
            Some(reminder) => {
                debug!(service, reminder = %reminder.id, "reminder settled by payment");
                Some(reminder.clone())
            }
            None => None,
        };

        Ok(PaymentReceipt {
            service: service.to_string(),
            payment,
            date_error: error,
            settled_reminder,
        })
    }

    pub fn payments_for(&self, service: &str) -> Result<&[Payment], AppError> {
        self.ledger
            .payments_for(service)
            .ok_or_else(|| AppError::NoPayments(service.to_string()))
    }

    pub fn totals_by_service(&self) -> Vec<ServiceTotal> {
        self.ledger.totals_by_service()
    }

    pub fn grand_total(&self) -> Amount {
        self.ledger.grand_total()
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            services: self.totals_by_service(),
            grand_total: self.grand_total(),
        }
    }

    pub fn ledger(&self) -> &PaymentLedger {
        &self.ledger
    }

    // ========================
    // Reminder operations
    // ========================

    /// Add an unpaid reminder. The due date follows the same fallback rules
    /// as payment dates. A period of zero days is rejected.
    pub fn add_reminder(
        &mut self,
        service: &str,
        expected_amount: Amount,
        due_date_input: &str,
        period_days: Option<u32>,
    ) -> Result<ReminderReceipt, AppError> {
        if period_days == Some(0) {
            return Err(AppError::InvalidPeriod(
                "period must be at least one day".to_string(),
            ));
        }

        let ParsedDate { date, error } = self.parse_date_lenient(due_date_input);
        let mut reminder = Reminder::new(service.to_string(), expected_amount, date);
        if let Some(days) = period_days {
            reminder = reminder.with_period_days(days);
        }

        let reminder = self.reminders.add(reminder).clone();
        info!(service, due = %format_date(date), "reminder added");

        Ok(ReminderReceipt {
            reminder,
            date_error: error,
        })
    }

    /// Mark the first unpaid reminder of `service` paid, optionally only the
    /// one due on `due_date`.
    pub fn mark_paid(
        &mut self,
        service: &str,
        due_date: Option<NaiveDate>,
    ) -> Result<Reminder, AppError> {
        match self.reminders.mark_paid(service, due_date) {
            Some(reminder) => {
                info!(service, due = %format_date(reminder.due_date), "reminder marked paid");
                Ok(reminder.clone())
            }
            None => Err(AppError::NoMatchingReminder {
                service: service.to_string(),
                due_date,
            }),
        }
    }

    /// Unpaid reminders split around `reference`.
    pub fn classify_reminders(&self, reference: NaiveDate) -> ReminderSchedule {
        self.reminders.classify(reference)
    }

    /// Unpaid reminders split around today's date.
    pub fn reminder_schedule(&self) -> ReminderSchedule {
        self.classify_reminders(self.today())
    }

    pub fn reminders_for(&self, service: &str) -> &[Reminder] {
        self.reminders.reminders_for(service).unwrap_or_default()
    }

    pub fn reminder_book(&self) -> &ReminderBook {
        &self.reminders
    }

    fn parse_date_lenient(&self, input: &str) -> ParsedDate {
        let today = self.today();
        let parsed = parse_date_or(input, today);
        if let Some(error) = &parsed.error {
            warn!(%error, fallback = %format_date(today), "using today's date");
        }
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FixedClock, PaymentStatus};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service_on(date: NaiveDate) -> TrackerService {
        TrackerService::new(FixedClock(date))
    }

    #[test]
    fn test_add_payment_reports_display_date() {
        let mut service = service_on(ymd(2024, 4, 20));
        let receipt = service
            .add_payment("Вода", Amount::from_units(800), "5.4.2024")
            .unwrap();

        assert_eq!(receipt.display_date(), "05.04.2024");
        assert!(receipt.date_error.is_none());
        assert!(receipt.settled_reminder.is_none());
    }

    #[test]
    fn test_add_payment_rejects_non_positive_amount() {
        let mut service = service_on(ymd(2024, 4, 20));

        for amount in [Amount::ZERO, Amount::from_units(-5)] {
            let err = service.add_payment("Газ", amount, "01.04.2024").unwrap_err();
            assert!(matches!(err, AppError::InvalidAmount(_)));
        }
        assert!(service.ledger().is_empty());
    }

    #[test]
    fn test_add_payment_rejects_total_overflow() {
        let mut service = service_on(ymd(2024, 4, 20));
        let big: Amount = "92233720368547758".parse().unwrap();

        service.add_payment("Вода", big, "05.04.2024").unwrap();
        let err = service.add_payment("Вода", big, "05.05.2024").unwrap_err();
        assert!(matches!(err, AppError::InvalidAmount(_)));

        assert_eq!(service.payments_for("Вода").unwrap().len(), 1);
        assert_eq!(service.grand_total(), big);
    }

    #[test]
    fn test_payment_only_settles_reminder_due_same_day() {
        let mut service = service_on(ymd(2024, 4, 20));
        service
            .add_reminder("Вода", Amount::from_units(800), "05.04.2024", None)
            .unwrap();

        let receipt = service
            .add_payment("Вода", Amount::from_units(800), "06.04.2024")
            .unwrap();
        assert!(receipt.settled_reminder.is_none());
        assert_eq!(service.reminders_for("Вода")[0].status(), PaymentStatus::Unpaid);
    }

    #[test]
    fn test_zero_period_rejected() {
        let mut service = service_on(ymd(2024, 4, 20));
        let err = service
            .add_reminder("Вода", Amount::from_units(800), "05.04.2024", Some(0))
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidPeriod(_)));
        assert!(service.reminder_book().is_empty());
    }

    #[test]
    fn test_reminders_for_unknown_service_is_empty() {
        let service = service_on(ymd(2024, 4, 20));
        assert!(service.reminders_for("Интернет").is_empty());
    }
}
