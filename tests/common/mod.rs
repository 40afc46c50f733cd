// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use billwatch::TrackerService;
use billwatch::domain::{Amount, FixedClock};
use chrono::NaiveDate;

/// Helper to parse a dd.mm.yyyy date string into a NaiveDate
pub fn date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%d.%m.%Y").unwrap()
}

/// Helper to create a tracker whose "today" is fixed
pub fn test_service(today: &str) -> TrackerService {
    TrackerService::new(FixedClock(date(today)))
}

/// Whole-unit amount shorthand
pub fn rub(units: i64) -> Amount {
    Amount::from_units(units)
}

/// Test fixture: a month of typical utility bills
pub struct StandardBills;

impl StandardBills {
    /// Reminders for water, gas and electricity in April 2024
    pub fn add_april_reminders(service: &mut TrackerService) {
        service
            .add_reminder("Вода", rub(800), "05.04.2024", Some(30))
            .unwrap();
        service
            .add_reminder("Газ", rub(700), "15.04.2024", None)
            .unwrap();
        service
            .add_reminder("Электричество", rub(1200), "25.04.2024", Some(30))
            .unwrap();
    }
}
