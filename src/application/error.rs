use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::format_date;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("No payments found for {0}")]
    NoPayments(String),

    #[error("No unpaid reminder for {service}{}", due_suffix(.due_date))]
    NoMatchingReminder {
        service: String,
        due_date: Option<NaiveDate>,
    },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid reminder period: {0}")]
    InvalidPeriod(String),
}

fn due_suffix(due_date: &Option<NaiveDate>) -> String {
    match due_date {
        Some(date) => format!(" due {}", format_date(*date)),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            AppError::NoPayments("Интернет".into()).to_string(),
            "No payments found for Интернет"
        );
        assert_eq!(
            AppError::NoMatchingReminder {
                service: "Вода".into(),
                due_date: NaiveDate::from_ymd_opt(2024, 4, 5),
            }
            .to_string(),
            "No unpaid reminder for Вода due 05.04.2024"
        );
        assert_eq!(
            AppError::NoMatchingReminder {
                service: "Вода".into(),
                due_date: None,
            }
            .to_string(),
            "No unpaid reminder for Вода"
        );
    }
}
