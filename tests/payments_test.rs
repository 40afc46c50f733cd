mod common;

use billwatch::application::AppError;
use billwatch::domain::{Amount, PaymentStatus, format_date};
use common::{StandardBills, date, rub, test_service};

#[test]
fn test_payments_keep_insertion_order_and_values() {
    let mut service = test_service("20.04.2024");

    let inputs = [
        (Amount::from_minor(80050), "05.04.2024"),
        (rub(750), "05.03.2024"),
        (rub(820), "05.05.2024"),
        (Amount::from_minor(1), "01.01.2024"),
    ];
    for (amount, day) in inputs {
        service.add_payment("Вода", amount, day).unwrap();
    }

    let stored: Vec<_> = service
        .payments_for("Вода")
        .unwrap()
        .iter()
        .map(|p| (p.amount, format_date(p.date)))
        .collect();
    let expected: Vec<_> = inputs
        .iter()
        .map(|(amount, day)| (*amount, day.to_string()))
        .collect();

    assert_eq!(stored, expected);
}

#[test]
fn test_malformed_date_falls_back_to_today() {
    let mut service = test_service("20.04.2024");

    let receipt = service.add_payment("Газ", rub(700), "15/04/2024").unwrap();

    let error = receipt.date_error.as_ref().expect("date error reported");
    assert_eq!(error.input, "15/04/2024");
    assert_eq!(receipt.payment.date, date("20.04.2024"));
    assert_eq!(receipt.display_date(), "20.04.2024");

    let stored = service.payments_for("Газ").unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].date, date("20.04.2024"));
}

#[test]
fn test_payments_for_unknown_service() {
    let mut service = test_service("20.04.2024");
    service.add_payment("Вода", rub(800), "05.04.2024").unwrap();

    let err = service.payments_for("Интернет").unwrap_err();
    assert_eq!(err, AppError::NoPayments("Интернет".to_string()));

    // keys are not normalized
    assert!(service.payments_for("вода").is_err());
}

#[test]
fn test_totals_and_grand_total() {
    let mut service = test_service("20.04.2024");
    assert!(service.totals_by_service().is_empty());
    assert_eq!(service.grand_total(), Amount::ZERO);

    service.add_payment("Электричество", rub(1200), "01.04.2024").unwrap();
    service.add_payment("Вода", rub(800), "05.04.2024").unwrap();
    service
        .add_payment("Электричество", Amount::from_minor(30025), "01.05.2024")
        .unwrap();

    let totals = service.totals_by_service();
    let rows: Vec<_> = totals
        .iter()
        .map(|t| (t.service.as_str(), t.count, t.total))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Электричество", 2, Amount::from_minor(150025)),
            ("Вода", 1, rub(800)),
        ]
    );

    let sum: Amount = totals.iter().map(|t| t.total).sum();
    assert_eq!(service.grand_total(), sum);
    assert_eq!(service.grand_total(), Amount::from_minor(230025));

    let summary = service.summary();
    assert_eq!(summary.services, totals);
    assert_eq!(summary.grand_total, sum);
}

#[test]
fn test_payment_settles_reminder_due_that_day() {
    let mut service = test_service("01.04.2024");
    service.add_reminder("Вода", rub(800), "05.04.2024", None).unwrap();

    let receipt = service.add_payment("Вода", rub(800), "05.04.2024").unwrap();

    let settled = receipt.settled_reminder.expect("reminder settled");
    assert_eq!(settled.due_date, date("05.04.2024"));
    assert_eq!(settled.status(), PaymentStatus::Paid);

    let schedule = service.classify_reminders(date("06.04.2024"));
    assert!(schedule.upcoming.is_empty());
    assert!(schedule.overdue.is_empty());
}

#[test]
fn test_payment_settles_only_its_own_service() {
    let mut service = test_service("01.04.2024");
    StandardBills::add_april_reminders(&mut service);
    service.add_reminder("Газ", rub(700), "05.04.2024", None).unwrap();

    service.add_payment("Вода", rub(800), "05.04.2024").unwrap();

    assert_eq!(service.reminders_for("Вода")[0].status(), PaymentStatus::Paid);
    for reminder in service.reminders_for("Газ") {
        assert_eq!(reminder.status(), PaymentStatus::Unpaid);
    }
}

#[test]
fn test_payment_amount_is_not_checked_against_reminder() {
    let mut service = test_service("01.04.2024");
    service.add_reminder("Газ", rub(700), "15.04.2024", None).unwrap();

    let receipt = service.add_payment("Газ", rub(10), "15.04.2024").unwrap();
    assert!(receipt.settled_reminder.is_some());
}

#[test]
fn test_invalid_amount_is_rejected_without_side_effects() {
    let mut service = test_service("01.04.2024");
    service.add_reminder("Газ", rub(700), "15.04.2024", None).unwrap();

    let err = service.add_payment("Газ", rub(0), "15.04.2024").unwrap_err();
    assert!(matches!(err, AppError::InvalidAmount(_)));

    assert!(service.payments_for("Газ").is_err());
    assert_eq!(service.reminders_for("Газ")[0].status(), PaymentStatus::Unpaid);
}

#[test]
fn test_totals_stay_exact_near_the_limit() {
    let mut service = test_service("20.04.2024");
    let big: Amount = "92233720368547758".parse().unwrap();

    service.add_payment("Вода", big, "05.04.2024").unwrap();
    service.add_payment("Газ", Amount::from_minor(7), "05.04.2024").unwrap();

    let err = service.add_payment("Вода", big, "05.05.2024").unwrap_err();
    assert!(matches!(err, AppError::InvalidAmount(_)));
    let err = service.add_payment("Газ", Amount::from_minor(1), "05.05.2024").unwrap_err();
    assert!(matches!(err, AppError::InvalidAmount(_)));

    assert_eq!(service.grand_total(), Amount::from_minor(i64::MAX));
    let sum: Amount = service.totals_by_service().iter().map(|t| t.total).sum();
    assert_eq!(sum, service.grand_total());
}
