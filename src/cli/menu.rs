use std::fs::File;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::application::{ReminderLine, TrackerService};
use crate::domain::{Amount, DATE_FORMAT_HINT, format_date, parse_date};
use crate::io::{ExportKind, Exporter};

const MENU: &str = "
=== Utility payments ===
1. Add payment
2. Add reminder
3. Show all payments
4. Show payments for a service
5. Show reminders
6. Mark reminder paid
7. Total spent
8. Export data
9. Exit";

/// Whether the loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Numbered text menu over any line-based input and output.
///
/// Every bad input and failed export is reported and the loop returns to the
/// menu; only console I/O failures end it with an error. End of input behaves
/// like "Exit".
pub struct Menu<'a, R, W> {
    service: &'a mut TrackerService,
    input: R,
    output: W,
    currency: String,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(service: &'a mut TrackerService, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
            currency: "руб.".to_string(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn run(mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("Choose an action: ")? else {
                break;
            };

            let flow = match choice.as_str() {
                "1" => self.add_payment()?,
                "2" => self.add_reminder()?,
                "3" => self.show_all_payments()?,
                "4" => self.show_service_payments()?,
                "5" => self.show_reminders()?,
                "6" => self.mark_paid()?,
                "7" => self.show_total()?,
                "8" => self.export()?,
                "9" => {
                    writeln!(self.output, "Goodbye.")?;
                    Flow::Exit
                }
                _ => {
                    writeln!(self.output, "Invalid choice. Try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }

        self.output.flush()?;
        Ok(())
    }

    fn add_payment(&mut self) -> Result<Flow> {
        let Some(service) = self.prompt_service("Service (electricity, water, ...): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(amount) = self.prompt_amount("Payment amount: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(date) = self.prompt(&format!("Payment date ({}): ", DATE_FORMAT_HINT))? else {
            return Ok(Flow::Exit);
        };

        let (Some(service), Some(amount)) = (service, amount) else {
            return Ok(Flow::Continue);
        };

        match self.service.add_payment(&service, amount, &date) {
            Ok(receipt) => {
                if let Some(error) = &receipt.date_error {
                    writeln!(
                        self.output,
                        "{}. Using today's date {}.",
                        capitalize(&error.to_string()),
                        receipt.display_date()
                    )?;
                }
                writeln!(
                    self.output,
                    "Added payment: {} - {} {} ({})",
                    receipt.service,
                    receipt.payment.amount,
                    self.currency,
                    receipt.display_date()
                )?;
                if let Some(reminder) = &receipt.settled_reminder {
                    writeln!(
                        self.output,
                        "Reminder due {} marked as paid.",
                        format_date(reminder.due_date)
                    )?;
                }
            }
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }
        Ok(Flow::Continue)
    }

    fn add_reminder(&mut self) -> Result<Flow> {
        let Some(service) = self.prompt_service("Service: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(amount) = self.prompt_amount("Expected amount: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(due) = self.prompt(&format!("Due date ({}): ", DATE_FORMAT_HINT))? else {
            return Ok(Flow::Exit);
        };
        let Some(period) = self.prompt("Repeat every N days (empty for none): ")? else {
            return Ok(Flow::Exit);
        };

        let (Some(service), Some(amount)) = (service, amount) else {
            return Ok(Flow::Continue);
        };
        let period_days = if period.is_empty() {
            None
        } else {
            match period.parse::<u32>() {
                Ok(days) => Some(days),
                Err(_) => {
                    writeln!(
                        self.output,
                        "Invalid period '{}': enter a whole number of days.",
                        period
                    )?;
                    return Ok(Flow::Continue);
                }
            }
        };

        match self.service.add_reminder(&service, amount, &due, period_days) {
            Ok(receipt) => {
                if let Some(error) = &receipt.date_error {
                    writeln!(
                        self.output,
                        "{}. Using today's date {}.",
                        capitalize(&error.to_string()),
                        receipt.display_due_date()
                    )?;
                }
                writeln!(
                    self.output,
                    "Added reminder: {} - {} {} due {}",
                    receipt.reminder.service,
                    receipt.reminder.expected_amount,
                    self.currency,
                    receipt.display_due_date()
                )?;
            }
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }
        Ok(Flow::Continue)
    }

    fn show_all_payments(&mut self) -> Result<Flow> {
        let totals = self.service.totals_by_service();
        if totals.is_empty() {
            writeln!(self.output, "No payments yet.")?;
            return Ok(Flow::Continue);
        }

        writeln!(self.output, "\nAll payments:")?;
        for total in totals {
            writeln!(
                self.output,
                "{}: {} payment(s), total {} {}",
                total.service, total.count, total.total, self.currency
            )?;
        }
        Ok(Flow::Continue)
    }

    fn show_service_payments(&mut self) -> Result<Flow> {
        let Some(service) = self.prompt("Service: ")? else {
            return Ok(Flow::Exit);
        };

        if self.service.ledger().is_empty() {
            writeln!(self.output, "No payments yet.")?;
            return Ok(Flow::Continue);
        }

        match self.service.payments_for(&service) {
            Ok(payments) => {
                writeln!(self.output, "\nPayments for {}:", service)?;
                for (i, payment) in payments.iter().enumerate() {
                    writeln!(
                        self.output,
                        "{}. {} {} - {}",
                        i + 1,
                        payment.amount,
                        self.currency,
                        format_date(payment.date)
                    )?;
                }
            }
            Err(e) => writeln!(self.output, "{}.", e)?,
        }
        Ok(Flow::Continue)
    }

    fn show_reminders(&mut self) -> Result<Flow> {
        let schedule = self.service.reminder_schedule();
        let today = self.service.today();

        if schedule.is_empty() {
            writeln!(self.output, "No pending reminders.")?;
            return Ok(Flow::Continue);
        }

        if !schedule.overdue.is_empty() {
            writeln!(self.output, "\nOverdue:")?;
            for reminder in &schedule.overdue {
                let line = ReminderLine::new(reminder, today);
                let when = format!("{} day(s) overdue", -line.days_from_reference);
                self.write_reminder_line(&line, &when)?;
            }
        }

        if !schedule.upcoming.is_empty() {
            writeln!(self.output, "\nUpcoming:")?;
            for reminder in &schedule.upcoming {
                let line = ReminderLine::new(reminder, today);
                let when = match line.days_from_reference {
                    0 => "today".to_string(),
                    days => format!("in {} day(s)", days),
                };
                self.write_reminder_line(&line, &when)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn write_reminder_line(&mut self, line: &ReminderLine, when: &str) -> Result<()> {
        let repeat = line
            .period_days
            .map(|days| format!(", every {} day(s)", days))
            .unwrap_or_default();
        writeln!(
            self.output,
            "  {}: {} {} due {} ({}{})",
            line.service, line.expected_amount, self.currency, line.due_date, when, repeat
        )?;
        Ok(())
    }

    fn mark_paid(&mut self) -> Result<Flow> {
        let Some(service) = self.prompt("Service: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(date) = self.prompt(&format!(
            "Due date ({}, empty for the earliest unpaid): ",
            DATE_FORMAT_HINT
        ))?
        else {
            return Ok(Flow::Exit);
        };

        let due_date = if date.is_empty() {
            None
        } else {
            match parse_date(&date) {
                Ok(d) => Some(d),
                Err(e) => {
                    writeln!(self.output, "{}.", capitalize(&e.to_string()))?;
                    return Ok(Flow::Continue);
                }
            }
        };

        match self.service.mark_paid(&service, due_date) {
            Ok(reminder) => writeln!(
                self.output,
                "Marked paid: {} - {} {} due {}",
                reminder.service,
                reminder.expected_amount,
                self.currency,
                format_date(reminder.due_date)
            )?,
            Err(e) => writeln!(self.output, "{}.", e)?,
        }
        Ok(Flow::Continue)
    }

    fn show_total(&mut self) -> Result<Flow> {
        writeln!(
            self.output,
            "\nTotal spent on utilities: {} {}",
            self.service.grand_total(),
            self.currency
        )?;
        Ok(Flow::Continue)
    }

    fn export(&mut self) -> Result<Flow> {
        let Some(kind) = self.prompt("Export what (payments, reminders, full): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(path) = self.prompt("Output file (empty for screen): ")? else {
            return Ok(Flow::Exit);
        };

        let Some(kind) = ExportKind::from_str(&kind) else {
            writeln!(
                self.output,
                "Unknown export '{}'. Choose payments, reminders or full.",
                kind
            )?;
            return Ok(Flow::Continue);
        };

        if let Err(e) = self.write_export(kind, &path) {
            writeln!(self.output, "Error: {:#}", e)?;
        }
        Ok(Flow::Continue)
    }

    fn write_export(&mut self, kind: ExportKind, path: &str) -> Result<()> {
        let exporter = Exporter::new(&*self.service);
        if path.is_empty() {
            exporter.export(kind, &mut self.output)?;
            writeln!(self.output)?;
        } else {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            let count = exporter.export(kind, file)?;
            writeln!(
                self.output,
                "Exported {} {} record(s) to {}",
                count,
                kind.as_str(),
                path
            )?;
        }
        Ok(())
    }

    /// Print `label` and read one trimmed line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Outer `None` at end of input; inner `None` when the name was blank.
    fn prompt_service(&mut self, label: &str) -> Result<Option<Option<String>>> {
        let Some(service) = self.prompt(label)? else {
            return Ok(None);
        };
        if service.is_empty() {
            writeln!(self.output, "Service name cannot be empty.")?;
            return Ok(Some(None));
        }
        Ok(Some(Some(service)))
    }

    /// Outer `None` at end of input; inner `None` when the amount did not parse.
    fn prompt_amount(&mut self, label: &str) -> Result<Option<Option<Amount>>> {
        let Some(input) = self.prompt(label)? else {
            return Ok(None);
        };
        match input.parse::<Amount>() {
            Ok(amount) => Ok(Some(Some(amount))),
            Err(e) => {
                writeln!(self.output, "{}.", capitalize(&e.to_string()))?;
                Ok(Some(None))
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("invalid date"), "Invalid date");
        assert_eq!(capitalize(""), "");
    }
}
