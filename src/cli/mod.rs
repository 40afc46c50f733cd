mod menu;

pub use menu::*;

use std::io::{stdin, stdout};

use anyhow::{Context, Result};
use clap::Parser;

use crate::application::TrackerService;
use crate::domain::{DATE_FORMAT_HINT, FixedClock, SystemClock, parse_date};
use crate::logging::init_tracing;

/// Billwatch - Utility Bill Tracker
#[derive(Parser, Debug)]
#[command(name = "billwatch")]
#[command(about = "Track utility payments and due-date reminders from an interactive menu")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Pretend today is this date (dd.mm.yyyy); used for date fallbacks and reminder status
    #[arg(long)]
    pub today: Option<String>,

    /// Currency label printed after amounts
    #[arg(short, long, default_value = "руб.")]
    pub currency: String,
}

impl Cli {
    /// Build the tracker this invocation asked for.
    pub fn build_service(&self) -> Result<TrackerService> {
        match &self.today {
            Some(input) => {
                let date = parse_date(input).with_context(|| {
                    format!("Invalid --today value '{}'. Use {}", input, DATE_FORMAT_HINT)
                })?;
                Ok(TrackerService::new(FixedClock(date)))
            }
            None => Ok(TrackerService::new(SystemClock)),
        }
    }

    pub fn run(self) -> Result<()> {
        init_tracing(self.verbose);

        let mut service = self.build_service()?;
        tracing::debug!(today = %service.today(), "tracker started");

        let input = stdin().lock();
        let output = stdout().lock();
        Menu::new(&mut service, input, output)
            .with_currency(self.currency)
            .run()
    }
}
