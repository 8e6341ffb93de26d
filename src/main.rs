use anyhow::{Context, bail};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rust_decimal::Decimal;
use std::time::Duration;

use lounge_scheduler::domain::catalog::beverage::BeverageSelections;
use lounge_scheduler::domain::clock::clock::{SharedClock, SystemClock};
use lounge_scheduler::domain::lounge::config::LoungeConfig;
use lounge_scheduler::domain::lounge::engine::{DerivedViews, LoungeEngine};
use lounge_scheduler::domain::lounge::views::EntriesFilter;
use lounge_scheduler::domain::pricing::pricing_engine::{PricingEngine, hours_from_minutes};
use lounge_scheduler::domain::session::status::SessionStatus;
use lounge_scheduler::domain::utils::time_format::format_12h;
use lounge_scheduler::{load_config, load_snapshot, logger};

#[derive(Debug, Parser)]
#[command(name = "lounge", about = "Session and station scheduling for a gaming lounge")]
struct Cli {
    /// Lounge configuration (JSON). The built-in lounge is used when omitted.
    #[arg(long, global = true)]
    config: Option<String>,

    /// Pretend the clock reads this instant (`YYYY-MM-DD HH:MM`). It keeps running from there.
    #[arg(long, global = true)]
    at: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the bookable time slots of a day.
    Slots {
        /// `YYYY-MM-DD`, defaults to today.
        #[arg(long)]
        date: Option<String>,
    },
    /// Price a session.
    Quote {
        #[arg(long)]
        option: String,
        #[arg(long)]
        minutes: u32,
        #[arg(long)]
        discount: bool,
        /// Hourly rate for the variable rate option.
        #[arg(long)]
        rate: Option<Decimal>,
        /// `NAME=QUANTITY`, repeatable.
        #[arg(long = "beverage")]
        beverages: Vec<String>,
    },
    /// Print the derived views of a stored snapshot once.
    Status {
        #[arg(long)]
        snapshot: String,
        /// Show every session of today instead of running and recently ended ones.
        #[arg(long)]
        all_today: bool,
    },
    /// Re-read a snapshot and print the views on every tick until Ctrl-C.
    Watch {
        #[arg(long)]
        snapshot: String,
        #[arg(long, default_value_t = 1)]
        interval_secs: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref()).context("loading the lounge configuration")?;
    let clock = match cli.at.as_deref() {
        Some(at) => SharedClock::new(SystemClock::starting_at(parse_instant(at)?)),
        None => SharedClock::new(SystemClock::new()),
    };

    match cli.command {
        Command::Slots { date } => print_slots(config, clock, date.as_deref()),
        Command::Quote { option, minutes, discount, rate, beverages } => print_quote(&config, &option, minutes, discount, rate, &beverages),
        Command::Status { snapshot, all_today } => {
            let mut engine = LoungeEngine::new(config, clock);
            if all_today {
                engine.entries_filter = EntriesFilter::AllToday;
            }

            let snapshot = load_snapshot(&snapshot, engine.config())?;
            print_views(&engine.evaluate(&snapshot));
            Ok(())
        }
        Command::Watch { snapshot, interval_secs } => watch(LoungeEngine::new(config, clock), &snapshot, interval_secs).await,
    }
}

fn parse_instant(value: &str) -> anyhow::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), "%Y-%m-%d %H:%M").with_context(|| format!("'{}' is not of the form YYYY-MM-DD HH:MM", value))
}

fn print_slots(config: LoungeConfig, clock: SharedClock, date: Option<&str>) -> anyhow::Result<()> {
    let engine = LoungeEngine::new(config, clock);
    let now = engine.now();
    let date = match date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("'{}' is not a YYYY-MM-DD date", raw))?,
        None => now.date(),
    };

    let slots = engine.slot_generator().slots(date, now);
    if slots.is_empty() {
        println!("{}", format!("No bookable slots on {}.", date).yellow());
    }
    for slot in slots {
        println!("{}", slot);
    }

    Ok(())
}

fn print_quote(config: &LoungeConfig, option: &str, minutes: u32, discount: bool, rate: Option<Decimal>, beverages: &[String]) -> anyhow::Result<()> {
    if config.gaming_options.get(option).is_none() {
        bail!("unknown gaming option '{}'", option);
    }

    let mut selections = BeverageSelections::new();
    for entry in beverages {
        let Some((name, quantity)) = entry.rsplit_once('=') else {
            bail!("beverage '{}' must be given as NAME=QUANTITY", entry);
        };
        let quantity: u32 = quantity.trim().parse().with_context(|| format!("invalid quantity in '{}'", entry))?;
        selections.insert(config.beverages.resolve_key(name.trim()), quantity);
    }

    let pricing = PricingEngine::new(&config.gaming_options, &config.beverages);
    let quote = pricing.quote(option, hours_from_minutes(minutes), rate, discount, &selections);

    println!("Gaming:    {}", quote.gaming);
    println!("Beverages: {}", quote.beverage);
    println!("{}", format!("Total:     {}", quote.total).bold());

    Ok(())
}

async fn watch(mut engine: LoungeEngine, snapshot_path: &str, interval_secs: u64) -> anyhow::Result<()> {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match load_snapshot(snapshot_path, engine.config()) {
                    Ok(snapshot) => print_views(&engine.evaluate(&snapshot)),
                    Err(e) => log::error!("Skipping tick, snapshot could not be loaded: {}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("Received Ctrl-C, stopping the tick loop.");
                return Ok(());
            }
        }
    }
}

fn print_views(views: &DerivedViews) {
    println!("{}", format!("== {} ==", views.now.format("%Y-%m-%d %H:%M:%S")).bold());

    for row in &views.entries {
        let line = format!(
            "#{:<3} {:<16} {:<14} {:<6} {:>5.0}%  {}",
            row.session.serial_number,
            row.session.customer_name,
            row.session.gaming_option,
            row.session.station.as_ref().map(|station| station.as_str()).unwrap_or("-"),
            row.status.percentage,
            row.status.display
        );

        let line = match row.status.status {
            SessionStatus::Active => line.green(),
            SessionStatus::CriticalMinutes => line.yellow(),
            SessionStatus::FinalSeconds => line.red().bold(),
            SessionStatus::TimeUp => line.dimmed(),
        };
        println!("{}", line);
    }

    let summary = &views.station_summary;
    println!(
        "Stations free: {}/{} single, {}/{} shared ({} slots open)",
        summary.single_available, summary.single_total, summary.shared_available, summary.shared_total, summary.shared_free_slots
    );

    for session in &views.recently_finished {
        println!("Finished at {}: {} ({})", format_12h(session.exit_time), session.customer_name, session.gaming_option);
    }

    for booking in &views.upcoming_bookings {
        println!("Upcoming: {} for {} ({} players)", booking.time_slot, booking.customer_name, booking.num_players);
    }

    if let Some(alert) = &views.notifications.expiry_alert {
        println!("{}", format!("TIME'S UP: {} on {}", alert.customer_name, alert.station.as_ref().map(|s| s.as_str()).unwrap_or("-")).red().bold());
    }

    if let Some(reminder) = &views.notifications.booking_reminder {
        println!("{}", format!("BOOKING: {} at {}", reminder.customer_name, reminder.time_slot).cyan().bold());
    }

    println!("Today's collection: {}", views.today_collection);
}
