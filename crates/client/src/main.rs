//! calgrid-client CLI entry point.

use std::process::ExitCode;
use std::time::Duration;

use calgrid_client::cli::events::EventsAction;
use calgrid_client::cli::month::MonthCommand;
use calgrid_client::cli::{Cli, Commands, OutputFormat};
use calgrid_client::output::{format_output, pretty};
use calgrid_client::{fetch_range, CalendarController, CalgridClient, ClientError, Result};
use calgrid_core::calendar::{build_month_cells, DraftField, Event, EventId, ViewMode};
use calgrid_core::serde::parse_date;
use calgrid_core::storage::{DateRange, EventStore};
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let timeout = Duration::from_secs(cli.timeout_secs);
    let client = CalgridClient::new(&cli.base_url, timeout)?;
    let today = chrono::Local::now().date_naive();
    let format = cli.format;

    match cli.command {
        Commands::Month(cmd) => show_month(client, &cmd, today, timeout, format).await,
        Commands::Events(events_cmd) => match events_cmd.action {
            EventsAction::List { start, end } => {
                let range = DateRange::new(start, end)?;
                let events = fetch_range(&client, range, timeout).await;
                match format {
                    OutputFormat::Json => println!("{}", format_output(&events, format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_events(&events)),
                }
                Ok(())
            }
            EventsAction::Get { id } => {
                let event = client.get_event(&EventId::new(id)).await?;
                print_event(&event, None, format);
                Ok(())
            }
            EventsAction::Create {
                title,
                date,
                start_time,
                end_time,
                description,
            } => {
                let anchor = parse_date(&date).unwrap_or(today);
                let mut controller = CalendarController::new(client, anchor, timeout);
                controller.open_new(anchor)?;
                apply_edits(
                    &mut controller,
                    [
                        (DraftField::Title, Some(title)),
                        (DraftField::Date, Some(date)),
                        (DraftField::StartTime, Some(start_time)),
                        (DraftField::EndTime, Some(end_time)),
                        (DraftField::Description, description),
                    ],
                )?;
                let event = controller.submit().await?;
                print_event(&event, Some("Created"), format);
                Ok(())
            }
            EventsAction::Update {
                id,
                title,
                date,
                start_time,
                end_time,
                description,
            } => {
                let anchor = date.as_deref().and_then(|d| parse_date(d).ok());
                let mut controller =
                    CalendarController::new(client, anchor.unwrap_or(today), timeout);
                controller.open_event(&EventId::new(id)).await?;
                apply_edits(
                    &mut controller,
                    [
                        (DraftField::Title, title),
                        (DraftField::Date, date),
                        (DraftField::StartTime, start_time),
                        (DraftField::EndTime, end_time),
                        (DraftField::Description, description),
                    ],
                )?;
                let event = controller.submit().await?;
                print_event(&event, Some("Updated"), format);
                Ok(())
            }
            EventsAction::Delete { id } => {
                let id = EventId::new(id);
                let mut controller = CalendarController::new(client, today, timeout);
                controller.delete(&id).await?;
                if !cli.quiet {
                    println!("Deleted event {}", id);
                }
                Ok(())
            }
        },
        Commands::Health => {
            let health = client.health().await?;
            match format {
                OutputFormat::Json => println!("{}", format_output(&health, format)),
                OutputFormat::Pretty => println!("{}", pretty::format_health(&health)),
            }
            Ok(())
        }
    }
}

async fn show_month(
    client: CalgridClient,
    cmd: &MonthCommand,
    today: NaiveDate,
    timeout: Duration,
    format: OutputFormat,
) -> Result<()> {
    let mode = ViewMode::from(cmd.mode);
    if !mode.is_implemented() {
        return Err(ClientError::NotImplemented(mode.name()));
    }

    let mut controller = CalendarController::new(client, cmd.anchor(today), timeout);
    controller.set_mode(mode);
    controller.refresh().await;

    let view = controller.view();
    match format {
        OutputFormat::Json => {
            let cells = build_month_cells(&view.grid(), view.events.as_slice(), today);
            println!("{}", format_output(&cells, format));
        }
        OutputFormat::Pretty => print!("{}", pretty::format_month(view, today)?),
    }
    Ok(())
}

fn apply_edits<S: EventStore>(
    controller: &mut CalendarController<S>,
    edits: [(DraftField, Option<String>); 5],
) -> Result<()> {
    for (field, value) in edits {
        if let Some(value) = value {
            controller.edit(field, value)?;
        }
    }
    Ok(())
}

fn print_event(event: &Event, label: Option<&str>, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", format_output(event, format)),
        OutputFormat::Pretty => match label {
            Some(label) => println!("{}:\n{}", label, pretty::format_event(event)),
            None => println!("{}", pretty::format_event(event)),
        },
    }
}
