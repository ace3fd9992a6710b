//! Command-driven front end over a [`FormSession`].

use std::io::Write;

use anyhow::Context;
use elec_area_http::HttpCheckerFactory;
use elec_core::{
    CheckerRegistry, ContractCapacity, FormSession, ParseValueError, Plan, PowerCompany,
};
use rust_decimal::Decimal;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use crate::{
    csv_loader::FormEntry,
    logging,
    submit::{SubmitOutcome, handle_submit},
    utils::{ParseDecimalError, parse_amount},
    view::FormView,
};

pub const HELP: &str = "\
commands:
  postal <123> [4567]     set the postal code (also accepts 123-4567)
  company [id]            choose a power company; no id clears it
  plan [id]               choose a plan; no id clears it
  capacity [value]        choose a contract capacity, e.g. 30A or 6kVA
  bill [amount]           last month's bill in yen, e.g. 12,000
  email <address>         contact email
  submit                  submit the form
  show                    redraw the form
  reset                   clear every field
  log <level>             change the log filter, e.g. debug
  help                    this list
  quit                    leave";

/// A registry with every backend this binary ships: `local` and `http`.
pub fn build_registry() -> CheckerRegistry {
    let mut registry = CheckerRegistry::with_local();
    registry.register(Box::new(HttpCheckerFactory));
    registry
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `second: None` edits only the first part.
    Postal {
        first: String,
        second: Option<String>,
    },
    Company(Option<PowerCompany>),
    Plan(Option<Plan>),
    Capacity(Option<ContractCapacity>),
    Bill(Option<Decimal>),
    Email(String),
    Submit,
    Show,
    Reset,
    Log(String),
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command '{0}'; type 'help' for the list")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    InvalidValue(#[from] ParseValueError),

    #[error(transparent)]
    InvalidBill(#[from] ParseDecimalError),

    #[error("{kind} '{value}' is not available for the current selection")]
    NotOffered { kind: &'static str, value: String },

    #[error(transparent)]
    Logging(#[from] anyhow::Error),
}

fn optional_arg<T>(arg: &str) -> Result<Option<T>, CommandError>
where
    T: std::str::FromStr<Err = ParseValueError>,
{
    if arg.is_empty() {
        Ok(None)
    } else {
        Ok(Some(arg.parse()?))
    }
}

impl Command {
    /// `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "postal" => {
                let parts: Vec<&str> = arg
                    .split(|c: char| c == '-' || c.is_whitespace())
                    .filter(|part| !part.is_empty())
                    .collect();
                match parts.as_slice() {
                    [first] => Self::Postal {
                        first: first.to_string(),
                        second: None,
                    },
                    [first, second] => Self::Postal {
                        first: first.to_string(),
                        second: Some(second.to_string()),
                    },
                    _ => return Err(CommandError::Usage("postal <123> [4567]")),
                }
            }
            "company" => Self::Company(optional_arg(arg)?),
            "plan" => Self::Plan(optional_arg(arg)?),
            "capacity" => Self::Capacity(optional_arg(arg)?),
            "bill" => Self::Bill(parse_amount(arg)?),
            "email" => Self::Email(arg.to_string()),
            "submit" => Self::Submit,
            "show" => Self::Show,
            "reset" => Self::Reset,
            "log" if arg.is_empty() => return Err(CommandError::Usage("log <level>")),
            "log" => Self::Log(arg.to_string()),
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(String),
    Quit,
}

pub struct App {
    session: FormSession,
}

impl App {
    pub fn new(session: FormSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn render(&self) -> String {
        FormView::new(self.session.form()).to_string()
    }

    pub async fn execute(
        &mut self,
        command: Command,
    ) -> Result<Flow, CommandError> {
        debug!(?command, "executing");
        match command {
            Command::Postal { first, second } => {
                match second {
                    Some(second) => self.session.set_postal_code(&first, &second).await,
                    None => self.session.set_postal_code_first(&first).await,
                };
            }
            Command::Company(company) => {
                let form = self.session.form_mut();
                if let Some(company) = company {
                    ensure_offered("power company", company, form.available_companies())?;
                }
                form.select_power_company(company);
            }
            Command::Plan(plan) => {
                let form = self.session.form_mut();
                if let Some(plan) = plan {
                    ensure_offered("plan", plan, form.available_plans())?;
                }
                form.select_plan(plan);
            }
            Command::Capacity(capacity) => {
                let form = self.session.form_mut();
                if let Some(capacity) = capacity {
                    ensure_offered("contract capacity", capacity, form.available_capacities())?;
                }
                form.select_contract_capacity(capacity);
            }
            Command::Bill(bill) => self.session.form_mut().set_current_electric_bill(bill),
            Command::Email(email) => self.session.form_mut().set_email(&email),
            Command::Submit => {
                return Ok(Flow::Continue(match handle_submit(self.session.form_mut()) {
                    SubmitOutcome::Confirmed(text) => text,
                    SubmitOutcome::Blocked(reasons) => {
                        format!("{}\n\n{}", bullet_list(&reasons), self.render())
                    }
                }));
            }
            Command::Show => {}
            Command::Reset => self.session.form_mut().reset(),
            Command::Log(level) => {
                logging::set_log_level(&level)?;
                return Ok(Flow::Continue(format!("log filter set to '{level}'")));
            }
            Command::Help => return Ok(Flow::Continue(HELP.to_string())),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue(self.render()))
    }

    /// Feeds one batch entry through the same commands a user would type,
    /// starting from a blank form, then submits.
    pub async fn replay(
        &mut self,
        entry: &FormEntry,
    ) -> SubmitOutcome {
        self.session.form_mut().reset();

        let commands = [
            Command::Postal {
                first: entry.postal_code_first.clone(),
                second: Some(entry.postal_code_second.clone()),
            },
            Command::Company(entry.power_company),
            Command::Plan(entry.plan),
            Command::Capacity(entry.contract_capacity),
            Command::Bill(entry.current_electric_bill),
            Command::Email(entry.email.clone()),
        ];

        let mut rejected = Vec::new();
        for command in commands {
            if let Err(e) = self.execute(command).await {
                rejected.push(e.to_string());
            }
        }

        match handle_submit(self.session.form_mut()) {
            SubmitOutcome::Blocked(mut reasons) => {
                rejected.append(&mut reasons);
                SubmitOutcome::Blocked(rejected)
            }
            confirmed => {
                for reason in &rejected {
                    warn!(reason = %reason, "batch value ignored");
                }
                confirmed
            }
        }
    }
}

fn ensure_offered<T>(
    kind: &'static str,
    value: T,
    options: Vec<elec_core::catalog::SelectOption<T>>,
) -> Result<(), CommandError>
where
    T: PartialEq + std::fmt::Display,
{
    if options.iter().any(|option| option.value == value) {
        Ok(())
    } else {
        Err(CommandError::NotOffered {
            kind,
            value: value.to_string(),
        })
    }
}

pub fn bullet_list(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| format!("  - {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replays every entry and returns one outcome per entry, in order.
pub async fn run_batch(
    app: &mut App,
    entries: &[FormEntry],
) -> Vec<SubmitOutcome> {
    let mut outcomes = Vec::with_capacity(entries.len());
    for entry in entries {
        outcomes.push(app.replay(entry).await);
    }
    outcomes
}

/// Reads commands from stdin until `quit` or end of input.
pub async fn run_interactive(mut app: App) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    println!("{}\n\n{HELP}", app.render());
    loop {
        print!("> ");
        stdout.flush().context("writing prompt")?;

        let Some(line) = lines.next_line().await.context("reading stdin")? else {
            break;
        };
        let reply = match Command::parse(&line) {
            Ok(None) => continue,
            Ok(Some(command)) => app.execute(command).await,
            Err(e) => Err(e),
        };
        match reply {
            Ok(Flow::Continue(output)) => println!("{output}"),
            Ok(Flow::Quit) => break,
            Err(e) => println!("error: {e}"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use elec_core::{ElectricForm, LocalAreaChecker, Locale, ServiceArea};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn app() -> App {
        App::new(FormSession::new(
            ElectricForm::new(Locale::En),
            Arc::new(LocalAreaChecker::new(Locale::En)),
        ))
    }

    async fn run(
        app: &mut App,
        line: &str,
    ) -> Result<Flow, CommandError> {
        let command = Command::parse(line)?.expect("non-blank line");
        app.execute(command).await
    }

    // =========================================================================
    // Command::parse
    // =========================================================================

    #[test]
    fn parses_postal_forms() {
        let expected = Some(Command::Postal {
            first: "123".to_string(),
            second: Some("4567".to_string()),
        });

        assert_eq!(Command::parse("postal 123-4567").unwrap(), expected);
        assert_eq!(Command::parse("  postal 123 4567 ").unwrap(), expected);
        assert_eq!(
            Command::parse("postal 567").unwrap(),
            Some(Command::Postal {
                first: "567".to_string(),
                second: None,
            })
        );
        assert!(matches!(Command::parse("postal"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn parses_typed_arguments() {
        assert_eq!(
            Command::parse("company tokyo-electric").unwrap(),
            Some(Command::Company(Some(PowerCompany::TokyoElectric)))
        );
        assert_eq!(Command::parse("plan").unwrap(), Some(Command::Plan(None)));
        assert_eq!(
            Command::parse("capacity 6kVA").unwrap(),
            Some(Command::Capacity(Some(ContractCapacity::Kva(6))))
        );
        assert_eq!(
            Command::parse("bill 12,000").unwrap(),
            Some(Command::Bill(Some(dec!(12000))))
        );
        assert_eq!(Command::parse("").unwrap(), None);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(Command::parse("frobnicate"), Err(CommandError::Unknown(_))));
        assert!(matches!(Command::parse("company acme"), Err(CommandError::InvalidValue(_))));
        assert!(matches!(Command::parse("capacity 25A"), Err(CommandError::InvalidValue(_))));
        assert!(matches!(Command::parse("bill lots"), Err(CommandError::InvalidBill(_))));
        assert!(matches!(Command::parse("log"), Err(CommandError::Usage(_))));
    }

    // =========================================================================
    // App::execute
    // =========================================================================

    #[tokio::test]
    async fn company_must_be_offered_in_the_area() {
        let mut app = app();
        run(&mut app, "postal 123-4567").await.unwrap();

        let err = run(&mut app, "company kansai-electric").await.unwrap_err();

        assert!(matches!(err, CommandError::NotOffered { kind: "power company", .. }));
        assert_eq!(app.session().form().values().power_company, None);
    }

    #[tokio::test]
    async fn edits_redraw_the_form() {
        let mut app = app();

        let Flow::Continue(text) = run(&mut app, "postal 567-8901").await.unwrap() else {
            panic!("expected output");
        };

        assert_eq!(
            app.session().form().state().current_area,
            Some(ServiceArea::Kansai)
        );
        assert!(text.contains("関西電力 (kansai-electric)"));
    }

    #[tokio::test]
    async fn typed_session_reaches_confirmation() {
        let mut app = app();
        for line in [
            "postal 123-4567",
            "company tokyo-electric",
            "plan tokyo-juryou-c",
            "capacity 10kVA",
            "bill 15000",
            "email user@example.com",
        ] {
            run(&mut app, line).await.unwrap();
        }

        let Flow::Continue(text) = run(&mut app, "submit").await.unwrap() else {
            panic!("expected output");
        };

        assert!(text.starts_with("Simulation complete!"));
        assert!(text.contains("Contract capacity: 10kVA"));
        assert!(text.contains("Current electric bill: 15,000 yen"));
    }

    #[tokio::test]
    async fn blocked_submit_lists_reasons() {
        let mut app = app();
        run(&mut app, "postal 987-6543").await.unwrap();

        let Flow::Continue(text) = run(&mut app, "submit").await.unwrap() else {
            panic!("expected output");
        };

        assert!(text.starts_with("  - Service area not supported."));
    }

    #[tokio::test]
    async fn quit_and_help() {
        let mut app = app();

        assert_eq!(run(&mut app, "quit").await.unwrap(), Flow::Quit);
        assert_eq!(run(&mut app, "help").await.unwrap(), Flow::Continue(HELP.to_string()));
    }

    // =========================================================================
    // replay
    // =========================================================================

    #[tokio::test]
    async fn replay_reports_values_that_are_not_offered() {
        let mut app = app();
        let entry = FormEntry {
            postal_code_first: "123".to_string(),
            postal_code_second: "4567".to_string(),
            power_company: Some(PowerCompany::KansaiElectric),
            plan: Some(Plan::KansaiJuryouA),
            current_electric_bill: Some(dec!(8000)),
            email: "a@example.com".to_string(),
            ..FormEntry::default()
        };

        let SubmitOutcome::Blocked(reasons) = app.replay(&entry).await else {
            panic!("expected a blocked submission");
        };

        assert_eq!(
            reasons[0],
            "power company 'kansai-electric' is not available for the current selection"
        );
        assert!(reasons.iter().any(|r| r.starts_with("powerCompany:")));
    }

    #[test]
    fn registry_offers_local_and_http() {
        assert_eq!(build_registry().available_backends(), vec!["http", "local"]);
    }
}
