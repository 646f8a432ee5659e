//! Interactive conversion session.
//!
//! Each input line is parsed into a [`Command`] and applied to the session's
//! [`DisplayState`]; the view is redrawn afterwards. Rates are re-read from
//! the (caching) source on every redraw and forcibly refreshed on a fixed
//! interval. Once a fetch fails, commands stop re-reading until that
//! interval has passed or the user asks for `refresh`.
use super::{ui, view};
use crate::core::config::AppConfig;
use crate::core::format::format_amount;
use crate::core::{
    Conversion, DisplayState, FxError, PIN_CAPACITY, RateSnapshot, RateSource,
    compute_conversions,
};
use anyhow::{Result, anyhow, bail};
use std::io::Write;
use std::str::FromStr;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

pub const HELP: &str = "\
Commands:
  base CODE     hold CODE instead (resets the list order)
  amount N      set the held amount
  swap CODE     swap the held currency with a listed one
  pin CODE      remember the current conversion into CODE (max 3)
  unpin N       forget pinned entry #N
  refresh       fetch fresh exchange rates
  show          redraw the view
  help          show this help
  quit          leave the session";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Base(String),
    Amount(f64),
    Swap(String),
    Pin(String),
    /// 1-based position as displayed.
    Unpin(usize),
    Refresh,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let name = parts
            .next()
            .ok_or_else(|| anyhow!("Empty command"))?
            .to_lowercase();
        let arg = parts.next();
        if parts.next().is_some() {
            bail!("Too many arguments for '{name}'");
        }

        let code = |arg: Option<&str>| {
            arg.map(str::to_uppercase)
                .ok_or_else(|| anyhow!("'{name}' needs a currency code"))
        };

        let command = match name.as_str() {
            "base" => Command::Base(code(arg)?),
            "swap" => Command::Swap(code(arg)?),
            "pin" => Command::Pin(code(arg)?),
            "amount" => {
                let raw = arg.ok_or_else(|| anyhow!("'amount' needs a number"))?;
                let amount = raw
                    .replace(',', "")
                    .parse::<f64>()
                    .map_err(|_| anyhow!("Invalid amount: {raw}"))?;
                Command::Amount(amount)
            }
            "unpin" => {
                let raw = arg.ok_or_else(|| anyhow!("'unpin' needs an entry number"))?;
                let position = raw
                    .trim_start_matches('#')
                    .parse::<usize>()
                    .map_err(|_| anyhow!("Invalid entry number: {raw}"))?;
                Command::Unpin(position)
            }
            "refresh" => Command::Refresh,
            "show" | "ls" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => bail!("Unknown command '{other}', type 'help' for a list"),
        };

        if arg.is_some()
            && matches!(
                command,
                Command::Refresh | Command::Show | Command::Help | Command::Quit
            )
        {
            bail!("'{name}' takes no arguments");
        }
        Ok(command)
    }
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// Keep going, optionally telling the user something.
    Continue(Option<String>),
    Quit,
}

pub struct Session<'a> {
    state: DisplayState,
    source: &'a dyn RateSource,
    snapshot: Option<RateSnapshot>,
    rates_error: Option<FxError>,
    failed_at: Option<Instant>,
    retry_interval: Duration,
}

impl<'a> Session<'a> {
    /// `retry_interval` is how long a failed fetch keeps rates unavailable
    /// before commands try the source again.
    pub fn new(state: DisplayState, source: &'a dyn RateSource, retry_interval: Duration) -> Self {
        Self {
            state,
            source,
            snapshot: None,
            rates_error: None,
            failed_at: None,
            retry_interval,
        }
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn snapshot(&self) -> Option<&RateSnapshot> {
        self.snapshot.as_ref()
    }

    /// Replaces the current snapshot with whatever the source reports now.
    /// On failure the session has no rates until the next successful sync.
    pub async fn sync_rates(&mut self) -> Result<(), FxError> {
        match self.source.fetch().await {
            Ok(snapshot) => {
                debug!(fetched_at = %snapshot.fetched_at(), "Rates synced");
                self.snapshot = Some(snapshot);
                self.rates_error = None;
                self.failed_at = None;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to fetch exchange rates: {e:#}");
                let err = FxError::SnapshotUnavailable(format!("{e:#}"));
                self.snapshot = None;
                self.rates_error = Some(err.clone());
                self.failed_at = Some(Instant::now());
                Err(err)
            }
        }
    }

    /// Re-reads rates after a command, unless the last fetch failed less than
    /// `retry_interval` ago.
    pub async fn sync_if_due(&mut self) {
        if let Some(failed_at) = self.failed_at
            && failed_at.elapsed() < self.retry_interval
        {
            debug!("Rates unavailable, waiting for the next refresh");
            return;
        }
        let _ = self.sync_rates().await;
    }

    pub fn conversions(&self) -> Vec<Conversion> {
        self.snapshot
            .as_ref()
            .map(|snapshot| compute_conversions(&self.state, snapshot))
            .unwrap_or_default()
    }

    pub fn render(&self) -> String {
        view::render(
            &self.state,
            self.snapshot.as_ref(),
            &self.conversions(),
            self.rates_error.as_ref(),
        )
    }

    pub async fn handle(&mut self, command: Command) -> Outcome {
        debug!(?command, "Handling command");
        let notice = match command {
            Command::Base(code) => self.change_base(&code),
            Command::Amount(amount) => match self.state.set_base_amount(amount) {
                Ok(()) => None,
                Err(e) => Some(e.to_string()),
            },
            Command::Swap(code) => self.swap(&code),
            Command::Pin(code) => Some(self.pin(&code)),
            Command::Unpin(position) => Some(self.unpin(position)),
            Command::Refresh => {
                self.source.invalidate().await;
                self.failed_at = None;
                None
            }
            Command::Show => None,
            Command::Help => Some(HELP.to_string()),
            Command::Quit => return Outcome::Quit,
        };
        Outcome::Continue(notice)
    }

    fn change_base(&mut self, code: &str) -> Option<String> {
        if !self.state.supported().iter().any(|c| c == code) {
            return Some(format!("{code} is not a supported currency"));
        }
        if let Some(snapshot) = &self.snapshot
            && !snapshot.is_convertible(code)
        {
            return Some(format!("No exchange rate for {code} right now"));
        }
        self.state.set_base_currency(code);
        None
    }

    fn swap(&mut self, code: &str) -> Option<String> {
        if !self.conversions().iter().any(|c| c.currency == code) {
            return Some(format!("{code} is not in the list"));
        }
        self.state.swap_with_target(code);
        None
    }

    fn pin(&mut self, code: &str) -> String {
        if self.state.pinned().len() >= PIN_CAPACITY {
            return FxError::CapacityExceeded {
                capacity: PIN_CAPACITY,
            }
            .to_string();
        }
        let Some(cross_rate) = self
            .conversions()
            .into_iter()
            .find(|c| c.currency == code)
            .map(|c| c.cross_rate)
        else {
            return format!("{code} has no rate to pin");
        };

        match self.state.pin(code, cross_rate) {
            Ok(entry) => format!("Pinned {}", view::pinned_line(entry)),
            Err(e) => e.to_string(),
        }
    }

    fn unpin(&mut self, position: usize) -> String {
        match position.checked_sub(1).and_then(|i| self.state.unpin(i)) {
            Some(entry) => format!("Removed #{position} {}", view::pinned_line(&entry)),
            None => format!("No pinned entry #{position}"),
        }
    }
}

fn redraw<W: Write>(out: &mut W, session: &Session<'_>, notice: Option<&str>) -> Result<()> {
    writeln!(out, "\n{}", session.render())?;
    if let Some(notice) = notice {
        writeln!(out, "{}", ui::style_text(notice, ui::StyleType::Highlight))?;
    }
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

/// Runs a session over `input`, drawing to `out`, until the input ends or the
/// user quits.
pub async fn run<R, W>(
    config: &AppConfig,
    source: &dyn RateSource,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let state = DisplayState::new(config.currencies.clone(), &config.base_currency, config.amount)?;
    info!(
        base = state.base_currency(),
        amount = %format_amount(state.base_currency(), state.base_amount()),
        "Starting session"
    );
    let period = config.refresh_interval();
    let mut session = Session::new(state, source, period);

    let pb = ui::new_spinner("Fetching exchange rates...");
    let _ = session.sync_rates().await;
    pb.finish_and_clear();
    redraw(out, &session, Some("Type 'help' for commands"))?;

    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut lines = input.lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("Input closed");
                    break;
                };
                if line.trim().is_empty() {
                    write!(out, "> ")?;
                    out.flush()?;
                    continue;
                }
                let notice = match line.parse::<Command>() {
                    Ok(command) => match session.handle(command).await {
                        Outcome::Quit => break,
                        Outcome::Continue(notice) => notice,
                    },
                    Err(e) => Some(e.to_string()),
                };
                session.sync_if_due().await;
                redraw(out, &session, notice.as_deref())?;
            }
            _ = ticker.tick() => {
                info!("Periodic rate refresh");
                source.invalidate().await;
                let _ = session.sync_rates().await;
                redraw(out, &session, None)?;
            }
        }
    }

    writeln!(out)?;
    Ok(())
}
