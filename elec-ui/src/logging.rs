//! Reloadable tracing setup for the simulator.
//!
//! One registry with a global level filter feeding two layers: stdout
//! (behind its own on/off gate) and a file writer that discards output until
//! a file is attached. Both filters can be swapped at runtime, which the
//! `log` command and the `[logging]` config section rely on.

use anyhow::{Context, Result};
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};
use tracing::{Event, Level, Subscriber, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

use crate::config::LoggingSection;

const DEFAULT_DIRECTIVES: &str = "info,elec_ui=debug";

/// `HH:MM:SS.mmm LEVEL file:line fields`, coloured on a terminal.
struct LocalFmt;

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();
        let stamp = Local::now().format("%H:%M:%S%.3f");

        if ansi {
            let colour = match *meta.level() {
                Level::ERROR => "1;31",
                Level::WARN => "1;33",
                Level::INFO => "1;32",
                Level::DEBUG => "1;34",
                Level::TRACE => "1;35",
            };
            write!(writer, "\x1b[2m{stamp}\x1b[0m \x1b[{colour}m{:>5}\x1b[0m ", meta.level())?;
        } else {
            write!(writer, "{stamp} {:>5} ", meta.level())?;
        }

        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            let file = file.rsplit(['/', '\\']).next().unwrap_or(file);
            if ansi {
                write!(writer, "\x1b[36m{file}:{line}\x1b[0m ")?;
            } else {
                write!(writer, "{file}:{line} ")?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Log file that can be attached after the subscriber is installed.
#[derive(Clone)]
struct FileSlot(Arc<Mutex<Option<File>>>);

struct SlotWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for SlotWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match &mut *self.0 {
            Some(f) => f.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.0 {
            Some(f) => f.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for FileSlot {
    type Writer = SlotWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SlotWriter(self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

type FilterHandle = Box<dyn Fn(EnvFilter) -> Result<()> + Send + Sync>;

static APP_NAME: OnceLock<String> = OnceLock::new();
static LEVEL: OnceLock<FilterHandle> = OnceLock::new();
static STDOUT_GATE: OnceLock<FilterHandle> = OnceLock::new();
static FILE_SLOT: OnceLock<FileSlot> = OnceLock::new();

fn store_handle<S>(
    slot: &OnceLock<FilterHandle>,
    handle: reload::Handle<EnvFilter, S>,
) where
    S: Subscriber + Send + Sync + 'static,
{
    let _ = slot.set(Box::new(move |filter| {
        handle
            .reload(filter)
            .context("filter reload failed")
    }));
}

fn reload(
    slot: &OnceLock<FilterHandle>,
    filter: EnvFilter,
) -> Result<()> {
    match slot.get() {
        Some(apply) => apply(filter),
        None => anyhow::bail!("logging not yet initialized"),
    }
}

/// Replaces the global filter. Accepts a bare level or any `EnvFilter`
/// directive string.
pub fn set_log_level(directives: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directives)
        .with_context(|| format!("invalid log level '{directives}'"))?;
    reload(&LEVEL, filter)
}

/// Hides or shows stdout output; the log file is unaffected.
pub fn set_stdout_enabled(enabled: bool) -> Result<()> {
    reload(&STDOUT_GATE, EnvFilter::new(if enabled { "trace" } else { "off" }))
}

/// Appends log output to `path`, replacing any file already attached.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;

    let Some(slot) = FILE_SLOT.get() else {
        anyhow::bail!("logging not yet initialized");
    };
    *slot.0.lock().unwrap_or_else(PoisonError::into_inner) = Some(file);
    Ok(())
}

/// Executable stem, or `"electric-sim"` when it cannot be determined.
pub fn app_name() -> &'static str {
    APP_NAME.get_or_init(|| {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "electric-sim".to_string())
    })
}

/// Installs the subscriber. Call once, before anything logs.
///
/// The level comes from `RUST_LOG` when set, `info,elec_ui=debug` otherwise.
/// Stdout is coloured only on a terminal.
pub fn init_logging() {
    let _ = app_name();

    let slot = FileSlot(Arc::new(Mutex::new(None)));
    let _ = FILE_SLOT.set(slot.clone());

    let (stdout_gate, stdout_handle) = reload::Layer::new(EnvFilter::new("trace"));
    let (level_filter, level_handle) = reload::Layer::new(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES)),
    );

    let stdout_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(io::stdout().is_terminal())
        .with_filter(stdout_gate);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(false)
        .with_writer(slot);

    if tracing_subscriber::registry()
        .with(level_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .is_ok()
    {
        store_handle(&LEVEL, level_handle);
        store_handle(&STDOUT_GATE, stdout_handle);
    }
}

/// Applies the `[logging]` section on top of the running subscriber.
pub fn apply_config(config: &LoggingSection) -> Result<()> {
    if let Some(level) = &config.level {
        set_log_level(level)?;
    }
    set_stdout_enabled(config.stdout)?;
    if let Some(path) = &config.file {
        enable_file_logging(path)?;
        info!(app = app_name(), file = %path.display(), "file logging enabled");
    }
    Ok(())
}
