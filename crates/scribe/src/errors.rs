use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use color_eyre::Result;
use tracing::error;

use crate::config;

static INIT: OnceLock<()> = OnceLock::new();

/// Where a crash report ends up: the panic file next to the regular log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrashPaths {
    pub log: PathBuf,
    pub panic: PathBuf,
}

impl CrashPaths {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            log: data_dir.join(config::LOG_FILE.as_str()),
            panic: data_dir.join(config::PANIC_FILE.as_str()),
        }
    }

    /// Text shown under every panic report.
    pub fn panic_section(&self) -> String {
        format!(
            "scribe {} crashed. The report was written to {}; the session log is {}.",
            env!("CARGO_PKG_VERSION"),
            self.panic.display(),
            self.log.display()
        )
    }

    /// Replace the panic file with `report`, stripped of terminal colors.
    pub fn write_report(&self, report: &str) -> std::io::Result<()> {
        if let Some(dir) = self.panic.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.panic, strip_ansi_escapes::strip_str(report))
    }
}

/// Install color-eyre hooks and a panic hook that hands the terminal back,
/// then records the report under `data_dir`. Later calls are no-ops.
pub fn init(data_dir: &Path) -> Result<()> {
    if INIT.get().is_some() {
        return Ok(());
    }
    let paths = CrashPaths::new(data_dir);

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .panic_section(paths.panic_section())
        .capture_span_trace_by_default(false)
        .display_location_section(false)
        .display_env_section(false)
        .try_into_hooks()?;
    eyre_hook.install()?;

    std::panic::set_hook(Box::new(move |panic_info| {
        if let Err(err) = crate::tui::restore() {
            error!("unable to restore terminal: {err:?}");
        }

        let report = panic_hook.panic_report(panic_info).to_string();
        error!("panic: {}", strip_ansi_escapes::strip_str(&report));
        if let Err(err) = paths.write_report(&report) {
            error!(path = %paths.panic.display(), "unable to write panic report: {err}");
        }

        #[cfg(not(debug_assertions))]
        {
            use human_panic::{metadata, print_msg};
            if let Err(err) = print_msg(Some(&paths.panic), &metadata!()) {
                error!("unable to print panic message: {err}");
            }
        }

        #[cfg(debug_assertions)]
        {
            eprintln!("{report}");
            better_panic::Settings::auto()
                .most_recent_first(false)
                .lineno_suffix(true)
                .verbosity(better_panic::Verbosity::Full)
                .create_panic_handler()(panic_info);
        }

        std::process::exit(libc::EXIT_FAILURE);
    }));

    let _ = INIT.set(());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn crash_files_live_in_the_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let paths = CrashPaths::new(dir.path());
        assert_eq!(paths.log, dir.path().join("scribe.log"));
        assert_eq!(paths.panic, dir.path().join("scribe-panic.log"));

        let section = paths.panic_section();
        assert!(section.contains(&paths.panic.display().to_string()));
        assert!(section.contains(&paths.log.display().to_string()));
    }

    #[test]
    fn report_is_written_without_color_codes() {
        let dir = tempfile::tempdir().unwrap();
        let paths = CrashPaths::new(&dir.path().join("nested"));
        paths
            .write_report("\u{1b}[31mThe application panicked\u{1b}[0m")
            .unwrap();
        assert_eq!(
            fs::read_to_string(&paths.panic).unwrap(),
            "The application panicked"
        );
    }
}
