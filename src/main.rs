//! `countdown`: runs the countdown widget inside a minimal terminal host.
//!
//! The host draws its own chrome (the title the widget sets and a marker
//! while the widget is being configured), forwards `ctrl+e` to the widget's
//! configure hook and exits once the widget removes itself.

use bubbletea_rs::{quit, Cmd, KeyMsg, Model as BubbleTeaModel, Msg, Program};
use clap::Parser;
use countdown_widget::dashboard::{Chrome, DashboardApi, FileDashboard, MemoryDashboard};
use countdown_widget::help;
use countdown_widget::key::{self, matches_binding, new_binding, with_help, with_keys_str, Binding};
use countdown_widget::settings::SettingsLoader;
use countdown_widget::widget::{self, register_widget};
use countdown_widget::{Error, Result, SystemClock};
use lipgloss_extras::prelude::*;
use once_cell::sync::OnceCell;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "countdown", version, about = "Countdown timer widget for the terminal")]
struct Cli {
    /// Settings file (TOML)
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Where the widget configuration is stored
    #[arg(long, value_name = "FILE", conflicts_with = "ephemeral")]
    storage: Option<PathBuf>,

    /// Keep the widget configuration in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Delete the stored widget configuration before starting
    #[arg(long)]
    reset: bool,
}

/// What `Shell::init` needs; bubbletea builds the model without arguments.
struct Launch {
    api: Arc<dyn DashboardApi>,
    chrome: Chrome,
    options: widget::Options,
}

static LAUNCH: OnceCell<Launch> = OnceCell::new();

struct ShellKeys {
    configure: Binding,
    quit: Binding,
}

impl Default for ShellKeys {
    fn default() -> Self {
        Self {
            configure: new_binding(vec![with_keys_str(&["ctrl+e"]), with_help("ctrl+e", "configure")]),
            quit: new_binding(vec![with_keys_str(&["ctrl+c"]), with_help("ctrl+c", "quit")]),
        }
    }
}

impl key::KeyMap for ShellKeys {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.configure, &self.quit]
    }
}

struct Shell {
    widget: widget::Model,
    chrome: Chrome,
    keys: ShellKeys,
    help: help::Model,
}

impl Shell {
    fn close(&mut self) -> Option<Cmd> {
        self.widget.deactivate();
        Some(quit())
    }
}

impl BubbleTeaModel for Shell {
    fn init() -> (Self, Option<Cmd>) {
        let (api, chrome, options) = match LAUNCH.get() {
            Some(launch) => (
                Arc::clone(&launch.api),
                launch.chrome.clone(),
                launch.options.clone(),
            ),
            None => {
                let host = MemoryDashboard::new();
                let chrome = host.chrome();
                let api: Arc<dyn DashboardApi> = Arc::new(host);
                (api, chrome, widget::Options::default())
            }
        };

        let widget = register_widget(api, &chrome, Arc::new(SystemClock), options);
        let cmd = widget.init();
        let shell = Self {
            widget,
            chrome,
            keys: ShellKeys::default(),
            help: help::Model::new(),
        };
        (shell, Some(cmd))
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            if matches_binding(key, &self.keys.quit) {
                return self.close();
            }
            if matches_binding(key, &self.keys.configure) {
                let configure = self.chrome.configure()?;
                return self.widget.update(&configure);
            }
        }

        let cmd = self.widget.update(&msg);
        if self.chrome.removed() {
            tracing::info!("widget removed, exiting");
            return self.close();
        }
        cmd
    }

    fn view(&self) -> String {
        let title = self
            .chrome
            .title()
            .unwrap_or_else(|| "Countdown".to_string());
        let mut header = Style::new().bold(true).render(&title);
        if self.chrome.in_config_mode() {
            header.push_str(&Style::new().faint(true).render("  (configuring)"));
        }

        let mut out = format!("{header}\n\n{}", self.widget.view());
        if !self.widget.is_configuring() {
            out.push_str("\n\n");
            out.push_str(&self.help.view(&self.keys));
        }
        out.push('\n');
        out
    }
}

fn init_logging(loader: &SettingsLoader) -> Result<()> {
    let path = loader.log_path();
    let log_error = |source| Error::Log {
        path: path.clone(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(log_error)?;
    }
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(log_error)?;

    // The terminal belongs to the UI, so logs go to a file.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&loader.settings().logging.level)),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let loader = SettingsLoader::load(cli.settings.as_deref())?;
    init_logging(&loader)?;

    let (api, chrome): (Arc<dyn DashboardApi>, Chrome) = if cli.ephemeral {
        tracing::info!("using in-memory widget storage");
        let host = MemoryDashboard::new();
        let chrome = host.chrome();
        (Arc::new(host), chrome)
    } else {
        let path = cli.storage.clone().unwrap_or_else(|| loader.storage_path());
        let host = FileDashboard::new(path);
        if cli.reset {
            host.reset().await?;
            tracing::info!(path = %host.path().display(), "stored widget configuration reset");
        }
        let chrome = host.chrome();
        (Arc::new(host), chrome)
    };

    let launch = Launch {
        api,
        chrome,
        options: loader.settings().widget.options(),
    };
    if LAUNCH.set(launch).is_err() {
        tracing::warn!("launch context already set");
    }

    let program = Program::<Shell>::builder().alt_screen(true).build()?;
    program.run().await?;
    Ok(())
}
