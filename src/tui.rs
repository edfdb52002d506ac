//! Interactive channel editor.

use std::io::{self, IsTerminal};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::runtime::Runtime;

use crate::catalog::CommandCatalog;
use crate::manager::ChannelManager;
use crate::remote::BotApiClient;

mod app;
mod draw;

use self::app::{Action, App};

pub struct TuiRunOptions {
    pub api: BotApiClient,
    pub commit_timeout: Option<Duration>,
    pub operator: String,
}

pub fn run(rt: &Runtime, opts: TuiRunOptions) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("TUI requires an interactive terminal (TTY)");
    }

    let api = Arc::new(opts.api);
    let mut manager = ChannelManager::new(Arc::clone(&api), opts.commit_timeout);
    let load_err = rt.block_on(manager.load()).err();
    let catalog_res = rt.block_on(CommandCatalog::fetch(api.as_ref()));

    let mut app = App::new(manager, opts.operator);
    match catalog_res {
        Ok(catalog) => app.set_catalog(catalog),
        Err(err) => app.set_status(format!("command catalog unavailable: {:#}", err)),
    }
    if let Some(err) = load_err {
        app.set_status(format!("{:#}", err));
    }

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let res = run_loop(&mut terminal, rt, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    rt: &Runtime,
    app: &mut App<BotApiClient>,
) -> Result<()> {
    loop {
        app.drain_events();
        terminal.draw(|f| draw::draw(f, app)).context("draw")?;
        if app.quit {
            return Ok(());
        }

        if !event::poll(Duration::from_millis(100)).context("poll")? {
            continue;
        }
        let Event::Key(key) = event::read().context("read event")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.handle_key(key) {
            Action::None => {}
            Action::Save => {
                app.saving = true;
                terminal.draw(|f| draw::draw(f, app)).context("draw")?;
                let res = rt.block_on(app.manager.save());
                app.saving = false;
                app.after_save(res);
            }
            Action::Discard => {
                let res = rt.block_on(app.manager.discard());
                app.after_reload("changes discarded", res);
            }
            Action::Reload => {
                let res = rt.block_on(app.manager.load());
                app.after_reload("channels reloaded", res);
            }
        }
    }
}
