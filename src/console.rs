//! Line-oriented front end, used when the crate is built without `gui`.
//!
//! Drives the same session controller as the window: page loads are printed
//! instead of rendered, notices go to stdout and confirmations read `y`/`n`
//! from stdin.

use std::error::Error;
use std::io::{self, BufRead, Write};

use crate::app::{NavigationOutcome, SessionController};
use crate::database::Store;
use crate::services::{BrowserView, Clock, Notifier, ProxySubsystem, SystemClock};
use crate::types::errors::ProxyError;
use crate::types::history::{HistoryColumn, HistorySort};
use crate::types::proxy::ProxyDescriptor;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Set the URL field and navigate.
    Go(String),
    /// Set the URL field only.
    Url(String),
    Host(String),
    Port(String),
    /// Navigate to row `n` (1-based) of the displayed history.
    Open(usize),
    History,
    Sort(HistoryColumn),
    Clear,
    Help,
    Quit,
}

impl ConsoleCommand {
    /// Parses `command [argument]`. Arguments are taken verbatim after the
    /// first space, so `host ` sets an empty host.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (cmd, arg) = match line.split_once(' ') {
            Some((cmd, arg)) => (cmd, arg),
            None => (line, ""),
        };
        match cmd {
            "go" => Ok(ConsoleCommand::Go(arg.to_string())),
            "url" => Ok(ConsoleCommand::Url(arg.to_string())),
            "host" => Ok(ConsoleCommand::Host(arg.to_string())),
            "port" => Ok(ConsoleCommand::Port(arg.to_string())),
            "open" => arg
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .map(ConsoleCommand::Open)
                .ok_or_else(|| format!("open expects a row number, got {:?}", arg)),
            "history" => Ok(ConsoleCommand::History),
            "sort" => arg.trim().parse().map(ConsoleCommand::Sort),
            "clear" => Ok(ConsoleCommand::Clear),
            "help" | "?" => Ok(ConsoleCommand::Help),
            "quit" | "exit" => Ok(ConsoleCommand::Quit),
            other => Err(format!("unknown command: {}", other)),
        }
    }
}

const HELP: &str = "commands: go <url> | url <text> | host <text> | port <text> | open <n> | \
history | sort <url|last_update|count> | clear | quit";

/// Prints page loads in place of rendering them.
#[derive(Debug, Default)]
pub struct ConsoleView;

impl BrowserView for ConsoleView {
    fn load(&mut self, url: &str) {
        println!("[LOAD] {}", url);
    }
}

/// Remembers the installed proxy.
#[derive(Debug, Default)]
pub struct ConsoleProxy {
    pub active: Option<ProxyDescriptor>,
}

impl ProxySubsystem for ConsoleProxy {
    fn set_application_proxy(&mut self, proxy: &ProxyDescriptor) -> Result<(), ProxyError> {
        println!("[PROXY] http://{}", proxy.endpoint());
        self.active = Some(proxy.clone());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, message: &str) {
        println!("! {}", message);
    }

    fn confirm(&mut self, title: &str, text: &str) -> bool {
        print!("{} {} [y/N] ", title, text);
        let _ = io::stdout().flush();
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes"),
            Err(_) => false,
        }
    }
}

fn print_history<V, P, N, C>(controller: &SessionController<V, P, N, C>, sort: HistorySort)
where
    V: BrowserView,
    P: ProxySubsystem,
    N: Notifier,
    C: Clock,
{
    let rows = controller.sorted_history(sort);
    if rows.is_empty() {
        println!("(no history)");
        return;
    }
    println!("{:>4}  {:<12} {:>6}  url", "#", "last_update", "count");
    for (i, row) in rows.iter().enumerate() {
        println!("{:>4}  {:<12} {:>6}  {}", i + 1, row.last_update, row.count, row.url);
    }
}

/// Applies one command. Returns `false` when the user asked to quit.
pub fn execute<V, P, N, C>(
    controller: &mut SessionController<V, P, N, C>,
    sort: &mut HistorySort,
    command: ConsoleCommand,
) -> bool
where
    V: BrowserView,
    P: ProxySubsystem,
    N: Notifier,
    C: Clock,
{
    match command {
        ConsoleCommand::Go(url) => {
            controller.on_url_changed(&url);
            if let NavigationOutcome::Aborted(e) = controller.navigate() {
                log::debug!("[console] navigation aborted: {}", e);
            }
        }
        ConsoleCommand::Url(text) => controller.on_url_changed(&text),
        ConsoleCommand::Host(text) => controller.on_proxy_host_changed(&text),
        ConsoleCommand::Port(text) => {
            if let Err(e) = controller.on_proxy_port_changed(&text) {
                println!("! {}", e);
            }
        }
        ConsoleCommand::Open(n) => match n
            .checked_sub(1)
            .and_then(|i| controller.sorted_history(*sort).get(i).cloned())
        {
            Some(row) => {
                controller.on_history_row_clicked(&row.url);
            }
            None => println!("! no history row {}", n),
        },
        ConsoleCommand::History => print_history(controller, *sort),
        ConsoleCommand::Sort(column) => {
            *sort = sort.toggled(column);
            print_history(controller, *sort);
        }
        ConsoleCommand::Clear => {
            if controller.clear_history() {
                println!("history cleared");
            }
        }
        ConsoleCommand::Help => println!("{}", HELP),
        ConsoleCommand::Quit => return false,
    }
    true
}

/// Opens the default store and reads commands from stdin until `quit` or EOF.
pub fn run() -> Result<(), Box<dyn Error>> {
    let store = Store::open_default()?;
    let mut controller = SessionController::new(
        store,
        ConsoleView,
        ConsoleProxy::default(),
        ConsoleNotifier,
        SystemClock,
    );
    controller.startup();

    let fields = controller.fields();
    println!(
        "proxy {}:{}  url {}",
        fields.proxy_host, fields.proxy_port, fields.url
    );
    println!("{}", HELP);

    let mut sort = HistorySort::default();
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        match ConsoleCommand::parse(&line) {
            Ok(command) => {
                if !execute(&mut controller, &mut sort, command) {
                    break;
                }
            }
            Err(e) => println!("! {}", e),
        }
    }
    Ok(())
}
