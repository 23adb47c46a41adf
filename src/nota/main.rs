use clap::{CommandFactory, Parser};
use colored::Colorize;
use nota::api::{CmdMessage, MessageLevel, NotaApi};
use nota::client::http::HttpBackend;
use nota::config::{self, NotaConfig};
use nota::error::Result;
use nota::model::PageId;

mod args;
use args::{Cli, Commands, StackAction};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Page { id }) => handle_page(id),
        Some(Commands::Stack { action }) => handle_stack(action),
        Some(Commands::Config) => handle_config(),
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

fn init_api() -> Result<(NotaApi<HttpBackend>, NotaConfig)> {
    let dir = config::config_dir()?;
    let config = NotaConfig::load(&dir)?;
    let token = config.token()?;
    Ok((NotaApi::new(HttpBackend::new(token)), config))
}

fn handle_page(id: Option<String>) -> Result<()> {
    let (api, config) = init_api()?;
    let page = match id {
        Some(id) => PageId::new(id),
        None => config.main_page()?,
    };
    show_page(&api, &page)
}

fn handle_stack(action: StackAction) -> Result<()> {
    let (mut api, config) = init_api()?;
    let stack = config.stack_page()?;

    let result = match action {
        StackAction::Ls => return show_page(&api, &stack),
        StackAction::Add { text } => api.stack_add(&stack, &text)?,
        StackAction::Do { query } => api.stack_mark(&stack, &query, true)?,
        StackAction::Undo { query } => api.stack_mark(&stack, &query, false)?,
        StackAction::Rm { query } => api.stack_remove(&stack, &query)?,
        StackAction::Mod { query, text } => api.stack_modify(&stack, &query, &text)?,
    };
    print_messages(&result.messages);
    Ok(())
}

/// Render a page, flushing whatever was produced even when the render
/// fails partway through.
fn show_page(api: &NotaApi<HttpBackend>, page: &PageId) -> Result<()> {
    let mut out = String::new();
    let rendered = api.show_page(page, &mut out);
    print!("{out}");
    rendered
}

fn handle_config() -> Result<()> {
    let dir = config::config_dir()?;
    let mut config = NotaConfig::load_or_default(&dir);

    config.api_token = prompt("API token", &config.api_token)?;
    config.main_page_id = prompt("main page ID", &config.main_page_id)?;
    config.stack_page_id = prompt("stack page ID", &config.stack_page_id)?;
    config.save(&dir)?;

    println!(
        "{}",
        format!("config written to {}", dir.join("config.json").display()).green()
    );
    Ok(())
}

/// Ask for one value on stderr; an empty answer keeps the current one.
fn prompt(label: &str, current: &str) -> Result<String> {
    use std::io::{self, BufRead, Write};

    if current.is_empty() {
        eprint!("{label}: ");
    } else {
        eprint!("{label} [{current}]: ");
    }
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim();
    Ok(if answer.is_empty() {
        current.to_owned()
    } else {
        answer.to_owned()
    })
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}
