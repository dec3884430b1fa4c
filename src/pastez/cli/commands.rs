use super::render::{print_config, print_message, print_notices, render_document, render_url};
use super::setup::{
    print_grouped_help, print_subcommand_help, Cli, Commands, DocumentCommands, LinkCommands,
    MiscCommands,
};
use clap::Parser;
use pastez::api::{Effect, PastezApi};
use pastez::clipboard::copy_to_clipboard;
use pastez::commands::CommandName;
use pastez::config::{self, ConfigAction, PastezConfig};
use pastez::editor::edit_text;
use pastez::error::{PastezError, Result};
use pastez::highlight::treesitter::TreeSitterHighlighter;
use pastez::language::extension_for_language;
use pastez::store::http::HttpStore;
use pastez::sync::SyncClient;
use pastez::view::{MessageLevel, Surface};
use std::io::{IsTerminal, Read};
use std::path::PathBuf;

struct AppContext {
    api: PastezApi<HttpStore, TreeSitterHighlighter>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if cli.help {
        if cli.command.is_none() {
            print_grouped_help();
        } else {
            print_subcommand_help(&cli.command);
        }
        return Ok(());
    }

    if cli.no_color {
        colored::control::set_override(false);
        console::set_colors_enabled(false);
    }

    // Config does not need a server connection.
    if let Some(Commands::Misc(MiscCommands::Config { key, value })) = &cli.command {
        return handle_config(key.clone(), value.clone());
    }

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Document(cmd)) => match cmd {
            DocumentCommands::New { file } => handle_new(&mut ctx, file),
            DocumentCommands::Get { key } => handle_get(&mut ctx, &key),
            DocumentCommands::Dup { key } => handle_dup(&mut ctx, &key),
        },
        Some(Commands::Link(cmd)) => match cmd {
            LinkCommands::Raw { key, open } => handle_link(&mut ctx, &key, CommandName::Raw, open),
            LinkCommands::Share { key, open } => {
                handle_link(&mut ctx, &key, CommandName::Share, open)
            }
        },
        Some(Commands::Misc(MiscCommands::Config { .. })) => Ok(()),
        None => {
            print_grouped_help();
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let dir = config::config_dir()?;
    let mut config = PastezConfig::load(&dir)?.with_env_overrides();
    if let Some(server) = &cli.server {
        config.server = server.clone();
    }
    log::debug!("using server {}", config.server_url());

    let store = HttpStore::new(config.server_url())?;
    let styled = !cli.no_color && std::io::stdout().is_terminal();
    let highlighter = TreeSitterHighlighter::new(styled);

    Ok(AppContext {
        api: PastezApi::new(SyncClient::new(store, highlighter), config),
    })
}

fn read_input(file: Option<PathBuf>) -> Result<String> {
    if let Some(path) = file {
        return Ok(std::fs::read_to_string(path)?);
    }

    if !std::io::stdin().is_terminal() {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }

    edit_text("", None)
}

fn handle_new(ctx: &mut AppContext, file: Option<PathBuf>) -> Result<()> {
    let text = read_input(file)?;
    ctx.api.edit(text)?;
    save_and_report(ctx)
}

/// Saves the current session and prints where it went. A blank document is
/// reported, not treated as a failure.
fn save_and_report(ctx: &mut AppContext) -> Result<()> {
    match ctx.api.save() {
        Ok(()) => {}
        Err(PastezError::Rejected(reason)) => {
            print_message(MessageLevel::Warning, &format!("Nothing saved: {}", reason));
            return Ok(());
        }
        Err(e) => {
            // The failure notice carries the same text as the error.
            ctx.api.notices_mut().drain();
            return Err(e);
        }
    }

    let url = ctx.api.page_url();
    println!("{}", render_url(&url));
    if copy_to_clipboard(&url).is_ok() {
        ctx.api
            .notices_mut()
            .push(MessageLevel::Info, "Copied to clipboard");
    }
    print_notices(&ctx.api.notices_mut().drain());
    Ok(())
}

fn handle_get(ctx: &mut AppContext, key: &str) -> Result<()> {
    if !ctx.api.load_document(key) {
        print_message(
            MessageLevel::Info,
            &format!("No document at {}; starting a new one.", key),
        );
        return Ok(());
    }

    let view = ctx.api.view();
    if let Surface::Viewer { markup } = view.surface() {
        print!("{}", render_document(view, markup));
    }
    Ok(())
}

fn handle_dup(ctx: &mut AppContext, key: &str) -> Result<()> {
    if !ctx.api.load_document(key) {
        return Err(PastezError::NotFound(key.to_string()));
    }
    let extension = ctx
        .api
        .session()
        .language()
        .map(extension_for_language)
        .map(str::to_string);

    ctx.api.duplicate()?;
    let edited = edit_text(ctx.api.session().content(), extension.as_deref())?;
    ctx.api.edit(edited)?;
    save_and_report(ctx)
}

fn handle_link(ctx: &mut AppContext, key: &str, name: CommandName, open: bool) -> Result<()> {
    if !ctx.api.load_document(key) {
        print_message(
            MessageLevel::Warning,
            &format!("No document at {}; {} is not available.", key, name),
        );
        return Ok(());
    }

    let url = match ctx.api.click(name) {
        Effect::Navigate(url) | Effect::OpenExternal(url) => url,
        Effect::None => {
            let hint = ctx.api.hover(name);
            print_message(
                MessageLevel::Warning,
                &format!("{} is not available for this document.", hint.label),
            );
            return Ok(());
        }
    };

    if open {
        webbrowser::open(&url)
            .map_err(|e| PastezError::Api(format!("Failed to open browser: {}", e)))?;
    }
    println!("{}", render_url(&url));
    Ok(())
}

fn handle_config(key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let is_set = matches!(action, ConfigAction::Set(..));

    let dir = config::config_dir()?;
    let entries = config::run(&dir, action)?;
    if is_set {
        for (key, value) in &entries {
            print_message(MessageLevel::Success, &format!("{} set to {}", key, value));
        }
    } else {
        print_config(&entries);
    }
    Ok(())
}
