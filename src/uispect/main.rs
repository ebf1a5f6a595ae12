use clap::Parser;
use colored::Colorize;
use directories::ProjectDirs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use uispect::api::{CmdMessage, UispectApi};
use uispect::clipboard::{ClipboardWriter, CopyField};
use uispect::config::UispectConfig;
use uispect::error::{Result, UispectError};
use uispect::logging;
use uispect::model::{Element, LocatorKind};
use uispect::session::{OperatorAction, Session};
use uispect::store::memory::InMemoryStore;
use uispect::store::ElementStore;
use uispect::surface::{start_stdin_listener, Input};

mod args;
mod cli;
use args::{Cli, Commands};
use cli::print;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    config: UispectConfig,
    locator: LocatorKind,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List {
            inputs,
            search,
            expand,
        }) => handle_list(&ctx, &inputs, &search, &expand),
        Some(Commands::Copy {
            position,
            field,
            inputs,
            search,
        }) => handle_copy(&ctx, &inputs, &search, position, field),
        Some(Commands::Check { files }) => handle_check(&ctx, &files),
        Some(Commands::Export { inputs }) => handle_export(&ctx, &inputs),
        Some(Commands::Session { inputs }) => handle_session(&ctx, &inputs),
        None => handle_session(&ctx, &[]),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = cli.config.clone().or_else(|| {
        ProjectDirs::from("com", "uispect", "uispect").map(|dirs| dirs.config_dir().to_path_buf())
    });

    let config = match config_dir {
        Some(dir) => UispectConfig::load(dir)?,
        None => UispectConfig::default(),
    };

    let locator = if cli.position {
        LocatorKind::Position
    } else {
        config.locator
    };

    Ok(AppContext { config, locator })
}

fn read_batch(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        Ok(content)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Builds an API over a fresh store: the configured seed file first, then
/// every input in order. Any rejected batch aborts with the file name.
fn load_api(ctx: &AppContext, inputs: &[PathBuf]) -> Result<UispectApi<InMemoryStore>> {
    let mut api = UispectApi::new(InMemoryStore::new(), ctx.locator);

    let files = ctx.config.seed_file.iter().chain(inputs.iter());
    for path in files {
        let content = read_batch(path)?;
        let result = api
            .add_elements_str(&content)
            .map_err(|e| UispectError::Api(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(file = %path.display(), added = result.affected_keys.len(), "loaded");
    }

    Ok(api)
}

fn handle_list(ctx: &AppContext, inputs: &[PathBuf], search: &str, expand: &[usize]) -> Result<()> {
    let api = load_api(ctx, inputs)?;
    let result = api.list(search);

    let entries: Vec<_> = result.listed_elements.iter().map(|l| &l.entry).collect();
    print::print_header(api.store().len(), entries.len(), api.store().package(), false);
    print::print_rows(&print::rows_for(&entries, expand));
    print::print_messages(&result.messages);
    Ok(())
}

fn handle_copy(
    ctx: &AppContext,
    inputs: &[PathBuf],
    search: &str,
    position: usize,
    field: CopyField,
) -> Result<()> {
    let api = load_api(ctx, inputs)?;
    let mut writer = ClipboardWriter::system(ctx.config.copy_feedback());
    let result = api.copy(&mut writer, search, position, field, Instant::now())?;
    print::print_messages(&result.messages);
    Ok(())
}

fn handle_check(ctx: &AppContext, files: &[PathBuf]) -> Result<()> {
    let api = UispectApi::new(InMemoryStore::new(), ctx.locator);
    let mut rejected = 0;

    for path in files {
        let checked = read_batch(path).and_then(|content| {
            let data: serde_json::Value = serde_json::from_str(&content)?;
            api.check_elements(&data)
        });
        let message = match checked {
            Ok(count) => CmdMessage::success(format!("{}: {} element(s) valid", path.display(), count)),
            Err(e) => {
                rejected += 1;
                CmdMessage::error(format!("{}: {}", path.display(), e))
            }
        };
        print::print_messages(&[message]);
    }

    if rejected > 0 {
        return Err(UispectError::Api(format!("{} batch(es) rejected", rejected)));
    }
    Ok(())
}

fn handle_export(ctx: &AppContext, inputs: &[PathBuf]) -> Result<()> {
    let api = load_api(ctx, inputs)?;
    let elements: Vec<&Element> = api.store().entries().iter().map(|e| &e.element).collect();
    println!("{}", serde_json::to_string_pretty(&elements)?);
    Ok(())
}

fn handle_session(ctx: &AppContext, inputs: &[PathBuf]) -> Result<()> {
    // stdin carries the session's commands
    if inputs.iter().any(|path| path == Path::new("-")) {
        return Err(UispectError::Api(
            "session reads commands from stdin; \"-\" cannot be an input".to_string(),
        ));
    }

    let api = load_api(ctx, inputs)?;
    let writer = ClipboardWriter::system(ctx.config.copy_feedback());
    let mut session = Session::new(api, writer);
    let interactive = console::Term::stdout().is_term();

    if interactive {
        print::print_session_help();
        println!();
    }
    render(&session);
    prompt(interactive);

    let rx = start_stdin_listener();
    while let Ok(input) = rx.recv_blocking() {
        match input {
            Input::External(cmd) => {
                let result = session.apply_external(cmd);
                print::print_messages(&result.messages);
                render(&session);
            }
            Input::Operator(OperatorAction::Quit) => break,
            Input::Operator(OperatorAction::Help) => print::print_session_help(),
            Input::Operator(action) => match session.apply(action, Instant::now()) {
                Ok(result) => {
                    print::print_messages(&result.messages);
                    render(&session);
                }
                Err(e) => print::print_messages(&[CmdMessage::error(e.to_string())]),
            },
            Input::Invalid(reason) => print::print_messages(&[CmdMessage::error(reason)]),
        }
        prompt(interactive);
    }

    Ok(())
}

fn render<S, P, F>(session: &Session<S, P, F>)
where
    S: ElementStore,
    P: uispect::clipboard::ClipboardBackend,
    F: uispect::clipboard::ClipboardBackend,
{
    let rows = session.rows();
    let store = session.api().store();
    print::print_header(
        store.len(),
        rows.len(),
        store.package(),
        session.is_copied(Instant::now()),
    );
    if !session.query().is_empty() {
        println!("{}", format!("search: {}", session.query()).dimmed());
    }
    print::print_rows(&rows);
}

fn prompt(interactive: bool) {
    if interactive {
        print!("> ");
        let _ = std::io::stdout().flush();
    }
}
