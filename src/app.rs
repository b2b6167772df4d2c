//! Application orchestrator.
//! Loads/merges config, initializes logging, binds a `FileSystemManager` over the
//! local filesystem and runs one subcommand.

use anyhow::{Context, Result};
use tracing::{debug, error};

use fs_manager::cli::{Args, Command, PathCommand};
use fs_manager::config::{load_or_init, LoadResult};
use fs_manager::output as out;
use fs_manager::{default_config_path, path, Config, FileSystemManager, FsError, LocalBackend, CONFIG_ENV};

use crate::logging::init_tracing;

/// Run the CLI application.
pub async fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    // Path helpers need neither config nor storage.
    if let Some(Command::Path(op)) = &args.command {
        return run_path_command(op);
    }

    let mut cfg = match load_or_init(!args.has_root_override())? {
        LoadResult::CreatedTemplate(path) => {
            out::print_success(&format!("A template fs_manager config was written to: {}", path.display()));
            out::print_info("Edit `root_area` or set `root_path`, then re-run this command. To use a different location set FS_MANAGER_CONFIG.");
            return Ok(());
        }
        LoadResult::Loaded(cfg, _) => cfg,
        LoadResult::Missing(_) => Config::default(),
    };
    args.apply_overrides(&mut cfg);

    let guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;
    debug!(?args, "Starting fs_manager");

    let Some(command) = args.command else {
        out::print_info("Nothing to do; pass a subcommand (see --help).");
        return Ok(());
    };

    let result = execute(&cfg, command).await;
    if let Err(e) = &result {
        report(e);
    }

    // Flush file logs before exit
    drop(guard);
    result
}

fn print_config_location() {
    if let Ok(cfg_env) = std::env::var(CONFIG_ENV) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {}\n", cfg_env));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or set it to another file."));
        return;
    }
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default fs_manager config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info("No config file exists there yet. Run a command without --root/--area to create a template.");
            }
        }
        None => out::print_error("Could not determine a default config path."),
    }
}

fn run_path_command(op: &PathCommand) -> Result<()> {
    let line = match op {
        PathCommand::Normalize { path: p } => path::normalize(p),
        PathCommand::Join { segments } => path::join(segments)?,
        PathCommand::Dirname { path: p } => path::dirname(p).to_string(),
        PathCommand::Basename { path: p, ext } => path::basename(p, ext.as_deref()).to_string(),
        PathCommand::Extname { path: p } => path::extname(p).to_string(),
    };
    out::print_user(&line);
    Ok(())
}

async fn execute(cfg: &Config, command: Command) -> Result<()> {
    let fsm = FileSystemManager::from_config(LocalBackend::new(), cfg)
        .await
        .context("bind file system root")?;

    match &command {
        Command::Mkdir { path, exclusive } => {
            let dir = fsm.create_directory(path, *exclusive).await?;
            out::print_success(&format!("Directory ready: {}", dir.locator()));
        }
        Command::Ls { path, long } => {
            for node in fsm.read_directory(path).await? {
                let suffix = if node.is_directory() { "/" } else { "" };
                if *long {
                    let child = path::join(&[path.as_str(), node.name()])?;
                    let meta = fsm.entry_metadata(&child, false).await?;
                    out::print_user(&format!("{:<14} {:>12}  {}{}", node.kind(), meta.size, node.name(), suffix));
                } else {
                    out::print_user(&format!("{}{}", node.name(), suffix));
                }
            }
        }
        Command::Read { path, format } => {
            out::print_user(&fsm.read_file(path, *format).await?);
        }
        Command::Write { path, data, .. } => {
            let opts = command.write_options().unwrap_or_default();
            let file = fsm.write_file(path, data, opts).await?;
            out::print_success(&format!("Wrote {}", file.locator()));
        }
        Command::Mv { src, dest, transfer } => {
            fsm.move_path(src, dest, transfer.into()).await?;
            out::print_success(&format!("Moved '{src}' -> '{dest}'"));
        }
        Command::Cp { src, dest, transfer } => {
            fsm.copy_path(src, dest, transfer.into()).await?;
            out::print_success(&format!("Copied '{src}' -> '{dest}'"));
        }
        Command::Rm { path, .. } => {
            let flags = command.remove_file_flags().unwrap_or_default();
            fsm.remove_file(path, flags).await?;
            out::print_success(&format!("Removed '{path}'"));
        }
        Command::Rmdir { path, .. } => {
            let flags = command.remove_directory_flags().unwrap_or_default();
            fsm.remove_directory(path, flags).await?;
            out::print_success(&format!("Removed '{path}'"));
        }
        Command::Stat { path, recursive } => {
            let node = fsm.resolve_entry(path).await?;
            let meta = fsm.entry_metadata(path, *recursive).await?;
            out::print_field("path", node.locator());
            out::print_field("kind", node.kind());
            out::print_field("size", meta.size);
            if let Some(modified) = meta.modified {
                out::print_field("modified", modified.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S"));
            }
            if node.is_directory() {
                out::print_field("files", meta.file_count);
                out::print_field("directories", meta.directory_count);
            }
        }
        Command::Path(op) => run_path_command(op)?,
    }
    Ok(())
}

/// Log a failure with its stable code and kind when it came from the library.
fn report(e: &anyhow::Error) {
    if let Some(fe) = e.downcast_ref::<FsError>() {
        error!(code = fe.code(), kind = %fe.kind(), error = %fe, "Operation failed");
    } else {
        error!(error = ?e, "Operation failed");
    }
}
