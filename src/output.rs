//! User-facing printing for the `fs_manager` binary.
//! Command results (file contents, listings, stat fields) go to stdout
//! undecorated so they can be piped; status lines go to stderr with a colored
//! prefix when stderr is a TTY.

use owo_colors::OwoColorize;

fn stderr_is_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

fn status(prefix: &str, colored: String, msg: &str) {
    if stderr_is_tty() {
        eprintln!("{colored} {msg}");
    } else {
        eprintln!("{prefix} {msg}");
    }
}

pub fn print_info(msg: &str) {
    status("info:", "info:".cyan().bold().to_string(), msg);
}

pub fn print_warn(msg: &str) {
    status("warn:", "warn:".yellow().bold().to_string(), msg);
}

pub fn print_error(msg: &str) {
    status("error:", "error:".red().bold().to_string(), msg);
}

pub fn print_success(msg: &str) {
    status("ok:", "ok:".green().bold().to_string(), msg);
}

/// Print a plain result line (no prefix) to stdout.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

/// Aligned `key: value` result line, as used by `stat`.
pub fn print_field(key: &str, value: impl std::fmt::Display) {
    if atty::is(atty::Stream::Stdout) {
        println!("{:>12} {}", format!("{key}:").bold(), value);
    } else {
        println!("{:>12} {}", format!("{key}:"), value);
    }
}
