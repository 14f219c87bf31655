//! Colored output for recipe sessions
//!
//! Uses owo-colors for terminal colors.

use owo_colors::OwoColorize;

/// Print an action header (blue, bold)
/// Example: "==> Opening recipe Release"
pub fn action(message: &str) {
    println!("{} {}", "==>".blue().bold(), message.bold());
}

/// Print a sub-action (cyan arrow)
/// Example: "  -> require openexr"
pub fn sub_action(step: &str) {
    println!("  {} {}", "->".cyan(), step);
}

/// Print a detail line (dimmed)
pub fn detail(message: &str) {
    println!("     {}", message.dimmed());
}

/// Print a success message (green)
pub fn success(message: &str) {
    println!("{} {}", "==>".green().bold(), message.green());
}

/// Print a warning message (yellow)
pub fn warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message.yellow());
}

/// Print an error message (red)
pub fn error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message.red());
}

/// Print one numbered entry of a list
/// Example: "  10. embree [conditional]"
pub fn list_item(index: usize, name: &str, note: Option<&str>) {
    match note {
        Some(note) => println!("  {:>2}. {} {}", index, name.green(), note.dimmed()),
        None => println!("  {:>2}. {}", index, name.green()),
    }
}
