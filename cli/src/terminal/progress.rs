use colored::*;
use indicatif::ProgressStyle;
use reflector_core::runner::Progress;

const BAR_TEMPLATE: &str = "[{bar:30.green/bright_black}] {msg}";
const BAR_CHARS: &str = "-> ";

pub fn bar_style() -> anyhow::Result<ProgressStyle> {
    Ok(ProgressStyle::with_template(BAR_TEMPLATE)?.progress_chars(BAR_CHARS))
}

/// `42.00%  Success/Failed/Total: 40/2/100`
pub fn message(progress: &Progress) -> String {
    format!(
        "{:.2}%  Success/Failed/Total: {}/{}/{}",
        progress.percent(),
        progress.succeeded.to_string().green().bold(),
        progress.failed.to_string().red().bold(),
        progress.total
    )
}

/// The message of the last first pass update, `None` while ports remain.
pub fn final_message(progress: &Progress) -> Option<String> {
    (progress.checked >= progress.total).then(|| message(progress))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
