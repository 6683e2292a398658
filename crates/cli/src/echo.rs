use owo_colors::OwoColorize;

use lustre_core::{Article, EnhanceConfig};

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!("\n{} {} {}", "Lustre".bold().bright_blue(), "v".dimmed(), VERSION.dimmed());
    eprintln!("{}", "Enrich feed article images\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print the resolved toggles
pub fn print_config(config: &EnhanceConfig) {
    let toggles = [
        ("Inline images:", config.inline_enhancement),
        ("Fix types:", config.fix_enclosure_type),
        ("Open Graph:", config.extract_og),
        ("Enhance content:", config.enhance_content),
        ("Upgrade enclosures:", config.upgrade_enclosures),
    ];

    for (label, enabled) in toggles {
        let value = if enabled { "on".bright_green().to_string() } else { "off".dimmed().to_string() };
        eprintln!("  {} {}", format!("{label:<20}").dimmed(), value);
    }
    eprintln!();
}

/// Print a one-line summary of an enriched article
pub fn print_article(index: usize, article: &Article, duration: std::time::Duration) {
    let title = if article.title.is_empty() { "(untitled)" } else { article.title.as_str() };
    let images = article.enclosures.iter().filter(|e| e.is_image()).count();
    let ms = duration.as_secs_f64() * 1000.0;

    let timing = if ms < 50.0 {
        format!("{ms:.2}ms").dimmed().to_string()
    } else if ms < 1000.0 {
        format!("{ms:.2}ms").bright_yellow().to_string()
    } else {
        format!("{ms:.2}ms").bright_red().to_string()
    };

    eprintln!(
        "  {} {} {} {}",
        format!("#{}", index + 1).dimmed(),
        title.bright_white(),
        format!("({} enclosures, {} images)", article.enclosures.len(), images).dimmed(),
        timing
    );
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
