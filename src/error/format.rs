use crate::error::{ErrorContext, JdkWatchError};
use colored::Colorize;

pub fn format_error_chain(error: &JdkWatchError) -> String {
    let context = ErrorContext::new(error);
    context.to_string()
}

/// Format error for terminal display, optionally colored
pub fn format_error_with_color(error: &JdkWatchError, use_color: bool) -> String {
    if !use_color {
        return format_error_chain(error);
    }

    let context = ErrorContext::new(error);
    let mut output = format!("{} {error}\n", "Error:".red().bold());

    if let Some(details) = &context.details {
        output.push_str(&format!("\n{details}\n"));
    }

    if let Some(suggestion) = &context.suggestion {
        output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
        for line in suggestion.lines() {
            if !line.trim().is_empty() {
                output.push_str(&format!("{}\n", format!("• {line}").cyan()));
            }
        }
    }

    output
}
