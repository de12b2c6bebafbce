//! Error formatting utilities.

/// Format an error together with its chain of sources.
///
/// SDK errors keep their useful detail in `source()`, so printing only the
/// top-level message would hide why an AWS call failed.
pub fn format_error(e: &dyn std::error::Error) -> String {
    let mut msg = e.to_string();
    let mut source = e.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !msg.ends_with(&text) {
            msg.push_str(": ");
            msg.push_str(&text);
        }
        source = cause.source();
    }

    msg
}
