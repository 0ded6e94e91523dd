//! Line input helpers for the shell.

use std::io::{self, Write};

use anyhow::Result;

/// Print a prompt and read one trimmed line.
pub fn read_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Prompt with a default shown in brackets; empty input takes the default.
pub fn read_line_with_default(label: &str, default: &str) -> Result<String> {
    if default.is_empty() {
        return read_line(&format!("{}: ", label));
    }
    let input = read_line(&format!("{} [{}]: ", label, default))?;
    Ok(if input.is_empty() {
        default.to_string()
    } else {
        input
    })
}

/// Read a password without echoing it.
pub fn read_password(prompt: &str) -> Result<String> {
    Ok(rpassword::prompt_password(prompt)?)
}
