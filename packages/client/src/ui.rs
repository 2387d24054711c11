//! UI utilities for the client.

use std::io::Write;

/// Prompt shown before each input line
pub fn prompt(display_name: Option<&str>) -> String {
    format!("{}> ", display_name.unwrap_or("you"))
}

/// Redisplay the prompt after receiving a message
pub fn redisplay_prompt(display_name: Option<&str>) {
    print!("{}", prompt(display_name));
    std::io::stdout().flush().ok();
}
