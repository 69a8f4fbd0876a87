//! UI utilities for the client.

use std::io::Write;

pub const PROMPT: &str = "poker> ";

/// Redisplay the prompt after printing from a background task
pub fn redisplay_prompt() {
    print!("{}", PROMPT);
    std::io::stdout().flush().ok();
}
