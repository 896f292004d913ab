//! Share text for the current score

/// Game title used in share messages
pub const GAME_TITLE: &str = "Infinite Runner";

/// Message handed to the native share sheet
pub fn share_text(score: u64) -> String {
    format!("I scored {score} points in {GAME_TITLE}! Can you beat my score?")
}

/// Clipboard fallback: the message with the game link on its own line
pub fn share_message(score: u64, url: Option<&str>) -> String {
    match url.map(str::trim).filter(|u| !u.is_empty()) {
        Some(url) => format!("{}\n{}", share_text(score), url),
        None => share_text(score),
    }
}
