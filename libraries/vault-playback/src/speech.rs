//! Spoken text

use vault_core::Track;

pub const APOLOGY: &str = "Sorry, I had trouble doing what you asked. Please try again.";
pub const LINK_ACCOUNT: &str = "You must link your account with Music Vault to continue.";
pub const UNLOCK_MUSIC: &str =
    "You must link your account and unlock your music with the Music Vault web app to continue.";

pub const WELCOME_REPROMPT: &str = "You can say, play my music, to begin.";
pub const RESUME_REPROMPT: &str = "You can say yes to resume or no to play from the beginning.";
pub const HELP_IDLE: &str =
    "Welcome to Music Vault. You can ask to play your music to begin the music.";
pub const HELP_PLAYING: &str = "Welcome to Music Vault. You can say, Next or Previous to navigate through the playlist. At any time, you can say Pause to pause the audio and Resume to resume.";

pub const END_OF_PLAYLIST: &str = "You have reached the end of the playlist.";
pub const START_OF_PLAYLIST: &str = "You have reached the start of the playlist.";

pub const LOOP_ON: &str = "Loop turned on.";
pub const LOOP_OFF: &str = "Loop turned off.";
pub const SHUFFLE_ON: &str = "Shuffle turned on.";
pub const SHUFFLE_OFF: &str = "Shuffle turned off.";

pub const GOODBYE: &str = "Goodbye!";
pub const FALLBACK: &str = "Sorry, I don't know about that. Please try again.";
pub const RELOADED: &str = "Reloaded your music!";

pub fn welcome(track_count: usize) -> String {
    format!(
        "Welcome to Music Vault. You can ask to play my music to play your {track_count} songs."
    )
}

pub fn resume_prompt(track: &Track) -> String {
    format!(
        "You were listening to {}. Would you like to resume?",
        track.title
    )
}

/// Short confirmation when resuming a previous session
pub fn continuing(track: &Track) -> String {
    format!("This is {}.", track.title)
}

/// Announcement for a fresh start, naming the collection when it adds information
pub fn from_beginning(track: &Track) -> String {
    match track.distinct_collection() {
        Some(collection) => format!(
            "Starting from the beginning. This is {} from {} collection.",
            track.title, collection
        ),
        None => format!("Starting from the beginning. This is {}.", track.title),
    }
}

pub fn reflect(intent_name: &str) -> String {
    format!("You just triggered {intent_name}.")
}
