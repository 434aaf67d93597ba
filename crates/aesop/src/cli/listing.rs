//! Handlers for `aesop genres` and `aesop roles`.

use aesop_ensemble::AesopConfig;
use std::io::Write;

/// Print configured genres, marking the default.
pub fn list_genres<W: Write>(config: &AesopConfig, out: &mut W) -> std::io::Result<()> {
    let story = config.story();
    for genre in story.genres() {
        if genre == story.default_genre() {
            writeln!(out, "{genre} (default)")?;
        } else {
            writeln!(out, "{genre}")?;
        }
    }
    Ok(())
}

/// Print the roster in speaking order with capabilities.
pub fn list_roles<W: Write>(config: &AesopConfig, out: &mut W) -> std::io::Result<()> {
    for (i, role) in config.roles().iter().enumerate() {
        writeln!(out, "{}. {}: {}", i + 1, role.name(), role.capability())?;
    }
    Ok(())
}
