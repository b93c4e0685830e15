//! `$` configuration lines
//!
//! `$` dumps the settings table; `$N=V` stores value `V` at index `N`.
//! These lines never reach the motion grammar.

use crate::tokenizer::read_number;
use motionkit_core::{GcodeError, Result};
use motionkit_settings::SettingsStore;
use tracing::warn;

/// A parsed `$` line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingsCommand {
    Dump,
    Store { index: u32, value: f64 },
}

/// Settings index: the parsed value truncated toward zero
///
/// `None` when the truncated value does not fit a `u32`.
pub fn setting_index(value: f64) -> Option<u32> {
    let index = value.trunc();
    if index >= 0.0 && index <= f64::from(u32::MAX) {
        Some(index as u32)
    } else {
        None
    }
}

/// Parse a line starting with `$`
pub fn parse_settings_line(line: &str) -> Result<SettingsCommand> {
    let unsupported = || GcodeError::UnsupportedStatement {
        statement: line.to_string(),
    };
    let body = line.strip_prefix('$').ok_or_else(unsupported)?;
    if body.is_empty() {
        return Ok(SettingsCommand::Dump);
    }

    let (index, cursor) = read_number(line, 1)?;
    if line.as_bytes().get(cursor) != Some(&b'=') {
        return Err(unsupported());
    }
    let (value, end) = read_number(line, cursor + 1)?;
    if end != line.len() {
        return Err(unsupported());
    }

    let index = setting_index(index).ok_or_else(unsupported)?;
    Ok(SettingsCommand::Store { index, value })
}

/// Run a `$` line against the settings store
pub fn execute_settings_line<C>(line: &str, settings: &mut C) -> Result<()>
where
    C: SettingsStore + ?Sized,
{
    match parse_settings_line(line)? {
        SettingsCommand::Dump => {
            settings.dump_settings();
            Ok(())
        }
        SettingsCommand::Store { index, value } => {
            settings.store_setting(index, value).map_err(|e| {
                warn!("Rejected setting ${}={}: {}", index, value, e);
                GcodeError::UnsupportedStatement {
                    statement: line.to_string(),
                }
            })
        }
    }
}
