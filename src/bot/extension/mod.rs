//! Compile-time command extension table.
//!
//! Extensions bundle related slash commands. Instead of loading named modules
//! at runtime, the set of extensions is a static table: each entry names the
//! extension and provides a fallible constructor for its commands. Invoking
//! the constructor is what "loading" an extension means here, and a
//! constructor failure is logged and skipped so the bot keeps the remaining
//! feature sets.

pub mod info;

use serenity::all::CreateCommand;

use crate::error::AppError;
use crate::status::BotStatus;

/// One entry in the capability table.
pub struct Extension {
    pub name: &'static str,

    /// Builds the extension's application commands. A failure here disables
    /// only this extension.
    pub commands: fn() -> Result<Vec<CreateCommand>, AppError>,
}

/// All extensions compiled into the bot.
pub fn registry() -> &'static [Extension] {
    const REGISTRY: &[Extension] = &[Extension {
        name: "info",
        commands: info::commands,
    }];
    REGISTRY
}

/// Builds the application command set from a capability table.
///
/// Invoking each entry's constructor is what "loading" that extension means.
/// A constructor failure disables only its own extension: the failure is
/// logged and the remaining extensions' commands still build.
pub fn build_commands(registry: &[Extension]) -> Vec<CreateCommand> {
    let mut commands = Vec::new();
    for extension in registry {
        match (extension.commands)() {
            Ok(mut built) => {
                tracing::info!("Loaded extension {}", extension.name);
                commands.append(&mut built);
            }
            Err(e) => tracing::error!("Failed to load extension {}: {}", extension.name, e),
        }
    }
    commands
}

/// Routes a received command name to the extension that owns it.
///
/// Returns the reply content, or `None` when no extension recognises the
/// command. The shared session is available to extensions that call out over
/// HTTP.
pub async fn dispatch(
    command: &str,
    status: &BotStatus,
    session: &reqwest::Client,
) -> Option<String> {
    info::respond(command, status, session).await
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::ConfigError;

    /// Tests that every registered extension constructs its commands.
    ///
    /// Expected: the table is non-empty and each constructor succeeds with at
    /// least one command.
    #[test]
    fn registry_extensions_construct_commands() {
        let registry = registry();
        assert!(!registry.is_empty());

        for extension in registry {
            let commands = (extension.commands)().unwrap();
            assert!(!commands.is_empty(), "{} built no commands", extension.name);
        }
    }

    /// Tests that one failing extension does not take the others down.
    ///
    /// Expected: the broken entry is skipped and the info extension's
    /// commands still build, so startup proceeds with the remaining feature
    /// sets.
    #[test]
    fn failing_extension_is_skipped() {
        fn broken_commands() -> Result<Vec<CreateCommand>, AppError> {
            Err(AppError::ConfigErr(ConfigError::MissingEnvVar(
                "EXTENSION_KEY".to_string(),
            )))
        }

        let table = [
            Extension {
                name: "broken",
                commands: broken_commands,
            },
            Extension {
                name: "info",
                commands: info::commands,
            },
        ];

        let commands = build_commands(&table);
        assert_eq!(commands.len(), info::commands().unwrap().len());
    }

    /// Tests that an unknown command name is not claimed by any extension.
    #[tokio::test]
    async fn unknown_command_is_unclaimed() {
        let status = BotStatus::new();
        let session = reqwest::Client::new();

        assert!(dispatch("no-such-command", &status, &session)
            .await
            .is_none());
    }
}
