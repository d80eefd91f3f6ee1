use clap::{Arg, ArgMatches};
use lazy_static::lazy_static;
use std::collections::HashSet;
use thiserror::Error;

use oneblock_data::{is_exchange_unlock_id, BucketId};
use oneblock_game_common::{
    components::PlayerId,
    data::{DropsStateProvider, RewardTable},
};

use crate::game::{
    events::ChatCommandEvent, resources::GameData, services::UnlockConsumeResult, HostWorld,
};

const UNLOCK_KEY_PREFIX: &str = "oneblock.unlock.";

fn drop_command(name: &'static str) -> clap::Command<'static> {
    clap::Command::new(name)
        .arg(Arg::new("id").required(true))
        .arg(Arg::new("bucket"))
}

lazy_static! {
    pub static ref CHAT_COMMANDS: clap::Command<'static> = {
        clap::Command::new("Chat Commands")
            .disable_help_subcommand(true)
            .subcommand(clap::Command::new("help"))
            .subcommand(drop_command("unlock"))
            .subcommand(drop_command("lock"))
            .subcommand(drop_command("status"))
            .subcommand(drop_command("enable"))
            .subcommand(drop_command("disable"))
            .subcommand(clap::Command::new("reset").arg(Arg::new("bucket")))
            .subcommand(clap::Command::new("list").arg(Arg::new("bucket")))
            .subcommand(clap::Command::new("consume").arg(Arg::new("consumable").required(true)))
    };
}

#[derive(Error, Debug)]
pub enum ChatCommandError {
    #[error("Invalid command")]
    InvalidCommand,
    #[error("Invalid argument")]
    InvalidArguments,
    #[error("{0}")]
    WithMessage(String),
}

impl From<shellwords::MismatchedQuotes> for ChatCommandError {
    fn from(_: shellwords::MismatchedQuotes) -> Self {
        Self::InvalidCommand
    }
}

impl From<clap::Error> for ChatCommandError {
    fn from(error: clap::Error) -> Self {
        match error.kind() {
            clap::ErrorKind::MissingRequiredArgument => Self::InvalidArguments,
            _ => Self::InvalidCommand,
        }
    }
}

fn send_multiline_message(world: &mut dyn HostWorld, player_id: PlayerId, text: &str) {
    for line in text.lines() {
        world.send_message(player_id, line);
    }
}

fn send_chat_commands_help(world: &mut dyn HostWorld, player_id: PlayerId) {
    for subcommand in CHAT_COMMANDS.get_subcommands() {
        let mut help_string = String::from(subcommand.get_name());
        for arg in subcommand.get_arguments() {
            if arg.get_id() == "help" || arg.get_id() == "version" {
                continue;
            }

            help_string.push(' ');
            if !arg.is_required_set() {
                help_string.push('[');
                help_string.push_str(arg.get_id());
                help_string.push(']');
            } else {
                help_string.push_str(arg.get_id());
            }
        }

        world.send_message(player_id, &help_string);
    }
}

/// Accepts `Soil_Sand` as well as localisation keys such as
/// `oneblock.unlock.Soil_Sand.name`.
pub fn normalize_drop_id(raw: &str) -> String {
    let trimmed = raw.trim();
    let remainder = match trimmed.strip_prefix(UNLOCK_KEY_PREFIX) {
        Some(remainder) => remainder,
        None => return trimmed.to_string(),
    };

    match remainder.find('.') {
        Some(dot) if dot > 0 => remainder[..dot].to_string(),
        _ => remainder.to_string(),
    }
}

fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        String::from("-")
    } else {
        values.join(", ")
    }
}

fn arg_bucket(arg_matches: &ArgMatches) -> BucketId {
    BucketId::new(arg_matches.value_of("bucket").unwrap_or_default())
}

fn arg_drop_id(arg_matches: &ArgMatches) -> Result<String, ChatCommandError> {
    let raw = arg_matches
        .value_of("id")
        .ok_or(ChatCommandError::InvalidArguments)?;
    let drop_id = normalize_drop_id(raw);
    if drop_id.is_empty() {
        return Err(ChatCommandError::WithMessage(format!("Invalid id: {}", raw)));
    }
    Ok(drop_id)
}

fn handle_list(game_data: &GameData, player_id: PlayerId, bucket: &BucketId) -> Vec<String> {
    let unlocked: HashSet<String> = game_data
        .drops_state
        .get_unlocked_drops(player_id, bucket)
        .into_iter()
        .collect();

    let mut known_drops = game_data.reward_selector.known_drops(bucket);
    if known_drops.is_empty() {
        known_drops = unlocked.iter().cloned().collect();
        known_drops.sort_by_key(|drop_id| drop_id.to_lowercase());
    }

    let mut unlocked_drops = Vec::new();
    let mut locked_drops = Vec::new();
    let mut unlocked_exchanges = Vec::new();
    let mut locked_exchanges = Vec::new();

    for drop_id in known_drops {
        if drop_id.is_empty() {
            continue;
        }

        let is_unlocked = unlocked.contains(&drop_id)
            || game_data.drop_defaults.is_default_drop(bucket, &drop_id);
        match (is_exchange_unlock_id(&drop_id), is_unlocked) {
            (true, true) => unlocked_exchanges.push(drop_id),
            (true, false) => locked_exchanges.push(drop_id),
            (false, true) => unlocked_drops.push(drop_id),
            (false, false) => locked_drops.push(drop_id),
        }
    }

    let mut lines = vec![
        format!("OneBlock expedition: {}", bucket),
        format!(
            "Unlocked drops ({}): {}",
            unlocked_drops.len(),
            join_or_dash(&unlocked_drops)
        ),
        format!(
            "Locked drops ({}): {}",
            locked_drops.len(),
            join_or_dash(&locked_drops)
        ),
    ];
    if !unlocked_exchanges.is_empty() || !locked_exchanges.is_empty() {
        lines.push(format!(
            "Unlocked exchanges ({}): {}",
            unlocked_exchanges.len(),
            join_or_dash(&unlocked_exchanges)
        ));
        lines.push(format!(
            "Locked exchanges ({}): {}",
            locked_exchanges.len(),
            join_or_dash(&locked_exchanges)
        ));
    }
    lines
}

fn handle_chat_command(
    game_data: &GameData,
    world: &mut dyn HostWorld,
    player_id: PlayerId,
    command_text: &str,
) -> Result<(), ChatCommandError> {
    let mut args = shellwords::split(command_text)?;
    args.insert(0, String::new()); // Clap expects arg[0] to be like executable name
    let command_matches = CHAT_COMMANDS.clone().try_get_matches_from(args)?;
    let drops_state = &game_data.drops_state;

    match command_matches
        .subcommand()
        .ok_or(ChatCommandError::InvalidCommand)?
    {
        ("help", _) => {
            send_chat_commands_help(world, player_id);
        }
        ("unlock", arg_matches) => {
            let drop_id = arg_drop_id(arg_matches)?;
            let bucket = arg_bucket(arg_matches);

            let message = if game_data.drop_defaults.is_default_drop(&bucket, &drop_id) {
                format!("Already available by default: {}", drop_id)
            } else if drops_state.unlock(player_id, &bucket, &drop_id) {
                format!("Unlocked {} in {}", drop_id, bucket)
            } else {
                format!("Already unlocked (or failed): {}", drop_id)
            };
            world.send_message(player_id, &message);
        }
        ("lock", arg_matches) => {
            let drop_id = arg_drop_id(arg_matches)?;
            let bucket = arg_bucket(arg_matches);

            let message = if game_data.drop_defaults.is_default_drop(&bucket, &drop_id) {
                format!("Cannot lock the default drop: {}", drop_id)
            } else if drops_state.lock(player_id, &bucket, &drop_id) {
                format!("Locked {} in {}", drop_id, bucket)
            } else {
                format!("Was not unlocked (or failed): {}", drop_id)
            };
            world.send_message(player_id, &message);
        }
        ("status", arg_matches) => {
            let drop_id = arg_drop_id(arg_matches)?;
            let bucket = arg_bucket(arg_matches);

            let unlocked = drops_state.is_unlocked(player_id, &bucket, &drop_id)
                || game_data.drop_defaults.is_default_drop(&bucket, &drop_id);
            let enabled = drops_state
                .get_enabled_drops(player_id, &bucket)
                .contains(&drop_id);
            world.send_message(
                player_id,
                &format!(
                    "Status for {} in {} | unlocked={} enabled={}",
                    drop_id, bucket, unlocked, enabled
                ),
            );
        }
        (name @ ("enable" | "disable"), arg_matches) => {
            let drop_id = arg_drop_id(arg_matches)?;
            let bucket = arg_bucket(arg_matches);
            let enabled = name == "enable";

            if !drops_state.set_enabled(player_id, &bucket, &drop_id, enabled) {
                return Err(ChatCommandError::WithMessage(
                    if !enabled && game_data.drop_defaults.is_default_drop(&bucket, &drop_id) {
                        format!("Cannot disable the default drop: {}", drop_id)
                    } else {
                        format!("Not unlocked: {}", drop_id)
                    },
                ));
            }

            world.send_message(
                player_id,
                &format!(
                    "{} {} in {}",
                    if enabled { "Enabled" } else { "Disabled" },
                    drop_id,
                    bucket
                ),
            );
        }
        ("reset", arg_matches) => {
            let bucket = arg_bucket(arg_matches);
            drops_state.reset_enabled_to_unlocked(player_id, &bucket);
            world.send_message(
                player_id,
                &format!("Enabled drops in {} reset to unlocked", bucket),
            );
        }
        ("list", arg_matches) => {
            let bucket = arg_bucket(arg_matches);
            for line in handle_list(game_data, player_id, &bucket) {
                world.send_message(player_id, &line);
            }
        }
        ("consume", arg_matches) => {
            let consumable_item_id = arg_matches
                .value_of("consumable")
                .ok_or(ChatCommandError::InvalidArguments)?;
            let unlock_service = &game_data.unlock_service;

            let message = match unlock_service.consume(player_id, consumable_item_id) {
                UnlockConsumeResult::Unlocked => format!(
                    "Consumed {}. Unlocked drop: {}",
                    consumable_item_id,
                    unlock_service
                        .get_drop_id_for_consumable(consumable_item_id)
                        .unwrap_or_default()
                ),
                UnlockConsumeResult::AlreadyUnlocked => format!(
                    "Cannot consume {}: this unlock is already known",
                    consumable_item_id
                ),
                UnlockConsumeResult::InvalidItem => {
                    format!("Not a OneBlock unlock consumable: {}", consumable_item_id)
                }
                UnlockConsumeResult::UnlockFailed => {
                    format!("Failed to consume unlock item: {}", consumable_item_id)
                }
            };
            world.send_message(player_id, &message);
        }
        _ => return Err(ChatCommandError::InvalidCommand),
    }

    Ok(())
}

pub fn chat_commands_system(
    game_data: &GameData,
    world: &mut dyn HostWorld,
    event: &ChatCommandEvent,
) {
    let command = event.command.trim();
    let command_text = command.strip_prefix('/').unwrap_or(command);

    if let Err(error) = handle_chat_command(game_data, world, event.player_id, command_text) {
        send_multiline_message(world, event.player_id, &format!("Failed: {}", command));
        send_multiline_message(world, event.player_id, &error.to_string());
    }
}
