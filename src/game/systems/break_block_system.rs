use log::{debug, warn};

use oneblock_data::{
    bucket_from_block_id, is_exchange_unlock_id, is_reward_block, DropId, DEFAULT_ITEM_ID,
};
use oneblock_game_common::{
    components::BlockPosition,
    data::{DropsStateProvider, RewardTable},
};

use crate::game::{
    events::{BreakBlockEvent, GameMode},
    resources::GameData,
    HostWorld,
};

fn spawn_reward(world: &mut dyn HostWorld, reward: &str, position: BlockPosition) {
    let drop = DropId::parse(reward);
    if !drop.is_valid() {
        world.spawn_item(position, DEFAULT_ITEM_ID, 1);
        return;
    }

    if !drop.is_entity() {
        world.spawn_item(position, &drop.id, 1);
        return;
    }

    let spawn_result = world
        .npc_spawner()
        .map(|npc_spawner| npc_spawner.spawn_npc(&drop.id, position));
    match spawn_result {
        Some(Ok(_)) => {}
        Some(Err(error)) => {
            warn!("Failed to spawn npc reward {} with error {}", drop.id, error);
            world.spawn_item(position, DEFAULT_ITEM_ID, 1);
        }
        None => {
            debug!("No npc spawner for reward {}, spawning default item", drop.id);
            world.spawn_item(position, DEFAULT_ITEM_ID, 1);
        }
    }
}

/// Re-places a broken reward block and spawns one reward above it.
/// Returns the chosen drop id, or `None` if the break was ignored.
pub fn break_block_system(
    game_data: &GameData,
    world: &mut dyn HostWorld,
    event: &BreakBlockEvent,
) -> Option<String> {
    if event.game_mode == GameMode::Creative {
        return None;
    }

    if !is_reward_block(&world.block_categories(&event.block_id)) {
        return None;
    }

    let bucket = bucket_from_block_id(&event.block_id);
    let candidates: Vec<String> = game_data
        .drops_state
        .get_enabled_drops(event.player_id, &bucket)
        .into_iter()
        .filter(|drop_id| !is_exchange_unlock_id(drop_id))
        .collect();
    let reward = game_data.reward_selector.pick_reward(&bucket, &candidates);

    world.set_block(event.position, &event.block_id);
    spawn_reward(world, &reward, event.position.above());

    Some(reward)
}
