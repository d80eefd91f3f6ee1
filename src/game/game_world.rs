use crossbeam_channel::Receiver;
use log::{debug, info, warn};
use std::time::Instant;

use crate::game::{
    events::GameEvent,
    resources::GameData,
    systems::{
        apply_key_system, break_block_system, chat_commands_system, exchange_system,
        use_item_system,
    },
    HostWorld,
};

pub struct GameWorld {
    game_event_rx: Receiver<GameEvent>,
}

impl GameWorld {
    pub fn new(game_event_rx: Receiver<GameEvent>) -> Self {
        Self { game_event_rx }
    }

    pub fn handle_event(game_data: &GameData, world: &mut dyn HostWorld, event: GameEvent) {
        match event {
            GameEvent::ApplyKey(event) => {
                apply_key_system(game_data, world, &event);
            }
            GameEvent::BreakBlock(event) => {
                if let Some(reward) = break_block_system(game_data, world, &event) {
                    debug!("Player {} broke {} for {}", event.player_id, event.block_id, reward);
                }
            }
            GameEvent::ChatCommand(event) => chat_commands_system(game_data, world, &event),
            GameEvent::Exchange(event) => {
                exchange_system(game_data, world, &event);
            }
            GameEvent::UseItem(event) => {
                use_item_system(game_data, world, &event);
            }
        }
    }

    /// Processes events until every sender has been dropped, then flushes
    /// the drops state.
    pub fn run(&mut self, game_data: &GameData, world: &mut dyn HostWorld) {
        let started = Instant::now();
        let mut event_count = 0usize;

        for event in self.game_event_rx.iter() {
            Self::handle_event(game_data, world, event);
            event_count += 1;
        }

        info!(
            "Game world stopped after {} events in {:?}",
            event_count,
            started.elapsed()
        );

        if !game_data.drops_state.save_if_dirty() {
            warn!("Drops state could not be saved at shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{HeadlessWorld, WorldChange};
    use crate::game::{
        events::{ChatCommandEvent, UseItemEvent},
        resources::{DropsStateStore, GameConfig},
    };
    use oneblock_data::{BucketId, DropDefaultsDatabase, ExchangeDatabase, UnlockDatabase};
    use oneblock_game_common::{components::PlayerId, data::DropsStateProvider};
    use std::sync::Arc;
    use uuid::Uuid;

    #[test]
    fn test_run_flushes_on_disconnect() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = GameConfig {
            storage_path: dir.path().join("drops.json"),
            game_data_path: None,
            flush_on_mutation: false,
        };
        let drop_defaults = Arc::new(DropDefaultsDatabase::builtin());
        let game_data = GameData::new(
            &config,
            drop_defaults.clone(),
            Arc::new(UnlockDatabase::default()),
            Arc::new(ExchangeDatabase::default()),
        );
        let player = PlayerId::new(Uuid::new_v4());

        let (game_event_tx, game_event_rx) = crossbeam_channel::unbounded();
        game_event_tx
            .send(GameEvent::ChatCommand(ChatCommandEvent::new(
                player,
                String::from("unlock Soil_Sand"),
            )))
            .unwrap();
        game_event_tx
            .send(GameEvent::UseItem(UseItemEvent::new(
                player,
                String::from("Foo"),
            )))
            .unwrap();
        drop(game_event_tx);

        let mut world = HeadlessWorld::default();
        GameWorld::new(game_event_rx).run(&game_data, &mut world);

        assert!(!game_data.drops_state.is_dirty());
        assert_eq!(
            world.changes(),
            &[WorldChange::Message(
                player,
                String::from("Unlocked Soil_Sand in Meadow")
            )]
        );

        let reloaded = DropsStateStore::load(drop_defaults, &config.storage_path);
        assert!(reloaded.is_unlocked(player, &BucketId::new("Meadow"), "Soil_Sand"));
    }
}
