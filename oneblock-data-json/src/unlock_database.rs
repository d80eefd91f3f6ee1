use log::debug;
use std::{collections::HashMap, path::Path};

use oneblock_data::{BucketId, DropId, UnlockDatabase, UnlockDefinition};

use crate::bench::{read_bench_recipes, read_recipe, read_tag_int, read_tag_string, BenchRecipe};

fn load_unlock(
    recipe: &BenchRecipe,
    recipe_json: &serde_json::Value,
) -> Option<(String, UnlockDefinition)> {
    let consumable_item_id = recipe_json.get("Id")?.as_str()?;
    if consumable_item_id.is_empty() {
        return None;
    }

    let tags = recipe_json.get("Tags").filter(|tags| tags.is_object())?;
    let drop_id = match read_tag_string(tags, "OneBlockUnlockDropId").filter(|id| !id.is_empty())
    {
        Some(drop_id) => drop_id,
        None => DropId::entity_drop_id(&read_tag_string(tags, "OneBlockUnlockEntityId")?)?,
    };

    let bucket = read_tag_string(tags, "OneBlockUnlockExpedition")
        .filter(|bucket| !bucket.is_empty())
        .or_else(|| recipe.category_bucket.clone())
        .map(|bucket| BucketId::new(&bucket))
        .unwrap_or_default();

    let weight = read_tag_int(tags, "OneBlockUnlockWeight", 1).clamp(1, u32::MAX as i64) as u32;

    Some((
        consumable_item_id.to_string(),
        UnlockDefinition::new(bucket, drop_id, weight),
    ))
}

pub fn get_unlock_database(
    bench_path: &Path,
    recipe_dir: &Path,
) -> Result<UnlockDatabase, anyhow::Error> {
    let mut unlocks = HashMap::new();

    for recipe in read_bench_recipes(bench_path)? {
        let recipe_json = match read_recipe(recipe_dir, &recipe) {
            Some(recipe_json) => recipe_json,
            None => continue,
        };

        if let Some((consumable_item_id, definition)) = load_unlock(&recipe, &recipe_json) {
            unlocks.insert(consumable_item_id, definition);
        }
    }

    debug!("Loaded {} unlock definitions", unlocks.len());
    Ok(UnlockDatabase::new(unlocks))
}
