use log::debug;
use std::{collections::HashMap, path::Path};

use oneblock_data::{BucketId, ExchangeDatabase, ExchangeDefinition};

use crate::bench::{read_bench_recipes, read_recipe, read_tag_int, read_tag_string, BenchRecipe};

fn load_exchange(
    recipe: &BenchRecipe,
    recipe_json: &serde_json::Value,
) -> Option<ExchangeDefinition> {
    let tags = recipe_json.get("Tags").filter(|tags| tags.is_object())?;
    let output_id =
        read_tag_string(tags, "OneBlockExchangeOutputId").filter(|id| !id.is_empty())?;
    let output_quantity =
        read_tag_int(tags, "OneBlockExchangeOutputQuantity", 1).clamp(1, u32::MAX as i64) as u32;

    let bucket = read_tag_string(tags, "OneBlockExchangeExpedition")
        .filter(|bucket| !bucket.is_empty())
        .or_else(|| recipe.category_bucket.clone())
        .map(|bucket| BucketId::new(&bucket))
        .unwrap_or_default();

    let unlock_id = read_tag_string(tags, "OneBlockExchangeUnlockId");

    Some(ExchangeDefinition::new(
        bucket,
        output_id,
        output_quantity,
        unlock_id,
    ))
}

pub fn get_exchange_database(
    bench_path: &Path,
    recipe_dir: &Path,
) -> Result<ExchangeDatabase, anyhow::Error> {
    let mut exchanges = HashMap::new();

    for recipe in read_bench_recipes(bench_path)? {
        let recipe_json = match read_recipe(recipe_dir, &recipe) {
            Some(recipe_json) => recipe_json,
            None => continue,
        };

        if let Some(definition) = load_exchange(&recipe, &recipe_json) {
            exchanges.insert(recipe.recipe_id, definition);
        }
    }

    debug!("Loaded {} exchange definitions", exchanges.len());
    Ok(ExchangeDatabase::new(exchanges))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    #[test]
    fn test_load_exchange_database() {
        let dir = tempfile::TempDir::new().unwrap();
        let bench_path = dir.path().join("exchange_bench.json");
        let recipe_dir = dir.path().join("exchanges");
        fs::create_dir_all(recipe_dir.join("Expedition_Cave")).unwrap();

        fs::write(
            &bench_path,
            json!({ "BlockType": { "Bench": { "Categories": [
                { "Id": "OneBlock_Exchange_Expedition_Cave", "Recipes": ["Exchange_Ore", "Exchange_Free"] }
            ]}}})
            .to_string(),
        )
        .unwrap();
        fs::write(
            recipe_dir.join("Expedition_Cave").join("Exchange_Ore.json"),
            json!({ "Tags": {
                "OneBlockExchangeOutputId": "Ore_Iron",
                "OneBlockExchangeOutputQuantity": ["3"],
                "OneBlockExchangeUnlockId": "Exchange:Ore_Iron"
            }})
            .to_string(),
        )
        .unwrap();
        fs::write(
            recipe_dir.join("Exchange_Free.json"),
            json!({ "Tags": { "OneBlockExchangeOutputId": "Rock_Stone" }}).to_string(),
        )
        .unwrap();

        let database = get_exchange_database(&bench_path, &recipe_dir).unwrap();
        assert_eq!(database.len(), 2);

        let ore = database.get_exchange("Exchange_Ore").unwrap();
        assert_eq!(ore.bucket, BucketId::new("Cave"));
        assert_eq!(ore.output_id, "Ore_Iron");
        assert_eq!(ore.output_quantity, 3);
        assert_eq!(ore.unlock_id.as_deref(), Some("Exchange:Ore_Iron"));

        let free = database.get_exchange("Exchange_Free").unwrap();
        assert_eq!(free.output_quantity, 1);
        assert_eq!(free.unlock_id, None);
    }

    #[test]
    fn test_missing_bench_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = get_exchange_database(&dir.path().join("missing.json"), dir.path());
        assert!(result.is_err());
    }
}
