use anyhow::Context;
use log::warn;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

const EXPEDITION_MARKER: &str = "Expedition_";

#[derive(Error, Debug)]
pub enum GameDataError {
    #[error("Missing BlockType.Bench section in {0}")]
    MissingBench(PathBuf),

    #[error("Expected a JSON object in {0}")]
    NotAnObject(PathBuf),
}

/// A recipe listed by a bench category, with the bucket implied by the
/// category id (`..._Expedition_<bucket>`).
pub struct BenchRecipe {
    pub category_bucket: Option<String>,
    pub recipe_id: String,
}

pub fn read_json_object(path: &Path) -> Result<Value, anyhow::Error> {
    let str = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file {}", path.to_string_lossy()))?;
    let value: Value = serde_json::from_str(&str)
        .with_context(|| format!("Failed to parse JSON from file {}", path.to_string_lossy()))?;

    if value.is_object() {
        Ok(value)
    } else {
        Err(GameDataError::NotAnObject(path.to_path_buf()).into())
    }
}

pub fn read_bench_recipes(bench_path: &Path) -> Result<Vec<BenchRecipe>, anyhow::Error> {
    let bench_json = read_json_object(bench_path)?;
    let bench = bench_json
        .get("BlockType")
        .and_then(|block_type| block_type.get("Bench"))
        .filter(|bench| bench.is_object())
        .ok_or_else(|| GameDataError::MissingBench(bench_path.to_path_buf()))?;

    let categories = match bench.get("Categories").and_then(Value::as_array) {
        Some(categories) => categories,
        None => return Ok(Vec::new()),
    };

    let mut recipes = Vec::new();
    for category in categories.iter().filter(|category| category.is_object()) {
        let category_bucket = category
            .get("Id")
            .and_then(Value::as_str)
            .and_then(bucket_from_category_id);

        let recipe_ids = match category.get("Recipes").and_then(Value::as_array) {
            Some(recipe_ids) => recipe_ids,
            None => continue,
        };

        for recipe_id in recipe_ids.iter().filter_map(Value::as_str) {
            if recipe_id.is_empty() {
                continue;
            }

            recipes.push(BenchRecipe {
                category_bucket: category_bucket.clone(),
                recipe_id: recipe_id.to_string(),
            });
        }
    }

    Ok(recipes)
}

/// Looks for `<dir>/Expedition_<bucket>/<id>.json` first, then
/// `<dir>/<id>.json`.
pub fn read_recipe(recipe_dir: &Path, recipe: &BenchRecipe) -> Option<Value> {
    if recipe.recipe_id.contains(['/', '\\']) || recipe.recipe_id.contains("..") {
        warn!("Ignoring recipe with unsafe id {:?}", recipe.recipe_id);
        return None;
    }

    let file_name = format!("{}.json", recipe.recipe_id);
    let mut candidates = Vec::with_capacity(2);
    if let Some(bucket) = recipe.category_bucket.as_deref() {
        candidates.push(
            recipe_dir
                .join(format!("{}{}", EXPEDITION_MARKER, bucket))
                .join(&file_name),
        );
    }
    candidates.push(recipe_dir.join(&file_name));

    candidates
        .iter()
        .filter(|path| path.is_file())
        .find_map(|path| match read_json_object(path) {
            Ok(recipe_json) => Some(recipe_json),
            Err(error) => {
                warn!("Skipping recipe file: {:#}", error);
                None
            }
        })
}

fn bucket_from_category_id(category_id: &str) -> Option<String> {
    let index = category_id.rfind(EXPEDITION_MARKER)?;
    let bucket = &category_id[index + EXPEDITION_MARKER.len()..];
    if bucket.is_empty() {
        None
    } else {
        Some(bucket.to_string())
    }
}

fn first_value(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(values) => values.first(),
        value => Some(value),
    }
}

/// Reads a tag as a string. Arrays contribute their first element.
pub fn read_tag_string(tags: &Value, key: &str) -> Option<String> {
    match first_value(tags.get(key)?)? {
        Value::String(value) => Some(value.clone()),
        Value::Number(value) => Some(value.to_string()),
        Value::Bool(value) => Some(value.to_string()),
        _ => None,
    }
}

pub fn read_tag_int(tags: &Value, key: &str, default_value: i64) -> i64 {
    let value = match tags.get(key).and_then(first_value) {
        Some(value) => value,
        None => return default_value,
    };

    match value {
        Value::Number(number) => number.as_i64().unwrap_or(default_value),
        Value::String(text) => text.trim().parse().unwrap_or(default_value),
        _ => default_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bucket_from_category_id() {
        assert_eq!(
            bucket_from_category_id("OneBlock_Unlocks_Expedition_Deep Cave"),
            Some(String::from("Deep Cave"))
        );
        assert_eq!(bucket_from_category_id("OneBlock_Unlocks"), None);
        assert_eq!(bucket_from_category_id("Expedition_"), None);
    }

    #[test]
    fn test_read_tag_values() {
        let tags = json!({
            "Single": "Soil_Sand",
            "List": ["Soil_Grass", "Ignored"],
            "Weight": ["7"],
            "Number": 3,
            "Empty": [],
        });

        assert_eq!(read_tag_string(&tags, "Single").as_deref(), Some("Soil_Sand"));
        assert_eq!(read_tag_string(&tags, "List").as_deref(), Some("Soil_Grass"));
        assert_eq!(read_tag_string(&tags, "Empty"), None);
        assert_eq!(read_tag_string(&tags, "Missing"), None);
        assert_eq!(read_tag_int(&tags, "Weight", 1), 7);
        assert_eq!(read_tag_int(&tags, "Number", 1), 3);
        assert_eq!(read_tag_int(&tags, "Single", 1), 1);
        assert_eq!(read_tag_int(&tags, "Missing", 4), 4);
    }

    #[test]
    fn test_bench_without_bench_section_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let bench_path = dir.path().join("bench.json");
        std::fs::write(&bench_path, r#"{ "BlockType": {} }"#).unwrap();

        let error = read_bench_recipes(&bench_path).err().unwrap();
        assert!(matches!(
            error.downcast_ref::<GameDataError>(),
            Some(GameDataError::MissingBench(_))
        ));
    }

    #[test]
    fn test_bench_without_categories_is_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let bench_path = dir.path().join("bench.json");
        std::fs::write(&bench_path, r#"{ "BlockType": { "Bench": {} } }"#).unwrap();

        assert!(read_bench_recipes(&bench_path).unwrap().is_empty());
    }

    #[test]
    fn test_read_recipe_prefers_expedition_folder() {
        let dir = tempfile::TempDir::new().unwrap();
        let expedition_dir = dir.path().join("Expedition_Cave");
        std::fs::create_dir(&expedition_dir).unwrap();
        std::fs::write(expedition_dir.join("Sand.json"), r#"{ "Source": "cave" }"#).unwrap();
        std::fs::write(dir.path().join("Sand.json"), r#"{ "Source": "root" }"#).unwrap();

        let recipe = BenchRecipe {
            category_bucket: Some(String::from("Cave")),
            recipe_id: String::from("Sand"),
        };
        assert_eq!(read_recipe(dir.path(), &recipe), Some(json!({ "Source": "cave" })));
    }

    #[test]
    fn test_read_recipe_skips_malformed_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let expedition_dir = dir.path().join("Expedition_Cave");
        std::fs::create_dir(&expedition_dir).unwrap();
        std::fs::write(expedition_dir.join("Sand.json"), "{ not json").unwrap();
        std::fs::write(dir.path().join("Sand.json"), r#"{ "Source": "root" }"#).unwrap();
        std::fs::write(dir.path().join("Gravel.json"), "[1, 2]").unwrap();

        let sand = BenchRecipe {
            category_bucket: Some(String::from("Cave")),
            recipe_id: String::from("Sand"),
        };
        assert_eq!(read_recipe(dir.path(), &sand), Some(json!({ "Source": "root" })));

        let gravel = BenchRecipe {
            category_bucket: None,
            recipe_id: String::from("Gravel"),
        };
        assert_eq!(read_recipe(dir.path(), &gravel), None);
    }
}
