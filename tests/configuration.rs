//! Tests for configuration system

use matplan::{Config, Session};
use matplan_mealplan::OverlapMatch;
use temp_dir::TempDir;

#[test]
fn test_config_loads_from_default_toml() {
    let config = Config::load(None).expect("Failed to load config");

    assert_eq!(config.planner.portions_per_recipe, 4);
    assert_eq!(config.planner.target_portions, 4);
    assert_eq!(config.planner.suggestion_limit, 10);
    assert!(config.planner.exclude_variants);
    assert_eq!(config.catalog.target_size, 60);
    assert_eq!(config.shopping.fallback, "Other");
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_file_overrides_defaults() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("matplan.toml");
    std::fs::write(
        &path,
        r#"
[planner]
target_portions = 2
substring_overlap = true

[catalog]
target_size = 24

[shopping]
fallback = "Övrigt"

[[shopping.categories]]
name = "Grönt"
keywords = ["lök", "tomat"]

[[shopping.categories]]
name = "Kött"
keywords = ["färs"]
"#,
    )?;

    let config = Config::load(Some(path.to_string_lossy().into_owned()))?;
    config.validate().map_err(anyhow::Error::msg)?;

    assert_eq!(config.planner.target_portions, 2);
    assert_eq!(config.planner.portions_per_recipe, 4);
    assert_eq!(config.catalog.target_size, 24);
    assert_eq!(
        config.planner.suggestion_options().rank.overlap,
        OverlapMatch::Substring
    );

    let table = config.shopping.category_table()?;
    assert_eq!(table.rules().len(), 2);
    assert_eq!(table.category_of("Nötfärs"), "Kött");
    assert_eq!(table.category_of("Mjölk"), "Övrigt");

    let session = Session::from_config(&config)?;
    assert_eq!(session.catalog().len(), 24);

    Ok(())
}

#[test]
fn test_invalid_portions_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("matplan.toml");
    std::fs::write(&path, "[planner]\nportions_per_recipe = 0\n")?;

    let config = Config::load(Some(path.to_string_lossy().into_owned()))?;

    assert!(config.validate().is_err());
    assert!(Session::from_config(&config).is_err());

    Ok(())
}
