use std::path::PathBuf;

use hunter_content::ContentFactory;
use hunter_core::GameConfig;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../../data")
}

#[test]
fn shipped_content_loads() {
    let catalog = ContentFactory::new(data_dir()).load_catalog().unwrap();

    assert_eq!(catalog.config, GameConfig::default());
    assert!(catalog.item_definition("pickaxe").is_some());
    assert!(catalog.skill("fireball").unwrap().is_ok());
    for kind in ["slime", "skeleton", "goblin", "orc", "demon"] {
        let template = catalog.enemy_template(kind).unwrap();
        assert_eq!(template.max_health, GameConfig::DEFAULT_ENEMY_HEALTH);
    }
}

#[test]
fn shipped_scenarios_exist() {
    let factory = ContentFactory::new(data_dir());
    assert!(factory.scenario_path("mfu_eviction").is_file());
}
