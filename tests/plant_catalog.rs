/// Plant catalog file tests
///
/// Loads the shipped `plants.toml` and checks it agrees with the built-in
/// registry.
///
/// Run with: cargo test --test plant_catalog

use garden_monitor::model::{GardenError, ParameterKind, PlantRequirements};
use garden_monitor::plants::{all_plant_names, find_plant, load_catalog, load_plants, parse_plants};

const CATALOG_PATH: &str = "./plants.toml";

#[test]
fn test_shipped_catalog_loads() {
    let plants = load_plants(CATALOG_PATH).expect("plants.toml should be valid");
    assert!(plants.len() >= all_plant_names().len());

    let names: Vec<&str> = plants.iter().map(|p| p.name.as_str()).collect();
    for builtin in all_plant_names() {
        assert!(names.contains(&builtin), "plants.toml is missing {}", builtin);
    }
}

#[test]
fn test_shipped_catalog_matches_registry() {
    let plants = load_plants(CATALOG_PATH).expect("plants.toml should be valid");
    for profile in &plants {
        let Some(builtin) = find_plant(&profile.name) else {
            continue;
        };
        let standards = profile
            .standards()
            .unwrap_or_else(|| panic!("{} should use bands", profile.name));
        for kind in ParameterKind::ALL {
            assert_eq!(
                standards.get(kind),
                builtin.standards.get(kind),
                "{} {} differs from the built-in standard",
                profile.name,
                kind
            );
        }
    }
}

#[test]
fn test_shipped_catalog_has_an_ideal_plant() {
    let plants = load_plants(CATALOG_PATH).expect("plants.toml should be valid");
    assert!(
        plants.iter().any(|p| matches!(p.requirements, PlantRequirements::Ideal(_))),
        "at least one plant should exercise the tolerance policy"
    );
}

#[test]
fn test_missing_file_is_config_error() {
    let result = load_plants("./no-such-dir/plants.toml");
    assert!(matches!(result, Err(GardenError::Config(_))));
    assert_eq!(load_catalog(None).expect("built-ins").len(), 3);
}

#[test]
fn test_overlapping_bands_rejected() {
    let text = r#"
        [[plants]]
        name = "Helecho"
        [plants.standards.temperature]
        optimal = [15, 22]
        medium = [20, 25]
        poor = [10]
        [plants.standards.humidity]
        optimal = [60, 80]
        medium = [50, 59]
        poor = [40]
        [plants.standards.soil_moisture]
        optimal = [40, 60]
        medium = [30, 39]
        poor = [20]
        [plants.standards.luminosity]
        optimal = [100, 400]
        medium = [50, 99]
        poor = [10]
    "#;
    let result = parse_plants(text);
    assert!(
        matches!(result, Err(GardenError::InvalidStandard { parameter: ParameterKind::Temperature, .. })),
        "got {:?}",
        result
    );
}
