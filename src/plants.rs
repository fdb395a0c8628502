/// Plant catalog for the garden monitoring service.
///
/// Defines the plants the application ships with, along with their banded
/// standards, and loads additional catalogs from TOML. Profiles loaded here
/// are validated once, so the evaluator can assume well-formed bands.

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;

use crate::model::{
    Band, GardenError, IdealValues, ParameterStandard, PlantProfile, PlantRequirements, StandardSet,
};

// ---------------------------------------------------------------------------
// Built-in plants
// ---------------------------------------------------------------------------

/// A plant bundled with the application.
pub struct BuiltinPlant {
    pub name: &'static str,
    pub description: &'static str,
    pub standards: StandardSet,
}

impl BuiltinPlant {
    pub fn to_profile(&self) -> PlantProfile {
        PlantProfile {
            id: None,
            name: self.name.to_string(),
            requirements: PlantRequirements::Banded(self.standards),
        }
    }
}

const fn standard(optimal: (f64, f64), medium: (f64, f64), poor: (f64, f64)) -> ParameterStandard {
    ParameterStandard {
        optimal: Band::closed(optimal.0, optimal.1),
        medium: Band::closed(medium.0, medium.1),
        poor: Band::closed(poor.0, poor.1),
    }
}

/// Plants available without any catalog file.
///
/// Temperature in °C, humidity and soil moisture in %, luminosity in lx.
pub static PLANT_REGISTRY: &[BuiltinPlant] = &[
    BuiltinPlant {
        name: "Menta",
        description: "Mint. Prefers mild temperatures and evenly moist soil.",
        standards: StandardSet {
            temperature: standard((18.0, 24.0), (15.0, 17.0), (25.0, 30.0)),
            humidity: standard((40.0, 60.0), (30.0, 39.0), (61.0, 70.0)),
            soil_moisture: standard((30.0, 50.0), (20.0, 29.0), (51.0, 70.0)),
            luminosity: standard((400.0, 800.0), (200.0, 399.0), (801.0, 1000.0)),
        },
    },
    BuiltinPlant {
        name: "Lavanda",
        description: "Lavender. Tolerates dry air; wants bright light.",
        standards: StandardSet {
            temperature: standard((20.0, 25.0), (15.0, 19.0), (26.0, 30.0)),
            humidity: standard((30.0, 50.0), (20.0, 29.0), (51.0, 70.0)),
            soil_moisture: standard((30.0, 60.0), (20.0, 29.0), (61.0, 70.0)),
            luminosity: standard((300.0, 700.0), (200.0, 299.0), (701.0, 1000.0)),
        },
    },
    BuiltinPlant {
        name: "Albahaca",
        description: "Basil. Warm and humid, the thirstiest of the three.",
        standards: StandardSet {
            temperature: standard((20.0, 30.0), (15.0, 19.0), (31.0, 35.0)),
            humidity: standard((50.0, 70.0), (40.0, 49.0), (71.0, 80.0)),
            soil_moisture: standard((40.0, 60.0), (30.0, 39.0), (61.0, 70.0)),
            luminosity: standard((500.0, 900.0), (300.0, 499.0), (901.0, 1000.0)),
        },
    },
];

/// Names of all built-in plants.
pub fn all_plant_names() -> Vec<&'static str> {
    PLANT_REGISTRY.iter().map(|p| p.name).collect()
}

/// Looks up a built-in plant by name, ignoring case. Returns `None` if not found.
pub fn find_plant(name: &str) -> Option<&'static BuiltinPlant> {
    PLANT_REGISTRY.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

pub fn builtin_profiles() -> Vec<PlantProfile> {
    PLANT_REGISTRY.iter().map(BuiltinPlant::to_profile).collect()
}

// ---------------------------------------------------------------------------
// Catalog files
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    plants: Vec<PlantEntry>,
}

/// One `[[plants]]` table. Exactly one of `standards` / `ideal` must be set.
#[derive(Debug, Deserialize)]
struct PlantEntry {
    name: String,
    #[serde(default)]
    standards: Option<StandardSet>,
    #[serde(default)]
    ideal: Option<IdealValues>,
}

impl TryFrom<PlantEntry> for PlantProfile {
    type Error = GardenError;

    fn try_from(entry: PlantEntry) -> Result<Self, Self::Error> {
        let name = entry.name.trim().to_string();
        if name.is_empty() {
            return Err(GardenError::InvalidProfile("plant name is empty".to_string()));
        }
        let requirements = match (entry.standards, entry.ideal) {
            (Some(standards), None) => {
                standards.validate()?;
                PlantRequirements::Banded(standards)
            }
            (None, Some(ideal)) => PlantRequirements::Ideal(ideal),
            (Some(_), Some(_)) => {
                return Err(GardenError::InvalidProfile(format!(
                    "'{}' defines both standards and ideal values",
                    name
                )));
            }
            (None, None) => {
                return Err(GardenError::InvalidProfile(format!(
                    "'{}' defines neither standards nor ideal values",
                    name
                )));
            }
        };
        Ok(PlantProfile { id: None, name, requirements })
    }
}

/// Parses a TOML plant catalog.
pub fn parse_plants(toml_text: &str) -> Result<Vec<PlantProfile>, GardenError> {
    let file: CatalogFile = toml::from_str(toml_text)?;
    let mut seen = HashSet::new();
    let mut profiles = Vec::with_capacity(file.plants.len());
    for entry in file.plants {
        let profile = PlantProfile::try_from(entry)?;
        if !seen.insert(profile.name.to_lowercase()) {
            return Err(GardenError::InvalidProfile(format!(
                "duplicate plant '{}'",
                profile.name
            )));
        }
        profiles.push(profile);
    }
    Ok(profiles)
}

/// Loads a TOML plant catalog from disk.
pub fn load_plants(path: &str) -> Result<Vec<PlantProfile>, GardenError> {
    let text = fs::read_to_string(path)
        .map_err(|e| GardenError::Config(format!("cannot read {}: {}", path, e)))?;
    parse_plants(&text)
}

/// The catalog file if one is configured, the built-in registry otherwise.
pub fn load_catalog(path: Option<&str>) -> Result<Vec<PlantProfile>, GardenError> {
    match path {
        Some(path) => load_plants(path),
        None => Ok(builtin_profiles()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
