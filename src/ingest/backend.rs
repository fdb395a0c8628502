/// Garden backend REST client
///
/// Retrieves sensor readings and the plant catalog from the garden backend,
/// and reads or toggles the irrigation pump.
///
/// Endpoints:
///   GET  /sensores/ultimo          latest reading (404 while none stored)
///   POST /sensores                 store a reading
///   GET  /plantas                  plant catalog with ideal values
///   GET  /usuario-plantas/{id}     a user's plants (bearer token)
///   PUT  /usuario-planta           add a plant to a user (bearer token)
///   DELETE /usuario-planta/{user}/{plant}  remove it again (bearer token)
///   GET  /bomba                    pump state, plain text "on" / "off"
///   POST /bomba                    {"estado": "on" | "off"}

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use std::time::Duration;

use crate::config::BackendConfig;
use crate::model::{
    GardenError, IdealValues, PlantProfile, PlantRequirements, PumpState, RawSensorReading,
    SensorReading,
};

pub const PATH_LATEST_READING: &str = "/sensores/ultimo";
pub const PATH_READINGS: &str = "/sensores";
pub const PATH_PLANTS: &str = "/plantas";
pub const PATH_USER_PLANTS: &str = "/usuario-plantas";
pub const PATH_USER_PLANT: &str = "/usuario-planta";
pub const PATH_PUMP: &str = "/bomba";

// ============================================================================
// Backend Response Structures
// ============================================================================

/// A plant document as returned by `/plantas`.
#[derive(Debug, Deserialize)]
pub struct BackendPlant {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "temperaturaideal", default)]
    pub temperature: Option<f64>,
    #[serde(rename = "humedadideal", default)]
    pub humidity: Option<f64>,
    #[serde(rename = "aireideal", default)]
    pub air_quality: Option<f64>,
    #[serde(rename = "aguaideal", default)]
    pub water_level: Option<f64>,
    #[serde(rename = "tierraideal", default)]
    pub soil_moisture: Option<f64>,
    #[serde(rename = "luminocidadideal", default)]
    pub luminosity: Option<f64>,
}

impl From<BackendPlant> for PlantProfile {
    fn from(plant: BackendPlant) -> Self {
        PlantProfile {
            id: plant.id,
            name: plant.name,
            requirements: PlantRequirements::Ideal(IdealValues {
                temperature: plant.temperature,
                humidity: plant.humidity,
                air_quality: plant.air_quality,
                water_level: plant.water_level,
                soil_moisture: plant.soil_moisture,
                luminosity: plant.luminosity,
            }),
        }
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Joins the base URL and an endpoint path, tolerating trailing slashes.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Parses the body of `/sensores/ultimo`.
pub fn parse_sensor_reading(json: &str) -> Result<SensorReading, GardenError> {
    let raw: RawSensorReading = serde_json::from_str(json)?;
    Ok(SensorReading::from(raw))
}

/// Parses the body of `/plantas` or `/usuario-plantas/{id}`.
pub fn parse_plant_catalog(json: &str) -> Result<Vec<PlantProfile>, GardenError> {
    let plants: Vec<BackendPlant> = serde_json::from_str(json)?;
    Ok(plants.into_iter().map(PlantProfile::from).collect())
}

/// Parses the plain-text body of `GET /bomba`.
pub fn parse_pump_state(text: &str) -> Result<PumpState, GardenError> {
    text.trim().parse()
}

/// Maps a response status for `path` to the error it stands for.
/// `None` for 2xx.
///
/// 404 is meaningful on two routes: no reading stored yet, and an unknown
/// user or plant on the per-user routes.
pub fn status_error(path: &str, status: u16) -> Option<GardenError> {
    if (200..300).contains(&status) {
        return None;
    }
    let err = match status {
        404 if path == PATH_LATEST_READING => GardenError::NoReadings,
        404 if path.starts_with(PATH_USER_PLANTS) || path.starts_with(PATH_USER_PLANT) => {
            GardenError::NotFound(path.to_string())
        }
        code => GardenError::HttpError(code),
    };
    Some(err)
}

/// Body of `POST /bomba`.
pub fn pump_body(state: PumpState) -> serde_json::Value {
    serde_json::json!({ "estado": state.as_str() })
}

/// Body of `PUT /usuario-planta`.
pub fn user_plant_body(user_id: &str, plant_id: &str) -> serde_json::Value {
    serde_json::json!({ "_idUsuario": user_id, "_idPlanta": plant_id })
}

// ============================================================================
// API Client
// ============================================================================

pub struct BackendClient {
    http: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration, auth_token: Option<String>) -> Result<Self, GardenError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(BackendClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
        })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, GardenError> {
        Self::new(
            &config.api_url,
            Duration::from_secs(config.timeout_secs),
            config.auth_token.clone(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        endpoint_url(&self.base_url, path)
    }

    fn token(&self) -> Result<&str, GardenError> {
        self.auth_token.as_deref().ok_or_else(|| {
            GardenError::Config("GARDEN_AUTH_TOKEN is required for per-user plants".to_string())
        })
    }

    fn send(&self, path: &str, request: RequestBuilder) -> Result<Response, GardenError> {
        let response = request.send()?;
        match status_error(path, response.status().as_u16()) {
            Some(err) => Err(err),
            None => Ok(response),
        }
    }

    fn get_text(&self, path: &str) -> Result<String, GardenError> {
        let request = self.http.get(self.url(path)).header("Accept", "application/json");
        Ok(self.send(path, request)?.text()?)
    }

    /// Fetches the most recent reading stored by the backend.
    pub fn latest_reading(&self) -> Result<SensorReading, GardenError> {
        parse_sensor_reading(&self.get_text(PATH_LATEST_READING)?)
    }

    /// Stores a reading, as the sensor station would.
    pub fn post_reading(&self, reading: &SensorReading) -> Result<(), GardenError> {
        let body = RawSensorReading::from(reading);
        self.send(PATH_READINGS, self.http.post(self.url(PATH_READINGS)).json(&body))?;
        Ok(())
    }

    /// Fetches the full plant catalog.
    pub fn plants(&self) -> Result<Vec<PlantProfile>, GardenError> {
        parse_plant_catalog(&self.get_text(PATH_PLANTS)?)
    }

    /// Fetches the plants a user follows. Requires an auth token.
    pub fn user_plants(&self, user_id: &str) -> Result<Vec<PlantProfile>, GardenError> {
        let token = self.token()?;
        let path = format!("{}/{}", PATH_USER_PLANTS, user_id);
        let response = self.send(&path, self.http.get(self.url(&path)).bearer_auth(token))?;
        parse_plant_catalog(&response.text()?)
    }

    /// Adds a catalog plant to a user's list. Adding it twice is a no-op
    /// on the backend.
    pub fn add_user_plant(&self, user_id: &str, plant_id: &str) -> Result<(), GardenError> {
        let token = self.token()?;
        let request = self
            .http
            .put(self.url(PATH_USER_PLANT))
            .bearer_auth(token)
            .json(&user_plant_body(user_id, plant_id));
        self.send(PATH_USER_PLANT, request)?;
        Ok(())
    }

    /// Removes a plant from a user's list.
    pub fn remove_user_plant(&self, user_id: &str, plant_id: &str) -> Result<(), GardenError> {
        let token = self.token()?;
        let path = format!("{}/{}/{}", PATH_USER_PLANT, user_id, plant_id);
        self.send(&path, self.http.delete(self.url(&path)).bearer_auth(token))?;
        Ok(())
    }

    pub fn pump_state(&self) -> Result<PumpState, GardenError> {
        let response = self.send(PATH_PUMP, self.http.get(self.url(PATH_PUMP)))?;
        parse_pump_state(&response.text()?)
    }

    pub fn set_pump_state(&self, state: PumpState) -> Result<(), GardenError> {
        let request = self.http.post(self.url(PATH_PUMP)).json(&pump_body(state));
        self.send(PATH_PUMP, request)?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
