use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Coordinates and display name for a marathon city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub display_name: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum GazetteerError {
    #[error("failed to read gazetteer file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse gazetteer file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("gazetteer entry with an empty key")]
    EmptyKey,
    #[error("duplicate gazetteer key '{0}'")]
    DuplicateKey(String),
    #[error("coordinates out of range for '{key}': ({lat}, {lng})")]
    OutOfRange { key: String, lat: f64, lng: f64 },
}

/// Built-in marathon cities as (key, display name, lat, lng).
///
/// Keys are what members store in `marathon_cities`; matching is exact.
const BUILTIN_CITIES: &[(&str, &str, f64, f64)] = &[
    ("Boston", "Boston Marathon", 42.3601, -71.0589),
    ("Chicago", "Chicago Marathon", 41.8781, -87.6298),
    ("New York", "New York City Marathon", 40.7128, -74.0060),
    ("Berlin", "BMW Berlin Marathon", 52.5200, 13.4050),
    ("London", "London Marathon", 51.5074, -0.1278),
    ("Tokyo", "Tokyo Marathon", 35.6762, 139.6503),
    ("Sydney", "Sydney Marathon", -33.8688, 151.2093),
    ("Ciudad de México", "Maratón de la Ciudad de México", 19.4326, -99.1332),
    ("Monterrey", "Maratón Internacional de Monterrey", 25.6866, -100.3161),
    ("Guadalajara", "Maratón Internacional de Guadalajara", 20.6597, -103.3496),
    ("Querétaro", "Maratón de Querétaro", 20.5888, -100.3899),
    ("Mazatlán", "Maratón Internacional del Pacífico", 23.2494, -106.4111),
    ("Mérida", "Maratón de Mérida", 20.9674, -89.5926),
    ("Los Angeles", "Los Angeles Marathon", 34.0522, -118.2437),
    ("Houston", "Houston Marathon", 29.7604, -95.3698),
    ("San Antonio", "San Antonio Rock 'n' Roll Marathon", 29.4241, -98.4936),
    ("Philadelphia", "Philadelphia Marathon", 39.9526, -75.1652),
    ("Honolulu", "Honolulu Marathon", 21.3069, -157.8583),
    ("Toronto", "Toronto Waterfront Marathon", 43.6532, -79.3832),
    ("Valencia", "Maratón Valencia", 39.4699, -0.3763),
    ("Madrid", "Maratón de Madrid", 40.4168, -3.7038),
    ("Barcelona", "Zurich Marató Barcelona", 41.3874, 2.1686),
    ("Sevilla", "Zurich Maratón de Sevilla", 37.3891, -5.9845),
    ("Paris", "Marathon de Paris", 48.8566, 2.3522),
    ("Rome", "Maratona di Roma", 41.9028, 12.4964),
    ("Amsterdam", "TCS Amsterdam Marathon", 52.3676, 4.9041),
    ("Athens", "Athens Authentic Marathon", 37.9838, 23.7275),
    ("Buenos Aires", "Maratón de Buenos Aires", -34.6037, -58.3816),
    ("Santiago", "Maratón de Santiago", -33.4489, -70.6693),
    ("Lima", "Maratón de Lima", -12.0464, -77.0428),
    ("Bogotá", "Media Maratón de Bogotá", 4.7110, -74.0721),
];

#[derive(Deserialize)]
struct GazetteerFile {
    #[serde(default)]
    city: Vec<CityEntry>,
}

#[derive(Deserialize)]
struct CityEntry {
    key: String,
    display_name: String,
    lat: f64,
    lng: f64,
}

/// Hand-maintained table from marathon city key to display name and coordinates.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    keys: Vec<String>,
    cities: HashMap<String, City>,
}

impl Gazetteer {
    /// The table compiled into the binary.
    pub fn builtin() -> Self {
        let mut gazetteer = Self {
            keys: Vec::with_capacity(BUILTIN_CITIES.len()),
            cities: HashMap::with_capacity(BUILTIN_CITIES.len()),
        };
        for &(key, display_name, lat, lng) in BUILTIN_CITIES {
            gazetteer.keys.push(key.to_string());
            gazetteer.cities.insert(
                key.to_string(),
                City {
                    display_name: display_name.to_string(),
                    lat,
                    lng,
                },
            );
        }
        gazetteer
    }

    /// Parse a TOML table of `[[city]]` entries, replacing the built-in table.
    pub fn from_toml_str(s: &str) -> Result<Self, GazetteerError> {
        let file: GazetteerFile = toml::from_str(s)?;
        let mut gazetteer = Self {
            keys: Vec::with_capacity(file.city.len()),
            cities: HashMap::with_capacity(file.city.len()),
        };

        for entry in file.city {
            let key = entry.key.trim().to_string();
            if key.is_empty() {
                return Err(GazetteerError::EmptyKey);
            }
            if !(-90.0..=90.0).contains(&entry.lat) || !(-180.0..=180.0).contains(&entry.lng) {
                return Err(GazetteerError::OutOfRange {
                    key,
                    lat: entry.lat,
                    lng: entry.lng,
                });
            }
            if gazetteer.cities.contains_key(&key) {
                return Err(GazetteerError::DuplicateKey(key));
            }
            gazetteer.keys.push(key.clone());
            gazetteer.cities.insert(
                key,
                City {
                    display_name: entry.display_name,
                    lat: entry.lat,
                    lng: entry.lng,
                },
            );
        }

        Ok(gazetteer)
    }

    pub fn from_file(path: &Path) -> Result<Self, GazetteerError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn get(&self, key: &str) -> Option<&City> {
        self.cities.get(key)
    }

    /// City keys in table order (the admin form's option list).
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for Gazetteer {
    fn default() -> Self {
        Self::builtin()
    }
}
