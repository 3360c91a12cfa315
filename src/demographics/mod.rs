//! Demographic profile collected once per participant before the inventory.

use serde::{Deserialize, Serialize};

/// Spanish autonomous communities and their provinces. Region and province
/// answers must come from this table and agree with each other.
pub const REGIONS: &[(&str, &[&str])] = &[
    (
        "Andalucía",
        &["Almería", "Cádiz", "Córdoba", "Granada", "Huelva", "Jaén", "Málaga", "Sevilla"],
    ),
    ("Aragón", &["Huesca", "Teruel", "Zaragoza"]),
    ("Asturias", &["Asturias"]),
    ("Baleares", &["Islas Baleares"]),
    ("Canarias", &["Las Palmas", "Santa Cruz de Tenerife"]),
    ("Cantabria", &["Cantabria"]),
    (
        "Castilla-La Mancha",
        &["Albacete", "Ciudad Real", "Cuenca", "Guadalajara", "Toledo"],
    ),
    (
        "Castilla y León",
        &["Ávila", "Burgos", "León", "Palencia", "Salamanca", "Segovia", "Soria", "Valladolid", "Zamora"],
    ),
    ("Cataluña", &["Barcelona", "Girona", "Lleida", "Tarragona"]),
    ("Extremadura", &["Badajoz", "Cáceres"]),
    ("Galicia", &["A Coruña", "Lugo", "Ourense", "Pontevedra"]),
    ("La Rioja", &["La Rioja"]),
    ("Madrid", &["Madrid"]),
    ("Murcia", &["Murcia"]),
    ("Navarra", &["Navarra"]),
    ("País Vasco", &["Álava", "Guipúzcoa", "Vizcaya"]),
    ("Comunidad Valenciana", &["Alicante", "Castellón", "Valencia"]),
];

pub const GENDER_OPTIONS: &[&str] = &["Male", "Female", "Non-binary", "Prefer not to say"];

pub const EDUCATION_LEVELS: &[&str] = &[
    "Primary education",
    "Secondary education",
    "Upper secondary",
    "Vocational training",
    "University",
    "Postgraduate",
    "Doctorate",
];

pub const MIN_AGE: u32 = 10;
pub const MAX_AGE: u32 = 90;
const MAX_LOCALITY_LEN: usize = 50;

/// Demographic answers for one participant. Stored with the participant
/// row; never joined back into scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub age: u32,
    pub gender: String,
    pub region: String,
    pub province: String,
    pub locality: String,
    pub education: String,
}

/// Provinces belonging to a region, or None for an unknown region.
pub fn provinces_of(region: &str) -> Option<&'static [&'static str]> {
    REGIONS
        .iter()
        .find(|(name, _)| *name == region)
        .map(|(_, provinces)| *provinces)
}

fn valid_locality_char(c: char) -> bool {
    c.is_alphabetic() || c == ' ' || c == '-'
}

/// Validate a demographic profile. Returns all validation errors at once
/// (not just the first).
pub fn validate_profile(profile: &Profile) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if !(MIN_AGE..=MAX_AGE).contains(&profile.age) {
        errors.push(format!(
            "age: must be between {} and {}",
            MIN_AGE, MAX_AGE
        ));
    }

    if !GENDER_OPTIONS.contains(&profile.gender.as_str()) {
        errors.push(format!("gender: unknown option '{}'", profile.gender));
    }

    match provinces_of(&profile.region) {
        None => errors.push(format!("region: unknown region '{}'", profile.region)),
        Some(provinces) => {
            if !provinces.contains(&profile.province.as_str()) {
                errors.push(format!(
                    "province: '{}' is not a province of {}",
                    profile.province, profile.region
                ));
            }
        }
    }

    if profile.locality.is_empty() || profile.locality.chars().count() > MAX_LOCALITY_LEN {
        errors.push(format!(
            "locality: must be 1-{} characters",
            MAX_LOCALITY_LEN
        ));
    } else if !profile.locality.chars().all(valid_locality_char) {
        errors.push("locality: only letters, spaces and hyphens allowed".to_string());
    }

    if !EDUCATION_LEVELS.contains(&profile.education.as_str()) {
        errors.push(format!("education: unknown option '{}'", profile.education));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
