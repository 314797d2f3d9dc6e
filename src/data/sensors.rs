use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Unit reported for uncalibrated data or sensors without a known unit.
pub const ARBITRARY_UNITS: &str = "a.u.";

static DEFAULT_REGISTRY: Lazy<SensorRegistry> = Lazy::new(SensorRegistry::nilspod);

/// Built-in sensor tables, shared by every [`crate::Datastream`] that does not
/// get an explicit registry.
pub fn default_registry() -> &'static SensorRegistry {
    &DEFAULT_REGISTRY
}

// ---------------------------------------------------------------------------
// SensorRegistry – sensor → unit / legend lookup tables
// ---------------------------------------------------------------------------

/// Static per-sensor metadata: the physical unit of calibrated data and the
/// ordered channel names (legend).
///
/// A missing key is a normal outcome; callers fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorRegistry {
    #[serde(default)]
    pub units: BTreeMap<String, String>,
    #[serde(default)]
    pub legends: BTreeMap<String, Vec<String>>,
}

impl SensorRegistry {
    /// Tables for the NilsPod IMU family.
    pub fn nilspod() -> Self {
        let units = [
            ("acc", "m/s^2"),
            ("gyro", "deg/s"),
            ("mag", "mT"),
            ("baro", "mbar"),
            ("analog", ARBITRARY_UNITS),
            ("ecg", "mV"),
            ("ppg", ARBITRARY_UNITS),
            ("battery", "V"),
        ];
        let legends: [(&str, &[&str]); 8] = [
            ("acc", &["acc_x", "acc_y", "acc_z"]),
            ("gyro", &["gyr_x", "gyr_y", "gyr_z"]),
            ("mag", &["mag_x", "mag_y", "mag_z"]),
            ("baro", &["baro"]),
            ("analog", &["analog_0", "analog_1", "analog_2"]),
            ("ecg", &["ecg"]),
            ("ppg", &["ppg"]),
            ("battery", &["battery"]),
        ];

        Self {
            units: units
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            legends: legends
                .iter()
                .map(|(k, names)| (k.to_string(), names.iter().map(|n| n.to_string()).collect()))
                .collect(),
        }
    }

    /// Parse tables from JSON of the form
    /// `{"units": {"acc": "m/s^2"}, "legends": {"acc": ["x", "y", "z"]}}`.
    /// Either key may be omitted.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Merge `other` into `self`; entries in `other` win.
    pub fn extend(&mut self, other: SensorRegistry) {
        self.units.extend(other.units);
        self.legends.extend(other.legends);
    }

    pub fn unit(&self, sensor: &str) -> Option<&str> {
        self.units.get(sensor).map(String::as_str)
    }

    pub fn legend(&self, sensor: &str) -> Option<&[String]> {
        self.legends.get(sensor).map(Vec::as_slice)
    }
}
