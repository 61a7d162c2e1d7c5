//! YAML configuration

use serde::Deserialize;

use crate::navigation::tracker::STEP_RADIUS_METERS;
use crate::FieldsConfiguration;

/// Tracker tuning
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackerOptions {
    /// Distance to the end of a step under which the step is considered done
    pub step_radius_meters: f64,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            step_radius_meters: STEP_RADIUS_METERS,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Configs {
    pub fields: FieldsConfiguration,
    pub tracker: TrackerOptions,
}

impl Configs {
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| format!("Failed on parse the config: {}", e))
    }

    /// Config file given explicitly by the user, must exist and parse
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed on read the config {}: {}", path.display(), e))?;

        Self::from_yaml(&yaml).map_err(|e| format!("{} ({})", e, path.display()))
    }

    /// First readable and valid file of the candidates, defaults otherwise
    pub fn load<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::path::Path>,
    {
        for path in candidates {
            let Ok(yaml) = std::fs::read_to_string(path.as_ref()) else {
                continue;
            };

            match Self::from_yaml(&yaml) {
                Ok(conf) => return conf,
                Err(e) => tracing::warn!(path = %path.as_ref().display(), "{}", e),
            }
        }

        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_configs() -> Result<(), String> {
        assert_eq!(Configs::default(), Configs::from_yaml("{}")?);

        let yaml = "\nfields:\n  coordinates: latlng\ntracker:\n  step_radius_meters: 6.5";
        let conf = Configs::from_yaml(yaml)?;

        assert_eq!(
            Configs {
                fields: FieldsConfiguration {
                    coordinates: "latlng".to_string(),
                    time: "time".to_string(),
                    accuracy: "accuracy".to_string(),
                    altitude: "altitude".to_string(),
                    flip_coordinates: false,
                },
                tracker: TrackerOptions {
                    step_radius_meters: 6.5,
                },
            },
            conf
        );

        let yaml = "\nfields:\n  flip_coordinates: true";
        let conf = Configs::from_yaml(yaml)?;
        assert!(conf.fields.flip_coordinates);
        assert_eq!(STEP_RADIUS_METERS, conf.tracker.step_radius_meters);

        assert!(Configs::from_yaml("tracker: nope").is_err());

        Ok(())
    }

    #[test]
    fn load_first_valid() -> Result<(), String> {
        let dir = std::env::temp_dir().join(format!("gravefinder-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).map_err(|e| e.to_string())?;

        let broken = dir.join("broken.yaml");
        let good = dir.join("good.yaml");
        std::fs::write(&broken, "tracker: [").map_err(|e| e.to_string())?;
        std::fs::write(&good, "tracker:\n  step_radius_meters: 4.0").map_err(|e| e.to_string())?;

        let conf = Configs::load([dir.join("missing.yaml"), broken, good]);
        assert_eq!(4.0, conf.tracker.step_radius_meters);

        let conf = Configs::load([dir.join("missing.yaml")]);
        assert_eq!(Configs::default(), conf);

        std::fs::remove_dir_all(&dir).map_err(|e| e.to_string())?;

        Ok(())
    }

    #[test]
    fn explicit_file_must_be_valid() -> Result<(), String> {
        let dir = std::env::temp_dir().join(format!("gravefinder-explicit-{}", std::process::id()));
        std::fs::create_dir_all(&dir).map_err(|e| e.to_string())?;

        let broken = dir.join("broken.yaml");
        let good = dir.join("good.yaml");
        std::fs::write(&broken, "tracker: [").map_err(|e| e.to_string())?;
        std::fs::write(&good, "tracker:\n  step_radius_meters: 7.5").map_err(|e| e.to_string())?;

        let err = Configs::from_file(&broken).unwrap_err();
        assert!(err.starts_with("Failed on parse the config"));
        assert!(err.contains("broken.yaml"));

        let err = Configs::from_file(dir.join("missing.yaml")).unwrap_err();
        assert!(err.starts_with("Failed on read the config"));

        assert_eq!(7.5, Configs::from_file(&good)?.tracker.step_radius_meters);

        std::fs::remove_dir_all(&dir).map_err(|e| e.to_string())?;

        Ok(())
    }

    #[test]
    fn infinite_step_radius_falls_back() -> Result<(), String> {
        let conf = Configs::from_yaml("tracker:\n  step_radius_meters: .inf")?;

        let mut tracker = crate::ProximityTracker::new();
        tracker.step_radius(conf.tracker.step_radius_meters);
        assert_eq!(STEP_RADIUS_METERS, tracker.step_radius_meters());

        Ok(())
    }
}
