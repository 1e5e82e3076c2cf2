//! Static map ingestion from ROS map-server style YAML + image pairs.
//!
//! The YAML carries the geometry and classification thresholds; the
//! image carries the cells (dark = occupied). The loader produces the
//! raw byte map and [`MapInfo`] that [`Costmap::new`](crate::Costmap::new)
//! consumes.

use std::path::{Path, PathBuf};

use glam::DVec2;
use image::GenericImageView;
use serde::Deserialize;

use crate::types::{CostmapError, MapInfo, COST_FREE, COST_LETHAL, COST_UNKNOWN};

const DEFAULT_OCCUPIED_THRESH: f64 = 0.65;
const DEFAULT_FREE_THRESH: f64 = 0.196;

#[derive(Debug, Deserialize)]
struct MapMetadata {
    image: String,
    resolution: f64,
    origin: [f64; 3],
    #[serde(
        default = "default_occupied_thresh",
        deserialize_with = "deserialize_threshold"
    )]
    occupied_thresh: f64,
    #[serde(
        default = "default_free_thresh",
        deserialize_with = "deserialize_threshold"
    )]
    free_thresh: f64,
    #[serde(default = "default_negate")]
    negate: Negate,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Negate {
    Bool(bool),
    Int(i32),
}

impl Negate {
    fn is_negated(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Int(value) => *value != 0,
        }
    }
}

fn default_negate() -> Negate {
    Negate::Bool(false)
}

fn default_occupied_thresh() -> f64 {
    DEFAULT_OCCUPIED_THRESH
}

fn default_free_thresh() -> f64 {
    DEFAULT_FREE_THRESH
}

fn deserialize_threshold<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(serde::de::Error::custom(
            "thresholds must be in the range [0.0, 1.0]",
        ))
    }
}

/// Load a static cost map from a YAML metadata file and its image.
///
/// Classification is trinary: occupancy at or above `occupied_thresh`
/// becomes [`COST_LETHAL`], at or below `free_thresh` becomes
/// [`COST_FREE`], anything in between is [`COST_UNKNOWN`]. Rows are
/// flipped so cell (0, 0) is the lower-left corner of the image.
pub fn load_static_map(yaml_path: impl AsRef<Path>) -> Result<(MapInfo, Vec<u8>), CostmapError> {
    let yaml_path = yaml_path.as_ref();
    let yaml_str = std::fs::read_to_string(yaml_path)?;
    let metadata: MapMetadata = serde_yaml::from_str(&yaml_str)?;
    validate(&metadata)?;

    let image_path = resolve_image_path(yaml_path, &metadata.image);
    let image = image::open(&image_path)?;
    let (width, height) = image.dimensions();
    let luma = image.to_luma8();

    let mut data = vec![COST_UNKNOWN; (width as usize) * (height as usize)];
    for y in 0..height {
        for x in 0..width {
            let mut occupancy = 1.0 - f64::from(luma.get_pixel(x, y).0[0]) / 255.0;
            if metadata.negate.is_negated() {
                occupancy = 1.0 - occupancy;
            }

            let value = if occupancy >= metadata.occupied_thresh {
                COST_LETHAL
            } else if occupancy <= metadata.free_thresh {
                COST_FREE
            } else {
                COST_UNKNOWN
            };

            // Image rows run top-down, grid rows bottom-up.
            let grid_y = height - y - 1;
            data[(grid_y as usize) * (width as usize) + (x as usize)] = value;
        }
    }

    let info = MapInfo {
        width,
        height,
        resolution: metadata.resolution,
        origin: DVec2::new(metadata.origin[0], metadata.origin[1]),
    };
    Ok((info, data))
}

fn validate(metadata: &MapMetadata) -> Result<(), CostmapError> {
    if metadata.resolution <= 0.0 {
        return Err(CostmapError::InvalidMapData(
            "resolution must be positive".to_string(),
        ));
    }
    if metadata.occupied_thresh <= metadata.free_thresh {
        return Err(CostmapError::InvalidMapData(
            "occupied_thresh must be greater than free_thresh".to_string(),
        ));
    }
    Ok(())
}

fn resolve_image_path(yaml_path: &Path, image_ref: &str) -> PathBuf {
    let image_path = PathBuf::from(image_ref);
    if image_path.is_absolute() {
        return image_path;
    }
    match yaml_path.parent() {
        Some(parent) => parent.join(image_path),
        None => image_path,
    }
}
