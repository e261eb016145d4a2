use log::info;
use serde::Serialize;
use std::fs;
use std::path::Path;

use super::error::Result;
use super::morph::LifecycleMorpher;
use super::point::PointSet;
use super::stage::Stage;

#[derive(Serialize)]
struct Row {
    x: f32,
    y: f32,
    z: f32,
    r: f32,
    g: f32,
    b: f32,
}

/// Writes one `x,y,z,r,g,b` row per point
pub fn write_point_set<P: AsRef<Path>>(path: P, set: &PointSet) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for p in set {
        let loc = p.position();
        writer.serialize(Row {
            x: loc.x,
            y: loc.y,
            z: loc.z,
            r: p.color[0],
            g: p.color[1],
            b: p.color[2],
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `<dir>/<stage>.csv` for all four stages
pub fn write_stages<P: AsRef<Path>>(dir: P, morpher: &LifecycleMorpher) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    for stage in Stage::ALL {
        let path = dir.join(format!("{}.csv", stage.slug()));
        write_point_set(&path, morpher.stage(stage))?;
        info!("wrote {} points to {}", morpher.point_count(), path.display());
    }
    Ok(())
}
