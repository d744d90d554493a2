use crate::config::{AppConfig, AssetConfig};
use crate::home::{CircleEntity, SlotIndex};
use gdk_pixbuf::Pixbuf;
use std::path::{Path, PathBuf};

pub fn logo_path(assets: &AssetConfig) -> PathBuf {
    assets.root.join(&assets.logo)
}

/// Configured icon, otherwise `<apps_dir>/app_<n>/app_<n>.jpg`.
pub fn icon_path(assets: &AssetConfig, slot: SlotIndex, apps: &[AppConfig]) -> PathBuf {
    apps.iter()
        .find(|app| app.slot == slot)
        .and_then(|app| app.icon.as_ref())
        .map(|icon| assets.root.join(icon))
        .unwrap_or_else(|| {
            let id = slot.plugin_id();
            assets
                .root
                .join(&assets.apps_dir)
                .join(id.as_str())
                .join(format!("{id}.jpg"))
        })
}

/// Missing images are expected; the entity is drawn as a plain disk instead.
pub fn load_image(path: &Path, radius: f64) -> Option<Pixbuf> {
    if !path.exists() {
        log::warn!("Image not found: {}", path.display());
        return None;
    }

    let size = (2.0 * radius).round() as i32;
    Pixbuf::from_file_at_scale(path, size, size, false)
        .map_err(|e| log::error!("Error loading image {}: {}", path.display(), e))
        .ok()
}

pub fn attach_images(entities: &mut [CircleEntity], assets: &AssetConfig, apps: &[AppConfig]) {
    for entity in entities {
        let path = if entity.is_main() {
            logo_path(assets)
        } else {
            icon_path(assets, entity.slot, apps)
        };
        entity.image = load_image(&path, entity.radius());
    }
}
