use std::{
    fs,
    path::{Path, PathBuf},
    time::UNIX_EPOCH,
};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::{codecs::png::PngEncoder, imageops::FilterType, ColorType, ImageEncoder};
use log::{debug, warn};
use sha1::{Digest, Sha1};

/// Edge length of the icons shown on application buttons.
pub const ICON_SIZE: u32 = 32;

/// Turns registry icon references into base64 PNGs for the webview.
#[derive(Debug, Clone, Default)]
pub struct IconLoader {
    source_dir: Option<PathBuf>,
    cache_dir: Option<PathBuf>,
}

impl IconLoader {
    pub fn new(source_dir: Option<PathBuf>, cache_dir: Option<PathBuf>) -> Self {
        Self {
            source_dir,
            cache_dir,
        }
    }

    /// Returns `None` when the icon is missing or cannot be decoded; the
    /// button is then shown without an image.
    pub fn load(&self, icon: &str) -> Option<String> {
        let icon = icon.trim();
        if icon.is_empty() {
            return None;
        }

        let Some(path) = self.resolve(icon) else {
            debug!("no icon directory configured for {icon}");
            return None;
        };

        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(err) => {
                warn!("icon {} unavailable: {err}", path.display());
                return None;
            }
        };

        let key = icon_cache_key(&path, &metadata);
        if let Some(encoded) = self.load_cached(&key) {
            return Some(encoded);
        }

        let encoded = encode_icon(&path)?;
        self.store_cached(&key, &encoded);
        Some(encoded)
    }

    fn resolve(&self, icon: &str) -> Option<PathBuf> {
        let path = Path::new(icon);
        if path.is_absolute() {
            Some(path.to_path_buf())
        } else {
            self.source_dir.as_ref().map(|dir| dir.join(path))
        }
    }

    fn load_cached(&self, key: &str) -> Option<String> {
        let path = self.cache_file_path(key)?;
        fs::read_to_string(path).ok()
    }

    fn store_cached(&self, key: &str, data: &str) {
        if let Some(path) = self.cache_file_path(key) {
            if let Some(parent) = path.parent() {
                if fs::create_dir_all(parent).is_err() {
                    return;
                }
            }
            let _ = fs::write(path, data);
        }
    }

    fn cache_file_path(&self, key: &str) -> Option<PathBuf> {
        let mut dir = self.cache_dir.clone()?;
        dir.push(format!("{key}.b64"));
        Some(dir)
    }
}

fn icon_cache_key(path: &Path, metadata: &fs::Metadata) -> String {
    let modified = metadata
        .modified()
        .ok()
        .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);

    let mut hasher = Sha1::new();
    hasher.update(path.to_string_lossy().as_bytes());
    hasher.update(metadata.len().to_le_bytes());
    hasher.update(modified.to_le_bytes());
    hasher.update(ICON_SIZE.to_le_bytes());
    let digest = hasher.finalize();

    let mut hex = String::with_capacity(digest.len() * 2);
    const LUT: &[u8; 16] = b"0123456789abcdef";
    for byte in digest {
        hex.push(LUT[(byte >> 4) as usize] as char);
        hex.push(LUT[(byte & 0x0f) as usize] as char);
    }
    hex
}

fn encode_icon(path: &Path) -> Option<String> {
    let bytes = fs::read(path)
        .map_err(|err| warn!("failed to read icon {}: {err}", path.display()))
        .ok()?;
    let decoded = image::load_from_memory(&bytes)
        .map_err(|err| warn!("failed to decode icon {}: {err}", path.display()))
        .ok()?;
    let pixels = decoded
        .resize_exact(ICON_SIZE, ICON_SIZE, FilterType::Lanczos3)
        .to_rgba8();

    let mut png = Vec::new();
    {
        let encoder = PngEncoder::new(&mut png);
        if encoder
            .write_image(pixels.as_raw(), ICON_SIZE, ICON_SIZE, ColorType::Rgba8)
            .is_err()
        {
            return None;
        }
    }

    Some(BASE64.encode(png))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, ImageBuffer, Rgba};

    fn write_png(dir: &Path, name: &str, size: u32) -> PathBuf {
        let path = dir.join(name);
        ImageBuffer::from_pixel(size, size, Rgba([200u8, 40, 40, 255]))
            .save(&path)
            .unwrap();
        path
    }

    fn decode(encoded: &str) -> image::DynamicImage {
        let bytes = BASE64.decode(encoded).unwrap();
        image::load_from_memory(&bytes).unwrap()
    }

    #[test]
    fn icons_are_scaled_to_button_size() {
        let res = tempfile::tempdir().unwrap();
        write_png(res.path(), "File_Plugin_64.png", 64);

        let loader = IconLoader::new(Some(res.path().to_path_buf()), None);
        let encoded = loader.load("File_Plugin_64.png").unwrap();

        assert_eq!(decode(&encoded).dimensions(), (ICON_SIZE, ICON_SIZE));
    }

    #[test]
    fn absolute_references_ignore_source_dir() {
        let res = tempfile::tempdir().unwrap();
        let path = write_png(res.path(), "abs.png", 16);

        let loader = IconLoader::default();
        assert!(loader.load(path.to_str().unwrap()).is_some());
    }

    #[test]
    fn missing_or_blank_icons_yield_none() {
        let res = tempfile::tempdir().unwrap();
        let loader = IconLoader::new(Some(res.path().to_path_buf()), None);

        assert!(loader.load("").is_none());
        assert!(loader.load("   ").is_none());
        assert!(loader.load("App_Workspaces_64.png").is_none());
        assert!(IconLoader::default().load("relative.png").is_none());
    }

    #[test]
    fn undecodable_icons_yield_none() {
        let res = tempfile::tempdir().unwrap();
        fs::write(res.path().join("broken.png"), b"not an image").unwrap();

        let loader = IconLoader::new(Some(res.path().to_path_buf()), None);
        assert!(loader.load("broken.png").is_none());
    }

    #[test]
    fn encoded_icons_are_cached_on_disk() {
        let res = tempfile::tempdir().unwrap();
        let cache = tempfile::tempdir().unwrap();
        write_png(res.path(), "App_ImageEditor_64.png", 64);

        let loader = IconLoader::new(
            Some(res.path().to_path_buf()),
            Some(cache.path().join("icons")),
        );
        let first = loader.load("App_ImageEditor_64.png").unwrap();

        let cached: Vec<_> = fs::read_dir(cache.path().join("icons"))
            .unwrap()
            .flatten()
            .collect();
        assert_eq!(cached.len(), 1);
        assert_eq!(fs::read_to_string(cached[0].path()).unwrap(), first);

        assert_eq!(loader.load("App_ImageEditor_64.png").unwrap(), first);
    }
}
