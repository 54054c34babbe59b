//! Asset provider backed by a directory tree

use std::fs;
use std::io;
use std::path::PathBuf;

use amius_core::{AssetProvider, AssetType, Material, ServiceError};

/// Resolves logical paths under a root directory
///
/// `/music/Rest` of type [`AssetType::Music`] resolves to `<root>/music/Rest.ogg`.
/// Loading only checks that the file is present; decoding is left to the
/// renderer and mixer that consume the resolved path.
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn extension(kind: AssetType) -> &'static str {
        match kind {
            AssetType::Texture => "png",
            AssetType::Model => "glb",
            AssetType::Shader => "spv",
            AssetType::Music | AssetType::SoundEffect => "ogg",
        }
    }

    fn check(&self, path: &str, kind: AssetType) -> Result<(), ServiceError> {
        let location = self.resolve_location(path, kind);
        match fs::metadata(&location) {
            Ok(meta) if meta.is_file() => {
                log::debug!("Found {:?} asset {}", kind, location);
                Ok(())
            }
            Ok(_) => Err(ServiceError::NotFound(location)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ServiceError::NotFound(location)),
            Err(e) => Err(ServiceError::Io(e)),
        }
    }
}

impl AssetProvider for DirectoryAssets {
    fn resolve_location(&self, path: &str, kind: AssetType) -> String {
        let relative = path.trim_start_matches('/');
        self.root
            .join(format!("{}.{}", relative, Self::extension(kind)))
            .to_string_lossy()
            .into_owned()
    }

    fn load_material(&self, material: &Material) -> Result<(), ServiceError> {
        self.check(&material.shader_path, AssetType::Shader)?;
        for texture in material.textures() {
            self.check(texture, AssetType::Texture)?;
        }
        Ok(())
    }

    fn load_model(&self, path: &str) -> Result<(), ServiceError> {
        self.check(path, AssetType::Model)
    }

    fn load_music(&self, path: &str) -> Result<(), ServiceError> {
        self.check(path, AssetType::Music)
    }

    fn load_sound_effect(&self, path: &str) -> Result<(), ServiceError> {
        self.check(path, AssetType::SoundEffect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amius_core::ShaderInput;
    use std::path::Path;

    fn temp_root(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("amius_assets_{}_{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_resolve_location() {
        let assets = DirectoryAssets::new("data");
        let expected = Path::new("data").join("music/Rest.ogg");
        assert_eq!(
            assets.resolve_location("/music/Rest", AssetType::Music),
            expected.to_string_lossy()
        );
        assert!(assets.resolve_location("models/cube", AssetType::Model).ends_with("cube.glb"));
        assert!(assets.resolve_location("shaders/basic", AssetType::Shader).ends_with("basic.spv"));
    }

    #[test]
    fn test_load_checks_presence() {
        let root = temp_root("presence");
        touch(&root, "models/cube.glb");
        let assets = DirectoryAssets::new(&root);

        assert!(assets.load_model("/models/cube").is_ok());
        assert!(matches!(assets.load_model("/models/sphere"), Err(ServiceError::NotFound(_))));
        // Directories are not assets
        assert!(matches!(assets.load_music("/models"), Err(ServiceError::NotFound(_))));

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_material_needs_shader_and_textures() {
        let root = temp_root("material");
        touch(&root, "shaders/lit.spv");
        let assets = DirectoryAssets::new(&root);

        let material = Material::new("/shaders/lit")
            .with_input(ShaderInput::Texture2d("/textures/grass".to_string()));
        assert!(matches!(assets.load_material(&material), Err(ServiceError::NotFound(_))));

        touch(&root, "textures/grass.png");
        assert!(assets.load_material(&material).is_ok());

        fs::remove_dir_all(&root).unwrap();
    }
}
