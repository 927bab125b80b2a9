use super::{decode, Node};
use crate::{
    config::{InputRootResolver, LoaderConfig},
    error::{LoaderError, Result},
    models::{
        ImageBatch, InputSpec, NamedInput, NodeSchema, NodeValue, SelectionOutcome,
        SelectionRequest, ValueType,
    },
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const NODE_CLASS_NAME: &str = "LoadRandomImageFromInput_Shin";
pub const NODE_DISPLAY_NAME: &str = "Load Random Image (Input Folder)";

const LOG_PREFIX: &str = "[LoadRandomImageFromInput]";

/// Loads a seeded random image from a folder under the input root.
#[derive(Clone)]
pub struct RandomImageSelector {
    resolver: Arc<dyn InputRootResolver>,
    default_extensions: String,
}

impl RandomImageSelector {
    pub fn new(resolver: Arc<dyn InputRootResolver>) -> Self {
        Self {
            resolver,
            default_extensions: crate::config::DEFAULT_EXTENSIONS.to_string(),
        }
    }

    pub fn from_config(config: &LoaderConfig) -> Self {
        Self::new(Arc::new(config.clone()))
            .with_default_extensions(config.default_extensions.clone())
    }

    pub fn with_default_extensions(mut self, extensions: impl Into<String>) -> Self {
        self.default_extensions = extensions.into();
        self
    }

    pub fn input_directory(&self) -> PathBuf {
        self.resolver.input_directory()
    }

    /// Never fails: every error is turned into the placeholder image plus a
    /// message describing what went wrong.
    pub fn select(&self, seed: u64, subfolder: &str, extensions: &str) -> SelectionOutcome {
        match self.try_select(seed, subfolder, extensions) {
            Ok((image, filename)) => SelectionOutcome::Success { image, filename },
            Err(err) => {
                log::error!("{} {}", LOG_PREFIX, err);
                SelectionOutcome::failure(err.to_string())
            }
        }
    }

    pub fn select_request(&self, request: &SelectionRequest) -> SelectionOutcome {
        self.select(request.seed, &request.subfolder, &request.extensions)
    }

    pub fn try_select(
        &self,
        seed: u64,
        subfolder: &str,
        extensions: &str,
    ) -> Result<(ImageBatch, String)> {
        let image_dir = resolve_directory(&self.input_directory(), subfolder);
        if !image_dir.is_dir() {
            return Err(LoaderError::DirectoryNotFound(image_dir));
        }

        let valid_extensions = parse_extensions(extensions);
        if valid_extensions.is_empty() {
            return Err(LoaderError::NoValidExtensions);
        }

        let candidates = list_candidates(&image_dir, &valid_extensions)?;
        log::debug!(
            "{} {} candidate(s) in {}",
            LOG_PREFIX,
            candidates.len(),
            image_dir.display()
        );

        let selected = choose(seed, &candidates).ok_or_else(|| LoaderError::NoMatchingFiles {
            dir: image_dir.clone(),
            extensions: valid_extensions.clone(),
        })?;

        let image_path = image_dir.join(selected);
        let image = decode::load_image_batch(&image_path).map_err(|source| {
            LoaderError::ImageDecodeError {
                path: image_path.clone(),
                source,
            }
        })?;

        log::info!(
            "{} Loaded: {} (from {})",
            LOG_PREFIX,
            selected,
            image_dir.display()
        );
        Ok((image, selected.clone()))
    }

    pub fn node_schema(&self) -> NodeSchema {
        NodeSchema {
            required: vec![
                NamedInput {
                    name: "seed".to_string(),
                    spec: InputSpec::Int {
                        default: 0,
                        min: 0,
                        max: u64::MAX,
                    },
                },
                NamedInput {
                    name: "subfolder".to_string(),
                    spec: InputSpec::String {
                        default: String::new(),
                        multiline: false,
                        dynamic_prompts: false,
                        placeholder: Some("e.g. my_images/landscapes".to_string()),
                    },
                },
                NamedInput {
                    name: "extensions".to_string(),
                    spec: InputSpec::single_line(self.default_extensions.clone()),
                },
            ],
            return_types: vec![ValueType::Image, ValueType::String],
            return_names: vec!["image".to_string(), "filename".to_string()],
            function: "load_random_image".to_string(),
            category: "image/loaders".to_string(),
        }
    }
}

impl Node for RandomImageSelector {
    fn schema(&self) -> NodeSchema {
        self.node_schema()
    }

    fn execute(&self, inputs: &serde_json::Value) -> Result<Vec<NodeValue>> {
        let mut request: SelectionRequest = serde_json::from_value(inputs.clone())?;
        if inputs.get("extensions").is_none() {
            request.extensions = self.default_extensions.clone();
        }

        let (image, message) = self.select_request(&request).into_outputs();
        Ok(vec![NodeValue::Image(image), NodeValue::String(message)])
    }
}

/// Split a comma-separated suffix list into trimmed, lower-cased tokens.
pub fn parse_extensions(extensions: &str) -> Vec<String> {
    extensions
        .split(',')
        .map(|ext| ext.trim().to_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

pub fn sanitize_subfolder(subfolder: &str) -> &str {
    subfolder.trim_matches(|c| c == '/' || c == '\\')
}

pub fn resolve_directory(root: &Path, subfolder: &str) -> PathBuf {
    let subfolder = sanitize_subfolder(subfolder);
    if subfolder.is_empty() {
        root.to_path_buf()
    } else {
        root.join(subfolder)
    }
}

/// Regular files directly inside `dir` whose lower-cased name ends with one of
/// `extensions`, sorted by name.
pub fn list_candidates(dir: &Path, extensions: &[String]) -> Result<Vec<String>> {
    let listing_error = |source: std::io::Error| LoaderError::ListingError {
        dir: dir.to_path_buf(),
        source,
    };

    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir).map_err(listing_error)? {
        let entry = entry.map_err(listing_error)?;
        if !entry.path().is_file() {
            continue;
        }

        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                log::warn!("{} Skipping non UTF-8 file name {:?}", LOG_PREFIX, raw);
                continue;
            }
        };

        let lowered = name.to_lowercase();
        if extensions.iter().any(|ext| lowered.ends_with(ext.as_str())) {
            candidates.push(name);
        }
    }

    candidates.sort();
    Ok(candidates)
}

/// Uniform draw from `candidates` with a generator seeded for this call only.
pub fn choose(seed: u64, candidates: &[String]) -> Option<&String> {
    if candidates.is_empty() {
        return None;
    }
    let mut rng = StdRng::seed_from_u64(seed);
    candidates.get(rng.random_range(0..candidates.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use std::collections::HashSet;
    use tempfile::{tempdir, TempDir};

    fn selector_for(dir: &TempDir) -> RandomImageSelector {
        RandomImageSelector::from_config(&LoaderConfig::new().with_input_dir(dir.path()))
    }

    fn write_rgb(path: &Path, color: [u8; 3]) {
        RgbImage::from_pixel(2, 2, Rgb(color)).save(path).unwrap();
    }

    fn populated_dir(names: &[&str]) -> TempDir {
        let dir = tempdir().unwrap();
        for name in names {
            write_rgb(&dir.path().join(name), [10, 20, 30]);
        }
        dir
    }

    #[test]
    fn test_parse_extensions() {
        assert_eq!(
            parse_extensions(" .PNG, .jpg ,,.Webp"),
            vec![".png", ".jpg", ".webp"]
        );
        assert!(parse_extensions(" , ,").is_empty());
        assert!(parse_extensions("").is_empty());
    }

    #[test]
    fn test_sanitize_subfolder() {
        assert_eq!(sanitize_subfolder("/cats/"), "cats");
        assert_eq!(sanitize_subfolder("\\cats\\tabby\\"), "cats\\tabby");
        assert_eq!(sanitize_subfolder("a/b"), "a/b");
        assert_eq!(sanitize_subfolder("//"), "");
    }

    #[test]
    fn test_resolve_directory() {
        let root = Path::new("/data/input");
        assert_eq!(resolve_directory(root, ""), PathBuf::from("/data/input"));
        assert_eq!(resolve_directory(root, "/"), PathBuf::from("/data/input"));
        assert_eq!(
            resolve_directory(root, "/cats/"),
            PathBuf::from("/data/input/cats")
        );
    }

    #[test]
    fn test_choose_is_deterministic_per_seed() {
        let names: Vec<String> = (0..10).map(|i| format!("img{}.png", i)).collect();
        for seed in [0, 1, 42, u64::MAX] {
            assert_eq!(choose(seed, &names), choose(seed, &names));
        }
        assert_eq!(choose(7, &[]), None);
    }

    #[test]
    fn test_different_seeds_spread_over_candidates() {
        let names: Vec<String> = (0..5).map(|i| format!("img{}.png", i)).collect();
        let picked: HashSet<&String> = (0..64).filter_map(|seed| choose(seed, &names)).collect();
        assert!(picked.len() > 1);
    }

    #[test]
    fn test_list_candidates_filters_and_sorts() {
        let dir = populated_dir(&["b.PNG", "a.jpg"]);
        fs::write(dir.path().join("notes.txt"), "not an image").unwrap();
        fs::create_dir(dir.path().join("nested.png")).unwrap();

        let candidates = list_candidates(dir.path(), &parse_extensions(".png,.jpg")).unwrap();
        assert_eq!(candidates, vec!["a.jpg", "b.PNG"]);
    }

    #[test]
    fn test_listing_a_file_is_a_listing_error() {
        let dir = populated_dir(&["x.png"]);
        let err = list_candidates(&dir.path().join("x.png"), &parse_extensions(".png"))
            .unwrap_err();

        assert!(matches!(err, LoaderError::ListingError { .. }));
        assert!(err.to_string().starts_with("Error listing files in"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_names_do_not_break_listing() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = populated_dir(&["ok.png"]);
        let raw_name = OsStr::from_bytes(b"bad\xff.png");
        if fs::write(dir.path().join(raw_name), b"x").is_err() {
            // Some filesystems refuse non UTF-8 names outright.
            return;
        }

        let candidates = list_candidates(dir.path(), &parse_extensions(".png")).unwrap();
        assert_eq!(candidates, vec!["ok.png"]);
    }

    #[test]
    fn test_select_request_builders() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("birds")).unwrap();
        write_rgb(&root.path().join("birds").join("heron.bmp"), [1, 2, 3]);
        write_rgb(&root.path().join("birds").join("skip.png"), [1, 2, 3]);

        let request = SelectionRequest::new(77)
            .with_subfolder("birds/")
            .with_extensions(".BMP");
        let outcome = selector_for(&root).select_request(&request);
        assert_eq!(outcome.message(), "heron.bmp");
    }

    #[test]
    fn test_same_seed_selects_same_file() {
        let dir = populated_dir(&["one.png", "two.png", "three.png", "four.png"]);
        let selector = selector_for(&dir);

        let first = selector.select(1234, "", ".png");
        let second = selector.select(1234, "", ".png");
        assert!(first.is_success());
        assert_eq!(first.message(), second.message());
    }

    #[test]
    fn test_selection_ignores_listing_order() {
        let names = ["c.png", "a.png", "b.png"];
        let forward = populated_dir(&names);
        let reversed = tempdir().unwrap();
        for name in names.iter().rev() {
            write_rgb(&reversed.path().join(name), [0, 0, 0]);
        }

        for seed in 0..16 {
            assert_eq!(
                selector_for(&forward).select(seed, "", ".png").message(),
                selector_for(&reversed).select(seed, "", ".png").message()
            );
        }
    }

    #[test]
    fn test_subfolder_is_resolved_under_root() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("cats")).unwrap();
        write_rgb(&root.path().join("cats").join("tabby.jpg"), [200, 100, 50]);

        let outcome = selector_for(&root).select(0, "/cats/", ".jpg");
        assert_eq!(outcome.message(), "tabby.jpg");
        assert_eq!(outcome.image().shape(), [1, 2, 2, 3]);
    }

    #[test]
    fn test_missing_directory_returns_placeholder() {
        let root = tempdir().unwrap();
        let outcome = selector_for(&root).select(0, "nope", ".png");

        assert!(!outcome.is_success());
        assert!(outcome.message().contains("Directory not found"));
        assert_eq!(outcome.image(), &ImageBatch::placeholder());
    }

    #[test]
    fn test_empty_extension_list_is_rejected() {
        let dir = populated_dir(&["a.png"]);
        let err = selector_for(&dir).try_select(0, "", " , ,").unwrap_err();
        assert!(matches!(err, LoaderError::NoValidExtensions));

        let outcome = selector_for(&dir).select(0, "", " , ,");
        assert!(outcome.message().contains("No valid file extensions"));
    }

    #[test]
    fn test_no_matching_files() {
        let dir = populated_dir(&["a.png"]);
        let err = selector_for(&dir).try_select(0, "", ".webp").unwrap_err();
        assert!(matches!(err, LoaderError::NoMatchingFiles { .. }));

        let outcome = selector_for(&dir).select(0, "", ".webp, .gif");
        assert!(outcome.message().starts_with("No images found in"));
        assert!(outcome.message().ends_with("with extensions: .webp, .gif"));
        assert_eq!(outcome.image().shape(), [1, 64, 64, 3]);
    }

    #[test]
    fn test_alpha_image_is_flattened_and_scaled() {
        let dir = tempdir().unwrap();
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([0, 0, 255, 255]));
        img.save(dir.path().join("ghost.png")).unwrap();

        let outcome = selector_for(&dir).select(9, "", ".png");
        let image = outcome.image();
        assert!(outcome.is_success());
        assert_eq!(image.shape(), [1, 2, 2, 3]);
        assert_eq!(image.get(0, 0, 0, 2), Some(1.0));
        assert_eq!(image.get(0, 0, 0, 0), Some(0.0));
        for c in 0..3 {
            assert_eq!(image.get(0, 1, 1, c), Some(1.0));
        }
        assert!(image.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_corrupt_file_returns_decode_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("truncated.jpg"), b"\xFF\xD8\xFF\xE0\x00").unwrap();

        let err = selector_for(&dir).try_select(3, "", ".jpg").unwrap_err();
        assert!(matches!(err, LoaderError::ImageDecodeError { .. }));

        let outcome = selector_for(&dir).select(3, "", ".jpg");
        assert!(outcome.message().starts_with("Error loading image"));
        assert_eq!(outcome.image(), &ImageBatch::placeholder());
    }

    #[test]
    fn test_schema_declares_inputs_and_outputs() {
        let dir = tempdir().unwrap();
        let schema = selector_for(&dir).schema();

        assert_eq!(
            schema.input("seed"),
            Some(&InputSpec::Int {
                default: 0,
                min: 0,
                max: u64::MAX
            })
        );
        match schema.input("extensions") {
            Some(InputSpec::String { default, .. }) => {
                assert_eq!(default, ".png,.jpg,.jpeg,.webp")
            }
            other => panic!("unexpected extensions input: {:?}", other),
        }
        assert_eq!(
            schema.input("subfolder").map(InputSpec::value_type),
            Some(ValueType::String)
        );
        assert_eq!(schema.return_types, vec![ValueType::Image, ValueType::String]);
        assert_eq!(schema.return_names, vec!["image", "filename"]);
        assert_eq!(schema.category, "image/loaders");

        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["required"][0]["type"], "INT");
        assert_eq!(json["return_types"][1], "STRING");
    }

    #[test]
    fn test_execute_uses_configured_default_extensions() {
        let dir = populated_dir(&["only.bmp"]);
        let selector = selector_for(&dir).with_default_extensions(".bmp");

        let outputs = selector
            .execute(&serde_json::json!({ "seed": 5 }))
            .unwrap();
        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[1].as_str(), Some("only.bmp"));
        assert_eq!(outputs[0].as_image().map(|i| i.shape()), Some([1, 2, 2, 3]));
    }

    #[test]
    fn test_execute_rejects_malformed_inputs() {
        let dir = tempdir().unwrap();
        let err = selector_for(&dir)
            .execute(&serde_json::json!({ "seed": "abc" }))
            .unwrap_err();
        assert!(matches!(err, LoaderError::InvalidInput(_)));
    }
}
