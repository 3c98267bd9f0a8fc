//! Option resolution for a target invocation.
//!
//! Options come in layers: stage baselines, user configuration and the fixed
//! policy that keeps banners and source maps out of the preprocessors. Each
//! layer is a plain value and layers are folded left to right, later layers
//! winning key by key.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::build::{BuildError, Stage};

/// Accepted values for `output` and `bannerOn`.
pub const VALID_OUTPUT_MODES: &[&str] = &["clean", "minified", "both"];

/// Free-form options forwarded to a stage engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionBag(Map<String, Value>);

impl OptionBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Create a bag from key/value pairs.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        Self(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    /// Return a new bag with `key` set to `value`.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Return a new bag with every key of `top` laid over this one.
    ///
    /// The merge is shallow: a nested table in `top` replaces the one below.
    pub fn overlay(&self, top: &OptionBag) -> OptionBag {
        let mut merged = self.0.clone();
        for (k, v) in &top.0 {
            merged.insert(k.clone(), v.clone());
        }
        OptionBag(merged)
    }

    /// Get a raw value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a string value.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Get a boolean value.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the bag has no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Which artifacts a target produces (or carries a banner).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Readable `.css` only
    Clean,
    /// Minified `.min.css` only
    Minified,
    /// Both variants
    Both,
}

impl OutputMode {
    /// Parse a mode, naming `field` in the error.
    pub fn parse(field: &'static str, value: &str) -> Result<Self, BuildError> {
        match value {
            "clean" => Ok(OutputMode::Clean),
            "minified" => Ok(OutputMode::Minified),
            "both" => Ok(OutputMode::Both),
            _ => Err(BuildError::InvalidOptionValue {
                field,
                value: value.to_string(),
                valid: VALID_OUTPUT_MODES,
            }),
        }
    }

    /// Whether the readable variant is covered.
    pub fn includes_clean(self) -> bool {
        matches!(self, OutputMode::Clean | OutputMode::Both)
    }

    /// Whether the minified variant is covered.
    pub fn includes_minified(self) -> bool {
        matches!(self, OutputMode::Minified | OutputMode::Both)
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputMode::Clean => write!(f, "clean"),
            OutputMode::Minified => write!(f, "minified"),
            OutputMode::Both => write!(f, "both"),
        }
    }
}

/// A partial set of options, as written in configuration.
///
/// Unset fields fall through to the layer below when layers are folded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionsLayer {
    /// Directory for intermediate files
    #[serde(default, alias = "tempDir", skip_serializing_if = "Option::is_none")]
    pub temp_dir: Option<PathBuf>,
    /// Output mode: clean, minified or both
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Banner comment text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    /// Which variants carry the banner: clean, minified or both
    #[serde(default, alias = "bannerOn", skip_serializing_if = "Option::is_none")]
    pub banner_on: Option<String>,
    /// Concatenation options
    #[serde(default, skip_serializing_if = "OptionBag::is_empty")]
    pub concat: OptionBag,
    /// LESS options
    #[serde(default, skip_serializing_if = "OptionBag::is_empty")]
    pub less: OptionBag,
    /// Sass options
    #[serde(default, skip_serializing_if = "OptionBag::is_empty")]
    pub sass: OptionBag,
    /// Minifier options
    #[serde(default, skip_serializing_if = "OptionBag::is_empty")]
    pub cssmin: OptionBag,
}

impl OptionsLayer {
    /// The bottom layer: engine-suppressing stage defaults plus the scalar
    /// defaults for every option.
    pub fn baseline() -> Self {
        Self {
            temp_dir: Some(std::env::temp_dir()),
            output: Some("both".to_string()),
            banner: Some(String::new()),
            banner_on: Some("both".to_string()),
            concat: OptionBag::from_pairs([
                ("separator", Value::from("\n")),
                ("footer", Value::from("")),
                ("stripBanners", Value::from(false)),
                ("process", Value::from(false)),
                ("sourceMap", Value::from(false)),
                ("sourceMapStyle", Value::from("embed")),
            ]),
            less: OptionBag::from_pairs([
                ("paths", Value::from(false)),
                ("optimization", Value::from(false)),
                ("filename", Value::from(false)),
                ("strictImports", Value::from(false)),
                ("syncImport", Value::from(false)),
                ("dumpLineNumbers", Value::from(false)),
                ("relativeUrls", Value::from(false)),
                ("rootpath", Value::from(false)),
                ("ieCompat", Value::from(false)),
                ("strictMath", Value::from(true)),
                ("strictUnits", Value::from(true)),
                ("outputSourceFiles", Value::from(false)),
                ("modifyVars", Value::Null),
            ]),
            sass: OptionBag::from_pairs([
                ("precision", Value::from(5)),
                ("quiet", Value::from(false)),
                ("compass", Value::from(false)),
                ("debugInfo", Value::from(false)),
                ("lineNumbers", Value::from(false)),
                ("loadPath", Value::Null),
                ("require", Value::Null),
                ("cachePath", Value::Null),
                ("noCache", Value::from(false)),
                ("bundleExec", Value::from(false)),
            ]),
            cssmin: OptionBag::from_pairs([
                ("advanced", Value::from(false)),
                ("aggressiveMerging", Value::from(true)),
                ("benchmark", Value::from(false)),
                ("compatibility", Value::from("")),
                ("debug", Value::from(false)),
                ("inliner", Value::Null),
                ("keepBreaks", Value::from(false)),
                ("processImport", Value::from(false)),
                ("rebase", Value::from(true)),
                ("relativeTo", Value::Null),
                ("root", Value::Null),
                ("roundingPrecision", Value::from(2)),
                ("target", Value::Null),
            ]),
        }
    }

    /// Return a new layer with `top` laid over this one.
    pub fn overlay(&self, top: &OptionsLayer) -> OptionsLayer {
        OptionsLayer {
            temp_dir: top.temp_dir.clone().or_else(|| self.temp_dir.clone()),
            output: top.output.clone().or_else(|| self.output.clone()),
            banner: top.banner.clone().or_else(|| self.banner.clone()),
            banner_on: top.banner_on.clone().or_else(|| self.banner_on.clone()),
            concat: self.concat.overlay(&top.concat),
            less: self.less.overlay(&top.less),
            sass: self.sass.overlay(&top.sass),
            cssmin: self.cssmin.overlay(&top.cssmin),
        }
    }
}

/// Fully merged options for one target invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedOptions {
    temp_dir: PathBuf,
    output: OutputMode,
    banner: String,
    banner_on: OutputMode,
    minify: bool,
    keep_clean_output: bool,
    concat: OptionBag,
    less: OptionBag,
    sass: OptionBag,
    cssmin: OptionBag,
}

impl ResolvedOptions {
    /// Directory for intermediate files.
    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Output mode.
    pub fn output(&self) -> OutputMode {
        self.output
    }

    /// Banner text as configured.
    pub fn banner(&self) -> &str {
        &self.banner
    }

    /// Banner placement.
    pub fn banner_on(&self) -> OutputMode {
        self.banner_on
    }

    /// Whether a minified variant is produced.
    pub fn minify(&self) -> bool {
        self.minify
    }

    /// Whether the readable variant is kept next to the declared destination.
    pub fn keep_clean_output(&self) -> bool {
        self.keep_clean_output
    }

    /// Options for a stage.
    pub fn stage_options(&self, stage: Stage) -> &OptionBag {
        match stage {
            Stage::Less => &self.less,
            Stage::Sass => &self.sass,
            Stage::Concat => &self.concat,
            Stage::Cssmin => &self.cssmin,
        }
    }
}

/// Resolve user options into the options a target runs with.
///
/// Fails with [`BuildError::InvalidOptionValue`] when `output` or `bannerOn`
/// is not one of [`VALID_OUTPUT_MODES`].
pub fn resolve(user: &OptionsLayer) -> Result<ResolvedOptions, BuildError> {
    let merged = OptionsLayer::baseline().overlay(user);

    let output = OutputMode::parse("output", merged.output.as_deref().unwrap_or("both"))?;
    let banner_on = OutputMode::parse("bannerOn", merged.banner_on.as_deref().unwrap_or("both"))?;

    let minify = output.includes_minified();
    let keep_clean_output = output.includes_clean();
    let banner = merged.banner.clone().unwrap_or_default();

    let policy = policy_layer(&banner, banner_on, minify, keep_clean_output);
    let fixed = merged.overlay(&policy);

    Ok(ResolvedOptions {
        temp_dir: fixed.temp_dir.unwrap_or_else(std::env::temp_dir),
        output,
        banner,
        banner_on,
        minify,
        keep_clean_output,
        concat: fixed.concat,
        less: fixed.less,
        sass: fixed.sass,
        cssmin: fixed.cssmin,
    })
}

/// Overrides applied on top of user configuration.
///
/// Banners belong to concatenation and minification only; preprocessors
/// never emit banners or source maps.
fn policy_layer(
    banner: &str,
    banner_on: OutputMode,
    minify: bool,
    keep_clean_output: bool,
) -> OptionsLayer {
    let concat_banner =
        if keep_clean_output && banner_on.includes_clean() { banner } else { "" };
    let cssmin_banner = if minify && banner_on.includes_minified() { banner } else { "" };

    OptionsLayer {
        concat: OptionBag::new().with("banner", concat_banner),
        less: OptionBag::new()
            .with("sourceMap", false)
            .with("banner", "")
            .with("compress", false)
            .with("cleancss", false),
        sass: OptionBag::new()
            .with("sourcemap", "none")
            .with("banner", false)
            .with("style", "expanded")
            .with("update", false)
            .with("check", false),
        cssmin: OptionBag::new()
            .with("banner", cssmin_banner)
            .with("report", "min")
            .with("keepSpecialComments", 0),
        ..OptionsLayer::default()
    }
}
