//! Font discovery and selection.
//!
//! Providers enumerate candidate font files; the [`FontResolver`] chains them, loads each
//! candidate at most once per resolver lifetime and picks the first face whose character map
//! covers the requested text.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, OnceLock};

use skrifa::MetadataProvider;

use crate::foundation::error::{ThumbkitError, ThumbkitResult};
use crate::scene::model::FontWeight;

/// Environment variable holding extra font directories (OS path-list syntax).
pub const FONT_DIR_ENV: &str = "THUMBKIT_FONT_DIR";

/// One font file (and face index, for collections) that may be used for text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontCandidate {
    /// Path to a `.ttf`, `.otf` or `.ttc` file.
    pub path: PathBuf,
    /// Face index inside a collection; 0 for single-face files.
    pub index: u32,
    /// Whether the face is a bold cut.
    pub bold: bool,
}

impl FontCandidate {
    /// Candidate for face 0 of `path`, flagged bold when the file name suggests it.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let bold = looks_bold(&path);
        Self {
            path,
            index: 0,
            bold,
        }
    }
}

fn looks_bold(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    name.contains("bold") || name.contains("bd.") || name.contains("w6") || name.contains("heavy")
}

/// A source of candidate font files.
pub trait FontProvider: Send + Sync + std::fmt::Debug {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Ordered candidate list; earlier candidates are preferred.
    fn candidates(&self) -> Vec<FontCandidate>;
}

/// Operating system family used to pick a fixed font table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    /// Microsoft Windows.
    Windows,
    /// Apple macOS.
    MacOs,
    /// Linux and other Unix-likes.
    Linux,
}

impl Platform {
    /// Platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Linux
        }
    }
}

const WINDOWS_FONTS: &[&str] = &[
    "C:/Windows/Fonts/arialbd.ttf",
    "C:/Windows/Fonts/arial.ttf",
    "C:/Windows/Fonts/YuGothB.ttc",
    "C:/Windows/Fonts/YuGothM.ttc",
    "C:/Windows/Fonts/meiryob.ttc",
    "C:/Windows/Fonts/meiryo.ttc",
    "C:/Windows/Fonts/msgothic.ttc",
    "C:/Windows/Fonts/malgunbd.ttf",
    "C:/Windows/Fonts/malgun.ttf",
    "C:/Windows/Fonts/msyhbd.ttc",
    "C:/Windows/Fonts/msyh.ttc",
];

const MACOS_FONTS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/ヒラギノ角ゴシック W6.ttc",
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "/System/Library/Fonts/PingFang.ttc",
];

const LINUX_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Bold.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Bold.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Bold.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
];

/// Fixed per-platform table of well-known font paths.
#[derive(Clone, Debug)]
pub struct PlatformFonts {
    platform: Platform,
}

impl PlatformFonts {
    /// Table for a specific platform.
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    /// Table for the platform this binary was compiled for.
    pub fn current() -> Self {
        Self::new(Platform::current())
    }

    fn table(&self) -> &'static [&'static str] {
        match self.platform {
            Platform::Windows => WINDOWS_FONTS,
            Platform::MacOs => MACOS_FONTS,
            Platform::Linux => LINUX_FONTS,
        }
    }
}

impl FontProvider for PlatformFonts {
    fn name(&self) -> &'static str {
        match self.platform {
            Platform::Windows => "platform:windows",
            Platform::MacOs => "platform:macos",
            Platform::Linux => "platform:linux",
        }
    }

    fn candidates(&self) -> Vec<FontCandidate> {
        self.table()
            .iter()
            .map(Path::new)
            .filter(|p| p.is_file())
            .map(FontCandidate::from_path)
            .collect()
    }
}

/// Fonts found by scanning directories (non-recursive).
#[derive(Clone, Debug, Default)]
pub struct DirectoryFonts {
    dirs: Vec<PathBuf>,
}

impl DirectoryFonts {
    /// Scan the given directories in order.
    pub fn new(dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            dirs: dirs.into_iter().collect(),
        }
    }

    /// Directories listed in [`FONT_DIR_ENV`], if set.
    pub fn from_env() -> Self {
        let dirs = std::env::var_os(FONT_DIR_ENV)
            .map(|v| std::env::split_paths(&v).collect())
            .unwrap_or_default();
        Self { dirs }
    }

    /// Whether any directory is configured.
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

impl FontProvider for DirectoryFonts {
    fn name(&self) -> &'static str {
        "directories"
    }

    fn candidates(&self) -> Vec<FontCandidate> {
        let mut out = Vec::new();
        for dir in &self.dirs {
            let Ok(rd) = std::fs::read_dir(dir) else {
                tracing::debug!(dir = %dir.display(), "font directory not readable");
                continue;
            };
            let mut files: Vec<PathBuf> = rd
                .flatten()
                .map(|e| e.path())
                .filter(|p| p.is_file() && is_font_file(p))
                .collect();
            // read_dir order is filesystem dependent.
            files.sort();
            out.extend(files.into_iter().map(FontCandidate::from_path));
        }
        out
    }
}

fn is_font_file(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();
    ext == "ttf" || ext == "otf" || ext == "ttc"
}

/// Faces known to the system font database (`fontconfig` directories, `%WINDIR%\Fonts`, ...).
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemFontDb;

impl FontProvider for SystemFontDb {
    fn name(&self) -> &'static str {
        "system-fontdb"
    }

    fn candidates(&self) -> Vec<FontCandidate> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();

        let mut out: Vec<FontCandidate> = db
            .faces()
            // Text layout registers whole files and shapes with their first face.
            .filter(|face| face.index == 0 && face.style == usvg::fontdb::Style::Normal)
            .filter_map(|face| {
                let path = match &face.source {
                    usvg::fontdb::Source::File(p) => p.clone(),
                    usvg::fontdb::Source::SharedFile(p, _) => p.clone(),
                    usvg::fontdb::Source::Binary(_) => return None,
                };
                Some(FontCandidate {
                    path,
                    index: face.index,
                    bold: face.weight.0 >= usvg::fontdb::Weight::SEMIBOLD.0,
                })
            })
            .collect();
        // Database order follows directory traversal; sort for run-to-run stability.
        out.sort_by(|a, b| a.path.cmp(&b.path).then(a.index.cmp(&b.index)));
        out
    }
}

/// A loaded outline face.
#[derive(Clone, Debug)]
pub struct LoadedFont {
    /// Candidate the bytes were loaded from.
    pub candidate: FontCandidate,
    /// Raw file bytes (whole collection for `.ttc`), shared with every shaping context.
    pub bytes: parley::fontique::Blob<u8>,
}

impl LoadedFont {
    fn load(candidate: &FontCandidate) -> ThumbkitResult<Self> {
        let bytes = std::fs::read(&candidate.path).map_err(|e| {
            ThumbkitError::font(format!("read '{}': {e}", candidate.path.display()))
        })?;
        skrifa::FontRef::from_index(&bytes, candidate.index).map_err(|e| {
            ThumbkitError::font(format!(
                "parse '{}' face {}: {e}",
                candidate.path.display(),
                candidate.index
            ))
        })?;
        Ok(Self {
            candidate: candidate.clone(),
            bytes: parley::fontique::Blob::from(bytes),
        })
    }

    /// Whether every non-whitespace character of `text` maps to a glyph in this face.
    pub fn covers(&self, text: &str) -> bool {
        let Ok(font) = skrifa::FontRef::from_index(self.bytes.data(), self.candidate.index) else {
            return false;
        };
        let charmap = font.charmap();
        text.chars()
            .filter(|c| !c.is_whitespace())
            .all(|c| charmap.map(c).is_some())
    }
}

/// Outcome of font selection.
#[derive(Clone, Debug)]
pub enum ResolvedFont {
    /// An outline face covering the whole text.
    Outline(Arc<LoadedFont>),
    /// The built-in bitmap font.
    Builtin,
}

#[derive(Debug)]
struct CandidateSlot {
    candidate: FontCandidate,
    loaded: OnceLock<Option<Arc<LoadedFont>>>,
}

impl CandidateSlot {
    fn get(&self) -> Option<&Arc<LoadedFont>> {
        self.loaded
            .get_or_init(|| match LoadedFont::load(&self.candidate) {
                Ok(f) => Some(Arc::new(f)),
                Err(e) => {
                    tracing::debug!(error = %e, "font candidate rejected");
                    None
                }
            })
            .as_ref()
    }
}

/// Chains [`FontProvider`]s and caches what they find.
///
/// The candidate table is built on first use and never rescanned; each candidate file is read
/// at most once.
#[derive(Debug)]
pub struct FontResolver {
    providers: Vec<Box<dyn FontProvider>>,
    slots: OnceLock<Vec<CandidateSlot>>,
}

static SHARED: LazyLock<FontResolver> = LazyLock::new(FontResolver::from_environment);

impl FontResolver {
    /// Resolver over an explicit provider chain.
    pub fn new(providers: Vec<Box<dyn FontProvider>>) -> Self {
        Self {
            providers,
            slots: OnceLock::new(),
        }
    }

    /// Resolver that never finds an outline face; text always uses the built-in font.
    pub fn builtin_only() -> Self {
        Self::new(Vec::new())
    }

    /// Default chain: [`FONT_DIR_ENV`] directories, the platform table, then the system database.
    pub fn from_environment() -> Self {
        Self::with_options(Vec::new(), true)
    }

    /// Default chain with extra leading directories and an optional system database.
    pub fn with_options(extra_dirs: Vec<PathBuf>, system_fonts: bool) -> Self {
        let mut providers: Vec<Box<dyn FontProvider>> = Vec::new();
        if !extra_dirs.is_empty() {
            providers.push(Box::new(DirectoryFonts::new(extra_dirs)));
        }
        let env_dirs = DirectoryFonts::from_env();
        if !env_dirs.is_empty() {
            providers.push(Box::new(env_dirs));
        }
        providers.push(Box::new(PlatformFonts::current()));
        if system_fonts {
            providers.push(Box::new(SystemFontDb));
        }
        Self::new(providers)
    }

    /// Process-wide resolver, built lazily from the environment.
    pub fn shared() -> &'static FontResolver {
        &SHARED
    }

    fn slots(&self) -> &[CandidateSlot] {
        self.slots.get_or_init(|| {
            let mut seen = HashSet::new();
            let mut slots = Vec::new();
            for provider in &self.providers {
                let candidates = provider.candidates();
                tracing::debug!(
                    provider = provider.name(),
                    count = candidates.len(),
                    "font candidates"
                );
                for candidate in candidates {
                    if seen.insert((candidate.path.clone(), candidate.index)) {
                        slots.push(CandidateSlot {
                            candidate,
                            loaded: OnceLock::new(),
                        });
                    }
                }
            }
            slots
        })
    }

    /// Number of distinct candidates across all providers.
    pub fn candidate_count(&self) -> usize {
        self.slots().len()
    }

    /// Pick a face for `text` at `weight`.
    ///
    /// Bold requests try bold-flagged candidates first, then everything else in provider order.
    pub fn resolve(&self, weight: FontWeight, text: &str) -> ResolvedFont {
        let slots = self.slots();
        let want_bold = weight == FontWeight::Bold;
        let preferred = slots.iter().filter(|s| s.candidate.bold == want_bold);
        let rest = slots.iter().filter(|s| s.candidate.bold != want_bold);
        for slot in preferred.chain(rest) {
            if let Some(font) = slot.get()
                && font.covers(text)
            {
                return ResolvedFont::Outline(font.clone());
            }
        }
        tracing::debug!(
            candidates = slots.len(),
            "no outline face covers text; using built-in font"
        );
        ResolvedFont::Builtin
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
