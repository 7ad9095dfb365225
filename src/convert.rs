//! Conversion pipeline: presentation files and directories to HTML pages.

use crate::detect::has_pptx_extension;
use crate::error::{Error, Result};
use crate::layout::{LayoutCollector, LayoutElements};
use crate::model::Presentation;
use crate::pptx::read_presentation;
use crate::render::{
    index_file_name, render_index, render_main, render_slide, slide_file_name, SlideContext,
    MAIN_FILE_NAME,
};
use crate::style::theme::DEFAULT_BACKGROUND;
use crate::style::{background_style, theme_fonts, BackgroundStyle, PlaceholderDefaultsCache};
use crate::units::emu_to_px;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Sub-directory holding slide pages.
pub const SLIDES_DIR: &str = "slides";
/// Sub-directory holding extracted media.
pub const MEDIA_DIR: &str = "media";
/// Media URL prefix as seen from a slide page.
const MEDIA_URL: &str = "../media/";

/// Converter configuration.
#[derive(Debug, Clone, Default)]
pub struct ConverterOptions {
    /// Directory converted by [`Converter::convert_directory`] when none is given
    pub source_dir: Option<PathBuf>,
    /// Output directory used when a call does not name one
    pub output_dir: Option<PathBuf>,
    /// Write HTML without line breaks or indentation
    pub compact: bool,
}

impl ConverterOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default source directory.
    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = Some(dir.into());
        self
    }

    /// Set the default output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Enable compact HTML output.
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }
}

/// Manifest of one converted presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    pub source_path: PathBuf,
    pub output_dir: PathBuf,
    pub slide_count: usize,
    /// Slide pages in order, then the index page
    pub generated_files: Vec<PathBuf>,
    /// Every media file the pages reference
    pub media_files: Vec<PathBuf>,
    pub index_file: PathBuf,
}

impl ConversionResult {
    /// Manifest as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Outcome of one file in directory mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FileOutcome {
    Converted(ConversionResult),
    Failed { source_path: PathBuf, error: String },
}

impl FileOutcome {
    pub fn source_path(&self) -> &Path {
        match self {
            Self::Converted(result) => &result.source_path,
            Self::Failed { source_path, .. } => source_path,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Converted(_))
    }
}

/// Manifest of a directory conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryResult {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub converted_files: usize,
    pub failed_files: usize,
    pub results: Vec<FileOutcome>,
    /// Landing page, written when more than one file was attempted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_file: Option<PathBuf>,
}

impl DirectoryResult {
    /// Manifest as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Converts presentations into static HTML slide pages.
///
/// # Example
///
/// ```no_run
/// use unslide::{Converter, ConverterOptions};
///
/// let converter = Converter::new(ConverterOptions::new().with_compact(true));
/// let result = converter.convert_file("deck.pptx", None)?;
/// println!("{} slides -> {}", result.slide_count, result.index_file.display());
/// # Ok::<(), unslide::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConverterOptions,
}

impl Converter {
    pub fn new(options: ConverterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    /// Convert one presentation.
    ///
    /// The output directory is, in order: `output_dir`, the configured
    /// default, or `{stem}_html` next to the input file.
    pub fn convert_file(
        &self,
        path: impl AsRef<Path>,
        output_dir: Option<&Path>,
    ) -> Result<ConversionResult> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "presentation".to_string());
        let out_dir = output_dir
            .map(Path::to_path_buf)
            .or_else(|| self.options.output_dir.clone())
            .unwrap_or_else(|| path.with_file_name(format!("{}_html", stem)));

        let pres = read_presentation(path)?;
        let result = self.write_presentation(&pres, path, &stem, &out_dir)?;
        log::info!(
            "converted {} ({} slides) into {}",
            path.display(),
            result.slide_count,
            out_dir.display()
        );
        Ok(result)
    }

    fn write_presentation(
        &self,
        pres: &Presentation,
        source: &Path,
        stem: &str,
        out_dir: &Path,
    ) -> Result<ConversionResult> {
        let compact = self.options.compact;
        let fonts = theme_fonts(pres);
        let slide_width_px = emu_to_px(pres.slide_width);
        let slide_height_px = emu_to_px(pres.slide_height);
        let slide_count = pres.slide_count();

        let slides_dir = out_dir.join(SLIDES_DIR);
        let media_dir = out_dir.join(MEDIA_DIR);
        fs::create_dir_all(&slides_dir)?;
        fs::create_dir_all(&media_dir)?;

        let index_file = out_dir.join(index_file_name(stem));
        fs::write(&index_file, render_index(slide_count, compact))?;

        let collector = LayoutCollector::new(&media_dir, slide_width_px, slide_height_px)
            .with_url_prefix(MEDIA_URL);
        let mut defaults_cache = PlaceholderDefaultsCache::new();
        let mut generated_files = Vec::with_capacity(slide_count + 1);
        let mut media_files: Vec<PathBuf> = Vec::new();

        for slide in &pres.slides {
            let i = slide.number;
            let background = match background_style(slide, pres) {
                BackgroundStyle::Css(css) => css,
                BackgroundStyle::Picture(blob) => {
                    let name = format!("slide{}_bg.{}", i, blob.ext);
                    let path = media_dir.join(&name);
                    match fs::write(&path, &blob.data) {
                        Ok(()) => {
                            push_unique(&mut media_files, path);
                            format!(
                                "background-image: url('{}{}'); background-size: cover; \
                                 background-repeat: no-repeat; background-position: center;",
                                MEDIA_URL, name
                            )
                        }
                        Err(e) => {
                            log::warn!("failed to write {}: {}", path.display(), e);
                            DEFAULT_BACKGROUND.to_string()
                        }
                    }
                }
            };

            let elements = match slide.layout {
                Some(index) => collector.collect(index, pres, background),
                None => LayoutElements {
                    background,
                    ..Default::default()
                },
            };
            for file in &elements.files {
                push_unique(&mut media_files, file.clone());
            }

            let defaults = match slide.layout {
                Some(index) => Some(defaults_cache.get(index, pres, &fonts)),
                None => None,
            };
            let ctx = SlideContext {
                pres,
                fonts: &fonts,
                slide_count,
                slide_width_px,
                slide_height_px,
                background: &elements.background,
                layout: &elements,
                defaults,
                media_url: MEDIA_URL,
                compact,
            };
            let page = render_slide(&ctx, slide);

            for write in &page.writes {
                let path = media_dir.join(&write.file_name);
                match fs::write(&path, write.data) {
                    Ok(()) => push_unique(&mut media_files, path),
                    Err(e) => log::warn!("failed to write {}: {}", path.display(), e),
                }
            }

            let page_path = slides_dir.join(slide_file_name(i));
            fs::write(&page_path, page.html)?;
            generated_files.push(page_path);
        }
        generated_files.push(index_file.clone());

        Ok(ConversionResult {
            source_path: source.to_path_buf(),
            output_dir: out_dir.to_path_buf(),
            slide_count,
            generated_files,
            media_files,
            index_file,
        })
    }

    /// Convert every `.pptx` file of a directory, in file name order.
    ///
    /// Failures of individual files are recorded and do not stop the run.
    /// When more than one file was attempted, `main.html` links every deck
    /// that converted.
    pub fn convert_directory(
        &self,
        source_dir: Option<&Path>,
        output_dir: Option<&Path>,
    ) -> Result<DirectoryResult> {
        let source_dir = source_dir
            .map(Path::to_path_buf)
            .or_else(|| self.options.source_dir.clone())
            .ok_or_else(|| {
                Error::InvalidArgument("Source directory must be specified".to_string())
            })?;
        if !source_dir.is_dir() {
            return Err(Error::FileNotFound(source_dir));
        }
        let out_dir = output_dir
            .map(Path::to_path_buf)
            .or_else(|| self.options.output_dir.clone())
            .unwrap_or_else(|| source_dir.join("html_output"));
        fs::create_dir_all(&out_dir)?;

        let mut files: Vec<PathBuf> = fs::read_dir(&source_dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && has_pptx_extension(p))
            .collect();
        files.sort();

        let mut results = Vec::with_capacity(files.len());
        for file in files {
            match self.convert_file(&file, Some(out_dir.as_path())) {
                Ok(result) => results.push(FileOutcome::Converted(result)),
                Err(e) => {
                    log::warn!("failed to convert {}: {}", file.display(), e);
                    results.push(FileOutcome::Failed {
                        source_path: file,
                        error: e.to_string(),
                    });
                }
            }
        }

        let converted_files = results.iter().filter(|r| r.is_success()).count();
        let failed_files = results.len() - converted_files;

        let main_file = if results.len() > 1 {
            let decks: Vec<String> = results
                .iter()
                .filter(|r| r.is_success())
                .filter_map(|r| r.source_path().file_stem())
                .map(|s| s.to_string_lossy().into_owned())
                .collect();
            let path = out_dir.join(MAIN_FILE_NAME);
            fs::write(&path, render_main(&decks, self.options.compact))?;
            log::info!("generated main index {}", path.display());
            Some(path)
        } else {
            None
        };

        Ok(DirectoryResult {
            source_dir,
            output_dir: out_dir,
            converted_files,
            failed_files,
            results,
            main_file,
        })
    }
}

fn push_unique(files: &mut Vec<PathBuf>, path: PathBuf) {
    if !files.contains(&path) {
        files.push(path);
    }
}

/// Convert one presentation with default options.
///
/// # Example
///
/// ```no_run
/// let result = unslide::convert_pptx_to_html("deck.pptx", None, false)?;
/// assert_eq!(result.generated_files.len(), result.slide_count + 1);
/// # Ok::<(), unslide::Error>(())
/// ```
pub fn convert_pptx_to_html(
    path: impl AsRef<Path>,
    output_dir: Option<&Path>,
    compact: bool,
) -> Result<ConversionResult> {
    Converter::new(ConverterOptions::new().with_compact(compact)).convert_file(path, output_dir)
}

/// Convert every presentation in a directory with default options.
pub fn convert_pptx_directory(
    source_dir: impl AsRef<Path>,
    output_dir: Option<&Path>,
    compact: bool,
) -> Result<DirectoryResult> {
    Converter::new(ConverterOptions::new().with_compact(compact))
        .convert_directory(Some(source_dir.as_ref()), output_dir)
}
