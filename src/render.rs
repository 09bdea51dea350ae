//! Wallpaper rendering.
//!
//! Draws the title and goal list of a [`GoalConfig`] onto an RGB canvas with
//! fixed margins. Text is shaped and rasterized with `cosmic-text`; the
//! canvas is an `image::RgbImage` written out as PNG.

use cosmic_text::fontdb;
use cosmic_text::{
    Attrs, Buffer, Color as TextColor, Family, FontSystem, Metrics, Shaping, SwashCache, Weight,
    Wrap,
};
use image::{ImageError, ImageFormat, Rgb, RgbImage};
use log::{debug, info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::model::{canvas_size_ok, Color, Goal, GoalConfig, Progress, Theme};
use crate::util::format_quantity;

const TITLE_TOP: u32 = 80;
const TITLE_SIZE: f32 = 48.0;
const UNDERLINE_GAP: u32 = 10;
const UNDERLINE_WIDTH: u32 = 3;

const GOALS_TOP: u32 = 200;
const GOAL_ROW_HEIGHT: u32 = 100;
const GOAL_MAX_WIDTH: u32 = 600;
const GOAL_SIDE_MARGIN: u32 = 120;
const GOAL_NAME_SIZE: f32 = 24.0;
const MARKER_SIZE: u32 = 10;
const MARKER_GAP: u32 = 14;

const BAR_OFFSET: u32 = 40;
const BAR_HEIGHT: u32 = 8;
const BAR_LABEL_SPACE: u32 = 70;
const PERCENT_SIZE: f32 = 18.0;
const STATS_SIZE: f32 = 16.0;

const LINE_HEIGHT: f32 = 1.2;

/// Font files tried when the theme names none, as (regular, bold) pairs.
const FONT_CANDIDATES: &[(&str, &str)] = &[
    (
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    ),
    (
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    ),
    (r"C:\Windows\Fonts\arial.ttf", r"C:\Windows\Fonts\arialbd.ttf"),
];

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("canvas must be between 1 and 16384 per side, got {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },
    #[error("font unavailable: {0}")]
    FontUnavailable(String),
    #[error("cannot create output directory '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("cannot write wallpaper to '{}': {source}", path.display())]
    Write { path: PathBuf, source: ImageError },
}

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

/// Where the title and each drawn goal go on a canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub title: Rect,
    pub goals: Vec<Rect>,
    /// Goals that did not fit above the bottom edge.
    pub dropped: usize,
}

impl Layout {
    pub fn compute(width: u32, height: u32, goal_count: usize) -> Layout {
        let title = Rect::new(
            0,
            TITLE_TOP,
            width,
            GOALS_TOP.min(height).saturating_sub(TITLE_TOP),
        );

        let row_width = GOAL_MAX_WIDTH.min(width.saturating_sub(GOAL_SIDE_MARGIN));
        let row_x = (width - row_width) / 2;

        let mut goals = Vec::with_capacity(goal_count);
        for i in 0..goal_count {
            let y = GOALS_TOP + i as u32 * GOAL_ROW_HEIGHT;
            if y + GOAL_ROW_HEIGHT >= height {
                break;
            }
            goals.push(Rect::new(row_x, y, row_width, GOAL_ROW_HEIGHT));
        }

        Layout {
            title,
            dropped: goal_count - goals.len(),
            goals,
        }
    }
}

/// A rendered wallpaper and the layout it was drawn with.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub pixels: RgbImage,
    pub layout: Layout,
}

impl RenderedImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Writes the image as PNG, replacing any existing file and creating
    /// missing parent directories.
    pub fn save(&self, path: &Path) -> Result<(), RenderError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| RenderError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        self.pixels
            .save_with_format(path, ImageFormat::Png)
            .map_err(|source| RenderError::Write {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Wallpaper written to {}", path.display());
        Ok(())
    }
}

struct Fonts {
    system: FontSystem,
    cache: SwashCache,
    /// Family of the loaded font files; `None` means system sans-serif.
    family: Option<String>,
}

impl Fonts {
    fn load(theme: &Theme) -> Result<Self, RenderError> {
        let mut db = fontdb::Database::new();

        let explicit: Vec<&PathBuf> = theme.font.iter().chain(theme.bold_font.iter()).collect();
        let from_files = if !explicit.is_empty() {
            for path in explicit {
                load_font_file(&mut db, path)?;
            }
            true
        } else if let Some((regular, bold)) = FONT_CANDIDATES
            .iter()
            .find(|(regular, _)| Path::new(regular).is_file())
        {
            load_font_file(&mut db, Path::new(regular))?;
            if Path::new(bold).is_file() {
                load_font_file(&mut db, Path::new(bold))?;
            }
            true
        } else {
            debug!("No known font file found, loading system fonts");
            db.load_system_fonts();
            false
        };

        if db.is_empty() {
            return Err(RenderError::FontUnavailable(
                "no usable fonts found; set theme.font in the settings".to_string(),
            ));
        }

        let family = if from_files {
            db.faces()
                .next()
                .and_then(|face| face.families.first())
                .map(|(name, _)| name.clone())
        } else {
            None
        };
        debug!("Using font family {:?} ({} face(s))", family, db.len());

        Ok(Fonts {
            system: FontSystem::new_with_locale_and_db("en-US".to_string(), db),
            cache: SwashCache::new(),
            family,
        })
    }

    fn shape(&mut self, text: &str, size: f32, bold: bool) -> Buffer {
        let family = match &self.family {
            Some(name) => Family::Name(name.as_str()),
            None => Family::SansSerif,
        };
        let weight = if bold { Weight::BOLD } else { Weight::NORMAL };
        let attrs = Attrs::new().family(family).weight(weight);

        let mut buffer = Buffer::new(&mut self.system, Metrics::new(size, size * LINE_HEIGHT));
        buffer.set_wrap(&mut self.system, Wrap::None);
        buffer.set_size(&mut self.system, None, None);
        buffer.set_text(&mut self.system, text, attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.system, false);
        buffer
    }

    /// Paints `buffer` at `(x, y)` and returns the top and bottom rows of the
    /// inked pixels relative to `y`, or `None` when nothing was drawn.
    fn paint(
        &mut self,
        canvas: &mut RgbImage,
        buffer: &Buffer,
        x: i32,
        y: i32,
        color: Color,
    ) -> Option<(i32, i32)> {
        let [r, g, b] = color.0;
        let mut ink: Option<(i32, i32)> = None;
        buffer.draw(
            &mut self.system,
            &mut self.cache,
            TextColor::rgb(r, g, b),
            |gx, gy, w, h, glyph| {
                if glyph.a() > 0 && h > 0 {
                    let bottom = gy + h as i32;
                    ink = Some(match ink {
                        Some((top, end)) => (top.min(gy), end.max(bottom)),
                        None => (gy, bottom),
                    });
                }
                blend_rect(canvas, x + gx, y + gy, w, h, glyph)
            },
        );
        ink
    }

    /// Draws `text` with its top-left at `(x, y)` and returns its extent.
    fn draw(
        &mut self,
        canvas: &mut RgbImage,
        text: &str,
        (x, y): (u32, u32),
        size: f32,
        bold: bool,
        color: Color,
    ) -> (u32, u32) {
        let buffer = self.shape(text, size, bold);
        self.paint(canvas, &buffer, x as i32, y as i32, color);
        extent(&buffer)
    }
}

fn load_font_file(db: &mut fontdb::Database, path: &Path) -> Result<(), RenderError> {
    let before = db.len();
    db.load_font_file(path)
        .map_err(|err| RenderError::FontUnavailable(format!("{}: {}", path.display(), err)))?;

    if db.len() == before {
        return Err(RenderError::FontUnavailable(format!(
            "{} is not a readable font",
            path.display()
        )));
    }

    debug!("Loaded font {}", path.display());
    Ok(())
}

fn extent(buffer: &Buffer) -> (u32, u32) {
    let mut width: f32 = 0.0;
    let mut lines = 0;
    for run in buffer.layout_runs() {
        width = width.max(run.line_w);
        lines += 1;
    }
    let height = lines as f32 * buffer.metrics().line_height;
    (width.ceil() as u32, height.ceil() as u32)
}

fn blend_rect(canvas: &mut RgbImage, x: i32, y: i32, w: u32, h: u32, color: TextColor) {
    let alpha = u32::from(color.a());
    if alpha == 0 {
        return;
    }
    let src = [color.r(), color.g(), color.b()];

    for py in y..y + h as i32 {
        for px in x..x + w as i32 {
            if px < 0 || py < 0 {
                continue;
            }
            if let Some(pixel) = canvas.get_pixel_mut_checked(px as u32, py as u32) {
                for (dst, src) in pixel.0.iter_mut().zip(src) {
                    let mixed = u32::from(src) * alpha + u32::from(*dst) * (255 - alpha);
                    *dst = ((mixed + 127) / 255) as u8;
                }
            }
        }
    }
}

/// Checks a canvas size and returns the length of its RGB buffer.
fn canvas_bytes(width: u32, height: u32) -> Result<usize, RenderError> {
    let invalid = || RenderError::InvalidCanvas { width, height };
    if !canvas_size_ok(width, height) {
        return Err(invalid());
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(3))
        .ok_or_else(invalid)
}

fn fill_rect(canvas: &mut RgbImage, rect: Rect, color: Color) {
    let x_end = (rect.x + rect.width).min(canvas.width());
    let y_end = (rect.y + rect.height).min(canvas.height());
    for y in rect.y..y_end {
        for x in rect.x..x_end {
            canvas.put_pixel(x, y, Rgb(color.0));
        }
    }
}

pub struct Renderer {
    theme: Theme,
    fonts: Fonts,
}

impl Renderer {
    pub fn new(theme: Theme) -> Result<Self, RenderError> {
        canvas_bytes(theme.width, theme.height)?;

        let fonts = Fonts::load(&theme)?;
        Ok(Renderer { theme, fonts })
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn render(&mut self, config: &GoalConfig) -> Result<RenderedImage, RenderError> {
        let (width, height) = config
            .resolution
            .unwrap_or((self.theme.width, self.theme.height));
        let bytes = canvas_bytes(width, height)?;

        debug!("Rendering {}x{} wallpaper ({} bytes)", width, height, bytes);
        let mut canvas = RgbImage::from_pixel(width, height, Rgb(self.theme.background.0));
        let layout = Layout::compute(width, height, config.goals.len());

        self.draw_title(&mut canvas, &config.title, layout.title);

        for (goal, row) in config.goals.iter().zip(&layout.goals) {
            debug!("Drawing goal {:?} at y={}", goal.name, row.y);
            self.draw_goal(&mut canvas, goal, *row);
        }

        if layout.dropped > 0 {
            warn!(
                "{} goal(s) do not fit on a {}x{} canvas and were left out",
                layout.dropped, width, height
            );
        }

        Ok(RenderedImage {
            pixels: canvas,
            layout,
        })
    }

    pub fn render_to_path(
        &mut self,
        config: &GoalConfig,
        path: &Path,
    ) -> Result<RenderedImage, RenderError> {
        let image = self.render(config)?;
        image.save(path)?;
        Ok(image)
    }

    fn draw_title(&mut self, canvas: &mut RgbImage, title: &str, region: Rect) {
        let buffer = self.fonts.shape(title, TITLE_SIZE, true);
        let (text_width, line_height) = extent(&buffer);
        let x = region.width.saturating_sub(text_width) / 2;

        let ink = self
            .fonts
            .paint(canvas, &buffer, x as i32, region.y as i32, self.theme.text);

        // Offset by the height of the inked glyphs, not the line box.
        let ink_height = match ink {
            Some((top, bottom)) => (bottom - top) as u32,
            None => line_height,
        };
        let underline_y = region.y + ink_height + UNDERLINE_GAP;
        fill_rect(
            canvas,
            Rect::new(x, underline_y, text_width, UNDERLINE_WIDTH),
            self.theme.primary,
        );
    }

    fn draw_goal(&mut self, canvas: &mut RgbImage, goal: &Goal, row: Rect) {
        match goal.progress {
            None => {
                let marker_y = row.y + (GOAL_NAME_SIZE * LINE_HEIGHT) as u32 / 2 - MARKER_SIZE / 2;
                fill_rect(
                    canvas,
                    Rect::new(row.x, marker_y, MARKER_SIZE, MARKER_SIZE),
                    self.theme.primary,
                );
                self.fonts.draw(
                    canvas,
                    &goal.name,
                    (row.x + MARKER_SIZE + MARKER_GAP, row.y),
                    GOAL_NAME_SIZE,
                    true,
                    self.theme.text,
                );
            }
            Some(progress) => {
                self.fonts.draw(
                    canvas,
                    &goal.name,
                    (row.x, row.y),
                    GOAL_NAME_SIZE,
                    true,
                    self.theme.text,
                );
                self.draw_progress(canvas, progress, row);
            }
        }
    }

    fn draw_progress(&mut self, canvas: &mut RgbImage, progress: Progress, row: Rect) {
        let bar_y = row.y + BAR_OFFSET;
        let bar_width = row.width.saturating_sub(BAR_LABEL_SPACE);
        let filled = (f64::from(bar_width) * progress.ratio().clamp(0.0, 1.0)) as u32;

        fill_rect(
            canvas,
            Rect::new(row.x, bar_y, bar_width, BAR_HEIGHT),
            self.theme.track,
        );
        if filled > 0 {
            fill_rect(
                canvas,
                Rect::new(row.x, bar_y, filled, BAR_HEIGHT),
                self.theme.primary,
            );
        }

        self.fonts.draw(
            canvas,
            &format!("{}%", progress.percent()),
            (row.x + bar_width + 10, bar_y.saturating_sub(8)),
            PERCENT_SIZE,
            true,
            self.theme.primary,
        );

        let stats = format!(
            "{} / {}",
            format_quantity(progress.current),
            format_quantity(progress.target)
        );
        self.fonts.draw(
            canvas,
            &stats,
            (row.x, bar_y + BAR_HEIGHT + 5),
            STATS_SIZE,
            false,
            self.theme.text,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer(theme: Theme) -> Option<Renderer> {
        match Renderer::new(theme) {
            Ok(renderer) => Some(renderer),
            Err(RenderError::FontUnavailable(reason)) => {
                eprintln!("skipping, no font available: {reason}");
                None
            }
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    fn small_theme() -> Theme {
        Theme {
            width: 800,
            height: 600,
            ..Theme::default()
        }
    }

    fn has_foreground(image: &RenderedImage, region: Rect, background: Color) -> bool {
        (region.y..region.y + region.height).any(|y| {
            (region.x..region.x + region.width)
                .any(|x| image.pixels.get_pixel(x, y).0 != background.0)
        })
    }

    #[test]
    fn layout_places_goals_in_rows() {
        let layout = Layout::compute(1920, 1080, 3);
        assert_eq!(layout.title, Rect::new(0, 80, 1920, 120));
        assert_eq!(
            layout.goals,
            vec![
                Rect::new(660, 200, 600, 100),
                Rect::new(660, 300, 600, 100),
                Rect::new(660, 400, 600, 100),
            ]
        );
        assert_eq!(layout.dropped, 0);
    }

    #[test]
    fn layout_drops_goals_past_bottom_edge() {
        let layout = Layout::compute(800, 400, 5);
        assert_eq!(layout.goals.len(), 1);
        assert_eq!(layout.dropped, 4);
    }

    #[test]
    fn layout_narrow_canvas_shrinks_rows() {
        let layout = Layout::compute(500, 1080, 1);
        assert_eq!(layout.goals[0], Rect::new(60, 200, 380, 100));
    }

    #[test]
    fn canvas_bytes_rejects_out_of_range_sizes() {
        assert_eq!(canvas_bytes(16384, 16384).unwrap(), 16384 * 16384 * 3);
        assert_eq!(canvas_bytes(1, 1).unwrap(), 3);
        for (width, height) in [(0, 1), (1, 0), (16385, 100), (4_000_000_000, 4_000_000_000)] {
            assert!(matches!(
                canvas_bytes(width, height),
                Err(RenderError::InvalidCanvas { .. })
            ));
        }
    }

    #[test]
    fn fill_rect_clips_to_canvas() {
        let mut canvas = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));
        fill_rect(&mut canvas, Rect::new(2, 2, 10, 10), Color::rgb(9, 9, 9));
        assert_eq!(canvas.get_pixel(3, 3).0, [9, 9, 9]);
        assert_eq!(canvas.get_pixel(1, 1).0, [0, 0, 0]);
    }

    #[test]
    fn blend_rect_mixes_by_coverage() {
        let mut canvas = RgbImage::from_pixel(2, 2, Rgb([0, 0, 0]));
        blend_rect(&mut canvas, -1, 0, 2, 1, TextColor::rgba(255, 255, 255, 255));
        blend_rect(&mut canvas, 1, 1, 5, 5, TextColor::rgba(200, 100, 0, 0));
        assert_eq!(canvas.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(canvas.get_pixel(1, 0).0, [0, 0, 0]);
        assert_eq!(canvas.get_pixel(1, 1).0, [0, 0, 0]);

        let mut canvas = RgbImage::from_pixel(1, 1, Rgb([0, 0, 0]));
        blend_rect(&mut canvas, 0, 0, 1, 1, TextColor::rgba(255, 255, 255, 128));
        assert_eq!(canvas.get_pixel(0, 0).0, [128, 128, 128]);
    }

    #[test]
    fn zero_canvas_is_rejected_before_loading_fonts() {
        let theme = Theme {
            width: 0,
            ..Theme::default()
        };
        assert!(matches!(
            Renderer::new(theme),
            Err(RenderError::InvalidCanvas {
                width: 0,
                height: 1080
            })
        ));
    }

    #[test]
    fn oversized_canvas_is_rejected_before_loading_fonts() {
        let theme = Theme {
            width: 20000,
            height: 100,
            ..Theme::default()
        };
        assert!(matches!(
            Renderer::new(theme),
            Err(RenderError::InvalidCanvas {
                width: 20000,
                height: 100
            })
        ));
    }

    #[test]
    fn oversized_resolution_is_rejected_by_render() {
        let Some(mut renderer) = renderer(small_theme()) else {
            return;
        };
        let mut config = GoalConfig::new("T", vec![]).unwrap();
        config.resolution = Some((100, 20000));

        assert!(matches!(
            renderer.render(&config),
            Err(RenderError::InvalidCanvas { .. })
        ));
    }

    #[test]
    fn missing_font_file_is_reported() {
        let theme = Theme {
            font: Some(PathBuf::from("/definitely/not/a/font.ttf")),
            ..Theme::default()
        };
        assert!(matches!(
            Renderer::new(theme),
            Err(RenderError::FontUnavailable(_))
        ));
    }

    #[test]
    fn renders_title_and_goal_regions() {
        let Some(mut renderer) = renderer(small_theme()) else {
            return;
        };
        let config = GoalConfig::new("T", vec![Goal::plain("A"), Goal::plain("B")]).unwrap();

        let image = renderer.render(&config).unwrap();
        let background = renderer.theme().background;

        assert_eq!((image.width(), image.height()), (800, 600));
        assert_eq!(image.layout.goals.len(), 2);
        assert!(has_foreground(&image, image.layout.title, background));
        for row in &image.layout.goals {
            assert!(has_foreground(&image, *row, background));
        }
        assert_ne!(image.layout.goals[0], image.layout.goals[1]);
    }

    #[test]
    fn empty_goals_leave_goal_area_blank() {
        let Some(mut renderer) = renderer(small_theme()) else {
            return;
        };
        let config = GoalConfig::new("Only the title", vec![]).unwrap();

        let image = renderer.render(&config).unwrap();
        let background = renderer.theme().background;

        assert!(image.layout.goals.is_empty());
        assert!(has_foreground(&image, image.layout.title, background));
        let below_title = Rect::new(0, GOALS_TOP, 800, 600 - GOALS_TOP);
        assert!(!has_foreground(&image, below_title, background));
    }

    #[test]
    fn resolution_overrides_theme_size() {
        let Some(mut renderer) = renderer(small_theme()) else {
            return;
        };
        let mut config = GoalConfig::new("T", vec![]).unwrap();
        config.resolution = Some((640, 480));

        let image = renderer.render(&config).unwrap();
        assert_eq!((image.width(), image.height()), (640, 480));
    }

    #[test]
    fn tracked_goal_fills_progress_bar() {
        let Some(mut renderer) = renderer(small_theme()) else {
            return;
        };
        let config = GoalConfig::new("T", vec![Goal::tracked("Run", 50.0, 100.0)]).unwrap();

        let image = renderer.render(&config).unwrap();
        let row = image.layout.goals[0];
        let bar_y = row.y + BAR_OFFSET + BAR_HEIGHT / 2;
        let bar_width = row.width - BAR_LABEL_SPACE;
        let theme = renderer.theme();

        assert_eq!(image.pixels.get_pixel(row.x + 1, bar_y).0, theme.primary.0);
        assert_eq!(
            image.pixels.get_pixel(row.x + bar_width - 2, bar_y).0,
            theme.track.0
        );
    }

    #[test]
    fn progress_past_target_stops_at_bar_end() {
        let Some(mut renderer) = renderer(small_theme()) else {
            return;
        };
        let config = GoalConfig::new("T", vec![Goal::tracked("x", 300.0, 100.0)]).unwrap();

        let image = renderer.render(&config).unwrap();
        let row = image.layout.goals[0];
        let bar_y = row.y + BAR_OFFSET + BAR_HEIGHT / 2;
        let bar_width = row.width - BAR_LABEL_SPACE;
        let theme = renderer.theme();

        assert_eq!(
            image.pixels.get_pixel(row.x + bar_width - 1, bar_y).0,
            theme.primary.0
        );
        assert_eq!(
            image.pixels.get_pixel(row.x + bar_width + 1, bar_y).0,
            theme.background.0
        );
    }

    #[test]
    fn underline_follows_title_ink() {
        let Some(mut renderer) = renderer(small_theme()) else {
            return;
        };
        let config = GoalConfig::new("GOALS", vec![]).unwrap();

        let image = renderer.render(&config).unwrap();
        let primary = renderer.theme().primary;
        let underline_y = (TITLE_TOP..GOALS_TOP)
            .find(|&y| image.pixels.get_pixel(400, y).0 == primary.0)
            .expect("no underline below the title");

        let line_box = (TITLE_SIZE * LINE_HEIGHT).ceil() as u32;
        assert!(underline_y > TITLE_TOP + UNDERLINE_GAP);
        assert!(underline_y < TITLE_TOP + line_box + UNDERLINE_GAP);
    }

    #[test]
    fn rendering_is_deterministic() {
        let Some(mut renderer) = renderer(small_theme()) else {
            return;
        };
        let config = GoalConfig::new(
            "2026 GOALS",
            vec![Goal::plain("Ship it"), Goal::tracked("Savings", 1500.0, 10000.0)],
        )
        .unwrap();

        let first = renderer.render(&config).unwrap();
        let second = renderer.render(&config).unwrap();
        assert_eq!(first.pixels, second.pixels);
    }
}
