//! PNG image export.
//!
//! The raster path follows an acquire / render / guaranteed-release
//! contract: the backend locates a render target for the matrix, the
//! surface is held by a guard that releases it on every exit path
//! (success, empty raster, or render error), and a zero-dimension result
//! is rejected instead of producing a corrupt artifact. Backends decide
//! for themselves when rendering has settled via
//! [`RenderSurface::wait_until_ready`].

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::{LogframeError, Result};
use crate::model::{LevelType, PersistedSnapshot};

use super::{artifact_file_name, Artifact};

/// Identifier of the matrix render target.
pub const MATRIX_TARGET: &str = "logframe-matrix";

/// Pixel-density multiplier applied when rasterizing.
const EXPORT_SCALE: u32 = 2;

/// An acquired render target for one rasterization.
pub trait RenderSurface {
    /// Block until asynchronous style application has settled and the
    /// surface is ready to rasterize.
    fn wait_until_ready(&mut self);

    /// Rasterize the surface at the given pixel-density multiplier.
    fn render(&mut self, scale: u32) -> Result<RgbaImage>;

    /// Release the surface. The export pipeline guarantees exactly one
    /// call on every path.
    fn release(&mut self);
}

/// Locates render targets by identifier.
pub trait RenderBackend {
    /// Acquire the named target, or `None` when it is not present.
    fn acquire(&self, target: &str) -> Option<Box<dyn RenderSurface>>;
}

/// Scoped holder that releases the surface when it goes out of scope.
struct SurfaceGuard {
    surface: Box<dyn RenderSurface>,
}

impl SurfaceGuard {
    fn new(surface: Box<dyn RenderSurface>) -> Self {
        Self { surface }
    }
}

impl Drop for SurfaceGuard {
    fn drop(&mut self) {
        self.surface.release();
    }
}

/// Render the snapshot as a `.png` artifact through the given backend.
///
/// Guards: an empty level list or a missing render target aborts before
/// any rasterization; a zero-dimension raster is rejected after it. The
/// acquired surface is released in all cases.
pub fn export_image(
    snapshot: &PersistedSnapshot,
    backend: &dyn RenderBackend,
) -> Result<Artifact> {
    if snapshot.is_empty() {
        return Err(LogframeError::NothingToExport);
    }

    let surface = backend
        .acquire(MATRIX_TARGET)
        .ok_or_else(|| LogframeError::RenderTargetNotFound {
            target: MATRIX_TARGET.to_string(),
        })?;
    let mut guard = SurfaceGuard::new(surface);

    guard.surface.wait_until_ready();
    let raster = guard.surface.render(EXPORT_SCALE)?;

    if raster.width() == 0 || raster.height() == 0 {
        return Err(LogframeError::EmptyRaster {
            target: MATRIX_TARGET.to_string(),
        });
    }

    let mut bytes = Vec::new();
    raster.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;

    Ok(Artifact {
        file_name: artifact_file_name("logframe-matrix", &snapshot.project_info.title, "png"),
        media_type: "image/png",
        bytes,
    })
}

/// Row background per level category, the raster analog of the document
/// palette.
fn row_color(level_type: LevelType) -> Rgba<u8> {
    match level_type {
        LevelType::Goal => Rgba([212, 237, 218, 255]),
        LevelType::Outcome => Rgba([204, 229, 255, 255]),
        LevelType::Output => Rgba([255, 243, 205, 255]),
        LevelType::Activity => Rgba([226, 217, 243, 255]),
    }
}

const HEADER_COLOR: Rgba<u8> = Rgba([240, 240, 240, 255]);
const GRID_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);
const PAGE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Base column widths: level tag plus four text columns.
const COLUMN_WIDTHS: [u32; 5] = [120, 180, 180, 180, 180];
const ROW_HEIGHT: u32 = 56;
const MARGIN: u32 = 16;

/// Built-in headless backend that draws the matrix as a color-banded
/// table grid, so the CLI can produce a real PNG without a browser.
pub struct MatrixRenderer {
    snapshot: PersistedSnapshot,
}

impl MatrixRenderer {
    pub fn new(snapshot: &PersistedSnapshot) -> Self {
        Self {
            snapshot: snapshot.clone(),
        }
    }
}

impl RenderBackend for MatrixRenderer {
    fn acquire(&self, target: &str) -> Option<Box<dyn RenderSurface>> {
        if target != MATRIX_TARGET {
            return None;
        }
        Some(Box::new(MatrixSurface {
            snapshot: self.snapshot.clone(),
        }))
    }
}

struct MatrixSurface {
    snapshot: PersistedSnapshot,
}

impl RenderSurface for MatrixSurface {
    fn wait_until_ready(&mut self) {
        // Synchronous renderer; nothing to settle.
    }

    fn render(&mut self, scale: u32) -> Result<RgbaImage> {
        let table_width: u32 = COLUMN_WIDTHS.iter().sum();
        let rows = 1 + self.snapshot.logframe.len() as u32;

        let width = (table_width + 2 * MARGIN) * scale;
        let height = (rows * ROW_HEIGHT + 2 * MARGIN) * scale;
        let mut img = RgbaImage::from_pixel(width, height, PAGE_COLOR);

        // Header band, then one band per level in insertion order.
        fill_rect(
            &mut img,
            MARGIN * scale,
            MARGIN * scale,
            table_width * scale,
            ROW_HEIGHT * scale,
            HEADER_COLOR,
        );
        for (i, level) in self.snapshot.logframe.iter().enumerate() {
            let y = (MARGIN + (1 + i as u32) * ROW_HEIGHT) * scale;
            fill_rect(
                &mut img,
                MARGIN * scale,
                y,
                table_width * scale,
                ROW_HEIGHT * scale,
                row_color(level.level_type),
            );
        }

        // Grid lines.
        for row in 0..=rows {
            let y = (MARGIN + row * ROW_HEIGHT) * scale;
            fill_rect(
                &mut img,
                MARGIN * scale,
                y,
                table_width * scale,
                scale,
                GRID_COLOR,
            );
        }
        let mut x = MARGIN;
        for col_width in COLUMN_WIDTHS.iter().chain(std::iter::once(&0)) {
            fill_rect(
                &mut img,
                x * scale,
                MARGIN * scale,
                scale,
                rows * ROW_HEIGHT * scale,
                GRID_COLOR,
            );
            x += col_width;
        }

        Ok(img)
    }

    fn release(&mut self) {
        // Nothing held beyond the cloned snapshot.
    }
}

fn fill_rect(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    for dy in 0..h {
        for dx in 0..w {
            let (px, py) = (x + dx, y + dy);
            if px < img.width() && py < img.height() {
                img.put_pixel(px, py, color);
            }
        }
    }
}
