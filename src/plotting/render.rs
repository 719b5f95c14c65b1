//! Raster export of a plot with `plotters`.
//!
//! The chart is drawn into a temporary file next to the target and renamed over it once the
//! backend has finished, so a failed export never leaves a partial image behind.
use crate::error::PlotError;
use crate::plotting::series::{Decorations, OverlayManager};
use crate::plotting::view_transform::ViewTransform;
use log::{debug, info};
use plotters::prelude::*;
use std::path::Path;
use tempfile::Builder;

pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Everything needed to draw one plot surface.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub view: &'a ViewTransform,
    pub overlay: &'a OverlayManager,
    pub decorations: &'a Decorations,
}

fn export_error<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Export(e.to_string())
}

/// Lower-cased extension of `path` if the bitmap backend can encode it.
pub fn image_extension(path: &Path) -> Result<String, PlotError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| PlotError::Export(format!("{} has no file extension", path.display())))?;
    if SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(extension)
    } else {
        Err(PlotError::Export(format!(
            "unsupported image format '.{}', use one of: {}",
            extension,
            SUPPORTED_EXTENSIONS.join(", ")
        )))
    }
}

fn draw_chart(scene: &Scene, path: &Path, size: (u32, u32)) -> Result<(), PlotError> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(export_error)?;

    let (x, y) = (scene.view.xlim(), scene.view.ylim());
    let mut builder = ChartBuilder::on(&root);
    builder.margin(10).x_label_area_size(40).y_label_area_size(50);
    if let Some(title) = &scene.decorations.title {
        builder.caption(title, ("sans-serif", 30));
    }
    let mut chart = builder
        .build_cartesian_2d(x.lo()..x.hi(), y.lo()..y.hi())
        .map_err(export_error)?;

    let mut mesh = chart.configure_mesh();
    if !scene.decorations.grid {
        mesh.disable_mesh();
    }
    if let Some(label) = &scene.decorations.x_label {
        mesh.x_desc(label.as_str());
    }
    if let Some(label) = &scene.decorations.y_label {
        mesh.y_desc(label.as_str());
    }
    mesh.draw().map_err(export_error)?;

    for series in scene.overlay.visible() {
        let color = RGBColor(series.color.r, series.color.g, series.color.b);
        for (k, segment) in series.samples.segments().into_iter().enumerate() {
            let annotation = chart
                .draw_series(LineSeries::new(segment, &color))
                .map_err(export_error)?;
            // one legend entry per series
            if k == 0 {
                annotation
                    .label(format!(" {}", series.label))
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            }
        }
    }

    if scene.decorations.legend {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(export_error)?;
    }
    root.present().map_err(export_error)?;
    Ok(())
}

/// Draws `scene` and writes it to `path` (`.png`, `.jpg`, `.jpeg` or `.bmp`).
pub fn render_to_file(scene: &Scene, path: &Path, size: (u32, u32)) -> Result<(), PlotError> {
    let extension = image_extension(path)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp = Builder::new()
        .prefix(".rusted_plotter_")
        .suffix(&format!(".{}", extension))
        .tempfile_in(dir)
        .map_err(|e| PlotError::Export(format!("cannot write to {}: {}", dir.display(), e)))?;
    debug!("drawing {} series into {}", scene.overlay.len(), temp.path().display());

    // the temp file is removed on drop if drawing fails
    draw_chart(scene, temp.path(), size)?;
    temp.persist(path).map_err(|e| PlotError::Export(e.error.to_string()))?;
    info!("plot saved to {}", path.display());
    Ok(())
}
