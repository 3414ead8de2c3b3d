use std::path::Path;

use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, LinePrimitive, PolylinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign,
    TextPrimitive,
};

/// Primitives painted by the last frame, by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub polylines_drawn: usize,
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Chart frames painted with Cairo and Pango onto an offscreen ARGB surface.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    background: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(format!(
                "cairo surface must be non-empty, got {width}x{height}"
            )));
        }
        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| cairo_error("create surface", err))?;
        Ok(Self {
            surface,
            background: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_background(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.background = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Saves the offscreen chart as a PNG file.
    pub fn write_png(&self, path: impl AsRef<Path>) -> ChartResult<()> {
        let path = path.as_ref();
        let mut file = std::fs::File::create(path).map_err(|err| {
            ChartError::InvalidData(format!("cannot create `{}`: {err}", path.display()))
        })?;
        self.surface
            .write_to_png(&mut file)
            .map_err(|err| ChartError::InvalidData(format!("png export failed: {err}")))
    }

    /// Paints `frame` on a host-owned context instead of the offscreen surface.
    pub fn render_on_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        set_source(context, self.background);
        context
            .paint()
            .map_err(|err| cairo_error("paint background", err))?;

        // Series first so axes and notes stay readable on top.
        for polyline in &frame.polylines {
            stroke_polyline(context, polyline)?;
        }
        for line in &frame.lines {
            stroke_line(context, line)?;
        }
        for rect in &frame.rects {
            fill_rect(context, rect)?;
        }
        for text in &frame.texts {
            show_text(context, text);
        }

        self.last_stats = CairoRenderStats {
            polylines_drawn: frame.polylines.iter().filter(|p| !p.points.is_empty()).count(),
            lines_drawn: frame.lines.len(),
            rects_drawn: frame.rects.len(),
            texts_drawn: frame.texts.len(),
        };
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context =
            Context::new(&self.surface).map_err(|err| cairo_error("create context", err))?;
        self.render_on_context(&context, frame)
    }
}

fn stroke_polyline(context: &Context, polyline: &PolylinePrimitive) -> ChartResult<()> {
    let Some((&(x, y), rest)) = polyline.points.split_first() else {
        return Ok(());
    };
    context.new_path();
    context.move_to(x, y);
    for &(x, y) in rest {
        context.line_to(x, y);
    }
    set_source(context, polyline.color);
    context.set_line_width(polyline.stroke_width);
    context
        .stroke()
        .map_err(|err| cairo_error("stroke series", err))
}

fn stroke_line(context: &Context, line: &LinePrimitive) -> ChartResult<()> {
    context.new_path();
    context.move_to(line.x1, line.y1);
    context.line_to(line.x2, line.y2);
    set_source(context, line.color);
    context.set_line_width(line.stroke_width);
    context.stroke().map_err(|err| cairo_error("stroke line", err))
}

fn fill_rect(context: &Context, rect: &RectPrimitive) -> ChartResult<()> {
    context.new_path();
    context.rectangle(rect.x, rect.y, rect.width, rect.height);
    set_source(context, rect.fill_color);
    if rect.border_width <= 0.0 {
        return context.fill().map_err(|err| cairo_error("fill note", err));
    }
    context
        .fill_preserve()
        .map_err(|err| cairo_error("fill note", err))?;
    set_source(context, rect.border_color);
    context.set_line_width(rect.border_width);
    context
        .stroke()
        .map_err(|err| cairo_error("stroke note border", err))
}

fn show_text(context: &Context, text: &TextPrimitive) {
    let layout = pangocairo::functions::create_layout(context);
    let weight = if text.bold { " Bold" } else { "" };
    let font = FontDescription::from_string(&format!("Sans{weight} {}px", text.font_size_px));
    layout.set_font_description(Some(&font));
    layout.set_text(&text.text);

    let width = f64::from(layout.pixel_size().0);
    let x = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - width / 2.0,
        TextHAlign::Right => text.x - width,
    };
    set_source(context, text.color);
    context.move_to(x, text.y);
    pangocairo::functions::show_layout(context, &layout);
}

fn set_source(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn cairo_error(action: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("cairo: {action}: {err}"))
}
