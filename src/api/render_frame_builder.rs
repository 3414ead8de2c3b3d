use indexmap::IndexMap;

use crate::core::{CityId, PlotArea, Viewport};
use crate::error::ChartResult;
use crate::extensions::PlacedAnnotation;
use crate::render::{
    Color, LinePrimitive, PolylinePrimitive, RectPrimitive, RenderFrame, TextHAlign,
    TextPrimitive,
};

use super::axis_ticks::{time_axis_ticks, value_axis_ticks};
use super::{ChartScales, DrawnPath};

/// Colors and sizes used when materializing a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStyle {
    pub axis_color: Color,
    pub text_color: Color,
    pub annotation_color: Color,
    pub note_fill_color: Color,
    pub font_size_px: f64,
    pub tick_length_px: f64,
    pub axis_stroke_width: f64,
    pub series_stroke_width: f64,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            axis_color: Color::rgb(0.0, 0.0, 0.0),
            text_color: Color::rgb(0.0, 0.0, 0.0),
            annotation_color: Color::rgb(0.60, 0.20, 0.20),
            note_fill_color: Color::rgba(1.0, 1.0, 1.0, 0.85),
            font_size_px: 10.0,
            tick_length_px: 6.0,
            axis_stroke_width: 1.0,
            series_stroke_width: 1.5,
        }
    }
}

/// Everything one frame is built from.
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs<'a> {
    pub viewport: Viewport,
    pub plot: PlotArea,
    pub scales: ChartScales,
    pub drawn: &'a IndexMap<CityId, DrawnPath>,
    pub annotations: &'a [PlacedAnnotation],
    pub style: FrameStyle,
}

/// Materializes series, axes and annotations in viewport pixels.
pub fn build_render_frame(inputs: FrameInputs<'_>) -> ChartResult<RenderFrame> {
    let mut frame = RenderFrame::new(inputs.viewport);
    append_series(&mut frame, inputs);
    append_time_axis(&mut frame, inputs)?;
    append_value_axis(&mut frame, inputs)?;
    append_annotations(&mut frame, inputs);
    Ok(frame)
}

fn append_series(frame: &mut RenderFrame, inputs: FrameInputs<'_>) {
    let plot = inputs.plot;
    for path in inputs.drawn.values() {
        frame.polylines.push(PolylinePrimitive {
            class_name: path.class_name().to_owned(),
            points: path
                .geometry()
                .iter()
                .map(|point| plot.to_viewport(point.x, point.y))
                .collect(),
            stroke_width: inputs.style.series_stroke_width,
            color: path.color(),
        });
    }
}

fn append_time_axis(frame: &mut RenderFrame, inputs: FrameInputs<'_>) -> ChartResult<()> {
    let FrameInputs { plot, style, .. } = inputs;
    let axis_y = plot.top + plot.height;
    frame.lines.push(LinePrimitive::new(
        plot.left,
        axis_y,
        plot.left + plot.width,
        axis_y,
        style.axis_stroke_width,
        style.axis_color,
    ));

    for tick in time_axis_ticks(inputs.scales.time)? {
        let x = plot.left + tick.position_px;
        frame.lines.push(LinePrimitive::new(
            x,
            axis_y,
            x,
            axis_y + style.tick_length_px,
            style.axis_stroke_width,
            style.axis_color,
        ));
        frame.texts.push(TextPrimitive::new(
            tick.label,
            x,
            axis_y + style.tick_length_px + 3.0,
            style.font_size_px,
            style.text_color,
            TextHAlign::Center,
        ));
    }
    Ok(())
}

fn append_value_axis(frame: &mut RenderFrame, inputs: FrameInputs<'_>) -> ChartResult<()> {
    let FrameInputs { plot, style, .. } = inputs;
    frame.lines.push(LinePrimitive::new(
        plot.left,
        plot.top,
        plot.left,
        plot.top + plot.height,
        style.axis_stroke_width,
        style.axis_color,
    ));

    for tick in value_axis_ticks(inputs.scales.value)? {
        let y = plot.top + tick.position_px;
        frame.lines.push(LinePrimitive::new(
            plot.left - style.tick_length_px,
            y,
            plot.left,
            y,
            style.axis_stroke_width,
            style.axis_color,
        ));
        frame.texts.push(TextPrimitive::new(
            tick.label,
            plot.left - style.tick_length_px - 3.0,
            y - style.font_size_px * 0.5,
            style.font_size_px,
            style.text_color,
            TextHAlign::Right,
        ));
    }
    Ok(())
}

fn append_annotations(frame: &mut RenderFrame, inputs: FrameInputs<'_>) {
    let FrameInputs { plot, style, .. } = inputs;
    for placed in inputs.annotations {
        let (subject_x, subject_top) = plot.to_viewport(placed.x, placed.subject_top_px);
        let (_, subject_bottom) = plot.to_viewport(placed.x, placed.subject_bottom_px);
        frame.lines.push(LinePrimitive::new(
            subject_x,
            subject_top,
            subject_x,
            subject_bottom,
            style.axis_stroke_width,
            style.annotation_color,
        ));

        let (anchor_x, anchor_y) = plot.to_viewport(placed.x, placed.y);
        let (note_x, note_y) = plot.to_viewport(placed.note_x, placed.note_y);
        frame.lines.push(LinePrimitive::new(
            anchor_x,
            anchor_y,
            note_x,
            note_y,
            style.axis_stroke_width,
            style.annotation_color,
        ));

        let note = &placed.note;
        let (left, top) = plot.to_viewport(note.left_px, note.top_px);
        frame.rects.push(
            RectPrimitive::new(left, top, note.width_px, note.height_px, style.note_fill_color)
                .with_border(style.axis_stroke_width, style.annotation_color),
        );

        let padding = note.padding_px;
        let line_height = note.line_height_px;
        let mut y = top + padding;
        for line in &note.title_lines {
            frame.texts.push(
                TextPrimitive::new(
                    line.clone(),
                    left + padding,
                    y,
                    style.font_size_px,
                    style.annotation_color,
                    TextHAlign::Left,
                )
                .bold(),
            );
            y += line_height;
        }
        for line in &note.label_lines {
            frame.texts.push(TextPrimitive::new(
                line.clone(),
                left + padding,
                y,
                style.font_size_px,
                style.text_color,
                TextHAlign::Left,
            ));
            y += line_height;
        }
    }
}
