use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::api::ChartScales;
use crate::error::{ChartError, ChartResult};

/// Value every annotation anchor is projected at, just above the x axis.
pub const ANNOTATION_ANCHOR_VALUE: f64 = 0.5;

/// Fixed event callout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub label: String,
    pub external_link: String,
}

impl Annotation {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        title: impl Into<String>,
        label: impl Into<String>,
        external_link: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            title: title.into(),
            label: label.into(),
            external_link: external_link.into(),
        }
    }
}

type AnnotationEntry = (&'static str, (i32, u32, u32), &'static str, &'static str, &'static str);

const DEFAULT_ANNOTATIONS: [AnnotationEntry; 3] = [
    (
        "kia-boys-doc-annot",
        (2022, 5, 31),
        "Kia Boys Documentary",
        "Kia Boys Documentary (A Story of Teenage Car Theft) was released on YouTube on May 31, 2022.",
        "https://www.youtube.com/watch?v=fbTrLyqL_nw",
    ),
    (
        "buffalo-crash-annot",
        (2022, 10, 25),
        "Deadly Buffalo Crash",
        "A stolen Kia was crashed and left 4 teenagers dead, per AP, on October 25, 2022 in Buffalo, NY.",
        "https://apnews.com/article/police-buffalo-f5c28ce63cd8a44937232696cb6c1a7e",
    ),
    (
        "milwaukee-news-annot",
        (2021, 8, 25),
        "Early Article from Milwaukee on Kia Boyz",
        "An early news article reporting on \"Kia Boyz\" from August 25, 2021 in Milwaukee, WI.",
        "https://shepherdexpress.com/news/features/kia-and-hyundai-thefts-continue-to-buzz-online/",
    ),
];

/// The three events called out on the default chart.
#[must_use]
pub fn default_annotations() -> Vec<Annotation> {
    let annotations: Vec<Annotation> = DEFAULT_ANNOTATIONS
        .iter()
        .filter_map(|&(id, (year, month, day), title, label, link)| {
            let date = NaiveDate::from_ymd_opt(year, month, day)?;
            Some(Annotation::new(id, date, title, label, link))
        })
        .collect();
    debug_assert_eq!(annotations.len(), DEFAULT_ANNOTATIONS.len());
    annotations
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotationStyleConfig {
    pub note_padding_px: f64,
    pub text_wrap_px: f64,
    pub char_width_px: f64,
    pub line_height_px: f64,
    /// Note offset above the anchor as a fraction of the plot height.
    pub note_offset_ratio: f64,
}

impl Default for AnnotationStyleConfig {
    fn default() -> Self {
        Self {
            note_padding_px: 5.0,
            text_wrap_px: 80.0,
            char_width_px: 5.5,
            line_height_px: 12.0,
            note_offset_ratio: 0.2,
        }
    }
}

impl AnnotationStyleConfig {
    pub fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.note_padding_px, "note_padding_px"),
            (self.text_wrap_px, "text_wrap_px"),
            (self.char_width_px, "char_width_px"),
            (self.line_height_px, "line_height_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "annotation config `{name}` must be finite and > 0"
                )));
            }
        }
        if !self.note_offset_ratio.is_finite() || !(0.0..=1.0).contains(&self.note_offset_ratio) {
            return Err(ChartError::InvalidData(
                "annotation config `note_offset_ratio` must be in [0, 1]".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Note box of a placed annotation, plot-local pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteGeometry {
    pub left_px: f64,
    pub top_px: f64,
    pub width_px: f64,
    pub height_px: f64,
    pub padding_px: f64,
    pub line_height_px: f64,
    pub title_lines: Vec<String>,
    pub label_lines: Vec<String>,
}

impl NoteGeometry {
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left_px
            && x <= self.left_px + self.width_px
            && y >= self.top_px
            && y <= self.top_px + self.height_px
    }
}

/// Annotation projected onto the current scales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedAnnotation {
    pub id: String,
    /// Anchor on the data plane.
    pub x: f64,
    pub y: f64,
    /// End of the connector, where the note attaches.
    pub note_x: f64,
    pub note_y: f64,
    /// Vertical threshold line spanning the plot.
    pub subject_top_px: f64,
    pub subject_bottom_px: f64,
    pub note: NoteGeometry,
}

/// Static overlay of event callouts, re-projected whenever scales change.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationLayer {
    annotations: Vec<Annotation>,
    config: AnnotationStyleConfig,
    placed: Vec<PlacedAnnotation>,
}

impl AnnotationLayer {
    pub fn new(annotations: Vec<Annotation>, config: AnnotationStyleConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            annotations,
            config,
            placed: Vec::new(),
        })
    }

    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    #[must_use]
    pub fn config(&self) -> AnnotationStyleConfig {
        self.config
    }

    /// Placements from the last `project` call, in annotation order.
    #[must_use]
    pub fn placed(&self) -> &[PlacedAnnotation] {
        &self.placed
    }

    pub fn project(&mut self, scales: ChartScales) -> ChartResult<&[PlacedAnnotation]> {
        let plot_height = scales.value.height_px();
        let anchor_y = scales.value.value_to_pixel(ANNOTATION_ANCHOR_VALUE)?;
        let note_dy = -plot_height * self.config.note_offset_ratio;

        let mut placed = Vec::with_capacity(self.annotations.len());
        for annotation in &self.annotations {
            let x = scales.time.date_to_pixel(annotation.date)?;
            let note_x = x;
            let note_y = anchor_y + note_dy;
            placed.push(PlacedAnnotation {
                id: annotation.id.clone(),
                x,
                y: anchor_y,
                note_x,
                note_y,
                subject_top_px: 0.0,
                subject_bottom_px: plot_height,
                note: self.layout_note(annotation, note_x, note_y),
            });
        }

        self.placed = placed;
        Ok(&self.placed)
    }

    /// Returns the annotation whose note box contains the plot-local point.
    /// Overlapping notes resolve to the one whose anchor is nearest in x.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&Annotation> {
        let placed = self
            .placed
            .iter()
            .filter(|placed| placed.note.contains(x, y))
            .min_by_key(|placed| OrderedFloat((placed.x - x).abs()))?;
        self.annotations
            .iter()
            .find(|annotation| annotation.id == placed.id)
    }

    /// Lays out the note so its bottom edge sits on the connector end.
    fn layout_note(&self, annotation: &Annotation, note_x: f64, note_y: f64) -> NoteGeometry {
        let config = self.config;
        let title_lines = wrap_text(&annotation.title, config.text_wrap_px, config.char_width_px);
        let label_lines = wrap_text(&annotation.label, config.text_wrap_px, config.char_width_px);

        let widest = title_lines
            .iter()
            .chain(&label_lines)
            .map(|line| line.chars().count() as f64 * config.char_width_px)
            .fold(0.0_f64, f64::max);
        let line_count = (title_lines.len() + label_lines.len()) as f64;
        let width_px = widest + 2.0 * config.note_padding_px;
        let height_px = line_count * config.line_height_px + 2.0 * config.note_padding_px;

        NoteGeometry {
            left_px: note_x,
            top_px: note_y - height_px,
            width_px,
            height_px,
            padding_px: config.note_padding_px,
            line_height_px: config.line_height_px,
            title_lines,
            label_lines,
        }
    }
}

/// Greedy word wrap using a fixed per-character width estimate.
///
/// Words wider than the limit get a line of their own rather than being split.
#[must_use]
pub fn wrap_text(text: &str, max_width_px: f64, char_width_px: f64) -> Vec<String> {
    let max_chars = if char_width_px > 0.0 {
        ((max_width_px / char_width_px).floor() as usize).max(1)
    } else {
        usize::MAX
    };

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
