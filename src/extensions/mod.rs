//! Overlays drawn on top of the series layer.

pub mod annotations;

pub use annotations::{
    ANNOTATION_ANCHOR_VALUE, Annotation, AnnotationLayer, AnnotationStyleConfig, NoteGeometry,
    PlacedAnnotation, default_annotations, wrap_text,
};
