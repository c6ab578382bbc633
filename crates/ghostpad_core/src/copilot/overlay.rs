//! Pixel placement of ghost text relative to the editing surface.

use super::buffer::EditBuffer;

/// Font parameters shared by the editor and the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub size: f32,
    pub line_height: f32,
}

/// Text width measurement supplied by the hosting UI.
pub trait TextMeasure {
    /// Width in pixels of a single line of `text` in `font`.
    fn measure_width(&self, text: &str, font: &FontMetrics) -> f32;
}

/// Fixed-advance measurement: every char is `advance_ratio * size` wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    pub advance_ratio: f32,
}

impl TextMeasure for MonospaceMeasure {
    fn measure_width(&self, text: &str, font: &FontMetrics) -> f32 {
        text.chars().count() as f32 * font.size * self.advance_ratio
    }
}

/// Top-left corner of the ghost text, relative to the editor's origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPosition {
    pub x: f32,
    pub y: f32,
}

/// Places ghost text at the caret. Padding and font must match the editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPositioner {
    pub padding_left: f32,
    pub padding_top: f32,
    pub font: FontMetrics,
}

impl OverlayPositioner {
    /// Position for the ghost text at the buffer's cursor.
    ///
    /// # Returns
    /// `None` when no suggestion is displayed.
    pub fn locate(
        &self,
        buffer: &EditBuffer,
        suggestion: Option<&str>,
        measure: &dyn TextMeasure,
    ) -> Option<OverlayPosition> {
        suggestion.filter(|text| !text.is_empty())?;
        let before = buffer.before_cursor();
        let line_index = before.matches('\n').count();
        let current_line = before.rsplit('\n').next().unwrap_or_default();
        Some(OverlayPosition {
            x: self.padding_left + measure.measure_width(current_line, &self.font),
            y: self.padding_top + line_index as f32 * self.font.line_height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEASURE: MonospaceMeasure = MonospaceMeasure { advance_ratio: 0.5 };

    fn positioner() -> OverlayPositioner {
        OverlayPositioner {
            padding_left: 4.0,
            padding_top: 2.0,
            font: FontMetrics {
                size: 10.0,
                line_height: 14.0,
            },
        }
    }

    #[test]
    fn no_suggestion_means_no_position() {
        let buffer = EditBuffer::at_end("hello");
        assert_eq!(positioner().locate(&buffer, None, &MEASURE), None);
        assert_eq!(positioner().locate(&buffer, Some(""), &MEASURE), None);
    }

    #[test]
    fn first_line_offsets_by_measured_width() {
        let buffer = EditBuffer::at_end("hello");
        let position = positioner()
            .locate(&buffer, Some(" world"), &MEASURE)
            .expect("position");
        assert_eq!(position, OverlayPosition { x: 29.0, y: 2.0 });
    }

    #[test]
    fn later_lines_use_only_the_current_line_width() {
        let buffer = EditBuffer::new("first line\nsecond\nab|rest", 20);
        let position = positioner()
            .locate(&buffer, Some("c"), &MEASURE)
            .expect("position");
        assert_eq!(position, OverlayPosition { x: 14.0, y: 30.0 });
    }

    #[test]
    fn cursor_right_after_newline_starts_at_padding() {
        let buffer = EditBuffer::at_end("line\n");
        let position = positioner()
            .locate(&buffer, Some("next"), &MEASURE)
            .expect("position");
        assert_eq!(position, OverlayPosition { x: 4.0, y: 16.0 });
    }
}
