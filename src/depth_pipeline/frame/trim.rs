use crate::depth_pipeline::common::error::{PipelineError, Result};
use crate::depth_pipeline::frame::types::{DepthGrid, RawDepthFrame};

/// Number of rows/columns cropped from each edge of a raw frame.
///
/// Trimming discards the sensor's unreliable border pixels and lets the
/// operator restrict processing to the physical sandbox footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameTrim {
    pub left_columns: usize,
    pub right_columns: usize,
    pub top_rows: usize,
    pub bottom_rows: usize,
}

impl FrameTrim {
    /// No cropping on any edge.
    pub const NONE: FrameTrim = FrameTrim {
        left_columns: 0,
        right_columns: 0,
        top_rows: 0,
        bottom_rows: 0,
    };

    pub fn new(
        left_columns: usize,
        right_columns: usize,
        top_rows: usize,
        bottom_rows: usize,
    ) -> Self {
        Self {
            left_columns,
            right_columns,
            top_rows,
            bottom_rows,
        }
    }

    /// Dimensions left after cropping, rejecting degenerate results.
    pub fn trimmed_dimensions(
        &self,
        sensor_width: usize,
        sensor_height: usize,
    ) -> Result<(usize, usize)> {
        let width = sensor_width
            .checked_sub(self.left_columns + self.right_columns)
            .unwrap_or(0);
        let height = sensor_height
            .checked_sub(self.top_rows + self.bottom_rows)
            .unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidDimensions(width, height));
        }
        Ok((width, height))
    }
}

/// Crops the configured margins from a raw frame and copies the remaining
/// window into a fresh grid, casting samples to `i32`.
///
/// Pixel ordering stays row-major; the raw frame is left untouched.
pub fn trim_frame(frame: &RawDepthFrame, trim: &FrameTrim) -> Result<DepthGrid<i32>> {
    if frame.data.len() != frame.expected_len() {
        return Err(PipelineError::FrameSizeMismatch {
            expected: frame.expected_len(),
            actual: frame.data.len(),
        });
    }

    let (width, height) = trim.trimmed_dimensions(frame.width, frame.height)?;

    let mut data = Vec::with_capacity(width * height);
    for row in trim.top_rows..trim.top_rows + height {
        let start = row * frame.width + trim.left_columns;
        data.extend(frame.data[start..start + width].iter().map(|&d| d as i32));
    }

    Ok(DepthGrid::from_vec(width, height, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_4x3() -> RawDepthFrame {
        RawDepthFrame {
            width: 4,
            height: 3,
            data: (0..12).collect(),
        }
    }

    #[test]
    fn trim_none_copies_everything() {
        let trimmed = trim_frame(&frame_4x3(), &FrameTrim::NONE).unwrap();
        assert_eq!(trimmed.width(), 4);
        assert_eq!(trimmed.height(), 3);
        assert_eq!(trimmed.as_slice(), (0..12).collect::<Vec<i32>>().as_slice());
    }

    #[test]
    fn trim_crops_margins_row_major() {
        let trim = FrameTrim::new(1, 0, 1, 0);
        let trimmed = trim_frame(&frame_4x3(), &trim).unwrap();
        assert_eq!(trimmed.width(), 3);
        assert_eq!(trimmed.height(), 2);
        assert_eq!(trimmed.as_slice(), &[5, 6, 7, 9, 10, 11]);
    }

    #[test]
    fn trim_rejects_degenerate_dimensions() {
        let trim = FrameTrim::new(2, 2, 0, 0);
        let result = trim_frame(&frame_4x3(), &trim);
        assert!(matches!(
            result.unwrap_err(),
            PipelineError::InvalidDimensions(0, 3)
        ));
    }

    #[test]
    fn trim_rejects_oversized_margins() {
        let trim = FrameTrim::new(10, 10, 0, 0);
        assert!(trim_frame(&frame_4x3(), &trim).is_err());
    }

    #[test]
    fn trim_rejects_short_buffer() {
        let mut frame = frame_4x3();
        frame.data.pop();
        assert!(matches!(
            trim_frame(&frame, &FrameTrim::NONE).unwrap_err(),
            PipelineError::FrameSizeMismatch {
                expected: 12,
                actual: 11
            }
        ));
    }
}
