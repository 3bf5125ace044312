use textwrap::wrap;

use super::drawbuffer::DrawBuffer;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) enum HAlignment {
    #[default]
    Left,
    Center,
}

/// A line-oriented buffer that makes writing wrapped paragraphs to DrawBuffers somewhat easier.
#[derive(Default)]
pub(crate) struct TextBuffer {
    paragraphs: Vec<String>,
    halign: HAlignment,
}

impl TextBuffer {
    pub(crate) fn new(halign: HAlignment) -> Self {
        Self {
            paragraphs: Vec::new(),
            halign,
        }
    }

    pub(crate) fn write(&mut self, s: &str) {
        self.paragraphs.push(s.to_string())
    }

    /// Wrap every paragraph to `width` columns.
    pub(crate) fn lines(&self, width: usize) -> Vec<String> {
        if width == 0 {
            return Vec::new();
        }
        self.paragraphs
            .iter()
            .flat_map(|p| wrap(p, width))
            .map(|line| line.into_owned())
            .collect()
    }

    /// Write the wrapped text into `buf`, one line per row from the top, dropping whatever does
    /// not fit.
    pub(crate) fn flush(&self, buf: &mut DrawBuffer) {
        let rect = buf.inner();
        let top = rect.y() - buf.rectangle().y();
        for (y, line) in self.lines(rect.width()).iter().enumerate() {
            if y >= rect.height() {
                break;
            }
            let width_diff = rect.width().saturating_sub(line.chars().count());
            let x_index = match self.halign {
                HAlignment::Left => 0,
                HAlignment::Center => width_diff / 2,
            };
            buf.write_line(top + y, &format!("{:x_index$}{}", "", line));
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tui::canvas::Canvas;
    use rstest::*;

    #[test]
    fn wraps_on_word_boundaries() {
        let mut tb = TextBuffer::default();
        tb.write("use arrow keys to move");
        assert_eq!(tb.lines(10), vec!["use arrow", "keys to", "move"]);
        assert!(tb.lines(0).is_empty());
    }

    #[rstest]
    #[case::left(HAlignment::Left, "ab    ")]
    #[case::center(HAlignment::Center, "  ab  ")]
    fn flush_aligns(#[case] halign: HAlignment, #[case] expected: &str) {
        let mut canvas = Canvas::new(6, 2);
        let mut tb = TextBuffer::new(halign);
        tb.write("ab");
        tb.flush(&mut canvas.get_layer());
        assert_eq!(canvas.row_text(0), expected);
        assert_eq!(canvas.row_text(1), "      ");
    }

    #[test]
    fn flush_drops_overflowing_lines() {
        let mut canvas = Canvas::new(3, 2);
        let mut tb = TextBuffer::default();
        tb.write("aaa bbb ccc");
        tb.flush(&mut canvas.get_layer());
        assert_eq!(canvas.row_text(0), "aaa");
        assert_eq!(canvas.row_text(1), "bbb");
    }
}
