use super::colors::Rgb;
use super::geometry::Idx;

/// A single character cell of the terminal along with its styling.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Tuxel {
    content: char,
    idx: Idx,
    fgcolor: Option<Rgb>,
    bgcolor: Option<Rgb>,
    bold: bool,
}

impl Tuxel {
    pub(crate) fn new(idx: Idx) -> Self {
        Tuxel {
            content: ' ',
            fgcolor: None,
            bgcolor: None,
            bold: false,
            idx,
        }
    }

    pub(crate) fn set_content(&mut self, c: char) {
        self.content = c;
    }

    pub(crate) fn set_fgcolor(&mut self, c: Rgb) {
        self.fgcolor = Some(c);
    }

    pub(crate) fn set_bgcolor(&mut self, c: Rgb) {
        self.bgcolor = Some(c);
    }

    pub(crate) fn set_bold(&mut self) {
        self.bold = true;
    }

    pub(crate) fn coordinates(&self) -> (usize, usize) {
        (self.idx.0, self.idx.1)
    }

    pub(crate) fn clear(&mut self) {
        self.content = ' ';
        self.fgcolor = None;
        self.bgcolor = None;
        self.bold = false;
    }

    pub(crate) fn content(&self) -> char {
        self.content
    }

    pub(crate) fn bold(&self) -> bool {
        self.bold
    }

    pub(crate) fn colors(&self) -> (Option<Rgb>, Option<Rgb>) {
        (self.fgcolor, self.bgcolor)
    }
}

impl std::fmt::Display for Tuxel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content())
    }
}
