#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Landscape,
    Portrait,
}

impl ImageFormat {
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if width > height {
            ImageFormat::Landscape
        } else {
            ImageFormat::Portrait
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ImageFormat::Landscape => "landscape",
            ImageFormat::Portrait => "portrait",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribution {
    pub name: String,
    pub link: String,
}

/// One photo that can back a pair of cards.
///
/// Two descriptors denote the same pair exactly when their urls are equal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub url: String,
    pub format: ImageFormat,
    pub attribution: Option<Attribution>,
}

impl ImageDescriptor {
    pub fn same_photo(&self, other: &ImageDescriptor) -> bool {
        self.url == other.url
    }
}
