//! Option enums accepted by the feature clients.
//!
//! Named options go on the wire as their variant name, numeric options as
//! their discriminant.

use std::fmt;
use std::str::FromStr;

/// PDF page size. `Custom` uses the page width and height parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PageSize {
    Custom,
    A1,
    A2,
    A3,
    #[default]
    A4,
    A5,
    Letter,
    HalfLetter,
    Ledger,
    Legal,
}

impl PageSize {
    /// Wire value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Custom => "Custom",
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::A3 => "A3",
            Self::A4 => "A4",
            Self::A5 => "A5",
            Self::Letter => "Letter",
            Self::HalfLetter => "HalfLetter",
            Self::Ledger => "Ledger",
            Self::Legal => "Legal",
        }
    }

    const ALL: [Self; 10] = [
        Self::Custom,
        Self::A1,
        Self::A2,
        Self::A3,
        Self::A4,
        Self::A5,
        Self::Letter,
        Self::HalfLetter,
        Self::Ledger,
        Self::Legal,
    ];
}

/// PDF page orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PageOrientation {
    #[default]
    Portrait,
    Landscape,
}

impl PageOrientation {
    /// Wire value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "Portrait",
            Self::Landscape => "Landscape",
        }
    }

    const ALL: [Self; 2] = [Self::Portrait, Self::Landscape];
}

/// Rendering engine used for the HTML to PDF conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RenderingEngine {
    /// WebKit engine.
    #[default]
    WebKit,
    /// WebKit with restricted features.
    Restricted,
    /// Blink (Chromium) engine.
    Blink,
}

impl RenderingEngine {
    /// Wire value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WebKit => "WebKit",
            Self::Restricted => "Restricted",
            Self::Blink => "Blink",
        }
    }

    const ALL: [Self; 3] = [Self::WebKit, Self::Restricted, Self::Blink];
}

/// Startup mode of the converter.
///
/// `Manual` waits for the page to call `SelectPdf.startConversion()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StartupMode {
    #[default]
    Automatic,
    Manual,
}

impl StartupMode {
    /// Wire value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Automatic => "Automatic",
            Self::Manual => "Manual",
        }
    }
}

/// Protocol used for secure (HTTPS) connections made by the converter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SecureProtocol {
    #[default]
    Tls11OrNewer = 0,
    Tls10 = 1,
    Ssl3 = 2,
}

/// Page layout used when the PDF viewer opens the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PageLayout {
    SinglePage = 0,
    #[default]
    OneColumn = 1,
    TwoColumnLeft = 2,
    TwoColumnRight = 3,
}

/// Document display mode when the PDF viewer opens the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PageMode {
    #[default]
    UseNone = 0,
    UseOutlines = 1,
    UseThumbs = 2,
    FullScreen = 3,
    UseOC = 4,
    UseAttachments = 5,
}

/// Horizontal alignment of page numbers in the footer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PageNumbersAlignment {
    Left = 1,
    Center = 2,
    #[default]
    Right = 3,
}

/// Layout of extracted text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextLayout {
    /// Keeps the original page layout as closely as possible.
    #[default]
    Original = 0,
    /// Reading order.
    Reading = 1,
}

impl TextLayout {
    const ALL: [Self; 2] = [Self::Original, Self::Reading];

    fn name(self) -> &'static str {
        match self {
            Self::Original => "Original",
            Self::Reading => "Reading",
        }
    }
}

/// Output format of extracted text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    #[default]
    Text = 0,
    Html = 1,
}

impl OutputFormat {
    const ALL: [Self; 2] = [Self::Text, Self::Html];

    fn name(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Html => "Html",
        }
    }
}

/// Numeric wire value of an integer-valued option.
pub trait NumericOption: Copy {
    /// Discriminant sent to the service.
    fn value(self) -> i64;
}

macro_rules! numeric_option {
    ($($ty:ty),+ $(,)?) => {
        $(impl NumericOption for $ty {
            fn value(self) -> i64 {
                self as i64
            }
        })+
    };
}

numeric_option!(
    SecureProtocol,
    PageLayout,
    PageMode,
    PageNumbersAlignment,
    TextLayout,
    OutputFormat,
);

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PageOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RenderingEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn parse_named<T: Copy>(
    input: &str,
    all: &[T],
    name: impl Fn(T) -> &'static str,
    kind: &str,
) -> Result<T, String> {
    all.iter()
        .copied()
        .find(|candidate| name(*candidate).eq_ignore_ascii_case(input.trim()))
        .ok_or_else(|| {
            let choices: Vec<&str> = all.iter().map(|c| name(*c)).collect();
            format!("unknown {kind} '{input}' (expected one of: {})", choices.join(", "))
        })
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(s, &Self::ALL, Self::as_str, "page size")
    }
}

impl FromStr for PageOrientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(s, &Self::ALL, Self::as_str, "page orientation")
    }
}

impl FromStr for RenderingEngine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(s, &Self::ALL, Self::as_str, "rendering engine")
    }
}

impl FromStr for TextLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(s, &Self::ALL, Self::name, "text layout")
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(s, &Self::ALL, Self::name, "output format")
    }
}
