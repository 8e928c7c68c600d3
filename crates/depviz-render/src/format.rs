use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Artifact formats the renderers can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Svg,
    Pdf,
    Dot,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
            Self::Dot => "dot",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "svg" => Some(Self::Svg),
            "pdf" => Some(Self::Pdf),
            "dot" => Some(Self::Dot),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Final artifact path and format for a requested output name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTarget {
    pub path: PathBuf,
    pub format: OutputFormat,
}

impl RenderTarget {
    /// A recognized extension picks the format and is normalized to lower
    /// case. Anything else renders PNG, with `.png` appended to the full name
    /// so `graph.jpeg` becomes `graph.jpeg.png`.
    pub fn resolve(requested: &Path) -> Self {
        let recognized = requested
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(OutputFormat::from_extension);

        match recognized {
            Some(format) => Self {
                path: requested.with_extension(format.extension()),
                format,
            },
            None => {
                let mut name = OsString::from(requested.as_os_str());
                name.push(".png");
                Self {
                    path: PathBuf::from(name),
                    format: OutputFormat::Png,
                }
            }
        }
    }
}
