use leon::{ParseError, RenderError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Json {
        action: String,
        file_description: String,
        path: String,
        original: serde_json::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("No hostname was entered.")]
    EmptyHostname,

    #[error("Hostname `{}` must not contain a path separator.", .0)]
    HostnameWithPathSeparator(String),

    #[error("No monitor IDs were entered.")]
    EmptyMonitorInput,

    #[error("No valid monitor IDs were found in `{}`.", .0)]
    NoValidMonitorIds(String),

    #[error("Template file `{}` was not found.", .path)]
    TemplateNotFound { path: String },

    #[error("Output file `{}` would overwrite the template file.", .path)]
    OutputIsTemplate { path: String },

    #[error("Failed to launch `{}`: {}", .program, .original)]
    Launch {
        program: String,
        original: std::io::Error,
    },

    #[error("Could not determine the application directory: {}", .0)]
    ApplicationDirectory(std::io::Error),

    #[error("Terminal error: {}", .0)]
    Terminal(#[from] std::io::Error),

    #[error("Error parsing output name template: {}", .0)]
    Parse(#[from] ParseError),

    #[error("Error rendering output name template: {}", .0)]
    Render(#[from] RenderError),
}

impl Error {
    pub fn json_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_json::Error,
    ) -> Self {
        Self::Json {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    pub fn template_not_found(path: String) -> Self {
        Self::TemplateNotFound { path }
    }

    pub fn launch_error(program: String, original: std::io::Error) -> Self {
        Self::Launch { program, original }
    }
}
