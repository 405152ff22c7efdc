//! Validated run configuration.

use crate::Args;
use crate::color::{ColorEnv, use_color};
use camino::{Utf8Path, Utf8PathBuf};
use miette::Diagnostic;
use pestat_report::RenderOptions;
use pestat_state::{PaletteError, QueuePalette, Selection};
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("--user {user} and --group {group} can't be combined")]
    #[diagnostic(
        code(pestat::conflicting_filters),
        help("filter by a single user or by a single group")
    )]
    ConflictingFilters { user: String, group: String },

    #[error("Failed to read queue palette {path}")]
    #[diagnostic(code(pestat::palette_io))]
    PaletteIo {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse queue palette {path}")]
    #[diagnostic(
        code(pestat::palette_format),
        help(r#"expected a JSON object like {{"day": "blue", "week": "magenta"}}"#)
    )]
    Palette {
        path: Utf8PathBuf,
        #[source]
        source: PaletteError,
    },
}

/// User or group whose jobs select nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityFilter {
    User(String),
    Group(String),
}

/// Where the two feeds come from. `None` means run the command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedSources {
    pub pbsnodes: Option<Utf8PathBuf>,
    pub qstat: Option<Utf8PathBuf>,
}

/// Everything a run needs, checked before any feed is read.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub selection: Selection,
    pub identity: Option<IdentityFilter>,
    pub render: RenderOptions,
    pub color: bool,
    pub palette: QueuePalette,
    pub sources: FeedSources,
}

impl ReportConfig {
    pub fn from_args(args: Args, env: &ColorEnv) -> Result<Self, ConfigError> {
        let color = use_color(args.color_flag(), env);

        let identity = match (args.user, args.group) {
            (Some(user), Some(group)) => {
                return Err(ConfigError::ConflictingFilters { user, group });
            }
            (Some(user), None) => Some(IdentityFilter::User(user)),
            (None, Some(group)) => Some(IdentityFilter::Group(group)),
            (None, None) => None,
        };

        let palette = match args.queue_colors.as_deref() {
            Some(path) => load_palette(path)?,
            None => QueuePalette::default(),
        };

        Ok(Self {
            selection: Selection {
                include_down: args.down,
                min_jobs: args.min_jobs,
                flagged_only: args.flagged,
            },
            identity,
            render: RenderOptions {
                show_users: args.show_users,
            },
            color,
            palette,
            sources: FeedSources {
                pbsnodes: args.pbsnodes_file,
                qstat: args.qstat_file,
            },
        })
    }
}

/// Load a queue palette from a JSON file.
pub fn load_palette(path: &Utf8Path) -> Result<QueuePalette, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::PaletteIo {
        path: path.to_path_buf(),
        source,
    })?;
    let palette = QueuePalette::from_json(&content).map_err(|source| ConfigError::Palette {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("loaded {} queue colors from {}", palette.len(), path);
    Ok(palette)
}
