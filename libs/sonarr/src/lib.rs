mod client;
mod error;
mod import;
pub mod models;
mod profiles;
mod series;

pub use client::SonarrClient;
pub use error::SonarrError;
pub use import::{AddOptions, AddReport};
pub use models::{
    ImportListExclusion, MonitorType, QualityProfile, RootFolder, Series, SeriesType, Tag,
};

pub type Result<T> = std::result::Result<T, SonarrError>;
