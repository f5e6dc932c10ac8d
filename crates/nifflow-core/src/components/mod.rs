pub mod completion;
pub mod config;
pub mod connector;
pub mod io;

pub use completion::{CompletionOption, ListingMapping};
pub use config::{Configuration, ResolvedConfiguration};
pub use connector::{
    AuthCapability, CompletionSource, ConnectorDescriptor, FILTER_LISTING_PATH, FilterCapability,
    PipelineRouting, RangeRule, SettingDef, SettingType, ValidationRules,
};
pub use io::{Method, OutputRecord, ParameterSet, RequestDescriptor, ResponseDescriptor};
