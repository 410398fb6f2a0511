pub mod dataset;
pub mod error;
pub mod golden;
pub mod registry;

pub use dataset::{
    DatasetArgs, load_csv_dataset, load_file_dataset, read_csv_header, table_name_from_path,
};
pub use error::{IngestError, Result};
pub use golden::{load_golden_standard, parse_golden_standard};
pub use registry::{LoaderFn, load_dataset, loader_names, resolve_loader};
