pub mod error;
pub mod excel;
pub mod export;
pub mod pipeline;
pub mod source;
pub mod tabular;
pub mod vcf;

pub use error::{ImportError, Result};
pub use export::ExportFormat;
pub use pipeline::ContactPipeline;
pub use source::SourceKind;
