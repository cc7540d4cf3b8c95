mod local_object_source;
mod object_source_factory;
mod s3_object_source;
mod scratch_dir;
mod store_error;

pub use local_object_source::LocalObjectSource;
pub use object_source_factory::ObjectSourceFactory;
pub use s3_object_source::S3ObjectSource;
pub use scratch_dir::LocalScratchStore;
