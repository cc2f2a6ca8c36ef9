mod object_document_store;
mod s3_store;
mod store_factory;

pub use object_document_store::ObjectDocumentStore;
pub use s3_store::S3DocumentStore;
pub use store_factory::DocumentStoreFactory;
