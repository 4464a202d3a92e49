#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod mock;

pub use mock::{DEFAULT_EMBEDDING_DIMENSIONS, MockMlProvider, RecordedCall, create_mock_service};
