//! Tests for the GDAL command builders

pub(crate) mod mock_executor;
