pub mod converter;

pub use converter::{
    convert_content, converter, converter_blocking, ConvertError, ConverterConfig,
    ConverterConfigBuilder, ConverterResult,
};
