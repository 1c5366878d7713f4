pub mod quantize;
pub mod report;
pub mod svg_input;
pub mod svg_output;
