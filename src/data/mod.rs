pub mod animator;
pub mod channel;
pub mod frame;
pub mod rolling;
pub mod series_style;
pub mod source;
pub mod transform;
pub mod x_formatter;
