pub mod gpio;
pub mod spi;
